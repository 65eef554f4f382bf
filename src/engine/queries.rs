use chrono::{Duration, NaiveDate};
use tracing::warn;

use crate::model::*;

use super::capacity::{capacity_lines, stale_services};
use super::{Engine, EngineError};

impl Engine {
    pub fn slot(&self, id: SlotId) -> Option<&TimeSlot> {
        self.store.get(&id)
    }

    pub fn slots_on(&self, date: NaiveDate) -> &[TimeSlot] {
        self.store.on_date(date)
    }

    pub fn list_slots(&self) -> Vec<TimeSlot> {
        self.store.iter().cloned().collect()
    }

    /// Slot covering `minute` on `date`, if any.
    pub fn slot_at(&self, date: NaiveDate, minute: Minutes) -> Option<&TimeSlot> {
        self.store
            .on_date(date)
            .iter()
            .find(|s| s.span.contains_minute(minute))
    }

    /// Seven columns, Monday first, for the visible week.
    pub fn week_view(&self) -> Vec<DayColumn> {
        (0..7)
            .map(|offset| {
                let date = self.week_start + Duration::days(offset);
                DayColumn {
                    date,
                    slots: self.store.on_date(date).to_vec(),
                }
            })
            .collect()
    }

    /// The slot plus every slot sharing its weekday and window, by date.
    pub fn series_of(&self, id: SlotId) -> Result<Vec<TimeSlot>, EngineError> {
        let anchor = self.store.get(&id).ok_or(EngineError::NotFound(id))?;
        Ok(self
            .store
            .iter()
            .filter(|s| s.id == id || s.same_series(anchor))
            .cloned()
            .collect())
    }

    /// Enabled services the catalog still knows, in catalog order.
    pub fn enabled_services(&self, id: SlotId) -> Result<Vec<ServiceType>, EngineError> {
        let slot = self.store.get(&id).ok_or(EngineError::NotFound(id))?;
        Ok(self
            .services()
            .into_iter()
            .filter(|s| slot.services.contains(&s.id))
            .collect())
    }

    /// Per-service fit counts for the slot. See [`capacity_lines`] for the
    /// caveats of the estimate.
    pub fn capacity_lines(&self, id: SlotId) -> Result<Vec<CapacityLine>, EngineError> {
        let slot = self.store.get(&id).ok_or(EngineError::NotFound(id))?;
        let catalog = self.services();
        let stale = stale_services(slot, &catalog);
        if !stale.is_empty() {
            warn!("slot {id} references unknown services {stale:?}");
        }
        Ok(capacity_lines(slot, &catalog))
    }
}
