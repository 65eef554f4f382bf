use std::collections::BTreeSet;

use chrono::NaiveDate;
use tracing::info;

use crate::model::*;

use super::conflict::{check_date_capacity, check_no_overlap};
use super::{Engine, EngineError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    Start,
    End,
}

impl Engine {
    /// Insert the slot a finished drag describes, with every catalog service
    /// enabled, and make it active.
    pub(super) fn commit_drag(
        &mut self,
        date: NaiveDate,
        anchor: Minutes,
        cursor: Minutes,
    ) -> Result<Outcome, EngineError> {
        let span = self.drag_span(anchor, cursor)?;
        let horizon = self.horizon();
        if date > horizon.max_date {
            return Err(EngineError::BeyondHorizon {
                date,
                max_date: horizon.max_date,
            });
        }
        check_date_capacity(&self.config, &self.store, date)?;
        check_no_overlap(&self.store, date, &span, None)?;

        let services: BTreeSet<ServiceId> = self.services().into_iter().map(|s| s.id).collect();
        let slot = TimeSlot {
            id: self.next_id(),
            date,
            span,
            services,
        };
        info!("slot {} created on {date} at {span}", slot.id);
        self.active = Some(slot.id);
        self.apply(Event::SlotCreated { slot: slot.clone() });
        Ok(Outcome::Created { slot })
    }

    /// Move the active slot's start by `steps` quanta (negative = earlier).
    pub fn nudge_start(&mut self, steps: i32) -> Result<Outcome, EngineError> {
        self.nudge(Boundary::Start, steps)
            .map_err(|e| self.rejected("nudge_start", e))
    }

    /// Move the active slot's end by `steps` quanta (negative = earlier).
    pub fn nudge_end(&mut self, steps: i32) -> Result<Outcome, EngineError> {
        self.nudge(Boundary::End, steps)
            .map_err(|e| self.rejected("nudge_end", e))
    }

    fn nudge(&mut self, boundary: Boundary, steps: i32) -> Result<Outcome, EngineError> {
        let id = self.active.ok_or(EngineError::NoActiveSlot)?;
        let slot = self.store.get(&id).ok_or(EngineError::NotFound(id))?;
        let (date, span) = (slot.date, slot.span);
        if steps == 0 {
            return Ok(Outcome::Updated { slot: slot.clone() });
        }

        let q = self.config.quantum;
        let shifted = |edge: Minutes| {
            steps
                .checked_mul(q)
                .and_then(|shift| edge.checked_add(shift))
                .ok_or(EngineError::OutOfDay {
                    minute: edge.saturating_add(steps.saturating_mul(q)),
                })
        };
        let min = self.config.min_slot_duration;
        let new_span = match boundary {
            Boundary::Start => {
                let start = shifted(span.start)?;
                if start < self.config.day_start {
                    return Err(EngineError::OutOfDay { minute: start });
                }
                if start > span.end - min {
                    return Err(EngineError::TooShort {
                        span: Span { start, end: span.end },
                    });
                }
                Span::new(start, span.end)
            }
            Boundary::End => {
                let end = shifted(span.end)?;
                if end > self.config.day_end {
                    return Err(EngineError::OutOfDay { minute: end });
                }
                if end < span.start + min {
                    return Err(EngineError::TooShort {
                        span: Span { start: span.start, end },
                    });
                }
                Span::new(span.start, end)
            }
        };
        check_no_overlap(&self.store, date, &new_span, Some(id))?;

        self.apply(Event::SlotResized { id, span: new_span });
        let slot = self.store.get(&id).ok_or(EngineError::NotFound(id))?;
        Ok(Outcome::Updated { slot: slot.clone() })
    }

    /// Add `service_id` to the slot if absent, remove it if present.
    pub fn toggle_service(&mut self, id: SlotId, service_id: &str) -> Result<Outcome, EngineError> {
        let Some(slot) = self.store.get(&id) else {
            return Err(self.rejected("toggle_service", EngineError::NotFound(id)));
        };
        let mut services = slot.services.clone();
        if !services.remove(service_id) {
            services.insert(service_id.to_string());
        }
        self.apply(Event::ServicesChanged { id, services });
        let slot = self.store.get(&id).ok_or(EngineError::NotFound(id))?;
        Ok(Outcome::Updated { slot: slot.clone() })
    }

    pub fn delete_slot(&mut self, id: SlotId) -> Result<Outcome, EngineError> {
        if !self.store.contains(&id) {
            return Err(self.rejected("delete_slot", EngineError::NotFound(id)));
        }
        self.apply(Event::SlotRemoved { id });
        if self.active == Some(id) {
            self.active = None;
        }
        info!("slot {id} deleted");
        Ok(Outcome::Deleted { id })
    }

    /// Remove the slot and every slot on the same weekday with the identical
    /// window, in one transition.
    pub fn delete_series(&mut self, id: SlotId) -> Result<Outcome, EngineError> {
        let series = match self.series_of(id) {
            Ok(series) => series,
            Err(e) => return Err(self.rejected("delete_series", e)),
        };
        let ids: Vec<SlotId> = series.iter().map(|s| s.id).collect();
        let dates: Vec<NaiveDate> = series.iter().map(|s| s.date).collect();

        if let Some(active) = self.active
            && ids.contains(&active)
        {
            self.active = None;
        }
        self.apply(Event::SeriesRemoved { ids });
        info!("series of {id} deleted: {} slots", dates.len());
        Ok(Outcome::SeriesDeleted {
            count: dates.len() as u32,
            dates,
        })
    }
}
