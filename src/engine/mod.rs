mod capacity;
mod conflict;
mod drag;
mod error;
mod horizon;
mod mutations;
mod queries;
mod recurrence;
mod store;

pub use capacity::{capacity_lines, fit_count, stale_services};
pub use conflict::has_overlap;
pub use drag::{DragStart, DragState};
pub use error::EngineError;
pub use horizon::{start_of_week, Horizon};
pub use recurrence::candidate_dates;
pub use store::SlotStore;

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{ConfigError, ScheduleConfig};
use crate::model::*;
use crate::observability;
use crate::ports::{Clock, IdGenerator, ServiceCatalog};

/// Single-editor slot scheduler. Owns the store; every mutation takes
/// `&mut self` and either applies one or more [`Event`]s or returns an
/// [`EngineError`] with the store untouched.
///
/// Applied events are journaled until the caller drains them with
/// [`Engine::drain_events`] to persist or broadcast.
pub struct Engine {
    config: ScheduleConfig,
    store: SlotStore,
    catalog: Box<dyn ServiceCatalog>,
    clock: Box<dyn Clock>,
    ids: Box<dyn IdGenerator>,
    drag: DragState,
    active: Option<SlotId>,
    week_start: NaiveDate,
    journal: Vec<Event>,
}

impl Engine {
    pub fn new(
        config: ScheduleConfig,
        catalog: Box<dyn ServiceCatalog>,
        clock: Box<dyn Clock>,
        ids: Box<dyn IdGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let week_start = Horizon::new(clock.today(), config.availability_days).min_week_start;
        Ok(Self {
            config,
            store: SlotStore::new(),
            catalog,
            clock,
            ids,
            drag: DragState::Idle,
            active: None,
            week_start,
            journal: Vec::new(),
        })
    }

    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    pub fn store(&self) -> &SlotStore {
        &self.store
    }

    /// Bounds derived from the clock's current date.
    pub fn horizon(&self) -> Horizon {
        Horizon::new(self.clock.today(), self.config.availability_days)
    }

    pub(crate) fn services(&self) -> Vec<ServiceType> {
        self.catalog.services()
    }

    pub(crate) fn next_id(&mut self) -> SlotId {
        self.ids.next_id()
    }

    /// Seed the store with previously persisted slots. All-or-nothing: if any
    /// slot breaks the day window, duration, id or overlap rules, nothing is
    /// loaded. Loaded slots are not journaled.
    pub fn load(&mut self, slots: impl IntoIterator<Item = TimeSlot>) -> Result<usize, EngineError> {
        let mut staged = self.store.clone();
        let mut count = 0usize;
        for slot in slots {
            conflict::validate_span(&self.config, &slot.span)?;
            if staged.contains(&slot.id) {
                return Err(EngineError::DuplicateId(slot.id));
            }
            conflict::check_date_capacity(&self.config, &staged, slot.date)?;
            conflict::check_no_overlap(&staged, slot.date, &slot.span, None)?;
            staged.apply(&Event::SlotCreated { slot });
            count += 1;
        }
        self.store = staged;
        debug!("loaded {count} slots");
        Ok(count)
    }

    /// Take every event applied since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.journal)
    }

    /// Apply + journal + count in one call.
    pub(super) fn apply(&mut self, event: Event) {
        self.store.apply(&event);
        metrics::counter!(observability::MUTATIONS_TOTAL, "op" => observability::event_label(&event))
            .increment(1);
        self.journal.push(event);
    }

    /// Log and count a refused mutation, handing the error back.
    pub(super) fn rejected(&self, op: &'static str, e: EngineError) -> EngineError {
        debug!("{op} rejected: {e}");
        metrics::counter!(observability::REJECTIONS_TOTAL, "reason" => e.code()).increment(1);
        e
    }
}
