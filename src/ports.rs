use chrono::NaiveDate;
use ulid::{Generator, Ulid};

use crate::model::{ServiceType, SlotId};

/// Read-only service catalog. Order is display order.
pub trait ServiceCatalog {
    fn services(&self) -> Vec<ServiceType>;
}

impl ServiceCatalog for Vec<ServiceType> {
    fn services(&self) -> Vec<ServiceType> {
        self.clone()
    }
}

/// Source of "today".
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local wall-clock date.
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Local::now().date_naive()
    }
}

/// Pinned date for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub trait IdGenerator {
    fn next_id(&mut self) -> SlotId;
}

/// Monotonic ULIDs: ids generated within the same millisecond still sort in
/// creation order.
pub struct UlidGenerator {
    inner: Generator,
}

impl UlidGenerator {
    pub fn new() -> Self {
        Self {
            inner: Generator::new(),
        }
    }
}

impl Default for UlidGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for UlidGenerator {
    fn next_id(&mut self) -> SlotId {
        // Overflow only after 2^80 ids in one millisecond.
        self.inner.generate().unwrap_or_else(|_| Ulid::new())
    }
}

/// Deterministic ids `1, 2, 3, ...` (timestamp part zero).
#[derive(Debug, Default)]
pub struct SequentialIds {
    next: u128,
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> SlotId {
        self.next += 1;
        Ulid::from_parts(0, self.next)
    }
}
