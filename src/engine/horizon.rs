use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

use super::{DragState, Engine};

/// Monday of the week containing `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Allowed scheduling range and the week-aligned navigation bounds derived
/// from "today".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Horizon {
    pub today: NaiveDate,
    pub max_date: NaiveDate,
    pub min_week_start: NaiveDate,
    pub max_week_start: NaiveDate,
}

impl Horizon {
    pub fn new(today: NaiveDate, availability_days: u32) -> Self {
        let span = availability_days.max(1) as i64 - 1;
        let max_date = today + Duration::days(span);
        Self {
            today,
            max_date,
            min_week_start: start_of_week(today),
            max_week_start: start_of_week(max_date),
        }
    }

    /// `today <= date <= max_date`.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.today <= date && date <= self.max_date
    }

    /// Snap `date` to its week start, clamped into the navigable weeks.
    pub fn clamp_week_start(&self, date: NaiveDate) -> NaiveDate {
        start_of_week(date).clamp(self.min_week_start, self.max_week_start)
    }

    /// Number of navigable weeks.
    pub fn week_count(&self) -> u32 {
        ((self.max_week_start - self.min_week_start).num_days() / 7) as u32 + 1
    }
}

// ── Week navigation ──────────────────────────────────────────────

impl Engine {
    /// Monday of the visible week.
    pub fn week_start(&self) -> NaiveDate {
        self.week_start
    }

    /// Show the week containing `date`, clamped to the horizon's weeks. Any
    /// drag in progress is dropped.
    pub fn go_to_week(&mut self, date: NaiveDate) -> NaiveDate {
        self.drag = DragState::Idle;
        self.week_start = self.horizon().clamp_week_start(date);
        self.week_start
    }

    pub fn next_week(&mut self) -> NaiveDate {
        self.go_to_week(self.week_start + Duration::days(7))
    }

    pub fn prev_week(&mut self) -> NaiveDate {
        self.go_to_week(self.week_start - Duration::days(7))
    }

    pub fn can_go_back(&self) -> bool {
        self.week_start > self.horizon().min_week_start
    }

    pub fn can_go_forward(&self) -> bool {
        self.week_start < self.horizon().max_week_start
    }
}
