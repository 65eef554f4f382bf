use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Minutes since local midnight. The only time-of-day type.
pub type Minutes = i32;

/// Slot identity.
pub type SlotId = Ulid;

/// Reference into the external service catalog. Not owned; may go stale.
pub type ServiceId = String;

/// Half-open interval `[start, end)` within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Minutes,
    pub end: Minutes,
}

impl Span {
    pub fn new(start: Minutes, end: Minutes) -> Self {
        debug_assert!(start < end, "Span start must be before end");
        Self { start, end }
    }

    pub fn duration(&self) -> Minutes {
        self.end - self.start
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    pub fn contains_minute(&self, t: Minutes) -> bool {
        self.start <= t && t < self.end
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:02}:{:02}-{:02}:{:02}",
            self.start / 60,
            self.start % 60,
            self.end / 60,
            self.end % 60
        )
    }
}

/// A date-scoped availability window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub id: SlotId,
    pub date: NaiveDate,
    pub span: Span,
    /// Services offered in this window. Membership is advisory: ids the
    /// catalog no longer knows are skipped by readers.
    pub services: BTreeSet<ServiceId>,
}

impl TimeSlot {
    /// Day of week, 0 = Monday.
    pub fn weekday_index(&self) -> u32 {
        self.date.weekday().num_days_from_monday()
    }

    /// Same weekday and identical window: the series relation.
    pub fn same_series(&self, other: &TimeSlot) -> bool {
        self.date.weekday() == other.date.weekday() && self.span == other.span
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modality {
    InPerson,
    Online,
}

/// Catalog entry offered inside slots. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceType {
    pub id: ServiceId,
    pub title: String,
    /// Session length in minutes.
    pub duration: Minutes,
    pub modality: Modality,
    /// Price in minor currency units.
    pub price: u64,
}

/// Store transitions. Every mutation the engine performs is one of these.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    SlotCreated {
        slot: TimeSlot,
    },
    SlotResized {
        id: SlotId,
        span: Span,
    },
    ServicesChanged {
        id: SlotId,
        services: BTreeSet<ServiceId>,
    },
    SlotRemoved {
        id: SlotId,
    },
    SeriesRemoved {
        ids: Vec<SlotId>,
    },
}

// ── Result types ─────────────────────────────────────────────────

/// One service's fit count inside a slot window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapacityLine {
    pub service: ServiceType,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopiedSlot {
    pub id: SlotId,
    pub date: NaiveDate,
}

/// Per-candidate tally of a copy-to-weekday run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyReport {
    pub created: Vec<CopiedSlot>,
    pub skipped_existing: u32,
    pub skipped_overlap: u32,
}

/// Why a copy run did (or did not) create anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyVerdict {
    Created,
    AllCovered,
    AllOverlap,
    AllSkipped,
    NoCandidates,
}

impl CopyReport {
    pub fn created_count(&self) -> u32 {
        self.created.len() as u32
    }

    pub fn candidates(&self) -> u32 {
        self.created_count() + self.skipped_existing + self.skipped_overlap
    }

    pub fn verdict(&self) -> CopyVerdict {
        match (self.created_count(), self.skipped_existing, self.skipped_overlap) {
            (0, 0, 0) => CopyVerdict::NoCandidates,
            (0, _, 0) => CopyVerdict::AllCovered,
            (0, 0, _) => CopyVerdict::AllOverlap,
            (0, _, _) => CopyVerdict::AllSkipped,
            _ => CopyVerdict::Created,
        }
    }
}

/// What a mutating call did, in a shape a presentation layer can render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Created { slot: TimeSlot },
    Rejected { reason: &'static str, message: String },
    Updated { slot: TimeSlot },
    Deleted { id: SlotId },
    SeriesDeleted { count: u32, dates: Vec<NaiveDate> },
    SeriesCopied { report: CopyReport },
}

/// One column of the visible week.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub slots: Vec<TimeSlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(d: NaiveDate, start: Minutes, end: Minutes) -> TimeSlot {
        TimeSlot {
            id: Ulid::new(),
            date: d,
            span: Span::new(start, end),
            services: BTreeSet::new(),
        }
    }

    #[test]
    fn span_basics() {
        let s = Span::new(540, 720);
        assert_eq!(s.duration(), 180);
        assert!(s.contains_minute(540));
        assert!(s.contains_minute(719));
        assert!(!s.contains_minute(720)); // half-open
    }

    #[test]
    fn span_overlap() {
        let a = Span::new(540, 720);
        let b = Span::new(600, 660);
        let c = Span::new(720, 780);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c)); // back-to-back, not overlapping
        assert!(!c.overlaps(&a));
    }

    #[test]
    fn span_display() {
        assert_eq!(Span::new(540, 750).to_string(), "09:00-12:30");
        assert_eq!(Span::new(420, 1260).to_string(), "07:00-21:00");
    }

    #[test]
    fn weekday_index_starts_monday() {
        // 2026-10-19 is a Monday.
        assert_eq!(slot(date(2026, 10, 19), 540, 600).weekday_index(), 0);
        assert_eq!(slot(date(2026, 10, 25), 540, 600).weekday_index(), 6);
    }

    #[test]
    fn series_relation() {
        let a = slot(date(2026, 10, 19), 540, 720);
        let b = slot(date(2026, 10, 26), 540, 720);
        let shifted = slot(date(2026, 10, 26), 570, 720);
        let tuesday = slot(date(2026, 10, 20), 540, 720);
        assert!(a.same_series(&b));
        assert!(!a.same_series(&shifted));
        assert!(!a.same_series(&tuesday));
    }

    #[test]
    fn copy_verdicts() {
        let mut r = CopyReport::default();
        assert_eq!(r.verdict(), CopyVerdict::NoCandidates);
        r.skipped_existing = 2;
        assert_eq!(r.verdict(), CopyVerdict::AllCovered);
        r.skipped_overlap = 1;
        assert_eq!(r.verdict(), CopyVerdict::AllSkipped);
        r.skipped_existing = 0;
        assert_eq!(r.verdict(), CopyVerdict::AllOverlap);
        r.created.push(CopiedSlot { id: Ulid::new(), date: date(2026, 10, 21) });
        assert_eq!(r.verdict(), CopyVerdict::Created);
        assert_eq!(r.candidates(), 2);
    }

    #[test]
    fn event_serialization_roundtrip() {
        let event = Event::SlotCreated {
            slot: slot(date(2026, 10, 19), 540, 720),
        };
        let json = serde_json::to_string(&event).unwrap();
        let decoded: Event = serde_json::from_str(&json).unwrap();
        assert_eq!(event, decoded);
    }

    #[test]
    fn outcome_serializes_tagged() {
        let outcome = Outcome::SeriesDeleted {
            count: 2,
            dates: vec![date(2026, 10, 19), date(2026, 10, 26)],
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["outcome"], "series_deleted");
        assert_eq!(json["count"], 2);
        assert_eq!(json["dates"][1], "2026-10-26");
    }
}
