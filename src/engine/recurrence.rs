use chrono::{Duration, NaiveDate, Weekday};
use tracing::{debug, info};

use crate::model::*;
use crate::observability;

use super::conflict::has_overlap;
use super::horizon::Horizon;
use super::{Engine, EngineError};

/// Dates with `weekday` inside the horizon, walking `weeks` weeks from the
/// first navigable Monday. Dates before today or past the max date are dropped.
pub fn candidate_dates(horizon: &Horizon, weekday: Weekday, weeks: u32) -> Vec<NaiveDate> {
    let offset = weekday.num_days_from_monday() as i64;
    (0..weeks as i64)
        .map(|w| horizon.min_week_start + Duration::days(w * 7 + offset))
        .filter(|d| horizon.contains(*d))
        .collect()
}

enum Candidate {
    Existing,
    Overlap,
    Free,
}

impl Engine {
    /// Clone the slot's window and services onto every `weekday` in the
    /// horizon except its own date. At least every navigable week is walked,
    /// whatever `recurrence_weeks` says. Dates that already hold the identical
    /// window, or any overlapping slot, are skipped and counted. Never fails
    /// once the source exists.
    pub fn copy_to_weekday(&mut self, id: SlotId, weekday: Weekday) -> Result<Outcome, EngineError> {
        let Some(source) = self.store.get(&id).cloned() else {
            return Err(self.rejected("copy_to_weekday", EngineError::NotFound(id)));
        };
        let horizon = self.horizon();
        let weeks = self.config.recurrence_weeks.max(horizon.week_count());
        let mut report = CopyReport::default();

        for date in candidate_dates(&horizon, weekday, weeks) {
            if date == source.date {
                continue;
            }
            match self.classify(date, &source.span) {
                Candidate::Existing => {
                    debug!("{date}: {} already present", source.span);
                    report.skipped_existing += 1;
                }
                Candidate::Overlap => {
                    debug!("{date}: {} overlaps", source.span);
                    report.skipped_overlap += 1;
                }
                Candidate::Free => {
                    let slot = TimeSlot {
                        id: self.next_id(),
                        date,
                        span: source.span,
                        services: source.services.clone(),
                    };
                    report.created.push(CopiedSlot { id: slot.id, date });
                    self.apply(Event::SlotCreated { slot });
                }
            }
        }

        for (class, n) in [
            ("created", report.created_count()),
            ("existing", report.skipped_existing),
            ("overlap", report.skipped_overlap),
        ] {
            metrics::counter!(observability::RECURRENCE_CANDIDATES_TOTAL, "class" => class)
                .increment(n as u64);
        }
        info!(
            "copied {} to {weekday:?}: created={} existing={} overlap={}",
            source.span,
            report.created_count(),
            report.skipped_existing,
            report.skipped_overlap
        );
        Ok(Outcome::SeriesCopied { report })
    }

    /// Identical window first, then any overlap. A date that is already full
    /// counts as an overlap.
    fn classify(&self, date: NaiveDate, span: &Span) -> Candidate {
        let slots = self.store.on_date(date);
        if slots.iter().any(|s| s.span == *span) {
            Candidate::Existing
        } else if has_overlap(&self.store, date, span, None)
            || slots.len() >= self.config.max_slots_per_date
        {
            Candidate::Overlap
        } else {
            Candidate::Free
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn four_wednesdays_from_monday() {
        let h = Horizon::new(date(2026, 10, 19), 28);
        let dates = candidate_dates(&h, Weekday::Wed, 5);
        assert_eq!(
            dates,
            vec![
                date(2026, 10, 21),
                date(2026, 10, 28),
                date(2026, 11, 4),
                date(2026, 11, 11),
            ]
        );
    }

    #[test]
    fn past_days_of_current_week_dropped() {
        // Thursday: this week's Monday is already gone, the fifth week's is in.
        let h = Horizon::new(date(2026, 10, 22), 28);
        let dates = candidate_dates(&h, Weekday::Mon, 5);
        assert_eq!(
            dates,
            vec![
                date(2026, 10, 26),
                date(2026, 11, 2),
                date(2026, 11, 9),
                date(2026, 11, 16),
            ]
        );
    }

    #[test]
    fn nominal_weeks_never_pass_max_date() {
        let h = Horizon::new(date(2026, 10, 19), 28);
        let dates = candidate_dates(&h, Weekday::Sun, 10);
        assert_eq!(dates.last(), Some(&date(2026, 11, 15)));
        assert!(dates.iter().all(|d| *d <= h.max_date));
    }
}
