use chrono::NaiveDate;

use crate::config::ScheduleConfig;
use crate::model::*;

use super::store::SlotStore;
use super::EngineError;

/// True if `span` intersects any slot on `date` other than `exclude`.
pub fn has_overlap(store: &SlotStore, date: NaiveDate, span: &Span, exclude: Option<SlotId>) -> bool {
    store
        .overlapping(date, span)
        .any(|s| Some(s.id) != exclude)
}

pub(crate) fn check_no_overlap(
    store: &SlotStore,
    date: NaiveDate,
    span: &Span,
    exclude: Option<SlotId>,
) -> Result<(), EngineError> {
    if has_overlap(store, date, span, exclude) {
        return Err(EngineError::Overlap { date, span: *span });
    }
    Ok(())
}

/// Day window and minimum-duration checks for a finished span.
pub(crate) fn validate_span(config: &ScheduleConfig, span: &Span) -> Result<(), EngineError> {
    if span.start < config.day_start {
        return Err(EngineError::OutOfDay { minute: span.start });
    }
    if span.end > config.day_end {
        return Err(EngineError::OutOfDay { minute: span.end });
    }
    if span.duration() < config.min_slot_duration {
        return Err(EngineError::TooShort { span: *span });
    }
    Ok(())
}

pub(crate) fn check_date_capacity(
    config: &ScheduleConfig,
    store: &SlotStore,
    date: NaiveDate,
) -> Result<(), EngineError> {
    if store.on_date(date).len() >= config.max_slots_per_date {
        return Err(EngineError::LimitExceeded("too many slots on date"));
    }
    Ok(())
}
