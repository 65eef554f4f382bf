use chrono::NaiveDate;

use crate::model::{Minutes, Outcome, SlotId, Span};

/// Why a mutation was refused. The store is untouched whenever one of these
/// is returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    NotFound(SlotId),
    Overlap { date: NaiveDate, span: Span },
    OutOfDay { minute: Minutes },
    TooShort { span: Span },
    BeyondHorizon { date: NaiveDate, max_date: NaiveDate },
    NoActiveSlot,
    NotDragging,
    DuplicateId(SlotId),
    InvalidDay(u32),
    LimitExceeded(&'static str),
}

impl EngineError {
    /// Stable reason code for presentation layers and metrics labels.
    pub fn code(&self) -> &'static str {
        match self {
            EngineError::NotFound(_) => "not_found",
            EngineError::Overlap { .. } => "overlap",
            EngineError::OutOfDay { .. } => "out_of_day",
            EngineError::TooShort { .. } => "too_short",
            EngineError::BeyondHorizon { .. } => "beyond_horizon",
            EngineError::NoActiveSlot => "no_active_slot",
            EngineError::NotDragging => "not_dragging",
            EngineError::DuplicateId(_) => "duplicate_id",
            EngineError::InvalidDay(_) => "invalid_weekday",
            EngineError::LimitExceeded(_) => "limit_exceeded",
        }
    }
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::NotFound(id) => write!(f, "slot not found: {id}"),
            EngineError::Overlap { date, span } => {
                write!(f, "{span} on {date} overlaps an existing slot")
            }
            EngineError::OutOfDay { minute } => {
                write!(f, "minute {minute} is outside the bookable day")
            }
            EngineError::TooShort { span } => write!(f, "{span} is shorter than the minimum slot"),
            EngineError::BeyondHorizon { date, max_date } => {
                write!(f, "{date} is beyond the availability horizon ({max_date})")
            }
            EngineError::NoActiveSlot => write!(f, "no slot is selected"),
            EngineError::NotDragging => write!(f, "no drag in progress"),
            EngineError::DuplicateId(id) => write!(f, "slot id already in use: {id}"),
            EngineError::InvalidDay(idx) => write!(f, "day index {idx} is outside the week (0-6)"),
            EngineError::LimitExceeded(msg) => write!(f, "limit exceeded: {msg}"),
        }
    }
}

impl std::error::Error for EngineError {}

impl From<Result<Outcome, EngineError>> for Outcome {
    fn from(result: Result<Outcome, EngineError>) -> Self {
        match result {
            Ok(outcome) => outcome,
            Err(e) => Outcome::Rejected {
                reason: e.code(),
                message: e.to_string(),
            },
        }
    }
}
