use crate::model::Minutes;

// ── Day window ───────────────────────────────────────────────────

/// First bookable minute of a day (07:00).
pub const DAY_START_MIN: Minutes = 7 * 60;

/// Last bookable minute of a day (21:00), exclusive.
pub const DAY_END_MIN: Minutes = 21 * 60;

/// Minutes in a calendar day. Hard ceiling for any configured day window.
pub const MINUTES_PER_DAY: Minutes = 24 * 60;

/// Granularity every drag position and boundary edit snaps to.
pub const QUANTUM_MIN: Minutes = 30;

/// Shortest window a slot may have.
pub const MIN_SLOT_DURATION_MIN: Minutes = 30;

/// Window substituted when a drag commits a span shorter than the minimum.
pub const DEFAULT_SLOT_DURATION_MIN: Minutes = 120;

// ── Horizon ──────────────────────────────────────────────────────

/// Days from today (inclusive) that accept availability.
pub const AVAILABILITY_DAYS: u32 = 28;

/// Weeks walked by copy-to-weekday. Larger than the horizon so a partial
/// trailing week is still visited; every candidate is re-checked against the max date.
pub const RECURRENCE_WEEKS: u32 = 5;

/// Longest configurable horizon, in days.
pub const MAX_AVAILABILITY_DAYS: u32 = 366;

/// Most weeks copy-to-weekday may be configured to walk.
pub const MAX_RECURRENCE_WEEKS: u32 = 54;

// ── Store ────────────────────────────────────────────────────────

/// Slots a single date may hold. With a 30-minute minimum, a full day
/// window never needs more than this.
pub const MAX_SLOTS_PER_DATE: usize = 48;
