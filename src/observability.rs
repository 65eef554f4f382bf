use tracing_subscriber::EnvFilter;

use crate::model::Event;

/// Counter: applied store mutations. Labels: op.
pub const MUTATIONS_TOTAL: &str = "slotboard_mutations_total";

/// Counter: rejected mutation attempts. Labels: reason.
pub const REJECTIONS_TOTAL: &str = "slotboard_rejections_total";

/// Counter: copy-to-weekday candidate dates. Labels: class (created, existing, overlap).
pub const RECURRENCE_CANDIDATES_TOTAL: &str = "slotboard_recurrence_candidates_total";

/// Install a fmt subscriber filtered by `RUST_LOG` (default `info`). Safe to
/// call more than once; later calls are ignored.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Map an Event variant to a short label for metrics.
pub fn event_label(event: &Event) -> &'static str {
    match event {
        Event::SlotCreated { .. } => "slot_created",
        Event::SlotResized { .. } => "slot_resized",
        Event::ServicesChanged { .. } => "services_changed",
        Event::SlotRemoved { .. } => "slot_removed",
        Event::SeriesRemoved { .. } => "series_removed",
    }
}
