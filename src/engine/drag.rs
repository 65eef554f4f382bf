use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::model::*;

use super::{Engine, EngineError};

/// Drag-to-create state. A drag is locked to the day column it started in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        day_index: u32,
        anchor: Minutes,
        cursor: Minutes,
    },
}

/// Result of a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    /// A drag began at the quantized minute.
    Started { date: NaiveDate, minute: Minutes },
    /// The pointer landed on an existing slot, which is now active.
    Selected(SlotId),
}

impl Engine {
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Date of column `day_index` (0 = Monday) in the visible week.
    pub fn date_for_day(&self, day_index: u32) -> Result<NaiveDate, EngineError> {
        if day_index > 6 {
            return Err(EngineError::InvalidDay(day_index));
        }
        Ok(self.week_start + Duration::days(day_index as i64))
    }

    /// Pointer-down at `minute` in column `day_index`. Over an existing slot
    /// this selects it; anywhere else it starts a drag, replacing any drag
    /// still in progress.
    pub fn begin_drag(&mut self, day_index: u32, minute: Minutes) -> Result<DragStart, EngineError> {
        let date = self.date_for_day(day_index)?;
        if let Some(hit) = self.slot_at(date, minute) {
            let id = hit.id;
            self.drag = DragState::Idle;
            self.active = Some(id);
            return Ok(DragStart::Selected(id));
        }
        let minute = self.config.quantize(minute);
        self.drag = DragState::Dragging {
            day_index,
            anchor: minute,
            cursor: minute,
        };
        Ok(DragStart::Started { date, minute })
    }

    /// Pointer-move. Returns true if the cursor moved. Moves in other columns
    /// or while idle are ignored.
    pub fn update_drag(&mut self, day_index: u32, minute: Minutes) -> bool {
        let quantized = self.config.quantize(minute);
        match &mut self.drag {
            DragState::Dragging {
                day_index: origin,
                cursor,
                ..
            } if *origin == day_index && *cursor != quantized => {
                *cursor = quantized;
                true
            }
            _ => false,
        }
    }

    /// Pointer-up: leave the drag and try to commit it. The state returns to
    /// idle whether or not the commit succeeds.
    pub fn end_drag(&mut self) -> Result<Outcome, EngineError> {
        let DragState::Dragging {
            day_index,
            anchor,
            cursor,
        } = std::mem::take(&mut self.drag)
        else {
            return Err(self.rejected("end_drag", EngineError::NotDragging));
        };
        let date = self.date_for_day(day_index)?;
        self.commit_drag(date, anchor, cursor)
            .map_err(|e| self.rejected("commit_drag", e))
    }

    /// Pointer left the tracked region. An active drag is committed exactly as
    /// on release; `None` if nothing was being dragged.
    pub fn leave_drag_region(&mut self) -> Option<Result<Outcome, EngineError>> {
        match self.drag {
            DragState::Idle => None,
            DragState::Dragging { .. } => Some(self.end_drag()),
        }
    }

    /// Date and span a release would try to commit right now.
    pub fn drag_preview(&self) -> Option<(NaiveDate, Span)> {
        let DragState::Dragging {
            day_index,
            anchor,
            cursor,
        } = self.drag
        else {
            return None;
        };
        let date = self.date_for_day(day_index).ok()?;
        let span = self.drag_span(anchor, cursor).ok()?;
        Some((date, span))
    }

    /// Span for a finished drag. Spans under the minimum grow to the default
    /// slot length, capped at the end of the day.
    pub(super) fn drag_span(&self, anchor: Minutes, cursor: Minutes) -> Result<Span, EngineError> {
        let start = anchor.min(cursor);
        let mut end = anchor.max(cursor);
        if end - start < self.config.min_slot_duration {
            end = (start + self.config.default_slot_duration).min(self.config.day_end);
        }
        if end - start < self.config.min_slot_duration {
            return Err(EngineError::TooShort {
                span: Span { start, end },
            });
        }
        Ok(Span::new(start, end))
    }

    // ── Selection ────────────────────────────────────────────

    pub fn active_slot(&self) -> Option<&TimeSlot> {
        self.active.and_then(|id| self.store.get(&id))
    }

    pub fn select(&mut self, id: SlotId) -> Result<(), EngineError> {
        if !self.store.contains(&id) {
            return Err(EngineError::NotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.active = None;
    }
}
