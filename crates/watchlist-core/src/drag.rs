//! Drag-to-reorder state machine for the watchlist.
//!
//! A gesture runs `start` → any number of `drag_over` / `pointer_moved` →
//! `drop_on` or `end`. While a gesture is active the engine holds a candidate
//! insertion *slot*: an index in `0..=len` naming the gap between rows,
//! counted against the current order with the dragged row still in place.
//! Slot `k` means "before the row at index `k`", slot `len` means "after the
//! last row". The placeholder is drawn at that slot by the view projection;
//! nothing is moved until a drop on the placeholder commits.

use thiserror::Error;
use tracing::{debug, info};
use crate::watchlist::Watchlist;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DragError {
    #[error("cannot drag {0}: it is not on the watchlist")]
    UnknownEntry(String),
}

/// What the pointer is over when a drag-over or drop event fires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HoverTarget {
    /// A watchlist row, by entry identifier
    Row(String),
    /// The floating placeholder marker
    Placeholder,
    /// Anything else (search bar, page background, ...)
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Last two vertical pointer samples of one gesture
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerTrack {
    previous: Option<f64>,
    current: Option<f64>,
}

impl PointerTrack {
    pub fn record(&mut self, y: f64) {
        self.previous = self.current;
        self.current = Some(y);
    }

    /// Most recent sample
    pub fn current(&self) -> Option<f64> {
        self.current
    }

    /// Direction of the most recent movement; `None` when the pointer did not
    /// move vertically or fewer than two samples exist.
    pub fn direction(&self) -> Option<Direction> {
        let delta = self.current? - self.previous?;
        if delta < 0.0 {
            Some(Direction::Up)
        } else if delta > 0.0 {
            Some(Direction::Down)
        } else {
            None
        }
    }
}

/// State of one in-progress gesture
#[derive(Debug, Clone, PartialEq)]
pub struct DragGesture {
    dragged: String,
    origin: usize, // index of the dragged entry when the gesture started
    slot: Option<usize>,
    pointer: PointerTrack,
}

impl DragGesture {
    pub fn dragged(&self) -> &str {
        &self.dragged
    }

    pub fn origin(&self) -> usize {
        self.origin
    }

    pub fn slot(&self) -> Option<usize> {
        self.slot
    }

    pub fn pointer(&self) -> &PointerTrack {
        &self.pointer
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragGesture),
}

/// Result of a drop event
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    /// Dropped on the placeholder; the entry moved from `from` to `to`
    Committed { id: String, from: usize, to: usize },
    /// The gesture ended without changing the order
    Discarded,
    /// No gesture was active
    NoGesture,
}

#[derive(Debug, Default)]
pub struct DragReorderEngine {
    state: DragState,
}

impl DragReorderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn gesture(&self) -> Option<&DragGesture> {
        match &self.state {
            DragState::Dragging(gesture) => Some(gesture),
            DragState::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture().is_some()
    }

    /// Current placeholder slot, if a valid target has been seen
    pub fn placeholder_slot(&self) -> Option<usize> {
        self.gesture().and_then(|g| g.slot)
    }

    /// Entry hidden in place: the dragged one, once a placeholder is shown
    pub fn hidden_entry(&self) -> Option<&str> {
        self.gesture()
            .filter(|g| g.slot.is_some())
            .map(|g| g.dragged.as_str())
    }

    /// Pick up `id` at pointer height `y`. A gesture already in progress is
    /// cancelled first.
    pub fn start(&mut self, list: &Watchlist, id: &str, y: f64) -> Result<(), DragError> {
        let Some(origin) = list.position(id) else {
            return Err(DragError::UnknownEntry(id.to_string()));
        };
        if let Some(previous) = self.end() {
            debug!("Drag: new gesture on {} replaced unfinished gesture on {}", id, previous.dragged);
        }

        let mut pointer = PointerTrack::default();
        pointer.record(y);
        self.state = DragState::Dragging(DragGesture {
            dragged: id.to_string(),
            origin,
            slot: None,
            pointer,
        });
        debug!("Drag: started on {}", id);
        Ok(())
    }

    /// Pointer moved over a surface that is not a drop target
    pub fn pointer_moved(&mut self, y: f64) {
        if let DragState::Dragging(gesture) = &mut self.state {
            gesture.pointer.record(y);
        }
    }

    /// Pointer is over `target` at height `y`. Returns the placeholder slot
    /// after the update.
    pub fn drag_over(&mut self, list: &Watchlist, target: &HoverTarget, y: f64) -> Option<usize> {
        let DragState::Dragging(gesture) = &mut self.state else {
            return None;
        };
        gesture.pointer.record(y);

        let target_id = match target {
            HoverTarget::Row(id) if *id != gesture.dragged => id,
            _ => return gesture.slot,
        };
        let Some(target_index) = list.position(target_id) else {
            return gesture.slot;
        };

        let slot = match gesture.pointer.direction() {
            Some(Direction::Up) => target_index,
            Some(Direction::Down) => target_index + 1,
            None => return gesture.slot,
        };
        if gesture.slot != Some(slot) {
            debug!("Drag: placeholder for {} moved to slot {} (over {})", gesture.dragged, slot, target_id);
            gesture.slot = Some(slot);
        }
        gesture.slot
    }

    /// Drop event on `target`. Only a drop on the placeholder commits; any
    /// drop ends the gesture.
    pub fn drop_on(&mut self, list: &mut Watchlist, target: &HoverTarget) -> DropOutcome {
        let DragState::Dragging(gesture) = std::mem::take(&mut self.state) else {
            return DropOutcome::NoGesture;
        };

        let slot = match (target, gesture.slot) {
            (HoverTarget::Placeholder, Some(slot)) => slot,
            _ => {
                debug!("Drag: {} dropped off the placeholder, order unchanged", gesture.dragged);
                return DropOutcome::Discarded;
            }
        };
        let Some(from) = list.position(&gesture.dragged) else {
            return DropOutcome::Discarded;
        };

        // Removing the entry first shifts every slot after it down by one
        let to = if slot > from { slot - 1 } else { slot };
        match list.reorder(&gesture.dragged, to) {
            Ok(to) => {
                info!("Drag: moved {} from {} to {}", gesture.dragged, from, to);
                DropOutcome::Committed { id: gesture.dragged, from, to }
            }
            Err(_) => DropOutcome::Discarded,
        }
    }

    /// Drag end without a commit (released outside, escape). Returns the
    /// discarded gesture, if any.
    pub fn end(&mut self) -> Option<DragGesture> {
        match std::mem::take(&mut self.state) {
            DragState::Dragging(gesture) => {
                debug!("Drag: gesture on {} ended", gesture.dragged);
                Some(gesture)
            }
            DragState::Idle => None,
        }
    }
}
