//! Input model: pointer buttons, wheel deltas, and the gesture state machine.
//!
//! `InputState` is the active gesture tracked between pointer-down and
//! pointer-up. A drag carries everything needed to resolve it on release
//! without re-reading the visual: the object's authoritative origin cell, its
//! footprint, and the grab offset inside the visual.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::ObjectId;
use crate::grid::{Footprint, GridPosition};
use crate::viewport::{Point, ZoomDirection};

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

impl WheelDelta {
    /// Zoom direction for this scroll: up zooms in, down zooms out, pure
    /// horizontal scroll does nothing.
    #[must_use]
    pub fn zoom_direction(self) -> Option<ZoomDirection> {
        if self.dy < 0.0 {
            Some(ZoomDirection::In)
        } else if self.dy > 0.0 {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// A drag in progress. Exists strictly between press and release.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Object being dragged.
    pub object_id: ObjectId,
    /// Cell the object occupied at press time, read from the stored object.
    pub origin: GridPosition,
    /// Footprint of the dragged object.
    pub size: Footprint,
    /// Pointer position minus visual origin at press time, in content pixels.
    pub grab_offset: Point,
}

impl InputState {
    /// The button whose release ends the current gesture.
    #[must_use]
    pub fn owning_button(&self) -> Option<Button> {
        match self {
            Self::Idle => None,
            Self::Panning { button, .. } => Some(*button),
            Self::Dragging(_) => Some(Button::Primary),
        }
    }
}

impl DragSession {
    /// Where the visual's top-left corner belongs for a pointer at `world`.
    #[must_use]
    pub fn visual_origin_for(&self, world: Point) -> Point {
        Point::new(world.x - self.grab_offset.x, world.y - self.grab_offset.y)
    }
}

/// How a drag ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// The object now occupies `to`.
    Committed { object_id: ObjectId, from: GridPosition, to: GridPosition },
    /// The candidate cell was rejected; the object stays at `origin`.
    Reverted { object_id: ObjectId, origin: GridPosition, rejected: GridPosition },
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is panning the canvas.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
        /// Button that started the pan; only its release ends it.
        button: Button,
    },
    /// The user is dragging a visual. Always started by [`Button::Primary`].
    Dragging(DragSession),
}
