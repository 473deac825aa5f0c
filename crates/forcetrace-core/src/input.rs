//! Normalized pointer events fed to the engine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Kind of pointer contact change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerAction {
    /// First contact of a stroke.
    Down,
    /// Contact moved while pressed.
    Move,
    /// Last contact lifted.
    Up,
    /// A secondary contact lifted.
    PointerUp,
    /// The platform aborted the gesture.
    Cancel,
    /// Pointer moved without contact.
    Hover,
    /// Anything else the host forwards (scroll, buttons, ...).
    Other,
}

impl PointerAction {
    /// Whether this action ends a contact.
    pub fn is_release(self) -> bool {
        matches!(self, Self::Up | Self::PointerUp)
    }
}

/// A pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub action: PointerAction,
    pub position: Point,
    /// Contact pressure, nominally in `[0, 1]`.
    #[serde(default)]
    pub pressure: f64,
    /// Set by the host when the platform flagged a release as canceled
    /// (e.g. palm rejection). Only meaningful on release actions.
    #[serde(default)]
    pub canceled: bool,
}

impl PointerEvent {
    pub fn new(action: PointerAction, position: Point, pressure: f64) -> Self {
        Self {
            action,
            position,
            pressure,
            canceled: false,
        }
    }

    pub fn down(position: Point, pressure: f64) -> Self {
        Self::new(PointerAction::Down, position, pressure)
    }

    pub fn moved(position: Point, pressure: f64) -> Self {
        Self::new(PointerAction::Move, position, pressure)
    }

    pub fn up(position: Point, pressure: f64) -> Self {
        Self::new(PointerAction::Up, position, pressure)
    }

    pub fn cancel(position: Point) -> Self {
        Self::new(PointerAction::Cancel, position, 0.0)
    }

    /// Mark this event as canceled by the platform.
    pub fn with_canceled(mut self, canceled: bool) -> Self {
        self.canceled = canceled;
        self
    }
}
