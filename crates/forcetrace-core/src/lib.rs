//! ForceTrace Core Library
//!
//! Platform-agnostic stroke capture for pressure-sensitive input: turns
//! pointer events into timestamped pressure samples with undo/redo, erasing
//! and a portable text trace format. Rendering and file access are left to
//! the host.

pub mod capture;
pub mod clock;
pub mod codec;
pub mod config;
pub mod engine;
pub mod eraser;
pub mod history;
pub mod input;
pub mod sample;
pub mod snapshot;

pub use capture::{CaptureState, StrokeCapture};
pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{CodecError, CodecResult, ImportReport, MalformedRow};
pub use config::{CoordinateMapping, EngineConfig};
pub use engine::StylusEngine;
pub use eraser::erase_points;
pub use history::VersionedHistory;
pub use input::{PointerAction, PointerEvent};
pub use sample::PointSample;
pub use snapshot::{SnapshotCell, SnapshotSubscriber, StylusSnapshot};
