//! Observable engine state.
//!
//! The engine publishes one [`StylusSnapshot`] per observable change into a
//! single-slot cell. A new snapshot replaces the previous one; readers only
//! ever see the latest value and anything they did not read in time is gone.

use crate::sample::PointSample;
use arc_swap::ArcSwap;
use kurbo::Point;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Everything a renderer needs to draw the canvas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StylusSnapshot {
    /// Committed points followed by the stroke being captured.
    pub points: Vec<PointSample>,
    pub erasing_mode: bool,
    /// True while the contact is moving.
    pub pressing: bool,
    /// Where to draw the eraser indicator, hidden when `None`.
    pub eraser_cursor: Option<Point>,
}

impl StylusSnapshot {
    /// Force of the newest visible point.
    pub fn last_force(&self) -> Option<f64> {
        self.points.last().map(PointSample::force)
    }
}

#[derive(Debug)]
struct Slot {
    latest: ArcSwap<StylusSnapshot>,
    version: AtomicU64,
}

/// Single-slot cell holding the latest snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotCell {
    slot: Arc<Slot>,
}

impl Default for SnapshotCell {
    fn default() -> Self {
        Self::new(StylusSnapshot::default())
    }
}

impl SnapshotCell {
    pub fn new(initial: StylusSnapshot) -> Self {
        Self {
            slot: Arc::new(Slot {
                latest: ArcSwap::from_pointee(initial),
                version: AtomicU64::new(0),
            }),
        }
    }

    /// Replace the stored snapshot.
    pub fn publish(&self, snapshot: StylusSnapshot) -> Arc<StylusSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.slot.latest.store(Arc::clone(&snapshot));
        self.slot.version.fetch_add(1, Ordering::Release);
        snapshot
    }

    pub fn latest(&self) -> Arc<StylusSnapshot> {
        self.slot.latest.load_full()
    }

    /// Number of snapshots published so far.
    pub fn version(&self) -> u64 {
        self.slot.version.load(Ordering::Acquire)
    }

    /// Create a subscriber that has already seen the current snapshot.
    pub fn subscribe(&self) -> SnapshotSubscriber {
        SnapshotSubscriber {
            slot: Arc::clone(&self.slot),
            seen: self.version(),
        }
    }
}

/// Read handle on a [`SnapshotCell`].
#[derive(Debug)]
pub struct SnapshotSubscriber {
    slot: Arc<Slot>,
    seen: u64,
}

impl SnapshotSubscriber {
    /// Whether a snapshot was published since the last [`Self::changed`].
    pub fn has_changed(&self) -> bool {
        self.slot.version.load(Ordering::Acquire) != self.seen
    }

    /// The latest snapshot if it is newer than the last one taken.
    pub fn changed(&mut self) -> Option<Arc<StylusSnapshot>> {
        let version = self.slot.version.load(Ordering::Acquire);
        if version == self.seen {
            return None;
        }
        self.seen = version;
        Some(self.slot.latest.load_full())
    }

    /// The latest snapshot, regardless of whether it was seen.
    pub fn latest(&self) -> Arc<StylusSnapshot> {
        self.slot.latest.load_full()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_points(n: usize) -> StylusSnapshot {
        StylusSnapshot {
            points: (0..n).map(|i| PointSample::new(i as f64, 0.0, 0.5, i as i64)).collect(),
            ..StylusSnapshot::default()
        }
    }

    #[test]
    fn test_publish_replaces() {
        let cell = SnapshotCell::default();
        cell.publish(with_points(1));
        cell.publish(with_points(3));

        assert_eq!(cell.latest().points.len(), 3);
        assert_eq!(cell.version(), 2);
    }

    #[test]
    fn test_subscriber_skips_superseded() {
        let cell = SnapshotCell::default();
        let mut sub = cell.subscribe();
        assert!(!sub.has_changed());
        assert!(sub.changed().is_none());

        cell.publish(with_points(1));
        cell.publish(with_points(2));
        assert!(sub.has_changed());

        let seen = sub.changed().unwrap();
        assert_eq!(seen.points.len(), 2);
        assert!(sub.changed().is_none());
    }

    #[test]
    fn test_last_force() {
        assert_eq!(StylusSnapshot::default().last_force(), None);
        let snapshot = StylusSnapshot {
            points: vec![PointSample::new(0.0, 0.0, 0.2, 0), PointSample::new(1.0, 1.0, 0.7, 5)],
            ..StylusSnapshot::default()
        };
        assert_eq!(snapshot.last_force(), Some(0.7));
    }
}
