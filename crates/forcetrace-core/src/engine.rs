//! The stylus engine: capture, erasing, history and trace exchange.

use crate::capture::{CaptureState, StrokeCapture};
use crate::clock::{Clock, SystemClock};
use crate::codec::{self, CodecError, CodecResult, ImportReport};
use crate::config::EngineConfig;
use crate::eraser::erase_points;
use crate::history::VersionedHistory;
use crate::input::{PointerAction, PointerEvent};
use crate::sample::PointSample;
use crate::snapshot::{SnapshotCell, SnapshotSubscriber, StylusSnapshot};
use kurbo::Point;
use std::fmt;
use std::sync::Arc;

type Observer = Box<dyn FnMut(&StylusSnapshot) + Send>;

/// Turns pointer events into an undoable collection of pressure samples.
///
/// The engine is driven by a single caller, one event at a time. Every
/// handled event and every editing command that changes what is visible
/// publishes a new [`StylusSnapshot`].
pub struct StylusEngine<C = SystemClock> {
    config: EngineConfig,
    clock: C,
    history: VersionedHistory<Vec<PointSample>>,
    capture: StrokeCapture,
    erasing_mode: bool,
    pressing: bool,
    eraser_cursor: Option<Point>,
    snapshots: SnapshotCell,
    observers: Vec<Observer>,
}

impl StylusEngine<SystemClock> {
    /// Create an engine with default settings and the system clock.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::with_clock(config, SystemClock::new())
    }
}

impl Default for StylusEngine<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> StylusEngine<C> {
    /// Create an engine reading sample time from `clock`.
    pub fn with_clock(config: EngineConfig, clock: C) -> Self {
        let history = VersionedHistory::new(Vec::new()).with_max_depth(config.max_history);
        Self {
            config,
            clock,
            history,
            capture: StrokeCapture::new(),
            erasing_mode: false,
            pressing: false,
            eraser_cursor: None,
            snapshots: SnapshotCell::default(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Canvas edge length used by [`Self::export_current`] and [`Self::import_current`].
    pub fn total_size(&self) -> f64 {
        self.config.total_size
    }

    pub fn set_total_size(&mut self, total_size: f64) {
        self.config.total_size = total_size;
    }

    pub fn history(&self) -> &VersionedHistory<Vec<PointSample>> {
        &self.history
    }

    /// Committed points.
    pub fn points(&self) -> &[PointSample] {
        self.history.current()
    }

    /// Samples of the stroke in progress.
    pub fn staging(&self) -> &[PointSample] {
        self.capture.staging()
    }

    pub fn capture_state(&self) -> CaptureState {
        self.capture.state()
    }

    pub fn is_erasing(&self) -> bool {
        self.erasing_mode
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Force of the newest visible sample.
    pub fn pressure(&self) -> Option<f64> {
        self.capture
            .staging()
            .last()
            .or_else(|| self.history.current().last())
            .map(PointSample::force)
    }

    /// Feed a drawing event. Returns whether the event was consumed.
    pub fn record(&mut self, event: &PointerEvent) -> bool {
        if self.erasing_mode {
            return false;
        }

        let now = self.clock.now_ms();
        match event.action {
            PointerAction::Down => {
                self.capture.begin(event.position, event.pressure, now);
            }
            PointerAction::Move => self.capture.extend(event.position, event.pressure, now),
            PointerAction::Up | PointerAction::PointerUp => {
                if event.canceled {
                    log::debug!("Release flagged as canceled, dropping stroke");
                    self.capture.cancel();
                } else {
                    let stroke = self.capture.finish(event.position, event.pressure, now);
                    self.commit_stroke(stroke);
                }
            }
            PointerAction::Cancel => self.capture.cancel(),
            PointerAction::Hover | PointerAction::Other => return false,
        }

        self.pressing = event.action == PointerAction::Move;
        self.publish(true);
        true
    }

    fn commit_stroke(&mut self, stroke: Vec<PointSample>) {
        log::debug!("Committing stroke of {} samples", stroke.len());
        let mut points = Vec::with_capacity(self.history.current().len() + stroke.len());
        points.extend_from_slice(self.history.current());
        points.extend(stroke);
        self.history.add(points);
    }

    /// Feed an erasing event with an explicit radius.
    /// Returns whether the event was consumed.
    pub fn erase_at(&mut self, event: &PointerEvent, radius: f64) -> bool {
        if !self.erasing_mode {
            return false;
        }

        match event.action {
            PointerAction::Down | PointerAction::Move => {
                if let Some(kept) = erase_points(self.history.current(), event.position, radius) {
                    log::debug!(
                        "Erased {} points at ({}, {})",
                        self.history.current().len() - kept.len(),
                        event.position.x,
                        event.position.y
                    );
                    self.history.add(kept);
                }
                self.eraser_cursor = Some(event.position);
            }
            PointerAction::Up | PointerAction::PointerUp | PointerAction::Cancel => {
                self.eraser_cursor = None;
            }
            PointerAction::Hover | PointerAction::Other => return false,
        }

        self.pressing = false;
        self.publish(true);
        true
    }

    /// Feed an erasing event using the configured radius.
    pub fn erase(&mut self, event: &PointerEvent) -> bool {
        self.erase_at(event, self.config.erase_radius)
    }

    /// Step back one history state.
    pub fn undo(&mut self) {
        if self.history.undo() {
            self.pressing = false;
            self.publish(false);
        }
    }

    /// Step forward one history state.
    pub fn redo(&mut self) {
        if self.history.redo() {
            self.pressing = false;
            self.publish(false);
        }
    }

    /// Remove all committed points as an undoable step.
    pub fn clear(&mut self) {
        if !self.history.current().is_empty() {
            self.history.add(Vec::new());
            self.pressing = false;
            self.publish(false);
        }
    }

    /// Switch between drawing and erasing. Drops any stroke in progress.
    pub fn toggle_erase(&mut self) {
        self.erasing_mode = !self.erasing_mode;
        self.capture.cancel();
        self.eraser_cursor = None;
        self.pressing = false;
        log::debug!("Erasing mode {}", if self.erasing_mode { "on" } else { "off" });
        self.publish(false);
    }

    /// Export committed points, normalized by `total_size`.
    pub fn export_text(&self, total_size: f64) -> CodecResult<String> {
        let text = codec::export_points(self.history.current(), total_size)?;
        log::info!("Exported {} points", self.history.current().len());
        Ok(text)
    }

    /// Export using the configured canvas size.
    pub fn export_current(&self) -> CodecResult<String> {
        self.export_text(self.config.total_size)
    }

    /// Replace the committed points with the content of a trace.
    ///
    /// The replacement is recorded as a clear followed by the load, so a
    /// single undo goes back to an empty canvas. When no row can be parsed
    /// the history is left untouched.
    pub fn import_text(&mut self, text: &str, total_size: f64) -> CodecResult<ImportReport> {
        let parsed = codec::parse_trace(text, total_size, self.config.coordinate_mapping)?;
        let report = parsed.report();
        if parsed.points.is_empty() {
            log::info!("Nothing to import, {} rows skipped", report.skipped);
            return Err(CodecError::NothingToImport {
                skipped: report.skipped,
            });
        }

        if !self.history.current().is_empty() {
            self.history.add(Vec::new());
        }
        self.history.add(parsed.points);
        log::info!("Imported {} points, skipped {}", report.imported, report.skipped);
        self.pressing = false;
        self.publish(false);
        Ok(report)
    }

    /// Import using the configured canvas size.
    pub fn import_current(&mut self, text: &str) -> CodecResult<ImportReport> {
        self.import_text(text, self.config.total_size)
    }

    /// The latest published snapshot.
    pub fn snapshot(&self) -> Arc<StylusSnapshot> {
        self.snapshots.latest()
    }

    /// Read handle on the snapshot cell.
    pub fn subscribe(&self) -> SnapshotSubscriber {
        self.snapshots.subscribe()
    }

    /// Call `observer` with every snapshot published from now on.
    pub fn on_snapshot<F>(&mut self, observer: F)
    where
        F: FnMut(&StylusSnapshot) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    fn publish(&mut self, include_staging: bool) {
        let mut points = self.history.current().clone();
        if include_staging {
            points.extend_from_slice(self.capture.staging());
        }
        let snapshot = self.snapshots.publish(StylusSnapshot {
            points,
            erasing_mode: self.erasing_mode,
            pressing: self.pressing,
            eraser_cursor: self.eraser_cursor,
        });
        for observer in &mut self.observers {
            observer(snapshot.as_ref());
        }
    }
}

impl<C: fmt::Debug> fmt::Debug for StylusEngine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StylusEngine")
            .field("config", &self.config)
            .field("clock", &self.clock)
            .field("history", &self.history)
            .field("capture", &self.capture)
            .field("erasing_mode", &self.erasing_mode)
            .field("pressing", &self.pressing)
            .field("eraser_cursor", &self.eraser_cursor)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
