//! Stroke capture state machine.

use crate::sample::PointSample;
use kurbo::Point;

/// State of the capture state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No contact.
    #[default]
    Idle,
    /// A contact is active; `started_at` is the clock reading of its down event.
    Capturing { started_at: i64 },
}

/// Staging buffer for the stroke being drawn.
///
/// Samples live here until the stroke is released, at which point the caller
/// takes them with [`StrokeCapture::finish`] and commits them.
#[derive(Debug, Clone, Default)]
pub struct StrokeCapture {
    state: CaptureState,
    staging: Vec<PointSample>,
}

impl StrokeCapture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self.state, CaptureState::Capturing { .. })
    }

    /// Samples of the stroke in progress.
    pub fn staging(&self) -> &[PointSample] {
        &self.staging
    }

    /// Start a new stroke, dropping any unfinished one.
    pub fn begin(&mut self, position: Point, pressure: f64, now: i64) {
        if !self.staging.is_empty() {
            log::debug!("Restarting stroke, dropping {} staged samples", self.staging.len());
        }
        self.state = CaptureState::Capturing { started_at: now };
        self.staging.clear();
        self.staging.push(PointSample::at(position, pressure, 0));
    }

    /// Append a sample.
    ///
    /// With no active contact the sample opens an implicit stroke at `t = 0`,
    /// the same as a down event at `now`.
    pub fn extend(&mut self, position: Point, pressure: f64, now: i64) {
        let CaptureState::Capturing { started_at } = self.state else {
            log::debug!("Sample without a down event, starting implicit stroke");
            self.begin(position, pressure, now);
            return;
        };
        let sample = PointSample::at(position, pressure, now - started_at);
        log::trace!("Staged sample {:?}", sample);
        self.staging.push(sample);
    }

    /// Append the final sample and hand the stroke over.
    pub fn finish(&mut self, position: Point, pressure: f64, now: i64) -> Vec<PointSample> {
        self.extend(position, pressure, now);
        self.state = CaptureState::Idle;
        std::mem::take(&mut self.staging)
    }

    /// Drop the stroke in progress.
    pub fn cancel(&mut self) {
        self.state = CaptureState::Idle;
        self.staging.clear();
    }
}
