//! Point eraser.

use crate::sample::PointSample;
use kurbo::Point;

/// Remove every sample within `radius` of `center`.
///
/// Returns `None` when nothing is close enough, so callers can skip
/// recording a history state for a pass that changes nothing. A NaN
/// `center` or `radius` matches no sample.
pub fn erase_points(points: &[PointSample], center: Point, radius: f64) -> Option<Vec<PointSample>> {
    let within = |p: &PointSample| p.distance_to(center) <= radius;
    let kept: Vec<PointSample> = points.iter().filter(|p| !within(*p)).copied().collect();

    if kept.len() == points.len() {
        None
    } else {
        Some(kept)
    }
}
