//! Collision detection
//!
//! Ships are treated as points with a shared hit distance. A bullet sweeps
//! the segment it covered this frame, so a fast shot cannot step over a ship.
//! Checks are brute force: every live bullet against every candidate.

use glam::Vec3;

/// True if `a` and `b` are strictly closer than `threshold`
#[inline]
pub fn within(a: Vec3, b: Vec3, threshold: f32) -> bool {
    a.distance_squared(b) < threshold * threshold
}

/// Point on the segment `start..end` nearest to `point`
pub fn closest_on_segment(start: Vec3, end: Vec3, point: Vec3) -> Vec3 {
    let span = end - start;
    let length_sq = span.length_squared();
    if length_sq <= f32::EPSILON {
        return start;
    }
    let t = ((point - start).dot(span) / length_sq).clamp(0.0, 1.0);
    start + span * t
}

/// True if any point of `start..end` is strictly closer than `threshold` to `point`
#[inline]
pub fn segment_within(start: Vec3, end: Vec3, point: Vec3, threshold: f32) -> bool {
    within(closest_on_segment(start, end, point), point, threshold)
}

/// First candidate (in iteration order) the segment `start..end` passes within
/// `threshold` of. A zero-length segment is a plain point test.
pub fn first_hit<T>(
    start: Vec3,
    end: Vec3,
    candidates: impl IntoIterator<Item = (T, Vec3)>,
    threshold: f32,
) -> Option<(T, Vec3)> {
    candidates
        .into_iter()
        .find(|(_, pos)| segment_within(start, end, *pos, threshold))
}

/// True once a projectile is further than `max_range` from where it started
#[inline]
pub fn out_of_range(origin: Vec3, position: Vec3, max_range: f32) -> bool {
    origin.distance_squared(position) > max_range * max_range
}
