//! Ring layout — evenly spaced anchors on a circle around a center point.

use std::f32::consts::TAU;

use crate::circle::AppCircle;
use crate::geom::Point;

/// Anchor positions for `count` circles evenly spaced on a ring of
/// `distribution_radius` around `center`.  Position `i` sits at angle
/// `2π·i/count`, starting at three o'clock and running clockwise in
/// screen coordinates.  Pure and stateless; no failure modes.
pub fn build_ring(center: Point, distribution_radius: f32, count: usize) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f32 / count as f32;
            Point::new(
                center.x + distribution_radius * angle.cos(),
                center.y + distribution_radius * angle.sin(),
            )
        })
        .collect()
}

/// The full home-screen circle set: a primary Home circle parked at
/// `center`, plus `count` ring members (indices 1..=count) starting hidden
/// at the center with anchors on the ring.
pub fn make_circles(
    center: Point,
    count: usize,
    main_radius: f32,
    app_radius: f32,
    distribution_radius: f32,
) -> Vec<AppCircle> {
    let mut circles = Vec::with_capacity(count + 1);
    circles.push(AppCircle::new(center, main_radius, 0, center, true));
    for (i, anchor) in build_ring(center, distribution_radius, count)
        .into_iter()
        .enumerate()
    {
        circles.push(AppCircle::new(center, app_radius, i + 1, anchor, false));
    }
    circles
}
