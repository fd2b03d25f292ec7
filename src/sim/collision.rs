//! Collision primitives for the arena
//!
//! Two tests cover everything the simulation needs: circular proximity
//! (agent-agent, agent-pillar, projectile-agent) and axis-aligned box overlap
//! against obstacles. Both are pure.

use glam::Vec2;

use super::state::Obstacle;

/// True if `a` and `b` are strictly closer than `threshold`
#[inline]
pub fn circular_hit(a: Vec2, b: Vec2, threshold: f32) -> bool {
    // Squared compare avoids the sqrt and keeps the boundary exact
    a.distance_squared(b) < threshold * threshold
}

/// True if the box centered at `point` with half side `half_extent` overlaps
/// the obstacle. Touching edges do not count.
#[inline]
pub fn rect_overlap(point: Vec2, half_extent: f32, obstacle: &Obstacle) -> bool {
    let (min, max) = obstacle.bounds();
    point.x + half_extent > min.x
        && point.x - half_extent < max.x
        && point.y + half_extent > min.y
        && point.y - half_extent < max.y
}

/// True if the box overlaps any obstacle
pub fn overlaps_any(point: Vec2, half_extent: f32, obstacles: &[Obstacle]) -> bool {
    obstacles.iter().any(|o| rect_overlap(point, half_extent, o))
}

/// Apply `step` one axis at a time so a blocked axis slides along the wall
/// instead of stopping the whole move
pub fn slide_move(pos: Vec2, step: Vec2, half_extent: f32, obstacles: &[Obstacle]) -> Vec2 {
    let mut out = pos;
    if step.x != 0.0 && !overlaps_any(Vec2::new(pos.x + step.x, pos.y), half_extent, obstacles) {
        out.x = pos.x + step.x;
    }
    if step.y != 0.0 && !overlaps_any(Vec2::new(pos.x, pos.y + step.y), half_extent, obstacles) {
        out.y = pos.y + step.y;
    }
    out
}

/// True if `pos` lies inside `[0, width] x [0, height]`
#[inline]
pub fn in_bounds(pos: Vec2, width: f32, height: f32) -> bool {
    pos.x >= 0.0 && pos.x <= width && pos.y >= 0.0 && pos.y <= height
}
