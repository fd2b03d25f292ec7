//! Orb Arena - simulation core for a ten-agent orb-carrying battle royale
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, projectiles, combat, objective)
//! - `settings`: Match configuration and startup validation
//! - `error`: Configuration errors
//!
//! Rendering, input devices and navigation live outside this crate. They feed
//! intents into a [`sim::MatchRunner`] and read [`sim::MatchSnapshot`]s back.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::ConfigError;
pub use settings::{MatchMode, MatchSettings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (reference game ticks every ~16ms)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame the clock will accept before clamping
    pub const MAX_FRAME_DT: f32 = 0.1;
    /// Countdown period in seconds
    pub const COUNTDOWN_PERIOD: f32 = 1.0;

    /// Map dimensions
    pub const MAP_WIDTH: f32 = 800.0;
    pub const MAP_HEIGHT: f32 = 800.0;

    /// Agent footprint (side of the collision box, also the edge margin)
    pub const PLAYER_SIZE: f32 = 30.0;
    pub const PILLAR_SIZE: f32 = 40.0;
    /// Agent-agent and projectile-agent proximity threshold
    pub const COLLISION_DISTANCE: f32 = 35.0;
    /// Orb holder must get this close to the target pillar to deposit
    pub const DEPOSIT_DISTANCE: f32 = 50.0;

    /// Layout rings around map center
    pub const PILLAR_RING_RADIUS: f32 = 300.0;
    pub const SPAWN_RING_RADIUS: f32 = 100.0;
    pub const DEFAULT_PILLAR_COUNT: usize = 8;
    pub const AGENT_COUNT: usize = 10;

    /// Displacements per reference tick
    pub const LOCAL_MOVE_STEP: f32 = 3.0;
    pub const PURSUIT_STEP: f32 = 1.5;
    /// Pursuers stop closing once this near the orb holder
    pub const PERSONAL_SPACE: f32 = 50.0;

    pub const CONTACT_DAMAGE: i32 = 20;
    /// Seconds before the same (attacker, defender) pair can contact-hit again
    pub const CONTACT_REHIT_SECS: f32 = 0.5;

    pub const MATCH_DURATION_SECS: u32 = 60;

    /// Half-extent of a projectile's box when testing against obstacles
    pub const PROJECTILE_HALF_EXTENT: f32 = 5.0;

    pub const PLAYER_COLORS: [&str; AGENT_COUNT] = [
        "#ff006e", "#06ffa5", "#4361ee", "#ffd60a", "#ff9e00", "#00d9ff", "#ff00ff", "#00ff00",
        "#ff3366", "#66ff33",
    ];
}

/// Center of the map
#[inline]
pub fn map_center() -> Vec2 {
    Vec2::new(consts::MAP_WIDTH / 2.0, consts::MAP_HEIGHT / 2.0)
}

/// Point on a ring of `radius` around map center, `index` of `count` evenly spaced
#[inline]
pub fn ring_point(radius: f32, index: usize, count: usize) -> Vec2 {
    let angle = index as f32 * std::f32::consts::TAU / count as f32;
    map_center() + Vec2::new(angle.cos(), angle.sin()) * radius
}

/// Clamp a position into the playable area, keeping `margin` from every edge
#[inline]
pub fn clamp_to_map(pos: Vec2, margin: f32) -> Vec2 {
    Vec2::new(
        pos.x.clamp(margin, consts::MAP_WIDTH - margin),
        pos.y.clamp(margin, consts::MAP_HEIGHT - margin),
    )
}
