//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod catalog;
pub mod clock;
pub mod collision;
pub mod combat;
pub mod controller;
pub mod factory;
pub mod objective;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use catalog::{AbilityKind, Archetype, Catalog, WarriorAbility, WarriorClass, WarriorStats};
pub use clock::{MatchRunner, PeriodicTask, SimClock};
pub use collision::{circular_hit, rect_overlap, slide_move};
pub use controller::{InputSteering, MovementPolicy, OrbPursuit};
pub use objective::ObjectiveRotation;
pub use snapshot::{AgentView, MatchSnapshot, ObstacleView, PillarView, ProjectileView};
pub use state::{
    Agent, AgentId, AgentRole, DamageSource, MatchEvent, MatchOutcome, MatchState, Obstacle,
    ObstacleKind, OutcomeKind, Pillar, PillarId, Projectile,
};
pub use tick::{AbilityRequest, TickInput, countdown_tick, tick};
