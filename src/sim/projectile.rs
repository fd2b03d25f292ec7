//! Ability projectiles
//!
//! Spawning, flight and hit detection. Damage is not applied here; the combat
//! resolver consumes hits reported by [`resolve_hit`].

use glam::Vec2;

use super::catalog::{AbilityKind, WarriorAbility};
use super::collision::{circular_hit, in_bounds, overlaps_any};
use super::state::{Agent, AgentId, Obstacle, Projectile};
use crate::consts::*;

/// Launch `ability` from `agent` toward `target`.
///
/// Returns `None` for instant abilities and for an aim point sitting exactly
/// on the agent, which has no heading.
pub fn spawn(
    id: u32,
    agent: &Agent,
    ability: &'static WarriorAbility,
    target: Vec2,
) -> Option<Projectile> {
    if ability.kind != AbilityKind::Projectile {
        return None;
    }
    let dir = (target - agent.pos).try_normalize()?;
    Some(Projectile {
        id,
        pos: agent.pos,
        vel: dir * ability.speed,
        owner: agent.id,
        ability,
        traveled: 0.0,
    })
}

/// Move every projectile one step and drop the ones that ran out of range,
/// struck terrain or left the map. Returns the ids that were dropped.
pub fn advance(projectiles: &mut Vec<Projectile>, obstacles: &[Obstacle], dt: f32) -> Vec<u32> {
    let ticks = dt / SIM_DT;
    let mut retired = Vec::new();

    projectiles.retain_mut(|p| {
        let step = p.vel * ticks;
        p.pos += step;
        p.traveled += step.length();

        let spent = p.traveled > p.ability.range;
        let blocked = overlaps_any(p.pos, PROJECTILE_HALF_EXTENT, obstacles);
        let escaped = !in_bounds(p.pos, MAP_WIDTH, MAP_HEIGHT);
        if spent || blocked || escaped {
            log::trace!(
                "Projectile {} retired (spent={} blocked={} escaped={})",
                p.id,
                spent,
                blocked,
                escaped
            );
            retired.push(p.id);
            false
        } else {
            true
        }
    });

    retired
}

/// First live agent (ascending id) other than the owner within collision
/// distance of the projectile
pub fn resolve_hit(projectile: &Projectile, agents: &[Agent]) -> Option<AgentId> {
    agents
        .iter()
        .filter(|a| a.is_alive() && a.id != projectile.owner)
        .find(|a| circular_hit(projectile.pos, a.pos, COLLISION_DISTANCE))
        .map(|a| a.id)
}
