//! Combat resolution
//!
//! Two damage channels feed the same bookkeeping:
//! - contact damage between the local agent and whoever it overlaps, direction
//!   decided by who holds the orb, throttled per (attacker, defender) pair
//! - ability damage (melee/area instantly, projectiles on hit)
//!
//! A lethal blow marks the victim dead, moves the orb to the attacker if the
//! victim carried it, and rotates the target pillar. Losing the local agent
//! ends the match.

use glam::Vec2;

use super::catalog::AbilityKind;
use super::collision::circular_hit;
use super::projectile::{resolve_hit, spawn};
use super::state::{AgentId, DamageSource, MatchEvent, MatchState, OutcomeKind};
use crate::consts::*;

/// Count every agent's cooldowns down by `dt`
pub fn tick_cooldowns(state: &mut MatchState, dt: f32) {
    for agent in &mut state.agents {
        agent.tick_cooldowns(dt);
    }
}

/// Fire the ability in `slot` for `user`, aimed at `aim`.
///
/// Ignored (returns false) when the user is dead, the slot is empty, the
/// ability is cooling down, or a projectile has no heading. Melee and area
/// uses that hit nobody still count as used.
pub fn use_ability(state: &mut MatchState, user: AgentId, slot: usize, aim: Vec2) -> bool {
    if state.is_over() {
        return false;
    }
    let agent = state.agent(user);
    if agent.is_dead {
        return false;
    }
    let warrior = agent.warrior;
    let Some(ability) = warrior.ability(slot) else {
        return false;
    };
    if !agent.ability_ready(ability.id) {
        return false;
    }
    let origin = agent.pos;
    let source = DamageSource::Ability(ability.id);

    match ability.kind {
        AbilityKind::Projectile => {
            let id = state.next_entity_id();
            let Some(projectile) = spawn(id, state.agent(user), ability, aim) else {
                return false;
            };
            state.projectiles.push(projectile);
            state
                .events
                .push(MatchEvent::ProjectileSpawned { id, owner: user });
        }
        AbilityKind::Melee => {
            let nearest = state
                .agents
                .iter()
                .filter(|a| a.id != user && a.is_alive())
                .filter(|a| circular_hit(origin, a.pos, ability.range))
                .min_by(|a, b| {
                    a.pos
                        .distance_squared(origin)
                        .total_cmp(&b.pos.distance_squared(origin))
                })
                .map(|a| a.id);
            if let Some(target) = nearest {
                apply_damage(state, user, target, ability.damage, source);
            }
        }
        AbilityKind::Area => {
            let targets: Vec<AgentId> = state
                .agents
                .iter()
                .filter(|a| a.id != user && a.is_alive())
                .filter(|a| circular_hit(origin, a.pos, ability.range))
                .map(|a| a.id)
                .collect();
            for target in targets {
                apply_damage(state, user, target, ability.damage, source);
            }
        }
    }

    state.agent_mut(user).cooldowns.insert(ability.id, ability.cooldown);
    state.events.push(MatchEvent::AbilityUsed {
        agent: user,
        ability: ability.id,
    });
    true
}

/// Apply one hit per projectile that touches an agent, retiring the projectile
pub fn resolve_projectile_hits(state: &mut MatchState) {
    let mut i = 0;
    while i < state.projectiles.len() {
        if state.is_over() {
            return;
        }
        match resolve_hit(&state.projectiles[i], &state.agents) {
            Some(target) => {
                let projectile = state.projectiles.remove(i);
                state
                    .events
                    .push(MatchEvent::ProjectileRetired { id: projectile.id });
                apply_damage(
                    state,
                    projectile.owner,
                    target,
                    projectile.ability.damage,
                    DamageSource::Ability(projectile.ability.id),
                );
            }
            None => i += 1,
        }
    }
}

/// Contact damage between the local agent and every live agent it overlaps.
///
/// Direction is fixed by orb possession at the start of the pass: a carrying
/// local agent gets hit, otherwise it hits whoever carries the orb.
pub fn resolve_contacts(state: &mut MatchState) {
    let Some(local) = state.local_id() else {
        return;
    };
    let local_agent = state.agent(local);
    if local_agent.is_dead {
        return;
    }
    let local_pos = local_agent.pos;
    let local_has_orb = local_agent.has_orb;
    let now = state.elapsed;
    let window = f64::from(state.settings.contact_rehit_secs);
    let damage = state.settings.contact_damage;

    let touching: Vec<(AgentId, bool)> = state
        .agents
        .iter()
        .filter(|a| a.id != local && a.is_alive())
        .filter(|a| circular_hit(local_pos, a.pos, COLLISION_DISTANCE))
        .map(|a| (a.id, a.has_orb))
        .collect();

    for (other, other_has_orb) in touching {
        if state.is_over() {
            return;
        }
        let (attacker, defender) = if local_has_orb {
            (other, local)
        } else if other_has_orb {
            (local, other)
        } else {
            continue;
        };
        if state.contacts.try_hit(attacker, defender, now, window) {
            apply_damage(state, attacker, defender, damage, DamageSource::Contact);
        }
    }
}

/// Deal `amount` to `target` and run the death bookkeeping on a lethal blow
pub fn apply_damage(
    state: &mut MatchState,
    attacker: AgentId,
    target: AgentId,
    amount: i32,
    source: DamageSource,
) {
    if state.is_over() {
        return;
    }
    let victim = state.agent_mut(target);
    if victim.is_dead {
        return;
    }
    let lethal = victim.take_damage(amount);
    state.events.push(MatchEvent::Damaged {
        attacker,
        target,
        amount,
        source,
    });
    if lethal {
        eliminate(state, target, attacker);
    }
}

fn eliminate(state: &mut MatchState, victim: AgentId, by: AgentId) {
    let agent = state.agent_mut(victim);
    agent.is_dead = true;
    agent.health = 0;
    let had_orb = std::mem::take(&mut agent.has_orb);
    let was_local = agent.is_local();

    state.alive_count = state.alive_count.saturating_sub(1);
    state
        .events
        .push(MatchEvent::Eliminated { agent: victim, by });
    log::debug!(
        "Agent {} eliminated by {} ({} alive)",
        victim.0,
        by.0,
        state.alive_count
    );

    if was_local {
        let eliminations = state.eliminations;
        state.finish(OutcomeKind::Eliminated, eliminations);
        return;
    }

    if state.agent(by).is_local() {
        state.eliminations += 1;
    }
    let killer = state.agent_mut(by);
    if had_orb && killer.is_alive() {
        killer.has_orb = true;
        state
            .events
            .push(MatchEvent::OrbTransferred { from: victim, to: by });
        log::debug!("Orb {} -> {}", victim.0, by.0);
    }
    state.rotate_target();
}

/// Deposit and last-standing checks, run once at the end of every tick
pub fn check_terminal(state: &mut MatchState) {
    if state.is_over() {
        return;
    }
    let Some(local) = state.local_id() else {
        return;
    };
    let local = state.agent(local);
    if local.is_dead {
        return;
    }

    let deposited = local.has_orb
        && state
            .target_pillar()
            .is_some_and(|p| circular_hit(local.pos, p.pos, DEPOSIT_DISTANCE));
    if deposited {
        let eliminations = state.initial_alive - state.alive_count;
        state.finish(OutcomeKind::Deposit, eliminations);
        return;
    }

    let rivals_left = state
        .agents
        .iter()
        .any(|a| !a.is_local() && a.is_alive());
    if !rivals_left {
        let eliminations = state.eliminations;
        state.finish(OutcomeKind::Elimination, eliminations);
    }
}
