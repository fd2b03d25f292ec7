//! Match state and core simulation types
//!
//! Everything a running match mutates lives in [`MatchState`]. It is owned by
//! the tick driver and discarded when the match ends.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::Serialize;

use super::catalog::{Catalog, WarriorAbility, WarriorClass};
use super::factory;
use super::objective::ObjectiveRotation;
use crate::error::ConfigError;
use crate::settings::MatchSettings;

/// Stable agent identity; also the agent's slot in [`MatchState::agents`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct AgentId(pub u32);

impl AgentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

pub type PillarId = u32;

/// Who drives an agent, fixed at creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AgentRole {
    /// Steered by the player's movement intents
    LocalControlled,
    /// Chases the orb holder
    ScriptedPursuer,
}

#[derive(Debug, Clone)]
pub struct Agent {
    pub id: AgentId,
    pub role: AgentRole,
    pub pos: Vec2,
    /// Last applied displacement per reference tick
    pub vel: Vec2,
    pub health: i32,
    pub max_health: i32,
    pub has_orb: bool,
    /// Monotonic: never reverts within a match
    pub is_dead: bool,
    pub color: &'static str,
    pub warrior: &'static WarriorClass,
    /// Remaining seconds per ability id; absent means ready
    pub cooldowns: BTreeMap<&'static str, f32>,
}

impl Agent {
    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    pub fn is_local(&self) -> bool {
        self.role == AgentRole::LocalControlled
    }

    pub fn ability_ready(&self, ability_id: &str) -> bool {
        self.cooldowns.get(ability_id).is_none_or(|&left| left <= 0.0)
    }

    /// Count every cooldown down by `dt`, dropping the ones that reach zero
    pub fn tick_cooldowns(&mut self, dt: f32) {
        for left in self.cooldowns.values_mut() {
            *left = (*left - dt).max(0.0);
        }
        self.cooldowns.retain(|_, left| *left > 0.0);
    }

    /// Subtract damage, floored at zero. Returns true if this blow was lethal.
    /// The caller does the death bookkeeping.
    pub fn take_damage(&mut self, amount: i32) -> bool {
        if self.is_dead {
            return false;
        }
        self.health = (self.health - amount).clamp(0, self.max_health);
        self.health == 0
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Pillar {
    pub id: PillarId,
    pub pos: Vec2,
    pub is_target: bool,
}

/// Terrain tag (cosmetic; every kind collides the same way)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Rock,
    Wall,
    Tree,
    Pillar,
}

/// Axis-aligned rectangle centered on `pos`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Obstacle {
    pub id: u32,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

impl Obstacle {
    /// (min corner, max corner)
    #[inline]
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let half = Vec2::new(self.width, self.height) / 2.0;
        (self.pos - half, self.pos + half)
    }
}

#[derive(Debug, Clone)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    /// Displacement per reference tick
    pub vel: Vec2,
    pub owner: AgentId,
    pub ability: &'static WarriorAbility,
    pub traveled: f32,
}

/// Terminal result kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// Local agent delivered the orb to the target pillar
    Deposit,
    /// Local agent is the last one standing
    Elimination,
    /// Local agent died or the clock ran out
    Eliminated,
}

/// Payload handed to the summary screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOutcome {
    pub result: OutcomeKind,
    pub survival_time_seconds: u32,
    pub eliminations: u32,
}

impl MatchOutcome {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_victory(&self) -> bool {
        matches!(self.result, OutcomeKind::Deposit | OutcomeKind::Elimination)
    }
}

/// What caused a damage event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DamageSource {
    Contact,
    Ability(&'static str),
}

/// Things that happened during the last tick (for haptics, audio, effects)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MatchEvent {
    Damaged {
        attacker: AgentId,
        target: AgentId,
        amount: i32,
        source: DamageSource,
    },
    AbilityUsed {
        agent: AgentId,
        ability: &'static str,
    },
    ProjectileSpawned {
        id: u32,
        owner: AgentId,
    },
    ProjectileRetired {
        id: u32,
    },
    Eliminated {
        agent: AgentId,
        by: AgentId,
    },
    OrbTransferred {
        from: AgentId,
        to: AgentId,
    },
    TargetChanged {
        pillar: PillarId,
    },
}

/// Last contact hit time per (attacker, defender) pair
#[derive(Debug, Clone, Default)]
pub struct ContactLog {
    last_hit: BTreeMap<(AgentId, AgentId), f64>,
}

impl ContactLog {
    /// Record a hit at `now` unless the pair hit within `window` seconds.
    /// Returns true if the hit goes through.
    pub fn try_hit(&mut self, attacker: AgentId, defender: AgentId, now: f64, window: f64) -> bool {
        let key = (attacker, defender);
        if let Some(&last) = self.last_hit.get(&key) {
            if now - last < window {
                return false;
            }
        }
        self.last_hit.insert(key, now);
        true
    }
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct MatchState {
    pub settings: MatchSettings,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since start
    pub elapsed: f64,
    /// Countdown seconds remaining
    pub time_left: u32,
    /// Sorted by id; agents are flagged dead, never removed
    pub agents: Vec<Agent>,
    pub pillars: Vec<Pillar>,
    pub obstacles: Vec<Obstacle>,
    /// Sorted by id
    pub projectiles: Vec<Projectile>,
    pub target: PillarId,
    pub objective: ObjectiveRotation,
    pub initial_alive: u32,
    pub alive_count: u32,
    /// Kills credited to the local agent
    pub eliminations: u32,
    pub contacts: ContactLog,
    /// Everything that happened since the driver last cleared it
    pub events: Vec<MatchEvent>,
    pub outcome: Option<MatchOutcome>,
    next_id: u32,
}

impl MatchState {
    /// Validate settings and lay out a fresh match
    pub fn new(settings: MatchSettings, catalog: &Catalog) -> Result<Self, ConfigError> {
        let warriors = settings.validate(catalog)?;
        let mut objective = ObjectiveRotation::new(settings.seed, settings.pillar_count)?;

        let agents = factory::create_players(warriors.local, &warriors.roster);
        let mut pillars = factory::create_pillars(settings.pillar_count);
        let obstacles = factory::create_obstacles();

        let target = objective.pick_target(None);
        for pillar in &mut pillars {
            pillar.is_target = pillar.id == target;
        }

        let alive = agents.len() as u32;
        log::info!(
            "Match start: seed={} mode={} local={} pillars={} target={}",
            settings.seed,
            settings.mode.as_str(),
            warriors.local.id,
            pillars.len(),
            target
        );

        Ok(Self {
            time_left: settings.duration_secs,
            settings,
            time_ticks: 0,
            elapsed: 0.0,
            agents,
            pillars,
            obstacles,
            projectiles: Vec::new(),
            target,
            objective,
            initial_alive: alive,
            alive_count: alive,
            eliminations: 0,
            contacts: ContactLog::default(),
            events: Vec::new(),
            outcome: None,
            next_id: 0,
        })
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn agent(&self, id: AgentId) -> &Agent {
        &self.agents[id.index()]
    }

    pub fn agent_mut(&mut self, id: AgentId) -> &mut Agent {
        &mut self.agents[id.index()]
    }

    /// The locally controlled agent
    pub fn local_id(&self) -> Option<AgentId> {
        self.agents.iter().find(|a| a.is_local()).map(|a| a.id)
    }

    /// Live agent currently holding the orb
    pub fn orb_holder(&self) -> Option<&Agent> {
        self.agents.iter().find(|a| a.has_orb && a.is_alive())
    }

    pub fn target_pillar(&self) -> Option<&Pillar> {
        self.pillars.iter().find(|p| p.id == self.target)
    }

    /// Make `pillar` the only active target
    pub fn set_target(&mut self, pillar: PillarId) {
        self.target = pillar;
        for p in &mut self.pillars {
            p.is_target = p.id == pillar;
        }
        self.events.push(MatchEvent::TargetChanged { pillar });
    }

    /// Roll a new target pillar, never the current one
    pub fn rotate_target(&mut self) {
        let next = self.objective.pick_target(Some(self.target));
        log::debug!("Target pillar {} -> {}", self.target, next);
        self.set_target(next);
    }

    /// Whole seconds survived so far
    pub fn survival_secs(&self) -> u32 {
        self.settings.duration_secs.saturating_sub(self.time_left)
    }

    /// End the match; the first outcome wins
    pub fn finish(&mut self, result: OutcomeKind, eliminations: u32) {
        if self.outcome.is_some() {
            return;
        }
        let outcome = MatchOutcome {
            result,
            survival_time_seconds: self.survival_secs(),
            eliminations,
        };
        log::info!(
            "Match over: {:?} after {}s with {} eliminations",
            outcome.result,
            outcome.survival_time_seconds,
            outcome.eliminations
        );
        self.outcome = Some(outcome);
    }
}
