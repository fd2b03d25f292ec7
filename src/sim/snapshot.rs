//! Read-only view of a match for the presentation layer
//!
//! Built after a tick completes. Holds plain copies, so nothing the renderer
//! does with it can reach back into the simulation.

use serde::Serialize;

use super::state::{AgentId, MatchEvent, MatchOutcome, MatchState, ObstacleKind, PillarId};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentView {
    pub id: AgentId,
    pub x: f32,
    pub y: f32,
    /// Displacement per reference tick, for facing and animation
    pub vx: f32,
    pub vy: f32,
    pub health: i32,
    pub max_health: i32,
    pub is_dead: bool,
    pub has_orb: bool,
    pub is_local: bool,
    pub color: &'static str,
    pub warrior: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarView {
    pub id: PillarId,
    pub x: f32,
    pub y: f32,
    pub is_target: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectileView {
    pub id: u32,
    pub x: f32,
    pub y: f32,
    /// Color of the ability that fired it
    pub color: &'static str,
}

/// Everything needed to draw one frame, ordered by id
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub tick: u64,
    pub agents: Vec<AgentView>,
    pub pillars: Vec<PillarView>,
    pub obstacles: Vec<ObstacleView>,
    pub projectiles: Vec<ProjectileView>,
    pub time_left: u32,
    pub alive_count: u32,
    pub eliminations: u32,
    /// Events since the previous frame, in the order they happened
    pub events: Vec<MatchEvent>,
    pub outcome: Option<MatchOutcome>,
}

impl MatchSnapshot {
    pub fn capture(state: &MatchState) -> Self {
        Self {
            tick: state.time_ticks,
            agents: state
                .agents
                .iter()
                .map(|a| AgentView {
                    id: a.id,
                    x: a.pos.x,
                    y: a.pos.y,
                    vx: a.vel.x,
                    vy: a.vel.y,
                    health: a.health,
                    max_health: a.max_health,
                    is_dead: a.is_dead,
                    has_orb: a.has_orb,
                    is_local: a.is_local(),
                    color: a.color,
                    warrior: a.warrior.id,
                })
                .collect(),
            pillars: state
                .pillars
                .iter()
                .map(|p| PillarView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    is_target: p.is_target,
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                    width: o.width,
                    height: o.height,
                    kind: o.kind,
                })
                .collect(),
            projectiles: state
                .projectiles
                .iter()
                .map(|p| ProjectileView {
                    id: p.id,
                    x: p.pos.x,
                    y: p.pos.y,
                    color: p.ability.color,
                })
                .collect(),
            time_left: state.time_left,
            alive_count: state.alive_count,
            eliminations: state.eliminations,
            events: state.events.clone(),
            outcome: state.outcome,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn local(&self) -> Option<&AgentView> {
        self.agents.iter().find(|a| a.is_local)
    }

    pub fn orb_holder(&self) -> Option<&AgentView> {
        self.agents.iter().find(|a| a.has_orb && !a.is_dead)
    }
}

impl From<&MatchState> for MatchSnapshot {
    fn from(state: &MatchState) -> Self {
        Self::capture(state)
    }
}
