//! Per-tick agent movement
//!
//! Each agent's role picks a [`MovementPolicy`]. Both policies share the same
//! axis-separated obstacle response, so agents slide along walls.

use glam::Vec2;

use super::collision::slide_move;
use super::state::{Agent, AgentId, AgentRole, MatchState, Obstacle};
use crate::clamp_to_map;
use crate::consts::*;

/// What a policy may look at when choosing a move
pub struct MoveContext<'a> {
    /// Movement intent, magnitude at most 1
    pub input: Vec2,
    /// Live orb holder at the start of the tick
    pub holder: Option<(AgentId, Vec2)>,
    pub obstacles: &'a [Obstacle],
    /// Elapsed time in reference ticks (1.0 at `SIM_DT`)
    pub ticks: f32,
}

pub trait MovementPolicy {
    /// New position for `agent` this tick
    fn step(&self, agent: &Agent, ctx: &MoveContext) -> Vec2;
}

/// Joystick-driven movement, clamped inside the map
pub struct InputSteering;

impl MovementPolicy for InputSteering {
    fn step(&self, agent: &Agent, ctx: &MoveContext) -> Vec2 {
        let step = ctx.input * LOCAL_MOVE_STEP * ctx.ticks;
        let moved = slide_move(agent.pos, step, PLAYER_SIZE / 2.0, ctx.obstacles);
        clamp_to_map(moved, PLAYER_SIZE)
    }
}

/// Walk toward the orb holder until inside personal space
pub struct OrbPursuit;

impl MovementPolicy for OrbPursuit {
    fn step(&self, agent: &Agent, ctx: &MoveContext) -> Vec2 {
        let Some((holder_id, holder_pos)) = ctx.holder else {
            return agent.pos;
        };
        if holder_id == agent.id {
            return agent.pos;
        }

        let to_holder = holder_pos - agent.pos;
        let distance = to_holder.length();
        if distance <= PERSONAL_SPACE {
            return agent.pos;
        }

        let step = to_holder / distance * PURSUIT_STEP * ctx.ticks;
        slide_move(agent.pos, step, PLAYER_SIZE / 2.0, ctx.obstacles)
    }
}

pub fn policy_for(role: AgentRole) -> &'static dyn MovementPolicy {
    match role {
        AgentRole::LocalControlled => &InputSteering,
        AgentRole::ScriptedPursuer => &OrbPursuit,
    }
}

/// Clamp a raw movement intent to the unit disc
pub fn sanitize_input(raw: Vec2) -> Vec2 {
    if raw.is_finite() {
        raw.clamp_length_max(1.0)
    } else {
        Vec2::ZERO
    }
}

/// Move every live agent once. Dead agents stay put.
pub fn move_agents(state: &mut MatchState, input: Vec2, dt: f32) {
    let ctx = MoveContext {
        input: sanitize_input(input),
        holder: state.orb_holder().map(|h| (h.id, h.pos)),
        obstacles: &state.obstacles,
        ticks: dt / SIM_DT,
    };

    for agent in state.agents.iter_mut().filter(|a| a.is_alive()) {
        let next = policy_for(agent.role).step(agent, &ctx);
        agent.vel = if ctx.ticks > 0.0 {
            (next - agent.pos) / ctx.ticks
        } else {
            Vec2::ZERO
        };
        agent.pos = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MatchSettings;
    use crate::sim::catalog::Catalog;
    use crate::sim::state::ObstacleKind;

    fn state() -> MatchState {
        MatchState::new(MatchSettings::with_seed(3), Catalog::standard()).unwrap()
    }

    #[test]
    fn test_local_moves_with_input() {
        let mut state = state();
        let start = state.agents[0].pos;
        move_agents(&mut state, Vec2::new(0.0, -1.0), SIM_DT);
        let moved = state.agents[0].pos;
        assert!((moved.x - start.x).abs() < 1e-4);
        assert!((moved.y - (start.y - LOCAL_MOVE_STEP)).abs() < 1e-4);
        assert!((state.agents[0].vel.y + LOCAL_MOVE_STEP).abs() < 1e-4);
    }

    #[test]
    fn test_input_magnitude_is_clamped() {
        let clamped = sanitize_input(Vec2::new(3.0, 4.0));
        assert!((clamped - Vec2::new(0.6, 0.8)).length() < 1e-6);
        assert_eq!(sanitize_input(Vec2::new(f32::NAN, 0.0)), Vec2::ZERO);
        assert_eq!(sanitize_input(Vec2::new(0.5, 0.0)), Vec2::new(0.5, 0.0));
    }

    #[test]
    fn test_local_clamped_to_map_edge() {
        let mut state = state();
        state.obstacles.clear();
        state.agents[0].pos = Vec2::new(PLAYER_SIZE + 1.0, 400.0);
        for _ in 0..5 {
            move_agents(&mut state, Vec2::new(-1.0, 0.0), SIM_DT);
        }
        assert_eq!(state.agents[0].pos.x, PLAYER_SIZE);
    }

    #[test]
    fn test_local_slides_along_wall() {
        let mut state = state();
        state.obstacles.retain(|o| o.kind == ObstacleKind::Wall);
        // Just left of the east wall at (600, 400), spanning x 570..630
        state.agents[0].pos = Vec2::new(555.0, 400.0);
        move_agents(&mut state, Vec2::new(0.6, 0.8), SIM_DT);
        let pos = state.agents[0].pos;
        assert_eq!(pos.x, 555.0);
        assert!((pos.y - 402.4).abs() < 1e-3);
    }

    #[test]
    fn test_pursuers_close_in_on_holder() {
        let mut state = state();
        let holder = state.agents[0].pos;
        let before: Vec<f32> = state.agents[1..]
            .iter()
            .map(|a| a.pos.distance(holder))
            .collect();
        move_agents(&mut state, Vec2::ZERO, SIM_DT);
        for (agent, d0) in state.agents[1..].iter().zip(before) {
            let d1 = agent.pos.distance(holder);
            if d0 > PERSONAL_SPACE {
                assert!(d1 < d0, "agent {:?} did not close in", agent.id);
                assert!(d0 - d1 <= PURSUIT_STEP + 1e-3);
            } else {
                assert_eq!(d1, d0);
            }
        }
    }

    #[test]
    fn test_pursuers_hold_inside_personal_space_or_without_holder() {
        let mut state = state();
        state.agents[1].pos = state.agents[0].pos + Vec2::new(40.0, 0.0);
        let near = state.agents[1].pos;
        move_agents(&mut state, Vec2::ZERO, SIM_DT);
        assert_eq!(state.agents[1].pos, near);

        // Nobody holds the orb: everyone stands still
        state.agents[0].has_orb = false;
        let snapshot: Vec<Vec2> = state.agents.iter().map(|a| a.pos).collect();
        move_agents(&mut state, Vec2::ZERO, SIM_DT);
        let after: Vec<Vec2> = state.agents.iter().map(|a| a.pos).collect();
        assert_eq!(snapshot, after);
    }

    #[test]
    fn test_dead_agents_do_not_move() {
        let mut state = state();
        state.agents[4].is_dead = true;
        state.agents[4].health = 0;
        let pos = state.agents[4].pos;
        move_agents(&mut state, Vec2::ZERO, SIM_DT);
        assert_eq!(state.agents[4].pos, pos);
    }

    #[test]
    fn test_double_step_covers_two_reference_ticks() {
        let mut a = state();
        let mut b = state();
        a.obstacles.clear();
        b.obstacles.clear();
        move_agents(&mut a, Vec2::new(1.0, 0.0), SIM_DT);
        move_agents(&mut a, Vec2::new(1.0, 0.0), SIM_DT);
        move_agents(&mut b, Vec2::new(1.0, 0.0), 2.0 * SIM_DT);
        assert!((a.agents[0].pos - b.agents[0].pos).length() < 1e-3);
    }
}
