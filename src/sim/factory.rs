//! Initial entity layout
//!
//! Pure and deterministic: the same arguments always produce the same
//! agents, pillars and obstacles. Only the target pillar is random, and that
//! is picked elsewhere.

use std::collections::BTreeMap;

use glam::Vec2;

use super::catalog::WarriorClass;
use super::state::{Agent, AgentId, AgentRole, Obstacle, ObstacleKind, Pillar};
use crate::consts::*;
use crate::{map_center, ring_point};

/// `count` pillars evenly spaced on the pillar ring, none targeted yet
pub fn create_pillars(count: usize) -> Vec<Pillar> {
    (0..count)
        .map(|i| Pillar {
            id: i as u32,
            pos: ring_point(PILLAR_RING_RADIUS, i, count),
            is_target: false,
        })
        .collect()
}

/// Ten agents on the spawn ring. Agent 0 is locally controlled, plays `local`
/// and starts with the orb; the rest cycle through `roster`.
pub fn create_players(
    local: &'static WarriorClass,
    roster: &[&'static WarriorClass],
) -> Vec<Agent> {
    (0..AGENT_COUNT)
        .map(|i| {
            let (role, warrior) = if i == 0 {
                (AgentRole::LocalControlled, local)
            } else {
                let warrior = if roster.is_empty() {
                    local
                } else {
                    roster[(i - 1) % roster.len()]
                };
                (AgentRole::ScriptedPursuer, warrior)
            };

            Agent {
                id: AgentId(i as u32),
                role,
                pos: ring_point(SPAWN_RING_RADIUS, i, AGENT_COUNT),
                vel: Vec2::ZERO,
                health: warrior.stats.max_health,
                max_health: warrior.stats.max_health,
                has_orb: role == AgentRole::LocalControlled,
                is_dead: false,
                color: PLAYER_COLORS[i % PLAYER_COLORS.len()],
                warrior,
                cooldowns: BTreeMap::new(),
            }
        })
        .collect()
}

/// Hand-placed terrain, four-way symmetric around map center
pub fn create_obstacles() -> Vec<Obstacle> {
    use ObstacleKind::*;

    // (offset x, offset y, width, height, kind)
    const LAYOUT: [(f32, f32, f32, f32, ObstacleKind); 16] = [
        (200.0, 0.0, 60.0, 15.0, Wall),
        (-200.0, 0.0, 60.0, 15.0, Wall),
        (0.0, 200.0, 15.0, 60.0, Wall),
        (0.0, -200.0, 15.0, 60.0, Wall),
        (150.0, 150.0, 40.0, 40.0, Rock),
        (-150.0, 150.0, 40.0, 40.0, Rock),
        (150.0, -150.0, 40.0, 40.0, Rock),
        (-150.0, -150.0, 40.0, 40.0, Rock),
        (280.0, 280.0, 36.0, 36.0, Tree),
        (-280.0, 280.0, 36.0, 36.0, Tree),
        (280.0, -280.0, 36.0, 36.0, Tree),
        (-280.0, -280.0, 36.0, 36.0, Tree),
        (150.0, 0.0, 24.0, 24.0, Pillar),
        (-150.0, 0.0, 24.0, 24.0, Pillar),
        (0.0, 150.0, 24.0, 24.0, Pillar),
        (0.0, -150.0, 24.0, 24.0, Pillar),
    ];

    let center = map_center();
    LAYOUT
        .iter()
        .enumerate()
        .map(|(i, &(dx, dy, width, height, kind))| Obstacle {
            id: i as u32,
            pos: center + Vec2::new(dx, dy),
            width,
            height,
            kind,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::catalog::Catalog;
    use crate::sim::collision::{overlaps_any, rect_overlap};

    fn roster() -> Vec<&'static WarriorClass> {
        Catalog::standard().warriors().iter().collect()
    }

    #[test]
    fn test_pillars_on_ring() {
        let pillars = create_pillars(8);
        assert_eq!(pillars.len(), 8);
        for p in &pillars {
            assert!(!p.is_target);
            assert!((p.pos.distance(map_center()) - PILLAR_RING_RADIUS).abs() < 0.01);
        }
        assert!((pillars[0].pos - Vec2::new(700.0, 400.0)).length() < 0.01);
    }

    #[test]
    fn test_players_roles_and_roster_cycle() {
        let catalog = Catalog::standard();
        let local = catalog.warrior("iron_guardian").unwrap();
        let roster = vec![
            catalog.warrior("arcane_archer").unwrap(),
            catalog.warrior("plasma_mage").unwrap(),
        ];
        let agents = create_players(local, &roster);

        assert_eq!(agents.len(), AGENT_COUNT);
        assert_eq!(agents[0].role, AgentRole::LocalControlled);
        assert!(agents[0].has_orb);
        assert_eq!(agents[0].warrior.id, "iron_guardian");
        assert_eq!(agents[0].health, 180);

        assert!(agents[1..].iter().all(|a| a.role == AgentRole::ScriptedPursuer));
        assert!(agents[1..].iter().all(|a| !a.has_orb && a.is_alive()));
        assert_eq!(agents[1].warrior.id, "arcane_archer");
        assert_eq!(agents[2].warrior.id, "plasma_mage");
        assert_eq!(agents[3].warrior.id, "arcane_archer");
        assert_eq!(agents[9].warrior.id, "arcane_archer");
        for a in &agents {
            assert_eq!(a.health, a.max_health);
            assert!((a.pos.distance(map_center()) - SPAWN_RING_RADIUS).abs() < 0.01);
        }
    }

    #[test]
    fn test_factories_are_deterministic() {
        let local = Catalog::standard().default_warrior();
        let a = create_players(local, &roster());
        let b = create_players(local, &roster());
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.color, y.color);
            assert_eq!(x.max_health, y.max_health);
            assert_eq!(x.warrior.id, y.warrior.id);
        }

        let pa = create_pillars(12);
        let pb = create_pillars(12);
        assert!(pa.iter().zip(&pb).all(|(x, y)| x.pos == y.pos));

        assert_eq!(create_obstacles(), create_obstacles());
    }

    #[test]
    fn test_obstacles_clear_of_spawns_and_pillars() {
        let obstacles = create_obstacles();
        let agents = create_players(Catalog::standard().default_warrior(), &roster());
        for a in &agents {
            assert!(!overlaps_any(a.pos, PLAYER_SIZE / 2.0, &obstacles));
        }
        for p in &create_pillars(DEFAULT_PILLAR_COUNT) {
            assert!(!overlaps_any(p.pos, PILLAR_SIZE / 2.0, &obstacles));
        }
        // Obstacles don't overlap each other
        for (i, a) in obstacles.iter().enumerate() {
            for b in &obstacles[i + 1..] {
                let half = a.width.max(a.height) / 2.0;
                let touching = rect_overlap(a.pos, half, b);
                assert!(!touching, "obstacles {} and {} overlap", a.id, b.id);
            }
        }
    }

    #[test]
    fn test_obstacle_layout_is_symmetric() {
        let center = map_center();
        let obstacles = create_obstacles();
        for o in &obstacles {
            let mirrored = center * 2.0 - o.pos;
            assert!(
                obstacles
                    .iter()
                    .any(|m| (m.pos - mirrored).length() < 0.01 && m.kind == o.kind),
                "no mirror for obstacle {}",
                o.id
            );
        }
    }
}
