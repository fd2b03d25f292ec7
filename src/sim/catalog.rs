//! Warrior and ability catalog
//!
//! Static, read-only data shared by every match in the process. Agents hold
//! `&'static` references into it, so nothing here is ever mutated or dropped.

use serde::Serialize;

/// How an ability resolves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AbilityKind {
    /// Instant single-target strike around the user
    Melee,
    /// Spawns a travelling projectile
    Projectile,
    /// Instant strike on everyone around the user
    Area,
}

/// Warrior archetype (display only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Melee,
    Ranged,
    Tank,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarriorAbility {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub damage: i32,
    /// Seconds
    pub cooldown: f32,
    /// Map units (reach for melee/area, max travel for projectiles)
    pub range: f32,
    /// Map units per reference tick, 0 for instant abilities
    pub speed: f32,
    pub kind: AbilityKind,
    pub color: &'static str,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct WarriorStats {
    pub max_health: i32,
    pub move_speed: f32,
    /// Damage multiplier (catalog data; not applied to contact damage)
    pub defense: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct WarriorClass {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub archetype: Archetype,
    pub color: &'static str,
    pub glow_color: &'static str,
    pub stats: WarriorStats,
    /// Fixed display order; the index is the ability slot
    pub abilities: [WarriorAbility; 3],
}

impl WarriorClass {
    /// Ability in slot 0..=2
    pub fn ability(&self, slot: usize) -> Option<&WarriorAbility> {
        self.abilities.get(slot)
    }

    pub fn ability_by_id(&self, id: &str) -> Option<&WarriorAbility> {
        self.abilities.iter().find(|a| a.id == id)
    }
}

/// Process-wide warrior registry
#[derive(Debug)]
pub struct Catalog {
    warriors: &'static [WarriorClass],
}

static STANDARD: Catalog = Catalog {
    warriors: &WARRIORS,
};

impl Catalog {
    /// The built-in roster
    pub fn standard() -> &'static Catalog {
        &STANDARD
    }

    pub fn warriors(&self) -> &'static [WarriorClass] {
        self.warriors
    }

    pub fn warrior(&self, id: &str) -> Option<&'static WarriorClass> {
        self.warriors.iter().find(|w| w.id == id)
    }

    /// Ability lookup across every warrior
    pub fn ability(&self, id: &str) -> Option<&'static WarriorAbility> {
        self.warriors
            .iter()
            .flat_map(|w| w.abilities.iter())
            .find(|a| a.id == id)
    }

    pub fn default_warrior(&self) -> &'static WarriorClass {
        &self.warriors[0]
    }
}

#[allow(clippy::too_many_arguments)]
const fn ability(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    damage: i32,
    cooldown: f32,
    range: f32,
    speed: f32,
    kind: AbilityKind,
    color: &'static str,
) -> WarriorAbility {
    WarriorAbility {
        id,
        name,
        description,
        damage,
        cooldown,
        range,
        speed,
        kind,
        color,
    }
}

#[rustfmt::skip]
static WARRIORS: [WarriorClass; 6] = [
    WarriorClass {
        id: "shadow_striker",
        name: "Shadow Striker",
        description: "Swift melee assassin with devastating close-range attacks",
        archetype: Archetype::Melee,
        color: "#8B00FF",
        glow_color: "#D800FF",
        stats: WarriorStats {
            max_health: 120,
            move_speed: 4.5,
            defense: 0.8,
        },
        abilities: [
            ability("shadow_slash", "Shadow Slash", "Quick melee strike", 25, 0.8, 50.0, 0.0, AbilityKind::Melee, "#8B00FF"),
            ability("dark_dash", "Dark Dash", "Dash forward dealing damage", 35, 3.0, 120.0, 15.0, AbilityKind::Melee, "#D800FF"),
            ability("phantom_strike", "Phantom Strike", "Powerful AoE slash", 50, 6.0, 70.0, 0.0, AbilityKind::Area, "#FF00FF"),
        ],
    },
    WarriorClass {
        id: "arcane_archer",
        name: "Arcane Archer",
        description: "Long-range specialist with devastating projectile attacks",
        archetype: Archetype::Ranged,
        color: "#00D9FF",
        glow_color: "#00FFFF",
        stats: WarriorStats {
            max_health: 100,
            move_speed: 3.5,
            defense: 0.7,
        },
        abilities: [
            ability("energy_arrow", "Energy Arrow", "Fast energy projectile", 20, 0.6, 400.0, 12.0, AbilityKind::Projectile, "#00D9FF"),
            ability("piercing_shot", "Piercing Shot", "Powerful piercing arrow", 40, 2.5, 500.0, 15.0, AbilityKind::Projectile, "#00FFFF"),
            ability("arcane_volley", "Arcane Volley", "Spread of energy arrows", 15, 5.0, 350.0, 10.0, AbilityKind::Projectile, "#4DFFFF"),
        ],
    },
    WarriorClass {
        id: "iron_guardian",
        name: "Iron Guardian",
        description: "Heavily armored tank with defensive abilities and area control",
        archetype: Archetype::Tank,
        color: "#FFD700",
        glow_color: "#FFA500",
        stats: WarriorStats {
            max_health: 180,
            move_speed: 2.8,
            defense: 1.3,
        },
        abilities: [
            ability("shield_bash", "Shield Bash", "Melee attack with knockback", 18, 1.0, 55.0, 0.0, AbilityKind::Melee, "#FFD700"),
            ability("ground_slam", "Ground Slam", "AoE slam around player", 30, 3.5, 100.0, 0.0, AbilityKind::Area, "#FFA500"),
            ability("iron_wave", "Iron Wave", "Expanding wave projectile", 45, 7.0, 200.0, 6.0, AbilityKind::Projectile, "#FF8C00"),
        ],
    },
    WarriorClass {
        id: "plasma_mage",
        name: "Plasma Mage",
        description: "Energy wielder with explosive magical projectiles",
        archetype: Archetype::Ranged,
        color: "#FF006E",
        glow_color: "#FF4D9F",
        stats: WarriorStats {
            max_health: 90,
            move_speed: 3.2,
            defense: 0.6,
        },
        abilities: [
            ability("plasma_bolt", "Plasma Bolt", "Fast plasma projectile", 22, 0.7, 380.0, 11.0, AbilityKind::Projectile, "#FF006E"),
            ability("energy_burst", "Energy Burst", "Explosive AoE blast", 35, 3.0, 90.0, 0.0, AbilityKind::Area, "#FF4D9F"),
            ability("meteor_strike", "Meteor Strike", "Devastating slow projectile", 60, 8.0, 450.0, 7.0, AbilityKind::Projectile, "#FF1493"),
        ],
    },
    WarriorClass {
        id: "void_reaper",
        name: "Void Reaper",
        description: "Balanced warrior with deadly combo potential",
        archetype: Archetype::Melee,
        color: "#4361EE",
        glow_color: "#5E7FFF",
        stats: WarriorStats {
            max_health: 130,
            move_speed: 3.8,
            defense: 0.9,
        },
        abilities: [
            ability("void_blade", "Void Blade", "Swift sword strike", 23, 0.9, 52.0, 0.0, AbilityKind::Melee, "#4361EE"),
            ability("void_rift", "Void Rift", "Short-range energy wave", 32, 2.8, 150.0, 9.0, AbilityKind::Projectile, "#5E7FFF"),
            ability("reaper_spin", "Reaper Spin", "Spinning AoE attack", 42, 5.5, 80.0, 0.0, AbilityKind::Area, "#7B9EFF"),
        ],
    },
    WarriorClass {
        id: "storm_bringer",
        name: "Storm Bringer",
        description: "Elemental warrior commanding lightning and thunder",
        archetype: Archetype::Ranged,
        color: "#06FFA5",
        glow_color: "#00FF88",
        stats: WarriorStats {
            max_health: 110,
            move_speed: 3.6,
            defense: 0.75,
        },
        abilities: [
            ability("lightning_bolt", "Lightning Bolt", "Instant lightning strike", 24, 0.75, 420.0, 18.0, AbilityKind::Projectile, "#06FFA5"),
            ability("thunder_clap", "Thunder Clap", "AoE stun and damage", 28, 3.2, 110.0, 0.0, AbilityKind::Area, "#00FF88"),
            ability("storm_fury", "Storm Fury", "Chaining lightning projectile", 55, 6.5, 400.0, 13.0, AbilityKind::Projectile, "#00FFB3"),
        ],
    },
];
