//! Match settings
//!
//! Parsed and validated once before a match starts. A bad value here is a
//! startup error, never something the tick loop has to cope with.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::catalog::{Catalog, WarriorClass};

/// How the countdown ending is scored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatchMode {
    /// Timeout credits zero eliminations
    #[default]
    TimeBoxed,
    /// Timeout credits the eliminations accumulated so far
    Extended,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::TimeBoxed => "TimeBoxed",
            MatchMode::Extended => "Extended",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "timeboxed" | "time-boxed" | "timed" => Some(MatchMode::TimeBoxed),
            "extended" | "ext" => Some(MatchMode::Extended),
            _ => None,
        }
    }

    /// Eliminations credited when the countdown runs out
    pub fn timeout_eliminations(&self, accumulated: u32) -> u32 {
        match self {
            MatchMode::TimeBoxed => 0,
            MatchMode::Extended => accumulated,
        }
    }
}

/// Per-match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchSettings {
    /// Seed for objective rotation
    pub seed: u64,
    pub mode: MatchMode,
    /// Countdown length in whole seconds
    pub duration_secs: u32,
    pub pillar_count: usize,
    /// Warrior id for the locally controlled agent
    pub local_warrior: String,
    /// Warrior ids assigned cyclically to the scripted agents (empty = whole catalog)
    pub roster: Vec<String>,
    pub contact_damage: i32,
    pub contact_rehit_secs: f32,
}

impl Default for MatchSettings {
    fn default() -> Self {
        Self {
            seed: 0,
            mode: MatchMode::TimeBoxed,
            duration_secs: MATCH_DURATION_SECS,
            pillar_count: DEFAULT_PILLAR_COUNT,
            local_warrior: Catalog::standard().default_warrior().id.to_string(),
            roster: Vec::new(),
            contact_damage: CONTACT_DAMAGE,
            contact_rehit_secs: CONTACT_REHIT_SECS,
        }
    }
}

/// Warriors resolved against the catalog
#[derive(Debug, Clone)]
pub struct ResolvedWarriors {
    pub local: &'static WarriorClass,
    pub roster: Vec<&'static WarriorClass>,
}

impl MatchSettings {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check every value the simulation relies on and resolve warrior ids
    pub fn validate(&self, catalog: &Catalog) -> Result<ResolvedWarriors, ConfigError> {
        if self.pillar_count <= 1 {
            return Err(ConfigError::TooFewPillars(self.pillar_count));
        }
        if self.duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        if self.contact_damage <= 0 {
            return Err(ConfigError::InvalidContactDamage(self.contact_damage));
        }
        if self.contact_rehit_secs.is_nan() || self.contact_rehit_secs < 0.0 {
            return Err(ConfigError::InvalidRehitWindow(self.contact_rehit_secs));
        }

        let lookup = |id: &str| {
            catalog
                .warrior(id)
                .ok_or_else(|| ConfigError::UnknownWarrior(id.to_string()))
        };

        let local = lookup(&self.local_warrior)?;
        let roster = if self.roster.is_empty() {
            catalog.warriors().iter().collect()
        } else {
            self.roster
                .iter()
                .map(|id| lookup(id))
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(ResolvedWarriors { local, roster })
    }
}
