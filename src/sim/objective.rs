//! Target pillar rotation
//!
//! Uniform draw over all pillar ids, re-rolled while it equals the excluded id.
//! Needs at least two pillars or the re-roll could never finish, so that is
//! checked when the rotation is built.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::PillarId;
use crate::error::ConfigError;

#[derive(Debug, Clone)]
pub struct ObjectiveRotation {
    rng: Pcg32,
    pillar_count: u32,
}

impl ObjectiveRotation {
    pub fn new(seed: u64, pillar_count: usize) -> Result<Self, ConfigError> {
        if pillar_count <= 1 {
            return Err(ConfigError::TooFewPillars(pillar_count));
        }
        let pillar_count =
            u32::try_from(pillar_count).map_err(|_| ConfigError::TooFewPillars(pillar_count))?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            pillar_count,
        })
    }

    /// Pick a pillar id, never `exclude`
    pub fn pick_target(&mut self, exclude: Option<PillarId>) -> PillarId {
        loop {
            let id = self.rng.random_range(0..self.pillar_count);
            if Some(id) != exclude {
                return id;
            }
        }
    }
}
