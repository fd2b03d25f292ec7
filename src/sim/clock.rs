//! Simulation clock and match driver
//!
//! Two periodic tasks run off the frame time fed into [`MatchRunner::advance`]:
//! the fixed-step movement tick and the one-second countdown. Both are
//! cancelled together when the match ends or the runner is dropped.

use glam::Vec2;

use super::catalog::Catalog;
use super::snapshot::MatchSnapshot;
use super::state::{MatchOutcome, MatchState};
use super::tick::{AbilityRequest, TickInput, countdown_tick, tick};
use crate::consts::*;
use crate::error::ConfigError;
use crate::settings::MatchSettings;

/// Fixed-period task fed by a time accumulator
#[derive(Debug, Clone)]
pub struct PeriodicTask {
    period: f64,
    accumulator: f64,
    cancelled: bool,
}

impl PeriodicTask {
    pub fn new(period: f32) -> Self {
        Self {
            period: f64::from(period),
            accumulator: 0.0,
            cancelled: false,
        }
    }

    pub fn accumulate(&mut self, dt: f32) {
        if !self.cancelled {
            self.accumulator += f64::from(dt);
        }
    }

    /// Consume one period if one is due
    pub fn take_due(&mut self) -> bool {
        if self.cancelled || self.accumulator < self.period {
            return false;
        }
        self.accumulator -= self.period;
        true
    }

    /// Stop the task for good. Safe to call more than once.
    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.accumulator = 0.0;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }
}

/// The movement ticker and the match countdown
#[derive(Debug, Clone)]
pub struct SimClock {
    pub movement: PeriodicTask,
    pub countdown: PeriodicTask,
}

impl SimClock {
    pub fn new() -> Self {
        Self {
            movement: PeriodicTask::new(SIM_DT),
            countdown: PeriodicTask::new(COUNTDOWN_PERIOD),
        }
    }

    /// Cancel both tasks
    pub fn teardown(&mut self) {
        self.movement.cancel();
        self.countdown.cancel();
    }

    pub fn is_stopped(&self) -> bool {
        self.movement.is_cancelled() && self.countdown.is_cancelled()
    }
}

impl Default for SimClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Owns one match: its state, its clock and the queued input intents
pub struct MatchRunner {
    state: MatchState,
    clock: SimClock,
    input: TickInput,
}

impl MatchRunner {
    pub fn new(settings: MatchSettings, catalog: &Catalog) -> Result<Self, ConfigError> {
        Ok(Self {
            state: MatchState::new(settings, catalog)?,
            clock: SimClock::new(),
            input: TickInput::default(),
        })
    }

    /// Joystick intent, held until replaced
    pub fn set_movement(&mut self, movement: Vec2) {
        self.input.movement = movement;
    }

    /// Queue an ability use for the next movement tick
    pub fn request_ability(&mut self, slot: usize, target: Vec2) {
        self.input.abilities.push(AbilityRequest { slot, target });
    }

    /// Feed one frame of wall time. Returns the outcome once the match is over.
    /// Events from every tick of the frame stay readable until the next call.
    pub fn advance(&mut self, frame_dt: f32) -> Option<MatchOutcome> {
        if self.clock.is_stopped() {
            return self.state.outcome;
        }

        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        // Events cover one frame, however many ticks it runs
        self.state.events.clear();
        self.clock.movement.accumulate(dt);
        self.clock.countdown.accumulate(dt);

        let mut substeps = 0;
        while substeps < MAX_SUBSTEPS && self.clock.movement.take_due() {
            tick(&mut self.state, &self.input, SIM_DT);
            // Ability requests are one-shot
            self.input.abilities.clear();
            substeps += 1;
            if self.state.is_over() {
                break;
            }
        }

        while !self.state.is_over() && self.clock.countdown.take_due() {
            countdown_tick(&mut self.state);
        }

        if self.state.is_over() {
            self.teardown();
        }
        self.state.outcome
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot::capture(&self.state)
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.state.outcome
    }

    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Stop both timers. Called on every exit path; repeat calls do nothing.
    pub fn teardown(&mut self) {
        if self.clock.is_stopped() {
            return;
        }
        self.clock.teardown();
        self.input = TickInput::default();
        log::debug!("Match clock stopped at tick {}", self.state.time_ticks);
    }
}

impl Drop for MatchRunner {
    fn drop(&mut self) {
        self.teardown();
    }
}
