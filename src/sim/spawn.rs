//! Asteroid spawn scheduler
//!
//! A frame-equivalent timer that fires when it exceeds the current delay.
//! Each firing shortens the delay by a fixed step down to a floor, so the
//! spawn rate only ever ramps up within a session.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnScheduler {
    /// Accumulated frame-equivalents since the last spawn
    pub timer: f32,
    /// Current delay between spawns
    pub delay: f32,
    initial: f32,
    floor: f32,
    step: f32,
}

impl SpawnScheduler {
    pub fn new(initial: f32, floor: f32, step: f32) -> Self {
        Self {
            timer: 0.0,
            delay: initial,
            initial,
            floor,
            step,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(
            tuning.spawn_delay_initial,
            tuning.spawn_delay_floor,
            tuning.spawn_delay_step,
        )
    }

    /// Advance by `dt` frame-equivalents. Returns true when a spawn is due.
    pub fn advance(&mut self, dt: f32) -> bool {
        self.timer += dt;
        if self.timer <= self.delay {
            return false;
        }

        self.timer = 0.0;
        if self.delay > self.floor {
            self.delay = (self.delay - self.step).max(self.floor);
        }
        true
    }

    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Back to the initial delay with an empty timer
    pub fn reset(&mut self) {
        self.timer = 0.0;
        self.delay = self.initial;
    }
}
