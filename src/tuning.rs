//! Data-driven game balance
//!
//! Every gameplay constant lives here so a settings file can override it.
//! Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Rect;

/// A tuning value the simulation cannot run with
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid tuning: {field} = {value}")]
pub struct TuningError {
    pub field: &'static str,
    pub value: f64,
}

/// Gameplay tuning values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Timing ===
    /// Milliseconds that count as one frame-equivalent
    pub frame_ms: f32,
    /// Upper bound on the per-tick multiplier
    pub max_frame_multiplier: f32,

    // === Player ===
    pub player_start: Rect,
    pub player_speed: f32,

    // === Bullets ===
    pub bullet_width: f32,
    pub bullet_height: f32,
    pub bullet_speed: f32,

    // === Asteroids ===
    pub asteroid_min_size: f32,
    pub asteroid_size_range: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_speed_range: f32,

    // === Spawn ramp ===
    pub spawn_delay_initial: f32,
    pub spawn_delay_floor: f32,
    pub spawn_delay_step: f32,

    // === Session ===
    pub score_per_asteroid: u32,
    pub starting_lives: u8,

    // === Quiz ===
    pub quiz_score_start: u32,
    pub quiz_score_step: u32,
    pub correct_feedback_ms: f64,
    pub incorrect_feedback_ms: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            frame_ms: FRAME_MS,
            max_frame_multiplier: MAX_FRAME_MULTIPLIER,

            player_start: Rect::new(PLAYER_X, PLAYER_Y, PLAYER_WIDTH, PLAYER_HEIGHT),
            player_speed: PLAYER_SPEED,

            bullet_width: BULLET_WIDTH,
            bullet_height: BULLET_HEIGHT,
            bullet_speed: BULLET_SPEED,

            asteroid_min_size: ASTEROID_MIN_SIZE,
            asteroid_size_range: ASTEROID_SIZE_RANGE,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_speed_range: ASTEROID_SPEED_RANGE,

            spawn_delay_initial: SPAWN_DELAY_INITIAL,
            spawn_delay_floor: SPAWN_DELAY_FLOOR,
            spawn_delay_step: SPAWN_DELAY_STEP,

            score_per_asteroid: SCORE_PER_ASTEROID,
            starting_lives: STARTING_LIVES,

            quiz_score_start: QUIZ_SCORE_START,
            quiz_score_step: QUIZ_SCORE_STEP,
            correct_feedback_ms: CORRECT_FEEDBACK_MS,
            incorrect_feedback_ms: INCORRECT_FEEDBACK_MS,
        }
    }
}

impl Tuning {
    /// Convert an elapsed real-time delta into a frame multiplier.
    ///
    /// Negative deltas (clock skew) count as zero.
    pub fn frame_multiplier(&self, delta_ms: f32) -> f32 {
        (delta_ms / self.frame_ms)
            .max(0.0)
            .min(self.max_frame_multiplier)
    }

    /// Reject values that would stall, reverse or break the simulation
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("frame_ms", self.frame_ms),
            ("max_frame_multiplier", self.max_frame_multiplier),
            ("player_start.width", self.player_start.width),
            ("player_start.height", self.player_start.height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("asteroid_min_size", self.asteroid_min_size),
        ];
        let non_negative = [
            ("player_speed", self.player_speed),
            ("bullet_speed", self.bullet_speed),
            ("asteroid_size_range", self.asteroid_size_range),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("asteroid_speed_range", self.asteroid_speed_range),
            ("spawn_delay_initial", self.spawn_delay_initial),
            ("spawn_delay_floor", self.spawn_delay_floor),
            ("spawn_delay_step", self.spawn_delay_step),
        ];

        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(TuningError {
                    field,
                    value: f64::from(value),
                });
            }
        }
        // spawn_delay_initial may be f32::MAX to disable spawning
        for (field, value) in non_negative {
            if value.is_nan() || value < 0.0 {
                return Err(TuningError {
                    field,
                    value: f64::from(value),
                });
            }
        }
        for (field, value) in [
            ("correct_feedback_ms", self.correct_feedback_ms),
            ("incorrect_feedback_ms", self.incorrect_feedback_ms),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(TuningError { field, value });
            }
        }

        let player = &self.player_start;
        if player.width > self.field_width {
            return Err(TuningError {
                field: "player_start.width",
                value: f64::from(player.width),
            });
        }
        if player.height > self.field_height {
            return Err(TuningError {
                field: "player_start.height",
                value: f64::from(player.height),
            });
        }
        Ok(())
    }

    /// Rightmost x the player may occupy
    pub fn player_max_x(&self) -> f32 {
        self.field_width - self.player_start.width
    }
}
