//! Physics Lab - virtual physics lab core
//!
//! Core modules:
//! - `sim`: Arcade quiz-shooter simulation (entities, collisions, spawn ramp)
//! - `quiz`: Question banks, interruption controller, practice quiz
//! - `game_loop`: Frame-driven driver (pause/resume/restart, feedback timers)
//! - `platform`: Clock, deferred timers and key-value storage
//! - `account`: Session store and auth API client
//! - `bridge`: Messages and progress counters from the embedded lab page
//! - `calculator` / `catalog`: Module calculator and dashboard cards
//! - `viewport`: Logical field to device pixel mapping
//! - `tuning` / `settings`: Data-driven game balance and user preferences

pub mod account;
pub mod bridge;
pub mod calculator;
pub mod catalog;
pub mod game_loop;
pub mod platform;
pub mod quiz;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod viewport;

pub use game_loop::{GameLoop, GameSummary, RenderSnapshot};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Logical field dimensions (all physics runs in this space)
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;

    /// One frame at 60 Hz, in milliseconds. Deltas are normalized against it.
    pub const FRAME_MS: f32 = 16.67;
    /// Cap on the per-tick multiplier after a stall
    pub const MAX_FRAME_MULTIPLIER: f32 = 2.2;

    /// Player ship (logical units)
    pub const PLAYER_X: f32 = 375.0;
    pub const PLAYER_Y: f32 = 520.0;
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Horizontal speed per frame-equivalent
    pub const PLAYER_SPEED: f32 = 6.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 16.0;
    pub const BULLET_SPEED: f32 = 8.0;

    /// Asteroids: size in [min, min + range), speed in [min, min + range)
    pub const ASTEROID_MIN_SIZE: f32 = 30.0;
    pub const ASTEROID_SIZE_RANGE: f32 = 30.0;
    pub const ASTEROID_MIN_SPEED: f32 = 2.0;
    pub const ASTEROID_SPEED_RANGE: f32 = 3.0;

    /// Spawn ramp (frame-equivalents between spawns)
    pub const SPAWN_DELAY_INITIAL: f32 = 60.0;
    pub const SPAWN_DELAY_FLOOR: f32 = 30.0;
    pub const SPAWN_DELAY_STEP: f32 = 0.5;

    pub const SCORE_PER_ASTEROID: u32 = 10;
    pub const STARTING_LIVES: u8 = 3;

    /// Quiz interruptions
    pub const QUIZ_SCORE_START: u32 = 50;
    pub const QUIZ_SCORE_STEP: u32 = 50;
    pub const CORRECT_FEEDBACK_MS: f64 = 800.0;
    pub const INCORRECT_FEEDBACK_MS: f64 = 900.0;
}
