//! Game state and core simulation types
//!
//! The driver owns exactly one [`GameState`] and passes it into
//! [`super::tick`] each frame. Nothing else holds a reference between ticks.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::{Rect, clamp};
use super::spawn::SpawnScheduler;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Created but not yet mounted
    Idle,
    /// Active gameplay, frames are scheduled
    Running,
    /// Quiz interruption in progress
    Paused,
    /// Lives exhausted; only a restart leaves this phase
    GameOver,
}

/// The player's ship. Moves horizontally only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub rect: Rect,
}

/// A bullet travelling straight up
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub rect: Rect,
    pub speed: f32,
}

/// An asteroid falling straight down
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub rect: Rect,
    pub speed: f32,
}

/// Counters shown on the HUD. The quiz controller may touch `lives`,
/// `next_quiz_score` and `questions_answered`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: u32,
    pub lives: u8,
    /// Score at which the next quiz interruption fires
    pub next_quiz_score: u32,
    /// Quiz questions answered correctly this session
    pub questions_answered: u32,
}

impl SessionStats {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.starting_lives,
            next_quiz_score: tuning.quiz_score_start,
            questions_answered: 0,
        }
    }
}

/// Something noteworthy that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    AsteroidSpawned { size: f32 },
    AsteroidDestroyed { score: u32 },
    PlayerHit { lives_left: u8 },
    /// Score reached the quiz threshold
    QuizTriggered { score: u32 },
    GameOver { final_score: u32 },
}

/// Complete simulation state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub session: SessionStats,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub spawner: SpawnScheduler,
    /// Simulation tick counter
    pub time_ticks: u64,
    rng: Pcg32,
}

impl GameState {
    /// Create a new game state with default tuning
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            seed,
            phase: GamePhase::Idle,
            session: SessionStats::new(&tuning),
            player: Player {
                rect: tuning.player_start,
            },
            bullets: Vec::new(),
            asteroids: Vec::new(),
            spawner: SpawnScheduler::from_tuning(&tuning),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            tuning,
        }
    }

    /// Restore every counter and collection to its initial value.
    ///
    /// The RNG keeps its stream so a restarted run does not replay the
    /// previous one.
    pub fn reset(&mut self) {
        self.session = SessionStats::new(&self.tuning);
        self.player.rect = self.tuning.player_start;
        self.bullets.clear();
        self.asteroids.clear();
        self.spawner.reset();
        self.time_ticks = 0;
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Move the player horizontally, keeping it inside the field
    pub fn move_player(&mut self, dx: f32) {
        let rect = &mut self.player.rect;
        rect.x = clamp(rect.x + dx, 0.0, self.tuning.player_max_x());
    }

    /// Fire a bullet from the player's nose. Ignored unless running.
    pub fn shoot(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let p = self.player.rect;
        let width = self.tuning.bullet_width;
        self.bullets.push(Bullet {
            rect: Rect::new(
                p.x + p.width / 2.0 - width / 2.0,
                p.y,
                width,
                self.tuning.bullet_height,
            ),
            speed: self.tuning.bullet_speed,
        });
        true
    }

    /// Spawn an asteroid at a random column just above the field
    pub fn spawn_asteroid(&mut self) -> Asteroid {
        let t = &self.tuning;
        let size = t.asteroid_min_size + self.rng.random::<f32>() * t.asteroid_size_range;
        let x = self.rng.random::<f32>() * (t.field_width - size).max(0.0);
        let speed = t.asteroid_min_speed + self.rng.random::<f32>() * t.asteroid_speed_range;

        let asteroid = Asteroid {
            rect: Rect::new(x, -size, size, size),
            speed,
        };
        self.asteroids.push(asteroid);
        asteroid
    }

    /// Lose one life; returns true when none remain
    pub fn lose_life(&mut self) -> bool {
        self.session.lives = self.session.lives.saturating_sub(1);
        self.session.lives == 0
    }
}
