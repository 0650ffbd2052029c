//! Arcade simulation module
//!
//! All gameplay logic for the quiz shooter lives here:
//! - Logical 800x600 field, independent of screen size
//! - Seeded RNG only
//! - No rendering, timers or platform dependencies

pub mod geometry;
pub mod spawn;
pub mod state;
pub mod tick;

pub use geometry::{Rect, clamp, intersects};
pub use spawn::SpawnScheduler;
pub use state::{Asteroid, Bullet, GameEvent, GamePhase, GameState, Player, SessionStats};
pub use tick::{TickInput, tick};
