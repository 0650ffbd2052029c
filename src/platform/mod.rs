//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Time (monotonic clock, injectable for tests)
//! - One-shot deferred timers
//! - Storage (local key-value persistence)

pub mod storage;
pub mod time;
pub mod timer;

pub use storage::{JsonFileStore, KeyValueStore, MemoryStore, StorageError};
pub use time::{Clock, ManualClock, SystemClock};
pub use timer::{TimerId, TimerQueue};
