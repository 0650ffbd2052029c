//! Quiz module
//!
//! - `bank`: built-in arcade and practice questions
//! - `picker`: non-repeating random selection
//! - `controller`: arcade interruption state machine
//! - `practice`: standalone practice quiz

pub mod bank;
pub mod controller;
pub mod picker;
pub mod practice;

pub use bank::{PracticeItem, Question, arcade_questions, practice_items};
pub use controller::{QuizController, QuizPhase, Resolution, Verdict};
pub use picker::{Pick, pick_question};
pub use practice::{
    NextOutcome, PerformanceBand, PracticeQuiz, PracticeResults, PracticeView, ReviewEntry,
};
