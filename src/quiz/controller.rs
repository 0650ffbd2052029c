//! Quiz interruption controller
//!
//! ```text
//! Closed --open()--> AwaitingAnswer --choose()--> ShowingFeedback --resolve()--> Closed
//! ```
//!
//! The controller never touches entities. It only reads and writes the
//! session counters it is handed: lives, quiz threshold and answered count.
//! Pausing the loop and timing the feedback is the driver's job.

use std::collections::BTreeSet;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::bank::Question;
use super::picker::pick_question;
use crate::sim::SessionStats;
use crate::tuning::Tuning;

/// Outcome of an answered question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Correct => "Correct! Keep playing!",
            Verdict::Incorrect => "Wrong! You lost 1 life!",
        }
    }

    /// How long the feedback stays on screen before the quiz closes
    pub fn feedback_delay_ms(&self, tuning: &Tuning) -> f64 {
        match self {
            Verdict::Correct => tuning.correct_feedback_ms,
            Verdict::Incorrect => tuning.incorrect_feedback_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizPhase {
    Closed,
    AwaitingAnswer { index: usize },
    ShowingFeedback { index: usize, verdict: Verdict },
}

/// What the game should do once the feedback delay has passed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Resume,
    GameOver,
}

#[derive(Debug, Clone)]
pub struct QuizController {
    questions: Vec<Question>,
    asked: BTreeSet<usize>,
    phase: QuizPhase,
    rng: Pcg32,
}

impl QuizController {
    pub fn new(questions: Vec<Question>, seed: u64) -> Self {
        Self {
            questions,
            asked: BTreeSet::new(),
            phase: QuizPhase::Closed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != QuizPhase::Closed
    }

    /// Indices answered correctly in the current cycle
    pub fn asked(&self) -> &BTreeSet<usize> {
        &self.asked
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// The question currently on screen, if any
    pub fn current(&self) -> Option<(usize, &Question)> {
        match self.phase {
            QuizPhase::Closed => None,
            QuizPhase::AwaitingAnswer { index } | QuizPhase::ShowingFeedback { index, .. } => {
                self.questions.get(index).map(|q| (index, q))
            }
        }
    }

    pub fn verdict(&self) -> Option<Verdict> {
        match self.phase {
            QuizPhase::ShowingFeedback { verdict, .. } => Some(verdict),
            _ => None,
        }
    }

    /// Draw an unasked question and show it.
    ///
    /// Returns `None` if a quiz is already open or the bank is empty.
    pub fn open(&mut self) -> Option<usize> {
        if self.is_open() {
            return None;
        }
        let pick = pick_question(self.questions.len(), &self.asked, &mut self.rng)?;
        if pick.asked.len() < self.asked.len() {
            log::debug!("Question pool exhausted, starting a new cycle");
        }
        self.asked = pick.asked;
        self.phase = QuizPhase::AwaitingAnswer { index: pick.index };
        log::info!("Quiz opened with question #{}", pick.index);
        Some(pick.index)
    }

    /// Answer the open question.
    ///
    /// A correct answer marks the question asked and counts it; a wrong one
    /// costs a life immediately. Out-of-range options and calls outside
    /// `AwaitingAnswer` are ignored.
    pub fn choose(&mut self, option: usize, session: &mut SessionStats) -> Option<Verdict> {
        let QuizPhase::AwaitingAnswer { index } = self.phase else {
            return None;
        };
        let question = self.questions.get(index)?;
        if option >= question.options.len() {
            return None;
        }

        let verdict = if question.is_correct(option) {
            self.asked.insert(index);
            session.questions_answered += 1;
            Verdict::Correct
        } else {
            session.lives = session.lives.saturating_sub(1);
            Verdict::Incorrect
        };

        log::info!(
            "Quiz answer {} for #{}: {:?} (lives {})",
            Question::option_label(option),
            index,
            verdict,
            session.lives
        );
        self.phase = QuizPhase::ShowingFeedback { index, verdict };
        Some(verdict)
    }

    /// Close the quiz after its feedback delay. The next threshold moves up
    /// whatever the verdict was.
    pub fn resolve(&mut self, session: &mut SessionStats, tuning: &Tuning) -> Option<Resolution> {
        let QuizPhase::ShowingFeedback { verdict, .. } = self.phase else {
            return None;
        };
        self.phase = QuizPhase::Closed;
        session.next_quiz_score += tuning.quiz_score_step;

        let resolution = match verdict {
            Verdict::Incorrect if session.lives == 0 => Resolution::GameOver,
            _ => Resolution::Resume,
        };
        Some(resolution)
    }

    /// Forget the asked-set and close any open quiz (session restart)
    pub fn reset(&mut self) {
        self.asked.clear();
        self.phase = QuizPhase::Closed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::bank::arcade_questions;

    fn setup() -> (QuizController, SessionStats, Tuning) {
        let tuning = Tuning::default();
        let session = SessionStats::new(&tuning);
        (QuizController::new(arcade_questions(), 2024), session, tuning)
    }

    fn correct_option(quiz: &QuizController) -> usize {
        quiz.current().map(|(_, q)| q.correct).unwrap()
    }

    #[test]
    fn test_correct_answer_flow() {
        let (mut quiz, mut session, tuning) = setup();
        let index = quiz.open().unwrap();
        assert_eq!(quiz.phase(), QuizPhase::AwaitingAnswer { index });
        assert_eq!(quiz.open(), None, "already open");

        let option = correct_option(&quiz);
        assert_eq!(quiz.choose(option, &mut session), Some(Verdict::Correct));
        assert_eq!(session.questions_answered, 1);
        assert_eq!(session.lives, 3);
        assert!(quiz.asked().contains(&index));
        assert_eq!(quiz.verdict(), Some(Verdict::Correct));

        // A second tap while feedback is showing does nothing
        assert_eq!(quiz.choose(option, &mut session), None);

        assert_eq!(quiz.resolve(&mut session, &tuning), Some(Resolution::Resume));
        assert_eq!(session.next_quiz_score, 100);
        assert_eq!(quiz.phase(), QuizPhase::Closed);
    }

    #[test]
    fn test_incorrect_answer_costs_life() {
        let (mut quiz, mut session, tuning) = setup();
        let index = quiz.open().unwrap();
        let wrong = (correct_option(&quiz) + 1) % 4;

        assert_eq!(quiz.choose(wrong, &mut session), Some(Verdict::Incorrect));
        assert_eq!(session.lives, 2);
        assert_eq!(session.questions_answered, 0);
        assert!(!quiz.asked().contains(&index));
        // Threshold only moves on resolve
        assert_eq!(session.next_quiz_score, 50);

        assert_eq!(quiz.resolve(&mut session, &tuning), Some(Resolution::Resume));
        assert_eq!(session.next_quiz_score, 100);
    }

    #[test]
    fn test_incorrect_on_last_life_ends_game() {
        let (mut quiz, mut session, tuning) = setup();
        session.lives = 1;
        quiz.open();
        let wrong = (correct_option(&quiz) + 1) % 4;
        quiz.choose(wrong, &mut session);
        assert_eq!(session.lives, 0);
        assert_eq!(
            quiz.resolve(&mut session, &tuning),
            Some(Resolution::GameOver)
        );
        assert_eq!(session.next_quiz_score, 100);
    }

    #[test]
    fn test_out_of_range_option_ignored() {
        let (mut quiz, mut session, _) = setup();
        quiz.open();
        assert_eq!(quiz.choose(4, &mut session), None);
        assert!(matches!(quiz.phase(), QuizPhase::AwaitingAnswer { .. }));
    }

    #[test]
    fn test_calls_out_of_order_ignored() {
        let (mut quiz, mut session, tuning) = setup();
        assert_eq!(quiz.choose(0, &mut session), None);
        assert_eq!(quiz.resolve(&mut session, &tuning), None);
        assert_eq!(session, SessionStats::new(&tuning));
    }

    #[test]
    fn test_no_repeats_within_cycle() {
        let (mut quiz, mut session, tuning) = setup();
        let n = quiz.questions().len();
        let mut seen = BTreeSet::new();

        for _ in 0..n {
            let index = quiz.open().unwrap();
            assert!(seen.insert(index), "question #{index} repeated");
            let option = correct_option(&quiz);
            quiz.choose(option, &mut session);
            quiz.resolve(&mut session, &tuning);
        }
        assert_eq!(seen.len(), n);
        assert_eq!(quiz.asked().len(), n);

        // Cycle restarts
        let index = quiz.open().unwrap();
        assert!(index < n);
        assert!(quiz.asked().is_empty());
    }

    #[test]
    fn test_reset() {
        let (mut quiz, mut session, _) = setup();
        quiz.open();
        let option = correct_option(&quiz);
        quiz.choose(option, &mut session);
        quiz.reset();
        assert!(!quiz.is_open());
        assert!(quiz.asked().is_empty());
    }
}
