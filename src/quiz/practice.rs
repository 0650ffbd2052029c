//! Standalone practice quiz
//!
//! Linear walk through a fixed set of items. The player must answer the
//! current question before moving on; submitting on the last question shows
//! the results, from which a per-item review can be opened.

use serde::Serialize;

use super::bank::PracticeItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PracticeView {
    Answering,
    Results,
    Review,
}

/// Result of pressing "next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextOutcome {
    Advanced,
    Submitted,
    /// Current question has no answer yet
    Blocked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PerformanceBand {
    Excellent,
    Fair,
    NeedsStudy,
}

impl PerformanceBand {
    pub fn for_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => PerformanceBand::Excellent,
            50..=79 => PerformanceBand::Fair,
            _ => PerformanceBand::NeedsStudy,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            PerformanceBand::Excellent => "Your understanding of Newton's second law is excellent!",
            PerformanceBand::Fair => "Your understanding is fair, but there is room to improve.",
            PerformanceBand::NeedsStudy => "You should study Newton's second law some more.",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PracticeResults {
    pub correct: usize,
    pub total: usize,
    /// Rounded to the nearest whole percent
    pub percentage: u32,
    pub band: PerformanceBand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReviewEntry {
    pub prompt: String,
    pub chosen: Option<String>,
    pub correct_answer: String,
    pub is_correct: bool,
    pub explanation: String,
}

#[derive(Debug, Clone)]
pub struct PracticeQuiz {
    items: Vec<PracticeItem>,
    answers: Vec<Option<usize>>,
    current: usize,
    view: PracticeView,
}

impl PracticeQuiz {
    pub fn new(items: Vec<PracticeItem>) -> Self {
        let answers = vec![None; items.len()];
        Self {
            items,
            answers,
            current: 0,
            view: PracticeView::Answering,
        }
    }

    pub fn view(&self) -> PracticeView {
        self.view
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn current_item(&self) -> Option<&PracticeItem> {
        self.items.get(self.current)
    }

    pub fn answer(&self, index: usize) -> Option<usize> {
        self.answers.get(index).copied().flatten()
    }

    /// Progress through the quiz as a fraction in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.items.is_empty() {
            return 0.0;
        }
        (self.current + 1) as f32 / self.items.len() as f32
    }

    /// Record an answer for the current question; may be changed freely
    pub fn select(&mut self, option: usize) -> bool {
        if self.view != PracticeView::Answering {
            return false;
        }
        let Some(item) = self.items.get(self.current) else {
            return false;
        };
        if option >= item.question.options.len() {
            return false;
        }
        self.answers[self.current] = Some(option);
        true
    }

    pub fn can_go_prev(&self) -> bool {
        self.view == PracticeView::Answering && self.current > 0
    }

    pub fn can_go_next(&self) -> bool {
        self.view == PracticeView::Answering && self.answer(self.current).is_some()
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_go_prev() {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn next(&mut self) -> NextOutcome {
        if !self.can_go_next() {
            return NextOutcome::Blocked;
        }
        if self.current + 1 < self.items.len() {
            self.current += 1;
            NextOutcome::Advanced
        } else {
            self.view = PracticeView::Results;
            log::info!("Practice quiz submitted");
            NextOutcome::Submitted
        }
    }

    pub fn results(&self) -> PracticeResults {
        let total = self.items.len();
        let correct = self
            .items
            .iter()
            .zip(&self.answers)
            .filter(|(item, answer)| answer.is_some_and(|a| item.question.is_correct(a)))
            .count();
        let percentage = if total == 0 {
            0
        } else {
            ((correct as f64 / total as f64) * 100.0).round() as u32
        };
        PracticeResults {
            correct,
            total,
            percentage,
            band: PerformanceBand::for_percentage(percentage),
        }
    }

    pub fn review(&self) -> Vec<ReviewEntry> {
        self.items
            .iter()
            .zip(&self.answers)
            .map(|(item, answer)| {
                let q = &item.question;
                ReviewEntry {
                    prompt: q.prompt.clone(),
                    chosen: answer.and_then(|a| q.options.get(a).cloned()),
                    correct_answer: q.options[q.correct].clone(),
                    is_correct: answer.is_some_and(|a| q.is_correct(a)),
                    explanation: item.explanation.clone(),
                }
            })
            .collect()
    }

    pub fn open_review(&mut self) -> bool {
        if self.view != PracticeView::Results {
            return false;
        }
        self.view = PracticeView::Review;
        true
    }

    pub fn close_review(&mut self) -> bool {
        if self.view != PracticeView::Review {
            return false;
        }
        self.view = PracticeView::Results;
        true
    }

    /// Clear every answer and start over from the first question
    pub fn restart(&mut self) {
        self.answers.iter_mut().for_each(|a| *a = None);
        self.current = 0;
        self.view = PracticeView::Answering;
    }
}
