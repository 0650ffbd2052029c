//! Dashboard content catalog
//!
//! Static cards for the home screen tabs, plus the rules that turn a card
//! into button text, a meta line and a tap action.

use serde::Serialize;

/// Labs that have a working simulation behind them
pub const AVAILABLE_LABS: &[&str] = &["newton-laws"];

/// Quiz cards without an explicit count show this many questions
const DEFAULT_QUESTION_COUNT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tab {
    Modules,
    Simulations,
    Quizzes,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Modules, Tab::Simulations, Tab::Quizzes];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Modules => "Modules",
            Tab::Simulations => "Simulations",
            Tab::Quizzes => "Quizzes",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub available: bool,
    pub difficulty: Option<&'static str>,
    pub completed: Option<bool>,
    pub questions: Option<u32>,
}

impl ContentItem {
    const fn new(
        id: &'static str,
        title: &'static str,
        description: &'static str,
        icon: &'static str,
        available: bool,
    ) -> Self {
        Self {
            id,
            title,
            description,
            icon,
            available,
            difficulty: None,
            completed: None,
            questions: None,
        }
    }

    const fn difficulty(mut self, difficulty: &'static str) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    const fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    const fn questions(mut self, questions: u32) -> Self {
        self.questions = Some(questions);
        self
    }
}

/// Where a card tap leads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardAction {
    ComingSoon,
    OpenLab(&'static str),
    OpenPracticeQuiz,
    OpenNewtonModule,
}

pub fn items(tab: Tab) -> Vec<ContentItem> {
    match tab {
        Tab::Simulations => vec![
            ContentItem::new(
                "newton-laws",
                "Newton's Second Law",
                "Explore Newton's second law with an interactive simulation. Experiment with mass, force and acceleration.",
                "🚀",
                true,
            )
            .difficulty("Beginner")
            .completed(true),
            ContentItem::new(
                "projectile-motion",
                "Projectile Motion",
                "Launch projectiles at different angles and speeds. Analyse trajectory and range.",
                "🎯",
                false,
            )
            .difficulty("Intermediate")
            .completed(false),
            ContentItem::new(
                "waves-oscillation",
                "Waves & Oscillation",
                "Explore mechanical waves, frequency, amplitude and interference.",
                "🌊",
                false,
            )
            .difficulty("Intermediate")
            .completed(false),
        ],
        Tab::Quizzes => vec![
            ContentItem::new(
                "newton-laws-quiz",
                "Newton's Second Law Quiz",
                "Test your understanding of Newton's second law with 10 multiple-choice questions.",
                "🚀",
                true,
            )
            .questions(10),
            ContentItem::new(
                "projectile-motion-quiz",
                "Projectile Motion Quiz",
                "Check what you know about projectile motion with 10 interactive questions.",
                "🎯",
                false,
            )
            .questions(10),
            ContentItem::new(
                "waves-oscillation-quiz",
                "Waves & Oscillation Quiz",
                "Assess your grasp of waves and oscillation with 10 questions.",
                "🌊",
                false,
            )
            .questions(10),
        ],
        Tab::Modules => vec![
            ContentItem::new(
                "newton-laws-module",
                "Newton's Second Law Module",
                "Core concepts of Newton's second law, the formula and everyday applications.",
                "📖",
                true,
            )
            .difficulty("Beginner"),
            ContentItem::new(
                "projectile-motion-module",
                "Projectile Motion Module",
                "Projectile motion, vector components and the kinematic equations.",
                "🎯",
                false,
            )
            .difficulty("Intermediate"),
            ContentItem::new(
                "waves-oscillation-module",
                "Waves & Oscillation Module",
                "Mechanical waves, harmonic oscillation and related phenomena.",
                "🌊",
                false,
            )
            .difficulty("Intermediate"),
        ],
    }
}

pub fn button_text(item: &ContentItem, tab: Tab) -> &'static str {
    if !item.available {
        return "Coming soon";
    }
    match tab {
        Tab::Simulations if item.completed == Some(true) => "Repeat lab",
        Tab::Simulations => "Start lab",
        _ => "Start",
    }
}

pub fn meta_text(item: &ContentItem, tab: Tab) -> String {
    match tab {
        Tab::Quizzes => format!(
            "{} questions",
            item.questions.unwrap_or(DEFAULT_QUESTION_COUNT)
        ),
        _ => item.difficulty.unwrap_or("-").to_string(),
    }
}

pub fn card_action(item: &ContentItem, tab: Tab) -> CardAction {
    if !item.available {
        return CardAction::ComingSoon;
    }
    match tab {
        Tab::Simulations if AVAILABLE_LABS.contains(&item.id) => CardAction::OpenLab(item.id),
        Tab::Quizzes => CardAction::OpenPracticeQuiz,
        Tab::Modules if item.id == "newton-laws-module" => CardAction::OpenNewtonModule,
        _ => CardAction::ComingSoon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find(tab: Tab, id: &str) -> ContentItem {
        items(tab).into_iter().find(|i| i.id == id).unwrap()
    }

    #[test]
    fn test_every_tab_has_cards() {
        for tab in Tab::ALL {
            let cards = items(tab);
            assert_eq!(cards.len(), 3, "{}", tab.title());
            assert_eq!(cards.iter().filter(|c| c.available).count(), 1);
        }
    }

    #[test]
    fn test_button_text() {
        let lab = find(Tab::Simulations, "newton-laws");
        assert_eq!(button_text(&lab, Tab::Simulations), "Repeat lab");

        let mut fresh = lab.clone();
        fresh.completed = Some(false);
        assert_eq!(button_text(&fresh, Tab::Simulations), "Start lab");

        let quiz = find(Tab::Quizzes, "newton-laws-quiz");
        assert_eq!(button_text(&quiz, Tab::Quizzes), "Start");

        let soon = find(Tab::Modules, "projectile-motion-module");
        assert_eq!(button_text(&soon, Tab::Modules), "Coming soon");
    }

    #[test]
    fn test_meta_text() {
        let mut quiz = find(Tab::Quizzes, "newton-laws-quiz");
        assert_eq!(meta_text(&quiz, Tab::Quizzes), "10 questions");
        quiz.questions = None;
        assert_eq!(meta_text(&quiz, Tab::Quizzes), "10 questions");

        let mut module = find(Tab::Modules, "newton-laws-module");
        assert_eq!(meta_text(&module, Tab::Modules), "Beginner");
        module.difficulty = None;
        assert_eq!(meta_text(&module, Tab::Modules), "-");
    }

    #[test]
    fn test_card_actions() {
        let lab = find(Tab::Simulations, "newton-laws");
        assert_eq!(
            card_action(&lab, Tab::Simulations),
            CardAction::OpenLab("newton-laws")
        );

        // Marked available but no lab behind it
        let mut orphan = find(Tab::Simulations, "projectile-motion");
        orphan.available = true;
        assert_eq!(card_action(&orphan, Tab::Simulations), CardAction::ComingSoon);

        let quiz = find(Tab::Quizzes, "newton-laws-quiz");
        assert_eq!(card_action(&quiz, Tab::Quizzes), CardAction::OpenPracticeQuiz);

        let module = find(Tab::Modules, "newton-laws-module");
        assert_eq!(card_action(&module, Tab::Modules), CardAction::OpenNewtonModule);

        let mut other = find(Tab::Modules, "waves-oscillation-module");
        assert_eq!(card_action(&other, Tab::Modules), CardAction::ComingSoon);
        other.available = true;
        assert_eq!(card_action(&other, Tab::Modules), CardAction::ComingSoon);
    }
}
