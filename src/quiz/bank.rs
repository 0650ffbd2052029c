//! Built-in question banks

use serde::{Deserialize, Serialize};

/// A four-option multiple-choice question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: [String; 4],
    /// Index into `options`
    pub correct: usize,
}

impl Question {
    pub fn new(prompt: &str, options: [&str; 4], correct: usize) -> Self {
        Self {
            prompt: prompt.to_string(),
            options: options.map(str::to_string),
            correct,
        }
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct
    }

    /// Option label as shown to the player ("A", "B", ...)
    pub fn option_label(option: usize) -> char {
        (b'A' + option as u8) as char
    }
}

/// A practice quiz item with an explanation shown during review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeItem {
    pub question: Question,
    pub explanation: String,
}

const ARCADE: &[(&str, [&str; 4], usize)] = &[
    (
        "Newton's second law is written as...",
        ["F = ma", "F = m/a", "F = a/m", "F = m + a"],
        0,
    ),
    (
        "A 5 kg body is pushed with a 20 N force. What is its acceleration?",
        ["2 m/s²", "4 m/s²", "10 m/s²", "100 m/s²"],
        1,
    ),
    (
        "If the mass is doubled and the force stays the same, the acceleration...",
        ["Doubles", "Stays the same", "Halves", "Quadruples"],
        2,
    ),
    (
        "A 10 kg body accelerates at 3 m/s². The net force is...",
        ["13 N", "30 N", "3.33 N", "300 N"],
        1,
    ),
    (
        "In Newton's second law, acceleration is directly proportional to...",
        ["The mass", "The net force", "The velocity", "The travel time"],
        1,
    ),
    (
        "A 50 N force produces an acceleration of 5 m/s². The mass is...",
        ["5 kg", "10 kg", "45 kg", "250 kg"],
        1,
    ),
    (
        "If the force on a body doubles (mass unchanged), the acceleration...",
        ["Stays the same", "Doubles", "Halves", "Quadruples"],
        1,
    ),
    (
        "The SI unit of acceleration is...",
        ["m/s", "m/s²", "N/kg", "kg·m/s²"],
        1,
    ),
    (
        "A heavier body needs a ... force to reach the same acceleration.",
        ["Smaller", "Equal", "Larger", "Unrelated"],
        2,
    ),
    (
        "An 8 kg body feels a net force of 32 N. Its acceleration is...",
        ["2 m/s²", "4 m/s²", "8 m/s²", "256 m/s²"],
        1,
    ),
    (
        "In F = ma, 'a' stands for...",
        ["Acceleration", "Amplitude", "Area", "Angle"],
        0,
    ),
    (
        "With no net force on a body (F = 0), its acceleration is...",
        ["Maximal", "Minimal", "0 m/s²", "9.8 m/s²"],
        2,
    ),
    (
        "A 1000 kg car accelerates from rest at 2 m/s². The force required is...",
        ["500 N", "1000 N", "2000 N", "4000 N"],
        2,
    ),
    (
        "For a fixed force, mass and acceleration are...",
        [
            "Directly proportional",
            "Inversely proportional",
            "Exponentially related",
            "Unrelated",
        ],
        1,
    ),
    (
        "A 100 N force acts on a 25 kg body. Its acceleration is...",
        ["2 m/s²", "4 m/s²", "5 m/s²", "25 m/s²"],
        1,
    ),
];

const PRACTICE: &[(&str, [&str; 4], usize, &str)] = &[
    (
        "What is Newton's second law?",
        ["F = m × a", "F = m + a", "F = m / a", "F = a / m"],
        0,
        "Force (F) equals mass (m) multiplied by acceleration (a).",
    ),
    (
        "A 5 kg body accelerates at 2 m/s². What force acts on it?",
        ["10 N", "7 N", "3 N", "1 N"],
        0,
        "F = m × a, so 5 kg × 2 m/s² = 10 N.",
    ),
    (
        "What is the SI unit of force?",
        ["Newton (N)", "Joule (J)", "Watt (W)", "Pascal (Pa)"],
        0,
        "The SI unit of force is the newton (N).",
    ),
    (
        "A 20 N force acts on a 4 kg body. What is its acceleration?",
        ["5 m/s²", "8 m/s²", "4 m/s²", "2 m/s²"],
        0,
        "a = F / m, so 20 N / 4 kg = 5 m/s².",
    ),
    (
        "What happens when the net force on a body is zero?",
        [
            "It stays at rest or moves in a straight line at constant speed",
            "It moves in a circle",
            "It zig-zags",
            "It slows down",
        ],
        0,
        "With zero net force a body stays at rest or keeps moving uniformly (Newton's first law).",
    ),
];

/// Questions asked during arcade quiz interruptions
pub fn arcade_questions() -> Vec<Question> {
    ARCADE
        .iter()
        .map(|(prompt, options, correct)| Question::new(prompt, *options, *correct))
        .collect()
}

/// Items for the standalone practice quiz
pub fn practice_items() -> Vec<PracticeItem> {
    PRACTICE
        .iter()
        .map(|(prompt, options, correct, explanation)| PracticeItem {
            question: Question::new(prompt, *options, *correct),
            explanation: explanation.to_string(),
        })
        .collect()
}
