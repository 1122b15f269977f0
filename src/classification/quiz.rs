// Constitutional quiz shown on the assessment's quiz step.
// Every question offers exactly one option per dosha.

use super::dosha::Dosha;
use serde::Serialize;

/// One selectable answer
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizOption {
    pub dosha: Dosha,
    pub label: &'static str,
}

/// One quiz question
#[derive(Debug, Clone, Copy, Serialize)]
pub struct QuizQuestion {
    pub id: &'static str,
    pub question: &'static str,
    pub options: [QuizOption; 3],
}

const fn opts(vata: &'static str, pitta: &'static str, kapha: &'static str) -> [QuizOption; 3] {
    [
        QuizOption { dosha: Dosha::Vata, label: vata },
        QuizOption { dosha: Dosha::Pitta, label: pitta },
        QuizOption { dosha: Dosha::Kapha, label: kapha },
    ]
}

pub const QUIZ_QUESTIONS: [QuizQuestion; 5] = [
    QuizQuestion {
        id: "body_frame",
        question: "How would you describe your body frame?",
        options: opts(
            "Thin and light, hard to gain weight",
            "Medium build, muscular",
            "Larger frame, gains weight easily",
        ),
    },
    QuizQuestion {
        id: "skin_type",
        question: "What best describes your skin?",
        options: opts(
            "Dry, rough, tends to crack",
            "Warm, sensitive, prone to rashes",
            "Oily, smooth, thick",
        ),
    },
    QuizQuestion {
        id: "digestion",
        question: "How is your digestion typically?",
        options: opts(
            "Irregular, prone to bloating/gas",
            "Strong, can eat anything, occasional acid",
            "Slow but steady, rarely upset",
        ),
    },
    QuizQuestion {
        id: "sleep",
        question: "What's your sleep pattern like?",
        options: opts(
            "Light sleeper, wake easily, variable",
            "Moderate, 6-7 hours is enough",
            "Deep, heavy, love to sleep long",
        ),
    },
    QuizQuestion {
        id: "stress_response",
        question: "When stressed, you tend to...",
        options: opts(
            "Feel anxious, worried, scattered",
            "Feel irritable, frustrated, angry",
            "Withdraw, feel heavy, unmotivated",
        ),
    },
];

/// Look up a question by id
pub fn question(id: &str) -> Option<&'static QuizQuestion> {
    QUIZ_QUESTIONS.iter().find(|q| q.id == id)
}
