//! Constitutional classification
//!
//! Tallies quiz answers into a ranked primary/secondary dosha.

pub mod dosha;
pub mod quiz;

pub use dosha::{classify, classify_tokens, Classification, Dosha};
pub use quiz::{QuizOption, QuizQuestion, QUIZ_QUESTIONS};
