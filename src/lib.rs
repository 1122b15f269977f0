//! WisdomPath - Assessment flow engine
//!
//! Drives the multi-step health assessment and the short onboarding flow of
//! the WisdomPath integrative wellness dashboard.
//!
//! # Architecture
//!
//! - **answers**: fixed-field answer store with whole-value updates
//! - **validation**: per-step completion rules gating the continue control
//! - **classification**: constitutional (dosha) ranking of quiz answers
//! - **flow**: step state machine, controller and scripted replay
//! - **interaction**: keyword-based personal interaction matrix

pub mod errors;
pub mod answers;
pub mod classification;
pub mod validation;
pub mod flow;
pub mod interaction;

// Re-export commonly used types
pub use errors::{Result, WisdomError};
pub use answers::{AnswerStore, AnswerUpdate};
pub use classification::{Classification, Dosha};
pub use flow::{AdvanceOutcome, FlowController, FlowKind};

// Terminal surface
pub mod cli;
pub mod telemetry;
pub mod display_mode;
pub use display_mode::DisplayMode;
