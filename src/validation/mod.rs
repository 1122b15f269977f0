//! Step validation
//! Decides whether a flow may move past its current step

pub mod types;
pub mod rules;

pub use types::{StepCheck, StepReport};
pub use rules::{AssessmentRules, AssessmentStep, OnboardingRules, OnboardingStep, StepRules};
