//! Step validation type definitions

use serde::{Deserialize, Serialize};

/// Individual completion check on a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCheck {
    /// Check name
    pub name: String,

    /// Check passed
    pub passed: bool,
}

impl StepCheck {
    /// Create a check with its outcome
    pub fn new(name: impl Into<String>, passed: bool) -> Self {
        Self {
            name: name.into(),
            passed,
        }
    }
}

/// Outcome of evaluating one step against the current answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepReport {
    /// Step index that was evaluated
    pub step: usize,

    /// All checks run for the step
    pub checks: Vec<StepCheck>,
}

impl StepReport {
    /// Create report for a step
    pub fn new(step: usize, checks: Vec<StepCheck>) -> Self {
        Self { step, checks }
    }

    /// Report for a step with nothing to check
    pub fn optional(step: usize) -> Self {
        Self::new(step, Vec::new())
    }

    /// True when every check passed (vacuously true for optional steps)
    pub fn can_advance(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Get failed checks
    pub fn failed_checks(&self) -> Vec<&StepCheck> {
        self.checks.iter().filter(|c| !c.passed).collect()
    }

    /// Get passed checks
    pub fn passed_checks(&self) -> Vec<&StepCheck> {
        self.checks.iter().filter(|c| c.passed).collect()
    }
}
