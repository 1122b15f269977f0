//! Replayable input scripts
//!
//! A script is the sequence of events a user would produce in a step view:
//! answer edits plus continue/back presses. Replaying it through a
//! controller yields one snapshot per event.

use crate::answers::AnswerUpdate;
use crate::cli::config::FlowConfig;
use crate::errors::{Result, WisdomError};
use crate::flow::controller::{AdvanceOutcome, FlowController, FlowSnapshot};
use crate::validation::{AssessmentRules, OnboardingRules, StepRules};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which rule set drives a flow
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    /// Seven-step health assessment
    #[default]
    Assessment,
    /// Four-step marketing onboarding
    Onboarding,
}

impl FlowKind {
    /// Build the rule set for this flow
    pub fn rules(&self, config: &FlowConfig) -> Box<dyn StepRules> {
        match self {
            FlowKind::Assessment => Box::new(AssessmentRules::with_config(config)),
            FlowKind::Onboarding => Box::new(OnboardingRules::new()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FlowKind::Assessment => "assessment",
            FlowKind::Onboarding => "onboarding",
        }
    }
}

/// One scripted input event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum FlowAction {
    Update { update: AnswerUpdate },
    Advance,
    Retreat,
}

/// Ordered list of input events, optionally naming its flow
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowScript {
    #[serde(default)]
    pub flow: Option<FlowKind>,
    pub actions: Vec<FlowAction>,
}

/// Result of replaying one action
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub index: usize,
    pub action: FlowAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advance: Option<AdvanceOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retreated: Option<bool>,
    pub snapshot: FlowSnapshot,
}

impl FlowScript {
    /// Parse a script from JSON text
    pub fn from_json(raw: &str) -> Result<Self> {
        let script: FlowScript = serde_json::from_str(raw)?;
        if script.actions.is_empty() {
            return Err(WisdomError::InvalidScript("script has no actions".to_string()));
        }
        Ok(script)
    }

    /// Read and parse a script file
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Replay every action through `controller`
    ///
    /// Stops at the first answer update that fails.
    pub fn run<R: StepRules>(&self, controller: &mut FlowController<R>) -> Result<Vec<ActionResult>> {
        let mut results = Vec::with_capacity(self.actions.len());

        for (index, action) in self.actions.iter().enumerate() {
            let mut advance = None;
            let mut retreated = None;

            match action {
                FlowAction::Update { update } => controller.update(update.clone())?,
                FlowAction::Advance => advance = Some(controller.advance()),
                FlowAction::Retreat => retreated = Some(controller.retreat()),
            }

            results.push(ActionResult {
                index,
                action: action.clone(),
                advance,
                retreated,
                snapshot: controller.snapshot(),
            });
        }

        Ok(results)
    }
}
