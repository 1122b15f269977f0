//! Flow controller
//!
//! Owns the position and the answers of one flow instance. Advancing is
//! gated by the step rules; retreating never is. Reaching past the last step
//! fires the completion callback once and leaves the flow in `Complete`.

use crate::answers::{AnswerStore, AnswerUpdate};
use crate::classification::{classify, Classification};
use crate::errors::Result;
use crate::flow::state::{FlowEvent, FlowState};
use crate::telemetry::{FlowTelemetry, TelemetryEvent};
use crate::validation::{StepReport, StepRules};
use serde::Serialize;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// Result of an `advance` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "step", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Moved to the step at this index
    Moved(usize),
    /// Current step not satisfied; nothing changed
    Blocked,
    /// Left the last step; completion was signalled
    Completed,
    /// Flow had already completed; nothing changed
    AlreadyComplete,
}

/// Everything a view needs to render the current position
#[derive(Debug, Clone, Serialize)]
pub struct FlowSnapshot {
    pub flow_id: Uuid,
    pub state: FlowState,
    pub step_name: &'static str,
    pub total_steps: usize,
    pub can_advance: bool,
    pub progress_percent: f64,
    pub answers: AnswerStore,
    /// Present only while the last step is shown
    pub classification: Option<Classification>,
}

type CompletionHook = Box<dyn FnMut()>;

/// Controller for a fixed-length linear flow
pub struct FlowController<R: StepRules> {
    id: Uuid,
    rules: R,
    state: FlowState,
    store: AnswerStore,
    telemetry: FlowTelemetry,
    on_complete: Option<CompletionHook>,
}

impl<R: StepRules> FlowController<R> {
    /// Start a flow at step 0 with an empty store
    pub fn new(rules: R) -> Self {
        Self {
            id: Uuid::new_v4(),
            rules,
            state: FlowState::start(),
            store: AnswerStore::new(),
            telemetry: FlowTelemetry::new(),
            on_complete: None,
        }
    }

    /// Register the callback fired when the flow completes
    pub fn on_complete(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_complete = Some(Box::new(hook));
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn rules(&self) -> &R {
        &self.rules
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    /// Current step index; the last step once complete
    pub fn current_step(&self) -> usize {
        self.state
            .step()
            .unwrap_or_else(|| self.rules.total_steps().saturating_sub(1))
    }

    pub fn total_steps(&self) -> usize {
        self.rules.total_steps()
    }

    pub fn is_complete(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn answers(&self) -> &AnswerStore {
        &self.store
    }

    pub fn telemetry(&self) -> &FlowTelemetry {
        &self.telemetry
    }

    /// Checks for the current step; `None` once complete
    pub fn report(&self) -> Option<StepReport> {
        self.state
            .step()
            .map(|step| self.rules.evaluate(step, &self.store))
    }

    /// Whether the continue control should be enabled
    pub fn can_advance(&self) -> bool {
        self.report().is_some_and(|r| r.can_advance())
    }

    /// Constitutional ranking of the current answers
    pub fn classification(&self) -> Classification {
        classify(self.store.quiz_answers())
    }

    /// Share of the flow reached, counting the current step as reached
    pub fn progress_percent(&self) -> f64 {
        let total = self.total_steps();
        if total == 0 {
            return 100.0;
        }
        (self.current_step() + 1) as f64 / total as f64 * 100.0
    }

    /// Apply one input event to the answers
    pub fn update(&mut self, update: AnswerUpdate) -> Result<()> {
        let cap = update
            .list_field()
            .and_then(|field| self.rules.selection_cap(field));
        self.store = update.apply(&self.store, cap)?;

        debug!(field = update.field_name(), step = ?self.state.step(), "answer updated");
        self.telemetry.record(TelemetryEvent::AnswerUpdated {
            field: update.field_name().to_string(),
            step: self.state.step(),
            timestamp: Instant::now(),
        });
        Ok(())
    }

    /// Move past the current step if its checks pass
    pub fn advance(&mut self) -> AdvanceOutcome {
        let Some(from) = self.state.step() else {
            return AdvanceOutcome::AlreadyComplete;
        };

        let report = self.rules.evaluate(from, &self.store);
        if !report.can_advance() {
            let failed: Vec<String> = report
                .failed_checks()
                .iter()
                .map(|c| c.name.clone())
                .collect();
            debug!(step = from, failed = ?failed, "advance blocked");
            self.telemetry.record(TelemetryEvent::AdvanceBlocked {
                step: from,
                failed_checks: failed,
                timestamp: Instant::now(),
            });
            return AdvanceOutcome::Blocked;
        }

        self.state = self.state.transition(FlowEvent::Continue, self.total_steps());
        match self.state {
            FlowState::Step(to) => {
                debug!(from, to, step = self.rules.step_name(to), "step advanced");
                self.telemetry.record(TelemetryEvent::StepAdvanced {
                    from,
                    to,
                    timestamp: Instant::now(),
                });
                AdvanceOutcome::Moved(to)
            }
            FlowState::Complete => {
                info!(flow_id = %self.id, "flow complete");
                self.telemetry.record(TelemetryEvent::FlowCompleted {
                    timestamp: Instant::now(),
                });
                if let Some(hook) = self.on_complete.as_mut() {
                    hook();
                }
                AdvanceOutcome::Completed
            }
        }
    }

    /// Move back one step; returns false when nothing moved
    pub fn retreat(&mut self) -> bool {
        match self.state {
            FlowState::Step(from) if from > 0 => {
                self.state = self.state.transition(FlowEvent::Back, self.total_steps());
                let to = self.current_step();
                debug!(from, to, "step retreated");
                self.telemetry.record(TelemetryEvent::StepRetreated {
                    from,
                    to,
                    timestamp: Instant::now(),
                });
                true
            }
            _ => false,
        }
    }

    /// Render-ready view of the current position
    pub fn snapshot(&self) -> FlowSnapshot {
        let on_last_step = self.state == FlowState::Step(self.total_steps().saturating_sub(1));
        FlowSnapshot {
            flow_id: self.id,
            state: self.state,
            step_name: self.rules.step_name(self.current_step()),
            total_steps: self.total_steps(),
            can_advance: self.can_advance(),
            progress_percent: self.progress_percent(),
            answers: self.store.clone(),
            classification: on_last_step.then(|| self.classification()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{FlagField, ListField, TextField};
    use crate::classification::Dosha;
    use crate::validation::{AssessmentRules, OnboardingRules};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_new_flow_starts_at_zero() {
        let flow = FlowController::new(AssessmentRules::new());
        assert_eq!(flow.current_step(), 0);
        assert_eq!(flow.total_steps(), 7);
        assert!(!flow.can_advance());
        assert!(!flow.is_complete());
    }

    #[test]
    fn test_blocked_advance_is_noop() {
        let mut flow = FlowController::new(AssessmentRules::new());
        assert_eq!(flow.advance(), AdvanceOutcome::Blocked);
        assert_eq!(flow.current_step(), 0);
        assert_eq!(flow.telemetry().stats().blocked_advances, 1);
    }

    #[test]
    fn test_retreat_at_zero_is_noop() {
        let mut flow = FlowController::new(OnboardingRules::new());
        assert!(!flow.retreat());
        assert_eq!(flow.current_step(), 0);
    }

    #[test]
    fn test_retreat_never_validates() {
        let mut flow = FlowController::new(OnboardingRules::new());
        flow.update(AnswerUpdate::Toggle {
            field: ListField::PrimaryGoals,
            token: "sleep".to_string(),
        })
        .unwrap();
        assert_eq!(flow.advance(), AdvanceOutcome::Moved(1));

        // Emptying the goals makes step 0 invalid, going back still works
        flow.update(AnswerUpdate::Toggle {
            field: ListField::PrimaryGoals,
            token: "sleep".to_string(),
        })
        .unwrap();
        assert!(flow.retreat());
        assert_eq!(flow.current_step(), 0);
        assert!(!flow.can_advance());
    }

    #[test]
    fn test_completion_hook_fires_once() {
        let fired = Rc::new(Cell::new(0));
        let counter = Rc::clone(&fired);
        let mut flow = FlowController::new(OnboardingRules::new())
            .on_complete(move || counter.set(counter.get() + 1));

        flow.update(AnswerUpdate::SetList {
            field: ListField::PrimaryGoals,
            values: vec!["pain".to_string()],
        })
        .unwrap();
        for expected in 1..4 {
            assert_eq!(flow.advance(), AdvanceOutcome::Moved(expected));
        }
        assert_eq!(flow.advance(), AdvanceOutcome::Completed);
        assert_eq!(flow.advance(), AdvanceOutcome::AlreadyComplete);
        assert!(!flow.retreat());
        assert_eq!(fired.get(), 1);
        assert!(flow.is_complete());
    }

    #[test]
    fn test_update_error_keeps_store() {
        let mut flow = FlowController::new(AssessmentRules::new());
        flow.update(AnswerUpdate::SetFlag {
            field: FlagField::HipaaConsent,
            value: true,
        })
        .unwrap();
        let before = flow.answers().clone();
        let result = flow.update(AnswerUpdate::Remove {
            field: ListField::Allergies,
            index: 0,
        });
        assert!(result.is_err());
        assert_eq!(flow.answers(), &before);
    }

    #[test]
    fn test_goal_toggle_capped_in_assessment() {
        let mut flow = FlowController::new(AssessmentRules::new());
        for goal in ["stress", "sleep", "energy", "digestion"] {
            flow.update(AnswerUpdate::Toggle {
                field: ListField::PrimaryGoals,
                token: goal.to_string(),
            })
            .unwrap();
        }
        assert_eq!(flow.answers().list(ListField::PrimaryGoals).len(), 3);
    }

    #[test]
    fn test_progress_percent() {
        let mut flow = FlowController::new(OnboardingRules::new());
        assert_eq!(flow.progress_percent(), 25.0);
        flow.update(AnswerUpdate::SetList {
            field: ListField::PrimaryGoals,
            values: vec!["longevity".to_string()],
        })
        .unwrap();
        flow.advance();
        assert_eq!(flow.progress_percent(), 50.0);
    }

    #[test]
    fn test_snapshot_classification_only_on_last_step() {
        let mut flow = FlowController::new(OnboardingRules::new());
        flow.update(AnswerUpdate::SetQuizAnswer {
            question: "sleep".to_string(),
            answer: Dosha::Kapha,
        })
        .unwrap();
        flow.update(AnswerUpdate::SetText {
            field: TextField::HealthConcerns,
            value: "fatigue".to_string(),
        })
        .unwrap();
        assert!(flow.snapshot().classification.is_none());

        flow.update(AnswerUpdate::SetList {
            field: ListField::PrimaryGoals,
            values: vec!["sleep".to_string()],
        })
        .unwrap();
        for _ in 0..3 {
            flow.advance();
        }
        let snapshot = flow.snapshot();
        assert_eq!(snapshot.step_name, "analysis");
        assert_eq!(
            snapshot.classification.map(|c| c.primary),
            Some(Dosha::Kapha)
        );
    }
}
