//! Per-step completion rules for the assessment and onboarding flows

use crate::answers::{AnswerStore, FlagField, ListField, TextField};
use crate::classification::quiz;
use crate::cli::config::FlowConfig;
use crate::validation::types::{StepCheck, StepReport};

/// Step rules of one fixed-length linear flow
///
/// Evaluation is a pure function of the step index and the answers.
pub trait StepRules {
    /// Number of steps in the flow
    fn total_steps(&self) -> usize;

    /// Short identifier of a step
    fn step_name(&self, step: usize) -> &'static str;

    /// Run every check for `step`
    fn evaluate(&self, step: usize, store: &AnswerStore) -> StepReport;

    /// Input-layer selection cap for a multi-choice list
    fn selection_cap(&self, _field: ListField) -> Option<usize> {
        None
    }

    /// Whether the flow may move past `step`
    fn can_advance(&self, step: usize, store: &AnswerStore) -> bool {
        self.evaluate(step, store).can_advance()
    }
}

impl<R: StepRules + ?Sized> StepRules for Box<R> {
    fn total_steps(&self) -> usize {
        (**self).total_steps()
    }

    fn step_name(&self, step: usize) -> &'static str {
        (**self).step_name(step)
    }

    fn evaluate(&self, step: usize, store: &AnswerStore) -> StepReport {
        (**self).evaluate(step, store)
    }

    fn selection_cap(&self, field: ListField) -> Option<usize> {
        (**self).selection_cap(field)
    }
}

fn out_of_range(step: usize) -> StepReport {
    StepReport::new(step, vec![StepCheck::new("step_in_range", false)])
}

/// Steps of the full assessment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentStep {
    Consent,
    BasicInfo,
    HealthBackground,
    Quiz,
    CulturalAlignment,
    Goals,
    Provider,
}

impl AssessmentStep {
    pub const ALL: [AssessmentStep; 7] = [
        AssessmentStep::Consent,
        AssessmentStep::BasicInfo,
        AssessmentStep::HealthBackground,
        AssessmentStep::Quiz,
        AssessmentStep::CulturalAlignment,
        AssessmentStep::Goals,
        AssessmentStep::Provider,
    ];

    pub fn from_index(step: usize) -> Option<Self> {
        Self::ALL.get(step).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            AssessmentStep::Consent => "consent",
            AssessmentStep::BasicInfo => "basic_info",
            AssessmentStep::HealthBackground => "health_background",
            AssessmentStep::Quiz => "quiz",
            AssessmentStep::CulturalAlignment => "cultural_alignment",
            AssessmentStep::Goals => "goals",
            AssessmentStep::Provider => "provider",
        }
    }
}

/// Rules of the seven-step assessment
#[derive(Debug, Clone)]
pub struct AssessmentRules {
    quiz_min_answers: usize,
    goal_selection_cap: usize,
}

impl AssessmentRules {
    pub fn new() -> Self {
        Self::with_config(&FlowConfig::default())
    }

    pub fn with_config(config: &FlowConfig) -> Self {
        Self {
            quiz_min_answers: config.quiz_min_answers,
            goal_selection_cap: config.goal_selection_cap,
        }
    }
}

impl Default for AssessmentRules {
    fn default() -> Self {
        Self::new()
    }
}

impl StepRules for AssessmentRules {
    fn total_steps(&self) -> usize {
        AssessmentStep::ALL.len()
    }

    fn step_name(&self, step: usize) -> &'static str {
        AssessmentStep::from_index(step).map_or("unknown", |s| s.name())
    }

    fn evaluate(&self, step: usize, store: &AnswerStore) -> StepReport {
        let Some(kind) = AssessmentStep::from_index(step) else {
            return out_of_range(step);
        };

        let checks = match kind {
            AssessmentStep::Consent => FlagField::CONSENTS
                .iter()
                .map(|f| StepCheck::new(f.as_str(), store.flag(*f)))
                .collect(),
            AssessmentStep::BasicInfo => [
                TextField::FirstName,
                TextField::Email,
                TextField::BirthYear,
                TextField::BiologicalSex,
            ]
            .iter()
            .map(|f| StepCheck::new(f.as_str(), !store.text(*f).is_empty()))
            .collect(),
            // Health background is optional
            AssessmentStep::HealthBackground => Vec::new(),
            // Partial completion is allowed: the minimum is below the quiz size.
            // Only ids from the question bank count.
            AssessmentStep::Quiz => {
                let answered = store
                    .quiz_answers()
                    .keys()
                    .filter(|id| quiz::question(id).is_some())
                    .count();
                vec![StepCheck::new("quiz_answers", answered >= self.quiz_min_answers)]
            }
            AssessmentStep::CulturalAlignment => vec![StepCheck::new(
                ListField::Traditions.as_str(),
                !store.list(ListField::Traditions).is_empty(),
            )],
            // The selection cap lives in `selection_cap`, not here
            AssessmentStep::Goals => vec![StepCheck::new(
                ListField::PrimaryGoals.as_str(),
                !store.list(ListField::PrimaryGoals).is_empty(),
            )],
            AssessmentStep::Provider => vec![StepCheck::new(
                TextField::HasProvider.as_str(),
                !store.text(TextField::HasProvider).is_empty(),
            )],
        };

        StepReport::new(step, checks)
    }

    fn selection_cap(&self, field: ListField) -> Option<usize> {
        match field {
            ListField::PrimaryGoals => Some(self.goal_selection_cap),
            _ => None,
        }
    }
}

/// Steps of the short marketing onboarding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnboardingStep {
    Goals,
    Constitution,
    Biometrics,
    Analysis,
}

impl OnboardingStep {
    pub const ALL: [OnboardingStep; 4] = [
        OnboardingStep::Goals,
        OnboardingStep::Constitution,
        OnboardingStep::Biometrics,
        OnboardingStep::Analysis,
    ];

    pub fn from_index(step: usize) -> Option<Self> {
        Self::ALL.get(step).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            OnboardingStep::Goals => "goals",
            OnboardingStep::Constitution => "constitution",
            OnboardingStep::Biometrics => "biometrics",
            OnboardingStep::Analysis => "analysis",
        }
    }
}

/// Rules of the four-step onboarding
#[derive(Debug, Clone, Default)]
pub struct OnboardingRules;

impl OnboardingRules {
    pub fn new() -> Self {
        Self
    }
}

impl StepRules for OnboardingRules {
    fn total_steps(&self) -> usize {
        OnboardingStep::ALL.len()
    }

    fn step_name(&self, step: usize) -> &'static str {
        OnboardingStep::from_index(step).map_or("unknown", |s| s.name())
    }

    fn evaluate(&self, step: usize, store: &AnswerStore) -> StepReport {
        match OnboardingStep::from_index(step) {
            None => out_of_range(step),
            Some(OnboardingStep::Goals) => StepReport::new(
                step,
                vec![StepCheck::new(
                    ListField::PrimaryGoals.as_str(),
                    !store.list(ListField::PrimaryGoals).is_empty(),
                )],
            ),
            Some(_) => StepReport::optional(step),
        }
    }
}
