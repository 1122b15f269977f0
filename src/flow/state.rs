//! Flow position state machine
//!
//! States are the step indices `0..total_steps` plus the terminal `Complete`.
//! Valid transitions:
//! 1. Step(i)    → Step(i + 1)   (on: Continue, i < last)
//! 2. Step(last) → Complete      (on: Continue)
//! 3. Step(i)    → Step(i - 1)   (on: Back, i > 0)
//! 4. Step(0)    → Step(0)       (on: Back)
//! 5. Complete   → Complete      (terminal)
//!
//! `Continue` is only fed in after the step validator has accepted the
//! current step; a rejected step never produces an event.

use serde::{Deserialize, Serialize};

/// Position within a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum FlowState {
    /// Showing the step at this index
    Step(usize),

    /// Past the last step (terminal)
    Complete,
}

/// Events that move a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// Current step accepted, move forward
    Continue,

    /// Move back one step
    Back,
}

impl FlowState {
    /// Initial state of every flow
    pub fn start() -> Self {
        FlowState::Step(0)
    }

    /// Check if this is the terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::Complete)
    }

    /// Current step index, `None` once complete
    pub fn step(&self) -> Option<usize> {
        match self {
            FlowState::Step(i) => Some(*i),
            FlowState::Complete => None,
        }
    }

    /// Apply an event for a flow of `total_steps` steps
    pub fn transition(&self, event: FlowEvent, total_steps: usize) -> FlowState {
        use FlowEvent::*;
        use FlowState::*;

        match (*self, event) {
            (Step(i), Continue) if i + 1 < total_steps => Step(i + 1),
            (Step(_), Continue) => Complete,
            (Step(i), Back) => Step(i.saturating_sub(1)),
            (Complete, _) => Complete,
        }
    }

    /// Human-readable state name
    pub fn display_name(&self) -> String {
        match self {
            FlowState::Step(i) => format!("Step {}", i + 1),
            FlowState::Complete => "Complete".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_through_all_steps() {
        let mut state = FlowState::start();
        for expected in 1..7 {
            state = state.transition(FlowEvent::Continue, 7);
            assert_eq!(state, FlowState::Step(expected));
        }
        state = state.transition(FlowEvent::Continue, 7);
        assert_eq!(state, FlowState::Complete);
    }

    #[test]
    fn test_back_at_zero_stays() {
        assert_eq!(
            FlowState::start().transition(FlowEvent::Back, 4),
            FlowState::Step(0)
        );
        assert_eq!(
            FlowState::Step(3).transition(FlowEvent::Back, 4),
            FlowState::Step(2)
        );
    }

    #[test]
    fn test_complete_is_absorbing() {
        for event in [FlowEvent::Continue, FlowEvent::Back] {
            assert_eq!(FlowState::Complete.transition(event, 4), FlowState::Complete);
        }
        assert!(FlowState::Complete.is_terminal());
        assert!(!FlowState::Step(3).is_terminal());
    }

    #[test]
    fn test_display_is_one_based() {
        assert_eq!(FlowState::Step(0).display_name(), "Step 1");
        assert_eq!(FlowState::Complete.step(), None);
    }
}
