//! Flow orchestration module
//!
//! Position state machine, the controller that gates it with step rules,
//! and scripted replay of user input.

pub mod state;
pub mod controller;
pub mod script;

// Re-export commonly used types
pub use state::{FlowEvent, FlowState};
pub use controller::{AdvanceOutcome, FlowController, FlowSnapshot};
pub use script::{ActionResult, FlowAction, FlowKind, FlowScript};
