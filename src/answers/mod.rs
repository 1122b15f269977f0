//! Answer collection
//!
//! Field enums, the immutable-update answer store, and the input events
//! that step views emit against it.

pub mod fields;
pub mod store;
pub mod update;

pub use fields::{FlagField, ListField, TextField};
pub use store::AnswerStore;
pub use update::AnswerUpdate;
