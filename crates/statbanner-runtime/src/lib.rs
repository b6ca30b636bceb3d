//! Runtime orchestrator — sequences one banner run end to end.
//!
//! `START → CLEANUP → FETCH → PERSIST_TODAY → LOOKUP_YESTERDAY → RENDER →
//! PUBLISH → DONE`, failing out of fetch, render or publish.

pub mod orchestrator;
pub mod types;

pub use orchestrator::Orchestrator;
pub use types::*;
