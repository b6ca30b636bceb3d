//! Metrics fetch collaborator: the two analytics endpoints over HTTP.
//!
//! Responses are decoded into the typed snapshot shapes from
//! `statbanner-core` and validated before they reach the orchestrator.
//! Any transport, status or decode failure is an error.

pub mod client;
pub mod validate;

pub use client::{HttpMetricsSource, MetricsSource};
pub use validate::Validate;
