//! Batch pipeline scoring patient vitals for clinical risk triage.
//!
//! The [`workflows::triage`] module holds the pure scoring core; the
//! [`workflows::intake`] module holds the fetch/submit collaborators around
//! it. `main.rs` wires the two together behind a small CLI.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
