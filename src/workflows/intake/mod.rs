//! Collaborators that move patient records in and the finished report out.
//! Everything here is I/O plumbing; the scoring core never sees it.

mod client;
mod retry;
mod roster;

pub use client::{AssessmentClient, IntakeError, SubmissionError};
pub use retry::RetryPolicy;
pub use roster::{PatientRosterImporter, RosterImportError};
