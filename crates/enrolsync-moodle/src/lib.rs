//! Moodle web service client: the remote collaborator of the
//! reconciliation pipeline.
//!
//! Calls are sequential and throttled; there are no automatic retries.
//! A transient failure is surfaced as an error for that one lookup and
//! the caller degrades it to "not found" and moves on.

#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod directory;
pub mod error;

pub use client::MoodleClient;
pub use config::MoodleConfig;
pub use directory::{CourseDirectory, UserId};
pub use error::{MoodleError, Result};
