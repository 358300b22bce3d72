//! CLI library components for the enrolment sync tool.

pub mod logging;
pub mod pipeline;
