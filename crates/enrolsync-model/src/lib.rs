//! Domain model for timetable/LMS enrolment reconciliation.

#![deny(unsafe_code)]

mod enums;
mod error;
mod ids;
mod tree;
mod types;

pub use enums::{Campus, Stream};
pub use error::{ModelError, Result};
pub use ids::{CourseCode, CourseId, Email, ShortName, TimetableId};
pub use tree::CampusTree;
pub use types::{ActionKind, Association, EnrolmentSet, Module, ReconcileAction};
