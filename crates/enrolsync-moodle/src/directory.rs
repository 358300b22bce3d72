//! The lookup surface the pipeline depends on.

use std::collections::BTreeSet;

use enrolsync_model::{CourseId, Email, ShortName};

use crate::error::Result;

/// Numeric id of a user account on the remote LMS.
pub type UserId = u64;

/// The three remote lookups the reconciliation pipeline needs.
///
/// Implementations may fail transiently; callers treat a failure as
/// "unknown / not found" for that one item and continue the batch.
pub trait CourseDirectory {
    /// Resolve a catalogue shortname to its course id.
    fn course_id_by_shortname(&self, shortname: &ShortName) -> Result<Option<CourseId>>;

    /// Emails of all users currently enrolled in a course.
    fn enrolled_user_emails(&self, course_id: CourseId) -> Result<BTreeSet<Email>>;

    /// Resolve an email address to a user account id.
    fn user_id_by_email(&self, email: &Email) -> Result<Option<UserId>>;
}
