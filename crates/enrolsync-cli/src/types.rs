//! Result types shared between command execution and summary printing.

use std::path::PathBuf;

/// Counters from the mapping half of a run.
pub struct MapResult {
    pub enrolment_rows: usize,
    pub dropped_enrolment_rows: usize,
    pub module_rows: usize,
    pub dropped_module_rows: usize,
    pub timetable_entries: usize,
    pub associations: usize,
    pub resolved_courses: usize,
    pub unresolved_courses: usize,
    pub mapping_rows: usize,
    /// Written output, when not suppressed.
    pub output: Option<PathBuf>,
    pub elapsed: std::time::Duration,
}

/// Counters from a full reconciliation run.
pub struct SyncResult {
    pub map: MapResult,
    pub target_courses: usize,
    pub target_members: usize,
    pub current_members: usize,
    pub to_enrol: usize,
    pub to_unenrol: usize,
    pub protected: usize,
    /// Enrol candidates with no matching LMS user account.
    pub missing_accounts: usize,
    pub outputs: Vec<PathBuf>,
    pub dry_run: bool,
    pub elapsed: std::time::Duration,
}
