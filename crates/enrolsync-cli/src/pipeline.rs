//! Pipeline stages shared by the map and sync commands.
//!
//! Each stage is a plain function over in-memory data so the whole
//! pipeline can be exercised in tests with a fake directory instead of
//! a live LMS. Remote lookup failures degrade to "not found" for that
//! one item; nothing here aborts the batch.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;
use tracing::{info, trace, warn};

use enrolsync_ingest::{
    EnrolmentColumns, EnrolmentRow, ModuleColumns, RowExtract, read_enrolment_rows,
    read_module_rows,
};
use enrolsync_match::{ModuleIndex, build_campus_tree, generate_mapping};
use enrolsync_model::{Association, CampusTree, CourseId, EnrolmentSet, Module, ShortName};
use enrolsync_moodle::CourseDirectory;
use enrolsync_report::MappingRow;

use crate::logging::redact_value;

/// The two parsed input tables.
pub struct Inputs {
    pub enrolments: RowExtract<EnrolmentRow>,
    pub modules: RowExtract<Module>,
}

/// Read and validate both input files.
pub fn load_inputs(
    enrolment_file: &Path,
    modules_file: &Path,
    enrolment_columns: &EnrolmentColumns,
    module_columns: &ModuleColumns,
) -> anyhow::Result<Inputs> {
    let enrolments = read_enrolment_rows(enrolment_file, enrolment_columns)
        .with_context(|| format!("reading enrolment export {}", enrolment_file.display()))?;
    let modules = read_module_rows(modules_file, module_columns)
        .with_context(|| format!("reading module export {}", modules_file.display()))?;
    info!(
        enrolment_rows = enrolments.rows.len(),
        module_rows = modules.rows.len(),
        "inputs loaded"
    );
    Ok(Inputs {
        enrolments,
        modules,
    })
}

/// Classify timetable identifiers, index modules and correlate the two.
pub fn build_associations(
    enrolments: &[EnrolmentRow],
    modules: Vec<Module>,
) -> (CampusTree, ModuleIndex, Vec<Association>) {
    let tree = build_campus_tree(enrolments.iter().map(|row| &row.timetable_id));
    let index = ModuleIndex::build(modules);
    let associations = generate_mapping(&tree, &index);
    info!(
        timetable_entries = tree.len(),
        modules = index.len(),
        associations = associations.len(),
        "mapping generated"
    );
    (tree, index, associations)
}

/// Fill in course ids from the directory, one lookup per distinct
/// shortname. A failed or empty lookup leaves the id unresolved.
///
/// Returns the number of distinct shortnames that resolved.
pub fn resolve_course_ids(
    associations: &mut [Association],
    directory: &impl CourseDirectory,
) -> usize {
    let mut cache: BTreeMap<ShortName, Option<CourseId>> = BTreeMap::new();
    for association in associations.iter_mut() {
        let course_id = cache
            .entry(association.shortname.clone())
            .or_insert_with(|| match directory.course_id_by_shortname(&association.shortname) {
                Ok(found) => {
                    if found.is_none() {
                        warn!(shortname = %association.shortname, "course not found on LMS");
                    }
                    found
                }
                Err(error) => {
                    warn!(
                        shortname = %association.shortname,
                        %error,
                        "course lookup failed, treating as not found"
                    );
                    None
                }
            });
        association.course_id = *course_id;
    }
    cache.values().filter(|id| id.is_some()).count()
}

/// Inner-join enrolment rows onto associations by timetable identifier.
///
/// One output row per (enrolment row, matching association) pair, in
/// enrolment-row order then association order. Students whose timetable
/// entry matched no module simply produce no rows.
pub fn join_roster(enrolments: &[EnrolmentRow], associations: &[Association]) -> Vec<MappingRow> {
    let mut rows = Vec::new();
    for enrolment in enrolments {
        for association in associations {
            if association.timetable_id == enrolment.timetable_id {
                trace!(
                    email = redact_value(enrolment.email.as_str()),
                    shortname = %association.shortname,
                    "roster row"
                );
                rows.push(MappingRow {
                    email: enrolment.email.clone(),
                    shortname: association.shortname.clone(),
                    course_id: association.course_id,
                });
            }
        }
    }
    rows
}

/// Course id to shortname lookup for action records.
pub fn course_names(associations: &[Association]) -> BTreeMap<CourseId, ShortName> {
    associations
        .iter()
        .filter_map(|association| {
            association
                .course_id
                .map(|course_id| (course_id, association.shortname.clone()))
        })
        .collect()
}

/// Expected enrolment state: every resolved course appears, members
/// come from the joined roster.
pub fn build_target(rows: &[MappingRow], associations: &[Association]) -> EnrolmentSet {
    let mut target = EnrolmentSet::new();
    for association in associations {
        if let Some(course_id) = association.course_id {
            target.insert_course(course_id);
        }
    }
    for row in rows {
        if let Some(course_id) = row.course_id {
            target.insert(course_id, row.email.clone());
        }
    }
    target
}

/// Observed enrolment state, fetched per course. A failed fetch is
/// recorded as an empty roster so the course still reconciles; the
/// resulting plan can only over-enrol, never unenrol, for that course.
pub fn fetch_current(
    names: &BTreeMap<CourseId, ShortName>,
    directory: &impl CourseDirectory,
) -> EnrolmentSet {
    let mut current = EnrolmentSet::new();
    for (&course_id, shortname) in names {
        current.insert_course(course_id);
        match directory.enrolled_user_emails(course_id) {
            Ok(members) => {
                for email in members {
                    current.insert(course_id, email);
                }
            }
            Err(error) => {
                warn!(
                    course_id = %course_id,
                    shortname = %shortname,
                    %error,
                    "enrolled-users fetch failed, treating roster as empty"
                );
            }
        }
    }
    current
}

/// Check that each enrol candidate has an LMS account. Missing or
/// unresolvable accounts are warned about and counted; the action is
/// still emitted so the operator sees the full intended state.
pub fn verify_accounts(
    actions: &[enrolsync_model::ReconcileAction],
    directory: &impl CourseDirectory,
) -> usize {
    let mut checked: BTreeMap<&str, bool> = BTreeMap::new();
    for action in actions {
        checked.entry(action.email.as_str()).or_insert_with(|| {
            match directory.user_id_by_email(&action.email) {
                Ok(Some(_)) => true,
                Ok(None) => {
                    warn!(
                        email = redact_value(action.email.as_str()),
                        "no LMS account for enrol candidate"
                    );
                    false
                }
                Err(error) => {
                    warn!(
                        email = redact_value(action.email.as_str()),
                        %error,
                        "account lookup failed, treating as missing"
                    );
                    false
                }
            }
        });
    }
    checked.values().filter(|known| !**known).count()
}
