//! Enrolment reconciliation: diff observed vs. expected state.
//!
//! `reconcile` computes the minimal enrol/unenrol actions that converge
//! the observed ("current") enrolment state onto the expected
//! ("target") state. It never mutates its inputs, and running it
//! against unchanged inputs always yields the same plan; once a plan is
//! applied, re-running yields an empty plan.
//!
//! Unenrolment is destructive, so candidates pass through an allow-list
//! policy first: only machine-generated student accounts on the
//! institutional domain are ever eligible for automatic removal. Staff,
//! legacy and malformed addresses are reported but never emitted.

#![deny(unsafe_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use enrolsync_model::{ActionKind, CourseId, Email, EnrolmentSet, ReconcileAction, ShortName};

/// Digits-only local part on the institutional student domain. The
/// domain match is case-insensitive; normalized emails are already
/// lowercase but the policy does not depend on that.
static STUDENT_EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[0-9]+@student\.imc\.edu\.au$").expect("student email pattern")
});

/// Allow-list policy deciding which emails may be automatically
/// unenrolled.
#[derive(Debug, Clone)]
pub struct UnenrolPolicy {
    pattern: Regex,
}

impl UnenrolPolicy {
    /// Policy with a custom allow pattern.
    pub fn new(pattern: Regex) -> Self {
        Self { pattern }
    }

    pub fn allows(&self, email: &Email) -> bool {
        self.pattern.is_match(email.as_str())
    }
}

impl Default for UnenrolPolicy {
    fn default() -> Self {
        Self {
            pattern: STUDENT_EMAIL.clone(),
        }
    }
}

/// Outcome of one reconciliation run.
#[derive(Debug, Clone, Default)]
pub struct ReconcilePlan {
    pub to_enrol: Vec<ReconcileAction>,
    pub to_unenrol: Vec<ReconcileAction>,
    /// Unenrol candidates the policy refused, kept for reporting.
    pub protected: Vec<(CourseId, Email)>,
}

impl ReconcilePlan {
    pub fn is_empty(&self) -> bool {
        self.to_enrol.is_empty() && self.to_unenrol.is_empty()
    }

    pub fn action_count(&self) -> usize {
        self.to_enrol.len() + self.to_unenrol.len()
    }
}

/// Compute the action plan converging `current` onto `target`.
///
/// Per course id (union of both snapshots):
/// - `to_enrol`   = target − current
/// - `to_unenrol` = (current − target) ∩ policy allow-list
///
/// `names` maps course ids back to catalogue shortnames for the action
/// records; a course id missing from the map is skipped with a warning
/// rather than aborting the batch.
pub fn reconcile(
    current: &EnrolmentSet,
    target: &EnrolmentSet,
    names: &BTreeMap<CourseId, ShortName>,
    policy: &UnenrolPolicy,
) -> ReconcilePlan {
    static EMPTY: LazyLock<BTreeSet<Email>> = LazyLock::new(BTreeSet::new);

    let course_ids: BTreeSet<CourseId> = current.course_ids().chain(target.course_ids()).collect();

    let mut plan = ReconcilePlan::default();
    for course_id in course_ids {
        let Some(shortname) = names.get(&course_id) else {
            warn!(course_id = %course_id, "no shortname for course id, skipped");
            continue;
        };
        let observed = current.members(course_id).unwrap_or(&EMPTY);
        let expected = target.members(course_id).unwrap_or(&EMPTY);

        for email in expected.difference(observed) {
            plan.to_enrol.push(ReconcileAction {
                kind: ActionKind::Enrol,
                email: email.clone(),
                course_id,
                shortname: shortname.clone(),
            });
        }
        for email in observed.difference(expected) {
            if policy.allows(email) {
                plan.to_unenrol.push(ReconcileAction {
                    kind: ActionKind::Unenrol,
                    email: email.clone(),
                    course_id,
                    shortname: shortname.clone(),
                });
            } else {
                debug!(course_id = %course_id, "unenrol candidate outside policy, protected");
                plan.protected.push((course_id, email.clone()));
            }
        }
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(value: &str) -> Email {
        Email::new(value).unwrap()
    }

    fn names(entries: &[(u64, &str)]) -> BTreeMap<CourseId, ShortName> {
        entries
            .iter()
            .map(|(id, name)| (CourseId(*id), ShortName::new(*name).unwrap()))
            .collect()
    }

    fn set(entries: &[(u64, &str)]) -> EnrolmentSet {
        entries
            .iter()
            .map(|(id, value)| (CourseId(*id), email(value)))
            .collect()
    }

    #[test]
    fn identical_sets_are_a_fixed_point() {
        let snapshot = set(&[(1, "100@student.imc.edu.au"), (1, "200@student.imc.edu.au")]);
        let plan = reconcile(
            &snapshot,
            &snapshot,
            &names(&[(1, "2025 T2 TMGT601")]),
            &UnenrolPolicy::default(),
        );
        assert!(plan.is_empty());
        assert!(plan.protected.is_empty());
    }

    #[test]
    fn missing_target_members_are_enrolled() {
        let current = set(&[(1, "100@student.imc.edu.au")]);
        let target = set(&[
            (1, "100@student.imc.edu.au"),
            (1, "200@student.imc.edu.au"),
        ]);
        let plan = reconcile(
            &current,
            &target,
            &names(&[(1, "2025 T2 TMGT601")]),
            &UnenrolPolicy::default(),
        );
        assert_eq!(plan.to_enrol.len(), 1);
        assert_eq!(plan.to_enrol[0].email.as_str(), "200@student.imc.edu.au");
        assert_eq!(plan.to_enrol[0].kind, ActionKind::Enrol);
        assert!(plan.to_unenrol.is_empty());
    }

    #[test]
    fn safety_filter_protects_non_student_accounts() {
        let mut current = set(&[(1, "12345@student.imc.edu.au")]);
        current.insert(CourseId(1), email("jdoe@staff.imc.edu.au"));
        let mut target = EnrolmentSet::new();
        target.insert_course(CourseId(1));

        let plan = reconcile(
            &current,
            &target,
            &names(&[(1, "2025 T2 TMGT601")]),
            &UnenrolPolicy::default(),
        );
        assert_eq!(plan.to_unenrol.len(), 1);
        assert_eq!(
            plan.to_unenrol[0].email.as_str(),
            "12345@student.imc.edu.au"
        );
        assert_eq!(plan.protected.len(), 1);
        assert_eq!(plan.protected[0].1.as_str(), "jdoe@staff.imc.edu.au");
    }

    #[test]
    fn enrol_side_has_no_filter() {
        let current = EnrolmentSet::new();
        let target = set(&[(1, "jdoe@staff.imc.edu.au")]);
        let plan = reconcile(
            &current,
            &target,
            &names(&[(1, "2025 T2 TMGT601")]),
            &UnenrolPolicy::default(),
        );
        assert_eq!(plan.to_enrol.len(), 1);
    }

    #[test]
    fn course_without_shortname_is_skipped() {
        let target = set(&[(9, "100@student.imc.edu.au")]);
        let plan = reconcile(
            &EnrolmentSet::new(),
            &target,
            &BTreeMap::new(),
            &UnenrolPolicy::default(),
        );
        assert!(plan.is_empty());
    }

    #[test]
    fn policy_matches_domain_case_insensitively() {
        let policy = UnenrolPolicy::default();
        assert!(policy.allows(&email("12345@student.imc.edu.au")));
        // Construction normalizes case, but the policy itself is also
        // case-insensitive on the domain.
        assert!(policy.pattern.is_match("12345@Student.IMC.edu.au"));
        assert!(!policy.allows(&email("abc@student.imc.edu.au")));
        assert!(!policy.allows(&email("12345@students.imc.edu.au")));
    }

    #[test]
    fn custom_policy_pattern() {
        let policy = UnenrolPolicy::new(Regex::new(r"^[0-9]+@example\.edu$").unwrap());
        assert!(policy.allows(&email("42@example.edu")));
        assert!(!policy.allows(&email("42@student.imc.edu.au")));
    }
}
