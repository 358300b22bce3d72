//! Records flowing between pipeline stages.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::{CourseId, Email, ShortName, TimetableId};

/// One offered module: catalogue shortname plus its descriptive text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub shortname: ShortName,
    pub fullname: String,
}

/// A correlated (timetable identifier, module) pair.
///
/// Many-to-many by design: one module may match several timetable
/// entries and one entry may be matched by several modules. The course
/// id is filled in later by the remote lookup; `None` means the lookup
/// was skipped or came back empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Association {
    pub timetable_id: TimetableId,
    pub shortname: ShortName,
    pub course_id: Option<CourseId>,
}

/// Direction of a reconciliation action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    Enrol,
    Unenrol,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Enrol => "enrol",
            ActionKind::Unenrol => "unenrol",
        }
    }
}

/// A single enrol/unenrol action. Produced by the reconciler, never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileAction {
    pub kind: ActionKind,
    pub email: Email,
    pub course_id: CourseId,
    pub shortname: ShortName,
}

/// Point-in-time snapshot of enrolment state: course id -> member
/// emails.
///
/// Two instances exist per run, the observed ("current") and the
/// expected ("target") state. Entries are only ever added; nothing is
/// mutated in place once the snapshot is handed to the reconciler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrolmentSet {
    courses: BTreeMap<CourseId, BTreeSet<Email>>,
}

impl EnrolmentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, course_id: CourseId, email: Email) {
        self.courses.entry(course_id).or_default().insert(email);
    }

    /// Register a course with no members yet. Needed so the reconciler
    /// sees courses whose target roster is empty.
    pub fn insert_course(&mut self, course_id: CourseId) {
        self.courses.entry(course_id).or_default();
    }

    pub fn members(&self, course_id: CourseId) -> Option<&BTreeSet<Email>> {
        self.courses.get(&course_id)
    }

    pub fn course_ids(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.courses.keys().copied()
    }

    pub fn course_count(&self) -> usize {
        self.courses.len()
    }

    pub fn member_count(&self) -> usize {
        self.courses.values().map(BTreeSet::len).sum()
    }
}

impl FromIterator<(CourseId, Email)> for EnrolmentSet {
    fn from_iter<I: IntoIterator<Item = (CourseId, Email)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (course_id, email) in iter {
            set.insert(course_id, email);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(value: &str) -> Email {
        Email::new(value).unwrap()
    }

    #[test]
    fn enrolment_set_deduplicates_members() {
        let mut set = EnrolmentSet::new();
        set.insert(CourseId(7), email("a@student.imc.edu.au"));
        set.insert(CourseId(7), email("A@STUDENT.IMC.EDU.AU"));
        assert_eq!(set.member_count(), 1);
    }

    #[test]
    fn empty_course_is_still_visible() {
        let mut set = EnrolmentSet::new();
        set.insert_course(CourseId(3));
        assert_eq!(set.course_count(), 1);
        assert!(set.members(CourseId(3)).unwrap().is_empty());
    }

    #[test]
    fn association_serializes() {
        let association = Association {
            timetable_id: TimetableId::new("WA Stream1 Group A").unwrap(),
            shortname: ShortName::new("2025 Term2 TMGT601").unwrap(),
            course_id: Some(CourseId(12)),
        };
        let json = serde_json::to_string(&association).unwrap();
        let round: Association = serde_json::from_str(&json).unwrap();
        assert_eq!(round, association);
    }
}
