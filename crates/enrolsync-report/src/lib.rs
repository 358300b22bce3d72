//! CSV output writers.
//!
//! Two tables leave the pipeline: the user-level mapping result
//! (`email, short_name, course_id, type1`) and the reconciliation
//! action tables (`email, course_id, short_name`), one file per
//! direction. Column names follow the established downstream format.

#![deny(unsafe_code)]

use std::fs;
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use enrolsync_model::{CourseId, Email, ReconcileAction, ShortName};

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("create {path}: {source}")]
    Create {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("write {path}: {source}")]
    Write {
        path: std::path::PathBuf,
        #[source]
        source: csv::Error,
    },
}

pub type Result<T> = std::result::Result<T, ReportError>;

/// One row of the user-level mapping result: an enrolment-export row
/// joined onto its matched module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingRow {
    pub email: Email,
    pub shortname: ShortName,
    pub course_id: Option<CourseId>,
}

#[derive(Serialize)]
struct MappingRecord<'a> {
    email: &'a str,
    short_name: &'a str,
    course_id: Option<u64>,
    type1: u8,
}

#[derive(Serialize)]
struct ActionRecord<'a> {
    email: &'a str,
    course_id: u64,
    short_name: &'a str,
}

/// Write the mapping result table. The `type1` flag is a constant `1`
/// expected by the downstream import.
pub fn write_mapping_result(path: &Path, rows: &[MappingRow]) -> Result<()> {
    let mut writer = open_writer(path)?;
    if rows.is_empty() {
        write_header(&mut writer, path, &["email", "short_name", "course_id", "type1"])?;
    }
    for row in rows {
        let record = MappingRecord {
            email: row.email.as_str(),
            short_name: row.shortname.as_str(),
            course_id: row.course_id.map(|id| id.value()),
            type1: 1,
        };
        writer
            .serialize(record)
            .map_err(|source| ReportError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }
    flush(writer, path)
}

/// Write one action table (to_enrol or to_unenrol).
pub fn write_actions(path: &Path, actions: &[ReconcileAction]) -> Result<()> {
    let mut writer = open_writer(path)?;
    if actions.is_empty() {
        write_header(&mut writer, path, &["email", "course_id", "short_name"])?;
    }
    for action in actions {
        let record = ActionRecord {
            email: action.email.as_str(),
            course_id: action.course_id.value(),
            short_name: action.shortname.as_str(),
        };
        writer
            .serialize(record)
            .map_err(|source| ReportError::Write {
                path: path.to_path_buf(),
                source,
            })?;
    }
    flush(writer, path)
}

fn write_header(
    writer: &mut csv::Writer<fs::File>,
    path: &Path,
    fields: &[&str],
) -> Result<()> {
    writer
        .write_record(fields)
        .map_err(|source| ReportError::Write {
            path: path.to_path_buf(),
            source,
        })
}

fn open_writer(path: &Path) -> Result<csv::Writer<fs::File>> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
    }
    csv::Writer::from_path(path).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn flush(mut writer: csv::Writer<fs::File>, path: &Path) -> Result<()> {
    writer.flush().map_err(|source| ReportError::Create {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use enrolsync_model::ActionKind;

    use super::*;

    fn email(value: &str) -> Email {
        Email::new(value).unwrap()
    }

    fn shortname(value: &str) -> ShortName {
        ShortName::new(value).unwrap()
    }

    #[test]
    fn mapping_result_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result").join("mapping.csv");
        let rows = vec![
            MappingRow {
                email: email("100@student.imc.edu.au"),
                shortname: shortname("2025 T2 TMGT601"),
                course_id: Some(CourseId(42)),
            },
            MappingRow {
                email: email("200@student.imc.edu.au"),
                shortname: shortname("2025 T2 ACCT601"),
                course_id: None,
            },
        ];
        write_mapping_result(&path, &rows).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("email,short_name,course_id,type1"));
        assert_eq!(
            lines.next(),
            Some("100@student.imc.edu.au,2025 T2 TMGT601,42,1")
        );
        assert_eq!(lines.next(), Some("200@student.imc.edu.au,2025 T2 ACCT601,,1"));
    }

    #[test]
    fn action_table_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("to_enrol.csv");
        let actions = vec![ReconcileAction {
            kind: ActionKind::Enrol,
            email: email("100@student.imc.edu.au"),
            course_id: CourseId(7),
            shortname: shortname("2025 T2 TMGT601"),
        }];
        write_actions(&path, &actions).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("email,course_id,short_name"));
        assert_eq!(lines.next(), Some("100@student.imc.edu.au,7,2025 T2 TMGT601"));
    }

    #[test]
    fn empty_table_still_gets_headers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("to_unenrol.csv");
        write_actions(&path, &[]).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "email,course_id,short_name");
    }
}
