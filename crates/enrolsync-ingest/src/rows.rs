//! Typed row extraction for the two fixed input shapes.

use std::path::Path;

use tracing::warn;

use enrolsync_model::{Email, Module, ShortName, TimetableId};

use crate::csv_table::read_csv_table;
use crate::error::{IngestError, Result};

/// Column names of the current-enrolment export.
#[derive(Debug, Clone)]
pub struct EnrolmentColumns {
    pub email: String,
    pub timetable_id: String,
}

impl Default for EnrolmentColumns {
    fn default() -> Self {
        Self {
            email: "Email2".to_string(),
            timetable_id: "TimetableID".to_string(),
        }
    }
}

/// Column names of the unit-creation export.
#[derive(Debug, Clone)]
pub struct ModuleColumns {
    pub shortname: String,
    pub fullname: String,
}

impl Default for ModuleColumns {
    fn default() -> Self {
        Self {
            shortname: "shortname".to_string(),
            fullname: "fullname".to_string(),
        }
    }
}

/// One row of the current-enrolment export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrolmentRow {
    pub email: Email,
    pub timetable_id: TimetableId,
}

/// Extraction result: surviving rows plus the count of dropped ones.
/// Malformed rows are a data-quality signal, not a failure.
#[derive(Debug, Clone)]
pub struct RowExtract<T> {
    pub rows: Vec<T>,
    pub dropped: usize,
}

/// Read the current-enrolment export. Rows with a missing or malformed
/// email or timetable identifier are dropped and counted.
pub fn read_enrolment_rows(path: &Path, columns: &EnrolmentColumns) -> Result<RowExtract<EnrolmentRow>> {
    let table = read_csv_table(path)?;
    let email_idx = require_column(path, &table, &columns.email)?;
    let timetable_idx = require_column(path, &table, &columns.timetable_id)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for row in &table.rows {
        let email = Email::new(table.cell(row, email_idx));
        let timetable_id = TimetableId::new(table.cell(row, timetable_idx));
        match (email, timetable_id) {
            (Ok(email), Ok(timetable_id)) => rows.push(EnrolmentRow {
                email,
                timetable_id,
            }),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(path = %path.display(), dropped, "dropped malformed enrolment rows");
    }
    Ok(RowExtract { rows, dropped })
}

/// Read the unit-creation export. Rows missing either field are
/// dropped and counted; both fields are trimmed by construction.
pub fn read_module_rows(path: &Path, columns: &ModuleColumns) -> Result<RowExtract<Module>> {
    let table = read_csv_table(path)?;
    let shortname_idx = require_column(path, &table, &columns.shortname)?;
    let fullname_idx = require_column(path, &table, &columns.fullname)?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for row in &table.rows {
        let shortname = ShortName::new(table.cell(row, shortname_idx));
        let fullname = table.cell(row, fullname_idx).trim();
        match (shortname, fullname.is_empty()) {
            (Ok(shortname), false) => rows.push(Module {
                shortname,
                fullname: fullname.to_string(),
            }),
            _ => dropped += 1,
        }
    }
    if dropped > 0 {
        warn!(path = %path.display(), dropped, "dropped incomplete module rows");
    }
    Ok(RowExtract { rows, dropped })
}

fn require_column(
    path: &Path,
    table: &crate::csv_table::CsvTable,
    name: &str,
) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| IngestError::MissingColumn {
            path: path.to_path_buf(),
            column: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_enrolment_rows_and_normalizes_email() {
        let file = write_temp(
            "Email2,TimetableID\n2025003871@Student.IMC.edu.au,T2 WA Stream1 Group A\n",
        );
        let extract = read_enrolment_rows(file.path(), &EnrolmentColumns::default()).unwrap();
        assert_eq!(extract.rows.len(), 1);
        assert_eq!(extract.dropped, 0);
        assert_eq!(
            extract.rows[0].email.as_str(),
            "2025003871@student.imc.edu.au"
        );
    }

    #[test]
    fn malformed_rows_are_dropped_not_fatal() {
        let file = write_temp(
            "Email2,TimetableID\nnot-an-email,T2\n,T2\na@x.edu,\nb@x.edu,T2 SYD Stream1\n",
        );
        let extract = read_enrolment_rows(file.path(), &EnrolmentColumns::default()).unwrap();
        assert_eq!(extract.rows.len(), 1);
        assert_eq!(extract.dropped, 3);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_temp("Email,TimetableID\na@x.edu,T2\n");
        let error = read_enrolment_rows(file.path(), &EnrolmentColumns::default()).unwrap_err();
        assert!(matches!(error, IngestError::MissingColumn { column, .. } if column == "Email2"));
    }

    #[test]
    fn custom_column_names() {
        let file = write_temp("mail,session\na@x.edu,T2 SYD Stream1\n");
        let columns = EnrolmentColumns {
            email: "mail".to_string(),
            timetable_id: "session".to_string(),
        };
        let extract = read_enrolment_rows(file.path(), &columns).unwrap();
        assert_eq!(extract.rows.len(), 1);
    }

    #[test]
    fn module_rows_trim_and_drop_incomplete() {
        let file = write_temp(
            "shortname,fullname\n 2025 T2 TMGT601 , Business (WA) TMGT601 \n,missing shortname\nonly-short,\n",
        );
        let extract = read_module_rows(file.path(), &ModuleColumns::default()).unwrap();
        assert_eq!(extract.rows.len(), 1);
        assert_eq!(extract.dropped, 2);
        assert_eq!(extract.rows[0].shortname.as_str(), "2025 T2 TMGT601");
        assert_eq!(extract.rows[0].fullname, "Business (WA) TMGT601");
    }
}
