//! CSV ingestion for the two fixed input shapes: the current-enrolment
//! export (email, timetable identifier) and the unit-creation export
//! (shortname, fullname).

#![deny(unsafe_code)]

pub mod csv_table;
pub mod error;
pub mod rows;

pub use csv_table::{CsvTable, read_csv_table};
pub use error::{IngestError, Result};
pub use rows::{
    EnrolmentColumns, EnrolmentRow, ModuleColumns, RowExtract, read_enrolment_rows,
    read_module_rows,
};
