use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("invalid timetable identifier: {0:?}")]
    InvalidTimetableId(String),
    #[error("invalid module shortname: {0:?}")]
    InvalidShortName(String),
    #[error("invalid course code: {0:?}")]
    InvalidCourseCode(String),
    #[error("invalid email address: {0:?}")]
    InvalidEmail(String),
    #[error("unknown campus: {0:?}")]
    UnknownCampus(String),
    #[error("unknown stream: {0:?}")]
    UnknownStream(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
