//! Validated identifier newtypes.
//!
//! Constructors trim surrounding whitespace and reject values that can
//! never identify anything; everything downstream can then rely on the
//! invariants instead of re-checking strings.

use std::fmt;

use crate::ModelError;

/// Label of a scheduled class session, e.g. `"WA Stream2 Group A"`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct TimetableId(String);

impl TimetableId {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidTimetableId(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TimetableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compact code naming a course offering in the module catalogue,
/// e.g. `"2025 Term2 TMGT601"`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ShortName(String);

impl ShortName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::InvalidShortName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ShortName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical academic-unit code: 3-4 uppercase letters then exactly
/// 3 digits, e.g. `"TMGT601"`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if !is_course_code(trimmed) {
            return Err(ModelError::InvalidCourseCode(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn is_course_code(value: &str) -> bool {
    let letters = value
        .chars()
        .take_while(|ch| ch.is_ascii_uppercase())
        .count();
    if !(3..=4).contains(&letters) {
        return false;
    }
    let digits = &value[letters..];
    digits.len() == 3 && digits.chars().all(|ch| ch.is_ascii_digit())
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Numeric id of a course on the remote LMS.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct CourseId(pub u64);

impl CourseId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalized email address: trimmed and ASCII-lowercased on
/// construction so set membership is case-insensitive everywhere.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Email(String);

impl Email {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let normalized = value.trim().to_ascii_lowercase();
        // Minimal shape check; the upstream exports carry full addresses.
        let valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(ModelError::InvalidEmail(value));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The part after the `@`.
    pub fn domain(&self) -> &str {
        self.0.split_once('@').map(|(_, d)| d).unwrap_or("")
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timetable_id_trims_and_rejects_empty() {
        let id = TimetableId::new("  WA Stream1 Group A  ").unwrap();
        assert_eq!(id.as_str(), "WA Stream1 Group A");
        assert!(TimetableId::new("   ").is_err());
    }

    #[test]
    fn course_code_shape() {
        assert!(CourseCode::new("TMGT601").is_ok());
        assert!(CourseCode::new("ACCT601").is_ok());
        assert!(CourseCode::new("ABC123").is_ok());
        assert!(CourseCode::new("AB123").is_err());
        assert!(CourseCode::new("ABCDE123").is_err());
        assert!(CourseCode::new("TMGT60").is_err());
        assert!(CourseCode::new("TMGT6011").is_err());
        assert!(CourseCode::new("tmgt601").is_err());
    }

    #[test]
    fn email_normalizes_case_and_whitespace() {
        let email = Email::new("  2025003871@Student.IMC.edu.au ").unwrap();
        assert_eq!(email.as_str(), "2025003871@student.imc.edu.au");
        assert_eq!(email.domain(), "student.imc.edu.au");
        assert!(Email::new("not-an-email").is_err());
        assert!(Email::new("@imc.edu.au").is_err());
    }

    #[test]
    fn course_id_serializes_as_number() {
        let json = serde_json::to_string(&CourseId(42)).unwrap();
        assert_eq!(json, "42");
    }
}
