//! The fixed campus/stream universe.
//!
//! Timetable entries and modules only ever resolve to one of three
//! campuses and two streams. Anything derived outside this universe is
//! treated as "no match" by the tree builder, never an error.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::ModelError;

/// Physical campus of a timetable entry or module offering.
///
/// Variant order matches the lexicographic order of the string forms
/// (`SYD` < `TAS` < `WA`), so sorted collections line up with the
/// sorted campus lists the classifier produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Campus {
    Syd,
    Tas,
    Wa,
}

impl Campus {
    /// All campuses, in sorted string order.
    pub const ALL: [Campus; 3] = [Campus::Syd, Campus::Tas, Campus::Wa];

    pub fn as_str(&self) -> &'static str {
        match self {
            Campus::Syd => "SYD",
            Campus::Tas => "TAS",
            Campus::Wa => "WA",
        }
    }
}

impl fmt::Display for Campus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Campus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SYD" => Ok(Campus::Syd),
            "TAS" => Ok(Campus::Tas),
            "WA" => Ok(Campus::Wa),
            _ => Err(ModelError::UnknownCampus(s.to_string())),
        }
    }
}

/// Cohort stream within a campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Stream {
    Stream1,
    Stream2,
}

impl Stream {
    pub const ALL: [Stream; 2] = [Stream::Stream1, Stream::Stream2];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stream::Stream1 => "Stream1",
            Stream::Stream2 => "Stream2",
        }
    }

    /// Parse a derived label like `Stream1`.
    ///
    /// Labels outside the fixed universe (e.g. `Stream3`) are rejected;
    /// callers decide whether that means skip or error.
    pub fn from_label(label: &str) -> Result<Self, ModelError> {
        match label.trim() {
            "Stream1" => Ok(Stream::Stream1),
            "Stream2" => Ok(Stream::Stream2),
            other => Err(ModelError::UnknownStream(other.to_string())),
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stream {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stream::from_label(s)
    }
}
