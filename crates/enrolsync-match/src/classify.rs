//! Campus and stream classification.
//!
//! There are two classification paths because the two inputs follow
//! different conventions: timetable identifiers carry space-delimited
//! campus tokens and a `Stream N` marker, while module descriptions use
//! a parenthesized campus list and `Class 1` / `Class 2` wording. The
//! asymmetry is upstream convention, kept as-is.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use enrolsync_model::{Campus, Stream};

static STREAM_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Stream\s*(\d+)").expect("stream pattern"));

/// A parenthesized campus list like `(SYD/WA/TAS)` or `(WA)`.
static CAMPUS_GROUP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\((SYD|WA|TAS)(?:/(SYD|WA|TAS))*\)").expect("campus group pattern")
});

static CAMPUS_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"SYD|WA|TAS").expect("campus token pattern"));

/// Campus of a timetable identifier.
///
/// The token must be surrounded by spaces in the uppercased string;
/// `"something TAS thing"` has no such delimiting and falls through to
/// the SYD default.
pub fn campus_of_timetable_id(id: &str) -> Campus {
    let upper = id.to_uppercase();
    if upper.contains(" WA ") {
        Campus::Wa
    } else if upper.contains(" TAS ") {
        Campus::Tas
    } else {
        Campus::Syd
    }
}

/// Raw stream label of a timetable identifier: `"Stream"` plus the
/// digit sequence after the (case-insensitive) `Stream` marker, or
/// `"Stream1"` when no marker is present.
///
/// The label is not restricted to the fixed universe here; labels like
/// `"Stream3"` fail [`Stream::from_label`] and are skipped by the tree
/// builder.
pub fn stream_label_of_timetable_id(id: &str) -> String {
    match STREAM_MARKER.captures(id) {
        Some(captures) => format!("Stream{}", &captures[1]),
        None => Stream::Stream1.as_str().to_string(),
    }
}

/// Stream of a timetable identifier, when it falls inside the fixed
/// universe.
pub fn stream_of_timetable_id(id: &str) -> Option<Stream> {
    Stream::from_label(&stream_label_of_timetable_id(id)).ok()
}

/// Campuses a module is offered at.
///
/// A parenthesized group anywhere in the description wins and may name
/// several campuses (sorted, deduplicated). Without one, the shortname
/// is searched for a bare `WA` / `TAS` substring, defaulting to SYD.
pub fn module_campuses(shortname: &str, description: &str) -> Vec<Campus> {
    if let Some(group) = CAMPUS_GROUP.find(description) {
        let campuses: BTreeSet<Campus> = CAMPUS_TOKEN
            .find_iter(group.as_str())
            .filter_map(|token| token.as_str().parse().ok())
            .collect();
        return campuses.into_iter().collect();
    }
    if shortname.contains("WA") {
        vec![Campus::Wa]
    } else if shortname.contains("TAS") {
        vec![Campus::Tas]
    } else {
        vec![Campus::Syd]
    }
}

/// Stream of a module, from its description's `Class N` wording.
pub fn module_stream(description: &str) -> Stream {
    if description.contains("Class 1") {
        Stream::Stream1
    } else if description.contains("Class 2") {
        Stream::Stream2
    } else {
        Stream::Stream1
    }
}
