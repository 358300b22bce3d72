//! Campus tree construction from timetable identifiers.

use std::collections::BTreeSet;

use tracing::debug;

use enrolsync_model::{CampusTree, TimetableId};

use crate::classify::{campus_of_timetable_id, stream_label_of_timetable_id};

/// Build the campus tree from all timetable identifiers.
///
/// Tutorial entries (case-insensitive substring) are excluded entirely,
/// duplicates collapse through a set (bucket order is therefore
/// lexicographic by identifier), and survivors are classified and
/// appended to their campus/stream bucket. Identifiers whose derived
/// stream falls outside the fixed universe are skipped.
pub fn build_campus_tree<'a, I>(ids: I) -> CampusTree
where
    I: IntoIterator<Item = &'a TimetableId>,
{
    let mut tree = CampusTree::new();
    let unique: BTreeSet<&TimetableId> = ids
        .into_iter()
        .filter(|id| !is_tutorial(id.as_str()))
        .collect();
    for id in unique {
        let campus = campus_of_timetable_id(id.as_str());
        let label = stream_label_of_timetable_id(id.as_str());
        match label.parse() {
            Ok(stream) => tree.push(campus, stream, id.clone()),
            Err(_) => {
                debug!(timetable_id = %id, stream = %label, "stream outside universe, skipped");
            }
        }
    }
    tree
}

fn is_tutorial(id: &str) -> bool {
    id.to_lowercase().contains("tutorial")
}

#[cfg(test)]
mod tests {
    use enrolsync_model::{Campus, Stream};

    use super::*;

    fn ids(values: &[&str]) -> Vec<TimetableId> {
        values
            .iter()
            .map(|value| TimetableId::new(*value).unwrap())
            .collect()
    }

    #[test]
    fn tutorials_are_excluded_any_case() {
        let input = ids(&[
            "T2 WA Stream1 Group A",
            "SYD Stream2 Tutorial B",
            "SYD Stream1 TUTORIAL C",
            "TAS tutorial Stream1",
        ]);
        let tree = build_campus_tree(&input);
        assert_eq!(tree.len(), 1);
        for (_, _, id) in tree.iter() {
            assert!(!id.as_str().to_lowercase().contains("tutorial"));
        }
    }

    #[test]
    fn duplicates_collapse_to_one_entry() {
        let input = ids(&["T2 WA Stream1 Group A", "T2 WA Stream1 Group A"]);
        let tree = build_campus_tree(&input);
        assert_eq!(tree.bucket(Campus::Wa, Stream::Stream1).len(), 1);
    }

    #[test]
    fn entries_land_in_classified_buckets() {
        let input = ids(&[
            "T2 WA Stream2 Group A",
            "SYD Stream1 Group B",
            "Group C TAS Stream1",
            "No markers at all",
        ]);
        let tree = build_campus_tree(&input);
        assert_eq!(tree.bucket(Campus::Wa, Stream::Stream2).len(), 1);
        assert_eq!(tree.bucket(Campus::Tas, Stream::Stream1).len(), 1);
        // Default campus and stream.
        assert_eq!(tree.bucket(Campus::Syd, Stream::Stream1).len(), 2);
    }

    #[test]
    fn out_of_universe_stream_is_skipped() {
        let input = ids(&["T2 WA Stream 3 Group A", "T2 WA Stream 1 Group B"]);
        let tree = build_campus_tree(&input);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.bucket(Campus::Wa, Stream::Stream1).len(), 1);
    }

    #[test]
    fn empty_buckets_remain_present() {
        let tree = build_campus_tree(&ids(&["T2 WA Stream1 Group A"]));
        assert!(tree.bucket(Campus::Tas, Stream::Stream2).is_empty());
    }
}
