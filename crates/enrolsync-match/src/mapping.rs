//! Mapping generation: correlate modules with timetable identifiers.

use tracing::debug;

use enrolsync_model::{Association, CampusTree};

use crate::classify::{module_campuses, module_stream};
use crate::extract::extract_codes;
use crate::index::ModuleIndex;

/// Correlate every indexed module with the campus tree.
///
/// For each module: extract its course codes (no codes means the module
/// is unmappable and skipped), resolve campus set and stream, then scan
/// the matching tree buckets for identifiers containing any extracted
/// code as a substring. Fan-out both ways is expected and preserved;
/// nothing is deduplicated here. Emission order is module-index
/// iteration order, then bucket order.
///
/// Course ids are left unresolved; the remote lookup fills them in
/// later.
pub fn generate_mapping(tree: &CampusTree, index: &ModuleIndex) -> Vec<Association> {
    let mut associations = Vec::new();
    for (shortname, fullname) in index.iter() {
        let codes = extract_codes(fullname);
        if codes.is_empty() {
            debug!(shortname = %shortname, "no extractable course code, module skipped");
            continue;
        }
        let campuses = module_campuses(shortname.as_str(), fullname);
        let stream = module_stream(fullname);
        for campus in campuses {
            for timetable_id in tree.bucket(campus, stream) {
                let matched = codes
                    .iter()
                    .any(|code| timetable_id.as_str().contains(code.as_str()));
                if matched {
                    associations.push(Association {
                        timetable_id: timetable_id.clone(),
                        shortname: shortname.clone(),
                        course_id: None,
                    });
                }
            }
        }
    }
    associations
}

#[cfg(test)]
mod tests {
    use enrolsync_model::{Module, ShortName, TimetableId};

    use crate::tree::build_campus_tree;

    use super::*;

    fn module(shortname: &str, fullname: &str) -> Module {
        Module {
            shortname: ShortName::new(shortname).unwrap(),
            fullname: fullname.to_string(),
        }
    }

    fn timetable(values: &[&str]) -> Vec<TimetableId> {
        values
            .iter()
            .map(|value| TimetableId::new(*value).unwrap())
            .collect()
    }

    #[test]
    fn end_to_end_scenario() {
        let ids = timetable(&["T2 WA Stream1 Group A TMGT601", "SYD Stream2 Tutorial B"]);
        let tree = build_campus_tree(&ids);
        let index =
            ModuleIndex::build(vec![module("2025 T2 TMGT601", "Business (WA) Class 1 TMGT601")]);

        let associations = generate_mapping(&tree, &index);
        assert_eq!(associations.len(), 1);
        assert_eq!(
            associations[0].timetable_id.as_str(),
            "T2 WA Stream1 Group A TMGT601"
        );
        assert_eq!(associations[0].shortname.as_str(), "2025 T2 TMGT601");
        assert_eq!(associations[0].course_id, None);
    }

    #[test]
    fn module_without_code_is_skipped() {
        let ids = timetable(&["T2 WA Stream1 Group A"]);
        let tree = build_campus_tree(&ids);
        let index = ModuleIndex::build(vec![module("2025 T2 WA", "Business (WA) Class 1")]);
        assert!(generate_mapping(&tree, &index).is_empty());
    }

    #[test]
    fn combined_codes_match_any() {
        let ids = timetable(&["SYD Stream1 DEF456 Group"]);
        let tree = build_campus_tree(&ids);
        let index = ModuleIndex::build(vec![module("2025 T2 ABC", "Joint ABC123/DEF456 (SYD)")]);
        let associations = generate_mapping(&tree, &index);
        assert_eq!(associations.len(), 1);
    }

    #[test]
    fn multi_campus_module_fans_out() {
        let ids = timetable(&[
            "T2 WA Stream1 TMGT601 Group A",
            "SYD Stream1 TMGT601 Group B",
        ]);
        let tree = build_campus_tree(&ids);
        let index = ModuleIndex::build(vec![module("2025 T2 TMGT601", "Business (SYD/WA) TMGT601")]);
        let associations = generate_mapping(&tree, &index);
        assert_eq!(associations.len(), 2);
    }

    #[test]
    fn one_identifier_can_match_many_modules() {
        let ids = timetable(&["SYD Stream1 ABC123 DEF456"]);
        let tree = build_campus_tree(&ids);
        let index = ModuleIndex::build(vec![
            module("2025 T2 ABC", "Unit ABC123 (SYD)"),
            module("2025 T2 DEF", "Unit DEF456 (SYD)"),
        ]);
        let associations = generate_mapping(&tree, &index);
        assert_eq!(associations.len(), 2);
    }

    #[test]
    fn stream_mismatch_produces_no_association() {
        let ids = timetable(&["SYD Stream2 TMGT601 Group"]);
        let tree = build_campus_tree(&ids);
        // "Class 1" resolves to Stream1, bucket has only Stream2 entries.
        let index = ModuleIndex::build(vec![module("2025 T2 TMGT601", "Unit (SYD) Class 1 TMGT601")]);
        assert!(generate_mapping(&tree, &index).is_empty());
    }
}
