//! Course-code extraction from free-text module descriptions.

use std::sync::LazyLock;

use regex::Regex;

use enrolsync_model::CourseCode;

/// Two or more codes joined by `/` with nothing in between,
/// e.g. `TMGT601/ACCT602`.
static COMBINED_CODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Z]{3,4}\d{3}(?:/[A-Z]{3,4}\d{3})+").expect("combined code pattern")
});

static SINGLE_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{3,4}\d{3}").expect("single code pattern"));

/// Extract normalized course codes from a description string.
///
/// The leftmost combined group (`ABC123/DEF456/...`) wins and is split
/// into its parts; codes elsewhere in the string are ignored. With no
/// combined group, the leftmost single code is returned. No match at
/// all yields an empty vector, which downstream treats as "module not
/// mappable", not an error.
pub fn extract_codes(text: &str) -> Vec<CourseCode> {
    if let Some(found) = COMBINED_CODES.find(text) {
        return found
            .as_str()
            .split('/')
            .filter_map(|part| CourseCode::new(part).ok())
            .collect();
    }
    SINGLE_CODE
        .find(text)
        .and_then(|found| CourseCode::new(found.as_str()).ok())
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(text: &str) -> Vec<String> {
        extract_codes(text)
            .into_iter()
            .map(|code| code.as_str().to_string())
            .collect()
    }

    #[test]
    fn combined_pattern_splits_in_order() {
        assert_eq!(
            codes("Business Analytics ABC123/DEF456 (SYD)"),
            vec!["ABC123", "DEF456"]
        );
    }

    #[test]
    fn combined_pattern_takes_precedence_over_later_codes() {
        // Only the leftmost combined group is considered.
        assert_eq!(
            codes("AAA111/BBB222 and separately CCC333"),
            vec!["AAA111", "BBB222"]
        );
    }

    #[test]
    fn three_way_combined_group() {
        assert_eq!(
            codes("TMGT601/TMGT602/TMGT603 Capstone"),
            vec!["TMGT601", "TMGT602", "TMGT603"]
        );
    }

    #[test]
    fn single_code_when_no_combined_group() {
        assert_eq!(codes("Project Management XYZ789 Class 1"), vec!["XYZ789"]);
        assert_eq!(codes("ACCT601 Financial Accounting"), vec!["ACCT601"]);
    }

    #[test]
    fn four_letter_prefix_is_accepted() {
        assert_eq!(codes("TMGT601 info"), vec!["TMGT601"]);
    }

    #[test]
    fn no_token_yields_empty() {
        assert!(codes("no course code here").is_empty());
        assert!(codes("").is_empty());
        assert!(codes("lowercase abc123").is_empty());
        assert!(codes("AB123 too short").is_empty());
    }

    #[test]
    fn slash_without_second_code_falls_back_to_single() {
        assert_eq!(codes("ABC123/extra text"), vec!["ABC123"]);
    }
}
