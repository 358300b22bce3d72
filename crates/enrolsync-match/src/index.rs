//! Module index: shortname -> descriptive text.

use std::collections::BTreeMap;

use enrolsync_model::{Module, ShortName};

/// Lookup from module shortname to its descriptive text.
///
/// Duplicate shortnames resolve last-wins, matching the source table's
/// own convention of later rows superseding earlier ones. Iteration is
/// deterministic (sorted by shortname), which fixes the emission order
/// of the mapping generator.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    entries: BTreeMap<ShortName, String>,
}

impl ModuleIndex {
    pub fn build<I>(modules: I) -> Self
    where
        I: IntoIterator<Item = Module>,
    {
        let mut entries = BTreeMap::new();
        for module in modules {
            entries.insert(module.shortname, module.fullname);
        }
        Self { entries }
    }

    pub fn get(&self, shortname: &ShortName) -> Option<&str> {
        self.entries.get(shortname).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ShortName, &str)> {
        self.entries
            .iter()
            .map(|(shortname, fullname)| (shortname, fullname.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(shortname: &str, fullname: &str) -> Module {
        Module {
            shortname: ShortName::new(shortname).unwrap(),
            fullname: fullname.to_string(),
        }
    }

    #[test]
    fn duplicate_shortname_is_last_wins() {
        let index = ModuleIndex::build(vec![
            module("2025 T2 TMGT601", "first description"),
            module("2025 T2 TMGT601", "second description"),
        ]);
        assert_eq!(index.len(), 1);
        let shortname = ShortName::new("2025 T2 TMGT601").unwrap();
        assert_eq!(index.get(&shortname), Some("second description"));
    }

    #[test]
    fn iteration_is_sorted_by_shortname() {
        let index = ModuleIndex::build(vec![module("B", "b"), module("A", "a")]);
        let keys: Vec<&str> = index.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }
}
