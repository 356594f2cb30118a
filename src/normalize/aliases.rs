use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered header-alias tables for the semantic columns of a requirement
/// sheet. Order is priority: during row resolution the first alias whose
/// column is present wins. The union of all tables is the closed set of
/// headers an upload may contain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColumnAliases {
    pub requirement: Vec<String>,
    pub category: Vec<String>,
    pub response: Vec<String>,
    pub rating: Vec<String>,
}

impl Default for ColumnAliases {
    fn default() -> Self {
        Self {
            requirement: vec![
                "Requirement".into(),
                "Requirements".into(),
                "requirement".into(),
            ],
            category: vec!["Category".into(), "category".into()],
            response: vec![
                "Final Response".into(),
                "Response".into(),
                "final_response".into(),
            ],
            rating: vec!["Rating".into(), "rating".into()],
        }
    }
}

impl ColumnAliases {
    /// Every header name permitted to appear anywhere in an upload.
    pub fn allowed(&self) -> HashSet<&str> {
        self.requirement
            .iter()
            .chain(&self.category)
            .chain(&self.response)
            .chain(&self.rating)
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allow_list_covers_every_table() {
        let aliases = ColumnAliases::default();
        let allowed = aliases.allowed();
        assert!(allowed.contains("Requirement"));
        assert!(allowed.contains("Category"));
        assert!(allowed.contains("Final Response"));
        assert!(allowed.contains("Rating"));
        assert!(!allowed.contains("Extra"));
    }

    #[test]
    fn yaml_override_replaces_defaults() {
        let yaml = "requirement:\n  - Question\ncategory:\n  - Area\n";
        let aliases: ColumnAliases = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(aliases.requirement, vec!["Question"]);
        assert_eq!(aliases.category, vec!["Area"]);
        // untouched tables keep their defaults
        assert_eq!(aliases.rating, ColumnAliases::default().rating);
    }
}
