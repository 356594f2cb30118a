// src/fitment/mod.rs

use serde::{Deserialize, Serialize};
use tracing::warn;

/// How well the product covers one requirement, as recorded by the
/// knowledge-graph analysis of the stored responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupportLevel {
    FullySupported,
    PartiallySupported,
    NotSupported,
}

impl SupportLevel {
    /// Weight used by the aggregate fitment percentage.
    pub fn weight(self) -> f64 {
        match self {
            SupportLevel::FullySupported => 1.0,
            SupportLevel::PartiallySupported => 0.5,
            SupportLevel::NotSupported => 0.0,
        }
    }

    /// Parse the status strings the analysis pipeline stores
    /// (`fully_available`, `partially_available`, `not_available`).
    pub fn parse(status: &str) -> Option<Self> {
        match status.trim().to_lowercase().as_str() {
            "fully_available" | "fully_supported" => Some(SupportLevel::FullySupported),
            "partially_available" | "partially_supported" => Some(SupportLevel::PartiallySupported),
            "not_available" | "not_supported" => Some(SupportLevel::NotSupported),
            _ => None,
        }
    }
}

/// A feature or gap list as stored: either a real JSON array or a string
/// holding encoded JSON. Unparseable strings degrade to an empty list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ItemList {
    Items(Vec<String>),
    Encoded(String),
}

impl Default for ItemList {
    fn default() -> Self {
        ItemList::Items(Vec::new())
    }
}

impl ItemList {
    pub fn into_vec(self) -> Vec<String> {
        match self {
            ItemList::Items(items) => items,
            ItemList::Encoded(raw) => {
                if raw.trim().is_empty() {
                    Vec::new()
                } else {
                    serde_json::from_str(&raw).unwrap_or_default()
                }
            }
        }
    }
}

/// Score one requirement between 0.0 and 1.0 from its analysis status plus
/// the available-feature and gap/customization lists.
///
/// Fully supported starts at 1.0 and loses 0.05 per listed gap, capped at
/// 0.1 off. Not supported starts at 0.0 and gains 0.1 per listed feature,
/// capped at 0.3. Partial sits at 0.5, nudged by the feature-to-gap ratio
/// into [0.3, 0.7] and rounded to two decimals. An unrecognized status
/// scores 0.5.
pub fn requirement_score(status: &str, features: &[String], gaps: &[String]) -> f64 {
    match SupportLevel::parse(status) {
        Some(SupportLevel::FullySupported) => {
            if gaps.is_empty() {
                return 1.0;
            }
            let gap_penalty = (gaps.len() as f64 * 0.05).min(0.1);
            (1.0 - gap_penalty).max(0.9)
        }
        Some(SupportLevel::NotSupported) => {
            if features.is_empty() {
                return 0.0;
            }
            (features.len() as f64 * 0.1).min(0.3)
        }
        Some(SupportLevel::PartiallySupported) => {
            let total = features.len() + gaps.len();
            if total == 0 {
                return 0.5;
            }
            let feature_ratio = features.len() as f64 / total as f64;
            let adjustment = (feature_ratio - 0.5) * 0.4;
            let score = (0.5 + adjustment).clamp(0.3, 0.7);
            (score * 100.0).round() / 100.0
        }
        None => {
            warn!(status, "unknown analysis status, defaulting score to 0.5");
            0.5
        }
    }
}

/// Aggregate fitment over one RFP's analyzed requirements.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct FitmentSummary {
    pub total: usize,
    pub fully_supported: usize,
    pub partially_supported: usize,
    pub not_supported: usize,
    /// (fully × 1.0 + partially × 0.5) ÷ total, as a percentage.
    pub score_pct: f64,
}

pub fn summarize(levels: impl IntoIterator<Item = SupportLevel>) -> FitmentSummary {
    let mut summary = FitmentSummary::default();
    let mut weighted = 0.0;
    for level in levels {
        summary.total += 1;
        weighted += level.weight();
        match level {
            SupportLevel::FullySupported => summary.fully_supported += 1,
            SupportLevel::PartiallySupported => summary.partially_supported += 1,
            SupportLevel::NotSupported => summary.not_supported += 1,
        }
    }
    if summary.total > 0 {
        summary.score_pct = weighted / summary.total as f64 * 100.0;
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn fully_supported_without_gaps_is_perfect() {
        assert_eq!(requirement_score("fully_available", &[], &[]), 1.0);
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn fully_supported_gap_penalty_is_floored() {
        assert_close(
            requirement_score("fully_available", &[], &items(&["sso config"])),
            0.95,
        );
        assert_close(
            requirement_score("fully_available", &[], &items(&["a", "b", "c", "d"])),
            0.9,
        );
    }

    #[test]
    fn not_supported_feature_credit_is_capped() {
        assert_eq!(requirement_score("not_available", &[], &[]), 0.0);
        assert_close(
            requirement_score("not_available", &items(&["a", "b"]), &[]),
            0.2,
        );
        assert_close(
            requirement_score("not_available", &items(&["a", "b", "c", "d", "e"]), &[]),
            0.3,
        );
    }

    #[test]
    fn partial_score_follows_feature_ratio() {
        assert_eq!(requirement_score("partially_available", &[], &[]), 0.5);
        // 2 features / 1 gap: 0.5 + (2/3 - 0.5) * 0.4, rounded to 0.57
        assert_close(
            requirement_score("partially_available", &items(&["a", "b"]), &items(&["c"])),
            0.57,
        );
        // all gaps clamps at the lower bound
        assert_close(
            requirement_score(
                "partially_available",
                &[],
                &items(&["a", "b", "c", "d", "e", "f"]),
            ),
            0.3,
        );
    }

    #[test]
    fn unknown_status_defaults_to_half() {
        assert_eq!(requirement_score("tbd", &[], &[]), 0.5);
    }

    #[test]
    fn summary_weights_levels() {
        let summary = summarize([
            SupportLevel::FullySupported,
            SupportLevel::FullySupported,
            SupportLevel::PartiallySupported,
            SupportLevel::NotSupported,
        ]);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.fully_supported, 2);
        assert_eq!(summary.partially_supported, 1);
        assert_eq!(summary.not_supported, 1);
        assert!((summary.score_pct - 62.5).abs() < f64::EPSILON);
    }

    #[test]
    fn summary_of_nothing_is_zero() {
        assert_eq!(summarize([]), FitmentSummary::default());
    }

    #[test]
    fn encoded_item_lists_degrade_gracefully() {
        let list: ItemList = serde_json::from_str(r#""[\"a\",\"b\"]""#).unwrap();
        assert_eq!(list.into_vec(), items(&["a", "b"]));
        let garbage: ItemList = serde_json::from_str(r#""not json""#).unwrap();
        assert!(garbage.into_vec().is_empty());
    }
}
