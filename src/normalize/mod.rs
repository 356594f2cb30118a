// src/normalize/mod.rs

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use crate::ingest::RawSheet;

pub mod aliases;
pub mod error;
pub mod types;

pub use aliases::ColumnAliases;
pub use error::ValidationError;
pub use types::{BatchAttrs, CanonicalRequirement};

/// Default category for rows whose category cell is absent or blank.
pub const DEFAULT_CATEGORY: &str = "Uncategorized";

static SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("slug regex"));

/// Lowercase `name` and collapse every non-alphanumeric run into a single
/// underscore: `"Acme RFP"` → `"acme_rfp"`.
pub fn slugify(name: &str) -> String {
    let lower = name.to_lowercase();
    SLUG_RE
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}

/// Validate and normalize one import batch.
///
/// Pure and deterministic: the same input always yields the same output or
/// the same error, and the records carry no timestamps or randomness.
/// Validation is all-or-nothing; no partial record set is ever returned.
///
/// Header validation looks only at the sheet's header row (the schema is
/// assumed uniform across rows). Per-row alias resolution is by column
/// *presence*: a present-but-empty cell under a higher-priority alias does
/// not fall through to a later alias, only the final blank check rejects
/// it. Category is the one tolerated absence, defaulting per row.
pub fn normalize_batch(
    sheet: &RawSheet,
    attrs: &BatchAttrs,
    aliases: &ColumnAliases,
) -> Result<Vec<CanonicalRequirement>, ValidationError> {
    if sheet.rows.is_empty() {
        return Err(ValidationError::EmptyFile);
    }

    let headers: HashSet<&str> = sheet.headers.iter().map(String::as_str).collect();
    if !aliases
        .requirement
        .iter()
        .any(|a| headers.contains(a.as_str()))
    {
        return Err(ValidationError::MissingColumn("Requirement".into()));
    }

    let allowed = aliases.allowed();
    let unknown: Vec<String> = sheet
        .headers
        .iter()
        .filter(|h| !h.is_empty() && !allowed.contains(h.as_str()))
        .cloned()
        .collect();
    if !unknown.is_empty() {
        return Err(ValidationError::UnrecognizedColumns(unknown));
    }

    let slug = slugify(&attrs.rfp_name);
    let mut records = Vec::with_capacity(sheet.rows.len());

    for (idx, row) in sheet.rows.iter().enumerate() {
        let requirement = aliases
            .requirement
            .iter()
            .find_map(|a| row.get(a))
            .map(|s| s.trim())
            .unwrap_or("");
        if requirement.is_empty() {
            return Err(ValidationError::EmptyRequirement { row: idx });
        }

        let category = aliases
            .category
            .iter()
            .find_map(|a| row.get(a))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);

        let final_response = aliases
            .response
            .iter()
            .find_map(|a| row.get(a))
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let rating = aliases
            .rating
            .iter()
            .find_map(|a| row.get(a))
            .and_then(|s| s.trim().parse::<f64>().ok());

        records.push(CanonicalRequirement {
            requirement_id: format!("{}_{:03}", slug, idx + 1),
            category: category.to_string(),
            requirement: requirement.to_string(),
            final_response,
            rating,
            rfp_name: attrs.rfp_name.clone(),
            uploaded_by: attrs.uploaded_by.clone(),
        });
    }

    debug!(
        rfp = %attrs.rfp_name,
        records = records.len(),
        "normalized import batch"
    );
    Ok(records)
}
