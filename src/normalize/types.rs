// src/normalize/types.rs

use serde::{Deserialize, Serialize};

/// Batch-wide attributes supplied once per upload and copied into every
/// record. Threaded through the normalizer explicitly, never held as
/// ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchAttrs {
    pub rfp_name: String,
    pub uploaded_by: String,
}

/// One normalized requirement, the canonical output unit of an import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRequirement {
    /// `<slugified rfp name>_<NNN>`, 1-based and zero-padded to 3 digits,
    /// strictly increasing in row order within a batch.
    pub requirement_id: String,
    pub category: String,
    pub requirement: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_response: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    pub rfp_name: String,
    pub uploaded_by: String,
}
