// src/store/mod.rs

use serde::{Deserialize, Serialize};

use crate::normalize::CanonicalRequirement;

pub mod api;
pub mod file;

pub use api::ApiStore;
pub use file::JsonFileStore;

/// Wire shape of one persisted batch. `replace_existing` is the caller's
/// intent flag, passed through from the upload untouched; the store alone
/// decides what it means for previously stored records.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub records: Vec<CanonicalRequirement>,
    pub replace_existing: bool,
}

/// What a store reports back after an upsert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub records_added: usize,
}
