// src/history/mod.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use glob::glob;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    fs::{self, File},
    io::BufWriter,
    path::PathBuf,
};

/// One recorded import: which file was taken from the inbox, which RFP it
/// fed, and how many records the store accepted from it.
#[derive(Debug, Serialize, Deserialize)]
pub struct ImportEvent {
    pub file_stem: String,
    pub rfp_name: String,
    pub records_added: usize,
    pub event_time: DateTime<Utc>,
}

/// Import bookkeeping backed by tiny per-event JSON files, one per import,
/// named `<stem>_imported_<ts_micros>.json`. Scanning the directory yields
/// the set of already-imported file stems so re-runs skip them.
pub struct ImportHistory {
    history_dir: PathBuf,
}

impl ImportHistory {
    /// Construct a history store at `history_dir`, creating it if needed.
    pub fn new(history_dir: impl Into<PathBuf>) -> Result<Self> {
        let history_dir = history_dir.into();
        fs::create_dir_all(&history_dir)
            .with_context(|| format!("creating history directory {}", history_dir.display()))?;
        Ok(Self { history_dir })
    }

    /// Record that `file_stem` was imported into `rfp_name`.
    pub fn record_imported(
        &self,
        file_stem: &str,
        rfp_name: &str,
        records_added: usize,
    ) -> Result<()> {
        let event = ImportEvent {
            file_stem: file_stem.to_string(),
            rfp_name: rfp_name.to_string(),
            records_added,
            event_time: Utc::now(),
        };
        let ts = event.event_time.timestamp_micros();
        let path = self
            .history_dir
            .join(format!("{}_imported_{}.json", file_stem, ts));
        let file = File::create(&path)
            .with_context(|| format!("creating history file {}", path.display()))?;
        serde_json::to_writer(BufWriter::new(file), &event)
            .with_context(|| format!("writing history event to {}", path.display()))?;
        Ok(())
    }

    /// All file stems with at least one recorded import, from filenames
    /// alone (no file contents are read).
    pub fn load_imported(&self) -> Result<HashSet<String>> {
        let mut set = HashSet::new();
        let pattern = format!("{}/*_imported_*.json", self.history_dir.display());
        for entry in glob(&pattern).context("invalid glob pattern for import history")? {
            let path = match entry {
                Ok(p) => p,
                Err(_) => continue,
            };
            if let Some(fname) = path.file_stem().and_then(|s| s.to_str()) {
                // fname = "<stem>_imported_<ts>"
                if let Some(idx) = fname.rfind("_imported_") {
                    set.insert(fname[..idx].to_string());
                }
            }
        }
        Ok(set)
    }
}
