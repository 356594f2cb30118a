use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

use super::UpsertOutcome;
use crate::normalize::{slugify, CanonicalRequirement};

/// Requirement storage backed by one JSON document per RFP under
/// `data_dir`. Writes go to a `.tmp` sibling first and are renamed into
/// place so a crashed run never leaves a half-written document.
pub struct JsonFileStore {
    data_dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating data directory {}", data_dir.display()))?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, rfp_name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", slugify(rfp_name)))
    }

    /// Persist one batch. With `replace_existing` the RFP's stored set is
    /// discarded and rebuilt from `records`; otherwise records whose
    /// `requirement_id` is already stored are skipped and the rest
    /// appended. Returns how many records were actually written.
    pub fn upsert_batch(
        &self,
        records: &[CanonicalRequirement],
        replace_existing: bool,
    ) -> Result<UpsertOutcome> {
        let Some(first) = records.first() else {
            return Ok(UpsertOutcome { records_added: 0 });
        };
        let path = self.path_for(&first.rfp_name);

        let mut stored: Vec<CanonicalRequirement> = if replace_existing || !path.exists() {
            Vec::new()
        } else {
            Self::read_records(&path)?
        };

        let known: HashSet<&str> = stored.iter().map(|r| r.requirement_id.as_str()).collect();
        let fresh: Vec<CanonicalRequirement> = records
            .iter()
            .filter(|r| !known.contains(r.requirement_id.as_str()))
            .cloned()
            .collect();
        let records_added = fresh.len();
        stored.extend(fresh);

        let tmp_path = path.with_extension("json.tmp");
        let tmp = File::create(&tmp_path)
            .with_context(|| format!("creating temporary file {}", tmp_path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(tmp), &stored)
            .with_context(|| format!("writing records to {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path).with_context(|| {
            format!("renaming {} to {}", tmp_path.display(), path.display())
        })?;

        info!(
            rfp = %first.rfp_name,
            added = records_added,
            total = stored.len(),
            replace = replace_existing,
            "persisted requirement batch"
        );
        Ok(UpsertOutcome { records_added })
    }

    /// All stored records for `rfp_name`, or empty if nothing was imported.
    pub fn load(&self, rfp_name: &str) -> Result<Vec<CanonicalRequirement>> {
        let path = self.path_for(rfp_name);
        if !path.exists() {
            return Ok(Vec::new());
        }
        Self::read_records(&path)
    }

    fn read_records(path: &Path) -> Result<Vec<CanonicalRequirement>> {
        let file =
            File::open(path).with_context(|| format!("opening {}", path.display()))?;
        serde_json::from_reader(std::io::BufReader::new(file))
            .with_context(|| format!("parsing stored records in {}", path.display()))
    }
}
