use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use tracing::info;

use crate::normalize::ColumnAliases;

/// Pipeline configuration, read from a YAML file. Every field has a
/// default so a missing file or a partial file both work.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory scanned for new requirement spreadsheets.
    pub inbox_dir: PathBuf,
    /// Directory holding the per-RFP JSON record files.
    pub data_dir: PathBuf,
    /// Directory holding import-history events.
    pub history_dir: PathBuf,
    /// Recorded as `uploaded_by` on every imported record.
    pub uploaded_by: String,
    /// Passed through to the store: replace an RFP's stored records
    /// instead of appending.
    pub replace_existing: bool,
    /// When set, batches are also posted to this backend root URL.
    pub api_endpoint: Option<String>,
    /// Header-alias tables; omit to accept the stock spreadsheet layout.
    pub aliases: ColumnAliases,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            inbox_dir: PathBuf::from("inbox"),
            data_dir: PathBuf::from("data"),
            history_dir: PathBuf::from("history"),
            uploaded_by: "unknown".to_string(),
            replace_existing: false,
            api_endpoint: None,
            aliases: ColumnAliases::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(config = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let cfg = AppConfig::load(Path::new("does/not/exist.yaml"))?;
        assert_eq!(cfg.inbox_dir, PathBuf::from("inbox"));
        assert!(!cfg.replace_existing);
        assert!(cfg.api_endpoint.is_none());
        Ok(())
    }

    #[test]
    fn partial_yaml_keeps_remaining_defaults() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "uploaded_by: Jamie")?;
        writeln!(tmp, "replace_existing: true")?;
        writeln!(tmp, "api_endpoint: http://localhost:8003/")?;

        let cfg = AppConfig::load(tmp.path())?;
        assert_eq!(cfg.uploaded_by, "Jamie");
        assert!(cfg.replace_existing);
        assert_eq!(cfg.api_endpoint.as_deref(), Some("http://localhost:8003/"));
        assert_eq!(cfg.history_dir, PathBuf::from("history"));
        assert_eq!(cfg.aliases, ColumnAliases::default());
        Ok(())
    }
}
