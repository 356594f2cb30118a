// src/ingest/mod.rs

use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::Path;

pub mod sheet_csv;
pub mod sheet_xlsx;

/// One parsed spreadsheet row: header → cell text. A cell that does not
/// exist in the source row is an absent key, never an empty string, so the
/// normalizer can tell "column not present" apart from "value empty".
pub type RawRow = HashMap<String, String>;

/// A fully materialized spreadsheet: the header row plus every data row, in
/// source order.
#[derive(Debug)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

/// Load `path` into a `RawSheet`, dispatching on the file extension.
pub fn load_sheet(path: impl AsRef<Path>) -> Result<RawSheet> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();

    match ext.as_str() {
        "csv" => sheet_csv::load(path),
        "xlsx" | "xlsm" | "xls" => sheet_xlsx::load(path),
        other => bail!("unsupported spreadsheet extension `{}`", other),
    }
}

/// True if `path` looks like a spreadsheet this pipeline can ingest.
pub fn is_supported(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .as_deref(),
        Some("csv") | Some("xlsx") | Some("xlsm") | Some("xls")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{normalize_batch, BatchAttrs, ColumnAliases};
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn rejects_unsupported_extensions() {
        assert!(load_sheet(Path::new("requirements.pdf")).is_err());
        assert!(!is_supported(Path::new("requirements.pdf")));
        assert!(is_supported(Path::new("requirements.XLSX")));
    }

    #[test]
    fn csv_file_flows_through_to_normalized_records() -> Result<()> {
        let mut tmp = NamedTempFile::with_suffix(".csv")?;
        writeln!(tmp, "Category,Requirement")?;
        writeln!(tmp, "Technical,Support SSO")?;
        writeln!(tmp, ",Export to PDF")?;

        let sheet = load_sheet(tmp.path())?;
        let attrs = BatchAttrs {
            rfp_name: "Acme RFP".into(),
            uploaded_by: "Test User".into(),
        };
        let records = normalize_batch(&sheet, &attrs, &ColumnAliases::default())
            .map_err(anyhow::Error::from)?;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].requirement_id, "acme_rfp_001");
        assert_eq!(records[1].requirement_id, "acme_rfp_002");
        assert_eq!(records[1].category, "Uncategorized");
        Ok(())
    }
}
