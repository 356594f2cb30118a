use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::path::Path;
use tracing::debug;

use super::{RawRow, RawSheet};

/// Parse a CSV file into a `RawSheet`. The first record is the header row.
/// CSV has no notion of an absent cell, so every cell under a header is
/// present (possibly empty); short records simply stop early and leave the
/// remaining headers absent for that row.
pub fn load(path: &Path) -> Result<RawSheet> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening CSV file {}", path.display()))?;

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading CSV headers from {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;

        // Fully blank lines are an artifact of hand-edited files, not data.
        if record.iter().all(|c| c.trim().is_empty()) {
            continue;
        }

        let mut row = RawRow::new();
        for (header, cell) in headers.iter().zip(record.iter()) {
            if header.is_empty() {
                continue;
            }
            row.insert(header.clone(), cell.to_string());
        }
        rows.push(row);
    }

    debug!(file = %path.display(), rows = rows.len(), "parsed CSV sheet");
    Ok(RawSheet { headers, rows })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_headers_and_rows_in_order() -> Result<()> {
        let mut tmp = NamedTempFile::with_suffix(".csv")?;
        writeln!(tmp, "Category,Requirement")?;
        writeln!(tmp, "Technical,Support SSO")?;
        writeln!(tmp, "Reporting,Export to PDF")?;

        let sheet = load(tmp.path())?;
        assert_eq!(sheet.headers, vec!["Category", "Requirement"]);
        assert_eq!(sheet.rows.len(), 2);
        assert_eq!(sheet.rows[0]["Requirement"], "Support SSO");
        assert_eq!(sheet.rows[1]["Category"], "Reporting");
        Ok(())
    }

    #[test]
    fn empty_cells_are_present_but_empty() -> Result<()> {
        let mut tmp = NamedTempFile::with_suffix(".csv")?;
        writeln!(tmp, "Category,Requirement")?;
        writeln!(tmp, ",Support SSO")?;

        let sheet = load(tmp.path())?;
        // present key with empty value, not an absent key
        assert_eq!(sheet.rows[0].get("Category").map(String::as_str), Some(""));
        Ok(())
    }

    #[test]
    fn skips_fully_blank_lines() -> Result<()> {
        let mut tmp = NamedTempFile::with_suffix(".csv")?;
        writeln!(tmp, "Requirement")?;
        writeln!(tmp, "Support SSO")?;
        writeln!(tmp)?;
        writeln!(tmp, "Export to PDF")?;

        let sheet = load(tmp.path())?;
        assert_eq!(sheet.rows.len(), 2);
        Ok(())
    }

    #[test]
    fn short_records_leave_trailing_headers_absent() -> Result<()> {
        let mut tmp = NamedTempFile::with_suffix(".csv")?;
        writeln!(tmp, "Requirement,Rating")?;
        writeln!(tmp, "Support SSO")?;

        let sheet = load(tmp.path())?;
        assert!(sheet.rows[0].get("Rating").is_none());
        Ok(())
    }
}
