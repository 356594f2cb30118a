use rfpingest::{
    ingest,
    normalize::{normalize_batch, BatchAttrs, ColumnAliases},
};
use std::{env, path::Path, process::exit};

/// Dry-run validation of one requirement spreadsheet: parses, validates
/// and normalizes, then prints the records without persisting anything.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: {} <SHEET_FILE> <RFP_NAME> [UPLOADED_BY]", args[0]);
        exit(1);
    }
    let path = Path::new(&args[1]);
    let attrs = BatchAttrs {
        rfp_name: args[2].clone(),
        uploaded_by: args.get(3).cloned().unwrap_or_else(|| "dry-run".to_string()),
    };

    let sheet = match ingest::load_sheet(path) {
        Ok(sheet) => sheet,
        Err(e) => {
            eprintln!("Error reading {}: {:#}", path.display(), e);
            exit(1);
        }
    };
    println!(
        "Parsed {}: {} columns, {} rows",
        path.display(),
        sheet.headers.len(),
        sheet.rows.len()
    );

    match normalize_batch(&sheet, &attrs, &ColumnAliases::default()) {
        Ok(records) => {
            println!("Validation passed: {} records", records.len());
            for rec in &records {
                println!(
                    "  {}  [{}]  {}",
                    rec.requirement_id, rec.category, rec.requirement
                );
            }
        }
        Err(e) => {
            eprintln!("Validation failed: {}", e);
            exit(1);
        }
    }
}
