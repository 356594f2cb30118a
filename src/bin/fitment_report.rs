use rfpingest::fitment::{requirement_score, summarize, ItemList, SupportLevel};
use serde::Deserialize;
use std::{env, fs::File, io::BufReader, path::Path, process::exit};

/// One analyzed requirement as exported from the response database.
#[derive(Deserialize)]
struct AnalyzedRequirement {
    #[serde(default)]
    requirement_id: Option<String>,
    ekg_status: String,
    #[serde(default)]
    available_features: ItemList,
    #[serde(default)]
    gaps_customizations: ItemList,
}

/// Print per-requirement fitment scores and the aggregate summary for a
/// JSON export of analyzed requirements.
fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <ANALYSIS_JSON>", args[0]);
        exit(1);
    }
    if let Err(e) = report(Path::new(&args[1])) {
        eprintln!("Error: {:#}", e);
        exit(1);
    }
}

fn report(path: &Path) -> anyhow::Result<()> {
    let file = File::open(path)?;
    let rows: Vec<AnalyzedRequirement> = serde_json::from_reader(BufReader::new(file))?;

    println!("=== Fitment report: {} ===", path.display());
    let mut levels = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let features = row.available_features.into_vec();
        let gaps = row.gaps_customizations.into_vec();
        let score = requirement_score(&row.ekg_status, &features, &gaps);
        let id = row
            .requirement_id
            .unwrap_or_else(|| format!("row {}", idx));
        println!(
            "{:<24} {:<22} features={:<3} gaps={:<3} score={:.2}",
            id,
            row.ekg_status,
            features.len(),
            gaps.len(),
            score
        );
        if let Some(level) = SupportLevel::parse(&row.ekg_status) {
            levels.push(level);
        }
    }

    let summary = summarize(levels);
    println!();
    println!("Requirements analyzed: {}", summary.total);
    println!("Fully supported:       {}", summary.fully_supported);
    println!("Partially supported:   {}", summary.partially_supported);
    println!("Not supported:         {}", summary.not_supported);
    println!("Fitment score:         {:.1}%", summary.score_pct);
    Ok(())
}
