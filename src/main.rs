use anyhow::Result;
use rfpingest::{
    config::AppConfig,
    history::ImportHistory,
    ingest,
    normalize::{normalize_batch, BatchAttrs, CanonicalRequirement},
    store::{ApiStore, JsonFileStore},
};
use std::{env, fs, path::Path, path::PathBuf};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
    info!("startup");

    std::panic::set_hook(Box::new(|info| {
        eprintln!("panic: {:?}", info);
    }));

    // ─── 2) load config & prepare dirs ───────────────────────────────
    let config_path = env::args()
        .nth(1)
        .unwrap_or_else(|| "rfpingest.yaml".to_string());
    let cfg = AppConfig::load(Path::new(&config_path))?;
    for d in [&cfg.inbox_dir, &cfg.data_dir, &cfg.history_dir] {
        fs::create_dir_all(d)?;
    }

    // ─── 3) load history to skip imported files ──────────────────────
    let history = ImportHistory::new(&cfg.history_dir)?;
    let imported = history.load_imported()?;
    info!("{} files already imported", imported.len());

    // ─── 4) discover new spreadsheets in the inbox ───────────────────
    let mut to_import: Vec<PathBuf> = fs::read_dir(&cfg.inbox_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && ingest::is_supported(p))
        .filter(|p| {
            file_stem(p)
                .map(|stem| !imported.contains(&stem))
                .unwrap_or(false)
        })
        .collect();
    to_import.sort();

    if to_import.is_empty() {
        info!("no new spreadsheets; exit");
        return Ok(());
    }
    info!("{} spreadsheets to import", to_import.len());

    let file_store = JsonFileStore::new(&cfg.data_dir)?;
    let api_store = match &cfg.api_endpoint {
        Some(base) => Some(ApiStore::new(base)?),
        None => None,
    };

    // ─── 5) import each file; a bad file fails alone ─────────────────
    for path in to_import {
        let Some(stem) = file_stem(&path) else {
            continue;
        };
        info!(file = %path.display(), "importing");

        let attrs = BatchAttrs {
            rfp_name: stem.clone(),
            uploaded_by: cfg.uploaded_by.clone(),
        };
        let aliases = cfg.aliases.clone();

        // parsing and normalization are CPU/disk bound
        let records = tokio::task::spawn_blocking({
            let path = path.clone();
            let attrs = attrs.clone();
            move || -> Result<Vec<CanonicalRequirement>> {
                let sheet = ingest::load_sheet(&path)?;
                let records = normalize_batch(&sheet, &attrs, &aliases)?;
                Ok(records)
            }
        })
        .await?;

        let records = match records {
            Ok(records) => records,
            Err(e) => {
                error!("{} rejected: {}", stem, e);
                continue;
            }
        };

        let outcome = match file_store.upsert_batch(&records, cfg.replace_existing) {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("{} failed to persist: {}", stem, e);
                continue;
            }
        };

        if let Some(api) = &api_store {
            if let Err(e) = api.upsert_batch(&records, cfg.replace_existing).await {
                error!("{} failed to upload: {}", stem, e);
                continue;
            }
        }

        history.record_imported(&stem, &attrs.rfp_name, outcome.records_added)?;
        info!(
            "{}: {} of {} records added",
            stem,
            outcome.records_added,
            records.len()
        );
    }

    info!("all done");
    Ok(())
}

fn file_stem(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}
