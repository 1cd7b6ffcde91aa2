use dotenvy::dotenv;
use metraj::{
    config::{self, database},
    core::{
        catalog::CatalogGate,
        derivation::derive_updates,
        export, green_book,
        line_items::{MergeMode, apply_derived_updates},
        persistence,
        report::{self, format_lira},
        subcontractor,
    },
    errors::{Error, Result},
};
use std::{env, path::PathBuf, sync::Arc};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: metraj <project.json> [--csv <out.csv>] [--save <out.json>]";

/// Command line arguments.
struct Args {
    project: PathBuf,
    csv: Option<PathBuf>,
    save: Option<PathBuf>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Args> {
    let usage = || Error::Config {
        message: USAGE.to_string(),
    };

    let project = args.next().map(PathBuf::from).ok_or_else(usage)?;
    let mut csv = None;
    let mut save = None;
    while let Some(flag) = args.next() {
        let value = args.next().map(PathBuf::from).ok_or_else(usage)?;
        match flag.as_str() {
            "--csv" => csv = Some(value),
            "--save" => save = Some(value),
            _ => return Err(usage()),
        }
    }

    Ok(Args { project, csv, save })
}

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let args = parse_args(env::args().skip(1)).inspect_err(|e| error!("{e}"))?;

    // 3. Load configuration and start the catalog in the background
    let app_config = config::load_default_config()?;
    let gate = Arc::new(CatalogGate::new());
    let loader = {
        let gate = Arc::clone(&gate);
        let url = database::get_database_url();
        let seeds = app_config.catalog.clone();
        tokio::spawn(async move { gate.load(&url, &seeds).await.map(|_| ()) })
    };

    // 4. Restore the project and fold in quantities derived from openings
    let mut project = persistence::load_from_file(&args.project)
        .inspect_err(|e| error!("Failed to load {}: {}", args.project.display(), e))?;

    let updates = derive_updates(&project.doors, &project.windows, &app_config.derivation);
    let merge = apply_derived_updates(&mut project, &updates, MergeMode::Replace);
    info!(
        "Derived quantities: {} applied, {} without a matching item",
        merge.applied.len(),
        merge.skipped.len()
    );

    // 5. Report
    let summary = report::generate_dashboard(&project);
    for line in report::format_dashboard(&summary).lines() {
        info!("{line}");
    }
    for line in report::over_limit_lines(&summary.comparison) {
        warn!("{line}");
    }

    for ledger in subcontractor::all_ledgers(&project) {
        info!(
            "{}: iş {} / ödenen {} / bakiye {} ({})",
            ledger.name,
            format_lira(ledger.total_work),
            format_lira(ledger.total_paid),
            format_lira(ledger.balance),
            ledger.status.label()
        );
    }

    // 6. Check catalog items against the loaded catalog
    loader.await.map_err(|e| Error::Config {
        message: format!("Catalog loader stopped: {e}"),
    })??;
    let catalog = gate.get()?;
    info!("Catalog ready with {} entries", catalog.count().await?);
    for (list, item) in project.all_items().filter(|(_, item)| !item.is_manual()) {
        if catalog.find_by_code(&item.code).await?.is_none() {
            debug!("{list} item {} has no catalog entry", item.code);
        }
    }

    // 7. Optional outputs
    if let Some(path) = &args.csv {
        let rows = green_book::assemble(&project, &app_config.derivation);
        export::write_green_book(path, &rows)?;
    }
    if let Some(path) = &args.save {
        persistence::save_to_file(&project, path)?;
    }

    Ok(())
}
