//! Headless portfolio page.
//!
//! Builds the demo page on an in-memory window, replays a scenario of
//! events against it and prints the page state after every step as JSON.
//!
//! Usage:
//!   folio [--config page.toml] [--catalog articles.json] [--script events.json]
//!
//! Without `--script` a built-in scenario is replayed.

mod scenario;

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

use folio_page::demo::demo_document;
use folio_page::{ArticleRecord, ContentCatalog, HeadlessHost, Portfolio};
use folio_types::config::PageConfig;

use scenario::Scenario;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    catalog: Option<PathBuf>,
    script: Option<PathBuf>,
}

const USAGE: &str = "usage: folio [--config page.toml] [--catalog articles.json] [--script events.json]";

fn parse_args() -> Result<Option<Args>> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(flag) = it.next() {
        let slot = match flag.as_str() {
            "--config" => &mut args.config,
            "--catalog" => &mut args.catalog,
            "--script" => &mut args.script,
            "-h" | "--help" => return Ok(None),
            other => bail!("unknown argument {other}\n{USAGE}"),
        };
        let value = it
            .next()
            .with_context(|| format!("{flag} needs a path\n{USAGE}"))?;
        *slot = Some(PathBuf::from(value));
    }
    Ok(Some(args))
}

fn load_catalog(path: Option<&PathBuf>) -> Result<ContentCatalog> {
    let Some(path) = path else {
        return Ok(ContentCatalog::builtin());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading catalog {}", path.display()))?;
    let records: Vec<ArticleRecord> = serde_json::from_str(&text)?;
    Ok(ContentCatalog::from_records(records)?)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Some(args) = parse_args()? else {
        println!("{USAGE}");
        return Ok(());
    };

    let config = match &args.config {
        Some(path) => PageConfig::load(path)?,
        None => PageConfig::default(),
    };
    let catalog = load_catalog(args.catalog.as_ref())?;
    let scenario = match &args.script {
        Some(path) => Scenario::load(path)?,
        None => Scenario::demo(),
    };
    log::info!(
        "Replaying {} steps over {} articles",
        scenario.steps.len(),
        catalog.len()
    );

    let doc = demo_document(&catalog);
    let host = HeadlessHost::fit_document(scenario.viewport_height, &doc);
    let mut page = Portfolio::new(doc, catalog, config, host);

    let reports = scenario.run(&mut page);
    page.teardown();
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
