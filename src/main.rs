use std::path::PathBuf;

use anyhow::{bail, Context};
use apod_gallery::{
    apod::ApodClient,
    config::{Config, API_KEY_ENV},
    facts::{self, FactRotator},
    media::MediaInfo,
    page::Page,
    range::{self, parse_date},
};
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Fetch NASA's Astronomy Picture of the Day for a date range and write it
/// out as an HTML gallery.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// First day, YYYY-MM-DD (default: a week before --end)
    #[arg(long, value_parser = parse_date)]
    start: Option<NaiveDate>,

    /// Last day, YYYY-MM-DD (default: today)
    #[arg(long, value_parser = parse_date)]
    end: Option<NaiveDate>,

    /// Where to write the gallery
    #[arg(short, long, default_value = "apod.html")]
    out: PathBuf,

    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    api_key: Option<String>,

    /// Config file (default: apod.toml in the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print the link that opens this card's modal in the exported file
    #[arg(long)]
    open: Option<usize>,

    /// Print the items instead of writing HTML
    #[arg(long)]
    list: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match args.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };

    let client = ApodClient::with_base_url(
        config.api_key(args.api_key.as_deref()),
        config.base_url(),
    )?;

    if client.uses_demo_key() {
        tracing::info!("api key: using DEMO_KEY");
    } else {
        tracing::info!("api key: using custom key");
    }

    let today = range::today();
    let mut page = Page::new(today, facts::random_fact());

    if let Some(end) = args.end {
        page.set_end(Some(end));

        if args.start.is_none() {
            page.set_start(Some(range::DateRange::default_for(end).start()));
        }
    }
    if let Some(start) = args.start {
        page.set_start(Some(start));
    }

    if let Ok(range) = range::validate(page.start(), page.end()) {
        range.within_bounds(today)?;
    }

    let rotator = FactRotator::spawn(config.fact_interval());
    let mut fact_rx = rotator.subscribe();

    {
        let fetch = page.fetch(&client);
        tokio::pin!(fetch);

        loop {
            tokio::select! {
                _ = &mut fetch => break,
                Ok(()) = fact_rx.changed() => {
                    tracing::info!("did you know? {}", *fact_rx.borrow_and_update());
                }
            }
        }
    }

    page.set_fact(rotator.current());
    rotator.cancel();

    if !page.range_error().is_empty() {
        bail!("{}", page.range_error());
    }

    if args.list {
        for item in page.items() {
            let info = MediaInfo::classify(item);
            println!("{}  {:<7}  {}", item.date, info.label(), item.title);
        }

        return Ok(());
    }

    if let Some(idx) = args.open {
        if !page.click_card(idx) {
            tracing::warn!("no card {idx}; exporting without a modal");
        }
    }

    tokio::fs::write(&args.out, page.export())
        .await
        .with_context(|| format!("write {}", args.out.display()))?;

    tracing::info!("wrote {} items to {}", page.items().len(), args.out.display());

    if let Some(anchor) = page.modal_anchor() {
        tracing::info!("modal: {}#{anchor}", args.out.display());
    }

    Ok(())
}
