use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use discsort::{DiscogsClientBuilder, FileTagReader, SortReport, SorterBuilder};
use shared::library::RouteOutcome;
use tracing::{error, info};

mod config;

use config::AppConfig;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("Usage: discsort \"filename\"");
        return ExitCode::from(2);
    };

    match run(&path).await {
        Ok(report) => {
            println!("{}", summary(&report));
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(path: &Path) -> Result<SortReport> {
    let config = AppConfig::from_env().context("Failed to load configuration")?;

    let mut discogs = DiscogsClientBuilder::new()
        .token(&config.discogs_token)
        .page_size(config.discogs_page_size);
    if let Some(url) = &config.discogs_base_url {
        discogs = discogs.base_url(url);
    }
    if let Some(user_agent) = &config.discogs_user_agent {
        discogs = discogs.user_agent(user_agent);
    }
    let discogs = discogs.build().context("Failed to build Discogs client")?;

    let sorter = SorterBuilder::new()
        .catalog(discogs)
        .tag_reader(FileTagReader::new())
        .roots(config.roots)
        .build()
        .map_err(anyhow::Error::msg)?;

    info!("Sorting {}", path.display());
    sorter
        .sort_file(path)
        .await
        .with_context(|| format!("Failed to sort {}", path.display()))
}

fn summary(report: &SortReport) -> String {
    match &report.route {
        RouteOutcome::Sorted(to) => format!("sorted: {}", to.display()),
        RouteOutcome::Duplicate(to) => format!("duplicate: {}", to.display()),
        RouteOutcome::Review(to) => format!("review: {}", to.display()),
    }
}
