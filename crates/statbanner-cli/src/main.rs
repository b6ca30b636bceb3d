//! Statbanner — snapshot two analytics sources and publish a profile banner.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use statbanner_core::{BannerConfig, TwitterCredentials};
use statbanner_publish::{BannerPublisher, FilePublisher, TwitterPublisher};
use statbanner_render::SvgBannerRenderer;
use statbanner_runtime::Orchestrator;
use statbanner_sources::HttpMetricsSource;
use statbanner_store::{DateKey, FsKeyValueStore, SnapshotStore};

#[derive(Parser, Debug)]
#[command(name = "statbanner", version, about = "Daily stats banner with day-over-day deltas")]
struct Cli {
    /// Data directory (snapshots live in <data-dir>/snapshots).
    #[arg(long, global = true, env = "STATBANNER_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch, snapshot, render and publish (the default).
    Run {
        /// Write the banner PNG here instead of uploading it.
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Drop snapshots outside today/yesterday and exit.
    Cleanup,
    /// List stored snapshots.
    Snapshots,
}

fn open_store(config: &BannerConfig) -> anyhow::Result<Arc<SnapshotStore>> {
    let kv = FsKeyValueStore::open(&config.data_paths.snapshots)
        .map_err(|e| anyhow::anyhow!("Failed to open snapshot store: {}", e))?;
    Ok(Arc::new(SnapshotStore::new(Arc::new(kv))))
}

async fn run(config: &BannerConfig, output: Option<PathBuf>) -> anyhow::Result<()> {
    let timeout = Duration::from_secs(config.http_timeout_secs);
    let store = open_store(config)?;
    let source = HttpMetricsSource::new(config.endpoints.clone(), timeout)?;

    let publisher: Arc<dyn BannerPublisher> = match output {
        Some(path) => Arc::new(FilePublisher::new(path)),
        None => {
            let credentials = TwitterCredentials::from_env()?;
            Arc::new(TwitterPublisher::new(credentials, timeout)?)
        }
    };

    let orchestrator = Orchestrator::new(
        store,
        Arc::new(source),
        Arc::new(SvgBannerRenderer::new()),
        publisher,
    );

    match orchestrator.run().await {
        Ok(report) => {
            info!(
                "Run complete: snapshot {} (persisted={}, compared={}), {} byte banner",
                report.date_key, report.persisted, report.previous_found, report.banner_bytes
            );
            Ok(())
        }
        Err(e) => {
            error!("{}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn cleanup(config: &BannerConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let today = DateKey::for_timestamp(chrono::Utc::now());
    let report = store.cleanup(today)?;
    println!(
        "kept {}, removed {}, failed {}",
        report.kept.len(),
        report.removed.len(),
        report.failed.len()
    );
    if !report.is_clean() {
        std::process::exit(1);
    }
    Ok(())
}

fn list_snapshots(config: &BannerConfig) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let keys = store.list_dated_keys()?;
    if keys.is_empty() {
        println!("No snapshots in {}", store.location());
        return Ok(());
    }
    for key in keys {
        match store.read(key) {
            Ok(Some(record)) => println!(
                "{}  captured {}  solves={} users={}",
                key,
                record.timestamp.to_rfc3339(),
                record.stats.vim.total_solutions,
                record.stats.news.total_users
            ),
            Ok(None) => println!("{}  (removed)", key),
            Err(e) => println!("{}  unreadable: {}", key, e),
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    info!("Data directory: {}", cli.data_dir.display());
    let config = BannerConfig::from_env(&cli.data_dir)?;

    match cli.command.unwrap_or(Command::Run { output: None }) {
        Command::Run { output } => run(&config, output).await,
        Command::Cleanup => cleanup(&config),
        Command::Snapshots => list_snapshots(&config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["statbanner", "--data-dir", "/tmp/x"]).unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_run_with_output() {
        let cli = Cli::try_parse_from(["statbanner", "run", "--output", "banner.png"]).unwrap();
        match cli.command {
            Some(Command::Run { output }) => assert_eq!(output, Some(PathBuf::from("banner.png"))),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
