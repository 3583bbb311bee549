//! `boxoffice` command-line entry point.

use anyhow::Context;
use boxoffice_rs::cli::{self, Cli, Command};
use boxoffice_rs::client::PredictionClient;
use boxoffice_rs::core::DashboardSummary;
use boxoffice_rs::history::{FileHistoryStore, HistoryStore};
use boxoffice_rs::tui::{self, TuiConfig};
use clap::Parser;
use log::info;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    boxoffice_rs::init_logging();

    let cli = Cli::parse();
    let command = cli.command();
    info!(
        "starting boxoffice (command={:?}, config_set={}, endpoint_set={})",
        command,
        cli.config.is_some(),
        cli.endpoint.is_some()
    );
    let cwd = std::env::current_dir().context("failed to resolve current working directory")?;
    let config = cli::resolve_config(&cli, &cwd)?;
    let history: Arc<dyn HistoryStore> = Arc::new(
        FileHistoryStore::new(config.history.dir(), config.history.storage_key.clone())
            .context("failed to open history store")?,
    );

    match command {
        Command::Tui => {
            let predictor = Arc::new(PredictionClient::from_config(&config.service));
            tui::run(TuiConfig {
                history,
                predictor,
                endpoint: config.service.submit_url(),
            })
            .await?;
        }
        Command::Submit { draft } => {
            let client = PredictionClient::from_config(&config.service);
            let record = cli::submit_draft(&draft, history, &client).await?;
            println!(
                "{}",
                serde_json::to_string_pretty(&record).context("failed to encode record")?
            );
        }
        Command::History { json, limit } => {
            let records = history.load();
            if json {
                println!("{}", cli::render_history_json(&records, limit)?);
            } else {
                print!("{}", cli::render_history(&records, limit));
            }
        }
        Command::Dashboard => {
            let summary = DashboardSummary::from_records(&history.load());
            print!("{}", cli::render_dashboard(&summary));
        }
        Command::Clear => {
            history.clear().context("failed to clear history")?;
            println!("History cleared.");
        }
    }
    Ok(())
}
