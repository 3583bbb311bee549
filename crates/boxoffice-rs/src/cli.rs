//! Command-line interface for the `boxoffice` binary.

use anyhow::Context;
use boxoffice_rs_client::Predictor;
use boxoffice_rs_config::{BoxOfficeConfig, LayeredConfigOptions};
use boxoffice_rs_core::{DashboardSummary, Draft, FormController, format_usd};
use boxoffice_rs_history::HistoryStore;
use boxoffice_rs_model::{PredictionRecord, Vocabulary};
use clap::{Parser, Subcommand};
use log::{debug, info};
use serde_json::Value;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Predict box-office performance for a movie and keep a local history.
#[derive(Parser, Debug)]
#[command(name = "boxoffice", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Extra boxoffice.json5 applied over the discovered config layers
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    /// Prediction service base URL, e.g. http://127.0.0.1:8000
    #[arg(long, global = true)]
    pub endpoint: Option<String>,
    /// Directory holding the history file
    #[arg(long, global = true)]
    pub history_dir: Option<PathBuf>,
    /// The subcommand to execute (defaults to `tui`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open the interactive dashboard, form and history views
    Tui,
    /// Submit a draft from a JSON5 file and store the prediction
    Submit {
        /// Path to the draft file
        #[arg(long)]
        draft: PathBuf,
    },
    /// Print stored predictions, most recent first
    History {
        /// Print the stored records as JSON
        #[arg(long)]
        json: bool,
        /// Show at most this many records
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Print aggregate statistics over the history
    Dashboard,
    /// Delete every stored prediction
    Clear,
}

impl Cli {
    /// Command to run, defaulting to the TUI.
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tui)
    }
}

/// Load layered config from `cwd`, then apply command-line overrides.
pub fn resolve_config(cli: &Cli, cwd: &Path) -> anyhow::Result<BoxOfficeConfig> {
    let mut options = LayeredConfigOptions::new(cwd);
    if let Some(path) = cli.config.as_ref() {
        options = options.with_runtime_path(path);
    }
    let layered = BoxOfficeConfig::load_layered_with_options(options)
        .context("failed to load config")?;
    debug!("config layers loaded (count={})", layered.layers.len());

    let mut config = layered.config;
    if let Some(endpoint) = cli.endpoint.as_ref() {
        config.service.base_url = endpoint.clone();
    }
    if let Some(dir) = cli.history_dir.as_ref() {
        config.history.path = Some(dir.to_string_lossy().into_owned());
    }
    config
        .validate()
        .context("invalid command-line override")?;
    Ok(config)
}

/// Read a draft from a JSON5 file.
pub fn load_draft(path: &Path) -> anyhow::Result<Draft> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read draft {}", path.display()))?;
    let value: Value = json5::from_str(&contents)
        .with_context(|| format!("failed to parse draft {}", path.display()))?;
    let draft = serde_json::from_value(value)
        .with_context(|| format!("invalid draft {}", path.display()))?;
    Ok(draft)
}

/// Submit a draft file once and return the stored record.
pub async fn submit_draft(
    path: &Path,
    history: Arc<dyn HistoryStore>,
    predictor: &dyn Predictor,
) -> anyhow::Result<PredictionRecord> {
    let draft = load_draft(path)?;
    let mut controller = FormController::with_draft(history, draft);
    let record = controller
        .submit(predictor)
        .await
        .context("prediction failed")?;
    info!("draft submitted (id={})", record.id);
    Ok(record)
}

/// Plain-text history table.
pub fn render_history(records: &[PredictionRecord], limit: Option<usize>) -> String {
    if records.is_empty() {
        return "No predictions yet.\n".to_string();
    }
    let shown = limit.unwrap_or(records.len()).min(records.len());
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<30} {:>6} {:>18} {:>18} {:>6} {:>6}  {}",
        "TITLE", "RATING", "OPENING", "WORLDWIDE", "AWARDS", "NOMS", "PREDICTED AT"
    );
    for record in &records[..shown] {
        let predicted = record.predicted();
        let _ = writeln!(
            out,
            "{:<30} {:>6.1} {:>18} {:>18} {:>6} {:>6}  {}",
            truncate(&record.input().title, 30),
            predicted.rating,
            format_usd(predicted.opening_weekend_gross),
            format_usd(predicted.gross_worldwide),
            predicted.awards,
            predicted.nominations,
            record.predicted_at.format("%Y-%m-%d %H:%M"),
        );
    }
    if shown < records.len() {
        let _ = writeln!(out, "… {} more", records.len() - shown);
    }
    out
}

/// History as pretty JSON, using the stored layout.
pub fn render_history_json(
    records: &[PredictionRecord],
    limit: Option<usize>,
) -> anyhow::Result<String> {
    let shown = limit.unwrap_or(records.len()).min(records.len());
    serde_json::to_string_pretty(&records[..shown]).context("failed to encode history")
}

/// Plain-text dashboard summary.
pub fn render_dashboard(summary: &DashboardSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Total predictions:  {}", summary.total_predictions);
    let _ = writeln!(out, "Average rating:     {:.1}", summary.average_rating);
    let _ = writeln!(out, "Total awards:       {}", summary.total_awards);
    let _ = writeln!(
        out,
        "Highest grossing:   {}",
        summary
            .highest_grossing
            .as_ref()
            .map(|top| format!("{} ({})", top.title, format_usd(top.gross_worldwide)))
            .unwrap_or_else(|| "None".to_string())
    );
    let _ = writeln!(out, "Average budget:     {}", format_usd(summary.average_budget));
    let _ = writeln!(out, "Success rate:       {:.0}%", summary.success_rate * 100.0);
    let _ = writeln!(
        out,
        "Most common genre:  {}",
        summary
            .most_common_genre
            .map(|genre| genre.as_str())
            .unwrap_or("None")
    );
    if !summary.recent.is_empty() {
        let _ = writeln!(out, "\nRecent predictions:");
        out.push_str(&render_history(&summary.recent, None));
    }
    out
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }
    let mut out: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::{Cli, Command, truncate};
    use clap::Parser;
    use pretty_assertions::assert_eq;
    use std::path::PathBuf;

    #[test]
    fn defaults_to_tui() {
        let cli = Cli::try_parse_from(["boxoffice"]).expect("parse");
        assert_eq!(cli.command(), Command::Tui);
    }

    #[test]
    fn global_flags_follow_subcommands() {
        let cli = Cli::try_parse_from([
            "boxoffice",
            "history",
            "--limit",
            "3",
            "--json",
            "--history-dir",
            "/tmp/h",
        ])
        .expect("parse");
        assert_eq!(
            cli.command(),
            Command::History {
                json: true,
                limit: Some(3)
            }
        );
        assert_eq!(cli.history_dir, Some(PathBuf::from("/tmp/h")));
    }

    #[test]
    fn submit_requires_draft() {
        assert!(Cli::try_parse_from(["boxoffice", "submit"]).is_err());
    }

    #[test]
    fn truncate_marks_cut_titles() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }
}
