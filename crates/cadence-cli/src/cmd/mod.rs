//! Subcommand handlers and the flag set they share.

pub mod columns;
pub mod issues;

use std::path::PathBuf;

use anyhow::{Context, Result, ensure};
use chrono::{Datelike, Months, NaiveDate, Utc};
use clap::Args;

use cadence_core::run::RunConfig;
use cadence_core::window::ReportWindow;

use crate::config::CadenceConfig;

/// Flags shared by both report subcommands.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Board name as configured in the config file.
    pub board: String,

    /// Path to the board snapshot JSON document.
    #[arg(long, value_name = "PATH")]
    pub snapshot: PathBuf,

    /// Reporting year (defaults to the current year).
    #[arg(long)]
    pub year: Option<i32>,

    /// Reporting month, 1-12 (defaults to the current month).
    #[arg(long)]
    pub month: Option<u32>,

    /// Override the configured start column.
    #[arg(long, value_name = "NAME")]
    pub start_column: Option<String>,

    /// Override the configured end column.
    #[arg(long, value_name = "NAME")]
    pub end_column: Option<String>,

    /// Write to `<Project>_<metric>_<YYYY-MM>.csv` instead of stdout.
    #[arg(long, conflicts_with = "output")]
    pub create_file: bool,

    /// Write to this path instead of stdout.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

impl ReportArgs {
    /// Resolve the engine run settings: config-file board defaults with
    /// CLI flags taking precedence.
    pub fn run_config(&self, config: &CadenceConfig) -> Result<RunConfig> {
        let board = config.board(&self.board)?;
        Ok(RunConfig {
            board_id: board.board_id,
            start_column: self
                .start_column
                .clone()
                .or_else(|| board.start_column.clone()),
            end_column: self.end_column.clone().or_else(|| board.end_column.clone()),
            window: month_window(self.year, self.month)?,
        })
    }
}

/// The reporting window for one calendar month, clamped so it never runs
/// past tomorrow (a month still in progress reports up to today).
fn month_window(year: Option<i32>, month: Option<u32>) -> Result<ReportWindow> {
    let today = Utc::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let start = NaiveDate::from_ymd_opt(year, month, 1)
        .with_context(|| format!("invalid reporting month: {year}-{month:02}"))?;
    ensure!(start <= today, "reporting month cannot start in the future");

    let mut end = start
        .checked_add_months(Months::new(1))
        .context("reporting month out of range")?;
    let tomorrow = today.succ_opt().context("date out of range")?;
    if end > tomorrow {
        end = tomorrow;
    }

    Ok(ReportWindow::new(start, end))
}
