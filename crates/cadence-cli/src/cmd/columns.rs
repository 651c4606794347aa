//! `cadence columns` — per-day column occupancy.

use anyhow::Result;
use clap::Args;

use cadence_core::run;

use crate::config::CadenceConfig;
use crate::output::{self, OutputMode};
use crate::snapshot::Snapshot;

/// Arguments for `cadence columns`.
#[derive(Args, Debug)]
pub struct ColumnsArgs {
    #[command(flatten)]
    pub report: super::ReportArgs,
}

/// Execute `cadence columns`.
pub fn run_columns(
    args: &ColumnsArgs,
    config: &CadenceConfig,
    mode: OutputMode,
    no_headers: bool,
) -> Result<()> {
    let run_config = args.report.run_config(config)?;
    let snapshot = Snapshot::load(&args.report.snapshot)?;
    let report = run::run_columns(&snapshot, &run_config)?;
    output::emit_report(
        &report,
        mode,
        no_headers,
        args.report.create_file,
        args.report.output.as_deref(),
    )
}
