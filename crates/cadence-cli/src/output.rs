//! Report rendering: CSV rows to stdout or a file, or a JSON document.

use std::borrow::Cow;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use cadence_core::report::RunReport;

/// The two output formats supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Comma-separated rows, one line per row.
    Csv,
    /// The whole report as one JSON document.
    Json,
}

/// Write a report to stdout, to an explicit path, or (with `create_file`)
/// to the report's suggested file name.
pub fn emit_report(
    report: &RunReport,
    mode: OutputMode,
    no_headers: bool,
    create_file: bool,
    output: Option<&Path>,
) -> Result<()> {
    let path: Option<PathBuf> = output
        .map(Path::to_path_buf)
        .or_else(|| create_file.then(|| PathBuf::from(&report.name)));

    match path {
        Some(path) => {
            let mut file =
                File::create(&path).with_context(|| format!("creating {}", path.display()))?;
            render_report(report, mode, no_headers, &mut file)?;
            println!("Wrote to: {}", path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            render_report(report, mode, no_headers, &mut out)?;
        }
    }
    Ok(())
}

/// Render a report in the requested format.
pub fn render_report(
    report: &RunReport,
    mode: OutputMode,
    no_headers: bool,
    w: &mut dyn Write,
) -> Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *w, report)?;
            writeln!(w)?;
        }
        OutputMode::Csv => {
            if !no_headers {
                write_csv_row(w, &report.headers)?;
            }
            for row in &report.rows {
                write_csv_row(w, row)?;
            }
        }
    }
    Ok(())
}

fn write_csv_row(w: &mut dyn Write, fields: &[String]) -> io::Result<()> {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            write!(w, ",")?;
        }
        write!(w, "{}", csv_field(field))?;
    }
    writeln!(w)
}

/// Quote a field when it contains a delimiter, quote, or line break.
fn csv_field(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}
