//! Optional TOML configuration with per-board defaults.
//!
//! A missing config file yields defaults; a present-but-malformed file is
//! an error. CLI flags override anything configured here.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

/// Default config path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "cadence.toml";

/// Top-level config document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CadenceConfig {
    /// Named boards available to the report subcommands.
    #[serde(default)]
    pub boards: BTreeMap<String, BoardConfig>,
}

/// Per-board defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Source-system board id.
    pub board_id: i64,
    /// Default start column; the first column when unset.
    #[serde(default)]
    pub start_column: Option<String>,
    /// Default end column; the last column when unset.
    #[serde(default)]
    pub end_column: Option<String>,
}

impl CadenceConfig {
    /// Look up a configured board by name.
    pub fn board(&self, name: &str) -> Result<&BoardConfig> {
        if self.boards.is_empty() {
            bail!("no project boards configured");
        }
        self.boards
            .get(name)
            .with_context(|| format!("no project board found with that name: {name}"))
    }
}

/// Load the config file, or defaults when it does not exist.
pub fn load_config(path: Option<&Path>) -> Result<CadenceConfig> {
    let path = path.unwrap_or_else(|| Path::new(DEFAULT_CONFIG_PATH));
    if !path.exists() {
        return Ok(CadenceConfig::default());
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config: {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_yields_defaults() {
        let config = load_config(Some(Path::new("/nonexistent/cadence.toml"))).unwrap();
        assert!(config.boards.is_empty());
    }

    #[test]
    fn parses_board_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[boards.deliverables]
board_id = 42
start_column = "In Progress"
end_column = "Done"

[boards.ops]
board_id = 7
"#
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        let board = config.board("deliverables").unwrap();
        assert_eq!(board.board_id, 42);
        assert_eq!(board.start_column.as_deref(), Some("In Progress"));

        let ops = config.board("ops").unwrap();
        assert_eq!(ops.board_id, 7);
        assert!(ops.start_column.is_none());
        assert!(ops.end_column.is_none());
    }

    #[test]
    fn unknown_board_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[boards.alpha]\nboard_id = 1").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        let err = config.board("beta").unwrap_err();
        assert!(err.to_string().contains("no project board found"));
    }

    #[test]
    fn no_boards_configured_is_an_error() {
        let config = CadenceConfig::default();
        let err = config.board("anything").unwrap_err();
        assert!(err.to_string().contains("no project boards configured"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "boards = 12").unwrap();
        assert!(load_config(Some(file.path())).is_err());
    }
}
