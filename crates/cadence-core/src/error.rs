use thiserror::Error;

/// Fatal engine errors.
///
/// Recoverable per-event conditions (an event naming a column that is not
/// on the board, a backward move) are logged and skipped, not surfaced
/// here.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// A run cannot resolve tracked column indexes without at least one
    /// board column; no partial output is produced.
    #[error("cannot resolve column indexes: board columns are empty")]
    EmptyBoardColumns,

    /// The requested metric name is not one of the known runners.
    #[error("unknown metric '{name}': expected one of issues, columns")]
    UnknownMetric {
        /// The unrecognized metric name.
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::EngineError;

    #[test]
    fn messages_name_the_problem() {
        assert!(
            EngineError::EmptyBoardColumns
                .to_string()
                .contains("board columns are empty")
        );

        let err = EngineError::UnknownMetric {
            name: "velocity".into(),
        };
        assert!(err.to_string().contains("velocity"));
        assert!(err.to_string().contains("expected one of"));
    }
}
