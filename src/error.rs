use thiserror::Error;

/// Failure while reading the plant dataset. Always fatal at startup.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}: invalid value '{value}' in column '{column}'")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}
