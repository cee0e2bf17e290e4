use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty file name, bad tolerance, etc.).
    ConfigValidation(String),
    /// Required columns absent from a source's header row.
    MissingColumns {
        source: String,
        missing: Vec<String>,
        found: Vec<String>,
    },
    /// A source yielded no usable rows after normalization.
    EmptyInput { source: String },
    /// IO error (file read, CSV-level failure).
    Io(String),
    /// Unexpected failure during aggregation, matching, or classification.
    Processing(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumns { source, missing, found } => {
                write!(
                    f,
                    "source '{source}': missing column(s) {}; columns found: {}",
                    missing.join(", "),
                    found.join(", ")
                )
            }
            Self::EmptyInput { source } => {
                write!(f, "source '{source}': no usable rows after normalization")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::Processing(msg) => write!(f, "processing error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
