//! Domain error types.

/// Failure fetching fundamental data from a provider.
///
/// Screens absorb these into rejection reasons rather than propagating them;
/// a batch scan must skip uncertain candidates, never abort.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("no fundamental data for {code}")]
    NotFound { code: String },

    #[error("malformed provider response: {reason}")]
    Malformed { reason: String },

    #[error("provider unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Top-level error type for reversal-screener.
#[derive(Debug, thiserror::Error)]
pub enum ScreenerError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data file error: {reason}")]
    DataFile { reason: String },

    #[error("invalid price series for {code}: {reason}")]
    InvalidSeries { code: String, reason: String },

    #[error("no price data for {code}")]
    NoData { code: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&ScreenerError> for std::process::ExitCode {
    fn from(err: &ScreenerError) -> Self {
        let code: u8 = match err {
            ScreenerError::Io(_) => 1,
            ScreenerError::ConfigParse { .. }
            | ScreenerError::ConfigMissing { .. }
            | ScreenerError::ConfigInvalid { .. } => 2,
            ScreenerError::DataFile { .. } => 3,
            ScreenerError::InvalidSeries { .. } | ScreenerError::NoData { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
