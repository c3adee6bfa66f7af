use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuroraError {
    #[error("missing prompt")]
    MissingPrompt,

    #[error("unsupported lang: {0}")]
    UnsupportedLang(String),

    #[error("invalid json: {0}")]
    InvalidJson(String),

    #[error("render error: {0}")]
    Render(String),

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl AuroraError {
    /// HTTP status code for this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::MissingPrompt | Self::UnsupportedLang(_) | Self::InvalidJson(_) => 400,
            _ => 500,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuroraError>;
