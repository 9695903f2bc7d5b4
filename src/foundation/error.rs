use std::path::{Path, PathBuf};

/// Convenience result type used across bannergrid.
pub type BannerResult<T> = Result<T, BannerError>;

/// Error taxonomy of the composition pipeline.
///
/// Every variant is terminal for the current run. Callers that want to re-prompt for corrected
/// input do so outside the pipeline and re-invoke it.
#[derive(thiserror::Error, Debug)]
pub enum BannerError {
    /// Color text matched none of the HEX/RGB/CMYK grammars, or a channel was out of range.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// No source images were found.
    #[error("empty image set: no supported images found in the input folders")]
    EmptyImageSet,

    /// A source (or watermark/background) image is missing, unsupported or corrupt.
    #[error("unreadable image '{}': {reason}", path.display())]
    UnreadableImage {
        /// Offending file.
        path: PathBuf,
        /// Decoder or filesystem message.
        reason: String,
    },

    /// Output folder or file could not be created.
    #[error("write failure: {0}")]
    WriteFailure(String),

    /// Invalid configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A font request could not be satisfied.
    #[error("font error: {0}")]
    Font(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl BannerError {
    /// Build a [`BannerError::InvalidColorFormat`] value.
    pub fn invalid_color(msg: impl Into<String>) -> Self {
        Self::InvalidColorFormat(msg.into())
    }

    /// Build a [`BannerError::UnreadableImage`] value.
    pub fn unreadable(path: &Path, reason: impl ToString) -> Self {
        Self::UnreadableImage {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Build a [`BannerError::WriteFailure`] value.
    pub fn write_failure(msg: impl Into<String>) -> Self {
        Self::WriteFailure(msg.into())
    }

    /// Build a [`BannerError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`BannerError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
