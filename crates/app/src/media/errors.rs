//! Media errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MediaError {
    #[error("unsupported image type \"{0}\"")]
    UnsupportedContentType(String),

    #[error("image of {0} bytes exceeds the upload limit")]
    TooLarge(usize),

    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The media store returned a non-2xx response or unexpected body.
    #[error("unexpected response from media store: {0}")]
    UnexpectedResponse(String),
}

impl MediaError {
    /// Whether the error was caused by the image itself rather than the store.
    #[must_use]
    pub const fn is_invalid_image(&self) -> bool {
        matches!(self, Self::UnsupportedContentType(_) | Self::TooLarge(_))
    }
}
