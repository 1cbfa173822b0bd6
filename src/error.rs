//! Unified error type for styleshot.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while producing styled images.
#[derive(Debug, Error)]
pub enum ImageError {
    /// An API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An input image could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying read failure.
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// One of the two input images was not supplied.
    #[error("Both a model image and a product image are required.")]
    MissingInput,

    /// A single style's response carried no usable image.
    #[error("No image data received: {0}")]
    NoImageData(String),

    /// Every style in the catalog failed.
    #[error("Could not generate any images. Please check the input files and try again.")]
    EmptyResult,

    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}
