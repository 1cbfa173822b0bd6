//! Image generator port for AI image generation APIs.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ImageError;

/// An image in transport form: base64 payload plus its declared media type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedImage {
    /// Standard base64 encoding of the image bytes.
    pub data: String,
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
}

impl EncodedImage {
    /// Encode raw bytes under the given media type.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], mime_type: impl Into<String>) -> Self {
        Self {
            data: base64::engine::general_purpose::STANDARD.encode(bytes),
            mime_type: mime_type.into(),
        }
    }

    /// Decode the payload back to raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid base64.
    pub fn decode(&self) -> Result<Vec<u8>, base64::DecodeError> {
        base64::engine::general_purpose::STANDARD.decode(&self.data)
    }
}

/// A request to generate one styled composite.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The photo of the person to keep in the composite.
    pub model_image: Arc<EncodedImage>,
    /// The photo of the product to feature.
    pub product_image: Arc<EncodedImage>,
    /// The style instruction for this request.
    pub style: String,
    /// Optional aspect ratio (e.g., `"1:1"`, `"4:5"`).
    pub aspect_ratio: Option<String>,
}

/// Boxed future type returned by [`ImageGenerator::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<EncodedImage, ImageError>> + Send + 'a>>;

/// Generates one image per request via an external API.
pub trait ImageGenerator: Send + Sync {
    /// Generate a single styled image for the given request.
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_>;
}
