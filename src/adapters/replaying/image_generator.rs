//! Replaying adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::cassette::replayer::CassetteReplayer;
use crate::error::ImageError;
use crate::ports::image_generator::{
    EncodedImage, GenerateFuture, GenerationRequest, ImageGenerator,
};

/// Serves recorded image generation results from a cassette, matched by style.
pub struct ReplayingImageGenerator {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingImageGenerator {
    /// Create a replaying generator backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl ImageGenerator for ReplayingImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let style = request.style.clone();
        let output = next_output(&self.replayer, "image_generator", "generate", |input| {
            input.get("style").and_then(serde_json::Value::as_str) == Some(style.as_str())
        });
        Box::pin(async move {
            let output = output.map_err(|message| ImageError::Api { status: 0, message })?;
            replay_result::<EncodedImage>(output)
                .map_err(|e| ImageError::Api { status: 0, message: e.to_string() })
        })
    }
}
