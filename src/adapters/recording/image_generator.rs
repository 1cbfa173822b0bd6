//! Recording adapter for the `ImageGenerator` port.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::image_generator::{GenerateFuture, GenerationRequest, ImageGenerator};

/// What a cassette stores about a request. Image payloads are left out;
/// replay matches on the style.
#[derive(Debug, Serialize)]
pub(crate) struct RecordedRequest<'a> {
    pub model: &'a str,
    pub style: &'a str,
    pub aspect_ratio: Option<&'a str>,
    pub model_image: &'a str,
    pub product_image: &'a str,
}

impl<'a> From<&'a GenerationRequest> for RecordedRequest<'a> {
    fn from(request: &'a GenerationRequest) -> Self {
        Self {
            model: &request.model,
            style: &request.style,
            aspect_ratio: request.aspect_ratio.as_deref(),
            model_image: &request.model_image.mime_type,
            product_image: &request.product_image.mime_type,
        }
    }
}

/// Records image generation interactions while delegating to an inner implementation.
pub struct RecordingImageGenerator {
    inner: Box<dyn ImageGenerator>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingImageGenerator {
    /// Creates a new recording generator wrapping the given implementation.
    pub fn new(inner: Box<dyn ImageGenerator>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl ImageGenerator for RecordingImageGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request).await;
            let recorded = RecordedRequest::from(&request);
            record_result(&recorder, "image_generator", "generate", &recorded, &result);
            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImageError;
    use crate::ports::EncodedImage;

    struct FixedGenerator;

    impl ImageGenerator for FixedGenerator {
        fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
            let ok = request.style != "refused";
            Box::pin(async move {
                if ok {
                    Ok(EncodedImage::from_bytes(b"img", "image/png"))
                } else {
                    Err(ImageError::NoImageData("text-only".into()))
                }
            })
        }
    }

    fn request(style: &str) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-flash-image".into(),
            model_image: Arc::new(EncodedImage::from_bytes(b"face", "image/jpeg")),
            product_image: Arc::new(EncodedImage::from_bytes(b"bag", "image/png")),
            style: style.into(),
            aspect_ratio: None,
        }
    }

    #[tokio::test]
    async fn records_successes_and_failures() {
        let dir = std::env::temp_dir().join("styleshot_recording_adapter_test");
        let _ = std::fs::remove_dir_all(&dir);
        let path = dir.join("image_generator.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec", "abc")));
        let generator = RecordingImageGenerator::new(Box::new(FixedGenerator), Arc::clone(&recorder));

        assert!(generator.generate(&request("studio")).await.is_ok());
        assert!(generator.generate(&request("refused")).await.is_err());
        drop(generator);

        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        recorder.finish().unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content).unwrap();

        assert_eq!(cassette.interactions.len(), 2);
        let first = &cassette.interactions[0];
        assert_eq!(first.input["style"], "studio");
        assert_eq!(first.input["model_image"], "image/jpeg");
        assert!(first.input.get("data").is_none());
        assert_eq!(first.output["Ok"]["mime_type"], "image/png");
        assert!(cassette.interactions[1].output["Err"].as_str().unwrap().contains("text-only"));

        let _ = std::fs::remove_dir_all(&dir);
    }
}
