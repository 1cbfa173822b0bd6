//! Live adapter for the Gemini image generation API.

use reqwest::Client;
use serde::Deserialize;

use crate::error::ImageError;
use crate::ports::image_generator::{
    EncodedImage, GenerateFuture, GenerationRequest, ImageGenerator,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini image generator that calls the Google AI API.
pub struct GeminiGenerator {
    client: Client,
    api_key: String,
}

impl GeminiGenerator {
    /// Create a new Gemini generator with the given API key.
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self { client: Client::new(), api_key }
    }
}

/// Build the `generateContent` body: both photos, then the style text.
fn request_body(request: &GenerationRequest) -> serde_json::Value {
    let mut generation_config = serde_json::json!({
        "responseModalities": ["IMAGE"],
    });

    if let Some(ref ratio) = request.aspect_ratio {
        generation_config["imageConfig"] = serde_json::json!({ "aspectRatio": ratio });
    }

    serde_json::json!({
        "contents": [{
            "parts": [
                {"inlineData": {
                    "mimeType": request.model_image.mime_type,
                    "data": request.model_image.data,
                }},
                {"inlineData": {
                    "mimeType": request.product_image.mime_type,
                    "data": request.product_image.data,
                }},
                {"text": request.style},
            ]
        }],
        "generationConfig": generation_config
    })
}

/// Pull the single inline image out of the first candidate.
///
/// No candidates, no parts, text-only, and several images all count as
/// "no image produced".
fn extract_image(response: GeminiResponse) -> Result<EncodedImage, ImageError> {
    let Some(candidate) = response.candidates.into_iter().next() else {
        return Err(ImageError::NoImageData("response has no candidates".into()));
    };

    let mut inline: Vec<GeminiInlineData> = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter_map(|p| p.inline_data)
        .collect();

    match inline.len() {
        1 => {
            let data = inline.remove(0);
            Ok(EncodedImage { data: data.data, mime_type: data.mime_type })
        }
        0 => Err(ImageError::NoImageData(match candidate.finish_reason {
            Some(reason) => format!("no inline image (finish reason {reason})"),
            None => "no inline image".into(),
        })),
        n => Err(ImageError::NoImageData(format!("expected one inline image, got {n}"))),
    }
}

impl ImageGenerator for GeminiGenerator {
    fn generate(&self, request: &GenerationRequest) -> GenerateFuture<'_> {
        let url = format!("{GEMINI_API_BASE}/{}:generateContent", request.model);
        let body = request_body(request);
        Box::pin(async move {
            let response = self
                .client
                .post(&url)
                .header("x-goog-api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            let response_text = response.text().await?;

            if !status.is_success() {
                return Err(ImageError::Api { status: status.as_u16(), message: response_text });
            }

            let parsed: GeminiResponse = serde_json::from_str(&response_text).map_err(|e| {
                ImageError::Api { status: 200, message: format!("Failed to parse response: {e}") }
            })?;

            extract_image(parsed)
        })
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    content: Option<GeminiContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    inline_data: Option<GeminiInlineData>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    fn parse(json: &str) -> Result<EncodedImage, ImageError> {
        extract_image(serde_json::from_str(json).unwrap())
    }

    fn request(aspect_ratio: Option<&str>) -> GenerationRequest {
        GenerationRequest {
            model: "gemini-2.5-flash-image".into(),
            model_image: Arc::new(EncodedImage::from_bytes(b"face", "image/jpeg")),
            product_image: Arc::new(EncodedImage::from_bytes(b"bag", "image/png")),
            style: "studio lighting".into(),
            aspect_ratio: aspect_ratio.map(Into::into),
        }
    }

    #[test]
    fn body_carries_both_images_then_style() {
        let body = request_body(&request(None));
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(parts[0]["inlineData"]["data"], "ZmFjZQ==");
        assert_eq!(parts[1]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[1]["inlineData"]["data"], "YmFn");
        assert_eq!(parts[2]["text"], "studio lighting");
        assert_eq!(body["generationConfig"]["responseModalities"][0], "IMAGE");
        assert!(body["generationConfig"].get("imageConfig").is_none());
    }

    #[test]
    fn body_includes_aspect_ratio_when_set() {
        let body = request_body(&request(Some("4:5")));
        assert_eq!(body["generationConfig"]["imageConfig"]["aspectRatio"], "4:5");
    }

    #[test]
    fn single_inline_image_is_success() {
        let image = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"inlineData":{"mimeType":"image/png","data":"iVBORw0KGgo="}}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(image.mime_type, "image/png");
        assert_eq!(image.data, "iVBORw0KGgo=");
    }

    #[test]
    fn text_alongside_image_is_ignored() {
        let image = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"text":"Here is your ad"},
                {"inlineData":{"mimeType":"image/jpeg","data":"/9j/4A=="}}
            ]}}]}"#,
        )
        .unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
    }

    #[test]
    fn no_candidates_is_no_image() {
        assert!(matches!(parse("{}"), Err(ImageError::NoImageData(_))));
        assert!(matches!(parse(r#"{"candidates":[]}"#), Err(ImageError::NoImageData(_))));
    }

    #[test]
    fn missing_content_reports_finish_reason() {
        let err = parse(r#"{"candidates":[{"finishReason":"IMAGE_SAFETY"}]}"#).unwrap_err();
        assert!(err.to_string().contains("IMAGE_SAFETY"));
    }

    #[test]
    fn text_only_is_no_image() {
        let result = parse(r#"{"candidates":[{"content":{"parts":[{"text":"I can't"}]}}]}"#);
        assert!(matches!(result, Err(ImageError::NoImageData(_))));
    }

    #[test]
    fn multiple_images_is_no_image() {
        let result = parse(
            r#"{"candidates":[{"content":{"parts":[
                {"inlineData":{"mimeType":"image/png","data":"AA=="}},
                {"inlineData":{"mimeType":"image/png","data":"AQ=="}}
            ]}}]}"#,
        );
        assert!(matches!(result, Err(ImageError::NoImageData(_))));
    }

    #[test]
    fn only_first_candidate_counts() {
        let result = parse(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"refused"}]}},
                {"content":{"parts":[{"inlineData":{"mimeType":"image/png","data":"AA=="}}]}}
            ]}"#,
        );
        assert!(matches!(result, Err(ImageError::NoImageData(_))));
    }
}
