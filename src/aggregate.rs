//! Fan-out/fan-in over the style catalog.
//!
//! One request per style is dispatched at once; the run succeeds if at least
//! one style produced an image. Per-style failures are logged and dropped.

use std::sync::Arc;

use futures::stream::{FuturesUnordered, StreamExt};
use futures::FutureExt;

use crate::catalog::StyleCatalog;
use crate::error::ImageError;
use crate::ports::{EncodedImage, GenerationRequest, ImageGenerator};

/// Request parameters shared by every style in a run.
#[derive(Debug, Clone, Default)]
pub struct GenerationOptions {
    /// Resolved model identifier.
    pub model: String,
    /// Optional aspect ratio passed through to the service.
    pub aspect_ratio: Option<String>,
}

/// Build one request per style, all sharing the same two images.
fn build_requests(
    model_image: &Arc<EncodedImage>,
    product_image: &Arc<EncodedImage>,
    catalog: &StyleCatalog,
    options: &GenerationOptions,
) -> Vec<GenerationRequest> {
    catalog
        .iter()
        .map(|style| GenerationRequest {
            model: options.model.clone(),
            model_image: Arc::clone(model_image),
            product_image: Arc::clone(product_image),
            style: style.to_string(),
            aspect_ratio: options.aspect_ratio.clone(),
        })
        .collect()
}

/// Generate one image per style and collect the successes in settlement order.
///
/// Every request runs to completion; a failing style never cancels the
/// others.
///
/// # Errors
///
/// Returns [`ImageError::EmptyResult`] if no style produced an image.
pub async fn generate_styled_images(
    generator: &dyn ImageGenerator,
    model_image: EncodedImage,
    product_image: EncodedImage,
    catalog: &StyleCatalog,
    options: &GenerationOptions,
) -> Result<Vec<EncodedImage>, ImageError> {
    let model_image = Arc::new(model_image);
    let product_image = Arc::new(product_image);
    let requests = build_requests(&model_image, &product_image, catalog, options);

    log::info!("dispatching {} style requests to {}", requests.len(), options.model);

    let mut pending: FuturesUnordered<_> = requests
        .iter()
        .enumerate()
        .map(|(index, request)| generator.generate(request).map(move |outcome| (index, outcome)))
        .collect();

    let mut images = Vec::with_capacity(catalog.count());
    while let Some((index, outcome)) = pending.next().await {
        match outcome {
            Ok(image) => {
                log::debug!("style {} settled with an image", index + 1);
                images.push(image);
            }
            Err(e) => log::debug!("style {} failed: {e}", index + 1),
        }
    }

    if images.is_empty() {
        return Err(ImageError::EmptyResult);
    }

    log::debug!("{} of {} styles produced an image", images.len(), requests.len());
    Ok(images)
}
