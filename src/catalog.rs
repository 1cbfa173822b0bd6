//! The ordered set of advertising style prompts.

use crate::error::ImageError;

/// Built-in advertising styles, used when neither the CLI nor the config
/// file supplies a catalog.
const DEFAULT_STYLES: &[&str] = &[
    "Create a high-end studio advertising photo: the person from the first image holds or \
     wears the product from the second image against a seamless neutral backdrop with soft \
     key lighting. Keep the person's face exactly as in the original photo. Photorealistic, \
     4K detail.",
    "Create a luxury magazine editorial: the person from the first image poses with the \
     product from the second image in an elegant interior with warm golden-hour light. Keep \
     the person's face identical to the original. Photorealistic, 4K detail.",
    "Create an urban street-style advertisement: the person from the first image uses the \
     product from the second image on a lively city street with shallow depth of field. \
     Preserve the person's facial features exactly. Photorealistic, 4K detail.",
    "Create a fresh outdoor lifestyle advertisement: the person from the first image enjoys \
     the product from the second image in a sunlit natural setting. Preserve the person's \
     face exactly. Bright, airy colors, photorealistic, 4K detail.",
    "Create a minimalist flat-lay inspired advertisement: the product from the second image \
     is the hero, with the person from the first image framing it in a clean pastel scene. \
     Keep the person's face unchanged. Photorealistic, 4K detail.",
    "Create a dramatic cinematic poster: the person from the first image presents the \
     product from the second image under moody low-key lighting with bold contrast. Keep \
     the person's face identical to the original. Photorealistic, 4K detail.",
];

/// An ordered, non-empty list of style prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleCatalog {
    styles: Vec<String>,
}

impl StyleCatalog {
    /// Build a catalog from the given prompts.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any prompt is blank.
    pub fn new(styles: Vec<String>) -> Result<Self, ImageError> {
        if styles.is_empty() {
            return Err(ImageError::InvalidArgument("style catalog is empty".into()));
        }
        if let Some(pos) = styles.iter().position(|s| s.trim().is_empty()) {
            return Err(ImageError::InvalidArgument(format!("style #{} is blank", pos + 1)));
        }
        Ok(Self { styles })
    }

    /// Number of styles, and therefore of requests per run.
    #[must_use]
    pub fn count(&self) -> usize {
        self.styles.len()
    }

    /// Iterate over the prompts in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.styles.iter().map(String::as_str)
    }
}

impl Default for StyleCatalog {
    fn default() -> Self {
        Self { styles: DEFAULT_STYLES.iter().map(|s| (*s).to_string()).collect() }
    }
}

/// Pick the catalog: CLI styles first, then config styles, then the built-in set.
///
/// # Errors
///
/// Returns an error if the chosen list is invalid (e.g., contains a blank prompt).
pub fn resolve_catalog(
    cli_styles: &[String],
    config_styles: Option<&[String]>,
) -> Result<StyleCatalog, ImageError> {
    if !cli_styles.is_empty() {
        return StyleCatalog::new(cli_styles.to_vec());
    }
    match config_styles {
        Some(styles) => StyleCatalog::new(styles.to_vec()),
        None => Ok(StyleCatalog::default()),
    }
}
