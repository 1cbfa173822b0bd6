//! CLI argument parsing with clap.

use std::path::{Path, PathBuf};

use clap::Parser;

use crate::encode::media_type_for_path;
use crate::error::ImageError;

/// Styled advertising composites from a model photo and a product photo.
#[derive(Parser, Debug)]
#[command(name = "styleshot", version, about)]
pub struct Cli {
    /// Photo of the person to feature.
    #[arg(long)]
    pub model_image: Option<PathBuf>,

    /// Photo of the product to advertise.
    #[arg(long)]
    pub product_image: Option<PathBuf>,

    /// Model name or short alias (default from config, else nano-banana).
    #[arg(short, long)]
    pub model: Option<String>,

    /// Style prompt; repeat to replace the built-in catalog.
    #[arg(short, long = "style")]
    pub styles: Vec<String>,

    /// Aspect ratio (e.g., 1:1, 4:5, 9:16).
    #[arg(short, long)]
    pub aspect_ratio: Option<String>,

    /// Directory for generated images (default from config, else current dir).
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Filename prefix (default: product file name plus timestamp).
    #[arg(long)]
    pub prefix: Option<String>,

    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Return both input paths, checking that each is present and declares an
    /// image media type.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::MissingInput`] if either image is absent, or an
    /// invalid-argument error if a path does not look like an image.
    pub fn input_pair(&self) -> Result<(&Path, &Path), ImageError> {
        let (Some(model), Some(product)) = (&self.model_image, &self.product_image) else {
            return Err(ImageError::MissingInput);
        };
        for path in [model, product] {
            if !media_type_for_path(path).starts_with("image/") {
                return Err(ImageError::InvalidArgument(format!(
                    "{} is not an image file",
                    path.display()
                )));
            }
        }
        Ok((model.as_path(), product.as_path()))
    }
}
