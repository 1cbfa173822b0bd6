//! Styleshot - styled advertising composites from a model photo and a product photo.

mod adapters;
mod aggregate;
mod cassette;
mod catalog;
mod cli;
mod config;
mod context;
mod encode;
mod error;
mod logger;
mod model;
mod output;
mod params;
mod ports;

use std::process;

use clap::Parser;

use crate::aggregate::{generate_styled_images, GenerationOptions};
use crate::catalog::resolve_catalog;
use crate::cli::Cli;
use crate::config::Config;
use crate::context::{RunMode, ServiceContext};
use crate::encode::encode_pair;
use crate::error::ImageError;
use crate::model::{ensure_gemini, resolve_model};
use crate::output::{default_prefix, save_images};
use crate::params::validate_aspect_ratio;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {e}");
    }

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), ImageError> {
    // Both images are required before anything else happens
    let (model_path, product_path) = cli.input_pair()?;

    let config_path = config::discover_config_path(cli.config.as_deref());
    let config = Config::load(&config_path).map_err(ImageError::Config)?;

    let catalog = resolve_catalog(&cli.styles, config.catalog.styles.as_deref())?;

    let model_name = cli.model.as_deref().unwrap_or(&config.defaults.model);
    let resolved_model = resolve_model(model_name);
    ensure_gemini(&resolved_model).map_err(ImageError::InvalidArgument)?;
    log::debug!("model: {resolved_model} (resolved from '{model_name}')");

    let aspect_ratio = cli.aspect_ratio.clone().or_else(|| config.defaults.aspect_ratio.clone());
    if let Some(ref ratio) = aspect_ratio {
        validate_aspect_ratio(ratio).map_err(ImageError::InvalidArgument)?;
    }

    let mode = RunMode::from_env();
    log::debug!("generator mode: {mode:?}");
    let (ctx, recording_session) = ServiceContext::for_mode(&mode, &config)?;

    let (model_image, product_image) = encode_pair(model_path, product_path).await?;

    let options = GenerationOptions { model: resolved_model, aspect_ratio };
    let result =
        generate_styled_images(ctx.generator.as_ref(), model_image, product_image, &catalog, &options)
            .await;

    // Write the cassette before surfacing a generation failure
    drop(ctx);
    if let Some(session) = recording_session {
        match session.finish() {
            Ok(path) => eprintln!("Cassette saved: {}", path.display()),
            Err(e) => eprintln!("Warning: failed to save cassette: {e}"),
        }
    }

    let images = result?;

    let output_dir = cli.output_dir.as_deref().unwrap_or(&config.defaults.output_dir);
    let prefix = cli.prefix.clone().unwrap_or_else(|| default_prefix(product_path));
    for path in save_images(output_dir, &prefix, &images)? {
        eprintln!("Saved: {}", path.display());
    }

    Ok(())
}
