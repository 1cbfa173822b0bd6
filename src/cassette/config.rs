//! Opening cassettes for replay.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::ImageError;

/// Parse a cassette file.
///
/// # Errors
///
/// Returns a config error if the file cannot be read or is not a cassette.
pub fn read_cassette(path: &Path) -> Result<Cassette, ImageError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        ImageError::Config(format!("Failed to read cassette file {}: {e}", path.display()))
    })?;
    serde_yaml::from_str(&content).map_err(|e| {
        ImageError::Config(format!("Failed to parse cassette file {}: {e}", path.display()))
    })
}

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, ImageError> {
    let cassette = read_cassette(path)?;
    log::debug!(
        "cassette '{}' (commit {}) holds {} interactions",
        cassette.name,
        cassette.commit,
        cassette.interactions.len()
    );
    Ok(CassetteReplayer::new(&cassette))
}
