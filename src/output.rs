//! File naming and image saving.

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::ImageError;
use crate::params::extension_for_mime;
use crate::ports::EncodedImage;

/// Default filename prefix: the sanitized product file stem plus a unix timestamp.
#[must_use]
pub fn default_prefix(product: &Path) -> String {
    let stem = product.file_stem().unwrap_or_default().to_string_lossy();
    let sanitized = sanitize_for_filename(&stem, 40);
    let timestamp = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
    format!("{sanitized}-{timestamp}")
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars().take(max_len * 2) {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "ad".to_string()
    } else {
        result
    }
}

/// Path for the `index`-th (1-based) image of a run.
#[must_use]
pub fn image_path(dir: &Path, prefix: &str, index: usize, mime: &str) -> PathBuf {
    dir.join(format!("{prefix}-{index}.{}", extension_for_mime(mime)))
}

/// Write every image into `dir` as returned by the service, in the given order.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, a payload is not
/// valid base64, or a file cannot be written.
pub fn save_images(
    dir: &Path,
    prefix: &str,
    images: &[EncodedImage],
) -> Result<Vec<PathBuf>, ImageError> {
    std::fs::create_dir_all(dir)?;
    let mut saved = Vec::with_capacity(images.len());
    for (i, image) in images.iter().enumerate() {
        let bytes = image.decode().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("image {} is not valid base64: {e}", i + 1),
            )
        })?;
        let path = image_path(dir, prefix, i + 1, &image.mime_type);
        std::fs::write(&path, bytes)?;
        saved.push(path);
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_basic() {
        assert_eq!(sanitize_for_filename("Red Handbag", 50), "red-handbag");
    }

    #[test]
    fn sanitize_special_chars() {
        assert_eq!(sanitize_for_filename("IMG_2024 (final)!!", 50), "img-2024-final");
    }

    #[test]
    fn sanitize_truncates() {
        let long = "a".repeat(100);
        assert!(sanitize_for_filename(&long, 10).len() <= 10);
    }

    #[test]
    fn sanitize_empty() {
        assert_eq!(sanitize_for_filename("", 50), "ad");
        assert_eq!(sanitize_for_filename("!!!", 50), "ad");
    }

    #[test]
    fn default_prefix_uses_product_stem() {
        let prefix = default_prefix(Path::new("/photos/Leather Bag.png"));
        assert!(prefix.starts_with("leather-bag-"), "got {prefix}");
    }

    #[test]
    fn image_path_numbering() {
        let path = image_path(Path::new("out"), "bag", 3, "image/png");
        assert_eq!(path, PathBuf::from("out/bag-3.png"));
    }

    #[test]
    fn save_images_writes_decoded_bytes() {
        let dir = std::env::temp_dir().join("styleshot_output_test");
        let _ = std::fs::remove_dir_all(&dir);

        let images = vec![
            EncodedImage::from_bytes(&[1, 2, 3], "image/png"),
            EncodedImage::from_bytes(&[4, 5], "image/jpeg"),
        ];
        let saved = save_images(&dir, "bag", &images).unwrap();

        assert_eq!(saved, vec![dir.join("bag-1.png"), dir.join("bag-2.jpg")]);
        assert_eq!(std::fs::read(&saved[0]).unwrap(), vec![1, 2, 3]);
        assert_eq!(std::fs::read(&saved[1]).unwrap(), vec![4, 5]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn save_images_rejects_bad_payload() {
        let dir = std::env::temp_dir().join("styleshot_output_bad_test");
        let images = vec![EncodedImage { data: "%%%".into(), mime_type: "image/png".into() }];
        assert!(save_images(&dir, "bag", &images).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
