//! Turns input image files into transport-ready [`EncodedImage`] values.

use std::path::Path;

use crate::error::ImageError;
use crate::ports::EncodedImage;

/// Declared media type for a file, derived from its extension.
///
/// Unknown or missing extensions declare `application/octet-stream`; the
/// generation service decides whether it accepts the payload.
#[must_use]
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path.extension().and_then(|e| e.to_str()).map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("bmp") => "image/bmp",
        Some("tif" | "tiff") => "image/tiff",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Read a file once and encode its bytes.
///
/// # Errors
///
/// Returns [`ImageError::Read`] if the file cannot be read.
pub async fn encode_file(path: &Path) -> Result<EncodedImage, ImageError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ImageError::Read { path: path.to_path_buf(), source })?;
    log::debug!("encoded {} ({} bytes)", path.display(), bytes.len());
    Ok(EncodedImage::from_bytes(&bytes, media_type_for_path(path)))
}

/// Encode the model and product images concurrently.
///
/// # Errors
///
/// Returns the first read failure; both images are required.
pub async fn encode_pair(
    model: &Path,
    product: &Path,
) -> Result<(EncodedImage, EncodedImage), ImageError> {
    tokio::try_join!(encode_file(model), encode_file(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_types_from_extension() {
        assert_eq!(media_type_for_path(Path::new("face.jpg")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("face.JPEG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("bag.png")), "image/png");
        assert_eq!(media_type_for_path(Path::new("bag.webp")), "image/webp");
        assert_eq!(media_type_for_path(Path::new("scan.tif")), "image/tiff");
    }

    #[test]
    fn unknown_extension_is_octet_stream() {
        assert_eq!(media_type_for_path(Path::new("notes.txt")), "application/octet-stream");
        assert_eq!(media_type_for_path(Path::new("no_extension")), "application/octet-stream");
    }

    #[tokio::test]
    async fn encode_file_preserves_bytes() {
        let dir = std::env::temp_dir().join("styleshot_encode_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("model.png");
        let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0xFF];
        std::fs::write(&path, &bytes).unwrap();

        let encoded = encode_file(&path).await.unwrap();
        assert_eq!(encoded.mime_type, "image/png");
        assert_eq!(encoded.decode().unwrap(), bytes);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn encode_missing_file_is_read_error() {
        let err = encode_file(Path::new("/nonexistent/model.jpg")).await.unwrap_err();
        assert!(matches!(err, ImageError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/model.jpg"));
    }

    #[tokio::test]
    async fn encode_pair_fails_if_either_is_unreadable() {
        let dir = std::env::temp_dir().join("styleshot_encode_pair_test");
        std::fs::create_dir_all(&dir).unwrap();
        let model = dir.join("model.jpg");
        std::fs::write(&model, b"jpeg").unwrap();

        let result = encode_pair(&model, Path::new("/nonexistent/product.png")).await;
        assert!(matches!(result, Err(ImageError::Read { .. })));

        let (m, p) = encode_pair(&model, &model).await.unwrap();
        assert_eq!(m, p);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
