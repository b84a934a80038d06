//! Image input: read a label photo from disk, detect its MIME type, and
//! base64-encode it for inline submission.

use crate::llm::ImageAttachment;
use anyhow::{Context, Result, bail};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use std::path::Path;

/// Declared type when neither magic bytes nor the extension identify one.
const FALLBACK_MIME: &str = "image/jpeg";

#[must_use]
pub fn detect_mime(data: &[u8]) -> Option<String> {
    infer::get(data).map(|info| info.mime_type().to_string())
}

#[must_use]
pub fn detect_mime_from_extension(filename: &str) -> Option<String> {
    let ext = filename.rsplit('.').next()?;
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => Some("image/jpeg".into()),
        "png" => Some("image/png".into()),
        "gif" => Some("image/gif".into()),
        "webp" => Some("image/webp".into()),
        "heic" => Some("image/heic".into()),
        _ => None,
    }
}

/// Load an image file into an [`ImageAttachment`].
///
/// Non-image files (a detected non-image MIME type) are rejected at this
/// boundary; undetectable content falls back to `image/jpeg`.
pub fn load_image(path: &Path) -> Result<ImageAttachment> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("failed to read image file {}", path.display()))?;
    if bytes.is_empty() {
        bail!("image file {} is empty", path.display());
    }

    let mime_type = detect_mime(&bytes)
        .or_else(|| {
            path.file_name()
                .and_then(|name| name.to_str())
                .and_then(detect_mime_from_extension)
        })
        .unwrap_or_else(|| FALLBACK_MIME.to_string());

    if !mime_type.starts_with("image/") {
        bail!("{} is not an image (detected {mime_type})", path.display());
    }

    Ok(ImageAttachment {
        data: BASE64.encode(&bytes),
        mime_type,
    })
}
