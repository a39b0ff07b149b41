use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::member::AvatarImage;

/// Display thumbnails are bounded to this edge length; the data URI keeps
/// the original bytes untouched.
pub const AVATAR_THUMBNAIL_MAX: u32 = 256;

#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("failed to read avatar file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode avatar image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Reads and decodes a user-picked photo. This is the only asynchronous
/// operation in the widget; failures surface as recoverable workflow
/// errors, never as a hang.
pub async fn load_avatar(path: &Path) -> Result<AvatarImage, AvatarError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| AvatarError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    decode_avatar_bytes(&bytes, mime.essence_str())
}

/// Decodes image bytes into display pixels plus a self-contained
/// `data:<mime>;base64,<payload>` URI built from the original bytes.
pub fn decode_avatar_bytes(bytes: &[u8], mime: &str) -> Result<AvatarImage, AvatarError> {
    let dynamic = image::load_from_memory(bytes)?;
    let resized = dynamic
        .thumbnail(AVATAR_THUMBNAIL_MAX, AVATAR_THUMBNAIL_MAX)
        .to_rgba8();
    let width = resized.width() as usize;
    let height = resized.height() as usize;
    Ok(AvatarImage {
        data_uri: format!("data:{mime};base64,{}", STANDARD.encode(bytes)),
        width,
        height,
        rgba: resized.into_raw(),
    })
}
