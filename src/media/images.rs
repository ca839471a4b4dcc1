//! Image decoding for record thumbnails.

use thiserror::Error;

/// Longest edge a decoded thumbnail may keep; larger photos are downscaled.
const MAX_THUMBNAIL_EDGE: u32 = 768;

/// Errors raised while decoding fetched image bytes.
#[derive(Debug, Error)]
pub enum ImageDecodeError {
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
}

/// Convert fetched image bytes into an egui color image.
pub fn decode_color_image(bytes: &[u8]) -> Result<egui::ColorImage, ImageDecodeError> {
    let decoded = image::load_from_memory(bytes)?;
    let decoded = if decoded.width() > MAX_THUMBNAIL_EDGE || decoded.height() > MAX_THUMBNAIL_EDGE {
        decoded.thumbnail(MAX_THUMBNAIL_EDGE, MAX_THUMBNAIL_EDGE)
    } else {
        decoded
    };
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(egui::ColorImage::from_rgba_unmultiplied(
        [width as usize, height as usize],
        rgba.as_raw(),
    ))
}
