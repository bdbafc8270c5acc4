//! Image upload: validate, decode and wrap user-selected bytes.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use ds_core::ObjectKind;
use image::ImageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no image data")]
    Empty,
    #[error("unrecognized image format")]
    UnsupportedFormat(#[source] ImageError),
    #[error("image decode failed: {0}")]
    Decode(#[from] ImageError),
    #[error("image has zero width or height")]
    ZeroSize,
}

/// A decoded upload, ready to become a canvas object.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportedImage {
    /// `data:<mime>;base64,<bytes>` of the original upload.
    pub src: String,
    pub width: u32,
    pub height: u32,
    /// Uniform display scale that fits the requested width.
    pub scale: f32,
}

impl ImportedImage {
    pub fn into_kind(self) -> ObjectKind {
        ObjectKind::Image {
            src: self.src,
            width: self.width,
            height: self.height,
            scale: self.scale,
        }
    }
}

/// Fully decode `bytes` (so corrupt files are rejected here, not later) and
/// compute the scale that displays the image `target_width` pixels wide.
pub fn decode_image(bytes: &[u8], target_width: f32) -> Result<ImportedImage, ImportError> {
    if bytes.is_empty() {
        return Err(ImportError::Empty);
    }
    let format = image::guess_format(bytes).map_err(ImportError::UnsupportedFormat)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = (decoded.width(), decoded.height());
    if width == 0 || height == 0 {
        return Err(ImportError::ZeroSize);
    }
    log::debug!("decoded {format:?} upload: {width}x{height}");

    let src = format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes));
    Ok(ImportedImage {
        src,
        width,
        height,
        scale: target_width / width as f32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = Vec::new();
        DynamicImage::ImageRgba8(RgbaImage::new(width, height))
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn decodes_png_and_scales_to_width() {
        let image = decode_image(&png_bytes(400, 100), 200.0).unwrap();
        assert_eq!((image.width, image.height), (400, 100));
        assert_eq!(image.scale, 0.5);
        assert!(image.src.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn rejects_empty_input() {
        assert!(matches!(decode_image(&[], 200.0), Err(ImportError::Empty)));
    }

    #[test]
    fn rejects_unknown_format() {
        assert!(matches!(
            decode_image(b"definitely not an image", 200.0),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn rejects_truncated_png() {
        let bytes = png_bytes(64, 64);
        assert!(matches!(
            decode_image(&bytes[..40], 200.0),
            Err(ImportError::Decode(_))
        ));
    }

    #[test]
    fn into_kind_builds_image_object() {
        let kind = decode_image(&png_bytes(100, 50), 200.0).unwrap().into_kind();
        assert!(matches!(kind, ObjectKind::Image { width: 100, height: 50, scale, .. } if scale == 2.0));
    }
}
