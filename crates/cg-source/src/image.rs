use std::path::Path;

use cg_core::frame::PixelBuffer;
use cg_core::palette::Palette;

use crate::error::SourceError;

/// Charge une image depuis le disque en RGBA 8 bits.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use cg_source::image::load_pixels;
/// use std::path::Path;
/// let buf = load_pixels(Path::new("Bricks001_1K-PNG_Color.png")).unwrap();
/// ```
pub fn load_pixels(path: &Path) -> Result<PixelBuffer, SourceError> {
    let img = image::open(path).map_err(|source| SourceError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_raw(width, height, rgba.into_raw())?)
}

/// Décode une image encodée en mémoire (PNG, JPEG, BMP, GIF) en RGBA 8 bits.
///
/// # Errors
/// Returns an error if the bytes are not a supported image.
pub fn decode_pixels(bytes: &[u8]) -> Result<PixelBuffer, SourceError> {
    let img = image::load_from_memory(bytes).map_err(|source| SourceError::Image {
        path: "<mémoire>".into(),
        source,
    })?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PixelBuffer::from_raw(width, height, rgba.into_raw())?)
}

/// Write `buffer` as an RGBA PNG (format taken from the extension).
///
/// # Errors
/// Returns an error if the file cannot be encoded or written.
pub fn save_pixels(buffer: &PixelBuffer, path: &Path) -> Result<(), SourceError> {
    image::save_buffer(
        path,
        buffer.data(),
        buffer.width(),
        buffer.height(),
        image::ExtendedColorType::Rgba8,
    )
    .map_err(|source| SourceError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode a palette image: every pixel, in raster order, becomes one entry.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
pub fn try_load_palette(path: &Path) -> Result<Palette, SourceError> {
    let img = image::open(path).map_err(|source| SourceError::Image {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    Ok(Palette::from_rgb_bytes(rgb.as_raw()))
}

/// Charge une palette depuis une image. Returns an empty palette on failure.
///
/// Callers must check [`Palette::is_empty`] before matching against it.
///
/// # Example
/// ```
/// use cg_source::image::load_palette;
/// use std::path::Path;
/// let palette = load_palette(Path::new("does/not/exist.png"));
/// assert!(palette.is_empty());
/// ```
#[must_use]
pub fn load_palette(path: &Path) -> Palette {
    match try_load_palette(path) {
        Ok(palette) => {
            log::info!("Palette {} : {} couleurs", path.display(), palette.len());
            palette
        }
        Err(e) => {
            log::warn!("Impossible de charger la palette : {e}");
            Palette::empty()
        }
    }
}
