use cg_core::error::CoreError;
use cg_core::frame::{PixelBuffer, rgba_len};

/// Construit une copie de `src` rééchantillonnée au plus proche voisin.
///
/// Each destination pixel `(i, j)` copies source pixel
/// `(floor(i * old_w / new_w), floor(j * old_h / new_h))`, all four channels.
///
/// # Errors
/// - [`CoreError::InvalidDimensions`] if a target dimension is 0.
/// - [`CoreError::MissingPixels`] if `src` has no storage; nothing is allocated.
/// - [`CoreError::Allocation`] if the destination storage cannot be reserved.
///
/// # Example
/// ```
/// use cg_core::frame::PixelBuffer;
/// use cg_process::scale::scaled_nearest;
/// let src = PixelBuffer::new(100, 100);
/// let dst = scaled_nearest(&src, 50, 25).unwrap();
/// assert_eq!((dst.width(), dst.height()), (50, 25));
/// ```
pub fn scaled_nearest(src: &PixelBuffer, new_width: u32, new_height: u32) -> Result<PixelBuffer, CoreError> {
    if new_width == 0 || new_height == 0 {
        return Err(CoreError::InvalidDimensions {
            width: new_width,
            height: new_height,
        });
    }
    if src.is_empty() {
        return Err(CoreError::MissingPixels);
    }

    let old_width = src.width();
    let old_height = src.height();
    let width_ratio = old_width as f32 / new_width as f32;
    let height_ratio = old_height as f32 / new_height as f32;

    let bytes = rgba_len(new_width, new_height);
    let mut data: Vec<u8> = Vec::new();
    data.try_reserve_exact(bytes)
        .map_err(|_| CoreError::Allocation { bytes })?;

    // Colonnes source pré-calculées, identiques pour chaque ligne.
    let columns: Vec<usize> = (0..new_width)
        .map(|i| source_coord(i, width_ratio, old_width))
        .collect();

    let old = src.data();
    let old_stride = old_width as usize * 4;
    for j in 0..new_height {
        let row_start = source_coord(j, height_ratio, old_height) * old_stride;
        for &col in &columns {
            let s = row_start + col * 4;
            data.extend_from_slice(&old[s..s + 4]);
        }
    }

    PixelBuffer::from_raw(new_width, new_height, data)
}

/// Rééchantillonne `buffer` en place au plus proche voisin.
///
/// The new storage is fully built before anything changes; on error the
/// buffer is left exactly as it was. On success the old storage is dropped
/// and storage, width and height are replaced together.
///
/// # Errors
/// Same as [`scaled_nearest`].
///
/// # Example
/// ```
/// use cg_core::frame::PixelBuffer;
/// use cg_process::scale::scale_nearest;
/// let mut buf = PixelBuffer::new(4, 4);
/// scale_nearest(&mut buf, 2, 2).unwrap();
/// assert_eq!(buf.data().len(), 2 * 2 * 4);
/// ```
pub fn scale_nearest(buffer: &mut PixelBuffer, new_width: u32, new_height: u32) -> Result<(), CoreError> {
    let scaled = scaled_nearest(buffer, new_width, new_height)?;
    log::debug!(
        "Redimensionnement {}x{} -> {new_width}x{new_height}",
        buffer.width(),
        buffer.height()
    );
    buffer.replace(scaled);
    Ok(())
}

/// `floor(dst * ratio)`, kept inside the source.
#[inline(always)]
fn source_coord(dst: u32, ratio: f32, old: u32) -> usize {
    let s = (dst as f32 * ratio) as u32;
    s.min(old - 1) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_core::color::Color;

    /// Chaque pixel encode ses coordonnées : (x, y, 0, 255).
    fn coord_buffer(w: u32, h: u32) -> PixelBuffer {
        let mut data = Vec::new();
        for y in 0..h {
            for x in 0..w {
                data.extend_from_slice(&[x as u8, y as u8, 0, 255]);
            }
        }
        PixelBuffer::from_raw(w, h, data).unwrap()
    }

    #[test]
    fn same_size_is_identity() {
        let src = coord_buffer(7, 5);
        let mut buf = src.clone();
        scale_nearest(&mut buf, 7, 5).unwrap();
        assert_eq!(buf, src);
    }

    #[test]
    fn halving_picks_even_pixels() {
        let mut buf = coord_buffer(4, 4);
        scale_nearest(&mut buf, 2, 2).unwrap();
        assert_eq!(buf.pixel(0, 0), Color::new(0, 0, 0, 255));
        assert_eq!(buf.pixel(1, 0), Color::new(2, 0, 0, 255));
        assert_eq!(buf.pixel(0, 1), Color::new(0, 2, 0, 255));
        assert_eq!(buf.pixel(1, 1), Color::new(2, 2, 0, 255));
    }

    #[test]
    fn upscaling_repeats_pixels() {
        let mut buf = coord_buffer(2, 1);
        scale_nearest(&mut buf, 4, 3).unwrap();
        let xs: Vec<u8> = (0..4).map(|x| buf.pixel(x, 2).r).collect();
        assert_eq!(xs, vec![0, 0, 1, 1]);
        assert_eq!(buf.pixel(3, 2).g, 0);
    }

    #[test]
    fn independent_axis_ratios() {
        let mut buf = coord_buffer(6, 3);
        scale_nearest(&mut buf, 2, 3).unwrap();
        assert_eq!(buf.pixel(1, 2), Color::new(3, 2, 0, 255));
    }

    #[test]
    fn alpha_is_copied_verbatim() {
        let mut buf = PixelBuffer::filled(3, 3, Color::new(1, 2, 3, 77));
        scale_nearest(&mut buf, 5, 2).unwrap();
        assert!(buf.data().chunks_exact(4).all(|px| px == [1, 2, 3, 77]));
    }

    #[test]
    fn missing_source_fails_untouched() {
        let mut buf = PixelBuffer::default();
        assert_eq!(scale_nearest(&mut buf, 2, 2), Err(CoreError::MissingPixels));
        assert_eq!(buf, PixelBuffer::default());
    }

    #[test]
    fn zero_target_fails_untouched() {
        let src = coord_buffer(3, 3);
        let mut buf = src.clone();
        assert!(matches!(
            scale_nearest(&mut buf, 0, 2),
            Err(CoreError::InvalidDimensions { width: 0, height: 2 })
        ));
        assert!(scale_nearest(&mut buf, 2, 0).is_err());
        assert_eq!(buf, src);
    }

    #[test]
    fn odd_ratio_never_reads_past_source() {
        let src = coord_buffer(255, 7);
        let dst = scaled_nearest(&src, 254, 6).unwrap();
        assert!(dst.pixel(253, 5).r < 255);
        assert!(dst.pixel(253, 5).g < 7);
    }
}
