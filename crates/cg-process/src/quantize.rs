use cg_core::color::Color;
use cg_core::error::CoreError;
use cg_core::frame::PixelBuffer;
use cg_core::palette::Palette;

use crate::dither::dither_index;
use crate::distance::DistanceTables;

/// Quantifie `buffer` sur `palette` par tramage Bayer, en place.
///
/// R, G and B of every pixel are replaced by the dithered palette color; the
/// alpha channel is left as it was.
///
/// # Errors
/// Returns [`CoreError::EmptyPalette`] before touching any pixel if the palette has no entry.
///
/// # Example
/// ```
/// use cg_core::color::Color;
/// use cg_core::frame::PixelBuffer;
/// use cg_core::palette::Palette;
/// use cg_process::distance::DistanceTables;
/// use cg_process::quantize::quantize;
///
/// let tables = DistanceTables::new();
/// let mut buf = PixelBuffer::filled(4, 4, Color::new(250, 250, 250, 128));
/// quantize(&mut buf, &Palette::load_default(), &tables).unwrap();
/// assert_eq!(buf.pixel(0, 0).a, 128);
/// ```
pub fn quantize(
    buffer: &mut PixelBuffer,
    palette: &Palette,
    tables: &DistanceTables,
) -> Result<(), CoreError> {
    if palette.is_empty() {
        return Err(CoreError::EmptyPalette);
    }

    let width = buffer.width() as usize;
    if width == 0 {
        return Ok(());
    }

    for (row_idx, row) in buffer.data_mut().chunks_exact_mut(width * 4).enumerate() {
        let y = row_idx as u32;
        for (col_idx, px) in row.chunks_exact_mut(4).enumerate() {
            let x = col_idx as u32;
            let color = Color::from_rgba(px);
            let idx = dither_index(tables, palette, color, x, y);
            let out = palette.get(idx);
            px[0] = out.r;
            px[1] = out.g;
            px[2] = out.b;
        }
    }

    Ok(())
}
