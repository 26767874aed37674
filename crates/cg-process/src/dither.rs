//! Algorithmique de Tramage Ordonné (Ordered Dithering) sur palette.
//! Alterne entre les deux couleurs de palette les plus proches selon la matrice de Bayer.

use cg_core::color::{Color, luma_distance};
use cg_core::palette::Palette;

use crate::distance::DistanceTables;
use crate::nearest::nearest;

/// Matrice de Bayer 8x8. Normalisée sur 64 niveaux (0-63).
pub const BAYER_8X8: [[u8; 8]; 8] = [
    [0, 32, 8, 40, 2, 34, 10, 42],
    [48, 16, 56, 24, 50, 18, 58, 26],
    [12, 44, 4, 36, 14, 46, 6, 38],
    [60, 28, 52, 20, 62, 30, 54, 22],
    [3, 35, 11, 43, 1, 33, 9, 41],
    [51, 19, 59, 27, 49, 17, 57, 25],
    [15, 47, 7, 39, 13, 45, 5, 37],
    [63, 31, 55, 23, 61, 29, 53, 21],
];

/// Seuil de Bayer pour la position (x, y). Les deux coordonnées sont réduites modulo 8.
///
/// # Example
/// ```
/// use cg_process::dither::bayer_threshold;
/// assert_eq!(bayer_threshold(0, 0), 0);
/// assert_eq!(bayer_threshold(1, 0), 32);
/// assert_eq!(bayer_threshold(8, 15), bayer_threshold(0, 7));
/// ```
#[inline(always)]
#[must_use]
pub fn bayer_threshold(x: u32, y: u32) -> u32 {
    u32::from(BAYER_8X8[(y & 7) as usize][(x & 7) as usize])
}

/// Push `c` away from its quantized value `q` by the same amount: `c − (q − c)`, clamped.
#[inline(always)]
fn extrapolate(c: u8, q: u8) -> u8 {
    (2 * i16::from(c) - i16::from(q)).clamp(0, 255) as u8
}

/// Choisit l'index de palette pour `color` au pixel (x, y) par tramage Bayer 8x8.
///
/// The nearest entry `c1` gives the quantization error; extrapolating the
/// input one step past that error gives a second candidate. When both
/// candidates differ, the input's position between them (BT.709-weighted,
/// scaled to 0..64) is compared against the Bayer threshold, so neighbouring
/// pixels alternate between the two entries in proportion.
///
/// # Example
/// ```
/// use cg_core::color::Color;
/// use cg_core::palette::Palette;
/// use cg_process::distance::DistanceTables;
/// use cg_process::dither::dither_index;
///
/// let tables = DistanceTables::new();
/// let palette = Palette::load_default();
/// let white = Color::new(255, 255, 255, 255);
/// assert_eq!(dither_index(&tables, &palette, white, 3, 5), 21);
/// ```
#[must_use]
pub fn dither_index(tables: &DistanceTables, palette: &Palette, color: Color, x: u32, y: u32) -> usize {
    if color.is_transparent() {
        return 0;
    }

    let idx1 = nearest(tables, palette, color);
    let c1 = palette.get(idx1);

    let c2 = Color {
        r: extrapolate(color.r, c1.r),
        g: extrapolate(color.g, c1.g),
        b: extrapolate(color.b, c1.b),
        a: extrapolate(color.a, c1.a),
    };
    let idx2 = nearest(tables, palette, c2);
    if idx1 == idx2 {
        return idx1;
    }

    let d = u64::from(luma_distance(c1, color));
    let span = u64::from(luma_distance(c1, palette.get(idx2)));
    // idx1 != idx2 implique des couleurs distinctes : les doublons de palette
    // se résolvent tous au premier index. Garde contre la division par zéro.
    if span == 0 {
        return idx1;
    }

    let fraction = 64 * d / span;
    if fraction > u64::from(bayer_threshold(x, y)) {
        idx2
    } else {
        idx1
    }
}
