//! Nearest-color matching with branch-and-bound pruning.

use cg_core::color::Color;
use cg_core::palette::Palette;

use crate::distance::{DistanceTables, bucket, delta_index};

/// Index de la couleur de palette la plus proche de `color`.
///
/// Transparent input maps to the sentinel index 0 without searching. The
/// search covers indices `1..len`; distances accumulate green, red, blue,
/// then alpha, and a candidate is dropped as soon as its partial sum reaches
/// the best total so far. An exact (zero-distance) candidate ends the scan.
/// Ties keep the first candidate.
///
/// With a single-entry palette every input maps to 0.
///
/// # Example
/// ```
/// use cg_core::color::Color;
/// use cg_core::palette::Palette;
/// use cg_process::distance::DistanceTables;
/// use cg_process::nearest::nearest;
///
/// let tables = DistanceTables::new();
/// let palette = Palette::load_default();
/// assert_eq!(nearest(&tables, &palette, Color::new(255, 255, 255, 255)), 21);
/// assert_eq!(nearest(&tables, &palette, Color::new(255, 255, 255, 0)), 0);
/// ```
#[must_use]
pub fn nearest(tables: &DistanceTables, palette: &Palette, color: Color) -> usize {
    if color.is_transparent() {
        return 0;
    }

    let r = bucket(color.r);
    let g = bucket(color.g);
    let b = bucket(color.b);
    let a = bucket(color.a);
    // Les entrées de palette hors sentinelle sont opaques.
    let pa = bucket(255);

    let mut best_fit = 0;
    let mut lowest = u32::MAX;

    for (i, &[pr, pg, pb]) in palette.entries().iter().enumerate().skip(1) {
        let mut diff = tables.green(delta_index(bucket(pg), g));
        if diff >= lowest {
            continue;
        }
        diff += tables.red(delta_index(bucket(pr), r));
        if diff >= lowest {
            continue;
        }
        diff += tables.blue(delta_index(bucket(pb), b));
        if diff >= lowest {
            continue;
        }
        diff += tables.alpha(delta_index(pa, a));
        if diff >= lowest {
            continue;
        }
        if diff == 0 {
            return i;
        }
        best_fit = i;
        lowest = diff;
    }

    best_fit
}
