/// Couleur RGBA 8 bits par canal. Toujours copiée par valeur.
///
/// # Example
/// ```
/// use cg_core::color::Color;
/// let c = Color::new(255, 0, 0, 255);
/// assert_eq!(c.r, 255);
/// assert!(!c.is_transparent());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha. 0 = fully transparent.
    pub a: u8,
}

impl Color {
    /// Build a color from its four channels.
    #[inline(always)]
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Build a color from the first four bytes of an RGBA pixel slice.
    ///
    /// # Example
    /// ```
    /// use cg_core::color::Color;
    /// let c = Color::from_rgba(&[1, 2, 3, 4]);
    /// assert_eq!(c, Color::new(1, 2, 3, 4));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn from_rgba(px: &[u8]) -> Self {
        Self {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }

    /// True when alpha is zero.
    #[inline(always)]
    #[must_use]
    pub const fn is_transparent(self) -> bool {
        self.a == 0
    }
}

/// Distance perceptuelle pondérée BT.709, utilisée pour le ratio de tramage.
///
/// `|Δr|·2126 + |Δg|·7152 + |Δb|·722` (only when both colors have non-zero
/// alpha) plus `|Δa|·20000`. Independent from the bucketed table metric used
/// for nearest-color matching.
///
/// # Example
/// ```
/// use cg_core::color::{Color, luma_distance};
/// let black = Color::new(0, 0, 0, 255);
/// let white = Color::new(255, 255, 255, 255);
/// assert_eq!(luma_distance(black, white), 255 * 10000);
/// assert_eq!(luma_distance(white, white), 0);
/// ```
#[inline(always)]
#[must_use]
pub fn luma_distance(a: Color, b: Color) -> u32 {
    let mut result = 0u32;
    if a.a != 0 && b.a != 0 {
        result += u32::from(a.r.abs_diff(b.r)) * 2126;
        result += u32::from(a.g.abs_diff(b.g)) * 7152;
        result += u32::from(a.b.abs_diff(b.b)) * 722;
    }
    result + u32::from(a.a.abs_diff(b.a)) * 20000
}
