use crate::color::Color;

/// Palette par défaut d'Aseprite, 32 entrées RGB.
///
/// L'index 0 sert de sentinelle de transparence.
pub const DEFAULT_PALETTE: [[u8; 3]; 32] = [
    [0x00, 0x00, 0x00],
    [0x22, 0x20, 0x34],
    [0x45, 0x28, 0x3c],
    [0x66, 0x39, 0x31],
    [0x8f, 0x56, 0x3b],
    [0xdf, 0x71, 0x26],
    [0xd9, 0xa0, 0x66],
    [0xee, 0xc3, 0x9a],
    [0xfb, 0xf2, 0x36],
    [0x99, 0xe5, 0x50],
    [0x6a, 0xbe, 0x30],
    [0x37, 0x94, 0x6e],
    [0x4b, 0x69, 0x2f],
    [0x52, 0x4b, 0x24],
    [0x32, 0x3c, 0x39],
    [0x3f, 0x3f, 0x74],
    [0x30, 0x60, 0x82],
    [0x5b, 0x6e, 0xe1],
    [0x63, 0x9b, 0xff],
    [0x5f, 0xcd, 0xe4],
    [0xcb, 0xdb, 0xfc],
    [0xff, 0xff, 0xff],
    [0x9b, 0xad, 0xb7],
    [0x84, 0x7e, 0x87],
    [0x69, 0x6a, 0x6a],
    [0x59, 0x56, 0x52],
    [0x76, 0x42, 0x8a],
    [0xac, 0x32, 0x32],
    [0xd9, 0x57, 0x63],
    [0xd7, 0x7b, 0xba],
    [0x8f, 0x97, 0x4a],
    [0x8a, 0x6f, 0x30],
];

/// Ensemble ordonné et indexé de couleurs.
///
/// `Borrowed` wraps process-wide constant storage and is never freed;
/// `Owned` holds entries decoded from a reference image.
///
/// Index 0 is the transparency sentinel: [`Palette::get`] always reports
/// alpha 0 for it and alpha 255 for every other index.
///
/// # Example
/// ```
/// use cg_core::palette::Palette;
/// let p = Palette::load_default();
/// assert_eq!(p.len(), 32);
/// assert_eq!(p.get(0).a, 0);
/// assert_eq!(p.get(5).a, 255);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Palette {
    /// Constant storage, never released.
    Borrowed(&'static [[u8; 3]]),
    /// Heap storage owned by this palette.
    Owned(Vec<[u8; 3]>),
}

impl Palette {
    /// The built-in 32-entry palette.
    #[must_use]
    pub const fn load_default() -> Self {
        Self::Borrowed(&DEFAULT_PALETTE)
    }

    /// Palette vide. État d'erreur : à rejeter avant tout matching.
    #[must_use]
    pub const fn empty() -> Self {
        Self::Owned(Vec::new())
    }

    /// Build an owned palette from packed RGB triplets (24 bits per entry).
    ///
    /// A trailing partial triplet is ignored.
    ///
    /// # Example
    /// ```
    /// use cg_core::palette::Palette;
    /// let p = Palette::from_rgb_bytes(&[0, 0, 0, 255, 0, 0, 7]);
    /// assert_eq!(p.len(), 2);
    /// assert_eq!(p.get(1).r, 255);
    /// ```
    #[must_use]
    pub fn from_rgb_bytes(data: &[u8]) -> Self {
        Self::Owned(
            data.chunks_exact(3)
                .map(|px| [px[0], px[1], px[2]])
                .collect(),
        )
    }

    /// Raw RGB entries, index 0 first.
    #[inline(always)]
    #[must_use]
    pub fn entries(&self) -> &[[u8; 3]] {
        match self {
            Self::Borrowed(data) => *data,
            Self::Owned(data) => data.as_slice(),
        }
    }

    /// Number of entries.
    #[inline(always)]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// True when the palette holds no entry (decode failure).
    #[inline(always)]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// True when this palette owns its storage.
    #[must_use]
    pub const fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    /// Color at `idx`. Alpha is forced: 0 for index 0, 255 otherwise.
    ///
    /// The caller guarantees `idx < self.len()`.
    ///
    /// # Panics
    /// Panics if `idx` is out of range.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, idx: usize) -> Color {
        debug_assert!(idx < self.len(), "palette index out of range");
        let [r, g, b] = self.entries()[idx];
        Color {
            r,
            g,
            b,
            a: if idx == 0 { 0 } else { 255 },
        }
    }

    /// Libère la palette. No-op for the built-in constant.
    ///
    /// # Example
    /// ```
    /// use cg_core::palette::Palette;
    /// Palette::load_default().release();
    /// Palette::from_rgb_bytes(&[1, 2, 3]).release();
    /// ```
    pub fn release(self) {
        match self {
            Self::Borrowed(_) => {}
            Self::Owned(data) => drop(data),
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::load_default()
    }
}
