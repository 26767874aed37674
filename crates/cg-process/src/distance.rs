//! Tables de distance couleur pré-calculées.
//!
//! Each channel is reduced to a 5-bit bucket (`value >> 3`). A table maps the
//! wrapped bucket delta `(a − b) & 0x7F` to a weighted squared distance, so
//! `t[i] == t[128 − i]` and one unsigned index covers both signs.

/// Entries per channel table.
pub const TABLE_LEN: usize = 128;

/// Channel weights, squared in the tables. Green dominates.
const WEIGHT_G: u32 = 59;
const WEIGHT_R: u32 = 30;
const WEIGHT_B: u32 = 11;
const WEIGHT_A: u32 = 8;

/// Reduce an 8-bit channel to its 5-bit bucket.
#[inline(always)]
#[must_use]
pub fn bucket(channel: u8) -> u8 {
    channel >> 3
}

/// Wrapped table index for the delta between two buckets.
#[inline(always)]
#[must_use]
pub fn delta_index(a: u8, b: u8) -> usize {
    usize::from(a.wrapping_sub(b) & 0x7F)
}

/// Four weighted distance tables, one per channel.
///
/// Built once, read-only afterwards; share it by reference between any
/// number of pixel operations.
///
/// # Example
/// ```
/// use cg_process::distance::DistanceTables;
/// let tables = DistanceTables::new();
/// assert_eq!(tables.green(0), 0);
/// assert_eq!(tables.green(1), tables.green(127));
/// assert!(tables.green(1) > tables.red(1));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DistanceTables {
    g: [u32; TABLE_LEN],
    r: [u32; TABLE_LEN],
    b: [u32; TABLE_LEN],
    a: [u32; TABLE_LEN],
}

impl DistanceTables {
    /// Build all four tables.
    #[must_use]
    pub fn new() -> Self {
        let mut t = Self {
            g: [0; TABLE_LEN],
            r: [0; TABLE_LEN],
            b: [0; TABLE_LEN],
            a: [0; TABLE_LEN],
        };
        for i in 1..TABLE_LEN / 2 {
            let k = (i * i) as u32;
            let mirror = TABLE_LEN - i;
            t.g[i] = k * WEIGHT_G * WEIGHT_G;
            t.g[mirror] = t.g[i];
            t.r[i] = k * WEIGHT_R * WEIGHT_R;
            t.r[mirror] = t.r[i];
            t.b[i] = k * WEIGHT_B * WEIGHT_B;
            t.b[mirror] = t.b[i];
            t.a[i] = k * WEIGHT_A * WEIGHT_A;
            t.a[mirror] = t.a[i];
        }
        log::debug!("Tables de distance initialisées ({TABLE_LEN} entrées par canal)");
        t
    }

    /// Green distance for a wrapped delta index.
    #[inline(always)]
    #[must_use]
    pub fn green(&self, idx: usize) -> u32 {
        self.g[idx & 0x7F]
    }

    /// Red distance for a wrapped delta index.
    #[inline(always)]
    #[must_use]
    pub fn red(&self, idx: usize) -> u32 {
        self.r[idx & 0x7F]
    }

    /// Blue distance for a wrapped delta index.
    #[inline(always)]
    #[must_use]
    pub fn blue(&self, idx: usize) -> u32 {
        self.b[idx & 0x7F]
    }

    /// Alpha distance for a wrapped delta index.
    #[inline(always)]
    #[must_use]
    pub fn alpha(&self, idx: usize) -> u32 {
        self.a[idx & 0x7F]
    }
}

impl Default for DistanceTables {
    fn default() -> Self {
        Self::new()
    }
}
