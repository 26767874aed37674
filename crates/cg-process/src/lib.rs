//! Palette quantization and resampling engine for cgrip.
//!
//! Operates directly on RGBA pixel buffers: precomputed distance tables,
//! nearest-color matching, Bayer 8×8 ordered dithering, and nearest-neighbour
//! scaling.

pub mod distance;
pub mod dither;
pub mod nearest;
pub mod quantize;
pub mod scale;

pub use distance::DistanceTables;
pub use dither::dither_index;
pub use nearest::nearest;
pub use quantize::quantize;
pub use scale::{scale_nearest, scaled_nearest};
