/// Shared types, configuration, and errors for cgrip.
///
/// This crate contains the pixel buffer, color and palette types, material
/// map descriptors, and configuration logic used across the cgrip workspace.

pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod matmap;
pub mod palette;

pub use color::Color;
pub use config::RipConfig;
pub use error::CoreError;
pub use frame::PixelBuffer;
pub use matmap::{MapKind, MapSelection, NormalType, Quality};
pub use palette::Palette;
