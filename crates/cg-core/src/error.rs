use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Matching or quantizing was requested against a palette with no entries.
    #[error("Palette vide : aucune couleur chargée")]
    EmptyPalette,

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Raw pixel data does not match the declared dimensions.
    #[error("Taille de buffer incohérente : {actual} octets pour {width}×{height}")]
    BufferSize {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
        /// Number of bytes actually provided.
        actual: usize,
    },

    /// The buffer has no backing storage to read from.
    #[error("Buffer source absent")]
    MissingPixels,

    /// The destination storage could not be reserved.
    #[error("Allocation impossible : {bytes} octets")]
    Allocation {
        /// Requested size in bytes.
        bytes: usize,
    },

    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),
}
