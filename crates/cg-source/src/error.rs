use std::path::PathBuf;

use thiserror::Error;

/// Errors originating from the source module.
#[derive(Error, Debug)]
pub enum SourceError {
    /// Image decode or encode failure.
    #[error("Erreur image {path} : {source}")]
    Image {
        /// File involved.
        path: PathBuf,
        /// Underlying codec error.
        source: image::ImageError,
    },

    /// Filesystem failure.
    #[error("Erreur d'E/S : {0}")]
    Io(#[from] std::io::Error),

    /// Decoded pixels disagree with the decoded dimensions.
    #[error(transparent)]
    Core(#[from] cg_core::CoreError),

    /// The downloads catalog header is not the expected layout.
    #[error("Format de downloads.csv inattendu : {0}")]
    CatalogFormat(String),

    /// A catalog line ended before the required columns.
    #[error("Fin de ligne inattendue dans downloads.csv, ligne {line}")]
    CatalogLine {
        /// 1-based line number.
        line: usize,
    },

    /// HTTP request failure.
    #[error("Erreur HTTP {url} : {message}")]
    Http {
        /// Requested URL.
        url: String,
        /// Transport or status error.
        message: String,
    },

    /// The material archive is not a readable zip.
    #[error("Archive zip illisible : {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A material path is not a directory.
    #[error("{0} n'est pas un dossier de matériau valide")]
    NotAFolder(PathBuf),
}
