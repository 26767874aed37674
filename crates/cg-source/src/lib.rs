/// Material sources for cgrip: image codec glue, downloads catalog, AmbientCG
/// archive downloads, and extracted material folders.

pub mod catalog;
pub mod download;
pub mod error;
pub mod image;
pub mod material;

pub use download::{Fetch, HttpFetcher};
pub use error::SourceError;
pub use material::Material;
