use std::fs;
use std::path::{Path, PathBuf};

use cg_core::frame::PixelBuffer;
use cg_core::matmap::{MAP_COUNT, MapKind, MapSelection, Quality};

use crate::error::SourceError;
use crate::image::{load_pixels, save_pixels};

/// Un matériau PBR : identifiant, qualité et cartes décodées.
///
/// # Example
/// ```
/// use cg_core::matmap::{MapKind, Quality};
/// use cg_source::material::Material;
/// let mat = Material::new("Bricks001", Quality::Png1k);
/// assert!(mat.map(MapKind::Color).is_none());
/// assert_eq!(mat.file_name(MapKind::Color), "Bricks001_1K-PNG_Color.png");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Material {
    /// Material ID, e.g. `Bricks001`.
    pub id: String,
    /// Texture resolution.
    pub quality: Quality,
    maps: [Option<PixelBuffer>; MAP_COUNT],
}

impl Material {
    /// Create a material without any map.
    #[must_use]
    pub fn new(id: impl Into<String>, quality: Quality) -> Self {
        Self {
            id: id.into(),
            quality,
            maps: Default::default(),
        }
    }

    /// Charge toutes les cartes reconnues d'un dossier de matériau extrait.
    ///
    /// The ID is the folder name. Files are classified by the suffix their
    /// name ends with; a map that fails to decode is logged and left absent.
    ///
    /// # Errors
    /// Returns an error if `dir` is not a directory or cannot be listed.
    pub fn from_folder(dir: &Path, quality: Quality) -> Result<Self, SourceError> {
        if !dir.is_dir() {
            return Err(SourceError::NotAFolder(dir.to_path_buf()));
        }
        let id = dir
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("material")
            .to_string();
        let mut material = Self::new(id, quality);

        let mut files: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(std::result::Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_file())
            .collect();
        files.sort();

        for path in files {
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            log::debug!("{} : {name}", material.id);
            let Some(kind) = MapKind::from_file_name(name) else {
                continue;
            };
            match load_pixels(&path) {
                Ok(buf) => {
                    log::debug!("trouvé {} ({}x{})", kind.suffix(), buf.width(), buf.height());
                    material.set_map(kind, buf);
                }
                Err(e) => log::warn!("{} : lecture de {name} impossible : {e}", material.id),
            }
        }

        log::info!("{} : {} cartes chargées", material.id, material.map_count());
        Ok(material)
    }

    /// Decoded map of `kind`, if present.
    #[must_use]
    pub fn map(&self, kind: MapKind) -> Option<&PixelBuffer> {
        self.maps[kind.index()].as_ref()
    }

    /// Mutable map of `kind`, if present.
    pub fn map_mut(&mut self, kind: MapKind) -> Option<&mut PixelBuffer> {
        self.maps[kind.index()].as_mut()
    }

    /// Insert or replace the map of `kind`.
    pub fn set_map(&mut self, kind: MapKind, buffer: PixelBuffer) {
        self.maps[kind.index()] = Some(buffer);
    }

    /// Iterate over present maps with their kind.
    pub fn maps_mut(&mut self) -> impl Iterator<Item = (MapKind, &mut PixelBuffer)> {
        MapKind::ALL
            .into_iter()
            .zip(self.maps.iter_mut())
            .filter_map(|(k, m)| m.as_mut().map(|m| (k, m)))
    }

    /// Number of maps present.
    #[must_use]
    pub fn map_count(&self) -> usize {
        self.maps.iter().filter(|m| m.is_some()).count()
    }

    /// Output file name for `kind`: `{id}_{quality}_{suffix}`.
    #[must_use]
    pub fn file_name(&self, kind: MapKind) -> String {
        format!("{}_{}_{}", self.id, self.quality.attribute(), kind.suffix())
    }

    /// Écrit les cartes présentes et sélectionnées dans `out_dir`.
    ///
    /// Returns the written paths.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be created or a map cannot be encoded.
    pub fn save(&self, out_dir: &Path, selection: &MapSelection) -> Result<Vec<PathBuf>, SourceError> {
        fs::create_dir_all(out_dir)?;
        let mut written = Vec::new();
        for kind in MapKind::ALL {
            if !selection.contains(kind) {
                continue;
            }
            let Some(buf) = self.map(kind) else {
                log::debug!("{} : pas de {}", self.id, kind.suffix());
                continue;
            };
            let path = out_dir.join(self.file_name(kind));
            save_pixels(buf, &path)?;
            log::info!("Écrit {}", path.display());
            written.push(path);
        }
        Ok(written)
    }
}
