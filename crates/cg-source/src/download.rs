//! Téléchargement des matériaux AmbientCG : catalogue CSV puis archives zip.
//!
//! The transport sits behind [`Fetch`] so the catalog and archive handling can
//! run against in-memory bytes.

use std::fs;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use cg_core::matmap::{MapKind, Quality};

use crate::catalog::{CatalogEntry, downloads_url, entries_for_quality, parse_downloads_csv};
use crate::error::SourceError;
use crate::image::decode_pixels;
use crate::material::Material;

/// Récupère le contenu complet d'une URL.
pub trait Fetch {
    /// Download `url` into memory.
    ///
    /// # Errors
    /// Returns an error on transport failure or non-success status.
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError>;
}

/// Blocking HTTP(S) client.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    /// Create a client with ureq's default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
        }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        log::debug!("GET {url}");
        let response = self.agent.get(url).call().map_err(|e| SourceError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        response.into_reader().read_to_end(&mut bytes)?;
        log::debug!("{url} -> {} o", bytes.len());
        Ok(bytes)
    }
}

/// Télécharge le catalogue des `ids` et garde les archives de la qualité demandée.
///
/// # Errors
/// Returns an error if the catalog cannot be downloaded or parsed.
pub fn fetch_catalog<F: Fetch + ?Sized>(
    fetcher: &F,
    ids: &[String],
    quality: Quality,
) -> Result<Vec<CatalogEntry>, SourceError> {
    let url = downloads_url(ids);
    log::info!("Téléchargement de {url}");
    let csv = fetcher.fetch(&url)?;
    let entries = parse_downloads_csv(&String::from_utf8_lossy(&csv))?;

    let selected: Vec<CatalogEntry> = entries_for_quality(&entries, quality)
        .into_iter()
        .cloned()
        .collect();
    for id in ids {
        if !selected.iter().any(|e| e.asset_id == *id) {
            log::warn!("{id} : aucune archive {} dans le catalogue", quality.attribute());
        }
    }
    log::info!("{} matériaux trouvés", selected.len());
    Ok(selected)
}

/// Download one archive and decode the maps it contains.
///
/// With `zip_dir`, the archive is also written there as `{id}_{attribute}.zip`.
///
/// # Errors
/// Returns an error if the archive cannot be downloaded, saved, or opened.
pub fn download_material<F: Fetch + ?Sized>(
    fetcher: &F,
    entry: &CatalogEntry,
    quality: Quality,
    zip_dir: Option<&Path>,
) -> Result<Material, SourceError> {
    log::info!("Téléchargement du matériau {}", entry.asset_id);
    let bytes = fetcher.fetch(&entry.raw_link)?;

    if let Some(dir) = zip_dir {
        let path = save_archive(dir, entry, &bytes)?;
        log::info!("Écrit {}", path.display());
    }

    material_from_zip(&entry.asset_id, quality, &bytes)
}

fn save_archive(dir: &Path, entry: &CatalogEntry, bytes: &[u8]) -> Result<PathBuf, SourceError> {
    fs::create_dir_all(dir)?;
    let path = dir.join(format!("{}_{}.zip", entry.asset_id, entry.attribute));
    fs::write(&path, bytes)?;
    Ok(path)
}

/// Extrait les cartes d'une archive zip en mémoire.
///
/// Entries are classified by file-name suffix like a material folder; an
/// entry that fails to read or decode is logged and left absent.
///
/// # Errors
/// Returns [`SourceError::Zip`] if `bytes` is not a zip archive.
pub fn material_from_zip(id: &str, quality: Quality, bytes: &[u8]) -> Result<Material, SourceError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes))?;
    let mut material = Material::new(id, quality);

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() {
            continue;
        }
        let name = entry.name().to_string();
        log::debug!("{id} : {name}");
        let Some(kind) = MapKind::from_file_name(&name) else {
            continue;
        };

        let mut data = Vec::new();
        if let Err(e) = entry.read_to_end(&mut data) {
            log::warn!("{id} : lecture de {name} impossible : {e}");
            continue;
        }
        match decode_pixels(&data) {
            Ok(buf) => {
                log::debug!("trouvé {} ({}x{})", kind.suffix(), buf.width(), buf.height());
                material.set_map(kind, buf);
            }
            Err(e) => log::warn!("{id} : {name} : {e}"),
        }
    }

    log::info!("{id} : {} cartes extraites", material.map_count());
    Ok(material)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_core::color::Color;
    use std::collections::HashMap;
    use std::io::Write;

    struct MemoryFetcher(HashMap<String, Vec<u8>>);

    impl Fetch for MemoryFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.0.get(url).cloned().ok_or_else(|| SourceError::Http {
                url: url.to_string(),
                message: "404".into(),
            })
        }
    }

    fn png(rgba: [u8; 4]) -> Vec<u8> {
        let mut bytes = Vec::new();
        image::RgbaImage::from_pixel(4, 4, image::Rgba(rgba))
            .write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    fn zip_of(files: &[(&str, Vec<u8>)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        for (name, data) in files {
            writer.start_file(*name, options).unwrap();
            writer.write_all(data).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    const CSV: &str = "assetId,downloadAttribute,filetype,size,downloadLink,rawLink\n\
        Ground054,1K-PNG,zip,1,https://d/1,https://raw/Ground054_1K-PNG.zip\n\
        Ground054,2K-PNG,zip,1,https://d/2,https://raw/Ground054_2K-PNG.zip\n";

    fn fetcher() -> MemoryFetcher {
        let archive = zip_of(&[
            ("Ground054_1K-PNG_Color.png", png([120, 90, 40, 255])),
            ("Ground054_1K-PNG_NormalGL.png", png([128, 128, 255, 255])),
            ("Ground054.usdc", b"scene".to_vec()),
        ]);
        MemoryFetcher(HashMap::from([
            (downloads_url(&["Ground054"]), CSV.as_bytes().to_vec()),
            ("https://raw/Ground054_1K-PNG.zip".to_string(), archive),
        ]))
    }

    #[test]
    fn zip_entries_are_classified_by_suffix() {
        let archive = zip_of(&[
            ("Rock030_2K-PNG_Color.png", png([200, 10, 10, 255])),
            ("Rock030_2K-PNG_Roughness.png", b"broken".to_vec()),
            ("Rock030_2K-PNG.mtlx", b"<materialx/>".to_vec()),
        ]);
        let mat = material_from_zip("Rock030", Quality::Png2k, &archive).unwrap();
        assert_eq!(mat.map_count(), 1);
        assert_eq!(
            mat.map(MapKind::Color).map(|m| m.pixel(3, 3)),
            Some(Color::new(200, 10, 10, 255))
        );
        assert!(mat.map(MapKind::Roughness).is_none());
    }

    #[test]
    fn non_zip_bytes_are_rejected() {
        assert!(matches!(
            material_from_zip("x", Quality::Png1k, b"not a zip"),
            Err(SourceError::Zip(_))
        ));
    }

    #[test]
    fn catalog_keeps_requested_quality() {
        let entries = fetch_catalog(&fetcher(), &["Ground054".to_string()], Quality::Png1k).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].raw_link, "https://raw/Ground054_1K-PNG.zip");
    }

    #[test]
    fn catalog_transport_error_propagates() {
        let err = fetch_catalog(&fetcher(), &["Unknown001".to_string()], Quality::Png1k).unwrap_err();
        assert!(matches!(err, SourceError::Http { .. }));
    }

    #[test]
    fn download_decodes_and_saves_archive() {
        let fetcher = fetcher();
        let entries = fetch_catalog(&fetcher, &["Ground054".to_string()], Quality::Png1k).unwrap();
        let dir = tempfile::tempdir().unwrap();

        let mat = download_material(&fetcher, &entries[0], Quality::Png1k, Some(dir.path())).unwrap();
        assert_eq!(mat.id, "Ground054");
        assert_eq!(mat.map_count(), 2);
        assert!(mat.map(MapKind::NormalGl).is_some());
        assert!(dir.path().join("Ground054_1K-PNG.zip").exists());
    }

    #[test]
    fn missing_archive_is_an_http_error() {
        let entry = CatalogEntry {
            asset_id: "Ground054".into(),
            attribute: "2K-PNG".into(),
            raw_link: "https://raw/Ground054_2K-PNG.zip".into(),
        };
        assert!(matches!(
            download_material(&fetcher(), &entry, Quality::Png2k, None),
            Err(SourceError::Http { .. })
        ));
    }
}
