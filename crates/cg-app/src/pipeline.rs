use std::path::Path;

use anyhow::{Context, Result};
use cg_core::config::RipConfig;
use cg_core::matmap::MapKind;
use cg_core::palette::Palette;
use cg_process::distance::DistanceTables;
use cg_process::{quantize, scale_nearest};
use cg_source::catalog::{downloads_url, entries_for_quality, parse_downloads_csv};
use cg_source::download::{download_material, fetch_catalog};
use cg_source::{Fetch, Material};

/// Résumé du traitement d'un matériau.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProcessReport {
    /// The albedo was quantized.
    pub quantized: bool,
    /// Maps resized to their target size.
    pub scaled: usize,
    /// Maps left untouched after a failure.
    pub failed: usize,
}

/// Choisir la palette de quantification selon la config.
///
/// Returns `None` when quantization is off, or when the palette image
/// yields no color (a warning is logged and the albedo is left as is).
#[must_use]
pub fn resolve_palette(config: &RipConfig) -> Option<Palette> {
    if !config.quantize {
        return None;
    }
    let palette = match config.palette {
        Some(ref path) => cg_source::image::load_palette(path),
        None => Palette::load_default(),
    };
    if palette.is_empty() {
        log::warn!("Palette vide, quantification ignorée.");
        return None;
    }
    log::debug!("Palette : {} couleurs", palette.len());
    Some(palette)
}

/// Apply quantization then downscaling to every loaded map of `material`.
///
/// Only the albedo is quantized. A failing map is logged and kept as loaded.
pub fn process_material(
    material: &mut Material,
    config: &RipConfig,
    tables: &DistanceTables,
    palette: Option<&Palette>,
) -> ProcessReport {
    let mut report = ProcessReport::default();
    let id = material.id.clone();

    if let Some(palette) = palette
        && let Some(albedo) = material.map_mut(MapKind::Color)
    {
        match quantize(albedo, palette, tables) {
            Ok(()) => report.quantized = true,
            Err(e) => {
                log::warn!("{id} : quantification impossible : {e}");
                report.failed += 1;
            }
        }
    }

    for (kind, map) in material.maps_mut() {
        let Some((width, height)) = config.target_size(kind) else {
            continue;
        };
        match scale_nearest(map, width, height) {
            Ok(()) => report.scaled += 1,
            Err(e) => {
                log::warn!("{id} : réduction de {} impossible : {e}", kind.suffix());
                report.failed += 1;
            }
        }
    }

    report
}

/// Load, process and save one extracted material folder.
///
/// # Errors
/// Returns an error if the folder cannot be read or a map cannot be written.
pub fn rip_folder(
    dir: &Path,
    config: &RipConfig,
    tables: &DistanceTables,
    palette: Option<&Palette>,
) -> Result<usize> {
    let material = Material::from_folder(dir, config.quality)
        .with_context(|| format!("Lecture de {}", dir.display()))?;
    rip_material(material, config, tables, palette)
}

/// Télécharge les `ids` depuis AmbientCG, puis traite et sauvegarde chaque matériau.
///
/// Archives are processed one at a time. A material that fails to download
/// or save is logged and counted; the returned value is that failure count.
///
/// # Errors
/// Returns an error if the downloads catalog cannot be fetched or parsed.
pub fn rip_downloads<F: Fetch + ?Sized>(
    fetcher: &F,
    ids: &[String],
    config: &RipConfig,
    zip_dir: Option<&Path>,
    tables: &DistanceTables,
    palette: Option<&Palette>,
) -> Result<usize> {
    let entries = fetch_catalog(fetcher, ids, config.quality).context("Catalogue AmbientCG")?;
    let mut failures = ids
        .iter()
        .filter(|id| !entries.iter().any(|e| e.asset_id == **id))
        .count();

    for entry in &entries {
        let result = download_material(fetcher, entry, config.quality, zip_dir)
            .with_context(|| format!("Téléchargement de {}", entry.asset_id))
            .and_then(|material| rip_material(material, config, tables, palette));
        match result {
            Ok(n) => log::info!("{} : {n} cartes écrites", entry.asset_id),
            Err(e) => {
                log::error!("{e:#}");
                failures += 1;
            }
        }
    }
    Ok(failures)
}

/// Process then save `material`; returns the number of maps written.
fn rip_material(
    mut material: Material,
    config: &RipConfig,
    tables: &DistanceTables,
    palette: Option<&Palette>,
) -> Result<usize> {
    if material.map_count() == 0 {
        log::warn!("{} : aucune carte trouvée", material.id);
        return Ok(0);
    }

    let report = process_material(&mut material, config, tables, palette);
    log::debug!("{} : {report:?}", material.id);

    let written = material
        .save(&config.output, &config.maps)
        .with_context(|| format!("Écriture de {}", material.id))?;
    Ok(written.len())
}

/// Liens d'archive des `ids` à la qualité demandée, depuis un `downloads.csv` local.
///
/// An empty `ids` keeps every material of the catalog.
///
/// # Errors
/// Returns an error if the file cannot be read or is not a downloads catalog.
pub fn catalog_links(csv_path: &Path, ids: &[String], config: &RipConfig) -> Result<Vec<String>> {
    log::info!("Catalogue en ligne : {}", downloads_url(ids));
    let text = std::fs::read_to_string(csv_path)
        .with_context(|| format!("Lecture de {}", csv_path.display()))?;
    let entries = parse_downloads_csv(&text)?;

    let links = entries_for_quality(&entries, config.quality)
        .into_iter()
        .filter(|e| ids.is_empty() || ids.iter().any(|id| *id == e.asset_id))
        .map(|e| e.raw_link.clone())
        .collect::<Vec<_>>();
    if links.is_empty() {
        log::warn!("Aucun lien {} trouvé", config.quality.attribute());
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cg_core::color::Color;
    use cg_core::config::Downscale;
    use cg_core::frame::PixelBuffer;
    use cg_core::matmap::Quality;
    use cg_source::SourceError;
    use std::collections::HashMap;
    use std::io::{Cursor, Write};

    fn material() -> Material {
        let mut mat = Material::new("Tiles101", Quality::Png1k);
        mat.set_map(MapKind::Color, PixelBuffer::filled(8, 8, Color::new(250, 5, 5, 255)));
        mat.set_map(MapKind::Roughness, PixelBuffer::filled(8, 8, Color::new(77, 77, 77, 255)));
        mat
    }

    fn config(downscale: Option<(u32, u32)>, macro_scale: u32) -> RipConfig {
        let mut config = RipConfig {
            downscale: downscale.map(|(width, height)| Downscale { width, height }),
            macro_scale,
            ..RipConfig::default()
        };
        config.sanitize();
        config
    }

    #[test]
    fn nothing_to_do_without_options() {
        let mut mat = material();
        let before = mat.clone();
        let report = process_material(&mut mat, &config(None, 1), &DistanceTables::new(), None);
        assert_eq!(report, ProcessReport::default());
        assert_eq!(mat.map(MapKind::Color), before.map(MapKind::Color));
    }

    #[test]
    fn macro_applies_to_non_albedo_maps() {
        let mut mat = material();
        let report = process_material(&mut mat, &config(Some((2, 2)), 2), &DistanceTables::new(), None);
        assert_eq!(report.scaled, 2);
        let color = mat.map(MapKind::Color).unwrap();
        assert_eq!((color.width(), color.height()), (2, 2));
        let rough = mat.map(MapKind::Roughness).unwrap();
        assert_eq!((rough.width(), rough.height()), (4, 4));
    }

    #[test]
    fn only_albedo_is_quantized() {
        let mut mat = material();
        let palette = Palette::load_default();
        let report = process_material(
            &mut mat,
            &config(None, 1),
            &DistanceTables::new(),
            Some(&palette),
        );
        assert!(report.quantized);
        let albedo = mat.map(MapKind::Color).unwrap().pixel(3, 3);
        assert!(palette.entries().iter().any(|c| *c == [albedo.r, albedo.g, albedo.b]));
        assert_eq!(
            mat.map(MapKind::Roughness).unwrap().pixel(0, 0),
            Color::new(77, 77, 77, 255)
        );
    }

    #[test]
    fn empty_palette_disables_quantization() {
        let dir = tempfile::tempdir().unwrap();
        let config = RipConfig {
            quantize: true,
            palette: Some(dir.path().join("missing.png")),
            ..RipConfig::default()
        };
        assert!(resolve_palette(&config).is_none());
        assert!(resolve_palette(&RipConfig::default()).is_none());
        let default = RipConfig {
            quantize: true,
            ..RipConfig::default()
        };
        assert_eq!(resolve_palette(&default).map(|p| p.len()), Some(32));
    }

    #[test]
    fn rip_folder_writes_selected_maps() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let dir = src.path().join("Tiles101");
        std::fs::create_dir(&dir).unwrap();
        cg_source::image::save_pixels(
            &PixelBuffer::filled(8, 8, Color::new(1, 2, 3, 255)),
            &dir.join("Tiles101_1K-PNG_Color.png"),
        )
        .unwrap();

        let mut config = config(Some((4, 4)), 1);
        config.output = out.path().to_path_buf();
        let written = rip_folder(&dir, &config, &DistanceTables::new(), None).unwrap();
        assert_eq!(written, 1);
        let saved =
            cg_source::image::load_pixels(&out.path().join("Tiles101_1K-PNG_Color.png")).unwrap();
        assert_eq!((saved.width(), saved.height()), (4, 4));
    }

    struct MemoryFetcher(HashMap<String, Vec<u8>>);

    impl Fetch for MemoryFetcher {
        fn fetch(&self, url: &str) -> Result<Vec<u8>, SourceError> {
            self.0.get(url).cloned().ok_or_else(|| SourceError::Http {
                url: url.to_string(),
                message: "404".into(),
            })
        }
    }

    fn color_archive(name: &str) -> Vec<u8> {
        let mut png = Vec::new();
        image::RgbaImage::from_pixel(8, 8, image::Rgba([10, 200, 30, 255]))
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        writer
            .start_file(name, zip::write::SimpleFileOptions::default())
            .unwrap();
        writer.write_all(&png).unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn rip_downloads_processes_each_archive() {
        let ids = vec!["Fabric026".to_string(), "Missing999".to_string()];
        let fetcher = MemoryFetcher(HashMap::from([
            (
                downloads_url(&ids),
                b"assetId,downloadAttribute,filetype,size,downloadLink,rawLink\n\
                  Fabric026,1K-PNG,zip,1,https://d/f,https://raw/Fabric026.zip\n"
                    .to_vec(),
            ),
            (
                "https://raw/Fabric026.zip".to_string(),
                color_archive("Fabric026_1K-PNG_Color.png"),
            ),
        ]));
        let out = tempfile::tempdir().unwrap();
        let zips = tempfile::tempdir().unwrap();
        let mut config = config(Some((2, 2)), 1);
        config.output = out.path().to_path_buf();

        let failures = rip_downloads(
            &fetcher,
            &ids,
            &config,
            Some(zips.path()),
            &DistanceTables::new(),
            None,
        )
        .unwrap();
        // Missing999 absent du catalogue
        assert_eq!(failures, 1);
        let saved =
            cg_source::image::load_pixels(&out.path().join("Fabric026_1K-PNG_Color.png")).unwrap();
        assert_eq!((saved.width(), saved.height()), (2, 2));
        assert!(zips.path().join("Fabric026_1K-PNG.zip").exists());
    }

    #[test]
    fn rip_downloads_fails_without_catalog() {
        let fetcher = MemoryFetcher(HashMap::new());
        let ids = vec!["Fabric026".to_string()];
        assert!(
            rip_downloads(&fetcher, &ids, &RipConfig::default(), None, &DistanceTables::new(), None)
                .is_err()
        );
    }

    #[test]
    fn catalog_links_filter_ids_and_quality() {
        let dir = tempfile::tempdir().unwrap();
        let csv = dir.path().join("downloads.csv");
        std::fs::write(
            &csv,
            "assetId,downloadAttribute,filetype,size,downloadLink,rawLink\n\
             Rock030,1K-PNG,zip,1,https://d/1,https://r/Rock030_1K.zip\n\
             Rock030,2K-PNG,zip,1,https://d/2,https://r/Rock030_2K.zip\n\
             Moss002,1K-PNG,zip,1,https://d/3,https://r/Moss002_1K.zip\n",
        )
        .unwrap();

        let config = RipConfig::default();
        let links = catalog_links(&csv, &["Rock030".to_string()], &config).unwrap();
        assert_eq!(links, vec!["https://r/Rock030_1K.zip"]);
        assert_eq!(catalog_links(&csv, &[], &config).unwrap().len(), 2);
    }
}
