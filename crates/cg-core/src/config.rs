use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::matmap::{MapKind, MapSelection, Quality};

/// Configuration complète d'une exécution de cgrip.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use cg_core::config::RipConfig;
/// let config = RipConfig::default();
/// assert!(!config.quantize);
/// assert!(config.downscale.is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RipConfig {
    // === Sortie ===
    /// Output directory for processed maps.
    pub output: PathBuf,
    /// Texture resolution requested from the catalog.
    pub quality: Quality,
    /// Maps to write out.
    pub maps: MapSelection,

    // === Post-traitement ===
    /// Target size for every map. `None` = no scaling.
    pub downscale: Option<Downscale>,
    /// Multiplier applied to non-albedo targets. 0 = disabled.
    pub macro_scale: u32,
    /// Quantize the albedo against a palette.
    pub quantize: bool,
    /// Palette image. `None` = built-in palette.
    pub palette: Option<PathBuf>,
}

impl Default for RipConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from("."),
            quality: Quality::Png1k,
            maps: MapSelection::default(),
            downscale: None,
            macro_scale: 0,
            quantize: false,
            palette: None,
        }
    }
}

impl RipConfig {
    /// Drop values the pipeline cannot use and fall back to the albedo
    /// when no map is selected. Call once every layer has been applied.
    pub fn sanitize(&mut self) {
        self.drop_invalid_downscale();
        self.maps.or_albedo();
    }

    fn drop_invalid_downscale(&mut self) {
        if let Some(d) = self.downscale
            && (d.width == 0 || d.height == 0)
        {
            log::warn!("Taille de réduction invalide {}x{}, ignorée.", d.width, d.height);
            self.downscale = None;
        }
    }

    /// Target size for `kind`, macro multiplier included. `None` when not scaling.
    ///
    /// # Example
    /// ```
    /// use cg_core::config::{Downscale, RipConfig};
    /// use cg_core::matmap::MapKind;
    /// let config = RipConfig {
    ///     downscale: Some(Downscale { width: 64, height: 32 }),
    ///     macro_scale: 4,
    ///     ..RipConfig::default()
    /// };
    /// assert_eq!(config.target_size(MapKind::Color), Some((64, 32)));
    /// assert_eq!(config.target_size(MapKind::Roughness), Some((256, 128)));
    /// ```
    #[must_use]
    pub fn target_size(&self, kind: MapKind) -> Option<(u32, u32)> {
        let d = self.downscale?;
        if !kind.is_albedo() && self.macro_scale > 0 {
            Some((
                d.width.saturating_mul(self.macro_scale),
                d.height.saturating_mul(self.macro_scale),
            ))
        } else {
            Some((d.width, d.height))
        }
    }
}

/// Taille cible de réduction, au format `WxH`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Downscale {
    /// Target width in pixels.
    pub width: u32,
    /// Target height in pixels.
    pub height: u32,
}

impl Downscale {
    /// Parse `WxH`.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] if the text is not two integers separated by `x`.
    ///
    /// # Example
    /// ```
    /// use cg_core::config::Downscale;
    /// let d = Downscale::parse("128x64").unwrap();
    /// assert_eq!((d.width, d.height), (128, 64));
    /// assert!(Downscale::parse("128").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<Self, CoreError> {
        let bad = || CoreError::Config(format!("format de taille incorrect '{text}', attendu WxH"));
        let (w, h) = text.trim().split_once(['x', 'X']).ok_or_else(bad)?;
        let width = w.trim().parse().map_err(|_| bad())?;
        let height = h.trim().parse().map_err(|_| bad())?;
        Ok(Self { width, height })
    }
}

impl TryFrom<String> for Downscale {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Downscale> for String {
    fn from(value: Downscale) -> Self {
        format!("{}x{}", value.width, value.height)
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    output: Option<OutputSection>,
    process: Option<ProcessSection>,
    maps: Option<MapSelection>,
}

/// Output section, all fields optional for partial override.
#[derive(Deserialize)]
struct OutputSection {
    dir: Option<PathBuf>,
    quality: Option<Quality>,
}

/// Process section, all fields optional.
#[derive(Deserialize)]
struct ProcessSection {
    downscale: Option<Downscale>,
    macro_scale: Option<u32>,
    quantize: Option<bool>,
    palette: Option<PathBuf>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use cg_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("cgrip.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<RipConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Erreur de parsing TOML dans {}", path.display()))
}

/// Parse TOML text and merge it over the defaults.
///
/// # Errors
/// Returns an error if the text is not valid TOML for this layout.
///
/// # Example
/// ```
/// use cg_core::config::parse_config;
/// let config = parse_config("[process]\nquantize = true\n").unwrap();
/// assert!(config.quantize);
/// ```
pub fn parse_config(content: &str) -> Result<RipConfig> {
    let file: ConfigFile = toml::from_str(content)?;
    let mut config = RipConfig::default();

    if let Some(o) = file.output {
        if let Some(v) = o.dir {
            config.output = v;
        }
        if let Some(v) = o.quality {
            config.quality = v;
        }
    }
    if let Some(p) = file.process {
        if let Some(v) = p.downscale {
            config.downscale = Some(v);
        }
        if let Some(v) = p.macro_scale {
            config.macro_scale = v;
        }
        if let Some(v) = p.quantize {
            config.quantize = v;
        }
        if let Some(v) = p.palette {
            config.palette = Some(v);
        }
    }
    if let Some(v) = file.maps {
        config.maps = v;
    }

    // la sélection par défaut (albedo) attend les overrides CLI
    config.drop_invalid_downscale();
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matmap::NormalType;
    use std::io::Write;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = parse_config("[output]\ndir = \"out\"\n").unwrap();
        assert_eq!(config.output, PathBuf::from("out"));
        assert_eq!(config.quality, Quality::Png1k);
        assert!(config.downscale.is_none());
        assert!(config.maps.is_empty());
    }

    #[test]
    fn full_file_overrides_everything() {
        let text = r#"
            [output]
            dir = "textures"
            quality = "4k"

            [process]
            downscale = "64x32"
            macro_scale = 2
            quantize = true
            palette = "pal.png"

            [maps]
            roughness = true
            normal = "both"
        "#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.quality, Quality::Png4k);
        assert_eq!(
            config.downscale,
            Some(Downscale {
                width: 64,
                height: 32
            })
        );
        assert_eq!(config.macro_scale, 2);
        assert!(config.quantize);
        assert_eq!(config.palette, Some(PathBuf::from("pal.png")));
        assert!(config.maps.roughness);
        assert!(!config.maps.color);
        assert_eq!(config.maps.normal, NormalType::Both);
    }

    #[test]
    fn quality_is_case_insensitive() {
        let config = parse_config("[output]\nquality = \"2K\"\n").unwrap();
        assert_eq!(config.quality, Quality::Png2k);
        let config = parse_config("[output]\nquality = \"1K\"\n").unwrap();
        assert_eq!(config.quality, Quality::Png1k);
    }

    #[test]
    fn unknown_quality_falls_back_to_1k() {
        let config = parse_config("[output]\nquality = \"16k\"\n").unwrap();
        assert_eq!(config.quality, Quality::Png1k);
    }

    #[test]
    fn quality_serializes_as_short_name() {
        #[derive(Serialize)]
        struct Output {
            quality: Quality,
        }
        let text = toml::to_string(&Output {
            quality: Quality::Png4k,
        })
        .unwrap();
        assert!(text.contains("quality = \"4k\""));
    }

    #[test]
    fn zero_downscale_is_dropped() {
        let config = parse_config("[process]\ndownscale = \"0x32\"\n").unwrap();
        assert!(config.downscale.is_none());
    }

    #[test]
    fn malformed_downscale_is_an_error() {
        assert!(parse_config("[process]\ndownscale = \"64by32\"\n").is_err());
    }

    #[test]
    fn load_config_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[process]\nmacro_scale = 3").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.macro_scale, 3);
    }

    #[test]
    fn load_config_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn macro_scale_skips_albedo() {
        let config = RipConfig {
            downscale: Some(Downscale {
                width: 8,
                height: 8,
            }),
            macro_scale: 0,
            ..RipConfig::default()
        };
        assert_eq!(config.target_size(MapKind::Displacement), Some((8, 8)));
        assert_eq!(RipConfig::default().target_size(MapKind::Color), None);
    }
}
