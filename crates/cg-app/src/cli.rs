use std::path::PathBuf;

use anyhow::Result;
use cg_core::config::{Downscale, RipConfig};
use cg_core::matmap::{NormalType, Quality};
use clap::Parser;

/// cgrip : extracteur de matériaux AmbientCG.
///
/// Each input is either an extracted material folder or an AmbientCG material
/// ID to download. If no map is selected, only the albedo is saved.
#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug)]
#[command(name = "cgrip", version, about, long_about = None)]
pub struct Cli {
    /// IDs AmbientCG (ex : Bricks001) ou dossiers de matériaux extraits.
    #[arg(required = true, value_name = "MATERIAL")]
    pub inputs: Vec<String>,

    /// Dossier de sortie des cartes traitées.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML. Défaut : cgrip.toml.
    #[arg(short, long, default_value = "cgrip.toml")]
    pub config: PathBuf,

    /// Qualité des matériaux : 1K, 2K, 4K, 8K.
    #[arg(short, long)]
    pub quality: Option<String>,

    /// Sauvegarder toutes les cartes trouvées.
    #[arg(short, long, default_value_t = false)]
    pub all: bool,

    /// Réduire les cartes exportées. Format : WxH.
    #[arg(short = 's', long, value_name = "SIZE")]
    pub downscale: Option<String>,

    /// Multiplier la taille réduite des cartes non-albedo par ce facteur.
    #[arg(long = "macro", value_name = "SCALE")]
    pub macro_scale: Option<u32>,

    /// Quantifier l'albedo avec la palette donnée (--quantize=PAL), ou la palette Aseprite par défaut.
    #[arg(long, value_name = "PALETTE", num_args = 0..=1, require_equals = true)]
    pub quantize: Option<Option<PathBuf>>,

    /// Sauvegarder l'ambient occlusion.
    #[arg(long, default_value_t = false)]
    pub ao: bool,

    /// Sauvegarder l'albedo. Pas de forme courte : -c est --config.
    #[arg(long, default_value_t = false)]
    pub color: bool,

    /// Sauvegarder le displacement.
    #[arg(short, long, default_value_t = false)]
    pub disp: bool,

    /// Sauvegarder l'emission.
    #[arg(short, long, default_value_t = false)]
    pub emission: bool,

    /// Sauvegarder la metalness.
    #[arg(short, long, default_value_t = false)]
    pub metalness: bool,

    /// Sauvegarder l'opacity.
    #[arg(long, default_value_t = false)]
    pub opacity: bool,

    /// Sauvegarder la roughness.
    #[arg(short, long, default_value_t = false)]
    pub roughness: bool,

    /// Normales : -n=NONE, GL, DX, BOTH. Sans valeur : GL.
    #[arg(short, long, value_name = "TYPE", num_args = 0..=1, require_equals = true)]
    pub normal: Option<Option<String>>,

    /// Sauvegarder les archives zip téléchargées, dans DIR (-z=DIR) ou OUTPUT.
    #[arg(short, long, value_name = "DIR", num_args = 0..=1, require_equals = true)]
    pub zip: Option<Option<PathBuf>>,

    /// Lister les liens de téléchargement des IDs depuis ce downloads.csv.
    #[arg(long, value_name = "CSV")]
    pub catalog: Option<PathBuf>,

    /// Journalisation détaillée (équivaut à --log-level debug).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Dossier où écrire les archives, si `--zip` est donné.
    #[must_use]
    pub fn zip_dir(&self, config: &RipConfig) -> Option<PathBuf> {
        self.zip
            .as_ref()
            .map(|dir| dir.clone().unwrap_or_else(|| config.output.clone()))
    }

    /// Effective log level.
    #[must_use]
    pub fn log_filter(&self) -> log::LevelFilter {
        if self.verbose {
            return log::LevelFilter::Debug;
        }
        self.log_level.parse().unwrap_or(log::LevelFilter::Warn)
    }

    /// Appliquer les overrides CLI sur la configuration chargée.
    ///
    /// # Errors
    /// Returns an error if `--output` is not a directory or `--downscale` is malformed.
    pub fn apply(&self, config: &mut RipConfig) -> Result<()> {
        if let Some(ref out) = self.output {
            if out.exists() && !out.is_dir() {
                anyhow::bail!("{} n'est pas un dossier de sortie valide", out.display());
            }
            config.output.clone_from(out);
        }
        if let Some(ref q) = self.quality {
            config.quality = Quality::parse(q);
        }
        if let Some(ref size) = self.downscale {
            let d = Downscale::parse(size)?;
            log::debug!("Réduction cible : {}x{}", d.width, d.height);
            config.downscale = Some(d);
        }
        if let Some(scale) = self.macro_scale {
            log::debug!("macro_scale {scale}");
            config.macro_scale = scale;
        }
        if let Some(ref palette) = self.quantize {
            config.quantize = true;
            config.palette.clone_from(palette);
        }

        let maps = &mut config.maps;
        if let Some(ref normal) = self.normal {
            maps.normal = NormalType::parse(normal.as_deref());
        }
        maps.ambient_occlusion |= self.ao;
        maps.color |= self.color;
        maps.displacement |= self.disp;
        maps.emission |= self.emission;
        maps.metalness |= self.metalness;
        maps.opacity |= self.opacity;
        maps.roughness |= self.roughness;
        if self.all {
            maps.select_all();
        }

        config.sanitize();
        Ok(())
    }
}
