use std::path::Path;

use anyhow::Result;
use cg_core::config::RipConfig;
use cg_process::DistanceTables;
use cg_source::HttpFetcher;
use clap::Parser;

pub mod cli;
pub mod pipeline;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_filter())
        .init();

    // 3. Charger la config puis appliquer les overrides CLI
    let mut config = resolve_config(&cli.config)?;
    cli.apply(&mut config)?;

    // Mode catalogue : lister les archives à télécharger
    if let Some(ref csv) = cli.catalog {
        for link in pipeline::catalog_links(csv, &cli.inputs, &config)? {
            println!("{link}");
        }
        return Ok(());
    }

    // 4. Tables de distance et palette, partagées par tous les matériaux
    let tables = DistanceTables::new();
    let palette = pipeline::resolve_palette(&config);

    // 5. Dossiers extraits : traités sur place
    let (folders, ids): (Vec<&String>, Vec<&String>) =
        cli.inputs.iter().partition(|input| Path::new(input.as_str()).is_dir());
    let mut failures = 0usize;
    for input in folders {
        match pipeline::rip_folder(Path::new(input), &config, &tables, palette.as_ref()) {
            Ok(n) => log::info!("{input} : {n} cartes écrites"),
            Err(e) => {
                log::error!("{input} : {e:#}");
                failures += 1;
            }
        }
    }

    // 6. IDs : téléchargement depuis AmbientCG
    if !ids.is_empty() {
        let ids: Vec<String> = ids.into_iter().cloned().collect();
        let zip_dir = cli.zip_dir(&config);
        failures += pipeline::rip_downloads(
            &HttpFetcher::new(),
            &ids,
            &config,
            zip_dir.as_deref(),
            &tables,
            palette.as_ref(),
        )?;
    }

    if let Some(palette) = palette {
        palette.release();
    }

    if failures > 0 {
        anyhow::bail!("{failures} matériau(x) en échec sur {}", cli.inputs.len());
    }
    Ok(())
}

/// Config TOML si présente, défauts sinon.
fn resolve_config(path: &Path) -> Result<RipConfig> {
    if path.exists() {
        cg_core::config::load_config(path)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            path.display()
        );
        Ok(RipConfig::default())
    }
}
