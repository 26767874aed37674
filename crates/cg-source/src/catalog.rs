//! Catalogue de téléchargements AmbientCG (`downloads.csv`).

use cg_core::matmap::Quality;

use crate::error::SourceError;

/// Endpoint listing the downloads of the given material IDs as CSV.
pub const DOWNLOADS_CSV_URL: &str = "https://ambientcg.com/api/v2/downloads_csv?type=Material&id=";

/// Colonnes attendues : (index, nom d'en-tête).
const ASSET_ID_COL: (usize, &str) = (0, "assetId");
const ATTRIBUTE_COL: (usize, &str) = (1, "downloadAttribute");
const RAW_LINK_COL: (usize, &str) = (5, "rawLink");

/// One downloadable archive of a material.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Material ID, e.g. `Bricks001`.
    pub asset_id: String,
    /// Variant, e.g. `1K-PNG`.
    pub attribute: String,
    /// Direct link to the zip archive.
    pub raw_link: String,
}

/// URL du CSV de téléchargements pour `ids`, séparés par des virgules.
///
/// # Example
/// ```
/// use cg_source::catalog::downloads_url;
/// assert_eq!(
///     downloads_url(&["Bricks001", "Wood049"]),
///     "https://ambientcg.com/api/v2/downloads_csv?type=Material&id=Bricks001,Wood049"
/// );
/// ```
#[must_use]
pub fn downloads_url<S: AsRef<str>>(ids: &[S]) -> String {
    let mut url = String::from(DOWNLOADS_CSV_URL);
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            url.push(',');
        }
        url.push_str(id.as_ref());
    }
    url
}

/// Parse le CSV de téléchargements.
///
/// The first line is the header and must name columns 0, 1 and 5
/// `assetId`, `downloadAttribute` and `rawLink`. Lines end with `\n` or
/// `\r\n`; blank lines are skipped.
///
/// # Errors
/// - [`SourceError::CatalogFormat`] if the header does not match.
/// - [`SourceError::CatalogLine`] if a line has fewer than six columns.
///
/// # Example
/// ```
/// use cg_source::catalog::parse_downloads_csv;
/// let csv = "assetId,downloadAttribute,filetype,size,downloadLink,rawLink\n\
///            Bricks001,1K-PNG,zip,123,https://a/dl,https://a/raw.zip\n";
/// let entries = parse_downloads_csv(csv).unwrap();
/// assert_eq!(entries[0].raw_link, "https://a/raw.zip");
/// ```
pub fn parse_downloads_csv(csv: &str) -> Result<Vec<CatalogEntry>, SourceError> {
    let mut lines = csv
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim().is_empty());

    let Some((_, header)) = lines.next() else {
        return Err(SourceError::CatalogFormat("fichier vide".into()));
    };
    let cols: Vec<&str> = header.split(',').collect();
    for (idx, name) in [ASSET_ID_COL, ATTRIBUTE_COL, RAW_LINK_COL] {
        if cols.get(idx).copied() != Some(name) {
            return Err(SourceError::CatalogFormat(format!(
                "colonne {idx} : attendu '{name}', trouvé '{}'",
                cols.get(idx).copied().unwrap_or("")
            )));
        }
    }

    let mut entries = Vec::new();
    for (n, line) in lines {
        let cols: Vec<&str> = line.split(',').collect();
        if cols.len() <= RAW_LINK_COL.0 {
            return Err(SourceError::CatalogLine { line: n + 1 });
        }
        entries.push(CatalogEntry {
            asset_id: cols[ASSET_ID_COL.0].to_string(),
            attribute: cols[ATTRIBUTE_COL.0].to_string(),
            raw_link: cols[RAW_LINK_COL.0].to_string(),
        });
    }

    log::debug!("{} entrées dans downloads.csv", entries.len());
    Ok(entries)
}

/// Keep the entries whose variant matches `quality`.
#[must_use]
pub fn entries_for_quality(entries: &[CatalogEntry], quality: Quality) -> Vec<&CatalogEntry> {
    entries
        .iter()
        .filter(|e| e.attribute == quality.attribute())
        .collect()
}
