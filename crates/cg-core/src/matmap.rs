use serde::{Deserialize, Serialize};

/// Nombre de types de cartes d'un matériau.
pub const MAP_COUNT: usize = 9;

/// Material map kind, in the catalog's fixed order.
///
/// # Example
/// ```
/// use cg_core::matmap::MapKind;
/// assert_eq!(MapKind::from_file_name("Bricks001_1K-PNG_Color.png"), Some(MapKind::Color));
/// assert_eq!(MapKind::from_file_name("Bricks001.usdc"), None);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum MapKind {
    /// Ambient occlusion.
    AmbientOcclusion,
    /// Albedo.
    Color,
    /// Height/displacement.
    Displacement,
    /// Emission.
    Emission,
    /// Metalness.
    Metalness,
    /// DirectX-convention normal map.
    NormalDx,
    /// OpenGL-convention normal map.
    NormalGl,
    /// Opacity.
    Opacity,
    /// Roughness.
    Roughness,
}

impl MapKind {
    /// Every kind, in index order.
    pub const ALL: [MapKind; MAP_COUNT] = [
        MapKind::AmbientOcclusion,
        MapKind::Color,
        MapKind::Displacement,
        MapKind::Emission,
        MapKind::Metalness,
        MapKind::NormalDx,
        MapKind::NormalGl,
        MapKind::Opacity,
        MapKind::Roughness,
    ];

    /// Position in [`MapKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// File-name suffix identifying this map inside a material archive.
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            MapKind::AmbientOcclusion => "AmbientOcclusion.png",
            MapKind::Color => "Color.png",
            MapKind::Displacement => "Displacement.png",
            MapKind::Emission => "Emission.png",
            MapKind::Metalness => "Metalness.png",
            MapKind::NormalDx => "NormalDX.png",
            MapKind::NormalGl => "NormalGL.png",
            MapKind::Opacity => "Opacity.png",
            MapKind::Roughness => "Roughness.png",
        }
    }

    /// Classify a file by the suffix its name ends with.
    #[must_use]
    pub fn from_file_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| name.ends_with(k.suffix()))
    }

    /// True for the albedo map, which alone is quantized and never macro-scaled.
    #[must_use]
    pub const fn is_albedo(self) -> bool {
        matches!(self, MapKind::Color)
    }
}

/// Résolution des textures téléchargées.
///
/// Deserialized through [`Quality::parse`]: case-insensitive, unknown values
/// fall back to 1k with a warning.
///
/// # Example
/// ```
/// use cg_core::matmap::Quality;
/// assert_eq!(Quality::parse("2K"), Quality::Png2k);
/// assert_eq!(Quality::Png2k.attribute(), "2K-PNG");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum Quality {
    /// 1024 px PNG.
    #[default]
    Png1k,
    /// 2048 px PNG.
    Png2k,
    /// 4096 px PNG.
    Png4k,
    /// 8192 px PNG.
    Png8k,
}

impl From<String> for Quality {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<Quality> for String {
    fn from(value: Quality) -> Self {
        value.name().to_string()
    }
}

impl Quality {
    /// `downloadAttribute` value in the catalog.
    #[must_use]
    pub const fn attribute(self) -> &'static str {
        match self {
            Quality::Png1k => "1K-PNG",
            Quality::Png2k => "2K-PNG",
            Quality::Png4k => "4K-PNG",
            Quality::Png8k => "8K-PNG",
        }
    }

    /// Short name, as accepted by [`Quality::parse`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Quality::Png1k => "1k",
            Quality::Png2k => "2k",
            Quality::Png4k => "4k",
            Quality::Png8k => "8k",
        }
    }

    /// Parse `1k`, `2k`, `4k`, `8k` (case-insensitive). Unknown values fall back to 1k.
    #[must_use]
    pub fn parse(arg: &str) -> Self {
        match arg.to_lowercase().as_str() {
            "1k" => Quality::Png1k,
            "2k" => Quality::Png2k,
            "4k" => Quality::Png4k,
            "8k" => Quality::Png8k,
            _ => {
                log::warn!("Qualité inattendue '{arg}', utilisation de 1k.");
                Quality::Png1k
            }
        }
    }
}

/// Which normal-map conventions to save.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalType {
    /// No normal map.
    #[default]
    None,
    /// OpenGL convention.
    Gl,
    /// DirectX convention.
    Dx,
    /// Both conventions.
    Both,
}

impl NormalType {
    /// Parse `none`, `gl`, `dx`, `both`. A missing value means `gl`; unknown values fall back to `gl`.
    ///
    /// # Example
    /// ```
    /// use cg_core::matmap::NormalType;
    /// assert_eq!(NormalType::parse(None), NormalType::Gl);
    /// assert_eq!(NormalType::parse(Some("BOTH")), NormalType::Both);
    /// ```
    #[must_use]
    pub fn parse(arg: Option<&str>) -> Self {
        let Some(arg) = arg else {
            return NormalType::Gl;
        };
        match arg.to_lowercase().as_str() {
            "none" => NormalType::None,
            "gl" => NormalType::Gl,
            "dx" => NormalType::Dx,
            "both" => NormalType::Both,
            _ => {
                log::warn!("Type de normale inattendu '{arg}', utilisation de gl.");
                NormalType::Gl
            }
        }
    }
}

/// Set of maps to write out.
#[allow(clippy::struct_excessive_bools)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct MapSelection {
    /// Ambient occlusion.
    pub ambient_occlusion: bool,
    /// Albedo.
    pub color: bool,
    /// Displacement.
    pub displacement: bool,
    /// Emission.
    pub emission: bool,
    /// Metalness.
    pub metalness: bool,
    /// Normal maps.
    pub normal: NormalType,
    /// Opacity.
    pub opacity: bool,
    /// Roughness.
    pub roughness: bool,
}

impl MapSelection {
    /// Select every map. Normals become `Both` unless a type was already chosen.
    ///
    /// # Example
    /// ```
    /// use cg_core::matmap::{MapKind, MapSelection};
    /// let mut sel = MapSelection::default();
    /// sel.select_all();
    /// assert!(MapKind::ALL.iter().all(|&k| sel.contains(k)));
    /// ```
    pub fn select_all(&mut self) {
        self.ambient_occlusion = true;
        self.color = true;
        self.displacement = true;
        self.emission = true;
        self.metalness = true;
        self.opacity = true;
        self.roughness = true;
        if self.normal == NormalType::None {
            self.normal = NormalType::Both;
        }
    }

    /// True when no map at all is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.ambient_occlusion
            || self.color
            || self.displacement
            || self.emission
            || self.metalness
            || self.opacity
            || self.roughness)
            && self.normal == NormalType::None
    }

    /// Fall back to the albedo when nothing is selected.
    pub fn or_albedo(&mut self) {
        if self.is_empty() {
            self.color = true;
            log::debug!("Aucune carte spécifiée, sauvegarde de l'albedo.");
        }
    }

    /// Whether `kind` is selected.
    #[must_use]
    pub fn contains(&self, kind: MapKind) -> bool {
        match kind {
            MapKind::AmbientOcclusion => self.ambient_occlusion,
            MapKind::Color => self.color,
            MapKind::Displacement => self.displacement,
            MapKind::Emission => self.emission,
            MapKind::Metalness => self.metalness,
            MapKind::NormalDx => matches!(self.normal, NormalType::Dx | NormalType::Both),
            MapKind::NormalGl => matches!(self.normal, NormalType::Gl | NormalType::Both),
            MapKind::Opacity => self.opacity,
            MapKind::Roughness => self.roughness,
        }
    }
}
