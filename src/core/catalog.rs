/// Tag catalog: the read-only table of pools every composer samples from.
///
/// Catalogs are authored in RON. Sections and pools are typed fields, so a
/// catalog missing a pool a composer needs fails to parse instead of failing
/// mid-generation.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use thiserror::Error;

use crate::schema::pool::{AttributeGroup, TagPool, WeightedTag};

/// RON source of the catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../catalog/tags.ron");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Animal species and animal body features.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnimalPools {
    pub names: TagPool,
    pub features: TagPool,
}

impl AnimalPools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![("names", &self.names), ("features", &self.features)]
    }
}

/// Setting elements, split by environment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LocationPools {
    pub natural: TagPool,
    pub urban: TagPool,
    pub indoors: TagPool,
}

impl LocationPools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("natural", &self.natural),
            ("urban", &self.urban),
            ("indoors", &self.indoors),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NaturePools {
    pub plants_flowers: TagPool,
    pub phenomena: TagPool,
}

impl NaturePools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("plants_flowers", &self.plants_flowers),
            ("phenomena", &self.phenomena),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ObjectPools {
    pub misc: TagPool,
}

impl ObjectPools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![("misc", &self.misc)]
    }
}

/// Garments by slot, plus decorative extras and materials.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClothingPools {
    pub dresses_and_skirts: TagPool,
    pub inners: TagPool,
    pub outers: TagPool,
    pub bottoms: TagPool,
    pub footwear: TagPool,
    pub headwear: TagPool,
    pub sleeves: TagPool,
    pub accessories: TagPool,
    pub special_costumes: TagPool,
    pub fabrics_and_patterns: TagPool,
}

impl ClothingPools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("dresses_and_skirts", &self.dresses_and_skirts),
            ("inners", &self.inners),
            ("outers", &self.outers),
            ("bottoms", &self.bottoms),
            ("footwear", &self.footwear),
            ("headwear", &self.headwear),
            ("sleeves", &self.sleeves),
            ("accessories", &self.accessories),
            ("special_costumes", &self.special_costumes),
            ("fabrics_and_patterns", &self.fabrics_and_patterns),
        ]
    }
}

/// Body actions, poses and camera angles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ActionPools {
    pub basic: TagPool,
    pub poses: TagPool,
    pub hands_and_arms: TagPool,
    pub legs_and_feet: TagPool,
    pub head: TagPool,
    pub with_others: TagPool,
    pub with_objects: TagPool,
    pub angles: TagPool,
}

impl ActionPools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("basic", &self.basic),
            ("poses", &self.poses),
            ("hands_and_arms", &self.hands_and_arms),
            ("legs_and_feet", &self.legs_and_feet),
            ("head", &self.head),
            ("with_others", &self.with_others),
            ("with_objects", &self.with_objects),
            ("angles", &self.angles),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PeoplePools {
    pub basic: TagPool,
    pub occupations: TagPool,
    pub fantasy_and_mythical: TagPool,
}

impl PeoplePools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("basic", &self.basic),
            ("occupations", &self.occupations),
            ("fantasy_and_mythical", &self.fantasy_and_mythical),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HairPools {
    pub style: TagPool,
    pub length: TagPool,
    pub color: TagPool,
    pub accessories: TagPool,
    pub other: TagPool,
}

impl HairPools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("style", &self.style),
            ("length", &self.length),
            ("color", &self.color),
            ("accessories", &self.accessories),
            ("other", &self.other),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EyePools {
    pub color: TagPool,
    pub eyewear: TagPool,
    pub features_conditions: TagPool,
    pub pupils_sclera: TagPool,
}

impl EyePools {
    pub fn pools(&self) -> Vec<(&'static str, &TagPool)> {
        vec![
            ("color", &self.color),
            ("eyewear", &self.eyewear),
            ("features_conditions", &self.features_conditions),
            ("pupils_sclera", &self.pupils_sclera),
        ]
    }
}

/// Baseline tags some categories open with, each kept independently.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DefaultTags {
    pub animals: Vec<WeightedTag>,
    pub nature: Vec<WeightedTag>,
    pub sceneries: Vec<WeightedTag>,
    pub hair_styles: Vec<WeightedTag>,
    pub expressions: Vec<WeightedTag>,
}

impl DefaultTags {
    pub fn lists(&self) -> Vec<(&'static str, &[WeightedTag])> {
        vec![
            ("animals", self.animals.as_slice()),
            ("nature", self.nature.as_slice()),
            ("sceneries", self.sceneries.as_slice()),
            ("hair_styles", self.hair_styles.as_slice()),
            ("expressions", self.expressions.as_slice()),
        ]
    }
}

/// The full set of tag pools, grouped into semantic sections.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Catalog {
    pub animals: AnimalPools,
    pub locations: LocationPools,
    pub nature: NaturePools,
    pub objects: ObjectPools,
    pub clothing: ClothingPools,
    pub actions: ActionPools,
    pub people: PeoplePools,
    pub hair: HairPools,
    pub eyes: EyePools,
    pub expressions: AttributeGroup,
    pub defaults: DefaultTags,
}

impl Catalog {
    /// Parse the catalog embedded in the crate.
    pub fn builtin() -> Result<Catalog, CatalogError> {
        Self::parse_ron(BUILTIN_CATALOG)
    }

    /// Load a catalog from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Catalog, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::parse_ron(&contents)?;
        tracing::debug!(path = %path.display(), "loaded tag catalog");
        Ok(catalog)
    }

    /// Parse a catalog from a RON string.
    pub fn parse_ron(input: &str) -> Result<Catalog, CatalogError> {
        Ok(ron::from_str(input)?)
    }

    /// Every pool in the catalog under a qualified `section.pool` name.
    /// Expression variants are listed as `expressions.<variant>`.
    pub fn pools(&self) -> Vec<(String, &TagPool)> {
        let sections = [
            ("animals", self.animals.pools()),
            ("locations", self.locations.pools()),
            ("nature", self.nature.pools()),
            ("objects", self.objects.pools()),
            ("clothing", self.clothing.pools()),
            ("actions", self.actions.pools()),
            ("people", self.people.pools()),
            ("hair", self.hair.pools()),
            ("eyes", self.eyes.pools()),
        ];

        let mut pools = Vec::new();
        for (section, entries) in sections {
            for (name, pool) in entries {
                pools.push((format!("{}.{}", section, name), pool));
            }
        }
        for variant in &self.expressions.variants {
            pools.push((format!("expressions.{}", variant.name), &variant.tags));
        }
        pools
    }

    /// Total number of tags across all pools, duplicates included.
    pub fn tag_count(&self) -> usize {
        self.pools().iter().map(|(_, pool)| pool.len()).sum()
    }

    /// Report authoring defects. Generation never calls this; defects it
    /// finds would otherwise surface as sampling errors on first use.
    pub fn lint(&self) -> Vec<CatalogIssue> {
        let mut issues = Vec::new();

        if self.expressions.variants.is_empty() {
            issues.push(CatalogIssue::error(
                "expressions",
                "attribute group has no variants",
            ));
        }

        for (name, pool) in self.pools() {
            if pool.is_empty() {
                issues.push(CatalogIssue::error(&name, "pool is empty"));
                continue;
            }

            let mut seen = FxHashSet::default();
            let mut reported = FxHashSet::default();
            let duplicates: Vec<&str> = pool
                .iter()
                .filter(|t| !seen.insert(*t) && reported.insert(*t))
                .collect();
            if !duplicates.is_empty() {
                issues.push(CatalogIssue::warning(
                    &name,
                    format!("duplicate tags: {}", duplicates.join(", ")),
                ));
            }
            if seen.len() == 1 {
                issues.push(CatalogIssue::warning(
                    &name,
                    "only one distinct tag; multi-draws cannot add unique tags",
                ));
            }
            if pool.iter().any(|t| t.trim().is_empty()) {
                issues.push(CatalogIssue::warning(&name, "contains a blank tag"));
            }
        }

        for (list, tags) in self.defaults.lists() {
            let name = format!("defaults.{}", list);
            for wt in tags {
                if !(0.0..=1.0).contains(&wt.probability) {
                    issues.push(CatalogIssue::error(
                        &name,
                        format!(
                            "tag '{}' has probability {} outside [0, 1]",
                            wt.tag, wt.probability
                        ),
                    ));
                }
            }
        }

        issues
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

/// One finding from [`Catalog::lint`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogIssue {
    pub severity: Severity,
    pub pool: String,
    pub message: String,
}

impl CatalogIssue {
    fn error(pool: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            pool: pool.to_string(),
            message: message.into(),
        }
    }

    fn warning(pool: &str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            pool: pool.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Error => "ERROR",
        };
        write!(f, "{}: {}: {}", label, self.pool, self.message)
    }
}
