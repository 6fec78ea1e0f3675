use serde::{Deserialize, Serialize};

/// An ordered list of tags eligible for sampling.
///
/// Duplicates are allowed and count as extra weight for that tag. Pools are
/// never mutated once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagPool(Vec<String>);

impl TagPool {
    pub fn new(tags: Vec<String>) -> Self {
        Self(tags)
    }

    /// Concatenate several pools into a new owned pool, keeping order.
    pub fn union(pools: &[&TagPool]) -> TagPool {
        let mut tags = Vec::with_capacity(pools.iter().map(|p| p.len()).sum());
        for pool in pools {
            tags.extend(pool.0.iter().cloned());
        }
        TagPool(tags)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }
}

impl<S: Into<String>> FromIterator<S> for TagPool {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        TagPool(iter.into_iter().map(Into::into).collect())
    }
}

/// A tag paired with its independent inclusion probability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTag {
    pub tag: String,
    pub probability: f64,
}

impl WeightedTag {
    pub fn new(tag: impl Into<String>, probability: f64) -> Self {
        Self {
            tag: tag.into(),
            probability,
        }
    }
}

/// One named variant of an [`AttributeGroup`], e.g. "happy" within expressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub name: String,
    pub tags: TagPool,
}

/// A named set of variants, each resolving to its own pool.
///
/// Sampling picks a variant first and then draws from that variant's pool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AttributeGroup {
    pub name: String,
    pub variants: Vec<Variant>,
}

impl AttributeGroup {
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        self.variants.iter().find(|v| v.name == name)
    }

    pub fn variant_names(&self) -> impl Iterator<Item = &str> {
        self.variants.iter().map(|v| v.name.as_str())
    }
}

/// Something a tag can be drawn from: a plain pool or a group whose variant
/// is resolved first.
#[derive(Debug, Clone, Copy)]
pub enum Source<'a> {
    Pool(&'a TagPool),
    Group(&'a AttributeGroup),
}

impl<'a> From<&'a TagPool> for Source<'a> {
    fn from(pool: &'a TagPool) -> Self {
        Source::Pool(pool)
    }
}

impl<'a> From<&'a AttributeGroup> for Source<'a> {
    fn from(group: &'a AttributeGroup) -> Self {
        Source::Group(group)
    }
}

/// A source with its relative weight for weighted choice.
#[derive(Debug, Clone, Copy)]
pub struct WeightedSource<'a> {
    pub source: Source<'a>,
    pub weight: f64,
}

impl<'a> WeightedSource<'a> {
    pub fn new(source: impl Into<Source<'a>>, weight: f64) -> Self {
        Self {
            source: source.into(),
            weight,
        }
    }
}
