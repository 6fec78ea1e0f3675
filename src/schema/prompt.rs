use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;

/// A generated prompt: the selected tags in draw order.
///
/// Tags are owned, so the prompt keeps no borrow on the catalog it was
/// sampled from. Duplicates are possible where a recipe allows them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub category: Category,
    pub tags: Vec<String>,
}

impl Prompt {
    pub fn new(category: Category, tags: Vec<String>) -> Self {
        Self { category, tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn into_tags(self) -> Vec<String> {
        self.tags
    }

    /// Join the tags with a custom separator.
    pub fn join(&self, separator: &str) -> String {
        self.tags.join(separator)
    }
}

/// Displays as the comma-separated tag list image tools expect.
impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.join(", "))
    }
}
