use serde::{Deserialize, Serialize};
use std::fmt;

/// A top-level prompt theme. Each category has exactly one composer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Animals,
    Nature,
    Sceneries,
    Clothes,
    Objects,
    Actions,
    People,
    Fantasy,
    #[serde(rename = "Hair Styles")]
    HairStyles,
    Expressions,
}

impl Category {
    /// Every registered category, in display order.
    pub const ALL: [Category; 10] = [
        Category::Animals,
        Category::Nature,
        Category::Sceneries,
        Category::Clothes,
        Category::Objects,
        Category::Actions,
        Category::People,
        Category::Fantasy,
        Category::HairStyles,
        Category::Expressions,
    ];

    /// The canonical name callers use to request this category.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Animals => "Animals",
            Self::Nature => "Nature",
            Self::Sceneries => "Sceneries",
            Self::Clothes => "Clothes",
            Self::Objects => "Objects",
            Self::Actions => "Actions",
            Self::People => "People",
            Self::Fantasy => "Fantasy",
            Self::HairStyles => "Hair Styles",
            Self::Expressions => "Expressions",
        }
    }

    /// Look up a category by its canonical name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Category> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
