/// The prompt engine: category name → composer → prompt.
///
/// Owns the catalog and the seed. Each generation derives a fresh RNG from
/// the seed and a generation counter, so an engine built with the same seed
/// replays the same sequence of prompts.

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::catalog::{Catalog, CatalogError};
use crate::core::composer;
use crate::core::sampling::SamplingError;
use crate::schema::category::Category;
use crate::schema::prompt::Prompt;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown prompt category: '{0}'")]
    UnknownCategory(String),
    #[error("sampling error: {0}")]
    Sampling(#[from] SamplingError),
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// The top-level prompt generator. Built via `PromptEngine::builder()`.
#[derive(Debug)]
pub struct PromptEngine {
    catalog: Catalog,
    seed: u64,
    generation_count: u64,
}

/// Builder for constructing a `PromptEngine`.
#[derive(Debug, Default)]
pub struct PromptEngineBuilder {
    seed: Option<u64>,
    catalog_path: Option<PathBuf>,
    /// Directly provided catalog (for testing without files).
    catalog: Option<Catalog>,
}

impl PromptEngine {
    pub fn builder() -> PromptEngineBuilder {
        PromptEngineBuilder::default()
    }

    /// Generate a prompt for a category given by its canonical name.
    ///
    /// Unknown names fail before any sampling and leave the engine untouched.
    pub fn generate_prompt(&mut self, category: &str) -> Result<Prompt, EngineError> {
        let category = Category::from_name(category)
            .ok_or_else(|| EngineError::UnknownCategory(category.to_string()))?;
        self.generate(category)
    }

    /// Generate a prompt for a category using the engine's own seeded RNG.
    pub fn generate(&mut self, category: Category) -> Result<Prompt, EngineError> {
        let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(self.generation_count));
        let prompt = self.generate_with(category, &mut rng)?;
        self.generation_count += 1;
        Ok(prompt)
    }

    /// Generate a prompt with a caller-supplied random source.
    ///
    /// Does not touch the engine's generation counter.
    pub fn generate_with(
        &self,
        category: Category,
        rng: &mut dyn RngCore,
    ) -> Result<Prompt, EngineError> {
        match composer::compose(category, &self.catalog, rng) {
            Ok(tags) => {
                tracing::debug!(
                    category = %category,
                    tags = tags.len(),
                    generation = self.generation_count,
                    "composed prompt"
                );
                Ok(Prompt::new(category, tags))
            }
            Err(e) => {
                tracing::warn!(category = %category, error = %e, "prompt composition failed");
                Err(e.into())
            }
        }
    }

    /// Generate several independent prompts for the same category.
    pub fn generate_variants(
        &mut self,
        category: Category,
        count: usize,
    ) -> Result<Vec<Prompt>, EngineError> {
        let mut prompts = Vec::new();
        for _ in 0..count {
            prompts.push(self.generate(category)?);
        }
        Ok(prompts)
    }

    /// Restart the prompt sequence from a new seed.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.generation_count = 0;
    }

    /// The registered categories, in display order.
    pub fn categories(&self) -> &'static [Category] {
        &Category::ALL
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn generation_count(&self) -> u64 {
        self.generation_count
    }
}

impl PromptEngineBuilder {
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load the catalog from a RON file instead of the built-in one.
    pub fn catalog_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.catalog_path = Some(path.into());
        self
    }

    /// Provide a catalog directly. Takes precedence over `catalog_path`.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    pub fn build(self) -> Result<PromptEngine, EngineError> {
        let catalog = match (self.catalog, self.catalog_path) {
            (Some(catalog), _) => catalog,
            (None, Some(path)) => Catalog::load_from_ron(&path)?,
            (None, None) => Catalog::builtin()?,
        };
        let seed = self.seed.unwrap_or_else(rand::random);

        tracing::debug!(seed, pools = catalog.pools().len(), "prompt engine ready");

        Ok(PromptEngine {
            catalog,
            seed,
            generation_count: 0,
        })
    }
}
