//! WASM bindings for prompt-composer: powers the web prompt picker.

use wasm_bindgen::prelude::*;

use prompt_composer::{Category, Prompt, PromptEngine};

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct PromptInfo<'a> {
    category: &'a str,
    tags: &'a [String],
    text: String,
}

impl<'a> From<&'a Prompt> for PromptInfo<'a> {
    fn from(prompt: &'a Prompt) -> Self {
        PromptInfo {
            category: prompt.category.name(),
            tags: &prompt.tags,
            text: prompt.to_string(),
        }
    }
}

#[derive(serde::Serialize)]
struct CatalogInfo {
    seed: u64,
    tags: usize,
    pools: Vec<String>,
}

/// Prompt generator handle exposed to JavaScript.
#[wasm_bindgen]
pub struct PromptDemo {
    engine: PromptEngine,
}

#[wasm_bindgen]
impl PromptDemo {
    /// Create a generator over the built-in catalog.
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u64) -> Result<PromptDemo, JsError> {
        let engine = PromptEngine::builder()
            .seed(seed)
            .build()
            .map_err(|e| JsError::new(&format!("Engine build error: {e}")))?;
        Ok(PromptDemo { engine })
    }

    /// Generate a prompt and return its tags as a JSON array of strings.
    pub fn generate(&mut self, category: &str) -> Result<String, JsError> {
        let prompt = self
            .engine
            .generate_prompt(category)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        serde_json::to_string(&prompt.into_tags())
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Generate a prompt and return it as display text ("tag, tag, ...").
    pub fn generate_text(&mut self, category: &str) -> Result<String, JsError> {
        self.engine
            .generate_prompt(category)
            .map(|prompt| prompt.to_string())
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))
    }

    /// Generate several prompts. Returns a JSON array of
    /// `{ "category", "tags", "text" }` objects.
    pub fn generate_variants(&mut self, category: &str, count: usize) -> Result<String, JsError> {
        let category = Category::from_name(category)
            .ok_or_else(|| JsError::new(&format!("Unknown category: {category}")))?;
        let prompts = self
            .engine
            .generate_variants(category, count)
            .map_err(|e| JsError::new(&format!("Generation error: {e}")))?;
        let infos: Vec<PromptInfo<'_>> = prompts.iter().map(PromptInfo::from).collect();
        serde_json::to_string(&infos)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return JSON array of category names accepted by `generate`.
    pub fn categories() -> String {
        let names: Vec<&str> = Category::ALL.iter().map(|c| c.name()).collect();
        serde_json::to_string(&names).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return a JSON summary of the loaded catalog and current seed.
    pub fn catalog_info(&self) -> Result<String, JsError> {
        let catalog = self.engine.catalog();
        let info = CatalogInfo {
            seed: self.engine.seed(),
            tags: catalog.tag_count(),
            pools: catalog.pools().into_iter().map(|(name, _)| name).collect(),
        };
        serde_json::to_string(&info)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Restart the prompt sequence from a new seed.
    pub fn reset(&mut self, seed: u64) {
        self.engine.reseed(seed);
    }
}
