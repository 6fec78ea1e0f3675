//! Prompt Composer: randomized tag prompts for image-generation tools.
//!
//! Builds prompts by sampling from curated pools of descriptive tags. Each
//! category has a fixed recipe of fixed picks, independent inclusions,
//! weighted alternatives and escalating multi-draws over a read-only catalog.

pub mod core;
pub mod schema;

pub use crate::core::catalog::Catalog;
pub use crate::core::engine::{EngineError, PromptEngine};
pub use crate::schema::category::Category;
pub use crate::schema::prompt::Prompt;
