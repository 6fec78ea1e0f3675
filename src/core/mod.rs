pub mod catalog;
pub mod composer;
pub mod engine;
pub mod sampling;
