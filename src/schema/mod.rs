pub mod category;
pub mod pool;
pub mod prompt;
