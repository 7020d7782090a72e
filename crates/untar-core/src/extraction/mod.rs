//! Extraction pipeline: the entry loop and its per-run state.

pub mod context;
pub mod dirs;
pub mod engine;

pub use context::RunContext;
pub use dirs::DirCache;
pub use engine::Extractor;
