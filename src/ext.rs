//! Opt-in extensions layered on top of the core fresh-token-per-call behavior.

pub mod token_cache;

pub use token_cache::*;
