//! Re-exports of performance-oriented collection types.

pub use rustc_hash::FxHashMap;
