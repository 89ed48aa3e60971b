// src/fuzzy/mod.rs
pub mod mismatch;

pub use mismatch::MismatchSearch;
