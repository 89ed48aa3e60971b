// src/core/mod.rs
pub mod engine;
pub mod rank;
pub mod trie;
pub mod types;
