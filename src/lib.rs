// src/lib.rs
//! Fuzzy-prefix autocomplete over a ranked trie.
//!
//! Every trie node carries the top `max_suggestion` records reachable
//! through it. Inserts and deletes keep those lists current along the
//! touched path, and queries tolerate a small number of character
//! substitutions.
//!
//! ```
//! use autocomplete_core::{AutocompleteEngine, OptionsUpdate, Record};
//!
//! let mut engine = AutocompleteEngine::<String>::with_options(OptionsUpdate::default().max_suggestion(3));
//! engine.insert(Record::new("hello world").with_weight(5));
//! engine.insert(Record::new("hello i am fine").with_weight(10));
//! assert_eq!(engine.suggest("hello"), ["hello i am fine", "hello world"]);
//! ```

pub mod core;
pub mod error;
pub mod fuzzy;
pub mod id;
pub mod options;

pub use crate::core::engine::{AutocompleteEngine, OnUpdate, RankedSuggestion};
pub use crate::core::trie::TrieNode;
pub use crate::core::types::{NodeValue, Rank, Record, RecordId, Score};
pub use crate::error::{Error, Result};
pub use crate::id::{IdGenerator, SequentialIdGenerator, UuidGenerator};
pub use crate::options::{Options, OptionsUpdate};
