// src/core/engine.rs
use crate::core::rank::RankMerger;
use crate::core::trie::TrieNode;
use crate::core::types::{NodeValue, Rank, Record, RecordId, Score};
use crate::error::Result;
use crate::fuzzy::MismatchSearch;
use crate::id::{IdGenerator, UuidGenerator};
use crate::options::{Options, OptionsUpdate};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, error, trace};

/// Hook fired when a repeat insert bumps an existing record.
pub type OnUpdate<V> = Box<dyn FnMut(&NodeValue<V>)>;

/// One entry of a ranked suggestion set.
///
/// `value` is `None` only if the id table and the trie disagree, which
/// correct bookkeeping never allows.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedSuggestion<'a, V> {
    pub id: RecordId,
    pub score: Score,
    pub value: Option<&'a V>,
}

/// Fuzzy-prefix autocomplete over a ranked trie.
///
/// Each node keeps the top `max_suggestion` records reachable through it, so
/// a query only walks the trie and merges those lists; subtrees are never
/// rescanned. A single owner is assumed: wrap the engine in a lock to share it.
///
/// Insert, delete and search recurse once per character of the normalized
/// text, so stack depth grows with the longest stored or queried text.
pub struct AutocompleteEngine<V> {
    root: TrieNode,
    value_by_key: HashMap<RecordId, V>,
    node_count: usize,
    options: Options,
    ids: Box<dyn IdGenerator>,
    on_update: Option<OnUpdate<V>>,
}

impl<V> Default for AutocompleteEngine<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> fmt::Debug for AutocompleteEngine<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutocompleteEngine")
            .field("records", &self.value_by_key.len())
            .field("node_count", &self.node_count)
            .field("options", &self.options)
            .field("has_on_update", &self.on_update.is_some())
            .finish()
    }
}

impl<V> AutocompleteEngine<V> {
    pub fn new() -> Self {
        Self::with_options(OptionsUpdate::default())
    }

    /// Unset fields take their defaults.
    pub fn with_options(options: OptionsUpdate) -> Self {
        Self {
            root: TrieNode::new(),
            value_by_key: HashMap::new(),
            node_count: 0,
            options: Options::new(options),
            ids: Box::new(UuidGenerator),
            on_update: None,
        }
    }

    pub fn from_json_options(raw: &str) -> Result<Self> {
        let options = Options::from_json(raw)?;
        Ok(Self {
            options,
            ..Self::new()
        })
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Takes effect on the next operation. Existing rank lists are not
    /// rebuilt; they shrink to a lower cap as later merges touch them.
    pub fn update_options(&mut self, update: OptionsUpdate) {
        self.options.apply(update);
        debug!(target: "autocomplete::engine", options = ?self.options, "options updated");
    }

    /// Replaces any previously registered hook.
    pub fn on_update<F>(&mut self, callback: F)
    where
        F: FnMut(&NodeValue<V>) + 'static,
    {
        self.on_update = Some(Box::new(callback));
    }

    pub fn options(&self) -> Options {
        self.options
    }

    pub fn max_suggestion(&self) -> usize {
        self.options.max_suggestion
    }

    pub fn allowed_mismatch_count(&self) -> usize {
        self.options.allowed_mismatch_count
    }

    pub fn ignore_case(&self) -> bool {
        self.options.ignore_case
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Trie nodes allocated below the root.
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.value_by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value_by_key.is_empty()
    }

    pub fn contains(&self, text: &str) -> bool {
        let path: Vec<char> = self.normalize(text).chars().collect();
        self.root.descend(&path).is_some_and(TrieNode::has_record)
    }

    /// Payload stored under `id`.
    pub fn value(&self, id: &RecordId) -> Option<&V> {
        self.value_by_key.get(id)
    }

    /// Drops every record. Options, id generator and hook are kept.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.value_by_key.clear();
        self.node_count = 0;
        debug!(target: "autocomplete::engine", "cleared");
    }

    /// Deletes the record stored under `record.text`. Only the text is used.
    pub fn delete(&mut self, record: &Record<V>) -> bool {
        self.delete_text(&record.text)
    }

    /// Removes the record terminating at the normalized `text`, purges its id
    /// from every rank list on the path and prunes emptied leaves.
    pub fn delete_text(&mut self, text: &str) -> bool {
        let path: Vec<char> = self.normalize(text).chars().collect();
        let merger = self.merger();
        let mut pruned = 0;

        let Some(id) = detach(&mut self.root, &path, merger, &mut pruned) else {
            trace!(target: "autocomplete::engine", text, "delete found no record");
            return false;
        };

        self.value_by_key.remove(&id);
        self.node_count -= pruned;
        debug!(target: "autocomplete::engine", ?id, pruned, nodes = self.node_count, "record deleted");
        true
    }

    /// Ranked suggestions for `text`, payloads resolved through the id table.
    ///
    /// A blank query yields the global top list.
    pub fn suggest_ranked(&self, text: &str) -> Vec<RankedSuggestion<'_, V>> {
        let merger = self.merger();
        let ranks = if text.trim().is_empty() {
            merger.merge(self.root.rank_list(), &[], None)
        } else {
            let query: Vec<char> = self.normalize(text).chars().collect();
            MismatchSearch::new(&query, self.options.allowed_mismatch_count, merger).run(&self.root)
        };

        ranks
            .into_iter()
            .map(|Rank { id, score }| RankedSuggestion {
                id,
                score,
                value: self.value_by_key.get(&id),
            })
            .collect()
    }

    /// Payloads of the best matches for `text`, best first, at most
    /// `max_suggestion` of them.
    pub fn suggest(&self, text: &str) -> Vec<&V> {
        self.suggest_ranked(text)
            .into_iter()
            .filter_map(|suggestion| {
                if suggestion.value.is_none() {
                    error!(target: "autocomplete::engine", id = ?suggestion.id, "ranked id missing from value table");
                    debug_assert!(false, "ranked id {} missing from value table", suggestion.id);
                }
                suggestion.value
            })
            .collect()
    }

    fn merger(&self) -> RankMerger {
        RankMerger::new(self.options.max_suggestion)
    }

    fn normalize(&self, text: &str) -> String {
        if self.options.ignore_case {
            text.trim().to_lowercase()
        } else {
            text.to_string()
        }
    }
}

impl<V: From<String>> AutocompleteEngine<V> {
    /// Inserts `record`, or bumps the record already stored under the same
    /// normalized text. Blank text is rejected.
    ///
    /// A bump raises the stored weight by one, whatever weight the repeat
    /// carries, replaces the payload, keeps the original id and fires the
    /// `on_update` hook.
    pub fn insert(&mut self, record: Record<V>) -> bool {
        if record.text.trim().is_empty() {
            trace!(target: "autocomplete::engine", "rejected blank record");
            return false;
        }

        let text = self.normalize(&record.text);
        let weight = record.resolved_weight();
        let value = match record.value {
            Some(value) => value,
            None => V::from(text.clone()),
        };
        let path: Vec<char> = text.chars().collect();

        let existing = self.root.descend(&path).and_then(TrieNode::own_rank);
        let (id, weight) = match existing {
            Some(own) => (own.id, own.score.weight().unwrap_or_default().saturating_add(1)),
            None => (self.ids.next_id(), weight),
        };

        let merger = self.merger();
        let mut created = 0;
        attach(&mut self.root, &path, Rank::weighted(id, weight), merger, &mut created);
        self.node_count += created;

        let updated = NodeValue { id, text, value, weight };

        if existing.is_some() {
            debug!(target: "autocomplete::engine", ?id, weight, "record updated");
            if let Some(hook) = self.on_update.as_mut() {
                hook(&updated);
            }
        } else {
            debug!(target: "autocomplete::engine", ?id, weight, created, "record inserted");
        }

        self.value_by_key.insert(updated.id, updated.value);
        true
    }

    /// Inserts every record independently. True if any was accepted.
    pub fn insert_or_update<I>(&mut self, records: I) -> bool
    where
        I: IntoIterator<Item = Record<V>>,
    {
        records.into_iter().fold(false, |any, record| {
            let accepted = self.insert(record);
            accepted || any
        })
    }
}

/// Places `rank` at the end of `path`, creating nodes as needed, and folds the
/// updated lists back up to `node`.
fn attach(node: &mut TrieNode, path: &[char], rank: Rank, merger: RankMerger, created: &mut usize) {
    match path.split_first() {
        None => {
            node.own_rank = Some(rank);
            node.rank_list = merger.merge(&node.rank_list, &[rank], None);
        }
        Some((&key, rest)) => {
            let child = node.children.entry(key).or_insert_with(|| {
                *created += 1;
                TrieNode::new()
            });
            attach(child, rest, rank, merger, created);
            node.rank_list = merger.merge(&node.rank_list, &child.rank_list, None);
        }
    }
}

/// Clears the record at the end of `path` and purges its id on the way back
/// up. Returns `None`, touching nothing, when no record terminates there.
fn detach(node: &mut TrieNode, path: &[char], merger: RankMerger, pruned: &mut usize) -> Option<RecordId> {
    let removed = match path.split_first() {
        None => node.own_rank.take()?.id,
        Some((&key, rest)) => {
            let child = node.children.get_mut(&key)?;
            let id = detach(child, rest, merger, pruned)?;
            if child.is_prunable() {
                node.children.remove(&key);
                *pruned += 1;
            }
            id
        }
    };

    node.rank_list = merger.purge(&node.rank_list, removed);
    Some(removed)
}
