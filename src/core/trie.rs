// src/core/trie.rs
use crate::core::types::{Rank, RecordId};
use std::collections::BTreeMap;

/// One node of the ranked trie.
///
/// Each node is owned by its parent through `children`; there are no back
/// pointers. The engine keeps `rank_list` sorted by descending score, free
/// of duplicate ids and no longer than the configured suggestion cap. The
/// node itself never checks that.
#[derive(Debug, Clone, Default)]
pub struct TrieNode {
    /// Ordered by key so searches visit children deterministically.
    pub(crate) children: BTreeMap<char, TrieNode>,
    /// Id and weight of the record terminating exactly here, if any.
    pub(crate) own_rank: Option<Rank>,
    pub(crate) rank_list: Vec<Rank>,
}

impl TrieNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(&self, key: char) -> Option<&TrieNode> {
        self.children.get(&key)
    }

    pub fn children(&self) -> impl Iterator<Item = (char, &TrieNode)> {
        self.children.iter().map(|(&key, node)| (key, node))
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn own_rank(&self) -> Option<Rank> {
        self.own_rank
    }

    pub fn record_id(&self) -> Option<RecordId> {
        self.own_rank.map(|rank| rank.id)
    }

    pub fn has_record(&self) -> bool {
        self.own_rank.is_some()
    }

    /// Best records reachable through this node, itself included.
    pub fn rank_list(&self) -> &[Rank] {
        &self.rank_list
    }

    /// Walks an exact key path.
    pub fn descend(&self, path: &[char]) -> Option<&TrieNode> {
        path.iter().try_fold(self, |node, key| node.child(*key))
    }

    /// A node with neither a record nor children can be detached.
    pub(crate) fn is_prunable(&self) -> bool {
        self.own_rank.is_none() && self.children.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn new_node_is_empty() {
        let node = TrieNode::new();
        assert_eq!(node.child_count(), 0);
        assert!(!node.has_record());
        assert!(node.rank_list().is_empty());
        assert!(node.is_prunable());
    }

    #[rstest]
    fn descend_follows_exact_keys() {
        let mut root = TrieNode::new();
        let id = Uuid::from_u128(1);
        let leaf = root
            .children
            .entry('a')
            .or_default()
            .children
            .entry('b')
            .or_default();
        leaf.own_rank = Some(Rank::weighted(id, 4));

        assert_eq!(root.descend(&['a', 'b']).and_then(TrieNode::record_id), Some(id));
        assert!(root.descend(&['a', 'c']).is_none());
        assert!(!root.descend(&['a']).map_or(true, TrieNode::is_prunable));
    }
}
