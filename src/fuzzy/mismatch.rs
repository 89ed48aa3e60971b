// src/fuzzy/mismatch.rs
use crate::core::rank::RankMerger;
use crate::core::trie::TrieNode;
use crate::core::types::Rank;
use tracing::trace;

/// Prefix search that tolerates up to `allowed` character substitutions.
///
/// Insertions and deletions are not modeled: the query and the trie path are
/// compared position by position. Every branch explored costs one rank-list
/// merge, so the work is bounded by (branches within budget) x `cap`.
pub struct MismatchSearch<'a> {
    query: &'a [char],
    allowed: usize,
    merger: RankMerger,
}

impl<'a> MismatchSearch<'a> {
    pub fn new(query: &'a [char], allowed: usize, merger: RankMerger) -> Self {
        Self { query, allowed, merger }
    }

    pub fn run(&self, root: &TrieNode) -> Vec<Rank> {
        let found = self.search(root, 0, 0);
        trace!(
            target: "autocomplete::fuzzy",
            query_len = self.query.len(),
            allowed = self.allowed,
            hits = found.len(),
            "mismatch search finished"
        );
        found
    }

    fn search(&self, node: &TrieNode, index: usize, mismatches: usize) -> Vec<Rank> {
        let Some(&current) = self.query.get(index) else {
            return self.settle(node, mismatches);
        };

        let exact = node.child(current);
        let mut found = match exact {
            Some(child) => self.search(child, index + 1, mismatches),
            None => Vec::new(),
        };

        if mismatches >= self.allowed {
            return self.merger.merge(&found, &[], None);
        }

        // The exact branch went first so it wins ties against substitutions.
        for (key, child) in node.children() {
            if key == current {
                continue;
            }
            let branch = self.search(child, index + 1, mismatches + 1);
            found = self.merger.merge(&found, &branch, None);
        }
        found
    }

    /// The query is used up at `node`.
    fn settle(&self, node: &TrieNode, mismatches: usize) -> Vec<Rank> {
        match node.own_rank() {
            // Only a substitution-free path earns the exact promotion.
            Some(own) if mismatches == 0 => self.merger.merge(&[Rank::exact(own.id)], node.rank_list(), None),
            _ => self.merger.merge(node.rank_list(), &[], None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Score;
    use rstest::rstest;
    use uuid::Uuid;

    /// Builds a trie by hand, bypassing the engine, with correct rank lists.
    fn build(words: &[(&str, i64)], cap: usize) -> TrieNode {
        let merger = RankMerger::new(cap);
        let mut root = TrieNode::new();
        for (n, (word, weight)) in words.iter().enumerate() {
            let rank = Rank::weighted(Uuid::from_u128(n as u128 + 1), *weight);
            let mut node = &mut root;
            node.rank_list = merger.merge(&node.rank_list, &[rank], None);
            for ch in word.chars() {
                node = node.children.entry(ch).or_default();
                node.rank_list = merger.merge(&node.rank_list, &[rank], None);
            }
            node.own_rank = Some(rank);
        }
        root
    }

    fn run(root: &TrieNode, query: &str, allowed: usize, cap: usize) -> Vec<Rank> {
        let query: Vec<char> = query.chars().collect();
        MismatchSearch::new(&query, allowed, RankMerger::new(cap)).run(root)
    }

    fn ids(list: &[Rank]) -> Vec<u128> {
        list.iter().map(|r| r.id.as_u128()).collect()
    }

    #[rstest]
    fn exact_terminal_is_promoted() {
        let root = build(&[("ab", 1), ("abc", 50)], 10);
        let found = run(&root, "ab", 0, 10);
        assert_eq!(ids(&found), vec![1, 2]);
        assert_eq!(found[0].score, Score::Exact);
        assert_eq!(found[1].score, Score::Weighted(50));
    }

    #[rstest]
    fn zero_budget_is_strict_prefix() {
        let root = build(&[("cat", 3), ("car", 2), ("bat", 9)], 10);
        assert_eq!(ids(&run(&root, "ca", 0, 10)), vec![1, 2]);
        assert!(run(&root, "cx", 0, 10).is_empty());
    }

    #[rstest]
    #[case(1, vec![1, 3])]
    #[case(2, vec![1, 3])]
    #[case(3, vec![1, 3, 2])]
    fn budget_limits_substitutions(#[case] allowed: usize, #[case] expected: Vec<u128>) {
        let root = build(&[("cat", 3), ("dog", 2), ("bat", 9)], 10);
        assert_eq!(ids(&run(&root, "cat", allowed, 10)), expected);
    }

    #[rstest]
    fn substituted_terminal_keeps_its_weight() {
        let root = build(&[("cat", 3), ("bat", 9)], 10);
        let found = run(&root, "cat", 1, 10);
        assert_eq!(found[0], Rank::exact(Uuid::from_u128(1)));
        assert_eq!(found[1], Rank::weighted(Uuid::from_u128(2), 9));
    }

    #[rstest]
    fn query_longer_than_paths_finds_nothing() {
        let root = build(&[("ab", 1)], 10);
        assert!(run(&root, "abc", 3, 10).is_empty());
    }

    #[rstest]
    fn ties_follow_exact_branch_then_key_order() {
        let root = build(&[("zb", 1), ("mb", 1), ("ab", 1)], 10);
        assert_eq!(ids(&run(&root, "z", 1, 10)), vec![1, 3, 2]);
        assert_eq!(ids(&run(&root, "x", 1, 2)), vec![3, 2]);
    }

    #[rstest]
    fn results_respect_cap() {
        let root = build(&[("aa", 1), ("ab", 2), ("ac", 3), ("ad", 4)], 10);
        assert_eq!(run(&root, "a", 0, 2).len(), 2);
        assert_eq!(run(&root, "ax", 1, 3).len(), 3);
    }
}
