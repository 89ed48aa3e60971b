// src/core/rank.rs
use crate::core::types::{Rank, RecordId};
use std::collections::HashSet;

/// Bounded two-pointer merge of descending rank lists.
///
/// Used to fold a child's list into its parent on insert, to purge an id on
/// delete and to combine search branches. Inputs must already be sorted by
/// descending score.
#[derive(Debug, Clone, Copy)]
pub struct RankMerger {
    cap: usize,
}

impl RankMerger {
    pub fn new(cap: usize) -> Self {
        Self { cap }
    }

    /// Merges `first` and `second`, keeping at most `cap` entries.
    ///
    /// Each id is emitted once, at its highest score; ties go to `first`.
    /// Entries whose id equals `ignore` are dropped.
    pub fn merge(&self, first: &[Rank], second: &[Rank], ignore: Option<RecordId>) -> Vec<Rank> {
        let bound = self.cap.min(first.len() + second.len());
        let mut merged = Vec::with_capacity(bound);
        let mut seen = HashSet::with_capacity(bound);
        let (mut i, mut j) = (0, 0);

        while merged.len() < self.cap {
            let next = match (first.get(i), second.get(j)) {
                (Some(a), Some(b)) if a.id == b.id => {
                    i += 1;
                    j += 1;
                    if b.score > a.score { *b } else { *a }
                }
                (Some(a), Some(b)) => {
                    if a.score >= b.score {
                        i += 1;
                        *a
                    } else {
                        j += 1;
                        *b
                    }
                }
                (Some(a), None) => {
                    i += 1;
                    *a
                }
                (None, Some(b)) => {
                    j += 1;
                    *b
                }
                (None, None) => break,
            };

            // A later occurrence of an id always carries a lower or equal score.
            if Some(next.id) == ignore || !seen.insert(next.id) {
                continue;
            }
            merged.push(next);
        }

        merged
    }

    /// Removes `id` from `list` without a rebuild. Also re-caps the list.
    pub fn purge(&self, list: &[Rank], id: RecordId) -> Vec<Rank> {
        self.merge(list, &[], Some(id))
    }
}
