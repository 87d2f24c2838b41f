use std::collections::HashMap;

use connect_four_core::BoardKey;

use crate::evaluation::Score;

/// Cached result of searching a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CacheEntry {
    pub score: Score,
    pub depth: u32, // remaining depth the score was computed with
}

/// Memoization table for the minimax search, keyed by exact board encoding.
///
/// An entry is reused for any request whose depth is at most the stored
/// depth. Scores are stored without bound types, so a value produced under a
/// narrowed alpha-beta window is later read back as if it were exact. This
/// is a deliberate approximation, not a sound transposition table.
///
/// The cache lives as long as its game session and is never evicted.
#[derive(Debug, Default)]
pub struct TranspositionCache {
    entries: HashMap<BoardKey, CacheEntry>,
    hits: u64,
    misses: u64,
}

impl TranspositionCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached score for `key` if it was searched at least
    /// `depth` plies deep.
    pub fn probe(&mut self, key: &BoardKey, depth: u32) -> Option<Score> {
        match self.entries.get(key) {
            Some(entry) if entry.depth >= depth => {
                self.hits += 1;
                Some(entry.score)
            }
            _ => {
                self.misses += 1;
                None
            }
        }
    }

    /// Records a result, replacing whatever was stored for `key`.
    pub fn store(&mut self, key: BoardKey, score: Score, depth: u32) {
        self.entries.insert(key, CacheEntry { score, depth });
    }

    pub fn get(&self, key: &BoardKey) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}
