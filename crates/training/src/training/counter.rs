//! Pair counting for BPE training.
//!
//! Words are held as sequences of interned symbol ids together with their
//! corpus frequency. Pair statistics are recomputed from scratch for every
//! merge, which keeps the tie-break order a pure function of the current
//! word segmentations.

use super::frequency::WordFrequencies;
use super::symbols::SymbolTable;
use ahash::AHashMap;
use subword_core::Pair;

/// Adjacent-pair frequencies with their first-encounter order.
#[derive(Debug, Clone, Default)]
pub struct PairStats {
    /// Pair -> weighted frequency
    counts: AHashMap<Pair, u64>,
    /// Pairs in the order they were first seen
    order: Vec<Pair>,
}

impl PairStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` to the frequency of `pair`.
    pub fn add(&mut self, pair: Pair, count: u64) {
        match self.counts.get_mut(&pair) {
            Some(total) => *total += count,
            None => {
                self.counts.insert(pair, count);
                self.order.push(pair);
            }
        }
    }

    pub fn get(&self, pair: Pair) -> Option<u64> {
        self.counts.get(&pair).copied()
    }

    /// The most frequent pair. Ties go to the pair seen first.
    pub fn best(&self) -> Option<(Pair, u64)> {
        let mut best: Option<(Pair, u64)> = None;

        for &pair in &self.order {
            let count = self.counts[&pair];
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((pair, count));
            }
        }

        best
    }

    /// Iterate over `(pair, count)` in first-encounter order.
    pub fn iter(&self) -> impl Iterator<Item = (Pair, u64)> + '_ {
        self.order.iter().map(|pair| (*pair, self.counts[pair]))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Counter for BPE pair frequencies.
#[derive(Debug, Clone, Default)]
pub struct PairCounter {
    /// Word -> current segmentation (as symbol IDs)
    words: Vec<Vec<u32>>,
    /// Word -> frequency count
    word_counts: Vec<u64>,
}

impl PairCounter {
    /// Create a new pair counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counter with every word split into single characters.
    pub fn from_frequencies(frequencies: &WordFrequencies, symbols: &mut SymbolTable) -> Self {
        let mut counter = Self {
            words: Vec::with_capacity(frequencies.len()),
            word_counts: Vec::with_capacity(frequencies.len()),
        };

        let mut buf = [0u8; 4];
        for (word, count) in frequencies.iter() {
            let ids = word
                .chars()
                .map(|ch| symbols.intern(ch.encode_utf8(&mut buf)))
                .collect();
            counter.add_word(ids, count);
        }

        counter
    }

    /// Add a word segmentation occurring `count` times.
    pub fn add_word(&mut self, symbols: Vec<u32>, count: u64) {
        self.words.push(symbols);
        self.word_counts.push(count);
    }

    /// Count all adjacent pairs, weighted by word frequency.
    pub fn count_pairs(&self) -> PairStats {
        let mut stats = PairStats::new();

        for (word, &count) in self.words.iter().zip(self.word_counts.iter()) {
            for window in word.windows(2) {
                stats.add((window[0], window[1]), count);
            }
        }

        stats
    }

    /// Get the number of unique words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Get the total count of all word occurrences.
    pub fn total_word_occurrences(&self) -> u64 {
        self.word_counts.iter().sum()
    }

    /// Get a reference to the words.
    pub fn words(&self) -> &[Vec<u32>] {
        &self.words
    }

    /// Get a reference to the word counts.
    pub fn word_counts(&self) -> &[u64] {
        &self.word_counts
    }

    /// Replace every occurrence of `pair` with `new_id`.
    ///
    /// Occurrences are merged left to right without overlap, so `a a a`
    /// merged on `(a, a)` becomes `aa a`. Returns the number of occurrences
    /// merged across distinct words.
    pub fn merge_pair_in_words(&mut self, pair: Pair, new_id: u32) -> usize {
        let mut merged = 0;

        for word in &mut self.words {
            if word.len() < 2 {
                continue;
            }

            let mut write = 0;
            let mut read = 0;
            while read < word.len() {
                if read + 1 < word.len() && word[read] == pair.0 && word[read + 1] == pair.1 {
                    word[write] = new_id;
                    read += 2;
                    merged += 1;
                } else {
                    word[write] = word[read];
                    read += 1;
                }
                write += 1;
            }
            word.truncate(write);
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::training::frequency::WordCounter;

    fn counter(corpus: &[&str]) -> (PairCounter, SymbolTable) {
        let mut symbols = SymbolTable::new();
        let counter = PairCounter::from_frequencies(&WordCounter::count(corpus), &mut symbols);
        (counter, symbols)
    }

    #[test]
    fn test_from_frequencies_splits_characters() {
        let (counter, symbols) = counter(&["abc ab abc"]);

        assert_eq!(counter.word_count(), 2);
        assert_eq!(counter.word_counts(), &[2, 1]);
        assert_eq!(counter.total_word_occurrences(), 3);
        assert_eq!(symbols.len(), 3);
        assert_eq!(counter.words()[0].len(), 3);
    }

    #[test]
    fn test_count_pairs_with_frequency() {
        let (counter, symbols) = counter(&["ab ab ab bc"]);
        let a = symbols.get("a").unwrap();
        let b = symbols.get("b").unwrap();
        let c = symbols.get("c").unwrap();

        let stats = counter.count_pairs();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats.get((a, b)), Some(3));
        assert_eq!(stats.get((b, c)), Some(1));
        assert_eq!(stats.best(), Some(((a, b), 3)));
    }

    #[test]
    fn test_best_prefers_first_seen_on_tie() {
        let (counter, symbols) = counter(&["xy ab"]);
        let x = symbols.get("x").unwrap();
        let y = symbols.get("y").unwrap();

        assert_eq!(counter.count_pairs().best(), Some(((x, y), 1)));
    }

    #[test]
    fn test_best_on_empty_stats() {
        let (counter, _) = counter(&["a b c"]);
        assert!(counter.count_pairs().is_empty());
        assert_eq!(counter.count_pairs().best(), None);
    }

    #[test]
    fn test_merge_is_left_to_right_without_overlap() {
        let (mut counter, mut symbols) = counter(&["aaa"]);
        let a = symbols.get("a").unwrap();
        let aa = symbols.intern("aa");

        assert_eq!(counter.merge_pair_in_words((a, a), aa), 1);
        assert_eq!(counter.words()[0], vec![aa, a]);
    }

    #[test]
    fn test_merge_every_occurrence() {
        let (mut counter, mut symbols) = counter(&["abab xab"]);
        let a = symbols.get("a").unwrap();
        let b = symbols.get("b").unwrap();
        let x = symbols.get("x").unwrap();
        let ab = symbols.intern("ab");

        assert_eq!(counter.merge_pair_in_words((a, b), ab), 3);
        assert_eq!(counter.words()[0], vec![ab, ab]);
        assert_eq!(counter.words()[1], vec![x, ab]);
    }
}
