//! Merge rule management for BPE.
//!
//! Merge rules are kept as symbol strings in the exact order training
//! discovered them. The order is part of the trained artifact: replaying the
//! rules in order reproduces every intermediate symbol.

use ahash::AHashMap;
use compact_str::{format_compact, CompactString};
use std::fmt;

/// A pair of symbol ids that can be merged during training.
pub type Pair = (u32, u32);

/// An ordered pair of adjacent symbols selected during training.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRule {
    /// Left symbol
    pub left: CompactString,
    /// Right symbol
    pub right: CompactString,
}

impl MergeRule {
    /// Create a merge rule from its two symbols.
    pub fn new(left: impl Into<CompactString>, right: impl Into<CompactString>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// The symbol produced by this merge.
    pub fn merged(&self) -> CompactString {
        format_compact!("{}{}", self.left, self.right)
    }
}

impl fmt::Display for MergeRule {
    /// Formats as one `merges.txt` line without the newline.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.left, self.right)
    }
}

/// Ordered collection of merge rules with rank lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeRules {
    /// Rules in discovery order
    rules: Vec<MergeRule>,
    /// Rule -> rank (index in `rules`)
    ranks: AHashMap<MergeRule, u32>,
}

impl MergeRules {
    /// Create a new empty collection of merge rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next discovered rule and return its rank.
    ///
    /// Ranks are assigned in call order (0, 1, 2, ...). A repeated rule is
    /// kept in place; lookups report its first rank.
    pub fn push(&mut self, rule: MergeRule) -> u32 {
        let rank = self.rules.len() as u32;
        self.ranks.entry(rule.clone()).or_insert(rank);
        self.rules.push(rule);
        rank
    }

    /// Get the first rank of a rule, if it was recorded.
    #[inline]
    pub fn rank(&self, rule: &MergeRule) -> Option<u32> {
        self.ranks.get(rule).copied()
    }

    /// Get the rule recorded at `rank`.
    #[inline]
    pub fn get(&self, rank: u32) -> Option<&MergeRule> {
        self.rules.get(rank as usize)
    }

    /// Iterate over rules in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, MergeRule> {
        self.rules.iter()
    }

    /// Get the number of merge rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if there are no merge rules.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl FromIterator<MergeRule> for MergeRules {
    fn from_iter<T: IntoIterator<Item = MergeRule>>(iter: T) -> Self {
        let mut rules = Self::new();
        for rule in iter {
            rules.push(rule);
        }
        rules
    }
}

impl<'a> IntoIterator for &'a MergeRules {
    type Item = &'a MergeRule;
    type IntoIter = std::slice::Iter<'a, MergeRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.rules.iter()
    }
}
