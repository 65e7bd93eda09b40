// src/services/search.rs

//! Keyword filtering over a year's awards.

use crate::models::Award;

/// Awards matching a keyword, with their positions in the unfiltered list.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterResult<'a> {
    pub filtered: Vec<&'a Award>,
    /// `index_map[i]` is the original position of `filtered[i]`
    pub index_map: Vec<usize>,
}

impl<'a> FilterResult<'a> {
    pub fn len(&self) -> usize {
        self.filtered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filtered.is_empty()
    }

    /// Position within `filtered` of the award at `original` index.
    pub fn position_of(&self, original: usize) -> Option<usize> {
        self.index_map.iter().position(|&i| i == original)
    }
}

/// Narrow awards to those whose name or honoree contains `keyword`.
///
/// Matching is case-insensitive and order-preserving. A blank keyword
/// returns every award with the identity mapping.
pub fn filter_awards<'a>(awards: &'a [Award], keyword: &str) -> FilterResult<'a> {
    let needle = keyword.trim().to_lowercase();

    let (index_map, filtered) = awards
        .iter()
        .enumerate()
        .filter(|(_, award)| needle.is_empty() || matches(award, &needle))
        .unzip();

    FilterResult {
        filtered,
        index_map,
    }
}

fn matches(award: &Award, needle: &str) -> bool {
    award.name.to_lowercase().contains(needle)
        || award.winner.game_name.to_lowercase().contains(needle)
}
