//! Query → element resolution.
//!
//! Similarity is a cheap bag-of-characters measure with a containment
//! shortcut; it is order-insensitive and can overrate anagrams. Scores are
//! boosted for buttons, weighted by confidence, and the arg-max wins if it
//! clears the threshold.

use crate::config::MatchingConfig;
use crate::perception::types::{ElementType, UIElement};

#[derive(Debug, Clone)]
pub struct Matcher {
    button_boost: f32,
    min_score: f32,
    containment_score: f32,
}

impl Default for Matcher {
    fn default() -> Self {
        Self::new(&MatchingConfig::default())
    }
}

/// An element index with its score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scored {
    pub index: usize,
    pub score: f32,
}

impl Matcher {
    pub fn new(cfg: &MatchingConfig) -> Self {
        Self {
            button_boost: cfg.button_boost,
            min_score: cfg.min_score,
            containment_score: cfg.containment_score,
        }
    }

    /// Case-insensitive similarity in `[0, 1]`. An empty `text` always scores 0.
    pub fn similarity(&self, text: &str, query: &str) -> f32 {
        let a = text.to_lowercase();
        let b = query.to_lowercase();
        if a.is_empty() {
            return 0.0;
        }
        if a.contains(&b) || b.contains(&a) {
            return self.containment_score;
        }

        // Every occurrence in `a` counts, so "aaa" vs "a…" scores 3 hits.
        let hits = a.chars().filter(|c| b.contains(*c)).count();
        let longest = a.chars().count().max(b.chars().count());
        hits as f32 / longest as f32
    }

    /// Unclamped: a confident button can exceed 1.0.
    pub fn score(&self, element: &UIElement, query: &str) -> f32 {
        let mut score = self.similarity(&element.text, query);
        if element.node_type == ElementType::Button {
            score *= self.button_boost;
        }
        score * (element.confidence / 100.0)
    }

    /// Every element's score, in list order.
    pub fn rank(&self, elements: &[UIElement], query: &str) -> Vec<Scored> {
        elements
            .iter()
            .enumerate()
            .map(|(index, e)| Scored {
                index,
                score: self.score(e, query),
            })
            .collect()
    }

    /// Index of the first element holding the strictly greatest score, if
    /// that score is above the threshold.
    pub fn best_index(&self, elements: &[UIElement], query: &str) -> Option<Scored> {
        let mut best: Option<Scored> = None;
        for scored in self.rank(elements, query) {
            if best.map_or(true, |b| scored.score > b.score) {
                best = Some(scored);
            }
        }
        let best = best?;
        tracing::debug!(query = %query, index = best.index, score = best.score, "best candidate");
        (best.score > self.min_score).then_some(best)
    }

    pub fn find_best_match<'a>(&self, elements: &'a [UIElement], query: &str) -> Option<&'a UIElement> {
        self.best_index(elements, query).map(|s| &elements[s.index])
    }
}
