//! The cascade resolver (§4.7): given the candidate declarations competing
//! for one property on one element, picks the winner. This module does not
//! perform selector matching — it only totals the weight a caller already
//! assembled for each candidate (its origin, importance, layer, specificity
//! and source order) and orders them.

use crate::selector::Specificity;
use std::cmp::Ordering;

/// Where a declaration came from. `Transition` sits above every other tier
/// regardless of importance, the way CSS Cascade 5 treats animations and
/// transitions as generated, highest-priority origins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    UserAgent,
    User,
    Author,
    Transition,
}

/// The full weight of one candidate declaration, everything §4.7's
/// ordering needs to rank it against its competitors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CascadeWeight {
    pub origin: Origin,
    pub important: bool,
    /// `None` means the declaration is unlayered. Layers are numbered in
    /// the order `@layer` first introduced their name.
    pub layer_order: Option<u32>,
    pub specificity: Specificity,
    /// Position among all declarations considered together; later
    /// declarations have a larger value. Breaks every other tie.
    pub source_order: u32,
}

impl CascadeWeight {
    #[must_use]
    pub fn new(origin: Origin, important: bool, specificity: Specificity, source_order: u32) -> Self {
        Self {
            origin,
            important,
            layer_order: None,
            specificity,
            source_order,
        }
    }

    #[must_use]
    pub fn with_layer(mut self, layer_order: Option<u32>) -> Self {
        self.layer_order = layer_order;
        self
    }
}

/// The origin/importance tier, highest wins. `Transition` is unconditionally
/// on top; otherwise origins step up from user-agent to author, with the
/// importance flip in the middle (`!important` outranks every normal tier).
fn tier_rank(weight: &CascadeWeight) -> u8 {
    match (weight.origin, weight.important) {
        (Origin::Transition, _) => 6,
        (Origin::UserAgent, false) => 0,
        (Origin::User, false) => 1,
        (Origin::Author, false) => 2,
        (Origin::Author, true) => 3,
        (Origin::User, true) => 4,
        (Origin::UserAgent, true) => 5,
    }
}

/// Normal declarations: lower layer order wins; unlayered is treated as the
/// last layer (the largest possible order), so it loses to any named layer.
fn layer_key_normal(layer_order: Option<u32>) -> std::cmp::Reverse<u32> {
    std::cmp::Reverse(layer_order.unwrap_or(u32::MAX))
}

/// Important declarations: higher layer order wins; unlayered is treated as
/// the first layer (the smallest possible order), so it loses to any named
/// layer's important declarations.
fn layer_key_important(layer_order: Option<u32>) -> i64 {
    layer_order.map_or(i64::MIN, i64::from)
}

fn compare(a: &CascadeWeight, b: &CascadeWeight) -> Ordering {
    tier_rank(a)
        .cmp(&tier_rank(b))
        .then_with(|| {
            if a.important {
                layer_key_important(a.layer_order).cmp(&layer_key_important(b.layer_order))
            } else {
                layer_key_normal(a.layer_order).cmp(&layer_key_normal(b.layer_order))
            }
        })
        .then_with(|| a.specificity.cmp(&b.specificity))
        .then_with(|| a.source_order.cmp(&b.source_order))
}

/// Picks the winning candidate for one property on one element, or `None`
/// if `candidates` is empty. Ties cannot occur as long as every candidate
/// carries a distinct `source_order` — the usual case, since source order
/// is assigned by the caller walking declarations in document order.
pub fn resolve<T>(candidates: &[(T, CascadeWeight)]) -> Option<&T> {
    candidates
        .iter()
        .max_by(|a, b| compare(&a.1, &b.1))
        .map(|(value, _)| value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(origin: Origin, important: bool, spec: (u32, u32, u32), order: u32) -> CascadeWeight {
        CascadeWeight::new(
            origin,
            important,
            Specificity { ids: spec.0, classes: spec.1, elements: spec.2 },
            order,
        )
    }

    #[test]
    fn important_beats_normal_at_equal_specificity() {
        let candidates = vec![
            ("normal", w(Origin::Author, false, (0, 0, 1), 1)),
            ("important", w(Origin::Author, true, (0, 0, 1), 0)),
        ];
        assert_eq!(resolve(&candidates), Some(&"important"));
    }

    #[test]
    fn higher_specificity_wins_within_same_tier() {
        let candidates = vec![
            ("low", w(Origin::Author, false, (0, 1, 0), 0)),
            ("high", w(Origin::Author, false, (1, 0, 0), 1)),
        ];
        assert_eq!(resolve(&candidates), Some(&"high"));
    }

    #[test]
    fn later_source_order_wins_remaining_ties() {
        let candidates = vec![
            ("first", w(Origin::Author, false, (0, 1, 0), 0)),
            ("second", w(Origin::Author, false, (0, 1, 0), 1)),
        ];
        assert_eq!(resolve(&candidates), Some(&"second"));
    }

    #[test]
    fn removing_winner_promotes_next_highest() {
        let mut candidates = vec![
            ("a", w(Origin::Author, false, (0, 1, 0), 0)),
            ("b", w(Origin::Author, false, (0, 2, 0), 1)),
            ("c", w(Origin::Author, false, (0, 1, 0), 2)),
        ];
        assert_eq!(resolve(&candidates), Some(&"b"));
        candidates.retain(|(name, _)| *name != "b");
        assert_eq!(resolve(&candidates), Some(&"c"));
    }

    #[test]
    fn transition_origin_always_wins() {
        let candidates = vec![
            ("important-ua", w(Origin::UserAgent, true, (1, 0, 0), 5)),
            ("transition", w(Origin::Transition, false, (0, 0, 0), 0)),
        ];
        assert_eq!(resolve(&candidates), Some(&"transition"));
    }

    #[test]
    fn unlayered_normal_loses_to_named_layer() {
        let layered = w(Origin::Author, false, (0, 0, 0), 0).with_layer(Some(0));
        let unlayered = w(Origin::Author, false, (0, 0, 0), 1);
        let candidates = vec![("layered", layered), ("unlayered", unlayered)];
        assert_eq!(resolve(&candidates), Some(&"layered"));
    }

    #[test]
    fn unlayered_important_loses_to_named_layer() {
        let layered = w(Origin::Author, true, (0, 0, 0), 0).with_layer(Some(0));
        let unlayered = w(Origin::Author, true, (0, 0, 0), 1);
        let candidates = vec![("layered", layered), ("unlayered", unlayered)];
        assert_eq!(resolve(&candidates), Some(&"layered"));
    }

    #[test]
    fn empty_candidate_set_resolves_to_none() {
        let candidates: Vec<(&str, CascadeWeight)> = Vec::new();
        assert_eq!(resolve(&candidates), None);
    }
}
