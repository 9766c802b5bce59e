//! Selection model shared by every screen.
//!
//! A [`Selection`] names the element that currently holds keyboard focus as a
//! `(kind, index)` pair. Icon selections use a flat index of
//! `card * icons_per_item + position`; the per-screen layout knows how to
//! decode it. Element counts are never stored here — they are re-queried
//! through [`CountsProvider`] on every navigation step so deletions between
//! key presses cannot leave a stale index dereferenced.

/// Kinds of navigable elements across all screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    TopButtons,
    MainButtons,
    Cards,
    Icons,
    GroupCards,
    ContentCards,
    GroupOptions,
}

/// Live element cardinality, owned by the embedding application.
///
/// Implementations answer from their data stores, not from a widget tree.
pub trait CountsProvider {
    fn count(&self, kind: ElementKind) -> usize;
}

/// The currently focused element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub kind: ElementKind,
    pub index: usize,
}

impl Selection {
    pub const fn new(kind: ElementKind, index: usize) -> Self {
        Self { kind, index }
    }

    /// Whether the index still resolves against the current counts.
    pub fn is_valid(&self, counts: &dyn CountsProvider) -> bool {
        self.index < counts.count(self.kind)
    }

    /// Clamp the index to the last valid element of the same kind.
    ///
    /// Returns `None` when the kind has no elements left, in which case the
    /// caller falls back to the screen's initial focus.
    pub fn clamped(&self, counts: &dyn CountsProvider) -> Option<Self> {
        let count = counts.count(self.kind);
        if count == 0 {
            None
        } else {
            Some(Self::new(self.kind, self.index.min(count - 1)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedCounts(HashMap<ElementKind, usize>);

    impl CountsProvider for FixedCounts {
        fn count(&self, kind: ElementKind) -> usize {
            self.0.get(&kind).copied().unwrap_or(0)
        }
    }

    #[test]
    fn validity_tracks_counts() {
        let counts = FixedCounts(HashMap::from([(ElementKind::Cards, 2)]));
        assert!(Selection::new(ElementKind::Cards, 1).is_valid(&counts));
        assert!(!Selection::new(ElementKind::Cards, 2).is_valid(&counts));
        assert!(!Selection::new(ElementKind::GroupCards, 0).is_valid(&counts));
    }

    #[test]
    fn clamp_shrinks_to_last_element() {
        let counts = FixedCounts(HashMap::from([(ElementKind::Cards, 3)]));
        let clamped = Selection::new(ElementKind::Cards, 7).clamped(&counts);
        assert_eq!(clamped, Some(Selection::new(ElementKind::Cards, 2)));
    }

    #[test]
    fn clamp_on_empty_kind_is_none() {
        let counts = FixedCounts(HashMap::new());
        assert_eq!(Selection::new(ElementKind::Cards, 0).clamped(&counts), None);
    }
}
