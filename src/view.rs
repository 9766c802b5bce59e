//! Render-layer seam.
//!
//! The navigation core never touches widgets. It describes what should be
//! emphasized through [`HighlightTarget`] and hands the description to a
//! [`ViewSurface`] owned by the embedding screen controller. A surface whose
//! backing window is gone must treat every call as a no-op rather than fail.

use crate::selection::ElementKind;
use crate::theme::HighlightPalette;

/// Which element (and sub-part) should receive highlight styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTarget {
    /// A single button in a button tier.
    Button { kind: ElementKind, index: usize },
    /// A whole content card body.
    Card { kind: ElementKind, index: usize },
    /// A card body plus one of its icons. The card keeps the normal emphasis
    /// while the icon gets the icon emphasis.
    CardIcon {
        kind: ElementKind,
        card: usize,
        icon: usize,
    },
}

impl HighlightTarget {
    /// Index of the content card involved, if any. Used for scrolling.
    pub fn card_index(&self) -> Option<usize> {
        match self {
            HighlightTarget::Button { .. } => None,
            HighlightTarget::Card { index, .. } => Some(*index),
            HighlightTarget::CardIcon { card, .. } => Some(*card),
        }
    }
}

/// Render collaborator for one screen.
pub trait ViewSurface {
    /// Whether the backing window exists and can take focus. Modal dialogs
    /// report `false` until fully constructed; the navigator defers its focus
    /// grab until [`crate::dispatcher::Navigator::notify_ready`].
    fn is_ready(&self) -> bool {
        true
    }

    fn highlight(&mut self, target: HighlightTarget, palette: HighlightPalette);

    fn clear_highlights(&mut self);

    /// Scroll the element into the visible region if it lies outside it.
    fn scroll_into_view(&mut self, target: HighlightTarget);
}
