//! Per-screen navigation rules.
//!
//! Every screen is a 2- or 3-tier vertical stack — top buttons, an optional
//! main-button row, and a scrollable content list whose entries may carry a
//! short row of action icons. The adjacency rules are identical in shape
//! across screens, so one set of pure functions parametrized by
//! [`ScreenLayout`] replaces a navigation class per screen. Per-screen
//! differences (icon count, button counts, whether horizontal movement exists
//! at all) live in the layout table, and every icon computation derives from
//! `icons_per_item` rather than a hard-coded modulus.

use crate::effect::Effect;
use crate::selection::{CountsProvider, ElementKind, Selection};
use crate::view::HighlightTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizontal {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScreenId {
    Main,
    Groups,
    GroupContent,
    SelectGroup,
    /// The settings window has no keyboard navigation of its own; resolving
    /// it falls back to the main layout (see `Navigator::set_screen`).
    Settings,
}

/// Static navigation shape of one screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub id: ScreenId,
    pub top_buttons: usize,
    pub main_buttons: usize,
    pub content: ElementKind,
    pub icons: Option<ElementKind>,
    pub icons_per_item: usize,
    /// Where focus lands when the content list is empty.
    pub fallback: ElementKind,
    /// SelectGroup is a flat list with no horizontal movement.
    pub horizontal: bool,
}

pub const MAIN: ScreenLayout = ScreenLayout {
    id: ScreenId::Main,
    top_buttons: 3,
    main_buttons: 3,
    content: ElementKind::Cards,
    icons: Some(ElementKind::Icons),
    icons_per_item: 3,
    fallback: ElementKind::MainButtons,
    horizontal: true,
};

pub const GROUPS: ScreenLayout = ScreenLayout {
    id: ScreenId::Groups,
    top_buttons: 2,
    main_buttons: 0,
    content: ElementKind::GroupCards,
    icons: Some(ElementKind::Icons),
    icons_per_item: 2,
    fallback: ElementKind::TopButtons,
    horizontal: true,
};

pub const GROUP_CONTENT: ScreenLayout = ScreenLayout {
    id: ScreenId::GroupContent,
    top_buttons: 1,
    main_buttons: 0,
    content: ElementKind::ContentCards,
    icons: Some(ElementKind::Icons),
    icons_per_item: 2,
    fallback: ElementKind::TopButtons,
    horizontal: true,
};

pub const SELECT_GROUP: ScreenLayout = ScreenLayout {
    id: ScreenId::SelectGroup,
    top_buttons: 1,
    main_buttons: 0,
    content: ElementKind::GroupOptions,
    icons: None,
    icons_per_item: 0,
    fallback: ElementKind::TopButtons,
    horizontal: false,
};

/// Resolve a screen to its navigation layout. `Settings` has none.
pub fn layout(screen: ScreenId) -> Option<&'static ScreenLayout> {
    match screen {
        ScreenId::Main => Some(&MAIN),
        ScreenId::Groups => Some(&GROUPS),
        ScreenId::GroupContent => Some(&GROUP_CONTENT),
        ScreenId::SelectGroup => Some(&SELECT_GROUP),
        ScreenId::Settings => None,
    }
}

/// Entry rule: first content element when the list is non-empty, otherwise
/// the first button of the layout's fallback tier.
pub fn initial_focus(layout: &ScreenLayout, counts: &dyn CountsProvider) -> Selection {
    if counts.count(layout.content) > 0 {
        Selection::new(layout.content, 0)
    } else {
        Selection::new(layout.fallback, 0)
    }
}

/// Up/Down movement through the tier stack.
///
/// Down from the last content entry and Up from the topmost tier stay put.
/// Vertical input while an icon is focused is also a no-op; the user backs
/// out to the card with Left first.
pub fn step_vertical(
    layout: &ScreenLayout,
    selection: Selection,
    direction: Vertical,
    counts: &dyn CountsProvider,
) -> Selection {
    match direction {
        Vertical::Down => {
            if selection.kind == ElementKind::TopButtons {
                if layout.main_buttons > 0 {
                    Selection::new(ElementKind::MainButtons, 0)
                } else if counts.count(layout.content) > 0 {
                    Selection::new(layout.content, 0)
                } else {
                    selection
                }
            } else if selection.kind == ElementKind::MainButtons {
                if counts.count(layout.content) > 0 {
                    Selection::new(layout.content, 0)
                } else {
                    selection
                }
            } else if selection.kind == layout.content {
                if selection.index + 1 < counts.count(layout.content) {
                    Selection::new(layout.content, selection.index + 1)
                } else {
                    selection
                }
            } else {
                selection
            }
        }
        Vertical::Up => {
            if selection.kind == layout.content {
                if selection.index > 0 {
                    Selection::new(layout.content, selection.index - 1)
                } else if layout.main_buttons > 0 {
                    Selection::new(ElementKind::MainButtons, 0)
                } else {
                    Selection::new(ElementKind::TopButtons, 0)
                }
            } else if selection.kind == ElementKind::MainButtons {
                Selection::new(ElementKind::TopButtons, 0)
            } else {
                selection
            }
        }
    }
}

fn button_tier_len(layout: &ScreenLayout, kind: ElementKind) -> Option<usize> {
    match kind {
        ElementKind::TopButtons => Some(layout.top_buttons),
        ElementKind::MainButtons if layout.main_buttons > 0 => Some(layout.main_buttons),
        _ => None,
    }
}

/// Left/Right movement: cyclic within a button tier, in/out of a card's icon
/// row at the content tier. Crossing from the last icon of one card to the
/// next card is not permitted.
pub fn step_horizontal(
    layout: &ScreenLayout,
    selection: Selection,
    direction: Horizontal,
    counts: &dyn CountsProvider,
) -> Selection {
    if !layout.horizontal {
        return selection;
    }
    let per_item = layout.icons_per_item;
    let next = match direction {
        Horizontal::Right => {
            if let Some(len) = button_tier_len(layout, selection.kind) {
                Selection::new(selection.kind, (selection.index + 1) % len)
            } else if selection.kind == layout.content {
                match layout.icons {
                    Some(icons) if per_item > 0 => {
                        Selection::new(icons, selection.index * per_item)
                    }
                    _ => selection,
                }
            } else if Some(selection.kind) == layout.icons {
                if selection.index % per_item < per_item - 1 {
                    Selection::new(selection.kind, selection.index + 1)
                } else {
                    selection
                }
            } else {
                selection
            }
        }
        Horizontal::Left => {
            if let Some(len) = button_tier_len(layout, selection.kind) {
                Selection::new(selection.kind, (selection.index + len - 1) % len)
            } else if Some(selection.kind) == layout.icons {
                if selection.index % per_item > 0 {
                    Selection::new(selection.kind, selection.index - 1)
                } else {
                    Selection::new(layout.content, selection.index / per_item)
                }
            } else {
                selection
            }
        }
    };
    // Navigation must never produce an out-of-range selection; if a computed
    // move lands outside the live counts, keep the previous selection.
    if next.is_valid(counts) { next } else { selection }
}

/// Where highlight styling should land for the given selection.
pub fn highlight_target(layout: &ScreenLayout, selection: Selection) -> HighlightTarget {
    if Some(selection.kind) == layout.icons && layout.icons_per_item > 0 {
        HighlightTarget::CardIcon {
            kind: layout.content,
            card: selection.index / layout.icons_per_item,
            icon: selection.index % layout.icons_per_item,
        }
    } else if selection.kind == layout.content {
        HighlightTarget::Card {
            kind: layout.content,
            index: selection.index,
        }
    } else {
        HighlightTarget::Button {
            kind: selection.kind,
            index: selection.index,
        }
    }
}

/// Map an activated selection to its effect descriptor.
///
/// Returns `None` for selections outside the screen's action tables (for
/// example a button index that no longer exists).
pub fn activate(layout: &ScreenLayout, selection: Selection) -> Option<Effect> {
    let per_item = layout.icons_per_item;
    let icon_pos = |index: usize| (index / per_item, index % per_item);
    match layout.id {
        ScreenId::Main => match selection.kind {
            ElementKind::TopButtons => match selection.index {
                0 => Some(Effect::ToggleTheme),
                1 => Some(Effect::OpenSettings),
                2 => Some(Effect::ExitApp),
                _ => None,
            },
            ElementKind::MainButtons => match selection.index {
                0 => Some(Effect::OpenGroups),
                1 => Some(Effect::ToggleFormat),
                2 => Some(Effect::ClearHistory),
                _ => None,
            },
            ElementKind::Cards => Some(Effect::PasteItem(selection.index)),
            ElementKind::Icons => {
                let (card, pos) = icon_pos(selection.index);
                match pos {
                    0 => Some(Effect::OpenSelectGroup(card)),
                    1 => Some(Effect::TogglePin(card)),
                    2 => Some(Effect::DeleteItem(card)),
                    _ => None,
                }
            }
            _ => None,
        },
        ScreenId::Groups => match selection.kind {
            ElementKind::TopButtons => match selection.index {
                0 => Some(Effect::AddGroup),
                1 => Some(Effect::CloseGroups),
                _ => None,
            },
            ElementKind::GroupCards => Some(Effect::OpenGroup(selection.index)),
            ElementKind::Icons => {
                let (card, pos) = icon_pos(selection.index);
                match pos {
                    0 => Some(Effect::EditGroup(card)),
                    1 => Some(Effect::DeleteGroup(card)),
                    _ => None,
                }
            }
            _ => None,
        },
        ScreenId::GroupContent => match selection.kind {
            ElementKind::TopButtons => match selection.index {
                0 => Some(Effect::CloseGroupContent),
                _ => None,
            },
            ElementKind::ContentCards => Some(Effect::PasteGroupItem(selection.index)),
            ElementKind::Icons => {
                let (card, pos) = icon_pos(selection.index);
                match pos {
                    0 => Some(Effect::EditGroupItem(card)),
                    1 => Some(Effect::RemoveGroupItem(card)),
                    _ => None,
                }
            }
            _ => None,
        },
        ScreenId::SelectGroup => match selection.kind {
            ElementKind::TopButtons => match selection.index {
                0 => Some(Effect::CloseDialog),
                _ => None,
            },
            ElementKind::GroupOptions => Some(Effect::AddToGroup(selection.index)),
            _ => None,
        },
        ScreenId::Settings => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FixedCounts(HashMap<ElementKind, usize>);

    impl FixedCounts {
        fn for_layout(layout: &ScreenLayout, content: usize) -> Self {
            let mut map = HashMap::new();
            map.insert(ElementKind::TopButtons, layout.top_buttons);
            map.insert(ElementKind::MainButtons, layout.main_buttons);
            map.insert(layout.content, content);
            if let Some(icons) = layout.icons {
                map.insert(icons, content * layout.icons_per_item);
            }
            Self(map)
        }
    }

    impl CountsProvider for FixedCounts {
        fn count(&self, kind: ElementKind) -> usize {
            self.0.get(&kind).copied().unwrap_or(0)
        }
    }

    fn sel(kind: ElementKind, index: usize) -> Selection {
        Selection::new(kind, index)
    }

    #[test]
    fn initial_focus_prefers_content() {
        let counts = FixedCounts::for_layout(&MAIN, 2);
        assert_eq!(initial_focus(&MAIN, &counts), sel(ElementKind::Cards, 0));
        let counts = FixedCounts::for_layout(&GROUPS, 1);
        assert_eq!(
            initial_focus(&GROUPS, &counts),
            sel(ElementKind::GroupCards, 0)
        );
    }

    #[test]
    fn initial_focus_empty_main_lands_on_main_buttons() {
        let counts = FixedCounts::for_layout(&MAIN, 0);
        assert_eq!(
            initial_focus(&MAIN, &counts),
            sel(ElementKind::MainButtons, 0)
        );
    }

    #[test]
    fn initial_focus_empty_two_tier_lands_on_top_buttons() {
        for layout in [&GROUPS, &GROUP_CONTENT, &SELECT_GROUP] {
            let counts = FixedCounts::for_layout(layout, 0);
            assert_eq!(
                initial_focus(layout, &counts),
                sel(ElementKind::TopButtons, 0),
            );
        }
    }

    #[test]
    fn down_descends_the_tier_stack() {
        let counts = FixedCounts::for_layout(&MAIN, 2);
        let s = sel(ElementKind::TopButtons, 1);
        let s = step_vertical(&MAIN, s, Vertical::Down, &counts);
        assert_eq!(s, sel(ElementKind::MainButtons, 0));
        let s = step_vertical(&MAIN, s, Vertical::Down, &counts);
        assert_eq!(s, sel(ElementKind::Cards, 0));
        let s = step_vertical(&MAIN, s, Vertical::Down, &counts);
        assert_eq!(s, sel(ElementKind::Cards, 1));
    }

    #[test]
    fn down_at_last_card_is_a_noop() {
        let counts = FixedCounts::for_layout(&MAIN, 3);
        let last = sel(ElementKind::Cards, 2);
        assert_eq!(step_vertical(&MAIN, last, Vertical::Down, &counts), last);
    }

    #[test]
    fn up_at_top_buttons_is_a_noop() {
        let counts = FixedCounts::for_layout(&MAIN, 3);
        let top = sel(ElementKind::TopButtons, 0);
        assert_eq!(step_vertical(&MAIN, top, Vertical::Up, &counts), top);
    }

    #[test]
    fn main_buttons_down_with_no_cards_stays() {
        let counts = FixedCounts::for_layout(&MAIN, 0);
        let s = sel(ElementKind::MainButtons, 2);
        assert_eq!(step_vertical(&MAIN, s, Vertical::Down, &counts), s);
    }

    #[test]
    fn up_from_first_card_reaches_tier_above() {
        let counts = FixedCounts::for_layout(&MAIN, 1);
        assert_eq!(
            step_vertical(&MAIN, sel(ElementKind::Cards, 0), Vertical::Up, &counts),
            sel(ElementKind::MainButtons, 0)
        );
        let counts = FixedCounts::for_layout(&GROUPS, 1);
        assert_eq!(
            step_vertical(
                &GROUPS,
                sel(ElementKind::GroupCards, 0),
                Vertical::Up,
                &counts
            ),
            sel(ElementKind::TopButtons, 0)
        );
    }

    #[test]
    fn vertical_on_icons_is_a_noop() {
        let counts = FixedCounts::for_layout(&MAIN, 2);
        let s = sel(ElementKind::Icons, 4);
        assert_eq!(step_vertical(&MAIN, s, Vertical::Down, &counts), s);
        assert_eq!(step_vertical(&MAIN, s, Vertical::Up, &counts), s);
    }

    #[test]
    fn button_tiers_wrap_horizontally() {
        let counts = FixedCounts::for_layout(&MAIN, 0);
        let s = sel(ElementKind::TopButtons, 2);
        assert_eq!(
            step_horizontal(&MAIN, s, Horizontal::Right, &counts),
            sel(ElementKind::TopButtons, 0)
        );
        let s = sel(ElementKind::MainButtons, 0);
        assert_eq!(
            step_horizontal(&MAIN, s, Horizontal::Left, &counts),
            sel(ElementKind::MainButtons, 2)
        );
    }

    // Scenario: two clipboard items, Right from the first card walks the
    // three icons and stops at the last one.
    #[test]
    fn icon_walk_clamps_at_the_last_icon() {
        let counts = FixedCounts::for_layout(&MAIN, 2);
        let mut s = sel(ElementKind::Cards, 0);
        s = step_horizontal(&MAIN, s, Horizontal::Right, &counts);
        assert_eq!(s, sel(ElementKind::Icons, 0));
        s = step_horizontal(&MAIN, s, Horizontal::Right, &counts);
        s = step_horizontal(&MAIN, s, Horizontal::Right, &counts);
        assert_eq!(s, sel(ElementKind::Icons, 2));
        s = step_horizontal(&MAIN, s, Horizontal::Right, &counts);
        assert_eq!(s, sel(ElementKind::Icons, 2));
    }

    #[test]
    fn icon_round_trip_returns_to_the_card() {
        let counts = FixedCounts::for_layout(&MAIN, 3);
        let start = sel(ElementKind::Cards, 2);
        let over = step_horizontal(&MAIN, start, Horizontal::Right, &counts);
        assert_eq!(over, sel(ElementKind::Icons, 6));
        let back = step_horizontal(&MAIN, over, Horizontal::Left, &counts);
        assert_eq!(back, start);
    }

    #[test]
    fn groups_icons_use_two_per_card() {
        let counts = FixedCounts::for_layout(&GROUPS, 1);
        let mut s = sel(ElementKind::GroupCards, 0);
        s = step_horizontal(&GROUPS, s, Horizontal::Right, &counts);
        assert_eq!(s, sel(ElementKind::Icons, 0));
        s = step_horizontal(&GROUPS, s, Horizontal::Right, &counts);
        assert_eq!(s, sel(ElementKind::Icons, 1));
        // no third icon on group cards
        assert_eq!(
            step_horizontal(&GROUPS, s, Horizontal::Right, &counts),
            sel(ElementKind::Icons, 1)
        );
        assert_eq!(activate(&GROUPS, s), Some(Effect::DeleteGroup(0)));
    }

    #[test]
    fn select_group_has_no_horizontal_navigation() {
        let counts = FixedCounts::for_layout(&SELECT_GROUP, 2);
        let s = sel(ElementKind::GroupOptions, 1);
        assert_eq!(step_horizontal(&SELECT_GROUP, s, Horizontal::Right, &counts), s);
        assert_eq!(step_horizontal(&SELECT_GROUP, s, Horizontal::Left, &counts), s);
    }

    #[test]
    fn main_activation_tables() {
        assert_eq!(
            activate(&MAIN, sel(ElementKind::MainButtons, 0)),
            Some(Effect::OpenGroups)
        );
        assert_eq!(
            activate(&MAIN, sel(ElementKind::TopButtons, 2)),
            Some(Effect::ExitApp)
        );
        assert_eq!(
            activate(&MAIN, sel(ElementKind::Cards, 4)),
            Some(Effect::PasteItem(4))
        );
        // icons of card 1: arrow, pin, delete
        assert_eq!(
            activate(&MAIN, sel(ElementKind::Icons, 3)),
            Some(Effect::OpenSelectGroup(1))
        );
        assert_eq!(
            activate(&MAIN, sel(ElementKind::Icons, 4)),
            Some(Effect::TogglePin(1))
        );
        assert_eq!(
            activate(&MAIN, sel(ElementKind::Icons, 5)),
            Some(Effect::DeleteItem(1))
        );
    }

    #[test]
    fn dialog_activation_tables() {
        assert_eq!(
            activate(&GROUP_CONTENT, sel(ElementKind::TopButtons, 0)),
            Some(Effect::CloseGroupContent)
        );
        assert_eq!(
            activate(&GROUP_CONTENT, sel(ElementKind::Icons, 3)),
            Some(Effect::RemoveGroupItem(1))
        );
        assert_eq!(
            activate(&SELECT_GROUP, sel(ElementKind::GroupOptions, 2)),
            Some(Effect::AddToGroup(2))
        );
        assert_eq!(
            activate(&SELECT_GROUP, sel(ElementKind::TopButtons, 0)),
            Some(Effect::CloseDialog)
        );
    }

    #[test]
    fn highlight_targets_decode_icons() {
        assert_eq!(
            highlight_target(&MAIN, sel(ElementKind::Icons, 7)),
            HighlightTarget::CardIcon {
                kind: ElementKind::Cards,
                card: 2,
                icon: 1
            }
        );
        assert_eq!(
            highlight_target(&GROUPS, sel(ElementKind::Icons, 3)),
            HighlightTarget::CardIcon {
                kind: ElementKind::GroupCards,
                card: 1,
                icon: 1
            }
        );
        assert_eq!(
            highlight_target(&MAIN, sel(ElementKind::TopButtons, 1)),
            HighlightTarget::Button {
                kind: ElementKind::TopButtons,
                index: 1
            }
        );
    }
}
