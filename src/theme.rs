//! Centralized highlight palette.
//!
//! Colors are kept as raw RGB so the navigation core stays independent of any
//! particular render backend; the UI maps them to its own color type.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Emphasis colors for the focused element.
///
/// `normal` is applied to buttons and card bodies, `icon` to the focused icon
/// inside a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HighlightPalette {
    pub normal: Rgb,
    pub icon: Rgb,
}

pub const DARK_HIGHLIGHT: HighlightPalette = HighlightPalette {
    normal: Rgb(0x44, 0x44, 0x44),
    icon: Rgb(0x66, 0x66, 0x66),
};

pub const LIGHT_HIGHLIGHT: HighlightPalette = HighlightPalette {
    normal: Rgb(0xcc, 0xcc, 0xcc),
    icon: Rgb(0xaa, 0xaa, 0xaa),
};

pub fn highlight_palette(dark_mode: bool) -> HighlightPalette {
    if dark_mode { DARK_HIGHLIGHT } else { LIGHT_HIGHLIGHT }
}

// Base (unhighlighted) surfaces used by the bundled terminal front-end.

pub fn card_bg(dark_mode: bool) -> Rgb {
    if dark_mode {
        Rgb(0x2b, 0x2b, 0x2b)
    } else {
        Rgb(0xf4, 0xf4, 0xf4)
    }
}

pub fn button_bg(dark_mode: bool) -> Rgb {
    if dark_mode {
        Rgb(0x33, 0x33, 0x33)
    } else {
        Rgb(0xe0, 0xe0, 0xe0)
    }
}

pub fn fg(dark_mode: bool) -> Rgb {
    if dark_mode {
        Rgb(0xee, 0xee, 0xee)
    } else {
        Rgb(0x11, 0x11, 0x11)
    }
}
