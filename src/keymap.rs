//! Keyboard bindings and routing.
//!
//! Each screen owns a table of active bindings; a separate global table holds
//! the show/hide hotkey that works while the popup is hidden. Routing order
//! for a physical key event: the current screen's bindings first, then — only
//! while the popup is visible — the arrow/Enter/Escape forwarding path into
//! the navigation dispatcher, then the global table.

use std::collections::HashMap;
use std::fmt;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::screens::ScreenId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    NavigateUp,
    NavigateDown,
    NavigateLeft,
    NavigateRight,
    Activate,
    /// Screen-dependent: closes the current screen, or hides the popup when
    /// the main screen is active.
    Back,
    ToggleWindow,
    // Main screen mnemonics
    ShowGroups,
    ToggleFormat,
    ClearHistory,
    // Groups screen mnemonics
    AddGroup,
    // Group content mnemonics
    EditItem,
    DeleteItem,
}

impl fmt::Display for NavAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            NavAction::NavigateUp => "Navigate up",
            NavAction::NavigateDown => "Navigate down",
            NavAction::NavigateLeft => "Navigate left",
            NavAction::NavigateRight => "Navigate right",
            NavAction::Activate => "Activate selection",
            NavAction::Back => "Back / hide",
            NavAction::ToggleWindow => "Show or hide the popup",
            NavAction::ShowGroups => "Open groups (Alt+G)",
            NavAction::ToggleFormat => "Toggle paste format (Alt+F)",
            NavAction::ClearHistory => "Clear history (Alt+C)",
            NavAction::AddGroup => "Add group (Alt+N)",
            NavAction::EditItem => "Edit item (Alt+E)",
            NavAction::DeleteItem => "Delete item (Alt+D)",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

impl KeyCombo {
    pub fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    pub fn matches(&self, key: &KeyEvent) -> bool {
        key.code == self.code && key.modifiers == self.mods
    }

    pub fn display(&self) -> String {
        let mut parts = Vec::new();
        if self.mods.contains(KeyModifiers::CONTROL) {
            parts.push("Ctrl".to_string());
        }
        if self.mods.contains(KeyModifiers::ALT) {
            parts.push("Alt".to_string());
        }
        if self.mods.contains(KeyModifiers::SHIFT) {
            parts.push("Shift".to_string());
        }
        let code = match self.code {
            KeyCode::Char(c) => c.to_ascii_uppercase().to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Enter => "Enter".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            _ => format!("{:?}", self.code),
        };
        parts.push(code);
        parts.join("+")
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<NavAction, Vec<KeyCombo>>,
}

impl KeyBindings {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    pub fn add(&mut self, action: NavAction, combo: KeyCombo) {
        self.map.entry(action).or_default().push(combo);
    }

    pub fn matches(&self, action: NavAction, key: &KeyEvent) -> bool {
        self.map
            .get(&action)
            .is_some_and(|list| list.iter().any(|c| c.matches(key)))
    }

    pub fn action_for_key(&self, key: &KeyEvent) -> Option<NavAction> {
        for (action, list) in &self.map {
            if list.iter().any(|c| c.matches(key)) {
                return Some(*action);
            }
        }
        None
    }

    /// Display strings for all combos mapped to `action`.
    pub fn combos_for(&self, action: NavAction) -> Vec<String> {
        self.map
            .get(&action)
            .map(|list| list.iter().map(|c| c.display()).collect())
            .unwrap_or_default()
    }

    /// Arrows, Enter and Escape — shared by every screen.
    fn navigation_defaults() -> Self {
        use NavAction::*;
        let mut kb = Self::new();
        kb.add(NavigateUp, KeyCombo::new(KeyCode::Up, KeyModifiers::NONE));
        kb.add(
            NavigateDown,
            KeyCombo::new(KeyCode::Down, KeyModifiers::NONE),
        );
        kb.add(
            NavigateLeft,
            KeyCombo::new(KeyCode::Left, KeyModifiers::NONE),
        );
        kb.add(
            NavigateRight,
            KeyCombo::new(KeyCode::Right, KeyModifiers::NONE),
        );
        kb.add(Activate, KeyCombo::new(KeyCode::Enter, KeyModifiers::NONE));
        kb.add(Back, KeyCombo::new(KeyCode::Esc, KeyModifiers::NONE));
        kb
    }

    /// Default binding table for one screen.
    pub fn for_screen(screen: ScreenId) -> Self {
        use NavAction::*;
        let mut kb = Self::navigation_defaults();
        match screen {
            ScreenId::Main => {
                kb.add(
                    ShowGroups,
                    KeyCombo::new(KeyCode::Char('g'), KeyModifiers::ALT),
                );
                kb.add(
                    ToggleFormat,
                    KeyCombo::new(KeyCode::Char('f'), KeyModifiers::ALT),
                );
                kb.add(
                    ClearHistory,
                    KeyCombo::new(KeyCode::Char('c'), KeyModifiers::ALT),
                );
            }
            ScreenId::Groups => {
                kb.add(
                    AddGroup,
                    KeyCombo::new(KeyCode::Char('n'), KeyModifiers::ALT),
                );
            }
            ScreenId::GroupContent => {
                kb.add(
                    EditItem,
                    KeyCombo::new(KeyCode::Char('e'), KeyModifiers::ALT),
                );
                kb.add(
                    DeleteItem,
                    KeyCombo::new(KeyCode::Char('d'), KeyModifiers::ALT),
                );
            }
            ScreenId::SelectGroup | ScreenId::Settings => {}
        }
        kb
    }
}

/// How a routed key event was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Matched the active screen's binding table.
    Screen(NavAction),
    /// Unbound navigation key forwarded to the dispatcher while visible.
    Forwarded(NavAction),
    /// Matched the global table (popup hidden or unclaimed key).
    Global(NavAction),
}

impl Route {
    pub fn action(&self) -> NavAction {
        match self {
            Route::Screen(a) | Route::Forwarded(a) | Route::Global(a) => *a,
        }
    }
}

pub struct KeyRouter {
    screens: HashMap<ScreenId, KeyBindings>,
    global: KeyBindings,
    current: ScreenId,
}

impl KeyRouter {
    /// Build the default registry with the given show/hide hotkey mnemonic
    /// (combined with Alt, matching the product default of `Alt+V`).
    pub fn new(hotkey: char) -> Self {
        let screens = [
            ScreenId::Main,
            ScreenId::Groups,
            ScreenId::GroupContent,
            ScreenId::SelectGroup,
        ]
        .into_iter()
        .map(|screen| (screen, KeyBindings::for_screen(screen)))
        .collect();
        let mut router = Self {
            screens,
            global: KeyBindings::new(),
            current: ScreenId::Main,
        };
        router.set_toggle_hotkey(hotkey);
        router
    }

    pub fn current_screen(&self) -> ScreenId {
        self.current
    }

    /// Activate the binding table of `screen`, deactivating the previous one.
    pub fn set_screen(&mut self, screen: ScreenId) {
        self.current = screen;
    }

    /// Rebind the global show/hide hotkey (settings change).
    pub fn set_toggle_hotkey(&mut self, hotkey: char) {
        let mut global = KeyBindings::new();
        global.add(
            NavAction::ToggleWindow,
            KeyCombo::new(
                KeyCode::Char(hotkey.to_ascii_lowercase()),
                KeyModifiers::ALT,
            ),
        );
        self.global = global;
    }

    fn forwarded_action(key: &KeyEvent) -> Option<NavAction> {
        if !key.modifiers.is_empty() {
            return None;
        }
        match key.code {
            KeyCode::Up => Some(NavAction::NavigateUp),
            KeyCode::Down => Some(NavAction::NavigateDown),
            KeyCode::Left => Some(NavAction::NavigateLeft),
            KeyCode::Right => Some(NavAction::NavigateRight),
            KeyCode::Enter => Some(NavAction::Activate),
            KeyCode::Esc => Some(NavAction::Back),
            _ => None,
        }
    }

    /// Resolve a physical key event against the active registries: the
    /// current screen's table first, then the forwarding path while the popup
    /// is visible, then the global table.
    pub fn route(&self, key: &KeyEvent, popup_visible: bool) -> Option<Route> {
        if let Some(bindings) = self.screens.get(&self.current)
            && let Some(action) = bindings.action_for_key(key)
        {
            return Some(Route::Screen(action));
        }
        if popup_visible
            && let Some(action) = Self::forwarded_action(key)
        {
            return Some(Route::Forwarded(action));
        }
        self.global.action_for_key(key).map(Route::Global)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, mods: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn screen_bindings_take_precedence() {
        let router = KeyRouter::new('v');
        let down = key(KeyCode::Down, KeyModifiers::NONE);
        assert_eq!(
            router.route(&down, true),
            Some(Route::Screen(NavAction::NavigateDown))
        );
    }

    #[test]
    fn global_hotkey_works_while_hidden() {
        let router = KeyRouter::new('v');
        let toggle = key(KeyCode::Char('v'), KeyModifiers::ALT);
        assert_eq!(
            router.route(&toggle, false),
            Some(Route::Global(NavAction::ToggleWindow))
        );
        // Unbound keys resolve to nothing while hidden.
        let other = key(KeyCode::Char('x'), KeyModifiers::NONE);
        assert_eq!(router.route(&other, false), None);
    }

    #[test]
    fn mnemonics_are_scoped_to_their_screen() {
        let mut router = KeyRouter::new('v');
        let add_group = key(KeyCode::Char('n'), KeyModifiers::ALT);
        assert_eq!(router.route(&add_group, true), None);
        router.set_screen(ScreenId::Groups);
        assert_eq!(
            router.route(&add_group, true),
            Some(Route::Screen(NavAction::AddGroup))
        );
        router.set_screen(ScreenId::GroupContent);
        assert_eq!(router.route(&add_group, true), None);
        let edit = key(KeyCode::Char('e'), KeyModifiers::ALT);
        assert_eq!(
            router.route(&edit, true),
            Some(Route::Screen(NavAction::EditItem))
        );
    }

    #[test]
    fn select_group_arrows_are_forwarded() {
        let mut router = KeyRouter::new('v');
        router.set_screen(ScreenId::SelectGroup);
        // SelectGroup still carries the shared navigation defaults.
        let up = key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(
            router.route(&up, true),
            Some(Route::Screen(NavAction::NavigateUp))
        );
        // A screen with no table at all falls through to forwarding.
        router.set_screen(ScreenId::Settings);
        assert_eq!(
            router.route(&up, true),
            Some(Route::Forwarded(NavAction::NavigateUp))
        );
    }

    #[test]
    fn rebinding_the_toggle_hotkey() {
        let mut router = KeyRouter::new('v');
        router.set_toggle_hotkey('B');
        let old = key(KeyCode::Char('v'), KeyModifiers::ALT);
        assert_eq!(router.route(&old, false), None);
        let new = key(KeyCode::Char('b'), KeyModifiers::ALT);
        assert_eq!(
            router.route(&new, false),
            Some(Route::Global(NavAction::ToggleWindow))
        );
    }

    #[test]
    fn combo_display_names() {
        let combo = KeyCombo::new(KeyCode::Char('g'), KeyModifiers::ALT);
        assert_eq!(combo.display(), "Alt+G");
        let bindings = KeyBindings::for_screen(ScreenId::Main);
        assert_eq!(bindings.combos_for(NavAction::ShowGroups), vec!["Alt+G"]);
        assert!(bindings.matches(
            NavAction::Activate,
            &key(KeyCode::Enter, KeyModifiers::NONE)
        ));
    }
}
