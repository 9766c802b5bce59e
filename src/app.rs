//! Screen controllers.
//!
//! `App` wires the stores to the navigation core and executes the effect
//! descriptors the navigator hands back. It owns nothing visual: rendering
//! goes through [`ViewSurface`], OS windowing through [`PlatformShell`] and
//! modal text entry through [`DialogHost`], so the whole flow can run
//! headless in tests.

use crossterm::event::KeyEvent;
use tracing::{debug, error, info, warn};

use crate::clipboard;
use crate::dispatcher::Navigator;
use crate::effect::Effect;
use crate::format;
use crate::groups::{Group, GroupId, GroupItem, GroupStore};
use crate::history::{ClipText, ClipboardHistory, ItemId};
use crate::keymap::{KeyRouter, NavAction};
use crate::persist::{DataManager, PersistError};
use crate::screens::{self, Horizontal, ScreenId, Vertical};
use crate::selection::{CountsProvider, ElementKind};
use crate::settings::Settings;
use crate::theme;
use crate::view::ViewSurface;
use crate::visibility::{PlatformShell, Visibility, VisibilityController};

/// Modal text-entry dialogs (group names, item edits, the settings form).
/// Owned by the GUI layer; `None` means the user cancelled.
pub trait DialogHost {
    fn prompt_group_name(&mut self, initial: Option<&str>) -> Option<String>;
    fn prompt_item_text(&mut self, initial: &str) -> Option<String>;
    fn edit_settings(&mut self, current: &Settings) -> Option<Settings>;
}

/// Live element counts answered from the data stores, never from widgets.
pub struct StoreCounts<'a> {
    screen: ScreenId,
    history: &'a ClipboardHistory,
    groups: &'a GroupStore,
    open_group: Option<GroupId>,
}

impl StoreCounts<'_> {
    fn open_group_len(&self) -> usize {
        self.open_group
            .and_then(|id| self.groups.get_by_id(id))
            .map_or(0, |group| group.items.len())
    }
}

impl CountsProvider for StoreCounts<'_> {
    fn count(&self, kind: ElementKind) -> usize {
        let layout = screens::layout(self.screen);
        match kind {
            ElementKind::TopButtons => layout.map_or(0, |l| l.top_buttons),
            ElementKind::MainButtons => layout.map_or(0, |l| l.main_buttons),
            ElementKind::Cards => self.history.len(),
            ElementKind::GroupCards | ElementKind::GroupOptions => self.groups.len(),
            ElementKind::ContentCards => self.open_group_len(),
            ElementKind::Icons => {
                layout.map_or(0, |l| l.icons_per_item * self.count(l.content))
            }
        }
    }
}

/// One renderable card with its icon glyphs.
pub struct CardModel {
    pub title: String,
    pub pinned: bool,
    pub icons: Vec<&'static str>,
}

/// Snapshot of what the active screen shows; consumed by the front-end.
pub struct ScreenModel {
    pub screen: ScreenId,
    pub title: String,
    pub top_buttons: Vec<&'static str>,
    pub main_buttons: Vec<String>,
    pub cards: Vec<CardModel>,
    pub dark_mode: bool,
}

pub struct App<S: PlatformShell, D: DialogHost> {
    history: ClipboardHistory,
    groups: GroupStore,
    settings: Settings,
    data: DataManager,
    pub navigator: Navigator,
    pub router: KeyRouter,
    visibility: VisibilityController,
    shell: S,
    dialogs: D,
    paste_with_format: bool,
    dark_mode: bool,
    /// Group whose content screen is open.
    open_group: Option<GroupId>,
    /// History item the select-group dialog was opened for.
    select_source: Option<ItemId>,
    should_exit: bool,
}

impl<S: PlatformShell, D: DialogHost> App<S, D> {
    pub fn new(shell: S, dialogs: D, data: DataManager) -> Result<Self, PersistError> {
        let (saved_groups, pinned, settings) = data.load()?;
        let mut history = ClipboardHistory::new();
        history.restore(pinned);
        let mut groups = GroupStore::new();
        groups.restore(saved_groups);
        let router = KeyRouter::new(settings.hotkey);
        let visibility = VisibilityController::new(settings.width, settings.height);
        Ok(Self {
            history,
            groups,
            settings,
            data,
            navigator: Navigator::new(),
            router,
            visibility,
            shell,
            dialogs,
            paste_with_format: false,
            dark_mode: true,
            open_group: None,
            select_source: None,
            should_exit: false,
        })
    }

    pub fn history(&self) -> &ClipboardHistory {
        &self.history
    }

    pub fn groups(&self) -> &GroupStore {
        &self.groups
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn open_group(&self) -> Option<&Group> {
        self.open_group.and_then(|id| self.groups.get_by_id(id))
    }

    pub fn is_visible(&self) -> bool {
        self.visibility.is_visible()
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    pub fn paste_with_format(&self) -> bool {
        self.paste_with_format
    }

    pub fn should_exit(&self) -> bool {
        self.should_exit
    }

    pub fn shell(&self) -> &S {
        &self.shell
    }

    /// Route one physical key event (screen bindings first, then forwarding
    /// while visible, then globals) and act on the result.
    pub fn handle_key(&mut self, key: &KeyEvent, view: &mut dyn ViewSurface) {
        let Some(route) = self.router.route(key, self.visibility.is_visible()) else {
            return;
        };
        self.handle_action(route.action(), view);
    }

    pub fn handle_action(&mut self, action: NavAction, view: &mut dyn ViewSurface) {
        if action == NavAction::ToggleWindow {
            self.toggle_popup(view);
            return;
        }
        if !self.visibility.is_visible() {
            debug!(%action, "ignoring action while hidden");
            return;
        }
        match action {
            // Handled before the visibility guard.
            NavAction::ToggleWindow => {}
            NavAction::NavigateUp => self.navigate_vertical(Vertical::Up, view),
            NavAction::NavigateDown => self.navigate_vertical(Vertical::Down, view),
            NavAction::NavigateLeft => self.navigate_horizontal(Horizontal::Left, view),
            NavAction::NavigateRight => self.navigate_horizontal(Horizontal::Right, view),
            NavAction::Activate => {
                let effect = {
                    let counts = StoreCounts {
                        screen: self.navigator.screen(),
                        history: &self.history,
                        groups: &self.groups,
                        open_group: self.open_group,
                    };
                    self.navigator.activate(&counts)
                };
                if let Some(effect) = effect {
                    self.execute(effect, view);
                }
            }
            NavAction::Back => {
                if self.navigator.screen() == ScreenId::Main {
                    self.hide_popup();
                } else {
                    self.show_main(view);
                }
            }
            NavAction::ShowGroups => self.execute(Effect::OpenGroups, view),
            NavAction::ToggleFormat => self.execute(Effect::ToggleFormat, view),
            NavAction::ClearHistory => self.execute(Effect::ClearHistory, view),
            NavAction::AddGroup => self.execute(Effect::AddGroup, view),
            NavAction::EditItem => {
                if let Some(index) = self.selected_content_index(ElementKind::ContentCards) {
                    self.execute(Effect::EditGroupItem(index), view);
                }
            }
            NavAction::DeleteItem => {
                if let Some(index) = self.selected_content_index(ElementKind::ContentCards) {
                    self.execute(Effect::RemoveGroupItem(index), view);
                }
            }
        }
    }

    /// Index of the focused content card, if the selection sits on `kind`.
    fn selected_content_index(&self, kind: ElementKind) -> Option<usize> {
        let selection = self.navigator.selection();
        (selection.kind == kind).then_some(selection.index)
    }

    fn navigate_vertical(&mut self, direction: Vertical, view: &mut dyn ViewSurface) {
        let counts = StoreCounts {
            screen: self.navigator.screen(),
            history: &self.history,
            groups: &self.groups,
            open_group: self.open_group,
        };
        self.navigator.navigate_vertical(direction, &counts, view);
    }

    fn navigate_horizontal(&mut self, direction: Horizontal, view: &mut dyn ViewSurface) {
        let counts = StoreCounts {
            screen: self.navigator.screen(),
            history: &self.history,
            groups: &self.groups,
            open_group: self.open_group,
        };
        self.navigator.navigate_horizontal(direction, &counts, view);
    }

    fn refresh_highlights(&mut self, view: &mut dyn ViewSurface) {
        let counts = StoreCounts {
            screen: self.navigator.screen(),
            history: &self.history,
            groups: &self.groups,
            open_group: self.open_group,
        };
        self.navigator.update_highlights(&counts, view);
    }

    /// Switch screens: key bindings follow, the navigator resolves its
    /// strategy (falling back to Main for layout-less screens).
    fn set_screen(&mut self, screen: ScreenId, view: &mut dyn ViewSurface) {
        let effective = if screens::layout(screen).is_some() {
            screen
        } else {
            ScreenId::Main
        };
        self.router.set_screen(effective);
        let counts = StoreCounts {
            screen: effective,
            history: &self.history,
            groups: &self.groups,
            open_group: self.open_group,
        };
        self.navigator.set_screen(screen, &counts, view);
    }

    fn show_main(&mut self, view: &mut dyn ViewSurface) {
        self.open_group = None;
        self.select_source = None;
        self.set_screen(ScreenId::Main, view);
    }

    /// Window-creation collaborator signalling that a screen's widgets exist.
    pub fn notify_view_ready(&mut self, screen: ScreenId, view: &mut dyn ViewSurface) {
        let counts = StoreCounts {
            screen,
            history: &self.history,
            groups: &self.groups,
            open_group: self.open_group,
        };
        self.navigator.notify_ready(screen, &counts, view);
    }

    pub fn toggle_popup(&mut self, view: &mut dyn ViewSurface) {
        match self.visibility.toggle(&mut self.shell) {
            Visibility::Visible => self.show_main(view),
            Visibility::Hidden => {}
        }
    }

    fn hide_popup(&mut self) {
        self.visibility.hide(&mut self.shell);
    }

    /// Execute an activation effect against the stores and collaborators.
    pub fn execute(&mut self, effect: Effect, view: &mut dyn ViewSurface) {
        info!(%effect, "executing");
        match effect {
            Effect::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
                self.navigator
                    .set_palette(theme::highlight_palette(self.dark_mode));
                self.refresh_highlights(view);
            }
            Effect::OpenSettings => {
                if let Some(updated) = self.dialogs.edit_settings(&self.settings) {
                    self.apply_settings(updated);
                }
                // The settings window has no strategy of its own; this lands
                // on the documented fallback to Main.
                self.set_screen(ScreenId::Settings, view);
            }
            Effect::ExitApp => {
                self.persist();
                self.should_exit = true;
            }
            Effect::OpenGroups => self.set_screen(ScreenId::Groups, view),
            Effect::ToggleFormat => {
                self.paste_with_format = !self.paste_with_format;
                info!(with_format = self.paste_with_format, "paste format toggled");
            }
            Effect::ClearHistory => {
                self.history.clear();
                self.persist();
                let counts = StoreCounts {
                    screen: self.navigator.screen(),
                    history: &self.history,
                    groups: &self.groups,
                    open_group: self.open_group,
                };
                self.navigator.initialize_focus(&counts, view);
            }
            Effect::PasteItem(index) => {
                if let Some(item) = self.history.get(index) {
                    let text = item.text.clone();
                    self.paste(&text);
                }
            }
            Effect::OpenSelectGroup(index) => {
                if let Some(item) = self.history.get(index) {
                    self.select_source = Some(item.id);
                    self.set_screen(ScreenId::SelectGroup, view);
                }
            }
            Effect::TogglePin(index) => {
                if let Some(id) = self.history.get(index).map(|item| item.id) {
                    self.history.toggle_pin(id);
                    self.persist();
                    self.refresh_highlights(view);
                }
            }
            Effect::DeleteItem(index) => {
                if let Some(id) = self.history.get(index).map(|item| item.id) {
                    if self.history.delete(id) {
                        self.persist();
                    } else {
                        debug!(id = id.0, "delete refused, item is pinned");
                    }
                    self.refresh_highlights(view);
                }
            }
            Effect::AddGroup => {
                if let Some(name) = self.dialogs.prompt_group_name(None) {
                    self.groups.add(name);
                    self.persist();
                    self.refresh_highlights(view);
                }
            }
            Effect::CloseGroups => self.show_main(view),
            Effect::OpenGroup(index) => {
                if let Some(id) = self.groups.get(index).map(|group| group.id) {
                    self.open_group = Some(id);
                    self.set_screen(ScreenId::GroupContent, view);
                }
            }
            Effect::EditGroup(index) => {
                if let Some(group) = self.groups.get(index) {
                    let (id, name) = (group.id, group.name.clone());
                    if let Some(new_name) = self.dialogs.prompt_group_name(Some(&name)) {
                        self.groups.rename(id, new_name);
                        self.persist();
                    }
                }
            }
            Effect::DeleteGroup(index) => {
                if let Some(id) = self.groups.get(index).map(|group| group.id) {
                    self.groups.delete(id);
                    self.persist();
                    self.refresh_highlights(view);
                }
            }
            Effect::CloseGroupContent => {
                self.open_group = None;
                self.set_screen(ScreenId::Groups, view);
            }
            Effect::PasteGroupItem(index) => {
                let item = self
                    .open_group()
                    .and_then(|group| group.items.get(index))
                    .map(|item| item.text.clone());
                if let Some(text) = item {
                    self.open_group = None;
                    self.paste(&text);
                    self.set_screen(ScreenId::Main, view);
                }
            }
            Effect::EditGroupItem(index) => {
                let target = self.open_group().and_then(|group| {
                    group
                        .items
                        .get(index)
                        .map(|item| (group.id, item.id, item.text.plain.clone()))
                });
                if let Some((group_id, item_id, current)) = target
                    && let Some(new_text) = self.dialogs.prompt_item_text(&current)
                {
                    self.groups.edit_item(group_id, item_id, new_text);
                    self.persist();
                }
            }
            Effect::RemoveGroupItem(index) => {
                let target = self
                    .open_group()
                    .and_then(|group| group.items.get(index).map(|item| (group.id, item.id)));
                if let Some((group_id, item_id)) = target {
                    self.groups.remove_item(group_id, item_id);
                    self.persist();
                    self.refresh_highlights(view);
                }
            }
            Effect::CloseDialog => {
                self.select_source = None;
                self.set_screen(ScreenId::Main, view);
            }
            Effect::AddToGroup(index) => {
                let source = self.select_source.take();
                let group_id = self.groups.get(index).map(|group| group.id);
                let item = source.and_then(|id| self.history.get_by_id(id)).map(|item| {
                    GroupItem {
                        id: item.id,
                        text: item.text.clone(),
                        name: None,
                    }
                });
                if let (Some(group_id), Some(item)) = (group_id, item) {
                    self.groups.add_item(group_id, item);
                    self.persist();
                }
                self.set_screen(ScreenId::Main, view);
            }
        }
    }

    /// Place the entry on the OS clipboard (rendered with its formatting when
    /// the toggle is on) and hand focus back to the target application before
    /// the paste keystroke goes out.
    fn paste(&mut self, text: &ClipText) {
        let payload = match &text.format {
            Some(info) if self.paste_with_format => format::apply_format(&text.plain, info),
            _ => text.plain.clone(),
        };
        if let Err(err) = clipboard::set(&payload) {
            warn!(error = %err, "could not stage clipboard for paste");
        }
        self.visibility.paste_into_previous(&mut self.shell);
    }

    fn apply_settings(&mut self, updated: Settings) {
        if updated.hotkey != self.settings.hotkey {
            self.router.set_toggle_hotkey(updated.hotkey);
        }
        self.visibility
            .set_popup_size(updated.width, updated.height);
        self.settings = updated;
        self.persist();
        info!("settings applied");
    }

    /// Hand a background clipboard capture to the stores (UI thread only).
    pub fn on_clipboard_capture(&mut self, text: String, view: &mut dyn ViewSurface) {
        if self.history.capture(ClipText::plain(text)).is_none() {
            return;
        }
        self.persist();
        if self.visibility.is_visible() && self.navigator.screen() == ScreenId::Main {
            self.refresh_highlights(view);
        }
    }

    pub fn persist(&mut self) {
        let result = self.data.save(
            &self.groups.all(),
            &self.history.pinned_items(),
            &self.settings,
        );
        if let Err(err) = result {
            error!(error = %err, "persist failed");
        }
    }

    /// Snapshot of the active screen for the front-end.
    pub fn render_model(&self) -> ScreenModel {
        let screen = self.navigator.screen();
        match screen {
            ScreenId::Main | ScreenId::Settings => ScreenModel {
                screen,
                title: "clipstack".into(),
                top_buttons: vec!["theme", "settings", "close"],
                main_buttons: vec![
                    "Groups".into(),
                    if self.paste_with_format {
                        "With format".into()
                    } else {
                        "Plain".into()
                    },
                    "Clear all".into(),
                ],
                cards: self
                    .history
                    .iter()
                    .map(|item| CardModel {
                        title: preview(&item.text.plain),
                        pinned: item.pinned,
                        icons: vec!["send", if item.pinned { "unpin" } else { "pin" }, "del"],
                    })
                    .collect(),
                dark_mode: self.dark_mode,
            },
            ScreenId::Groups => ScreenModel {
                screen,
                title: "Groups".into(),
                top_buttons: vec!["add", "close"],
                main_buttons: Vec::new(),
                cards: self
                    .groups
                    .iter()
                    .map(|group| CardModel {
                        title: format!("{} ({})", group.name, group.items.len()),
                        pinned: false,
                        icons: vec!["edit", "del"],
                    })
                    .collect(),
                dark_mode: self.dark_mode,
            },
            ScreenId::GroupContent => ScreenModel {
                screen,
                title: self
                    .open_group()
                    .map_or_else(|| "Group".into(), |group| group.name.clone()),
                top_buttons: vec!["close"],
                main_buttons: Vec::new(),
                cards: self
                    .open_group()
                    .map(|group| {
                        group
                            .items
                            .iter()
                            .map(|item| CardModel {
                                title: preview(&item.text.plain),
                                pinned: false,
                                icons: vec!["edit", "del"],
                            })
                            .collect()
                    })
                    .unwrap_or_default(),
                dark_mode: self.dark_mode,
            },
            ScreenId::SelectGroup => ScreenModel {
                screen,
                title: "Send to group".into(),
                top_buttons: vec!["close"],
                main_buttons: Vec::new(),
                cards: self
                    .groups
                    .iter()
                    .map(|group| CardModel {
                        title: group.name.clone(),
                        pinned: false,
                        icons: Vec::new(),
                    })
                    .collect(),
                dark_mode: self.dark_mode,
            },
        }
    }
}

/// First line of the entry, shortened for a card title.
fn preview(text: &str) -> String {
    let first = text.lines().next().unwrap_or_default();
    let mut out: String = first.chars().take(60).collect();
    if out.len() < first.len() || text.lines().nth(1).is_some() {
        out.push('…');
    }
    out
}
