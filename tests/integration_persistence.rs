//! Persistence flows through the app: pins and groups survive a restart,
//! unpinned history does not.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tempfile::TempDir;

use clipstack::app::{App, DialogHost};
use clipstack::effect::Effect;
use clipstack::persist::DataManager;
use clipstack::settings::Settings;
use clipstack::theme::HighlightPalette;
use clipstack::view::{HighlightTarget, ViewSurface};
use clipstack::visibility::{PlatformShell, PopupRect, ShellError, WindowHandle};

#[derive(Default)]
struct NullShell;

impl PlatformShell for NullShell {
    fn foreground_window(&mut self) -> Option<WindowHandle> {
        None
    }

    fn set_foreground(&mut self, _window: WindowHandle) -> Result<(), ShellError> {
        Ok(())
    }

    fn cursor_pos(&mut self) -> (i32, i32) {
        (0, 0)
    }

    fn set_cursor_pos(&mut self, _pos: (i32, i32)) {}

    fn screen_size(&mut self) -> (u32, u32) {
        (800, 600)
    }

    fn show_popup(&mut self, _rect: PopupRect) {}

    fn hide_popup(&mut self) {}

    fn inject_paste(&mut self) -> Result<(), ShellError> {
        Ok(())
    }
}

struct ScriptedDialogs {
    group_name: Option<String>,
    settings: Option<Settings>,
}

impl DialogHost for ScriptedDialogs {
    fn prompt_group_name(&mut self, _initial: Option<&str>) -> Option<String> {
        self.group_name.take()
    }

    fn prompt_item_text(&mut self, _initial: &str) -> Option<String> {
        None
    }

    fn edit_settings(&mut self, _current: &Settings) -> Option<Settings> {
        self.settings.take()
    }
}

#[derive(Default)]
struct NullView;

impl ViewSurface for NullView {
    fn highlight(&mut self, _target: HighlightTarget, _palette: HighlightPalette) {}

    fn clear_highlights(&mut self) {}

    fn scroll_into_view(&mut self, _target: HighlightTarget) {}
}

fn open_app(dir: &TempDir, dialogs: ScriptedDialogs) -> App<NullShell, ScriptedDialogs> {
    let data = DataManager::new(dir.path().join("data.json"));
    App::new(NullShell, dialogs, data).unwrap()
}

fn alt_v() -> KeyEvent {
    KeyEvent::new(KeyCode::Char('v'), KeyModifiers::ALT)
}

#[test]
fn pins_and_groups_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let mut view = NullView;
    {
        let mut app = open_app(
            &dir,
            ScriptedDialogs {
                group_name: Some("Errands".into()),
                settings: None,
            },
        );
        app.handle_key(&alt_v(), &mut view);
        app.on_clipboard_capture("keep me".into(), &mut view);
        app.on_clipboard_capture("lose me".into(), &mut view);
        app.execute(Effect::TogglePin(0), &mut view);
        app.execute(Effect::AddGroup, &mut view);
        app.execute(Effect::OpenSelectGroup(0), &mut view);
        app.execute(Effect::AddToGroup(0), &mut view);
    }

    let app = open_app(
        &dir,
        ScriptedDialogs {
            group_name: None,
            settings: None,
        },
    );
    assert_eq!(app.history().len(), 1, "only the pinned item is reloaded");
    assert_eq!(app.history().get(0).unwrap().text.plain, "keep me");
    assert!(app.history().get(0).unwrap().pinned);
    let group = app.groups().get(0).unwrap();
    assert_eq!(group.name, "Errands");
    assert_eq!(group.items.len(), 1);
    assert_eq!(group.items[0].text.plain, "keep me");
}

#[test]
fn settings_changes_rebind_the_hotkey_and_persist() {
    let dir = tempfile::tempdir().unwrap();
    let mut view = NullView;
    let mut updated = Settings::default();
    updated.set_hotkey('b');
    updated.width = 320;
    {
        let mut app = open_app(
            &dir,
            ScriptedDialogs {
                group_name: None,
                settings: Some(updated),
            },
        );
        app.handle_key(&alt_v(), &mut view);
        app.execute(Effect::OpenSettings, &mut view);
        assert_eq!(app.settings().hotkey, 'b');

        // The old hotkey no longer routes; the new one does.
        app.handle_key(&alt_v(), &mut view);
        assert!(app.is_visible());
        let alt_b = KeyEvent::new(KeyCode::Char('b'), KeyModifiers::ALT);
        app.handle_key(&alt_b, &mut view);
        assert!(!app.is_visible());
    }

    let app = open_app(
        &dir,
        ScriptedDialogs {
            group_name: None,
            settings: None,
        },
    );
    assert_eq!(app.settings().hotkey, 'b');
    assert_eq!(app.settings().width, 320);
}
