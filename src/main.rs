use std::io;
use std::path::PathBuf;
use std::sync::mpsc;

use clap::Parser;
use crossterm::event::{Event, KeyEventKind};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use clipstack::app::{App, DialogHost};
use clipstack::clipboard::{self, ClipboardWatcher};
use clipstack::effect::Effect;
use clipstack::event_loop::{ControlFlow, EventLoop};
use clipstack::persist::DataManager;
use clipstack::settings::Settings;
use clipstack::ui::{self, PopupView};
use clipstack::visibility::{PlatformShell, PopupRect, ShellError, WindowHandle};

#[derive(Parser)]
#[command(name = "clipstack", about = "A keyboard-driven clipboard history manager.")]
struct Cli {
    /// Path to the JSON data file (defaults to the platform data dir).
    #[arg(long)]
    data_file: Option<PathBuf>,
    /// Open the settings editor on startup.
    #[arg(long)]
    show_settings: bool,
    /// Write debug logs to this file instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Platform shell for the terminal harness.
///
/// There is no OS window to juggle inside a terminal, so focus capture and
/// cursor restore are no-ops; paste injection stops at staging the clipboard,
/// which is as far as a terminal can take it.
#[derive(Default)]
struct TerminalShell;

impl PlatformShell for TerminalShell {
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
        (1920, 1080)
    }

    fn show_popup(&mut self, rect: PopupRect) {
        info!(?rect, "popup shown");
    }

    fn hide_popup(&mut self) {
        info!("popup hidden");
    }

    fn inject_paste(&mut self) -> Result<(), ShellError> {
        info!("entry staged on the OS clipboard; paste it with Ctrl+V");
        Ok(())
    }
}

/// Text-entry dialogs for the harness: group names are auto-numbered, edits
/// are declined. A desktop front-end replaces this with real dialogs.
#[derive(Default)]
struct TerminalDialogs {
    group_counter: usize,
}

impl DialogHost for TerminalDialogs {
    fn prompt_group_name(&mut self, initial: Option<&str>) -> Option<String> {
        match initial {
            Some(_) => None,
            None => {
                self.group_counter += 1;
                Some(format!("Group {}", self.group_counter))
            }
        }
    }

    fn prompt_item_text(&mut self, _initial: &str) -> Option<String> {
        None
    }

    fn edit_settings(&mut self, _current: &Settings) -> Option<Settings> {
        None
    }
}

fn main() -> io::Result<()> {
    let cli = Cli::parse();
    match &cli.log_file {
        Some(path) => clipstack::tracing_sub::init_to_file(path)?,
        None => clipstack::tracing_sub::init_default(),
    }

    let data_path = cli.data_file.unwrap_or_else(DataManager::default_path);
    let data = DataManager::new(data_path);
    let mut app = App::new(TerminalShell, TerminalDialogs::default(), data)
        .map_err(io::Error::other)?;
    let mut view = PopupView::new();

    let (tx, rx) = mpsc::channel();
    let watcher = ClipboardWatcher::spawn(clipboard::POLL_INTERVAL, tx)?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Summon the popup right away; in a desktop build this waits for the
    // global hotkey instead.
    app.toggle_popup(&mut view);
    if cli.show_settings {
        app.execute(Effect::OpenSettings, &mut view);
    }

    let result = EventLoop::new(std::time::Duration::from_millis(16)).run(|event| {
        while let Ok(text) = rx.try_recv() {
            app.on_clipboard_capture(text, &mut view);
        }
        if let Some(Event::Key(key)) = event
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(&key, &mut view);
        }
        if app.should_exit() {
            return Ok(ControlFlow::Quit);
        }
        terminal
            .draw(|frame| ui::render(frame, &app.render_model(), &mut view, app.is_visible()))?;
        Ok(ControlFlow::Continue)
    });

    watcher.stop();
    terminal::disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    result
}
