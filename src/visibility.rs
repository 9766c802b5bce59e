//! Popup visibility and OS-focus handling.
//!
//! The popup is summoned over whatever application the user is working in and
//! must hand focus back when it goes away. [`VisibilityController`] owns that
//! two-state machine; the actual OS calls live behind [`PlatformShell`] so the
//! controller can be exercised without a window system.

use std::time::Duration;

use thiserror::Error;
use tracing::{debug, error, warn};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("platform shell error: {0}")]
    Platform(String),
}

/// Opaque handle to an OS window, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowHandle(pub u64);

/// Popup geometry in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PopupRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// Platform collaborator: foreground focus, cursor, popup window, paste key.
pub trait PlatformShell {
    fn foreground_window(&mut self) -> Option<WindowHandle>;
    fn set_foreground(&mut self, window: WindowHandle) -> Result<(), ShellError>;
    fn cursor_pos(&mut self) -> (i32, i32);
    fn set_cursor_pos(&mut self, pos: (i32, i32));
    fn screen_size(&mut self) -> (u32, u32);
    fn show_popup(&mut self, rect: PopupRect);
    fn hide_popup(&mut self);
    /// Send the paste keystroke to the foreground application.
    fn inject_paste(&mut self) -> Result<(), ShellError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Center the popup on the cursor, clamped to the screen bounds.
pub fn popup_position(
    cursor: (i32, i32),
    size: (u32, u32),
    screen: (u32, u32),
) -> PopupRect {
    let (width, height) = size;
    let max_x = (screen.0.saturating_sub(width)) as i32;
    let max_y = (screen.1.saturating_sub(height)) as i32;
    let x = (cursor.0 - width as i32 / 2).clamp(0, max_x.max(0));
    let y = (cursor.1 - height as i32 / 2).clamp(0, max_y.max(0));
    PopupRect {
        x,
        y,
        width,
        height,
    }
}

pub struct VisibilityController {
    state: Visibility,
    previous_window: Option<WindowHandle>,
    saved_cursor: Option<(i32, i32)>,
    width: u32,
    height: u32,
    retry_delay: Duration,
}

impl VisibilityController {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            state: Visibility::Hidden,
            previous_window: None,
            saved_cursor: None,
            width,
            height,
            retry_delay: Duration::from_millis(100),
        }
    }

    /// Shrink the retry pause in tests.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn is_visible(&self) -> bool {
        self.state == Visibility::Visible
    }

    pub fn set_popup_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// `Hidden -> Visible`: capture the foreground window and cursor, place
    /// the popup near the cursor and show it. The caller re-activates the
    /// main strategy and initializes focus afterwards.
    pub fn show(&mut self, shell: &mut dyn PlatformShell) {
        if self.state == Visibility::Visible {
            return;
        }
        self.previous_window = shell.foreground_window();
        let cursor = shell.cursor_pos();
        self.saved_cursor = Some(cursor);
        let rect = popup_position(cursor, (self.width, self.height), shell.screen_size());
        shell.show_popup(rect);
        self.state = Visibility::Visible;
        debug!(?rect, previous = ?self.previous_window, "popup shown");
    }

    /// `Visible -> Hidden`: hide the popup, then hand focus and the cursor
    /// back to where they were captured.
    pub fn hide(&mut self, shell: &mut dyn PlatformShell) {
        if self.state == Visibility::Hidden {
            return;
        }
        shell.hide_popup();
        self.state = Visibility::Hidden;
        self.restore_focus(shell);
        if let Some(pos) = self.saved_cursor.take() {
            shell.set_cursor_pos(pos);
        }
        debug!("popup hidden");
    }

    pub fn toggle(&mut self, shell: &mut dyn PlatformShell) -> Visibility {
        match self.state {
            Visibility::Hidden => self.show(shell),
            Visibility::Visible => self.hide(shell),
        }
        self.state
    }

    /// Hide first so the target application regains foreground focus, then
    /// inject the paste keystroke into it.
    pub fn paste_into_previous(&mut self, shell: &mut dyn PlatformShell) {
        self.hide(shell);
        if let Err(err) = shell.inject_paste() {
            warn!(error = %err, "paste injection failed");
        }
    }

    fn restore_focus(&mut self, shell: &mut dyn PlatformShell) {
        let Some(window) = self.previous_window else {
            return;
        };
        if let Err(err) = shell.set_foreground(window) {
            warn!(error = %err, "focus restore failed, retrying once");
            std::thread::sleep(self.retry_delay);
            if let Err(err) = shell.set_foreground(window) {
                // The user may need to click back into their application.
                error!(error = %err, "focus restore failed after retry");
            }
        }
    }
}
