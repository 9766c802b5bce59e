//! Cross-platform clipboard helpers and the polling watcher.
//
//! A small, unified API around the `arboard` crate so callers don't depend on
//! platform-specific clipboard implementations directly. The watcher polls
//! for changes on its own thread and hands captured text to the UI thread
//! over a channel — stores are never mutated off-thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};

/// How often the watcher samples the OS clipboard.
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard backend error: {0}")]
    Backend(#[from] arboard::Error),
}

/// Read the clipboard as a `String`.
pub fn get() -> Result<String, ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.get_text().map_err(ClipboardError::from)
}

/// Set the system clipboard to `text`.
pub fn set(text: &str) -> Result<(), ClipboardError> {
    let mut cb = arboard::Clipboard::new()?;
    cb.set_text(text.to_owned()).map_err(ClipboardError::from)
}

/// Try to create a clipboard instance to detect availability.
pub fn available() -> bool {
    arboard::Clipboard::new().is_ok()
}

/// Handle to the background polling thread.
pub struct ClipboardWatcher {
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl ClipboardWatcher {
    /// Start polling; every changed, non-empty clipboard text is sent once.
    pub fn spawn(interval: Duration, tx: Sender<String>) -> std::io::Result<Self> {
        let stop = Arc::new(AtomicBool::new(false));
        let stop_flag = Arc::clone(&stop);
        let handle = std::thread::Builder::new()
            .name("clipboard-watcher".into())
            .spawn(move || {
                let mut last_seen: Option<String> = None;
                while !stop_flag.load(Ordering::Relaxed) {
                    match get() {
                        Ok(text) => {
                            if !text.is_empty() && last_seen.as_deref() != Some(text.as_str()) {
                                last_seen = Some(text.clone());
                                if tx.send(text).is_err() {
                                    // Receiver dropped, the app is going away.
                                    break;
                                }
                            }
                        }
                        Err(err) => {
                            // Transient on most platforms while another app
                            // holds the clipboard open.
                            debug!(error = %err, "clipboard poll failed");
                        }
                    }
                    std::thread::sleep(interval);
                }
            })?;
        Ok(Self {
            stop,
            handle: Some(handle),
        })
    }

    pub fn stop(mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("clipboard watcher thread panicked");
        }
    }
}

impl Drop for ClipboardWatcher {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}
