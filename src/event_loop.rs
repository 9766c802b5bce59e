use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// The centralized event loop driving the UI thread.
///
/// All selection mutations, highlight updates and activations happen here, on
/// one thread; background producers (the clipboard watcher) hand their data
/// over channels that the handler drains on idle ticks.
///
/// The `handler` is called with:
/// - `Some(event)` when an input event occurs.
/// - `None` when the poll interval elapses without one (idle tick).
pub struct EventLoop {
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                return Ok(());
            }
            if event::poll(self.poll_interval)? {
                // Drain the queue so bursts of key repeats don't lag behind
                // the render loop.
                loop {
                    let evt = event::read()?;
                    if let ControlFlow::Quit = handler(Some(evt))? {
                        return Ok(());
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
    }
}
