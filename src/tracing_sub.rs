use std::fs::File;
use std::path::Path;

use tracing::Level;

/// Initialize the tracing subscriber writing to stderr. Safe to call more
/// than once; later calls are no-ops for the global subscriber.
pub fn init_default() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize the tracing subscriber writing to a log file instead, so log
/// lines don't tear the terminal UI while it is drawing.
pub fn init_to_file(path: &Path) -> std::io::Result<()> {
    let file = File::create(path)?;
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(file)
        .try_init();
    Ok(())
}
