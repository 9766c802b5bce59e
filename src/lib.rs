pub mod app;
pub mod clipboard;
pub mod dispatcher;
pub mod effect;
pub mod event_loop;
pub mod format;
pub mod groups;
pub mod history;
pub mod keymap;
pub mod persist;
pub mod screens;
pub mod selection;
pub mod settings;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod view;
pub mod visibility;

pub use app::{App, DialogHost};
pub use dispatcher::Navigator;
pub use effect::Effect;
pub use keymap::{KeyRouter, NavAction};
pub use screens::ScreenId;
pub use selection::{CountsProvider, ElementKind, Selection};
pub use view::{HighlightTarget, ViewSurface};
pub use visibility::{PlatformShell, VisibilityController};
