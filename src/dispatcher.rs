//! Navigation dispatcher.
//!
//! [`Navigator`] owns which screen's rules are active and routes every
//! directional/activation/highlight request to them. Collaborators are passed
//! in per call: a [`CountsProvider`] answering live element counts from the
//! stores and a [`ViewSurface`] applying highlight and scroll styling. The
//! navigator holds no reference to either, so it can be driven identically by
//! the real UI and by tests.

use tracing::{debug, warn};

use crate::effect::Effect;
use crate::screens::{self, Horizontal, ScreenId, ScreenLayout, Vertical};
use crate::selection::{CountsProvider, Selection};
use crate::theme::{self, HighlightPalette};
use crate::view::ViewSurface;

pub struct Navigator {
    enabled: bool,
    screen: ScreenId,
    layout: &'static ScreenLayout,
    selection: Selection,
    /// Screen waiting for its window-ready signal before the focus grab.
    pending_focus: Option<ScreenId>,
    palette: HighlightPalette,
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            enabled: true,
            screen: ScreenId::Main,
            layout: &screens::MAIN,
            selection: Selection::new(screens::MAIN.fallback, 0),
            pending_focus: None,
            palette: theme::highlight_palette(true),
        }
    }

    pub fn screen(&self) -> ScreenId {
        self.screen
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Suppress or re-enable all navigation entry points (teardown guard).
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn set_palette(&mut self, palette: HighlightPalette) {
        self.palette = palette;
    }

    /// Switch the active strategy.
    ///
    /// A screen without a navigation layout (settings) falls back to the main
    /// strategy so the active layout is never left unset. When the target
    /// view is still being constructed the focus grab is deferred until
    /// [`Navigator::notify_ready`] — an explicit handshake instead of a
    /// fixed-delay timer.
    pub fn set_screen(
        &mut self,
        screen: ScreenId,
        counts: &dyn CountsProvider,
        view: &mut dyn ViewSurface,
    ) {
        match screens::layout(screen) {
            Some(layout) => {
                self.screen = screen;
                self.layout = layout;
            }
            None => {
                warn!(screen = ?screen, "no navigation layout, falling back to main");
                self.screen = ScreenId::Main;
                self.layout = &screens::MAIN;
            }
        }
        if view.is_ready() {
            self.pending_focus = None;
            self.initialize_focus(counts, view);
        } else {
            debug!(screen = ?self.screen, "view not ready, deferring focus grab");
            self.pending_focus = Some(self.screen);
        }
    }

    /// Window-ready signal from the window-creation collaborator.
    pub fn notify_ready(
        &mut self,
        screen: ScreenId,
        counts: &dyn CountsProvider,
        view: &mut dyn ViewSurface,
    ) {
        if self.pending_focus == Some(screen) {
            self.pending_focus = None;
            self.initialize_focus(counts, view);
        }
    }

    pub fn initialize_focus(&mut self, counts: &dyn CountsProvider, view: &mut dyn ViewSurface) {
        if !self.enabled {
            return;
        }
        self.selection = screens::initial_focus(self.layout, counts);
        debug!(screen = ?self.screen, selection = ?self.selection, "focus initialized");
        self.update_highlights(counts, view);
    }

    /// Repair a selection invalidated by an external mutation: clamp to the
    /// nearest valid index, or start over from the screen's entry rule when
    /// the focused kind emptied out.
    fn reconcile(&mut self, counts: &dyn CountsProvider) {
        if self.selection.is_valid(counts) {
            return;
        }
        self.selection = self
            .selection
            .clamped(counts)
            .unwrap_or_else(|| screens::initial_focus(self.layout, counts));
        debug!(selection = ?self.selection, "selection reconciled after external change");
    }

    pub fn navigate_vertical(
        &mut self,
        direction: Vertical,
        counts: &dyn CountsProvider,
        view: &mut dyn ViewSurface,
    ) {
        if !self.enabled {
            return;
        }
        self.reconcile(counts);
        self.selection = screens::step_vertical(self.layout, self.selection, direction, counts);
        debug!(direction = ?direction, selection = ?self.selection, "vertical navigation");
        self.update_highlights(counts, view);
        self.ensure_visible(view);
    }

    pub fn navigate_horizontal(
        &mut self,
        direction: Horizontal,
        counts: &dyn CountsProvider,
        view: &mut dyn ViewSurface,
    ) {
        if !self.enabled {
            return;
        }
        self.reconcile(counts);
        self.selection = screens::step_horizontal(self.layout, self.selection, direction, counts);
        debug!(direction = ?direction, selection = ?self.selection, "horizontal navigation");
        self.update_highlights(counts, view);
    }

    /// Resolve the current selection to its activation effect.
    pub fn activate(&mut self, counts: &dyn CountsProvider) -> Option<Effect> {
        if !self.enabled {
            return None;
        }
        self.reconcile(counts);
        let effect = screens::activate(self.layout, self.selection);
        match &effect {
            Some(effect) => debug!(%effect, selection = ?self.selection, "activated"),
            None => debug!(selection = ?self.selection, "activation has no effect"),
        }
        effect
    }

    /// Recompute highlighting for the current selection. Idempotent: calling
    /// it twice without intervening navigation styles the same target.
    pub fn update_highlights(&mut self, counts: &dyn CountsProvider, view: &mut dyn ViewSurface) {
        if !self.enabled {
            return;
        }
        self.reconcile(counts);
        view.clear_highlights();
        if !self.selection.is_valid(counts) {
            // Nothing left to emphasize on this screen (empty fallback tier);
            // skipping the highlight is the defined degradation.
            return;
        }
        let target = screens::highlight_target(self.layout, self.selection);
        view.highlight(target, self.palette);
    }

    /// Ask the view to scroll the focused element into the visible region.
    pub fn ensure_visible(&self, view: &mut dyn ViewSurface) {
        if !self.enabled {
            return;
        }
        view.scroll_into_view(screens::highlight_target(self.layout, self.selection));
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
