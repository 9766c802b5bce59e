//! Terminal front-end for the popup.
//!
//! This is the bundled [`ViewSurface`] implementation: it keeps the highlight
//! and scroll bookkeeping the navigator asks for and paints the active screen
//! from a [`ScreenModel`] snapshot. The navigation core itself never sees any
//! of the types in this module.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::ScreenModel;
use crate::selection::ElementKind;
use crate::theme::{self, HighlightPalette, Rgb};
use crate::view::{HighlightTarget, ViewSurface};

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

/// Vertical scroll offset for the card list, nudged so the focused card
/// stays inside the viewport.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollState {
    pub offset: usize,
}

impl ScrollState {
    pub fn ensure_visible(&mut self, index: usize, view_rows: usize) {
        if view_rows == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + view_rows {
            self.offset = index + 1 - view_rows;
        }
    }

    pub fn clamp(&mut self, total: usize, view_rows: usize) {
        let max_offset = total.saturating_sub(view_rows);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
    }
}

pub struct PopupView {
    ready: bool,
    highlight: Option<(HighlightTarget, HighlightPalette)>,
    scroll: ScrollState,
    viewport_rows: usize,
}

impl PopupView {
    pub fn new() -> Self {
        Self {
            ready: true,
            highlight: None,
            scroll: ScrollState::default(),
            viewport_rows: 0,
        }
    }

    pub fn highlighted(&self) -> Option<HighlightTarget> {
        self.highlight.map(|(target, _)| target)
    }
}

impl Default for PopupView {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewSurface for PopupView {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn highlight(&mut self, target: HighlightTarget, palette: HighlightPalette) {
        self.highlight = Some((target, palette));
    }

    fn clear_highlights(&mut self) {
        self.highlight = None;
    }

    fn scroll_into_view(&mut self, target: HighlightTarget) {
        if let Some(card) = target.card_index() {
            self.scroll.ensure_visible(card, self.viewport_rows.max(1));
        }
    }
}

fn button_style(
    highlight: Option<(HighlightTarget, HighlightPalette)>,
    kind: ElementKind,
    index: usize,
    dark: bool,
) -> Style {
    let base = Style::default()
        .bg(color(theme::button_bg(dark)))
        .fg(color(theme::fg(dark)));
    match highlight {
        Some((HighlightTarget::Button { kind: k, index: i }, palette))
            if k == kind && i == index =>
        {
            base.bg(color(palette.normal)).add_modifier(Modifier::BOLD)
        }
        _ => base,
    }
}

/// Paint one screen snapshot. `visible == false` renders the idle splash.
pub fn render(frame: &mut Frame<'_>, model: &ScreenModel, view: &mut PopupView, visible: bool) {
    let area = frame.area();
    if !visible {
        let splash = Paragraph::new("popup hidden — press the global hotkey (Alt+V)")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(splash, area);
        return;
    }

    let has_main_row = !model.main_buttons.is_empty();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(if has_main_row { 1 } else { 0 }),
            Constraint::Min(0),
        ])
        .split(area);

    render_title_row(frame, model, view, chunks[0]);
    if has_main_row {
        render_main_buttons(frame, model, view, chunks[1]);
    }
    render_cards(frame, model, view, chunks[2]);
}

fn render_title_row(frame: &mut Frame<'_>, model: &ScreenModel, view: &PopupView, area: Rect) {
    let dark = model.dark_mode;
    let mut spans = vec![
        Span::styled(
            format!(" {} ", model.title),
            Style::default()
                .fg(color(theme::fg(dark)))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    for (i, label) in model.top_buttons.iter().enumerate() {
        spans.push(Span::styled(
            format!(" {label} "),
            button_style(view.highlight, ElementKind::TopButtons, i, dark),
        ));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_main_buttons(frame: &mut Frame<'_>, model: &ScreenModel, view: &PopupView, area: Rect) {
    let dark = model.dark_mode;
    let mut spans = Vec::new();
    for (i, label) in model.main_buttons.iter().enumerate() {
        spans.push(Span::styled(
            format!(" {label} "),
            button_style(view.highlight, ElementKind::MainButtons, i, dark),
        ));
        spans.push(Span::raw(" "));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_cards(frame: &mut Frame<'_>, model: &ScreenModel, view: &mut PopupView, area: Rect) {
    let dark = model.dark_mode;
    view.viewport_rows = area.height as usize;
    view.scroll.clamp(model.cards.len(), view.viewport_rows);

    let mut lines = Vec::new();
    for (index, card) in model
        .cards
        .iter()
        .enumerate()
        .skip(view.scroll.offset)
        .take(view.viewport_rows)
    {
        let (card_bg, icon_emphasis) = match view.highlight {
            Some((HighlightTarget::Card { index: i, .. }, palette)) if i == index => {
                (palette.normal, None)
            }
            Some((HighlightTarget::CardIcon { card: c, icon, .. }, palette)) if c == index => {
                (palette.normal, Some((icon, palette.icon)))
            }
            _ => (theme::card_bg(dark), None),
        };
        let base = Style::default().bg(color(card_bg)).fg(color(theme::fg(dark)));
        let marker = if card.pinned { "*" } else { " " };
        let mut spans = vec![Span::styled(format!("{marker}{:<40}", card.title), base)];
        for (i, icon) in card.icons.iter().enumerate() {
            let style = match icon_emphasis {
                Some((focused, icon_color)) if focused == i => base.bg(color(icon_color)),
                _ => base,
            };
            spans.push(Span::styled(format!("[{icon}]"), style));
        }
        lines.push(Line::from(spans));
    }
    if model.cards.is_empty() {
        lines.push(Line::from(Span::styled(
            " (empty) ",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(Paragraph::new(lines), area);
}
