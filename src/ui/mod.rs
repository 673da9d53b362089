//! User interface rendering module
//!
//! Draws the dashboard: header, the bookmark list, and a status bar. List
//! rows are drawn at the rectangles the reorder container assigned, so the
//! screen always shows the engine's current visual order.

use crate::app::AppState;
use crate::container::ItemState;
use crate::reorder::ReorderEngine;
use crate::store::BookmarkStore;
use crate::theme::{Styles, Theme};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Margin, Rect};
use ratatui::style::Modifier;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

/// Glyph drawn in the grip column of draggable rows.
const GRIP_GLYPH: &str = "≡ ";

fn chunks(area: Rect) -> [Rect; 3] {
    Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(3),
        Constraint::Length(3),
    ])
    .areas(area)
}

/// The rectangle the reorder container is bound to: the list panel minus
/// its border.
pub fn list_area(frame_area: Rect) -> Rect {
    let [_, list, _] = chunks(frame_area);
    list.inner(Margin::new(1, 1))
}

/// Render the whole dashboard.
pub fn render(
    frame: &mut Frame,
    engine: Option<&ReorderEngine>,
    store: &BookmarkStore,
    state: &AppState,
    scroll_locked: bool,
) {
    let [header, list, status] = chunks(frame.area());
    render_header(frame, header, store);
    render_list(frame, list, engine, store, state);
    render_status(frame, status, state, scroll_locked);
}

fn render_header(frame: &mut Frame, area: Rect, store: &BookmarkStore) {
    let line = Line::from(vec![
        Span::styled("linkdeck ", Styles::title()),
        Span::styled(format!("({} bookmarks)", store.len()), Styles::text_muted()),
    ]);
    frame.render_widget(Paragraph::new(line).block(Block::bordered()), area);
}

fn render_list(
    frame: &mut Frame,
    area: Rect,
    engine: Option<&ReorderEngine>,
    store: &BookmarkStore,
    state: &AppState,
) {
    let active = engine.is_some_and(|e| e.container().is_active_zone());
    let block = Block::bordered()
        .title(" Bookmarks ")
        .border_style(Theme::zone_style(active));
    frame.render_widget(block, area);

    let Some(engine) = engine else {
        render_static_rows(frame, area.inner(Margin::new(1, 1)), store);
        return;
    };

    for child in engine.container().children() {
        if child.area().height == 0 {
            continue;
        }
        let Some(bookmark) = child.sort_key().and_then(|id| store.by_id(id)) else {
            continue;
        };
        let mut style = Theme::item_style(child.state());
        if state.selected == Some(bookmark.id) && child.state() != ItemState::Dragging {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        let grip = if child.state().is_managed() {
            Span::styled(GRIP_GLYPH, Styles::grip())
        } else {
            Span::raw("  ")
        };
        let line = Line::from(vec![
            grip,
            Span::styled(bookmark.title.clone(), style),
            Span::raw("  "),
            Span::styled(bookmark.url.clone(), Styles::url()),
        ]);
        frame.render_widget(Paragraph::new(line), child.area());
    }
}

/// Fallback when engine construction failed: a plain, non-interactive list.
fn render_static_rows(frame: &mut Frame, area: Rect, store: &BookmarkStore) {
    let bottom = area.y.saturating_add(area.height);
    for (i, bookmark) in store.bookmarks().iter().enumerate() {
        let y = area.y.saturating_add(i as u16);
        if y >= bottom {
            break;
        }
        let row = Rect::new(area.x, y, area.width, 1);
        let line = Line::from(vec![
            Span::raw("  "),
            Span::styled(bookmark.title.clone(), Styles::item_inert()),
        ]);
        frame.render_widget(Paragraph::new(line), row);
    }
}

fn render_status(frame: &mut Frame, area: Rect, state: &AppState, scroll_locked: bool) {
    let mut spans = vec![Span::styled(state.status_message.clone(), Styles::status())];
    if scroll_locked {
        spans.push(Span::styled("  [scroll locked]", Styles::error()));
    }
    spans.push(Span::styled(
        "  |  drag ≡ to reorder, r refresh, q quit",
        Styles::nav_hint(),
    ));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(Block::bordered()), area);
}
