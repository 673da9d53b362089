//! Centralized theme and styling for the TUI
//!
//! Single source of truth for colors and styles. The item styles double as
//! the durable visual markers of the reorder engine: idle, dragging and
//! inert rows each get their own look, and the container border changes
//! while it is an active reorder zone.

#![allow(dead_code)]

use crate::container::ItemState;
use ratatui::style::{Color, Modifier, Style};

/// Core color palette for the application
pub struct Colors;

impl Colors {
    /// Default foreground text color
    pub const FG_PRIMARY: Color = Color::White;

    /// Secondary/muted text color
    pub const FG_SECONDARY: Color = Color::Gray;

    /// Disabled/inactive text color
    pub const FG_MUTED: Color = Color::DarkGray;

    /// Primary accent color - borders, titles, highlights
    pub const PRIMARY: Color = Color::Cyan;

    /// Row being dragged
    pub const DRAG_BG: Color = Color::Yellow;

    /// Text on the dragged row (contrast on yellow)
    pub const DRAG_FG: Color = Color::Black;

    /// Grip glyph color
    pub const GRIP: Color = Color::DarkGray;

    /// Active reorder-zone border
    pub const BORDER_ACTIVE: Color = Color::Cyan;

    /// Inactive border
    pub const BORDER_INACTIVE: Color = Color::DarkGray;

    /// Success feedback
    pub const SUCCESS: Color = Color::Green;

    /// Error feedback
    pub const ERROR: Color = Color::Red;

    /// Navigation hint color
    pub const NAV_HINT: Color = Color::DarkGray;

    /// URL column color
    pub const URL: Color = Color::Blue;
}

/// Pre-built styles for common UI patterns
pub struct Styles;

impl Styles {
    /// Main title style (cyan, bold)
    pub fn title() -> Style {
        Style::default()
            .fg(Colors::PRIMARY)
            .add_modifier(Modifier::BOLD)
    }

    /// Default text style
    pub fn text() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Muted text
    pub fn text_muted() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Idle (draggable) row
    pub fn item_idle() -> Style {
        Style::default().fg(Colors::FG_PRIMARY)
    }

    /// Row selected by the active drag session
    pub fn item_dragging() -> Style {
        Style::default()
            .fg(Colors::DRAG_FG)
            .bg(Colors::DRAG_BG)
            .add_modifier(Modifier::BOLD)
    }

    /// Row with no drag affordance
    pub fn item_inert() -> Style {
        Style::default().fg(Colors::FG_MUTED)
    }

    /// Grip glyph on draggable rows
    pub fn grip() -> Style {
        Style::default().fg(Colors::GRIP)
    }

    /// URL text
    pub fn url() -> Style {
        Style::default().fg(Colors::URL)
    }

    /// Container border while it is an active reorder zone
    pub fn border_active() -> Style {
        Style::default().fg(Colors::BORDER_ACTIVE)
    }

    /// Container border otherwise
    pub fn border_inactive() -> Style {
        Style::default().fg(Colors::BORDER_INACTIVE)
    }

    /// Status bar text
    pub fn status() -> Style {
        Style::default().fg(Colors::FG_SECONDARY)
    }

    /// Navigation hint (keybindings)
    pub fn nav_hint() -> Style {
        Style::default().fg(Colors::NAV_HINT)
    }

    /// Error feedback
    pub fn error() -> Style {
        Style::default().fg(Colors::ERROR)
    }
}

/// Theme context providing semantic style lookups
pub struct Theme;

impl Theme {
    /// Style for an item, keyed off its visual state marker
    pub fn item_style(state: ItemState) -> Style {
        match state {
            ItemState::Dragging => Styles::item_dragging(),
            ItemState::Idle => Styles::item_idle(),
            ItemState::Inert | ItemState::Unmanaged => Styles::item_inert(),
        }
    }

    /// Border style for the list container
    pub fn zone_style(active: bool) -> Style {
        if active {
            Styles::border_active()
        } else {
            Styles::border_inactive()
        }
    }
}
