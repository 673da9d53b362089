//! Pointer input vocabularies
//!
//! Fine pointers (mouse) deliver a native drag vocabulary: a start on the
//! dragged element, a stream of over events on whatever element the cursor
//! crosses, and an end that may fire anywhere. Coarse pointers (touch) have
//! no such vocabulary; they deliver raw press/move/release and leave target
//! resolution to the consumer. The two event shapes are kept as separate
//! public types and normalized inside the reorder engine into one
//! begin -> reposition -> end lifecycle.

use strum::{Display, EnumIter, EnumString};

/// The fixed input class an engine instance is constructed for.
///
/// Chosen once, at construction. An engine only consumes events of its own
/// modality; events of the other class are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[derive(Display, EnumString, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Modality {
    /// Fine pointer (mouse), native drag vocabulary.
    #[default]
    Fine,
    /// Coarse pointer (touch), press/move/release vocabulary.
    Coarse,
}

/// A cell position in terminal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Native drag vocabulary (fine pointer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragEvent {
    /// Drag started on the element under the pointer.
    Start(Point),
    /// The pointer crossed an element while dragging.
    Over(Point),
    /// The drag was released. Carries no position; release may happen
    /// anywhere, including outside the container.
    End,
}

/// Press/move/release vocabulary (coarse pointer).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchEvent {
    /// A touch point went down.
    Press(Point),
    /// The touch point moved. The consumer resolves the element under it.
    Move(Point),
    /// The touch point lifted.
    Release,
}
