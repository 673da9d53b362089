//! linkdeck - a terminal bookmark launcher with drag-to-reorder lists
//!
//! The heart of the crate is the [`reorder`] engine: a generic interactive
//! component that lets the user pick up an item of a visually ordered list
//! and drop it at a new position, unifying mouse-drag and touch input into
//! one drag lifecycle. The engine owns only the visual order; committing
//! the result is the caller's job, done here by the bookmark [`store`]
//! through the engine's reorder callback.

pub mod app;
pub mod cli;
pub mod container;
pub mod error;
pub mod pointer;
pub mod reorder;
pub mod scroll_lock;
pub mod store;
pub mod theme;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use container::{ChildKind, ChildNode, ChildSpec, Container, ItemId, ItemState};
pub use error::{LinkdeckError, Result};
pub use pointer::{DragEvent, Modality, Point, TouchEvent};
pub use reorder::{HandleRule, OrderEntry, ReorderEngine, ReorderError, ReorderOptions};
pub use scroll_lock::{ScrollLock, ScrollLockGuard};
pub use store::{Bookmark, BookmarkStore};
