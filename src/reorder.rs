//! Interactive reorder engine
//!
//! Lets the user pick up one item of a visually ordered list and drop it at
//! a new position. Two pointer vocabularies (native drag for fine pointers,
//! press/move/release for coarse pointers) are normalized into a single
//! begin -> reposition -> end lifecycle so the ordering logic is written
//! once. While a session is open the engine continuously reinserts the
//! dragged child next to whatever item the pointer crosses, keeping the
//! container consistent after every event.
//!
//! The engine owns only the visual order. Persisting the committed order is
//! the caller's job, via the [`OrderEntry`] snapshot handed to the
//! `on_reorder` callback after every completed drag.
//!
//! # Limitations
//!
//! - One container per engine; dragging between two containers is not
//!   supported. Coarse-pointer moves outside the container are ignored.
//! - One engine per page: the scroll lock is an exclusive page-level
//!   resource and two engines would race on it.

use crate::container::{ChildNode, Container, ItemId, ItemState, rect_contains};
use crate::pointer::{DragEvent, Modality, Point, TouchEvent};
use crate::scroll_lock::{ScrollLock, ScrollLockGuard};
use ratatui::layout::Rect;
use thiserror::Error;
use tracing::{debug, trace, warn};

/// Predicate restricting which children count as items. Children that fail
/// the selector keep their place in the layout but are never discovered,
/// dragged, targeted, or listed in snapshots.
pub type ItemSelector = Box<dyn Fn(&ChildNode) -> bool>;

/// Invoked with the order snapshot after every completed drag.
pub type ReorderCallback = Box<dyn FnMut(&[OrderEntry])>;

/// Which sub-region of an item initiates a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HandleRule {
    /// The whole item surface starts a drag.
    #[default]
    WholeItem,
    /// Only the leading `width` columns of an item start a drag. Items
    /// narrower than the grip have no resolvable handle and stay inert.
    Grip { width: u16 },
}

/// One row of an order snapshot: an item in its current visual position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderEntry {
    pub id: ItemId,
    /// Zero-based index among items, in visual order.
    pub index: usize,
    /// Caller-supplied stable attribute of the item, or the new index when
    /// the item carries none.
    pub sort_key: u64,
}

/// Errors reported at engine construction time. Everything past
/// construction degrades silently per the engine's contract.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReorderError {
    /// The configured container resolves to an empty target area; there is
    /// nothing to attach to.
    #[error("reorder container cannot be resolved: target area is empty")]
    ContainerUnresolved,
}

/// Construction options for [`ReorderEngine`].
pub struct ReorderOptions {
    /// Restricts which children count as items. Default: every child.
    pub item_selector: Option<ItemSelector>,
    /// Which sub-region of an item starts a drag. Default: the whole item.
    pub handle_rule: HandleRule,
    /// The input class this engine listens for. Fixed for its lifetime.
    pub modality: Modality,
    /// Invoked with the order snapshot after every completed drag.
    pub on_reorder: Option<ReorderCallback>,
}

impl Default for ReorderOptions {
    fn default() -> Self {
        Self {
            item_selector: None,
            handle_rule: HandleRule::default(),
            modality: Modality::default(),
            on_reorder: None,
        }
    }
}

/// Transient state between a begin and an end event.
#[derive(Debug, Clone, Copy)]
struct DragSession {
    item: ItemId,
}

/// The reorder engine. See the module docs for the contract.
pub struct ReorderEngine {
    container: Container,
    item_selector: Option<ItemSelector>,
    handle_rule: HandleRule,
    modality: Modality,
    on_reorder: Option<ReorderCallback>,
    session: Option<DragSession>,
    scroll_lock: ScrollLock,
    lock_guard: Option<ScrollLockGuard>,
    drop_guard: bool,
    destroyed: bool,
}

impl ReorderEngine {
    /// Bind an engine to a container and perform initial item discovery.
    ///
    /// Marks the container as an active reorder zone and installs drag
    /// affordances on every matched item. Fails, without panicking, when
    /// the container resolves to an empty area, leaving the caller free to
    /// keep running with a non-interactive list.
    pub fn new(
        mut container: Container,
        options: ReorderOptions,
        scroll_lock: ScrollLock,
    ) -> Result<Self, ReorderError> {
        let area = container.area();
        if area.width == 0 || area.height == 0 {
            return Err(ReorderError::ContainerUnresolved);
        }
        container.set_active(true);
        let mut engine = Self {
            container,
            item_selector: options.item_selector,
            handle_rule: options.handle_rule,
            modality: options.modality,
            on_reorder: options.on_reorder,
            session: None,
            scroll_lock,
            lock_guard: None,
            drop_guard: false,
            destroyed: false,
        };
        engine.refresh();
        debug!(modality = %engine.modality, items = engine.container.len(), "reorder engine attached");
        Ok(engine)
    }

    pub fn modality(&self) -> Modality {
        self.modality
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    /// Mutable container access for external list edits (adding or removing
    /// rows, resizing). Call [`refresh`](Self::refresh) afterwards so new
    /// rows get their affordances. Children must not be moved through this
    /// while a drag session is open.
    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    /// Whether a drag session is currently active.
    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// The item selected by the active session, if any.
    pub fn dragged_item(&self) -> Option<ItemId> {
        self.session.map(|s| s.item)
    }

    /// Whether the page-wide guard against default release actions is
    /// installed (fine-pointer sessions only).
    pub fn drop_guard_active(&self) -> bool {
        self.drop_guard
    }

    /// Re-discover items and install affordances. Idempotent; callable any
    /// number of times, typically after the caller mutated the list.
    ///
    /// Every matched child not already recognized gets the item marker and
    /// the idle state. A matched child without a resolvable handle is
    /// silently skipped and stays inert.
    pub fn refresh(&mut self) {
        if self.destroyed {
            warn!("refresh on a destroyed engine ignored");
            return;
        }
        let decisions: Vec<(ItemId, ItemState)> = self
            .container
            .children()
            .iter()
            .filter(|n| n.state() == ItemState::Unmanaged)
            .filter(|n| self.is_item(n))
            .map(|n| {
                let state = if self.drag_region(n).is_some() {
                    ItemState::Idle
                } else {
                    ItemState::Inert
                };
                (n.id(), state)
            })
            .collect();
        for (id, state) in decisions {
            if state == ItemState::Inert {
                debug!(?id, "item has no resolvable handle, left inert");
            }
            if let Some(node) = self.container.node_mut(id) {
                node.set_state(state);
            }
        }
    }

    /// Feed one native drag event into the engine. Only meaningful on a
    /// fine-pointer engine; other modalities ignore it.
    pub fn handle_drag(&mut self, event: DragEvent) {
        if self.modality != Modality::Fine {
            trace!("drag event ignored on a coarse-pointer engine");
            return;
        }
        match event {
            DragEvent::Start(p) => self.begin(p),
            DragEvent::Over(p) => self.reposition(p),
            DragEvent::End => self.end(),
        }
    }

    /// Feed one touch event into the engine. Only meaningful on a
    /// coarse-pointer engine; other modalities ignore it.
    pub fn handle_touch(&mut self, event: TouchEvent) {
        if self.modality != Modality::Coarse {
            trace!("touch event ignored on a fine-pointer engine");
            return;
        }
        match event {
            TouchEvent::Press(p) => self.begin(p),
            TouchEvent::Move(p) => {
                // No drag-over equivalent exists for touch: the element
                // under the touch point is resolved here, and motion is
                // restricted to this container so a stray finger cannot
                // reinsert across containers.
                if !self.container.contains(p) {
                    trace!("touch move outside the container ignored");
                    return;
                }
                self.reposition(p);
            }
            TouchEvent::Release => self.end(),
        }
    }

    /// Current visual order of the items. No side effects.
    pub fn order_snapshot(&self) -> Vec<OrderEntry> {
        self.container
            .children()
            .iter()
            .filter(|n| self.is_item(n))
            .enumerate()
            .map(|(index, n)| OrderEntry {
                id: n.id(),
                index,
                sort_key: n.sort_key().unwrap_or(index as u64),
            })
            .collect()
    }

    /// Tear the engine down, restoring the container to its
    /// pre-construction state.
    ///
    /// The scroll lock is released unconditionally in case a drag was
    /// interrupted; all markers and affordances are removed. Safe to call
    /// mid-drag and on empty containers. Events arriving afterwards are
    /// no-ops.
    pub fn destroy(&mut self) {
        self.lock_guard = None;
        self.drop_guard = false;
        self.session = None;
        self.container.set_active(false);
        for node in self.container.nodes_mut() {
            node.set_state(ItemState::Unmanaged);
        }
        self.destroyed = true;
        debug!("reorder engine destroyed");
    }

    fn is_item(&self, node: &ChildNode) -> bool {
        match &self.item_selector {
            Some(selector) => selector(node),
            None => true,
        }
    }

    /// The drag-initiating region of a managed item, or `None` when the
    /// handle rule cannot be satisfied by the item's geometry.
    fn drag_region(&self, node: &ChildNode) -> Option<Rect> {
        match self.handle_rule {
            HandleRule::WholeItem => Some(node.area()),
            HandleRule::Grip { width } => {
                let area = node.area();
                if width > 0 && area.width >= width {
                    Some(Rect::new(area.x, area.y, width, area.height))
                } else {
                    None
                }
            }
        }
    }

    fn begin(&mut self, p: Point) {
        if self.destroyed {
            return;
        }
        if self.session.is_some() {
            // single active session per engine: the first one wins
            debug!("begin while a session is open, ignored");
            return;
        }
        let Some(id) = self.container.child_at(p) else {
            return;
        };
        let draggable = {
            let Some(node) = self.container.node(id) else {
                return;
            };
            node.state() == ItemState::Idle
                && self
                    .drag_region(node)
                    .is_some_and(|region| rect_contains(region, p))
        };
        if !draggable {
            trace!(?id, "press outside a drag handle, no session");
            return;
        }
        self.lock_guard = self.scroll_lock.acquire();
        if self.modality == Modality::Fine {
            // releasing over a non-item region must not trigger an
            // unrelated default action
            self.drop_guard = true;
        }
        if let Some(node) = self.container.node_mut(id) {
            node.set_state(ItemState::Dragging);
        }
        self.session = Some(DragSession { item: id });
        debug!(?id, "drag session started");
    }

    fn reposition(&mut self, p: Point) {
        let Some(session) = self.session else {
            return;
        };
        let dragged = session.item;
        let Some(target) = self.container.child_at(p) else {
            return;
        };
        if target == dragged {
            return;
        }
        let valid_target = self
            .container
            .node(target)
            .is_some_and(|n| n.state() == ItemState::Idle);
        if !valid_target {
            return;
        }
        // Sibling precedence decides the insertion side: a dragged item
        // that precedes the target is reinserted immediately before it,
        // otherwise immediately after. Re-executed on every qualifying
        // event; a no-op when the dragged item is already adjacent.
        let before = self.container.precedes(dragged, target);
        self.container.reinsert(dragged, target, before);
        trace!(?dragged, ?target, before, "repositioned");
    }

    fn end(&mut self) {
        let Some(session) = self.session.take() else {
            // an end without an open session (dropped begin, refresh
            // mid-drag) is a no-op, never a failure
            trace!("end event with no active session, ignored");
            return;
        };
        if let Some(node) = self.container.node_mut(session.item) {
            node.set_state(ItemState::Idle);
        }
        self.lock_guard = None;
        self.drop_guard = false;
        debug!(item = ?session.item, "drag session ended");
        if self.on_reorder.is_some() {
            let snapshot = self.order_snapshot();
            if let Some(callback) = self.on_reorder.as_mut() {
                callback(&snapshot);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::{ChildKind, ChildSpec};

    fn fixture(n: usize) -> (ReorderEngine, Vec<ItemId>) {
        let mut container = Container::new(Rect::new(0, 0, 20, 10));
        let ids = (0..n)
            .map(|i| container.push(ChildSpec::entry(1).with_sort_key(100 + i as u64)))
            .collect();
        let engine = ReorderEngine::new(
            container,
            ReorderOptions {
                handle_rule: HandleRule::Grip { width: 2 },
                ..ReorderOptions::default()
            },
            ScrollLock::new(),
        )
        .expect("engine should attach");
        (engine, ids)
    }

    fn order(engine: &ReorderEngine) -> Vec<ItemId> {
        engine.order_snapshot().iter().map(|e| e.id).collect()
    }

    /// Point inside the grip of the item currently identified by `id`.
    fn grip_of(engine: &ReorderEngine, id: ItemId) -> Point {
        let area = engine.container().node(id).expect("node exists").area();
        Point::new(area.x, area.y)
    }

    /// Point on the body (outside the grip) of the item identified by `id`.
    fn body_of(engine: &ReorderEngine, id: ItemId) -> Point {
        let area = engine.container().node(id).expect("node exists").area();
        Point::new(area.x + 5, area.y)
    }

    #[test]
    fn test_refresh_marks_items_idle() {
        let (engine, ids) = fixture(3);
        for id in ids {
            assert_eq!(
                engine.container().node(id).unwrap().state(),
                ItemState::Idle
            );
        }
        assert!(engine.container().is_active_zone());
    }

    #[test]
    fn test_drag_adjacent_hover_places_before_target() {
        // [A, B, C, D]: drag A over C. A precedes C, so A lands immediately
        // before C: [B, A, C, D].
        let (mut engine, ids) = fixture(4);
        engine.handle_drag(DragEvent::Start(grip_of(&engine, ids[0])));
        engine.handle_drag(DragEvent::Over(body_of(&engine, ids[2])));
        engine.handle_drag(DragEvent::End);

        assert_eq!(order(&engine), vec![ids[1], ids[0], ids[2], ids[3]]);
        let snapshot = engine.order_snapshot();
        assert_eq!(snapshot[1].index, 1);
        assert_eq!(snapshot[1].sort_key, 100);
    }

    #[test]
    fn test_drag_upward_places_after_target() {
        // [A, B, C, D]: drag D over A. D does not precede A, so D lands
        // immediately after A: [A, D, B, C].
        let (mut engine, ids) = fixture(4);
        engine.handle_drag(DragEvent::Start(grip_of(&engine, ids[3])));
        engine.handle_drag(DragEvent::Over(body_of(&engine, ids[0])));
        engine.handle_drag(DragEvent::End);

        assert_eq!(order(&engine), vec![ids[0], ids[3], ids[1], ids[2]]);
    }

    #[test]
    fn test_adjacent_reposition_is_a_noop() {
        let (mut engine, ids) = fixture(4);
        engine.handle_drag(DragEvent::Start(grip_of(&engine, ids[0])));
        engine.handle_drag(DragEvent::Over(body_of(&engine, ids[1])));
        assert_eq!(order(&engine), ids);
        engine.handle_drag(DragEvent::Over(body_of(&engine, ids[1])));
        assert_eq!(order(&engine), ids);
        engine.handle_drag(DragEvent::End);
    }

    #[test]
    fn test_snapshot_defaults_sort_key_to_index() {
        let mut container = Container::new(Rect::new(0, 0, 20, 10));
        container.push(ChildSpec::entry(1));
        container.push(ChildSpec::entry(1));
        let engine =
            ReorderEngine::new(container, ReorderOptions::default(), ScrollLock::new()).unwrap();
        let snapshot = engine.order_snapshot();
        assert_eq!(snapshot[0].sort_key, 0);
        assert_eq!(snapshot[1].sort_key, 1);
    }

    #[test]
    fn test_selector_excludes_separators() {
        let mut container = Container::new(Rect::new(0, 0, 20, 10));
        let a = container.push(ChildSpec::entry(1));
        let sep = container.push(ChildSpec::separator(1));
        let b = container.push(ChildSpec::entry(1));
        let engine = ReorderEngine::new(
            container,
            ReorderOptions {
                item_selector: Some(Box::new(|n: &ChildNode| n.kind() == ChildKind::Entry)),
                ..ReorderOptions::default()
            },
            ScrollLock::new(),
        )
        .unwrap();

        let snapshot = engine.order_snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].id, a);
        assert_eq!(snapshot[1].id, b);
        assert_eq!(
            engine.container().node(sep).unwrap().state(),
            ItemState::Unmanaged
        );
    }

    #[test]
    fn test_narrow_item_stays_inert_under_grip_rule() {
        let mut container = Container::new(Rect::new(0, 0, 1, 10));
        let id = container.push(ChildSpec::entry(1));
        let mut engine = ReorderEngine::new(
            container,
            ReorderOptions {
                handle_rule: HandleRule::Grip { width: 2 },
                ..ReorderOptions::default()
            },
            ScrollLock::new(),
        )
        .unwrap();

        assert_eq!(engine.container().node(id).unwrap().state(), ItemState::Inert);
        engine.handle_drag(DragEvent::Start(Point::new(0, 0)));
        assert!(!engine.is_dragging());
    }

    #[test]
    fn test_unresolvable_container_is_an_error() {
        let container = Container::new(Rect::new(0, 0, 0, 0));
        let result = ReorderEngine::new(container, ReorderOptions::default(), ScrollLock::new());
        assert_eq!(result.err(), Some(ReorderError::ContainerUnresolved));
    }
}
