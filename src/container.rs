//! Container and item model for reorderable lists
//!
//! The container owns an ordered sequence of children; that sequence is the
//! source of truth for visual order. Every child gets a stable opaque
//! [`ItemId`] when it is added, and the on-screen rectangles are a pure
//! projection of the sequence: `relayout` stacks children top-down inside
//! the container area after every structural change. Hit tests and
//! reinsertions therefore always observe a consistent tree.

use crate::pointer::Point;
use ratatui::layout::{Position, Rect};
use strum::Display;

/// Stable opaque identity assigned to a child at discovery time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

/// What kind of row a child is. Selectors typically restrict reordering to
/// entries and leave separators in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildKind {
    #[default]
    Entry,
    Separator,
}

/// Visual state marker of a child. The markers are mutually exclusive and
/// always reflect the true session state once an event handler returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ItemState {
    /// Not yet discovered by a reorder engine, or released by teardown.
    #[default]
    Unmanaged,
    /// Recognized as an item but skipped: no resolvable drag handle.
    Inert,
    /// Recognized and draggable, no session on it.
    Idle,
    /// Selected by the active drag session.
    Dragging,
}

impl ItemState {
    /// Whether a drag affordance is installed on this child.
    pub fn is_managed(self) -> bool {
        matches!(self, Self::Idle | Self::Dragging)
    }
}

/// Description of a child to add to a container.
#[derive(Debug, Clone, Copy)]
pub struct ChildSpec {
    height: u16,
    kind: ChildKind,
    sort_key: Option<u64>,
}

impl ChildSpec {
    /// A reorderable entry row.
    pub fn entry(height: u16) -> Self {
        Self {
            height,
            kind: ChildKind::Entry,
            sort_key: None,
        }
    }

    /// A non-entry row (heading, divider) that occupies space but is not an
    /// item under the usual selectors.
    pub fn separator(height: u16) -> Self {
        Self {
            height,
            kind: ChildKind::Separator,
            sort_key: None,
        }
    }

    /// Attach a caller-supplied stable attribute, surfaced verbatim in order
    /// snapshots. Never used for identity while dragging.
    pub fn with_sort_key(mut self, key: u64) -> Self {
        self.sort_key = Some(key);
        self
    }
}

/// One child of the container.
#[derive(Debug, Clone, Copy)]
pub struct ChildNode {
    id: ItemId,
    kind: ChildKind,
    height: u16,
    area: Rect,
    sort_key: Option<u64>,
    state: ItemState,
}

impl ChildNode {
    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn kind(&self) -> ChildKind {
        self.kind
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Current on-screen rectangle. Zero-height when clipped by the
    /// container bounds.
    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn sort_key(&self) -> Option<u64> {
        self.sort_key
    }

    pub fn state(&self) -> ItemState {
        self.state
    }

    pub(crate) fn set_state(&mut self, state: ItemState) {
        self.state = state;
    }
}

/// The visual element whose children form the ordered collection.
#[derive(Debug, Clone, Default)]
pub struct Container {
    area: Rect,
    children: Vec<ChildNode>,
    active: bool,
    next_id: u64,
}

impl Container {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            children: Vec::new(),
            active: false,
            next_id: 0,
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    /// Whether a reorder engine has marked this container as its active
    /// zone.
    pub fn is_active_zone(&self) -> bool {
        self.active
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn children(&self) -> &[ChildNode] {
        &self.children
    }

    pub fn node(&self, id: ItemId) -> Option<&ChildNode> {
        self.children.iter().find(|c| c.id == id)
    }

    pub(crate) fn node_mut(&mut self, id: ItemId) -> Option<&mut ChildNode> {
        self.children.iter_mut().find(|c| c.id == id)
    }

    pub(crate) fn nodes_mut(&mut self) -> impl Iterator<Item = &mut ChildNode> {
        self.children.iter_mut()
    }

    /// Append a child and return its stable id.
    pub fn push(&mut self, spec: ChildSpec) -> ItemId {
        let id = ItemId(self.next_id);
        self.next_id += 1;
        self.children.push(ChildNode {
            id,
            kind: spec.kind,
            height: spec.height,
            area: Rect::default(),
            sort_key: spec.sort_key,
            state: ItemState::Unmanaged,
        });
        self.relayout();
        id
    }

    /// Remove a child. Returns false when the id is unknown.
    pub fn remove(&mut self, id: ItemId) -> bool {
        let len = self.children.len();
        self.children.retain(|c| c.id != id);
        let removed = self.children.len() != len;
        if removed {
            self.relayout();
        }
        removed
    }

    /// Move the container to a new rectangle, restacking all children.
    pub fn resize(&mut self, area: Rect) {
        self.area = area;
        self.relayout();
    }

    /// Whether a point falls inside the container bounds.
    pub fn contains(&self, p: Point) -> bool {
        rect_contains(self.area, p)
    }

    /// The child under a point, if any.
    pub fn child_at(&self, p: Point) -> Option<ItemId> {
        self.children
            .iter()
            .find(|c| rect_contains(c.area, p))
            .map(|c| c.id)
    }

    pub(crate) fn position_of(&self, id: ItemId) -> Option<usize> {
        self.children.iter().position(|c| c.id == id)
    }

    /// Whether `a` comes before `b` in document order: a backward walk over
    /// the previous siblings of `b`, bounded by the distance between them.
    pub(crate) fn precedes(&self, a: ItemId, b: ItemId) -> bool {
        let Some(pos) = self.position_of(b) else {
            return false;
        };
        self.children[..pos].iter().rev().any(|c| c.id == a)
    }

    /// Reinsert `dragged` immediately before or after `target`, leaving all
    /// other children in their relative order. Returns false when either id
    /// is unknown or they are the same child.
    pub(crate) fn reinsert(&mut self, dragged: ItemId, target: ItemId, before: bool) -> bool {
        if dragged == target {
            return false;
        }
        let Some(from) = self.position_of(dragged) else {
            return false;
        };
        let node = self.children.remove(from);
        let Some(to) = self.position_of(target) else {
            self.children.insert(from, node);
            return false;
        };
        let index = if before { to } else { to + 1 };
        self.children.insert(index, node);
        self.relayout();
        true
    }

    /// Stack children top-down inside the container area. Children past the
    /// bottom edge get a zero-height rectangle and are never hit.
    fn relayout(&mut self) {
        let mut y = self.area.y;
        let bottom = self.area.y.saturating_add(self.area.height);
        for child in &mut self.children {
            let visible = child.height.min(bottom.saturating_sub(y));
            child.area = Rect::new(self.area.x, y, self.area.width, visible);
            y = y.saturating_add(child.height);
        }
    }
}

pub(crate) fn rect_contains(rect: Rect, p: Point) -> bool {
    rect.contains(Position::new(p.x, p.y))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn container_with(n: usize) -> (Container, Vec<ItemId>) {
        let mut c = Container::new(Rect::new(0, 0, 20, 10));
        let ids = (0..n).map(|_| c.push(ChildSpec::entry(1))).collect();
        (c, ids)
    }

    #[test]
    fn test_push_stacks_children_top_down() {
        let (c, ids) = container_with(3);
        for (i, id) in ids.iter().enumerate() {
            let node = c.node(*id).expect("node exists");
            assert_eq!(node.area(), Rect::new(0, i as u16, 20, 1));
        }
    }

    #[test]
    fn test_child_at_hits_the_right_row() {
        let (c, ids) = container_with(4);
        assert_eq!(c.child_at(Point::new(5, 0)), Some(ids[0]));
        assert_eq!(c.child_at(Point::new(19, 3)), Some(ids[3]));
        assert_eq!(c.child_at(Point::new(5, 8)), None);
        assert_eq!(c.child_at(Point::new(25, 0)), None);
    }

    #[test]
    fn test_remove_restacks() {
        let (mut c, ids) = container_with(3);
        assert!(c.remove(ids[0]));
        assert!(!c.remove(ids[0]));
        assert_eq!(c.len(), 2);
        assert_eq!(c.node(ids[1]).unwrap().area().y, 0);
        assert_eq!(c.node(ids[2]).unwrap().area().y, 1);
    }

    #[test]
    fn test_precedes_walks_previous_siblings() {
        let (c, ids) = container_with(4);
        assert!(c.precedes(ids[0], ids[3]));
        assert!(c.precedes(ids[1], ids[2]));
        assert!(!c.precedes(ids[3], ids[0]));
        assert!(!c.precedes(ids[2], ids[2]));
    }

    #[test]
    fn test_reinsert_before_and_after() {
        let (mut c, ids) = container_with(4);

        // move first child directly before the third
        assert!(c.reinsert(ids[0], ids[2], true));
        let order: Vec<ItemId> = c.children().iter().map(|n| n.id()).collect();
        assert_eq!(order, vec![ids[1], ids[0], ids[2], ids[3]]);

        // move last child directly after the second
        assert!(c.reinsert(ids[3], ids[0], false));
        let order: Vec<ItemId> = c.children().iter().map(|n| n.id()).collect();
        assert_eq!(order, vec![ids[1], ids[0], ids[3], ids[2]]);
    }

    #[test]
    fn test_reinsert_rejects_unknown_and_self() {
        let (mut c, ids) = container_with(2);
        let (_, foreign) = container_with(1);
        assert!(!c.reinsert(ids[0], ids[0], true));
        assert!(!c.reinsert(foreign[0], ids[1], true));
        assert_eq!(c.len(), 2);
    }

    #[test]
    fn test_children_past_bottom_edge_are_clipped() {
        let mut c = Container::new(Rect::new(0, 0, 10, 2));
        let ids: Vec<ItemId> = (0..4).map(|_| c.push(ChildSpec::entry(1))).collect();
        assert_eq!(c.node(ids[1]).unwrap().area().height, 1);
        assert_eq!(c.node(ids[2]).unwrap().area().height, 0);
        assert_eq!(c.child_at(Point::new(0, 2)), None);
    }

    #[test]
    fn test_resize_restacks_at_new_origin() {
        let (mut c, ids) = container_with(2);
        c.resize(Rect::new(3, 5, 12, 6));
        assert_eq!(c.node(ids[0]).unwrap().area(), Rect::new(3, 5, 12, 1));
        assert_eq!(c.node(ids[1]).unwrap().area(), Rect::new(3, 6, 12, 1));
    }

    #[test]
    fn test_ids_stay_stable_across_mutation() {
        let (mut c, ids) = container_with(3);
        c.remove(ids[1]);
        let again = c.push(ChildSpec::entry(1));
        assert_ne!(again, ids[1], "ids are never reused");
        assert!(c.node(ids[0]).is_some());
        assert!(c.node(ids[2]).is_some());
    }
}
