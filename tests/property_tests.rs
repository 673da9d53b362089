//! Property-based tests for the reorder engine
//!
//! Uses proptest to check the ordering invariants under arbitrary drag
//! sequences: membership preservation, relative order of undragged items,
//! idempotent repositioning and scroll-lock balance.

use linkdeck::{
    ChildSpec, Container, DragEvent, ItemId, Modality, Point, ReorderEngine, ReorderOptions,
    ScrollLock,
};
use proptest::prelude::*;
use ratatui::layout::Rect;

fn build_engine(n: usize) -> (ReorderEngine, Vec<ItemId>, ScrollLock) {
    let mut container = Container::new(Rect::new(0, 0, 24, 16));
    let ids: Vec<ItemId> = (0..n)
        .map(|i| container.push(ChildSpec::entry(1).with_sort_key(i as u64)))
        .collect();
    let lock = ScrollLock::new();
    let engine = ReorderEngine::new(container, ReorderOptions::default(), lock.clone())
        .expect("engine should attach");
    (engine, ids, lock)
}

fn point_on(engine: &ReorderEngine, id: ItemId) -> Point {
    let area = engine.container().node(id).expect("node exists").area();
    Point::new(area.x + 3, area.y)
}

fn order(engine: &ReorderEngine) -> Vec<ItemId> {
    engine.order_snapshot().iter().map(|e| e.id).collect()
}

proptest! {
    /// Any drag settles as a permutation: exactly the original items, each
    /// exactly once, with every undragged item in its original relative
    /// order and dense snapshot indices.
    #[test]
    fn drag_preserves_membership_and_relative_order(
        n in 2usize..10,
        dragged in 0usize..10,
        hovers in prop::collection::vec(0usize..10, 0..16),
    ) {
        let dragged = dragged % n;
        let (mut engine, ids, _) = build_engine(n);
        let before = order(&engine);

        engine.handle_drag(DragEvent::Start(point_on(&engine, ids[dragged])));
        for h in hovers {
            let target = ids[h % n];
            engine.handle_drag(DragEvent::Over(point_on(&engine, target)));
        }
        engine.handle_drag(DragEvent::End);
        let after = order(&engine);

        // same members, each exactly once
        let mut sorted_after = after.clone();
        sorted_after.sort();
        let mut sorted_before = before.clone();
        sorted_before.sort();
        prop_assert_eq!(sorted_after, sorted_before);

        // undragged items keep their relative order
        let others_before: Vec<ItemId> =
            before.iter().copied().filter(|id| *id != ids[dragged]).collect();
        let others_after: Vec<ItemId> =
            after.iter().copied().filter(|id| *id != ids[dragged]).collect();
        prop_assert_eq!(others_before, others_after);

        // snapshot indices are dense and zero-based
        for (i, entry) in engine.order_snapshot().iter().enumerate() {
            prop_assert_eq!(entry.index, i);
        }
    }

    /// Reissuing the reposition that was just applied leaves the visual
    /// order unchanged.
    #[test]
    fn repeated_reposition_is_idempotent(
        n in 2usize..10,
        dragged in 0usize..10,
        target in 0usize..10,
    ) {
        let dragged = dragged % n;
        let target = target % n;
        let (mut engine, ids, _) = build_engine(n);

        engine.handle_drag(DragEvent::Start(point_on(&engine, ids[dragged])));
        engine.handle_drag(DragEvent::Over(point_on(&engine, ids[target])));
        let settled = order(&engine);

        engine.handle_drag(DragEvent::Over(point_on(&engine, ids[target])));
        prop_assert_eq!(order(&engine), settled);
        engine.handle_drag(DragEvent::End);
    }

    /// Every session balances the scroll lock, whether it ends with a
    /// release or with teardown.
    #[test]
    fn scroll_lock_is_always_balanced(
        n in 2usize..8,
        dragged in 0usize..8,
        destroy_mid_drag in any::<bool>(),
    ) {
        let dragged = dragged % n;
        let (mut engine, ids, lock) = build_engine(n);

        engine.handle_drag(DragEvent::Start(point_on(&engine, ids[dragged])));
        prop_assert!(lock.is_locked());

        if destroy_mid_drag {
            engine.destroy();
        } else {
            engine.handle_drag(DragEvent::End);
        }
        prop_assert!(!lock.is_locked());
    }
}

// =============================================================================
// Modality enum property tests
// =============================================================================

fn modality_strategy() -> impl Strategy<Value = Modality> {
    prop_oneof![Just(Modality::Fine), Just(Modality::Coarse)]
}

proptest! {
    /// Modality: to_string -> parse round-trip is identity
    #[test]
    fn modality_roundtrip(modality in modality_strategy()) {
        let s = modality.to_string();
        let parsed: Modality = s.parse().expect("should parse");
        prop_assert_eq!(modality, parsed);
    }

    /// Modality: Display output is non-empty lowercase
    #[test]
    fn modality_display_is_valid(modality in modality_strategy()) {
        let s = modality.to_string();
        prop_assert!(!s.is_empty());
        let lowercase = s.to_lowercase();
        prop_assert_eq!(s, lowercase);
    }
}
