use crate::*;

use alloc::vec::Vec;

#[derive(Clone, Copy, Debug)]
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    fn next_u64(&mut self) -> u64 {
        // Deterministic, dependency-free PRNG for tests.
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.0
    }

    fn gen_range_usize(&mut self, start: usize, end_exclusive: usize) -> usize {
        debug_assert!(start < end_exclusive);
        let span = (end_exclusive - start) as u64;
        start + (self.next_u64() % span) as usize
    }

    fn gen_range_u32(&mut self, start: u32, end_exclusive: u32) -> u32 {
        self.gen_range_usize(start as usize, end_exclusive as usize) as u32
    }
}

fn keys(items: &[u32]) -> KeySet<u32> {
    items.iter().copied().collect()
}

fn random_spec(rng: &mut Lcg) -> WindowSpec {
    let total_size = rng.gen_range_usize(1, 500);
    let start = rng.gen_range_usize(0, total_size);
    let end = rng.gen_range_usize(start, total_size);
    let overscan = rng.gen_range_usize(0, 20);
    WindowSpec::new(start, end, overscan, total_size)
}

#[test]
fn window_scenario_overscans_and_anchors_first_row() {
    let out = mount_indices(&WindowSpec::new(40, 50, 5, 100)).unwrap();
    let mut expected = alloc::vec![0usize];
    expected.extend(35..=55);
    assert_eq!(out.as_slice(), expected.as_slice());
}

#[test]
fn window_includes_anchor_for_any_valid_spec() {
    let mut rng = Lcg::new(7);
    for _ in 0..500 {
        let spec = random_spec(&mut rng);
        let out = mount_indices(&spec).unwrap();
        assert_eq!(out.as_slice().first(), Some(&0), "spec={spec:?}");
    }
}

#[test]
fn window_output_is_ascending_contiguous_and_bounded() {
    let mut rng = Lcg::new(42);
    for _ in 0..500 {
        let spec = random_spec(&mut rng);
        let out = mount_indices(&spec).unwrap().into_vec();
        let lower = spec.start.saturating_sub(spec.overscan);
        let upper = (spec.end + spec.overscan).min(spec.total_size - 1);

        let body: &[usize] = if lower > 0 { &out[1..] } else { &out };
        let expected: Vec<usize> = (lower..=upper).collect();
        assert_eq!(body, expected.as_slice(), "spec={spec:?}");
        assert!(out.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn window_is_idempotent() {
    let mut rng = Lcg::new(3);
    for _ in 0..100 {
        let spec = random_spec(&mut rng);
        assert_eq!(mount_indices(&spec), mount_indices(&spec));
    }
}

#[test]
fn window_rejects_start_after_end() {
    let err = mount_indices(&WindowSpec::new(10, 5, 2, 100)).unwrap_err();
    assert_eq!(
        err,
        GridError::InvalidRange {
            start: 10,
            end: 5,
            total_size: 100
        }
    );
}

#[test]
fn window_empty_collection_mounts_nothing() {
    let out = mount_indices(&WindowSpec::new(0, 0, 3, 0)).unwrap();
    assert!(out.is_empty());
}

#[test]
fn window_start_past_collection_still_mounts_anchor() {
    let out = mount_indices(&WindowSpec::new(200, 210, 2, 50)).unwrap();
    assert_eq!(out.as_slice(), &[0]);
}

#[test]
fn window_merges_forced_indexes_in_order() {
    let spec = WindowSpec::new(40, 50, 5, 100);
    let out = mount_indices_with(&spec, &[0, 2, 40, 80, 99, 150]).unwrap();
    let mut expected = alloc::vec![0usize, 2];
    expected.extend(35..=55);
    expected.extend([80, 99]);
    assert_eq!(out.as_slice(), expected.as_slice());
    assert!(out.contains(80));
    assert!(!out.contains(150));
}

#[test]
fn window_forced_indexes_between_bounds_when_span_is_past_end() {
    let spec = WindowSpec::new(30, 40, 1, 20);
    let out = mount_indices_with(&spec, &[5, 11, 12]).unwrap();
    assert_eq!(out.as_slice(), &[0, 5, 11, 12]);
}

#[test]
fn window_accepts_unsorted_forced_indexes() {
    let spec = WindowSpec::new(40, 50, 5, 100);
    let out = mount_indices_with(&spec, &[99, 2, 80, 2, 37, 99]).unwrap();
    let mut expected = alloc::vec![0usize, 2];
    expected.extend(35..=55);
    expected.extend([80, 99]);
    assert_eq!(out.as_slice(), expected.as_slice());
}

#[cfg(debug_assertions)]
#[test]
#[should_panic(expected = "forced indexes must be sorted")]
fn for_each_mount_index_asserts_sorted_forced() {
    let spec = WindowSpec::new(40, 50, 5, 100);
    let _ = for_each_mount_index(&spec, &[99, 2], |_| {});
}

#[test]
fn mount_emitter_drops_repeats_and_out_of_bounds() {
    let mut out = Vec::new();
    let mut sink = |i: usize| out.push(i);
    let mut e = MountEmitter::new(5, &mut sink);
    e.emit(0);
    e.emit(0);
    e.emit_span(1, 3);
    e.emit(9);
    e.emit_span(3, 10);
    assert_eq!(e.last(), Some(4));
    assert_eq!(out, alloc::vec![0, 1, 2, 3, 4]);
}

#[test]
fn extents_map_offsets_and_indexes() {
    let ex = RowExtents::from_heights(alloc::vec![10, 20, 30, 40], 10);
    assert_eq!(ex.total_size(), 100);
    assert_eq!(ex.offset_of(0), Some(0));
    assert_eq!(ex.offset_of(3), Some(60));
    assert_eq!(ex.offset_of(4), None);
    assert_eq!(ex.index_at(0), Some(0));
    assert_eq!(ex.index_at(9), Some(0));
    assert_eq!(ex.index_at(10), Some(1));
    assert_eq!(ex.index_at(59), Some(2));
    assert_eq!(ex.index_at(10_000), Some(3));
    assert_eq!(ex.visible_span(15, 30), Some((1, 2)));
    assert_eq!(ex.visible_span(15, 0), Some((1, 1)));
}

#[test]
fn extents_empty_has_no_span() {
    let ex = RowExtents::new(0, 10);
    assert_eq!(ex.index_at(0), None);
    assert_eq!(ex.visible_span(0, 100), None);
    assert_eq!(ex.total_size(), 0);
}

#[test]
fn extents_measurements_update_prefix_sums() {
    let mut ex = RowExtents::new(10, 10);
    assert_eq!(ex.set_height(3, 25), 15);
    assert_eq!(ex.set_height(3, 25), 0);
    assert_eq!(ex.set_height(3, 5), -20);
    assert_eq!(ex.set_height(99, 5), 0);
    assert_eq!(ex.offset_of(4), Some(35));
    assert_eq!(ex.total_size(), 95);
}

#[test]
fn extents_resize_keeps_measured_rows() {
    let mut ex = RowExtents::new(3, 10);
    ex.set_height(1, 50);
    ex.resize(5);
    assert_eq!(ex.height(1), Some(50));
    assert_eq!(ex.height(4), Some(10));
    assert_eq!(ex.total_size(), 90);
    ex.resize(1);
    assert_eq!(ex.total_size(), 10);
    ex.reset(2);
    assert_eq!(ex.total_size(), 20);
}

#[test]
fn extents_match_naive_prefix_sums() {
    let mut rng = Lcg::new(11);
    for _ in 0..50 {
        let n = rng.gen_range_usize(1, 200);
        let mut heights: Vec<u32> = (0..n).map(|_| rng.gen_range_u32(1, 40)).collect();
        let mut ex = RowExtents::from_heights(heights.clone(), 10);
        for _ in 0..20 {
            let i = rng.gen_range_usize(0, n);
            let h = rng.gen_range_u32(0, 60);
            heights[i] = h;
            ex.set_height(i, h);
        }
        let mut acc = 0u64;
        for (i, &h) in heights.iter().enumerate() {
            assert_eq!(ex.offset_of(i), Some(acc));
            acc += h as u64;
        }
        assert_eq!(ex.total_size(), acc);
    }
}

#[test]
fn extents_reveal_offset_moves_least() {
    let ex = RowExtents::new(100, 10);
    assert_eq!(ex.reveal_offset(2, 50, 30), Some(20));
    assert_eq!(ex.reveal_offset(9, 50, 30), Some(70));
    assert_eq!(ex.reveal_offset(6, 50, 30), Some(50));
    assert_eq!(ex.reveal_offset(100, 50, 30), None);
}

#[test]
fn sticky_leading_offsets_are_exclusive_prefix_sums() {
    let mut out = Vec::new();
    leading_offsets(&[50, 80, 30], &mut out);
    assert_eq!(out, alloc::vec![0, 50, 130]);
}

#[test]
fn sticky_trailing_offsets_sum_following_widths() {
    let mut out = Vec::new();
    trailing_offsets(&[50, 80, 30], &mut out);
    assert_eq!(out, alloc::vec![110, 30, 0]);
    trailing_offsets(&[], &mut out);
    assert!(out.is_empty());
}

#[test]
fn sticky_page_offsets_follow_chrome_rules() {
    let m = PageMetrics {
        header_height: 40,
        footer_height: 30,
        notification_bar_height: 20,
        mobile_toolbar_height: 50,
        extra_top_offset: 5,
        disable_body_scroll: false,
        is_mobile: false,
    };
    assert_eq!(page_offsets(&m), PageOffsets { top: 65, bottom: 30 });

    let mobile = PageMetrics {
        is_mobile: true,
        ..m
    };
    assert_eq!(page_offsets(&mobile).top, 95);

    let locked = PageMetrics {
        disable_body_scroll: true,
        ..m
    };
    assert_eq!(page_offsets(&locked), PageOffsets { top: 25, bottom: 0 });
}

#[test]
fn sticky_resolves_columns_and_rows() {
    let columns = [
        Column::pinned(1, 50, ColumnPin::Start),
        Column::new(2, 500),
        Column::pinned(3, 80, ColumnPin::Start),
        Column::pinned(4, 60, ColumnPin::End),
        Column::pinned(5, 40, ColumnPin::End),
    ];
    let rows = [
        Row {
            index: 0,
            height: 30,
            pin: RowPin::Top,
        },
        Row {
            index: 1,
            height: 20,
            pin: RowPin::Top,
        },
        Row {
            index: 98,
            height: 25,
            pin: RowPin::Bottom,
        },
        Row {
            index: 99,
            height: 35,
            pin: RowPin::Bottom,
        },
    ];
    let metrics = PageMetrics {
        header_height: 10,
        footer_height: 4,
        ..PageMetrics::default()
    };
    let map = resolve_offsets(&columns, &rows, &metrics);

    assert_eq!(map.column_offset(1), Some(0));
    assert_eq!(map.column_offset(3), Some(50));
    assert_eq!(map.column_offset(2), None);
    assert_eq!(map.column_offset(4), Some(40));
    assert_eq!(map.column_offset(5), Some(0));
    assert_eq!(
        map.columns.iter().map(|c| c.id).collect::<Vec<_>>(),
        alloc::vec![1, 3, 4, 5]
    );

    assert_eq!(map.row_offset(0), Some(10));
    assert_eq!(map.row_offset(1), Some(40));
    assert_eq!(map.row_offset(98), Some(39));
    assert_eq!(map.row_offset(99), Some(4));
}

#[test]
fn sticky_without_pins_is_empty() {
    let map = resolve_offsets(&[Column::new(1, 10)], &[], &PageMetrics::default());
    assert!(map.columns.is_empty());
    assert!(map.rows.is_empty());
    assert_eq!(map.page, PageOffsets::default());
}

#[test]
fn sticky_handles_many_pinned_columns() {
    let columns: Vec<Column> = (0..1_000)
        .map(|i| Column::pinned(i, 10, ColumnPin::Start))
        .collect();
    let map = resolve_offsets(&columns, &[], &PageMetrics::default());
    assert_eq!(map.column_offset(999), Some(9_990));
}

#[test]
fn sticky_resolver_recomputes_only_on_relevant_change() {
    let mut r = StickyOffsetResolver::new();
    let metrics = PageMetrics::default();
    let mut columns = alloc::vec![
        Column::pinned(1, 50, ColumnPin::Start),
        Column::new(2, 100),
        Column::pinned(3, 80, ColumnPin::Start),
    ];

    assert!(r.resolve(&columns, &[], &metrics));
    assert!(!r.resolve(&columns, &[], &metrics));

    columns[1].width = 300;
    assert!(!r.resolve(&columns, &[], &metrics));

    columns[0].width = 70;
    assert!(r.resolve(&columns, &[], &metrics));
    assert_eq!(r.map().column_offset(3), Some(70));

    columns[1].pin = ColumnPin::Start;
    assert!(r.resolve(&columns, &[], &metrics));
    assert_eq!(r.map().column_offset(3), Some(370));

    let metrics = PageMetrics {
        extra_top_offset: 8,
        ..metrics
    };
    assert!(r.resolve(&columns, &[], &metrics));
    assert_eq!(r.map().page.top, 8);

    r.invalidate();
    assert!(r.resolve(&columns, &[], &metrics));
}

#[test]
fn selection_multi_toggle_round_trips() {
    let mut s = SelectionModel::new(SelectionMode::Multi);
    s.toggle(1u32);
    s.toggle(3);
    let before = s.selected().clone();
    assert!(s.toggle(7));
    assert!(s.is_selected(&7));
    assert!(s.toggle(7));
    assert_eq!(s.selected(), &before);
}

#[test]
fn selection_single_toggle_replaces_or_clears() {
    let mut s = SelectionModel::new(SelectionMode::Single);
    s.toggle(1u32);
    s.toggle(2);
    assert_eq!(s.selected(), &keys(&[2]));
    s.toggle(2);
    assert!(s.is_empty());
}

#[test]
fn selection_mode_none_is_inert() {
    let ordered: Vec<u32> = (1..=10).collect();
    let mut s = SelectionModel::new(SelectionMode::None);
    assert!(!s.toggle(1u32));
    assert!(!s.select_range(&1, &5, &ordered));
    assert!(!s.select_only(2));
    assert!(!s.select_all(&ordered));
    assert!(s.is_empty());
    assert_eq!(s.move_focus(FocusMove::First, &ordered), Some(&1));
}

#[test]
fn selection_range_scenario_preserves_outside_keys() {
    let ordered: Vec<u32> = (1..=10).collect();
    let mut s = SelectionModel::new(SelectionMode::Multi);
    s.toggle(1u32);
    s.toggle(3);
    assert!(s.select_range(&3, &6, &ordered));
    assert_eq!(s.selected(), &keys(&[1, 3, 4, 5, 6]));
    assert_eq!(s.range_anchor(), Some(&3));
}

#[test]
fn selection_range_is_order_independent() {
    let mut rng = Lcg::new(99);
    let ordered: Vec<u32> = (0..50).map(|i| i * 3 + 1).collect();
    for _ in 0..200 {
        let a = ordered[rng.gen_range_usize(0, ordered.len())];
        let b = ordered[rng.gen_range_usize(0, ordered.len())];
        let pre = ordered[rng.gen_range_usize(0, ordered.len())];

        let mut forward = SelectionModel::new(SelectionMode::Multi);
        forward.toggle(pre);
        forward.select_range(&a, &b, &ordered);

        let mut backward = SelectionModel::new(SelectionMode::Multi);
        backward.toggle(pre);
        backward.select_range(&b, &a, &ordered);

        assert_eq!(forward.selected(), backward.selected());
    }
}

#[test]
fn selection_range_requires_multi_and_known_keys() {
    let ordered: Vec<u32> = (1..=10).collect();
    let mut single = SelectionModel::new(SelectionMode::Single);
    assert!(!single.select_range(&1, &3, &ordered));

    let mut multi = SelectionModel::new(SelectionMode::Multi);
    assert!(!multi.select_range(&1, &42, &ordered));
    assert!(multi.is_empty());
}

#[test]
fn selection_focus_moves_without_selecting() {
    let ordered: Vec<u32> = (1..=5).collect();
    let mut s = SelectionModel::new(SelectionMode::Multi);
    s.toggle(2u32);

    assert_eq!(s.move_focus(FocusMove::Next, &ordered), Some(&1));
    assert_eq!(s.move_focus(FocusMove::Next, &ordered), Some(&2));
    assert_eq!(s.move_focus(FocusMove::Last, &ordered), Some(&5));
    assert_eq!(s.move_focus(FocusMove::Next, &ordered), Some(&5));
    assert_eq!(s.move_focus(FocusMove::First, &ordered), Some(&1));
    assert_eq!(s.move_focus(FocusMove::Previous, &ordered), Some(&1));
    assert_eq!(s.selected(), &keys(&[2]));

    s.set_focus(None);
    assert_eq!(s.move_focus(FocusMove::Previous, &ordered), Some(&5));
    assert_eq!(s.move_focus(FocusMove::Next, &[]), None);
    assert_eq!(s.focused(), Some(&5));
}

#[test]
fn selection_focus_by_page_clamps() {
    let ordered: Vec<u32> = (0..20).collect();
    let mut s = SelectionModel::<u32>::new(SelectionMode::Single);
    assert_eq!(s.move_focus_by(5, &ordered), Some(&0));
    assert_eq!(s.move_focus_by(5, &ordered), Some(&5));
    assert_eq!(s.move_focus_by(100, &ordered), Some(&19));
    assert_eq!(s.move_focus_by(-7, &ordered), Some(&12));
    assert_eq!(s.move_focus_by(-100, &ordered), Some(&0));
}

#[test]
fn selection_clear_keeps_focus() {
    let ordered: Vec<u32> = (1..=3).collect();
    let mut s = SelectionModel::new(SelectionMode::Multi);
    s.select_all(&ordered);
    s.set_focus(Some(2));
    assert!(s.clear());
    assert!(!s.clear());
    assert_eq!(s.focused(), Some(&2));
}

#[test]
fn selection_single_mode_has_at_most_one_key() {
    let mut rng = Lcg::new(5);
    let mut s = SelectionModel::new(SelectionMode::Single);
    for _ in 0..200 {
        s.toggle(rng.gen_range_u32(0, 8));
        assert!(s.len() <= 1);
    }
}

#[test]
fn selection_mode_switch_trims_selection() {
    let ordered: Vec<u32> = (1..=5).collect();
    let mut s = SelectionModel::new(SelectionMode::Multi);
    s.select_all(&ordered);
    s.toggle(3);
    s.toggle(3);
    assert!(s.set_mode(SelectionMode::Single));
    assert_eq!(s.selected(), &keys(&[3]));
    assert!(s.set_mode(SelectionMode::None));
    assert!(s.is_empty());
}

#[test]
fn selection_retain_drops_stale_keys_and_focus() {
    let mut s = SelectionModel::new(SelectionMode::Multi);
    s.toggle(1u32);
    s.toggle(2);
    s.set_focus(Some(2));
    assert!(s.retain(|k| *k != 2));
    assert_eq!(s.selected(), &keys(&[1]));
    assert_eq!(s.focused(), None);
    assert_eq!(s.range_anchor(), None);
}

#[test]
fn selection_snapshot_reflects_state() {
    let mut s = SelectionModel::new(SelectionMode::Single);
    s.toggle(4u32);
    s.set_focus(Some(9));
    let snap = s.snapshot();
    assert_eq!(snap.mode, SelectionMode::Single);
    assert_eq!(snap.selected_keys, keys(&[4]));
    assert_eq!(snap.last_focused_key, Some(9));
}

fn cell(row: u32, col: ColumnId) -> CellRef<u32> {
    CellRef::new(row, col)
}

#[test]
fn edit_transition_table() {
    use EditEvent as E;
    use EditPhase as P;
    assert_eq!(transition(P::Idle, E::Start), Some(P::Editing));
    assert_eq!(transition(P::Editing, E::Commit), Some(P::Committing));
    assert_eq!(transition(P::Committing, E::CommitSucceeded), Some(P::Idle));
    assert_eq!(transition(P::Committing, E::CommitRejected), Some(P::Editing));
    assert_eq!(transition(P::Editing, E::Cancel), Some(P::Idle));
    assert_eq!(transition(P::Committing, E::Cancel), None);
    assert_eq!(transition(P::Editing, E::Start), None);
    assert_eq!(transition(P::Idle, E::Commit), None);
    assert_eq!(transition(P::Committing, E::Teardown), Some(P::Idle));
}

#[test]
fn edit_successful_commit_scenario() {
    let mut tx = EditTransaction::<u32, &str>::new();
    tx.start(cell(1, 10), "").unwrap();
    tx.set_pending_value("x").unwrap();
    let pending = tx.begin_commit().unwrap();
    assert_eq!(pending.value, "x");
    assert_eq!(tx.phase(), EditPhase::Committing);

    let res = tx.resolve_commit(pending.ticket, Ok(())).unwrap();
    assert_eq!(res, CommitResolution::Committed(cell(1, 10)));
    let snap = tx.snapshot();
    assert_eq!(snap.phase, EditPhase::Idle);
    assert_eq!(snap.active_cell, None);
    assert_eq!(snap.pending_value, None);
    assert_eq!(snap.last_successful_cell, Some(cell(1, 10)));
}

#[test]
fn edit_second_start_is_refused() {
    let mut tx = EditTransaction::<u32, i32>::new();
    tx.start(cell(1, 1), 5).unwrap();
    assert_eq!(tx.start(cell(2, 1), 0), Err(GridError::ConcurrentEdit));
    assert_eq!(tx.active_cell(), Some(&cell(1, 1)));
    assert_eq!(tx.pending_value(), Some(&5));

    tx.begin_commit().unwrap();
    assert_eq!(tx.start(cell(2, 1), 0), Err(GridError::ConcurrentEdit));
    assert_eq!(tx.active_cell(), Some(&cell(1, 1)));
}

#[test]
fn edit_restarting_open_cell_keeps_pending_value() {
    let mut tx = EditTransaction::<u32, i32>::new();
    tx.start(cell(1, 1), 5).unwrap();
    tx.set_pending_value(6).unwrap();
    tx.start(cell(1, 1), 0).unwrap();
    assert_eq!(tx.pending_value(), Some(&6));
}

#[test]
fn edit_rejected_commit_keeps_input() {
    let mut tx = EditTransaction::<u32, &str>::new();
    tx.start(cell(3, 2), "old").unwrap();
    tx.set_pending_value("bad").unwrap();
    let pending = tx.begin_commit().unwrap();
    let res = tx
        .resolve_commit(pending.ticket, Err(CommitRejected::new("not a number")))
        .unwrap();
    assert_eq!(res, CommitResolution::Rejected);
    assert_eq!(tx.phase(), EditPhase::Editing);
    assert_eq!(tx.pending_value(), Some(&"bad"));
    assert_eq!(tx.error(), Some(&CommitRejected::new("not a number")));
    assert_eq!(tx.last_successful_cell(), None);

    // Retry succeeds and clears the error.
    let res = tx.commit_with(|_, _| Ok(())).unwrap();
    assert_eq!(res, CommitResolution::Committed(cell(3, 2)));
    assert_eq!(tx.error(), None);
}

#[test]
fn edit_set_pending_value_outside_editing_fails() {
    let mut tx = EditTransaction::<u32, i32>::new();
    assert_eq!(
        tx.set_pending_value(1),
        Err(GridError::InvalidState {
            operation: "set_pending_value",
            phase: EditPhase::Idle
        })
    );
    tx.start(cell(1, 1), 0).unwrap();
    tx.begin_commit().unwrap();
    assert!(matches!(
        tx.set_pending_value(2),
        Err(GridError::InvalidState {
            phase: EditPhase::Committing,
            ..
        })
    ));
    assert_eq!(tx.pending_value(), Some(&0));
}

#[test]
fn edit_cancel_is_ignored_while_committing() {
    let mut tx = EditTransaction::<u32, i32>::new();
    tx.start(cell(1, 1), 0).unwrap();
    let pending = tx.begin_commit().unwrap();
    assert_eq!(tx.cancel(), None);
    assert_eq!(tx.phase(), EditPhase::Committing);

    tx.resolve_commit(pending.ticket, Err(CommitRejected::new("nope")))
        .unwrap();
    assert_eq!(tx.cancel(), Some(cell(1, 1)));
    assert_eq!(tx.phase(), EditPhase::Idle);
    assert_eq!(tx.pending_value(), None);
    assert_eq!(tx.error(), None);
}

#[test]
fn edit_cancel_keeps_last_successful_cell() {
    let mut tx = EditTransaction::<u32, i32>::new();
    tx.start(cell(1, 1), 0).unwrap();
    tx.commit_with(|_, _| Ok(())).unwrap();
    tx.start(cell(2, 1), 0).unwrap();
    tx.cancel();
    assert_eq!(tx.last_successful_cell(), Some(&cell(1, 1)));
}

#[test]
fn edit_commit_outside_editing_fails() {
    let mut tx = EditTransaction::<u32, i32>::new();
    assert!(tx.begin_commit().is_err());
    assert!(tx.commit_with(|_, _| Ok(())).is_err());
    assert_eq!(tx.phase(), EditPhase::Idle);
}

#[test]
fn edit_stale_ticket_is_refused_after_teardown() {
    let mut tx = EditTransaction::<u32, i32>::new();
    tx.start(cell(1, 1), 0).unwrap();
    let old = tx.begin_commit().unwrap();
    assert_eq!(tx.teardown(), Some(cell(1, 1)));
    assert_eq!(tx.in_flight(), None);

    tx.start(cell(2, 1), 0).unwrap();
    let current = tx.begin_commit().unwrap();
    assert_ne!(old.ticket, current.ticket);
    assert!(tx.resolve_commit(old.ticket, Ok(())).is_err());
    assert_eq!(tx.phase(), EditPhase::Committing);
    assert!(tx.resolve_commit(current.ticket, Ok(())).is_ok());
    assert_eq!(tx.last_successful_cell(), Some(&cell(2, 1)));
}

#[test]
fn edit_commit_with_passes_cell_and_value() {
    let mut tx = EditTransaction::<u32, i32>::new();
    tx.start(cell(4, 7), 1).unwrap();
    tx.set_pending_value(2).unwrap();
    let mut seen = None;
    tx.commit_with(|c, v| {
        seen = Some((c.clone(), *v));
        Ok(())
    })
    .unwrap();
    assert_eq!(seen, Some((cell(4, 7), 2)));
}
