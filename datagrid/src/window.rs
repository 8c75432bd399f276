//! Range windowing: which row indexes to mount for a given visible span.
//!
//! The output always starts with the anchor row `0` when the collection is non-empty, followed
//! by the overscanned span in ascending order. Extra "forced" indexes (pinned rows, the row being
//! edited) are merged in without breaking the ordering.

use alloc::vec::Vec;

use crate::emitter::MountEmitter;
use crate::{GridError, MountSet, WindowSpec};

/// Index that is mounted whenever the collection is non-empty.
pub const ANCHOR_INDEX: usize = 0;

pub fn validate(spec: &WindowSpec) -> Result<(), GridError> {
    if spec.start > spec.end {
        gwarn!(
            start = spec.start,
            end = spec.end,
            total_size = spec.total_size,
            "invalid window range"
        );
        return Err(GridError::InvalidRange {
            start: spec.start,
            end: spec.end,
            total_size: spec.total_size,
        });
    }
    Ok(())
}

/// Emits the mount indexes for `spec` without allocating.
///
/// `forced` must be sorted ascending (duplicates allowed). Entries outside the collection are
/// ignored. Use [`mount_indices_with`] when the forced indexes come in arbitrary order.
pub fn for_each_mount_index(
    spec: &WindowSpec,
    forced: &[usize],
    mut f: impl FnMut(usize),
) -> Result<(), GridError> {
    debug_assert!(
        forced.windows(2).all(|w| w[0] <= w[1]),
        "for_each_mount_index: forced indexes must be sorted ascending"
    );
    validate(spec)?;
    let Some(upper) = spec.upper() else {
        return Ok(());
    };
    let lower = spec.lower();
    gtrace!(lower, upper, forced = forced.len(), "for_each_mount_index");

    let mut e = MountEmitter::new(spec.total_size, &mut f);
    e.emit(ANCHOR_INDEX);
    for &i in forced.iter().filter(|&&i| i < lower) {
        e.emit(i);
    }
    e.emit_span(lower, upper);
    for &i in forced.iter().filter(|&&i| i >= lower && i > upper) {
        e.emit(i);
    }
    Ok(())
}

/// Collects the mount indexes for `spec`.
pub fn mount_indices(spec: &WindowSpec) -> Result<MountSet, GridError> {
    mount_indices_with(spec, &[])
}

/// Collects the mount indexes for `spec`, merging in the `forced` indexes (any order).
pub fn mount_indices_with(spec: &WindowSpec, forced: &[usize]) -> Result<MountSet, GridError> {
    let mut sorted = forced.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    let mut out = Vec::new();
    for_each_mount_index(spec, &sorted, |i| out.push(i))?;
    Ok(MountSet::from_sorted(out))
}
