//! A headless data-grid engine.
//!
//! This crate holds the pure building blocks of an interactive table:
//! - range windowing (which rows to mount, with overscan and a fixed anchor row)
//! - row extents (prefix sums over measured row heights, offset ↔ index lookup)
//! - sticky offsets for pinned columns and rows
//! - a selection model with roving focus decoupled from selection
//! - a single-cell edit transaction with asynchronous commit resolution
//!
//! It is UI-agnostic. For the event-driven coordinator that ties these together, see the
//! `datagrid-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod edit;
mod emitter;
mod error;
mod extents;
mod fenwick;
mod key;
mod selection;
mod sticky;
mod types;
pub mod window;

#[cfg(test)]
mod tests;

pub use edit::{
    CommitResolution, CommitTicket, EditEvent, EditPhase, EditSnapshot, EditTransaction,
    PendingCommit, transition,
};
pub use emitter::MountEmitter;
pub use error::{CommitRejected, GridError};
pub use extents::RowExtents;
pub use key::{GridKey, KeyMap, KeySet};
pub use selection::{SelectionModel, SelectionSnapshot};
pub use sticky::{
    OffsetMap, PageMetrics, PageOffsets, PinnedOffset, StickyEdge, StickyOffsetResolver,
    leading_offsets, page_offsets, resolve_offsets, trailing_offsets,
};
pub use types::{
    CellRef, Column, ColumnId, ColumnPin, FocusMove, MountSet, Row, RowPin, SelectionMode,
    WindowSpec,
};
pub use window::{for_each_mount_index, mount_indices, mount_indices_with};
