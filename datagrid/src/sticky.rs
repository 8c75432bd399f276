//! Pixel offsets for pinned (sticky) columns and rows.
//!
//! Offsets are cumulative sums of the measured sizes of the pinned elements between an element and
//! its edge. The styling layer turns them into `left`/`right`/`top`/`bottom` positions.

use alloc::vec::Vec;

use crate::{Column, ColumnId, ColumnPin, Row, RowPin};

/// Page-level chrome that sticky content has to clear.
///
/// `is_mobile` is injected by the geometry layer on each update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageMetrics {
    pub header_height: u32,
    pub footer_height: u32,
    pub notification_bar_height: u32,
    pub mobile_toolbar_height: u32,
    pub extra_top_offset: u32,
    pub disable_body_scroll: bool,
    pub is_mobile: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageOffsets {
    pub top: u64,
    pub bottom: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StickyEdge {
    Start,
    End,
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PinnedOffset<T> {
    pub id: T,
    pub edge: StickyEdge,
    pub offset: u64,
}

/// Resolved offsets for every pinned column and row, plus the page-level offsets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OffsetMap {
    pub page: PageOffsets,
    pub columns: Vec<PinnedOffset<ColumnId>>,
    pub rows: Vec<PinnedOffset<usize>>,
}

impl OffsetMap {
    pub fn column_offset(&self, id: ColumnId) -> Option<u64> {
        self.columns.iter().find(|c| c.id == id).map(|c| c.offset)
    }

    pub fn row_offset(&self, index: usize) -> Option<u64> {
        self.rows.iter().find(|r| r.id == index).map(|r| r.offset)
    }
}

pub fn page_offsets(m: &PageMetrics) -> PageOffsets {
    let header = if m.disable_body_scroll {
        0
    } else {
        m.header_height as u64
    };
    let chrome = if m.is_mobile {
        m.mobile_toolbar_height
    } else {
        m.notification_bar_height
    };
    let footer = if m.disable_body_scroll {
        0
    } else {
        m.footer_height as u64
    };
    PageOffsets {
        top: header + chrome as u64 + m.extra_top_offset as u64,
        bottom: footer,
    }
}

/// Offsets for elements pinned to the leading edge: each is the sum of the sizes before it.
///
/// Clears `out` first.
pub fn leading_offsets(sizes: &[u32], out: &mut Vec<u64>) {
    out.clear();
    out.reserve(sizes.len());
    let mut acc = 0u64;
    for &size in sizes {
        out.push(acc);
        acc = acc.saturating_add(size as u64);
    }
}

/// Offsets for elements pinned to the trailing edge: each is the sum of the sizes after it.
///
/// Clears `out` first.
pub fn trailing_offsets(sizes: &[u32], out: &mut Vec<u64>) {
    out.clear();
    out.resize(sizes.len(), 0);
    let mut acc = 0u64;
    for (slot, &size) in out.iter_mut().zip(sizes).rev() {
        *slot = acc;
        acc = acc.saturating_add(size as u64);
    }
}

/// Computes the full offset map. `columns` and `rows` are in display order; unpinned entries
/// are skipped.
pub fn resolve_offsets(columns: &[Column], rows: &[Row], metrics: &PageMetrics) -> OffsetMap {
    let page = page_offsets(metrics);
    let mut map = OffsetMap {
        page,
        columns: Vec::new(),
        rows: Vec::new(),
    };

    let mut acc = 0u64;
    for c in columns.iter().filter(|c| c.pin == ColumnPin::Start) {
        map.columns.push(PinnedOffset {
            id: c.id,
            edge: StickyEdge::Start,
            offset: acc,
        });
        acc = acc.saturating_add(c.width as u64);
    }
    let first_end = map.columns.len();
    let mut acc = 0u64;
    for c in columns.iter().rev().filter(|c| c.pin == ColumnPin::End) {
        map.columns.push(PinnedOffset {
            id: c.id,
            edge: StickyEdge::End,
            offset: acc,
        });
        acc = acc.saturating_add(c.width as u64);
    }
    map.columns[first_end..].reverse();

    let mut acc = page.top;
    for r in rows.iter().filter(|r| r.pin == RowPin::Top) {
        map.rows.push(PinnedOffset {
            id: r.index,
            edge: StickyEdge::Top,
            offset: acc,
        });
        acc = acc.saturating_add(r.height as u64);
    }
    let first_bottom = map.rows.len();
    let mut acc = page.bottom;
    for r in rows.iter().rev().filter(|r| r.pin == RowPin::Bottom) {
        map.rows.push(PinnedOffset {
            id: r.index,
            edge: StickyEdge::Bottom,
            offset: acc,
        });
        acc = acc.saturating_add(r.height as u64);
    }
    map.rows[first_bottom..].reverse();

    map
}

/// Caches the last resolved [`OffsetMap`] and recomputes only when a pinned element, a pinned
/// size, or the page metrics changed. Redundant calls are free of side effects.
#[derive(Clone, Debug, Default)]
pub struct StickyOffsetResolver {
    columns: Vec<(ColumnId, ColumnPin, u32)>,
    rows: Vec<(usize, RowPin, u32)>,
    metrics: PageMetrics,
    map: OffsetMap,
    primed: bool,
}

impl StickyOffsetResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&self) -> &OffsetMap {
        &self.map
    }

    /// Returns `true` when the inputs changed and the map was recomputed.
    pub fn resolve(&mut self, columns: &[Column], rows: &[Row], metrics: &PageMetrics) -> bool {
        let pinned_columns = columns
            .iter()
            .filter(|c| c.pin != ColumnPin::None)
            .map(|c| (c.id, c.pin, c.width));
        let pinned_rows = rows
            .iter()
            .filter(|r| r.pin != RowPin::None)
            .map(|r| (r.index, r.pin, r.height));

        let unchanged = self.primed
            && self.metrics == *metrics
            && self.columns.iter().copied().eq(pinned_columns.clone())
            && self.rows.iter().copied().eq(pinned_rows.clone());
        if unchanged {
            return false;
        }

        self.columns.clear();
        self.columns.extend(pinned_columns);
        self.rows.clear();
        self.rows.extend(pinned_rows);
        self.metrics = *metrics;
        self.map = resolve_offsets(columns, rows, metrics);
        self.primed = true;
        gtrace!(
            columns = self.map.columns.len(),
            rows = self.map.rows.len(),
            top = self.map.page.top,
            bottom = self.map.page.bottom,
            "sticky offsets recomputed"
        );
        true
    }

    /// Forces the next `resolve` call to recompute.
    pub fn invalidate(&mut self) {
        self.primed = false;
    }
}
