use alloc::vec::Vec;

use crate::fenwick::Fenwick;

/// Row heights with prefix sums, mapping between pixel offsets and row indexes.
///
/// Rows start at `default_height` until the geometry layer reports a measurement.
#[derive(Clone, Debug)]
pub struct RowExtents {
    heights: Vec<u32>,
    sums: Fenwick,
    default_height: u32,
}

impl RowExtents {
    pub fn new(count: usize, default_height: u32) -> Self {
        let heights = alloc::vec![default_height; count];
        Self {
            sums: Fenwick::from_heights(&heights),
            heights,
            default_height,
        }
    }

    pub fn from_heights(heights: Vec<u32>, default_height: u32) -> Self {
        Self {
            sums: Fenwick::from_heights(&heights),
            heights,
            default_height,
        }
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }

    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// Grows or shrinks to `count` rows. Surviving rows keep their measured heights.
    pub fn resize(&mut self, count: usize) {
        if count == self.heights.len() {
            return;
        }
        self.heights.resize(count, self.default_height);
        self.sums = Fenwick::from_heights(&self.heights);
        gtrace!(count, "RowExtents::resize");
    }

    /// Replaces every row with `count` unmeasured rows.
    pub fn reset(&mut self, count: usize) {
        self.heights.clear();
        self.heights.resize(count, self.default_height);
        self.sums = Fenwick::from_heights(&self.heights);
    }

    /// Records a measured height. Returns the size delta (0 when unchanged or out of bounds).
    pub fn set_height(&mut self, index: usize, height: u32) -> i64 {
        let Some(slot) = self.heights.get_mut(index) else {
            gwarn!(index, len = self.heights.len(), "set_height: index out of bounds");
            return 0;
        };
        let delta = height as i64 - *slot as i64;
        if delta == 0 {
            return 0;
        }
        *slot = height;
        self.sums.add(index, delta);
        delta
    }

    pub fn height(&self, index: usize) -> Option<u32> {
        self.heights.get(index).copied()
    }

    /// Pixel offset of the row's leading edge.
    pub fn offset_of(&self, index: usize) -> Option<u64> {
        if index >= self.heights.len() {
            return None;
        }
        Some(self.sums.prefix_sum(index))
    }

    pub fn total_size(&self) -> u64 {
        self.sums.prefix_sum(self.heights.len())
    }

    /// Row containing `offset`, clamped to the last row.
    pub fn index_at(&self, offset: u64) -> Option<usize> {
        let last = self.heights.len().checked_sub(1)?;
        Some(self.sums.count_within(offset).min(last))
    }

    /// Inclusive `(start, end)` span of rows intersecting the viewport.
    pub fn visible_span(&self, scroll_offset: u64, viewport_size: u32) -> Option<(usize, usize)> {
        let start = self.index_at(scroll_offset)?;
        if viewport_size == 0 {
            return Some((start, start));
        }
        let last_px = scroll_offset.saturating_add(viewport_size as u64 - 1);
        let end = self.index_at(last_px)?.max(start);
        Some((start, end))
    }

    /// Scroll offset that brings `index` fully into view with the least movement.
    pub fn reveal_offset(
        &self,
        index: usize,
        scroll_offset: u64,
        viewport_size: u32,
    ) -> Option<u64> {
        let start = self.offset_of(index)?;
        let end = start.saturating_add(self.heights[index] as u64);
        let viewport_end = scroll_offset.saturating_add(viewport_size as u64);
        if start < scroll_offset {
            Some(start)
        } else if end > viewport_end {
            Some(end.saturating_sub(viewport_size as u64))
        } else {
            Some(scroll_offset)
        }
    }
}
