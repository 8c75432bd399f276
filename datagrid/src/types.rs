use alloc::vec::Vec;

pub type ColumnId = u64;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ColumnPin {
    #[default]
    None,
    Start,
    End,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowPin {
    #[default]
    None,
    Top,
    Bottom,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Column {
    pub id: ColumnId,
    /// Measured width in pixels.
    pub width: u32,
    pub pin: ColumnPin,
}

impl Column {
    pub fn new(id: ColumnId, width: u32) -> Self {
        Self {
            id,
            width,
            pin: ColumnPin::None,
        }
    }

    pub fn pinned(id: ColumnId, width: u32, pin: ColumnPin) -> Self {
        Self { id, width, pin }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Row {
    pub index: usize,
    /// Measured height in pixels.
    pub height: u32,
    pub pin: RowPin,
}

/// Addresses one cell by row identity, so it survives reordering.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRef<K> {
    pub row_key: K,
    pub column_id: ColumnId,
}

impl<K> CellRef<K> {
    pub fn new(row_key: K, column_id: ColumnId) -> Self {
        Self { row_key, column_id }
    }
}

/// The candidate rendering window.
///
/// `start` and `end` are inclusive indexes of the visible span (no overscan).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowSpec {
    pub start: usize,
    pub end: usize,
    pub overscan: usize,
    pub total_size: usize,
}

impl WindowSpec {
    pub fn new(start: usize, end: usize, overscan: usize, total_size: usize) -> Self {
        Self {
            start,
            end,
            overscan,
            total_size,
        }
    }

    /// Lower bound of the overscanned span.
    pub fn lower(&self) -> usize {
        self.start.saturating_sub(self.overscan)
    }

    /// Inclusive upper bound of the overscanned span, or `None` for an empty collection.
    pub fn upper(&self) -> Option<usize> {
        let last = self.total_size.checked_sub(1)?;
        Some(self.end.saturating_add(self.overscan).min(last))
    }
}

/// Ordered, duplicate-free indexes to mount for the current frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MountSet {
    indexes: Vec<usize>,
}

impl MountSet {
    pub(crate) fn from_sorted(indexes: Vec<usize>) -> Self {
        debug_assert!(indexes.windows(2).all(|w| w[0] < w[1]));
        Self { indexes }
    }

    pub fn as_slice(&self) -> &[usize] {
        &self.indexes
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.indexes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.indexes.binary_search(&index).is_ok()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indexes
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SelectionMode {
    #[default]
    None,
    Single,
    Multi,
}

/// Roving-focus movement among the ordered row keys.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusMove {
    Next,
    Previous,
    First,
    Last,
}
