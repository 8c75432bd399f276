use alloc::vec::Vec;

use datagrid::{Column, PageMetrics, SelectionMode};

/// Configuration for [`crate::GridCoordinator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridOptions {
    /// Rows rendered beyond each end of the visible span.
    pub overscan: usize,
    pub selection_mode: SelectionMode,
    /// Height used for rows that have not been measured yet.
    pub default_row_height: u32,
    /// Initial page chrome. Later updates arrive through the geometry stream.
    pub page_metrics: PageMetrics,
    /// Columns in display order.
    pub columns: Vec<Column>,
}

impl GridOptions {
    pub fn new(default_row_height: u32) -> Self {
        Self {
            overscan: 1,
            selection_mode: SelectionMode::None,
            default_row_height,
            page_metrics: PageMetrics::default(),
            columns: Vec::new(),
        }
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_selection_mode(mut self, mode: SelectionMode) -> Self {
        self.selection_mode = mode;
        self
    }

    pub fn with_page_metrics(mut self, page_metrics: PageMetrics) -> Self {
        self.page_metrics = page_metrics;
        self
    }

    pub fn with_columns(mut self, columns: impl IntoIterator<Item = Column>) -> Self {
        self.columns = columns.into_iter().collect();
        self
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::new(1)
    }
}
