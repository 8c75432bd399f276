use alloc::vec::Vec;

use datagrid::{
    CellRef, Column, ColumnId, ColumnPin, CommitRejected, CommitResolution, CommitTicket,
    EditSnapshot, EditTransaction, FocusMove, GridError, GridKey, KeyMap, MountSet, OffsetMap,
    PageMetrics, PendingCommit, Row, RowExtents, RowPin, SelectionMode, SelectionModel,
    SelectionSnapshot, StickyOffsetResolver, WindowSpec, mount_indices_with,
};

use crate::{
    CollectionSnapshot, GeometryEvent, GridOptions, InputEffect, InputEvent, KeyCode, Modifiers,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Everything the rendering layer needs for one frame.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot<K: GridKey, V> {
    pub mount: MountSet,
    pub offsets: OffsetMap,
    pub selection: SelectionSnapshot<K>,
    pub edit: EditSnapshot<K, V>,
}

/// Owns the window, sticky geometry, selection, and edit transaction of one grid and keeps them
/// consistent as geometry, input, and collection updates arrive.
///
/// This type does not hold any UI objects. Adapters drive it from their event loop:
/// - `replace_collection` when the backing rows change
/// - `on_geometry` / `on_scroll` when measurements or the scroll position change
/// - `on_input` for pointer, keyboard, and focus events
///
/// and read `mount_set`, `offset_map`, `selection_snapshot`, and `edit_snapshot` to render.
///
/// Cross-cutting rules:
/// - The row being edited and every pinned row are always mounted.
/// - Committing or cancelling an edit returns roving focus to the edited row.
/// - Replacing the collection (new token) clears the selection and closes any open edit.
#[derive(Clone, Debug)]
pub struct GridCoordinator<K: GridKey, V> {
    options: GridOptions,
    keys: Vec<K>,
    index_of: KeyMap<K, usize>,
    token: Option<u64>,
    extents: RowExtents,
    measured: KeyMap<K, u32>,
    columns: Vec<Column>,
    row_pins: KeyMap<K, RowPin>,
    viewport: Viewport,
    scroll_offset: u64,
    page: PageMetrics,
    sticky: StickyOffsetResolver,
    selection: SelectionModel<K>,
    edit: EditTransaction<K, V>,
}

impl<K: GridKey, V> GridCoordinator<K, V> {
    pub fn new(options: GridOptions) -> Self {
        adebug!(
            overscan = options.overscan,
            columns = options.columns.len(),
            "GridCoordinator::new"
        );
        let mut c = Self {
            keys: Vec::new(),
            index_of: KeyMap::new(),
            token: None,
            extents: RowExtents::new(0, options.default_row_height),
            measured: KeyMap::new(),
            columns: options.columns.clone(),
            row_pins: KeyMap::new(),
            viewport: Viewport::default(),
            scroll_offset: 0,
            page: options.page_metrics,
            sticky: StickyOffsetResolver::new(),
            selection: SelectionModel::new(options.selection_mode),
            edit: EditTransaction::new(),
            options,
        };
        c.refresh_offsets();
        c
    }

    pub fn options(&self) -> &GridOptions {
        &self.options
    }

    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    pub fn token(&self) -> Option<u64> {
        self.token
    }

    pub fn total_size(&self) -> usize {
        self.keys.len()
    }

    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index_of.get(key).copied()
    }

    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.keys.get(index)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.scroll_offset
    }

    pub fn extents(&self) -> &RowExtents {
        &self.extents
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn selection(&self) -> &SelectionModel<K> {
        &self.selection
    }

    pub fn edit(&self) -> &EditTransaction<K, V> {
        &self.edit
    }

    /// Applies a new collection snapshot. Returns `true` when it replaced the old collection
    /// wholesale (different token).
    ///
    /// On replacement the selection is cleared, focus and row pins are dropped, any open edit is
    /// closed (even one with a commit in flight), and row measurements start over. With the same
    /// token, keys that disappeared are pruned from the selection, pins, and measurements, an edit
    /// whose row disappeared is closed, and surviving rows keep their measured heights wherever
    /// they moved.
    pub fn replace_collection(&mut self, snapshot: CollectionSnapshot<K>) -> bool {
        let CollectionSnapshot { keys, token } = snapshot;
        let replaced = self.token != Some(token);

        self.index_of = keys
            .iter()
            .enumerate()
            .map(|(i, k)| (k.clone(), i))
            .collect();
        self.keys = keys;
        self.token = Some(token);

        if replaced {
            adebug!(token, count = self.keys.len(), "collection replaced");
            self.selection.reset();
            if self.edit.cancel().is_none() {
                self.edit.teardown();
            }
            self.row_pins.clear();
            self.measured.clear();
            self.extents.reset(self.keys.len());
        } else {
            atrace!(token, count = self.keys.len(), "collection updated in place");
            let index_of = &self.index_of;
            self.selection.retain(|k| index_of.contains_key(k));
            self.row_pins.retain(|k, _| index_of.contains_key(k));
            self.measured.retain(|k, _| index_of.contains_key(k));
            let edit_row_gone = self
                .edit
                .active_cell()
                .is_some_and(|c| !index_of.contains_key(&c.row_key));
            if edit_row_gone {
                self.edit.teardown();
            }
            let default_height = self.options.default_row_height;
            let heights = self
                .keys
                .iter()
                .map(|k| self.measured.get(k).copied().unwrap_or(default_height))
                .collect();
            self.extents = RowExtents::from_heights(heights, default_height);
        }

        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
        self.refresh_offsets();
        replaced
    }

    pub fn on_geometry(&mut self, event: GeometryEvent) {
        self.apply_geometry(event);
        self.settle_geometry();
    }

    /// Applies several measurements, recomputing offsets once at the end.
    pub fn on_geometry_batch(&mut self, events: impl IntoIterator<Item = GeometryEvent>) {
        for event in events {
            self.apply_geometry(event);
        }
        self.settle_geometry();
    }

    /// Row heights and the container size both move the scrollable range.
    fn settle_geometry(&mut self) {
        self.scroll_offset = self.clamp_scroll(self.scroll_offset);
        self.refresh_offsets();
    }

    fn apply_geometry(&mut self, event: GeometryEvent) {
        match event {
            GeometryEvent::ContainerSize { width, height } => {
                atrace!(width, height, "container size");
                self.viewport = Viewport { width, height };
            }
            GeometryEvent::RowHeight { index, height } => {
                let Some(key) = self.keys.get(index) else {
                    awarn!(index, "height reported for a row outside the collection");
                    return;
                };
                self.measured.insert(key.clone(), height);
                self.extents.set_height(index, height);
            }
            GeometryEvent::ColumnWidth { id, width } => {
                match self.columns.iter_mut().find(|c| c.id == id) {
                    Some(column) => column.width = width,
                    None => {
                        awarn!(id, "width reported for unknown column");
                    }
                }
            }
            GeometryEvent::PageMetrics(metrics) => {
                self.page = metrics;
            }
        }
    }

    /// Replaces the column set (display order, widths, pins).
    pub fn set_columns(&mut self, columns: impl IntoIterator<Item = Column>) {
        self.columns = columns.into_iter().collect();
        self.refresh_offsets();
    }

    pub fn set_column_pin(&mut self, id: ColumnId, pin: ColumnPin) -> bool {
        let Some(column) = self.columns.iter_mut().find(|c| c.id == id) else {
            return false;
        };
        column.pin = pin;
        self.refresh_offsets();
        true
    }

    /// Pins (or unpins, with [`RowPin::None`]) the row identified by `key`.
    pub fn set_row_pin(&mut self, key: K, pin: RowPin) -> Result<(), GridError> {
        if !self.index_of.contains_key(&key) {
            return Err(GridError::UnknownRow);
        }
        if pin == RowPin::None {
            self.row_pins.remove(&key);
        } else {
            self.row_pins.insert(key, pin);
        }
        self.refresh_offsets();
        Ok(())
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) -> bool {
        self.options.selection_mode = mode;
        self.selection.set_mode(mode)
    }

    pub fn set_overscan(&mut self, overscan: usize) {
        self.options.overscan = overscan;
    }

    /// Applies a scroll offset from the host (clamped to the scrollable range).
    pub fn on_scroll(&mut self, offset: u64) {
        self.scroll_offset = self.clamp_scroll(offset);
        atrace!(offset, applied = self.scroll_offset, "on_scroll");
    }

    pub fn max_scroll_offset(&self) -> u64 {
        self.extents
            .total_size()
            .saturating_sub(self.viewport.height as u64)
    }

    fn clamp_scroll(&self, offset: u64) -> u64 {
        offset.min(self.max_scroll_offset())
    }

    /// The window for the current scroll position, or `None` for an empty collection.
    pub fn window_spec(&self) -> Option<WindowSpec> {
        let (start, end) = self
            .extents
            .visible_span(self.scroll_offset, self.viewport.height)?;
        Some(WindowSpec::new(
            start,
            end,
            self.options.overscan,
            self.keys.len(),
        ))
    }

    /// Rows to mount this frame: the overscanned window plus the anchor row, pinned rows, and
    /// the row being edited.
    pub fn mount_set(&self) -> Result<MountSet, GridError> {
        let Some(spec) = self.window_spec() else {
            return Ok(MountSet::default());
        };
        mount_indices_with(&spec, &self.forced_indexes())
    }

    fn forced_indexes(&self) -> Vec<usize> {
        let mut forced: Vec<usize> = self
            .row_pins
            .keys()
            .filter_map(|k| self.index_of.get(k).copied())
            .collect();
        if let Some(&index) = self
            .edit
            .active_cell()
            .and_then(|cell| self.index_of.get(&cell.row_key))
        {
            forced.push(index);
        }
        forced.sort_unstable();
        forced.dedup();
        forced
    }

    /// Scroll offset that brings `key`'s row into view. Applying it is up to the host.
    pub fn reveal_offset(&self, key: &K) -> Option<u64> {
        let index = self.index_of(key)?;
        self.extents
            .reveal_offset(index, self.scroll_offset, self.viewport.height)
    }

    /// Number of rows currently in view; the step for page up/down.
    pub fn page_rows(&self) -> usize {
        self.extents
            .visible_span(self.scroll_offset, self.viewport.height)
            .map_or(1, |(start, end)| end - start + 1)
    }

    pub fn offset_map(&self) -> &OffsetMap {
        self.sticky.map()
    }

    pub fn selection_snapshot(&self) -> SelectionSnapshot<K> {
        self.selection.snapshot()
    }

    fn refresh_offsets(&mut self) {
        let mut rows: Vec<Row> = self
            .row_pins
            .iter()
            .filter_map(|(k, &pin)| {
                let index = *self.index_of.get(k)?;
                let height = self.extents.height(index)?;
                Some(Row { index, height, pin })
            })
            .collect();
        rows.sort_unstable_by_key(|r| r.index);
        self.sticky.resolve(&self.columns, &rows, &self.page);
    }

    /// Plain click selects only `key` (toggles in single mode), Ctrl/Cmd-click toggles, and
    /// Shift-click extends from the range anchor in multi mode. Focus follows the click.
    pub fn pointer_click(&mut self, key: K, modifiers: Modifiers) -> bool {
        if !self.index_of.contains_key(&key) {
            awarn!("pointer click on a key outside the collection");
            return false;
        }
        let mode = self.selection.mode();
        if modifiers.shift && mode == SelectionMode::Multi {
            let anchor = self
                .selection
                .range_anchor()
                .or(self.selection.focused())
                .cloned()
                .unwrap_or_else(|| key.clone());
            self.selection.select_range(&anchor, &key, &self.keys);
        } else if modifiers.command() || mode == SelectionMode::Single {
            self.selection.toggle(key.clone());
        } else {
            self.selection.select_only(key.clone());
        }
        self.selection.set_focus(Some(key));
        true
    }

    /// Focus moved by means outside the grid's own key handling (tab, programmatic focus).
    pub fn focus_change(&mut self, key: Option<K>) -> bool {
        if key.as_ref().is_some_and(|k| !self.index_of.contains_key(k)) {
            return false;
        }
        self.selection.set_focus(key);
        true
    }

    fn move_focus_with(
        &mut self,
        modifiers: Modifiers,
        step: impl FnOnce(&mut SelectionModel<K>, &[K]) -> Option<K>,
    ) -> InputEffect<K, V> {
        let extend = modifiers.shift && self.selection.mode() == SelectionMode::Multi;
        let anchor = self
            .selection
            .range_anchor()
            .or(self.selection.focused())
            .cloned();
        let Some(next) = step(&mut self.selection, &self.keys) else {
            return InputEffect::Ignored;
        };
        if extend {
            let anchor = anchor.unwrap_or_else(|| next.clone());
            self.selection.select_range(&anchor, &next, &self.keys);
        }
        InputEffect::FocusMoved(next)
    }

    /// Opens `cell` for editing with its current value.
    pub fn start_edit(&mut self, cell: CellRef<K>, initial_value: V) -> Result<(), GridError> {
        if !self.index_of.contains_key(&cell.row_key) {
            return Err(GridError::UnknownRow);
        }
        self.edit.start(cell, initial_value)
    }

    pub fn set_pending_value(&mut self, value: V) -> Result<(), GridError> {
        self.edit.set_pending_value(value)
    }

    /// Reports the persister's outcome for an in-flight commit.
    pub fn resolve_commit(
        &mut self,
        ticket: CommitTicket,
        outcome: Result<(), CommitRejected>,
    ) -> Result<CommitResolution<K>, GridError> {
        let resolution = self.edit.resolve_commit(ticket, outcome)?;
        if let CommitResolution::Committed(cell) = &resolution {
            self.return_focus(cell);
        }
        Ok(resolution)
    }

    /// Commits synchronously through `persist`.
    pub fn commit_with(
        &mut self,
        persist: impl FnOnce(&CellRef<K>, &V) -> Result<(), CommitRejected>,
    ) -> Result<CommitResolution<K>, GridError> {
        let resolution = self.edit.commit_with(persist)?;
        if let CommitResolution::Committed(cell) = &resolution {
            self.return_focus(cell);
        }
        Ok(resolution)
    }

    /// Cancels the open edit and returns focus to its row. No-op while a commit is in flight.
    pub fn cancel_edit(&mut self) -> Option<CellRef<K>> {
        let cell = self.edit.cancel()?;
        self.return_focus(&cell);
        Some(cell)
    }

    fn return_focus(&mut self, cell: &CellRef<K>) {
        if self.index_of.contains_key(&cell.row_key) {
            self.selection.set_focus(Some(cell.row_key.clone()));
        }
    }
}

impl<K: GridKey, V: Clone> GridCoordinator<K, V> {
    /// Dispatches one input event.
    pub fn on_input(&mut self, event: InputEvent<K>) -> InputEffect<K, V> {
        match event {
            InputEvent::PointerClick { key, modifiers } => {
                if self.pointer_click(key, modifiers) {
                    InputEffect::Handled
                } else {
                    InputEffect::Ignored
                }
            }
            InputEvent::KeyPress { code, modifiers } => self.key_press(code, modifiers),
            InputEvent::FocusChange(key) => {
                if self.focus_change(key) {
                    InputEffect::Handled
                } else {
                    InputEffect::Ignored
                }
            }
        }
    }

    /// Keyboard handling. While an edit is open only Enter (commit) and Escape (cancel) are
    /// interpreted; every other key belongs to the cell editor.
    pub fn key_press(&mut self, code: KeyCode, modifiers: Modifiers) -> InputEffect<K, V> {
        if self.edit.is_open() {
            return match code {
                KeyCode::Enter => match self.begin_commit() {
                    Ok(pending) => InputEffect::Commit(pending),
                    Err(_) => InputEffect::Ignored,
                },
                KeyCode::Escape => match self.cancel_edit() {
                    Some(cell) => InputEffect::EditCancelled(cell),
                    None => InputEffect::Ignored,
                },
                _ => InputEffect::Ignored,
            };
        }

        match code {
            KeyCode::ArrowDown => self.move_focus_with(modifiers, |s, keys| {
                s.move_focus(FocusMove::Next, keys).cloned()
            }),
            KeyCode::ArrowUp => self.move_focus_with(modifiers, |s, keys| {
                s.move_focus(FocusMove::Previous, keys).cloned()
            }),
            KeyCode::Home => self.move_focus_with(modifiers, |s, keys| {
                s.move_focus(FocusMove::First, keys).cloned()
            }),
            KeyCode::End => self.move_focus_with(modifiers, |s, keys| {
                s.move_focus(FocusMove::Last, keys).cloned()
            }),
            KeyCode::PageDown => {
                let step = self.page_rows() as isize;
                self.move_focus_with(modifiers, |s, keys| s.move_focus_by(step, keys).cloned())
            }
            KeyCode::PageUp => {
                let step = self.page_rows() as isize;
                self.move_focus_with(modifiers, |s, keys| s.move_focus_by(-step, keys).cloned())
            }
            KeyCode::Space => {
                let Some(key) = self.selection.focused().cloned() else {
                    return InputEffect::Ignored;
                };
                if self.selection.toggle(key) {
                    InputEffect::Handled
                } else {
                    InputEffect::Ignored
                }
            }
            KeyCode::Enter => match self.selection.focused() {
                Some(key) => InputEffect::EditRequested(key.clone()),
                None => InputEffect::Ignored,
            },
            KeyCode::Escape => {
                if self.selection.clear() {
                    InputEffect::Handled
                } else {
                    InputEffect::Ignored
                }
            }
            KeyCode::Char(c) if modifiers.command() && c.eq_ignore_ascii_case(&'a') => {
                if self.selection.select_all(&self.keys) {
                    InputEffect::Handled
                } else {
                    InputEffect::Ignored
                }
            }
            KeyCode::Char(_) => InputEffect::Ignored,
        }
    }

    /// Moves the open edit to `Committing` and returns the value for the persister.
    pub fn begin_commit(&mut self) -> Result<PendingCommit<K, V>, GridError> {
        self.edit.begin_commit()
    }

    pub fn edit_snapshot(&self) -> EditSnapshot<K, V> {
        self.edit.snapshot()
    }

    pub fn snapshot(&self) -> Result<GridSnapshot<K, V>, GridError> {
        Ok(GridSnapshot {
            mount: self.mount_set()?,
            offsets: self.offset_map().clone(),
            selection: self.selection_snapshot(),
            edit: self.edit_snapshot(),
        })
    }
}
