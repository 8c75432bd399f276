use alloc::vec::Vec;

use datagrid::{CellRef, ColumnId, PageMetrics, PendingCommit};

/// Measurement pushed by the geometry layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GeometryEvent {
    ContainerSize { width: u32, height: u32 },
    RowHeight { index: usize, height: u32 },
    ColumnWidth { id: ColumnId, width: u32 },
    PageMetrics(PageMetrics),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        ..Self::NONE
    };

    /// Ctrl on most platforms, Cmd on macOS.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyCode {
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    Space,
    Enter,
    Escape,
    Char(char),
}

/// User input delivered by the host, in arrival order.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InputEvent<K> {
    PointerClick { key: K, modifiers: Modifiers },
    KeyPress { code: KeyCode, modifiers: Modifiers },
    FocusChange(Option<K>),
}

/// What the host should do after an input event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEffect<K, V> {
    /// Nothing changed.
    Ignored,
    /// State changed; re-render from the snapshots.
    Handled,
    /// Roving focus landed on this key. Scrolling it into view is up to the host
    /// (see [`crate::GridCoordinator::reveal_offset`]).
    FocusMoved(K),
    /// The user asked to edit the focused row; the host picks the column and current value and
    /// calls [`crate::GridCoordinator::start_edit`].
    EditRequested(K),
    /// The edit moved to `Committing`; hand the value to the persister and report back through
    /// [`crate::GridCoordinator::resolve_commit`].
    Commit(PendingCommit<K, V>),
    /// The open edit was cancelled and focus returned to its row.
    EditCancelled(CellRef<K>),
}

/// Ordered row keys plus an identity token. A new token means the collection was replaced
/// wholesale.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CollectionSnapshot<K> {
    pub keys: Vec<K>,
    pub token: u64,
}

impl<K> CollectionSnapshot<K> {
    pub fn new(keys: impl IntoIterator<Item = K>, token: u64) -> Self {
        Self {
            keys: keys.into_iter().collect(),
            token,
        }
    }
}
