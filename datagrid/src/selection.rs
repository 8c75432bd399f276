use crate::key::{GridKey, KeySet};
use crate::{FocusMove, SelectionMode};

/// Read-only view of the selection for the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionSnapshot<K: GridKey> {
    pub mode: SelectionMode,
    pub selected_keys: KeySet<K>,
    pub last_focused_key: Option<K>,
}

/// Tracks selected row keys and the roving focus.
///
/// Focus and selection are independent: moving focus never changes what is selected, and the
/// focused key does not have to be selected. Mutators return `true` when the selected set changed.
///
/// With [`SelectionMode::None`] every selection mutator is a no-op; focus still moves.
#[derive(Clone, Debug)]
pub struct SelectionModel<K: GridKey> {
    mode: SelectionMode,
    selected: KeySet<K>,
    focused: Option<K>,
    anchor: Option<K>,
}

impl<K: GridKey> Default for SelectionModel<K> {
    fn default() -> Self {
        Self::new(SelectionMode::None)
    }
}

impl<K: GridKey> SelectionModel<K> {
    pub fn new(mode: SelectionMode) -> Self {
        Self {
            mode,
            selected: KeySet::new(),
            focused: None,
            anchor: None,
        }
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Switches mode. Going to `Single` keeps only the range anchor (if it was selected); going
    /// to `None` clears the selection.
    pub fn set_mode(&mut self, mode: SelectionMode) -> bool {
        if self.mode == mode {
            return false;
        }
        self.mode = mode;
        match mode {
            SelectionMode::Multi => false,
            SelectionMode::None => self.clear(),
            SelectionMode::Single => {
                if self.selected.len() <= 1 {
                    return false;
                }
                let keep = self.anchor.clone().filter(|a| self.selected.contains(a));
                self.selected.clear();
                if let Some(k) = keep {
                    self.selected.insert(k);
                }
                true
            }
        }
    }

    pub fn selected(&self) -> &KeySet<K> {
        &self.selected
    }

    pub fn is_selected(&self, key: &K) -> bool {
        self.selected.contains(key)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn focused(&self) -> Option<&K> {
        self.focused.as_ref()
    }

    /// The key shift-extension starts from: the last toggled or range-anchored key.
    pub fn range_anchor(&self) -> Option<&K> {
        self.anchor.as_ref()
    }

    /// Single: selects `key`, or clears when `key` is the current selection.
    /// Multi: flips membership of `key`.
    pub fn toggle(&mut self, key: K) -> bool {
        match self.mode {
            SelectionMode::None => false,
            SelectionMode::Single => {
                self.anchor = Some(key.clone());
                if self.selected.contains(&key) {
                    self.selected.clear();
                } else {
                    self.selected.clear();
                    self.selected.insert(key);
                }
                true
            }
            SelectionMode::Multi => {
                self.anchor = Some(key.clone());
                if !self.selected.remove(&key) {
                    self.selected.insert(key);
                }
                true
            }
        }
    }

    /// Replaces the selection with exactly `key`.
    pub fn select_only(&mut self, key: K) -> bool {
        if self.mode == SelectionMode::None {
            return false;
        }
        self.anchor = Some(key.clone());
        if self.selected.len() == 1 && self.selected.contains(&key) {
            return false;
        }
        self.selected.clear();
        self.selected.insert(key);
        true
    }

    /// Adds every key between `anchor` and `target` (inclusive, in `ordered_keys` order) to the
    /// selection. Keys outside the span keep their state. Multi mode only.
    pub fn select_range(&mut self, anchor: &K, target: &K, ordered_keys: &[K]) -> bool {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        let from = ordered_keys.iter().position(|k| k == anchor);
        let to = ordered_keys.iter().position(|k| k == target);
        let (Some(from), Some(to)) = (from, to) else {
            gwarn!("select_range: anchor or target is not in the ordered keys");
            return false;
        };
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };

        self.anchor = Some(anchor.clone());
        let mut changed = false;
        for key in &ordered_keys[lo..=hi] {
            changed |= self.selected.insert(key.clone());
        }
        changed
    }

    /// Selects every key in `ordered_keys`. Multi mode only.
    pub fn select_all(&mut self, ordered_keys: &[K]) -> bool {
        if self.mode != SelectionMode::Multi {
            return false;
        }
        let mut changed = false;
        for key in ordered_keys {
            changed |= self.selected.insert(key.clone());
        }
        changed
    }

    /// Empties the selection. The focused key is kept.
    pub fn clear(&mut self) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        self.selected.clear();
        true
    }

    /// Drops selected keys for which `keep` returns `false`, along with a stale focus or anchor.
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) -> bool {
        let before = self.selected.len();
        self.selected.retain(|k| keep(k));
        if self.focused.as_ref().is_some_and(|k| !keep(k)) {
            self.focused = None;
        }
        if self.anchor.as_ref().is_some_and(|k| !keep(k)) {
            self.anchor = None;
        }
        self.selected.len() != before
    }

    /// Drops the selection, focus, and range anchor.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.focused = None;
        self.anchor = None;
    }

    pub fn set_focus(&mut self, key: Option<K>) {
        self.focused = key;
    }

    /// Moves the roving focus. Returns the newly focused key.
    ///
    /// Without a current focus (or with one that is not in `ordered_keys`), `Next`/`First` land
    /// on the first key and `Previous`/`Last` on the last. Movement stops at either end.
    pub fn move_focus(&mut self, direction: FocusMove, ordered_keys: &[K]) -> Option<&K> {
        let last = ordered_keys.len().checked_sub(1)?;
        let current = self.focus_position(ordered_keys);
        let next = match (direction, current) {
            (FocusMove::First, _) | (FocusMove::Next, None) => 0,
            (FocusMove::Last, _) | (FocusMove::Previous, None) => last,
            (FocusMove::Next, Some(p)) => (p + 1).min(last),
            (FocusMove::Previous, Some(p)) => p.saturating_sub(1),
        };
        self.focused = Some(ordered_keys[next].clone());
        self.focused.as_ref()
    }

    /// Moves the roving focus by `delta` positions, clamped to the ends (page up/down).
    pub fn move_focus_by(&mut self, delta: isize, ordered_keys: &[K]) -> Option<&K> {
        let last = ordered_keys.len().checked_sub(1)?;
        let next = match self.focus_position(ordered_keys) {
            Some(p) => p.saturating_add_signed(delta).min(last),
            None if delta >= 0 => 0,
            None => last,
        };
        self.focused = Some(ordered_keys[next].clone());
        self.focused.as_ref()
    }

    pub fn snapshot(&self) -> SelectionSnapshot<K> {
        SelectionSnapshot {
            mode: self.mode,
            selected_keys: self.selected.clone(),
            last_focused_key: self.focused.clone(),
        }
    }

    fn focus_position(&self, ordered_keys: &[K]) -> Option<usize> {
        let focused = self.focused.as_ref()?;
        ordered_keys.iter().position(|k| k == focused)
    }
}
