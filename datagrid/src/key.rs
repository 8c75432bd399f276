#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

/// Set of row keys. Hash-based with `std`, ordered otherwise.
#[cfg(feature = "std")]
pub type KeySet<K> = HashSet<K>;
#[cfg(not(feature = "std"))]
pub type KeySet<K> = BTreeSet<K>;

/// Map keyed by row key. Hash-based with `std`, ordered otherwise.
#[cfg(feature = "std")]
pub type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound for stable row identities.
///
/// Blanket-implemented; the required traits depend on whether `std` is enabled.
#[cfg(feature = "std")]
pub trait GridKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> GridKey for K {}

#[cfg(not(feature = "std"))]
pub trait GridKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> GridKey for K {}
