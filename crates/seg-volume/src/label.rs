//! Label element types and strongly-typed label maps.
//!
//! Volumes carry their labels either as unsigned integers (`u32`) or as
//! floating-point label-as-number values (`f32`). The set is closed: the
//! [`LabelValue`] trait is sealed, so unsupported element types are
//! rejected at compile time rather than at the call boundary.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

mod sealed {
    pub trait Sealed {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
}

/// A volume element type: background sentinel `0`, or a segment label.
///
/// Implemented for `u32` and `f32` only. The trait projects each value
/// onto a hashable [`LabelValue::Key`] so that floating-point labels can
/// key maps without requiring `Eq` on the element type itself.
pub trait LabelValue:
    Copy + PartialEq + fmt::Debug + fmt::Display + sealed::Sealed + 'static
{
    /// Hashable, totally-ordered projection of the label's bit pattern.
    type Key: Copy + Eq + Ord + Hash + fmt::Debug;

    /// The background sentinel (`0`).
    const BACKGROUND: Self;

    /// Projects the value onto its map key.
    fn key(self) -> Self::Key;

    /// Mints the label carrying the given id (used when assigning fresh
    /// labels, e.g. while splitting segments by overlap).
    fn from_id(id: u32) -> Self;

    /// Whether the value is the background sentinel.
    fn is_background(self) -> bool {
        self == Self::BACKGROUND
    }
}

impl LabelValue for u32 {
    type Key = u32;

    const BACKGROUND: Self = 0;

    fn key(self) -> u32 {
        self
    }

    fn from_id(id: u32) -> Self {
        id
    }
}

impl LabelValue for f32 {
    type Key = u32;

    const BACKGROUND: Self = 0.0;

    // Exact comparison: 0.0 is the background sentinel, not a computed value.
    #[allow(clippy::float_cmp)]
    fn key(self) -> u32 {
        // Collapse +0.0 and -0.0 onto one key; they compare equal and
        // both mean background.
        if self == 0.0 { 0 } else { self.to_bits() }
    }

    #[allow(clippy::cast_precision_loss)]
    fn from_id(id: u32) -> Self {
        id as f32
    }
}

/// A strongly-typed map from labels to values.
///
/// Backed by a hash map over the label's key projection, so it works for
/// both integer and floating-point label types. Membership is explicit:
/// lookups return `Option`, and nothing is inserted on a miss.
///
/// # Example
///
/// ```
/// use seg_volume::LabelMap;
///
/// let mut sizes: LabelMap<u32, u64> = LabelMap::new();
/// sizes.insert(7, 120);
///
/// assert_eq!(sizes.get(7), Some(&120));
/// assert_eq!(sizes.get(8), None);
/// assert!(sizes.contains(7));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LabelMap<L: LabelValue, V> {
    entries: HashMap<L::Key, (L, V)>,
}

/// A flat relabeling: label to replacement label.
pub type RelabelMap<L> = LabelMap<L, L>;

/// A paired relabeling: primary label to a map from secondary label to
/// replacement label.
pub type PairedRelabelMap<L> = LabelMap<L, RelabelMap<L>>;

impl<L: LabelValue, V> LabelMap<L, V> {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a value for a label, returning the previous value if the
    /// label was already present.
    pub fn insert(&mut self, label: L, value: V) -> Option<V> {
        self.entries
            .insert(label.key(), (label, value))
            .map(|(_, old)| old)
    }

    /// Returns the value for a label, if present.
    #[must_use]
    pub fn get(&self, label: L) -> Option<&V> {
        self.entries.get(&label.key()).map(|(_, v)| v)
    }

    /// Returns the value for a label mutably, if present.
    pub fn get_mut(&mut self, label: L) -> Option<&mut V> {
        self.entries.get_mut(&label.key()).map(|(_, v)| v)
    }

    /// Returns the value for a label, inserting `make()` first if absent.
    pub fn get_or_insert_with(&mut self, label: L, make: impl FnOnce() -> V) -> &mut V {
        &mut self
            .entries
            .entry(label.key())
            .or_insert_with(|| (label, make()))
            .1
    }

    /// Checks whether a label is present.
    #[must_use]
    pub fn contains(&self, label: L) -> bool {
        self.entries.contains_key(&label.key())
    }

    /// Removes a label's entry, returning its value if it was present.
    pub fn remove(&mut self, label: L) -> Option<V> {
        self.entries.remove(&label.key()).map(|(_, v)| v)
    }

    /// Iterates over `(label, value)` entries in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (L, &V)> {
        self.entries.values().map(|(label, v)| (*label, v))
    }

    /// Iterates over the labels in unspecified order.
    pub fn labels(&self) -> impl Iterator<Item = L> + '_ {
        self.entries.values().map(|(label, _)| *label)
    }
}

impl<L: LabelValue, V> Default for LabelMap<L, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<L: LabelValue, V> FromIterator<(L, V)> for LabelMap<L, V> {
    fn from_iter<I: IntoIterator<Item = (L, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (label, value) in iter {
            map.insert(label, value);
        }
        map
    }
}
