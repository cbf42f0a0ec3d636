use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset over dense tile indices
///
/// Indices are 0-based positions in a [`ConstraintTable`](crate::analysis::constraints::ConstraintTable).
/// Out-of-range inserts are ignored and out-of-range lookups report absence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
}

impl TileBitset {
    /// Create a bitset with room for `capacity` tiles and none present
    pub fn new(capacity: usize) -> Self {
        Self {
            bits: bitvec![0; capacity],
        }
    }

    /// Number of tile indices this set can hold
    pub fn capacity(&self) -> usize {
        self.bits.len()
    }

    /// Insert a tile index
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Add every member of `other` to this set
    ///
    /// Both sets must share a capacity; extra bits in `other` are ignored.
    pub fn union_with(&mut self, other: &Self) {
        for index in other.bits.iter_ones() {
            self.insert(index);
        }
    }

    /// Create a new bitset containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = Self::new(self.capacity());
        for index in self.bits.iter_ones() {
            if other.contains(index) {
                result.insert(index);
            }
        }
        result
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Present tile indices in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    /// Renders one character per index, `1` for present and `0` for absent
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.bits.iter().by_vals() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}
