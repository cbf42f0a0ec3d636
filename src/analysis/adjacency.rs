//! Adjacency maps from tile types to their observed orthogonal neighbors
//!
//! Every combination of maps is a per-key set union. That keeps merging
//! associative and commutative, so partial maps can be folded in any order.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::spatial::TileTypeId;

/// Set of tile types observed next to a given tile type
pub type NeighborSet = HashSet<TileTypeId>;

/// Mapping from tile type to every tile type seen orthogonally adjacent to it
///
/// Adjacency is directional: `b` appears under `a` only when a cell of type `a`
/// was observed with an occupied neighbor of type `b`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyMap {
    entries: HashMap<TileTypeId, NeighborSet>,
}

impl AdjacencyMap {
    /// Create an empty map
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct tile types
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tile type has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Neighbors recorded for `tile_type`
    pub fn get(&self, tile_type: &TileTypeId) -> Option<&NeighborSet> {
        self.entries.get(tile_type)
    }

    /// Whether `tile_type` has an entry (possibly with no neighbors)
    pub fn contains(&self, tile_type: &TileTypeId) -> bool {
        self.entries.contains_key(tile_type)
    }

    /// Whether `neighbor` was observed next to `tile_type`
    pub fn allows(&self, tile_type: &TileTypeId, neighbor: &TileTypeId) -> bool {
        self.entries
            .get(tile_type)
            .is_some_and(|neighbors| neighbors.contains(neighbor))
    }

    /// Union `neighbors` into the entry for `tile_type`, creating it if absent
    pub fn union_entry<I>(&mut self, tile_type: TileTypeId, neighbors: I)
    where
        I: IntoIterator<Item = TileTypeId>,
    {
        self.entries.entry(tile_type).or_default().extend(neighbors);
    }

    /// Fold another map into this one, entry by entry
    pub fn absorb(&mut self, other: Self) {
        for (tile_type, neighbors) in other.entries {
            match self.entries.get_mut(&tile_type) {
                Some(existing) => existing.extend(neighbors),
                None => {
                    self.entries.insert(tile_type, neighbors);
                }
            }
        }
    }

    /// Iterate over `(tile type, neighbors)` entries in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&TileTypeId, &NeighborSet)> {
        self.entries.iter()
    }

    /// Consume the map into its `(tile type, neighbors)` entries
    pub fn into_entries(self) -> impl Iterator<Item = (TileTypeId, NeighborSet)> {
        self.entries.into_iter()
    }

    /// All tile types in ascending order
    pub fn tile_types(&self) -> Vec<TileTypeId> {
        let mut tile_types: Vec<TileTypeId> = self.entries.keys().copied().collect();
        tile_types.sort_unstable();
        tile_types
    }

    /// Entries with keys and neighbors both in ascending order
    pub fn sorted_entries(&self) -> Vec<(TileTypeId, Vec<TileTypeId>)> {
        self.tile_types()
            .into_iter()
            .map(|tile_type| {
                let mut neighbors: Vec<TileTypeId> = self
                    .entries
                    .get(&tile_type)
                    .map(|set| set.iter().copied().collect())
                    .unwrap_or_default();
                neighbors.sort_unstable();
                (tile_type, neighbors)
            })
            .collect()
    }

    /// Total number of directed `(tile type, neighbor)` relations
    pub fn relation_count(&self) -> usize {
        self.entries.values().map(HashSet::len).sum()
    }

    /// Tile types whose entries differ between `self` and `other`, ascending
    ///
    /// A key present in only one map counts as differing.
    pub fn divergence(&self, other: &Self) -> Vec<TileTypeId> {
        let mut differing: Vec<TileTypeId> = self
            .entries
            .keys()
            .chain(other.entries.keys())
            .filter(|&tile_type| self.entries.get(tile_type) != other.entries.get(tile_type))
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        differing.sort_unstable();
        differing
    }
}

/// Groups entries by tile type and reduces every group by set union
///
/// Repeated keys never replace earlier ones, so entries from any number of
/// partial maps can be collected directly into the merged result.
impl FromIterator<(TileTypeId, NeighborSet)> for AdjacencyMap {
    fn from_iter<I: IntoIterator<Item = (TileTypeId, NeighborSet)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl Extend<(TileTypeId, NeighborSet)> for AdjacencyMap {
    fn extend<I: IntoIterator<Item = (TileTypeId, NeighborSet)>>(&mut self, iter: I) {
        for (tile_type, neighbors) in iter {
            self.union_entry(tile_type, neighbors);
        }
    }
}

impl fmt::Display for AdjacencyMap {
    /// One line per tile type: `(x, y): (a, b) (c, d)`, sorted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (tile_type, neighbors) in self.sorted_entries() {
            write!(f, "{tile_type}:")?;
            for neighbor in neighbors {
                write!(f, " {neighbor}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
