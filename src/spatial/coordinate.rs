//! Integer grid coordinates used for cell positions and tile type identifiers

use std::fmt;

/// Integer pair addressing a grid cell or an atlas slot
///
/// Ordering is row-major on `(y, x)` so that sorted output reads like the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    /// Horizontal component (column)
    pub x: i32,
    /// Vertical component (row, growing downwards)
    pub y: i32,
}

/// Identifier of a tile type, expressed as its atlas coordinate
pub type TileTypeId = Coordinate;

impl Coordinate {
    /// Create a coordinate from its components
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by the given delta, or `None` if either axis leaves the `i32` range
    #[must_use]
    pub const fn checked_offset(self, dx: i32, dy: i32) -> Option<Self> {
        match (self.x.checked_add(dx), self.y.checked_add(dy)) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }

    /// The orthogonally adjacent coordinates in order up, down, left, right
    ///
    /// Occupancy is not considered; callers filter as needed. Neighbors past
    /// the `i32` range do not exist, so cells on the boundary have fewer than four.
    pub fn orthogonal_neighbors(self) -> Vec<Self> {
        [(0, -1), (0, 1), (-1, 0), (1, 0)]
            .into_iter()
            .filter_map(|(dx, dy)| self.checked_offset(dx, dy))
            .collect()
    }
}

impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
