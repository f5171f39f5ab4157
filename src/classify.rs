//! Border, end-point and surface-point classification.

use std::fmt;

use crate::grid::{NEIGHBORHOOD_CENTER, VoxelGrid};
use crate::tables::{Octant, POINT_COUNT};

/// The six face directions used for border classification.
///
/// Listed in the order the scheduler visits them. North/South move along
/// the y axis, East/West along x, Up/Bottom along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Toward y − 1.
    North,
    /// Toward y + 1.
    South,
    /// Toward x + 1.
    East,
    /// Toward x − 1.
    West,
    /// Toward z + 1.
    Up,
    /// Toward z − 1.
    Bottom,
}

impl Direction {
    /// All six directions in scheduler scan order.
    pub const ALL: [Self; 6] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::Up,
        Self::Bottom,
    ];

    /// The unit offset of the 6-connected neighbor in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32, i32) {
        match self {
            Self::North => (0, -1, 0),
            Self::South => (0, 1, 0),
            Self::East => (1, 0, 0),
            Self::West => (-1, 0, 0),
            Self::Up => (0, 0, 1),
            Self::Bottom => (0, 0, -1),
        }
    }

    /// `true` for the two directions along the z axis.
    ///
    /// These are skipped entirely for single-slice volumes, where they can
    /// never expose a border.
    #[must_use]
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Bottom)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Bottom => "bottom",
        };
        write!(f, "{name}")
    }
}

/// Checks whether a foreground voxel is a border point for a direction:
/// its single 6-connected neighbor in that direction is background
/// (out-of-bounds neighbors count as background).
#[must_use]
pub fn is_border_point(grid: &VoxelGrid, x: i32, y: i32, z: i32, direction: Direction) -> bool {
    let (dx, dy, dz) = direction.offset();
    grid.get(x + dx, y + dy, z + dz) == 0
}

/// Checks whether a voxel is an end point: exactly one foreground voxel
/// among its 26 neighbors (center excluded). End points are never removed,
/// so arcs keep their tips.
///
/// An isolated voxel (zero foreground neighbors) is not an end point; it
/// survives thinning through the Euler-invariance test instead.
#[must_use]
pub fn is_end_point(grid: &VoxelGrid, x: i32, y: i32, z: i32) -> bool {
    let neighborhood = grid.neighborhood(x, y, z);
    let foreground = neighborhood
        .iter()
        .enumerate()
        .filter(|&(i, &v)| i != NEIGHBORHOOD_CENTER && v == 1)
        .count();
    foreground == 1
}

/// Octant configurations exempt from the surface population limit: the
/// four planar patterns of Lee's medial-surface criterion.
const SURFACE_PLANES: [usize; 4] = [240, 165, 170, 204];

/// Checks Lee's octant-based medial-surface criterion on a sampled
/// neighborhood: every octant configuration is either one of the four
/// planar patterns or contains at most two cells.
///
/// This classification query identifies degenerate, nearly-empty local
/// configurations (isolated points, arc voxels); it is carried alongside
/// the thinning tests for downstream analysis and is not part of the
/// deletion pipeline.
#[must_use]
pub fn is_surface_point(neighborhood: &[u8; 27]) -> bool {
    for octant in Octant::ALL {
        let n = octant.index(neighborhood);
        if !SURFACE_PLANES.contains(&n) && POINT_COUNT[n] > 2 {
            return false;
        }
    }
    true
}
