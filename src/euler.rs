//! Euler characteristic invariance test.

use crate::tables::{EULER_DELTA, Octant};

/// Checks whether removing the center voxel preserves the local Euler
/// characteristic (condition 1 in Lee et al. 1994).
///
/// Each of the eight octants contributes a tabulated delta for its 8-bit
/// configuration; the removal is invariant iff the deltas sum to exactly
/// zero. This certifies that no cavity or tunnel is created or destroyed
/// locally. It is necessary but not sufficient for safe removal; the
/// simple-point test covers connectivity.
#[must_use]
pub fn is_euler_invariant(neighborhood: &[u8; 27]) -> bool {
    let mut delta = 0i32;
    for octant in Octant::ALL {
        delta += i32::from(EULER_DELTA[octant.index(neighborhood)]);
    }
    delta == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::VoxelGrid;

    #[test]
    fn test_isolated_voxel_not_invariant() {
        // All octant configurations are 1; the deltas sum to 8. Deleting an
        // isolated voxel removes a component, which the test rejects.
        let mut cube = [0u8; 27];
        cube[13] = 1;
        assert!(!is_euler_invariant(&cube));
    }

    #[test]
    fn test_one_voxel_line_interior_not_invariant() {
        // Interior of a one-voxel-wide run: deleting it would split the arc.
        let mut grid = VoxelGrid::new(5, 3, 3).unwrap();
        for x in 0..5 {
            grid.set(x, 1, 1, 1);
        }
        assert!(!is_euler_invariant(&grid.neighborhood(2, 1, 1)));
    }

    #[test]
    fn test_face_voxel_of_solid_block_invariant() {
        // A voxel on the flat face of a solid block: peeling it leaves the
        // local Euler characteristic unchanged.
        let mut grid = VoxelGrid::new(5, 5, 5).unwrap();
        for z in 1..4 {
            for y in 1..4 {
                for x in 1..4 {
                    grid.set(x, y, z, 1);
                }
            }
        }
        // Center of the top face of the 3x3x3 block.
        assert!(is_euler_invariant(&grid.neighborhood(2, 2, 3)));
    }
}
