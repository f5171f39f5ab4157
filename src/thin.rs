//! The thinning scheduler: directional border peeling until convergence.

use rayon::prelude::*;
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::{debug, info, warn};

use crate::classify::{Direction, is_border_point, is_end_point};
use crate::error::SkeletonResult;
use crate::euler::is_euler_invariant;
use crate::grid::VoxelGrid;
use crate::params::ThinningParams;
use crate::result::ThinningReport;
use crate::simple::is_simple_point;
use crate::voxel::VoxelCoord;

/// Fire-and-forget progress snapshot emitted during each directional scan.
///
/// Slices complete in parallel, so `slices_scanned` is a completion count,
/// not a position. Observers can neither fail nor influence the result.
#[derive(Debug, Clone, Copy)]
pub struct ThinningProgress {
    /// Outer iteration number, starting at 1.
    pub iteration: usize,
    /// Border direction currently being scanned.
    pub direction: Direction,
    /// Number of slices finished in this scan.
    pub slices_scanned: usize,
    /// Total slices in the volume.
    pub total_slices: usize,
}

/// Thins a binary volume in place until only the skeleton remains.
///
/// Iteratively peels border voxels from the six face directions; a voxel is
/// deleted only when its removal provably preserves topology (it is not an
/// arc end point, it keeps the local Euler characteristic unchanged, and the
/// foreground of its 26-neighborhood stays in one connected piece). The pass
/// converges when a full cycle over all six directions deletes nothing.
///
/// # Example
///
/// ```
/// use voxel_skeleton::{VoxelGrid, ThinningParams, skeletonize};
///
/// // A solid 3x3x3 block embedded in background.
/// let mut grid = VoxelGrid::new(5, 5, 5)?;
/// for z in 1..4 {
///     for y in 1..4 {
///         for x in 1..4 {
///             grid.set(x, y, z, 1);
///         }
///     }
/// }
///
/// let report = skeletonize(&mut grid, &ThinningParams::default());
/// assert!(report.converged);
/// assert_eq!(report.foreground_after, grid.foreground_count());
/// # Ok::<(), voxel_skeleton::SkeletonError>(())
/// ```
pub fn skeletonize(grid: &mut VoxelGrid, params: &ThinningParams) -> ThinningReport {
    skeletonize_with_progress(grid, params, |_| {})
}

/// Like [`skeletonize`], additionally reporting per-slice scan progress to
/// an observer.
///
/// The observer runs on the scanning threads and must be `Sync`; it is
/// purely a side channel with no effect on ordering or results.
pub fn skeletonize_with_progress<F>(
    grid: &mut VoxelGrid,
    params: &ThinningParams,
    observer: F,
) -> ThinningReport
where
    F: Fn(ThinningProgress) + Sync,
{
    let foreground_before = grid.foreground_count();

    info!(
        width = grid.width(),
        height = grid.height(),
        depth = grid.depth(),
        foreground = foreground_before,
        "Starting thinning"
    );

    let mut voxels_removed = 0usize;
    let mut iterations = 0usize;

    // Loop until no change for all six border types.
    let mut unchanged_borders = 0;
    while unchanged_borders < 6 {
        if iterations >= params.max_iterations {
            warn!(
                iterations,
                max_iterations = params.max_iterations,
                "Iteration cap reached before convergence"
            );
            break;
        }
        iterations += 1;
        unchanged_borders = 0;

        for direction in Direction::ALL {
            debug!(iteration = iterations, direction = %direction, "Scanning border");

            // Parallel selection against the frozen grid: no voxel mutates
            // during the scan, so slice decisions are independent.
            let candidates = collect_candidates(grid, direction, iterations, &observer);

            // Sequential deletion in scan order. Each candidate is
            // re-validated against the grid as mutated by the deletions
            // before it; two individually deletable neighbors can become
            // jointly unsafe within the same pass.
            let mut changed = false;
            for coord in candidates {
                let neighborhood = grid.neighborhood(coord.x, coord.y, coord.z);
                if is_euler_invariant(&neighborhood) && is_simple_point(&neighborhood) {
                    grid.set(coord.x, coord.y, coord.z, 0);
                    voxels_removed += 1;
                    changed = true;
                }
            }

            if !changed {
                unchanged_borders += 1;
            }
        }
    }

    let converged = unchanged_borders == 6;
    let foreground_after = grid.foreground_count();

    info!(
        iterations,
        voxels_removed, foreground_after, converged, "Thinning complete"
    );

    ThinningReport {
        iterations,
        voxels_removed,
        foreground_before,
        foreground_after,
        converged,
    }
}

/// Thins a raw volume buffer in place.
///
/// Boundary adapter for hosts that keep volumes as flat arrays: the buffer
/// is interpreted in raster order (`x + y * width + z * width * height`),
/// normalized (any nonzero value becomes 1), thinned, and written back with
/// values restricted to {0, 1}.
///
/// # Errors
///
/// Returns [`crate::SkeletonError::InvalidDimensions`],
/// [`crate::SkeletonError::GridTooLarge`] or
/// [`crate::SkeletonError::DataSizeMismatch`] for malformed input; the
/// buffer is untouched on error.
///
/// # Example
///
/// ```
/// use voxel_skeleton::{ThinningParams, skeletonize_buffer};
///
/// // A 3x1x1 run of arbitrary nonzero scalars.
/// let mut data = vec![0u8, 200, 17, 5, 0];
/// let report = skeletonize_buffer(&mut data, 5, 1, 1, &ThinningParams::default())?;
///
/// assert!(report.converged);
/// assert_eq!(data, vec![0, 1, 1, 1, 0]); // normalized, line is a fixed point
/// # Ok::<(), voxel_skeleton::SkeletonError>(())
/// ```
pub fn skeletonize_buffer(
    data: &mut [u8],
    width: usize,
    height: usize,
    depth: usize,
    params: &ThinningParams,
) -> SkeletonResult<ThinningReport> {
    let mut grid = VoxelGrid::from_data(width, height, depth, data)?;
    let report = skeletonize(&mut grid, params);
    data.copy_from_slice(grid.as_slice());
    Ok(report)
}

/// Collects deletion candidates for one border direction against a frozen
/// view of the grid, in scan order (z-major, then y, then x).
#[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
fn collect_candidates<F>(
    grid: &VoxelGrid,
    direction: Direction,
    iteration: usize,
    observer: &F,
) -> Vec<VoxelCoord>
where
    F: Fn(ThinningProgress) + Sync,
{
    // Single-slice volumes have no up/bottom borders; skip those scans.
    if direction.is_vertical() && grid.is_flat() {
        return Vec::new();
    }

    let total_slices = grid.depth();
    let slices_done = AtomicUsize::new(0);

    let per_slice: Vec<Vec<VoxelCoord>> = (0..total_slices)
        .into_par_iter()
        .map(|z| {
            let z = z as i32;
            let mut slice_candidates = Vec::new();
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    if candidate(grid, x, y, z, direction) {
                        slice_candidates.push(VoxelCoord::new(x, y, z));
                    }
                }
            }

            let done = slices_done.fetch_add(1, Ordering::Relaxed) + 1;
            observer(ThinningProgress {
                iteration,
                direction,
                slices_scanned: done,
                total_slices,
            });

            slice_candidates
        })
        .collect();

    per_slice.into_iter().flatten().collect()
}

/// The full deletability test of the selection phase.
fn candidate(grid: &VoxelGrid, x: i32, y: i32, z: i32, direction: Direction) -> bool {
    if !grid.is_foreground(x, y, z) {
        return false;
    }
    if !is_border_point(grid, x, y, z, direction) {
        return false;
    }
    if is_end_point(grid, x, y, z) {
        return false;
    }
    let neighborhood = grid.neighborhood(x, y, z);
    is_euler_invariant(&neighborhood) && is_simple_point(&neighborhood)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn thin(grid: &mut VoxelGrid) -> ThinningReport {
        skeletonize(grid, &ThinningParams::default())
    }

    fn foreground_set(grid: &VoxelGrid) -> HashSet<(i32, i32, i32)> {
        let mut set = HashSet::new();
        for z in 0..grid.depth() as i32 {
            for y in 0..grid.height() as i32 {
                for x in 0..grid.width() as i32 {
                    if grid.is_foreground(x, y, z) {
                        set.insert((x, y, z));
                    }
                }
            }
        }
        set
    }

    fn solid_block(grid: &mut VoxelGrid, range: std::ops::Range<i32>) {
        for z in range.clone() {
            for y in range.clone() {
                for x in range.clone() {
                    grid.set(x, y, z, 1);
                }
            }
        }
    }

    #[test]
    fn test_empty_grid_converges_immediately() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
        let report = thin(&mut grid);
        assert!(report.converged);
        assert_eq!(report.iterations, 1);
        assert_eq!(report.voxels_removed, 0);
        assert_eq!(report.foreground_after, 0);
    }

    #[test]
    fn test_isolated_voxel_unchanged() {
        let mut grid = VoxelGrid::new(3, 3, 3).unwrap();
        grid.set(1, 1, 1, 1);
        let report = thin(&mut grid);
        assert!(report.converged);
        assert_eq!(report.voxels_removed, 0);
        assert!(grid.is_foreground(1, 1, 1));
    }

    #[test]
    fn test_two_isolated_voxels_unchanged() {
        let mut grid = VoxelGrid::new(5, 5, 5).unwrap();
        grid.set(1, 1, 1, 1);
        grid.set(3, 3, 3, 1);
        let report = thin(&mut grid);
        assert_eq!(report.foreground_after, 2);
        assert!(report.converged);
    }

    #[test]
    fn test_line_is_fixed_point() {
        let mut grid = VoxelGrid::new(7, 3, 3).unwrap();
        for x in 1..6 {
            grid.set(x, 1, 1, 1);
        }
        let before = foreground_set(&grid);
        let report = thin(&mut grid);
        assert!(report.converged);
        assert_eq!(report.voxels_removed, 0);
        assert_eq!(foreground_set(&grid), before);
    }

    #[test]
    fn test_solid_cube_reduces_to_axial_segment() {
        // A 3x3x3 block peels down to a 3-voxel run through its center:
        // the y faces go first, then the x columns, leaving the central
        // z-axis segment whose interior is protected by the Euler test and
        // whose tips are end points.
        let mut grid = VoxelGrid::new(5, 5, 5).unwrap();
        solid_block(&mut grid, 1..4);
        let report = thin(&mut grid);

        assert!(report.converged);
        assert_eq!(report.iterations, 2);
        assert_eq!(report.voxels_removed, 24);
        assert_eq!(report.foreground_before, 27);
        assert_eq!(
            foreground_set(&grid),
            HashSet::from([(2, 2, 1), (2, 2, 2), (2, 2, 3)])
        );
    }

    #[test]
    fn test_larger_cube_reduces_to_axial_segment() {
        let mut grid = VoxelGrid::new(7, 7, 7).unwrap();
        solid_block(&mut grid, 1..6);
        let report = thin(&mut grid);

        assert!(report.converged);
        assert_eq!(report.iterations, 3);
        assert_eq!(report.foreground_after, 3);
        assert_eq!(
            foreground_set(&grid),
            HashSet::from([(3, 3, 2), (3, 3, 3), (3, 3, 4)])
        );
    }

    #[test]
    fn test_small_block_keeps_one_voxel() {
        // A full 2x2x2 grid: the sequential Euler re-check stops the last
        // voxel from being deleted, so the component survives.
        let mut grid = VoxelGrid::new(2, 2, 2).unwrap();
        solid_block(&mut grid, 0..2);
        let report = thin(&mut grid);
        assert!(report.converged);
        assert_eq!(report.foreground_after, 1);
        assert_eq!(foreground_set(&grid), HashSet::from([(1, 1, 1)]));
    }

    #[test]
    fn test_flat_square_reduces_to_medial_segment() {
        // 5x5 square in a single-slice volume: thins to its middle row,
        // shortened by the end-point rule.
        let mut grid = VoxelGrid::new(7, 7, 1).unwrap();
        for y in 1..6 {
            for x in 1..6 {
                grid.set(x, y, 0, 1);
            }
        }
        let report = thin(&mut grid);
        assert!(report.converged);
        assert_eq!(
            foreground_set(&grid),
            HashSet::from([(2, 3, 0), (3, 3, 0), (4, 3, 0)])
        );
    }

    #[test]
    fn test_flat_rectangle_reduces_to_medial_curve() {
        let mut grid = VoxelGrid::new(11, 6, 1).unwrap();
        for y in 1..5 {
            for x in 1..10 {
                grid.set(x, y, 0, 1);
            }
        }
        let report = thin(&mut grid);
        assert!(report.converged);
        let expected: HashSet<_> = (2..9).map(|x| (x, 3, 0)).collect();
        assert_eq!(foreground_set(&grid), expected);
    }

    #[test]
    fn test_flat_volume_never_scans_vertical_directions() {
        let mut grid = VoxelGrid::new(7, 7, 1).unwrap();
        for y in 1..6 {
            for x in 1..6 {
                grid.set(x, y, 0, 1);
            }
        }
        let seen = Mutex::new(Vec::new());
        skeletonize_with_progress(&mut grid, &ThinningParams::default(), |progress| {
            seen.lock().unwrap().push(progress.direction);
        });
        let seen = seen.into_inner().unwrap();
        assert!(!seen.is_empty());
        assert!(seen.iter().all(|d| !d.is_vertical()));
    }

    #[test]
    fn test_progress_reports_all_slices() {
        let mut grid = VoxelGrid::new(4, 4, 4).unwrap();
        solid_block(&mut grid, 1..3);
        let max_seen = AtomicUsize::new(0);
        skeletonize_with_progress(&mut grid, &ThinningParams::default(), |progress| {
            assert_eq!(progress.total_slices, 4);
            max_seen.fetch_max(progress.slices_scanned, Ordering::Relaxed);
        });
        assert_eq!(max_seen.load(Ordering::Relaxed), 4);
    }

    #[test]
    fn test_hollow_shell_keeps_cavity() {
        // Foreground shell of a 5x5x5 block with a hollow interior. The
        // Euler test refuses to open the cavity, so the result stays a
        // closed surface around it rather than collapsing to a point.
        let mut grid = VoxelGrid::new(7, 7, 7).unwrap();
        for z in 1..6 {
            for y in 1..6 {
                for x in 1..6 {
                    if x == 1 || x == 5 || y == 1 || y == 5 || z == 1 || z == 5 {
                        grid.set(x, y, z, 1);
                    }
                }
            }
        }
        let report = thin(&mut grid);
        assert!(report.converged);
        assert!(report.foreground_after > 1);
        assert!(grid.get(3, 3, 3) == 0);
        assert!(!background_reachable_from_boundary(&grid, (3, 3, 3)));
    }

    /// 6-connected background flood fill from the volume boundary; returns
    /// whether it reaches the target cell.
    fn background_reachable_from_boundary(grid: &VoxelGrid, target: (i32, i32, i32)) -> bool {
        let (w, h, d) = (
            grid.width() as i32,
            grid.height() as i32,
            grid.depth() as i32,
        );
        let mut seen = HashSet::new();
        let mut stack = Vec::new();
        for z in 0..d {
            for y in 0..h {
                for x in 0..w {
                    let boundary = x == 0 || y == 0 || z == 0 || x == w - 1 || y == h - 1 || z == d - 1;
                    if boundary && grid.get(x, y, z) == 0 && seen.insert((x, y, z)) {
                        stack.push((x, y, z));
                    }
                }
            }
        }
        while let Some((x, y, z)) = stack.pop() {
            if (x, y, z) == target {
                return true;
            }
            for direction in Direction::ALL {
                let (dx, dy, dz) = direction.offset();
                let next = (x + dx, y + dy, z + dz);
                if grid.contains(next.0, next.1, next.2)
                    && grid.get(next.0, next.1, next.2) == 0
                    && seen.insert(next)
                {
                    stack.push(next);
                }
            }
        }
        false
    }

    #[test]
    fn test_idempotent_on_fixtures() {
        let mut shapes: Vec<VoxelGrid> = Vec::new();

        let mut cube = VoxelGrid::new(5, 5, 5).unwrap();
        solid_block(&mut cube, 1..4);
        shapes.push(cube);

        let mut square = VoxelGrid::new(7, 7, 1).unwrap();
        for y in 1..6 {
            for x in 1..6 {
                square.set(x, y, 0, 1);
            }
        }
        shapes.push(square);

        for mut grid in shapes {
            thin(&mut grid);
            let first = grid.clone();
            let report = thin(&mut grid);
            assert_eq!(report.voxels_removed, 0);
            assert_eq!(grid, first);
        }
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let mut grid = VoxelGrid::new(7, 7, 7).unwrap();
        solid_block(&mut grid, 1..6);
        // The 5x5x5 block needs 3 cycles; cap at 1.
        let report = skeletonize(&mut grid, &ThinningParams::default().max_iterations(1));
        assert!(!report.converged);
        assert_eq!(report.iterations, 1);
        assert!(report.voxels_removed > 0);
    }

    #[test]
    fn test_buffer_adapter_round_trip() {
        // 3x3x1 square of arbitrary scalars.
        let mut data = vec![9u8; 9];
        let report = skeletonize_buffer(&mut data, 3, 3, 1, &ThinningParams::default()).unwrap();
        assert!(report.converged);
        assert_eq!(report.foreground_before, 9);
        assert!(data.iter().all(|&v| v <= 1));
        assert_eq!(
            data.iter().filter(|&&v| v == 1).count(),
            report.foreground_after
        );
    }

    #[test]
    fn test_buffer_adapter_rejects_bad_input() {
        let mut data = vec![1u8; 8];
        assert!(skeletonize_buffer(&mut data, 3, 3, 1, &ThinningParams::default()).is_err());
        assert!(skeletonize_buffer(&mut data, 0, 8, 1, &ThinningParams::default()).is_err());
        // untouched on error
        assert_eq!(data, vec![1u8; 8]);
    }
}
