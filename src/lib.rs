//! Topology-preserving 3D thinning (skeletonization) of binary voxel
//! volumes.
//!
//! This crate implements the 3-D medial-axis thinning method of Lee, Kashyap
//! and Chu, "Building skeleton models via 3-D medial surface/axis thinning
//! algorithms" (CVGIP, 1994): border voxels are iteratively peeled from six
//! face directions until only a one-voxel-wide skeleton remains, while the
//! skeleton keeps the connectivity (connected components and cavities) of
//! the original shape.
//!
//! # Algorithm
//!
//! Each outer iteration visits the six border directions in a fixed order.
//! For every direction, the whole volume is scanned read-only against a
//! frozen view to select deletion candidates: foreground border voxels that
//! are not arc end points, whose removal keeps the local Euler
//! characteristic unchanged (a 256-entry octant lookup table), and whose
//! 26-neighborhood foreground stays in one connected piece. Candidates are
//! then deleted strictly sequentially, each re-validated against the grid
//! as already mutated by the deletions before it; this sequential re-check
//! is what keeps two individually deletable neighbors from being deleted
//! jointly and disconnecting the skeleton. The pass converges when a full
//! cycle over all six directions deletes nothing.
//!
//! The candidate scan is embarrassingly parallel and runs across slices
//! with rayon; the deletion phase is inherently ordered and sequential.
//!
//! # Example
//!
//! ```
//! use voxel_skeleton::{VoxelGrid, ThinningParams, skeletonize};
//!
//! // A solid 3x3x3 block embedded in background.
//! let mut grid = VoxelGrid::new(5, 5, 5)?;
//! for z in 1..4 {
//!     for y in 1..4 {
//!         for x in 1..4 {
//!             grid.set(x, y, z, 1);
//!         }
//!     }
//! }
//!
//! let report = skeletonize(&mut grid, &ThinningParams::default());
//!
//! assert!(report.converged);
//! assert_eq!(report.foreground_before, 27);
//! assert_eq!(report.foreground_after, 3); // a thin axial segment remains
//! # Ok::<(), voxel_skeleton::SkeletonError>(())
//! ```
//!
//! Hosts that keep volumes as flat buffers can use the in-place adapter:
//!
//! ```
//! use voxel_skeleton::{ThinningParams, skeletonize_buffer};
//!
//! let mut data = vec![1u8; 9]; // 3x3 square, single slice
//! skeletonize_buffer(&mut data, 3, 3, 1, &ThinningParams::default())?;
//! # Ok::<(), voxel_skeleton::SkeletonError>(())
//! ```
//!
//! # Input contract
//!
//! Volumes are dense rasters (`x + y * width + z * width * height`) of
//! arbitrary scalars; any nonzero value is treated as foreground. The
//! output is the same volume with values restricted to {0, 1}, where 1
//! marks a surviving skeleton voxel. Any rescaling to a display range is
//! the caller's concern, as are loading, saving and visualization.
//!
//! # Use Cases
//!
//! - **Centerline extraction**: vessels, airways, root systems, pore
//!   networks in volumetric scans
//! - **Shape analysis**: topology-faithful skeletons for branch counting
//!   and morphometry
//! - **Preprocessing**: reducing segmented volumes to graph-like structures

// Safety: Deny unwrap/expect in library code. Tests may use them.
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod classify;
mod error;
mod euler;
mod grid;
mod params;
mod result;
mod simple;
mod tables;
mod thin;
mod voxel;

pub use classify::{Direction, is_border_point, is_end_point, is_surface_point};
pub use error::{SkeletonError, SkeletonResult};
pub use euler::is_euler_invariant;
pub use grid::{NEIGHBORHOOD_CENTER, VoxelGrid};
pub use params::{DEFAULT_MAX_ITERATIONS, ThinningParams};
pub use result::ThinningReport;
pub use simple::is_simple_point;
pub use thin::{ThinningProgress, skeletonize, skeletonize_buffer, skeletonize_with_progress};
pub use voxel::VoxelCoord;
