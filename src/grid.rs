//! Dense binary voxel grid.

use crate::error::{SkeletonError, SkeletonResult};

/// Index of the center cell in a sampled 27-cell neighborhood.
pub const NEIGHBORHOOD_CENTER: usize = 13;

/// A dense, exclusively-owned binary voxel volume.
///
/// Values are restricted to `0` (background) and `1` (foreground). The grid
/// is addressed by signed coordinates: reads outside the bounds resolve to
/// background and writes outside the bounds are ignored, so neighborhood
/// sampling near the boundary never needs special casing.
///
/// Storage is raster order: `x + y * width + z * width * height`, i.e. x
/// varies fastest, then y, then z (one slice per z index).
///
/// # Example
///
/// ```
/// use voxel_skeleton::VoxelGrid;
///
/// let mut grid = VoxelGrid::new(4, 4, 4)?;
/// grid.set(1, 2, 3, 1);
///
/// assert_eq!(grid.get(1, 2, 3), 1);
/// assert_eq!(grid.get(-1, 2, 3), 0); // out of bounds reads background
/// assert_eq!(grid.foreground_count(), 1);
/// # Ok::<(), voxel_skeleton::SkeletonError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxelGrid {
    width: usize,
    height: usize,
    depth: usize,
    data: Vec<u8>,
}

impl VoxelGrid {
    /// Creates a zero-filled (all background) grid.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::InvalidDimensions`] if any dimension is 0,
    /// or [`SkeletonError::GridTooLarge`] if the dimension product
    /// overflows addressing.
    pub fn new(width: usize, height: usize, depth: usize) -> SkeletonResult<Self> {
        let volume = Self::checked_volume(width, height, depth)?;
        Ok(Self {
            width,
            height,
            depth,
            data: vec![0; volume],
        })
    }

    /// Creates a grid from an externally supplied buffer, normalizing every
    /// nonzero value to 1.
    ///
    /// The buffer is expected in raster order (`x + y * width + z * width *
    /// height`). Callers never need to pre-binarize.
    ///
    /// # Errors
    ///
    /// Returns [`SkeletonError::InvalidDimensions`] or
    /// [`SkeletonError::GridTooLarge`] for malformed dimensions, and
    /// [`SkeletonError::DataSizeMismatch`] if the buffer length does not
    /// equal `width * height * depth`.
    ///
    /// # Example
    ///
    /// ```
    /// use voxel_skeleton::VoxelGrid;
    ///
    /// // arbitrary scalars: anything nonzero becomes foreground
    /// let grid = VoxelGrid::from_data(2, 2, 1, &[0, 255, 7, 0])?;
    /// assert_eq!(grid.as_slice(), &[0, 1, 1, 0]);
    /// # Ok::<(), voxel_skeleton::SkeletonError>(())
    /// ```
    pub fn from_data(
        width: usize,
        height: usize,
        depth: usize,
        data: &[u8],
    ) -> SkeletonResult<Self> {
        let volume = Self::checked_volume(width, height, depth)?;
        if data.len() != volume {
            return Err(SkeletonError::DataSizeMismatch {
                expected: volume,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            depth,
            data: data.iter().map(|&v| u8::from(v != 0)).collect(),
        })
    }

    fn checked_volume(width: usize, height: usize, depth: usize) -> SkeletonResult<usize> {
        if width == 0 || height == 0 || depth == 0 {
            return Err(SkeletonError::InvalidDimensions {
                width,
                height,
                depth,
            });
        }
        let too_large = || SkeletonError::GridTooLarge {
            width,
            height,
            depth,
        };
        // Coordinates travel as i32, so each axis must fit one.
        let max_axis = usize::try_from(i32::MAX).unwrap_or(usize::MAX);
        if width > max_axis || height > max_axis || depth > max_axis {
            return Err(too_large());
        }
        width
            .checked_mul(height)
            .and_then(|a| a.checked_mul(depth))
            .ok_or_else(too_large)
    }

    /// Returns the grid width (x axis).
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Returns the grid height (y axis).
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Returns the grid depth (z axis, number of slices).
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the total number of voxels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always `false`: a grid has at least one voxel by construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns `true` for a single-slice (flat, depth = 1) volume.
    #[must_use]
    pub const fn is_flat(&self) -> bool {
        self.depth == 1
    }

    /// Checks whether a coordinate lies inside the grid bounds.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // casts follow the non-negative checks
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && (x as usize) < self.width
            && y >= 0
            && (y as usize) < self.height
            && z >= 0
            && (z as usize) < self.depth
    }

    #[allow(clippy::cast_sign_loss)] // callers check bounds first
    fn index(&self, x: i32, y: i32, z: i32) -> usize {
        x as usize + (y as usize) * self.width + (z as usize) * self.width * self.height
    }

    /// Reads the voxel at a coordinate; out-of-bounds reads return 0.
    #[must_use]
    pub fn get(&self, x: i32, y: i32, z: i32) -> u8 {
        if self.contains(x, y, z) {
            self.data[self.index(x, y, z)]
        } else {
            0
        }
    }

    /// Checks whether the voxel at a coordinate is foreground.
    #[must_use]
    pub fn is_foreground(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z) == 1
    }

    /// Writes the voxel at a coordinate, storing any nonzero value as 1.
    ///
    /// Out-of-bounds writes are silently ignored; public entry points
    /// validate their inputs before reaching this layer.
    pub fn set(&mut self, x: i32, y: i32, z: i32, value: u8) {
        if self.contains(x, y, z) {
            let idx = self.index(x, y, z);
            self.data[idx] = u8::from(value != 0);
        }
    }

    /// Counts the foreground voxels.
    #[must_use]
    pub fn foreground_count(&self) -> usize {
        self.data.iter().filter(|&&v| v == 1).count()
    }

    /// Samples the 27-cell cube around a coordinate.
    ///
    /// Cells are in raster order (z-major, then y, then x); index
    /// [`NEIGHBORHOOD_CENTER`] (13) is the center voxel itself. Cells
    /// outside the grid read 0.
    #[must_use]
    pub fn neighborhood(&self, x: i32, y: i32, z: i32) -> [u8; 27] {
        let mut cube = [0u8; 27];
        let mut i = 0;
        for dz in -1..=1 {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    cube[i] = self.get(x + dx, y + dy, z + dz);
                    i += 1;
                }
            }
        }
        cube
    }

    /// Returns the underlying buffer in raster order.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consumes the grid, handing the {0,1} buffer back to the caller.
    #[must_use]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}
