//! Result types for the thinning pass.

/// Summary of a completed thinning pass.
///
/// # Example
///
/// ```
/// use voxel_skeleton::ThinningReport;
///
/// let report = ThinningReport::default();
/// assert_eq!(report.voxels_removed, 0);
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThinningReport {
    /// Number of outer iterations (full six-direction cycles) executed.
    pub iterations: usize,
    /// Total voxels deleted across all passes.
    pub voxels_removed: usize,
    /// Foreground voxel count before thinning (after normalization).
    pub foreground_before: usize,
    /// Foreground voxel count in the skeleton.
    pub foreground_after: usize,
    /// Whether the pass reached the converged state (a full cycle over all
    /// six border directions with zero deletions). `false` only when the
    /// defensive iteration cap cut the pass short.
    pub converged: bool,
}

impl ThinningReport {
    /// Percentage of the original foreground removed by thinning.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn reduction_percent(&self) -> f64 {
        if self.foreground_before == 0 {
            0.0
        } else {
            100.0 * (self.voxels_removed as f64) / (self.foreground_before as f64)
        }
    }
}

impl std::fmt::Display for ThinningReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Thinning:")?;
        writeln!(f, "  Iterations: {}", self.iterations)?;
        writeln!(
            f,
            "  Foreground: {} -> {}",
            self.foreground_before, self.foreground_after
        )?;
        writeln!(
            f,
            "  Removed: {} ({:.1}%)",
            self.voxels_removed,
            self.reduction_percent()
        )?;
        if !self.converged {
            writeln!(f, "  (iteration cap reached before convergence)")?;
        }
        Ok(())
    }
}
