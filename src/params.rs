//! Parameters for the thinning pass.

/// Default defensive cap on outer iterations.
///
/// Each outer cycle peels at most one voxel layer per direction, so real
/// volumes converge in roughly half their largest dimension; the default
/// leaves orders of magnitude of headroom and only exists as a safety net
/// against an undetected invariant violation.
pub const DEFAULT_MAX_ITERATIONS: usize = 4096;

/// Parameters for a thinning pass.
///
/// The algorithm itself is parameter-free; the only knob is the defensive
/// iteration cap. Exceeding the cap logs a warning and returns a report
/// with `converged == false` instead of erroring.
///
/// # Example
///
/// ```
/// use voxel_skeleton::ThinningParams;
///
/// let params = ThinningParams::default();
/// assert_eq!(params.max_iterations, 4096);
///
/// let tight = ThinningParams::default().max_iterations(16);
/// assert_eq!(tight.max_iterations, 16);
/// ```
#[derive(Debug, Clone)]
pub struct ThinningParams {
    /// Maximum number of outer iterations (full six-direction cycles)
    /// before the pass gives up and reports non-convergence.
    pub max_iterations: usize,
}

impl Default for ThinningParams {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl ThinningParams {
    /// Set the defensive iteration cap.
    #[must_use]
    pub const fn max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}
