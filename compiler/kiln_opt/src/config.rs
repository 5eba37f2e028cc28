//! Optimizer configuration.

use kiln_ir::LanguageVersion;

/// Knobs for one optimizer run.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct OptimizerConfig {
    /// Target language version; every version-conditional rule reads it.
    pub version: LanguageVersion,
    /// Eager ranges longer than this are lowered to lazy ones when they are
    /// only iterated.
    pub iteration_lowering_threshold: u64,
    /// Upper bound on optimizer passes before giving up on a fixpoint.
    pub max_passes: usize,
}

impl OptimizerConfig {
    pub const DEFAULT_ITERATION_LOWERING_THRESHOLD: u64 = 256;
    pub const DEFAULT_MAX_PASSES: usize = 8;

    pub fn new(version: LanguageVersion) -> Self {
        OptimizerConfig {
            version,
            iteration_lowering_threshold: Self::DEFAULT_ITERATION_LOWERING_THRESHOLD,
            max_passes: Self::DEFAULT_MAX_PASSES,
        }
    }

    #[must_use]
    pub fn with_iteration_lowering_threshold(mut self, threshold: u64) -> Self {
        self.iteration_lowering_threshold = threshold;
        self
    }

    #[must_use]
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes;
        self
    }
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self::new(LanguageVersion::default())
    }
}
