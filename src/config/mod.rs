//! Configuration for the CBR engine.

use std::fmt;

use crate::algorithm::cbr::profile::SimilarityProfile;

/// Default number of similar cases used for voting
pub const DEFAULT_TOP_K: usize = 10;

/// Default minimum number of reported symptoms before reasoning is attempted
pub const DEFAULT_MIN_SYMPTOM_THRESHOLD: usize = 3;

/// Default symptom count at or below which a positive verdict is disallowed
pub const DEFAULT_SCREENING_CEILING: usize = 4;

/// Default case-base size above which scoring runs in parallel
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 5000;

/// Tolerance used when checking that profile weights sum to 1.0
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Largest weight a single symptom or lab flag may carry
pub const MAX_FLAG_WEIGHT: f64 = 1.0;

/// Rules applied by the voting aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VotingPolicy {
    /// Queries with fewer reported symptoms get `DATA_INSUFFICIENT`
    pub min_symptom_threshold: usize,
    /// When set, queries with at most this many symptoms cannot be `DBD_POSITIF`
    pub screening_ceiling: Option<usize>,
}

impl Default for VotingPolicy {
    fn default() -> Self {
        Self {
            min_symptom_threshold: DEFAULT_MIN_SYMPTOM_THRESHOLD,
            screening_ceiling: Some(DEFAULT_SCREENING_CEILING),
        }
    }
}

/// Configuration for one CBR engine
#[derive(Debug, Clone)]
pub struct CbrConfig {
    /// Number of most similar cases used for voting
    pub top_k: usize,
    /// Voting rules
    pub voting: VotingPolicy,
    /// Explicit similarity profile; chosen from the case store when `None`
    pub profile: Option<SimilarityProfile>,
    /// Whether to score the case base in parallel
    pub use_parallel: bool,
    /// Minimum case-base size for parallel scoring
    pub parallel_threshold: usize,
}

impl Default for CbrConfig {
    fn default() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            voting: VotingPolicy::default(),
            profile: None,
            use_parallel: true,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl CbrConfig {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new builder for constructing a configuration
    #[must_use]
    pub fn builder() -> CbrConfigBuilder {
        CbrConfigBuilder::new()
    }
}

impl fmt::Display for CbrConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CBR Configuration:")?;
        writeln!(f, "  Top K: {}", self.top_k)?;
        writeln!(
            f,
            "  Minimum symptoms: {}",
            self.voting.min_symptom_threshold
        )?;
        match self.voting.screening_ceiling {
            Some(ceiling) => writeln!(f, "  Screening ceiling: {ceiling}")?,
            None => writeln!(f, "  Screening ceiling: disabled")?,
        }
        match &self.profile {
            Some(profile) => writeln!(f, "  Profile: {}", profile.name())?,
            None => writeln!(f, "  Profile: chosen from case store")?,
        }
        writeln!(
            f,
            "  Parallel scoring: {} (threshold {})",
            self.use_parallel, self.parallel_threshold
        )
    }
}

/// Builder for constructing a CBR configuration
#[derive(Debug, Clone, Default)]
pub struct CbrConfigBuilder {
    config: CbrConfig,
}

impl CbrConfigBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: CbrConfig::default(),
        }
    }

    /// Set the number of cases used for voting
    #[must_use]
    pub const fn top_k(mut self, k: usize) -> Self {
        self.config.top_k = k;
        self
    }

    /// Set the minimum symptom count
    #[must_use]
    pub const fn min_symptom_threshold(mut self, threshold: usize) -> Self {
        self.config.voting.min_symptom_threshold = threshold;
        self
    }

    /// Set or disable the screening ceiling
    #[must_use]
    pub const fn screening_ceiling(mut self, ceiling: Option<usize>) -> Self {
        self.config.voting.screening_ceiling = ceiling;
        self
    }

    /// Force a similarity profile instead of choosing one from the store
    #[must_use]
    pub fn profile(mut self, profile: SimilarityProfile) -> Self {
        self.config.profile = Some(profile);
        self
    }

    /// Set whether to use parallel scoring
    #[must_use]
    pub const fn use_parallel(mut self, parallel: bool) -> Self {
        self.config.use_parallel = parallel;
        self
    }

    /// Set the minimum case-base size for parallel scoring
    #[must_use]
    pub const fn parallel_threshold(mut self, threshold: usize) -> Self {
        self.config.parallel_threshold = threshold;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> CbrConfig {
        self.config
    }
}
