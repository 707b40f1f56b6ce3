//! Tuning knobs of the many pivot quicksort.
//!
//! The defaults are empirically tuned, they are not derived from anything. The process wide
//! config can be overridden through environment variables, which is how the benchmarks explore
//! other values without recompiling.

use std::env;
use std::str::FromStr;

use once_cell::sync::OnceCell;

pub const DEFAULT_SAMPLE_SIZE: usize = 127;
pub const DEFAULT_REBUILD_THRESHOLD: usize = 3;
pub const DEFAULT_ALGORITHM_THRESHOLD: usize = 10_000;

/// Largest accepted sample size. Keeps `sample_size * sample_size` well inside `usize` on 32-bit
/// targets.
pub const MAX_SAMPLE_SIZE: usize = 1 << 15;

pub const ENV_SAMPLE_SIZE: &str = "MULTISORT_PIVOT_SAMPLE_SIZE";
pub const ENV_REBUILD_THRESHOLD: &str = "MULTISORT_PIVOT_REBUILD_THRESHOLD";
pub const ENV_ALGORITHM_THRESHOLD: &str = "MULTISORT_ALGORITHM_THRESHOLD";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ManyPivotConfig {
    /// How many elements are sampled to build the pivot candidates. Anything not too large works,
    /// 2^k - 1 wastes nothing when halving the candidate window.
    pub sample_size: usize,
    /// A candidate window with this many or fewer entries is dropped and a fresh sample is taken.
    pub rebuild_threshold: usize,
    /// Ranges shorter than this go straight to the baseline sort.
    pub algorithm_threshold: usize,
}

impl Default for ManyPivotConfig {
    fn default() -> Self {
        Self {
            sample_size: DEFAULT_SAMPLE_SIZE,
            rebuild_threshold: DEFAULT_REBUILD_THRESHOLD,
            algorithm_threshold: DEFAULT_ALGORITHM_THRESHOLD,
        }
    }
}

impl ManyPivotConfig {
    pub fn with_sample_size(self, sample_size: usize) -> Self {
        Self {
            sample_size,
            ..self
        }
        .normalized()
    }

    pub fn with_rebuild_threshold(self, rebuild_threshold: usize) -> Self {
        Self {
            rebuild_threshold,
            ..self
        }
        .normalized()
    }

    pub fn with_algorithm_threshold(self, algorithm_threshold: usize) -> Self {
        Self {
            algorithm_threshold,
            ..self
        }
        .normalized()
    }

    /// Clamps values the algorithm can't work with: between one and [`MAX_SAMPLE_SIZE`] samples,
    /// and no multi pivot partitioning of ranges with fewer than two elements.
    pub fn normalized(self) -> Self {
        Self {
            sample_size: self.sample_size.clamp(1, MAX_SAMPLE_SIZE),
            rebuild_threshold: self.rebuild_threshold,
            algorithm_threshold: self.algorithm_threshold.max(2),
        }
    }

    /// Defaults overridden by whatever the environment provides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(val) = env_usize(ENV_SAMPLE_SIZE) {
            if val > MAX_SAMPLE_SIZE {
                tracing::warn!(
                    key = ENV_SAMPLE_SIZE,
                    val,
                    max = MAX_SAMPLE_SIZE,
                    "clamping pivot sample size"
                );
            }
            config.sample_size = val;
        }
        if let Some(val) = env_usize(ENV_REBUILD_THRESHOLD) {
            config.rebuild_threshold = val;
        }
        if let Some(val) = env_usize(ENV_ALGORITHM_THRESHOLD) {
            config.algorithm_threshold = val;
        }

        config.normalized()
    }

    /// Process wide config, read from the environment on first use.
    pub fn global() -> &'static Self {
        static GLOBAL: OnceCell<ManyPivotConfig> = OnceCell::new();

        GLOBAL.get_or_init(|| {
            let config = Self::from_env();
            tracing::debug!(?config, "many pivot config initialized");
            config
        })
    }
}

fn env_usize(key: &str) -> Option<usize> {
    let val = env::var(key).ok()?;

    match usize::from_str(val.trim()) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            tracing::warn!(key, val = val.as_str(), %err, "ignoring invalid config override");
            None
        }
    }
}
