use tracing::warn;

/// Environment variable overriding [`TunerConfig::cache_enabled`].
pub const PLAN_CACHE_ENV: &str = "UPSAMPLE_PLAN_CACHE";

/// Runtime switches of the auto-tuner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TunerConfig {
    /// Reuse and record the winner of each shape and layout.
    pub cache_enabled: bool,
}

impl Default for TunerConfig {
    fn default() -> Self {
        Self { cache_enabled: true }
    }
}

impl TunerConfig {
    /// Defaults, overridden by [`PLAN_CACHE_ENV`] when it holds a recognised
    /// boolean. Anything else is ignored with a warning.
    pub fn from_env() -> Self {
        let mut config: Self = Self::default();
        if let Ok(value) = std::env::var(PLAN_CACHE_ENV) {
            match parse_flag(&value) {
                Some(enabled) => config.cache_enabled = enabled,
                None => warn!(
                    variable = PLAN_CACHE_ENV,
                    value = %value,
                    "unrecognised value, keeping plan cache {}",
                    if config.cache_enabled { "enabled" } else { "disabled" }
                ),
            }
        }
        config
    }

    pub fn with_cache(mut self, enabled: bool) -> Self {
        self.cache_enabled = enabled;
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Parameters of [`crate::WallClockHarness`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Untimed executions run before measuring.
    pub warmup_runs: usize,
    /// Timed executions; the fastest one is the cost. At least one is run.
    pub timed_runs: usize,
    /// Seed of the benchmark input.
    pub seed: [u8; 32],
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            warmup_runs: 1,
            timed_runs: 3,
            seed: [0u8; 32],
        }
    }
}

impl TimingConfig {
    pub fn with_warmup_runs(mut self, runs: usize) -> Self {
        self.warmup_runs = runs;
        self
    }

    pub fn with_timed_runs(mut self, runs: usize) -> Self {
        self.timed_runs = runs;
        self
    }

    pub fn with_seed(mut self, seed: [u8; 32]) -> Self {
        self.seed = seed;
        self
    }
}
