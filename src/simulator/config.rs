//! Simulation configuration.

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of autopiloted sessions per level
    pub runs_per_level: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Maximum engine ticks per session before timeout
    pub max_ticks_per_run: u64,

    /// Level ids to play; empty means every preset
    pub level_ids: Vec<String>,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs_per_level: 100,
            seed: None,
            max_ticks_per_run: 20_000,
            level_ids: Vec::new(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Quick smoke check across all presets
    pub fn quick() -> Self {
        Self {
            runs_per_level: 10,
            max_ticks_per_run: 5_000,
            ..Default::default()
        }
    }

    /// Many runs of a single level
    pub fn level_balance_test(level_id: impl Into<String>) -> Self {
        Self {
            runs_per_level: 500,
            level_ids: vec![level_id.into()],
            ..Default::default()
        }
    }
}
