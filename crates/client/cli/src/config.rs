//! CLI configuration structures and loaders.
use std::env;
use std::path::PathBuf;

/// Settings for one headless session.
#[derive(Clone, Debug)]
pub struct CliConfig {
    /// TOML game configuration; the embedded defaults are used when unset.
    pub config_path: Option<PathBuf>,
    pub turns: u32,
    pub seed: u64,
    pub message_capacity: usize,
}

impl CliConfig {
    pub const DEFAULT_TURNS: u32 = 40;
    pub const DEFAULT_SEED: u64 = 0x00D3_1FE5;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DELVE_CONFIG` - Path to a TOML game config (default: embedded)
    /// - `DELVE_TURNS` - Number of turns to simulate (default: 40)
    /// - `DELVE_SEED` - Seed for AI randomness (default: fixed)
    /// - `DELVE_MESSAGE_CAPACITY` - Narration buffer size per turn (default: 64)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        config.config_path = read("DELVE_CONFIG").map(PathBuf::from);
        if let Some(turns) = read("DELVE_TURNS").and_then(|v| v.trim().parse().ok()) {
            config.turns = turns;
        }
        if let Some(seed) = read("DELVE_SEED").and_then(|v| v.trim().parse().ok()) {
            config.seed = seed;
        }
        if let Some(capacity) =
            read("DELVE_MESSAGE_CAPACITY").and_then(|v| v.trim().parse::<usize>().ok())
        {
            config.message_capacity = capacity.max(1);
        }

        config
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            config_path: None,
            turns: Self::DEFAULT_TURNS,
            seed: Self::DEFAULT_SEED,
            message_capacity: 64,
        }
    }
}
