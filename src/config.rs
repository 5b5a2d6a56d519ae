//! Configuration of the interactive driver.
//!
//! Defaults, overridden by environment variables.

/// Environment variable for the log filter.
pub const LOG_ENV_VAR: &str = "LLRB_LOG";
/// Environment variable for the seed of random batch inserts.
pub const SEED_ENV_VAR: &str = "LLRB_SEED";
/// Environment variable that turns on slot layout tracking.
pub const TRACK_SLOTS_ENV_VAR: &str = "LLRB_TRACK_SLOTS";

/// Log filter used when [`LOG_ENV_VAR`] is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Config {
    /// An `EnvFilter` directive, such as `info` or `llrb=trace`.
    pub log_filter: String,
    /// Seed for random batch inserts. Taken from entropy when `None`.
    pub seed: Option<u64>,
    /// Whether to maintain and report node slots.
    pub track_slots: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            seed: None,
            track_slots: false,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(filter) = lookup(LOG_ENV_VAR) {
            config.log_filter = filter;
        }

        if let Some(seed) = lookup(SEED_ENV_VAR) {
            let seed = seed
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidSeed {
                    name: SEED_ENV_VAR,
                    value: seed.clone(),
                })?;
            config.seed = Some(seed);
        }

        if let Some(flag) = lookup(TRACK_SLOTS_ENV_VAR) {
            config.track_slots = parse_flag(TRACK_SLOTS_ENV_VAR, &flag)?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidFlag {
            name,
            value: value.to_string(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be an unsigned 64-bit integer, got '{value}'")]
    InvalidSeed { name: &'static str, value: String },

    #[error("{name} must be a boolean flag, got '{value}'")]
    InvalidFlag { name: &'static str, value: String },
}
