//! Engine configuration.
//!
//! [`EngineConfig`] is loaded from an optional TOML file plus `PILLARS__*` environment
//! overrides. [`EngineToggles`] are plain env booleans read at startup.

use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_true() -> bool {
    true
}

/// Runtime settings for a local engine session.
///
/// | Key | Env | Default |
/// |-----|-----|---------|
/// | storage_path | PILLARS__STORAGE_PATH | ./data/pillars |
/// | user_id | PILLARS__USER_ID | local |
/// | utc_offset_minutes | PILLARS__UTC_OFFSET_MINUTES | 0 |
/// | rng_seed | PILLARS__RNG_SEED | unset (entropy) |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Directory of the Sled database holding all blobs.
    pub storage_path: String,
    /// Profile whose blobs the session reads and writes.
    pub user_id: String,
    /// Minutes east of UTC that define the user's local day for streaks.
    #[serde(default)]
    pub utc_offset_minutes: i32,
    /// Fixed seed for daily task selection; entropy when unset.
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            storage_path: "./data/pillars".to_string(),
            user_id: "local".to_string(),
            utc_offset_minutes: 0,
            rng_seed: None,
        }
    }
}

impl EngineConfig {
    /// Load config from file and environment. Precedence: env > `PILLARS_CONFIG` file
    /// (default `config/pillars`) > defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("PILLARS_CONFIG").unwrap_or_else(|_| "config/pillars".to_string());
        Self::load_from(&config_path)
    }

    /// Same as [`EngineConfig::load`] with an explicit file path (extension optional).
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let builder = config::Config::builder()
            .set_default("storage_path", defaults.storage_path)?
            .set_default("user_id", defaults.user_id)?
            .set_default("utc_offset_minutes", defaults.utc_offset_minutes as i64)?;

        let path = Path::new(config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder.add_source(config::File::with_name(config_path).required(false))
        };

        let built = builder
            .add_source(config::Environment::with_prefix("PILLARS").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}

/// Behavior toggles loaded from environment.
///
/// | Env | Default | Description |
/// |-----|---------|-------------|
/// | PILLARS_LOG_TRANSITIONS | true | Emit one debug record per progress change. |
/// | PILLARS_AUTO_GENERATE_TASKS | true | Generate today's tasks when the stored list is empty. |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineToggles {
    #[serde(default = "default_true")]
    pub log_transitions: bool,
    #[serde(default = "default_true")]
    pub auto_generate_tasks: bool,
}

impl Default for EngineToggles {
    fn default() -> Self {
        Self {
            log_transitions: true,
            auto_generate_tasks: true,
        }
    }
}

impl EngineToggles {
    /// Unset or empty => default; anything other than "true" (case-insensitive) => false.
    pub fn from_env() -> Self {
        Self {
            log_transitions: env_bool("PILLARS_LOG_TRANSITIONS", true),
            auto_generate_tasks: env_bool("PILLARS_AUTO_GENERATE_TASKS", true),
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    match std::env::var(name) {
        Ok(v) => v.trim().eq_ignore_ascii_case("true") || (v.trim().is_empty() && default),
        Err(_) => default,
    }
}
