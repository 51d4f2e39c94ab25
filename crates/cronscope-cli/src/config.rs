use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use cronscope_core::{DEFAULT_GRACE_SECS, DEFAULT_HEAVY_THRESHOLD_SECS};

/// CLI defaults (cronscope.toml + CRONSCOPE_* env overrides).
///
/// Explicit command-line flags always win over these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    #[serde(default = "default_grace")]
    pub grace_secs: i64,
    #[serde(default = "default_heavy_threshold")]
    pub heavy_threshold_secs: i64,
    /// "text" or "json".
    #[serde(default = "default_format")]
    pub format: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            grace_secs: default_grace(),
            heavy_threshold_secs: default_heavy_threshold(),
            format: default_format(),
        }
    }
}

impl CliConfig {
    /// Load from a TOML file with CRONSCOPE_* env var overrides.
    /// A missing file is fine — defaults apply.
    pub fn load(config_path: Option<&str>) -> anyhow::Result<Self> {
        let path = config_path.unwrap_or("cronscope.toml");
        let config: CliConfig = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed("CRONSCOPE_"))
            .extract()?;
        Ok(config)
    }
}

fn default_grace() -> i64 {
    DEFAULT_GRACE_SECS
}
fn default_heavy_threshold() -> i64 {
    DEFAULT_HEAVY_THRESHOLD_SECS
}
fn default_format() -> String {
    "text".to_string()
}
