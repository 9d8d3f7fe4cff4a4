use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::audit::DEFAULT_MIN_SCORE;

/// Root configuration structure, deserialized from `.tz-checkr/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub normalize: NormalizeConfig,
}

#[derive(Debug, Deserialize)]
pub struct AuditConfig {
    /// Compliance score below which the draft is blocked.
    #[serde(default = "default_min_score")]
    pub min_score: u32,
}

impl Default for AuditConfig {
    fn default() -> Self {
        AuditConfig {
            min_score: DEFAULT_MIN_SCORE,
        }
    }
}

fn default_min_score() -> u32 {
    DEFAULT_MIN_SCORE
}

#[derive(Debug, Default, Deserialize)]
pub struct NormalizeConfig {
    /// Organisation-specific brand tokens appended to the built-in denylist.
    #[serde(default)]
    pub extra_brands: Vec<String>,
}

/// Load the policy configuration, searching in order:
///
/// 1. `config_override` — path passed via `--config`
/// 2. `./.tz-checkr/config.toml`
/// 3. `~/.config/tz-checkr/config.toml`
/// 4. Built-in [`Config::default`]
pub fn load_config(config_override: Option<&Path>) -> Result<Config> {
    if let Some(path) = config_override {
        let content = std::fs::read_to_string(path)?;
        return Ok(toml::from_str(&content)?);
    }

    let project_config = Path::new(".tz-checkr").join("config.toml");
    if project_config.exists() {
        let content = std::fs::read_to_string(&project_config)?;
        return Ok(toml::from_str(&content)?);
    }

    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".config").join("tz-checkr").join("config.toml");
        if home_config.exists() {
            let content = std::fs::read_to_string(&home_config)?;
            return Ok(toml::from_str(&content)?);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold() {
        let config = Config::default();
        assert_eq!(config.audit.min_score, 85);
        assert!(config.normalize.extra_brands.is_empty());
    }

    #[test]
    fn test_parse_overrides() {
        let config: Config = toml::from_str(
            r#"
            [audit]
            min_score = 70

            [normalize]
            extra_brands = ["росвидеоком", "техносфера"]
            "#,
        )
        .unwrap();
        assert_eq!(config.audit.min_score, 70);
        assert_eq!(config.normalize.extra_brands.len(), 2);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: Config = toml::from_str("[normalize]\nextra_brands = [\"контора\"]\n").unwrap();
        assert_eq!(config.audit.min_score, 85);
    }

    #[test]
    fn test_explicit_config_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[audit]\nmin_score = 60\n").unwrap();
        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.audit.min_score, 60);
    }
}
