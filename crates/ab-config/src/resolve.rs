//! Config resolution: CLI overrides → environment → file → XDG → defaults.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::engine::EngineConfig;
use crate::validate::ValidationResult;

/// Directory name under the platform config dir.
pub const APP_DIR: &str = "bayes_ab";

pub const ENV_SIMULATION_SIZE: &str = "AB_SIMULATION_SIZE";
pub const ENV_SEED: &str = "AB_SEED";
pub const ENV_SIGNIFICANCE_THRESHOLD: &str = "AB_SIGNIFICANCE_THRESHOLD";

/// Candidate locations for the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    /// Path given explicitly on the command line. Must exist when set.
    pub explicit: Option<PathBuf>,
    /// Platform config directory (`$XDG_CONFIG_HOME/bayes_ab`).
    pub config_dir: Option<PathBuf>,
}

impl ConfigPaths {
    pub fn discover(explicit: Option<PathBuf>) -> Self {
        Self {
            explicit,
            config_dir: dirs::config_dir().map(|d| d.join(APP_DIR)),
        }
    }

    /// First existing file among the explicit path and `config.{toml,json}`.
    pub fn locate(&self) -> Option<PathBuf> {
        if let Some(path) = &self.explicit {
            return Some(path.clone());
        }
        let dir = self.config_dir.as_ref()?;
        ["config.toml", "config.json"]
            .iter()
            .map(|name| dir.join(name))
            .find(|candidate| candidate.is_file())
    }
}

/// Values supplied directly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub simulation_size: Option<usize>,
    pub seed: Option<u64>,
    pub significance_threshold: Option<f64>,
    pub prior_success: Option<u64>,
    pub prior_failure: Option<u64>,
}

/// Resolve the effective configuration from the process environment.
pub fn resolve_config(
    paths: &ConfigPaths,
    overrides: &ConfigOverrides,
) -> ValidationResult<EngineConfig> {
    resolve_config_with_env(paths, overrides, |key| std::env::var(key).ok())
}

/// Resolve the effective configuration with an injectable env lookup.
pub fn resolve_config_with_env<F>(
    paths: &ConfigPaths,
    overrides: &ConfigOverrides,
    env: F,
) -> ValidationResult<EngineConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match paths.locate() {
        Some(path) => {
            debug!(path = %path.display(), "loading engine config");
            EngineConfig::from_file(&path)?
        }
        None => EngineConfig::default(),
    };

    if let Some(v) = parse_env(&env, ENV_SIMULATION_SIZE) {
        config.simulation_size = v;
    }
    if let Some(v) = parse_env(&env, ENV_SEED) {
        config.seed = v;
    }
    if let Some(v) = parse_env(&env, ENV_SIGNIFICANCE_THRESHOLD) {
        config.significance_threshold = v;
    }

    if let Some(v) = overrides.simulation_size {
        config.simulation_size = v;
    }
    if let Some(v) = overrides.seed {
        config.seed = v;
    }
    if let Some(v) = overrides.significance_threshold {
        config.significance_threshold = v;
    }
    if let Some(v) = overrides.prior_success {
        config.conversion_prior.prior_success = v;
    }
    if let Some(v) = overrides.prior_failure {
        config.conversion_prior.prior_failure = v;
    }

    config.validate()?;
    Ok(config)
}

fn parse_env<F, T>(env: &F, key: &str) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    let raw = env(key)?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparseable environment override");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn empty_paths() -> ConfigPaths {
        ConfigPaths {
            explicit: None,
            config_dir: None,
        }
    }

    #[test]
    fn defaults_without_sources() {
        let cfg =
            resolve_config_with_env(&empty_paths(), &ConfigOverrides::default(), no_env).unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn precedence_cli_over_env_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ab.toml");
        std::fs::write(&path, "seed = 1\nsimulation_size = 100\nsignificance_threshold = 80.0\n")
            .unwrap();
        let paths = ConfigPaths {
            explicit: Some(path),
            config_dir: None,
        };

        let env: HashMap<&str, &str> = [(ENV_SEED, "2"), (ENV_SIMULATION_SIZE, "200")].into();
        let overrides = ConfigOverrides {
            seed: Some(3),
            ..Default::default()
        };

        let cfg =
            resolve_config_with_env(&paths, &overrides, |k| env.get(k).map(|v| v.to_string()))
                .unwrap();
        assert_eq!(cfg.seed, 3);
        assert_eq!(cfg.simulation_size, 200);
        assert_eq!(cfg.significance_threshold, 80.0);
    }

    #[test]
    fn bad_env_value_is_ignored() {
        let cfg = resolve_config_with_env(&empty_paths(), &ConfigOverrides::default(), |k| {
            (k == ENV_SEED).then(|| "not-a-number".to_string())
        })
        .unwrap();
        assert_eq!(cfg.seed, EngineConfig::default().seed);
    }

    #[test]
    fn xdg_dir_is_searched() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), r#"{"seed": 77}"#).unwrap();
        let paths = ConfigPaths {
            explicit: None,
            config_dir: Some(dir.path().to_path_buf()),
        };
        let cfg = resolve_config_with_env(&paths, &ConfigOverrides::default(), no_env).unwrap();
        assert_eq!(cfg.seed, 77);
    }

    #[test]
    fn overrides_are_validated() {
        let overrides = ConfigOverrides {
            simulation_size: Some(0),
            ..Default::default()
        };
        assert!(resolve_config_with_env(&empty_paths(), &overrides, no_env).is_err());
    }
}
