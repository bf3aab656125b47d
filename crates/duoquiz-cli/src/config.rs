//! Host configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use duoquiz_core::SessionConfig;

/// Top-level duoquiz configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DuoquizConfig {
    /// Default catalog file or directory. Relative paths resolve against the
    /// directory holding the config file.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    /// Session settings.
    #[serde(default)]
    pub session: SessionConfig,
}

impl DuoquizConfig {
    /// Pick the catalog path: explicit flag first, then the config file.
    pub fn resolve_catalog(&self, flag: Option<PathBuf>) -> Result<PathBuf> {
        flag.or_else(|| self.catalog.clone()).context(
            "no catalog given: pass --catalog or set `catalog` in duoquiz.toml",
        )
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `duoquiz.toml` in the current directory
/// 2. `~/.config/duoquiz/config.toml`
///
/// Environment variable overrides: `DUOQUIZ_CATALOG`, `DUOQUIZ_SEED`.
pub fn load_config_from(path: Option<&Path>) -> Result<DuoquizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("duoquiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match &config_path {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let mut config = toml::from_str::<DuoquizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            if let Some(dir) = path.parent() {
                config.catalog = config
                    .catalog
                    .take()
                    .map(|c| if c.is_relative() { dir.join(c) } else { c });
            }
            tracing::debug!(path = %path.display(), "loaded config");
            config
        }
        None => DuoquizConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    Ok(config)
}

fn apply_env_overrides(
    config: &mut DuoquizConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<()> {
    if let Some(catalog) = lookup("DUOQUIZ_CATALOG").filter(|s| !s.is_empty()) {
        config.catalog = Some(PathBuf::from(catalog));
    }
    if let Some(seed) = lookup("DUOQUIZ_SEED").filter(|s| !s.is_empty()) {
        let seed = seed
            .trim()
            .parse::<u64>()
            .with_context(|| format!("DUOQUIZ_SEED is not an unsigned integer: {seed}"))?;
        config.session.seed = Some(seed);
    }
    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("duoquiz"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = DuoquizConfig::default();
        assert!(config.catalog.is_none());
        assert!(config.session.seed.is_none());
        assert!(!config.session.repeat_question_on_wrong);
    }

    #[test]
    fn parse_config() {
        let toml_str = r#"
catalog = "levels"

[session]
seed = 42
repeat_question_on_wrong = true
"#;
        let config: DuoquizConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog, Some(PathBuf::from("levels")));
        assert_eq!(config.session.seed, Some(42));
        assert!(config.session.repeat_question_on_wrong);
    }

    #[test]
    fn relative_catalog_resolves_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duoquiz.toml");
        std::fs::write(&path, "catalog = \"levels\"\n").unwrap();

        let config = load_config_from(Some(&path)).unwrap();
        assert_eq!(config.catalog, Some(dir.path().join("levels")));
    }

    #[test]
    fn missing_explicit_config_fails() {
        assert!(load_config_from(Some(Path::new("nope/duoquiz.toml"))).is_err());
    }

    #[test]
    fn env_overrides() {
        let mut config = DuoquizConfig::default();
        apply_env_overrides(&mut config, |key| match key {
            "DUOQUIZ_SEED" => Some("7".into()),
            "DUOQUIZ_CATALOG" => Some("other".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.catalog, Some(PathBuf::from("other")));

        let err = apply_env_overrides(&mut config, |key| {
            (key == "DUOQUIZ_SEED").then(|| "seven".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("DUOQUIZ_SEED"));
    }

    #[test]
    fn flag_beats_config_catalog() {
        let config = DuoquizConfig {
            catalog: Some("from-config".into()),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_catalog(Some("from-flag".into())).unwrap(),
            PathBuf::from("from-flag")
        );
        assert_eq!(
            config.resolve_catalog(None).unwrap(),
            PathBuf::from("from-config")
        );
        assert!(DuoquizConfig::default().resolve_catalog(None).is_err());
    }
}
