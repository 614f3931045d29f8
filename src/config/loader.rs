//! Configuration discovery and loading.

use std::path::PathBuf;

use super::{Config, ConfigError};

/// Options for loading configuration.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Explicit config file path (overrides auto-discovery).
    pub config_path: Option<PathBuf>,
}

/// Load configuration for one run.
///
/// An explicit `--config` file must load cleanly. A discovered file that
/// fails to parse is reported and ignored in favour of defaults.
pub async fn load_config(options: &LoadOptions) -> Result<Config, ConfigError> {
    let config = match options.config_path {
        Some(ref path) => {
            tracing::debug!("Loading config from: {}", path.display());
            Config::load_from_path(path).await?
        }
        None => discover().await,
    };

    config.validate()?;
    Ok(config)
}

/// Use prefer to find a `certname.*` config file in the standard locations.
async fn discover() -> Config {
    match prefer::load("certname").await {
        Ok(pref_config) => {
            if let Some(path) = pref_config.source_path() {
                match Config::load_from_path(path).await {
                    Ok(config) => {
                        tracing::debug!("Loaded config from: {}", path.display());
                        config
                    }
                    Err(e) => {
                        tracing::warn!("Ignoring config file {}: {}", path.display(), e);
                        Config::default()
                    }
                }
            } else {
                Config::default()
            }
        }
        // No config file found, use defaults with env overrides
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_explicit_path_is_loaded() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certname.toml");
        std::fs::write(&path, "ocr_language = \"deu\"\n").unwrap();

        let options = LoadOptions {
            config_path: Some(path.clone()),
        };
        let config = load_config(&options).await.unwrap();
        assert_eq!(config.ocr_language, "deu");
        assert_eq!(config.source_path.as_deref(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn test_explicit_missing_path_errors() {
        let dir = tempfile::tempdir().unwrap();
        let options = LoadOptions {
            config_path: Some(dir.path().join("nope.toml")),
        };
        assert!(matches!(
            load_config(&options).await,
            Err(ConfigError::Read { .. })
        ));
    }

    #[tokio::test]
    async fn test_explicit_invalid_values_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certname.json");
        std::fs::write(&path, r#"{"render_scale": -1.0}"#).unwrap();

        let options = LoadOptions {
            config_path: Some(path),
        };
        assert!(matches!(
            load_config(&options).await,
            Err(ConfigError::Invalid(_))
        ));
    }
}
