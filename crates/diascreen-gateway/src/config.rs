//! Gateway configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use diascreen_model::{AcquireOptions, ArtifactSource};

use crate::cli::Cli;

/// Gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Listen address for the HTTP server
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Model artifact settings
    #[serde(default)]
    pub model: ModelSettings,
}

/// Model artifact settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Where the artifact comes from
    #[serde(default)]
    pub source: ArtifactSourceSpec,

    /// Bound on the remote download, in seconds, connect through body
    /// completion
    #[serde(default = "default_download_timeout_secs")]
    pub download_timeout_secs: u64,

    /// Skip the download when the cache path already holds a usable
    /// artifact. Off by default: the stock behavior re-fetches on
    /// every start.
    #[serde(default)]
    pub reuse_cached: bool,
}

/// Artifact source specification (for config files)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArtifactSourceSpec {
    /// Local file path
    Local { path: PathBuf },

    /// Remote URL, streamed to a durable local cache path
    Remote {
        url: String,
        #[serde(default = "default_cache_path")]
        cache_path: PathBuf,
    },
}

impl GatewayConfig {
    /// Load configuration from file and CLI overrides
    pub fn load(config_path: &str, cli: &Cli) -> anyhow::Result<Self> {
        // Try to load from file, or use defaults
        let mut config = if Path::new(config_path).exists() {
            let content = std::fs::read_to_string(config_path)?;
            serde_yaml::from_str(&content)?
        } else {
            Self::default()
        };

        // Apply CLI overrides
        if let Some(listen) = &cli.listen {
            config.listen = listen.clone();
        }

        // --model-path wins over --model-url when both are given
        if let Some(path) = &cli.model_path {
            config.model.source = ArtifactSourceSpec::Local { path: path.clone() };
        } else if let Some(url) = &cli.model_url {
            let cache_path = match &config.model.source {
                ArtifactSourceSpec::Remote { cache_path, .. } => cache_path.clone(),
                ArtifactSourceSpec::Local { .. } => default_cache_path(),
            };
            config.model.source = ArtifactSourceSpec::Remote {
                url: url.clone(),
                cache_path,
            };
        }

        Ok(config)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            model: ModelSettings::default(),
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            source: ArtifactSourceSpec::default(),
            download_timeout_secs: default_download_timeout_secs(),
            reuse_cached: false,
        }
    }
}

impl Default for ArtifactSourceSpec {
    fn default() -> Self {
        Self::Local {
            path: default_cache_path(),
        }
    }
}

impl ModelSettings {
    /// Convert to the runtime artifact source
    pub fn to_artifact_source(&self) -> ArtifactSource {
        match &self.source {
            ArtifactSourceSpec::Local { path } => ArtifactSource::local(path.clone()),
            ArtifactSourceSpec::Remote { url, cache_path } => {
                ArtifactSource::remote(url.clone(), cache_path.clone())
            }
        }
    }

    /// Convert to runtime acquisition options
    pub fn to_acquire_options(&self) -> AcquireOptions {
        AcquireOptions {
            download_timeout: Duration::from_secs(self.download_timeout_secs),
            reuse_cached: self.reuse_cached,
        }
    }
}

impl std::fmt::Display for ArtifactSourceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Local { path } => write!(f, "local file {}", path.display()),
            Self::Remote { url, cache_path } => {
                write!(f, "{} (cached at {})", url, cache_path.display())
            }
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8000".to_string()
}

fn default_download_timeout_secs() -> u64 {
    60
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("./models/diabetes.safetensors")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn remote_source_yaml() {
        let yaml = r#"
listen: "127.0.0.1:9000"
model:
  source:
    url: "https://storage.example.com/models/diabetes.safetensors"
    cache_path: "./cache/diabetes.safetensors"
  download_timeout_secs: 30
  reuse_cached: true
"#;

        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9000");
        assert_eq!(config.model.download_timeout_secs, 30);
        assert!(config.model.reuse_cached);
        match &config.model.source {
            ArtifactSourceSpec::Remote { url, cache_path } => {
                assert_eq!(url, "https://storage.example.com/models/diabetes.safetensors");
                assert_eq!(cache_path, &PathBuf::from("./cache/diabetes.safetensors"));
            }
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn local_source_yaml() {
        let yaml = r#"
model:
  source:
    path: "./models/diabetes.safetensors"
"#;

        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(matches!(
            config.model.source,
            ArtifactSourceSpec::Local { .. }
        ));
        // Omitted fields take the defaults
        assert_eq!(config.listen, "0.0.0.0:8000");
        assert_eq!(config.model.download_timeout_secs, 60);
        assert!(!config.model.reuse_cached);
    }

    #[test]
    fn remote_cache_path_defaults() {
        let yaml = r#"
model:
  source:
    url: "https://storage.example.com/models/diabetes.safetensors"
"#;

        let config: GatewayConfig = serde_yaml::from_str(yaml).unwrap();
        match &config.model.source {
            ArtifactSourceSpec::Remote { cache_path, .. } => {
                assert_eq!(cache_path, &PathBuf::from("./models/diabetes.safetensors"));
            }
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn cli_overrides_missing_file() {
        let cli = Cli::parse_from([
            "diascreen-gateway",
            "--listen",
            "127.0.0.1:9100",
            "--model-path",
            "./fixtures/model.safetensors",
        ]);

        let config = GatewayConfig::load("/nonexistent/gateway.yaml", &cli).unwrap();
        assert_eq!(config.listen, "127.0.0.1:9100");
        match &config.model.source {
            ArtifactSourceSpec::Local { path } => {
                assert_eq!(path, &PathBuf::from("./fixtures/model.safetensors"));
            }
            other => panic!("expected local source, got {:?}", other),
        }
    }

    #[test]
    fn model_path_wins_over_model_url() {
        let cli = Cli::parse_from([
            "diascreen-gateway",
            "--model-path",
            "./local.safetensors",
            "--model-url",
            "https://storage.example.com/remote.safetensors",
        ]);

        let config = GatewayConfig::load("/nonexistent/gateway.yaml", &cli).unwrap();
        assert!(matches!(
            config.model.source,
            ArtifactSourceSpec::Local { .. }
        ));
    }

    #[test]
    fn model_url_override_keeps_configured_cache_path() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("gateway.yaml");
        std::fs::write(
            &config_path,
            r#"
model:
  source:
    url: "https://storage.example.com/old.safetensors"
    cache_path: "./cache/diabetes.safetensors"
"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "diascreen-gateway",
            "--model-url",
            "https://storage.example.com/new.safetensors",
        ]);

        let config = GatewayConfig::load(config_path.to_str().unwrap(), &cli).unwrap();
        match &config.model.source {
            ArtifactSourceSpec::Remote { url, cache_path } => {
                assert_eq!(url, "https://storage.example.com/new.safetensors");
                assert_eq!(cache_path, &PathBuf::from("./cache/diabetes.safetensors"));
            }
            other => panic!("expected remote source, got {:?}", other),
        }
    }

    #[test]
    fn acquire_options_conversion() {
        let settings = ModelSettings {
            source: ArtifactSourceSpec::default(),
            download_timeout_secs: 15,
            reuse_cached: true,
        };

        let options = settings.to_acquire_options();
        assert_eq!(options.download_timeout, Duration::from_secs(15));
        assert!(options.reuse_cached);
    }
}
