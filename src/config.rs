use crate::domain::ImageRepository;
use crate::error::{ImagePublishError, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete on-disk configuration for image-publish.
///
/// Contains the image identity, manifest location, registry login settings,
/// tagging policy and the container engine to drive.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub image: ImageConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,

    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub tagging: TaggingConfig,

    #[serde(default)]
    pub engine: EngineConfig,
}

fn default_dockerfile() -> String {
    "Dockerfile".to_string()
}

fn default_context() -> String {
    ".".to_string()
}

/// Image identity and build inputs.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ImageConfig {
    /// Local image name, without registry prefix
    #[serde(default)]
    pub name: String,

    /// Registry account the image is published under
    #[serde(default)]
    pub namespace: String,

    #[serde(default = "default_dockerfile")]
    pub dockerfile: String,

    #[serde(default = "default_context")]
    pub context: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            name: String::new(),
            namespace: String::new(),
            dockerfile: default_dockerfile(),
            context: default_context(),
        }
    }
}

fn default_manifest_path() -> String {
    "Cargo.toml".to_string()
}

fn default_scan_lines() -> usize {
    5
}

/// Where the version token is read from.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,

    /// Number of leading lines scanned for the version token
    #[serde(default = "default_scan_lines")]
    pub scan_lines: usize,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
            scan_lines: default_scan_lines(),
        }
    }
}

fn default_password_env() -> String {
    "DOCKER_PASSWORD".to_string()
}

/// Registry login settings. The secret itself never lives in the file.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RegistryConfig {
    /// Registry host; the engine's default registry when absent
    #[serde(default)]
    pub server: Option<String>,

    /// Login principal; the image namespace when absent
    #[serde(default)]
    pub username: Option<String>,

    /// Environment variable carrying the registry secret
    #[serde(default = "default_password_env")]
    pub password_env: String,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        RegistryConfig {
            server: None,
            username: None,
            password_env: default_password_env(),
        }
    }
}

/// What to do when the manifest yields no version token.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum MissingVersionPolicy {
    /// Publish only the unversioned tag
    #[default]
    LatestOnly,
    /// Abort before building
    Fail,
}

fn default_prerelease_marker() -> String {
    "beta".to_string()
}

/// Tagging policy.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TaggingConfig {
    /// Substring that suppresses the version-pinned tag
    #[serde(default = "default_prerelease_marker")]
    pub prerelease_marker: String,

    #[serde(default)]
    pub on_missing_version: MissingVersionPolicy,
}

impl Default for TaggingConfig {
    fn default() -> Self {
        TaggingConfig {
            prerelease_marker: default_prerelease_marker(),
            on_missing_version: MissingVersionPolicy::default(),
        }
    }
}

fn default_engine_program() -> String {
    "docker".to_string()
}

/// Container engine CLI used for build, login, tag and push.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct EngineConfig {
    #[serde(default = "default_engine_program")]
    pub program: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            program: default_engine_program(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `imagepublish.toml` in current directory
/// 3. `.imagepublish.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./imagepublish.toml").exists() {
        fs::read_to_string("./imagepublish.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".imagepublish.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parses a TOML configuration document.
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ImagePublishError::config(e.to_string()))
}

/// Manifest location and scan window.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestSpec {
    pub path: PathBuf,
    pub scan_lines: usize,
}

/// Inputs handed to the build engine.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSpec {
    pub dockerfile: PathBuf,
    pub context: PathBuf,
    pub image_name: String,
}

/// Everything the authenticator needs for one login.
///
/// `credential` is `None` when the environment variable was unset; the
/// authenticator reports that as its own failure.
#[derive(Debug)]
pub struct RegistryLogin {
    pub server: Option<String>,
    pub username: String,
    pub credential_env: String,
    pub credential: Option<SecretString>,
}

/// Fully resolved run configuration, built once at startup.
#[derive(Debug)]
pub struct PipelineConfig {
    pub repository: ImageRepository,
    pub manifest: ManifestSpec,
    pub build: BuildSpec,
    pub registry: RegistryLogin,
    pub tagging: TaggingConfig,
    pub engine: EngineConfig,
}

impl PipelineConfig {
    /// Resolves the configuration, reading the credential from the process environment.
    pub fn resolve(config: Config) -> Result<Self> {
        Self::resolve_with(config, |name| std::env::var(name).ok())
    }

    /// Resolves the configuration with a custom environment lookup.
    pub fn resolve_with<F>(config: Config, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let name = config.image.name.trim();
        let namespace = config.image.namespace.trim();

        if name.is_empty() {
            return Err(ImagePublishError::config("image.name must be set"));
        }
        if namespace.is_empty() {
            return Err(ImagePublishError::config("image.namespace must be set"));
        }
        if config.manifest.scan_lines == 0 {
            return Err(ImagePublishError::config(
                "manifest.scan_lines must be at least 1",
            ));
        }
        if config.tagging.prerelease_marker.is_empty() {
            return Err(ImagePublishError::config(
                "tagging.prerelease_marker must not be empty",
            ));
        }
        if config.engine.program.trim().is_empty() {
            return Err(ImagePublishError::config("engine.program must be set"));
        }

        let repository = ImageRepository::new(namespace, name);

        let credential = lookup(&config.registry.password_env)
            .map(|value| SecretString::new(value.into()));

        let registry = RegistryLogin {
            server: config.registry.server.clone(),
            username: config
                .registry
                .username
                .clone()
                .unwrap_or_else(|| namespace.to_string()),
            credential_env: config.registry.password_env.clone(),
            credential,
        };

        Ok(PipelineConfig {
            manifest: ManifestSpec {
                path: PathBuf::from(&config.manifest.path),
                scan_lines: config.manifest.scan_lines,
            },
            build: BuildSpec {
                dockerfile: PathBuf::from(&config.image.dockerfile),
                context: PathBuf::from(&config.image.context),
                image_name: name.to_string(),
            },
            repository,
            registry,
            tagging: config.tagging,
            engine: config.engine,
        })
    }
}
