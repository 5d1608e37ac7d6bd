//! Configuration loader.
//!
//! Provides the `ConfigLoader` struct that handles loading
//! configuration from multiple sources with proper precedence.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};

use crate::config::environment::Environment as AppEnvironment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

/// Environment variable for configuration directory
const CONFIG_DIR_ENV: &str = "SALON_CONFIG_DIR";

/// Environment variable for specific configuration file
const CONFIG_FILE_ENV: &str = "SALON_CONFIG_FILE";

/// Default configuration directory
const DEFAULT_CONFIG_DIR: &str = "config";

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "SALON";

/// Separator for nested configuration keys in environment variables
const ENV_SEPARATOR: &str = "__";

/// Configuration loader that handles layered configuration loading
///
/// The loader supports the following configuration sources (in order
/// of priority):
/// 1. `default.toml` - Base default configuration (required)
/// 2. `{environment}.toml` - Environment-specific configuration (optional)
/// 3. `local.toml` - Local development overrides (optional)
/// 4. `SALON_*` environment variables (highest priority)
#[derive(Debug)]
pub struct ConfigLoader {
    /// Configuration directory path
    config_dir: PathBuf,
    /// Specific configuration file path (if set, skips layered loading)
    config_file: Option<PathBuf>,
    /// Current application environment
    environment: AppEnvironment,
}

impl ConfigLoader {
    /// Create a new configuration loader
    ///
    /// This reads environment variables to determine:
    /// - Configuration directory (`SALON_CONFIG_DIR`)
    /// - Specific configuration file (`SALON_CONFIG_FILE`)
    /// - Application environment (`SALON_APP_ENV`)
    ///
    /// # Errors
    ///
    /// Returns an error if both `SALON_CONFIG_DIR` and
    /// `SALON_CONFIG_FILE` are set, as they are mutually exclusive.
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::var(CONFIG_DIR_ENV)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));

        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if config_file.is_some() && std::env::var(CONFIG_DIR_ENV).is_ok() {
            return Err(ConfigError::mutual_exclusivity(
                "SALON_CONFIG_DIR and SALON_CONFIG_FILE cannot both be set. \
                 Use SALON_CONFIG_DIR for layered configuration or \
                 SALON_CONFIG_FILE for a single configuration file.",
            ));
        }

        let environment = AppEnvironment::from_env();

        Ok(Self {
            config_dir,
            config_file,
            environment,
        })
    }

    /// Create a loader for a single explicit configuration file,
    /// bypassing layered loading.
    pub fn from_file<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: AppEnvironment::from_env(),
        }
    }

    /// Get the current application environment
    pub fn environment(&self) -> AppEnvironment {
        self.environment
    }

    /// Load configuration from all sources
    ///
    /// If `SALON_CONFIG_FILE` is set, loads only that file. Otherwise,
    /// performs layered loading from the configuration directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `default.toml` is not found (when using layered loading)
    /// - Configuration parsing fails
    /// - Configuration validation fails
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;

        settings.validate()?;

        Ok(settings)
    }

    /// Build the config::Config instance from all sources
    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = if let Some(ref config_file) = self.config_file {
            // Single file mode
            self.add_file_source(builder, config_file, true)?
        } else {
            // Layered loading mode
            self.build_layered_config(builder)?
        };

        // Environment variables are always highest priority:
        // SALON_SERVER__PORT -> server.port
        let builder = Self::add_env_source(builder);

        builder.build().map_err(ConfigError::from)
    }

    /// Build layered configuration from multiple files
    fn build_layered_config(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        // 1. Add default.toml (required)
        let default_path = self.config_dir.join("default.toml");
        let builder = self.add_file_source(builder, &default_path, true)?;

        // 2. Add {environment}.toml (optional)
        let env_path = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = self.add_file_source(builder, &env_path, false)?;

        // 3. Add local.toml (optional)
        let local_path = self.config_dir.join("local.toml");
        let builder = self.add_file_source(builder, &local_path, false)?;

        Ok(builder)
    }

    /// Add a file source to the config builder
    fn add_file_source(
        &self,
        builder: config::ConfigBuilder<config::builder::DefaultState>,
        path: &Path,
        required: bool,
    ) -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        if required && !path.exists() {
            return Err(ConfigError::file_not_found(format!(
                "Required configuration file not found: {}",
                path.display()
            )));
        }

        Ok(builder.add_source(
            File::new(path.to_str().unwrap_or_default(), FileFormat::Toml).required(required),
        ))
    }

    /// Add environment variable source to the config builder
    ///
    /// Environment variables with prefix `SALON_` are mapped to
    /// configuration keys. Double underscores (`__`) are used as
    /// separators for nested keys.
    ///
    /// Examples:
    /// - `SALON_SERVER__PORT` -> `server.port`
    /// - `SALON_DATABASE__URL` -> `database.url`
    fn add_env_source(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> config::ConfigBuilder<config::builder::DefaultState> {
        builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator(ENV_SEPARATOR)
                .ignore_empty(true)
                .try_parsing(true),
        )
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: AppEnvironment::default(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Tests run sequentially to avoid env var conflicts
    static TEST_MUTEX: Mutex<()> = Mutex::new(());

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            let path = temp_dir.path().join(name);
            fs::write(&path, content).expect("Failed to write config file");
        }
        temp_dir
    }

    /// Restores touched environment variables on drop.
    struct EnvGuard {
        vars_to_restore: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            Self {
                vars_to_restore: Vec::new(),
            }
        }

        fn set(&mut self, key: &str, value: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            let original = std::env::var(key).ok();
            self.vars_to_restore.push((key.to_string(), original));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, original) in self.vars_to_restore.drain(..).rev() {
                unsafe {
                    match original {
                        Some(value) => std::env::set_var(&key, value),
                        None => std::env::remove_var(&key),
                    }
                }
            }
        }
    }

    const BASE_CONFIG: &str = r#"
        [database]
        url = "postgres://localhost/salon"
    "#;

    #[test]
    fn test_load_default_toml() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        let mut guard = EnvGuard::new();
        guard.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        guard.remove(CONFIG_FILE_ENV);
        guard.remove(AppEnvironment::ENV_VAR);

        let loader = ConfigLoader::new().unwrap();
        let settings = loader.load().unwrap();
        assert_eq!(settings.database.url, "postgres://localhost/salon");
        assert_eq!(settings.server.port, 3000);
    }

    #[test]
    fn test_missing_default_toml_fails() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();

        let mut guard = EnvGuard::new();
        guard.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        guard.remove(CONFIG_FILE_ENV);

        let loader = ConfigLoader::new().unwrap();
        assert!(matches!(loader.load(), Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_environment_file_overrides_default() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[
            ("default.toml", BASE_CONFIG),
            (
                "test.toml",
                r#"
                [server]
                port = 4000
            "#,
            ),
        ]);

        let mut guard = EnvGuard::new();
        guard.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        guard.remove(CONFIG_FILE_ENV);
        guard.set(AppEnvironment::ENV_VAR, "test");

        let loader = ConfigLoader::new().unwrap();
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 4000);
    }

    #[test]
    fn test_env_var_has_highest_priority() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);

        let mut guard = EnvGuard::new();
        guard.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        guard.remove(CONFIG_FILE_ENV);
        guard.remove(AppEnvironment::ENV_VAR);
        guard.set("SALON_SERVER__PORT", "9999");

        let loader = ConfigLoader::new().unwrap();
        let settings = loader.load().unwrap();
        assert_eq!(settings.server.port, 9999);
    }

    #[test]
    fn test_mutual_exclusivity_of_dir_and_file() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("default.toml", BASE_CONFIG)]);
        let file_path = temp_dir.path().join("default.toml");

        let mut guard = EnvGuard::new();
        guard.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        guard.set(CONFIG_FILE_ENV, file_path.to_str().unwrap());

        assert!(matches!(
            ConfigLoader::new(),
            Err(ConfigError::MutualExclusivityError(_))
        ));
    }

    #[test]
    fn test_single_file_mode() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[("custom.toml", BASE_CONFIG)]);
        let file_path = temp_dir.path().join("custom.toml");

        let mut guard = EnvGuard::new();
        guard.remove(CONFIG_DIR_ENV);
        guard.set(CONFIG_FILE_ENV, file_path.to_str().unwrap());
        guard.remove(AppEnvironment::ENV_VAR);

        let loader = ConfigLoader::new().unwrap();
        let settings = loader.load().unwrap();
        assert_eq!(settings.database.url, "postgres://localhost/salon");
    }

    #[test]
    fn test_invalid_settings_rejected_on_load() {
        let _lock = TEST_MUTEX.lock().unwrap();
        let temp_dir = setup_config_dir(&[(
            "default.toml",
            r#"
            [database]
            url = ""
        "#,
        )]);

        let mut guard = EnvGuard::new();
        guard.set(CONFIG_DIR_ENV, temp_dir.path().to_str().unwrap());
        guard.remove(CONFIG_FILE_ENV);

        let loader = ConfigLoader::new().unwrap();
        assert!(matches!(
            loader.load(),
            Err(ConfigError::ValidationError { .. })
        ));
    }
}
