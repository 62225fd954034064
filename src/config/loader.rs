use super::Configuration;
use anyhow::{Context, Result};
use directories::UserDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Where settings live. Hosts provide their own; the CLI uses a TOML file.
pub trait ConfigStore: Send + Sync {
    fn load(&self) -> Result<Configuration>;
    fn save(&self, config: &Configuration) -> Result<()>;
}

/// `config.toml` on disk, created with defaults on first load.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.autolink-title/config.toml`
    pub fn default_location() -> Result<Self> {
        let home = UserDirs::new()
            .map(|u| u.home_dir().to_path_buf())
            .context("Could not find home directory")?;
        Ok(Self::new(home.join(".autolink-title").join("config.toml")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<Configuration> {
        if !self.path.exists() {
            let config = Configuration {
                config_path: self.path.clone(),
                ..Configuration::default()
            };
            self.save(&config)?;
            tracing::info!(path = %self.path.display(), "created default config");
            return Ok(config);
        }

        let contents = fs::read_to_string(&self.path).context("Failed to read config file")?;
        let mut config: Configuration =
            toml::from_str(&contents).context("Failed to parse config file")?;
        config.config_path.clone_from(&self.path);

        if let Some(rejected) = config.sanitize() {
            tracing::warn!(path = %self.path.display(), "{rejected}");
            self.save(&config)?;
        }

        Ok(config)
    }

    fn save(&self, config: &Configuration) -> Result<()> {
        let mut persisted = config.clone();
        if let Some(rejected) = persisted.sanitize() {
            tracing::warn!("{rejected}");
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str = toml::to_string_pretty(&persisted).context("Failed to serialize config")?;
        fs::write(&self.path, toml_str).context("Failed to write config file")?;
        Ok(())
    }
}
