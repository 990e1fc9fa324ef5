// portfolio-client/src/config.rs
use anyhow::{anyhow, Result};
use directories::BaseDirs;
use portfolio_api::DEFAULT_API_PREFIX;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_prefix: default_api_prefix(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

/// Browser session the client borrows
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct SessionConfig {
    /// Raw cookie header, e.g. `sessionid=...; csrftoken=...`
    #[serde(default)]
    pub cookies: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)?;
        }

        let config_path = config_dir.join("config.toml");

        if !config_path.exists() {
            let default = Self::default();
            default.save()?;
            return Ok(default.with_env_overrides());
        }

        Ok(Self::load_from(&config_path)?.with_env_overrides())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Let the environment override the site and session
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(base_url) = std::env::var("PORTFOLIO_BASE_URL") {
            self.site.base_url = base_url;
        }

        if let Ok(cookies) = std::env::var("PORTFOLIO_COOKIES") {
            self.session.cookies = Some(cookies);
        }

        self
    }

    pub fn save(&self) -> Result<()> {
        let config_dir = Self::config_dir()?;
        fs::create_dir_all(&config_dir)?;
        self.save_to(&config_dir.join("config.toml"))
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        fs::write(config_path, content)?;

        // Session cookies are credentials: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(config_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(config_path, perms)?;
        }

        Ok(())
    }

    pub fn path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    fn config_dir() -> Result<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("Cannot determine config directory"))?;
        Ok(base_dirs.config_dir().join("portfolio-cli"))
    }

    pub fn cookies(&self) -> &str {
        self.session.cookies.as_deref().unwrap_or_default()
    }
}
