use crate::models::settings::CalendarConfig;
use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file.
pub const CONFIG_ENV_VAR: &str = "SCHOOL_CALENDAR_CONFIG";

const CONFIG_FILE: &str = "config.toml";
const DATABASE_FILE: &str = "calendar.db";

pub struct SettingsService {
    path: PathBuf,
}

impl SettingsService {
    /// Use an explicit config file location.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Resolve the config location: `explicit`, then `$SCHOOL_CALENDAR_CONFIG`,
    /// then the platform config directory.
    pub fn locate(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Ok(Self::new(path));
        }

        if let Some(path) = std::env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
            return Ok(Self::new(path));
        }

        let dirs = project_dirs()?;
        Ok(Self::new(dirs.config_dir().join(CONFIG_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the configuration. A missing file yields defaults.
    pub fn load(&self) -> Result<CalendarConfig> {
        if !self.path.exists() {
            log::info!("No config at {}, using defaults", self.path.display());
            return Ok(CalendarConfig::default());
        }

        let raw = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read config {}", self.path.display()))?;
        let config: CalendarConfig = toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config {}", self.path.display()))?;
        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings in {}: {}", self.path.display(), e))?;

        log::debug!("Loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Write the configuration, creating parent directories as needed.
    pub fn save(&self, config: &CalendarConfig) -> Result<()> {
        config
            .validate()
            .map_err(|e| anyhow!("Invalid settings: {}", e))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let raw = toml::to_string_pretty(config).context("Failed to serialize config")?;
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write config {}", self.path.display()))?;
        Ok(())
    }

    /// Database location: the config override, else the platform data directory.
    pub fn database_path(config: &CalendarConfig) -> Result<PathBuf> {
        if let Some(ref path) = config.database_path {
            return Ok(path.clone());
        }

        let dirs = project_dirs()?;
        let data_dir = dirs.data_dir();
        fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create data directory {}", data_dir.display()))?;
        Ok(data_dir.join(DATABASE_FILE))
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "SchoolCalendar", "school-calendar")
        .ok_or_else(|| anyhow!("Could not determine a home directory for configuration"))
}
