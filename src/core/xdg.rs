//! XDG Base Directory Support
//!
//! Resolves where kbindex reads its configuration and keeps
//! per-project index state on Linux/Unix systems.

use std::env;
use std::fs;
use std::path::PathBuf;

/// XDG directory structure for kbindex
#[derive(Debug, Clone)]
pub struct XdgDirs {
    pub config_dir: PathBuf,
    pub state_dir: PathBuf,
}

impl XdgDirs {
    /// Create new XDG directory structure with proper resolution order
    ///
    /// Priority order (highest to lowest):
    /// 1. Explicit KBINDEX_* env vars
    /// 2. XDG_* environment variables
    /// 3. XDG defaults (~/.config, ~/.local/state)
    pub fn new() -> Self {
        Self {
            config_dir: Self::resolve_config_dir(),
            state_dir: Self::resolve_state_dir(),
        }
    }

    fn resolve_config_dir() -> PathBuf {
        if let Ok(dir) = env::var("KBINDEX_CONFIG_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("kbindex");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("kbindex")
    }

    fn resolve_state_dir() -> PathBuf {
        if let Ok(dir) = env::var("KBINDEX_STATE_DIR") {
            return PathBuf::from(dir);
        }

        if let Ok(xdg) = env::var("XDG_STATE_HOME") {
            return PathBuf::from(xdg).join("kbindex");
        }

        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".local")
            .join("state")
            .join("kbindex")
    }

    /// Get config file path
    pub fn config_file(&self) -> PathBuf {
        if let Ok(file) = env::var("KBINDEX_CONFIG_FILE") {
            return PathBuf::from(file);
        }

        self.config_dir.join("config.toml")
    }

    /// Root of the per-project state directories
    pub fn projects_dir(&self) -> PathBuf {
        self.state_dir.join("projects")
    }

    /// Create all XDG directories if they don't exist
    pub fn ensure_dirs_exist(&self) -> std::io::Result<()> {
        fs::create_dir_all(&self.config_dir)?;
        fs::create_dir_all(self.projects_dir())?;
        Ok(())
    }

    /// Log the resolved XDG paths
    pub fn log_paths(&self) {
        tracing::debug!("XDG directories resolved:");
        tracing::debug!("  Config: {:?}", self.config_dir);
        tracing::debug!("  State: {:?}", self.state_dir);
        tracing::debug!("  Config file: {:?}", self.config_file());
        tracing::debug!("  Projects: {:?}", self.projects_dir());
    }
}

impl Default for XdgDirs {
    fn default() -> Self {
        Self::new()
    }
}
