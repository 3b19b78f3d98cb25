//! Configuration management for kbindex.
//!
//! This module handles loading configuration from TOML files and
//! environment variables, with sensible defaults for all settings.

use crate::core::error::{IndexerError, Result};
use crate::core::xdg::XdgDirs;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub expansion: ExpansionConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

/// File discovery configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscoveryConfig {
    /// Directory names never descended into (matched on any path
    /// component)
    #[serde(default = "default_skip_dirs")]
    pub skip_dirs: Vec<String>,

    /// Skip every directory whose name starts with '.'
    #[serde(default = "default_skip_hidden_dirs")]
    pub skip_hidden_dirs: bool,

    /// Extensions classified as source code (highest priority)
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Extensions classified as configuration/data
    #[serde(default = "default_config_extensions")]
    pub config_extensions: Vec<String>,

    /// Extensions classified as documentation (lowest priority)
    #[serde(default = "default_documentation_extensions")]
    pub documentation_extensions: Vec<String>,

    /// Additional glob patterns to exclude
    #[serde(default)]
    pub exclude_patterns: Vec<String>,

    /// Maximum file size in MB (skip larger files)
    #[serde(default = "default_max_file_size")]
    pub max_file_size_mb: usize,
}

/// Batch expansion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExpansionConfig {
    /// Files processed per expansion
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Files processed by the initial seed pass
    #[serde(default = "default_seed_limit")]
    pub seed_limit: usize,

    /// Run an expansion on every Nth commit event
    #[serde(default = "default_commit_interval")]
    pub commit_interval: u64,
}

/// Knowledge-base ingestion configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct IngestionConfig {
    /// Base URL of the knowledge-base API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Knowledge base that receives the chunks
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: String,

    /// Bearer token for the knowledge-base API
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Concurrent ingestion requests per file
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Directory holding one state directory per project
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,
}

// Default value functions
fn default_skip_dirs() -> Vec<String> {
    [
        // Version control
        ".git",
        ".hg",
        ".svn",
        // Dependency caches
        "node_modules",
        "vendor",
        "bower_components",
        ".venv",
        "venv",
        "__pycache__",
        ".gradle",
        // Build output
        "target",
        "build",
        "dist",
        "out",
        ".next",
        "coverage",
        // Tests
        "test",
        "tests",
        "__tests__",
        "spec",
        // Tool state
        ".idea",
        ".vscode",
        ".cache",
        ".pytest_cache",
        ".mypy_cache",
        ".tox",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_skip_hidden_dirs() -> bool {
    true
}

fn default_source_extensions() -> Vec<String> {
    [
        "rs", "py", "rb", "js", "jsx", "mjs", "cjs", "ts", "tsx", "go", "java", "kt", "kts",
        "swift", "scala", "c", "h", "cpp", "cc", "cxx", "hpp", "hh", "cs", "php", "sh",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_config_extensions() -> Vec<String> {
    [
        "json",
        "yaml",
        "yml",
        "toml",
        "ini",
        "cfg",
        "conf",
        "xml",
        "properties",
        "gradle",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_documentation_extensions() -> Vec<String> {
    ["md", "markdown", "rst", "txt", "adoc"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_max_file_size() -> usize {
    2
}

fn default_batch_size() -> usize {
    20
}

fn default_seed_limit() -> usize {
    100
}

fn default_commit_interval() -> u64 {
    5
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_knowledge_base() -> String {
    "default".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_max_concurrency() -> usize {
    4
}

fn default_state_dir() -> PathBuf {
    PathBuf::from("./data")
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            skip_dirs: default_skip_dirs(),
            skip_hidden_dirs: default_skip_hidden_dirs(),
            source_extensions: default_source_extensions(),
            config_extensions: default_config_extensions(),
            documentation_extensions: default_documentation_extensions(),
            exclude_patterns: Vec::new(),
            max_file_size_mb: default_max_file_size(),
        }
    }
}

impl Default for ExpansionConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            seed_limit: default_seed_limit(),
            commit_interval: default_commit_interval(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            knowledge_base: default_knowledge_base(),
            api_token: None,
            timeout_secs: default_timeout(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| IndexerError::ConfigError(format!("Failed to read config file: {e}")))?;

        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config with priority: env vars > TOML > defaults
    ///
    /// This method uses XDG Base Directory specification for file locations.
    pub fn load() -> Result<Self> {
        let xdg = XdgDirs::new();
        Self::load_with_xdg(&xdg)
    }

    /// Load config with explicit XDG directories
    ///
    /// Priority order:
    /// 1. KBINDEX_CONFIG env var
    /// 2. XDG config file (~/.config/kbindex/config.toml)
    /// 3. ./kbindex.toml in the working directory
    /// 4. Defaults
    pub fn load_with_xdg(xdg: &XdgDirs) -> Result<Self> {
        let mut config = if let Ok(config_path) = env::var("KBINDEX_CONFIG") {
            Self::from_file(config_path)?
        } else {
            let xdg_config = xdg.config_file();
            if xdg_config.exists() {
                Self::from_file(xdg_config)?
            } else if Path::new("kbindex.toml").exists() {
                Self::from_file("kbindex.toml")?
            } else {
                Self::default()
            }
        };

        // Keep state under the XDG state directory unless set explicitly
        if env::var("KBINDEX_STATE_DIR").is_err() && config.storage.state_dir == default_state_dir()
        {
            config.storage.state_dir = xdg.projects_dir();
        }

        config.merge_env();
        config.validate()?;

        Ok(config)
    }

    /// Merge configuration with environment variables
    pub fn merge_env(&mut self) {
        // Discovery configuration
        if let Ok(max_size) = env::var("KBINDEX_MAX_FILE_SIZE_MB") {
            if let Ok(size) = max_size.parse() {
                self.discovery.max_file_size_mb = size;
            }
        }

        // Expansion configuration
        if let Ok(batch_size) = env::var("KBINDEX_BATCH_SIZE") {
            if let Ok(size) = batch_size.parse() {
                self.expansion.batch_size = size;
            }
        }
        if let Ok(seed_limit) = env::var("KBINDEX_SEED_LIMIT") {
            if let Ok(limit) = seed_limit.parse() {
                self.expansion.seed_limit = limit;
            }
        }
        if let Ok(interval) = env::var("KBINDEX_COMMIT_INTERVAL") {
            if let Ok(n) = interval.parse() {
                self.expansion.commit_interval = n;
            }
        }

        // Ingestion configuration
        if let Ok(url) = env::var("KBINDEX_INGEST_URL") {
            self.ingestion.base_url = url;
        }
        if let Ok(kb) = env::var("KBINDEX_KNOWLEDGE_BASE") {
            self.ingestion.knowledge_base = kb;
        }
        if let Ok(token) = env::var("KBINDEX_API_TOKEN") {
            if !token.is_empty() {
                self.ingestion.api_token = Some(token);
            }
        }
        if let Ok(timeout) = env::var("KBINDEX_INGEST_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.ingestion.timeout_secs = t;
            }
        }
        if let Ok(concurrency) = env::var("KBINDEX_INGEST_CONCURRENCY") {
            if let Ok(c) = concurrency.parse() {
                self.ingestion.max_concurrency = c;
            }
        }

        // Storage configuration
        if let Ok(state_dir) = env::var("KBINDEX_STATE_DIR") {
            self.storage.state_dir = PathBuf::from(state_dir).join("projects");
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.discovery.source_extensions.is_empty() {
            return Err(IndexerError::ConfigError(
                "At least one source extension is required".to_string(),
            ));
        }

        if self.discovery.max_file_size_mb == 0 {
            return Err(IndexerError::ConfigError(
                "Max file size must be non-zero".to_string(),
            ));
        }

        if self.expansion.batch_size == 0 {
            return Err(IndexerError::ConfigError(
                "Batch size must be non-zero".to_string(),
            ));
        }

        if self.expansion.commit_interval == 0 {
            return Err(IndexerError::ConfigError(
                "Commit interval must be non-zero".to_string(),
            ));
        }

        if self.ingestion.base_url.trim().is_empty() {
            return Err(IndexerError::ConfigError(
                "Ingestion base URL must not be empty".to_string(),
            ));
        }

        if self.ingestion.knowledge_base.trim().is_empty() {
            return Err(IndexerError::ConfigError(
                "Knowledge base must not be empty".to_string(),
            ));
        }

        if self.ingestion.timeout_secs == 0 {
            return Err(IndexerError::ConfigError(
                "Ingestion timeout must be non-zero".to_string(),
            ));
        }

        if self.ingestion.max_concurrency == 0 {
            return Err(IndexerError::ConfigError(
                "Ingestion concurrency must be non-zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Log configuration at debug level (redacting sensitive values)
    ///
    /// Runs on every command, so it stays out of the default `info` output.
    pub fn log_config(&self) {
        tracing::debug!("Configuration loaded:");
        tracing::debug!(
            "  Skip dirs: {} entries",
            self.discovery.skip_dirs.len()
        );
        tracing::debug!(
            "  Extensions: {} source, {} config, {} docs",
            self.discovery.source_extensions.len(),
            self.discovery.config_extensions.len(),
            self.discovery.documentation_extensions.len()
        );
        tracing::debug!("  Max file size: {} MB", self.discovery.max_file_size_mb);
        tracing::debug!("  Batch size: {}", self.expansion.batch_size);
        tracing::debug!("  Seed limit: {}", self.expansion.seed_limit);
        tracing::debug!("  Commit interval: {}", self.expansion.commit_interval);
        tracing::debug!("  Ingestion URL: {}", self.ingestion.base_url);
        tracing::debug!("  Knowledge base: {}", self.ingestion.knowledge_base);
        tracing::debug!(
            "  API token: {}",
            if self.ingestion.api_token.is_some() {
                "<set>"
            } else {
                "<none>"
            }
        );
        tracing::debug!("  Ingestion timeout: {}s", self.ingestion.timeout_secs);
        tracing::debug!("  Ingestion concurrency: {}", self.ingestion.max_concurrency);
        tracing::debug!("  State dir: {:?}", self.storage.state_dir);
    }
}
