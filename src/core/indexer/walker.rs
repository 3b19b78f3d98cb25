//! Repository file discovery with tiered prioritization.
//!
//! Traverses a project tree, prunes noise directories, classifies
//! each file by extension into a [`FileTier`], and returns candidates
//! ordered source first, then configuration, then documentation.
//! Unreadable subtrees are logged and skipped without failing the walk.

use glob::Pattern;
use std::collections::{HashMap, HashSet};
use std::path::{Component, Path};
use walkdir::{DirEntry, WalkDir};

use crate::core::config::DiscoveryConfig;
use crate::core::error::{IndexerError, Result};
use crate::core::types::{FileCandidate, FileTier};

/// Explicit discovery rule set
#[derive(Debug, Clone)]
pub struct DiscoveryRules {
    /// Directory names pruned anywhere in the tree
    skip_dirs: HashSet<String>,

    /// Also prune any directory whose name starts with '.'
    skip_hidden_dirs: bool,

    /// Lowercased extension to tier
    tiers: HashMap<String, FileTier>,

    /// Patterns matched against repository-relative paths
    exclude_patterns: Vec<Pattern>,

    /// Maximum file size in bytes (skip larger files)
    max_file_size_bytes: u64,
}

impl DiscoveryRules {
    /// Build rules from the `[discovery]` config section
    ///
    /// An extension listed under several tiers takes the highest
    /// priority one.
    pub fn from_config(config: &DiscoveryConfig) -> Result<Self> {
        let mut tiers = HashMap::new();
        let listed = [
            (FileTier::Documentation, &config.documentation_extensions),
            (FileTier::Config, &config.config_extensions),
            (FileTier::Source, &config.source_extensions),
        ];
        for (tier, extensions) in listed {
            for ext in extensions {
                let ext = ext.trim_start_matches('.').to_ascii_lowercase();
                tiers.insert(ext, tier);
            }
        }

        let exclude_patterns = config
            .exclude_patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| {
                    IndexerError::ConfigError(format!("Invalid exclude pattern '{p}': {e}"))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            skip_dirs: config.skip_dirs.iter().cloned().collect(),
            skip_hidden_dirs: config.skip_hidden_dirs,
            tiers,
            exclude_patterns,
            max_file_size_bytes: (config.max_file_size_mb as u64) * 1024 * 1024,
        })
    }

    fn skips_dir(&self, name: &str) -> bool {
        self.skip_dirs.contains(name) || (self.skip_hidden_dirs && name.starts_with('.'))
    }

    fn is_excluded(&self, relative: &str) -> bool {
        self.exclude_patterns.iter().any(|p| p.matches(relative))
    }

    fn tier_of(&self, relative: &str) -> Option<(FileTier, String)> {
        let ext = Path::new(relative)
            .extension()
            .and_then(|e| e.to_str())?
            .to_ascii_lowercase();
        self.tiers.get(&ext).map(|tier| (*tier, ext))
    }
}

/// Walks a project root and produces prioritized file candidates
#[derive(Debug, Clone)]
pub struct FileDiscoverer {
    rules: DiscoveryRules,
}

impl FileDiscoverer {
    pub fn new(rules: DiscoveryRules) -> Self {
        Self { rules }
    }

    /// Full candidate set for `root`
    pub fn discover(&self, root: &Path) -> Result<Vec<FileCandidate>> {
        self.discover_limited(root, None)
    }

    /// Candidate set for `root`, truncated to `limit` when given
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::InvalidPath`] if `root` does not exist
    /// or is not a directory.
    pub fn discover_limited(&self, root: &Path, limit: Option<usize>) -> Result<Vec<FileCandidate>> {
        if !root.is_dir() {
            return Err(IndexerError::InvalidPath(format!(
                "Project root is not a directory: {}",
                root.display()
            )));
        }

        let mut candidates = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .into_iter()
            .filter_entry(|e| self.should_descend(e, root))
        {
            match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        continue;
                    }

                    let Some(relative) = relative_path(entry.path(), root) else {
                        tracing::debug!("Skipping non UTF-8 path: {:?}", entry.path());
                        continue;
                    };

                    let Some((tier, extension)) = self.classify_relative(&relative) else {
                        continue;
                    };

                    if let Ok(metadata) = entry.metadata() {
                        if metadata.len() > self.rules.max_file_size_bytes {
                            tracing::debug!(
                                "Skipping large file: {} ({} bytes)",
                                relative,
                                metadata.len()
                            );
                            continue;
                        }
                    }

                    candidates.push(FileCandidate {
                        path: relative,
                        absolute_path: entry.path().to_path_buf(),
                        tier,
                        extension,
                    });
                }
                Err(e) => {
                    tracing::warn!("Walk error: {}", e);
                }
            }
        }

        candidates.sort_by(|a, b| a.tier.cmp(&b.tier).then_with(|| a.path.cmp(&b.path)));
        candidates.dedup_by(|a, b| a.path == b.path);

        if let Some(limit) = limit {
            candidates.truncate(limit);
        }

        tracing::debug!(
            "Discovered {} candidate files under {}",
            candidates.len(),
            root.display()
        );

        Ok(candidates)
    }

    /// Tier of a repository-relative path under these rules
    ///
    /// Returns `None` when the path sits inside a pruned directory,
    /// matches an exclude pattern, or has an unclassified extension.
    /// The filesystem is not consulted.
    pub fn classify(&self, relative: &str) -> Option<FileTier> {
        self.classify_relative(relative).map(|(tier, _)| tier)
    }

    /// Build a candidate for one path, applying every discovery rule
    ///
    /// `path` may be absolute or relative to `root`. Missing, oversized
    /// or excluded files yield `None`.
    pub fn candidate(&self, root: &Path, path: &Path) -> Option<FileCandidate> {
        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            root.join(path)
        };
        let relative = relative_path(&absolute, root)?;
        let (tier, extension) = self.classify_relative(&relative)?;

        let metadata = std::fs::metadata(&absolute).ok()?;
        if !metadata.is_file() || metadata.len() > self.rules.max_file_size_bytes {
            return None;
        }

        Some(FileCandidate {
            path: relative,
            absolute_path: absolute,
            tier,
            extension,
        })
    }

    fn classify_relative(&self, relative: &str) -> Option<(FileTier, String)> {
        let mut parts: Vec<&str> = relative.split('/').collect();
        parts.pop();
        if parts.iter().any(|dir| self.rules.skips_dir(dir)) {
            return None;
        }
        if self.rules.is_excluded(relative) {
            return None;
        }
        self.rules.tier_of(relative)
    }

    /// Never prunes the root itself
    fn should_descend(&self, entry: &DirEntry, root: &Path) -> bool {
        if entry.path() == root || !entry.file_type().is_dir() {
            return true;
        }

        let Some(name) = entry.file_name().to_str() else {
            return false;
        };

        if self.rules.skips_dir(name) {
            tracing::debug!("Skipping directory: {:?}", entry.path());
            return false;
        }

        match relative_path(entry.path(), root) {
            Some(relative) => !self.rules.is_excluded(&relative),
            None => false,
        }
    }
}

/// `/`-separated path of `path` relative to `root`
///
/// Returns `None` for paths outside `root`, paths that climb with
/// `..`, or non UTF-8 components.
fn relative_path(path: &Path, root: &Path) -> Option<String> {
    let stripped = path.strip_prefix(root).ok()?;
    let mut parts = Vec::new();
    for component in stripped.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("/"))
}
