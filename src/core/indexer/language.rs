//! Language detection by file extension.
//!
//! Every language maps to exactly one [`LanguageFamily`], which
//! decides how the chunker finds declaration boundaries.

use std::path::Path;

use crate::core::indexer::scanner::{BraceScanner, KeywordScanner, MarkerScanner};

/// Detected language of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Rust,
    Python,
    Ruby,
    JavaScript,
    TypeScript,
    Go,
    Java,
    Kotlin,
    Swift,
    Scala,
    C,
    Cpp,
    CSharp,
    Php,
    Shell,
    Json,
    Yaml,
    Toml,
    Xml,
    Markdown,
    Text,
    Unknown,
}

/// How a language delimits functions and classes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageFamily {
    /// Keyword declarations scoped by indentation (`class`, `def`)
    Keyword,
    /// Keyword or signature declarations scoped by braces
    Brace,
    /// No structure detection; the whole file is one chunk
    Generic,
}

impl Language {
    /// Detect language from file extension
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "rs" => Self::Rust,
            "py" | "pyw" | "pyi" => Self::Python,
            "rb" | "rake" => Self::Ruby,
            "js" | "jsx" | "mjs" | "cjs" => Self::JavaScript,
            "ts" | "tsx" | "mts" | "cts" => Self::TypeScript,
            "go" => Self::Go,
            "java" => Self::Java,
            "kt" | "kts" => Self::Kotlin,
            "swift" => Self::Swift,
            "scala" | "sc" => Self::Scala,
            "c" | "h" => Self::C,
            "cpp" | "cc" | "cxx" | "hpp" | "hh" | "hxx" => Self::Cpp,
            "cs" => Self::CSharp,
            "php" => Self::Php,
            "sh" | "bash" | "zsh" => Self::Shell,
            "json" => Self::Json,
            "yaml" | "yml" => Self::Yaml,
            "toml" => Self::Toml,
            "xml" => Self::Xml,
            "md" | "markdown" => Self::Markdown,
            "txt" | "rst" | "adoc" => Self::Text,
            _ => Self::Unknown,
        }
    }

    /// Detect language from file path
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Unknown, Self::from_extension)
    }

    /// Get language tag as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rust => "rust",
            Self::Python => "python",
            Self::Ruby => "ruby",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Go => "go",
            Self::Java => "java",
            Self::Kotlin => "kotlin",
            Self::Swift => "swift",
            Self::Scala => "scala",
            Self::C => "c",
            Self::Cpp => "cpp",
            Self::CSharp => "csharp",
            Self::Php => "php",
            Self::Shell => "shell",
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Xml => "xml",
            Self::Markdown => "markdown",
            Self::Text => "text",
            Self::Unknown => "unknown",
        }
    }

    pub const fn family(self) -> LanguageFamily {
        match self {
            Self::Python | Self::Ruby => LanguageFamily::Keyword,
            Self::Rust
            | Self::JavaScript
            | Self::TypeScript
            | Self::Go
            | Self::Java
            | Self::Kotlin
            | Self::Swift
            | Self::Scala
            | Self::C
            | Self::Cpp
            | Self::CSharp
            | Self::Php => LanguageFamily::Brace,
            Self::Shell
            | Self::Json
            | Self::Yaml
            | Self::Toml
            | Self::Xml
            | Self::Markdown
            | Self::Text
            | Self::Unknown => LanguageFamily::Generic,
        }
    }
}

impl LanguageFamily {
    /// Fresh scanner for one file, or `None` for whole-file chunking
    pub fn scanner(self) -> Option<Box<dyn MarkerScanner>> {
        match self {
            Self::Keyword => Some(Box::new(KeywordScanner::new())),
            Self::Brace => Some(Box::new(BraceScanner::new())),
            Self::Generic => None,
        }
    }
}
