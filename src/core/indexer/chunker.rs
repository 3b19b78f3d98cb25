//! Logical code chunking.
//!
//! Splits a source file into chunks whose boundaries fall on the
//! start of class-like or function-like declarations. Detection is a
//! single line-by-line pass driven by the
//! [`MarkerScanner`](crate::core::indexer::scanner::MarkerScanner) of the
//! file's language family; no syntax tree is built.
//!
//! Every line of the input belongs to exactly one chunk. Lines before
//! the first declaration form a leading [`ChunkKind::Block`] chunk,
//! and files without any recognized structure become a single
//! [`ChunkKind::File`] chunk.
//!
//! # Example
//!
//! ```
//! use kbindex::core::indexer::Chunker;
//!
//! let chunker = Chunker::new();
//! let text = "import os\n\ndef main():\n    pass\n";
//! let chunks = chunker.chunk_text(text, "tools/run.py");
//!
//! assert_eq!(chunks.len(), 2);
//! assert_eq!(chunks[1].name, "main");
//! assert_eq!(chunks[1].start_line, 2);
//! ```

use std::path::Path;

use crate::core::error::{IndexerError, Result};
use crate::core::indexer::language::Language;
use crate::core::indexer::scanner::{Marker, MarkerKind};
use crate::core::types::{ChunkKind, CodeChunk};

/// Heuristic declaration-boundary chunker.
///
/// Stateless; a fresh scanner is created for each file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chunker;

/// Attribution of the chunk currently being accumulated
struct OpenChunk {
    kind: ChunkKind,
    name: String,
    enclosing_class: Option<String>,
    start_line: usize,
}

impl OpenChunk {
    fn from_marker(marker: Marker, start_line: usize) -> Self {
        let kind = match marker.kind {
            MarkerKind::Class => ChunkKind::Class,
            MarkerKind::Function => ChunkKind::Function,
        };
        Self {
            kind,
            name: marker.name,
            enclosing_class: marker.enclosing_class,
            start_line,
        }
    }
}

impl Chunker {
    pub fn new() -> Self {
        Self
    }

    /// Chunk raw file bytes.
    ///
    /// # Errors
    ///
    /// Returns [`IndexerError::ChunkingFailed`] if the bytes are not
    /// valid UTF-8.
    pub fn chunk_bytes(&self, bytes: &[u8], file: &str) -> Result<Vec<CodeChunk>> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            IndexerError::ChunkingFailed(format!("{file}: not valid UTF-8 ({e})"))
        })?;
        Ok(self.chunk_text(text, file))
    }

    /// Chunk text, detecting the language from the file path.
    pub fn chunk_text(&self, text: &str, file: &str) -> Vec<CodeChunk> {
        self.chunk_with_language(text, file, Language::from_path(file))
    }

    /// Chunk text as the given language.
    ///
    /// Returns an empty vector for empty or whitespace-only input.
    /// Concatenating the returned chunks' content reproduces `text`.
    pub fn chunk_with_language(
        &self,
        text: &str,
        file: &str,
        language: Language,
    ) -> Vec<CodeChunk> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let file_name = Path::new(file)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file)
            .to_string();

        let build = |open: OpenChunk, end_line: usize| CodeChunk {
            kind: open.kind,
            name: open.name,
            enclosing_class: open.enclosing_class,
            file: file.to_string(),
            start_line: open.start_line,
            end_line,
            content: lines[open.start_line..end_line].concat(),
            language: language.as_str().to_string(),
        };

        let whole_file = || OpenChunk {
            kind: ChunkKind::File,
            name: file_name.clone(),
            enclosing_class: None,
            start_line: 0,
        };

        let Some(mut scanner) = language.family().scanner() else {
            return vec![build(whole_file(), lines.len())];
        };

        let mut chunks = Vec::new();
        let mut open = OpenChunk {
            kind: ChunkKind::Block,
            name: file_name.clone(),
            enclosing_class: None,
            start_line: 0,
        };

        for (index, line) in lines.iter().enumerate() {
            let Some(marker) = scanner.observe(line.trim_end_matches(['\n', '\r'])) else {
                continue;
            };
            let next = OpenChunk::from_marker(marker, index);
            if index > open.start_line {
                chunks.push(build(std::mem::replace(&mut open, next), index));
            } else {
                open = next;
            }
        }

        if chunks.is_empty() && open.kind == ChunkKind::Block {
            // No declarations found anywhere in the file
            open = whole_file();
        }
        chunks.push(build(open, lines.len()));

        chunks
    }
}
