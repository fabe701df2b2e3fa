//! Table of contents: the ordered rows that drive an assembly run.
//!
//! Tables are tab-separated text, one row per line:
//!
//! ```text
//! type      id       class     srcTokens   dstTokens
//! defines            common
//! struct    Light    lighting  vec3;pos    vec4;position
//! ```
//!
//! Row 0 is a header and must start with `type`, `id`, `class`.

use crate::error::{BuildError, Result};
use std::fs;
use std::path::Path;

/// Required leading header cells.
pub const HEADER: [&str; 3] = ["type", "id", "class"];

const TOKEN_SEPARATOR: char = ';';

/// Recognised values of the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// Raw text of another document
    Text,
    Struct,
    Function,
    Defines,
    /// Empty type cell, emits a newline
    Blank,
}

impl RowKind {
    pub fn parse(kind: &str) -> Option<Self> {
        match kind {
            "text" => Some(RowKind::Text),
            "struct" => Some(RowKind::Struct),
            "function" => Some(RowKind::Function),
            "defines" => Some(RowKind::Defines),
            "" => Some(RowKind::Blank),
            _ => None,
        }
    }
}

/// One body row of the table, cells kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TocRow {
    pub kind: String,
    pub id: String,
    pub class: String,
    /// `;`-joined search strings
    pub src_tokens: String,
    /// `;`-joined replacements, paired positionally with `src_tokens`
    pub dst_tokens: String,
}

impl TocRow {
    /// Build a row from its cells. Missing cells read as empty, extras are ignored.
    pub fn from_cells<S: AsRef<str>>(cells: &[S]) -> Self {
        let cell = |i: usize| cells.get(i).map(|c| c.as_ref().to_string()).unwrap_or_default();
        Self {
            kind: cell(0),
            id: cell(1),
            class: cell(2),
            src_tokens: cell(3),
            dst_tokens: cell(4),
        }
    }

    pub fn row_kind(&self) -> Result<RowKind> {
        RowKind::parse(&self.kind).ok_or_else(|| BuildError::UnknownRowType {
            kind: self.kind.clone(),
        })
    }

    /// Search/replace pairs, truncated to the shorter of the two lists.
    /// Empty when the row has no search tokens.
    pub fn substitutions(&self) -> Vec<(&str, &str)> {
        if self.src_tokens.is_empty() {
            return Vec::new();
        }
        self.src_tokens
            .split(TOKEN_SEPARATOR)
            .zip(self.dst_tokens.split(TOKEN_SEPARATOR))
            .collect()
    }

    /// Apply every substitution as a literal global replace, in listed order.
    pub fn apply_substitutions(&self, text: String) -> String {
        self.substitutions()
            .into_iter()
            .fold(text, |acc, (from, to)| acc.replace(from, to))
    }
}

/// A parsed table plus the context needed to resolve its `text` rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableOfContents {
    /// Table name, used in the banner and the saved file name
    pub name: String,
    /// Container that `text` row ids are resolved against
    pub container: String,
    pub header: Vec<String>,
    pub rows: Vec<TocRow>,
}

impl TableOfContents {
    /// Parse tab-separated `text`. An empty input has no header.
    pub fn parse(name: impl Into<String>, container: impl Into<String>, text: &str) -> Self {
        let mut lines = text.lines();
        let header = lines
            .next()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .unwrap_or_default();
        let rows = lines
            .map(|line| TocRow::from_cells(&line.split('\t').collect::<Vec<_>>()))
            .collect();
        Self {
            name: name.into(),
            container: container.into(),
            header,
            rows,
        }
    }

    /// Load a table from disk. The name is the file stem and the container is
    /// the directory holding the file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| BuildError::io(path, e))?;
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let container = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_string_lossy().to_string(),
            _ => ".".to_string(),
        };
        Ok(Self::parse(name, container, &text))
    }

    /// True when the header starts with `type`, `id`, `class`.
    pub fn is_valid(&self) -> bool {
        self.header.len() >= HEADER.len()
            && self.header.iter().zip(HEADER).all(|(cell, want)| cell == want)
    }
}
