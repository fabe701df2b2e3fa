//! Document stores: where shader sources and raw text rows come from.

use crate::error::{BuildError, Result};
use crate::model::SourceDocument;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read-only access to named text documents.
pub trait DocumentStore {
    /// Every shader source that feeds the catalog.
    fn shader_sources(&self) -> Result<Vec<SourceDocument>>;

    /// Raw text of the document `id` inside `container`.
    fn resolve_text(&self, container: &str, id: &str) -> Result<String>;
}

impl<S: DocumentStore + ?Sized> DocumentStore for &S {
    fn shader_sources(&self) -> Result<Vec<SourceDocument>> {
        (**self).shader_sources()
    }

    fn resolve_text(&self, container: &str, id: &str) -> Result<String> {
        (**self).resolve_text(container, id)
    }
}

/// Filesystem store. Shader sources are the files of one directory, named by
/// file stem; containers are directories.
#[derive(Debug, Clone)]
pub struct DirStore {
    shader_dir: PathBuf,
}

impl DirStore {
    pub fn new(shader_dir: impl Into<PathBuf>) -> Self {
        Self {
            shader_dir: shader_dir.into(),
        }
    }
}

impl DocumentStore for DirStore {
    fn shader_sources(&self) -> Result<Vec<SourceDocument>> {
        let entries =
            fs::read_dir(&self.shader_dir).map_err(|e| BuildError::io(&self.shader_dir, e))?;

        let mut paths: Vec<PathBuf> = entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|p| p.is_file() && !is_hidden(p))
            .collect();
        // Sorted so that a repeated stem resolves the same way every run
        paths.sort();

        let mut docs = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(name) = path.file_stem().map(|s| s.to_string_lossy().to_string()) else {
                continue;
            };
            let text = fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e))?;
            docs.push(SourceDocument { name, text });
        }
        Ok(docs)
    }

    /// Reads `container/id`, or the first `container/id.*` when `id` has no
    /// extension of its own.
    fn resolve_text(&self, container: &str, id: &str) -> Result<String> {
        let dir = Path::new(container);
        let exact = dir.join(id);
        if exact.is_file() {
            return fs::read_to_string(&exact).map_err(|e| BuildError::io(&exact, e));
        }

        let pattern = format!(
            "{}/{}.*",
            glob::Pattern::escape(&dir.to_string_lossy()),
            glob::Pattern::escape(id)
        );
        let mut matches: Vec<PathBuf> = glob::glob(&pattern)
            .map(|paths| paths.filter_map(|r| r.ok()).filter(|p| p.is_file()).collect::<Vec<_>>())
            .unwrap_or_default();
        matches.sort();

        match matches.into_iter().next() {
            Some(path) => fs::read_to_string(&path).map_err(|e| BuildError::io(&path, e)),
            None => Err(BuildError::TextNotFound {
                container: container.to_string(),
                id: id.to_string(),
            }),
        }
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}

/// In-memory store for library callers that already hold their sources.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    sources: Vec<SourceDocument>,
    texts: HashMap<(String, String), String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_source(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.sources.push(SourceDocument::new(name, text));
        self
    }

    pub fn with_text(
        mut self,
        container: impl Into<String>,
        id: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        self.texts.insert((container.into(), id.into()), text.into());
        self
    }

    /// Replace the text of an existing source, or add it.
    pub fn set_source(&mut self, name: &str, text: impl Into<String>) {
        let text = text.into();
        match self.sources.iter_mut().find(|d| d.name == name) {
            Some(doc) => doc.text = text,
            None => self.sources.push(SourceDocument::new(name, text)),
        }
    }
}

impl DocumentStore for MemoryStore {
    fn shader_sources(&self) -> Result<Vec<SourceDocument>> {
        Ok(self.sources.clone())
    }

    fn resolve_text(&self, container: &str, id: &str) -> Result<String> {
        self.texts
            .get(&(container.to_string(), id.to_string()))
            .cloned()
            .ok_or_else(|| BuildError::TextNotFound {
                container: container.to_string(),
                id: id.to_string(),
            })
    }
}
