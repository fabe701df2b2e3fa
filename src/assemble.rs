//! Assembler: walk a table of contents and write the resulting shader.

use crate::catalog::Catalog;
use crate::error::{BuildError, Result};
use crate::output::OutputDocument;
use crate::store::DocumentStore;
use crate::toc::{RowKind, TableOfContents, TocRow};
use chrono::NaiveDateTime;

/// Banner label used when none is configured.
pub const DEFAULT_LABEL: &str = "Shader Build";

const AUTOGENERATED: &str = "// AUTOGENERATED by Shader Build System";
const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Owns the document store and the catalog built from it.
///
/// The catalog starts empty and is replaced wholesale on every rebuild.
pub struct Assembler<S> {
    store: S,
    catalog: Catalog,
    label: String,
}

impl<S: DocumentStore> Assembler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            catalog: Catalog::default(),
            label: DEFAULT_LABEL.to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Re-extract every shader source. On error the previous catalog is kept.
    pub fn rebuild_catalog(&mut self) -> Result<&Catalog> {
        let sources = self.store.shader_sources()?;
        self.catalog = Catalog::build(&sources);
        log::debug!("catalog rebuilt: {} classes", self.catalog.len());
        Ok(&self.catalog)
    }

    /// Rebuild the catalog and assemble `toc` into `out`, stamped with the
    /// local time.
    ///
    /// Returns `Ok(false)` and leaves `out` untouched when the table header is
    /// not `type`, `id`, `class`. On error `out` is left untouched as well.
    pub fn write_shader(&mut self, toc: &TableOfContents, out: &mut OutputDocument) -> Result<bool> {
        self.write_shader_at(toc, out, chrono::Local::now().naive_local())
    }

    pub fn write_shader_at(
        &mut self,
        toc: &TableOfContents,
        out: &mut OutputDocument,
        timestamp: NaiveDateTime,
    ) -> Result<bool> {
        self.rebuild_catalog()?;

        if !toc.is_valid() {
            log::warn!("{}: header is not type/id/class, skipping", toc.name);
            return Ok(false);
        }

        // `out` is only replaced once every row has rendered
        let mut buf = banner(&self.label, &toc.name, timestamp);
        for (i, row) in toc.rows.iter().enumerate() {
            let text = self
                .render_row(toc, row)
                .map_err(|e| BuildError::AtRow {
                    row: i + 1,
                    source: Box::new(e),
                })?;
            buf.push_str(&row.apply_substitutions(text));
            buf.push('\n');
        }

        out.clear();
        out.write(&buf);
        Ok(true)
    }

    /// Text a single row contributes, before substitutions.
    pub fn render_row(&self, toc: &TableOfContents, row: &TocRow) -> Result<String> {
        match row.row_kind()? {
            RowKind::Text => self.store.resolve_text(&toc.container, &row.id),
            RowKind::Struct => Ok(self.catalog.class(&row.class)?.structure(&row.id)?.render()),
            RowKind::Function => Ok(self.catalog.class(&row.class)?.function(&row.id)?.render()),
            RowKind::Defines => Ok(self.catalog.class(&row.class)?.render_defines()),
            RowKind::Blank => Ok("\n".to_string()),
        }
    }
}

/// The three comment lines heading every generated shader.
pub fn banner(label: &str, table: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "// {label}: {table}\n{AUTOGENERATED}\n// DATE: {}\n",
        timestamp.format(DATE_FORMAT)
    )
}
