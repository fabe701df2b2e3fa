//! shaderbuild — assemble GLSL shaders from a catalog of reusable fragments.
//!
//! Shader sources are scanned for `#define` lines, functions and structs
//! ([`extract`]), indexed per source into a [`Catalog`], and stitched back
//! together by an [`Assembler`] walking a tab-separated table of contents
//! ([`TableOfContents`]) with optional literal find/replace per row.

pub mod assemble;
pub mod catalog;
pub mod error;
pub mod extract;
pub mod model;
pub mod output;
pub mod store;
pub mod toc;

pub use assemble::{Assembler, DEFAULT_LABEL};
pub use catalog::Catalog;
pub use error::{BuildError, Result};
pub use model::{FunctionEntry, ShaderClass, SourceDocument, StructEntry};
pub use output::OutputDocument;
pub use store::{DirStore, DocumentStore, MemoryStore};
pub use toc::{RowKind, TableOfContents, TocRow};
