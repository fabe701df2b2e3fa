//! Shader catalog: one [`ShaderClass`] per source document.

use crate::error::{BuildError, Result};
use crate::extract;
use crate::model::{ShaderClass, SourceDocument};
use serde::Serialize;
use std::collections::BTreeMap;

/// Extracted fragments of every known shader source, keyed by source name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Catalog {
    classes: BTreeMap<String, ShaderClass>,
}

impl Catalog {
    /// Build a fresh catalog from `documents`.
    ///
    /// A later document with an already-seen name replaces the earlier one.
    pub fn build(documents: &[SourceDocument]) -> Self {
        let mut classes = BTreeMap::new();
        for doc in documents {
            let class = ShaderClass::from_source(&doc.name, &doc.text);
            log::debug!(
                "{}: {} defines, {} functions, {} structs",
                class.name,
                class.defines.len(),
                class.functions.len(),
                class.structs.len()
            );
            if classes.insert(doc.name.clone(), class).is_some() {
                log::warn!("shader class {} defined more than once, keeping the last", doc.name);
            }
        }
        Self { classes }
    }

    pub fn class(&self, name: &str) -> Result<&ShaderClass> {
        self.classes.get(name).ok_or_else(|| BuildError::UnknownClass {
            class: name.to_string(),
        })
    }

    pub fn classes(&self) -> impl Iterator<Item = &ShaderClass> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl ShaderClass {
    /// Run the extractor over one source and index the results by name.
    ///
    /// Duplicate names keep the last definition found.
    pub fn from_source(name: &str, text: &str) -> Self {
        let found = extract::extract(text);
        let mut class = ShaderClass {
            name: name.to_string(),
            defines: extract::extract_defines(text),
            ..Default::default()
        };

        for func in found.functions {
            let Some(key) = func.name().map(str::to_string) else {
                continue;
            };
            if class.functions.insert(key.clone(), func).is_some() {
                log::debug!("{}: function {} redefined, keeping the last", name, key);
            }
        }

        for stru in found.structs {
            let key = stru.name.clone();
            if class.structs.insert(key.clone(), stru).is_some() {
                log::debug!("{}: struct {} redefined, keeping the last", name, key);
            }
        }

        class
    }
}
