//! Data model for extracted shader fragments.

use crate::error::{BuildError, Result};
use serde::Serialize;
use std::collections::BTreeMap;

/// A named shader source handed to the catalog builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

/// One extracted function definition, all fields kept as literal source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionEntry {
    /// Return type and name, e.g. `vec3 foo`
    pub signature: String,
    /// Parameter list without the parentheses
    pub params: String,
    /// Statements between the line-anchored braces
    pub body: String,
}

impl FunctionEntry {
    /// Catalog key: the second whitespace-delimited token of the signature.
    pub fn name(&self) -> Option<&str> {
        self.signature.split_whitespace().nth(1)
    }

    pub fn full_signature(&self) -> String {
        format!("{}({})", self.signature, self.params)
    }

    /// Text emitted for a `function` row.
    pub fn render(&self) -> String {
        format!("{}\n{{\n{}\n}}", self.full_signature(), self.body)
    }
}

/// One extracted struct definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructEntry {
    pub name: String,
    /// Member declarations up to the first closing brace
    pub body: String,
}

impl StructEntry {
    /// Text emitted for a `struct` row.
    pub fn render(&self) -> String {
        format!("struct {}\n{{\n{}\n}};", self.name, self.body)
    }
}

/// Everything extracted from a single shader source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShaderClass {
    pub name: String,
    /// `#define` lines in source order, duplicates kept
    pub defines: Vec<String>,
    pub functions: BTreeMap<String, FunctionEntry>,
    pub structs: BTreeMap<String, StructEntry>,
}

impl ShaderClass {
    pub fn function(&self, id: &str) -> Result<&FunctionEntry> {
        self.functions
            .get(id)
            .ok_or_else(|| BuildError::UnknownFunction {
                class: self.name.clone(),
                id: id.to_string(),
            })
    }

    pub fn structure(&self, id: &str) -> Result<&StructEntry> {
        self.structs.get(id).ok_or_else(|| BuildError::UnknownStruct {
            class: self.name.clone(),
            id: id.to_string(),
        })
    }

    /// Text emitted for a `defines` row: every define followed by a newline.
    pub fn render_defines(&self) -> String {
        let mut out = String::new();
        for define in &self.defines {
            out.push_str(define);
            out.push('\n');
        }
        out
    }
}
