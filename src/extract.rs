//! Fragment extraction from GLSL source text.
//!
//! Two independent passes over the text, one for function definitions and
//! one for struct definitions, plus a line scan for `#define`s. A candidate
//! head is located with a regex; the rest of the construct is scanned by hand.
//! When a candidate does not complete, scanning resumes one character after
//! its start, so matches never overlap and appear in source order.
//! Boundaries come from these line-anchored shapes alone; brace depth is never tracked.
//!
//! Function definitions must be laid out as
//!
//! ```text
//! vec3 foo(float x)
//! {
//! return x;
//! }
//! ```
//!
//! with both braces at the start of their own line. The body ends at the first
//! line starting with `}`, which lets nested blocks through as long as their
//! closing braces are indented.
//!
//! Struct bodies end at the first `}` anywhere, so a nested `{...}` inside a
//! struct truncates the body at the inner closing brace. Downstream tables rely
//! on these boundaries; keep them.

use crate::model::{FunctionEntry, StructEntry};
use regex::Regex;
use std::sync::LazyLock;

static RE_FUNCTION_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(\w+\s+\w+)\s*\(").unwrap());

static RE_STRUCT_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bstruct\s+(\w+)\s*\{").unwrap());

const DEFINE_PREFIX: &str = "#define";

/// Functions and structs found in one source, in order of appearance.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Extraction {
    pub functions: Vec<FunctionEntry>,
    pub structs: Vec<StructEntry>,
}

/// Extract every function and struct definition from `text`.
///
/// Never fails: malformed constructs are skipped.
pub fn extract(text: &str) -> Extraction {
    Extraction {
        functions: extract_functions(text),
        structs: extract_structs(text),
    }
}

/// Collect lines beginning with `#define`, verbatim and in order.
pub fn extract_defines(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| line.starts_with(DEFINE_PREFIX))
        .map(str::to_string)
        .collect()
}

pub fn extract_functions(text: &str) -> Vec<FunctionEntry> {
    let mut functions = Vec::new();
    let mut pos = 0;

    while let Some(caps) = RE_FUNCTION_HEAD.captures_at(text, pos) {
        let Some(head) = caps.get(0) else { break };
        match scan_function_tail(text, head.end()) {
            Some((params, body, end)) => {
                functions.push(FunctionEntry {
                    signature: caps[1].to_string(),
                    params: params.to_string(),
                    body: body.to_string(),
                });
                pos = end;
            }
            None => pos = next_char(text, head.start()),
        }
    }

    functions
}

pub fn extract_structs(text: &str) -> Vec<StructEntry> {
    let mut structs = Vec::new();
    let mut pos = 0;

    while let Some(caps) = RE_STRUCT_HEAD.captures_at(text, pos) {
        let Some(head) = caps.get(0) else { break };
        let open = head.end();
        match text[open..].find('}') {
            // Body must be non-empty
            Some(len) if len > 0 => {
                structs.push(StructEntry {
                    name: caps[1].to_string(),
                    body: text[open..open + len].to_string(),
                });
                pos = open + len + 1;
            }
            _ => pos = next_char(text, head.start()),
        }
    }

    structs
}

/// Scan `params ) <ws> \n{\n body \n}` starting just past the `(`.
///
/// Returns the params, the body (without the newline before the closing
/// brace), and the offset just past the closing brace.
fn scan_function_tail(text: &str, open: usize) -> Option<(&str, &str, usize)> {
    let close = open + text[open..].find(')')?;
    let params = &text[open..close];

    let after = close + 1;
    let brace = after + text[after..].find(|c: char| !c.is_whitespace())?;
    if !text[..brace].ends_with('\n') || !text[brace..].starts_with("{\n") {
        return None;
    }

    let body_start = brace + 2;
    let body_end = if text[body_start..].starts_with('}') {
        body_start
    } else {
        body_start + text[body_start..].find("\n}")? + 1
    };
    let body = &text[body_start..body_end];
    let body = body.strip_suffix('\n').unwrap_or(body);

    Some((params, body, body_end + 1))
}

fn next_char(text: &str, at: usize) -> usize {
    at + text[at..].chars().next().map_or(1, char::len_utf8)
}
