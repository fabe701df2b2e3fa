//! shaderbuild — assemble GLSL shaders from a catalog of reusable fragments.
//!
//! Two subcommands:
//!
//! - **build**: `shaderbuild build --shaders shaders/ tables/*.tsv`
//!   assembles every table of contents to stdout, or to
//!   `<prepend-path><table>.glsl` with `--save`
//! - **catalog**: `shaderbuild catalog --shaders shaders/` dumps the extracted
//!   defines, functions and structs as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use shaderbuild::output::artifact_path;
use shaderbuild::{Assembler, DirStore, OutputDocument, TableOfContents, DEFAULT_LABEL};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "shaderbuild",
    about = "Extract GLSL fragments into a catalog and assemble shaders from tables of contents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Assemble shaders from tab-separated tables of contents
    Build {
        /// Table files (glob patterns supported)
        #[arg(required = true)]
        tables: Vec<String>,

        /// Directory holding the shader sources that feed the catalog
        #[arg(short = 's', long, default_value = "shaders")]
        shaders: PathBuf,

        /// Label on the first banner line
        #[arg(short = 'l', long, default_value = DEFAULT_LABEL)]
        label: String,

        /// Save each result to <prepend-path><table>.glsl instead of stdout
        #[arg(long)]
        save: bool,

        /// Prefix for saved file names. Used as a plain string, so keep the
        /// trailing slash for directories.
        #[arg(short = 'p', long, default_value = "./")]
        prepend_path: String,
    },

    /// Print the shader catalog as JSON
    Catalog {
        /// Directory holding the shader sources
        #[arg(short = 's', long, default_value = "shaders")]
        shaders: PathBuf,

        /// Only print this shader class
        #[arg(short = 'c', long)]
        class: Option<String>,
    },
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match cli.command {
        Command::Build {
            tables,
            shaders,
            label,
            save,
            prepend_path,
        } => build(&tables, &shaders, &label, save.then_some(prepend_path.as_str())),
        Command::Catalog { shaders, class } => catalog(&shaders, class.as_deref()),
    }
}

/// Assemble each table with a fresh catalog; `save` carries the prepend path.
fn build(patterns: &[String], shaders: &Path, label: &str, save: Option<&str>) -> Result<()> {
    let mut assembler = Assembler::new(DirStore::new(shaders)).with_label(label);
    let mut stdout = io::stdout().lock();

    for path in expand_globs(patterns)? {
        let toc = TableOfContents::from_file(&path)
            .with_context(|| format!("failed to read table {}", path.display()))?;
        let mut out = OutputDocument::new(&toc.name);

        let written = assembler
            .write_shader(&toc, &mut out)
            .with_context(|| format!("failed to assemble {}", path.display()))?;
        if !written {
            continue;
        }

        match save {
            Some(prepend) => out.save(&artifact_path(prepend, &toc.name))?,
            None => stdout
                .write_all(out.text().as_bytes())
                .context("failed to write stdout")?,
        }
    }

    Ok(())
}

fn catalog(shaders: &Path, class: Option<&str>) -> Result<()> {
    let mut assembler = Assembler::new(DirStore::new(shaders));
    let catalog = assembler
        .rebuild_catalog()
        .with_context(|| format!("failed to read shaders from {}", shaders.display()))?;

    let json = match class {
        Some(name) => serde_json::to_string_pretty(catalog.class(name)?)?,
        None => serde_json::to_string_pretty(catalog)?,
    };
    println!("{json}");
    Ok(())
}

/// Expand glob patterns into table paths, keeping argument order.
/// Plain paths that do not exist are passed through so reading them reports
/// the error.
fn expand_globs(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() || !is_glob(pattern) {
            files.push(path.to_path_buf());
            continue;
        }
        let mut matches: Vec<_> = glob::glob(pattern)
            .with_context(|| format!("invalid glob pattern: {}", pattern))?
            .filter_map(|r| r.ok())
            .filter(|p| p.is_file())
            .collect();
        if matches.is_empty() {
            log::warn!("no tables matched: {}", pattern);
        }
        matches.sort();
        files.extend(matches);
    }
    Ok(files)
}

fn is_glob(pattern: &str) -> bool {
    pattern.contains(['*', '?', '['])
}
