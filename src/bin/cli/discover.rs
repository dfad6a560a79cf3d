//! Source discovery and file I/O
//!
//! Expands command-line paths into specification files and reads/writes them.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

use lemma_scan::{LemmaScanError, Result};

/// Extension of specification files picked up from directories
const SPEC_EXTENSION: &str = "dfy";

/// A specification file to process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    /// Path relative to the argument it was found under (file name for file arguments)
    pub relative: PathBuf,
}

/// Expand files and directories into source files, in a stable order
pub fn discover_sources(paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
    let mut sources = Vec::new();

    for root in paths {
        if root.is_file() {
            let relative = root
                .file_name()
                .map(PathBuf::from)
                .unwrap_or_else(|| root.clone());
            sources.push(SourceFile {
                path: root.clone(),
                relative,
            });
            continue;
        }

        if !root.is_dir() {
            return Err(LemmaScanError::io(
                root,
                io::Error::new(io::ErrorKind::NotFound, "no such file or directory"),
            ));
        }

        for entry in WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped(e))
        {
            let entry = entry.map_err(|e| LemmaScanError::io(root, e.into()))?;
            let path = entry.path();
            if entry.file_type().is_file()
                && path.extension().and_then(|s| s.to_str()) == Some(SPEC_EXTENSION)
            {
                let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
                sources.push(SourceFile {
                    path: path.to_path_buf(),
                    relative,
                });
            }
        }
    }

    log::debug!("discovered {} source file(s)", sources.len());
    Ok(sources)
}

/// First relative path shared by two sources, which would collide under one output directory
pub fn find_duplicate_relative(sources: &[SourceFile]) -> Option<&Path> {
    let mut seen = HashSet::new();
    sources
        .iter()
        .map(|source| source.relative.as_path())
        .find(|relative| !seen.insert(*relative))
}

/// Skip hidden entries and build output directories
fn is_skipped(entry: &DirEntry) -> bool {
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && name == "target")
}

pub fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| LemmaScanError::io(path, e))
}

/// Write `content` to `path`, creating parent directories
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| LemmaScanError::io(parent, e))?;
    }
    fs::write(path, content).map_err(|e| LemmaScanError::io(path, e))
}
