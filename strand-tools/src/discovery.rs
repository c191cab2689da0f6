//! Discovery of wrapper modules in a legacy catalog tree
//!
//! The on-disk wrapper catalog follows a fixed filesystem convention: each
//! tool-family directory contains a marker subdirectory named `mcp` holding
//! wrapper source files named `run_<tool>.py`. That convention IS the
//! discovery protocol, so the constants below must not change.

use std::fs;
use std::path::{Path, PathBuf};

use strand_core::{StrandError, StrandResult};

/// Marker directory that holds wrapper modules within a tool family
pub const MARKER_DIR: &str = "mcp";
/// Filename prefix shared by all wrapper modules
pub const WRAPPER_PREFIX: &str = "run_";
/// Extension of wrapper module files
pub const WRAPPER_EXT: &str = "py";

/// Dotted module path of one discovered wrapper file.
///
/// Derived deterministically from the file's location relative to the
/// catalog package's parent directory, with path separators replaced by `.`
/// and the extension stripped. Unique per discovered file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModulePath(String);

impl ModulePath {
    /// Derive the module path for a wrapper file.
    ///
    /// `package_parent` is the directory CONTAINING the catalog root, so the
    /// catalog's own directory name becomes the first segment.
    pub fn from_source(file: &Path, package_parent: &Path) -> StrandResult<Self> {
        let rel = file.strip_prefix(package_parent).map_err(|_| {
            StrandError::InvalidInput(format!(
                "{} is not under the catalog parent {}",
                file.display(),
                package_parent.display()
            ))
        })?;

        let mut segments = Vec::new();
        for component in rel.components() {
            let segment = component
                .as_os_str()
                .to_str()
                .ok_or_else(|| {
                    StrandError::InvalidInput(format!(
                        "non-UTF-8 path component in {}",
                        file.display()
                    ))
                })?
                .to_string();
            segments.push(segment);
        }
        if let Some(last) = segments.last_mut() {
            if let Some(stem) = last.strip_suffix(&format!(".{}", WRAPPER_EXT)) {
                *last = stem.to_string();
            }
        }
        Ok(Self(segments.join(".")))
    }

    /// Inverse of [`ModulePath::from_source`]: the source file this module
    /// path refers to, given the same catalog parent directory.
    pub fn source_path(&self, package_parent: &Path) -> PathBuf {
        let segments: Vec<&str> = self.0.split('.').collect();
        let mut path = package_parent.to_path_buf();
        for (i, segment) in segments.iter().enumerate() {
            if i + 1 == segments.len() {
                path.push(format!("{}.{}", segment, WRAPPER_EXT));
            } else {
                path.push(segment);
            }
        }
        path
    }

    /// Tool name implied by the module's file stem (`run_foo` -> `foo`)
    pub fn tool_name(&self) -> Option<&str> {
        self.0
            .rsplit('.')
            .next()
            .and_then(|stem| stem.strip_prefix(WRAPPER_PREFIX))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ModulePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Locate every wrapper module under `root_dir`.
///
/// Recursively searches for `mcp` marker directories and collects the
/// `run_*.py` files inside them, in filesystem-traversal order. Directories
/// with the reserved `__` prefix (e.g. `__pycache__`) are skipped. A tree
/// with no matches yields an empty vec.
pub fn find_candidate_modules(root_dir: &Path) -> StrandResult<Vec<ModulePath>> {
    let package_parent = root_dir.parent().unwrap_or_else(|| Path::new(""));
    let mut found = Vec::new();
    walk(root_dir, package_parent, &mut found)?;
    Ok(found)
}

fn walk(dir: &Path, package_parent: &Path, found: &mut Vec<ModulePath>) -> StrandResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("__") {
            continue;
        }
        if name == MARKER_DIR {
            collect_wrappers(&path, package_parent, found)?;
        } else {
            walk(&path, package_parent, found)?;
        }
    }
    Ok(())
}

fn collect_wrappers(
    marker_dir: &Path,
    package_parent: &Path,
    found: &mut Vec<ModulePath>,
) -> StrandResult<()> {
    for entry in fs::read_dir(marker_dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with(WRAPPER_PREFIX) && name.ends_with(&format!(".{}", WRAPPER_EXT)) {
            found.push(ModulePath::from_source(&path, package_parent)?);
        }
    }
    Ok(())
}
