//! Shader source resolution
//!
//! Turns one of a closed set of input strategies into an ordered
//! stage → source collection. Owns no driver objects.
//!
//! - **Text**: a single vertex source
//! - **Paths**: explicit files, stage inferred from the extension
//! - **Directory**: files named `<base>.<ext>` inside one directory
//! - **Map**: stage → source pairs supplied by the caller

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::shader::StageKind;

// ============================================================================
// ShaderSources
// ============================================================================

/// Ordered stage → source collection
///
/// Iteration order is the order in which each stage was first inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderSources {
    entries: Vec<(StageKind, String)>,
}

impl ShaderSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the source of `kind`
    ///
    /// A replaced stage keeps its original position.
    ///
    /// # Returns
    ///
    /// The previous source of `kind`, if any
    pub fn insert(&mut self, kind: StageKind, source: impl Into<String>) -> Option<String> {
        let source = source.into();
        match self.entries.iter_mut().find(|(k, _)| *k == kind) {
            Some((_, existing)) => {
                crate::lumen_warn!("lumen::SourceResolver",
                    "Duplicate {} stage source, keeping the last one", kind);
                Some(std::mem::replace(existing, source))
            }
            None => {
                self.entries.push((kind, source));
                None
            }
        }
    }

    pub fn get(&self, kind: StageKind) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, source)| source.as_str())
    }

    pub fn contains(&self, kind: StageKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stage kinds in insertion order
    pub fn stage_kinds(&self) -> Vec<StageKind> {
        self.entries.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StageKind, &str)> {
        self.entries.iter().map(|(kind, source)| (*kind, source.as_str()))
    }
}

impl IntoIterator for ShaderSources {
    type Item = (StageKind, String);
    type IntoIter = std::vec::IntoIter<(StageKind, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(StageKind, S)> for ShaderSources {
    fn from_iter<T: IntoIterator<Item = (StageKind, S)>>(iter: T) -> Self {
        let mut sources = ShaderSources::new();
        for (kind, source) in iter {
            sources.insert(kind, source);
        }
        sources
    }
}

// ============================================================================
// SourceResolver
// ============================================================================

/// Source-loading strategy
#[derive(Debug, Clone)]
pub enum SourceResolver {
    /// One vertex-stage source
    Text(String),
    /// Explicit files; every extension must be in `STAGE_EXTENSIONS`
    Paths(Vec<PathBuf>),
    /// Files `<base_name>.<ext>` found directly inside `directory`
    Directory { base_name: String, directory: PathBuf },
    /// Already-resolved stage → source pairs
    Map(Vec<(StageKind, String)>),
}

impl SourceResolver {
    /// Run the strategy
    pub fn resolve(&self) -> Result<ShaderSources> {
        match self {
            SourceResolver::Text(text) => Ok(from_text(text.clone())),
            SourceResolver::Paths(paths) => from_paths(paths),
            SourceResolver::Directory { base_name, directory } => from_directory(base_name, directory),
            SourceResolver::Map(pairs) => Ok(from_map(pairs.iter().cloned())),
        }
    }
}

/// Treat `source` as the vertex stage of a single-stage program
pub fn from_text(source: impl Into<String>) -> ShaderSources {
    let mut sources = ShaderSources::new();
    sources.insert(StageKind::Vertex, source);
    sources
}

/// Pass stage → source pairs through, keeping their order
pub fn from_map<I, S>(pairs: I) -> ShaderSources
where
    I: IntoIterator<Item = (StageKind, S)>,
    S: Into<String>,
{
    pairs.into_iter().collect()
}

/// Classify `path` through the extension table
pub fn stage_for_path(path: &Path) -> Option<StageKind> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(StageKind::from_extension)
}

/// Read each path, inferring its stage from the extension
///
/// # Errors
///
/// `SourceResolutionFailure` if an extension is missing or unsupported, or if
/// a file cannot be read.
pub fn from_paths<P: AsRef<Path>>(paths: &[P]) -> Result<ShaderSources> {
    let mut sources = ShaderSources::new();
    for path in paths {
        let path = path.as_ref();
        let Some(kind) = stage_for_path(path) else {
            crate::lumen_bail!("lumen::SourceResolver", SourceResolutionFailure,
                "{}: unsupported shader file extension", path.display());
        };
        sources.insert(kind, read_source(path)?);
    }
    crate::lumen_debug!("lumen::SourceResolver", "Resolved {} sources from explicit paths", sources.len());
    Ok(sources)
}

/// Collect `<base_name>.<ext>` files from `directory`
///
/// Entries with another stem, an unsupported extension, or that are not
/// regular files (dangling links included) are skipped. Results follow pipeline order.
///
/// # Errors
///
/// `SourceResolutionFailure` on any filesystem error; nothing is returned
/// partially.
pub fn from_directory(base_name: &str, directory: impl AsRef<Path>) -> Result<ShaderSources> {
    let directory = directory.as_ref();
    let entries = fs::read_dir(directory).map_err(|e| crate::lumen_err!("lumen::SourceResolver",
        SourceResolutionFailure, "{}: {}", directory.display(), e))?;

    let mut found: Vec<(StageKind, PathBuf)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| crate::lumen_err!("lumen::SourceResolver",
            SourceResolutionFailure, "{}: {}", directory.display(), e))?;
        let path = entry.path();

        if path.file_stem().and_then(|stem| stem.to_str()) != Some(base_name) {
            continue;
        }
        let Some(kind) = stage_for_path(&path) else {
            continue;
        };
        let is_symlink = entry.file_type().map_err(|e| crate::lumen_err!("lumen::SourceResolver",
            SourceResolutionFailure, "{}: {}", path.display(), e))?.is_symlink();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            // Dangling link: not a regular file
            Err(e) if is_symlink && e.kind() == io::ErrorKind::NotFound => {
                crate::lumen_debug!("lumen::SourceResolver", "Skipping dangling link {}", path.display());
                continue;
            }
            Err(e) => crate::lumen_bail!("lumen::SourceResolver",
                SourceResolutionFailure, "{}: {}", path.display(), e),
        };
        if !metadata.is_file() {
            continue;
        }
        found.push((kind, path));
    }

    // read_dir order is platform-defined
    found.sort_by_key(|(kind, _)| kind.pipeline_index());

    let mut sources = ShaderSources::new();
    for (kind, path) in found {
        sources.insert(kind, read_source(&path)?);
    }
    crate::lumen_debug!("lumen::SourceResolver",
        "Resolved {} sources for '{}' in {}", sources.len(), base_name, directory.display());
    Ok(sources)
}

fn read_source(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| crate::lumen_err!("lumen::SourceResolver",
        SourceResolutionFailure, "{}: {}", path.display(), e))
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
