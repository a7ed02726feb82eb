//! Source inputs and the set of files handed to a batch parse.

use std::sync::Arc;

use indexmap::IndexMap;

use super::FileId;

/// One input document: a display name, its path and its full text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Source {
    /// Identifier assigned by the owning [`SourceSet`] (`file#0` otherwise).
    pub file: FileId,
    pub name: Arc<str>,
    pub path: Arc<str>,
    pub text: Arc<str>,
}

impl Source {
    pub fn new(name: impl Into<Arc<str>>, path: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        Self {
            file: FileId::default(),
            name: name.into(),
            path: path.into(),
            text: text.into(),
        }
    }

    /// Build a source whose name is the final component of `path`.
    pub fn from_path(path: impl Into<Arc<str>>, text: impl Into<Arc<str>>) -> Self {
        let path = path.into();
        let name: Arc<str> = match path.rfind(['/', '\\']) {
            Some(idx) => Arc::from(&path[idx + 1..]),
            None => path.clone(),
        };
        Self::new(name, path, text)
    }

    /// The verbatim slice of the text covered by a byte range.
    ///
    /// Out-of-bounds or non-boundary ranges yield an empty string.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        self.text.get(start..end).unwrap_or_default()
    }
}

/// The set of sources parsed together.
///
/// Insertion order is preserved and each source receives a stable
/// [`FileId`] equal to its insertion index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceSet {
    files: IndexMap<FileId, Source>,
}

impl SourceSet {
    /// Create a new empty source set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a source, returning the id assigned to it.
    pub fn insert(&mut self, mut source: Source) -> FileId {
        let file = FileId::new(self.files.len() as u32);
        source.file = file;
        self.files.insert(file, source);
        file
    }

    /// Get a source by id.
    pub fn get(&self, file: FileId) -> Option<&Source> {
        self.files.get(&file)
    }

    /// Get the path for a file.
    pub fn path(&self, file: FileId) -> Option<&str> {
        self.files.get(&file).map(|s| s.path.as_ref())
    }

    /// Iterate over all sources in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Source> + '_ {
        self.files.values()
    }

    /// Get the number of files.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if the source set is empty.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
