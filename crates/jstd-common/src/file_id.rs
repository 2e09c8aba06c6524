//! Canonical source-file identity.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Identity of a source file.
///
/// Two `FileId`s compare equal exactly when their paths are equal, so
/// callers that need "same file on disk" semantics should construct ids
/// through [`FileId::canonical`], which resolves symlinks and relative
/// components. [`FileId::new`] keeps the path as given, which is what
/// tests and in-memory project scopes want.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileId(PathBuf);

impl FileId {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Build an id from the canonicalized form of `path`. Fails when the
    /// path has no backing file (the caller decides whether that is fatal).
    pub fn canonical(path: &Path) -> std::io::Result<Self> {
        Ok(Self(path.canonicalize()?))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Final path component as UTF-8, if it has one.
    pub fn file_name(&self) -> Option<&str> {
        self.0.file_name().and_then(|name| name.to_str())
    }

    /// Containing directory, if any.
    pub fn parent(&self) -> Option<&Path> {
        self.0.parent()
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for FileId {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for FileId {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for FileId {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}
