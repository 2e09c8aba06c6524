//! Seams to the host symbol index and project classification.
//!
//! The resolver never inspects syntax trees itself; it consumes an
//! already-built symbol-reference index through [`ReferenceResolver`] and
//! file classification through [`FileClassifier`]. Both are narrow traits
//! so the graph algorithm stays independent of how symbol resolution is
//! actually implemented.

use jstd_common::FileId;
use std::fmt;

/// One resolved candidate target of one referencing expression: an
/// expression in `from` resolves to a declaration physically located in
/// `to`. An ambiguous reference produces one edge per candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceEdge {
    pub from: FileId,
    pub to: FileId,
}

impl ReferenceEdge {
    pub fn new(from: FileId, to: FileId) -> Self {
        Self { from, to }
    }
}

/// Failure of the host index while resolving one file's references.
///
/// Local to that file: the graph builder treats the file as having no
/// further dependencies instead of aborting the run.
#[derive(Debug, Clone)]
pub struct ReferenceError {
    pub file: FileId,
    pub message: String,
}

impl ReferenceError {
    pub fn new(file: FileId, message: impl Into<String>) -> Self {
        Self {
            file,
            message: message.into(),
        }
    }
}

impl fmt::Display for ReferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to resolve references of {}: {}", self.file, self.message)
    }
}

impl std::error::Error for ReferenceError {}

/// Read-only view of the host's symbol-reference index.
pub trait ReferenceResolver {
    /// Every outgoing reference of `file`, expanded to one edge per valid
    /// resolution target. Dead/unresolvable references and
    /// non-reference-capable expressions (literals) must be excluded; an
    /// empty list is valid and means the file depends on nothing.
    ///
    /// Callers assume the underlying file/symbol data is a quiescent
    /// snapshot for the duration of one resolution run.
    fn resolve_references(&self, file: &FileId) -> Result<Vec<ReferenceEdge>, ReferenceError>;
}

/// File classification supplied by the host environment's project index.
pub trait FileClassifier {
    /// Framework/vendor file, assumed self-contained: it may satisfy other
    /// files' dependencies but is never expanded for its own.
    fn is_library_file(&self, file: &FileId) -> bool;

    /// Synthetic/builtin file representing global environment symbols;
    /// never a dependency edge target.
    fn is_predefined(&self, file: &FileId) -> bool;
}
