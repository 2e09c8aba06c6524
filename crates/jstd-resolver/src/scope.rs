//! Project scope: which files exist, and where.

use jstd_common::FileId;
use rustc_hash::{FxHashMap, FxHashSet};
use std::path::Path;
use walkdir::WalkDir;

/// Enumeration view of the project (and its libraries) used for entry-file
/// validation and for special-case candidate lookup.
pub trait ProjectScope {
    /// Every file in scope whose final path component equals `name`, in
    /// the scope's stable enumeration order.
    fn files_named(&self, name: &str) -> Vec<FileId>;

    /// Whether `file` maps to a loadable file in this scope.
    fn contains(&self, file: &FileId) -> bool;
}

/// Filesystem-backed scope over one project root.
///
/// Scans once at construction (a quiescent snapshot); unreadable entries
/// are skipped silently. Enumeration order is the sorted directory walk,
/// so `files_named` is deterministic across runs on an unchanged tree.
pub struct FsProjectScope {
    files: Vec<FileId>,
    present: FxHashSet<FileId>,
    by_name: FxHashMap<String, Vec<FileId>>,
}

impl FsProjectScope {
    pub fn scan(root: &Path) -> Self {
        let mut files = Vec::new();
        let mut present = FxHashSet::default();
        let mut by_name: FxHashMap<String, Vec<FileId>> = FxHashMap::default();

        let walk = WalkDir::new(root).sort_by_file_name();
        for entry in walk.into_iter().flatten() {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("js") {
                continue;
            }
            let id = FileId::new(path);
            if let Some(name) = id.file_name() {
                by_name.entry(name.to_string()).or_default().push(id.clone());
            }
            present.insert(id.clone());
            files.push(id);
        }

        tracing::debug!(root = %root.display(), files = files.len(), "scanned project scope");
        Self {
            files,
            present,
            by_name,
        }
    }

    /// All scanned files in enumeration order.
    pub fn files(&self) -> &[FileId] {
        &self.files
    }
}

impl ProjectScope for FsProjectScope {
    fn files_named(&self, name: &str) -> Vec<FileId> {
        self.by_name.get(name).cloned().unwrap_or_default()
    }

    fn contains(&self, file: &FileId) -> bool {
        self.present.contains(file)
    }
}
