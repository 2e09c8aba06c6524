//! Special-case dependency rules.
//!
//! Some widely used helper files have no static reference to their actual
//! implementation dependency; the relationship is established by
//! file-naming convention. Generic symbol resolution would miss it, so a
//! small registry of filename-keyed rules is consulted before generic
//! resolution.

use crate::scope::ProjectScope;
use jstd_common::FileId;

/// File name of the QUnit adapter shipped with the runner.
pub const QUNIT_ADAPTER_FILE_NAME: &str = "QUnitAdapter.js";

const EQUIV_FILE_NAME: &str = "equiv.js";

/// A hard-coded dependency rule for files whose true dependency is not
/// discoverable via symbol-reference resolution.
pub trait SpecialCaseRule {
    /// Stable key; the resolved list is memoized under it for one run.
    fn name(&self) -> &'static str;

    fn matches(&self, file: &FileId) -> bool;

    /// Fixed dependency list for a matching file. An empty list means the
    /// rule's expected target does not exist anywhere in scope, which is
    /// not an error.
    fn resolve(&self, file: &FileId, scope: &dyn ProjectScope) -> Vec<FileId>;
}

/// `QUnitAdapter.js` depends on the project's `equiv.js` utility file.
///
/// A project may contain several files named `equiv.js` (vendored copies
/// in different directories); the candidate in the adapter's own
/// directory wins, otherwise the first candidate in enumeration order.
pub struct QUnitAdapterRule;

impl SpecialCaseRule for QUnitAdapterRule {
    fn name(&self) -> &'static str {
        "qunit-adapter-equiv"
    }

    fn matches(&self, file: &FileId) -> bool {
        file.file_name() == Some(QUNIT_ADAPTER_FILE_NAME)
    }

    fn resolve(&self, file: &FileId, scope: &dyn ProjectScope) -> Vec<FileId> {
        let candidates = scope.files_named(EQUIV_FILE_NAME);
        if candidates.is_empty() {
            tracing::debug!(adapter = %file, "no equiv.js anywhere in scope");
            return Vec::new();
        }
        let same_dir = candidates
            .iter()
            .find(|candidate| candidate.parent() == file.parent());
        match same_dir {
            Some(candidate) => vec![candidate.clone()],
            None => candidates.into_iter().take(1).collect(),
        }
    }
}

/// Immutable table of special-case rules, checked before generic
/// resolution. Shared across runs; per-run memoization of rule results
/// lives in the graph builder, keyed by [`SpecialCaseRule::name`].
///
/// Global-within-run memoization means the first matching file a rule is
/// resolved for decides the result for every later match in the same run
/// (the candidate set is project-wide, not file-specific).
pub struct SpecialCaseRegistry {
    rules: Vec<Box<dyn SpecialCaseRule + Send + Sync>>,
}

impl SpecialCaseRegistry {
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Registry with the rules the runner ships: currently the QUnit
    /// adapter rule.
    pub fn standard() -> Self {
        Self::empty().with_rule(QUnitAdapterRule)
    }

    pub fn with_rule(mut self, rule: impl SpecialCaseRule + Send + Sync + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// First rule matching `file`, if any.
    pub(crate) fn find(&self, file: &FileId) -> Option<&(dyn SpecialCaseRule + Send + Sync)> {
        self.rules
            .iter()
            .map(|rule| rule.as_ref())
            .find(|rule| rule.matches(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    struct NamedScope {
        by_name: FxHashMap<String, Vec<FileId>>,
    }

    impl NamedScope {
        fn new(files: &[&str]) -> Self {
            let mut by_name: FxHashMap<String, Vec<FileId>> = FxHashMap::default();
            for file in files {
                let id = FileId::new(*file);
                let name = id.file_name().unwrap().to_string();
                by_name.entry(name).or_default().push(id);
            }
            Self { by_name }
        }
    }

    impl ProjectScope for NamedScope {
        fn files_named(&self, name: &str) -> Vec<FileId> {
            self.by_name.get(name).cloned().unwrap_or_default()
        }

        fn contains(&self, file: &FileId) -> bool {
            file.file_name()
                .map(|name| {
                    self.by_name
                        .get(name)
                        .is_some_and(|files| files.contains(file))
                })
                .unwrap_or(false)
        }
    }

    #[test]
    fn adapter_rule_matches_exact_name_only() {
        let rule = QUnitAdapterRule;
        assert!(rule.matches(&FileId::new("/p/QUnitAdapter.js")));
        assert!(!rule.matches(&FileId::new("/p/qunitadapter.js")));
        assert!(!rule.matches(&FileId::new("/p/QUnitAdapter.js.bak")));
    }

    #[test]
    fn same_directory_equiv_is_preferred() {
        let scope = NamedScope::new(&["/p/vendor/equiv.js", "/p/test/equiv.js"]);
        let rule = QUnitAdapterRule;
        let deps = rule.resolve(&FileId::new("/p/test/QUnitAdapter.js"), &scope);
        assert_eq!(deps, vec![FileId::new("/p/test/equiv.js")]);
    }

    #[test]
    fn falls_back_to_first_in_enumeration_order() {
        let scope = NamedScope::new(&["/p/vendor/equiv.js", "/p/lib/equiv.js"]);
        let rule = QUnitAdapterRule;
        let deps = rule.resolve(&FileId::new("/p/test/QUnitAdapter.js"), &scope);
        assert_eq!(deps, vec![FileId::new("/p/vendor/equiv.js")]);
    }

    #[test]
    fn missing_equiv_contributes_nothing() {
        let scope = NamedScope::new(&["/p/test/test.js"]);
        let rule = QUnitAdapterRule;
        let deps = rule.resolve(&FileId::new("/p/test/QUnitAdapter.js"), &scope);
        assert!(deps.is_empty());
    }

    #[test]
    fn registry_finds_standard_rule() {
        let registry = SpecialCaseRegistry::standard();
        assert!(registry.find(&FileId::new("/p/QUnitAdapter.js")).is_some());
        assert!(registry.find(&FileId::new("/p/test.js")).is_none());
    }
}
