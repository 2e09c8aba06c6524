//! Test-file dependency resolver.
//!
//! Given an entry test file, computes the complete, dependency-first
//! ordered list of files it transitively depends on via symbol
//! references, so a generated runner configuration loads every
//! dependency before the file that uses it.
//!
//! The host environment supplies symbol resolution ([`ReferenceResolver`]),
//! file classification ([`FileClassifier`]) and project enumeration
//! ([`ProjectScope`]); this crate owns graph construction, the
//! special-case rules, and cycle-safe ordering.

pub mod graph;
pub mod order;
pub mod resolve;
pub mod scope;
pub mod special;

pub use graph::DependencyGraph;
pub use order::load_order;
pub use resolve::{FileClassifier, ReferenceEdge, ReferenceError, ReferenceResolver};
pub use scope::{FsProjectScope, ProjectScope};
pub use special::{QUnitAdapterRule, SpecialCaseRegistry, SpecialCaseRule};

use jstd_common::FileId;
use rustc_hash::FxHashSet;
use std::fmt;

/// Helper files bundled with the runner itself. They are matched by file
/// name and treated as self-contained, the same as host-classified
/// library files.
pub const RUNNER_LIBRARY_FILE_NAMES: &[&str] = &["Asserts.js", "TestCase.js", "equiv.js"];

/// Immutable per-resolver configuration (shared classification state is
/// explicit, never module-level).
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// File names treated as library files regardless of host
    /// classification.
    pub library_file_names: FxHashSet<String>,
}

impl ResolverConfig {
    /// Configuration matching the files the runner ships.
    pub fn standard() -> Self {
        Self {
            library_file_names: RUNNER_LIBRARY_FILE_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

/// Fatal resolution failure. Everything else is fail-soft: ambiguous
/// references keep all candidates, cycles are broken by the orderer, a
/// missing special-case target contributes nothing, and a per-file index
/// failure leaves that file a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The entry file cannot be mapped to a loadable file in scope; no
    /// partial output is produced.
    UnresolvableEntryFile(FileId),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolveError::UnresolvableEntryFile(file) => {
                write!(f, "entry file is not loadable: {file}")
            }
        }
    }
}

impl std::error::Error for ResolveError {}

/// Ties the seams together. One `Resolver` may serve many runs; every
/// call to [`Resolver::resolve`] uses fresh run-scoped state (graph,
/// visited set, special-case memo), so runs are independent.
pub struct Resolver<'a> {
    references: &'a dyn ReferenceResolver,
    classifier: &'a dyn FileClassifier,
    scope: &'a dyn ProjectScope,
    registry: SpecialCaseRegistry,
    config: ResolverConfig,
}

impl<'a> Resolver<'a> {
    pub fn new(
        references: &'a dyn ReferenceResolver,
        classifier: &'a dyn FileClassifier,
        scope: &'a dyn ProjectScope,
    ) -> Self {
        Self {
            references,
            classifier,
            scope,
            registry: SpecialCaseRegistry::standard(),
            config: ResolverConfig::standard(),
        }
    }

    pub fn with_registry(mut self, registry: SpecialCaseRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_config(mut self, config: ResolverConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the dependency graph reachable from `entry`.
    pub fn build_graph(&self, entry: &FileId) -> Result<DependencyGraph, ResolveError> {
        if !self.scope.contains(entry) {
            return Err(ResolveError::UnresolvableEntryFile(entry.clone()));
        }
        let mut builder = graph::GraphBuilder::new(
            self.references,
            self.classifier,
            self.scope,
            &self.registry,
            &self.config,
        );
        builder.build(entry);
        Ok(builder.finish())
    }

    /// Compute the load order for `entry`: every transitive dependency
    /// exactly once, dependency-first, entry last.
    pub fn resolve(&self, entry: &FileId) -> Result<Vec<FileId>, ResolveError> {
        tracing::debug!(entry = %entry, "resolving load order");
        let graph = self.build_graph(entry)?;
        let order = load_order(entry, &graph);
        tracing::debug!(entry = %entry, files = order.len(), "load order resolved");
        Ok(order)
    }
}
