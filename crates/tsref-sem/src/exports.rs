//! The import/export tracer collaborator interface.
//!
//! Walking the module-specifier graph is out of scope for the engine;
//! the collaborator answers one question: given an exported symbol, who
//! imports it, which specifier nodes reference it directly, and which
//! files can only reach it through a namespace re-export.

use rustc_hash::FxHashMap;
use tsref_ast::{FileId, NodeIndex};

use crate::symbol::SymbolId;

/// How a symbol leaves its module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportKind {
    Named,
    Default,
    ExportEquals,
}

/// Which side of a module boundary a sub-search came from, used to stop
/// a search from bouncing between import and export forever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportExport {
    Import,
    Export,
}

/// The three result buckets for one exported symbol.
#[derive(Debug, Clone, Default)]
pub struct ModuleReferences {
    /// Importing local symbols and the specifier node that binds them;
    /// each becomes a fresh sub-search in the importing file.
    pub import_searches: Vec<(NodeIndex, SymbolId)>,
    /// Specifier name nodes that are themselves references and need no
    /// further in-file search (e.g. `foo` in `import { foo as bar }`).
    pub single_references: Vec<NodeIndex>,
    /// Files that re-export or wildcard-import the module and must be
    /// rescanned for namespace-qualified uses.
    pub indirect_users: Vec<FileId>,
}

/// The module-graph collaborator.
pub trait ModuleGraph {
    /// References to `exported` (exported from `module` as `kind`)
    /// across the program.
    fn export_references(
        &self,
        module: SymbolId,
        exported: SymbolId,
        kind: ExportKind,
    ) -> ModuleReferences;
}

/// Table-backed module graph populated by the host.
#[derive(Debug, Default)]
pub struct TableModuleGraph {
    entries: FxHashMap<(SymbolId, SymbolId), ModuleReferences>,
}

impl TableModuleGraph {
    pub fn new() -> TableModuleGraph {
        TableModuleGraph::default()
    }

    pub fn insert(&mut self, module: SymbolId, exported: SymbolId, references: ModuleReferences) {
        self.entries.insert((module, exported), references);
    }
}

impl ModuleGraph for TableModuleGraph {
    fn export_references(
        &self,
        module: SymbolId,
        exported: SymbolId,
        _kind: ExportKind,
    ) -> ModuleReferences {
        self.entries
            .get(&(module, exported))
            .cloned()
            .unwrap_or_default()
    }
}
