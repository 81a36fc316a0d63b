//! The program snapshot handed to a query.
//!
//! Everything here is immutable for the duration of the query; the host
//! owns the underlying data and rebuilds it wholesale when the program
//! changes.

use tsref_ast::{FileId, NodeArena, NodeIndex, SourceFile};

use crate::checker::Checker;
use crate::exports::ModuleGraph;

/// Borrowed view of one program snapshot: the AST arena, the ordered
/// file list, and the two external collaborators.
#[derive(Clone, Copy)]
pub struct Snapshot<'a> {
    pub arena: &'a NodeArena,
    /// Source files in snapshot order; this order drives deterministic
    /// result ordering.
    pub files: &'a [SourceFile],
    pub checker: &'a dyn Checker,
    pub module_graph: &'a dyn ModuleGraph,
}

impl<'a> Snapshot<'a> {
    pub fn file(&self, id: FileId) -> Option<&'a SourceFile> {
        self.files.iter().find(|file| file.file_id == id)
    }

    /// Position of a file in snapshot order.
    pub fn file_index(&self, id: FileId) -> usize {
        self.files
            .iter()
            .position(|file| file.file_id == id)
            .unwrap_or(usize::MAX)
    }

    /// The file owning `node`, found through the AST's parent chain.
    pub fn file_of_node(&self, node: NodeIndex) -> Option<&'a SourceFile> {
        let root = self.arena.source_file_of(node);
        let data = self.arena.source_file(root)?;
        self.file(data.file_id)
    }
}
