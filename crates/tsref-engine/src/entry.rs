//! Internal result representation: what was found, and what it was
//! found relative to. The public API layer turns these into
//! position-based locations.

use tsref_ast::{FileId, NodeIndex};
use tsref_common::Span;
use tsref_sem::SymbolId;

/// How a node entry relates to the searched symbol. Plain matches are
/// `Node`; destructuring pairs a local binding with an object property
/// and the mismatch direction is recorded so callers can render it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeEntryKind {
    Node,
    StringLiteral,
    SearchedLocalFoundProperty,
    SearchedPropertyFoundLocal,
}

/// A single found reference. Most are nodes; raw spans cover matches
/// that have no node of their own (comments, string interiors,
/// triple-slash reference paths).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entry {
    Node { node: NodeIndex, kind: NodeEntryKind },
    Span { file: FileId, span: Span },
}

impl Entry {
    pub fn node(node: NodeIndex) -> Self {
        Entry::Node { node, kind: NodeEntryKind::Node }
    }
}

/// What a group of references is anchored to. Symbol is the common
/// case; the rest cover searches that have no symbol (labels, `this`,
/// keyword queries, string literals, triple-slash references).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Definition {
    Symbol { symbol: SymbolId },
    Label { node: NodeIndex },
    Keyword { node: NodeIndex },
    This { node: NodeIndex },
    String { node: NodeIndex },
    TripleSlashReference { file: FileId, span: Span },
}

/// One definition with every reference that resolved to it.
#[derive(Debug, Clone)]
pub struct SymbolAndEntries {
    pub definition: Definition,
    pub references: Vec<Entry>,
}

impl SymbolAndEntries {
    pub fn new(definition: Definition) -> Self {
        Self { definition, references: Vec::new() }
    }
}
