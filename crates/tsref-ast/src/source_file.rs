//! Source files and per-file name tables.

use rustc_hash::FxHashMap;
use tsref_common::{LineMap, Span};

use crate::arena::NodeArena;
use crate::node::{FileId, NodeIndex, Payload};
use crate::syntax::SyntaxKind;

/// Value of a name-table entry: position of the sole occurrence, or a
/// sentinel meaning the name occurs more than once in the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameTableValue {
    Position(u32),
    Duplicated,
}

/// Map from escaped identifier/literal text to its occurrence info,
/// used to cheaply skip files that cannot contain a searched name.
#[derive(Debug, Default)]
pub struct NameTable {
    map: FxHashMap<String, NameTableValue>,
}

impl NameTable {
    /// Collect identifiers, private identifiers, and string/numeric
    /// literal texts from the subtree rooted at `root`.
    pub fn build(arena: &NodeArena, root: NodeIndex) -> NameTable {
        let mut table = NameTable::default();
        arena.for_each_descendant(root, &mut |index| {
            let Some(node) = arena.get(index) else {
                return;
            };
            let text = match &node.payload {
                Payload::Identifier(data) => Some(data.escaped_text.as_str()),
                Payload::Literal(data)
                    if matches!(
                        node.kind,
                        SyntaxKind::StringLiteral | SyntaxKind::NumericLiteral
                    ) =>
                {
                    Some(data.text.as_str())
                }
                _ => None,
            };
            if let Some(text) = text {
                table.record(text, node.pos);
            }
        });
        table
    }

    fn record(&mut self, text: &str, pos: u32) {
        match self.map.get_mut(text) {
            Some(value) => *value = NameTableValue::Duplicated,
            None => {
                self.map
                    .insert(text.to_string(), NameTableValue::Position(pos));
            }
        }
    }

    pub fn get(&self, text: &str) -> Option<NameTableValue> {
        self.map.get(text).copied()
    }

    /// Whether the file possibly contains `text` as a name.
    pub fn may_contain(&self, text: &str) -> bool {
        self.map.contains_key(text)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// A file-reference directive (triple-slash style): the span of the
/// directive in this file and the file it points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileReference {
    pub span: Span,
    pub target: FileId,
}

/// A parsed source file. Owns its text; the AST lives in the program's
/// shared `NodeArena`, rooted at `root`.
#[derive(Debug)]
pub struct SourceFile {
    pub file_id: FileId,
    pub file_name: String,
    pub text: String,
    pub root: NodeIndex,
    pub line_map: LineMap,
    pub name_table: NameTable,
    /// Spans of file-reference directives supplied by the host.
    pub referenced_files: Vec<FileReference>,
    /// Whether the file has top-level imports/exports and therefore
    /// forms its own module scope.
    pub is_external_module: bool,
}

impl SourceFile {
    /// Span covering the whole file text.
    pub fn span(&self) -> Span {
        Span::new(0, self.text.len() as u32)
    }

    /// The file-reference directive containing `pos`, if any.
    pub fn reference_at(&self, pos: u32) -> Option<FileReference> {
        self.referenced_files
            .iter()
            .copied()
            .find(|reference| reference.span.contains_pos(pos))
    }
}
