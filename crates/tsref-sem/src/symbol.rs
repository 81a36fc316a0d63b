//! Symbols: the checker-level semantic entities the engine searches for.
//!
//! Symbol identity is `SymbolId` equality. The checker collaborator has
//! already merged declarations across files; the engine never re-derives
//! identity itself.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tsref_ast::NodeIndex;

/// Index of a symbol in a `SymbolArena`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub u32);

impl SymbolId {
    pub const NONE: SymbolId = SymbolId(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Symbol kind flags.
pub mod symbol_flags {
    pub const NONE: u32 = 0;
    pub const FUNCTION_SCOPED_VARIABLE: u32 = 1 << 0;
    pub const BLOCK_SCOPED_VARIABLE: u32 = 1 << 1;
    pub const PROPERTY: u32 = 1 << 2;
    pub const FUNCTION: u32 = 1 << 3;
    pub const CLASS: u32 = 1 << 4;
    pub const INTERFACE: u32 = 1 << 5;
    pub const TYPE_ALIAS: u32 = 1 << 6;
    pub const TYPE_PARAMETER: u32 = 1 << 7;
    pub const METHOD: u32 = 1 << 8;
    pub const CONSTRUCTOR: u32 = 1 << 9;
    pub const GET_ACCESSOR: u32 = 1 << 10;
    pub const SET_ACCESSOR: u32 = 1 << 11;
    /// A module symbol: a source file that is an external module.
    pub const MODULE: u32 = 1 << 12;
    /// An alias that must be looked through (import/export specifier,
    /// default import, namespace import).
    pub const ALIAS: u32 = 1 << 13;
    /// Checker-synthesized symbol (e.g. a union property) whose root
    /// symbols carry the declarations.
    pub const TRANSIENT: u32 = 1 << 14;

    pub const VARIABLE: u32 = FUNCTION_SCOPED_VARIABLE | BLOCK_SCOPED_VARIABLE;
    pub const ACCESSOR: u32 = GET_ACCESSOR | SET_ACCESSOR;
    pub const VALUE: u32 =
        VARIABLE | PROPERTY | FUNCTION | CLASS | METHOD | CONSTRUCTOR | ACCESSOR | MODULE;
    pub const TYPE: u32 = CLASS | INTERFACE | TYPE_ALIAS | TYPE_PARAMETER;
    pub const NAMESPACE: u32 = MODULE;
}

/// A semantic entity distinct from any single AST node.
#[derive(Debug)]
pub struct Symbol {
    pub flags: u32,
    pub escaped_name: String,
    /// All declaration sites, in binding order.
    pub declarations: SmallVec<[NodeIndex; 2]>,
    /// Canonical value declaration, `NONE` if the symbol has none.
    pub value_declaration: NodeIndex,
    /// Lexical/member container symbol, `NONE` at top level.
    pub parent: SymbolId,
    /// Exported members, for module symbols.
    pub exports: FxHashMap<String, SymbolId>,
    /// Instance/static members, for class-like symbols.
    pub members: FxHashMap<String, SymbolId>,
}

impl Symbol {
    pub fn new(flags: u32, escaped_name: impl Into<String>) -> Symbol {
        Symbol {
            flags,
            escaped_name: escaped_name.into(),
            declarations: SmallVec::new(),
            value_declaration: NodeIndex::NONE,
            parent: SymbolId::NONE,
            exports: FxHashMap::default(),
            members: FxHashMap::default(),
        }
    }

    pub fn is_alias(&self) -> bool {
        self.flags & symbol_flags::ALIAS != 0
    }

    pub fn is_module(&self) -> bool {
        self.flags & symbol_flags::MODULE != 0
    }

    /// Whether `symbol_id` appears in this symbol's export table.
    pub fn exports_symbol(&self, symbol_id: SymbolId) -> bool {
        self.exports.values().any(|&id| id == symbol_id)
    }
}

/// Arena of symbols for one program snapshot.
#[derive(Debug, Default)]
pub struct SymbolArena {
    symbols: Vec<Symbol>,
}

impl SymbolArena {
    pub fn new() -> SymbolArena {
        SymbolArena::default()
    }

    pub fn alloc(&mut self, symbol: Symbol) -> SymbolId {
        let id = SymbolId(self.symbols.len() as u32);
        self.symbols.push(symbol);
        id
    }

    pub fn get(&self, id: SymbolId) -> Option<&Symbol> {
        if id.is_none() {
            None
        } else {
            self.symbols.get(id.0 as usize)
        }
    }

    pub fn get_mut(&mut self, id: SymbolId) -> Option<&mut Symbol> {
        if id.is_none() {
            None
        } else {
            self.symbols.get_mut(id.0 as usize)
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}
