//! The type-checker collaborator interface.
//!
//! The engine consumes the checker through this narrow facade and never
//! re-derives symbol identity itself. `TableChecker` is the concrete
//! implementation backed by host-populated resolution tables; a real
//! checker would answer the same queries from its own caches.

use rustc_hash::{FxHashMap, FxHashSet};
use tsref_ast::NodeIndex;

use crate::symbol::{Symbol, SymbolArena, SymbolId};

/// Opaque identifier of a checker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(pub u32);

impl TypeId {
    pub const NONE: TypeId = TypeId(u32::MAX);

    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Queries the engine issues against the checker collaborator.
pub trait Checker {
    fn symbols(&self) -> &SymbolArena;

    fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        self.symbols().get(id)
    }

    /// The symbol an AST location resolves to, if any.
    fn symbol_at_location(&self, node: NodeIndex) -> Option<SymbolId>;

    /// Fully resolve an alias chain; returns the input for non-aliases.
    fn aliased_symbol(&self, symbol: SymbolId) -> SymbolId;

    /// One step of alias resolution, if the symbol is an alias.
    fn immediate_aliased_symbol(&self, symbol: SymbolId) -> Option<SymbolId>;

    /// For `{ x }` shorthand property assignments: the value symbol the
    /// shorthand name also denotes.
    fn shorthand_assignment_value_symbol(&self, node: NodeIndex) -> Option<SymbolId>;

    /// Root symbols of a checker-synthesized symbol (union/intersection
    /// property, instantiated signature member); `[symbol]` otherwise.
    fn root_symbols(&self, symbol: SymbolId) -> Vec<SymbolId>;

    /// For `export { x }` without a property name: the local symbol the
    /// specifier re-exports.
    fn export_specifier_local_target(&self, specifier: NodeIndex) -> Option<SymbolId>;

    /// Both symbols of a constructor parameter property declaration
    /// (the parameter and the class property), given the parameter node.
    fn symbols_of_parameter_property_declaration(
        &self,
        parameter: NodeIndex,
    ) -> Option<(SymbolId, SymbolId)>;

    fn type_at_location(&self, node: NodeIndex) -> Option<TypeId>;

    fn contextual_type(&self, node: NodeIndex) -> Option<TypeId>;

    fn property_of_type(&self, ty: TypeId, name: &str) -> Option<SymbolId>;

    /// The class/interface symbol a type was declared by, if any.
    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId>;
}

/// Checker facade over host-populated resolution tables.
///
/// The host (or a test fixture) records what its checker resolved; the
/// engine only reads. Node keys are raw `NodeIndex` values.
#[derive(Debug, Default)]
pub struct TableChecker {
    pub symbols: SymbolArena,
    /// node -> resolved symbol (identifier uses and declaration names).
    pub node_symbols: FxHashMap<u32, SymbolId>,
    /// alias symbol -> its immediate target.
    pub alias_targets: FxHashMap<SymbolId, SymbolId>,
    /// shorthand property assignment node -> value symbol.
    pub shorthand_values: FxHashMap<u32, SymbolId>,
    /// transient symbol -> its root symbols.
    pub roots: FxHashMap<SymbolId, Vec<SymbolId>>,
    /// export specifier node -> local target symbol.
    pub export_specifier_locals: FxHashMap<u32, SymbolId>,
    /// constructor parameter node -> (parameter symbol, property symbol).
    pub parameter_property_symbols: FxHashMap<u32, (SymbolId, SymbolId)>,
    /// node -> its type.
    pub node_types: FxHashMap<u32, TypeId>,
    /// node -> its contextual type.
    pub contextual_types: FxHashMap<u32, TypeId>,
    /// (type, property name) -> property symbol.
    pub type_properties: FxHashMap<(TypeId, String), SymbolId>,
    /// type -> declaring symbol.
    pub type_symbols: FxHashMap<TypeId, SymbolId>,
}

impl TableChecker {
    pub fn new() -> TableChecker {
        TableChecker::default()
    }
}

impl Checker for TableChecker {
    fn symbols(&self) -> &SymbolArena {
        &self.symbols
    }

    fn symbol_at_location(&self, node: NodeIndex) -> Option<SymbolId> {
        self.node_symbols.get(&node.0).copied()
    }

    fn aliased_symbol(&self, symbol: SymbolId) -> SymbolId {
        let mut current = symbol;
        let mut seen = FxHashSet::default();
        while let Some(&next) = self.alias_targets.get(&current) {
            if !seen.insert(current) {
                // Cyclic alias chains are invalid input; stop rather
                // than loop.
                break;
            }
            current = next;
        }
        current
    }

    fn immediate_aliased_symbol(&self, symbol: SymbolId) -> Option<SymbolId> {
        self.alias_targets.get(&symbol).copied()
    }

    fn shorthand_assignment_value_symbol(&self, node: NodeIndex) -> Option<SymbolId> {
        self.shorthand_values.get(&node.0).copied()
    }

    fn root_symbols(&self, symbol: SymbolId) -> Vec<SymbolId> {
        match self.roots.get(&symbol) {
            Some(roots) => roots.clone(),
            None => vec![symbol],
        }
    }

    fn export_specifier_local_target(&self, specifier: NodeIndex) -> Option<SymbolId> {
        self.export_specifier_locals.get(&specifier.0).copied()
    }

    fn symbols_of_parameter_property_declaration(
        &self,
        parameter: NodeIndex,
    ) -> Option<(SymbolId, SymbolId)> {
        self.parameter_property_symbols.get(&parameter.0).copied()
    }

    fn type_at_location(&self, node: NodeIndex) -> Option<TypeId> {
        self.node_types.get(&node.0).copied()
    }

    fn contextual_type(&self, node: NodeIndex) -> Option<TypeId> {
        self.contextual_types.get(&node.0).copied()
    }

    fn property_of_type(&self, ty: TypeId, name: &str) -> Option<SymbolId> {
        self.type_properties.get(&(ty, name.to_string())).copied()
    }

    fn type_symbol(&self, ty: TypeId) -> Option<SymbolId> {
        self.type_symbols.get(&ty).copied()
    }
}
