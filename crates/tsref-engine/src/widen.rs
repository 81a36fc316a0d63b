//! Search-symbol widening.
//!
//! A query rarely searches one symbol. Shorthand properties, shorthand
//! destructuring, parameter properties, re-export specifiers, and union
//! members all pair the queried symbol with siblings that the same name
//! occurrences resolve to. The closure is computed to a fixed point with
//! a hard cap so a misbehaving checker cannot loop the engine.

use tsref_ast::{modifier_flags, NodeArena, NodeIndex, SyntaxKind};
use tsref_sem::{Snapshot, SymbolId};

use crate::options::FindReferencesOptions;

/// The widened symbol set for one search, plus the optional parent
/// constraint used by implementation queries.
#[derive(Debug, Clone)]
pub struct SearchSymbols {
    pub all: Vec<SymbolId>,
    /// Declaring symbols of the queried expression's type; when present,
    /// implementation results must inherit from one of them.
    pub parents: Option<Vec<SymbolId>>,
}

pub fn populate_search_symbols(
    snap: Snapshot<'_>,
    symbol: SymbolId,
    location: NodeIndex,
    options: &FindReferencesOptions,
) -> SearchSymbols {
    let mut all = vec![symbol];

    let decl_count = snap
        .checker
        .symbol(symbol)
        .map_or(1, |s| s.declarations.len().max(1));
    let cap = decl_count + 4;

    let mut rounds = 0;
    loop {
        rounds += 1;
        let before = all.len();
        for i in 0..all.len() {
            widen_one(snap, all[i], location, options, &mut all);
        }
        if all.len() == before || rounds >= cap {
            if rounds >= cap && all.len() != before {
                tracing::warn!(symbol = symbol.0, "symbol widening hit iteration cap");
            }
            break;
        }
    }

    let parents = if options.implementations {
        implementation_parents(snap, location)
    } else {
        None
    };

    SearchSymbols { all, parents }
}

fn add(all: &mut Vec<SymbolId>, symbol: SymbolId) {
    if symbol.is_some() && !all.contains(&symbol) {
        all.push(symbol);
    }
}

fn widen_one(
    snap: Snapshot<'_>,
    symbol: SymbolId,
    location: NodeIndex,
    options: &FindReferencesOptions,
    all: &mut Vec<SymbolId>,
) {
    let arena = snap.arena;
    let checker = snap.checker;
    let Some(sym) = checker.symbol(symbol) else {
        return;
    };
    let name = sym.escaped_name.clone();

    // Transient symbols stand for their roots.
    for root in checker.root_symbols(symbol) {
        add(all, root);
    }

    // Shorthand property assignment at the query site: the name is both
    // a value use and a property key of the contextual type.
    if location.is_some() {
        let parent = arena.parent(location);
        if arena.kind(parent) == SyntaxKind::ShorthandPropertyAssignment
            && arena.declaration_name(parent) == location
        {
            if let Some(ty) = checker.contextual_type(location) {
                if let Some(prop) = checker.property_of_type(ty, &name) {
                    add(all, prop);
                }
            }
            if let Some(value) = checker.shorthand_assignment_value_symbol(parent) {
                add(all, value);
            }
        }
    }

    for &decl in &sym.declarations {
        match arena.kind(decl) {
            // `const { x } = o` without a property name: pair the local
            // binding with the destructured property.
            SyntaxKind::BindingElement => {
                if let Some(prop) = destructured_property_symbol(snap, decl, &name) {
                    add(all, prop);
                }
            }
            // A constructor parameter with an accessibility modifier
            // declares both a parameter and a class property.
            SyntaxKind::Parameter => {
                let is_param_property = arena
                    .get(decl)
                    .is_some_and(|n| n.modifier_flags & modifier_flags::PARAMETER_PROPERTY != 0)
                    && arena.kind(arena.parent(decl)) == SyntaxKind::Constructor;
                if is_param_property {
                    if let Some((param, prop)) =
                        checker.symbols_of_parameter_property_declaration(decl)
                    {
                        add(all, param);
                        add(all, prop);
                    }
                }
            }
            // `export { x }` without `as`: the specifier both uses the
            // local and declares the export.
            SyntaxKind::ExportSpecifier => {
                let shorthand = arena
                    .specifier(decl)
                    .is_some_and(|(property_name, _)| property_name.is_none());
                let keep_boundary = options.is_for_rename()
                    && options.provide_prefix_and_suffix_text_for_rename;
                if shorthand && !keep_boundary {
                    if let Some(local) = checker.export_specifier_local_target(decl) {
                        add(all, local);
                    }
                }
            }
            // A property declared inside a union arm also matches the
            // union's synthesized property, but only implementation
            // queries care.
            SyntaxKind::PropertySignature | SyntaxKind::MethodSignature
                if options.implementations =>
            {
                if let Some(prop) = union_property_symbol(snap, decl, &name) {
                    add(all, prop);
                }
            }
            _ => {}
        }
    }
}

/// For a shorthand binding element, the property symbol of the
/// destructured type with the same name.
pub fn destructured_property_symbol(
    snap: Snapshot<'_>,
    binding_element: NodeIndex,
    name: &str,
) -> Option<SymbolId> {
    let arena = snap.arena;
    if arena
        .binding_element(binding_element)?
        .property_name
        .is_some()
    {
        return None;
    }
    let pattern = arena.parent(binding_element);
    if arena.kind(pattern) != SyntaxKind::ObjectBindingPattern {
        return None;
    }
    let ty = destructured_type(snap, pattern)?;
    snap.checker.property_of_type(ty, name)
}

/// The type being destructured by a binding pattern: the initializer's
/// type where one exists, else the pattern's own type.
fn destructured_type(snap: Snapshot<'_>, pattern: NodeIndex) -> Option<tsref_sem::TypeId> {
    let arena = snap.arena;
    let decl = arena.parent(pattern);
    let initializer = match arena.kind(decl) {
        SyntaxKind::VariableDeclaration => arena.variable_declaration(decl)?.initializer,
        SyntaxKind::Parameter => NodeIndex::NONE,
        _ => NodeIndex::NONE,
    };
    if initializer.is_some() {
        if let Some(ty) = snap.checker.type_at_location(initializer) {
            return Some(ty);
        }
    }
    snap.checker.type_at_location(pattern)
}

/// Property symbol of an enclosing union type, for a member declared in
/// one of the union's type-literal arms.
fn union_property_symbol(snap: Snapshot<'_>, decl: NodeIndex, name: &str) -> Option<SymbolId> {
    let arena = snap.arena;
    let literal = arena.find_ancestor(decl, |a| arena.kind(a) == SyntaxKind::TypeLiteral);
    if literal.is_none() || arena.kind(arena.parent(literal)) != SyntaxKind::UnionType {
        return None;
    }
    let ty = snap.checker.type_at_location(arena.parent(literal))?;
    snap.checker.property_of_type(ty, name)
}

/// For implementation queries on `expr.name`, the declaring symbol of
/// `expr`'s type constrains which containers count as implementations.
fn implementation_parents(snap: Snapshot<'_>, location: NodeIndex) -> Option<Vec<SymbolId>> {
    let arena = snap.arena;
    if location.is_none() {
        return None;
    }
    let parent = arena.parent(location);
    let Some(access) = property_access_parts(arena, parent) else {
        return None;
    };
    let (expression, name) = access;
    if name != location {
        return None;
    }
    let ty = snap.checker.type_at_location(expression)?;
    let symbol = snap.checker.type_symbol(ty)?;
    Some(vec![symbol])
}

fn property_access_parts(arena: &NodeArena, node: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
    match &arena.get(node)?.payload {
        tsref_ast::Payload::PropertyAccess { expression, name } => Some((*expression, *name)),
        _ => None,
    }
}

#[cfg(test)]
#[path = "tests/widen_tests.rs"]
mod widen_tests;
