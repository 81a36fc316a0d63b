//! Class-hierarchy walks: constructor references, explicit inheritance
//! checks, and the implementation filter.
//!
//! All hierarchy reasoning here is syntactic, over heritage clauses;
//! the checker is only consulted to resolve heritage expressions to
//! symbols.

use rustc_hash::FxHashSet;
use tsref_ast::{modifier_flags, NodeArena, NodeIndex, Payload, SyntaxKind};
use tsref_sem::{Snapshot, SymbolId};

use crate::entry::Entry;
use crate::error::Result;
use crate::state::{Search, State};

/// References to a class's constructor: its declarations, `new this()`
/// in its own members, and `super()` calls in subclasses, recursing
/// through constructor-less intermediates.
pub fn constructor_references(state: &mut State<'_>, ctor: NodeIndex) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let class = arena.find_ancestor(ctor, |a| arena.kind(a).is_class_like());
    if class.is_none() {
        return Ok(());
    }
    let Some(class_symbol) = snap.checker.symbol_at_location(class).or_else(|| {
        let name = arena.declaration_name(class);
        snap.checker.symbol_at_location(name)
    }) else {
        return Ok(());
    };

    let group = state.group_for_symbol(class_symbol);

    let Some(data) = arena.class_like(class) else {
        return Ok(());
    };
    let members = data.members.clone();
    for &member in &members {
        match arena.kind(member) {
            SyntaxKind::Constructor => {
                state.add_reference(group, Entry::node(member));
            }
            _ => {
                // `new this()` inside any member constructs this class.
                arena.for_each_descendant(member, &mut |node| {
                    if arena.kind(node) == SyntaxKind::NewExpression {
                        if let Some(call) = arena.call(node) {
                            if arena.kind(call.expression) == SyntaxKind::ThisKeyword {
                                state.add_reference(group, Entry::node(call.expression));
                            }
                        }
                    }
                });
            }
        }
    }

    find_super_calls(state, class_symbol, group, &mut FxHashSet::default())
}

/// `super()` calls in subclasses of `class_symbol`. A subclass without
/// a constructor forwards construction, so its own subclasses are
/// walked too; `visited` stops the walk on cyclic heritage chains.
fn find_super_calls(
    state: &mut State<'_>,
    class_symbol: SymbolId,
    group: usize,
    visited: &mut FxHashSet<SymbolId>,
) -> Result<()> {
    if !visited.insert(class_symbol) {
        return Ok(());
    }
    let snap = state.snap;
    let arena = snap.arena;
    let mut classes: Vec<NodeIndex> = Vec::new();
    for file in snap.files {
        arena.for_each_descendant(file.root, &mut |node| {
            if arena.kind(node).is_class_like() {
                classes.push(node);
            }
        });
    }

    for class in classes {
        state.check_cancellation()?;
        if !extends_symbol(snap, state, class, class_symbol) {
            continue;
        }
        let Some(data) = arena.class_like(class) else {
            continue;
        };
        let ctors: Vec<NodeIndex> = data
            .members
            .iter()
            .copied()
            .filter(|&m| arena.kind(m) == SyntaxKind::Constructor)
            .collect();
        if ctors.is_empty() {
            // Constructor-less subclass: its subclasses' super() calls
            // reach this class's constructor.
            if let Some(symbol) = class_symbol_of(snap, class) {
                find_super_calls(state, symbol, group, visited)?;
            }
            continue;
        }
        for ctor in ctors {
            arena.for_each_descendant(ctor, &mut |node| {
                if arena.kind(node) == SyntaxKind::CallExpression {
                    if let Some(call) = arena.call(node) {
                        if arena.kind(call.expression) == SyntaxKind::SuperKeyword {
                            state.add_reference(group, Entry::node(call.expression));
                        }
                    }
                }
            });
        }
    }
    Ok(())
}

fn class_symbol_of(snap: Snapshot<'_>, class: NodeIndex) -> Option<SymbolId> {
    let arena = snap.arena;
    snap.checker.symbol_at_location(class).or_else(|| {
        snap.checker
            .symbol_at_location(arena.declaration_name(class))
    })
}

/// Whether `class` has an `extends` clause resolving to `ancestor`.
fn extends_symbol(
    snap: Snapshot<'_>,
    state: &mut State<'_>,
    class: NodeIndex,
    ancestor: SymbolId,
) -> bool {
    for (token, target) in heritage_targets(snap, class) {
        if token != SyntaxKind::ExtendsKeyword {
            continue;
        }
        if target == ancestor || explicitly_inherits_from(state, target, ancestor) {
            return true;
        }
    }
    false
}

/// Resolved (heritage keyword, target symbol) pairs of a class-like or
/// interface declaration.
fn heritage_targets(snap: Snapshot<'_>, decl: NodeIndex) -> Vec<(SyntaxKind, SymbolId)> {
    let arena = snap.arena;
    let mut out = Vec::new();
    let Some(data) = arena.class_like(decl) else {
        return out;
    };
    for &clause in &data.heritage_clauses {
        let Some(node) = arena.get(clause) else {
            continue;
        };
        let Payload::HeritageClause { token, types } = &node.payload else {
            continue;
        };
        for &ty in types {
            let expression = heritage_expression(arena, ty);
            if let Some(symbol) = snap.checker.symbol_at_location(expression) {
                out.push((*token, snap.checker.aliased_symbol(symbol)));
            }
        }
    }
    out
}

fn heritage_expression(arena: &NodeArena, ty: NodeIndex) -> NodeIndex {
    match arena.get(ty).map(|n| &n.payload) {
        Some(Payload::ExpressionWithTypeArguments { expression }) => *expression,
        _ => ty,
    }
}

/// Whether `descendant` reaches `ancestor` through extends/implements
/// clauses. Memoized per query; the cache's pre-seeded false entry also
/// breaks heritage cycles.
pub fn explicitly_inherits_from(
    state: &mut State<'_>,
    descendant: SymbolId,
    ancestor: SymbolId,
) -> bool {
    if descendant == ancestor {
        return true;
    }
    if let Some(cached) = state.cached_inherits(descendant, ancestor) {
        return cached;
    }
    state.cache_inherits(descendant, ancestor, false);

    let snap = state.snap;
    let decls: Vec<NodeIndex> = snap
        .checker
        .symbol(descendant)
        .map(|s| s.declarations.to_vec())
        .unwrap_or_default();

    let mut inherits = false;
    'outer: for decl in decls {
        let kind = snap.arena.kind(decl);
        if !kind.is_class_like() && kind != SyntaxKind::InterfaceDeclaration {
            continue;
        }
        for (_, target) in heritage_targets(snap, decl) {
            if target == ancestor || explicitly_inherits_from(state, target, ancestor) {
                inherits = true;
                break 'outer;
            }
        }
    }
    state.cache_inherits(descendant, ancestor, inherits);
    inherits
}

/// The implementation filter: a matched token only counts when it names
/// a concrete implementation, its staticness agrees with the queried
/// member, and its container inherits from the query's parent
/// constraint.
pub fn is_valid_implementation(
    state: &mut State<'_>,
    search: &Search,
    token: NodeIndex,
) -> bool {
    let snap = state.snap;
    let arena = snap.arena;
    let decl = arena.parent(token);
    if arena.declaration_name(decl) != token {
        // A heritage-clause reference makes the declaring class itself
        // the implementation.
        return is_heritage_implementation(arena, token);
    }
    if !provides_implementation(arena, decl) {
        return false;
    }

    // Static members never implement instance members and vice versa.
    if let Some(searched) = snap.checker.symbol(search.symbol) {
        let searched_static = searched.declarations.iter().any(|&d| {
            arena
                .get(d)
                .is_some_and(|n| n.modifier_flags & modifier_flags::STATIC != 0)
        });
        let found_static = arena
            .get(decl)
            .is_some_and(|n| n.modifier_flags & modifier_flags::STATIC != 0);
        let both_members = searched
            .declarations
            .iter()
            .any(|&d| is_class_member(arena, d))
            && is_class_member(arena, decl);
        if both_members && searched_static != found_static {
            return false;
        }
    }

    let Some(parents) = search.parents.clone() else {
        return true;
    };
    let container = arena.find_ancestor(decl, |a| {
        arena.kind(a).is_class_like()
            || matches!(
                arena.kind(a),
                SyntaxKind::InterfaceDeclaration | SyntaxKind::ObjectLiteralExpression
            )
    });
    let Some(container_symbol) = class_symbol_of(snap, container) else {
        // No resolvable container: keep the match rather than silently
        // dropping it.
        return true;
    };
    parents
        .iter()
        .any(|&parent| explicitly_inherits_from(state, container_symbol, parent))
}

/// Whether `token` names the target of an extends/implements clause on
/// a class.
fn is_heritage_implementation(arena: &NodeArena, token: NodeIndex) -> bool {
    let mut node = token;
    while arena.kind(arena.parent(node)) == SyntaxKind::PropertyAccessExpression {
        node = arena.parent(node);
    }
    let expression = arena.parent(node);
    if arena.kind(expression) != SyntaxKind::ExpressionWithTypeArguments {
        return false;
    }
    let clause = arena.parent(expression);
    arena.kind(clause) == SyntaxKind::HeritageClause
        && arena.kind(arena.parent(clause)).is_class_like()
}

fn is_class_member(arena: &NodeArena, decl: NodeIndex) -> bool {
    matches!(
        arena.kind(decl),
        SyntaxKind::PropertyDeclaration
            | SyntaxKind::MethodDeclaration
            | SyntaxKind::GetAccessor
            | SyntaxKind::SetAccessor
    ) && arena
        .find_ancestor(decl, |a| arena.kind(a).is_class_like())
        .is_some()
}

/// Whether a declaration actually provides runtime behavior.
fn provides_implementation(arena: &NodeArena, decl: NodeIndex) -> bool {
    match arena.kind(decl) {
        SyntaxKind::ClassDeclaration | SyntaxKind::ClassExpression => true,
        SyntaxKind::MethodDeclaration | SyntaxKind::GetAccessor | SyntaxKind::SetAccessor => {
            arena.function(decl).is_some_and(|f| f.body.is_some())
        }
        SyntaxKind::FunctionDeclaration | SyntaxKind::FunctionExpression => {
            arena.function(decl).is_some_and(|f| f.body.is_some())
        }
        SyntaxKind::PropertyDeclaration => {
            arena.property(decl).is_some_and(|p| p.initializer.is_some())
        }
        SyntaxKind::PropertyAssignment | SyntaxKind::ShorthandPropertyAssignment => true,
        SyntaxKind::VariableDeclaration => arena
            .variable_declaration(decl)
            .is_some_and(|v| v.initializer.is_some()),
        _ => false,
    }
}
