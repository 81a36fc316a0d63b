//! Semantic meanings: whether a location or symbol denotes a value, a
//! type, or a namespace. Candidate sites are only accepted when their
//! meaning intersects the query's.

use tsref_ast::{NodeArena, NodeIndex, SyntaxKind};

use crate::symbol::symbol_flags;

pub mod semantic_meaning {
    pub const NONE: u32 = 0;
    pub const VALUE: u32 = 1 << 0;
    pub const TYPE: u32 = 1 << 1;
    pub const NAMESPACE: u32 = 1 << 2;
    pub const ALL: u32 = VALUE | TYPE | NAMESPACE;
}

/// Meaning of an identifier judged from its syntactic position.
pub fn meaning_at_location(arena: &NodeArena, node: NodeIndex) -> u32 {
    use semantic_meaning::*;

    let parent = arena.parent(node);
    match arena.kind(parent) {
        // `class C` names both a value and a type; `interface I` and
        // `type T` only a type.
        SyntaxKind::ClassDeclaration | SyntaxKind::ClassExpression
            if arena.declaration_name(parent) == node =>
        {
            return VALUE | TYPE;
        }
        SyntaxKind::InterfaceDeclaration | SyntaxKind::TypeAliasDeclaration
            if arena.declaration_name(parent) == node =>
        {
            return TYPE;
        }
        // Import/export specifiers re-export whatever the target means.
        SyntaxKind::ImportSpecifier
        | SyntaxKind::ExportSpecifier
        | SyntaxKind::ImportClause
        | SyntaxKind::NamespaceImport => return ALL,
        SyntaxKind::TypeReference => return TYPE,
        // Heritage clauses are type positions that also resolve values
        // (a class constructor function).
        SyntaxKind::ExpressionWithTypeArguments => return VALUE | TYPE,
        _ => {}
    }

    // Any enclosing type node makes this a type position.
    let in_type = arena
        .find_ancestor(node, |ancestor| arena.kind(ancestor).is_type_node())
        .is_some();
    if in_type { TYPE } else { VALUE | NAMESPACE }
}

/// Meanings a symbol can be referenced under, from its kind flags.
pub fn meaning_of_symbol(flags: u32) -> u32 {
    use semantic_meaning::*;
    let mut meaning = NONE;
    if flags & symbol_flags::VALUE != 0 {
        meaning |= VALUE;
    }
    if flags & symbol_flags::TYPE != 0 {
        meaning |= TYPE;
    }
    if flags & symbol_flags::NAMESPACE != 0 {
        meaning |= NAMESPACE;
    }
    if flags & (symbol_flags::ALIAS | symbol_flags::TRANSIENT) != 0 {
        meaning |= ALL;
    }
    if meaning == NONE { ALL } else { meaning }
}
