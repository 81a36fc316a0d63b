//! Symbol scope classification: decides how far a search must look.
//!
//! Getting this wrong in the narrow direction loses references, so every
//! rule here that returns less than the whole program has to be
//! justified by the language's visibility rules.

use tsref_ast::{modifier_flags, FileId, NodeIndex, SyntaxKind};
use tsref_sem::{symbol_flags, Snapshot, SymbolId};

/// Where a symbol's references can appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolScope {
    /// Anywhere in the program.
    Global,
    /// Only within the subtree rooted at this node.
    Container(NodeIndex),
    /// Only within one module file; if the symbol escapes through an
    /// export, the caller must also trace the import graph.
    ModuleFile {
        file: FileId,
        requires_export_trace: bool,
    },
}

/// Classifies `symbol`'s scope from its declarations.
pub fn symbol_scope(snap: Snapshot<'_>, symbol_id: SymbolId) -> SymbolScope {
    let Some(symbol) = snap.checker.symbol(symbol_id) else {
        return SymbolScope::Global;
    };
    let arena = snap.arena;

    // The name of a named function or class expression is only visible
    // inside the expression itself.
    let value_decl = symbol.value_declaration;
    if value_decl.is_some() {
        let kind = arena.kind(value_decl);
        if matches!(
            kind,
            SyntaxKind::FunctionExpression | SyntaxKind::ClassExpression
        ) && arena.declaration_name(value_decl).is_some()
            && symbol.flags & symbol_flags::PROPERTY == 0
        {
            return SymbolScope::Container(value_decl);
        }
    }

    // Private members cannot be named outside their class body.
    if let Some(class) = private_member_class(snap, symbol_id) {
        return SymbolScope::Container(class);
    }

    // A shorthand destructuring binding doubles as a property
    // reference, and the property is reachable from anywhere.
    for &decl in &symbol.declarations {
        if arena.kind(decl) == SyntaxKind::BindingElement
            && arena
                .binding_element(decl)
                .is_some_and(|data| data.property_name.is_none())
        {
            return SymbolScope::Global;
        }
    }

    if symbol.parent.is_some() && symbol.flags & symbol_flags::TYPE_PARAMETER == 0 {
        let Some(parent) = snap.checker.symbol(symbol.parent) else {
            return SymbolScope::Global;
        };
        if parent.is_module() {
            let mut file = None;
            for &decl in &parent.declarations {
                let Some(data) = arena.source_file(decl) else {
                    continue;
                };
                match file {
                    None => file = Some(data.file_id),
                    // Declarations merged across module files cannot be
                    // pinned to any one of them.
                    Some(seen) if seen != data.file_id => return SymbolScope::Global,
                    Some(_) => {}
                }
            }
            if let Some(file) = file {
                return SymbolScope::ModuleFile {
                    file,
                    requires_export_trace: parent.exports_symbol(symbol_id),
                };
            }
            // A module symbol without a source-file declaration is a
            // broken snapshot; searching everywhere is the safe answer.
            tracing::warn!(
                name = %symbol.escaped_name,
                "module parent of symbol has no source file declaration"
            );
            return SymbolScope::Global;
        }
        // Structural typing makes public members of classes, interfaces,
        // and object types reachable through any compatible value.
        return SymbolScope::Global;
    }

    SymbolScope::Global
}

/// The enclosing class of a private member declaration, if the symbol
/// is one.
fn private_member_class(snap: Snapshot<'_>, symbol_id: SymbolId) -> Option<NodeIndex> {
    let symbol = snap.checker.symbol(symbol_id)?;
    let arena = snap.arena;
    for &decl in &symbol.declarations {
        let node = arena.get(decl)?;
        let is_private = node.modifier_flags & modifier_flags::PRIVATE != 0
            || arena.kind(arena.declaration_name(decl)) == SyntaxKind::PrivateIdentifier;
        if is_private {
            let class = arena.find_ancestor(decl, |a| arena.kind(a).is_class_like());
            if class.is_some() {
                return Some(class);
            }
        }
    }
    None
}

#[cfg(test)]
#[path = "tests/scope_tests.rs"]
mod scope_tests;
