//! Special syntactic searches that bypass symbol resolution: labels,
//! `this`, `super`, keyword queries, `import.meta`, string literals,
//! and reference directives. Each has its own notion of "same thing"
//! and its own search space.

use tsref_ast::{
    modifier_flags, FileReference, NodeArena, NodeIndex, Payload, SyntaxKind,
};
use tsref_common::Span;

use crate::entry::{Definition, Entry, NodeEntryKind};
use crate::error::Result;
use crate::scanner;
use crate::state::State;

/// Dispatches the query when the token under the cursor is one of the
/// special forms. Returns whether the query was handled.
pub fn try_special_references(
    state: &mut State<'_>,
    node: NodeIndex,
    position: u32,
) -> Result<bool> {
    if node.is_none() {
        return Ok(false);
    }
    let arena = state.snap.arena;
    match arena.kind(node) {
        SyntaxKind::Identifier if label_statement_of(arena, node).is_some() => {
            label_references(state, node)?;
            Ok(true)
        }
        SyntaxKind::Identifier
            if arena.kind(arena.parent(node)) == SyntaxKind::MetaProperty =>
        {
            import_meta_references(state, node)?;
            Ok(true)
        }
        SyntaxKind::ThisKeyword if arena.kind(arena.parent(node)) != SyntaxKind::MetaProperty => {
            this_references(state, node)?;
            Ok(true)
        }
        SyntaxKind::SuperKeyword => {
            super_references(state, node)?;
            Ok(true)
        }
        SyntaxKind::VoidKeyword => {
            keyword_references(state, node, SyntaxKind::VoidKeyword)?;
            Ok(true)
        }
        // The type-operator keyword is not a standalone token; the
        // query position decides whether the cursor sits on the keyword
        // itself.
        SyntaxKind::TypeOperator if on_leading_keyword(arena, node, position) => {
            let operator = type_operator_kind(arena, node);
            keyword_references(state, node, operator)?;
            Ok(true)
        }
        SyntaxKind::Constructor => {
            crate::inherit::constructor_references(state, node)?;
            Ok(true)
        }
        _ => Ok(false),
    }
}

/// Whether `position` falls on the keyword that opens `node`'s text.
fn on_leading_keyword(arena: &NodeArena, node: NodeIndex, position: u32) -> bool {
    let keyword = match arena.kind(node) {
        SyntaxKind::TypeOperator => type_operator_kind(arena, node),
        _ => return false,
    };
    let Some(text) = keyword.token_text() else {
        return false;
    };
    arena.get(node).is_some_and(|n| {
        position >= n.pos && position < n.pos + text.len() as u32
    })
}

fn type_operator_kind(arena: &NodeArena, node: NodeIndex) -> SyntaxKind {
    match arena.get(node).map(|n| &n.payload) {
        Some(Payload::TypeOperator { operator, .. }) => *operator,
        _ => SyntaxKind::Unknown,
    }
}

// ---------------------------------------------------------------------
// Labels
// ---------------------------------------------------------------------

/// The labeled statement a label identifier belongs to: directly for a
/// label declaration, by name for a break/continue target.
fn label_statement_of(arena: &NodeArena, node: NodeIndex) -> Option<NodeIndex> {
    let parent = arena.parent(node);
    match arena.kind(parent) {
        SyntaxKind::LabeledStatement => Some(parent),
        SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement => {
            let name = arena.identifier_text(node)?.to_string();
            let target = arena.find_ancestor(parent, |a| {
                arena.kind(a) == SyntaxKind::LabeledStatement
                    && label_name(arena, a).is_some_and(|n| n == name)
            });
            target.is_some().then_some(target)
        }
        _ => None,
    }
}

fn label_name(arena: &NodeArena, labeled: NodeIndex) -> Option<&str> {
    match &arena.get(labeled)?.payload {
        Payload::LabeledStatement { label, .. } => arena.identifier_text(*label),
        _ => None,
    }
}

fn label_parts(arena: &NodeArena, labeled: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
    match &arena.get(labeled)?.payload {
        Payload::LabeledStatement { label, statement } => Some((*label, *statement)),
        _ => None,
    }
}

/// Label references are purely lexical: every break/continue inside the
/// labeled statement that resolves to it, plus the label itself.
fn label_references(state: &mut State<'_>, node: NodeIndex) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let Some(target) = label_statement_of(arena, node) else {
        return Ok(());
    };
    let Some((label, _)) = label_parts(arena, target) else {
        return Ok(());
    };
    let group = state.add_group(Definition::Label { node: label });
    state.add_reference(group, Entry::node(label));

    arena.for_each_descendant(target, &mut |descendant| {
        let kind = arena.kind(descendant);
        if !matches!(
            kind,
            SyntaxKind::BreakStatement | SyntaxKind::ContinueStatement
        ) {
            return;
        }
        let Some(Payload::BreakOrContinue { label: jump_label }) =
            arena.get(descendant).map(|n| &n.payload)
        else {
            return;
        };
        if jump_label.is_none() {
            return;
        }
        if label_statement_of(arena, *jump_label) == Some(target) {
            state.add_reference(group, Entry::node(*jump_label));
        }
    });
    Ok(())
}

// ---------------------------------------------------------------------
// this / super
// ---------------------------------------------------------------------

/// The nearest `this`-binding container, skipping arrow functions.
fn this_container(arena: &NodeArena, node: NodeIndex) -> NodeIndex {
    arena.find_ancestor(node, |a| {
        matches!(
            arena.kind(a),
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::Constructor
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::ClassStaticBlockDeclaration
                | SyntaxKind::SourceFile
        )
    })
}

/// The search space of a `this` query: class members share the class
/// (split by staticness), functions keep their own body, and top-level
/// `this` in a script matches every script file.
fn this_search_space(arena: &NodeArena, container: NodeIndex) -> (NodeIndex, bool) {
    let is_static = arena
        .get(container)
        .is_some_and(|n| n.modifier_flags & modifier_flags::STATIC != 0);
    match arena.kind(container) {
        SyntaxKind::MethodDeclaration
        | SyntaxKind::PropertyDeclaration
        | SyntaxKind::GetAccessor
        | SyntaxKind::SetAccessor => (arena.parent(container), is_static),
        SyntaxKind::Constructor => (arena.parent(container), false),
        SyntaxKind::ClassStaticBlockDeclaration => (arena.parent(container), true),
        _ => (container, is_static),
    }
}

fn this_references(state: &mut State<'_>, node: NodeIndex) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let container = this_container(arena, node);
    if container.is_none() {
        return Ok(());
    }
    let group = state.add_group(Definition::This { node });

    if arena.kind(container) == SyntaxKind::SourceFile {
        // Top-level `this` only exists in script files, where every
        // script shares one global `this`.
        for file in snap.files {
            state.check_cancellation()?;
            if file.is_external_module {
                continue;
            }
            collect_this_in(state, group, file.root, |candidate_container| {
                arena.kind(candidate_container) == SyntaxKind::SourceFile
            });
        }
        return Ok(());
    }

    let (space, is_static) = this_search_space(arena, container);
    if space.is_none() {
        return Ok(());
    }
    collect_this_in(state, group, space, |candidate_container| {
        let (candidate_space, candidate_static) = this_search_space(arena, candidate_container);
        candidate_space == space && candidate_static == is_static
    });
    Ok(())
}

/// Adds every `this` token under `root` whose own container satisfies
/// the filter.
fn collect_this_in(
    state: &mut State<'_>,
    group: usize,
    root: NodeIndex,
    accept: impl Fn(NodeIndex) -> bool,
) {
    let arena = state.snap.arena;
    arena.for_each_descendant(root, &mut |descendant| {
        if arena.kind(descendant) != SyntaxKind::ThisKeyword {
            return;
        }
        if arena.kind(arena.parent(descendant)) == SyntaxKind::MetaProperty {
            return;
        }
        let container = this_container(arena, descendant);
        if container.is_some() && accept(container) {
            state.add_reference(group, Entry::node(descendant));
        }
    });
}

fn super_references(state: &mut State<'_>, node: NodeIndex) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let class = arena.find_ancestor(node, |a| arena.kind(a).is_class_like());
    if class.is_none() {
        return Ok(());
    }
    let member = arena.find_ancestor(node, |a| {
        arena.parent(a) == class
            && matches!(
                arena.kind(a),
                SyntaxKind::MethodDeclaration
                    | SyntaxKind::PropertyDeclaration
                    | SyntaxKind::Constructor
                    | SyntaxKind::GetAccessor
                    | SyntaxKind::SetAccessor
                    | SyntaxKind::ClassStaticBlockDeclaration
            )
    });
    let is_static = arena
        .get(member)
        .is_some_and(|n| n.modifier_flags & modifier_flags::STATIC != 0);

    // Anchor the group on the class symbol when the checker knows it.
    let name = arena.declaration_name(class);
    let definition = match state
        .snap
        .checker
        .symbol_at_location(class)
        .or_else(|| state.snap.checker.symbol_at_location(name))
    {
        Some(symbol) => Definition::Symbol { symbol },
        None => Definition::Keyword { node },
    };
    let group = state.add_group(definition);

    arena.for_each_descendant(class, &mut |descendant| {
        if arena.kind(descendant) != SyntaxKind::SuperKeyword {
            return;
        }
        let candidate_member = arena.find_ancestor(descendant, |a| arena.parent(a) == class);
        let candidate_static = arena
            .get(candidate_member)
            .is_some_and(|n| n.modifier_flags & modifier_flags::STATIC != 0);
        if candidate_static == is_static {
            state.add_reference(group, Entry::node(descendant));
        }
    });
    Ok(())
}

// ---------------------------------------------------------------------
// Keywords and import.meta
// ---------------------------------------------------------------------

/// Whole-program search for a type-position keyword (`void`,
/// `readonly`). Modifier uses are flags, not nodes, and never match;
/// expression operators such as `void 0` are non-type uses and are
/// skipped.
fn keyword_references(
    state: &mut State<'_>,
    node: NodeIndex,
    keyword: SyntaxKind,
) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let Some(text) = keyword.token_text() else {
        return Ok(());
    };
    let group = state.add_group(Definition::Keyword { node });

    for file in snap.files {
        state.check_cancellation()?;
        for pos in scanner::possible_reference_positions(&file.text, text, file.span()) {
            let found = arena.token_at_position(file.root, pos);
            if found.is_none() || !arena.get(found).is_some_and(|n| n.pos == pos) {
                continue;
            }
            let kind = arena.kind(found);
            let matches = kind == keyword
                || (kind == SyntaxKind::TypeOperator && type_operator_kind(arena, found) == keyword);
            if matches {
                // Only the keyword itself, not the node wrapping it.
                state.add_reference(
                    group,
                    Entry::Span {
                        file: file.file_id,
                        span: Span::at(pos, text.len() as u32),
                    },
                );
            }
        }
    }
    Ok(())
}

fn import_meta_references(state: &mut State<'_>, node: NodeIndex) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let group = state.add_group(Definition::Keyword { node });

    for file in snap.files {
        state.check_cancellation()?;
        arena.for_each_descendant(file.root, &mut |descendant| {
            if let Some(Payload::MetaProperty { name }) =
                arena.get(descendant).map(|n| &n.payload)
            {
                state.add_reference(group, Entry::node(*name));
            }
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------
// String literals and reference directives
// ---------------------------------------------------------------------

/// Finds every string literal with the same text. Only literal tokens
/// match; identifiers that happen to spell the same word do not.
pub fn string_literal_references(state: &mut State<'_>, node: NodeIndex) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let Some(text) = arena.literal_text(node).map(str::to_string) else {
        return Ok(());
    };
    let group = state.add_group(Definition::String { node });
    if text.is_empty() {
        state.add_reference(
            group,
            Entry::Node {
                node,
                kind: NodeEntryKind::StringLiteral,
            },
        );
        return Ok(());
    }

    for file in snap.files {
        state.check_cancellation()?;
        if !file.name_table.may_contain(&text) {
            continue;
        }
        for pos in scanner::possible_reference_positions(&file.text, &text, file.span()) {
            let token = arena.token_at_position(file.root, pos);
            let matches = arena.kind(token) == SyntaxKind::StringLiteral
                && arena.get(token).is_some_and(|n| n.pos + 1 == pos)
                && arena.literal_text(token) == Some(text.as_str());
            if matches {
                state.add_reference(
                    group,
                    Entry::Node {
                        node: token,
                        kind: NodeEntryKind::StringLiteral,
                    },
                );
            }
        }
    }
    Ok(())
}

/// References to a file targeted by a reference directive: every
/// directive across the program pointing at the same file.
pub fn triple_slash_references(
    state: &mut State<'_>,
    reference: FileReference,
) -> Result<()> {
    let snap = state.snap;
    let group = state.add_group(Definition::TripleSlashReference {
        file: reference.target,
        span: reference.span,
    });
    for file in snap.files {
        state.check_cancellation()?;
        for directive in &file.referenced_files {
            if directive.target == reference.target {
                state.add_reference(
                    group,
                    Entry::Span {
                        file: file.file_id,
                        span: directive.span,
                    },
                );
            }
        }
    }
    Ok(())
}
