//! The central search loop.
//!
//! A query resolves the token under the cursor to a symbol, widens it,
//! classifies its scope, then scans candidate files with the text
//! scanner and accepts candidates whose resolved symbol relates back to
//! the search set. Special syntactic forms short-circuit before any of
//! that happens.

use tsref_ast::{FileId, NodeIndex, SourceFile, SyntaxKind};
use tsref_common::{CancellationToken, Span};
use tsref_sem::{
    meaning_at_location, meaning_of_symbol, semantic_meaning, Snapshot, SymbolId,
};

use crate::entry::{Entry, NodeEntryKind, SymbolAndEntries};
use crate::error::{QueryError, Result};
use crate::options::FindReferencesOptions;
use crate::state::{Search, State};
use crate::{imports, inherit, scanner, scope, special, widen};
use scope::SymbolScope;

/// Finds all references to whatever sits at `position` in `file`.
/// Results are grouped by definition; within a group, references are in
/// deterministic (file, start, length) order.
pub fn find_all_references(
    snap: Snapshot<'_>,
    token: CancellationToken,
    file: FileId,
    position: u32,
    options: FindReferencesOptions,
) -> Result<Vec<SymbolAndEntries>> {
    let source_file = snap
        .file(file)
        .ok_or_else(|| QueryError::MissingSourceFile(format!("file {}", file.0)))?;
    let mut state = State::new(snap, token, options);

    // Reference directives live in trivia, before any token.
    if let Some(reference) = source_file.reference_at(position) {
        special::triple_slash_references(&mut state, reference)?;
        return Ok(state.finish());
    }

    let node = snap.arena.token_at_position(source_file.root, position);
    tracing::debug!(
        file = %source_file.file_name,
        position,
        kind = ?snap.arena.kind(node),
        "find all references"
    );

    if special::try_special_references(&mut state, node, position)? {
        return Ok(state.finish());
    }
    if node.is_none() {
        return Ok(Vec::new());
    }

    let Some(symbol) = resolve_symbol(snap, node) else {
        // A string with no symbol behind it can still be searched as a
        // literal.
        if snap.arena.kind(node) == SyntaxKind::StringLiteral {
            special::string_literal_references(&mut state, node)?;
            return Ok(state.finish());
        }
        return Ok(Vec::new());
    };

    let symbol = skip_alias(snap, symbol, &options);
    get_referenced_symbols_for_symbol(&mut state, symbol, node)?;
    Ok(state.finish())
}

/// The symbol a token resolves to: its own resolution, or its parent
/// declaration's when the token is a declaration name the checker
/// recorded on the declaration.
pub fn resolve_symbol(snap: Snapshot<'_>, node: NodeIndex) -> Option<SymbolId> {
    snap.checker.symbol_at_location(node).or_else(|| {
        let arena = snap.arena;
        if arena.is_declaration_name(node) {
            snap.checker.symbol_at_location(arena.parent(node))
        } else {
            None
        }
    })
}

/// Resolves through alias chains so a query on an import site finds the
/// whole closure. Rename with prefix/suffix text deliberately stays on
/// the local alias; the specifier boundary is preserved with suffix
/// text instead.
fn skip_alias(snap: Snapshot<'_>, symbol: SymbolId, options: &FindReferencesOptions) -> SymbolId {
    let Some(sym) = snap.checker.symbol(symbol) else {
        return symbol;
    };
    if !sym.is_alias() {
        return symbol;
    }
    if options.is_for_rename() && options.provide_prefix_and_suffix_text_for_rename {
        return symbol;
    }
    snap.checker.aliased_symbol(symbol)
}

/// Runs the full symbol search: widen, classify scope, scan.
pub fn get_referenced_symbols_for_symbol(
    state: &mut State<'_>,
    symbol: SymbolId,
    location: NodeIndex,
) -> Result<()> {
    let snap = state.snap;
    let Some(sym) = snap.checker.symbol(symbol) else {
        return Ok(());
    };
    let text = sym.escaped_name.clone();
    let meaning = if location.is_some() {
        meaning_at_location(snap.arena, location)
    } else {
        semantic_meaning::ALL
    };
    let widened = widen::populate_search_symbols(snap, symbol, location, &state.options);
    let search = Search::new(symbol, symbol, text, meaning, None, widened);
    execute_search(state, &search)
}

fn execute_search(state: &mut State<'_>, search: &Search) -> Result<()> {
    let snap = state.snap;
    match scope::symbol_scope(snap, search.symbol) {
        SymbolScope::Global => {
            for index in 0..snap.files.len() {
                let file = &snap.files[index];
                search_in_container(state, file, search, file.span())?;
            }
        }
        SymbolScope::Container(container) => {
            let Some(file) = snap.file_of_node(container) else {
                return Ok(());
            };
            let span = snap
                .arena
                .get(container)
                .map_or_else(|| file.span(), |n| n.span());
            search_in_container(state, file, search, span)?;
        }
        SymbolScope::ModuleFile {
            file,
            requires_export_trace,
        } => {
            let source_file = snap
                .file(file)
                .ok_or_else(|| QueryError::MissingSourceFile(format!("file {}", file.0)))?;
            search_in_container(state, source_file, search, source_file.span())?;
            if requires_export_trace {
                imports::search_exported_symbol(state, search, search.symbol)?;
            }
        }
    }
    Ok(())
}

/// Scans one file (or a container span within it) for candidate
/// positions and validates each against the search.
pub fn search_in_container(
    state: &mut State<'_>,
    file: &SourceFile,
    search: &Search,
    span: Span,
) -> Result<()> {
    state.check_cancellation()?;
    // The name table covers identifiers and literals; keyword searches
    // (`default`) bypass it.
    if search.text != "default" && !file.name_table.may_contain(&search.text) {
        return Ok(());
    }
    if !state.mark_searched_symbols(file.file_id, search.all_symbols()) {
        return Ok(());
    }
    tracing::trace!(file = %file.file_name, text = %search.text, "scanning file");

    for pos in scanner::possible_reference_positions(&file.text, &search.text, span) {
        match scanner::candidate_token(state.snap.arena, file, pos, &search.text) {
            Some(token) => reference_at_token(state, file, token, search)?,
            None => raw_match(state, file, pos, search),
        }
    }
    Ok(())
}

fn reference_at_token(
    state: &mut State<'_>,
    _file: &SourceFile,
    token: NodeIndex,
    search: &Search,
) -> Result<()> {
    let snap = state.snap;
    let Some(ref_symbol) = resolve_symbol(snap, token) else {
        return Ok(());
    };
    let Some((target, kind)) = related_symbol(snap, search, ref_symbol, token) else {
        return Ok(());
    };

    let flags = snap.checker.symbol(target).map_or(0, |s| s.flags);
    if meaning_of_symbol(flags) & search.meaning == 0 {
        return Ok(());
    }
    if state.options.implementations && !inherit::is_valid_implementation(state, search, token) {
        return Ok(());
    }

    let group = state.group_for_symbol(search.root);
    state.add_reference(group, Entry::Node { node: token, kind });

    imports::specifier_cascade(state, search, token, ref_symbol)
}

/// Relates a candidate's resolved symbol back to the search set,
/// looking through aliases, shorthand value symbols, transient roots,
/// and destructuring pairs.
fn related_symbol(
    snap: Snapshot<'_>,
    search: &Search,
    ref_symbol: SymbolId,
    token: NodeIndex,
) -> Option<(SymbolId, NodeEntryKind)> {
    if search.includes(ref_symbol) {
        return Some((ref_symbol, classify(snap, search, ref_symbol)));
    }

    let aliased = snap.checker.aliased_symbol(ref_symbol);
    if aliased != ref_symbol && search.includes(aliased) {
        return Some((aliased, NodeEntryKind::Node));
    }

    let arena = snap.arena;
    let parent = arena.parent(token);
    if arena.kind(parent) == SyntaxKind::ShorthandPropertyAssignment {
        if let Some(value) = snap.checker.shorthand_assignment_value_symbol(parent) {
            if search.includes(value) {
                return Some((value, NodeEntryKind::Node));
            }
        }
    }

    for root in snap.checker.root_symbols(ref_symbol) {
        if root != ref_symbol && search.includes(root) {
            return Some((root, classify(snap, search, root)));
        }
    }

    // A shorthand binding element name also references the destructured
    // property.
    if arena.kind(parent) == SyntaxKind::BindingElement
        && arena.declaration_name(parent) == token
    {
        if let Some(prop) = widen::destructured_property_symbol(snap, parent, &search.text) {
            if search.includes(prop) {
                return Some((prop, NodeEntryKind::SearchedPropertyFoundLocal));
            }
        }
    }

    None
}

/// Entry kind for a match: plain, or one of the two destructuring
/// directions when a local/property pair crossed over.
fn classify(snap: Snapshot<'_>, search: &Search, matched: SymbolId) -> NodeEntryKind {
    use tsref_sem::symbol_flags::PROPERTY;
    if matched == search.symbol {
        return NodeEntryKind::Node;
    }
    let matched_flags = snap.checker.symbol(matched).map_or(0, |s| s.flags);
    let searched_flags = snap.checker.symbol(search.symbol).map_or(0, |s| s.flags);
    match (matched_flags & PROPERTY != 0, searched_flags & PROPERTY != 0) {
        (true, false) => NodeEntryKind::SearchedLocalFoundProperty,
        (false, true) => NodeEntryKind::SearchedPropertyFoundLocal,
        _ => NodeEntryKind::Node,
    }
}

/// A text match with no valid token behind it: a string interior or
/// comment trivia, reported as a raw span when the options ask for it.
fn raw_match(state: &mut State<'_>, file: &SourceFile, pos: u32, search: &Search) {
    if !state.options.find_in_strings && !state.options.find_in_comments {
        return;
    }
    let arena = state.snap.arena;
    let token = arena.token_at_position(file.root, pos);
    let in_string = arena.kind(token) == SyntaxKind::StringLiteral;
    let in_trivia = !is_token_kind(arena.kind(token));
    let wanted = (in_string && state.options.find_in_strings)
        || (in_trivia && state.options.find_in_comments);
    if !wanted {
        return;
    }
    let span = Span::at(pos, search.text.len() as u32);
    let group = state.group_for_symbol(search.root);
    state.add_reference(group, Entry::Span { file: file.file_id, span });
}

fn is_token_kind(kind: SyntaxKind) -> bool {
    kind.token_text().is_some()
        || matches!(
            kind,
            SyntaxKind::Identifier
                | SyntaxKind::PrivateIdentifier
                | SyntaxKind::StringLiteral
                | SyntaxKind::NumericLiteral
        )
}
