//! Cross-module search orchestration.
//!
//! When a searched symbol escapes its module through an export, the
//! module-graph collaborator reports who imports it. Each importing
//! local becomes a fresh sub-search in its own file, re-exports recurse
//! outward, and namespace users get a plain rescan. All sub-results
//! merge into the originating query's group.

use tsref_ast::{modifier_flags, NodeIndex, Payload, SyntaxKind};
use tsref_sem::{ExportKind, ImportExport, Snapshot, SymbolId};

use crate::core;
use crate::entry::Entry;
use crate::error::{QueryError, Result};
use crate::state::{Search, State};
use crate::{scope, widen};
use scope::SymbolScope;

/// Traces one exported symbol through the module graph. Guarded by a
/// per-query seen set so diamond and cyclic re-exports terminate.
pub fn search_exported_symbol(
    state: &mut State<'_>,
    search: &Search,
    exported: SymbolId,
) -> Result<()> {
    let snap = state.snap;
    let Some(module) = containing_module(snap, exported) else {
        return Ok(());
    };
    if !state.mark_traced_export(module, exported) {
        return Ok(());
    }
    state.check_cancellation()?;

    let kind = export_kind(snap, exported);
    let references = snap.module_graph.export_references(module, exported, kind);
    tracing::debug!(
        exported = exported.0,
        module = module.0,
        imports = references.import_searches.len(),
        indirect = references.indirect_users.len(),
        "tracing export through module graph"
    );

    let group = state.group_for_symbol(search.root);
    for node in references.single_references {
        state.add_reference(group, Entry::node(node));
    }
    for (specifier, imported) in references.import_searches {
        search_from_import(state, search, imported, specifier)?;
    }
    if !references.indirect_users.is_empty() {
        let mut indirect = search.clone();
        indirect.coming_from = Some(ImportExport::Export);
        for file_id in references.indirect_users {
            let file = snap
                .file(file_id)
                .ok_or_else(|| QueryError::MissingSourceFile(format!("file {}", file_id.0)))?;
            core::search_in_container(state, file, &indirect, file.span())?;
        }
    }
    Ok(())
}

/// Spawns a sub-search for the local symbol an import specifier binds.
fn search_from_import(
    state: &mut State<'_>,
    parent_search: &Search,
    imported: SymbolId,
    specifier: NodeIndex,
) -> Result<()> {
    let snap = state.snap;
    let Some(symbol) = snap.checker.symbol(imported) else {
        return Ok(());
    };
    let text = symbol.escaped_name.clone();
    let location = snap.arena.declaration_name(specifier);
    let widened = widen::populate_search_symbols(snap, imported, location, &state.options);
    let sub = Search::new(
        parent_search.root,
        imported,
        text,
        parent_search.meaning,
        Some(ImportExport::Import),
        widened,
    );

    match scope::symbol_scope(snap, imported) {
        SymbolScope::ModuleFile {
            file,
            requires_export_trace,
        } => {
            let source_file = snap
                .file(file)
                .ok_or_else(|| QueryError::MissingSourceFile(format!("file {}", file.0)))?;
            core::search_in_container(state, source_file, &sub, source_file.span())?;
            if requires_export_trace {
                search_exported_symbol(state, &sub, imported)?;
            }
        }
        SymbolScope::Container(container) => {
            let Some(source_file) = snap.file_of_node(container) else {
                return Ok(());
            };
            let span = snap
                .arena
                .get(container)
                .map_or_else(|| source_file.span(), |n| n.span());
            core::search_in_container(state, source_file, &sub, span)?;
        }
        SymbolScope::Global => {
            for index in 0..snap.files.len() {
                core::search_in_container(state, &snap.files[index], &sub, snap.files[index].span())?;
            }
        }
    }
    Ok(())
}

/// Continues a search across a module boundary when the matched token
/// sits inside an export specifier. Each specifier is traced once.
pub fn specifier_cascade(
    state: &mut State<'_>,
    search: &Search,
    token: NodeIndex,
    ref_symbol: SymbolId,
) -> Result<()> {
    let snap = state.snap;
    let arena = snap.arena;
    let parent = arena.parent(token);
    if arena.kind(parent) != SyntaxKind::ExportSpecifier {
        return Ok(());
    }
    // A search that arrived from an import must not bounce back out.
    if search.coming_from == Some(ImportExport::Import) {
        return Ok(());
    }
    // Prefix/suffix rename keeps the exported name stable, so the
    // search stops at the specifier.
    if state.options.is_for_rename() && state.options.provide_prefix_and_suffix_text_for_rename {
        return Ok(());
    }
    if !state.mark_seen_reexport(token) {
        return Ok(());
    }
    let exported = arena
        .specifier(parent)
        .and_then(|(_, name)| snap.checker.symbol_at_location(name))
        .unwrap_or(ref_symbol);
    search_exported_symbol(state, search, exported)
}

/// The module symbol an exported symbol belongs to, through the symbol
/// parent chain.
pub fn containing_module(snap: Snapshot<'_>, symbol: SymbolId) -> Option<SymbolId> {
    let mut current = snap.checker.symbol(symbol)?.parent;
    while current.is_some() {
        let sym = snap.checker.symbol(current)?;
        if sym.is_module() {
            return Some(current);
        }
        current = sym.parent;
    }
    None
}

/// How a symbol leaves its module, judged from its declarations.
fn export_kind(snap: Snapshot<'_>, symbol: SymbolId) -> ExportKind {
    let Some(sym) = snap.checker.symbol(symbol) else {
        return ExportKind::Named;
    };
    for &decl in &sym.declarations {
        let Some(node) = snap.arena.get(decl) else {
            continue;
        };
        if let Payload::ExportAssignment {
            is_export_equals, ..
        } = &node.payload
        {
            return if *is_export_equals {
                ExportKind::ExportEquals
            } else {
                ExportKind::Default
            };
        }
        if node.modifier_flags & modifier_flags::DEFAULT != 0 {
            return ExportKind::Default;
        }
    }
    ExportKind::Named
}
