//! Public query surface: position-based, serializable results shaped
//! for editor consumption. The internal node/span entries are resolved
//! against the line maps here, classified for write access, and
//! decorated with rename prefix/suffix text.

use serde::Serialize;
use tsref_ast::{FileId, NodeIndex, Payload, SourceFile, SyntaxKind};
use tsref_common::{CancellationToken, Location, Range, Span};
use tsref_sem::{Snapshot, SymbolId};

use crate::core;
use crate::entry::{Definition, Entry};
use crate::error::Result;
use crate::options::{FindReferencesOptions, ReferenceUse};
use crate::state::entry_sort_key;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DefinitionKind {
    Symbol,
    Label,
    Keyword,
    This,
    String,
    TripleSlashReference,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionInfo {
    #[serde(flatten)]
    pub location: Location,
    pub name: String,
    pub kind: DefinitionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceInfo {
    #[serde(flatten)]
    pub location: Location,
    pub line_text: String,
    pub is_write_access: bool,
    pub is_definition: bool,
}

/// One definition with its references, in deterministic order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferencedSymbol {
    pub definition: DefinitionInfo,
    pub references: Vec<ReferenceInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenameLocation {
    #[serde(flatten)]
    pub location: Location,
    pub line_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suffix_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImplementationLocation {
    #[serde(flatten)]
    pub location: Location,
    pub line_text: String,
}

/// Find every reference to the entity at `position`, grouped by
/// definition.
pub fn find_references(
    snap: Snapshot<'_>,
    token: CancellationToken,
    file: FileId,
    position: u32,
    options: FindReferencesOptions,
) -> Result<Vec<ReferencedSymbol>> {
    let groups = core::find_all_references(snap, token, file, position, options)?;
    let mut out = Vec::with_capacity(groups.len());
    for group in &groups {
        let Some(definition) = definition_info(snap, group.definition) else {
            continue;
        };
        let references = group
            .references
            .iter()
            .filter_map(|&entry| reference_info(snap, group.definition, entry))
            .collect();
        out.push(ReferencedSymbol {
            definition,
            references,
        });
    }
    Ok(out)
}

/// Every location a rename of the entity at `position` must edit, as a
/// flat list across the whole program.
pub fn find_rename_locations(
    snap: Snapshot<'_>,
    token: CancellationToken,
    file: FileId,
    position: u32,
    options: FindReferencesOptions,
) -> Result<Vec<RenameLocation>> {
    let options = FindReferencesOptions {
        use_: ReferenceUse::Rename,
        ..options
    };
    let groups = core::find_all_references(snap, token, file, position, options)?;
    let mut entries: Vec<Entry> = groups
        .iter()
        .flat_map(|group| group.references.iter().copied())
        .collect();
    entries.sort_by_key(|entry| entry_sort_key(snap, entry));
    entries.dedup_by_key(|entry| entry_sort_key(snap, entry));

    Ok(entries
        .into_iter()
        .filter_map(|entry| rename_location(snap, entry, &options))
        .collect())
}

/// Concrete implementations of the entity at `position`.
pub fn find_implementations(
    snap: Snapshot<'_>,
    token: CancellationToken,
    file: FileId,
    position: u32,
) -> Result<Vec<ImplementationLocation>> {
    let options = FindReferencesOptions::implementations();
    let groups = core::find_all_references(snap, token, file, position, options)?;
    let mut out = Vec::new();
    for group in &groups {
        for &entry in &group.references {
            let Some((file, span)) = entry_file_span(snap, entry) else {
                continue;
            };
            let Some(source_file) = snap.file(file) else {
                continue;
            };
            out.push(ImplementationLocation {
                location: location_of(source_file, span),
                line_text: line_text(source_file, span.start),
            });
        }
    }
    Ok(out)
}

// ---------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------

fn entry_file_span(snap: Snapshot<'_>, entry: Entry) -> Option<(FileId, Span)> {
    match entry {
        Entry::Node { node, .. } => {
            let file = snap.file_of_node(node)?;
            Some((file.file_id, snap.arena.get(node)?.span()))
        }
        Entry::Span { file, span } => Some((file, span)),
    }
}

fn location_of(file: &SourceFile, span: Span) -> Location {
    Location {
        file_path: file.file_name.clone(),
        range: Range {
            start: file.line_map.offset_to_position(span.start),
            end: file.line_map.offset_to_position(span.end),
        },
    }
}

/// The full text of the line containing `offset`, without the trailing
/// newline.
fn line_text(file: &SourceFile, offset: u32) -> String {
    let line = file.line_map.offset_to_position(offset).line;
    let start = file.line_map.line_start(line).unwrap_or(0) as usize;
    let end = file.text[start..]
        .find('\n')
        .map_or(file.text.len(), |i| start + i);
    file.text[start..end].trim_end().to_string()
}

fn definition_info(snap: Snapshot<'_>, definition: Definition) -> Option<DefinitionInfo> {
    let arena = snap.arena;
    let (node, name, kind) = match definition {
        Definition::Symbol { symbol } => {
            let sym = snap.checker.symbol(symbol)?;
            let decl = sym.declarations.first().copied()?;
            let name_node = arena.declaration_name(decl);
            let anchor = if name_node.is_some() { name_node } else { decl };
            (anchor, sym.escaped_name.clone(), DefinitionKind::Symbol)
        }
        Definition::Label { node } => (
            node,
            arena.identifier_text(node)?.to_string(),
            DefinitionKind::Label,
        ),
        Definition::Keyword { node } => {
            let name = match &arena.get(node)?.payload {
                Payload::TypeOperator { operator, .. } => operator.token_text().unwrap_or(""),
                _ => arena
                    .kind(node)
                    .token_text()
                    .or(arena.identifier_text(node))
                    .unwrap_or(""),
            }
            .to_string();
            (node, name, DefinitionKind::Keyword)
        }
        Definition::This { node } => (node, "this".to_string(), DefinitionKind::This),
        Definition::String { node } => (
            node,
            arena.literal_text(node)?.to_string(),
            DefinitionKind::String,
        ),
        Definition::TripleSlashReference { file, .. } => {
            let target = snap.file(file)?;
            return Some(DefinitionInfo {
                location: location_of(target, Span::new(0, 0)),
                name: target.file_name.clone(),
                kind: DefinitionKind::TripleSlashReference,
            });
        }
    };
    let file = snap.file_of_node(node)?;
    let span = arena.get(node)?.span();
    Some(DefinitionInfo {
        location: location_of(file, span),
        name,
        kind,
    })
}

fn reference_info(
    snap: Snapshot<'_>,
    definition: Definition,
    entry: Entry,
) -> Option<ReferenceInfo> {
    let (file, span) = entry_file_span(snap, entry)?;
    let source_file = snap.file(file)?;
    let (is_write_access, is_definition) = match entry {
        Entry::Node { node, .. } => {
            let is_def = match definition {
                Definition::Symbol { symbol } => is_declaration_of(snap, symbol, node),
                _ => false,
            };
            (is_def || is_write_access(snap, node), is_def)
        }
        Entry::Span { .. } => (false, false),
    };
    Some(ReferenceInfo {
        location: location_of(source_file, span),
        line_text: line_text(source_file, span.start),
        is_write_access,
        is_definition,
    })
}

fn rename_location(
    snap: Snapshot<'_>,
    entry: Entry,
    options: &FindReferencesOptions,
) -> Option<RenameLocation> {
    let (file, span) = entry_file_span(snap, entry)?;
    let source_file = snap.file(file)?;
    let (prefix_text, suffix_text) = match entry {
        Entry::Node { node, .. } => prefix_and_suffix(snap, node, options),
        Entry::Span { .. } => (None, None),
    };
    Some(RenameLocation {
        location: location_of(source_file, span),
        line_text: line_text(source_file, span.start),
        prefix_text,
        suffix_text,
    })
}

/// Whether `node` is the name of one of `symbol`'s declarations.
fn is_declaration_of(snap: Snapshot<'_>, symbol: SymbolId, node: NodeIndex) -> bool {
    let Some(sym) = snap.checker.symbol(symbol) else {
        return false;
    };
    let parent = snap.arena.parent(node);
    snap.arena.declaration_name(parent) == node
        && (sym.declarations.contains(&parent) || sym.declarations.contains(&node))
}

/// Write-access classification: declaration names, assignment targets,
/// and increment/decrement operands count as writes.
fn is_write_access(snap: Snapshot<'_>, node: NodeIndex) -> bool {
    let arena = snap.arena;
    let parent = arena.parent(node);
    if parent.is_some() && arena.declaration_name(parent) == node {
        return true;
    }
    if let Some(Payload::Unary { operator, .. }) = arena.get(parent).map(|n| &n.payload) {
        if matches!(
            operator,
            SyntaxKind::PlusPlusToken | SyntaxKind::MinusMinusToken
        ) {
            return true;
        }
    }

    // Climb access chains that keep `node` the written slot: the name of
    // a property access, the key of an element access, parentheses.
    let mut current = node;
    let mut up = parent;
    loop {
        match arena.get(up).map(|n| &n.payload) {
            Some(Payload::PropertyAccess { name, .. }) if *name == current => {}
            Some(Payload::ElementAccess {
                argument_expression,
                ..
            }) if *argument_expression == current => {}
            Some(Payload::Paren { .. }) => {}
            Some(Payload::Binary { left, operator, .. }) => {
                return operator.is_assignment_operator() && *left == current;
            }
            _ => return false,
        }
        current = up;
        up = arena.parent(current);
    }
}

/// Prefix/suffix text that keeps shorthand syntax valid when the
/// spanned name is replaced during a rename.
fn prefix_and_suffix(
    snap: Snapshot<'_>,
    node: NodeIndex,
    options: &FindReferencesOptions,
) -> (Option<String>, Option<String>) {
    if !options.provide_prefix_and_suffix_text_for_rename {
        return (None, None);
    }
    let arena = snap.arena;
    let Some(original) = arena.identifier_text(node).map(str::to_string) else {
        return (None, None);
    };
    let parent = arena.parent(node);
    match arena.kind(parent) {
        // `{ x }` -> `{ x: newName }`
        SyntaxKind::ShorthandPropertyAssignment if arena.declaration_name(parent) == node => {
            (Some(format!("{original}: ")), None)
        }
        // `const { x } = o` -> `const { x: newName } = o`
        SyntaxKind::BindingElement
            if arena.declaration_name(parent) == node
                && arena
                    .binding_element(parent)
                    .is_some_and(|b| b.property_name.is_none()) =>
        {
            (Some(format!("{original}: ")), None)
        }
        // `import { x }` -> `import { x as newName }`
        SyntaxKind::ImportSpecifier
            if arena
                .specifier(parent)
                .is_some_and(|(property_name, _)| property_name.is_none()) =>
        {
            (Some(format!("{original} as ")), None)
        }
        // `export { x }` -> `export { newName as x }`
        SyntaxKind::ExportSpecifier
            if arena
                .specifier(parent)
                .is_some_and(|(property_name, _)| property_name.is_none()) =>
        {
            (None, Some(format!(" as {original}")))
        }
        _ => (None, None),
    }
}
