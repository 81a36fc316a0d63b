//! Candidate position scanning. A reference search never walks the
//! whole tree blindly: it scans the source text for the symbol name
//! with a substring search, rejects matches that sit inside a longer
//! identifier, and only then touches the tree to validate the token.

use memchr::memmem;
use tsref_ast::{char_info, NodeArena, NodeIndex, SourceFile, SyntaxKind};
use tsref_common::Span;

/// Byte offsets within `within` where `name` occurs on identifier
/// boundaries. Offsets are relative to the start of `text`.
pub fn possible_reference_positions(text: &str, name: &str, within: Span) -> Vec<u32> {
    if name.is_empty() {
        return Vec::new();
    }
    let len = text.len() as u32;
    let start = within.start.min(len) as usize;
    let end = within.end.min(len) as usize;
    if start >= end {
        return Vec::new();
    }

    let mut positions = Vec::new();
    for found in memmem::find_iter(&text.as_bytes()[start..end], name.as_bytes()) {
        let pos = start + found;
        let before_ok = match text[..pos].chars().next_back() {
            Some(c) => !char_info::is_identifier_part(c),
            None => true,
        };
        let after = pos + name.len();
        let after_ok = match text[after..].chars().next() {
            Some(c) => !char_info::is_identifier_part(c),
            None => true,
        };
        if before_ok && after_ok {
            positions.push(pos as u32);
        }
    }
    positions
}

/// Validates the token at a candidate position. The token must cover
/// exactly the searched text: identifiers match on length, string and
/// numeric literals additionally account for quotes and must sit in a
/// name position, and `default` matches the keyword itself.
pub fn candidate_token(
    arena: &NodeArena,
    file: &SourceFile,
    pos: u32,
    name: &str,
) -> Option<NodeIndex> {
    let token = arena.token_at_position(file.root, pos);
    if token.is_none() {
        return None;
    }
    let node = arena.get(token)?;
    let search_len = name.len() as u32;
    match node.kind {
        SyntaxKind::Identifier | SyntaxKind::PrivateIdentifier => {
            (node.pos == pos && node.end - node.pos == search_len).then_some(token)
        }
        SyntaxKind::StringLiteral => {
            // Quotes widen the token by two; the match starts after the
            // opening quote.
            (node.pos + 1 == pos
                && node.end - node.pos == search_len + 2
                && is_literal_name_position(arena, token))
            .then_some(token)
        }
        SyntaxKind::NumericLiteral => {
            (node.pos == pos
                && node.end - node.pos == search_len
                && is_literal_name_position(arena, token))
            .then_some(token)
        }
        SyntaxKind::DefaultKeyword => (name == "default" && node.pos == pos).then_some(token),
        _ => None,
    }
}

/// Whether a literal token names something (a property key, a computed
/// member access, a module specifier) rather than being ordinary data.
pub fn is_literal_name_position(arena: &NodeArena, token: NodeIndex) -> bool {
    let parent = arena.parent(token);
    if parent.is_none() {
        return false;
    }
    match arena.kind(parent) {
        SyntaxKind::ComputedPropertyName | SyntaxKind::ElementAccessExpression => true,
        SyntaxKind::ImportDeclaration | SyntaxKind::ExportDeclaration => true,
        SyntaxKind::PropertyAssignment
        | SyntaxKind::PropertyDeclaration
        | SyntaxKind::PropertySignature
        | SyntaxKind::MethodDeclaration
        | SyntaxKind::MethodSignature
        | SyntaxKind::GetAccessor
        | SyntaxKind::SetAccessor => arena.declaration_name(parent) == token,
        _ => false,
    }
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod scanner_tests;
