mod common;

use common::{destructure_program, off, private_field_program, DESTRUCTURE_TEXT, FIELD_TEXT};
use tsref_ast::FileId;
use tsref_common::CancellationToken;
use tsref_engine::entry::{Definition, Entry, NodeEntryKind};
use tsref_engine::options::FindReferencesOptions;
use tsref_engine::{find_references, DefinitionKind, QueryError};

#[test]
fn private_field_references_cover_every_method() {
    let program = private_field_program();
    let query = off(FIELD_TEXT, "key", 0);
    let groups = program.find(FileId(0), query, FindReferencesOptions::references());

    assert_eq!(groups.len(), 1);
    assert_eq!(
        program.spans(&groups[0]),
        vec![
            (0, off(FIELD_TEXT, "key", 0), 3),
            (0, off(FIELD_TEXT, "key", 1), 3),
            (0, off(FIELD_TEXT, "key", 2), 3),
        ]
    );
}

#[test]
fn querying_a_use_site_finds_the_same_group() {
    let program = private_field_program();
    let at_decl = program.find(
        FileId(0),
        off(FIELD_TEXT, "key", 0),
        FindReferencesOptions::references(),
    );
    let at_use = program.find(
        FileId(0),
        off(FIELD_TEXT, "key", 2),
        FindReferencesOptions::references(),
    );
    assert_eq!(program.spans(&at_decl[0]), program.spans(&at_use[0]));
}

#[test]
fn reference_info_classifies_reads_writes_and_definitions() {
    let program = private_field_program();
    let results = find_references(
        program.snapshot(),
        CancellationToken::new(),
        FileId(0),
        off(FIELD_TEXT, "key", 0),
        FindReferencesOptions::references(),
    )
    .unwrap();

    assert_eq!(results.len(), 1);
    let symbol = &results[0];
    assert_eq!(symbol.definition.name, "key");
    assert_eq!(symbol.definition.kind, DefinitionKind::Symbol);
    assert_eq!(symbol.references.len(), 3);

    let decl = &symbol.references[0];
    assert!(decl.is_definition);
    assert!(decl.is_write_access);
    assert_eq!(decl.line_text, "  private key = 1;");

    let read = &symbol.references[1];
    assert!(!read.is_definition);
    assert!(!read.is_write_access);

    let write = &symbol.references[2];
    assert!(!write.is_definition);
    assert!(write.is_write_access);
    assert_eq!(write.line_text, "  set(val) { this.key = val; }");
}

#[test]
fn results_serialize_in_camel_case() {
    let program = private_field_program();
    let results = find_references(
        program.snapshot(),
        CancellationToken::new(),
        FileId(0),
        off(FIELD_TEXT, "key", 0),
        FindReferencesOptions::references(),
    )
    .unwrap();

    let value = serde_json::to_value(&results[0]).unwrap();
    assert_eq!(value["definition"]["filePath"], "sec.ts");
    assert_eq!(value["definition"]["kind"], "symbol");
    assert_eq!(value["references"][0]["isWriteAccess"], true);
    assert_eq!(value["references"][0]["isDefinition"], true);
    assert_eq!(value["references"][1]["range"]["start"]["line"], 2);
}

#[test]
fn canceled_token_aborts_the_query() {
    let program = private_field_program();
    let token = CancellationToken::new();
    token.cancel();
    let result = tsref_engine::find_all_references(
        program.snapshot(),
        token,
        FileId(0),
        off(FIELD_TEXT, "key", 0),
        FindReferencesOptions::references(),
    );
    assert!(matches!(result, Err(QueryError::Canceled)));
}

#[test]
fn local_binding_widens_into_the_destructured_property() {
    let program = destructure_program();
    let groups = program.find(
        FileId(0),
        off(DESTRUCTURE_TEXT, "x }", 0),
        FindReferencesOptions::references(),
    );

    assert_eq!(groups.len(), 1);
    let entries = &groups[0].references;
    assert_eq!(entries.len(), 2);

    // Property key sites surface as cross-kind matches.
    assert!(entries.iter().any(|entry| matches!(
        entry,
        Entry::Node {
            kind: NodeEntryKind::SearchedLocalFoundProperty,
            ..
        }
    )));
    assert_eq!(
        program.spans(&groups[0]),
        vec![
            (0, off(DESTRUCTURE_TEXT, "x:", 0), 1),
            (0, off(DESTRUCTURE_TEXT, "x }", 0), 1),
        ]
    );
}

#[test]
fn property_query_pairs_back_with_the_shorthand_binding() {
    let program = destructure_program();
    let groups = program.find(
        FileId(0),
        off(DESTRUCTURE_TEXT, "x:", 0),
        FindReferencesOptions::references(),
    );

    assert_eq!(groups.len(), 1);
    let entries = &groups[0].references;
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|entry| matches!(
        entry,
        Entry::Node {
            kind: NodeEntryKind::SearchedPropertyFoundLocal,
            ..
        }
    )));
}

#[test]
fn duplicate_entries_are_reported_once() {
    let program = private_field_program();
    let groups = program.find(
        FileId(0),
        off(FIELD_TEXT, "key", 1),
        FindReferencesOptions::references(),
    );
    let spans = program.spans(&groups[0]);
    let mut deduped = spans.clone();
    deduped.dedup();
    assert_eq!(spans, deduped);
}

#[test]
fn definition_anchors_on_the_declaration_name() {
    let program = destructure_program();
    let groups = program.find(
        FileId(0),
        off(DESTRUCTURE_TEXT, "x }", 0),
        FindReferencesOptions::references(),
    );
    match groups[0].definition {
        Definition::Symbol { symbol } => {
            let name = &program.checker.symbols.get(symbol).unwrap().escaped_name;
            assert_eq!(name, "x");
        }
        ref other => panic!("expected a symbol definition, got {other:?}"),
    }
}
