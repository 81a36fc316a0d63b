mod common;

use common::{alloc, off, Program};
use tsref_ast::{AstBuilder, FileId, NodeIndex, SyntaxKind};
use tsref_common::{CancellationToken, Span};
use tsref_engine::entry::Definition;
use tsref_engine::options::FindReferencesOptions;
use tsref_engine::find_implementations;
use tsref_sem::{symbol_flags, TableChecker, TableModuleGraph, TypeId};

const IMPL_TEXT: &str = "interface I {\n  m(): void;\n}\nclass X implements I {\n  m() {}\n}\nclass Y {\n  m() {}\n}\nlet i: I;\ni.m();\n";

fn impl_program() -> Program {
    let text = IMPL_TEXT;
    let mut b = AstBuilder::new();

    let i_iface_name = b.ident("I", off(text, "I {", 0));
    let sig_name = b.ident("m", off(text, "m(", 0));
    let sig = b.function(
        SyntaxKind::MethodSignature,
        Span::new(off(text, "m(", 0), off(text, "void;", 0) + 5),
        0,
        sig_name,
        vec![],
        NodeIndex::NONE,
    );
    let iface = b.class_like(
        SyntaxKind::InterfaceDeclaration,
        Span::new(0, off(text, "}\nclass X", 0) + 1),
        0,
        i_iface_name,
        vec![],
        vec![sig],
    );

    let x_name = b.ident("X", off(text, "X implements", 0));
    let i_ref = b.ident("I", off(text, "implements I", 0) + 11);
    let ewta =
        b.expression_with_type_arguments(Span::at(off(text, "implements I", 0) + 11, 1), i_ref);
    let clause = b.heritage_clause(
        Span::at(off(text, "implements I", 0), 12),
        SyntaxKind::ImplementsKeyword,
        vec![ewta],
    );
    let xm_name = b.ident("m", off(text, "m(", 1));
    let xm_body = b.block(Span::at(off(text, "{}", 0), 2), vec![]);
    let xm = b.function(
        SyntaxKind::MethodDeclaration,
        Span::new(off(text, "m(", 1), off(text, "{}", 0) + 2),
        0,
        xm_name,
        vec![],
        xm_body,
    );
    let class_x = b.class_like(
        SyntaxKind::ClassDeclaration,
        Span::new(off(text, "class X", 0), off(text, "}\nclass Y", 0) + 1),
        0,
        x_name,
        vec![clause],
        vec![xm],
    );

    let y_name = b.ident("Y", off(text, "Y {", 0));
    let ym_name = b.ident("m", off(text, "m(", 2));
    let ym_body = b.block(Span::at(off(text, "{}", 1), 2), vec![]);
    let ym = b.function(
        SyntaxKind::MethodDeclaration,
        Span::new(off(text, "m(", 2), off(text, "{}", 1) + 2),
        0,
        ym_name,
        vec![],
        ym_body,
    );
    let class_y = b.class_like(
        SyntaxKind::ClassDeclaration,
        Span::new(off(text, "class Y", 0), off(text, "}\nlet", 0) + 1),
        0,
        y_name,
        vec![],
        vec![ym],
    );

    let i_var_name = b.ident("i", off(text, "i: I", 0));
    let ti = b.ident("I", off(text, "I;", 0));
    let tr = b.type_reference(Span::at(off(text, "I;", 0), 1), ti);
    let i_decl = b.variable_declaration(
        Span::new(off(text, "i: I", 0), off(text, "I;", 0) + 1),
        i_var_name,
        tr,
        NodeIndex::NONE,
    );
    let i_list = b.variable_declaration_list(
        Span::new(off(text, "i: I", 0), off(text, "I;", 0) + 1),
        vec![i_decl],
    );
    let i_stmt = b.variable_statement(
        Span::new(off(text, "let i", 0), off(text, "I;", 0) + 2),
        0,
        i_list,
    );

    let i_use = b.ident("i", off(text, "i.m", 0));
    let m_ref = b.ident("m", off(text, "i.m", 0) + 2);
    let access = b.property_access(Span::at(off(text, "i.m", 0), 3), i_use, m_ref);
    let call = b.call(
        SyntaxKind::CallExpression,
        Span::at(off(text, "i.m()", 0), 5),
        access,
        vec![],
    );
    let call_stmt = b.expression_statement(Span::at(off(text, "i.m();", 0), 6), call);

    let file = b.finish_file(
        FileId(0),
        "impl.ts",
        text,
        vec![iface, class_x, class_y, i_stmt, call_stmt],
        false,
    );
    let arena = b.into_arena();

    let mut checker = TableChecker::new();
    let i_sym = alloc(&mut checker, symbol_flags::INTERFACE, "I", &[iface]);
    let im = alloc(&mut checker, symbol_flags::METHOD, "m", &[sig]);
    let x_sym = alloc(&mut checker, symbol_flags::CLASS, "X", &[class_x]);
    let xm_sym = alloc(&mut checker, symbol_flags::METHOD, "m", &[xm]);
    let y_sym = alloc(&mut checker, symbol_flags::CLASS, "Y", &[class_y]);
    let ym_sym = alloc(&mut checker, symbol_flags::METHOD, "m", &[ym]);
    let i_var = alloc(
        &mut checker,
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        "i",
        &[i_decl],
    );
    checker.symbols.get_mut(im).unwrap().parent = i_sym;
    checker.symbols.get_mut(xm_sym).unwrap().parent = x_sym;
    checker.symbols.get_mut(ym_sym).unwrap().parent = y_sym;

    checker.node_symbols.insert(iface.0, i_sym);
    checker.node_symbols.insert(i_iface_name.0, i_sym);
    checker.node_symbols.insert(sig_name.0, im);
    checker.node_symbols.insert(class_x.0, x_sym);
    checker.node_symbols.insert(x_name.0, x_sym);
    checker.node_symbols.insert(i_ref.0, i_sym);
    checker.node_symbols.insert(xm_name.0, xm_sym);
    checker.node_symbols.insert(class_y.0, y_sym);
    checker.node_symbols.insert(y_name.0, y_sym);
    checker.node_symbols.insert(ym_name.0, ym_sym);
    checker.node_symbols.insert(ti.0, i_sym);
    checker.node_symbols.insert(i_var_name.0, i_var);
    checker.node_symbols.insert(i_use.0, i_var);
    checker.node_symbols.insert(m_ref.0, im);

    // An implementing member carries its interface counterpart among
    // its roots.
    checker.roots.insert(xm_sym, vec![xm_sym, im]);

    let iface_type = TypeId(0);
    checker.node_types.insert(i_use.0, iface_type);
    checker.type_symbols.insert(iface_type, i_sym);

    Program {
        arena,
        files: vec![file],
        checker,
        graph: TableModuleGraph::new(),
    }
}

#[test]
fn implementations_filter_keeps_concrete_inheriting_members() {
    let program = impl_program();
    let groups = program.find(
        FileId(0),
        off(IMPL_TEXT, "i.m", 0) + 2,
        FindReferencesOptions::implementations(),
    );

    assert_eq!(groups.len(), 1);
    assert!(matches!(groups[0].definition, Definition::Symbol { .. }));
    // Only the member of the implementing class: the interface
    // signature has no body, Y never implements I, and the call site
    // is not a declaration.
    assert_eq!(
        program.spans(&groups[0]),
        vec![(0, off(IMPL_TEXT, "m(", 1), 1)]
    );
}

#[test]
fn implementation_locations_carry_line_text() {
    let program = impl_program();
    let locations = find_implementations(
        program.snapshot(),
        CancellationToken::new(),
        FileId(0),
        off(IMPL_TEXT, "i.m", 0) + 2,
    )
    .unwrap();

    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].line_text, "  m() {}");
    assert_eq!(locations[0].location.file_path, "impl.ts");
}

#[test]
fn querying_the_interface_itself_finds_implementing_classes() {
    let program = impl_program();
    let locations = find_implementations(
        program.snapshot(),
        CancellationToken::new(),
        FileId(0),
        off(IMPL_TEXT, "I;", 0),
    )
    .unwrap();

    // `class X` provides the implementation; `class Y` and the type
    // annotation use do not.
    assert_eq!(locations.len(), 1);
    assert_eq!(locations[0].line_text, "class X implements I {");
}
