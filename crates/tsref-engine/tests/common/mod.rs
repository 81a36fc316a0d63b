//! Shared program fixtures for the integration tests.
//!
//! Each builder hand-constructs a small program the way a host front
//! end would: AST via `AstBuilder`, resolution via `TableChecker`
//! tables, module edges via `TableModuleGraph`.

#![allow(dead_code)]

use tsref_ast::{
    modifier_flags, AstBuilder, FileId, NodeArena, NodeIndex, SourceFile, SyntaxKind,
};
use tsref_common::{CancellationToken, Span};
use tsref_engine::entry::{Entry, SymbolAndEntries};
use tsref_engine::options::FindReferencesOptions;
use tsref_sem::{
    symbol_flags, ModuleReferences, Snapshot, Symbol, SymbolId, TableChecker, TableModuleGraph,
    TypeId,
};

pub struct Program {
    pub arena: NodeArena,
    pub files: Vec<SourceFile>,
    pub checker: TableChecker,
    pub graph: TableModuleGraph,
}

impl Program {
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            arena: &self.arena,
            files: &self.files,
            checker: &self.checker,
            module_graph: &self.graph,
        }
    }

    pub fn find(
        &self,
        file: FileId,
        position: u32,
        options: FindReferencesOptions,
    ) -> Vec<SymbolAndEntries> {
        tsref_engine::find_all_references(
            self.snapshot(),
            CancellationToken::new(),
            file,
            position,
            options,
        )
        .expect("query failed")
    }

    /// (file id, start, len) triples of a group's references, in result
    /// order.
    pub fn spans(&self, group: &SymbolAndEntries) -> Vec<(u32, u32, u32)> {
        let snap = self.snapshot();
        group
            .references
            .iter()
            .map(|&entry| {
                let (file, span) = entry_span(snap, entry);
                (file.0, span.start, span.len())
            })
            .collect()
    }
}

pub fn entry_span(snap: Snapshot<'_>, entry: Entry) -> (FileId, Span) {
    match entry {
        Entry::Node { node, .. } => {
            let file = snap.file_of_node(node).expect("node outside any file");
            let span = snap.arena.get(node).expect("missing node").span();
            (file.file_id, span)
        }
        Entry::Span { file, span } => (file, span),
    }
}

/// Byte offset of the n-th (0-based) occurrence of `needle` in `text`.
pub fn off(text: &str, needle: &str, n: usize) -> u32 {
    let mut from = 0usize;
    for _ in 0..=n {
        let found = text[from..]
            .find(needle)
            .unwrap_or_else(|| panic!("needle {needle:?} not found after {from}"));
        from += found + 1;
    }
    (from - 1) as u32
}

pub fn alloc(
    checker: &mut TableChecker,
    flags: u32,
    name: &str,
    declarations: &[NodeIndex],
) -> SymbolId {
    let mut symbol = Symbol::new(flags, name);
    symbol.declarations.extend(declarations.iter().copied());
    if let Some(&first) = declarations.first() {
        symbol.value_declaration = first;
    }
    checker.symbols.alloc(symbol)
}

// ---------------------------------------------------------------------
// Private class field read and written across methods
// ---------------------------------------------------------------------

pub const FIELD_TEXT: &str = "class Sec {\n  private key = 1;\n  get() { return this.key; }\n  set(val) { this.key = val; }\n}\n";

pub fn private_field_program() -> Program {
    let text = FIELD_TEXT;
    let mut b = AstBuilder::new();

    let class_name = b.ident("Sec", off(text, "Sec", 0));
    let key_decl = b.ident("key", off(text, "key", 0));
    let one = b.numeric_lit("1", off(text, "1", 0));
    let prop = b.property(
        SyntaxKind::PropertyDeclaration,
        Span::new(off(text, "private", 0), off(text, "1;", 0) + 2),
        modifier_flags::PRIVATE,
        key_decl,
        one,
    );

    let get_name = b.ident("get", off(text, "get", 0));
    let this_get = b.token(SyntaxKind::ThisKeyword, off(text, "this", 0));
    let key_get = b.ident("key", off(text, "key", 1));
    let access_get = b.property_access(
        Span::new(off(text, "this", 0), off(text, "key", 1) + 3),
        this_get,
        key_get,
    );
    let ret = b.return_statement(
        Span::new(off(text, "return", 0), off(text, "key;", 0) + 4),
        access_get,
    );
    let get_body = b.block(
        Span::new(off(text, "{ return", 0), off(text, "; }", 0) + 3),
        vec![ret],
    );
    let get_method = b.function(
        SyntaxKind::MethodDeclaration,
        Span::new(off(text, "get", 0), off(text, "; }", 0) + 3),
        0,
        get_name,
        vec![],
        get_body,
    );

    let set_name = b.ident("set", off(text, "set", 0));
    let val_decl = b.ident("val", off(text, "val", 0));
    let param = b.parameter(
        Span::at(off(text, "val", 0), 3),
        0,
        val_decl,
        NodeIndex::NONE,
    );
    let this_set = b.token(SyntaxKind::ThisKeyword, off(text, "this", 1));
    let key_set = b.ident("key", off(text, "key", 2));
    let access_set = b.property_access(
        Span::new(off(text, "this", 1), off(text, "key", 2) + 3),
        this_set,
        key_set,
    );
    let val_use = b.ident("val", off(text, "val", 1));
    let assign = b.binary(
        Span::new(off(text, "this", 1), off(text, "val", 1) + 3),
        access_set,
        SyntaxKind::EqualsToken,
        val_use,
    );
    let assign_stmt = b.expression_statement(
        Span::new(off(text, "this", 1), off(text, "val;", 0) + 4),
        assign,
    );
    let set_body = b.block(
        Span::new(off(text, "{ this", 0), off(text, "val; }", 0) + 6),
        vec![assign_stmt],
    );
    let set_method = b.function(
        SyntaxKind::MethodDeclaration,
        Span::new(off(text, "set", 0), off(text, "val; }", 0) + 6),
        0,
        set_name,
        vec![param],
        set_body,
    );

    let class = b.class_like(
        SyntaxKind::ClassDeclaration,
        Span::new(0, text.len() as u32 - 1),
        0,
        class_name,
        vec![],
        vec![prop, get_method, set_method],
    );
    let file = b.finish_file(FileId(0), "sec.ts", text, vec![class], false);
    let arena = b.into_arena();

    let mut checker = TableChecker::new();
    let class_symbol = alloc(&mut checker, symbol_flags::CLASS, "Sec", &[class]);
    let key_symbol = alloc(&mut checker, symbol_flags::PROPERTY, "key", &[prop]);
    let val_symbol = alloc(
        &mut checker,
        symbol_flags::FUNCTION_SCOPED_VARIABLE,
        "val",
        &[param],
    );
    checker.symbols.get_mut(key_symbol).unwrap().parent = class_symbol;
    checker.node_symbols.insert(class_name.0, class_symbol);
    checker.node_symbols.insert(key_decl.0, key_symbol);
    checker.node_symbols.insert(key_get.0, key_symbol);
    checker.node_symbols.insert(key_set.0, key_symbol);
    checker.node_symbols.insert(val_decl.0, val_symbol);
    checker.node_symbols.insert(val_use.0, val_symbol);

    Program {
        arena,
        files: vec![file],
        checker,
        graph: TableModuleGraph::new(),
    }
}

// ---------------------------------------------------------------------
// Export/import across two modules
// ---------------------------------------------------------------------

pub const MODULES_A: &str = "export const v = 1;\nv;\n";
pub const MODULES_B: &str = "import { v } from \"./a\";\nv + 1;\n";

pub fn modules_program() -> Program {
    let mut b = AstBuilder::new();

    // a.ts
    let a = MODULES_A;
    let v_decl_name = b.ident("v", off(a, "v = 1", 0));
    let one = b.numeric_lit("1", off(a, "1", 0));
    let v_decl = b.variable_declaration(
        Span::new(off(a, "v = 1", 0), off(a, "1", 0) + 1),
        v_decl_name,
        NodeIndex::NONE,
        one,
    );
    let list = b.variable_declaration_list(
        Span::new(off(a, "v = 1", 0), off(a, "1", 0) + 1),
        vec![v_decl],
    );
    let stmt = b.variable_statement(Span::new(0, off(a, "1;", 0) + 2), modifier_flags::EXPORT, list);
    let v_use_a = b.ident("v", off(a, "v;", 0));
    let use_stmt_a = b.expression_statement(Span::at(off(a, "v;", 0), 2), v_use_a);
    let file_a = b.finish_file(FileId(0), "a.ts", a, vec![stmt, use_stmt_a], true);

    // b.ts
    let t = MODULES_B;
    let spec_name = b.ident("v", off(t, "v }", 0));
    let spec = b.import_specifier(Span::at(off(t, "v }", 0), 1), NodeIndex::NONE, spec_name);
    let named = b.named_imports(Span::new(off(t, "{", 0), off(t, "}", 0) + 1), vec![spec]);
    let clause = b.import_clause(
        Span::new(off(t, "{", 0), off(t, "}", 0) + 1),
        NodeIndex::NONE,
        named,
    );
    let module_spec = b.string_lit("./a", off(t, "\"./a\"", 0));
    let import = b.import_declaration(Span::new(0, off(t, "\";", 0) + 2), clause, module_spec);
    let v_use_b = b.ident("v", off(t, "v +", 0));
    let one_b = b.numeric_lit("1", off(t, "1;", 0));
    let add = b.binary(
        Span::new(off(t, "v +", 0), off(t, "1;", 0) + 1),
        v_use_b,
        SyntaxKind::PlusToken,
        one_b,
    );
    let use_stmt_b = b.expression_statement(
        Span::new(off(t, "v +", 0), off(t, "1;", 0) + 2),
        add,
    );
    let file_b = b.finish_file(FileId(1), "b.ts", t, vec![import, use_stmt_b], true);

    let arena = b.into_arena();

    let mut checker = TableChecker::new();
    let module_a = alloc(&mut checker, symbol_flags::MODULE, "\"./a\"", &[file_a.root]);
    let module_b = alloc(&mut checker, symbol_flags::MODULE, "\"./b\"", &[file_b.root]);
    let v_a = alloc(
        &mut checker,
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        "v",
        &[v_decl],
    );
    let v_b = alloc(&mut checker, symbol_flags::ALIAS, "v", &[spec]);
    checker.symbols.get_mut(v_a).unwrap().parent = module_a;
    checker.symbols.get_mut(v_b).unwrap().parent = module_b;
    checker
        .symbols
        .get_mut(module_a)
        .unwrap()
        .exports
        .insert("v".to_string(), v_a);
    checker.alias_targets.insert(v_b, v_a);
    checker.node_symbols.insert(v_decl_name.0, v_a);
    checker.node_symbols.insert(v_use_a.0, v_a);
    checker.node_symbols.insert(spec_name.0, v_b);
    checker.node_symbols.insert(v_use_b.0, v_b);

    let mut graph = TableModuleGraph::new();
    graph.insert(
        module_a,
        v_a,
        ModuleReferences {
            import_searches: vec![(spec, v_b)],
            ..ModuleReferences::default()
        },
    );

    Program {
        arena,
        files: vec![file_a, file_b],
        checker,
        graph,
    }
}

// ---------------------------------------------------------------------
// Namespace import with indirect users
// ---------------------------------------------------------------------

pub const NS_A: &str = "export const w = 1;\n";
pub const NS_C: &str = "import * as ns from \"./a\";\nns.w;\n";

pub fn namespace_import_program() -> Program {
    let mut b = AstBuilder::new();

    let a = NS_A;
    let w_decl_name = b.ident("w", off(a, "w", 0));
    let one = b.numeric_lit("1", off(a, "1", 0));
    let w_decl = b.variable_declaration(
        Span::new(off(a, "w", 0), off(a, "1", 0) + 1),
        w_decl_name,
        NodeIndex::NONE,
        one,
    );
    let list = b.variable_declaration_list(
        Span::new(off(a, "w", 0), off(a, "1", 0) + 1),
        vec![w_decl],
    );
    let stmt = b.variable_statement(Span::new(0, a.len() as u32 - 1), modifier_flags::EXPORT, list);
    let file_a = b.finish_file(FileId(0), "a.ts", a, vec![stmt], true);

    let t = NS_C;
    let ns_name = b.ident("ns", off(t, "ns from", 0));
    let ns_import = b.namespace_import(Span::at(off(t, "* as ns", 0), 7), ns_name);
    let clause = b.import_clause(
        Span::at(off(t, "* as ns", 0), 7),
        NodeIndex::NONE,
        ns_import,
    );
    let module_spec = b.string_lit("./a", off(t, "\"./a\"", 0));
    let import = b.import_declaration(Span::new(0, off(t, "\";", 0) + 2), clause, module_spec);
    let ns_use = b.ident("ns", off(t, "ns.w", 0));
    let w_use = b.ident("w", off(t, ".w;", 0) + 1);
    let access = b.property_access(Span::at(off(t, "ns.w", 0), 4), ns_use, w_use);
    let use_stmt = b.expression_statement(Span::at(off(t, "ns.w", 0), 5), access);
    let file_c = b.finish_file(FileId(1), "c.ts", t, vec![import, use_stmt], true);

    let arena = b.into_arena();

    let mut checker = TableChecker::new();
    let module_a = alloc(&mut checker, symbol_flags::MODULE, "\"./a\"", &[file_a.root]);
    let module_c = alloc(&mut checker, symbol_flags::MODULE, "\"./c\"", &[file_c.root]);
    let w_a = alloc(
        &mut checker,
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        "w",
        &[w_decl],
    );
    let ns_sym = alloc(&mut checker, symbol_flags::ALIAS, "ns", &[ns_import]);
    checker.symbols.get_mut(w_a).unwrap().parent = module_a;
    checker.symbols.get_mut(ns_sym).unwrap().parent = module_c;
    checker
        .symbols
        .get_mut(module_a)
        .unwrap()
        .exports
        .insert("w".to_string(), w_a);
    checker.alias_targets.insert(ns_sym, module_a);
    checker.node_symbols.insert(w_decl_name.0, w_a);
    checker.node_symbols.insert(ns_name.0, ns_sym);
    checker.node_symbols.insert(ns_use.0, ns_sym);
    checker.node_symbols.insert(w_use.0, w_a);

    let mut graph = TableModuleGraph::new();
    graph.insert(
        module_a,
        w_a,
        ModuleReferences {
            indirect_users: vec![FileId(1)],
            ..ModuleReferences::default()
        },
    );

    Program {
        arena,
        files: vec![file_a, file_c],
        checker,
        graph,
    }
}

// ---------------------------------------------------------------------
// Value exported through an export specifier
// ---------------------------------------------------------------------

pub const EXPORT_A: &str = "const x = 1;\nexport { x };\n";
pub const EXPORT_B: &str = "import { x } from \"./a\";\nx;\n";

pub fn export_specifier_program() -> Program {
    let mut b = AstBuilder::new();

    // a.ts
    let a = EXPORT_A;
    let x_decl_name = b.ident("x", off(a, "x = 1", 0));
    let one = b.numeric_lit("1", off(a, "1", 0));
    let x_decl = b.variable_declaration(
        Span::new(off(a, "x = 1", 0), off(a, "1", 0) + 1),
        x_decl_name,
        NodeIndex::NONE,
        one,
    );
    let list = b.variable_declaration_list(
        Span::new(off(a, "x = 1", 0), off(a, "1", 0) + 1),
        vec![x_decl],
    );
    let decl_stmt = b.variable_statement(Span::new(0, off(a, "1;", 0) + 2), 0, list);
    let export_name = b.ident("x", off(a, "x }", 0));
    let export_spec = b.export_specifier(
        Span::at(off(a, "x }", 0), 1),
        NodeIndex::NONE,
        export_name,
    );
    let named = b.named_exports(
        Span::new(off(a, "{ x }", 0), off(a, "}", 0) + 1),
        vec![export_spec],
    );
    let export_decl = b.export_declaration(
        Span::new(off(a, "export", 0), off(a, "};", 0) + 2),
        named,
        NodeIndex::NONE,
    );
    let file_a = b.finish_file(FileId(0), "a.ts", a, vec![decl_stmt, export_decl], true);

    // b.ts
    let t = EXPORT_B;
    let import_name = b.ident("x", off(t, "x }", 0));
    let import_spec = b.import_specifier(
        Span::at(off(t, "x }", 0), 1),
        NodeIndex::NONE,
        import_name,
    );
    let named_imports = b.named_imports(
        Span::new(off(t, "{", 0), off(t, "}", 0) + 1),
        vec![import_spec],
    );
    let clause = b.import_clause(
        Span::new(off(t, "{", 0), off(t, "}", 0) + 1),
        NodeIndex::NONE,
        named_imports,
    );
    let module_spec = b.string_lit("./a", off(t, "\"./a\"", 0));
    let import = b.import_declaration(Span::new(0, off(t, "\";", 0) + 2), clause, module_spec);
    let x_use = b.ident("x", off(t, "x;", 0));
    let use_stmt = b.expression_statement(Span::at(off(t, "x;", 0), 2), x_use);
    let file_b = b.finish_file(FileId(1), "b.ts", t, vec![import, use_stmt], true);

    let arena = b.into_arena();

    let mut checker = TableChecker::new();
    let module_a = alloc(&mut checker, symbol_flags::MODULE, "\"./a\"", &[file_a.root]);
    let module_b = alloc(&mut checker, symbol_flags::MODULE, "\"./b\"", &[file_b.root]);
    let x_local = alloc(
        &mut checker,
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        "x",
        &[x_decl],
    );
    let e_x = alloc(&mut checker, symbol_flags::ALIAS, "x", &[export_spec]);
    let x_b = alloc(&mut checker, symbol_flags::ALIAS, "x", &[import_spec]);
    checker.symbols.get_mut(x_local).unwrap().parent = module_a;
    checker.symbols.get_mut(e_x).unwrap().parent = module_a;
    checker.symbols.get_mut(x_b).unwrap().parent = module_b;
    checker
        .symbols
        .get_mut(module_a)
        .unwrap()
        .exports
        .insert("x".to_string(), e_x);
    checker.alias_targets.insert(e_x, x_local);
    checker.alias_targets.insert(x_b, x_local);
    checker.export_specifier_locals.insert(export_spec.0, x_local);
    checker.node_symbols.insert(x_decl_name.0, x_local);
    checker.node_symbols.insert(export_name.0, e_x);
    checker.node_symbols.insert(import_name.0, x_b);
    checker.node_symbols.insert(x_use.0, x_b);

    let mut graph = TableModuleGraph::new();
    graph.insert(
        module_a,
        e_x,
        ModuleReferences {
            import_searches: vec![(import_spec, x_b)],
            ..ModuleReferences::default()
        },
    );

    Program {
        arena,
        files: vec![file_a, file_b],
        checker,
        graph,
    }
}

// ---------------------------------------------------------------------
// Shorthand destructuring paired with an object property
// ---------------------------------------------------------------------

pub const DESTRUCTURE_TEXT: &str = "const o = { x: 1 };\nconst { x } = o;\n";

pub fn destructure_program() -> Program {
    let text = DESTRUCTURE_TEXT;
    let mut b = AstBuilder::new();

    let o_name = b.ident("o", off(text, "o = {", 0));
    let x_key = b.ident("x", off(text, "x:", 0));
    let one = b.numeric_lit("1", off(text, "1", 0));
    let prop = b.property(
        SyntaxKind::PropertyAssignment,
        Span::new(off(text, "x:", 0), off(text, "1", 0) + 1),
        0,
        x_key,
        one,
    );
    let open = off(text, "{ x: 1 }", 0);
    let obj = b.object_literal(Span::at(open, "{ x: 1 }".len() as u32), vec![prop]);
    let o_decl = b.variable_declaration(
        Span::new(off(text, "o = {", 0), open + "{ x: 1 }".len() as u32),
        o_name,
        NodeIndex::NONE,
        obj,
    );
    let o_list = b.variable_declaration_list(
        Span::new(off(text, "o = {", 0), open + "{ x: 1 }".len() as u32),
        vec![o_decl],
    );
    let o_stmt = b.variable_statement(Span::new(0, off(text, "};", 0) + 2), 0, o_list);

    let x_bind = b.ident("x", off(text, "x }", 0));
    let element = b.binding_element(Span::at(off(text, "x }", 0), 1), NodeIndex::NONE, x_bind);
    let pattern = b.binding_pattern(
        SyntaxKind::ObjectBindingPattern,
        Span::at(off(text, "{ x }", 0), "{ x }".len() as u32),
        vec![element],
    );
    let o_init = b.ident("o", off(text, "o;", 0));
    let bind_decl = b.variable_declaration(
        Span::new(off(text, "{ x }", 0), off(text, "o;", 0) + 1),
        pattern,
        NodeIndex::NONE,
        o_init,
    );
    let bind_list = b.variable_declaration_list(
        Span::new(off(text, "{ x }", 0), off(text, "o;", 0) + 1),
        vec![bind_decl],
    );
    let bind_stmt = b.variable_statement(
        Span::new(off(text, "const {", 0), off(text, "o;", 0) + 2),
        0,
        bind_list,
    );

    let file = b.finish_file(FileId(0), "d.ts", text, vec![o_stmt, bind_stmt], false);
    let arena = b.into_arena();

    let mut checker = TableChecker::new();
    let o_sym = alloc(
        &mut checker,
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        "o",
        &[o_decl],
    );
    let prop_x = alloc(&mut checker, symbol_flags::PROPERTY, "x", &[prop]);
    let local_x = alloc(
        &mut checker,
        symbol_flags::BLOCK_SCOPED_VARIABLE,
        "x",
        &[element],
    );
    checker.node_symbols.insert(o_name.0, o_sym);
    checker.node_symbols.insert(o_init.0, o_sym);
    checker.node_symbols.insert(x_key.0, prop_x);
    checker.node_symbols.insert(x_bind.0, local_x);

    let obj_type = TypeId(0);
    checker.node_types.insert(o_init.0, obj_type);
    checker.node_types.insert(obj.0, obj_type);
    checker
        .type_properties
        .insert((obj_type, "x".to_string()), prop_x);

    Program {
        arena,
        files: vec![file],
        checker,
        graph: TableModuleGraph::new(),
    }
}
