//! Host-facing AST construction.
//!
//! The parser producing this AST is an external collaborator; hosts (and
//! tests) assemble program snapshots through this builder instead. Nodes
//! are created bottom-up with explicit spans; `finish_file` wires parent
//! pointers and builds the file's name table in one pass.

use tsref_common::{LineMap, Span};

use crate::arena::NodeArena;
use crate::node::{
    BindingElementData, CallData, ClassLikeData, FileId, FunctionData, IdentifierData, LiteralData,
    Node, NodeIndex, ParameterData, Payload, PropertyData, SourceFileData, VariableDeclarationData,
};
use crate::source_file::{FileReference, NameTable, SourceFile};
use crate::syntax::{SyntaxKind, modifier_flags};

pub struct AstBuilder {
    arena: NodeArena,
}

impl AstBuilder {
    pub fn new() -> AstBuilder {
        AstBuilder {
            arena: NodeArena::new(),
        }
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    fn push(&mut self, kind: SyntaxKind, span: Span, flags: u32, payload: Payload) -> NodeIndex {
        self.arena.add(Node {
            kind,
            pos: span.start,
            end: span.end,
            parent: NodeIndex::NONE,
            modifier_flags: flags,
            payload,
        })
    }

    // -----------------------------------------------------------------
    // Tokens
    // -----------------------------------------------------------------

    /// Identifier token at `pos`; the span covers exactly `text`.
    pub fn ident(&mut self, text: &str, pos: u32) -> NodeIndex {
        self.push(
            SyntaxKind::Identifier,
            Span::at(pos, text.len() as u32),
            modifier_flags::NONE,
            Payload::Identifier(IdentifierData {
                escaped_text: text.to_string(),
            }),
        )
    }

    /// Private identifier token; `text` includes the leading `#`.
    pub fn private_ident(&mut self, text: &str, pos: u32) -> NodeIndex {
        self.push(
            SyntaxKind::PrivateIdentifier,
            Span::at(pos, text.len() as u32),
            modifier_flags::NONE,
            Payload::Identifier(IdentifierData {
                escaped_text: text.to_string(),
            }),
        )
    }

    /// String literal token at `pos`; the span covers the quotes,
    /// `text` does not include them.
    pub fn string_lit(&mut self, text: &str, pos: u32) -> NodeIndex {
        self.push(
            SyntaxKind::StringLiteral,
            Span::at(pos, text.len() as u32 + 2),
            modifier_flags::NONE,
            Payload::Literal(LiteralData {
                text: text.to_string(),
            }),
        )
    }

    pub fn numeric_lit(&mut self, text: &str, pos: u32) -> NodeIndex {
        self.push(
            SyntaxKind::NumericLiteral,
            Span::at(pos, text.len() as u32),
            modifier_flags::NONE,
            Payload::Literal(LiteralData {
                text: text.to_string(),
            }),
        )
    }

    /// Fixed-text token (keyword or punctuation) at `pos`.
    ///
    /// Panics if the kind has no fixed text; that is a builder misuse,
    /// not a recoverable condition.
    pub fn token(&mut self, kind: SyntaxKind, pos: u32) -> NodeIndex {
        let text = match kind.token_text() {
            Some(text) => text,
            None => panic!("token kind {kind:?} has no fixed text"),
        };
        self.push(
            kind,
            Span::at(pos, text.len() as u32),
            modifier_flags::NONE,
            Payload::None,
        )
    }

    // -----------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------

    pub fn variable_declaration(
        &mut self,
        span: Span,
        name: NodeIndex,
        type_annotation: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::VariableDeclaration,
            span,
            modifier_flags::NONE,
            Payload::VariableDeclaration(VariableDeclarationData {
                name,
                type_annotation,
                initializer,
            }),
        )
    }

    pub fn variable_declaration_list(
        &mut self,
        span: Span,
        declarations: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::VariableDeclarationList,
            span,
            modifier_flags::NONE,
            Payload::VariableDeclarationList { declarations },
        )
    }

    pub fn variable_statement(&mut self, span: Span, flags: u32, list: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::VariableStatement,
            span,
            flags,
            Payload::VariableStatement {
                declaration_list: list,
            },
        )
    }

    /// Any function-like node: declaration, expression, arrow, method,
    /// constructor, accessor, or method signature.
    pub fn function(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        flags: u32,
        name: NodeIndex,
        parameters: Vec<NodeIndex>,
        body: NodeIndex,
    ) -> NodeIndex {
        debug_assert!(kind.is_function_like(), "not a function-like kind: {kind:?}");
        self.push(
            kind,
            span,
            flags,
            Payload::Function(FunctionData {
                name,
                parameters,
                type_annotation: NodeIndex::NONE,
                body,
            }),
        )
    }

    pub fn parameter(
        &mut self,
        span: Span,
        flags: u32,
        name: NodeIndex,
        type_annotation: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::Parameter,
            span,
            flags,
            Payload::Parameter(ParameterData {
                name,
                type_annotation,
                initializer: NodeIndex::NONE,
            }),
        )
    }

    /// Class declaration/expression or interface declaration.
    pub fn class_like(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        flags: u32,
        name: NodeIndex,
        heritage_clauses: Vec<NodeIndex>,
        members: Vec<NodeIndex>,
    ) -> NodeIndex {
        self.push(
            kind,
            span,
            flags,
            Payload::ClassLike(ClassLikeData {
                name,
                heritage_clauses,
                members,
            }),
        )
    }

    pub fn type_alias(
        &mut self,
        span: Span,
        flags: u32,
        name: NodeIndex,
        type_node: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::TypeAliasDeclaration,
            span,
            flags,
            Payload::TypeAlias { name, type_node },
        )
    }

    pub fn heritage_clause(
        &mut self,
        span: Span,
        token: SyntaxKind,
        types: Vec<NodeIndex>,
    ) -> NodeIndex {
        debug_assert!(matches!(
            token,
            SyntaxKind::ExtendsKeyword | SyntaxKind::ImplementsKeyword
        ));
        self.push(
            SyntaxKind::HeritageClause,
            span,
            modifier_flags::NONE,
            Payload::HeritageClause { token, types },
        )
    }

    pub fn expression_with_type_arguments(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::ExpressionWithTypeArguments,
            span,
            modifier_flags::NONE,
            Payload::ExpressionWithTypeArguments { expression },
        )
    }

    /// Property-shaped nodes: class property declarations, property
    /// signatures, object-literal property assignments, and shorthand
    /// assignments (pass `NONE` initializer for shorthand).
    pub fn property(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        flags: u32,
        name: NodeIndex,
        initializer: NodeIndex,
    ) -> NodeIndex {
        self.push(
            kind,
            span,
            flags,
            Payload::Property(PropertyData {
                name,
                type_annotation: NodeIndex::NONE,
                initializer,
            }),
        )
    }

    pub fn static_block(&mut self, span: Span, body: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::ClassStaticBlockDeclaration,
            span,
            modifier_flags::STATIC,
            Payload::StaticBlock { body },
        )
    }

    // -----------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------

    pub fn block(&mut self, span: Span, statements: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::Block,
            span,
            modifier_flags::NONE,
            Payload::Block { statements },
        )
    }

    pub fn expression_statement(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::ExpressionStatement,
            span,
            modifier_flags::NONE,
            Payload::ExpressionStatement { expression },
        )
    }

    pub fn return_statement(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::ReturnStatement,
            span,
            modifier_flags::NONE,
            Payload::ReturnStatement { expression },
        )
    }

    pub fn labeled_statement(
        &mut self,
        span: Span,
        label: NodeIndex,
        statement: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::LabeledStatement,
            span,
            modifier_flags::NONE,
            Payload::LabeledStatement { label, statement },
        )
    }

    pub fn break_statement(&mut self, span: Span, label: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::BreakStatement,
            span,
            modifier_flags::NONE,
            Payload::BreakOrContinue { label },
        )
    }

    pub fn continue_statement(&mut self, span: Span, label: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::ContinueStatement,
            span,
            modifier_flags::NONE,
            Payload::BreakOrContinue { label },
        )
    }

    // -----------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------

    pub fn call(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        expression: NodeIndex,
        arguments: Vec<NodeIndex>,
    ) -> NodeIndex {
        debug_assert!(matches!(
            kind,
            SyntaxKind::CallExpression | SyntaxKind::NewExpression
        ));
        self.push(
            kind,
            span,
            modifier_flags::NONE,
            Payload::Call(CallData {
                expression,
                arguments,
            }),
        )
    }

    pub fn property_access(&mut self, span: Span, expression: NodeIndex, name: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::PropertyAccessExpression,
            span,
            modifier_flags::NONE,
            Payload::PropertyAccess { expression, name },
        )
    }

    pub fn binary(
        &mut self,
        span: Span,
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::BinaryExpression,
            span,
            modifier_flags::NONE,
            Payload::Binary {
                left,
                operator,
                right,
            },
        )
    }

    pub fn prefix_unary(&mut self, span: Span, operator: SyntaxKind, operand: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::PrefixUnaryExpression,
            span,
            modifier_flags::NONE,
            Payload::Unary { operator, operand },
        )
    }

    pub fn postfix_unary(&mut self, span: Span, operator: SyntaxKind, operand: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::PostfixUnaryExpression,
            span,
            modifier_flags::NONE,
            Payload::Unary { operator, operand },
        )
    }

    pub fn void_expression(&mut self, span: Span, expression: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::VoidExpression,
            span,
            modifier_flags::NONE,
            Payload::VoidExpression { expression },
        )
    }

    pub fn object_literal(&mut self, span: Span, properties: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::ObjectLiteralExpression,
            span,
            modifier_flags::NONE,
            Payload::ObjectLiteral { properties },
        )
    }

    pub fn array_literal(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::ArrayLiteralExpression,
            span,
            modifier_flags::NONE,
            Payload::ArrayLiteral { elements },
        )
    }

    /// `import.meta`; `name` is the `meta` identifier token.
    pub fn meta_property(&mut self, span: Span, name: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::MetaProperty,
            span,
            modifier_flags::NONE,
            Payload::MetaProperty { name },
        )
    }

    // -----------------------------------------------------------------
    // Binding patterns
    // -----------------------------------------------------------------

    pub fn binding_pattern(
        &mut self,
        kind: SyntaxKind,
        span: Span,
        elements: Vec<NodeIndex>,
    ) -> NodeIndex {
        debug_assert!(matches!(
            kind,
            SyntaxKind::ObjectBindingPattern | SyntaxKind::ArrayBindingPattern
        ));
        self.push(
            kind,
            span,
            modifier_flags::NONE,
            Payload::BindingPattern { elements },
        )
    }

    pub fn binding_element(
        &mut self,
        span: Span,
        property_name: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::BindingElement,
            span,
            modifier_flags::NONE,
            Payload::BindingElement(BindingElementData {
                property_name,
                name,
                initializer: NodeIndex::NONE,
            }),
        )
    }

    // -----------------------------------------------------------------
    // Module structure
    // -----------------------------------------------------------------

    pub fn import_declaration(
        &mut self,
        span: Span,
        import_clause: NodeIndex,
        module_specifier: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::ImportDeclaration,
            span,
            modifier_flags::NONE,
            Payload::ImportDeclaration {
                import_clause,
                module_specifier,
            },
        )
    }

    pub fn import_clause(&mut self, span: Span, name: NodeIndex, named_bindings: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::ImportClause,
            span,
            modifier_flags::NONE,
            Payload::ImportClause {
                name,
                named_bindings,
            },
        )
    }

    pub fn namespace_import(&mut self, span: Span, name: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::NamespaceImport,
            span,
            modifier_flags::NONE,
            Payload::NamespaceImport { name },
        )
    }

    pub fn named_imports(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::NamedImports,
            span,
            modifier_flags::NONE,
            Payload::NamedBindings { elements },
        )
    }

    pub fn named_exports(&mut self, span: Span, elements: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::NamedExports,
            span,
            modifier_flags::NONE,
            Payload::NamedBindings { elements },
        )
    }

    pub fn import_specifier(
        &mut self,
        span: Span,
        property_name: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::ImportSpecifier,
            span,
            modifier_flags::NONE,
            Payload::Specifier {
                property_name,
                name,
            },
        )
    }

    pub fn export_specifier(
        &mut self,
        span: Span,
        property_name: NodeIndex,
        name: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::ExportSpecifier,
            span,
            modifier_flags::NONE,
            Payload::Specifier {
                property_name,
                name,
            },
        )
    }

    pub fn export_declaration(
        &mut self,
        span: Span,
        export_clause: NodeIndex,
        module_specifier: NodeIndex,
    ) -> NodeIndex {
        self.push(
            SyntaxKind::ExportDeclaration,
            span,
            modifier_flags::NONE,
            Payload::ExportDeclaration {
                export_clause,
                module_specifier,
            },
        )
    }

    // -----------------------------------------------------------------
    // Types
    // -----------------------------------------------------------------

    pub fn type_reference(&mut self, span: Span, type_name: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::TypeReference,
            span,
            modifier_flags::NONE,
            Payload::TypeReference { type_name },
        )
    }

    pub fn union_type(&mut self, span: Span, types: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::UnionType,
            span,
            modifier_flags::NONE,
            Payload::UnionType { types },
        )
    }

    pub fn type_literal(&mut self, span: Span, members: Vec<NodeIndex>) -> NodeIndex {
        self.push(
            SyntaxKind::TypeLiteral,
            span,
            modifier_flags::NONE,
            Payload::TypeLiteral { members },
        )
    }

    pub fn type_operator(&mut self, span: Span, operator: SyntaxKind, ty: NodeIndex) -> NodeIndex {
        self.push(
            SyntaxKind::TypeOperator,
            span,
            modifier_flags::NONE,
            Payload::TypeOperator { operator, ty },
        )
    }

    // -----------------------------------------------------------------
    // Files
    // -----------------------------------------------------------------

    /// Seal a file: create its `SourceFile` node, wire parent pointers
    /// throughout the subtree, and build the name table.
    pub fn finish_file(
        &mut self,
        file_id: FileId,
        file_name: &str,
        text: &str,
        statements: Vec<NodeIndex>,
        is_external_module: bool,
    ) -> SourceFile {
        let root = self.push(
            SyntaxKind::SourceFile,
            Span::new(0, text.len() as u32),
            modifier_flags::NONE,
            Payload::SourceFile(SourceFileData {
                file_id,
                statements,
            }),
        );
        self.set_parents(root);
        let name_table = NameTable::build(&self.arena, root);
        SourceFile {
            file_id,
            file_name: file_name.to_string(),
            text: text.to_string(),
            root,
            line_map: LineMap::build(text),
            name_table,
            referenced_files: Vec::new(),
            is_external_module,
        }
    }

    /// Attach file-reference directives to a finished file.
    pub fn add_file_reference(file: &mut SourceFile, reference: FileReference) {
        file.referenced_files.push(reference);
    }

    fn set_parents(&mut self, root: NodeIndex) {
        let mut stack = vec![root];
        while let Some(index) = stack.pop() {
            let children = self.arena.children(index);
            for &child in &children {
                if let Some(node) = self.arena.get_mut(child) {
                    node.parent = index;
                }
            }
            stack.extend(children);
        }
    }
}
