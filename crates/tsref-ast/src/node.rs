//! AST nodes.
//!
//! Nodes live in a `NodeArena` and reference each other through
//! `NodeIndex`. Each node records its syntax kind, half-open byte range
//! `[pos, end)` within its file's text, a weak back-reference to its
//! parent, modifier flags, and a kind-specific payload.

use serde::Serialize;

use crate::syntax::SyntaxKind;

/// Index of a node in a `NodeArena`. `NodeIndex::NONE` is the absent
/// sentinel, mirroring optional child slots without per-field `Option`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeIndex(pub u32);

impl NodeIndex {
    pub const NONE: NodeIndex = NodeIndex(u32::MAX);

    pub const fn is_none(self) -> bool {
        self.0 == u32::MAX
    }

    pub const fn is_some(self) -> bool {
        self.0 != u32::MAX
    }
}

/// Identifier of a source file within a program snapshot. Files are
/// ordered; the ordering drives the deterministic output sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct FileId(pub u32);

/// An AST node. Immutable for the lifetime of a program snapshot.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: SyntaxKind,
    pub pos: u32,
    pub end: u32,
    pub parent: NodeIndex,
    pub modifier_flags: u32,
    pub payload: Payload,
}

impl Node {
    pub fn span(&self) -> tsref_common::Span {
        tsref_common::Span::new(self.pos, self.end)
    }
}

/// Kind-specific node data. Several kinds share a payload shape: all
/// function-like kinds use `Function`, classes and interfaces use
/// `ClassLike`, import and export specifiers use `Specifier`.
#[derive(Debug, Clone)]
pub enum Payload {
    /// Tokens and keywords carry no extra data.
    None,
    Identifier(IdentifierData),
    Literal(LiteralData),
    SourceFile(SourceFileData),
    VariableStatement {
        declaration_list: NodeIndex,
    },
    VariableDeclarationList {
        declarations: Vec<NodeIndex>,
    },
    VariableDeclaration(VariableDeclarationData),
    Function(FunctionData),
    ClassLike(ClassLikeData),
    TypeAlias {
        name: NodeIndex,
        type_node: NodeIndex,
    },
    HeritageClause {
        /// `ExtendsKeyword` or `ImplementsKeyword`.
        token: SyntaxKind,
        types: Vec<NodeIndex>,
    },
    ExpressionWithTypeArguments {
        expression: NodeIndex,
    },
    Property(PropertyData),
    Parameter(ParameterData),
    StaticBlock {
        body: NodeIndex,
    },
    Block {
        statements: Vec<NodeIndex>,
    },
    ExpressionStatement {
        expression: NodeIndex,
    },
    ReturnStatement {
        expression: NodeIndex,
    },
    IfStatement {
        expression: NodeIndex,
        then_statement: NodeIndex,
        else_statement: NodeIndex,
    },
    LabeledStatement {
        label: NodeIndex,
        statement: NodeIndex,
    },
    /// Break or continue; `label` may be `NONE`.
    BreakOrContinue {
        label: NodeIndex,
    },
    Call(CallData),
    PropertyAccess {
        expression: NodeIndex,
        name: NodeIndex,
    },
    ElementAccess {
        expression: NodeIndex,
        argument_expression: NodeIndex,
    },
    Binary {
        left: NodeIndex,
        operator: SyntaxKind,
        right: NodeIndex,
    },
    Unary {
        operator: SyntaxKind,
        operand: NodeIndex,
    },
    VoidExpression {
        expression: NodeIndex,
    },
    Paren {
        expression: NodeIndex,
    },
    ObjectLiteral {
        properties: Vec<NodeIndex>,
    },
    ArrayLiteral {
        elements: Vec<NodeIndex>,
    },
    MetaProperty {
        /// The name token following the dot (`meta`).
        name: NodeIndex,
    },
    ComputedPropertyName {
        expression: NodeIndex,
    },
    BindingPattern {
        elements: Vec<NodeIndex>,
    },
    BindingElement(BindingElementData),
    ImportDeclaration {
        import_clause: NodeIndex,
        module_specifier: NodeIndex,
    },
    ImportClause {
        /// Default import binding, `NONE` if absent.
        name: NodeIndex,
        named_bindings: NodeIndex,
    },
    NamespaceImport {
        name: NodeIndex,
    },
    NamedBindings {
        elements: Vec<NodeIndex>,
    },
    /// Import or export specifier: `name` is the local binding, and
    /// `property_name` the optional `x` of `x as y`.
    Specifier {
        property_name: NodeIndex,
        name: NodeIndex,
    },
    ExportDeclaration {
        export_clause: NodeIndex,
        module_specifier: NodeIndex,
    },
    ExportAssignment {
        expression: NodeIndex,
        is_export_equals: bool,
    },
    QualifiedName {
        left: NodeIndex,
        right: NodeIndex,
    },
    TypeReference {
        type_name: NodeIndex,
    },
    UnionType {
        types: Vec<NodeIndex>,
    },
    TypeLiteral {
        members: Vec<NodeIndex>,
    },
    TypeOperator {
        /// Currently only `ReadonlyKeyword`.
        operator: SyntaxKind,
        ty: NodeIndex,
    },
}

#[derive(Debug, Clone)]
pub struct IdentifierData {
    pub escaped_text: String,
}

#[derive(Debug, Clone)]
pub struct LiteralData {
    /// The literal's value text, without quotes for string literals.
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct SourceFileData {
    pub file_id: crate::FileId,
    pub statements: Vec<NodeIndex>,
}

#[derive(Debug, Clone)]
pub struct VariableDeclarationData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Shared by function declarations/expressions, arrow functions,
/// methods, constructors, accessors, and method signatures.
#[derive(Debug, Clone)]
pub struct FunctionData {
    pub name: NodeIndex,
    pub parameters: Vec<NodeIndex>,
    pub type_annotation: NodeIndex,
    pub body: NodeIndex,
}

/// Shared by class declarations/expressions and interface declarations.
#[derive(Debug, Clone)]
pub struct ClassLikeData {
    pub name: NodeIndex,
    pub heritage_clauses: Vec<NodeIndex>,
    pub members: Vec<NodeIndex>,
}

/// Shared by property declarations/signatures, property assignments, and
/// shorthand property assignments (which have no initializer).
#[derive(Debug, Clone)]
pub struct PropertyData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

#[derive(Debug, Clone)]
pub struct ParameterData {
    pub name: NodeIndex,
    pub type_annotation: NodeIndex,
    pub initializer: NodeIndex,
}

/// Shared by call and new expressions.
#[derive(Debug, Clone)]
pub struct CallData {
    pub expression: NodeIndex,
    pub arguments: Vec<NodeIndex>,
}

#[derive(Debug, Clone)]
pub struct BindingElementData {
    /// Explicit property name (`a` in `{ a: b }`), `NONE` for shorthand.
    pub property_name: NodeIndex,
    pub name: NodeIndex,
    pub initializer: NodeIndex,
}
