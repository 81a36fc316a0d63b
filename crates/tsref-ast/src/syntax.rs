//! Syntax kinds for the AST.
//!
//! A trimmed kind set covering the constructs the reference engine
//! distinguishes. Token kinds come first, then node kinds; the numeric
//! values are not stable and must not be persisted.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u16)]
pub enum SyntaxKind {
    Unknown = 0,

    // Tokens
    Identifier,
    PrivateIdentifier,
    StringLiteral,
    NumericLiteral,
    ThisKeyword,
    SuperKeyword,
    DefaultKeyword,
    VoidKeyword,
    ReadonlyKeyword,
    ExtendsKeyword,
    ImplementsKeyword,
    ImportKeyword,
    EqualsToken,
    PlusEqualsToken,
    MinusEqualsToken,
    AsteriskEqualsToken,
    SlashEqualsToken,
    PlusPlusToken,
    MinusMinusToken,
    PlusToken,
    MinusToken,
    AsteriskToken,
    SlashToken,
    LessThanToken,
    GreaterThanToken,
    EqualsEqualsEqualsToken,

    // Names
    QualifiedName,
    ComputedPropertyName,

    // Declarations
    SourceFile,
    VariableStatement,
    VariableDeclarationList,
    VariableDeclaration,
    FunctionDeclaration,
    ClassDeclaration,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    Parameter,
    PropertyDeclaration,
    MethodDeclaration,
    Constructor,
    GetAccessor,
    SetAccessor,
    ClassStaticBlockDeclaration,
    PropertySignature,
    MethodSignature,
    HeritageClause,
    ExpressionWithTypeArguments,

    // Module structure
    ImportDeclaration,
    ImportClause,
    NamespaceImport,
    NamedImports,
    ImportSpecifier,
    ExportDeclaration,
    NamedExports,
    ExportSpecifier,
    ExportAssignment,

    // Statements
    Block,
    ExpressionStatement,
    ReturnStatement,
    IfStatement,
    LabeledStatement,
    BreakStatement,
    ContinueStatement,

    // Expressions
    FunctionExpression,
    ArrowFunction,
    ClassExpression,
    CallExpression,
    NewExpression,
    PropertyAccessExpression,
    ElementAccessExpression,
    BinaryExpression,
    PrefixUnaryExpression,
    PostfixUnaryExpression,
    VoidExpression,
    ParenthesizedExpression,
    ObjectLiteralExpression,
    ArrayLiteralExpression,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    MetaProperty,

    // Binding patterns
    ObjectBindingPattern,
    ArrayBindingPattern,
    BindingElement,

    // Types
    TypeReference,
    UnionType,
    TypeLiteral,
    TypeOperator,
}

impl SyntaxKind {
    /// The fixed source text of a token kind, or `None` for kinds whose
    /// text varies (identifiers, literals) and for non-token kinds.
    pub const fn token_text(self) -> Option<&'static str> {
        use SyntaxKind::*;
        Some(match self {
            ThisKeyword => "this",
            SuperKeyword => "super",
            DefaultKeyword => "default",
            VoidKeyword => "void",
            ReadonlyKeyword => "readonly",
            ExtendsKeyword => "extends",
            ImplementsKeyword => "implements",
            ImportKeyword => "import",
            EqualsToken => "=",
            PlusEqualsToken => "+=",
            MinusEqualsToken => "-=",
            AsteriskEqualsToken => "*=",
            SlashEqualsToken => "/=",
            PlusPlusToken => "++",
            MinusMinusToken => "--",
            PlusToken => "+",
            MinusToken => "-",
            AsteriskToken => "*",
            SlashToken => "/",
            LessThanToken => "<",
            GreaterThanToken => ">",
            EqualsEqualsEqualsToken => "===",
            _ => return None,
        })
    }

    pub const fn is_assignment_operator(self) -> bool {
        matches!(
            self,
            SyntaxKind::EqualsToken
                | SyntaxKind::PlusEqualsToken
                | SyntaxKind::MinusEqualsToken
                | SyntaxKind::AsteriskEqualsToken
                | SyntaxKind::SlashEqualsToken
        )
    }

    /// Kinds that declare something with a name child.
    pub const fn is_named_declaration(self) -> bool {
        matches!(
            self,
            SyntaxKind::VariableDeclaration
                | SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ClassDeclaration
                | SyntaxKind::ClassExpression
                | SyntaxKind::InterfaceDeclaration
                | SyntaxKind::TypeAliasDeclaration
                | SyntaxKind::Parameter
                | SyntaxKind::PropertyDeclaration
                | SyntaxKind::PropertySignature
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::MethodSignature
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
                | SyntaxKind::PropertyAssignment
                | SyntaxKind::ShorthandPropertyAssignment
                | SyntaxKind::BindingElement
                | SyntaxKind::ImportSpecifier
                | SyntaxKind::ExportSpecifier
                | SyntaxKind::NamespaceImport
        )
    }

    pub const fn is_class_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::ClassDeclaration | SyntaxKind::ClassExpression
        )
    }

    pub const fn is_function_like(self) -> bool {
        matches!(
            self,
            SyntaxKind::FunctionDeclaration
                | SyntaxKind::FunctionExpression
                | SyntaxKind::ArrowFunction
                | SyntaxKind::MethodDeclaration
                | SyntaxKind::MethodSignature
                | SyntaxKind::Constructor
                | SyntaxKind::GetAccessor
                | SyntaxKind::SetAccessor
        )
    }

    /// Kinds that syntactically are type nodes.
    pub const fn is_type_node(self) -> bool {
        matches!(
            self,
            SyntaxKind::TypeReference
                | SyntaxKind::UnionType
                | SyntaxKind::TypeLiteral
                | SyntaxKind::TypeOperator
        )
    }
}

/// Modifier flags recorded on nodes. Modifiers are represented as flags
/// rather than child tokens; heritage keywords stay real tokens because
/// heritage clauses need them for extends/implements distinction.
pub mod modifier_flags {
    pub const NONE: u32 = 0;
    pub const EXPORT: u32 = 1 << 0;
    pub const DEFAULT: u32 = 1 << 1;
    pub const DECLARE: u32 = 1 << 2;
    pub const PUBLIC: u32 = 1 << 3;
    pub const PRIVATE: u32 = 1 << 4;
    pub const PROTECTED: u32 = 1 << 5;
    pub const STATIC: u32 = 1 << 6;
    pub const READONLY: u32 = 1 << 7;
    pub const ABSTRACT: u32 = 1 << 8;

    /// Modifiers that turn a constructor parameter into a class property.
    pub const PARAMETER_PROPERTY: u32 = PUBLIC | PRIVATE | PROTECTED | READONLY;

    pub const ACCESSIBILITY: u32 = PUBLIC | PRIVATE | PROTECTED;
}

/// Identifier character classification, ASCII-fast with a unicode
/// alphabetic fallback. String search boundaries and the candidate
/// scanner share these.
pub mod char_info {
    pub fn is_identifier_start(ch: char) -> bool {
        ch == '_' || ch == '$' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
    }

    pub fn is_identifier_part(ch: char) -> bool {
        ch == '_'
            || ch == '$'
            || ch.is_ascii_alphanumeric()
            || (!ch.is_ascii() && ch.is_alphanumeric())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_text_lengths() {
        assert_eq!(SyntaxKind::DefaultKeyword.token_text(), Some("default"));
        assert_eq!(SyntaxKind::ThisKeyword.token_text().map(str::len), Some(4));
        assert_eq!(SyntaxKind::Identifier.token_text(), None);
    }

    #[test]
    fn identifier_chars() {
        assert!(char_info::is_identifier_part('x'));
        assert!(char_info::is_identifier_part('$'));
        assert!(char_info::is_identifier_part('9'));
        assert!(!char_info::is_identifier_part('.'));
        assert!(!char_info::is_identifier_start('9'));
    }
}
