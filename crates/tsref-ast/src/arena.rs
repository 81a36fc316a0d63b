//! Node arena for AST storage.
//!
//! Nodes are stored contiguously and referenced by index. One arena
//! holds every file of a program snapshot, so a `NodeIndex` is globally
//! unique within the snapshot.

use smallvec::SmallVec;

use crate::node::{
    BindingElementData, CallData, ClassLikeData, FunctionData, Node, NodeIndex, ParameterData,
    Payload, PropertyData, SourceFileData, VariableDeclarationData,
};
use crate::syntax::SyntaxKind;

/// Child list returned from `children`; most nodes have few children.
pub type Children = SmallVec<[NodeIndex; 8]>;

#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena { nodes: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> NodeArena {
        NodeArena {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Add a node to the arena and return its index.
    pub fn add(&mut self, node: Node) -> NodeIndex {
        let index = self.nodes.len() as u32;
        self.nodes.push(node);
        NodeIndex(index)
    }

    pub fn get(&self, index: NodeIndex) -> Option<&Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get(index.0 as usize)
        }
    }

    pub fn get_mut(&mut self, index: NodeIndex) -> Option<&mut Node> {
        if index.is_none() {
            None
        } else {
            self.nodes.get_mut(index.0 as usize)
        }
    }

    pub fn kind(&self, index: NodeIndex) -> SyntaxKind {
        self.get(index).map_or(SyntaxKind::Unknown, |n| n.kind)
    }

    pub fn parent(&self, index: NodeIndex) -> NodeIndex {
        self.get(index).map_or(NodeIndex::NONE, |n| n.parent)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    // -----------------------------------------------------------------
    // Typed payload accessors
    // -----------------------------------------------------------------

    pub fn identifier_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.payload {
            Payload::Identifier(data) => Some(&data.escaped_text),
            _ => None,
        }
    }

    pub fn literal_text(&self, index: NodeIndex) -> Option<&str> {
        match &self.get(index)?.payload {
            Payload::Literal(data) => Some(&data.text),
            _ => None,
        }
    }

    /// Text of any name-bearing token: identifier, private identifier,
    /// or literal.
    pub fn name_text(&self, index: NodeIndex) -> Option<&str> {
        self.identifier_text(index)
            .or_else(|| self.literal_text(index))
    }

    pub fn source_file(&self, index: NodeIndex) -> Option<&SourceFileData> {
        match &self.get(index)?.payload {
            Payload::SourceFile(data) => Some(data),
            _ => None,
        }
    }

    pub fn variable_declaration(&self, index: NodeIndex) -> Option<&VariableDeclarationData> {
        match &self.get(index)?.payload {
            Payload::VariableDeclaration(data) => Some(data),
            _ => None,
        }
    }

    pub fn function(&self, index: NodeIndex) -> Option<&FunctionData> {
        match &self.get(index)?.payload {
            Payload::Function(data) => Some(data),
            _ => None,
        }
    }

    pub fn class_like(&self, index: NodeIndex) -> Option<&ClassLikeData> {
        match &self.get(index)?.payload {
            Payload::ClassLike(data) => Some(data),
            _ => None,
        }
    }

    pub fn property(&self, index: NodeIndex) -> Option<&PropertyData> {
        match &self.get(index)?.payload {
            Payload::Property(data) => Some(data),
            _ => None,
        }
    }

    pub fn parameter(&self, index: NodeIndex) -> Option<&ParameterData> {
        match &self.get(index)?.payload {
            Payload::Parameter(data) => Some(data),
            _ => None,
        }
    }

    pub fn call(&self, index: NodeIndex) -> Option<&CallData> {
        match &self.get(index)?.payload {
            Payload::Call(data) => Some(data),
            _ => None,
        }
    }

    pub fn binding_element(&self, index: NodeIndex) -> Option<&BindingElementData> {
        match &self.get(index)?.payload {
            Payload::BindingElement(data) => Some(data),
            _ => None,
        }
    }

    /// For import/export specifiers: `(property_name, name)`.
    pub fn specifier(&self, index: NodeIndex) -> Option<(NodeIndex, NodeIndex)> {
        match &self.get(index)?.payload {
            Payload::Specifier {
                property_name,
                name,
            } => Some((*property_name, *name)),
            _ => None,
        }
    }

    // -----------------------------------------------------------------
    // Structure
    // -----------------------------------------------------------------

    /// Child node indices in source order, `NONE` slots skipped.
    pub fn children(&self, index: NodeIndex) -> Children {
        let mut out = Children::new();
        let node = match self.get(index) {
            Some(node) => node,
            None => return out,
        };

        fn push(out: &mut Children, idx: NodeIndex) {
            if idx.is_some() {
                out.push(idx);
            }
        }
        fn push_all(out: &mut Children, list: &[NodeIndex]) {
            out.extend(list.iter().copied().filter(|idx| idx.is_some()));
        }

        match &node.payload {
            Payload::None | Payload::Identifier(_) | Payload::Literal(_) => {}
            Payload::SourceFile(data) => push_all(&mut out, &data.statements),
            Payload::VariableStatement { declaration_list } => push(&mut out, *declaration_list),
            Payload::VariableDeclarationList { declarations } => push_all(&mut out, declarations),
            Payload::VariableDeclaration(data) => {
                push(&mut out, data.name);
                push(&mut out, data.type_annotation);
                push(&mut out, data.initializer);
            }
            Payload::Function(data) => {
                push(&mut out, data.name);
                push_all(&mut out, &data.parameters);
                push(&mut out, data.type_annotation);
                push(&mut out, data.body);
            }
            Payload::ClassLike(data) => {
                push(&mut out, data.name);
                push_all(&mut out, &data.heritage_clauses);
                push_all(&mut out, &data.members);
            }
            Payload::TypeAlias { name, type_node } => {
                push(&mut out, *name);
                push(&mut out, *type_node);
            }
            Payload::HeritageClause { types, .. } => push_all(&mut out, types),
            Payload::ExpressionWithTypeArguments { expression } => push(&mut out, *expression),
            Payload::Property(data) => {
                push(&mut out, data.name);
                push(&mut out, data.type_annotation);
                push(&mut out, data.initializer);
            }
            Payload::Parameter(data) => {
                push(&mut out, data.name);
                push(&mut out, data.type_annotation);
                push(&mut out, data.initializer);
            }
            Payload::StaticBlock { body } => push(&mut out, *body),
            Payload::Block { statements } => push_all(&mut out, statements),
            Payload::ExpressionStatement { expression } => push(&mut out, *expression),
            Payload::ReturnStatement { expression } => push(&mut out, *expression),
            Payload::IfStatement {
                expression,
                then_statement,
                else_statement,
            } => {
                push(&mut out, *expression);
                push(&mut out, *then_statement);
                push(&mut out, *else_statement);
            }
            Payload::LabeledStatement { label, statement } => {
                push(&mut out, *label);
                push(&mut out, *statement);
            }
            Payload::BreakOrContinue { label } => push(&mut out, *label),
            Payload::Call(data) => {
                push(&mut out, data.expression);
                push_all(&mut out, &data.arguments);
            }
            Payload::PropertyAccess { expression, name } => {
                push(&mut out, *expression);
                push(&mut out, *name);
            }
            Payload::ElementAccess {
                expression,
                argument_expression,
            } => {
                push(&mut out, *expression);
                push(&mut out, *argument_expression);
            }
            Payload::Binary { left, right, .. } => {
                push(&mut out, *left);
                push(&mut out, *right);
            }
            Payload::Unary { operand, .. } => push(&mut out, *operand),
            Payload::VoidExpression { expression } => push(&mut out, *expression),
            Payload::Paren { expression } => push(&mut out, *expression),
            Payload::ObjectLiteral { properties } => push_all(&mut out, properties),
            Payload::ArrayLiteral { elements } => push_all(&mut out, elements),
            Payload::MetaProperty { name } => push(&mut out, *name),
            Payload::ComputedPropertyName { expression } => push(&mut out, *expression),
            Payload::BindingPattern { elements } => push_all(&mut out, elements),
            Payload::BindingElement(data) => {
                push(&mut out, data.property_name);
                push(&mut out, data.name);
                push(&mut out, data.initializer);
            }
            Payload::ImportDeclaration {
                import_clause,
                module_specifier,
            } => {
                push(&mut out, *import_clause);
                push(&mut out, *module_specifier);
            }
            Payload::ImportClause {
                name,
                named_bindings,
            } => {
                push(&mut out, *name);
                push(&mut out, *named_bindings);
            }
            Payload::NamespaceImport { name } => push(&mut out, *name),
            Payload::NamedBindings { elements } => push_all(&mut out, elements),
            Payload::Specifier {
                property_name,
                name,
            } => {
                push(&mut out, *property_name);
                push(&mut out, *name);
            }
            Payload::ExportDeclaration {
                export_clause,
                module_specifier,
            } => {
                push(&mut out, *export_clause);
                push(&mut out, *module_specifier);
            }
            Payload::ExportAssignment { expression, .. } => push(&mut out, *expression),
            Payload::QualifiedName { left, right } => {
                push(&mut out, *left);
                push(&mut out, *right);
            }
            Payload::TypeReference { type_name } => push(&mut out, *type_name),
            Payload::UnionType { types } => push_all(&mut out, types),
            Payload::TypeLiteral { members } => push_all(&mut out, members),
            Payload::TypeOperator { ty, .. } => push(&mut out, *ty),
        }

        out
    }

    /// Depth-first preorder walk of the subtree rooted at `root`.
    pub fn for_each_descendant(&self, root: NodeIndex, f: &mut impl FnMut(NodeIndex)) {
        let mut stack: Vec<NodeIndex> = vec![root];
        while let Some(index) = stack.pop() {
            f(index);
            let children = self.children(index);
            // Reverse so the stack pops in source order.
            stack.extend(children.iter().rev().copied());
        }
    }

    /// The deepest node whose `[pos, end)` range contains `pos`,
    /// descending from `root`. Returns `NONE` when `pos` is outside
    /// every child of the root and the root itself.
    pub fn token_at_position(&self, root: NodeIndex, pos: u32) -> NodeIndex {
        let root_node = match self.get(root) {
            Some(node) => node,
            None => return NodeIndex::NONE,
        };
        if !(root_node.pos <= pos && pos < root_node.end) {
            return NodeIndex::NONE;
        }

        let mut current = root;
        'descend: loop {
            for child in self.children(current) {
                if let Some(node) = self.get(child) {
                    if node.pos <= pos && pos < node.end {
                        current = child;
                        continue 'descend;
                    }
                }
            }
            return current;
        }
    }

    /// The `SourceFile` node owning `index`, found by walking parents.
    pub fn source_file_of(&self, index: NodeIndex) -> NodeIndex {
        let mut current = index;
        while current.is_some() {
            if self.kind(current) == SyntaxKind::SourceFile {
                return current;
            }
            current = self.parent(current);
        }
        NodeIndex::NONE
    }

    /// Walk up from `index` until `pred` matches; returns `NONE` if no
    /// ancestor matches.
    pub fn find_ancestor(&self, index: NodeIndex, pred: impl Fn(NodeIndex) -> bool) -> NodeIndex {
        let mut current = self.parent(index);
        while current.is_some() {
            if pred(current) {
                return current;
            }
            current = self.parent(current);
        }
        NodeIndex::NONE
    }

    /// The name child of a named declaration, `NONE` for everything else.
    pub fn declaration_name(&self, index: NodeIndex) -> NodeIndex {
        let node = match self.get(index) {
            Some(node) => node,
            None => return NodeIndex::NONE,
        };
        match &node.payload {
            Payload::VariableDeclaration(data) => data.name,
            Payload::Function(data) => data.name,
            Payload::ClassLike(data) => data.name,
            Payload::TypeAlias { name, .. } => *name,
            Payload::Property(data) => data.name,
            Payload::Parameter(data) => data.name,
            Payload::BindingElement(data) => data.name,
            Payload::NamespaceImport { name } => *name,
            Payload::ImportClause { name, .. } => *name,
            Payload::Specifier { name, .. } => *name,
            _ => NodeIndex::NONE,
        }
    }

    /// Whether `name` is the name child of its parent declaration.
    pub fn is_declaration_name(&self, name: NodeIndex) -> bool {
        let parent = self.parent(name);
        parent.is_some() && self.declaration_name(parent) == name
    }
}

#[cfg(test)]
#[path = "tests/arena_tests.rs"]
mod arena_tests;
