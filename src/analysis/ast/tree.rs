//! Event-relevant projection of the host's syntax tree.
//!
//! The parser and the full AST live in the host engine; the metrics core only
//! ever sees the node kinds it has visitor callbacks for. This module models
//! that projection as a flat arena with parent links (the traversal driver
//! needs parent-kind lookups for logical-chain analysis) plus a nested serde
//! form for reading trees from JSON.

use serde::{Deserialize, Serialize};

/// Index of a node inside a [`SyntaxTree`] arena.
pub type NodeId = usize;

/// Source position of a node, as reported by the host parser.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

/// Syntactic form of a function-like node, used for violation naming.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionForm {
    #[default]
    Declaration,
    Expression,
    Arrow,
    Method,
}

/// Short-circuit logical operator token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogicalOp {
    #[serde(rename = "&&")]
    And,
    #[serde(rename = "||")]
    Or,
}

/// Assignment operator token. Only plain assignment (binding detection) and
/// the short-circuit forms (decision points) are distinguished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssignOp {
    #[default]
    #[serde(rename = "=")]
    Plain,
    #[serde(rename = "&&=")]
    LogicalAnd,
    #[serde(rename = "||=")]
    LogicalOr,
    #[serde(rename = "??=")]
    Coalesce,
}

/// Shape of a call expression's callee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum Callee {
    /// Bare identifier call: `foo()`.
    Identifier { name: String },
    /// Property access call: `obj.foo()`; only the property name matters.
    Member { property: String },
    /// Anything else (computed member, call result, ...).
    Other,
}

/// Shape of an assignment's left-hand side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum AssignTarget {
    Identifier { name: String },
    Member { property: String },
}

/// Closed set of node kinds the traversal reports to the metrics core.
///
/// This replaces string `kind()` dispatch with an exhaustive match. Kinds
/// carry exactly the payload the counters need: statement blocks carry their
/// immediate statement count, `if` carries the else/else-if markers, switch
/// arms carry the test-less marker, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Program,
    Function {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
        #[serde(default)]
        form: FunctionForm,
    },
    /// Class static initializer block; doubles as a statement block.
    StaticBlock {
        #[serde(default)]
        statements: u32,
    },
    /// Class field initializer expression.
    FieldInit {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Ordinary statement block with its immediate (non-recursive) length.
    Block {
        #[serde(default)]
        statements: u32,
    },
    If {
        #[serde(default)]
        has_else: bool,
        /// True when the else branch is itself another `if` (else-if link).
        #[serde(default)]
        else_is_if: bool,
    },
    Switch,
    SwitchArm {
        /// False for a `default:` arm.
        #[serde(default)]
        has_test: bool,
    },
    Catch,
    /// Ternary conditional expression.
    Conditional,
    For,
    ForIn,
    ForOf,
    While,
    DoWhile,
    Logical {
        op: LogicalOp,
    },
    /// Nullish coalescing (`??`); counted per occurrence, never chain-merged.
    Coalesce,
    Assignment {
        #[serde(default)]
        op: AssignOp,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        target: Option<AssignTarget>,
    },
    Call {
        callee: Callee,
    },
    /// `let f = ...` declarator; parent of a function it binds.
    VarDeclarator {
        name: String,
    },
    /// Object-literal property; parent of a function it shorthand-defines.
    Property {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Reported structural node with no metric relevance.
    Other,
}

#[derive(Debug, Clone)]
struct SyntaxNode {
    kind: NodeKind,
    span: Span,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed syntax tree in document order.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    nodes: Vec<SyntaxNode>,
}

impl SyntaxTree {
    /// Creates a tree holding only the given root node (id 0).
    pub fn new(root: NodeKind) -> Self {
        Self {
            nodes: vec![SyntaxNode {
                kind: root,
                span: Span::default(),
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        0
    }

    /// Appends a child node; children must be added in document order.
    pub fn add(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        self.add_at(parent, kind, Span::default())
    }

    pub fn add_at(&mut self, parent: NodeId, kind: NodeKind, span: Span) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(SyntaxNode {
            kind,
            span,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent].children.push(id);
        id
    }

    pub fn kind(&self, id: NodeId) -> &NodeKind {
        &self.nodes[id].kind
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.nodes[id].span
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id].children
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Builds an arena tree from the nested serde form.
    pub fn from_input(input: &NodeInput) -> Self {
        let mut tree = Self::new(input.kind.clone());
        if let Some(span) = input.span {
            tree.nodes[0].span = span;
        }
        for child in &input.children {
            Self::insert_input(&mut tree, 0, child);
        }
        tree
    }

    fn insert_input(tree: &mut SyntaxTree, parent: NodeId, input: &NodeInput) {
        let id = tree.add_at(parent, input.kind.clone(), input.span.unwrap_or_default());
        for child in &input.children {
            Self::insert_input(tree, id, child);
        }
    }

    /// Resolves the syntactic name a function is bound to, if any.
    ///
    /// Checked in priority order against the function's own position: its
    /// declared name, then the declarator / plain-assignment / property the
    /// function node directly hangs under. Purely textual; no scope
    /// resolution is performed.
    pub fn function_binding(&self, id: NodeId) -> Option<String> {
        let NodeKind::Function { name, .. } = self.kind(id) else {
            return None;
        };
        if let Some(name) = name {
            return Some(name.clone());
        }
        let parent = self.parent(id)?;
        match self.kind(parent) {
            NodeKind::VarDeclarator { name } => Some(name.clone()),
            NodeKind::Assignment {
                op: AssignOp::Plain,
                target: Some(AssignTarget::Identifier { name }),
            } => Some(name.clone()),
            NodeKind::Assignment {
                op: AssignOp::Plain,
                target: Some(AssignTarget::Member { property }),
            } => Some(property.clone()),
            NodeKind::Property { name: Some(key) } => Some(key.clone()),
            _ => None,
        }
    }
}

/// Nested serde form of a syntax tree, as consumed by the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeInput {
    #[serde(flatten)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NodeInput>,
}
