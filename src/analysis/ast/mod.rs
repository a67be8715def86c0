/// Syntax facade and traversal driver
pub mod traversal;
pub mod tree;

// Re-export main types for convenience
pub use traversal::{drive, LogicalUnit, SyntaxVisitor, UnitOrigin};
pub use tree::{NodeId, NodeInput, NodeKind, Span, SyntaxTree};
