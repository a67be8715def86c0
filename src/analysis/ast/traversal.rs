//! Document-order traversal driver.
//!
//! Stands in for the host engine's visitor dispatch: walks the tree with an
//! explicit enter/exit stack (no recursion, deep trees stay safe), decides
//! where logical units begin and end, and fans events out to the analyzers.

use tracing::trace;

use crate::analysis::ast::tree::{NodeId, NodeKind, SyntaxTree};

/// Origin classification of a logical unit, as the host's code-path
/// decomposition would report it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitOrigin {
    /// Whole-program scope; accumulates for alignment, never reports.
    Program,
    Function,
    ClassFieldInitializer,
    ClassStaticBlock,
}

impl UnitOrigin {
    /// Whether units of this origin are eligible for violation reporting.
    pub fn reportable(self) -> bool {
        !matches!(self, UnitOrigin::Program)
    }
}

/// Handle for one function body, static initializer, or field initializer
/// currently being traversed. Created and destroyed by the driver; the
/// analyzers only react to open/close notifications.
#[derive(Debug, Clone)]
pub struct LogicalUnit {
    pub node: NodeId,
    pub origin: UnitOrigin,
}

/// Maps unit-starting node kinds to their origin.
pub fn unit_origin(kind: &NodeKind) -> Option<UnitOrigin> {
    match kind {
        NodeKind::Program => Some(UnitOrigin::Program),
        NodeKind::Function { .. } => Some(UnitOrigin::Function),
        NodeKind::FieldInit { .. } => Some(UnitOrigin::ClassFieldInitializer),
        NodeKind::StaticBlock { .. } => Some(UnitOrigin::ClassStaticBlock),
        _ => None,
    }
}

/// Structural event callbacks, invoked in document order.
///
/// For a unit-starting node the driver fires `unit_opened` before
/// `node_entered`, and `node_exited` before `unit_closed`, so everything
/// inside the node (its own payload included) attributes to the new unit.
pub trait SyntaxVisitor {
    fn unit_opened(&mut self, _tree: &SyntaxTree, _unit: &LogicalUnit) {}
    fn unit_closed(&mut self, _tree: &SyntaxTree, _unit: &LogicalUnit) {}
    fn node_entered(&mut self, _tree: &SyntaxTree, _node: NodeId) {}
    fn node_exited(&mut self, _tree: &SyntaxTree, _node: NodeId) {}
    /// Fired once after the walk completes; deferred reporting hooks in here.
    fn traversal_finished(&mut self, _tree: &SyntaxTree) {}
}

enum Step {
    Enter(NodeId),
    Exit(NodeId),
}

/// Walks the tree once, dispatching every event to every visitor in order.
pub fn drive(tree: &SyntaxTree, visitors: &mut [&mut dyn SyntaxVisitor]) {
    let mut stack = vec![Step::Enter(tree.root())];

    while let Some(step) = stack.pop() {
        match step {
            Step::Enter(id) => {
                if let Some(origin) = unit_origin(tree.kind(id)) {
                    let unit = LogicalUnit { node: id, origin };
                    trace!(node = id, ?origin, "unit opened");
                    for visitor in visitors.iter_mut() {
                        visitor.unit_opened(tree, &unit);
                    }
                }
                for visitor in visitors.iter_mut() {
                    visitor.node_entered(tree, id);
                }
                stack.push(Step::Exit(id));
                for &child in tree.children(id).iter().rev() {
                    stack.push(Step::Enter(child));
                }
            }
            Step::Exit(id) => {
                for visitor in visitors.iter_mut() {
                    visitor.node_exited(tree, id);
                }
                if let Some(origin) = unit_origin(tree.kind(id)) {
                    let unit = LogicalUnit { node: id, origin };
                    trace!(node = id, ?origin, "unit closed");
                    for visitor in visitors.iter_mut() {
                        visitor.unit_closed(tree, &unit);
                    }
                }
            }
        }
    }

    for visitor in visitors.iter_mut() {
        visitor.traversal_finished(tree);
    }
}
