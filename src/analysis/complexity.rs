//! Cyclomatic complexity counter.
//!
//! One accumulator per open logical unit, starting at 1 (the baseline
//! execution path). Every decision point adds to the innermost accumulator;
//! on close of a reportable unit the final score is checked against the
//! configured maximum.

use tracing::debug;

use crate::analysis::ast::traversal::{LogicalUnit, SyntaxVisitor, UnitOrigin};
use crate::analysis::ast::tree::{AssignOp, Callee, LogicalOp, NodeId, NodeKind, SyntaxTree};
use crate::analysis::scope::ScopeStack;
use crate::config::ComplexityOption;
use crate::report::{unit_name, Violation};

pub struct ComplexityAnalyzer {
    maximum: u32,
    scopes: ScopeStack,
    /// One entry per open unit; `Some` only for function-origin units with a
    /// resolvable syntactic name. Non-function units push `None` to keep the
    /// stack aligned with the scope stack.
    bindings: Vec<Option<String>>,
    violations: Vec<Violation>,
}

impl ComplexityAnalyzer {
    pub fn new(option: &ComplexityOption) -> Self {
        Self {
            maximum: option.maximum(),
            scopes: ScopeStack::new(),
            bindings: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    /// Whether a call expression is a textual self-call of the innermost
    /// enclosing function. Nested units shadow outer bindings: anything that
    /// is not a function pushes an empty binding, so recursion detection
    /// never reaches past the current unit.
    fn is_recursive_call(&self, callee: &Callee) -> bool {
        let Some(Some(binding)) = self.bindings.last() else {
            return false;
        };
        match callee {
            Callee::Identifier { name } => name == binding,
            Callee::Member { property } => property == binding,
            Callee::Other => false,
        }
    }
}

impl SyntaxVisitor for ComplexityAnalyzer {
    fn unit_opened(&mut self, tree: &SyntaxTree, unit: &LogicalUnit) {
        self.scopes.open();
        self.scopes.add(1);
        let binding = match unit.origin {
            UnitOrigin::Function => tree.function_binding(unit.node),
            _ => None,
        };
        self.bindings.push(binding);
    }

    fn node_entered(&mut self, tree: &SyntaxTree, node: NodeId) {
        match tree.kind(node) {
            NodeKind::Catch
            | NodeKind::Conditional
            | NodeKind::For
            | NodeKind::ForIn
            | NodeKind::ForOf
            | NodeKind::While
            | NodeKind::DoWhile
            | NodeKind::Coalesce => self.scopes.add(1),
            NodeKind::If {
                has_else,
                else_is_if,
            } => {
                // The final else of a chain adds a point; an else-if link
                // does not, its nested `if` adds its own.
                let else_bonus = u32::from(*has_else && !*else_is_if);
                self.scopes.add(1 + else_bonus);
            }
            NodeKind::Switch => {
                let has_default = tree
                    .children(node)
                    .iter()
                    .any(|&arm| matches!(tree.kind(arm), NodeKind::SwitchArm { has_test: false }));
                self.scopes.add(1 + u32::from(has_default));
            }
            NodeKind::Assignment {
                op: AssignOp::LogicalAnd | AssignOp::LogicalOr | AssignOp::Coalesce,
                ..
            } => self.scopes.add(1),
            NodeKind::Logical { .. } => {
                // Only the outermost expression of a contiguous chain is
                // scanned; nested logical nodes are covered by the ancestor.
                let nested = tree
                    .parent(node)
                    .is_some_and(|p| matches!(tree.kind(p), NodeKind::Logical { .. }));
                if !nested {
                    self.scopes.add(count_operator_runs(tree, node));
                }
            }
            NodeKind::Call { callee } => {
                if self.is_recursive_call(callee) {
                    self.scopes.add(1);
                }
            }
            _ => {}
        }
    }

    fn unit_closed(&mut self, tree: &SyntaxTree, unit: &LogicalUnit) {
        let score = self.scopes.close();
        self.bindings.pop();
        if !unit.origin.reportable() {
            return;
        }
        if self.maximum == 0 || score > self.maximum {
            let name = unit_name(tree, unit);
            debug!(%name, score, max = self.maximum, "complexity over limit");
            self.violations.push(Violation::complexity(
                name,
                score,
                self.maximum,
                tree.span(unit.node),
            ));
        }
    }
}

/// Counts maximal same-operator runs in one contiguous logical chain.
///
/// Each operator change along a path through the operand tree starts a new
/// run (the root always starts one); consecutive same-operator nodes merge.
/// `a&&b&&c` has one run, `a&&b&&c||d||e` two, `a&&b||c&&d` three.
pub fn count_operator_runs(tree: &SyntaxTree, root: NodeId) -> u32 {
    let mut runs = 0;
    scan_runs(tree, root, None, &mut runs);
    runs
}

fn scan_runs(tree: &SyntaxTree, node: NodeId, current: Option<LogicalOp>, runs: &mut u32) {
    let NodeKind::Logical { op } = tree.kind(node) else {
        return;
    };
    let op = *op;
    let current = if current == Some(op) {
        current
    } else {
        *runs += 1;
        Some(op)
    };
    for &child in tree.children(node) {
        scan_runs(tree, child, current, runs);
    }
}
