//! Statement counter.
//!
//! Each function-like unit owns one accumulator spanning every statement
//! block lexically inside it, up to the next nested function boundary.
//! Nested blocks add their own immediate lengths to the same accumulator;
//! nested functions open their own.

use tracing::debug;

use crate::analysis::ast::traversal::{LogicalUnit, SyntaxVisitor, UnitOrigin};
use crate::analysis::ast::tree::{NodeId, NodeKind, SyntaxTree};
use crate::analysis::scope::ScopeStack;
use crate::config::{StatementFlags, StatementOption};
use crate::report::{unit_name, Violation};

pub struct StatementAnalyzer {
    maximum: u32,
    ignore_top_level: bool,
    scopes: ScopeStack,
    /// Top-level units held back for end-of-traversal review when
    /// `ignoreTopLevelFunctions` is set.
    deferred: Vec<(LogicalUnit, u32)>,
    violations: Vec<Violation>,
}

impl StatementAnalyzer {
    pub fn new(option: &StatementOption, flags: &StatementFlags) -> Self {
        Self {
            maximum: option.maximum(),
            ignore_top_level: flags.ignore_top_level_functions,
            scopes: ScopeStack::new(),
            deferred: Vec::new(),
            violations: Vec::new(),
        }
    }

    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }

    fn report(&mut self, tree: &SyntaxTree, unit: &LogicalUnit, count: u32) {
        let name = unit_name(tree, unit);
        debug!(%name, count, max = self.maximum, "statement count over limit");
        self.violations.push(Violation::statements(
            name,
            count,
            self.maximum,
            tree.span(unit.node),
        ));
    }
}

impl SyntaxVisitor for StatementAnalyzer {
    fn unit_opened(&mut self, _tree: &SyntaxTree, unit: &LogicalUnit) {
        // Only function-like units own an accumulator here; program and
        // field-initializer scopes contribute to no one.
        if matches!(
            unit.origin,
            UnitOrigin::Function | UnitOrigin::ClassStaticBlock
        ) {
            self.scopes.open();
        }
    }

    fn node_entered(&mut self, tree: &SyntaxTree, node: NodeId) {
        match tree.kind(node) {
            NodeKind::Block { statements } | NodeKind::StaticBlock { statements } => {
                // No-op at program level: top-level blocks belong to no
                // function-like unit.
                self.scopes.add(*statements);
            }
            _ => {}
        }
    }

    fn unit_closed(&mut self, tree: &SyntaxTree, unit: &LogicalUnit) {
        match unit.origin {
            UnitOrigin::Function => {
                let count = self.scopes.close();
                if self.ignore_top_level && self.scopes.is_empty() {
                    self.deferred.push((unit.clone(), count));
                } else if count > self.maximum {
                    self.report(tree, unit, count);
                }
            }
            // Tracked for stack alignment; never reported directly.
            UnitOrigin::ClassStaticBlock => {
                let _ = self.scopes.close();
            }
            UnitOrigin::Program | UnitOrigin::ClassFieldInitializer => {}
        }
    }

    fn traversal_finished(&mut self, tree: &SyntaxTree) {
        // A lone top-level function is assumed to be a wrapper and exempted;
        // with two or more, every deferred unit is held to the limit.
        if self.deferred.len() == 1 {
            self.deferred.clear();
            return;
        }
        let deferred = std::mem::take(&mut self.deferred);
        for (unit, count) in deferred {
            if count > self.maximum {
                self.report(tree, &unit, count);
            }
        }
    }
}
