//! Violation records handed to the reporting collaborator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::analysis::ast::traversal::{LogicalUnit, UnitOrigin};
use crate::analysis::ast::tree::{FunctionForm, NodeKind, Span, SyntaxTree};

/// One offending logical unit. Immutable once produced; ownership moves to
/// whatever sink collects it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    pub rule_id: String,
    /// Declaration-kind-qualified unit name, e.g. `Function 'foo'`.
    pub name: String,
    /// Computed metric value.
    pub value: u32,
    /// Configured threshold it exceeded.
    pub max: u32,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl Violation {
    pub fn complexity(name: String, value: u32, max: u32, span: Span) -> Self {
        let message = format!("{name} has a complexity of {value}. Maximum allowed is {max}.");
        Self {
            rule_id: "CYCLO001".to_string(),
            name,
            value,
            max,
            line: span.line,
            column: span.column,
            message,
        }
    }

    pub fn statements(name: String, value: u32, max: u32, span: Span) -> Self {
        let message = format!("{name} has too many statements ({value}). Maximum allowed is {max}.");
        Self {
            rule_id: "STMT001".to_string(),
            name,
            value,
            max,
            line: span.line,
            column: span.column,
            message,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} {} {}", self.line, self.column, self.rule_id, self.message)
    }
}

/// Human-readable name of a logical unit for diagnostics.
pub fn unit_name(tree: &SyntaxTree, unit: &LogicalUnit) -> String {
    match unit.origin {
        UnitOrigin::Program => "Program".to_string(),
        UnitOrigin::ClassStaticBlock => "Class static block".to_string(),
        UnitOrigin::ClassFieldInitializer => match tree.kind(unit.node) {
            NodeKind::FieldInit { name: Some(key) } => {
                format!("Class field initializer '{key}'")
            }
            _ => "Class field initializer".to_string(),
        },
        UnitOrigin::Function => {
            let form = match tree.kind(unit.node) {
                NodeKind::Function { form, .. } => *form,
                _ => FunctionForm::Declaration,
            };
            let base = match form {
                FunctionForm::Arrow => "Arrow function",
                FunctionForm::Method => "Method",
                FunctionForm::Declaration | FunctionForm::Expression => "Function",
            };
            match tree.function_binding(unit.node) {
                Some(name) => format!("{base} '{name}'"),
                None => base.to_string(),
            }
        }
    }
}
