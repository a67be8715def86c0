use scope_metrics::analysis::ast::tree::{
    AssignOp, Callee, FunctionForm, LogicalOp, NodeId, NodeKind,
};
use scope_metrics::{analyze_complexity, ComplexityOption, SyntaxTree};

/// Program with one named function declaration; returns (tree, body block).
fn function_with_body(name: &str) -> (SyntaxTree, NodeId) {
    let mut tree = SyntaxTree::new(NodeKind::Program);
    let func = tree.add(
        0,
        NodeKind::Function {
            name: Some(name.into()),
            form: FunctionForm::Declaration,
        },
    );
    let body = tree.add(func, NodeKind::Block { statements: 1 });
    (tree, body)
}

/// Computed score of the only reportable unit, read back through a zero
/// threshold (which reports unconditionally).
fn score_of(tree: &SyntaxTree) -> u32 {
    let violations = analyze_complexity(tree, &ComplexityOption::Threshold(0));
    assert_eq!(violations.len(), 1, "expected exactly one reported unit");
    violations[0].value
}

#[test]
fn straight_line_function_scores_one() {
    let (tree, _) = function_with_body("f");
    assert_eq!(score_of(&tree), 1);
}

#[test]
fn bare_if_adds_one() {
    let (mut tree, body) = function_with_body("f");
    tree.add(
        body,
        NodeKind::If {
            has_else: false,
            else_is_if: false,
        },
    );
    assert_eq!(score_of(&tree), 2);
}

#[test]
fn final_else_adds_one_more() {
    let (mut tree, body) = function_with_body("f");
    tree.add(
        body,
        NodeKind::If {
            has_else: true,
            else_is_if: false,
        },
    );
    assert_eq!(score_of(&tree), 3);
}

#[test]
fn else_if_chain_counts_per_if_plus_final_else() {
    // if (a) {} else if (b) {} else {}
    let (mut tree, body) = function_with_body("f");
    let first = tree.add(
        body,
        NodeKind::If {
            has_else: true,
            else_is_if: true,
        },
    );
    tree.add(
        first,
        NodeKind::If {
            has_else: true,
            else_is_if: false,
        },
    );
    // 1 base + 1 (first if) + 1 (second if) + 1 (final else)
    assert_eq!(score_of(&tree), 4);
}

#[test]
fn loops_catch_and_ternary_add_one_each() {
    let (mut tree, body) = function_with_body("f");
    tree.add(body, NodeKind::For);
    tree.add(body, NodeKind::ForIn);
    tree.add(body, NodeKind::ForOf);
    tree.add(body, NodeKind::While);
    tree.add(body, NodeKind::DoWhile);
    tree.add(body, NodeKind::Catch);
    tree.add(body, NodeKind::Conditional);
    assert_eq!(score_of(&tree), 8);
}

#[test]
fn switch_counts_statement_not_arms() {
    let (mut tree, body) = function_with_body("f");
    let switch = tree.add(body, NodeKind::Switch);
    for _ in 0..5 {
        tree.add(switch, NodeKind::SwitchArm { has_test: true });
    }
    assert_eq!(score_of(&tree), 2);
}

#[test]
fn switch_default_arm_adds_one_more() {
    let (mut tree, body) = function_with_body("f");
    let switch = tree.add(body, NodeKind::Switch);
    tree.add(switch, NodeKind::SwitchArm { has_test: true });
    tree.add(switch, NodeKind::SwitchArm { has_test: false });
    assert_eq!(score_of(&tree), 3);
}

#[test]
fn logical_chain_counts_runs_not_operators() {
    // a && b && c: one run
    let (mut tree, body) = function_with_body("f");
    let root = tree.add(body, NodeKind::Logical { op: LogicalOp::And });
    tree.add(root, NodeKind::Logical { op: LogicalOp::And });
    assert_eq!(score_of(&tree), 2);
}

#[test]
fn mixed_chain_counts_operator_switches() {
    // a && b && c || d || e: two runs
    let (mut tree, body) = function_with_body("f");
    let root = tree.add(body, NodeKind::Logical { op: LogicalOp::Or });
    let left = tree.add(root, NodeKind::Logical { op: LogicalOp::Or });
    let and = tree.add(left, NodeKind::Logical { op: LogicalOp::And });
    tree.add(and, NodeKind::Logical { op: LogicalOp::And });
    assert_eq!(score_of(&tree), 3);

    // a && b || c && d: three runs
    let (mut tree, body) = function_with_body("f");
    let root = tree.add(body, NodeKind::Logical { op: LogicalOp::Or });
    tree.add(root, NodeKind::Logical { op: LogicalOp::And });
    tree.add(root, NodeKind::Logical { op: LogicalOp::And });
    assert_eq!(score_of(&tree), 4);
}

#[test]
fn separate_chains_count_separately() {
    // Two disjoint chains inside one body each start their own runs.
    let (mut tree, body) = function_with_body("f");
    tree.add(body, NodeKind::Logical { op: LogicalOp::And });
    tree.add(body, NodeKind::Logical { op: LogicalOp::Or });
    assert_eq!(score_of(&tree), 3);
}

#[test]
fn short_circuit_assignments_and_coalescing_add_one_each() {
    let (mut tree, body) = function_with_body("f");
    for op in [AssignOp::LogicalAnd, AssignOp::LogicalOr, AssignOp::Coalesce] {
        tree.add(body, NodeKind::Assignment { op, target: None });
    }
    tree.add(body, NodeKind::Coalesce);
    assert_eq!(score_of(&tree), 5);
}

#[test]
fn plain_assignment_is_not_a_decision_point() {
    let (mut tree, body) = function_with_body("f");
    tree.add(
        body,
        NodeKind::Assignment {
            op: AssignOp::Plain,
            target: None,
        },
    );
    assert_eq!(score_of(&tree), 1);
}

#[test]
fn self_recursion_adds_one_per_call_site() {
    let (mut tree, body) = function_with_body("walk");
    tree.add(
        body,
        NodeKind::Call {
            callee: Callee::Identifier { name: "walk".into() },
        },
    );
    assert_eq!(score_of(&tree), 2);

    let (mut tree, body) = function_with_body("walk");
    for _ in 0..2 {
        tree.add(
            body,
            NodeKind::Call {
                callee: Callee::Identifier { name: "walk".into() },
            },
        );
    }
    assert_eq!(score_of(&tree), 3);
}

#[test]
fn unrelated_same_shaped_call_does_not_count() {
    let (mut tree, body) = function_with_body("walk");
    tree.add(
        body,
        NodeKind::Call {
            callee: Callee::Identifier { name: "walkAll".into() },
        },
    );
    tree.add(
        body,
        NodeKind::Call {
            callee: Callee::Other,
        },
    );
    assert_eq!(score_of(&tree), 1);
}

#[test]
fn member_call_matches_binding_by_property_name() {
    let (mut tree, body) = function_with_body("walk");
    tree.add(
        body,
        NodeKind::Call {
            callee: Callee::Member {
                property: "walk".into(),
            },
        },
    );
    assert_eq!(score_of(&tree), 2);
}

#[test]
fn recursion_binding_comes_from_variable_declarator() {
    let mut tree = SyntaxTree::new(NodeKind::Program);
    let decl = tree.add(0, NodeKind::VarDeclarator { name: "fib".into() });
    let func = tree.add(
        decl,
        NodeKind::Function {
            name: None,
            form: FunctionForm::Expression,
        },
    );
    let body = tree.add(func, NodeKind::Block { statements: 1 });
    tree.add(
        body,
        NodeKind::Call {
            callee: Callee::Identifier { name: "fib".into() },
        },
    );
    assert_eq!(score_of(&tree), 2);
}

#[test]
fn nested_function_does_not_inherit_outer_binding() {
    // function outer() { function inner() { outer(); } }
    let (mut tree, outer_body) = function_with_body("outer");
    let inner = tree.add(
        outer_body,
        NodeKind::Function {
            name: Some("inner".into()),
            form: FunctionForm::Declaration,
        },
    );
    let inner_body = tree.add(inner, NodeKind::Block { statements: 1 });
    tree.add(
        inner_body,
        NodeKind::Call {
            callee: Callee::Identifier { name: "outer".into() },
        },
    );

    let violations = analyze_complexity(&tree, &ComplexityOption::Threshold(0));
    assert_eq!(violations.len(), 2);
    for v in &violations {
        assert_eq!(v.value, 1, "{} should not count the outer call", v.name);
    }
}

#[test]
fn decision_points_attribute_to_innermost_unit() {
    // Outer has one if; inner has two loops. Off-by-one scope tracking
    // would leak the inner points into the outer score.
    let (mut tree, outer_body) = function_with_body("outer");
    tree.add(
        outer_body,
        NodeKind::If {
            has_else: false,
            else_is_if: false,
        },
    );
    let inner = tree.add(
        outer_body,
        NodeKind::Function {
            name: Some("inner".into()),
            form: FunctionForm::Declaration,
        },
    );
    let inner_body = tree.add(inner, NodeKind::Block { statements: 1 });
    tree.add(inner_body, NodeKind::While);
    tree.add(inner_body, NodeKind::For);

    let violations = analyze_complexity(&tree, &ComplexityOption::Threshold(0));
    let by_name = |name: &str| {
        violations
            .iter()
            .find(|v| v.name.contains(name))
            .unwrap_or_else(|| panic!("no violation for {name}"))
            .value
    };
    assert_eq!(by_name("outer"), 2);
    assert_eq!(by_name("inner"), 3);
}

#[test]
fn program_level_branches_are_never_reported() {
    let mut tree = SyntaxTree::new(NodeKind::Program);
    tree.add(
        0,
        NodeKind::If {
            has_else: true,
            else_is_if: false,
        },
    );
    assert!(analyze_complexity(&tree, &ComplexityOption::Threshold(0)).is_empty());
}

#[test]
fn static_blocks_and_field_initializers_are_reportable() {
    let mut tree = SyntaxTree::new(NodeKind::Program);
    let block = tree.add(0, NodeKind::StaticBlock { statements: 1 });
    tree.add(block, NodeKind::While);
    let field = tree.add(0, NodeKind::FieldInit { name: Some("cache".into()) });
    tree.add(field, NodeKind::Conditional);

    let violations = analyze_complexity(&tree, &ComplexityOption::Threshold(1));
    let names: Vec<&str> = violations.iter().map(|v| v.name.as_str()).collect();
    assert_eq!(
        names,
        ["Class static block", "Class field initializer 'cache'"]
    );
    assert!(violations.iter().all(|v| v.value == 2));
}

#[test]
fn threshold_boundary_is_strictly_greater() {
    let (mut tree, body) = function_with_body("f");
    tree.add(
        body,
        NodeKind::If {
            has_else: false,
            else_is_if: false,
        },
    );
    // score 2
    assert!(analyze_complexity(&tree, &ComplexityOption::Threshold(2)).is_empty());
    assert_eq!(
        analyze_complexity(&tree, &ComplexityOption::Threshold(1)).len(),
        1
    );
}

#[test]
fn zero_threshold_reports_unconditionally() {
    let (tree, _) = function_with_body("f");
    let violations = analyze_complexity(&tree, &ComplexityOption::Threshold(0));
    assert_eq!(violations.len(), 1);
    assert_eq!(violations[0].value, 1);
    assert_eq!(violations[0].max, 0);
}

#[test]
fn record_option_shape_behaves_like_bare_integer() {
    let (mut tree, body) = function_with_body("f");
    tree.add(body, NodeKind::While);
    let option: ComplexityOption = serde_json::from_str(r#"{"max": 1}"#).unwrap();
    let violations = analyze_complexity(&tree, &option);
    assert_eq!(violations.len(), 1);
    assert_eq!(
        violations[0].message,
        "Function 'f' has a complexity of 2. Maximum allowed is 1."
    );
}

#[test]
fn repeated_analysis_is_idempotent() {
    let (mut tree, body) = function_with_body("f");
    tree.add(body, NodeKind::While);
    tree.add(body, NodeKind::Logical { op: LogicalOp::And });
    let first = analyze_complexity(&tree, &ComplexityOption::Threshold(0));
    let second = analyze_complexity(&tree, &ComplexityOption::Threshold(0));
    assert_eq!(first, second);
}
