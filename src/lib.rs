//! Per-scope code quality metrics over a host-driven syntax traversal.
//!
//! Two independent analyzers share one scope-tracking discipline: a
//! cyclomatic complexity counter and a statement counter, each keeping one
//! accumulator per currently-open function-like unit and emitting a
//! [`report::Violation`] when a unit's final metric exceeds its threshold.
//! The host parser and traversal are external collaborators; this crate
//! carries the event-relevant tree projection and a reference driver so the
//! analyzers are exercisable end to end.

/// Metric analyzers, scope stack, and the syntax facade they run over
pub mod analysis;

/// Threshold option shapes and combined configuration
pub mod config;

/// Violation records and unit naming
pub mod report;

// Re-export commonly used types for convenience
pub use analysis::ast::{drive, NodeInput, NodeKind, SyntaxTree};
pub use analysis::{ComplexityAnalyzer, StatementAnalyzer};
pub use config::{ComplexityOption, MetricConfig, StatementFlags, StatementOption};
pub use report::Violation;

/// Runs both analyzers over one tree with the given configuration.
///
/// Analyzer state is constructed fresh per call; repeated calls over the
/// same tree yield identical results.
pub fn analyze(tree: &SyntaxTree, config: &MetricConfig) -> Vec<Violation> {
    let mut complexity = ComplexityAnalyzer::new(&config.complexity);
    let mut statements =
        StatementAnalyzer::new(&config.max_statements, &config.statement_flags);
    drive(tree, &mut [&mut complexity, &mut statements]);

    let mut violations = complexity.into_violations();
    violations.extend(statements.into_violations());
    violations
}

/// Runs only the complexity counter.
pub fn analyze_complexity(tree: &SyntaxTree, option: &ComplexityOption) -> Vec<Violation> {
    let mut analyzer = ComplexityAnalyzer::new(option);
    drive(tree, &mut [&mut analyzer]);
    analyzer.into_violations()
}

/// Runs only the statement counter.
pub fn analyze_statements(
    tree: &SyntaxTree,
    option: &StatementOption,
    flags: &StatementFlags,
) -> Vec<Violation> {
    let mut analyzer = StatementAnalyzer::new(option, flags);
    drive(tree, &mut [&mut analyzer]);
    analyzer.into_violations()
}
