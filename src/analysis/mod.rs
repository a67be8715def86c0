/// Metric analyzers and the scope-tracking discipline they share
pub mod ast;
pub mod complexity;
pub mod scope;
pub mod statements;

// Re-export commonly used types
pub use complexity::ComplexityAnalyzer;
pub use scope::ScopeStack;
pub use statements::StatementAnalyzer;
