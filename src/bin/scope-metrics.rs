use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use scope_metrics::config::MetricConfig;
use scope_metrics::{analyze, ComplexityOption, NodeInput, StatementOption, SyntaxTree};

/// Check a JSON-encoded syntax tree against the complexity and
/// statement-count limits, printing violations as JSON.
#[derive(Debug, Parser)]
#[command(name = "scope-metrics", version)]
struct Cli {
    /// Path to the JSON tree; reads stdin when omitted
    tree: Option<PathBuf>,

    /// Path to a JSON metric configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Complexity threshold override
    #[arg(long)]
    complexity: Option<u32>,

    /// Statement-count threshold override
    #[arg(long)]
    max_statements: Option<u32>,

    /// Exempt a lone top-level wrapper function from the statement limit
    #[arg(long)]
    ignore_top_level_functions: bool,

    /// Pretty-print the output
    #[arg(long)]
    pretty: bool,
}

fn read_tree(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read tree from {}", path.display())),
        None => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read tree from stdin")?;
            Ok(text)
        }
    }
}

fn load_config(cli: &Cli) -> Result<MetricConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("failed to read config from {}", path.display()))?;
            MetricConfig::from_json(&text)?
        }
        None => MetricConfig::default(),
    };
    if let Some(max) = cli.complexity {
        config.complexity = ComplexityOption::Threshold(max);
    }
    if let Some(max) = cli.max_statements {
        config.max_statements = StatementOption::Threshold(max);
    }
    if cli.ignore_top_level_functions {
        config.statement_flags.ignore_top_level_functions = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let text = read_tree(cli.tree.as_ref())?;
    let input: NodeInput =
        serde_json::from_str(&text).context("failed to parse syntax tree JSON")?;
    let tree = SyntaxTree::from_input(&input);

    let violations = analyze(&tree, &config);
    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&violations)?
    } else {
        serde_json::to_string(&violations)?
    };
    println!("{rendered}");

    if !violations.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
