//! Threshold option shapes for both rules.
//!
//! Each rule accepts either a bare non-negative integer or a record with a
//! `maximum` key (`max` accepted as an alias), mirroring the host engine's
//! configuration surface. Structural validation happens at deserialization;
//! the counters never see a malformed option.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_COMPLEXITY_MAXIMUM: u32 = 20;
pub const DEFAULT_STATEMENT_MAXIMUM: u32 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("malformed metric configuration: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Reserved selector for a future alternate counting mode. Accepted by
/// validation, currently inert: both variants count identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityVariant {
    Classic,
    Modified,
}

/// Complexity threshold: `20` or `{"maximum": 20, "variant": "classic"}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ComplexityOption {
    Threshold(u32),
    Limits {
        #[serde(alias = "max")]
        maximum: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        variant: Option<ComplexityVariant>,
    },
}

impl Default for ComplexityOption {
    fn default() -> Self {
        ComplexityOption::Threshold(DEFAULT_COMPLEXITY_MAXIMUM)
    }
}

impl ComplexityOption {
    pub fn maximum(&self) -> u32 {
        match self {
            ComplexityOption::Threshold(max) => *max,
            ComplexityOption::Limits { maximum, .. } => *maximum,
        }
    }

    pub fn variant(&self) -> ComplexityVariant {
        match self {
            ComplexityOption::Limits {
                variant: Some(variant),
                ..
            } => *variant,
            _ => ComplexityVariant::Classic,
        }
    }
}

/// Statement-count threshold: `10` or `{"maximum": 10}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StatementOption {
    Threshold(u32),
    Limits {
        #[serde(alias = "max")]
        maximum: u32,
    },
}

impl Default for StatementOption {
    fn default() -> Self {
        StatementOption::Threshold(DEFAULT_STATEMENT_MAXIMUM)
    }
}

impl StatementOption {
    pub fn maximum(&self) -> u32 {
        match self {
            StatementOption::Threshold(max) => *max,
            StatementOption::Limits { maximum } => *maximum,
        }
    }
}

/// Second option object of the statement rule.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct StatementFlags {
    /// Exempt a lone top-level function (assumed to be a wrapper) from the
    /// statement limit.
    #[serde(default, rename = "ignoreTopLevelFunctions")]
    pub ignore_top_level_functions: bool,
}

/// Combined configuration for one analysis pass.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricConfig {
    pub complexity: ComplexityOption,
    #[serde(rename = "maxStatements")]
    pub max_statements: StatementOption,
    #[serde(flatten)]
    pub statement_flags: StatementFlags,
}

impl MetricConfig {
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }
}
