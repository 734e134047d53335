// Front-end safety limits module
//
// Provides configurable resource limits to prevent:
// - Stack overflow from deeply nested parse trees
// - Memory exhaustion from very large tree files
// - Denial of service from pathological input
//
// All limits have sensible defaults and can be overridden via codechat.toml

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Front-end safety limits with permissive defaults
#[derive(Debug, Clone)]
pub struct FrontendLimits {
    pub max_input_size: usize, // Maximum tree file size in bytes
    pub max_tree_depth: usize, // Maximum nesting depth of the parse tree
    pub max_tree_nodes: usize, // Maximum nodes and tokens per tree
}

// Default limits (permissive for developer productivity)
impl Default for FrontendLimits {
    fn default() -> Self {
        Self {
            max_input_size: 10_000_000, // 10 MB
            max_tree_depth: 256,
            max_tree_nodes: 1_000_000, // 1M nodes
        }
    }
}

impl FrontendLimits {
    /// Create with default limits
    pub fn new() -> Self {
        Self::default()
    }

    /// Load limits from codechat.toml, falling back to defaults
    ///
    /// Returns error only if TOML is malformed, not if file is missing
    pub fn from_config_toml<P: AsRef<Path>>(path: P) -> Result<Self, LimitError> {
        let path = path.as_ref();

        // If file doesn't exist, use defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        // Read file
        let content = fs::read_to_string(path).map_err(|e| LimitError {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        // Parse TOML
        let config: ProjectConfig = toml::from_str(&content).map_err(|e| LimitError {
            message: format!("Failed to parse {}: {}", path.display(), e),
        })?;

        // Merge with defaults (only override specified values)
        let mut limits = Self::default();

        if let Some(limits_config) = config.limits {
            if let Some(v) = limits_config.max_input_size {
                limits.max_input_size = v;
            }
            if let Some(v) = limits_config.max_tree_depth {
                limits.max_tree_depth = v;
            }
            if let Some(v) = limits_config.max_tree_nodes {
                limits.max_tree_nodes = v;
            }
        }

        Ok(limits)
    }

    /// Validate that all limits are reasonable (positive, not absurdly large)
    pub fn validate(&self) -> Result<(), LimitError> {
        const MAX_REASONABLE: usize = 100_000_000; // 100 MB

        if self.max_input_size == 0 || self.max_input_size > MAX_REASONABLE {
            return Err(LimitError::invalid("max_input_size", self.max_input_size));
        }

        if self.max_tree_depth == 0 || self.max_tree_depth > 10_000 {
            return Err(LimitError::invalid("max_tree_depth", self.max_tree_depth));
        }

        if self.max_tree_nodes == 0 || self.max_tree_nodes > 10_000_000 {
            return Err(LimitError::invalid("max_tree_nodes", self.max_tree_nodes));
        }

        Ok(())
    }
}

/// TOML configuration structures for deserialization
#[derive(Debug, Deserialize)]
struct ProjectConfig {
    limits: Option<LimitsConfig>,
}

#[derive(Debug, Deserialize)]
struct LimitsConfig {
    max_input_size: Option<usize>,
    max_tree_depth: Option<usize>,
    max_tree_nodes: Option<usize>,
}

/// Error type for limit validation and loading
#[derive(Debug, Clone)]
pub struct LimitError {
    pub message: String,
}

impl LimitError {
    fn invalid(name: &str, value: usize) -> Self {
        Self {
            message: format!(
                "Invalid limit '{}': {} (must be positive and reasonable)",
                name, value
            ),
        }
    }
}

impl std::fmt::Display for LimitError {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "Limit error: {}", self.message)
    }
}

impl std::error::Error for LimitError {}
