//! Graph configuration
//!
//! Defaults cover the common case; YAML (schema v1) overrides individual
//! sections:
//!
//! ```yaml
//! version: 1
//! merge:
//!   alias_match: skip_ambiguous
//!   import_each_source_edge_once: false
//! analytics:
//!   articulation_min_component: 3
//! ```
//!
//! ```rust,ignore
//! use protgraph_core::{GraphConfig, AliasMatchPolicy, ProteinGraph};
//!
//! let config = GraphConfig::default().alias_match(AliasMatchPolicy::SkipAmbiguous);
//! let graph: ProteinGraph = ProteinGraph::with_config(config);
//!
//! let config = GraphConfig::from_yaml("merge.yaml")?;
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{GraphError, Result};

/// Schema versions accepted by `from_yaml`
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// How `union` treats a source neighbor whose aliases hit several destination nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AliasMatchPolicy {
    /// Take the node of the first alias that resolves, ignore the rest
    #[default]
    FirstMatch,
    /// Do not import the neighbor; count it in `MergeReport::ambiguous_skipped`
    SkipAmbiguous,
}

impl AliasMatchPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstMatch => "first_match",
            Self::SkipAmbiguous => "skip_ambiguous",
        }
    }
}

impl std::fmt::Display for AliasMatchPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    pub alias_match: AliasMatchPolicy,

    /// Submit a source interaction once even when both endpoints are shared.
    /// Off by default: each shared endpoint submits it, and the second
    /// submission is classified like any other repeated evidence.
    pub import_each_source_edge_once: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            alias_match: AliasMatchPolicy::FirstMatch,
            import_each_source_edge_once: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalyticsConfig {
    /// Components smaller than this are skipped by `articulation_points`
    pub articulation_min_component: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            articulation_min_component: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GraphConfig {
    pub merge: MergeConfig,
    pub analytics: AnalyticsConfig,
}

/// YAML schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFileV1 {
    #[serde(default)]
    version: Option<u32>,
    #[serde(default)]
    merge: MergeConfig,
    #[serde(default)]
    analytics: AnalyticsConfig,
}

impl GraphConfig {
    pub fn alias_match(mut self, policy: AliasMatchPolicy) -> Self {
        self.merge.alias_match = policy;
        self
    }

    pub fn import_each_source_edge_once(mut self, enabled: bool) -> Self {
        self.merge.import_each_source_edge_once = enabled;
        self
    }

    pub fn articulation_min_component(mut self, size: usize) -> Self {
        self.analytics.articulation_min_component = size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.analytics.articulation_min_component == 0 {
            return Err(GraphError::config(
                "analytics.articulation_min_component must be at least 1",
            ));
        }
        Ok(())
    }

    /// Load and validate a YAML configuration file
    pub fn from_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|err| {
            GraphError::config(format!("cannot read {}: {}", path.display(), err)).with_source(err)
        })?;
        Self::from_yaml_str(&text)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(text)?;

        match file.version {
            None => {
                return Err(GraphError::config(
                    "missing 'version' field; add 'version: 1' to the top of the file",
                ))
            }
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                return Err(GraphError::config(format!(
                    "unsupported configuration version {}; supported: {:?}",
                    found, SUPPORTED_VERSIONS
                )))
            }
            Some(_) => {}
        }

        let config = Self {
            merge: file.merge,
            analytics: file.analytics,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String> {
        let file = ConfigFileV1 {
            version: SUPPORTED_VERSIONS.last().copied(),
            merge: self.merge.clone(),
            analytics: self.analytics.clone(),
        };
        Ok(serde_yaml::to_string(&file)?)
    }
}
