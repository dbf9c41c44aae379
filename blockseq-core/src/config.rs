//! Capacity growth configuration.
//!
//! A [`GrowthPolicy`] decides how much spare room a sequence reserves when it
//! allocates. The first allocation reserves `initial_block` slots beyond the
//! requested amount; every later reallocation reserves `growth_block` slots
//! beyond what is strictly needed. Growth is a fixed increment, never a
//! multiple of the current size.
//!
//! Policies can be loaded from JSON or (with the `yaml` feature) YAML:
//!
//! ```yaml
//! growth:
//!   initial_block: 16
//!   growth_block: 256
//! ```
//!
//! Missing keys fall back to [`DEFAULT_INITIAL_BLOCK`] and
//! [`DEFAULT_GROWTH_BLOCK`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Spare slots reserved on the first allocation.
pub const DEFAULT_INITIAL_BLOCK: usize = 10;

/// Spare slots reserved on every reallocation.
pub const DEFAULT_GROWTH_BLOCK: usize = 100;

/// Validated growth parameters. Both blocks are at least 1.
///
/// # Example
///
/// ```
/// use blockseq_core::config::GrowthPolicy;
///
/// let policy = GrowthPolicy::new(4, 32)?;
/// assert_eq!(policy.initial_block(), 4);
/// assert_eq!(policy.growth_block(), 32);
/// assert!(GrowthPolicy::new(0, 32).is_err());
/// # Ok::<(), blockseq_core::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GrowthSettings", into = "GrowthSettings")]
pub struct GrowthPolicy {
    initial_block: usize,
    growth_block: usize,
}

impl GrowthPolicy {
    /// Policy with distinct initial and incremental blocks.
    pub fn new(initial_block: usize, growth_block: usize) -> Result<Self> {
        if initial_block < 1 {
            return Err(Error::InvalidArgument {
                name: "initial_block",
                value: 0,
            });
        }
        if growth_block < 1 {
            return Err(Error::InvalidArgument {
                name: "growth_block",
                value: 0,
            });
        }
        Ok(Self {
            initial_block,
            growth_block,
        })
    }

    /// Policy using the same block for the first allocation and every later one.
    pub fn uniform(block: usize) -> Result<Self> {
        Self::new(block, block)
    }

    /// Spare slots reserved on the first allocation.
    pub fn initial_block(&self) -> usize {
        self.initial_block
    }

    /// Spare slots reserved on every reallocation.
    pub fn growth_block(&self) -> usize {
        self.growth_block
    }

    /// Capacity of the first allocation for `incoming` elements.
    pub fn first_capacity(&self, incoming: usize) -> usize {
        incoming.saturating_add(self.initial_block)
    }

    /// Capacity of a reallocation holding `live` elements plus `incoming` more.
    pub fn next_capacity(&self, live: usize, incoming: usize) -> usize {
        live.saturating_add(incoming).saturating_add(self.growth_block)
    }

    /// Parse a policy from a JSON object with optional `initial_block` and
    /// `growth_block` keys.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let settings: GrowthSettings = serde_json::from_str(content)?;
        let policy = Self::try_from(settings)?;
        debug!(?policy, "loaded growth policy from JSON");
        Ok(policy)
    }
}

impl Default for GrowthPolicy {
    fn default() -> Self {
        Self {
            initial_block: DEFAULT_INITIAL_BLOCK,
            growth_block: DEFAULT_GROWTH_BLOCK,
        }
    }
}

/// Unvalidated growth parameters, as they appear in configuration files.
///
/// Values are signed so that negative input is reported as
/// [`Error::InvalidArgument`] rather than a decoding failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowthSettings {
    /// Spare slots reserved on the first allocation.
    pub initial_block: i64,
    /// Spare slots reserved on every reallocation.
    pub growth_block: i64,
}

impl Default for GrowthSettings {
    fn default() -> Self {
        GrowthPolicy::default().into()
    }
}

impl TryFrom<GrowthSettings> for GrowthPolicy {
    type Error = Error;

    fn try_from(settings: GrowthSettings) -> Result<Self> {
        let initial_block = block_size("initial_block", settings.initial_block)?;
        let growth_block = block_size("growth_block", settings.growth_block)?;
        Ok(Self {
            initial_block,
            growth_block,
        })
    }
}

impl From<GrowthPolicy> for GrowthSettings {
    fn from(policy: GrowthPolicy) -> Self {
        Self {
            initial_block: i64::try_from(policy.initial_block).unwrap_or(i64::MAX),
            growth_block: i64::try_from(policy.growth_block).unwrap_or(i64::MAX),
        }
    }
}

fn block_size(name: &'static str, value: i64) -> Result<usize> {
    if value < 1 {
        return Err(Error::InvalidArgument { name, value });
    }
    usize::try_from(value)
        .map_err(|_| Error::InvalidConfig(format!("'{name}' = {value} does not fit in memory")))
}

// ============================================================================
// YAML loading
// ============================================================================

#[cfg(feature = "yaml")]
mod yaml {
    use std::fs;
    use std::path::Path;

    use tracing::debug;
    use yaml_rust2::{Yaml, YamlLoader};

    use super::{GrowthPolicy, GrowthSettings};
    use crate::error::{Error, Result};

    impl GrowthPolicy {
        /// Parse a policy from YAML.
        ///
        /// The keys are read from a `growth` mapping if present, otherwise from
        /// the document root. An empty document yields the default policy.
        pub fn from_yaml_str(content: &str) -> Result<Self> {
            let docs = YamlLoader::load_from_str(content)
                .map_err(|e| Error::InvalidConfig(e.to_string()))?;

            let settings = match docs.first() {
                None | Some(Yaml::Null) => GrowthSettings::default(),
                Some(doc) => parse_settings(doc)?,
            };
            let policy = Self::try_from(settings)?;
            debug!(?policy, "loaded growth policy from YAML");
            Ok(policy)
        }

        /// Read and parse a YAML policy file.
        ///
        /// # Errors
        ///
        /// Returns an error if:
        /// - The file doesn't exist or cannot be read
        /// - The file cannot be parsed as YAML
        /// - A block size is not an integer or is below 1
        pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
            let path_ref = path.as_ref();
            let content = fs::read_to_string(path_ref)
                .map_err(|_| Error::ConfigNotFound(path_ref.to_path_buf()))?;
            Self::from_yaml_str(&content)
        }
    }

    fn parse_settings(doc: &Yaml) -> Result<GrowthSettings> {
        let root = doc.as_hash().ok_or_else(|| {
            Error::InvalidConfig("Root element must be a mapping/hash".to_string())
        })?;

        let section = match root.get(&Yaml::String("growth".to_string())) {
            Some(value) => value.as_hash().ok_or_else(|| {
                Error::InvalidConfig("'growth' must be a mapping/hash".to_string())
            })?,
            None => root,
        };

        let mut settings = GrowthSettings::default();
        if let Some(value) = section.get(&Yaml::String("initial_block".to_string())) {
            settings.initial_block = integer("initial_block", value)?;
        }
        if let Some(value) = section.get(&Yaml::String("growth_block".to_string())) {
            settings.growth_block = integer("growth_block", value)?;
        }
        Ok(settings)
    }

    fn integer(name: &str, value: &Yaml) -> Result<i64> {
        value
            .as_i64()
            .ok_or_else(|| Error::InvalidConfig(format!("'{name}' must be an integer")))
    }
}
