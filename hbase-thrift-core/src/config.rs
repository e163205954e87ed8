//! Protocol limits and their builders.
//!
//! Limits bound how much a single decode call may allocate or recurse. They are
//! only read from the environment or a file when the caller explicitly asks via
//! [`ProtocolConfig::from_env`] or [`ProtocolConfig::from_toml`].
//!
//! # Example TOML
//!
//! ```toml
//! max-string-size = 1048576
//! max-container-size = 65536
//! recursion-limit = 32
//! ```

use crate::error::{Result, ThriftError};

/// Default maximum size of a single string or binary value (100 MiB).
pub const DEFAULT_MAX_STRING_SIZE: usize = 100 * 1024 * 1024;
/// Default maximum element count of a single list, set or map.
pub const DEFAULT_MAX_CONTAINER_SIZE: usize = 16 * 1024 * 1024;
/// Default maximum nesting of structs and skipped containers.
pub const DEFAULT_RECURSION_LIMIT: usize = 64;

const ENV_MAX_STRING_SIZE: &str = "HBASE_THRIFT_MAX_STRING_SIZE";
const ENV_MAX_CONTAINER_SIZE: &str = "HBASE_THRIFT_MAX_CONTAINER_SIZE";
const ENV_RECURSION_LIMIT: &str = "HBASE_THRIFT_RECURSION_LIMIT";

/// Limits enforced by the binary protocol while decoding and encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolConfig {
    max_string_size: usize,
    max_container_size: usize,
    recursion_limit: usize,
}

impl ProtocolConfig {
    /// Creates a new builder starting from the defaults.
    pub fn builder() -> ProtocolConfigBuilder {
        ProtocolConfigBuilder::new()
    }

    /// Returns the maximum accepted string/binary length in bytes.
    pub fn max_string_size(&self) -> usize {
        self.max_string_size
    }

    /// Returns the maximum accepted container element count.
    pub fn max_container_size(&self) -> usize {
        self.max_container_size
    }

    /// Returns the maximum struct/container nesting depth.
    pub fn recursion_limit(&self) -> usize {
        self.recursion_limit
    }

    /// Loads limits from environment variables, falling back to defaults.
    ///
    /// | Variable | Maps to |
    /// |----------|---------|
    /// | `HBASE_THRIFT_MAX_STRING_SIZE` | `max_string_size` |
    /// | `HBASE_THRIFT_MAX_CONTAINER_SIZE` | `max_container_size` |
    /// | `HBASE_THRIFT_RECURSION_LIMIT` | `recursion_limit` |
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads limits through an arbitrary key lookup, using the same keys as
    /// [`ProtocolConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = ProtocolConfigBuilder::new();
        if let Some(value) = lookup(ENV_MAX_STRING_SIZE) {
            builder = builder.max_string_size(parse_limit(ENV_MAX_STRING_SIZE, &value)?);
        }
        if let Some(value) = lookup(ENV_MAX_CONTAINER_SIZE) {
            builder = builder.max_container_size(parse_limit(ENV_MAX_CONTAINER_SIZE, &value)?);
        }
        if let Some(value) = lookup(ENV_RECURSION_LIMIT) {
            builder = builder.recursion_limit(parse_limit(ENV_RECURSION_LIMIT, &value)?);
        }
        builder.build()
    }

    /// Loads limits from a TOML file.
    ///
    /// Requires the `config-file` feature.
    #[cfg(feature = "config-file")]
    pub fn from_toml<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ThriftError::Configuration(format!("failed to read TOML config file: {e}"))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses limits from TOML text.
    ///
    /// Requires the `config-file` feature.
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file_config: FileConfig = toml::from_str(content).map_err(|e| {
            ThriftError::Configuration(format!("failed to parse TOML config: {e}"))
        })?;
        file_config.try_into()
    }
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_string_size: DEFAULT_MAX_STRING_SIZE,
            max_container_size: DEFAULT_MAX_CONTAINER_SIZE,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }
}

fn parse_limit(key: &str, value: &str) -> Result<usize> {
    value.trim().parse::<usize>().map_err(|e| {
        ThriftError::Configuration(format!("invalid value {value:?} for {key}: {e}"))
    })
}

/// Builder for [`ProtocolConfig`].
#[derive(Debug, Clone, Default)]
pub struct ProtocolConfigBuilder {
    max_string_size: Option<usize>,
    max_container_size: Option<usize>,
    recursion_limit: Option<usize>,
}

impl ProtocolConfigBuilder {
    /// Creates a new builder with no overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum string/binary length in bytes.
    pub fn max_string_size(mut self, size: usize) -> Self {
        self.max_string_size = Some(size);
        self
    }

    /// Sets the maximum container element count.
    pub fn max_container_size(mut self, size: usize) -> Self {
        self.max_container_size = Some(size);
        self
    }

    /// Sets the maximum nesting depth.
    pub fn recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Validates the settings and builds the configuration.
    pub fn build(self) -> Result<ProtocolConfig> {
        let defaults = ProtocolConfig::default();
        let config = ProtocolConfig {
            max_string_size: self.max_string_size.unwrap_or(defaults.max_string_size),
            max_container_size: self
                .max_container_size
                .unwrap_or(defaults.max_container_size),
            recursion_limit: self.recursion_limit.unwrap_or(defaults.recursion_limit),
        };

        if config.recursion_limit == 0 {
            return Err(ThriftError::Configuration(
                "recursion limit must be at least 1".to_string(),
            ));
        }
        // Lengths travel as i32 on the wire.
        let wire_max = i32::MAX as usize;
        if config.max_string_size > wire_max {
            return Err(ThriftError::Configuration(format!(
                "max string size {} exceeds the wire maximum {wire_max}",
                config.max_string_size
            )));
        }
        if config.max_container_size > wire_max {
            return Err(ThriftError::Configuration(format!(
                "max container size {} exceeds the wire maximum {wire_max}",
                config.max_container_size
            )));
        }
        Ok(config)
    }
}

/// File-based mirror of [`ProtocolConfig`].
///
/// Every field is optional; missing fields keep their defaults.
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct FileConfig {
    /// Maximum string/binary length in bytes.
    pub max_string_size: Option<usize>,
    /// Maximum container element count.
    pub max_container_size: Option<usize>,
    /// Maximum nesting depth.
    pub recursion_limit: Option<usize>,
}

#[cfg(feature = "serde")]
impl TryFrom<FileConfig> for ProtocolConfig {
    type Error = ThriftError;

    fn try_from(file: FileConfig) -> Result<Self> {
        let mut builder = ProtocolConfigBuilder::new();
        if let Some(size) = file.max_string_size {
            builder = builder.max_string_size(size);
        }
        if let Some(size) = file.max_container_size {
            builder = builder.max_container_size(size);
        }
        if let Some(limit) = file.recursion_limit {
            builder = builder.recursion_limit(limit);
        }
        builder.build()
    }
}

#[cfg(feature = "serde")]
impl From<ProtocolConfig> for FileConfig {
    fn from(config: ProtocolConfig) -> Self {
        Self {
            max_string_size: Some(config.max_string_size),
            max_container_size: Some(config.max_container_size),
            recursion_limit: Some(config.recursion_limit),
        }
    }
}
