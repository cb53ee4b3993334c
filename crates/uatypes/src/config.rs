// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type system configuration.
//!
//! - **Level 1 (Static)**: compile-time limits (array footprint, descriptor widths)
//! - **Level 2 (Dynamic)**: [`TypesConfig`] swapped atomically at runtime
//!
//! # Example
//!
//! ```
//! use uatypes::config::{self, TypesConfig};
//!
//! let cfg = TypesConfig::default().with_format_capacity(64);
//! config::set_runtime(cfg).unwrap();
//! assert_eq!(config::runtime().format_capacity, 64);
//! # config::set_runtime(TypesConfig::default()).unwrap();
//! ```

use crate::error::{Error, Result};
use arc_swap::ArcSwap;
use std::sync::{Arc, OnceLock};

// =======================================================================
// Static limits
// =======================================================================

/// Upper bound on the byte footprint of a single array (100 MiB).
///
/// Checked before allocating so pathological counts are rejected early.
pub const MAX_ARRAY_SIZE: usize = 104_857_600;

/// Default capacity of the bounded string formatter, terminator included.
pub const DEFAULT_FORMAT_CAPACITY: usize = 256;

/// Maximum number of members a structured type may declare.
pub const MAX_TYPE_MEMBERS: usize = 13;

/// Width of the type index field of a [`TypeDescriptor`](crate::TypeDescriptor).
pub const TYPE_INDEX_BITS: u32 = 13;

/// Width of the type index field of a [`MemberDescriptor`](crate::MemberDescriptor).
pub const MEMBER_TYPE_INDEX_BITS: u32 = 9;

// =======================================================================
// Runtime configuration
// =======================================================================

/// Tunables consulted by the array engine and the bounded formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default, deny_unknown_fields))]
pub struct TypesConfig {
    /// Byte footprint above which array allocation is refused.
    pub max_array_bytes: usize,
    /// Buffer size for `copy_printf`-style formatting, terminator included.
    pub format_capacity: usize,
}

impl Default for TypesConfig {
    fn default() -> Self {
        Self {
            max_array_bytes: MAX_ARRAY_SIZE,
            format_capacity: DEFAULT_FORMAT_CAPACITY,
        }
    }
}

impl TypesConfig {
    #[must_use]
    pub fn with_max_array_bytes(mut self, bytes: usize) -> Self {
        self.max_array_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_format_capacity(mut self, capacity: usize) -> Self {
        self.format_capacity = capacity;
        self
    }

    /// Check the limits are usable.
    ///
    /// The array bound may only be lowered below [`MAX_ARRAY_SIZE`]. The
    /// formatter needs room for at least one byte plus terminator.
    pub fn validate(&self) -> Result<()> {
        if self.max_array_bytes == 0 || self.max_array_bytes > MAX_ARRAY_SIZE {
            return Err(Error::InvalidArgument(format!(
                "max_array_bytes {} outside 1..={}",
                self.max_array_bytes, MAX_ARRAY_SIZE
            )));
        }
        if self.format_capacity < 2 {
            return Err(Error::InvalidArgument(format!(
                "format_capacity {} must be at least 2",
                self.format_capacity
            )));
        }
        Ok(())
    }

    /// Parse a YAML document.
    ///
    /// ```yaml
    /// max_array_bytes: 1048576
    /// format_capacity: 128
    /// ```
    ///
    /// Missing keys keep their defaults.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let cfg: Self = serde_yaml::from_str(yaml)
            .map_err(|e| Error::InvalidArgument(format!("types config: {}", e)))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load and parse a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::InvalidArgument(format!("{}: {}", path.display(), e)))?;
        Self::from_yaml_str(&text)
    }
}

fn slot() -> &'static ArcSwap<TypesConfig> {
    static RUNTIME: OnceLock<ArcSwap<TypesConfig>> = OnceLock::new();
    RUNTIME.get_or_init(|| ArcSwap::from_pointee(TypesConfig::default()))
}

/// Current process-wide configuration (atomic load, no lock).
#[must_use]
pub fn runtime() -> Arc<TypesConfig> {
    slot().load_full()
}

/// Replace the process-wide configuration after validating it.
pub fn set_runtime(cfg: TypesConfig) -> Result<()> {
    cfg.validate()?;
    log::debug!(
        "[config] max_array_bytes={} format_capacity={}",
        cfg.max_array_bytes,
        cfg.format_capacity
    );
    slot().store(Arc::new(cfg));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_limits() {
        let cfg = TypesConfig::default();
        assert_eq!(cfg.max_array_bytes, 100 * 1024 * 1024);
        assert_eq!(cfg.format_capacity, 256);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_raised_bound() {
        let cfg = TypesConfig::default().with_max_array_bytes(MAX_ARRAY_SIZE + 1);
        assert!(matches!(cfg.validate(), Err(Error::InvalidArgument(_))));

        let cfg = TypesConfig::default().with_format_capacity(1);
        assert!(cfg.validate().is_err());
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_yaml_partial_document() {
        let cfg = TypesConfig::from_yaml_str("format_capacity: 32\n").expect("parse");
        assert_eq!(cfg.format_capacity, 32);
        assert_eq!(cfg.max_array_bytes, MAX_ARRAY_SIZE);
    }

    #[cfg(feature = "config-loaders")]
    #[test]
    fn test_yaml_rejects_unknown_and_invalid() {
        assert!(TypesConfig::from_yaml_str("bogus: 1\n").is_err());
        assert!(TypesConfig::from_yaml_str("max_array_bytes: 0\n").is_err());
    }
}
