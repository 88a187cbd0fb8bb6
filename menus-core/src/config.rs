//! Configuration types

use crate::{ConfigError, MenusResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings store keys of the runtime depth values.
pub mod keys {
    pub const DEPTH_MAIN: &str = "menus.mainTreeMenu.depth.main";
    pub const DEPTH_TREE: &str = "menus.mainTreeMenu.depth.tree";
    pub const DEPTH_MAIN_ALL_PAGES: &str = "menus.mainTreeMenu.depth.main.allpages";
    pub const DEPTH_TREE_ALL_PAGES: &str = "menus.mainTreeMenu.depth.tree.allpages";
}

/// Fallback depth values, used when the settings store has none.
///
/// Kept as strings: they are written back verbatim by read-repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DepthDefaults {
    pub main: String,
    pub tree: String,
    pub main_all_pages: String,
    pub tree_all_pages: String,
}

impl Default for DepthDefaults {
    fn default() -> Self {
        Self {
            main: "1".to_string(),
            tree: "0".to_string(),
            main_all_pages: "0".to_string(),
            tree_all_pages: "3".to_string(),
        }
    }
}

/// Master configuration struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MenusConfig {
    /// When false both tree caches are bypassed
    pub cache_enabled: bool,
    pub depth: DepthDefaults,

    // Custom menu resolution
    pub resolver_start_depth: i32,
    pub resolver_max_depth: i32,

    // Links
    pub portal_url: String,
    pub admin_portal_url: String,
    pub base_url: String,
}

impl Default for MenusConfig {
    fn default() -> Self {
        Self {
            cache_enabled: true,
            depth: DepthDefaults::default(),
            resolver_start_depth: 1,
            resolver_max_depth: 2,
            portal_url: "jsp/site/Portal.jsp".to_string(),
            admin_portal_url: "jsp/admin/site/AdminSite.jsp".to_string(),
            base_url: "/".to_string(),
        }
    }
}

impl MenusConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(source: &str) -> MenusResult<Self> {
        let config: MenusConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            reason: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> MenusResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }

    /// Validate the configuration.
    ///
    /// Validates:
    /// - every depth fallback is a non-negative integer
    /// - resolver_start_depth >= 1 and resolver_max_depth >= resolver_start_depth
    /// - portal urls are not blank
    pub fn validate(&self) -> MenusResult<()> {
        let depths = [
            ("depth.main", &self.depth.main),
            ("depth.tree", &self.depth.tree),
            ("depth.main_all_pages", &self.depth.main_all_pages),
            ("depth.tree_all_pages", &self.depth.tree_all_pages),
        ];
        for (field, value) in depths {
            match value.trim().parse::<i32>() {
                Ok(v) if v >= 0 => {}
                _ => {
                    return Err(ConfigError::InvalidValue {
                        field: field.to_string(),
                        value: value.clone(),
                        reason: "depth must be a non-negative integer".to_string(),
                    }
                    .into())
                }
            }
        }

        if self.resolver_start_depth < 1 {
            return Err(ConfigError::InvalidValue {
                field: "resolver_start_depth".to_string(),
                value: self.resolver_start_depth.to_string(),
                reason: "resolver_start_depth must be at least 1".to_string(),
            }
            .into());
        }

        if self.resolver_max_depth < self.resolver_start_depth {
            return Err(ConfigError::InvalidValue {
                field: "resolver_max_depth".to_string(),
                value: self.resolver_max_depth.to_string(),
                reason: "resolver_max_depth must not be below resolver_start_depth".to_string(),
            }
            .into());
        }

        for (field, value) in [
            ("portal_url", &self.portal_url),
            ("admin_portal_url", &self.admin_portal_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::MissingRequired {
                    field: field.to_string(),
                }
                .into());
            }
        }

        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================
