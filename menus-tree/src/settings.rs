//! Depth settings with read-repair.
//!
//! Depth values are strings in the settings datastore. Reading one also
//! repairs it: a malformed or out-of-range value is rewritten to a safe value
//! before the safe value is returned. Reads never fail; storage problems are
//! logged and the configured fallback is used.

use menus_core::{keys, DepthDefaults, MenusResult, NativeMenuKind};
use menus_storage::SettingsStore;
use std::sync::Arc;

/// Settings key of a flavor's depth.
pub fn settings_key(kind: NativeMenuKind) -> &'static str {
    match kind {
        NativeMenuKind::Main => keys::DEPTH_MAIN,
        NativeMenuKind::Tree => keys::DEPTH_TREE,
        NativeMenuKind::MainAllPages => keys::DEPTH_MAIN_ALL_PAGES,
        NativeMenuKind::TreeAllPages => keys::DEPTH_TREE_ALL_PAGES,
    }
}

/// Upper bound enforced when reading. The all-pages tree is unbounded.
pub fn read_bound(kind: NativeMenuKind) -> Option<i32> {
    match kind {
        NativeMenuKind::Main | NativeMenuKind::MainAllPages => Some(1),
        NativeMenuKind::Tree => Some(2),
        NativeMenuKind::TreeAllPages => None,
    }
}

/// Upper bound accepted from the admin console, `None` when not editable.
pub fn admin_bound(kind: NativeMenuKind) -> Option<i32> {
    match kind {
        NativeMenuKind::Main => Some(1),
        NativeMenuKind::Tree | NativeMenuKind::TreeAllPages => Some(2),
        NativeMenuKind::MainAllPages => None,
    }
}

/// Outcome of checking a raw stored value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepthReading {
    /// Value usable as is
    Valid(i32),
    /// Value must be replaced; the replacement is both used and persisted
    Repaired { value: i32, stored: String },
}

impl DepthReading {
    pub fn value(&self) -> i32 {
        match self {
            DepthReading::Valid(v) | DepthReading::Repaired { value: v, .. } => *v,
        }
    }
}

/// Classify a raw depth string against a bound and a fallback.
pub fn check_depth(raw: &str, bound: Option<i32>, fallback: i32) -> DepthReading {
    let repaired = |value: i32| DepthReading::Repaired {
        value,
        stored: value.to_string(),
    };
    match raw.trim().parse::<i32>() {
        Err(_) => repaired(fallback),
        Ok(v) if v < 0 => repaired(0),
        Ok(v) => match bound {
            Some(max) if v > max => repaired(max),
            _ => DepthReading::Valid(v),
        },
    }
}

/// Reads and writes the four depth settings.
#[derive(Clone)]
pub struct DepthSettings {
    store: Arc<dyn SettingsStore>,
    defaults: DepthDefaults,
}

impl DepthSettings {
    pub fn new(store: Arc<dyn SettingsStore>, defaults: DepthDefaults) -> Self {
        Self { store, defaults }
    }

    fn fallback_raw(&self, kind: NativeMenuKind) -> &str {
        match kind {
            NativeMenuKind::Main => &self.defaults.main,
            NativeMenuKind::Tree => &self.defaults.tree,
            NativeMenuKind::MainAllPages => &self.defaults.main_all_pages,
            NativeMenuKind::TreeAllPages => &self.defaults.tree_all_pages,
        }
    }

    /// Fallback depth of a flavor, already brought within its bound.
    pub fn fallback(&self, kind: NativeMenuKind) -> i32 {
        check_depth(self.fallback_raw(kind), read_bound(kind), 0).value()
    }

    /// Effective depth of a flavor, repairing the stored value if needed.
    pub fn depth(&self, kind: NativeMenuKind) -> i32 {
        let key = settings_key(kind);
        let fallback = self.fallback(kind);
        let raw = match self.store.setting_get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return fallback,
            Err(e) => {
                tracing::warn!(key, error = %e, "Depth setting unreadable, using fallback");
                return fallback;
            }
        };

        match check_depth(&raw, read_bound(kind), fallback) {
            DepthReading::Valid(v) => v,
            DepthReading::Repaired { value, stored } => {
                tracing::warn!(key, found = %raw, repaired = %stored, "Repairing depth setting");
                if let Err(e) = self.store.setting_set(key, &stored) {
                    tracing::warn!(key, error = %e, "Failed to persist repaired depth");
                }
                value
            }
        }
    }

    /// Persist a depth that has already been validated.
    pub fn set_depth(&self, kind: NativeMenuKind, value: i32) -> MenusResult<()> {
        self.store.setting_set(settings_key(kind), &value.to_string())
    }
}
