//! Menus Core - Entity Types
//!
//! Pure data structures shared by every other crate of the workspace: typed
//! ids, the page hierarchy and custom menu shapes, the error hierarchy and
//! static configuration. No storage and no business logic live here.

pub mod config;
pub mod entities;
pub mod enums;
pub mod error;
pub mod identity;
pub mod input;

// ============================================================================
// RE-EXPORTS
// ============================================================================

pub use config::{keys, DepthDefaults, MenusConfig};
pub use entities::{
    CustomMenu, CustomMenuItem, MenuTreeNode, PageNode, ResolvedCustomMenu, ResolvedMenuItem,
    XPageApp,
};
pub use enums::{CustomMenuType, EntityType, EnumParseError, MenuItemType, NativeMenuKind, RenderMode};
pub use error::{ConfigError, MenusError, MenusResult, StorageError, ValidationError};
pub use identity::{EntityIdType, ItemId, MenuId, PageId};
pub use input::{CustomMenuInput, CustomMenuItemInput};

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
