//! Menus Storage - Collaborator Traits and Mock Implementations
//!
//! Defines the seams between the menus core and the host CMS: the page
//! hierarchy, the xpage application registry, custom menu persistence and
//! the string settings datastore.
//! In-memory implementations back the tests. The tree caches live in
//! [`cache`].

pub mod cache;
pub mod mock;

pub use cache::{CacheKey, CacheStats, InMemoryTreeCache, TreeCache, TreeCacheConfig};
pub use mock::{MockMenuStore, MockPageProvider, MockSettingsStore, MockXPageProvider};

use menus_core::{
    CustomMenu, CustomMenuItem, ItemId, MenuId, MenusResult, PageId, PageNode, XPageApp,
};

// ============================================================================
// BATCH TYPES
// ============================================================================

/// A set of row changes within one menu that must commit together.
///
/// Stores apply the whole batch or nothing: if any referenced item is
/// missing, no row is touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderBatch {
    /// Items to delete before the reorders are applied
    pub delete: Vec<ItemId>,
    /// New order value per item
    pub reorders: Vec<(ItemId, i32)>,
}

impl OrderBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delete(mut self, id: ItemId) -> Self {
        self.delete.push(id);
        self
    }

    pub fn with_reorder(mut self, id: ItemId, order: i32) -> Self {
        self.reorders.push((id, order));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.reorders.is_empty()
    }
}

// ============================================================================
// PAGE PROVIDER
// ============================================================================

/// Read-only access to the site's page hierarchy.
///
/// The hierarchy is assumed acyclic.
pub trait PageProvider: Send + Sync {
    /// Get a page by id.
    fn get_page(&self, id: PageId) -> MenusResult<Option<PageNode>>;

    /// Direct children of a page, in the provider's declared order.
    fn get_child_pages(&self, id: PageId) -> MenusResult<Vec<PageNode>>;

    /// Id of the site root page.
    fn get_root_page_id(&self) -> PageId;
}

// ============================================================================
// XPAGE PROVIDER
// ============================================================================

/// Registry of the plugin applications installed on the site.
pub trait XPageProvider: Send + Sync {
    /// Every registered application, enabled or not.
    fn xpage_apps(&self) -> MenusResult<Vec<XPageApp>>;
}

// ============================================================================
// CUSTOM MENU STORE
// ============================================================================

/// Persistence for custom menus and their items.
pub trait CustomMenuStore: Send + Sync {
    // === Menu Operations ===

    /// Insert a new menu. The stored copy, with its assigned id, is returned.
    fn menu_insert(&self, menu: CustomMenu) -> MenusResult<CustomMenu>;

    /// Get a menu by id.
    fn menu_get(&self, id: MenuId) -> MenusResult<Option<CustomMenu>>;

    /// Replace a stored menu.
    fn menu_update(&self, menu: &CustomMenu) -> MenusResult<()>;

    /// Delete a menu row. Items are not touched.
    fn menu_delete(&self, id: MenuId) -> MenusResult<()>;

    /// All menus, by id.
    fn menu_list(&self) -> MenusResult<Vec<CustomMenu>>;

    /// Number of menus using this bookmark (case-sensitive).
    fn menu_count_by_bookmark(&self, bookmark: &str) -> MenusResult<usize>;

    // === Item Operations ===

    /// Insert a new item. The stored copy, with its assigned id, is returned.
    fn item_insert(&self, item: CustomMenuItem) -> MenusResult<CustomMenuItem>;

    /// Get an item by id.
    fn item_get(&self, id: ItemId) -> MenusResult<Option<CustomMenuItem>>;

    /// Replace a stored item.
    fn item_update(&self, item: &CustomMenuItem) -> MenusResult<()>;

    /// Items of a menu, by order.
    fn item_list_by_menu(&self, menu_id: MenuId) -> MenusResult<Vec<CustomMenuItem>>;

    /// Item ids of a menu, by order.
    fn item_ids_by_parent_menu(&self, menu_id: MenuId) -> MenusResult<Vec<ItemId>>;

    /// Highest order used in a menu, `None` when it has no items.
    fn item_max_order(&self, menu_id: MenuId) -> MenusResult<Option<i32>>;

    /// Delete every item of a menu. Returns the number of rows removed.
    fn item_delete_by_parent_menu(&self, menu_id: MenuId) -> MenusResult<usize>;

    /// Every `menu`-typed item pointing at this menu, in any parent menu.
    fn item_sub_menu_references_to(&self, menu_id: MenuId) -> MenusResult<Vec<CustomMenuItem>>;

    /// Apply deletes and a set of order changes atomically.
    fn item_apply_batch(&self, batch: &OrderBatch) -> MenusResult<()>;
}

// ============================================================================
// SETTINGS STORE
// ============================================================================

/// String key/value datastore holding runtime settings.
pub trait SettingsStore: Send + Sync {
    fn setting_get(&self, key: &str) -> MenusResult<Option<String>>;

    fn setting_set(&self, key: &str, value: &str) -> MenusResult<()>;
}
