//! In-memory mock implementations of the storage traits.

use crate::{CustomMenuStore, OrderBatch, PageProvider, SettingsStore, XPageProvider};
use menus_core::{
    CustomMenu, CustomMenuItem, EntityIdType, EntityType, ItemId, MenuId, MenusResult, PageId,
    PageNode, StorageError, XPageApp,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<T>(lock: &RwLock<T>) -> MenusResult<RwLockReadGuard<'_, T>> {
    lock.read().map_err(|_| StorageError::LockPoisoned.into())
}

fn write<T>(lock: &RwLock<T>) -> MenusResult<RwLockWriteGuard<'_, T>> {
    lock.write().map_err(|_| StorageError::LockPoisoned.into())
}

// ============================================================================
// MOCK PAGE PROVIDER
// ============================================================================

/// In-memory page hierarchy. Children come back in insertion order.
#[derive(Debug)]
pub struct MockPageProvider {
    root: PageId,
    pages: Arc<RwLock<Vec<PageNode>>>,
}

impl MockPageProvider {
    /// Create an empty hierarchy whose root has the given id.
    pub fn new(root: impl Into<PageId>) -> Self {
        Self {
            root: root.into(),
            pages: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Builder-style page insertion.
    pub fn with_page(self, page: PageNode) -> Self {
        if let Ok(mut pages) = self.pages.write() {
            pages.push(page);
        }
        self
    }

    pub fn add_page(&self, page: PageNode) -> MenusResult<()> {
        write(&self.pages)?.push(page);
        Ok(())
    }

    /// Rename a page in place. Returns false when the page is unknown.
    pub fn rename_page(&self, id: PageId, name: &str) -> MenusResult<bool> {
        let mut pages = write(&self.pages)?;
        match pages.iter_mut().find(|p| p.id == id) {
            Some(page) => {
                page.name = name.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn page_count(&self) -> usize {
        self.pages.read().map(|p| p.len()).unwrap_or(0)
    }
}

impl PageProvider for MockPageProvider {
    fn get_page(&self, id: PageId) -> MenusResult<Option<PageNode>> {
        Ok(read(&self.pages)?.iter().find(|p| p.id == id).cloned())
    }

    fn get_child_pages(&self, id: PageId) -> MenusResult<Vec<PageNode>> {
        Ok(read(&self.pages)?
            .iter()
            .filter(|p| p.parent_id == id && p.id != id)
            .cloned()
            .collect())
    }

    fn get_root_page_id(&self) -> PageId {
        self.root
    }
}

// ============================================================================
// MOCK XPAGE PROVIDER
// ============================================================================

/// Fixed list of xpage applications, in registration order.
#[derive(Debug, Default)]
pub struct MockXPageProvider {
    apps: Vec<XPageApp>,
}

impl MockXPageProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_app(mut self, id: &str, enabled: bool) -> Self {
        self.apps.push(XPageApp::new(id, enabled));
        self
    }
}

impl XPageProvider for MockXPageProvider {
    fn xpage_apps(&self) -> MenusResult<Vec<XPageApp>> {
        Ok(self.apps.clone())
    }
}

// ============================================================================
// MOCK MENU STORE
// ============================================================================

/// In-memory custom menu store.
///
/// Every mutation runs under a single write lock, so batches are atomic.
#[derive(Debug, Default)]
pub struct MockMenuStore {
    menus: Arc<RwLock<BTreeMap<MenuId, CustomMenu>>>,
    items: Arc<RwLock<BTreeMap<ItemId, CustomMenuItem>>>,
    next_menu_id: AtomicI32,
    next_item_id: AtomicI32,
    fail_writes: AtomicBool,
}

impl MockMenuStore {
    /// Create a new mock store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following write fail. Inserts fail with `InsertFailed`,
    /// other writes with `TransactionFailed`.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn menu_count(&self) -> usize {
        self.menus.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn item_count(&self) -> usize {
        self.items.read().map(|i| i.len()).unwrap_or(0)
    }

    fn check_writable(&self) -> MenusResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::TransactionFailed {
                reason: "writes disabled".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn check_insertable(&self, entity_type: EntityType) -> MenusResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::InsertFailed {
                entity_type,
                reason: "writes disabled".to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn sorted_items(
        items: &BTreeMap<ItemId, CustomMenuItem>,
        menu_id: MenuId,
    ) -> Vec<CustomMenuItem> {
        let mut out: Vec<CustomMenuItem> = items
            .values()
            .filter(|i| i.parent_menu_id == menu_id)
            .cloned()
            .collect();
        out.sort_by_key(|i| (i.order, i.id));
        out
    }
}

impl CustomMenuStore for MockMenuStore {
    // === Menu Operations ===

    fn menu_insert(&self, mut menu: CustomMenu) -> MenusResult<CustomMenu> {
        self.check_insertable(EntityType::CustomMenu)?;
        let mut menus = write(&self.menus)?;
        menu.id = MenuId::new(self.next_menu_id.fetch_add(1, Ordering::SeqCst) + 1);
        menus.insert(menu.id, menu.clone());
        Ok(menu)
    }

    fn menu_get(&self, id: MenuId) -> MenusResult<Option<CustomMenu>> {
        Ok(read(&self.menus)?.get(&id).cloned())
    }

    fn menu_update(&self, menu: &CustomMenu) -> MenusResult<()> {
        self.check_writable()?;
        let mut menus = write(&self.menus)?;
        let stored = menus
            .get_mut(&menu.id)
            .ok_or_else(|| StorageError::not_found(EntityType::CustomMenu, menu.id))?;
        *stored = menu.clone();
        Ok(())
    }

    fn menu_delete(&self, id: MenuId) -> MenusResult<()> {
        self.check_writable()?;
        write(&self.menus)?
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StorageError::not_found(EntityType::CustomMenu, id).into())
    }

    fn menu_list(&self) -> MenusResult<Vec<CustomMenu>> {
        Ok(read(&self.menus)?.values().cloned().collect())
    }

    fn menu_count_by_bookmark(&self, bookmark: &str) -> MenusResult<usize> {
        Ok(read(&self.menus)?
            .values()
            .filter(|m| m.bookmark == bookmark)
            .count())
    }

    // === Item Operations ===

    fn item_insert(&self, mut item: CustomMenuItem) -> MenusResult<CustomMenuItem> {
        self.check_insertable(EntityType::CustomMenuItem)?;
        let mut items = write(&self.items)?;
        item.id = ItemId::new(self.next_item_id.fetch_add(1, Ordering::SeqCst) + 1);
        items.insert(item.id, item.clone());
        Ok(item)
    }

    fn item_get(&self, id: ItemId) -> MenusResult<Option<CustomMenuItem>> {
        Ok(read(&self.items)?.get(&id).cloned())
    }

    fn item_update(&self, item: &CustomMenuItem) -> MenusResult<()> {
        self.check_writable()?;
        let mut items = write(&self.items)?;
        let stored = items.get_mut(&item.id).ok_or_else(|| StorageError::UpdateFailed {
            entity_type: EntityType::CustomMenuItem,
            id: item.id.to_string(),
            reason: "no such item".to_string(),
        })?;
        *stored = item.clone();
        Ok(())
    }

    fn item_list_by_menu(&self, menu_id: MenuId) -> MenusResult<Vec<CustomMenuItem>> {
        Ok(Self::sorted_items(&*read(&self.items)?, menu_id))
    }

    fn item_ids_by_parent_menu(&self, menu_id: MenuId) -> MenusResult<Vec<ItemId>> {
        Ok(Self::sorted_items(&*read(&self.items)?, menu_id)
            .into_iter()
            .map(|i| i.id)
            .collect())
    }

    fn item_max_order(&self, menu_id: MenuId) -> MenusResult<Option<i32>> {
        Ok(read(&self.items)?
            .values()
            .filter(|i| i.parent_menu_id == menu_id)
            .map(|i| i.order)
            .max())
    }

    fn item_delete_by_parent_menu(&self, menu_id: MenuId) -> MenusResult<usize> {
        self.check_writable()?;
        let mut items = write(&self.items)?;
        let before = items.len();
        items.retain(|_, i| i.parent_menu_id != menu_id);
        Ok(before - items.len())
    }

    fn item_sub_menu_references_to(&self, menu_id: MenuId) -> MenusResult<Vec<CustomMenuItem>> {
        Ok(read(&self.items)?
            .values()
            .filter(|i| i.references_menu(menu_id))
            .cloned()
            .collect())
    }

    fn item_apply_batch(&self, batch: &OrderBatch) -> MenusResult<()> {
        self.check_writable()?;
        let mut items = write(&self.items)?;

        let touched: HashSet<ItemId> = batch
            .delete
            .iter()
            .copied()
            .chain(batch.reorders.iter().map(|(id, _)| *id))
            .collect();
        if let Some(missing) = touched.iter().find(|id| !items.contains_key(*id)) {
            return Err(StorageError::TransactionFailed {
                reason: format!("item {} does not exist, batch rolled back", missing),
            }
            .into());
        }

        for id in &batch.delete {
            items.remove(id);
        }
        for (id, order) in &batch.reorders {
            if let Some(item) = items.get_mut(id) {
                item.order = *order;
            }
        }
        Ok(())
    }
}

// ============================================================================
// MOCK SETTINGS STORE
// ============================================================================

/// In-memory settings datastore that counts writes.
#[derive(Debug, Default)]
pub struct MockSettingsStore {
    values: Arc<RwLock<HashMap<String, String>>>,
    writes: AtomicUsize,
}

impl MockSettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style preset value, not counted as a write.
    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.write() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }

    /// Number of `setting_set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl SettingsStore for MockSettingsStore {
    fn setting_get(&self, key: &str) -> MenusResult<Option<String>> {
        Ok(read(&self.values)?.get(key).cloned())
    }

    fn setting_set(&self, key: &str, value: &str) -> MenusResult<()> {
        write(&self.values)?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod prop_tests {
    use super::*;
    use menus_core::MenuItemType;
    use proptest::prelude::*;

    fn item(menu: MenuId, order: i32) -> CustomMenuItem {
        CustomMenuItem {
            id: ItemId::default(),
            parent_menu_id: menu,
            order,
            item_type: MenuItemType::ExternalUrl,
            source_item_id: None,
            is_label_dynamic: false,
            is_blank: false,
            label: String::new(),
            url: String::new(),
        }
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_batch_with_unknown_item_changes_nothing(
            orders in prop::collection::vec(1i32..20, 1..10),
            new_orders in prop::collection::vec(1i32..20, 1..10),
        ) {
            let store = MockMenuStore::new();
            let menu = MenuId::new(1);
            let stored: Vec<CustomMenuItem> = orders
                .iter()
                .map(|o| store.item_insert(item(menu, *o)).unwrap())
                .collect();

            let batch = stored
                .iter()
                .zip(&new_orders)
                .fold(OrderBatch::new().with_delete(stored[0].id), |b, (i, o)| {
                    b.with_reorder(i.id, *o)
                })
                .with_reorder(ItemId::new(-1), 1);
            prop_assert!(store.item_apply_batch(&batch).is_err());
            prop_assert_eq!(store.item_list_by_menu(menu).unwrap().len(), stored.len());
            for original in &stored {
                let stored = store.item_get(original.id).unwrap();
                prop_assert_eq!(stored.as_ref(), Some(original));
            }
        }

        #[test]
        fn prop_items_come_back_sorted_by_order(orders in prop::collection::vec(-5i32..50, 0..15)) {
            let store = MockMenuStore::new();
            for o in &orders {
                store.item_insert(item(MenuId::new(3), *o)).unwrap();
            }
            let listed: Vec<i32> = store
                .item_list_by_menu(MenuId::new(3))
                .unwrap()
                .iter()
                .map(|i| i.order)
                .collect();
            let mut expected = orders.clone();
            expected.sort_unstable();
            prop_assert_eq!(listed, expected);
            prop_assert_eq!(store.item_max_order(MenuId::new(3)).unwrap(), orders.iter().max().copied());
        }
    }
}
