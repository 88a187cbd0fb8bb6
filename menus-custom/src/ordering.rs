//! Dense item ordering within a menu.
//!
//! Items of a menu carry the orders `1..=N`. Every operation that touches
//! several rows of one menu runs under that menu's lock and commits through
//! a single [`OrderBatch`], so concurrent callers and failed writes can never
//! leave a gap or a duplicate behind.

use dashmap::DashMap;
use menus_core::{
    CustomMenuItem, EntityType, ItemId, MenuId, MenusResult, StorageError, ValidationError,
};
use menus_storage::{CustomMenuStore, OrderBatch};
use std::sync::{Arc, Mutex, MutexGuard};

/// Keeps item orders dense per parent menu.
#[derive(Clone)]
pub struct OrderingService {
    store: Arc<dyn CustomMenuStore>,
    /// One lock per parent menu, created on first use
    locks: Arc<DashMap<MenuId, Arc<Mutex<()>>>>,
}

impl OrderingService {
    pub fn new(store: Arc<dyn CustomMenuStore>) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
        }
    }

    fn lock_for(&self, menu_id: MenuId) -> Arc<Mutex<()>> {
        // Clone the handle out so the map shard is released before blocking.
        Arc::clone(self.locks.entry(menu_id).or_default().value())
    }

    /// Drop the lock of a deleted menu unless a caller still holds it.
    pub fn forget(&self, menu_id: MenuId) {
        self.locks
            .remove_if(&menu_id, |_, lock| Arc::strong_count(lock) == 1);
    }

    /// Number of menus that currently have a lock.
    pub fn tracked_menus(&self) -> usize {
        self.locks.len()
    }

    fn acquire(lock: &Mutex<()>) -> MenusResult<MutexGuard<'_, ()>> {
        lock.lock().map_err(|_| StorageError::LockPoisoned.into())
    }

    /// Order the next item appended to a menu would get.
    pub fn next_order(&self, menu_id: MenuId) -> MenusResult<i32> {
        Ok(self.store.item_max_order(menu_id)?.map_or(1, |max| max + 1))
    }

    /// Store `item` at the end of its menu.
    pub fn append(&self, mut item: CustomMenuItem) -> MenusResult<CustomMenuItem> {
        let lock = self.lock_for(item.parent_menu_id);
        let _guard = Self::acquire(&lock)?;
        item.order = self.next_order(item.parent_menu_id)?;
        let stored = self.store.item_insert(item)?;
        tracing::debug!(
            menu_id = %stored.parent_menu_id,
            item_id = %stored.id,
            order = stored.order,
            "Appended menu item"
        );
        Ok(stored)
    }

    fn owned_item(&self, menu_id: MenuId, item_id: ItemId) -> MenusResult<CustomMenuItem> {
        self.store
            .item_get(item_id)?
            .filter(|item| item.parent_menu_id == menu_id)
            .ok_or_else(|| StorageError::not_found(EntityType::CustomMenuItem, item_id).into())
    }

    /// Delete an item and close the gap it leaves.
    pub fn remove_and_compact(&self, menu_id: MenuId, item_id: ItemId) -> MenusResult<()> {
        let lock = self.lock_for(menu_id);
        let _guard = Self::acquire(&lock)?;

        let item = self.owned_item(menu_id, item_id)?;
        let batch = self.compaction(menu_id, item.order, OrderBatch::new().with_delete(item_id))?;
        self.store.item_apply_batch(&batch)?;
        tracing::debug!(
            menu_id = %menu_id,
            item_id = %item_id,
            removed_order = item.order,
            shifted = batch.reorders.len(),
            "Removed menu item and compacted orders"
        );
        Ok(())
    }

    /// Close the gap left by an item already deleted at `removed_order`.
    pub fn compact_after_removal(&self, menu_id: MenuId, removed_order: i32) -> MenusResult<()> {
        let lock = self.lock_for(menu_id);
        let _guard = Self::acquire(&lock)?;

        let batch = self.compaction(menu_id, removed_order, OrderBatch::new())?;
        if !batch.is_empty() {
            self.store.item_apply_batch(&batch)?;
        }
        Ok(())
    }

    /// Delete every item of a menu.
    pub fn clear_menu(&self, menu_id: MenuId) -> MenusResult<usize> {
        let lock = self.lock_for(menu_id);
        let _guard = Self::acquire(&lock)?;
        self.store.item_delete_by_parent_menu(menu_id)
    }

    /// Delete the items of `parent_id` pointing at `target` and renumber
    /// the rest `1..=N`, all in one batch. Returns the number removed.
    pub fn remove_sub_menu_references(
        &self,
        parent_id: MenuId,
        target: MenuId,
    ) -> MenusResult<usize> {
        let lock = self.lock_for(parent_id);
        let _guard = Self::acquire(&lock)?;

        let (removed, kept): (Vec<CustomMenuItem>, Vec<CustomMenuItem>) = self
            .store
            .item_list_by_menu(parent_id)?
            .into_iter()
            .partition(|item| item.references_menu(target));
        if removed.is_empty() {
            return Ok(0);
        }

        let batch = removed
            .iter()
            .fold(OrderBatch::new(), |batch, item| batch.with_delete(item.id));
        let batch = (1..)
            .zip(&kept)
            .filter(|(order, item)| item.order != *order)
            .fold(batch, |batch, (order, item)| batch.with_reorder(item.id, order));
        self.store.item_apply_batch(&batch)?;
        tracing::debug!(
            menu_id = %parent_id,
            target = %target,
            removed = removed.len(),
            shifted = batch.reorders.len(),
            "Removed sub-menu references and compacted orders"
        );
        Ok(removed.len())
    }

    fn compaction(
        &self,
        menu_id: MenuId,
        removed_order: i32,
        batch: OrderBatch,
    ) -> MenusResult<OrderBatch> {
        let items = self.store.item_list_by_menu(menu_id)?;
        let shifted: Vec<_> = items
            .into_iter()
            .filter(|item| !batch.delete.contains(&item.id) && item.order > removed_order)
            .collect();
        Ok(shifted
            .into_iter()
            .fold(batch, |batch, item| batch.with_reorder(item.id, item.order - 1)))
    }

    /// Move an item to `new_order`, swapping places with the item that holds
    /// it. Targets outside `1..=N` are rejected.
    pub fn swap_order(&self, menu_id: MenuId, item_id: ItemId, new_order: i32) -> MenusResult<()> {
        let lock = self.lock_for(menu_id);
        let _guard = Self::acquire(&lock)?;

        let item = self.owned_item(menu_id, item_id)?;
        let siblings = self.store.item_list_by_menu(menu_id)?;
        let count = i32::try_from(siblings.len()).unwrap_or(i32::MAX);
        if new_order < 1 || new_order > count {
            return Err(ValidationError::InvalidValue {
                field: "order".to_string(),
                reason: format!("{} is outside 1..={}", new_order, count),
            }
            .into());
        }
        if item.order == new_order {
            return Ok(());
        }

        let mut batch = OrderBatch::new().with_reorder(item_id, new_order);
        if let Some(displaced) = siblings
            .iter()
            .find(|s| s.order == new_order && s.id != item_id)
        {
            batch = batch.with_reorder(displaced.id, item.order);
        }
        self.store.item_apply_batch(&batch)?;
        tracing::debug!(
            menu_id = %menu_id,
            item_id = %item_id,
            from = item.order,
            to = new_order,
            "Swapped menu item order"
        );
        Ok(())
    }
}
