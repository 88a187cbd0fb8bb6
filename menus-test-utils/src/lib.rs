//! Menus Test Utilities
//!
//! Centralized test infrastructure for the menus workspace:
//! - A call-counting page provider
//! - Proptest generators for hierarchies and order operations
//! - Test fixtures for common scenarios
//! - Custom assertions for menus-specific validation

// Re-export mock storage from its source crate
pub use menus_storage::{
    CustomMenuStore, MockMenuStore, MockPageProvider, MockSettingsStore, PageProvider,
    SettingsStore,
};

// Re-export core types for convenience
pub use menus_core::{
    CustomMenu, CustomMenuItem, CustomMenuType, EntityIdType, EntityType, ItemId, MenuId,
    MenuItemType, MenusError, MenusResult, PageId, PageNode, StorageError, ValidationError,
};

use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// COUNTING PAGE PROVIDER
// ============================================================================

/// Page provider wrapper that counts calls into the wrapped provider.
#[derive(Debug)]
pub struct CountingPageProvider<P> {
    inner: P,
    page_calls: AtomicUsize,
    child_calls: AtomicUsize,
}

impl<P: PageProvider> CountingPageProvider<P> {
    pub fn new(inner: P) -> Self {
        Self {
            inner,
            page_calls: AtomicUsize::new(0),
            child_calls: AtomicUsize::new(0),
        }
    }

    /// Total number of `get_page` and `get_child_pages` calls.
    pub fn calls(&self) -> usize {
        self.page_calls.load(Ordering::SeqCst) + self.child_calls.load(Ordering::SeqCst)
    }

    pub fn child_calls(&self) -> usize {
        self.child_calls.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.page_calls.store(0, Ordering::SeqCst);
        self.child_calls.store(0, Ordering::SeqCst);
    }

    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: PageProvider> PageProvider for CountingPageProvider<P> {
    fn get_page(&self, id: PageId) -> MenusResult<Option<PageNode>> {
        self.page_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_page(id)
    }

    fn get_child_pages(&self, id: PageId) -> MenusResult<Vec<PageNode>> {
        self.child_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get_child_pages(id)
    }

    fn get_root_page_id(&self) -> PageId {
        self.inner.get_root_page_id()
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating menus inputs.

    use super::*;
    use proptest::prelude::*;
    use proptest::sample::Index;

    /// Random acyclic hierarchy under root page 1.
    ///
    /// Page `k` (k >= 2) picks its parent among pages `1..k`, so parents are
    /// always created first.
    pub fn arb_page_hierarchy(max_pages: usize) -> impl Strategy<Value = Vec<PageNode>> {
        prop::collection::vec(any::<Index>(), 0..max_pages).prop_map(|parents| {
            let mut pages = vec![PageNode::new(1, 0, "Root", "Site root")];
            for (k, parent) in parents.iter().enumerate() {
                let id = k as i32 + 2;
                let parent_id = parent.index(k + 1) as i32 + 1;
                pages.push(PageNode::new(
                    id,
                    parent_id,
                    format!("Page {}", id),
                    format!("Description {}", id),
                ));
            }
            pages
        })
    }

    /// Depth values a caller could configure.
    pub fn arb_depth() -> impl Strategy<Value = i32> {
        0i32..6
    }

    /// Bookmarks accepted by the pattern check.
    pub fn arb_bookmark() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9_]{1,24}"
    }

    /// One mutation of a menu's item ordering.
    #[derive(Debug, Clone)]
    pub enum OrderOp {
        /// Append a new item
        Create,
        /// Remove the item at this position (modulo item count)
        Remove(Index),
        /// Move the item at this position to the order at the second one
        Swap(Index, Index),
    }

    pub fn arb_order_op() -> impl Strategy<Value = OrderOp> {
        prop_oneof![
            2 => Just(OrderOp::Create),
            1 => any::<Index>().prop_map(OrderOp::Remove),
            1 => (any::<Index>(), any::<Index>()).prop_map(|(a, b)| OrderOp::Swap(a, b)),
        ]
    }

    pub fn arb_order_ops(max_len: usize) -> impl Strategy<Value = Vec<OrderOp>> {
        prop::collection::vec(arb_order_op(), 0..max_len)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// Root page 1 with children A (2) and B (3); A has child C (4).
    pub fn scenario_site() -> MockPageProvider {
        MockPageProvider::new(1)
            .with_page(PageNode::new(1, 0, "Home", "Site root"))
            .with_page(PageNode::new(2, 1, "A", "First section"))
            .with_page(PageNode::new(3, 1, "B", "Second section"))
            .with_page(PageNode::new(4, 2, "C", "Nested page"))
    }

    /// Provider rooted at page 1 holding the given pages.
    pub fn site_from(pages: Vec<PageNode>) -> MockPageProvider {
        pages
            .into_iter()
            .fold(MockPageProvider::new(1), |provider, page| provider.with_page(page))
    }

    /// Single chain 1 -> 2 -> ... -> n.
    pub fn linear_site(n: i32) -> MockPageProvider {
        let mut provider = MockPageProvider::new(1).with_page(PageNode::new(1, 0, "Root", ""));
        for id in 2..=n {
            provider = provider.with_page(PageNode::new(id, id - 1, format!("Level {}", id - 1), ""));
        }
        provider
    }

    /// Unsaved menu.
    pub fn custom_menu(name: &str, bookmark: &str, menu_type: CustomMenuType) -> CustomMenu {
        CustomMenu {
            id: MenuId::default(),
            name: name.to_string(),
            bookmark: bookmark.to_string(),
            menu_type,
            description: format!("{} description", name),
        }
    }

    /// Unsaved external link item.
    pub fn link_item(parent: MenuId, order: i32, label: &str) -> CustomMenuItem {
        CustomMenuItem {
            id: ItemId::default(),
            parent_menu_id: parent,
            order,
            item_type: MenuItemType::ExternalUrl,
            source_item_id: None,
            is_label_dynamic: false,
            is_blank: false,
            label: label.to_string(),
            url: format!("https://example.org/{}", label.to_lowercase()),
        }
    }

    /// Unsaved item referencing another menu.
    pub fn sub_menu_item(parent: MenuId, order: i32, target: &str) -> CustomMenuItem {
        CustomMenuItem {
            item_type: MenuItemType::Menu,
            source_item_id: Some(target.to_string()),
            label: format!("Sub {}", target),
            ..link_item(parent, order, "sub")
        }
    }

    /// Unsaved item linking a page, with a dynamic label.
    pub fn dynamic_page_item(parent: MenuId, order: i32, page: PageId) -> CustomMenuItem {
        CustomMenuItem {
            item_type: MenuItemType::Page,
            source_item_id: Some(page.to_string()),
            is_label_dynamic: true,
            label: String::new(),
            url: format!("jsp/site/Portal.jsp?page_id={}", page),
            ..link_item(parent, order, "page")
        }
    }

    /// Menus M1 .. Mn where each Mi holds a link and a sub-menu item pointing
    /// at M(i+1). With `close_loop` the last menu points back at the first.
    pub fn menu_chain(
        store: &dyn CustomMenuStore,
        len: usize,
        close_loop: bool,
    ) -> MenusResult<Vec<CustomMenu>> {
        let mut menus = Vec::with_capacity(len);
        for i in 0..len {
            let name = format!("M{}", i + 1);
            menus.push(store.menu_insert(custom_menu(
                &name,
                &format!("chain_{}", i + 1),
                CustomMenuType::Submenu,
            ))?);
        }
        for (i, menu) in menus.iter().enumerate() {
            store.item_insert(link_item(menu.id, 1, &format!("Link{}", i + 1)))?;
            let next = match menus.get(i + 1) {
                Some(next) => Some(next.id),
                None if close_loop => menus.first().map(|m| m.id),
                None => None,
            };
            if let Some(next) = next {
                store.item_insert(sub_menu_item(menu.id, 2, &next.to_string()))?;
            }
        }
        Ok(menus)
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for menus-specific validation.

    use super::*;

    /// Assert that a MenusResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &MenusResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a MenusResult is a NotFound storage error.
    #[track_caller]
    pub fn assert_not_found<T: std::fmt::Debug>(result: &MenusResult<T>, entity_type: EntityType) {
        match result {
            Err(MenusError::Storage(StorageError::NotFound { entity_type: et, .. })) => {
                assert_eq!(*et, entity_type, "Wrong entity type in NotFound error");
            }
            other => panic!("Expected NotFound error for {:?}, got: {:?}", entity_type, other),
        }
    }

    /// Assert that a MenusResult is a Validation error.
    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &MenusResult<T>) {
        match result {
            Err(MenusError::Validation(_)) | Err(MenusError::Violations(_)) => {}
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    /// Assert that the items of a menu carry exactly the orders 1..=N.
    #[track_caller]
    pub fn assert_dense_orders(store: &dyn CustomMenuStore, menu_id: MenuId) {
        let items = store
            .item_list_by_menu(menu_id)
            .expect("listing items should succeed");
        let mut orders: Vec<i32> = items.iter().map(|i| i.order).collect();
        orders.sort_unstable();
        let expected: Vec<i32> = (1..=items.len() as i32).collect();
        assert_eq!(orders, expected, "orders of menu {} are not dense", menu_id);
    }
}
