//! Template slots filled with resolved custom menus.

use crate::resolver::CustomMenuResolver;
use menus_core::{CustomMenuType, MenusResult, ResolvedCustomMenu};
use menus_storage::CustomMenuStore;
use std::collections::BTreeMap;

pub const SLOT_MAIN_PAGE: &str = "customMenuMainPage";
pub const SLOT_INTERNAL_PAGE: &str = "customMenuInternalPage";

/// Resolved menus keyed by the template slot they fill.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuSlots {
    slots: BTreeMap<String, ResolvedCustomMenu>,
}

impl MenuSlots {
    /// Resolve every bookmarked menu and publish it under its bookmark.
    ///
    /// A `main` menu also fills the main page slot, and the internal page
    /// slot unless some `internal` menu exists. An `internal` menu fills the
    /// internal page slot. A menu that fails to resolve is skipped.
    pub fn assemble(
        store: &dyn CustomMenuStore,
        resolver: &CustomMenuResolver,
    ) -> MenusResult<Self> {
        let menus = store.menu_list()?;
        let has_internal = menus
            .iter()
            .any(|m| m.menu_type == CustomMenuType::Internal);

        let mut slots = BTreeMap::new();
        for menu in menus {
            if menu.bookmark.trim().is_empty() {
                continue;
            }
            let menu_id = menu.id;
            let resolved = match resolver.resolve(menu) {
                Ok(resolved) => resolved,
                Err(e) => {
                    tracing::error!(menu_id = %menu_id, error = %e, "Failed to resolve custom menu");
                    continue;
                }
            };

            match resolved.menu.menu_type {
                CustomMenuType::Main => {
                    slots.insert(SLOT_MAIN_PAGE.to_string(), resolved.clone());
                    if !has_internal {
                        slots.insert(SLOT_INTERNAL_PAGE.to_string(), resolved.clone());
                    }
                }
                CustomMenuType::Internal => {
                    slots.insert(SLOT_INTERNAL_PAGE.to_string(), resolved.clone());
                }
                CustomMenuType::Sidebar | CustomMenuType::Submenu => {}
            }
            slots.insert(resolved.menu.bookmark.clone(), resolved);
        }

        tracing::debug!(slots = slots.len(), "Assembled custom menu slots");
        Ok(Self { slots })
    }

    pub fn get(&self, slot: &str) -> Option<&ResolvedCustomMenu> {
        self.slots.get(slot)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn into_map(self) -> BTreeMap<String, ResolvedCustomMenu> {
        self.slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menus_core::{CustomMenu, MenusConfig};
    use menus_storage::MockMenuStore;
    use menus_test_utils::fixtures::{custom_menu, link_item};
    use menus_tree::PageLabelSource;
    use std::sync::Arc;

    struct NoLabels;

    impl PageLabelSource for NoLabels {
        fn page_label(&self, _source_item_id: &str) -> MenusResult<String> {
            Ok(String::new())
        }
    }

    fn setup(menus: &[(&str, CustomMenuType)]) -> (Arc<MockMenuStore>, CustomMenuResolver, Vec<CustomMenu>) {
        let store = Arc::new(MockMenuStore::new());
        let stored = menus
            .iter()
            .map(|(bookmark, ty)| {
                let menu = store.menu_insert(custom_menu(bookmark, bookmark, *ty)).unwrap();
                store.item_insert(link_item(menu.id, 1, bookmark)).unwrap();
                menu
            })
            .collect();
        let resolver =
            CustomMenuResolver::new(store.clone(), Arc::new(NoLabels), &MenusConfig::default());
        (store, resolver, stored)
    }

    #[test]
    fn test_main_menu_fills_internal_slot_without_internal_menu() {
        let (store, resolver, menus) =
            setup(&[("top", CustomMenuType::Main), ("side", CustomMenuType::Sidebar)]);
        let slots = MenuSlots::assemble(store.as_ref(), &resolver).unwrap();

        let names: Vec<&str> = slots.names().collect();
        assert_eq!(names, vec![SLOT_INTERNAL_PAGE, SLOT_MAIN_PAGE, "side", "top"]);
        assert_eq!(slots.get(SLOT_MAIN_PAGE).unwrap().menu, menus[0]);
        assert_eq!(slots.get(SLOT_INTERNAL_PAGE).unwrap().menu, menus[0]);
        assert_eq!(slots.get("top").unwrap().items.len(), 1);
    }

    #[test]
    fn test_internal_menu_owns_internal_slot() {
        let (store, resolver, menus) = setup(&[
            ("inner", CustomMenuType::Internal),
            ("top", CustomMenuType::Main),
        ]);
        let slots = MenuSlots::assemble(store.as_ref(), &resolver).unwrap();
        assert_eq!(slots.get(SLOT_INTERNAL_PAGE).unwrap().menu, menus[0]);
        assert_eq!(slots.get(SLOT_MAIN_PAGE).unwrap().menu, menus[1]);
        assert_eq!(slots.len(), 4);
    }

    #[test]
    fn test_blank_bookmarks_are_skipped() {
        let (store, resolver, _) = setup(&[("  ", CustomMenuType::Main)]);
        assert!(MenuSlots::assemble(store.as_ref(), &resolver).unwrap().is_empty());
    }
}
