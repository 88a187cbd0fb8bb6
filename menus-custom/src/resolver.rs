//! Custom menu resolution.
//!
//! Turns a stored menu into its rendered shape: items loaded in stored
//! order, dynamic labels computed, and sub-menus attached down to a fixed
//! depth. Problems with a single item never abort the whole menu; they are
//! logged, recorded on the [`ResolutionReport`], and the item is kept as a
//! leaf.

use menus_core::{
    CustomMenu, CustomMenuItem, EntityIdType, EntityType, ItemId, MenuId, MenuItemType,
    MenusConfig, MenusError, MenusResult, ResolvedCustomMenu, ResolvedMenuItem, StorageError,
    ValidationError,
};
use menus_storage::CustomMenuStore;
use menus_tree::{truncate_at_dash, PageLabelSource};
use std::sync::Arc;

/// Something that went wrong while resolving one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionIssue {
    /// The item points back at a menu already on the resolution path.
    Circular(ValidationError),
    /// The source reference is not a menu id.
    InvalidReference { item: ItemId, source: String },
    /// The referenced menu does not exist.
    MissingMenu { item: ItemId, menu: MenuId },
    /// Loading the referenced menu or its items failed.
    LoadFailed { item: ItemId, error: MenusError },
    /// The dynamic label could not be computed.
    LabelFailed { item: ItemId, error: MenusError },
}

/// Per-item problems collected during one resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionReport {
    pub issues: Vec<ResolutionIssue>,
}

impl ResolutionReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Cycle diagnostics only.
    pub fn cycles(&self) -> Vec<&ValidationError> {
        self.issues
            .iter()
            .filter_map(|issue| match issue {
                ResolutionIssue::Circular(e) => Some(e),
                _ => None,
            })
            .collect()
    }
}

/// Resolves custom menus against the store and the page labels.
#[derive(Clone)]
pub struct CustomMenuResolver {
    store: Arc<dyn CustomMenuStore>,
    labels: Arc<dyn PageLabelSource>,
    start_depth: i32,
    max_depth: i32,
}

impl CustomMenuResolver {
    pub fn new(
        store: Arc<dyn CustomMenuStore>,
        labels: Arc<dyn PageLabelSource>,
        config: &MenusConfig,
    ) -> Self {
        Self {
            store,
            labels,
            start_depth: config.resolver_start_depth,
            max_depth: config.resolver_max_depth,
        }
    }

    /// Override the depth window.
    pub fn with_depths(mut self, start_depth: i32, max_depth: i32) -> Self {
        self.start_depth = start_depth;
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> i32 {
        self.max_depth
    }

    /// Resolve a menu, discarding the report.
    pub fn resolve(&self, menu: CustomMenu) -> MenusResult<ResolvedCustomMenu> {
        self.resolve_with_report(menu).map(|(resolved, _)| resolved)
    }

    /// Load and resolve a menu by id.
    pub fn resolve_by_id(&self, menu_id: MenuId) -> MenusResult<ResolvedCustomMenu> {
        let menu = self
            .store
            .menu_get(menu_id)?
            .ok_or_else(|| StorageError::not_found(EntityType::CustomMenu, menu_id))?;
        self.resolve(menu)
    }

    /// Resolve a menu and report the items that degraded to leaves.
    ///
    /// Only a failure to list the top-level menu's own items is returned as
    /// an error.
    pub fn resolve_with_report(
        &self,
        menu: CustomMenu,
    ) -> MenusResult<(ResolvedCustomMenu, ResolutionReport)> {
        let mut report = ResolutionReport::default();
        let mut path = Vec::new();
        let resolved = self.resolve_level(menu, self.start_depth, &mut path, &mut report)?;
        if !report.is_clean() {
            tracing::debug!(
                menu_id = %resolved.menu.id,
                issues = report.issues.len(),
                "Custom menu resolved with degraded items"
            );
        }
        Ok((resolved, report))
    }

    fn resolve_level(
        &self,
        menu: CustomMenu,
        depth: i32,
        path: &mut Vec<MenuId>,
        report: &mut ResolutionReport,
    ) -> MenusResult<ResolvedCustomMenu> {
        let items = self.store.item_list_by_menu(menu.id)?;
        path.push(menu.id);

        let items: Vec<ResolvedMenuItem> = items
            .into_iter()
            .map(|item| {
                let label = self.effective_label(&item, report);
                let sub_menu = if depth <= self.max_depth {
                    self.sub_menu(&item, depth, path, report).map(Box::new)
                } else {
                    None
                };
                ResolvedMenuItem {
                    item,
                    label,
                    sub_menu,
                }
            })
            .collect();

        path.pop();
        Ok(ResolvedCustomMenu { menu, items })
    }

    fn sub_menu(
        &self,
        item: &CustomMenuItem,
        depth: i32,
        path: &mut Vec<MenuId>,
        report: &mut ResolutionReport,
    ) -> Option<ResolvedCustomMenu> {
        if item.item_type != MenuItemType::Menu {
            return None;
        }
        let source = item.source_ref()?;

        let target = match source.parse::<MenuId>() {
            Ok(id) => id,
            Err(_) => {
                tracing::warn!(item_id = %item.id, source, "Sub-menu reference is not a menu id");
                report.issues.push(ResolutionIssue::InvalidReference {
                    item: item.id,
                    source: source.to_string(),
                });
                return None;
            }
        };

        if path.contains(&target) {
            let mut ids: Vec<i32> = path.iter().map(|id| id.as_i32()).collect();
            ids.push(target.as_i32());
            tracing::warn!(item_id = %item.id, cycle = ?ids, "Circular sub-menu reference");
            report
                .issues
                .push(ResolutionIssue::Circular(ValidationError::CircularReference {
                    entity_type: EntityType::CustomMenu,
                    ids,
                }));
            return None;
        }

        let sub = match self.store.menu_get(target) {
            Ok(Some(sub)) => sub,
            Ok(None) => {
                tracing::warn!(item_id = %item.id, menu_id = %target, "Sub-menu not found");
                report.issues.push(ResolutionIssue::MissingMenu {
                    item: item.id,
                    menu: target,
                });
                return None;
            }
            Err(error) => {
                tracing::error!(item_id = %item.id, menu_id = %target, error = %error, "Failed to load sub-menu");
                report.issues.push(ResolutionIssue::LoadFailed {
                    item: item.id,
                    error,
                });
                return None;
            }
        };

        match self.resolve_level(sub, depth + 1, path, report) {
            Ok(resolved) => Some(resolved),
            Err(error) => {
                tracing::error!(item_id = %item.id, menu_id = %target, error = %error, "Failed to load sub-menu items");
                report.issues.push(ResolutionIssue::LoadFailed {
                    item: item.id,
                    error,
                });
                None
            }
        }
    }

    fn effective_label(&self, item: &CustomMenuItem, report: &mut ResolutionReport) -> String {
        let source = match item.source_ref() {
            Some(source) if item.is_label_dynamic && item.item_type == MenuItemType::Page => source,
            _ => return item.label.clone(),
        };
        match self.labels.page_label(source) {
            Ok(value) => truncate_at_dash(&value),
            Err(error) => {
                tracing::warn!(item_id = %item.id, source, error = %error, "Dynamic label unavailable");
                report.issues.push(ResolutionIssue::LabelFailed {
                    item: item.id,
                    error,
                });
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menus_core::{CustomMenuType, PageId};
    use menus_storage::MockMenuStore;
    use menus_test_utils::fixtures::{custom_menu, dynamic_page_item, link_item, sub_menu_item};

    struct Labels;

    impl PageLabelSource for Labels {
        fn page_label(&self, source_item_id: &str) -> MenusResult<String> {
            match source_item_id {
                "3" => Ok("Contact - Reach us".to_string()),
                "5" => Err(StorageError::LockPoisoned.into()),
                _ => Ok(String::new()),
            }
        }
    }

    fn resolver(store: Arc<MockMenuStore>) -> CustomMenuResolver {
        CustomMenuResolver::new(store, Arc::new(Labels), &MenusConfig::default())
    }

    fn menu(store: &MockMenuStore, bookmark: &str) -> CustomMenu {
        store
            .menu_insert(custom_menu(bookmark, bookmark, CustomMenuType::Sidebar))
            .unwrap()
    }

    #[test]
    fn test_items_keep_stored_order() {
        let store = Arc::new(MockMenuStore::new());
        let m = menu(&store, "footer");
        store.item_insert(link_item(m.id, 2, "Second")).unwrap();
        store.item_insert(link_item(m.id, 1, "First")).unwrap();

        let resolved = resolver(store).resolve(m).unwrap();
        let labels: Vec<&str> = resolved.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["First", "Second"]);
        assert_eq!(resolved.nesting(), 0);
    }

    #[test]
    fn test_dynamic_labels() {
        let store = Arc::new(MockMenuStore::new());
        let m = menu(&store, "footer");
        store
            .item_insert(dynamic_page_item(m.id, 1, PageId::new(3)))
            .unwrap();
        store
            .item_insert(dynamic_page_item(m.id, 2, PageId::new(42)))
            .unwrap();
        store
            .item_insert(dynamic_page_item(m.id, 3, PageId::new(5)))
            .unwrap();

        let (resolved, report) = resolver(store).resolve_with_report(m).unwrap();
        assert_eq!(resolved.items[0].label, "Contact ");
        assert_eq!(resolved.items[1].label, "");
        assert_eq!(resolved.items[2].label, "");
        assert!(matches!(
            report.issues.as_slice(),
            [ResolutionIssue::LabelFailed { .. }]
        ));
    }

    #[test]
    fn test_bad_references_degrade_to_leaves() {
        let store = Arc::new(MockMenuStore::new());
        let m = menu(&store, "footer");
        store.item_insert(sub_menu_item(m.id, 1, "abc")).unwrap();
        store.item_insert(sub_menu_item(m.id, 2, "404")).unwrap();
        store.item_insert(link_item(m.id, 3, "Kept")).unwrap();

        let (resolved, report) = resolver(store).resolve_with_report(m).unwrap();
        assert_eq!(resolved.items.len(), 3);
        assert!(resolved.items.iter().all(|i| i.sub_menu.is_none()));
        assert!(matches!(
            report.issues.as_slice(),
            [
                ResolutionIssue::InvalidReference { .. },
                ResolutionIssue::MissingMenu { .. }
            ]
        ));
    }

    #[test]
    fn test_self_reference_is_reported() {
        let store = Arc::new(MockMenuStore::new());
        let m = menu(&store, "loop");
        store
            .item_insert(sub_menu_item(m.id, 1, &m.id.to_string()))
            .unwrap();

        let (resolved, report) = resolver(store).resolve_with_report(m.clone()).unwrap();
        assert!(resolved.items[0].sub_menu.is_none());
        assert_eq!(
            report.cycles(),
            vec![&ValidationError::CircularReference {
                entity_type: EntityType::CustomMenu,
                ids: vec![m.id.as_i32(), m.id.as_i32()],
            }]
        );
    }

    #[test]
    fn test_resolve_by_id() {
        let store = Arc::new(MockMenuStore::new());
        let m = menu(&store, "footer");
        let resolver = resolver(store);
        assert_eq!(resolver.resolve_by_id(m.id).unwrap().menu, m);
        assert!(resolver.resolve_by_id(MenuId::new(77)).unwrap_err().is_not_found());
    }
}
