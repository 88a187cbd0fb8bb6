//! Admin write path for custom menus, their items and the native depths.
//!
//! Every successful mutation resets both tree caches so the next page render
//! sees it. Rejected input leaves the store untouched.

use crate::bookmark::{is_unique_bookmark, validate_menu_fields};
use crate::ordering::OrderingService;
use crate::validation::ItemValidator;
use menus_core::{
    CustomMenu, CustomMenuInput, CustomMenuItem, CustomMenuItemInput, CustomMenuType,
    EntityType, ItemId, MenuId, MenuItemType, MenusError, MenusResult, NativeMenuKind,
    StorageError, ValidationError,
};
use menus_storage::{CustomMenuStore, XPageProvider};
use menus_tree::{admin_bound, matches_filter, NativeMenuService, PageReference};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Entry of the sub-menu picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuReference {
    pub id: MenuId,
    pub name: String,
}

/// Selectable depths `0..=max` for a depth picker.
pub fn native_depth_options(max: i32) -> Vec<i32> {
    (0..=max.max(0)).collect()
}

fn reject(violations: Vec<ValidationError>) -> MenusResult<()> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(MenusError::Violations(violations))
    }
}

/// Admin operations over custom menus.
#[derive(Clone)]
pub struct CustomMenuAdmin {
    store: Arc<dyn CustomMenuStore>,
    native: Arc<NativeMenuService>,
    ordering: OrderingService,
    validator: ItemValidator,
    xpages: Option<Arc<dyn XPageProvider>>,
}

impl CustomMenuAdmin {
    pub fn new(store: Arc<dyn CustomMenuStore>, native: Arc<NativeMenuService>) -> Self {
        Self {
            ordering: OrderingService::new(Arc::clone(&store)),
            validator: ItemValidator::new(),
            xpages: None,
            store,
            native,
        }
    }

    /// Use this registry for the xpage picker. Without one the picker is
    /// empty.
    pub fn with_xpages(mut self, xpages: Arc<dyn XPageProvider>) -> Self {
        self.xpages = Some(xpages);
        self
    }

    pub fn ordering(&self) -> &OrderingService {
        &self.ordering
    }

    fn menu(&self, id: MenuId) -> MenusResult<CustomMenu> {
        self.store
            .menu_get(id)?
            .ok_or_else(|| StorageError::not_found(EntityType::CustomMenu, id).into())
    }

    fn item(&self, id: ItemId) -> MenusResult<CustomMenuItem> {
        self.store
            .item_get(id)?
            .ok_or_else(|| StorageError::not_found(EntityType::CustomMenuItem, id).into())
    }

    fn checked_menu(
        &self,
        id: MenuId,
        input: &CustomMenuInput,
        is_creation: bool,
    ) -> MenusResult<CustomMenu> {
        reject(validate_menu_fields(input))?;
        let menu_type = CustomMenuType::from_db_str(input.menu_type.trim())
            .map_err(|e| ValidationError::invalid("type", e.to_string()))?;
        let menu = input.to_menu(id, menu_type);
        if !is_unique_bookmark(self.store.as_ref(), &menu, is_creation)? {
            return Err(ValidationError::NotUnique {
                field: "bookmark".to_string(),
                value: menu.bookmark,
            }
            .into());
        }
        Ok(menu)
    }

    // === Menus ===

    pub fn create_menu(&self, input: &CustomMenuInput) -> MenusResult<CustomMenu> {
        let menu = self.checked_menu(MenuId::default(), input, true)?;
        let menu = self.store.menu_insert(menu)?;
        self.native.invalidate_all();
        tracing::info!(menu_id = %menu.id, bookmark = %menu.bookmark, "Created custom menu");
        Ok(menu)
    }

    pub fn update_menu(&self, id: MenuId, input: &CustomMenuInput) -> MenusResult<CustomMenu> {
        self.menu(id)?;
        let menu = self.checked_menu(id, input, false)?;
        self.store.menu_update(&menu)?;
        self.native.invalidate_all();
        tracing::info!(menu_id = %id, bookmark = %menu.bookmark, "Updated custom menu");
        Ok(menu)
    }

    /// Delete a menu with its items. Items of other menus pointing at it are
    /// removed too, and their menus compacted.
    ///
    /// Each referring menu is cleaned under its own ordering lock in a single
    /// batch, so concurrent moves in that menu cannot interleave.
    pub fn delete_menu(&self, id: MenuId) -> MenusResult<()> {
        self.menu(id)?;
        let own_items = self.ordering.clear_menu(id)?;

        let parents: BTreeSet<MenuId> = self
            .store
            .item_sub_menu_references_to(id)?
            .into_iter()
            .map(|item| item.parent_menu_id)
            .filter(|parent| *parent != id)
            .collect();
        let mut references = 0;
        for parent in parents {
            references += self.ordering.remove_sub_menu_references(parent, id)?;
        }

        self.store.menu_delete(id)?;
        self.ordering.forget(id);
        self.native.invalidate_all();
        tracing::info!(
            menu_id = %id,
            items = own_items,
            references,
            "Deleted custom menu"
        );
        Ok(())
    }

    /// Menus that may be picked as a sub-menu of `current`, filtered on name.
    pub fn available_menus(
        &self,
        current: Option<MenuId>,
        filter: &str,
    ) -> MenusResult<Vec<MenuReference>> {
        Ok(self
            .store
            .menu_list()?
            .into_iter()
            .filter(|m| Some(m.id) != current && matches_filter(&m.name, filter))
            .map(|m| MenuReference {
                id: m.id,
                name: m.name,
            })
            .collect())
    }

    /// Pages that may be linked by an item.
    pub fn available_pages(&self, filter: &str) -> MenusResult<Vec<PageReference>> {
        self.native.page_reference_list(filter)
    }

    /// Ids of the enabled xpage applications matching the filter.
    pub fn available_xpages(&self, filter: &str) -> MenusResult<Vec<String>> {
        let Some(xpages) = &self.xpages else {
            return Ok(Vec::new());
        };
        Ok(xpages
            .xpage_apps()?
            .into_iter()
            .filter(|app| app.enabled && matches_filter(&app.id, filter))
            .map(|app| app.id)
            .collect())
    }

    // === Items ===

    fn checked_item(&self, input: &CustomMenuItemInput) -> MenusResult<MenuItemType> {
        reject(self.validator.validate(input))?;
        input
            .parsed_type()
            .ok_or_else(|| ValidationError::required("type").into())
    }

    /// Validate and append an item to its menu.
    pub fn create_item(&self, input: &CustomMenuItemInput) -> MenusResult<CustomMenuItem> {
        let item_type = self.checked_item(input)?;
        self.menu(input.parent_menu_id)?;
        let item = self
            .ordering
            .append(input.to_item(ItemId::default(), 0, item_type))?;
        self.native.invalidate_all();
        tracing::info!(
            menu_id = %item.parent_menu_id,
            item_id = %item.id,
            order = item.order,
            "Created custom menu item"
        );
        Ok(item)
    }

    /// Replace an item's content. Its menu and order are kept.
    pub fn update_item(
        &self,
        id: ItemId,
        input: &CustomMenuItemInput,
    ) -> MenusResult<CustomMenuItem> {
        let item_type = self.checked_item(input)?;
        let existing = self.item(id)?;
        if existing.parent_menu_id != input.parent_menu_id {
            return Err(ValidationError::invalid(
                "parentMenu",
                "an item cannot move to another menu",
            )
            .into());
        }
        let item = input.to_item(id, existing.order, item_type);
        self.store.item_update(&item)?;
        self.native.invalidate_all();
        tracing::info!(menu_id = %item.parent_menu_id, item_id = %id, "Updated custom menu item");
        Ok(item)
    }

    pub fn delete_item(&self, menu_id: MenuId, item_id: ItemId) -> MenusResult<()> {
        self.ordering.remove_and_compact(menu_id, item_id)?;
        self.native.invalidate_all();
        tracing::info!(menu_id = %menu_id, item_id = %item_id, "Deleted custom menu item");
        Ok(())
    }

    pub fn move_item(&self, menu_id: MenuId, item_id: ItemId, new_order: i32) -> MenusResult<()> {
        self.ordering.swap_order(menu_id, item_id, new_order)?;
        self.native.invalidate_all();
        tracing::info!(
            menu_id = %menu_id,
            item_id = %item_id,
            new_order,
            "Moved custom menu item"
        );
        Ok(())
    }

    // === Native depths ===

    /// Current effective depth of an editable native flavor.
    pub fn native_depth(&self, kind: NativeMenuKind) -> i32 {
        self.native.depths().depth(kind)
    }

    /// Store a native menu depth entered in the admin console.
    ///
    /// `menu_kind` is the console name (`menuMain`, `menuTree`,
    /// `menuTreeAllPages`).
    pub fn set_native_depth(&self, menu_kind: &str, raw_value: Option<&str>) -> MenusResult<i32> {
        let raw = match raw_value.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(ValidationError::required("depth").into()),
        };
        let (kind, max) = match NativeMenuKind::from_admin_name(menu_kind.trim())
            .and_then(|kind| admin_bound(kind).map(|max| (kind, max)))
        {
            Some(found) => found,
            None => {
                return Err(ValidationError::UnauthorizedProperty {
                    property: menu_kind.to_string(),
                }
                .into())
            }
        };
        let value = raw
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidNumber {
                field: "depth".to_string(),
                value: raw.to_string(),
            })?;
        if !(0..=max).contains(&value) {
            return Err(ValidationError::InvalidDepth { value, max }.into());
        }

        self.native.depths().set_depth(kind, value)?;
        self.native.cache_for(kind).invalidate_all();
        tracing::info!(kind = kind.admin_name(), depth = value, "Updated native menu depth");
        Ok(value)
    }
}
