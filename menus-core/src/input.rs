//! Typed admin form inputs
//!
//! Admin handlers fill these from request parameters, then the write path
//! validates them and maps them onto the stored shapes.

use crate::{CustomMenu, CustomMenuItem, CustomMenuType, ItemId, MenuId, MenuItemType};
use serde::{Deserialize, Serialize};

/// Custom menu creation / modification form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomMenuInput {
    pub name: String,
    pub bookmark: String,
    /// Raw type value, checked against the known menu types
    pub menu_type: String,
    pub description: String,
}

impl CustomMenuInput {
    /// Map onto the stored shape once the type has been parsed.
    pub fn to_menu(&self, id: MenuId, menu_type: CustomMenuType) -> CustomMenu {
        CustomMenu {
            id,
            name: self.name.trim().to_string(),
            bookmark: self.bookmark.trim().to_string(),
            menu_type,
            description: self.description.clone(),
        }
    }
}

/// Custom menu item creation / modification form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CustomMenuItemInput {
    pub parent_menu_id: MenuId,
    /// Raw type value, `None` when the form did not send one
    pub item_type: Option<String>,
    pub source_item_id: Option<String>,
    pub is_label_dynamic: bool,
    pub is_blank: bool,
    pub label: String,
    pub url: String,
}

impl CustomMenuItemInput {
    /// Parsed item type, `None` when absent or unknown.
    pub fn parsed_type(&self) -> Option<MenuItemType> {
        self.item_type
            .as_deref()
            .and_then(|t| MenuItemType::from_db_str(t.trim()).ok())
    }

    /// Map onto the stored shape.
    pub fn to_item(&self, id: ItemId, order: i32, item_type: MenuItemType) -> CustomMenuItem {
        CustomMenuItem {
            id,
            parent_menu_id: self.parent_menu_id,
            order,
            item_type,
            source_item_id: self
                .source_item_id
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            is_label_dynamic: self.is_label_dynamic,
            is_blank: self.is_blank,
            label: self.label.trim().to_string(),
            url: self.url.trim().to_string(),
        }
    }
}
