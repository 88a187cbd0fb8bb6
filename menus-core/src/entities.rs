//! Core entity structures

use crate::{CustomMenuType, EntityIdType, ItemId, MenuId, MenuItemType, PageId};
use serde::{Deserialize, Serialize};

// ============================================================================
// PAGE HIERARCHY
// ============================================================================

/// A page of the site hierarchy, as handed out by the page provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageNode {
    pub id: PageId,
    pub parent_id: PageId,
    pub name: String,
    pub description: String,
}

impl PageNode {
    pub fn new(
        id: impl Into<PageId>,
        parent_id: impl Into<PageId>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            parent_id: parent_id.into(),
            name: name.into(),
            description: description.into(),
        }
    }

    /// Display value used in page pickers: `"name - description"`.
    pub fn display_value(&self) -> String {
        format!("{} - {}", self.name, self.description)
    }
}

/// A node of a built native menu tree.
///
/// The root of a built tree is a bare container with no page; every other
/// node wraps the page it links to. Trees are never mutated once they have
/// been handed to a cache.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MenuTreeNode {
    pub page: Option<PageNode>,
    pub children: Vec<MenuTreeNode>,
}

impl MenuTreeNode {
    /// Empty root container.
    pub fn container() -> Self {
        Self::default()
    }

    /// Node wrapping a page, without children yet.
    pub fn for_page(page: PageNode) -> Self {
        Self {
            page: Some(page),
            children: Vec::new(),
        }
    }

    pub fn page_id(&self) -> Option<PageId> {
        self.page.as_ref().map(|p| p.id)
    }

    /// Number of levels below this node (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.height() + 1)
            .max()
            .unwrap_or(0)
    }

    /// Total number of nodes below this node.
    pub fn descendant_count(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.descendant_count() + 1)
            .sum()
    }

    /// Pre-order walk of every page below this node.
    pub fn pages(&self) -> Vec<&PageNode> {
        let mut out = Vec::new();
        self.collect_pages(&mut out);
        out
    }

    fn collect_pages<'a>(&'a self, out: &mut Vec<&'a PageNode>) {
        for child in &self.children {
            if let Some(page) = &child.page {
                out.push(page);
            }
            child.collect_pages(out);
        }
    }

    /// Whether a page with this id appears anywhere below this node.
    pub fn contains(&self, id: PageId) -> bool {
        self.pages().iter().any(|p| p.id == id)
    }

    /// Child node wrapping the given page, if it is a direct child.
    pub fn child(&self, id: PageId) -> Option<&MenuTreeNode> {
        self.children.iter().find(|c| c.page_id() == Some(id))
    }
}

// ============================================================================
// XPAGE APPLICATIONS
// ============================================================================

/// A plugin application that can be linked by an `xpage` item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XPageApp {
    /// Application id, also used as its display name in pickers
    pub id: String,
    pub enabled: bool,
}

impl XPageApp {
    pub fn new(id: impl Into<String>, enabled: bool) -> Self {
        Self {
            id: id.into(),
            enabled,
        }
    }
}

// ============================================================================
// CUSTOM MENUS (stored shape)
// ============================================================================

/// An admin-authored menu, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMenu {
    pub id: MenuId,
    pub name: String,
    pub bookmark: String,
    pub menu_type: CustomMenuType,
    pub description: String,
}

/// One entry of a custom menu, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomMenuItem {
    pub id: ItemId,
    pub parent_menu_id: MenuId,
    /// 1-based, dense within `parent_menu_id`
    pub order: i32,
    pub item_type: MenuItemType,
    /// Page id, xpage id or referenced menu id depending on `item_type`
    pub source_item_id: Option<String>,
    pub is_label_dynamic: bool,
    /// Open in a new tab
    pub is_blank: bool,
    pub label: String,
    pub url: String,
}

impl CustomMenuItem {
    /// Trimmed source reference, `None` when absent or blank.
    pub fn source_ref(&self) -> Option<&str> {
        self.source_item_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether this is a sub-menu item pointing at `menu_id`.
    pub fn references_menu(&self, menu_id: MenuId) -> bool {
        self.item_type == MenuItemType::Menu
            && self.source_ref().and_then(|s| s.parse::<i32>().ok()) == Some(menu_id.as_i32())
    }

    /// Whether the label is computed from the referenced page on read.
    pub fn has_dynamic_label(&self) -> bool {
        self.is_label_dynamic && self.source_ref().is_some()
    }
}

// ============================================================================
// CUSTOM MENUS (resolved shape)
// ============================================================================

/// A custom menu with its items loaded and sub-menus attached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedCustomMenu {
    pub menu: CustomMenu,
    pub items: Vec<ResolvedMenuItem>,
}

impl ResolvedCustomMenu {
    /// Number of nested sub-menu levels attached below this menu.
    pub fn nesting(&self) -> usize {
        self.items
            .iter()
            .filter_map(|i| i.sub_menu.as_deref())
            .map(|m| m.nesting() + 1)
            .max()
            .unwrap_or(0)
    }
}

/// A stored item plus what was computed for it at read time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedMenuItem {
    pub item: CustomMenuItem,
    pub label: String,
    pub sub_menu: Option<Box<ResolvedCustomMenu>>,
}

impl ResolvedMenuItem {
    /// Item with its static label and no sub-menu.
    pub fn leaf(item: CustomMenuItem) -> Self {
        Self {
            label: item.label.clone(),
            item,
            sub_menu: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: i32, parent: i32) -> PageNode {
        PageNode::new(id, parent, format!("Page {}", id), "desc")
    }

    #[test]
    fn test_display_value() {
        assert_eq!(page(3, 1).display_value(), "Page 3 - desc");
    }

    #[test]
    fn test_tree_height_and_walk() {
        let mut a = MenuTreeNode::for_page(page(2, 1));
        a.children.push(MenuTreeNode::for_page(page(4, 2)));
        let b = MenuTreeNode::for_page(page(3, 1));
        let root = MenuTreeNode {
            page: None,
            children: vec![a, b],
        };

        assert_eq!(root.height(), 2);
        assert_eq!(root.descendant_count(), 3);
        let ids: Vec<i32> = root.pages().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![2, 4, 3]);
        assert!(root.contains(PageId::new(4)));
        assert!(root.child(PageId::new(4)).is_none());
        assert_eq!(MenuTreeNode::container().height(), 0);
    }

    #[test]
    fn test_source_ref_ignores_blank() {
        let mut item = CustomMenuItem {
            id: ItemId::new(1),
            parent_menu_id: MenuId::new(1),
            order: 1,
            item_type: MenuItemType::Page,
            source_item_id: Some("  ".to_string()),
            is_label_dynamic: true,
            is_blank: false,
            label: String::new(),
            url: "/page".to_string(),
        };
        assert_eq!(item.source_ref(), None);
        assert!(!item.has_dynamic_label());

        item.source_item_id = Some(" 12 ".to_string());
        assert_eq!(item.source_ref(), Some("12"));
        assert!(item.has_dynamic_label());

        assert!(!item.references_menu(MenuId::new(12)));
        item.item_type = MenuItemType::Menu;
        assert!(item.references_menu(MenuId::new(12)));
        assert!(!item.references_menu(MenuId::new(1)));
    }
}
