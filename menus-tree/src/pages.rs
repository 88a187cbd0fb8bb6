//! Page lookups built on top of the page hierarchy and the full tree.

use menus_core::{
    EntityType, MenuTreeNode, MenusConfig, MenusResult, PageId, RenderMode, StorageError,
};
use menus_storage::PageProvider;
use serde::Serialize;

/// One entry of a page picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageReference {
    pub id: PageId,
    /// `"name - description"`
    pub value: String,
}

/// Source of display labels for pages referenced by custom menu items.
pub trait PageLabelSource: Send + Sync {
    /// Picker value of the page whose id matches `source_item_id`
    /// exactly, or an empty string.
    fn page_label(&self, source_item_id: &str) -> MenusResult<String>;
}

/// Top-level ancestor of a page.
///
/// A page hanging off page 0 is its own answer. Otherwise the parents are
/// walked up until the site root, and the last page seen before the root is
/// returned. For a direct child of the root that is the root itself.
pub fn root_parent_tree(pages: &dyn PageProvider, page_id: PageId) -> MenusResult<PageId> {
    let page = pages
        .get_page(page_id)?
        .ok_or_else(|| StorageError::not_found(EntityType::Page, page_id))?;
    if page.parent_id.is_homepage() {
        return Ok(page_id);
    }

    let root = pages.get_root_page_id();
    let mut parent = page.parent_id;
    let mut top = parent;
    while parent != root && !parent.is_homepage() {
        top = parent;
        parent = pages
            .get_page(parent)?
            .ok_or_else(|| StorageError::not_found(EntityType::Page, parent))?
            .parent_id;
    }
    Ok(top)
}

/// Whether `value` matches a free-text filter.
///
/// A blank filter matches everything. Otherwise the trimmed filter must
/// equal the value, or one of its space-separated words must occur in it.
/// Comparisons are case-sensitive.
pub fn matches_filter(value: &str, filter: &str) -> bool {
    let criteria = filter.trim();
    if criteria.is_empty() {
        return true;
    }
    criteria == value || criteria.split(' ').any(|word| value.contains(word))
}

/// Flatten a tree into picker entries, in pre-order, keeping pages whose
/// name, description or id match the filter.
pub fn page_reference_list(tree: &MenuTreeNode, filter: &str) -> Vec<PageReference> {
    tree.pages()
        .into_iter()
        .filter(|p| {
            matches_filter(&p.name, filter)
                || matches_filter(&p.description, filter)
                || matches_filter(&p.id.to_string(), filter)
        })
        .map(|p| PageReference {
            id: p.id,
            value: p.display_value(),
        })
        .collect()
}

/// Picker value of the entry whose id string equals `source_item_id`.
pub fn label_in(references: &[PageReference], source_item_id: &str) -> String {
    references
        .iter()
        .find(|r| r.id.to_string() == source_item_id)
        .map(|r| r.value.clone())
        .unwrap_or_default()
}

/// Dynamic item label: the picker value cut at its first `-`.
pub fn truncate_at_dash(value: &str) -> String {
    match value.find('-') {
        Some(idx) => value[..idx].to_string(),
        None => value.to_string(),
    }
}

/// Portal path for the rendering mode.
pub fn site_path(config: &MenusConfig, mode: RenderMode) -> &str {
    match mode {
        RenderMode::Admin => &config.admin_portal_url,
        RenderMode::Site => &config.portal_url,
    }
}

/// Public link of a page.
pub fn page_full_link(config: &MenusConfig, id: PageId) -> String {
    format!(
        "{}{}?page_id={}",
        config.base_url,
        site_path(config, RenderMode::Site),
        id
    )
}
