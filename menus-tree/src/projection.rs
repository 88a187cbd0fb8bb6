//! JSON projection of the all-pages tree.

use crate::pages::page_full_link;
use crate::service::NativeMenuService;
use menus_core::{MenuTreeNode, MenusConfig, PageId};
use serde::Serialize;

pub const STATUS_OK: &str = "OK";
pub const STATUS_KO: &str = "KO";

/// `{status, result: {root_menu_pages: [...]}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreePagesResponse {
    pub status: &'static str,
    pub result: TreePagesResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TreePagesResult {
    pub root_menu_pages: Vec<MenuPageJson>,
}

/// One page of the projection, with its children nested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuPageJson {
    pub id: PageId,
    #[serde(rename = "parentId")]
    pub parent_id: PageId,
    pub name: String,
    pub description: String,
    #[serde(rename = "pageFullLink")]
    pub page_full_link: String,
    pub menu_pages: Vec<MenuPageJson>,
}

impl TreePagesResponse {
    /// Project a built tree.
    pub fn from_tree(tree: &MenuTreeNode, config: &MenusConfig) -> Self {
        Self {
            status: STATUS_OK,
            result: TreePagesResult {
                root_menu_pages: project_children(tree, config),
            },
        }
    }

    /// Response reporting a failure, with no pages.
    pub fn failed() -> Self {
        Self {
            status: STATUS_KO,
            result: TreePagesResult::default(),
        }
    }

    /// Build the projection of the homepage's all-pages tree. Any error
    /// while building turns into a `KO` response.
    pub fn build(service: &NativeMenuService) -> Self {
        match service.get_tree_menu_all_pages(PageId::HOMEPAGE) {
            Ok(tree) => Self::from_tree(&tree, service.config()),
            Err(e) => {
                tracing::error!(error = %e, "Failed to build tree of menu pages");
                Self::failed()
            }
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn project_children(node: &MenuTreeNode, config: &MenusConfig) -> Vec<MenuPageJson> {
    node.children
        .iter()
        .filter_map(|child| {
            child.page.as_ref().map(|page| MenuPageJson {
                id: page.id,
                parent_id: page.parent_id,
                name: page.name.clone(),
                description: page.description.clone(),
                page_full_link: page_full_link(config, page.id),
                menu_pages: project_children(child, config),
            })
        })
        .collect()
}
