//! Bounded-depth menu tree construction.

use menus_core::{EntityType, MenuTreeNode, MenusResult, PageId, PageNode, StorageError};
use menus_storage::PageProvider;
use std::sync::Arc;

/// Walks the page hierarchy down to a fixed depth.
///
/// The hierarchy is trusted to be acyclic; no visited set is kept.
#[derive(Clone)]
pub struct MenuTreeBuilder {
    pages: Arc<dyn PageProvider>,
}

impl MenuTreeBuilder {
    pub fn new(pages: Arc<dyn PageProvider>) -> Self {
        Self { pages }
    }

    /// Build the tree below `root`. The root itself is not part of the
    /// result: the returned container holds its children, expanded down to
    /// `max_depth` levels. A depth of 0 (or less) yields an empty container.
    pub fn build(&self, root: PageId, max_depth: i32) -> MenusResult<MenuTreeNode> {
        let mut container = MenuTreeNode::container();
        self.attach_children(&mut container, root, max_depth)?;
        tracing::debug!(
            root = %root,
            depth = max_depth,
            nodes = container.descendant_count(),
            "Built menu tree"
        );
        Ok(container)
    }

    /// Build a tree whose single top-level node is `page` itself, with its
    /// descendants attached down to `max_depth` levels.
    pub fn build_including(&self, page: PageNode, max_depth: i32) -> MenusResult<MenuTreeNode> {
        let page_id = page.id;
        let mut node = MenuTreeNode::for_page(page);
        self.attach_children(&mut node, page_id, max_depth)?;
        tracing::debug!(
            page = %page_id,
            depth = max_depth,
            nodes = node.descendant_count() + 1,
            "Built page-rooted menu tree"
        );
        Ok(MenuTreeNode {
            page: None,
            children: vec![node],
        })
    }

    /// Like [`build_including`](Self::build_including), looking the page up first.
    pub fn build_including_id(&self, page_id: PageId, max_depth: i32) -> MenusResult<MenuTreeNode> {
        let page = self
            .pages
            .get_page(page_id)?
            .ok_or_else(|| StorageError::not_found(EntityType::Page, page_id))?;
        self.build_including(page, max_depth)
    }

    fn attach_children(&self, node: &mut MenuTreeNode, page_id: PageId, depth: i32) -> MenusResult<()> {
        if depth <= 0 {
            return Ok(());
        }
        for page in self.pages.get_child_pages(page_id)? {
            let child_id = page.id;
            let mut child = MenuTreeNode::for_page(page);
            self.attach_children(&mut child, child_id, depth - 1)?;
            node.children.push(child);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menus_core::{EntityIdType, MenusError};
    use menus_test_utils::fixtures::{linear_site, scenario_site};

    fn builder() -> MenuTreeBuilder {
        MenuTreeBuilder::new(Arc::new(scenario_site()))
    }

    fn ids(nodes: &[MenuTreeNode]) -> Vec<i32> {
        nodes.iter().filter_map(|n| n.page_id()).map(|id| id.as_i32()).collect()
    }

    #[test]
    fn test_depth_one_lists_direct_children_only() {
        let tree = builder().build(PageId::new(1), 1).unwrap();
        assert!(tree.page.is_none());
        assert_eq!(ids(&tree.children), vec![2, 3]);
        assert!(tree.children.iter().all(|c| c.children.is_empty()));
    }

    #[test]
    fn test_depth_two_expands_grandchildren() {
        let tree = builder().build(PageId::new(1), 2).unwrap();
        let a = tree.child(PageId::new(2)).unwrap();
        assert_eq!(ids(&a.children), vec![4]);
        assert!(tree.child(PageId::new(3)).unwrap().children.is_empty());
    }

    #[test]
    fn test_depth_zero_and_negative_are_empty() {
        assert!(builder().build(PageId::new(1), 0).unwrap().children.is_empty());
        assert!(builder().build(PageId::new(1), -3).unwrap().children.is_empty());
    }

    #[test]
    fn test_root_never_appears() {
        let tree = builder().build(PageId::new(1), 5).unwrap();
        assert!(!tree.contains(PageId::new(1)));
        assert_eq!(tree.descendant_count(), 3);
    }

    #[test]
    fn test_depth_beyond_hierarchy_stops_at_leaves() {
        let tree = MenuTreeBuilder::new(Arc::new(linear_site(4)))
            .build(PageId::new(1), 10)
            .unwrap();
        assert_eq!(tree.height(), 3);
    }

    #[test]
    fn test_build_including_puts_page_on_top() {
        let tree = builder().build_including_id(PageId::new(2), 1).unwrap();
        assert_eq!(ids(&tree.children), vec![2]);
        assert_eq!(ids(&tree.children[0].children), vec![4]);

        let shallow = builder().build_including_id(PageId::new(2), 0).unwrap();
        assert_eq!(shallow.descendant_count(), 1);
    }

    #[test]
    fn test_build_including_unknown_page() {
        let err = builder().build_including_id(PageId::new(42), 1).unwrap_err();
        assert!(matches!(
            err,
            MenusError::Storage(StorageError::NotFound {
                entity_type: EntityType::Page,
                ..
            })
        ));
    }
}
