//! Cache keys for built native menu trees.
//!
//! A key can only be built through the per-flavor constructors, so the
//! page id component is present exactly for the flavors whose tree depends
//! on the current page.

use menus_core::{NativeMenuKind, PageId};
use std::fmt;

const PREFIX_MAIN: &str = "menus.main";
const PREFIX_TREE: &str = "menus.tree";
const PREFIX_MAIN_ALL_PAGES: &str = "menus.main.allpages";
const PREFIX_TREE_ALL_PAGES: &str = "menus.tree.allpages";

/// Key of one cached tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    inner: KeyInner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum KeyInner {
    Main,
    Tree(PageId),
    MainAllPages,
    TreeAllPages(PageId),
}

impl CacheKey {
    /// Single global key of the main menu.
    pub fn main() -> Self {
        Self { inner: KeyInner::Main }
    }

    /// Key of the tree menu for a page.
    pub fn tree(page_id: PageId) -> Self {
        Self {
            inner: KeyInner::Tree(page_id),
        }
    }

    /// Single global key of the all-pages main menu.
    pub fn main_all_pages() -> Self {
        Self {
            inner: KeyInner::MainAllPages,
        }
    }

    /// Key of the all-pages tree for a page.
    pub fn tree_all_pages(page_id: PageId) -> Self {
        Self {
            inner: KeyInner::TreeAllPages(page_id),
        }
    }

    /// Key for a flavor. The page id is ignored by the main flavors.
    pub fn for_kind(kind: NativeMenuKind, page_id: PageId) -> Self {
        match kind {
            NativeMenuKind::Main => Self::main(),
            NativeMenuKind::Tree => Self::tree(page_id),
            NativeMenuKind::MainAllPages => Self::main_all_pages(),
            NativeMenuKind::TreeAllPages => Self::tree_all_pages(page_id),
        }
    }

    pub fn kind(&self) -> NativeMenuKind {
        match self.inner {
            KeyInner::Main => NativeMenuKind::Main,
            KeyInner::Tree(_) => NativeMenuKind::Tree,
            KeyInner::MainAllPages => NativeMenuKind::MainAllPages,
            KeyInner::TreeAllPages(_) => NativeMenuKind::TreeAllPages,
        }
    }

    pub fn page_id(&self) -> Option<PageId> {
        match self.inner {
            KeyInner::Tree(id) | KeyInner::TreeAllPages(id) => Some(id),
            KeyInner::Main | KeyInner::MainAllPages => None,
        }
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner {
            KeyInner::Main => f.write_str(PREFIX_MAIN),
            KeyInner::Tree(id) => write!(f, "{}{}", PREFIX_TREE, id),
            KeyInner::MainAllPages => f.write_str(PREFIX_MAIN_ALL_PAGES),
            KeyInner::TreeAllPages(id) => write!(f, "{}{}", PREFIX_TREE_ALL_PAGES, id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menus_core::EntityIdType;

    #[test]
    fn test_key_strings() {
        assert_eq!(CacheKey::main().to_string(), "menus.main");
        assert_eq!(CacheKey::tree(PageId::new(12)).to_string(), "menus.tree12");
        assert_eq!(CacheKey::main_all_pages().to_string(), "menus.main.allpages");
        assert_eq!(
            CacheKey::tree_all_pages(PageId::new(0)).to_string(),
            "menus.tree.allpages0"
        );
    }

    #[test]
    fn test_main_key_ignores_page() {
        assert_eq!(
            CacheKey::for_kind(NativeMenuKind::Main, PageId::new(4)),
            CacheKey::for_kind(NativeMenuKind::Main, PageId::new(5))
        );
        assert_ne!(
            CacheKey::for_kind(NativeMenuKind::Tree, PageId::new(4)),
            CacheKey::for_kind(NativeMenuKind::Tree, PageId::new(5))
        );
        assert_ne!(
            CacheKey::tree(PageId::new(4)),
            CacheKey::tree_all_pages(PageId::new(4))
        );
    }

    #[test]
    fn test_key_accessors() {
        let key = CacheKey::tree_all_pages(PageId::new(8));
        assert_eq!(key.kind(), NativeMenuKind::TreeAllPages);
        assert_eq!(key.page_id(), Some(PageId::new(8)));
        assert_eq!(CacheKey::main().page_id(), None);
    }
}
