//! Native menu service: cached trees derived from the page hierarchy.

use crate::builder::MenuTreeBuilder;
use crate::pages::{self, PageLabelSource, PageReference};
use crate::settings::DepthSettings;
use menus_core::{MenuTreeNode, MenusConfig, MenusResult, NativeMenuKind, PageId, RenderMode};
use menus_storage::{
    CacheKey, InMemoryTreeCache, PageProvider, SettingsStore, TreeCache, TreeCacheConfig,
};
use std::sync::Arc;

/// Shared handle to a tree cache.
pub type SharedTreeCache = Arc<dyn TreeCache<MenuTreeNode>>;

/// Serves the main, tree and all-pages flavors of native menus.
///
/// The regular flavors and the all-pages flavors use separate caches so
/// each can be reset on its own.
#[derive(Clone)]
pub struct NativeMenuService {
    pages: Arc<dyn PageProvider>,
    builder: MenuTreeBuilder,
    depths: DepthSettings,
    cache: SharedTreeCache,
    all_pages_cache: SharedTreeCache,
    config: Arc<MenusConfig>,
}

impl NativeMenuService {
    /// Create a service with in-memory caches configured from `config`.
    pub fn new(
        pages: Arc<dyn PageProvider>,
        settings: Arc<dyn SettingsStore>,
        config: Arc<MenusConfig>,
    ) -> Self {
        let cache: SharedTreeCache = Arc::new(InMemoryTreeCache::new(
            TreeCacheConfig::new("menus.tree").with_enabled(config.cache_enabled),
        ));
        let all_pages_cache: SharedTreeCache = Arc::new(InMemoryTreeCache::new(
            TreeCacheConfig::new("menus.tree.allpages").with_enabled(config.cache_enabled),
        ));
        Self::with_caches(pages, settings, config, cache, all_pages_cache)
    }

    /// Create a service around caller-provided caches.
    pub fn with_caches(
        pages: Arc<dyn PageProvider>,
        settings: Arc<dyn SettingsStore>,
        config: Arc<MenusConfig>,
        cache: SharedTreeCache,
        all_pages_cache: SharedTreeCache,
    ) -> Self {
        Self {
            builder: MenuTreeBuilder::new(Arc::clone(&pages)),
            depths: DepthSettings::new(settings, config.depth.clone()),
            pages,
            cache,
            all_pages_cache,
            config,
        }
    }

    pub fn config(&self) -> &MenusConfig {
        &self.config
    }

    pub fn depths(&self) -> &DepthSettings {
        &self.depths
    }

    pub fn cache(&self) -> &SharedTreeCache {
        &self.cache
    }

    pub fn all_pages_cache(&self) -> &SharedTreeCache {
        &self.all_pages_cache
    }

    /// Cache holding trees of the given flavor.
    pub fn cache_for(&self, kind: NativeMenuKind) -> &SharedTreeCache {
        if kind.is_all_pages() {
            &self.all_pages_cache
        } else {
            &self.cache
        }
    }

    /// Reset both caches.
    pub fn invalidate_all(&self) {
        self.cache.invalidate_all();
        self.all_pages_cache.invalidate_all();
    }

    // === Regular flavors ===

    /// Main navigation: children of the site root.
    pub fn get_main_menu(&self) -> MenusResult<Arc<MenuTreeNode>> {
        let depth = self.depths.depth(NativeMenuKind::Main);
        let root = self.pages.get_root_page_id();
        self.cache
            .get_or_build(CacheKey::main(), &mut || self.builder.build(root, depth))
    }

    /// Tree for the current page.
    ///
    /// On the homepage (page 0 or the root) this lists the root's children.
    /// Anywhere else the current page is the single top-level node.
    pub fn get_tree_menu(&self, current: PageId) -> MenusResult<Arc<MenuTreeNode>> {
        let depth = self.depths.depth(NativeMenuKind::Tree);
        let root = self.pages.get_root_page_id();
        self.cache.get_or_build(CacheKey::tree(current), &mut || {
            if current.is_homepage() || current == root {
                self.builder.build(root, depth)
            } else {
                self.builder.build_including_id(current, depth)
            }
        })
    }

    // === All-pages flavors ===

    pub fn get_main_menu_all_pages(&self) -> MenusResult<Arc<MenuTreeNode>> {
        let depth = self.depths.depth(NativeMenuKind::MainAllPages);
        let root = self.pages.get_root_page_id();
        self.all_pages_cache
            .get_or_build(CacheKey::main_all_pages(), &mut || self.builder.build(root, depth))
    }

    /// All-pages tree. Always built from the site root; the current page
    /// only selects the cache entry.
    pub fn get_tree_menu_all_pages(&self, current: PageId) -> MenusResult<Arc<MenuTreeNode>> {
        let depth = self.depths.depth(NativeMenuKind::TreeAllPages);
        let root = self.pages.get_root_page_id();
        self.all_pages_cache
            .get_or_build(CacheKey::tree_all_pages(current), &mut || {
                self.builder.build(root, depth)
            })
    }

    /// All-pages tree of the homepage, backing page pickers.
    pub fn get_full_tree(&self) -> MenusResult<Arc<MenuTreeNode>> {
        self.get_tree_menu_all_pages(PageId::HOMEPAGE)
    }

    // === Page lookups ===

    pub fn root_parent_tree(&self, page_id: PageId) -> MenusResult<PageId> {
        pages::root_parent_tree(self.pages.as_ref(), page_id)
    }

    pub fn page_reference_list(&self, filter: &str) -> MenusResult<Vec<PageReference>> {
        Ok(pages::page_reference_list(&*self.get_full_tree()?, filter))
    }

    pub fn site_path(&self, mode: RenderMode) -> &str {
        pages::site_path(&self.config, mode)
    }

    pub fn page_full_link(&self, id: PageId) -> String {
        pages::page_full_link(&self.config, id)
    }
}

impl PageLabelSource for NativeMenuService {
    fn page_label(&self, source_item_id: &str) -> MenusResult<String> {
        Ok(pages::label_in(&self.page_reference_list("")?, source_item_id))
    }
}
