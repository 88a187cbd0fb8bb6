//! Menus Tree - Native Menus
//!
//! Menus derived from the site's page hierarchy. [`MenuTreeBuilder`] walks
//! the hierarchy to a bounded depth; [`NativeMenuService`] reads the
//! configured depths (repairing bad stored values), and caches the built
//! trees per flavor and page. Page pickers, dynamic page labels and the
//! JSON projection of the all-pages tree are built on the same trees.

pub mod builder;
pub mod pages;
pub mod projection;
pub mod service;
pub mod settings;

pub use builder::MenuTreeBuilder;
pub use pages::{
    matches_filter, page_full_link, page_reference_list, root_parent_tree, site_path,
    truncate_at_dash, PageLabelSource, PageReference,
};
pub use projection::{MenuPageJson, TreePagesResponse, TreePagesResult};
pub use service::{NativeMenuService, SharedTreeCache};
pub use settings::{admin_bound, read_bound, settings_key, DepthReading, DepthSettings};
