//! Tree caches.
//!
//! Built native menu trees are cached per [`CacheKey`] and shared as
//! `Arc`s. A tree is fully built before it is published, and nobody mutates
//! it afterwards, so readers never see a partial tree. There is no expiry:
//! entries live until `invalidate_all` is called by the write paths.
//!
//! # Example
//!
//! ```ignore
//! let cache = InMemoryTreeCache::new(TreeCacheConfig::new("menus.tree"));
//! let tree = cache.get_or_build(CacheKey::tree(page_id), &mut || builder.build(root, depth))?;
//! ```

pub mod key;
pub mod memory;
pub mod traits;

pub use key::CacheKey;
pub use memory::{InMemoryTreeCache, TreeCacheConfig};
pub use traits::{CacheStats, TreeCache};
