//! Menus Custom - Admin-Authored Menus
//!
//! Custom menus are named lists of ordered items that are injected into
//! page templates under their bookmark. This crate holds everything that
//! touches them:
//!
//! - [`bookmark`]: form checks and bookmark uniqueness
//! - [`validation`]: item form rules per item type
//! - [`ordering`]: dense `1..=N` item orders, serialized per menu
//! - [`resolver`]: loading items, dynamic labels and nested sub-menus
//! - [`admin`]: the write path used by the admin console
//! - [`slots`]: publishing resolved menus under their template slots

pub mod admin;
pub mod bookmark;
pub mod ordering;
pub mod resolver;
pub mod slots;
pub mod validation;

pub use admin::{native_depth_options, CustomMenuAdmin, MenuReference};
pub use bookmark::{
    is_reserved_bookmark, is_unique_bookmark, validate_menu_fields, RESERVED_BOOKMARKS,
};
pub use ordering::OrderingService;
pub use resolver::{CustomMenuResolver, ResolutionIssue, ResolutionReport};
pub use slots::{MenuSlots, SLOT_INTERNAL_PAGE, SLOT_MAIN_PAGE};
pub use validation::ItemValidator;
