//! Static checks on custom menu forms and bookmark uniqueness.

use menus_core::{CustomMenu, CustomMenuInput, CustomMenuType, MenusResult, ValidationError};
use menus_storage::CustomMenuStore;
use once_cell::sync::Lazy;
use regex::Regex;

pub const NAME_MAX_LEN: usize = 100;
pub const BOOKMARK_MAX_LEN: usize = 100;
pub const DESCRIPTION_MAX_LEN: usize = 255;

pub const BOOKMARK_PATTERN: &str = "^[a-zA-Z0-9_]*$";

/// Template slot names owned by the native and built-in menus.
pub const RESERVED_BOOKMARKS: [&str; 7] = [
    "customMenu",
    "customMenuMainPage",
    "customMenuInternalPage",
    "customMenuSideBar",
    "page_tree_menu_main",
    "page_tree_menu_tree",
    "page_tree_menu_tree_all_pages",
];

static BOOKMARK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(BOOKMARK_PATTERN).expect("bookmark pattern is a valid regex"));

pub fn is_reserved_bookmark(bookmark: &str) -> bool {
    RESERVED_BOOKMARKS.contains(&bookmark)
}

fn check_len(field: &str, value: &str, max: usize, out: &mut Vec<ValidationError>) {
    let len = value.chars().count();
    if len > max {
        out.push(ValidationError::TooLong {
            field: field.to_string(),
            len,
            max,
        });
    }
}

/// Field-level violations of a menu form. An empty list means the form is
/// acceptable apart from bookmark uniqueness.
pub fn validate_menu_fields(input: &CustomMenuInput) -> Vec<ValidationError> {
    let mut violations = Vec::new();

    let name = input.name.trim();
    if name.is_empty() {
        violations.push(ValidationError::required("name"));
    } else {
        check_len("name", name, NAME_MAX_LEN, &mut violations);
    }

    let bookmark = input.bookmark.trim();
    if bookmark.is_empty() {
        violations.push(ValidationError::required("bookmark"));
    } else {
        check_len("bookmark", bookmark, BOOKMARK_MAX_LEN, &mut violations);
        if !BOOKMARK_RE.is_match(bookmark) {
            violations.push(ValidationError::PatternMismatch {
                field: "bookmark".to_string(),
                pattern: BOOKMARK_PATTERN.to_string(),
            });
        } else if is_reserved_bookmark(bookmark) {
            violations.push(ValidationError::ReservedWord {
                field: "bookmark".to_string(),
                value: bookmark.to_string(),
            });
        }
    }

    if input.menu_type.trim().is_empty() {
        violations.push(ValidationError::required("type"));
    } else if CustomMenuType::from_db_str(input.menu_type.trim()).is_err() {
        violations.push(ValidationError::invalid(
            "type",
            format!("unknown menu type {:?}", input.menu_type),
        ));
    }

    check_len(
        "description",
        &input.description,
        DESCRIPTION_MAX_LEN,
        &mut violations,
    );

    violations
}

/// Whether `menu.bookmark` may be stored for `menu`.
///
/// On creation no other row may hold the bookmark. On update a single
/// matching row is accepted when it is the menu's own current bookmark.
pub fn is_unique_bookmark(
    store: &dyn CustomMenuStore,
    menu: &CustomMenu,
    is_creation: bool,
) -> MenusResult<bool> {
    let count = store.menu_count_by_bookmark(&menu.bookmark)?;
    if count == 0 {
        return Ok(true);
    }
    if is_creation || count > 1 {
        return Ok(false);
    }
    Ok(store
        .menu_get(menu.id)?
        .is_some_and(|stored| stored.bookmark == menu.bookmark))
}
