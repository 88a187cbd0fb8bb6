//! Enum types for menus entities

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// ENTITY TYPE
// ============================================================================

/// Entity type discriminator used in error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Page,
    CustomMenu,
    CustomMenuItem,
    Setting,
}

// ============================================================================
// CUSTOM MENU TYPE
// ============================================================================

/// Placement category of a custom menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CustomMenuType {
    /// Main navigation bar
    Main,
    /// Navigation inside internal pages
    Internal,
    /// Sidebar block
    Sidebar,
    /// Only meant to be referenced by other menus
    Submenu,
}

impl CustomMenuType {
    /// All variants, in admin listing order.
    pub const ALL: [CustomMenuType; 4] = [
        CustomMenuType::Main,
        CustomMenuType::Internal,
        CustomMenuType::Sidebar,
        CustomMenuType::Submenu,
    ];

    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            CustomMenuType::Main => "main",
            CustomMenuType::Internal => "internal",
            CustomMenuType::Sidebar => "sidebar",
            CustomMenuType::Submenu => "submenu",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s {
            "main" => Ok(CustomMenuType::Main),
            "internal" => Ok(CustomMenuType::Internal),
            "sidebar" => Ok(CustomMenuType::Sidebar),
            "submenu" => Ok(CustomMenuType::Submenu),
            _ => Err(EnumParseError::new("CustomMenuType", s)),
        }
    }
}

impl fmt::Display for CustomMenuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for CustomMenuType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// MENU ITEM TYPE
// ============================================================================

/// What a custom menu item points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MenuItemType {
    /// An xpage application, `source_item_id` holds the xpage id
    Xpage,
    /// A site page, `source_item_id` holds the page id
    Page,
    /// A free url
    ExternalUrl,
    /// Another custom menu, `source_item_id` holds the menu id
    Menu,
}

impl MenuItemType {
    /// All variants, in admin listing order.
    pub const ALL: [MenuItemType; 4] = [
        MenuItemType::Xpage,
        MenuItemType::Page,
        MenuItemType::ExternalUrl,
        MenuItemType::Menu,
    ];

    /// Convert to database string representation.
    pub fn as_db_str(&self) -> &'static str {
        match self {
            MenuItemType::Xpage => "xpage",
            MenuItemType::Page => "page",
            MenuItemType::ExternalUrl => "external_url",
            MenuItemType::Menu => "menu",
        }
    }

    /// Parse from database string representation.
    pub fn from_db_str(s: &str) -> Result<Self, EnumParseError> {
        match s {
            "xpage" => Ok(MenuItemType::Xpage),
            "page" => Ok(MenuItemType::Page),
            "external_url" => Ok(MenuItemType::ExternalUrl),
            "menu" => Ok(MenuItemType::Menu),
            _ => Err(EnumParseError::new("MenuItemType", s)),
        }
    }
}

impl fmt::Display for MenuItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_db_str())
    }
}

impl FromStr for MenuItemType {
    type Err = EnumParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db_str(s)
    }
}

// ============================================================================
// NATIVE MENU KIND
// ============================================================================

/// Flavors of menu derived from the page hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeMenuKind {
    /// Shallow navigation from the site root
    Main,
    /// Tree rooted at the current page
    Tree,
    /// Main navigation built over every page
    MainAllPages,
    /// Full tree built over every page
    TreeAllPages,
}

impl NativeMenuKind {
    /// Name used by the admin console when editing depth settings.
    pub fn admin_name(&self) -> &'static str {
        match self {
            NativeMenuKind::Main => "menuMain",
            NativeMenuKind::Tree => "menuTree",
            NativeMenuKind::MainAllPages => "menuMainAllPages",
            NativeMenuKind::TreeAllPages => "menuTreeAllPages",
        }
    }

    /// Parse the admin console name. Only the three editable kinds are accepted.
    pub fn from_admin_name(s: &str) -> Option<Self> {
        match s {
            "menuMain" => Some(NativeMenuKind::Main),
            "menuTree" => Some(NativeMenuKind::Tree),
            "menuTreeAllPages" => Some(NativeMenuKind::TreeAllPages),
            _ => None,
        }
    }

    /// Whether this flavor reads from the all-pages cache.
    pub fn is_all_pages(&self) -> bool {
        matches!(self, NativeMenuKind::MainAllPages | NativeMenuKind::TreeAllPages)
    }
}

// ============================================================================
// RENDER MODE
// ============================================================================

/// Rendering mode of the request, selects the site path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RenderMode {
    #[default]
    Site,
    Admin,
}

// ============================================================================
// PARSE ERROR
// ============================================================================

/// Error when parsing an invalid enum string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumParseError {
    pub enum_name: &'static str,
    pub value: String,
}

impl EnumParseError {
    fn new(enum_name: &'static str, value: &str) -> Self {
        Self {
            enum_name,
            value: value.to_string(),
        }
    }
}

impl fmt::Display for EnumParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid {}: {:?}", self.enum_name, self.value)
    }
}

impl std::error::Error for EnumParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_type_db_round_trip() {
        for ty in CustomMenuType::ALL {
            assert_eq!(CustomMenuType::from_db_str(ty.as_db_str()), Ok(ty));
        }
        assert!(CustomMenuType::from_db_str("Main").is_err());
    }

    #[test]
    fn test_item_type_db_round_trip() {
        for ty in MenuItemType::ALL {
            assert_eq!(ty.as_db_str().parse::<MenuItemType>(), Ok(ty));
        }
        let err = MenuItemType::from_db_str("").unwrap_err();
        assert_eq!(err.enum_name, "MenuItemType");
    }

    #[test]
    fn test_admin_names() {
        assert_eq!(
            NativeMenuKind::from_admin_name("menuTree"),
            Some(NativeMenuKind::Tree)
        );
        assert_eq!(NativeMenuKind::from_admin_name("menuMainAllPages"), None);
        assert_eq!(NativeMenuKind::from_admin_name("bogus"), None);
        assert!(NativeMenuKind::TreeAllPages.is_all_pages());
        assert!(!NativeMenuKind::Main.is_all_pages());
    }

    #[test]
    fn test_item_type_serde_names() {
        let json = serde_json::to_string(&MenuItemType::ExternalUrl).unwrap();
        assert_eq!(json, "\"external_url\"");
    }
}
