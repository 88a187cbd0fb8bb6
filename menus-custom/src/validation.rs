//! Item form validation.
//!
//! Field sizes are checked first, then the per-type rules: what a link of
//! each type needs before it can be stored.

use menus_core::{CustomMenuItemInput, EntityIdType, MenuItemType, ValidationError};

pub const LABEL_MAX_LEN: usize = 50;
pub const URL_MAX_LEN: usize = 500;

/// Validator for custom menu item forms.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemValidator;

impl ItemValidator {
    pub fn new() -> Self {
        Self
    }

    /// All violations of an item form. An empty list means it can be stored.
    pub fn validate(&self, input: &CustomMenuItemInput) -> Vec<ValidationError> {
        let mut violations = field_sizes(input);
        violations.extend(self.validate_semantics(input));
        violations
    }

    /// Per-type rules only.
    ///
    /// A missing parent menu is reported alone: nothing else is checked
    /// until the item is attached somewhere.
    pub fn validate_semantics(&self, input: &CustomMenuItemInput) -> Vec<ValidationError> {
        if input.parent_menu_id.as_i32() <= 0 {
            return vec![ValidationError::invalid(
                "parentMenu",
                "an item must belong to an existing menu",
            )];
        }

        let raw_type = match input.item_type.as_deref().map(str::trim) {
            None | Some("") => return vec![ValidationError::required("type")],
            Some(raw) => raw,
        };
        let item_type = match MenuItemType::from_db_str(raw_type) {
            Ok(t) => t,
            Err(_) => {
                return vec![ValidationError::PatternMismatch {
                    field: "type".to_string(),
                    pattern: MenuItemType::ALL
                        .iter()
                        .map(|t| t.as_db_str())
                        .collect::<Vec<_>>()
                        .join("|"),
                }]
            }
        };

        let mut violations = Vec::new();
        if item_type == MenuItemType::Menu && is_blank(input.source_item_id.as_deref()) {
            violations.push(ValidationError::required("subMenu"));
        }
        if input.label.trim().is_empty() {
            match item_type {
                MenuItemType::Page if input.is_label_dynamic => {}
                MenuItemType::Page => violations.push(ValidationError::required("pageLabel")),
                _ => violations.push(ValidationError::required("label")),
            }
        }
        if input.url.trim().is_empty() {
            violations.push(ValidationError::required("url"));
        }
        violations
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

fn field_sizes(input: &CustomMenuItemInput) -> Vec<ValidationError> {
    [
        ("label", input.label.trim(), LABEL_MAX_LEN),
        ("url", input.url.trim(), URL_MAX_LEN),
    ]
    .into_iter()
    .filter_map(|(field, value, max)| {
        let len = value.chars().count();
        (len > max).then(|| ValidationError::TooLong {
            field: field.to_string(),
            len,
            max,
        })
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use menus_core::MenuId;

    fn form(item_type: &str) -> CustomMenuItemInput {
        CustomMenuItemInput {
            parent_menu_id: MenuId::new(1),
            item_type: Some(item_type.to_string()),
            source_item_id: None,
            is_label_dynamic: false,
            is_blank: false,
            label: "Home".to_string(),
            url: "/home".to_string(),
        }
    }

    fn fields(violations: &[ValidationError]) -> Vec<&str> {
        violations.iter().filter_map(|v| v.field()).collect()
    }

    #[test]
    fn test_complete_link_forms_pass() {
        let validator = ItemValidator::new();
        for ty in ["xpage", "page", "external_url"] {
            assert!(validator.validate(&form(ty)).is_empty(), "{} should pass", ty);
        }
        let menu = CustomMenuItemInput {
            source_item_id: Some("4".to_string()),
            ..form("menu")
        };
        assert!(validator.validate(&menu).is_empty());
    }

    #[test]
    fn test_missing_parent_is_reported_alone() {
        let input = CustomMenuItemInput {
            parent_menu_id: MenuId::new(0),
            label: String::new(),
            url: String::new(),
            ..form("page")
        };
        assert_eq!(fields(&ItemValidator::new().validate(&input)), vec!["parentMenu"]);
    }

    #[test]
    fn test_page_label_may_be_blank_when_dynamic() {
        let validator = ItemValidator::new();
        let mut input = CustomMenuItemInput {
            label: "  ".to_string(),
            ..form("page")
        };
        assert_eq!(fields(&validator.validate(&input)), vec!["pageLabel"]);

        input.is_label_dynamic = true;
        assert!(validator.validate(&input).is_empty());

        let xpage = CustomMenuItemInput {
            label: String::new(),
            is_label_dynamic: true,
            ..form("xpage")
        };
        assert_eq!(fields(&validator.validate(&xpage)), vec!["label"]);
    }

    #[test]
    fn test_menu_items_need_a_sub_menu() {
        let input = CustomMenuItemInput {
            source_item_id: Some(" ".to_string()),
            url: String::new(),
            ..form("menu")
        };
        assert_eq!(
            fields(&ItemValidator::new().validate(&input)),
            vec!["subMenu", "url"]
        );
    }

    #[test]
    fn test_missing_or_unknown_type() {
        let validator = ItemValidator::new();
        let missing = CustomMenuItemInput {
            item_type: None,
            ..form("page")
        };
        assert_eq!(validator.validate(&missing), vec![ValidationError::required("type")]);

        let unknown = validator.validate(&form("folder"));
        assert!(matches!(
            &unknown[0],
            ValidationError::PatternMismatch { field, .. } if field == "type"
        ));
    }

    #[test]
    fn test_field_sizes_are_checked_with_semantics() {
        let input = CustomMenuItemInput {
            label: "x".repeat(LABEL_MAX_LEN + 1),
            url: String::new(),
            ..form("external_url")
        };
        assert_eq!(
            fields(&ItemValidator::new().validate(&input)),
            vec!["label", "url"]
        );
    }
}
