//! Page category constants.
//!
//! Every page declares an HTML `id` in the format `{entity}--{category}`
//! (e.g. `"a004_buyer--list"`) and a `data-page-category` with one of the
//! constants below, so a DOM id copied from the inspector leads straight to
//! the module that renders it.

/// List of records: table with search and actions.
pub const PAGE_CAT_LIST: &str = "list";

/// Detail / edit form for a single record.
pub const PAGE_CAT_DETAIL: &str = "detail";

/// System administration page (admins, login).
pub const PAGE_CAT_SYSTEM: &str = "system";

pub const ALL_CATEGORIES: &[&str] = &[PAGE_CAT_LIST, PAGE_CAT_DETAIL, PAGE_CAT_SYSTEM];

/// Validate that a page id matches the `{entity}--{category}` format.
pub fn is_valid_page_id(id: &str) -> bool {
    match id.split_once("--") {
        Some((entity, category)) => !entity.is_empty() && !category.is_empty(),
        None => false,
    }
}

pub fn is_known_category(cat: &str) -> bool {
    ALL_CATEGORIES.contains(&cat)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_ids() {
        assert!(is_valid_page_id("a004_buyer--list"));
        assert!(is_valid_page_id("sys_admins--list"));
        assert!(!is_valid_page_id("a004_buyer"));
        assert!(!is_valid_page_id("--list"));
        assert!(!is_valid_page_id("a004_buyer--"));
    }

    #[test]
    fn test_known_categories() {
        assert!(is_known_category(PAGE_CAT_SYSTEM));
        assert!(!is_known_category("dashboard"));
    }
}
