use contracts::system::admins::Admin;
use contracts::system::permissions::{Action, Resource};
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

const PAGE_PARAM: &str = "page";

/// Screens reachable from the sidebar
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Page {
    Admins,
    #[default]
    Buyers,
    Documents,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::Buyers, Page::Documents, Page::Admins];

    pub fn code(&self) -> &'static str {
        match self {
            Page::Admins => "admins",
            Page::Buyers => "buyers",
            Page::Documents => "documents",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.code() == code)
    }

    pub fn label(&self) -> &'static str {
        match self {
            Page::Admins => "Admins",
            Page::Buyers => "Buyers",
            Page::Documents => "Documents",
        }
    }

    pub fn icon(&self) -> &'static str {
        self.code()
    }

    pub fn resource(&self) -> Resource {
        match self {
            Page::Admins => Resource::Admins,
            Page::Buyers => Resource::Buyers,
            Page::Documents => Resource::Documents,
        }
    }

    /// Pages stay visible until the profile is known; the server enforces access anyway
    pub fn visible_to(&self, admin: Option<&Admin>) -> bool {
        admin.map_or(true, |a| a.can(self.resource(), Action::Read))
    }
}

/// Reads `?page=...`; unknown or missing values give `None`
pub fn page_from_query(search: &str) -> Option<Page> {
    let params: HashMap<String, String> =
        serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
    params.get(PAGE_PARAM).and_then(|code| Page::from_code(code))
}

pub fn query_for(page: Page) -> String {
    let params = HashMap::from([(PAGE_PARAM.to_string(), page.code().to_string())]);
    format!("?{}", serde_qs::to_string(&params).unwrap_or_default())
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl Default for AppGlobalContext {
    fn default() -> Self {
        Self::new()
    }
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::default()),
            left_open: RwSignal::new(true),
        }
    }

    /// Picks the page from the current URL, then mirrors every switch back into it
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        if let Some(page) = page_from_query(&search) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let new_url = query_for(this.active.get());
            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();
            if current_search == new_url {
                return;
            }
            if let Some(history) = window().and_then(|w| w.history().ok()) {
                if history
                    .replace_state_with_url(&wasm_bindgen::JsValue::NULL, "", Some(&new_url))
                    .is_err()
                {
                    log::warn!("Failed to update URL to {}", new_url);
                }
            }
        });
    }

    pub fn navigate(&self, page: Page) {
        log::debug!("navigate: {}", page.code());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext context not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_codes_round_trip_through_the_query() {
        for page in Page::ALL {
            assert_eq!(page_from_query(&query_for(page)), Some(page));
        }
        assert_eq!(query_for(Page::Admins), "?page=admins");
    }

    #[test]
    fn unknown_or_missing_page_is_ignored() {
        assert_eq!(page_from_query(""), None);
        assert_eq!(page_from_query("?page=reports"), None);
        assert_eq!(page_from_query("?tab=admins"), None);
        assert_eq!(page_from_query("?page=documents&x=1"), Some(Page::Documents));
    }

    #[test]
    fn pages_are_visible_before_the_profile_loads() {
        assert!(Page::Admins.visible_to(None));
    }
}
