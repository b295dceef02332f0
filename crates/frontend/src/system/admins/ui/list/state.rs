use contracts::system::admins::Admin;
use leptos::prelude::*;

#[derive(Clone, Debug)]
pub struct AdminsListState {
    pub items: Vec<Admin>,
    pub search_query: String,
    pub sort_field: String,
    pub sort_ascending: bool,
    pub total_count: usize,
    pub is_loaded: bool,
}

impl Default for AdminsListState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search_query: String::new(),
            sort_field: "name".to_string(),
            sort_ascending: true,
            total_count: 0,
            is_loaded: false,
        }
    }
}

pub fn create_state() -> RwSignal<AdminsListState> {
    RwSignal::new(AdminsListState::default())
}
