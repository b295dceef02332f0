/// Search, sort and header helpers shared by the list pages
use gloo_timers::future::TimeoutFuture;
use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Row type that can be narrowed by the search box
pub trait Searchable {
    /// `filter` is already trimmed and lowercased
    fn matches_filter(&self, filter: &str) -> bool;
}

/// Row type that can be ordered by a named column
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Case-insensitive `contains` over a handful of fields
pub fn any_field_contains(fields: &[&str], filter: &str) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(filter))
}

pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

pub fn filter_list<T: Searchable>(items: Vec<T>, filter: &str) -> Vec<T> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return items;
    }
    items
        .into_iter()
        .filter(|item| item.matches_filter(&needle))
        .collect()
}

/// Search box that reports its value after the user stops typing
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    #[prop(into)] on_change: Callback<String>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "Search...".to_string());
    let input_value = RwSignal::new(value.get_untracked());
    // bumped on every keystroke; a pending report fires only if still current
    let generation = StoredValue::new(0u64);

    let handle_input = move |text: String| {
        input_value.set(text.clone());
        generation.update_value(|g| *g += 1);
        let ticket = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.try_get_value() == Some(ticket) {
                on_change.run(text);
            }
        });
    };

    let clear = move |_| {
        generation.update_value(|g| *g += 1);
        input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=move || !value.get().trim().is_empty()>
            <span class="search-input__icon">{crate::shared::icons::icon("search")}</span>
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" title="Clear" on:click=clear>
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

/// Arrow shown next to a sortable column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

/// Header click handler: same column flips direction, another column sorts ascending
pub fn create_sort_toggle(
    field: &'static str,
    sort_field: RwSignal<String>,
    sort_ascending: RwSignal<bool>,
) -> impl Fn(MouseEvent) + Copy + 'static {
    move |_| {
        if sort_field.get_untracked() == field {
            sort_ascending.update(|v| *v = !*v);
        } else {
            sort_field.set(field.to_string());
            sort_ascending.set(true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        name: &'static str,
        email: &'static str,
    }

    impl Searchable for Row {
        fn matches_filter(&self, filter: &str) -> bool {
            any_field_contains(&[self.name, self.email], filter)
        }
    }

    impl Sortable for Row {
        fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
            match field {
                "email" => self.email.cmp(other.email),
                _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            }
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { name: "Maya", email: "maya@estate.io" },
            Row { name: "anton", email: "a.k@mail.com" },
            Row { name: "Zoe", email: "zoe@estate.io" },
        ]
    }

    #[test]
    fn test_filter_list() {
        assert_eq!(filter_list(rows(), "ESTATE").len(), 2);
        assert_eq!(filter_list(rows(), "  ").len(), 3);
        assert_eq!(filter_list(rows(), "anton")[0].email, "a.k@mail.com");
    }

    #[test]
    fn test_sort_list() {
        let mut items = rows();
        sort_list(&mut items, "name", true);
        let names: Vec<_> = items.iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["anton", "Maya", "Zoe"]);

        sort_list(&mut items, "email", false);
        assert_eq!(items[0].name, "Zoe");
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("name", "name", true), " ▲");
        assert_eq!(get_sort_indicator("name", "name", false), " ▼");
        assert_eq!(get_sort_indicator("email", "name", true), " ⇅");
    }
}
