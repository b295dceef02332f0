use leptos::ev;
use leptos::html::Div;
use leptos::portal::Portal;
use leptos::prelude::*;
use wasm_bindgen::JsCast;

use super::placement::{compute_dropdown_placement, AnchorRect, DropdownPlacement, ViewportSize};
use super::state::{
    filter_options, remove_value, selected_options, toggle_value, unresolved_count, DropdownState,
    KeyOutcome, NavKey,
};
use super::traits::SelectOption;
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;

const DEFAULT_PANEL_HEIGHT: f64 = 250.0;

fn viewport_size() -> ViewportSize {
    let Some(window) = web_sys::window() else {
        return ViewportSize::default();
    };
    let dimension = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    ViewportSize {
        width: dimension(window.inner_width()),
        height: dimension(window.inner_height()),
    }
}

fn contains_node(container: Option<web_sys::HtmlDivElement>, target: &web_sys::Node) -> bool {
    container.map(|el| el.contains(Some(target))).unwrap_or(false)
}

/// Searchable multi-value picker (controlled).
///
/// The control never edits `value` itself; every change goes through
/// `on_change`. Selected keys without a matching option are kept and shown as
/// a "+N more" counter until the options arrive.
#[component]
pub fn MultiSelect<O>(
    /// Available options
    options: Signal<Vec<O>>,
    /// Selected keys in selection order
    #[prop(into)]
    value: Signal<Vec<O::Key>>,
    on_change: Callback<Vec<O::Key>>,
    #[prop(optional, into)]
    placeholder: Option<String>,
    #[prop(optional, into)]
    disabled: MaybeProp<bool>,
) -> impl IntoView
where
    O: SelectOption + Clone + Send + Sync + 'static,
{
    let placeholder = placeholder.unwrap_or_else(|| "Search...".to_string());
    let is_disabled = move || disabled.get().unwrap_or(false);
    let panel_height = use_context::<AppConfig>()
        .map(|c| c.ui.dropdown_panel_height)
        .unwrap_or(DEFAULT_PANEL_HEIGHT);

    let dropdown = RwSignal::new(DropdownState::default());
    let placement = RwSignal::new(None::<DropdownPlacement>);
    let control_ref = NodeRef::<Div>::new();
    let panel_ref = NodeRef::<Div>::new();

    let reposition = move || {
        if !dropdown.with_untracked(|d| d.open) {
            return;
        }
        let Some(el) = control_ref.get_untracked() else {
            return;
        };
        let rect = el.get_bounding_client_rect();
        let anchor = AnchorRect {
            top: rect.top(),
            bottom: rect.bottom(),
            left: rect.left(),
            width: rect.width(),
        };
        placement.set(Some(compute_dropdown_placement(
            anchor,
            viewport_size(),
            panel_height,
        )));
    };

    Effect::new(move |_| {
        if dropdown.with(|d| d.open) {
            reposition();
        }
    });

    let on_scroll = window_event_listener(ev::scroll, move |_| reposition());
    let on_resize = window_event_listener(ev::resize, move |_| reposition());
    let on_pointer_down = window_event_listener(ev::pointerdown, move |event| {
        if !dropdown.with_untracked(|d| d.open) {
            return;
        }
        let Some(target) = event
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Node>().ok())
        else {
            return;
        };
        let inside = contains_node(control_ref.get_untracked(), &target)
            || contains_node(panel_ref.get_untracked(), &target);
        if !inside {
            dropdown.update(|d| d.close());
        }
    });
    on_cleanup(move || {
        on_scroll.remove();
        on_resize.remove();
        on_pointer_down.remove();
    });

    let visible = move || -> Vec<(O::Key, String)> {
        let query = dropdown.with(|d| d.query.clone());
        options.with(|opts| {
            filter_options(opts, &query)
                .into_iter()
                .map(|o| (o.option_key(), o.option_label()))
                .collect()
        })
    };

    let toggle = move |key: O::Key| {
        on_change.run(toggle_value(&value.get_untracked(), &key));
    };

    let handle_keydown = move |event: ev::KeyboardEvent| {
        let Some(key) = NavKey::from_key(&event.key()) else {
            return;
        };
        let shown = visible();
        let outcome = dropdown
            .try_update(|d| d.handle_key(key, shown.len()))
            .unwrap_or(KeyOutcome::Ignored);
        if outcome.consumed() {
            event.prevent_default();
        }
        if outcome.stops_propagation() {
            event.stop_propagation();
        }
        if let KeyOutcome::Toggle(index) = outcome {
            if let Some((key, _)) = shown.into_iter().nth(index) {
                toggle(key);
            }
        }
    };

    let clear_all = move || {
        on_change.run(Vec::new());
        dropdown.update(|d| d.clear_query());
    };

    view! {
        <div
            class="multi-select"
            class:multi-select--open=move || dropdown.with(|d| d.open)
            class:multi-select--disabled=is_disabled
            node_ref=control_ref
        >
            <div class="multi-select__control" on:click=move |_| {
                if !disabled.get_untracked().unwrap_or(false) {
                    dropdown.update(|d| d.open());
                }
            }>
                {move || {
                    let chips: Vec<(O::Key, String)> = options.with(|opts| {
                        value.with(|selected| {
                            selected_options(opts, selected)
                                .into_iter()
                                .map(|o| (o.option_key(), o.option_label()))
                                .collect()
                        })
                    });
                    chips
                        .into_iter()
                        .map(|(key, label)| {
                            view! {
                                <span class="multi-select__chip">
                                    <span class="multi-select__chip-label">{label}</span>
                                    <button
                                        type="button"
                                        class="multi-select__chip-remove"
                                        on:click=move |event| {
                                            event.stop_propagation();
                                            on_change.run(remove_value(&value.get_untracked(), &key));
                                        }
                                    >
                                        {icon("x")}
                                    </button>
                                </span>
                            }
                        })
                        .collect_view()
                }}
                {move || {
                    let missing = options.with(|opts| value.with(|selected| unresolved_count(opts, selected)));
                    (missing > 0).then(|| view! {
                        <span class="multi-select__more">{format!("+{} more (loading...)", missing)}</span>
                    })
                }}
                <input
                    type="text"
                    class="multi-select__search"
                    placeholder=placeholder
                    disabled=is_disabled
                    prop:value=move || dropdown.with(|d| d.query.clone())
                    on:input=move |event| {
                        let query = event_target_value(&event);
                        dropdown.update(|d| d.set_query(query));
                    }
                    on:focus=move |_| dropdown.update(|d| d.open())
                    on:keydown=handle_keydown
                />
                <Show when=move || value.with(|v| !v.is_empty()) || dropdown.with(|d| !d.query.is_empty())>
                    <button
                        type="button"
                        class="multi-select__clear"
                        title="Clear"
                        on:click=move |event| {
                            event.stop_propagation();
                            clear_all();
                        }
                    >
                        {icon("x")}
                    </button>
                </Show>
            </div>

            <Show when=move || dropdown.with(|d| d.open)>
                <Portal>
                    <div
                        class="multi-select__panel"
                        class:multi-select__panel--above=move || {
                            placement.with(|p| p.map(|p| p.position_above()).unwrap_or(false))
                        }
                        style=move || placement.with(|p| p.map(|p| p.to_style()).unwrap_or_default())
                        node_ref=panel_ref
                    >
                        {move || {
                            let shown = visible();
                            if shown.is_empty() {
                                return view! { <div class="multi-select__empty">"No matches"</div> }.into_any();
                            }
                            let highlighted = dropdown.with(|d| d.highlighted);
                            shown
                                .into_iter()
                                .enumerate()
                                .map(|(index, (key, label))| {
                                    let is_selected = value.with(|v| v.contains(&key));
                                    view! {
                                        <div
                                            class="multi-select__option"
                                            class:multi-select__option--highlighted=highlighted == Some(index)
                                            class:multi-select__option--selected=is_selected
                                            on:mousedown=move |event| event.prevent_default()
                                            on:click=move |_| toggle(key.clone())
                                        >
                                            <span class="multi-select__check">
                                                {is_selected.then(|| icon("check"))}
                                            </span>
                                            {label}
                                        </div>
                                    }
                                })
                                .collect_view()
                                .into_any()
                        }}
                    </div>
                </Portal>
            </Show>
        </div>
    }
}
