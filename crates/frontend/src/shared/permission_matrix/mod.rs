//! Resource × action grid over a sparse list of permission records.
//!
//! Cells and the row switch are on/off toggles. A column header only adds its
//! action to every resource; it never removes it.

use contracts::system::permissions::{
    granted_count, has_permission, is_column_full, is_row_full, toggle_cell, toggle_column,
    toggle_row, Action, PermissionRecord, Resource,
};
use leptos::prelude::*;

#[component]
pub fn PermissionMatrix(
    #[prop(into)] value: Signal<Vec<PermissionRecord>>,
    on_change: Callback<Vec<PermissionRecord>>,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
) -> impl IntoView {
    let is_disabled = move || disabled.get().unwrap_or(false);

    let commit = move |next: Vec<PermissionRecord>| {
        if !disabled.get_untracked().unwrap_or(false) {
            on_change.run(next);
        }
    };

    view! {
        <div class="permission-matrix">
            <table class="permission-matrix__table">
                <thead>
                    <tr>
                        <th class="permission-matrix__resource-header">"Resource"</th>
                        {Action::ALL
                            .into_iter()
                            .map(|action| {
                                view! {
                                    <th>
                                        <button
                                            type="button"
                                            class="permission-matrix__column-toggle"
                                            class:permission-matrix__column-toggle--full=move || {
                                                value.with(|r| is_column_full(r, action))
                                            }
                                            title=format!("Grant {} on every resource", action.display_name())
                                            disabled=is_disabled
                                            on:click=move |_| commit(value.with_untracked(|r| toggle_column(r, action)))
                                        >
                                            {action.display_name()}
                                        </button>
                                    </th>
                                }
                            })
                            .collect_view()}
                        <th>"All"</th>
                    </tr>
                </thead>
                <tbody>
                    {Resource::ALL
                        .into_iter()
                        .map(|resource| {
                            view! {
                                <tr class:permission-matrix__row--full=move || value.with(|r| is_row_full(r, resource))>
                                    <td class="permission-matrix__resource">{resource.display_name()}</td>
                                    {Action::ALL
                                        .into_iter()
                                        .map(|action| {
                                            view! {
                                                <td class="permission-matrix__cell">
                                                    <input
                                                        type="checkbox"
                                                        aria-label=format!("{} {}", resource.display_name(), action.code())
                                                        prop:checked=move || value.with(|r| has_permission(r, resource, action))
                                                        disabled=is_disabled
                                                        on:change=move |_| commit(value.with_untracked(|r| toggle_cell(r, resource, action)))
                                                    />
                                                </td>
                                            }
                                        })
                                        .collect_view()}
                                    <td class="permission-matrix__cell permission-matrix__cell--row">
                                        <input
                                            type="checkbox"
                                            aria-label=format!("All {} permissions", resource.display_name())
                                            prop:checked=move || value.with(|r| is_row_full(r, resource))
                                            disabled=is_disabled
                                            on:change=move |_| commit(value.with_untracked(|r| toggle_row(r, resource)))
                                        />
                                    </td>
                                </tr>
                            }
                        })
                        .collect_view()}
                </tbody>
            </table>
            <div class="permission-matrix__summary">
                {move || format!("{} permissions granted", value.with(|r| granted_count(r)))}
            </div>
        </div>
    }
}
