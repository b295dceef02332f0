//! Left navigation: one item per page plus the signed-in admin and logout.

use leptos::prelude::*;

use crate::layout::global_context::{use_global_context, Page};
use crate::shared::api::use_api;
use crate::shared::icons::icon;
use crate::system::auth::context::{do_logout, use_auth};

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();
    let auth_state = use_auth();
    let client = use_api();

    let logout = move |_| {
        log::info!("Signing out");
        do_logout(&client, auth_state);
    };

    let profile = move || {
        auth_state.with(|s| {
            s.admin
                .as_ref()
                .map(|a| (a.name.clone(), a.role.display_name()))
        })
    };

    view! {
        <nav class="app-sidebar" class:app-sidebar--collapsed=move || !ctx.left_open.get()>
            <div class="app-sidebar__brand">
                <button class="app-sidebar__toggle" title="Toggle menu" on:click=move |_| ctx.toggle_left()>
                    {icon("menu")}
                </button>
                <span class="app-sidebar__title">"Estate Admin"</span>
            </div>

            <div class="app-sidebar__content">
                {Page::ALL
                    .into_iter()
                    .map(|page| {
                        view! {
                            <Show when=move || auth_state.with(|s| page.visible_to(s.admin.as_ref()))>
                                <div
                                    class="app-sidebar__item"
                                    class:app-sidebar__item--active=move || ctx.active.get() == page
                                    on:click=move |_| ctx.navigate(page)
                                >
                                    <div class="app-sidebar__item-content">
                                        {icon(page.icon())}
                                        <span>{page.label()}</span>
                                    </div>
                                </div>
                            </Show>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="app-sidebar__footer">
                {move || profile().map(|(name, role)| view! {
                    <div class="app-sidebar__profile">
                        <span class="app-sidebar__profile-name">{name}</span>
                        <span class="app-sidebar__profile-role">{role}</span>
                    </div>
                })}
                <button class="app-sidebar__item app-sidebar__logout" on:click=logout>
                    <div class="app-sidebar__item-content">
                        {icon("logout")}
                        <span>"Log out"</span>
                    </div>
                </button>
            </div>
        </nav>
    }
}
