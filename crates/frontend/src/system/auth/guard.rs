use leptos::prelude::*;

use super::context::use_auth;

/// Renders children only while a session token is present
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated())
            fallback=|| view! { <div class="alert alert--error">"Not authenticated. Please sign in."</div> }
        >
            {children()}
        </Show>
    }
}
