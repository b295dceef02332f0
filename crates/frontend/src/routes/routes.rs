use crate::layout::global_context::use_global_context;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;

#[component]
fn MainLayout() -> impl IntoView {
    // Runs once per sign-in: the URL decides the first page
    use_global_context().init_router_integration();

    view! { <Shell /> }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let auth_state = use_auth();

    view! {
        <Show
            when=move || auth_state.with(|s| s.is_authenticated())
            fallback=|| view! { <LoginPage /> }
        >
            <MainLayout />
        </Show>
    }
}
