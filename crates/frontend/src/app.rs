use std::sync::Arc;

use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api::{ApiClient, FetchTransport};
use crate::shared::api_utils::resolve_api_base;
use crate::shared::config::AppConfig;
use crate::shared::confirm::{ConfirmHost, ConfirmService};
use crate::shared::notifications::{NotificationHost, NotificationService};
use crate::system::auth::context::AuthProvider;
use crate::system::auth::LocalStorageSession;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::load();

    let base_url = resolve_api_base(&config.api.base_url);
    log::info!("API base: {}", base_url);
    let client = ApiClient::new(
        base_url,
        Arc::new(LocalStorageSession::new(config.api.token_key.clone())),
        Arc::new(FetchTransport),
    );

    provide_context(NotificationService::new(config.ui.notification_ttl_ms));
    provide_context(ConfirmService::new());
    provide_context(AppGlobalContext::new());
    provide_context(client);
    provide_context(config);

    view! {
        <AuthProvider>
            <AppRoutes />
        </AuthProvider>
        <ConfirmHost />
        <NotificationHost />
    }
}
