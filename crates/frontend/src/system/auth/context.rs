use contracts::system::admins::Admin;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api;
use crate::shared::api::{use_api, ApiClient};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub token: Option<String>,
    pub admin: Option<Admin>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Auth context provider component
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let client = use_api();
    let auth_state = RwSignal::new(AuthState {
        token: client.session().token(),
        admin: None,
    });
    provide_context(auth_state);

    // Fill in the profile of a restored session; a rejected token signs out
    if auth_state.with_untracked(|s| s.is_authenticated()) {
        spawn_local(async move {
            match api::fetch_profile(&client).await {
                Ok(Some(admin)) => auth_state.update(|s| s.admin = Some(admin)),
                Ok(None) => {
                    log::info!("Stored session expired");
                    client.session().clear();
                    auth_state.set(AuthState::default());
                }
                Err(e) => log::warn!("Could not load profile: {}", e),
            }
        });
    }

    children()
}

/// Hook to access auth state
pub fn use_auth() -> RwSignal<AuthState> {
    use_context::<RwSignal<AuthState>>().expect("AuthProvider not found in component tree")
}

/// Sign in and remember the token
pub async fn do_login(
    client: ApiClient,
    auth_state: RwSignal<AuthState>,
    email: String,
    password: String,
) -> Result<(), String> {
    let response = api::login(&client, email, password).await?;
    client.session().set_token(&response.token);
    auth_state.set(AuthState {
        token: Some(response.token),
        admin: response.admin,
    });
    Ok(())
}

pub fn do_logout(client: &ApiClient, auth_state: RwSignal<AuthState>) {
    client.session().clear();
    auth_state.set(AuthState::default());
}
