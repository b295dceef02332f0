use contracts::system::admins::is_valid_email;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api::use_api;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::auth::context::{do_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let client = use_api();
    let auth_state = use_auth();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let submit = Callback::new(move |_: ()| {
        let email_val = email.get_untracked().trim().to_string();
        let password_val = password.get_untracked();

        if !is_valid_email(&email_val) {
            set_error_message.set(Some("Enter a valid email address".to_string()));
            return;
        }
        if password_val.is_empty() {
            set_error_message.set(Some("Password is required".to_string()));
            return;
        }

        set_is_loading.set(true);
        set_error_message.set(None);

        let client = client.clone();
        spawn_local(async move {
            // success swaps the login screen for the shell
            if let Err(e) = do_login(client, auth_state, email_val, password_val).await {
                set_error_message.set(Some(format!("Login failed: {}", e)));
            }
            set_is_loading.set(false);
        });
    });

    view! {
        <PageFrame page_id="sys_login--system" category=PAGE_CAT_SYSTEM>
            <div class="login-container">
                <div
                    class="login-box"
                    on:keydown=move |ev: leptos::ev::KeyboardEvent| {
                        if ev.key() == "Enter" {
                            submit.run(());
                        }
                    }
                >
                    <h1>"Estate Admin"</h1>
                    <h2>"Sign in"</h2>

                    <Show when=move || error_message.get().is_some()>
                        <div class="alert alert--error">
                            {move || error_message.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <Flex vertical=true gap=FlexGap::Medium>
                        <Label>"Email"</Label>
                        <Input value=email input_type=InputType::Email placeholder="admin@example.com" />
                        <Label>"Password"</Label>
                        <Input value=password input_type=InputType::Password />
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| submit.run(())
                            disabled=Signal::derive(move || is_loading.get())
                        >
                            {move || if is_loading.get() { "Signing in..." } else { "Sign in" }}
                        </Button>
                    </Flex>
                </div>
            </div>
        </PageFrame>
    }
}
