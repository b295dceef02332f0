use contracts::system::admins::{Admin, AdminRole, CreateAdminDto, UpdateAdminDto};
use contracts::system::permissions::PermissionRecord;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api::use_api;
use crate::shared::modal::Modal;
use crate::shared::notifications::use_notifications;
use crate::shared::permission_matrix::PermissionMatrix;
use crate::system::admins::api;

fn role_code(role: AdminRole) -> &'static str {
    match role {
        AdminRole::SuperAdmin => "super_admin",
        AdminRole::Admin => "admin",
    }
}

fn role_from_code(code: &str) -> AdminRole {
    match code {
        "super_admin" => AdminRole::SuperAdmin,
        _ => AdminRole::Admin,
    }
}

/// Create (`admin = None`) or edit form for an admin account
#[component]
pub fn AdminForm(
    admin: Option<Admin>,
    on_close: Callback<()>,
    on_saved: Callback<()>,
) -> impl IntoView {
    let client = use_api();
    let notify = use_notifications();

    let editing_id = admin.as_ref().map(|a| a.id.clone());
    let is_edit = editing_id.is_some();
    let title = match &admin {
        Some(a) => format!("Edit admin: {}", a.name),
        None => "New admin".to_string(),
    };

    let name = RwSignal::new(admin.as_ref().map(|a| a.name.clone()).unwrap_or_default());
    let email = RwSignal::new(admin.as_ref().map(|a| a.email.clone()).unwrap_or_default());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new(admin.as_ref().map(|a| a.role).unwrap_or_default());
    let is_active = RwSignal::new(admin.as_ref().map(|a| a.is_active).unwrap_or(true));
    let permissions: RwSignal<Vec<PermissionRecord>> = RwSignal::new(
        admin
            .as_ref()
            .map(|a| a.normalized_permissions())
            .unwrap_or_default(),
    );
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let save = move |_| {
        let password_val = password.get_untracked();
        let result = match editing_id.clone() {
            None => {
                let dto = CreateAdminDto {
                    name: name.get_untracked().trim().to_string(),
                    email: email.get_untracked().trim().to_string(),
                    password: password_val,
                    role: role.get_untracked(),
                    permissions: permissions.get_untracked(),
                };
                dto.validate().map(|_| SaveRequest::Create(dto))
            }
            Some(id) => {
                let dto = UpdateAdminDto {
                    id,
                    name: name.get_untracked().trim().to_string(),
                    email: email.get_untracked().trim().to_string(),
                    role: role.get_untracked(),
                    permissions: permissions.get_untracked(),
                    is_active: is_active.get_untracked(),
                    password: (!password_val.is_empty()).then_some(password_val),
                };
                dto.validate().map(|_| SaveRequest::Update(dto))
            }
        };

        let request = match result {
            Ok(request) => request,
            Err(e) => {
                set_error.set(Some(e.to_string()));
                return;
            }
        };

        set_error.set(None);
        set_saving.set(true);
        let client = client.clone();
        spawn_local(async move {
            let (outcome, done_message) = match &request {
                SaveRequest::Create(dto) => (api::create_admin(&client, dto).await, "Admin created"),
                SaveRequest::Update(dto) => (api::update_admin(&client, dto).await, "Admin updated"),
            };
            set_saving.set(false);
            match outcome {
                Ok(()) => {
                    notify.success(done_message);
                    on_saved.run(());
                }
                Err(e) => {
                    notify.error(format!("Failed to save admin: {}", e));
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close modal_class="admin-form">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="form-grid">
                <div class="form-group">
                    <Label>"Name *"</Label>
                    <Input value=name placeholder="Full name" />
                </div>
                <div class="form-group">
                    <Label>"Email *"</Label>
                    <Input value=email input_type=InputType::Email placeholder="name@example.com" />
                </div>
                <div class="form-group">
                    <Label>{if is_edit { "New password" } else { "Password *" }}</Label>
                    <Input
                        value=password
                        input_type=InputType::Password
                        placeholder=if is_edit { "Leave empty to keep current" } else { "At least 6 characters" }
                    />
                </div>
                <div class="form-group">
                    <Label>"Role"</Label>
                    <select
                        class="form-select"
                        prop:value=move || role_code(role.get())
                        on:change=move |ev| role.set(role_from_code(&event_target_value(&ev)))
                    >
                        <option value="admin">{AdminRole::Admin.display_name()}</option>
                        <option value="super_admin">{AdminRole::SuperAdmin.display_name()}</option>
                    </select>
                </div>
                <Show when=move || is_edit>
                    <div class="form-group">
                        <Checkbox checked=is_active label="Active" />
                    </div>
                </Show>
            </div>

            <div class="form-section">
                <h3 class="form-section__title">"Permissions"</h3>
                <Show when=move || role.get() == AdminRole::SuperAdmin>
                    <div class="alert alert--info">"Super admins have full access; the matrix below is kept for when the role changes."</div>
                </Show>
                <PermissionMatrix
                    value=permissions
                    on_change=Callback::new(move |next| permissions.set(next))
                    disabled=Signal::derive(move || saving.get())
                />
            </div>

            <div class="modal-footer">
                <Button
                    appearance=ButtonAppearance::Secondary
                    on_click=move |_| on_close.run(())
                    disabled=Signal::derive(move || saving.get())
                >
                    "Cancel"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=save
                    disabled=Signal::derive(move || saving.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Modal>
    }
}

enum SaveRequest {
    Create(CreateAdminDto),
    Update(UpdateAdminDto),
}
