use contracts::domain::a004_buyer::{Buyer, CreateBuyerDto, PropertyAssignment, UpdateBuyerDto};
use contracts::system::admins::is_valid_email;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::assignment::PropertyAssignmentForm;
use crate::domain::a004_buyer::api;
use crate::shared::api::use_api;
use crate::shared::modal::Modal;
use crate::shared::notifications::use_notifications;

fn optional_text(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Create (`buyer = None`) or edit form for a buyer.
///
/// Save stays disabled while the property-assignment sub-form is invalid.
#[component]
pub fn BuyerForm(buyer: Option<Buyer>, on_close: Callback<()>, on_saved: Callback<()>) -> impl IntoView {
    let client = use_api();
    let notify = use_notifications();

    let editing_id = buyer.as_ref().map(|b| b.id.clone());
    let is_edit = editing_id.is_some();
    let title = match &buyer {
        Some(b) => format!("Edit buyer: {}", b.name),
        None => "New buyer".to_string(),
    };
    let initial_assignment = buyer.as_ref().and_then(|b| b.property_assignment.clone());

    let name = RwSignal::new(buyer.as_ref().map(|b| b.name.clone()).unwrap_or_default());
    let email = RwSignal::new(buyer.as_ref().map(|b| b.email.clone()).unwrap_or_default());
    let phone = RwSignal::new(
        buyer
            .as_ref()
            .and_then(|b| b.phone.clone())
            .unwrap_or_default(),
    );
    let password = RwSignal::new(String::new());
    let assignment_valid = RwSignal::new(true);
    let assignment: RwSignal<Option<PropertyAssignment>> = RwSignal::new(initial_assignment.clone());
    let (error, set_error) = signal::<Option<String>>(None);
    let (saving, set_saving) = signal(false);

    let save = move |_| {
        let name_val = name.get_untracked().trim().to_string();
        let email_val = email.get_untracked().trim().to_string();
        if name_val.is_empty() {
            set_error.set(Some("Name is required".to_string()));
            return;
        }
        if !is_valid_email(&email_val) {
            set_error.set(Some(format!("'{}' is not a valid email address", email_val)));
            return;
        }
        if !assignment_valid.get_untracked() {
            set_error.set(Some("Complete the property assignment or clear the project".to_string()));
            return;
        }

        set_error.set(None);
        set_saving.set(true);
        let client = client.clone();
        let phone_val = optional_text(phone.get_untracked());
        let assignment_val = assignment.get_untracked();
        let editing_id = editing_id.clone();
        let password_val = optional_text(password.get_untracked());
        spawn_local(async move {
            let (outcome, done_message) = match editing_id {
                None => {
                    let dto = CreateBuyerDto {
                        name: name_val,
                        email: email_val,
                        phone: phone_val,
                        password: password_val,
                        property_assignment: assignment_val,
                    };
                    (api::create_buyer(&client, &dto).await, "Buyer created")
                }
                Some(id) => {
                    let dto = UpdateBuyerDto {
                        id,
                        name: name_val,
                        email: email_val,
                        phone: phone_val,
                        property_assignment: assignment_val,
                    };
                    (api::update_buyer(&client, &dto).await, "Buyer updated")
                }
            };
            set_saving.set(false);
            match outcome {
                Ok(()) => {
                    notify.success(done_message);
                    on_saved.run(());
                }
                Err(e) => {
                    notify.error(format!("Failed to save buyer: {}", e));
                    set_error.set(Some(e));
                }
            }
        });
    };

    view! {
        <Modal title=title on_close=on_close modal_class="buyer-form">
            {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

            <div class="form-grid">
                <div class="form-group">
                    <Label>"Name *"</Label>
                    <Input value=name placeholder="Full name" />
                </div>
                <div class="form-group">
                    <Label>"Email *"</Label>
                    <Input value=email input_type=InputType::Email placeholder="buyer@example.com" />
                </div>
                <div class="form-group">
                    <Label>"Phone"</Label>
                    <Input value=phone input_type=InputType::Tel />
                </div>
                <Show when=move || !is_edit>
                    <div class="form-group">
                        <Label>"Portal password"</Label>
                        <Input value=password input_type=InputType::Password placeholder="Optional" />
                    </div>
                </Show>
            </div>

            <div class="form-section">
                <h3 class="form-section__title">"Property assignment"</h3>
                <PropertyAssignmentForm
                    initial=initial_assignment
                    on_validity_change=Callback::new(move |valid| assignment_valid.set(valid))
                    on_payload_change=Callback::new(move |payload| assignment.set(payload))
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
                    disabled=Signal::derive(move || saving.get() || !assignment_valid.get())
                >
                    {move || if saving.get() { "Saving..." } else { "Save" }}
                </Button>
            </div>
        </Modal>
    }
}
