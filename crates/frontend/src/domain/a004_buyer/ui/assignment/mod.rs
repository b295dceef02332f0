//! Property-assignment sub-form of the buyer editor.
//!
//! Owns an [`AssignmentDraft`] and reports two things upward after every
//! edit: whether the draft is currently satisfiable, and the payload to send
//! (`None` while invalid or when no project is selected). No project means no
//! assignment, which is always valid.

use contracts::domain::a001_project::Project;
use contracts::domain::a002_property::Property;
use contracts::domain::a003_broker::Broker;
use contracts::domain::a004_buyer::{
    AssignmentDraft, InstallmentDraft, InstallmentStatus, PropertyAssignment, PRICE_TOLERANCE,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;
use uuid::Uuid;

use crate::domain::{a001_project, a002_property, a003_broker};
use crate::shared::api::use_api;
use crate::shared::date_utils::{parse_input_value, to_input_value, today};
use crate::shared::icons::icon;
use crate::shared::multi_select::{MultiSelect, SelectOption};
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::{amount_input_value, format_money, parse_amount};

fn status_code(status: InstallmentStatus) -> &'static str {
    match status {
        InstallmentStatus::Pending => "pending",
        InstallmentStatus::Paid => "paid",
    }
}

fn status_from_code(code: &str) -> InstallmentStatus {
    match code {
        "paid" => InstallmentStatus::Paid,
        _ => InstallmentStatus::Pending,
    }
}

/// Whether a response fetched for `requested` still matches the selection
fn is_current(selected: &str, requested: &str) -> bool {
    selected == requested
}

#[component]
pub fn PropertyAssignmentForm(
    /// Assignment stored on the buyer being edited
    initial: Option<PropertyAssignment>,
    on_validity_change: Callback<bool>,
    on_payload_change: Callback<Option<PropertyAssignment>>,
) -> impl IntoView {
    let client = use_api();
    let notify = use_notifications();

    let draft = RwSignal::new(
        initial
            .as_ref()
            .map(AssignmentDraft::from_payload)
            .unwrap_or_default(),
    );
    let projects: RwSignal<Vec<Project>> = RwSignal::new(Vec::new());
    let properties: RwSignal<Vec<Property>> = RwSignal::new(Vec::new());
    let brokers: RwSignal<Vec<Broker>> = RwSignal::new(Vec::new());
    let (properties_loading, set_properties_loading) = signal(false);
    let split_count = RwSignal::new(String::from("12"));

    {
        let client = client.clone();
        spawn_local(async move {
            match a001_project::api::fetch_projects(&client).await {
                Ok(list) => projects.set(list),
                Err(e) => notify.error(format!("Failed to load projects: {}", e)),
            }
            match a003_broker::api::fetch_brokers(&client).await {
                Ok(list) => brokers.set(list),
                Err(e) => notify.error(format!("Failed to load brokers: {}", e)),
            }
        });
    }

    let project_id = Memo::new(move |_| draft.with(|d| d.project_id.clone()));

    // Units follow the selected project
    Effect::new(move |_| {
        let project = project_id.get();
        properties.set(Vec::new());
        if project.is_empty() {
            return;
        }
        set_properties_loading.set(true);
        let client = client.clone();
        spawn_local(async move {
            match a002_property::api::fetch_properties(&client, &project).await {
                Ok(list) => {
                    if is_current(&project_id.get_untracked(), &project) {
                        properties.set(list);
                    }
                }
                Err(e) => notify.error(format!("Failed to load properties: {}", e)),
            }
            // the fetch for a newer selection owns the flag
            if is_current(&project_id.get_untracked(), &project) {
                set_properties_loading.set(false);
            }
        });
    });

    Effect::new(move |_| {
        let (valid, payload) = draft.with(|d| (d.is_valid(), d.to_payload()));
        on_validity_change.run(valid);
        on_payload_change.run(payload);
    });

    let select_property = move |property_id: String| {
        let snapshot = properties.with_untracked(|list| {
            list.iter().find(|p| p.id == property_id).map(|p| {
                let project_name = projects.with_untracked(|ps| {
                    ps.iter().find(|pr| pr.id == p.project_id).map(|pr| pr.name.clone())
                });
                (p.price, p.snapshot(project_name.as_deref()))
            })
        });
        draft.update(|d| {
            let (list_price, snapshot) = match snapshot {
                Some((price, snapshot)) => (price, Some(snapshot)),
                None => (None, None),
            };
            d.set_property(property_id, snapshot);
            // list price is a starting point for the negotiated one
            if d.sold_price.is_none() {
                d.set_sold_price(list_price);
            }
        });
    };

    let row_field = move |key: Uuid| {
        move || draft.with(|d| d.instalments.iter().find(|r| r.key == key).cloned())
    };

    let split = move |_| {
        let count = split_count.get_untracked().trim().parse::<u32>().unwrap_or(0);
        if count == 0 {
            notify.error("Enter the number of installments");
            return;
        }
        let first_due = draft
            .with_untracked(|d| d.instalments.first().and_then(|r| r.due_date))
            .unwrap_or_else(today);
        let mut result = Ok(());
        draft.update(|d| result = d.split_evenly(count, first_due));
        if let Err(e) = result {
            notify.error(e.to_string());
        }
    };

    view! {
        <div class="assignment-form">
            <div class="form-grid">
                <div class="form-group">
                    <Label>"Project"</Label>
                    <select
                        class="form-select"
                        prop:value=move || project_id.get()
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            draft.update(|d| d.set_project(value));
                        }
                    >
                        <option value="">"No property assignment"</option>
                        {move || projects.get().into_iter().map(|p| {
                            let label = p.option_label();
                            let selected = project_id.get_untracked() == p.id;
                            view! { <option value=p.id selected=selected>{label}</option> }
                        }).collect_view()}
                    </select>
                </div>

                <Show when=move || !project_id.get().is_empty()>
                    <div class="form-group">
                        <Label>"Property *"</Label>
                        <select
                            class="form-select"
                            prop:value=move || draft.with(|d| d.property_id.clone())
                            disabled=move || properties_loading.get()
                            on:change=move |ev| select_property(event_target_value(&ev))
                        >
                            <option value="">
                                {move || if properties_loading.get() { "Loading units..." } else { "Select a unit" }}
                            </option>
                            {move || properties.get().into_iter().map(|p| {
                                let label = p.option_label();
                                let selected = draft.with_untracked(|d| d.property_id == p.id);
                                view! { <option value=p.id selected=selected>{label}</option> }
                            }).collect_view()}
                        </select>
                    </div>
                </Show>
            </div>

            <Show when=move || !project_id.get().is_empty()>
                <div class="form-grid">
                    <div class="form-group">
                        <Label>"Brokers"</Label>
                        <MultiSelect
                            options=Signal::derive(move || brokers.get())
                            value=Signal::derive(move || draft.with(|d| d.broker_ids.clone()))
                            on_change=Callback::new(move |ids: Vec<String>| draft.update(|d| d.set_brokers(ids)))
                            placeholder="Search brokers..."
                        />
                    </div>
                    <div class="form-group">
                        <Label>"Sold price *"</Label>
                        <input
                            type="text"
                            inputmode="decimal"
                            class="form-input"
                            prop:value=move || draft.with(|d| amount_input_value(d.sold_price))
                            on:change=move |ev| {
                                let value = parse_amount(&event_target_value(&ev));
                                draft.update(|d| d.set_sold_price(value));
                            }
                        />
                    </div>
                </div>

                <div class="form-section">
                    <div class="form-section__header">
                        <h3 class="form-section__title">"Installments"</h3>
                        <Flex gap=FlexGap::Small align=FlexAlign::End>
                            <input
                                type="number"
                                min="1"
                                class="form-input form-input--narrow"
                                prop:value=move || split_count.get()
                                on:input=move |ev| split_count.set(event_target_value(&ev))
                            />
                            <Button appearance=ButtonAppearance::Secondary on_click=split>
                                "Split evenly"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| draft.update(|d| d.add_installment())
                            >
                                {icon("plus")}
                                " Add"
                            </Button>
                        </Flex>
                    </div>

                    <table class="installments-table">
                        <thead>
                            <tr>
                                <th>"#"</th>
                                <th>"Due date"</th>
                                <th>"Amount"</th>
                                <th>"Status"</th>
                                <th></th>
                            </tr>
                        </thead>
                        <tbody>
                            <For
                                each=move || draft.with(|d| d.instalments.iter().map(|r| r.key).collect::<Vec<_>>())
                                key=|key| *key
                                children=move |key: Uuid| {
                                    let row = row_field(key);
                                    view! {
                                        <tr>
                                            <td>{move || row().map(|r| r.number).unwrap_or_default()}</td>
                                            <td>
                                                <input
                                                    type="date"
                                                    class="form-input"
                                                    prop:value=move || to_input_value(row().and_then(|r| r.due_date))
                                                    on:change=move |ev| {
                                                        let due = parse_input_value(&event_target_value(&ev));
                                                        draft.update(|d| d.update_installment(key, |r: &mut InstallmentDraft| r.due_date = due));
                                                    }
                                                />
                                            </td>
                                            <td>
                                                <input
                                                    type="text"
                                                    inputmode="decimal"
                                                    class="form-input"
                                                    prop:value=move || amount_input_value(row().and_then(|r| r.amount))
                                                    on:change=move |ev| {
                                                        let amount = parse_amount(&event_target_value(&ev));
                                                        draft.update(|d| d.update_installment(key, |r: &mut InstallmentDraft| r.amount = amount));
                                                    }
                                                />
                                            </td>
                                            <td>
                                                <select
                                                    class="form-select"
                                                    prop:value=move || row().map(|r| status_code(r.status)).unwrap_or("pending")
                                                    on:change=move |ev| {
                                                        let status = status_from_code(&event_target_value(&ev));
                                                        draft.update(|d| d.update_installment(key, |r: &mut InstallmentDraft| r.status = status));
                                                    }
                                                >
                                                    <option value="pending">"Pending"</option>
                                                    <option value="paid">"Paid"</option>
                                                </select>
                                            </td>
                                            <td>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    disabled=Signal::derive(move || draft.with(|d| d.instalments.len() <= 1))
                                                    on_click=move |_| {
                                                        draft.update(|d| {
                                                            d.remove_installment(key);
                                                        });
                                                    }
                                                    attr:title="Remove installment"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </td>
                                        </tr>
                                    }
                                }
                            />
                        </tbody>
                    </table>

                    <div class="installments-summary">
                        <span>{move || format!("Total: {}", draft.with(|d| format_money(d.installment_total())))}</span>
                        <span>{move || format!("Sold price: {}", draft.with(|d| format_money(d.sold_price.unwrap_or(0.0))))}</span>
                        <span
                            class="installments-summary__remaining"
                            class:installments-summary__remaining--off=move || draft.with(|d| d.remaining().abs() > PRICE_TOLERANCE)
                        >
                            {move || format!("Remaining: {}", draft.with(|d| format_money(d.remaining())))}
                        </span>
                    </div>
                </div>

                {move || draft.with(|d| d.validate().err()).map(|e| view! {
                    <div class="alert alert--warning">{e.to_string()}</div>
                })}
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_property_response_is_ignored() {
        // user switched from P1 to P2 before P1's list arrived
        assert!(!is_current("P2", "P1"));
        assert!(is_current("P2", "P2"));
        // selection cleared while loading
        assert!(!is_current("", "P1"));
    }

    #[test]
    fn status_codes_round_trip() {
        for status in [InstallmentStatus::Pending, InstallmentStatus::Paid] {
            assert_eq!(status_from_code(status_code(status)), status);
        }
    }
}
