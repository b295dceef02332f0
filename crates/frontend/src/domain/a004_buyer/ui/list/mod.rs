use contracts::domain::a004_buyer::Buyer;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a004_buyer::api;
use crate::domain::a004_buyer::ui::details::BuyerForm;
use crate::shared::api::use_api;
use crate::shared::confirm::{use_confirm, ConfirmOptions};
use crate::shared::date_utils::format_optional_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, create_sort_toggle, filter_list, get_sort_indicator, sort_list, SearchInput,
    Searchable, Sortable,
};
use crate::shared::notifications::use_notifications;
use crate::shared::number_format::format_money;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::guard::RequireAuth;

impl Searchable for Buyer {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            &[
                &self.name,
                &self.email,
                self.phone.as_deref().unwrap_or(""),
                self.unit_label().unwrap_or(""),
            ],
            filter,
        )
    }
}

fn sold_price(buyer: &Buyer) -> f64 {
    buyer
        .property_assignment
        .as_ref()
        .map(|a| a.sold_price)
        .unwrap_or(0.0)
}

impl Sortable for Buyer {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "email" => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            "unit" => self
                .unit_label()
                .unwrap_or("")
                .cmp(other.unit_label().unwrap_or("")),
            "sold_price" => sold_price(self)
                .partial_cmp(&sold_price(other))
                .unwrap_or(Ordering::Equal),
            "created_at" => self
                .created_at
                .as_deref()
                .unwrap_or("")
                .cmp(other.created_at.as_deref().unwrap_or("")),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
enum FormTarget {
    Create,
    Edit(Buyer),
}

#[component]
pub fn BuyersListPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <BuyersList />
        </RequireAuth>
    }
}

/// Buyers table. The server returns one page; search and sort run locally.
#[component]
fn BuyersList() -> impl IntoView {
    let client = use_api();
    let notify = use_notifications();
    let confirm = use_confirm();

    let all_buyers: RwSignal<Vec<Buyer>> = RwSignal::new(Vec::new());
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("name".to_string());
    let sort_ascending = RwSignal::new(true);
    let (loading, set_loading) = signal(false);
    let form_target: RwSignal<Option<FormTarget>> = RwSignal::new(None);

    let visible = Memo::new(move |_| {
        let mut rows = filter_list(all_buyers.get(), &search.get());
        sort_field.with(|field| sort_list(&mut rows, field, sort_ascending.get()));
        rows
    });

    let load_data = {
        let client = client.clone();
        Callback::new(move |_: ()| {
            set_loading.set(true);
            let client = client.clone();
            spawn_local(async move {
                match api::fetch_buyers(&client).await {
                    Ok(data) => all_buyers.set(data),
                    Err(e) => notify.error(format!("Failed to load buyers: {}", e)),
                }
                set_loading.set(false);
            });
        })
    };

    load_data.run(());

    let sort_mark = move |field: &'static str| {
        move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())
    };

    let delete_buyer = Callback::new(move |buyer: Buyer| {
        let client = client.clone();
        spawn_local(async move {
            let accepted = confirm
                .confirm(ConfirmOptions::danger(
                    "Delete buyer",
                    format!(
                        "Delete {}? Their property assignment and documents links will be removed.",
                        buyer.name
                    ),
                ))
                .await;
            if !accepted {
                return;
            }
            match api::delete_buyer(&client, &buyer.id).await {
                Ok(()) => {
                    notify.success(format!("Buyer {} deleted", buyer.name));
                    load_data.run(());
                }
                Err(e) => notify.error(format!("Failed to delete buyer: {}", e)),
            }
        });
    });

    view! {
        <PageFrame page_id="a004_buyer--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Buyers"</h1>
                    <Badge>
                        {move || visible.with(|rows| rows.len().to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form_target.set(Some(FormTarget::Create))
                    >
                        {icon("plus")}
                        " New buyer"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| load_data.run(())
                        disabled=Signal::derive(move || loading.get())
                    >
                        {icon("refresh")}
                        {move || if loading.get() { " Loading..." } else { " Refresh" }}
                    </Button>
                </div>
            </div>

            <div class="page__content">
                <div class="filter-panel">
                    <SearchInput
                        value=search
                        on_change=Callback::new(move |text: String| search.set(text))
                        placeholder="Name, email, phone or unit..."
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=160.0>
                                    <div class="table__sortable-header" on:click=create_sort_toggle("name", sort_field, sort_ascending)>
                                        "Name" {sort_mark("name")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    <div class="table__sortable-header" on:click=create_sort_toggle("email", sort_field, sort_ascending)>
                                        "Email" {sort_mark("email")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"Phone"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    <div class="table__sortable-header" on:click=create_sort_toggle("unit", sort_field, sort_ascending)>
                                        "Unit" {sort_mark("unit")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=130.0>
                                    <div class="table__sortable-header" on:click=create_sort_toggle("sold_price", sort_field, sort_ascending)>
                                        "Sold price" {sort_mark("sold_price")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=130.0>"Paid"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>
                                    <div class="table__sortable-header" on:click=create_sort_toggle("created_at", sort_field, sort_ascending)>
                                        "Created" {sort_mark("created_at")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|b| b.id.clone()
                                children=move |buyer| {
                                    let buyer_for_edit = buyer.clone();
                                    let buyer_for_delete = buyer.clone();
                                    let unit = buyer.unit_label().unwrap_or("-").to_string();
                                    let (price, paid) = match &buyer.property_assignment {
                                        Some(a) => (format_money(a.sold_price), format_money(a.paid_total())),
                                        None => ("-".to_string(), "-".to_string()),
                                    };
                                    let created = format_optional_datetime(buyer.created_at.as_deref());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{buyer.name.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{buyer.email.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{buyer.phone.clone().unwrap_or_else(|| "-".to_string())}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{unit}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{price}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{paid}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{created}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| form_target.set(Some(FormTarget::Edit(buyer_for_edit.clone())))
                                                    attr:title="Edit"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete_buyer.run(buyer_for_delete.clone())
                                                    attr:title="Delete"
                                                >
                                                    {icon("trash")}
                                                </Button>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>
                </div>

                <Show when=move || is_empty_result(loading.get(), visible.with(|r| r.is_empty()))>
                    <div class="empty-state">
                        {move || if search.with(|s| s.trim().is_empty()) { "No buyers yet" } else { "Nothing matches the search" }}
                    </div>
                </Show>

                {move || form_target.get().map(|target| {
                    let buyer = match target {
                        FormTarget::Create => None,
                        FormTarget::Edit(buyer) => Some(buyer),
                    };
                    view! {
                        <BuyerForm
                            buyer=buyer
                            on_close=Callback::new(move |_| form_target.set(None))
                            on_saved=Callback::new(move |_| {
                                form_target.set(None);
                                load_data.run(());
                            })
                        />
                    }
                })}
            </div>
        </PageFrame>
    }
}

fn is_empty_result(loading: bool, no_rows: bool) -> bool {
    !loading && no_rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buyer(name: &str, email: &str, phone: Option<&str>) -> Buyer {
        Buyer {
            id: name.to_lowercase(),
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            property_assignment: None,
            created_at: None,
        }
    }

    #[test]
    fn search_matches_phone_and_email() {
        let rows = vec![
            buyer("Anna", "anna@example.com", Some("+7 900 111")),
            buyer("Boris", "boris@mail.test", None),
        ];
        let by_phone = filter_list(rows.clone(), "900");
        assert_eq!(by_phone.len(), 1);
        assert_eq!(by_phone[0].name, "Anna");

        let by_email = filter_list(rows, "MAIL.TEST");
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].name, "Boris");
    }

    #[test]
    fn name_sort_ignores_case() {
        let mut rows = vec![
            buyer("zed", "z@x.io", None),
            buyer("Amy", "a@x.io", None),
            buyer("bob", "b@x.io", None),
        ];
        sort_list(&mut rows, "name", true);
        let names: Vec<_> = rows.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(names, ["Amy", "bob", "zed"]);
    }
}
