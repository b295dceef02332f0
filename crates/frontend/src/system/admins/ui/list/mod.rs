mod state;

use contracts::system::admins::Admin;
use contracts::system::permissions::granted_count;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::api::use_api;
use crate::shared::confirm::{use_confirm, ConfirmOptions};
use crate::shared::date_utils::format_optional_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_indicator, sort_list, SearchInput, Sortable};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_SYSTEM;
use crate::system::admins::api;
use crate::system::admins::ui::details::AdminForm;
use crate::system::auth::guard::RequireAuth;
use state::create_state;

impl Sortable for Admin {
    fn compare_by_field(&self, other: &Self, field: &str) -> std::cmp::Ordering {
        match field {
            "email" => self.email.to_lowercase().cmp(&other.email.to_lowercase()),
            "role" => self.role.display_name().cmp(other.role.display_name()),
            "is_active" => self.is_active.cmp(&other.is_active),
            "last_login_at" => self
                .last_login_at
                .as_deref()
                .unwrap_or("")
                .cmp(other.last_login_at.as_deref().unwrap_or("")),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

/// Which admin the form modal is open for
#[derive(Clone, Debug, PartialEq)]
enum FormTarget {
    Create,
    Edit(Admin),
}

#[component]
pub fn AdminsListPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <AdminsList />
        </RequireAuth>
    }
}

#[component]
fn AdminsList() -> impl IntoView {
    let client = use_api();
    let notify = use_notifications();
    let confirm = use_confirm();

    let state = create_state();
    let all_admins: RwSignal<Vec<Admin>> = RwSignal::new(Vec::new());
    let (loading, set_loading) = signal(false);
    let form_target: RwSignal<Option<FormTarget>> = RwSignal::new(None);

    let refresh_view = move || {
        let mut data = all_admins.get_untracked();
        state.update(|s| {
            sort_list(&mut data, &s.sort_field, s.sort_ascending);
            s.total_count = data.len();
            s.items = data;
        });
    };

    let load_data = {
        let client = client.clone();
        Callback::new(move |_: ()| {
            set_loading.set(true);
            let client = client.clone();
            let search = state.with_untracked(|s| s.search_query.clone());
            spawn_local(async move {
                match api::fetch_admins(&client, &search).await {
                    Ok(data) => {
                        all_admins.set(data);
                        state.update(|s| s.is_loaded = true);
                        refresh_view();
                    }
                    Err(e) => notify.error(format!("Failed to load admins: {}", e)),
                }
                set_loading.set(false);
            });
        })
    };

    Effect::new(move |_| {
        if !state.with_untracked(|s| s.is_loaded) {
            load_data.run(());
        }
    });

    let toggle_sort = move |field: &'static str| {
        move |_| {
            state.update(|s| {
                if s.sort_field == field {
                    s.sort_ascending = !s.sort_ascending;
                } else {
                    s.sort_field = field.to_string();
                    s.sort_ascending = true;
                }
            });
            refresh_view();
        }
    };

    let sort_mark = move |field: &'static str| {
        move || state.with(|s| get_sort_indicator(&s.sort_field, field, s.sort_ascending))
    };

    let delete_admin = Callback::new(move |admin: Admin| {
        let client = client.clone();
        spawn_local(async move {
            let accepted = confirm
                .confirm(ConfirmOptions::danger(
                    "Delete admin",
                    format!("Delete {} ({})? This cannot be undone.", admin.name, admin.email),
                ))
                .await;
            if !accepted {
                return;
            }
            match api::delete_admin(&client, &admin.id).await {
                Ok(()) => {
                    notify.success(format!("Admin {} deleted", admin.name));
                    load_data.run(());
                }
                Err(e) => notify.error(format!("Failed to delete admin: {}", e)),
            }
        });
    });

    let on_search = Callback::new(move |text: String| {
        state.update(|s| s.search_query = text);
        load_data.run(());
    });

    view! {
        <PageFrame page_id="sys_admins--list" category=PAGE_CAT_SYSTEM>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Admins"</h1>
                    <Badge>
                        {move || state.with(|s| s.total_count.to_string())}
                    </Badge>
                </div>
                <div class="page__header-right">
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| form_target.set(Some(FormTarget::Create))
                    >
                        {icon("plus")}
                        " New admin"
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
                        value=Signal::derive(move || state.with(|s| s.search_query.clone()))
                        on_change=on_search
                        placeholder="Name or email..."
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=160.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("name")>
                                        "Name" {sort_mark("name")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=200.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("email")>
                                        "Email" {sort_mark("email")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=100.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("role")>
                                        "Role" {sort_mark("role")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=110.0>
                                    "Permissions"
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("is_active")>
                                        "Status" {sort_mark("is_active")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("last_login_at")>
                                        "Last login" {sort_mark("last_login_at")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || state.with(|s| s.items.clone())
                                key=|a| a.id.clone()
                                children=move |admin| {
                                    let admin_for_edit = admin.clone();
                                    let admin_for_delete = admin.clone();
                                    let granted = granted_count(&admin.normalized_permissions());
                                    let last_login = format_optional_datetime(admin.last_login_at.as_deref());
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span style="font-weight: 500;">{admin.name.clone()}</span>
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{admin.email.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{admin.role.display_name()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format!("{} granted", granted)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>
                                                    {if admin.is_active {
                                                        view! { <span class="badge badge--success">"Active"</span> }.into_any()
                                                    } else {
                                                        view! { <span class="badge badge--error">"Disabled"</span> }.into_any()
                                                    }}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{last_login}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| form_target.set(Some(FormTarget::Edit(admin_for_edit.clone())))
                                                    attr:title="Edit"
                                                >
                                                    {icon("edit")}
                                                </Button>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete_admin.run(admin_for_delete.clone())
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

                {move || form_target.get().map(|target| {
                    let admin = match target {
                        FormTarget::Create => None,
                        FormTarget::Edit(admin) => Some(admin),
                    };
                    view! {
                        <AdminForm
                            admin=admin
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
