use contracts::domain::a004_buyer::Buyer;
use contracts::domain::a005_document::DocumentMeta;
use leptos::html::Input;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;
use thaw::*;

use crate::domain::a004_buyer::api as buyer_api;
use crate::domain::a005_document::{api, cache};
use crate::shared::api::use_api;
use crate::shared::confirm::{use_confirm, ConfirmOptions};
use crate::shared::date_utils::format_optional_datetime;
use crate::shared::icons::icon;
use crate::shared::list_utils::{
    any_field_contains, filter_list, get_sort_indicator, sort_list, SearchInput, Searchable,
    Sortable,
};
use crate::shared::notifications::use_notifications;
use crate::shared::page_frame::PageFrame;
use crate::shared::page_standard::PAGE_CAT_LIST;
use crate::system::auth::guard::RequireAuth;

/// "12.4 KB" style size label
pub fn format_file_size(size: Option<u64>) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let Some(bytes) = size else {
        return "-".to_string();
    };
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

impl Searchable for DocumentMeta {
    fn matches_filter(&self, filter: &str) -> bool {
        any_field_contains(
            &[&self.name, self.mime_type.as_deref().unwrap_or("")],
            filter,
        )
    }
}

impl Sortable for DocumentMeta {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "size" => self.size.cmp(&other.size),
            "uploaded_at" => self
                .uploaded_at
                .as_deref()
                .unwrap_or("")
                .cmp(other.uploaded_at.as_deref().unwrap_or("")),
            _ => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
        }
    }
}

#[component]
pub fn DocumentsListPage() -> impl IntoView {
    view! {
        <RequireAuth>
            <DocumentsList />
        </RequireAuth>
    }
}

#[component]
fn DocumentsList() -> impl IntoView {
    let client = use_api();
    let notify = use_notifications();
    let confirm = use_confirm();

    let documents: RwSignal<Vec<DocumentMeta>> = RwSignal::new(Vec::new());
    let buyers: RwSignal<Vec<Buyer>> = RwSignal::new(Vec::new());
    let search = RwSignal::new(String::new());
    let sort_field = RwSignal::new("uploaded_at".to_string());
    let sort_ascending = RwSignal::new(false);
    let upload_buyer = RwSignal::new(String::new());
    let (loading, set_loading) = signal(false);
    let (uploading, set_uploading) = signal(false);
    let file_input = NodeRef::<Input>::new();

    let visible = Memo::new(move |_| {
        let mut rows = filter_list(documents.get(), &search.get());
        sort_field.with(|field| sort_list(&mut rows, field, sort_ascending.get()));
        rows
    });

    let buyer_name = move |id: Option<&str>| -> String {
        let Some(id) = id else {
            return "-".to_string();
        };
        buyers.with_untracked(|list| {
            list.iter()
                .find(|b| b.id == id)
                .map(|b| b.name.clone())
                .unwrap_or_else(|| id.to_string())
        })
    };

    let load_data = {
        let client = client.clone();
        Callback::new(move |_: ()| {
            set_loading.set(true);
            let client = client.clone();
            spawn_local(async move {
                match api::fetch_documents(&client).await {
                    Ok(server) => {
                        let mut cached = cache::load();
                        if cache::prune(&mut cached, &server) {
                            cache::save(&cached);
                        }
                        documents.set(cache::merge_cached(server, &cached));
                    }
                    Err(e) => notify.error(format!("Failed to load documents: {}", e)),
                }
                set_loading.set(false);
            });
        })
    };

    {
        let client = client.clone();
        spawn_local(async move {
            match buyer_api::fetch_buyers(&client).await {
                Ok(list) => buyers.set(list),
                Err(e) => log::warn!("Buyer names unavailable: {}", e),
            }
        });
    }
    load_data.run(());

    let on_file_selected = {
        let client = client.clone();
        move |_| {
            let Some(input) = file_input.get_untracked() else {
                return;
            };
            let Some(file) = input.files().and_then(|files| files.get(0)) else {
                return;
            };
            set_uploading.set(true);
            let client = client.clone();
            let buyer_id = Some(upload_buyer.get_untracked()).filter(|id| !id.is_empty());
            spawn_local(async move {
                match api::upload_document(&client, &file, buyer_id.as_deref()).await {
                    Ok(doc) => {
                        notify.success(format!("{} uploaded", doc.name));
                        cache::update(|c| {
                            cache::remember(c, doc);
                            true
                        });
                        load_data.run(());
                    }
                    Err(e) => notify.error(format!("Upload failed: {}", e)),
                }
                input.set_value("");
                set_uploading.set(false);
            });
        }
    };

    let delete_document = Callback::new(move |doc: DocumentMeta| {
        let client = client.clone();
        spawn_local(async move {
            let accepted = confirm
                .confirm(ConfirmOptions::danger(
                    "Delete document",
                    format!("Delete {}? The file will be removed from storage.", doc.name),
                ))
                .await;
            if !accepted {
                return;
            }
            match api::delete_document(&client, &doc.id).await {
                Ok(()) => {
                    cache::update(|c| cache::forget(c, &doc.id));
                    notify.success(format!("{} deleted", doc.name));
                    load_data.run(());
                }
                Err(e) => notify.error(format!("Failed to delete document: {}", e)),
            }
        });
    });

    let toggle_sort = move |field: &'static str| {
        move |_| {
            if sort_field.get_untracked() == field {
                sort_ascending.update(|v| *v = !*v);
            } else {
                sort_field.set(field.to_string());
                sort_ascending.set(true);
            }
        }
    };
    let sort_mark = move |field: &'static str| {
        move || get_sort_indicator(&sort_field.get(), field, sort_ascending.get())
    };

    view! {
        <PageFrame page_id="a005_document--list" category=PAGE_CAT_LIST>
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Documents"</h1>
                    <Badge>{move || visible.with(|rows| rows.len().to_string())}</Badge>
                </div>
                <div class="page__header-right">
                    <select
                        class="form-select"
                        prop:value=move || upload_buyer.get()
                        on:change=move |ev| upload_buyer.set(event_target_value(&ev))
                        title="Attach the next upload to a buyer"
                    >
                        <option value="">"Not linked to a buyer"</option>
                        {move || buyers.get().into_iter().map(|b| {
                            view! { <option value=b.id>{b.name}</option> }
                        }).collect_view()}
                    </select>
                    <label class="upload-button" class:upload-button--busy=move || uploading.get()>
                        {icon("upload")}
                        {move || if uploading.get() { " Uploading..." } else { " Upload" }}
                        <input
                            type="file"
                            class="upload-button__input"
                            node_ref=file_input
                            disabled=move || uploading.get()
                            on:change=on_file_selected
                        />
                    </label>
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
                        placeholder="File name or type..."
                    />
                </div>

                <div class="table-wrapper">
                    <Table attr:style="width: 100%;">
                        <TableHeader>
                            <TableRow>
                                <TableHeaderCell resizable=false min_width=220.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("name")>
                                        "Name" {sort_mark("name")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=160.0>"Buyer"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=120.0>"Type"</TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("size")>
                                        "Size" {sort_mark("size")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=140.0>
                                    <div class="table__sortable-header" on:click=toggle_sort("uploaded_at")>
                                        "Uploaded" {sort_mark("uploaded_at")}
                                    </div>
                                </TableHeaderCell>
                                <TableHeaderCell resizable=false min_width=90.0></TableHeaderCell>
                            </TableRow>
                        </TableHeader>

                        <TableBody>
                            <For
                                each=move || visible.get()
                                key=|d| d.id.clone()
                                children=move |doc| {
                                    let doc_for_delete = doc.clone();
                                    let buyer = buyer_name(doc.buyer_id.as_deref());
                                    let uploaded = format_optional_datetime(doc.uploaded_at.as_deref());
                                    let name_cell = match doc.file_url.clone() {
                                        Some(url) => view! {
                                            <a href=url target="_blank" rel="noopener">{doc.name.clone()}</a>
                                        }.into_any(),
                                        None => view! { <span>{doc.name.clone()}</span> }.into_any(),
                                    };
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{name_cell}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{buyer}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{doc.mime_type.clone().unwrap_or_else(|| "-".to_string())}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{format_file_size(doc.size)}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{uploaded}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <Button
                                                    appearance=ButtonAppearance::Subtle
                                                    on_click=move |_| delete_document.run(doc_for_delete.clone())
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
            </div>
        </PageFrame>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_sizes_use_binary_units() {
        assert_eq!(format_file_size(None), "-");
        assert_eq!(format_file_size(Some(512)), "512 B");
        assert_eq!(format_file_size(Some(2048)), "2.0 KB");
        assert_eq!(format_file_size(Some(5 * 1024 * 1024 + 512 * 1024)), "5.5 MB");
    }
}
