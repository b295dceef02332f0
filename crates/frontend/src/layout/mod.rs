pub mod global_context;
pub mod sidebar;

use leptos::prelude::*;

use global_context::{use_global_context, Page};
use sidebar::Sidebar;

use crate::domain::a004_buyer::ui::list::BuyersListPage;
use crate::domain::a005_document::ui::list::DocumentsListPage;
use crate::system::admins::ui::list::AdminsListPage;

/// Main application shell.
///
/// ```text
/// +-----------+------------------------+
/// |  Sidebar  |  active page           |
/// +-----------+------------------------+
/// ```
#[component]
pub fn Shell() -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <div class="app-layout">
            <Sidebar />
            <main class="app-main">
                {move || match ctx.active.get() {
                    Page::Admins => view! { <AdminsListPage /> }.into_any(),
                    Page::Buyers => view! { <BuyersListPage /> }.into_any(),
                    Page::Documents => view! { <DocumentsListPage /> }.into_any(),
                }}
            </main>
        </div>
    }
}
