use contracts::shared::ListQuery;
use contracts::system::admins::{Admin, CreateAdminDto, UpdateAdminDto};

use crate::shared::api::ApiClient;
use crate::shared::api_utils::path_segment;

const PAGE_LIMIT: u32 = 200;

/// Fetch admins, optionally narrowed by a server-side search
pub async fn fetch_admins(client: &ApiClient, search: &str) -> Result<Vec<Admin>, String> {
    let query = ListQuery::page(1, PAGE_LIMIT).with_search(search);
    client.get_list("/admins", &query).await.into_result()
}

pub async fn create_admin(client: &ApiClient, dto: &CreateAdminDto) -> Result<(), String> {
    client.post("/admins", dto).await.into_unit()
}

pub async fn update_admin(client: &ApiClient, dto: &UpdateAdminDto) -> Result<(), String> {
    client
        .put(&format!("/admins/{}", path_segment(&dto.id)), dto)
        .await
        .into_unit()
}

pub async fn delete_admin(client: &ApiClient, id: &str) -> Result<(), String> {
    client
        .delete(&format!("/admins/{}", path_segment(id)))
        .await
        .into_unit()
}
