use contracts::domain::a004_buyer::{Buyer, CreateBuyerDto, UpdateBuyerDto};
use contracts::shared::ListQuery;

use crate::shared::api::ApiClient;
use crate::shared::api_utils::path_segment;

const PAGE_LIMIT: u32 = 500;

pub async fn fetch_buyers(client: &ApiClient) -> Result<Vec<Buyer>, String> {
    client
        .get_list("/buyers", &ListQuery::page(1, PAGE_LIMIT))
        .await
        .into_result()
}

pub async fn create_buyer(client: &ApiClient, dto: &CreateBuyerDto) -> Result<(), String> {
    client.post("/buyers", dto).await.into_unit()
}

pub async fn update_buyer(client: &ApiClient, dto: &UpdateBuyerDto) -> Result<(), String> {
    client
        .put(&format!("/buyers/{}", path_segment(&dto.id)), dto)
        .await
        .into_unit()
}

pub async fn delete_buyer(client: &ApiClient, id: &str) -> Result<(), String> {
    client
        .delete(&format!("/buyers/{}", path_segment(id)))
        .await
        .into_unit()
}
