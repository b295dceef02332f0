use contracts::domain::a005_document::DocumentMeta;
use contracts::shared::ListQuery;
use wasm_bindgen::{JsCast, JsValue};

use crate::shared::api::ApiClient;
use crate::shared::api_utils::path_segment;

const PAGE_LIMIT: u32 = 200;

pub async fn fetch_documents(client: &ApiClient) -> Result<Vec<DocumentMeta>, String> {
    client
        .get_list("/documents", &ListQuery::page(1, PAGE_LIMIT))
        .await
        .into_result()
}

fn js_error(value: JsValue) -> String {
    match value.dyn_into::<js_sys::Error>() {
        Ok(error) => String::from(error.message()),
        Err(value) => value
            .as_string()
            .unwrap_or_else(|| "browser rejected the file".to_string()),
    }
}

/// Multipart upload; the browser sets the boundary header itself
pub async fn upload_document(
    client: &ApiClient,
    file: &web_sys::File,
    buyer_id: Option<&str>,
) -> Result<DocumentMeta, String> {
    let form = web_sys::FormData::new().map_err(js_error)?;
    form.append_with_blob_and_filename("file", file, &file.name())
        .map_err(js_error)?;
    if let Some(buyer_id) = buyer_id {
        form.append_with_str("buyerId", buyer_id).map_err(js_error)?;
    }
    client.upload("/documents/upload", form).await.into_result()
}

pub async fn delete_document(client: &ApiClient, id: &str) -> Result<(), String> {
    client
        .delete(&format!("/documents/{}", path_segment(id)))
        .await
        .into_unit()
}
