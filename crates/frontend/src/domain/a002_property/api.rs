use contracts::domain::a002_property::Property;
use serde::Serialize;

use crate::shared::api::ApiClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertyFilter<'a> {
    project_id: &'a str,
}

/// Units of one project
pub async fn fetch_properties(client: &ApiClient, project_id: &str) -> Result<Vec<Property>, String> {
    let query = serde_qs::to_string(&PropertyFilter { project_id })
        .map_err(|e| format!("Failed to encode query: {}", e))?;
    client
        .get(&format!("/properties?{}", query))
        .await
        .into_result()
}
