use contracts::domain::a001_project::Project;

use crate::shared::api::ApiClient;

pub async fn fetch_projects(client: &ApiClient) -> Result<Vec<Project>, String> {
    client.get("/projects").await.into_result()
}
