use contracts::system::admins::Admin;
use contracts::system::auth::{LoginRequest, LoginResponse};

use crate::shared::api::ApiClient;

/// Exchange credentials for a bearer token
pub async fn login(api: &ApiClient, email: String, password: String) -> Result<LoginResponse, String> {
    let request = LoginRequest { email, password };
    api.post("/auth/login", &request).await.into_result()
}

/// Profile of the signed-in admin.
///
/// `Ok(None)` when the stored token is no longer accepted.
pub async fn fetch_profile(api: &ApiClient) -> Result<Option<Admin>, String> {
    let response = api.get("/auth/me").await;
    if response.status == 401 || response.status == 403 {
        return Ok(None);
    }
    response.into_result().map(Some)
}
