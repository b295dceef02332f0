use std::sync::Arc;

use contracts::shared::{ApiEnvelope, ListQuery};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::session::SessionStore;
use super::transport::{HttpMethod, HttpRequest, RequestBody, Transport};
use crate::shared::api_utils::join_url;

/// Result of every API call.
///
/// Always produced, never an `Err`: transport and parse failures come back as
/// `success == false` with the failure text in `error`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<Value>,
    pub error: Option<String>,
    pub count: Option<u64>,
    pub total: Option<u64>,
    pub status: u16,
    pub status_text: String,
}

impl ApiResponse {
    /// Nothing reached the server (or nothing came back); status is 0
    pub fn network_failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            count: None,
            total: None,
            status: 0,
            status_text: String::new(),
        }
    }

    pub fn error_message(&self) -> String {
        match &self.error {
            Some(e) => e.clone(),
            None if self.status_text.is_empty() => format!("Request failed with status {}", self.status),
            None => format!("Request failed: {} {}", self.status, self.status_text),
        }
    }

    /// Typed view of the response including `count`/`total`
    pub fn into_envelope<T: DeserializeOwned>(self) -> ApiEnvelope<T> {
        if !self.success {
            let message = self.error_message();
            return ApiEnvelope {
                count: self.count,
                total: self.total,
                ..ApiEnvelope::failure(message)
            };
        }
        match self.data {
            None => ApiEnvelope {
                success: true,
                data: None,
                error: None,
                count: self.count,
                total: self.total,
            },
            Some(raw) => match serde_json::from_value::<T>(raw) {
                Ok(data) => ApiEnvelope {
                    count: self.count,
                    total: self.total,
                    ..ApiEnvelope::ok(data)
                },
                Err(e) => ApiEnvelope::failure(format!("Failed to parse response: {}", e)),
            },
        }
    }

    pub fn into_result<T: DeserializeOwned>(self) -> Result<T, String> {
        if !self.success {
            return Err(self.error_message());
        }
        serde_json::from_value(self.data.unwrap_or(Value::Null))
            .map_err(|e| format!("Failed to parse response: {}", e))
    }

    /// For mutations where only success matters
    pub fn into_unit(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.error_message())
        }
    }
}

fn is_http_ok(status: u16) -> bool {
    (200..300).contains(&status)
}

fn message_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Object(obj) => obj.get("message").and_then(message_text),
        other => Some(other.to_string()),
    }
}

fn fallback_error(status: u16, status_text: &str) -> String {
    if status_text.is_empty() {
        format!("Request failed with status {}", status)
    } else {
        status_text.to_string()
    }
}

/// Coerce whatever the server sent into the response envelope.
///
/// - empty body: success follows the HTTP status
/// - object with `data`: that value is the payload
/// - any other JSON: the whole body is the payload
/// - `success: false` in the body overrides a 2xx status
pub fn normalize_response(status: u16, status_text: &str, body: &str) -> ApiResponse {
    let http_ok = is_http_ok(status);
    let mut response = ApiResponse {
        success: http_ok,
        data: None,
        error: None,
        count: None,
        total: None,
        status,
        status_text: status_text.to_string(),
    };

    if body.trim().is_empty() {
        if !http_ok {
            response.error = Some(fallback_error(status, status_text));
        }
        return response;
    }

    let parsed: Value = match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            response.success = false;
            response.error = Some(format!("Invalid JSON response: {}", e));
            return response;
        }
    };

    match parsed {
        Value::Object(mut map) => {
            let flagged_failure = map.get("success").and_then(Value::as_bool) == Some(false);
            response.success = http_ok && !flagged_failure;
            response.count = map.get("count").and_then(Value::as_u64);
            response.total = map.get("total").and_then(Value::as_u64);
            if !response.success {
                response.error = map
                    .get("error")
                    .and_then(message_text)
                    .or_else(|| map.get("message").and_then(message_text))
                    .or_else(|| Some(fallback_error(status, status_text)));
            }
            response.data = match map.remove("data") {
                Some(Value::Null) => None,
                Some(data) => Some(data),
                None => Some(Value::Object(map)),
            };
        }
        other => {
            if !http_ok {
                response.error = Some(fallback_error(status, status_text));
            }
            response.data = Some(other);
        }
    }

    response
}

/// Per-call options: method, extra headers, body
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn json(method: HttpMethod, body: Value) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Json(body),
        }
    }

    pub fn multipart(method: HttpMethod, form: web_sys::FormData) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Multipart(form),
        }
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

/// Client for the admin REST service
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    session: Arc<dyn SessionStore>,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(
        base_url: impl Into<String>,
        session: Arc<dyn SessionStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Assemble the outgoing request.
    ///
    /// Header precedence: JSON content type (skipped for multipart), then the
    /// bearer token, then caller headers, which replace same-named ones.
    pub fn build_request(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let mut headers = Vec::new();
        if !options.body.is_multipart() {
            set_header(&mut headers, "Content-Type", "application/json");
        }
        if let Some(token) = self.session.token().filter(|t| !t.is_empty()) {
            set_header(&mut headers, "Authorization", &format!("Bearer {}", token));
        }
        for (name, value) in &options.headers {
            set_header(&mut headers, name, value);
        }

        HttpRequest {
            method: options.method,
            url: join_url(&self.base_url, endpoint),
            headers,
            body: options.body,
        }
    }

    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ApiResponse {
        let method = options.method;
        let request = self.build_request(endpoint, options);
        log::debug!("{} {}", method.as_str(), endpoint);

        match self.transport.send(request).await {
            Ok(raw) => {
                let response = normalize_response(raw.status, &raw.status_text, &raw.body);
                if !response.success {
                    log::warn!(
                        "{} {} failed ({}): {}",
                        method.as_str(),
                        endpoint,
                        response.status,
                        response.error_message()
                    );
                }
                response
            }
            Err(e) => {
                log::warn!("{} {} failed: {}", method.as_str(), endpoint, e);
                ApiResponse::network_failure(e.to_string())
            }
        }
    }

    pub async fn get(&self, endpoint: &str) -> ApiResponse {
        self.request(endpoint, RequestOptions::new(HttpMethod::Get)).await
    }

    /// GET a list endpoint with `?page=&limit=&search=`
    pub async fn get_list(&self, endpoint: &str, query: &ListQuery) -> ApiResponse {
        let qs = match serde_qs::to_string(query) {
            Ok(qs) => qs,
            Err(e) => return ApiResponse::network_failure(format!("Failed to encode query: {}", e)),
        };
        if qs.is_empty() {
            self.get(endpoint).await
        } else {
            self.get(&format!("{}?{}", endpoint, qs)).await
        }
    }

    async fn send_json<B: Serialize>(&self, method: HttpMethod, endpoint: &str, body: &B) -> ApiResponse {
        match serde_json::to_value(body) {
            Ok(value) => self.request(endpoint, RequestOptions::json(method, value)).await,
            Err(e) => ApiResponse::network_failure(format!("Failed to serialize request: {}", e)),
        }
    }

    pub async fn post<B: Serialize>(&self, endpoint: &str, body: &B) -> ApiResponse {
        self.send_json(HttpMethod::Post, endpoint, body).await
    }

    pub async fn put<B: Serialize>(&self, endpoint: &str, body: &B) -> ApiResponse {
        self.send_json(HttpMethod::Put, endpoint, body).await
    }

    pub async fn patch<B: Serialize>(&self, endpoint: &str, body: &B) -> ApiResponse {
        self.send_json(HttpMethod::Patch, endpoint, body).await
    }

    pub async fn delete(&self, endpoint: &str) -> ApiResponse {
        self.request(endpoint, RequestOptions::new(HttpMethod::Delete)).await
    }

    /// Multipart POST (profile images, documents)
    pub async fn upload(&self, endpoint: &str, form: web_sys::FormData) -> ApiResponse {
        self.request(endpoint, RequestOptions::multipart(HttpMethod::Post, form))
            .await
    }
}

/// Empty JSON object, for POST endpoints without a body
pub fn empty_body() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::api::session::MemorySession;
    use crate::shared::api::transport::{HttpResponse, TransportError};
    use async_trait::async_trait;
    use futures::executor::block_on;
    use serde::Deserialize;
    use std::sync::Mutex;

    struct MockTransport {
        reply: Result<HttpResponse, TransportError>,
        seen: Mutex<Vec<(String, Vec<(String, String)>)>>,
    }

    impl MockTransport {
        fn replying(status: u16, body: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(HttpResponse {
                    status,
                    status_text: if status < 300 { "OK".into() } else { "Bad Request".into() },
                    body: body.to_string(),
                }),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: TransportError) -> Arc<Self> {
            Arc::new(Self {
                reply: Err(error),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait(?Send)]
    impl Transport for MockTransport {
        async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            self.seen
                .lock()
                .unwrap()
                .push((request.url.clone(), request.headers.clone()));
            self.reply.clone()
        }
    }

    fn client(transport: Arc<MockTransport>, token: Option<&str>) -> ApiClient {
        let session = match token {
            Some(t) => MemorySession::with_token(t),
            None => MemorySession::default(),
        };
        ApiClient::new("https://estate.test/api", Arc::new(session), transport)
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: String,
    }

    #[test]
    fn rejected_fetch_resolves_to_failure() {
        let transport = MockTransport::failing(TransportError::Network("connection refused".into()));
        let api = client(transport, None);
        let response = block_on(api.get("/admins"));
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Network error: connection refused"));
        assert_eq!(response.status, 0);
    }

    #[test]
    fn token_and_headers_are_injected() {
        let transport = MockTransport::replying(200, r#"{"success":true,"data":[]}"#);
        let api = client(transport.clone(), Some("tok"));
        let options = RequestOptions::new(HttpMethod::Get).header("content-type", "text/plain");
        block_on(api.request("admins", options));

        let seen = transport.seen.lock().unwrap();
        let (url, headers) = &seen[0];
        assert_eq!(url, "https://estate.test/api/admins");
        assert!(headers.contains(&("Authorization".to_string(), "Bearer tok".to_string())));
        let content_types: Vec<_> = headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .collect();
        assert_eq!(content_types.len(), 1);
        assert_eq!(content_types[0].1, "text/plain");
    }

    #[test]
    fn missing_token_omits_authorization() {
        let api = client(MockTransport::replying(200, "{}"), None);
        let request = api.build_request("/x", RequestOptions::default());
        assert_eq!(request.header("authorization"), None);
        assert_eq!(request.header("Content-Type"), Some("application/json"));
    }

    #[test]
    fn list_query_is_encoded() {
        let transport = MockTransport::replying(200, r#"{"success":true,"data":[],"total":0}"#);
        let api = client(transport.clone(), None);
        let query = ListQuery::page(2, 25).with_search("sea view");
        let response = block_on(api.get_list("/buyers", &query));
        assert!(response.success);
        assert_eq!(response.total, Some(0));
        let seen = transport.seen.lock().unwrap();
        assert!(seen[0].0.starts_with("https://estate.test/api/buyers?page=2&limit=25&search=sea"));
    }

    #[test]
    fn wrapped_envelope_is_unwrapped() {
        let r = normalize_response(200, "OK", r#"{"success":true,"data":[{"id":"1"}],"count":1,"total":9}"#);
        assert!(r.success);
        assert_eq!(r.count, Some(1));
        assert_eq!(r.total, Some(9));
        let env = r.into_envelope::<Vec<Item>>();
        assert_eq!(env.data, Some(vec![Item { id: "1".into() }]));
        assert_eq!(env.total, Some(9));
    }

    #[test]
    fn bare_body_becomes_data() {
        let r = normalize_response(200, "OK", r#"[{"id":"a"},{"id":"b"}]"#);
        assert!(r.success);
        assert_eq!(r.into_result::<Vec<Item>>().unwrap().len(), 2);

        let r = normalize_response(200, "OK", r#"{"id":"solo"}"#);
        assert_eq!(r.into_result::<Item>().unwrap(), Item { id: "solo".into() });
    }

    #[test]
    fn server_failure_passes_message_through() {
        let r = normalize_response(200, "OK", r#"{"success":false,"error":"Email already used"}"#);
        assert!(!r.success);
        assert_eq!(r.error.as_deref(), Some("Email already used"));

        let r = normalize_response(401, "Unauthorized", r#"{"message":"Token expired"}"#);
        assert!(!r.success);
        assert_eq!(r.into_unit(), Err("Token expired".to_string()));

        let r = normalize_response(500, "Internal Server Error", "");
        assert_eq!(r.error.as_deref(), Some("Internal Server Error"));
    }

    #[test]
    fn success_message_is_not_an_error() {
        let r = normalize_response(201, "Created", r#"{"success":true,"message":"Created","data":{"id":"n"}}"#);
        assert!(r.success);
        assert_eq!(r.error, None);
        assert_eq!(r.into_result::<Item>().unwrap().id, "n");
    }

    #[test]
    fn invalid_json_is_reported() {
        let r = normalize_response(200, "OK", "<html>");
        assert!(!r.success);
        assert!(r.error.unwrap().starts_with("Invalid JSON response"));
    }

    #[test]
    fn empty_success_body() {
        let r = normalize_response(204, "No Content", "");
        assert!(r.success);
        assert_eq!(r.data, None);
        assert_eq!(r.into_unit(), Ok(()));
    }
}
