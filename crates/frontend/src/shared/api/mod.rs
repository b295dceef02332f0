//! Client for the admin REST service.
//!
//! Every call resolves to an [`ApiResponse`]; nothing past this module sees a
//! transport error. The bearer token comes from an injected [`SessionStore`].

pub mod client;
pub mod session;
pub mod transport;

pub use client::{empty_body, normalize_response, ApiClient, ApiResponse, RequestOptions};
pub use session::{MemorySession, SessionStore};
pub use transport::{FetchTransport, HttpMethod, HttpRequest, HttpResponse, RequestBody, Transport, TransportError};

use leptos::prelude::*;

/// API client from context (provided once in `App`)
pub fn use_api() -> ApiClient {
    use_context::<ApiClient>().expect("ApiClient not provided in context (provide it in app root)")
}
