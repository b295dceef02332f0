pub mod api;

pub use api::{ApiEnvelope, ListQuery};
