use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file (agreement, ID scan, brochure)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMeta {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub file_url: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub buyer_id: Option<String>,
    #[serde(default)]
    pub uploaded_at: Option<String>,
}
