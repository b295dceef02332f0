use serde::{Deserialize, Serialize};

use super::assignment::PropertyAssignment;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub property_assignment: Option<PropertyAssignment>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Buyer {
    /// Unit label for list views, e.g. "A-101"
    pub fn unit_label(&self) -> Option<&str> {
        self.property_assignment
            .as_ref()
            .and_then(|a| a.property_data.as_ref())
            .map(|p| p.unit_number.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuyerDto {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_assignment: Option<PropertyAssignment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBuyerDto {
    #[serde(skip_serializing)]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// `None` clears an existing assignment
    pub property_assignment: Option<PropertyAssignment>,
}
