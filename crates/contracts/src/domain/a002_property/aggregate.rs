use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PropertyStatus {
    #[default]
    Available,
    Reserved,
    Sold,
}

impl PropertyStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            PropertyStatus::Available => "Available",
            PropertyStatus::Reserved => "Reserved",
            PropertyStatus::Sold => "Sold",
        }
    }
}

/// Sellable unit inside a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(alias = "_id")]
    pub id: String,
    pub project_id: String,
    pub unit_number: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub status: PropertyStatus,
}

impl Property {
    /// Denormalized copy stored on the buyer at the time of sale
    pub fn snapshot(&self, project_name: Option<&str>) -> PropertySnapshot {
        PropertySnapshot {
            unit_number: self.unit_number.clone(),
            property_type: self.property_type.clone(),
            area: self.area,
            price: self.price,
            project_name: project_name.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySnapshot {
    pub unit_number: String,
    #[serde(default)]
    pub property_type: Option<String>,
    #[serde(default)]
    pub area: Option<f64>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub project_name: Option<String>,
}
