use contracts::domain::a002_property::{Property, PropertyStatus};

use crate::shared::multi_select::SelectOption;
use crate::shared::number_format::format_money;

impl SelectOption for Property {
    type Key = String;

    fn option_key(&self) -> String {
        self.id.clone()
    }

    /// "A-101 · Apartment · 1 250 000.00"
    fn option_label(&self) -> String {
        let mut parts = vec![self.unit_number.clone()];
        if let Some(kind) = self.property_type.as_deref().filter(|k| !k.is_empty()) {
            parts.push(kind.to_string());
        }
        if let Some(price) = self.price {
            parts.push(format_money(price));
        }
        if self.status != PropertyStatus::Available {
            parts.push(self.status.display_name().to_string());
        }
        parts.join(" · ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_label() {
        let property = Property {
            id: "U1".into(),
            project_id: "P1".into(),
            unit_number: "A-101".into(),
            property_type: Some("Apartment".into()),
            area: Some(84.5),
            price: Some(1250000.0),
            status: PropertyStatus::Reserved,
        };
        assert_eq!(property.option_key(), "U1");
        assert_eq!(
            property.option_label(),
            "A-101 · Apartment · 1 250 000.00 · Reserved"
        );
    }
}
