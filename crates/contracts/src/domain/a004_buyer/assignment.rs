use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::a002_property::PropertySnapshot;

/// Allowed absolute difference between the installment total and the sold price
pub const PRICE_TOLERANCE: f64 = 0.01;

/// Upper bound for an even split (thirty years of monthly payments)
pub const MAX_INSTALLMENTS: u32 = 360;

// ============================================================================
// Submitted payload
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstallmentStatus {
    #[default]
    Pending,
    Paid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Installment {
    pub number: u32,
    pub due_date: NaiveDate,
    pub amount: f64,
    #[serde(default)]
    pub status: InstallmentStatus,
}

/// Property sold to a buyer, sent with the create/update buyer request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyAssignment {
    pub project_id: String,
    pub property_id: String,
    #[serde(default)]
    pub broker_ids: Vec<String>,
    pub sold_price: f64,
    #[serde(default)]
    pub property_data: Option<PropertySnapshot>,
    pub instalments: Vec<Installment>,
}

impl PropertyAssignment {
    pub fn paid_total(&self) -> f64 {
        self.instalments
            .iter()
            .filter(|i| i.status == InstallmentStatus::Paid)
            .map(|i| i.amount)
            .sum()
    }
}

// ============================================================================
// Validation
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssignmentError {
    #[error("Select a property for the chosen project")]
    MissingProperty,

    #[error("Sold price must be greater than zero")]
    InvalidSoldPrice,

    #[error("Add at least one installment")]
    NoInstallments,

    #[error("Installment #{number} needs an amount and a due date")]
    IncompleteInstallment { number: u32 },

    #[error("Installments add up to {total:.2}, sold price is {sold_price:.2}")]
    TotalMismatch { total: f64, sold_price: f64 },

    #[error("A schedule can have at most {max} installments")]
    TooManyInstallments { max: u32 },
}

// ============================================================================
// Form draft
// ============================================================================

/// Editable installment row; `key` stays stable while rows are renumbered
#[derive(Debug, Clone, PartialEq)]
pub struct InstallmentDraft {
    pub key: Uuid,
    pub number: u32,
    pub due_date: Option<NaiveDate>,
    pub amount: Option<f64>,
    pub status: InstallmentStatus,
}

impl InstallmentDraft {
    pub fn blank(number: u32) -> Self {
        Self {
            key: Uuid::new_v4(),
            number,
            due_date: None,
            amount: None,
            status: InstallmentStatus::Pending,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.due_date.is_some() && self.amount.map_or(false, |a| a > 0.0)
    }
}

/// Client-side state of the property-assignment sub-form.
///
/// With no project selected the assignment is absent and always valid.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDraft {
    pub project_id: String,
    pub property_id: String,
    pub broker_ids: Vec<String>,
    pub sold_price: Option<f64>,
    pub property_data: Option<PropertySnapshot>,
    pub instalments: Vec<InstallmentDraft>,
}

impl Default for AssignmentDraft {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            property_id: String::new(),
            broker_ids: Vec::new(),
            sold_price: None,
            property_data: None,
            instalments: vec![InstallmentDraft::blank(1)],
        }
    }
}

impl AssignmentDraft {
    pub fn is_active(&self) -> bool {
        !self.project_id.trim().is_empty()
    }

    /// Selecting another project invalidates the property picked for the previous one
    pub fn set_project(&mut self, project_id: impl Into<String>) {
        let project_id = project_id.into();
        if project_id != self.project_id {
            self.property_id.clear();
            self.property_data = None;
        }
        self.project_id = project_id;
    }

    pub fn set_property(&mut self, property_id: impl Into<String>, snapshot: Option<PropertySnapshot>) {
        self.property_id = property_id.into();
        self.property_data = if self.property_id.is_empty() {
            None
        } else {
            snapshot
        };
    }

    pub fn set_sold_price(&mut self, sold_price: Option<f64>) {
        self.sold_price = sold_price;
    }

    pub fn set_brokers(&mut self, broker_ids: Vec<String>) {
        self.broker_ids = broker_ids;
    }

    pub fn add_installment(&mut self) {
        self.instalments.push(InstallmentDraft::blank(0));
        self.renumber();
    }

    /// Removes a row; the last remaining row is kept.
    pub fn remove_installment(&mut self, key: Uuid) -> bool {
        if self.instalments.len() <= 1 {
            return false;
        }
        let before = self.instalments.len();
        self.instalments.retain(|i| i.key != key);
        self.renumber();
        self.instalments.len() != before
    }

    pub fn update_installment(&mut self, key: Uuid, edit: impl FnOnce(&mut InstallmentDraft)) {
        if let Some(row) = self.instalments.iter_mut().find(|i| i.key == key) {
            edit(row);
        }
        self.renumber();
    }

    pub fn renumber(&mut self) {
        for (idx, row) in self.instalments.iter_mut().enumerate() {
            row.number = idx as u32 + 1;
        }
    }

    pub fn installment_total(&self) -> f64 {
        self.instalments.iter().filter_map(|i| i.amount).sum()
    }

    /// Sold price not yet covered by installments (negative when over-allocated)
    pub fn remaining(&self) -> f64 {
        self.sold_price.unwrap_or(0.0) - self.installment_total()
    }

    pub fn validate(&self) -> Result<(), AssignmentError> {
        if !self.is_active() {
            return Ok(());
        }
        if self.property_id.trim().is_empty() {
            return Err(AssignmentError::MissingProperty);
        }
        let sold_price = match self.sold_price {
            Some(price) if price > 0.0 => price,
            _ => return Err(AssignmentError::InvalidSoldPrice),
        };
        if self.instalments.is_empty() {
            return Err(AssignmentError::NoInstallments);
        }
        if let Some(row) = self.instalments.iter().find(|i| !i.is_complete()) {
            return Err(AssignmentError::IncompleteInstallment { number: row.number });
        }
        let total = self.installment_total();
        if (total - sold_price).abs() > PRICE_TOLERANCE {
            return Err(AssignmentError::TotalMismatch { total, sold_price });
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Serializable assignment, or `None` when absent or not yet valid
    pub fn to_payload(&self) -> Option<PropertyAssignment> {
        if !self.is_active() || !self.is_valid() {
            return None;
        }
        let instalments = self
            .instalments
            .iter()
            .filter_map(|row| {
                Some(Installment {
                    number: row.number,
                    due_date: row.due_date?,
                    amount: row.amount?,
                    status: row.status,
                })
            })
            .collect();

        Some(PropertyAssignment {
            project_id: self.project_id.trim().to_string(),
            property_id: self.property_id.trim().to_string(),
            broker_ids: self.broker_ids.clone(),
            sold_price: self.sold_price.unwrap_or_default(),
            property_data: self.property_data.clone(),
            instalments,
        })
    }

    pub fn from_payload(assignment: &PropertyAssignment) -> Self {
        let mut instalments: Vec<InstallmentDraft> = assignment
            .instalments
            .iter()
            .map(|i| InstallmentDraft {
                key: Uuid::new_v4(),
                number: i.number,
                due_date: Some(i.due_date),
                amount: Some(i.amount),
                status: i.status,
            })
            .collect();
        if instalments.is_empty() {
            instalments.push(InstallmentDraft::blank(1));
        }

        let mut draft = Self {
            project_id: assignment.project_id.clone(),
            property_id: assignment.property_id.clone(),
            broker_ids: assignment.broker_ids.clone(),
            sold_price: Some(assignment.sold_price),
            property_data: assignment.property_data.clone(),
            instalments,
        };
        draft.renumber();
        draft
    }

    /// Replaces the schedule with `count` monthly installments covering the sold price.
    ///
    /// Amounts are rounded to cents; the rounding remainder goes to the last one.
    pub fn split_evenly(&mut self, count: u32, first_due: NaiveDate) -> Result<(), AssignmentError> {
        let sold_price = match self.sold_price {
            Some(price) if price > 0.0 => price,
            _ => return Err(AssignmentError::InvalidSoldPrice),
        };
        if count > MAX_INSTALLMENTS {
            return Err(AssignmentError::TooManyInstallments { max: MAX_INSTALLMENTS });
        }
        let count = count.max(1);
        let total_cents = (sold_price * 100.0).round() as i64;
        let base = total_cents / i64::from(count);
        let last = total_cents - base * i64::from(count - 1);

        self.instalments = (0..count)
            .map(|idx| {
                let cents = if idx + 1 == count { last } else { base };
                InstallmentDraft {
                    key: Uuid::new_v4(),
                    number: idx + 1,
                    due_date: first_due.checked_add_months(Months::new(idx)),
                    amount: Some(cents as f64 / 100.0),
                    status: InstallmentStatus::Pending,
                }
            })
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(amount: f64, due: &str) -> InstallmentDraft {
        InstallmentDraft {
            key: Uuid::new_v4(),
            number: 0,
            due_date: Some(date(due)),
            amount: Some(amount),
            status: InstallmentStatus::Pending,
        }
    }

    fn draft(project: &str, property: &str, price: f64, rows: Vec<InstallmentDraft>) -> AssignmentDraft {
        let mut d = AssignmentDraft {
            project_id: project.into(),
            property_id: property.into(),
            broker_ids: vec![],
            sold_price: Some(price),
            property_data: None,
            instalments: rows,
        };
        d.renumber();
        d
    }

    #[test]
    fn no_project_is_always_valid() {
        let d = draft("", "", -5.0, vec![]);
        assert!(d.is_valid());
        assert_eq!(d.to_payload(), None);
        assert!(AssignmentDraft::default().is_valid());
    }

    #[test]
    fn missing_property_is_invalid() {
        let d = draft("P1", "", 100000.0, vec![row(100000.0, "2025-01-01")]);
        assert_eq!(d.validate(), Err(AssignmentError::MissingProperty));

        let d = draft("P1", "U1", 100000.0, vec![row(100000.0, "2025-01-01")]);
        assert!(d.is_valid());
    }

    #[test]
    fn total_must_match_within_tolerance() {
        let rows = || vec![row(60000.0, "2025-01-01"), row(40000.0, "2025-02-01")];
        assert!(draft("P1", "U1", 100000.005, rows()).is_valid());

        let d = draft("P1", "U1", 100000.02, rows());
        assert!(matches!(d.validate(), Err(AssignmentError::TotalMismatch { .. })));
    }

    #[test]
    fn price_and_rows_are_required() {
        let d = draft("P1", "U1", 0.0, vec![row(1.0, "2025-01-01")]);
        assert_eq!(d.validate(), Err(AssignmentError::InvalidSoldPrice));

        let d = draft("P1", "U1", 10.0, vec![]);
        assert_eq!(d.validate(), Err(AssignmentError::NoInstallments));

        let mut incomplete = row(5.0, "2025-01-01");
        incomplete.due_date = None;
        let d = draft("P1", "U1", 10.0, vec![row(5.0, "2025-01-01"), incomplete]);
        assert_eq!(
            d.validate(),
            Err(AssignmentError::IncompleteInstallment { number: 2 })
        );
    }

    #[test]
    fn changing_project_resets_property() {
        let mut d = draft("P1", "U1", 10.0, vec![row(10.0, "2025-01-01")]);
        d.property_data = Some(PropertySnapshot {
            unit_number: "A-101".into(),
            property_type: None,
            area: None,
            price: None,
            project_name: None,
        });

        d.set_project("P1");
        assert_eq!(d.property_id, "U1");

        d.set_project("P2");
        assert!(d.property_id.is_empty());
        assert!(d.property_data.is_none());
        assert_eq!(d.validate(), Err(AssignmentError::MissingProperty));
    }

    #[test]
    fn rows_are_renumbered_and_last_one_kept() {
        let mut d = AssignmentDraft::default();
        d.add_installment();
        d.add_installment();
        let numbers: Vec<u32> = d.instalments.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);

        let middle = d.instalments[1].key;
        assert!(d.remove_installment(middle));
        let numbers: Vec<u32> = d.instalments.iter().map(|i| i.number).collect();
        assert_eq!(numbers, vec![1, 2]);

        let first = d.instalments[0].key;
        let second = d.instalments[1].key;
        assert!(d.remove_installment(first));
        assert!(!d.remove_installment(second));
        assert_eq!(d.instalments.len(), 1);
        assert_eq!(d.instalments[0].number, 1);
    }

    #[test]
    fn payload_round_trips_through_draft() {
        let d = draft("P1", "U1", 100.0, vec![row(30.0, "2025-01-15"), row(70.0, "2025-02-15")]);
        let payload = d.to_payload().expect("valid draft");
        assert_eq!(payload.instalments.len(), 2);
        assert_eq!(payload.instalments[1].number, 2);

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["soldPrice"], 100.0);
        assert_eq!(json["instalments"][0]["dueDate"], "2025-01-15");
        assert_eq!(json["instalments"][0]["status"], "pending");

        let back = AssignmentDraft::from_payload(&payload);
        assert_eq!(back.to_payload(), Some(payload));
    }

    #[test]
    fn split_evenly_covers_price_exactly() {
        let mut d = draft("P1", "U1", 1000.0, vec![]);
        d.split_evenly(3, date("2025-01-31")).unwrap();
        let amounts: Vec<f64> = d.instalments.iter().filter_map(|i| i.amount).collect();
        assert_eq!(amounts, vec![333.33, 333.33, 333.34]);
        assert_eq!(d.instalments[1].due_date, Some(date("2025-02-28")));
        assert_eq!(d.instalments[2].due_date, Some(date("2025-03-31")));
        assert!(d.is_valid());

        let mut no_price = AssignmentDraft::default();
        assert_eq!(
            no_price.split_evenly(2, date("2025-01-01")),
            Err(AssignmentError::InvalidSoldPrice)
        );
    }

    #[test]
    fn split_evenly_rejects_runaway_count() {
        let mut d = draft("P1", "U1", 1000.0, vec![row(1000.0, "2025-01-01")]);
        assert_eq!(
            d.split_evenly(1_000_000, date("2025-01-01")),
            Err(AssignmentError::TooManyInstallments { max: MAX_INSTALLMENTS })
        );
        // existing schedule untouched
        assert_eq!(d.instalments.len(), 1);

        d.split_evenly(MAX_INSTALLMENTS, date("2025-01-01")).unwrap();
        assert_eq!(d.instalments.len(), MAX_INSTALLMENTS as usize);
        assert!(d.is_valid());
    }
}
