use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ============================================================================
// Resources & actions
// ============================================================================

/// Back-office area an admin can be granted access to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Dashboard,
    Admins,
    Buyers,
    Brokers,
    Suppliers,
    Projects,
    Properties,
    Documents,
    Marketing,
    Notifications,
    Products,
    Inventory,
    Payments,
    Settings,
}

impl Resource {
    /// All resources in matrix row order
    pub const ALL: [Resource; 14] = [
        Resource::Dashboard,
        Resource::Admins,
        Resource::Buyers,
        Resource::Brokers,
        Resource::Suppliers,
        Resource::Projects,
        Resource::Properties,
        Resource::Documents,
        Resource::Marketing,
        Resource::Notifications,
        Resource::Products,
        Resource::Inventory,
        Resource::Payments,
        Resource::Settings,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Resource::Dashboard => "dashboard",
            Resource::Admins => "admins",
            Resource::Buyers => "buyers",
            Resource::Brokers => "brokers",
            Resource::Suppliers => "suppliers",
            Resource::Projects => "projects",
            Resource::Properties => "properties",
            Resource::Documents => "documents",
            Resource::Marketing => "marketing",
            Resource::Notifications => "notifications",
            Resource::Products => "products",
            Resource::Inventory => "inventory",
            Resource::Payments => "payments",
            Resource::Settings => "settings",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Resource::Dashboard => "Dashboard",
            Resource::Admins => "Admins",
            Resource::Buyers => "Buyers",
            Resource::Brokers => "Brokers",
            Resource::Suppliers => "Suppliers",
            Resource::Projects => "Projects",
            Resource::Properties => "Properties",
            Resource::Documents => "Documents",
            Resource::Marketing => "Marketing",
            Resource::Notifications => "Notifications",
            Resource::Products => "Products",
            Resource::Inventory => "Inventory",
            Resource::Payments => "Payments",
            Resource::Settings => "Settings",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Resource::ALL.into_iter().find(|r| r.code() == code)
    }
}

/// CRUD action on a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    /// All actions in matrix column order
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn code(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Action::Create => "Create",
            Action::Read => "Read",
            Action::Update => "Update",
            Action::Delete => "Delete",
        }
    }
}

// ============================================================================
// Permission record
// ============================================================================

/// One row of the access matrix.
///
/// Lists of records are sparse: a resource appears at most once and a record
/// never carries an empty action set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionRecord {
    pub resource: Resource,
    pub actions: BTreeSet<Action>,
}

impl PermissionRecord {
    pub fn new(resource: Resource, actions: impl IntoIterator<Item = Action>) -> Self {
        Self {
            resource,
            actions: actions.into_iter().collect(),
        }
    }

    /// Record granting every action on `resource`
    pub fn full(resource: Resource) -> Self {
        Self::new(resource, Action::ALL)
    }

    pub fn is_full(&self) -> bool {
        Action::ALL.iter().all(|a| self.actions.contains(a))
    }
}

fn position_of(records: &[PermissionRecord], resource: Resource) -> Option<usize> {
    records.iter().position(|r| r.resource == resource)
}

/// Inserts a new record keeping resource order for lists that are already ordered
fn insert_ordered(records: &mut Vec<PermissionRecord>, record: PermissionRecord) {
    let idx = records
        .iter()
        .position(|r| r.resource > record.resource)
        .unwrap_or(records.len());
    records.insert(idx, record);
}

pub fn actions_for(records: &[PermissionRecord], resource: Resource) -> Option<&BTreeSet<Action>> {
    records
        .iter()
        .find(|r| r.resource == resource)
        .map(|r| &r.actions)
}

pub fn has_permission(records: &[PermissionRecord], resource: Resource, action: Action) -> bool {
    actions_for(records, resource)
        .map(|actions| actions.contains(&action))
        .unwrap_or(false)
}

pub fn is_row_full(records: &[PermissionRecord], resource: Resource) -> bool {
    records
        .iter()
        .find(|r| r.resource == resource)
        .map(PermissionRecord::is_full)
        .unwrap_or(false)
}

pub fn is_column_full(records: &[PermissionRecord], action: Action) -> bool {
    Resource::ALL
        .iter()
        .all(|resource| has_permission(records, *resource, action))
}

/// Flips a single `(resource, action)` cell.
///
/// A record whose last action is removed is dropped from the list.
pub fn toggle_cell(
    records: &[PermissionRecord],
    resource: Resource,
    action: Action,
) -> Vec<PermissionRecord> {
    let mut out = records.to_vec();
    match position_of(&out, resource) {
        Some(idx) => {
            let record = &mut out[idx];
            if !record.actions.remove(&action) {
                record.actions.insert(action);
            }
            if record.actions.is_empty() {
                out.remove(idx);
            }
        }
        None => insert_ordered(&mut out, PermissionRecord::new(resource, [action])),
    }
    out
}

/// Full on/off toggle of a row: a full row is cleared, anything else becomes full.
pub fn toggle_row(records: &[PermissionRecord], resource: Resource) -> Vec<PermissionRecord> {
    let mut out = records.to_vec();
    if is_row_full(&out, resource) {
        out.retain(|r| r.resource != resource);
        return out;
    }
    match position_of(&out, resource) {
        Some(idx) => out[idx] = PermissionRecord::full(resource),
        None => insert_ordered(&mut out, PermissionRecord::full(resource)),
    }
    out
}

/// Grants `action` on every resource.
///
/// Add-only: unlike [`toggle_row`] it never revokes, so applying it twice is
/// the same as applying it once.
pub fn toggle_column(records: &[PermissionRecord], action: Action) -> Vec<PermissionRecord> {
    let mut out = records.to_vec();
    for resource in Resource::ALL {
        match position_of(&out, resource) {
            Some(idx) => {
                out[idx].actions.insert(action);
            }
            None => insert_ordered(&mut out, PermissionRecord::new(resource, [action])),
        }
    }
    out
}

/// Merges duplicate resources, drops empty records and sorts by resource.
///
/// Used on lists coming from the server before they reach the editor.
pub fn normalize(records: &[PermissionRecord]) -> Vec<PermissionRecord> {
    let mut out: Vec<PermissionRecord> = Vec::new();
    for record in records {
        match position_of(&out, record.resource) {
            Some(idx) => out[idx].actions.extend(record.actions.iter().copied()),
            None => out.push(record.clone()),
        }
    }
    out.retain(|r| !r.actions.is_empty());
    out.sort_by_key(|r| r.resource);
    out
}

/// Number of checked cells in the matrix
pub fn granted_count(records: &[PermissionRecord]) -> usize {
    records.iter().map(|r| r.actions.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_empty_records(records: &[PermissionRecord]) -> bool {
        records.iter().all(|r| !r.actions.is_empty())
    }

    fn unique_resources(records: &[PermissionRecord]) -> bool {
        let set: BTreeSet<Resource> = records.iter().map(|r| r.resource).collect();
        set.len() == records.len()
    }

    #[test]
    fn toggle_cell_adds_and_removes() {
        let list = toggle_cell(&[], Resource::Buyers, Action::Read);
        assert_eq!(list, vec![PermissionRecord::new(Resource::Buyers, [Action::Read])]);

        let list = toggle_cell(&list, Resource::Buyers, Action::Update);
        assert!(has_permission(&list, Resource::Buyers, Action::Update));
        assert_eq!(list.len(), 1);

        let list = toggle_cell(&list, Resource::Buyers, Action::Read);
        let list = toggle_cell(&list, Resource::Buyers, Action::Update);
        assert!(list.is_empty());
    }

    #[test]
    fn toggle_cell_never_leaves_empty_records() {
        let mut list = Vec::new();
        let steps = [
            (Resource::Admins, Action::Create),
            (Resource::Admins, Action::Delete),
            (Resource::Payments, Action::Read),
            (Resource::Admins, Action::Create),
            (Resource::Payments, Action::Read),
            (Resource::Admins, Action::Delete),
            (Resource::Settings, Action::Update),
        ];
        for (resource, action) in steps {
            list = toggle_cell(&list, resource, action);
            assert!(no_empty_records(&list));
            assert!(unique_resources(&list));
        }
        assert_eq!(list, vec![PermissionRecord::new(Resource::Settings, [Action::Update])]);
    }

    #[test]
    fn toggle_row_is_involution_from_full_and_absent() {
        let base = vec![
            PermissionRecord::new(Resource::Dashboard, [Action::Read]),
            PermissionRecord::full(Resource::Buyers),
            PermissionRecord::new(Resource::Documents, [Action::Create, Action::Read]),
        ];

        // full row
        let once = toggle_row(&base, Resource::Buyers);
        assert!(actions_for(&once, Resource::Buyers).is_none());
        assert_eq!(toggle_row(&once, Resource::Buyers), base);

        // absent row
        let once = toggle_row(&base, Resource::Brokers);
        assert!(is_row_full(&once, Resource::Brokers));
        assert_eq!(toggle_row(&once, Resource::Brokers), base);
    }

    #[test]
    fn toggle_row_fills_partial_row() {
        let base = vec![PermissionRecord::new(Resource::Projects, [Action::Read])];
        let list = toggle_row(&base, Resource::Projects);
        assert_eq!(list, vec![PermissionRecord::full(Resource::Projects)]);
    }

    #[test]
    fn toggle_column_is_add_only_and_idempotent() {
        let base = vec![
            PermissionRecord::new(Resource::Admins, [Action::Delete]),
            PermissionRecord::new(Resource::Buyers, [Action::Read, Action::Update]),
        ];
        let once = toggle_column(&base, Action::Read);
        assert_eq!(once.len(), Resource::ALL.len());
        assert!(is_column_full(&once, Action::Read));
        // other actions untouched
        assert!(has_permission(&once, Resource::Admins, Action::Delete));
        assert!(has_permission(&once, Resource::Buyers, Action::Update));
        assert!(!has_permission(&once, Resource::Settings, Action::Delete));

        let twice = toggle_column(&once, Action::Read);
        assert_eq!(once, twice);
    }

    #[test]
    fn new_records_follow_resource_order() {
        let list = toggle_cell(&[], Resource::Settings, Action::Read);
        let list = toggle_cell(&list, Resource::Dashboard, Action::Read);
        let list = toggle_cell(&list, Resource::Projects, Action::Read);
        let order: Vec<Resource> = list.iter().map(|r| r.resource).collect();
        assert_eq!(order, vec![Resource::Dashboard, Resource::Projects, Resource::Settings]);
    }

    #[test]
    fn normalize_merges_and_drops_empty() {
        let raw = vec![
            PermissionRecord::new(Resource::Payments, [Action::Read]),
            PermissionRecord::new(Resource::Admins, []),
            PermissionRecord::new(Resource::Payments, [Action::Update]),
        ];
        let list = normalize(&raw);
        assert_eq!(
            list,
            vec![PermissionRecord::new(Resource::Payments, [Action::Read, Action::Update])]
        );
        assert_eq!(granted_count(&list), 2);
    }

    #[test]
    fn serde_uses_snake_case_codes() {
        let record = PermissionRecord::new(Resource::Notifications, [Action::Read, Action::Create]);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"resource":"notifications","actions":["create","read"]}"#);
        assert_eq!(Resource::from_code("inventory"), Some(Resource::Inventory));
        assert_eq!(Resource::from_code("unknown"), None);
    }
}
