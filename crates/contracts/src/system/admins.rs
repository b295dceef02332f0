use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::permissions::{self, Action, PermissionRecord, Resource};

pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validation errors raised before an admin form is submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminValidationError {
    #[error("Name is required")]
    EmptyName,

    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),

    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

fn check_identity(name: &str, email: &str) -> Result<(), AdminValidationError> {
    if name.trim().is_empty() {
        return Err(AdminValidationError::EmptyName);
    }
    if !is_valid_email(email) {
        return Err(AdminValidationError::InvalidEmail(email.trim().to_string()));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdminRole {
    /// Bypasses the permission matrix
    SuperAdmin,
    #[default]
    Admin,
}

impl AdminRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            AdminRole::SuperAdmin => "Super admin",
            AdminRole::Admin => "Admin",
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub role: AdminRole,
    #[serde(default)]
    pub permissions: Vec<PermissionRecord>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub last_login_at: Option<String>,
}

impl Admin {
    /// Server lists may contain duplicate or empty records from older clients
    pub fn normalized_permissions(&self) -> Vec<PermissionRecord> {
        permissions::normalize(&self.permissions)
    }

    /// Super admins pass every check
    pub fn can(&self, resource: Resource, action: Action) -> bool {
        self.role == AdminRole::SuperAdmin
            || permissions::has_permission(&self.permissions, resource, action)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAdminDto {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: AdminRole,
    pub permissions: Vec<PermissionRecord>,
}

impl CreateAdminDto {
    pub fn validate(&self) -> Result<(), AdminValidationError> {
        check_identity(&self.name, &self.email)?;
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdminValidationError::PasswordTooShort {
                min: MIN_PASSWORD_LEN,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAdminDto {
    #[serde(skip_serializing)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: AdminRole,
    pub permissions: Vec<PermissionRecord>,
    pub is_active: bool,
    /// Only sent when the password is being reset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl UpdateAdminDto {
    pub fn validate(&self) -> Result<(), AdminValidationError> {
        check_identity(&self.name, &self.email)?;
        if let Some(password) = &self.password {
            if password.chars().count() < MIN_PASSWORD_LEN {
                return Err(AdminValidationError::PasswordTooShort {
                    min: MIN_PASSWORD_LEN,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_dto() -> CreateAdminDto {
        CreateAdminDto {
            name: "Dana".into(),
            email: "dana@example.com".into(),
            password: "secret1".into(),
            role: AdminRole::Admin,
            permissions: vec![PermissionRecord::new(Resource::Buyers, [Action::Read])],
        }
    }

    #[test]
    fn super_admin_bypasses_matrix() {
        let mut admin = Admin {
            id: "1".into(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            role: AdminRole::Admin,
            permissions: vec![PermissionRecord::new(Resource::Buyers, [Action::Read])],
            is_active: true,
            created_at: None,
            last_login_at: None,
        };
        assert!(admin.can(Resource::Buyers, Action::Read));
        assert!(!admin.can(Resource::Admins, Action::Read));
        admin.role = AdminRole::SuperAdmin;
        assert!(admin.can(Resource::Admins, Action::Delete));
    }

    #[test]
    fn email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("  sales.team@estate.example.org "));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("no-at.example.com"));
        assert!(!is_valid_email("two words@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn create_validation() {
        assert_eq!(create_dto().validate(), Ok(()));

        let mut dto = create_dto();
        dto.name = "  ".into();
        assert_eq!(dto.validate(), Err(AdminValidationError::EmptyName));

        let mut dto = create_dto();
        dto.email = "dana".into();
        assert_eq!(
            dto.validate(),
            Err(AdminValidationError::InvalidEmail("dana".into()))
        );

        let mut dto = create_dto();
        dto.password = "123".into();
        assert_eq!(
            dto.validate(),
            Err(AdminValidationError::PasswordTooShort { min: 6 })
        );
    }

    #[test]
    fn update_skips_id_and_empty_password() {
        let dto = UpdateAdminDto {
            id: "a1".into(),
            name: "Dana".into(),
            email: "dana@example.com".into(),
            role: AdminRole::SuperAdmin,
            permissions: vec![],
            is_active: false,
            password: None,
        };
        assert_eq!(dto.validate(), Ok(()));
        let json = serde_json::to_value(&dto).unwrap();
        assert!(json.get("id").is_none());
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "super_admin");
        assert_eq!(json["isActive"], false);
    }

    #[test]
    fn admin_reads_mongo_style_id() {
        let admin: Admin = serde_json::from_str(
            r#"{"_id":"65f0","name":"Dana","email":"dana@example.com"}"#,
        )
        .unwrap();
        assert_eq!(admin.id, "65f0");
        assert_eq!(admin.role, AdminRole::Admin);
        assert!(admin.is_active);
        assert!(admin.permissions.is_empty());
    }
}
