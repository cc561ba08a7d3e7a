//! Staff (petugas) domain models and auth requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Access-control role carried in the bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Doctor,
    Clinic,
    Lab,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Doctor => "doctor",
            Role::Clinic => "clinic",
            Role::Lab => "lab",
        }
    }
}

impl TryFrom<String> for Role {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "admin" => Ok(Role::Admin),
            "doctor" => Ok(Role::Doctor),
            "clinic" => Ok(Role::Clinic),
            "lab" => Ok(Role::Lab),
            _ => Err(format!("invalid role: {value}")),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Staff {
    pub id: i32,
    #[serde(rename = "poli_id")]
    pub clinic_id: Option<i32>,
    pub username: String,
    pub name: String,
    pub status: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    #[serde(rename = "wajib_ganti_password")]
    pub must_change_password: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStaffRequest {
    #[validate(length(min = 5, message = "username must be at least 5 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = super::validate_status))]
    pub status: String,
    pub role: Role,
    #[serde(rename = "poli_id")]
    pub clinic_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateStaffRequest {
    #[validate(length(min = 5, message = "username must be at least 5 characters"))]
    pub username: String,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(custom(function = super::validate_status))]
    pub status: String,
    pub role: Role,
    #[serde(rename = "poli_id")]
    pub clinic_id: Option<i32>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "old_password is required"))]
    pub old_password: String,
    #[validate(length(min = 8, message = "new_password must be at least 8 characters"))]
    pub new_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_text() {
        for role in [Role::Admin, Role::Doctor, Role::Clinic, Role::Lab] {
            assert_eq!(Role::try_from(role.as_str().to_string()).unwrap(), role);
        }
        assert!(Role::try_from("superuser".to_string()).is_err());
    }

    #[test]
    fn staff_response_hides_password_hash() {
        let staff = Staff {
            id: 1,
            clinic_id: None,
            username: "admin".into(),
            name: "Head Admin".into(),
            status: "active".into(),
            role: Role::Admin,
            password_hash: "salt$digest".into(),
            must_change_password: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&staff).unwrap();
        assert!(value.get("password_hash").is_none());
        assert_eq!(value["role"], "admin");
    }
}
