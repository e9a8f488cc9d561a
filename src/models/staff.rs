//! Staff records and the create-staff DTO.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique key of a staff record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffId(pub String);

impl From<&str> for StaffId {
    fn from(value: &str) -> Self {
        StaffId(value.to_string())
    }
}

impl fmt::Display for StaffId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Access role of a staff member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    SuperAdmin,
    #[default]
    Staff,
}

impl Role {
    /// Roles offered by the registration form, in display order.
    pub const ALL: [Role; 2] = [Role::SuperAdmin, Role::Staff];

    /// Wire and display name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Staff => "STAFF",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single staff entry as shown in the staff table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: StaffId,
    pub email: String,
    pub faculty: String,
    pub department: String,
    pub role: Role,
}

/// DTO for registering a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateStaff {
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_names() {
        assert_eq!(serde_json::to_string(&Role::SuperAdmin).unwrap(), "\"SUPER_ADMIN\"");
        assert_eq!(serde_json::to_string(&Role::Staff).unwrap(), "\"STAFF\"");
        assert_eq!(serde_json::from_str::<Role>("\"STAFF\"").unwrap(), Role::Staff);
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        assert!(serde_json::from_str::<Role>("\"STUDENT\"").is_err());
    }

    #[test]
    fn test_create_staff_body() {
        let body = CreateStaff {
            email: "new@uni.edu".to_string(),
            password: "secret".to_string(),
            role: Role::SuperAdmin,
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"email": "new@uni.edu", "password": "secret", "role": "SUPER_ADMIN"})
        );
    }
}
