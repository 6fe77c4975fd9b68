use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::Entity;

/// Role assigned to a CRM account.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,
    Manager,
    User,
}

impl UserRole {
    /// Return the canonical string representation used on the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::User => "USER",
        }
    }

    /// Human readable label for navigation and profile views.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrator",
            Self::Manager => "Manager",
            Self::User => "User",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "USER" => Ok(Self::User),
            _ => Err("unknown user role"),
        }
    }
}

/// Profile of the signed-in user as returned by `GET /users/me`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identifier for the user.
    pub id: i64,

    /// The user's email address.
    pub email: String,

    /// Full name shown in the navigation bar and profile page.
    #[serde(rename = "fullName")]
    pub display_name: String,

    /// Role controlling which routes are reachable.
    pub role: UserRole,
}

impl User {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

impl Entity for User {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_deserializes_backend_profile() {
        let json = r#"{
            "id": 42,
            "email": "admin@crm.com",
            "fullName": "Admin User",
            "role": "ADMIN",
            "active": true,
            "createdAt": "2024-01-20T10:00:00"
        }"#;
        let user: User = serde_json::from_str(json).unwrap();

        assert_eq!(user.id, 42);
        assert_eq!(user.email, "admin@crm.com");
        assert_eq!(user.display_name, "Admin User");
        assert_eq!(user.role, UserRole::Admin);
        assert!(user.is_admin());
    }

    #[test]
    fn user_serializes_full_name() {
        let user = User {
            id: 1,
            email: "user@crm.com".to_string(),
            display_name: "Plain User".to_string(),
            role: UserRole::User,
        };
        let json = serde_json::to_value(&user).unwrap();

        assert_eq!(json["fullName"], "Plain User");
        assert_eq!(json["role"], "USER");
        assert!(!user.is_admin());
    }

    #[test]
    fn user_role_roundtrip() {
        for (text, role) in [
            ("ADMIN", UserRole::Admin),
            ("MANAGER", UserRole::Manager),
            ("USER", UserRole::User),
        ] {
            assert_eq!(role.as_str(), text);
            assert_eq!(role.to_string(), text);
            assert_eq!(UserRole::from_str(text).unwrap(), role);
        }
    }

    #[test]
    fn user_role_invalid() {
        assert!(UserRole::from_str("guest").is_err());
        assert!(serde_json::from_str::<UserRole>("\"GUEST\"").is_err());
    }
}
