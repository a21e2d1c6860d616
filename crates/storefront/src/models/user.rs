//! User domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use hemline_core::{Email, UserId};

/// A storefront user (domain type).
///
/// The password hash is deliberately not part of this type; repositories
/// return it separately where login needs it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// User's email address.
    pub email: Email,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Street address.
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    /// When the user was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Partial profile update.
///
/// `None` fields are left untouched; present fields overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub zip_code: Option<String>,
}

impl ProfileUpdate {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.phone.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.country.is_none()
            && self.zip_code.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_is_empty() {
        assert!(ProfileUpdate::default().is_empty());

        let update = ProfileUpdate {
            city: Some("Kuala Lumpur".to_string()),
            ..ProfileUpdate::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: UserId::new(1),
            name: "Aisyah".to_string(),
            email: Email::parse("aisyah@example.com").unwrap(),
            phone: None,
            address: None,
            city: None,
            country: None,
            zip_code: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("zipCode").is_some());
        assert!(json.get("zip_code").is_none());
    }
}
