//! Signed-in identity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use aachar_core::{Email, Role, UserId};

/// Who is using the console.
///
/// Fabricated by the identity provider and held only for the session; it is
/// gone after logout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub email: Email,
    /// Display name.
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Upper-cased first character of the display name, used as the avatar.
    #[must_use]
    pub fn initial(&self) -> Option<char> {
        self.name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
    }

    /// Whether this identity may manage the catalog.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn identity(name: &str) -> Identity {
        Identity {
            id: UserId::generate(),
            email: Email::parse("priya@aachar.in").unwrap(),
            name: name.to_string(),
            role: Role::Admin,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_initial_is_uppercased() {
        assert_eq!(identity("priya").initial(), Some('P'));
    }

    #[test]
    fn test_initial_of_blank_name() {
        assert_eq!(identity("  ").initial(), None);
    }

    #[test]
    fn test_is_admin() {
        assert!(identity("Admin User").is_admin());
    }
}
