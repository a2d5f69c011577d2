use std::fmt;
use std::str::FromStr;

use crate::{error::ModelError, ids::UserID};

/// Roles a catalog account can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UserRole {
    Admin,
    Moderator,
    User,
}

/// Access tiers used by route guards.
///
/// `LevelOne` is any signed-in account, `LevelTwo` adds curation rights,
/// `LevelThree` is administration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessLevel {
    LevelOne,
    LevelTwo,
    LevelThree,
}

impl UserRole {
    pub const fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "Admin",
            UserRole::Moderator => "Moderator",
            UserRole::User => "User",
        }
    }

    pub fn satisfies(&self, level: AccessLevel) -> bool {
        match level {
            AccessLevel::LevelOne => true,
            AccessLevel::LevelTwo => {
                matches!(self, UserRole::Admin | UserRole::Moderator)
            }
            AccessLevel::LevelThree => matches!(self, UserRole::Admin),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(UserRole::Admin),
            "moderator" => Ok(UserRole::Moderator),
            "user" => Ok(UserRole::User),
            _ => Err(ModelError::UnknownVariant {
                kind: "user role",
                value: s.to_string(),
            }),
        }
    }
}

/// An already-authenticated caller, handed to the engine as a capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewer {
    pub user_id: UserID,
    pub role: UserRole,
}

impl Viewer {
    pub fn new(user_id: UserID, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn can(&self, level: AccessLevel) -> bool {
        self.role.satisfies(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_levels_nest() {
        assert!(UserRole::User.satisfies(AccessLevel::LevelOne));
        assert!(!UserRole::User.satisfies(AccessLevel::LevelTwo));
        assert!(UserRole::Moderator.satisfies(AccessLevel::LevelTwo));
        assert!(!UserRole::Moderator.satisfies(AccessLevel::LevelThree));
        assert!(UserRole::Admin.satisfies(AccessLevel::LevelThree));
    }

    #[test]
    fn role_parses_any_case() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert!("guest".parse::<UserRole>().is_err());
    }
}
