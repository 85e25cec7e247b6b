//! Actor and role types shared by every lifecycle component.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Surrogate identifier of a marketplace user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Wraps a persisted user identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Returns the underlying numeric value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Marketplace role held by a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Posts jobs and hires taskers.
    Customer,
    /// Applies to jobs and performs work.
    Tasker,
    /// Operator with authority over every job.
    Admin,
}

impl Role {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Tasker => "tasker",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "customer" => Ok(Self::Customer),
            "tasker" => Ok(Self::Tasker),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Error returned while parsing a role from persistence or a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

/// The authenticated caller of an engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    user_id: UserId,
    role: Role,
}

impl Actor {
    /// Creates an actor from a resolved user and role.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Shorthand for a customer actor.
    #[must_use]
    pub const fn customer(user_id: UserId) -> Self {
        Self::new(user_id, Role::Customer)
    }

    /// Shorthand for a tasker actor.
    #[must_use]
    pub const fn tasker(user_id: UserId) -> Self {
        Self::new(user_id, Role::Tasker)
    }

    /// Shorthand for an admin actor.
    #[must_use]
    pub const fn admin(user_id: UserId) -> Self {
        Self::new(user_id, Role::Admin)
    }

    /// Returns the caller's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the caller's role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Returns whether the caller is an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Returns whether the caller owns a resource held by `owner`, or is an
    /// admin.
    #[must_use]
    pub fn owns_or_administers(&self, owner: UserId) -> bool {
        self.is_admin() || self.user_id == owner
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.role, self.user_id)
    }
}

/// Opaque session credential presented at the transport boundary.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wraps a raw session credential.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the credential as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Role::Customer, UserId::new(1), true)]
    #[case(Role::Customer, UserId::new(2), false)]
    #[case(Role::Tasker, UserId::new(2), false)]
    #[case(Role::Admin, UserId::new(2), true)]
    fn owns_or_administers_checks_owner_and_admin(
        #[case] role: Role,
        #[case] owner: UserId,
        #[case] expected: bool,
    ) {
        let actor = Actor::new(UserId::new(1), role);
        assert_eq!(actor.owns_or_administers(owner), expected);
    }

    #[rstest]
    #[case("customer", Role::Customer)]
    #[case(" Tasker ", Role::Tasker)]
    #[case("ADMIN", Role::Admin)]
    fn role_parses_case_insensitively(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(Role::try_from(raw), Ok(expected));
    }

    #[rstest]
    fn unknown_role_is_rejected() {
        assert_eq!(
            Role::try_from("moderator"),
            Err(ParseRoleError("moderator".to_owned()))
        );
    }
}
