//! Role names and the capabilities each role grants.
//!
//! Role names must match the `ck_users_role` check constraint in
//! `20250101000002_create_users.sql`.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_ARCHBISHOP: &str = "archbishop";
pub const ROLE_DEAN: &str = "dean";
pub const ROLE_PRIEST: &str = "priest";
pub const ROLE_CLERK: &str = "clerk";
pub const ROLE_MEMBER: &str = "member";

/// Role assigned to self-registered accounts and to users created without one.
pub const DEFAULT_ROLE: Role = Role::Member;

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// A user's role, as stored in `users.role` and carried in the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Archbishop,
    Dean,
    Priest,
    Clerk,
    Member,
}

impl Role {
    /// Every role, most privileged first.
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::Archbishop,
        Role::Dean,
        Role::Priest,
        Role::Clerk,
        Role::Member,
    ];

    /// Parse from the database `role` column or a token claim.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            ROLE_ADMIN => Ok(Self::Admin),
            ROLE_ARCHBISHOP => Ok(Self::Archbishop),
            ROLE_DEAN => Ok(Self::Dean),
            ROLE_PRIEST => Ok(Self::Priest),
            ROLE_CLERK => Ok(Self::Clerk),
            ROLE_MEMBER => Ok(Self::Member),
            other => Err(CoreError::Validation(format!(
                "Unknown role '{other}'. Must be one of: admin, archbishop, dean, priest, clerk, member"
            ))),
        }
    }

    /// Database name value.
    pub fn name(self) -> &'static str {
        match self {
            Self::Admin => ROLE_ADMIN,
            Self::Archbishop => ROLE_ARCHBISHOP,
            Self::Dean => ROLE_DEAN,
            Self::Priest => ROLE_PRIEST,
            Self::Clerk => ROLE_CLERK,
            Self::Member => ROLE_MEMBER,
        }
    }

    /// Whether this role grants `capability`.
    pub fn can(self, capability: Capability) -> bool {
        capability.allowed_roles().contains(&self)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Capability
// ---------------------------------------------------------------------------

/// An action guarded by role.
///
/// Reading parishes and one's own records needs no capability, only a valid
/// access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Create and delete user accounts, change a user's role.
    ManageUsers,
    /// Create, update and delete parishes.
    ManageParishes,
    /// Create, update and delete sacrament, marriage party and document records.
    RecordSacraments,
    /// List every record and read records belonging to other people.
    ViewRegisters,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const DIOCESE: &[Role] = &[Role::Admin, Role::Archbishop, Role::Dean];
const REGISTRARS: &[Role] = &[
    Role::Admin,
    Role::Archbishop,
    Role::Dean,
    Role::Priest,
    Role::Clerk,
];

impl Capability {
    /// Roles that hold this capability.
    pub fn allowed_roles(self) -> &'static [Role] {
        match self {
            Self::ManageUsers => ADMIN_ONLY,
            Self::ManageParishes => DIOCESE,
            Self::RecordSacraments | Self::ViewRegisters => REGISTRARS,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
