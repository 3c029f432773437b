use std::fmt;

/// Application-level role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Full read/write access, including system settings
    SuperUser,
    /// Read-only access
    UserGranted,
}

impl Role {
    pub const SUPER_USER: &'static str = "SUPER_USER";
    pub const USER_GRANTED: &'static str = "USER_GRANTED";

    /// Parse a stored role string (exact match, case-sensitive)
    pub fn parse(value: &str) -> Option<Role> {
        match value {
            Self::SUPER_USER => Some(Role::SuperUser),
            Self::USER_GRANTED => Some(Role::UserGranted),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperUser => Self::SUPER_USER,
            Role::UserGranted => Self::USER_GRANTED,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a resolved role came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSource {
    /// A role row exists for the identity
    Assigned,
    /// No usable row (absent, unknown value, or lookup failure)
    Defaulted,
}

/// Outcome of role resolution for one identity
///
/// `is_super_user` and `is_read_only` are always complements. A missing
/// role row never yields `SuperUser`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedRole {
    role: Role,
    source: RoleSource,
}

impl ResolvedRole {
    pub fn assigned(role: Role) -> Self {
        Self {
            role,
            source: RoleSource::Assigned,
        }
    }

    /// Conservative default used whenever no explicit row can be read
    pub fn defaulted() -> Self {
        Self {
            role: Role::UserGranted,
            source: RoleSource::Defaulted,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn source(&self) -> RoleSource {
        self.source
    }

    pub fn is_super_user(&self) -> bool {
        self.role == Role::SuperUser
    }

    pub fn is_read_only(&self) -> bool {
        !self.is_super_user()
    }
}
