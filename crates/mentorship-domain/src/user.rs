//! User domain types.

/// Caller privilege level injected by the gateway.
///
/// Wire format: `u8` (0 = Member, 1 = Service).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Member = 0,
    Service = 1,
}

impl UserRole {
    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::Member),
            1 => Some(Self::Service),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// Validate a username: ASCII alphanumeric + hyphen + underscore, 1-25 chars.
/// Reserved: "me".
pub fn validate_username(username: &str) -> bool {
    if username.is_empty() || username.len() > 25 {
        return false;
    }
    if username == "me" {
        return false;
    }
    username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
