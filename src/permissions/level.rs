//! Privilege ladder.

use crate::error::ParseLevelError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse privilege level, ordered from most to least privileged.
///
/// ```text
/// Owner > Admin > Mod > User > Visitor
/// ```
///
/// "No level" is `Option<Level>::None`, never a variant.
///
/// # Example
///
/// ```
/// use slirc_perms::Level;
///
/// let level: Level = "mod".parse().unwrap();
/// assert!(level.can_user());
/// assert!(!level.can_admin());
/// assert!(Level::Owner.can(Level::Visitor));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Owner = 1,
    Admin = 2,
    Mod = 3,
    User = 4,
    Visitor = 5,
}

impl Level {
    /// All levels, most privileged first.
    pub const ALL: [Level; 5] = [
        Level::Owner,
        Level::Admin,
        Level::Mod,
        Level::User,
        Level::Visitor,
    ];

    /// Numeric rank: 1 for `Owner` through 5 for `Visitor`.
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Lowercase name, as used by `Display`, `FromStr` and serde.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Owner => "owner",
            Level::Admin => "admin",
            Level::Mod => "mod",
            Level::User => "user",
            Level::Visitor => "visitor",
        }
    }

    /// Permission string recording this level in a module.
    ///
    /// Namespaced under `level.` so it never collides with the reserved
    /// `"admin"` wildcard.
    pub fn as_perm(self) -> &'static str {
        match self {
            Level::Owner => "level.owner",
            Level::Admin => "level.admin",
            Level::Mod => "level.mod",
            Level::User => "level.user",
            Level::Visitor => "level.visitor",
        }
    }

    /// Exact match.
    #[inline]
    pub fn is(self, level: Level) -> bool {
        self == level
    }

    pub fn is_owner(self) -> bool {
        self.is(Level::Owner)
    }

    pub fn is_admin(self) -> bool {
        self.is(Level::Admin)
    }

    pub fn is_mod(self) -> bool {
        self.is(Level::Mod)
    }

    pub fn is_user(self) -> bool {
        self.is(Level::User)
    }

    pub fn is_visitor(self) -> bool {
        self.is(Level::Visitor)
    }

    /// At least as privileged as `level`.
    #[inline]
    pub fn can(self, level: Level) -> bool {
        self.rank() <= level.rank()
    }

    pub fn can_owner(self) -> bool {
        self.can(Level::Owner)
    }

    pub fn can_admin(self) -> bool {
        self.can(Level::Admin)
    }

    pub fn can_mod(self) -> bool {
        self.can(Level::Mod)
    }

    pub fn can_user(self) -> bool {
        self.can(Level::User)
    }

    pub fn can_visitor(self) -> bool {
        self.can(Level::Visitor)
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ParseLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "owner" => Ok(Level::Owner),
            "admin" => Ok(Level::Admin),
            "mod" => Ok(Level::Mod),
            "user" => Ok(Level::User),
            "visitor" => Ok(Level::Visitor),
            _ => Err(ParseLevelError(s.to_string())),
        }
    }
}
