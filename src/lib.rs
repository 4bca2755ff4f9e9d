//! slirc-perms - module-scoped permission sets.
//!
//! Each entity (user, service, role) owns one [`PermissionSet`]: a
//! thread-safe map from module name to the permission names held there.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ PermissionSet   RwLock<module → {perm}>      │
//! │   "global" → {"admin", "read"}               │
//! │   "blog"   → {"edit", "publish"}             │
//! └──────────────────────────────────────────────┘
//!         ▲                         ▲
//!         │ seeds                   │ from_map / copy_map / serde
//! ┌───────┴────────┐       ┌────────┴────────────┐
//! │ GrantsConfig   │       │ embedding storage   │
//! │ (TOML roles)   │       │ (caller's concern)  │
//! └────────────────┘       └─────────────────────┘
//! ```
//!
//! The crate answers membership questions only. It does not authenticate,
//! persist, or enforce.
//!
//! # Example
//!
//! ```
//! use slirc_perms::PermissionSet;
//!
//! let perms = PermissionSet::new();
//! perms.add_perm("blog", ["edit"]);
//! assert!(perms.has_perm("blog", "edit"));
//! assert!(!perms.has_perm("", "edit"));
//!
//! perms.set_admin();
//! assert!(perms.has_perm("anything", "whatever"));
//! ```

pub mod config;
pub mod error;
pub mod permissions;

pub use config::GrantsConfig;
pub use error::{ConfigError, ParseLevelError};
pub use permissions::{ADMIN, GLOBAL, Grants, Level, PermissionSet};

#[cfg(test)]
mod tests {
    use super::*;

    /// Verify all public re-exports are accessible.
    #[test]
    fn test_public_reexports() {
        let perms = PermissionSet::new();
        perms.grant_level(GLOBAL, Level::Admin);
        assert_eq!(perms.level(GLOBAL), Some(Level::Admin));
        assert!(!perms.has_perm("blog", ADMIN));

        let map: Grants = perms.copy_map();
        assert_eq!(map.len(), 1);

        let config = GrantsConfig::default();
        assert!(matches!(
            config.apply("missing", &perms),
            Err(ConfigError::UnknownRole(_))
        ));

        let err: ParseLevelError = "nope".parse::<Level>().unwrap_err();
        assert_eq!(err.0, "nope");
    }

    #[test]
    fn test_permission_set_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PermissionSet>();
    }
}
