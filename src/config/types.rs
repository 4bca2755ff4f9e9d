//! Grant template types and loading.

use super::validation::validate;
use crate::error::ConfigError;
use crate::permissions::PermissionSet;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// Grant templates loaded from TOML.
///
/// ```toml
/// [roles.editor]
/// global = ["read"]
/// blog = ["edit", "publish"]
///
/// [roles.root]
/// global = ["admin"]
/// ```
///
/// Templates are flat. A role never pulls in another role's grants.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrantsConfig {
    /// Role name → template.
    #[serde(default)]
    pub roles: HashMap<String, RoleTemplate>,
}

/// Module → permission names granted by one role.
///
/// An empty module key grants globally, as everywhere else.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct RoleTemplate {
    pub grants: HashMap<String, Vec<String>>,
}

impl RoleTemplate {
    /// Add every grant of this template to `set`.
    pub fn apply_to(&self, set: &PermissionSet) {
        for (module, perms) in &self.grants {
            set.add_perm(module, perms);
        }
    }

    /// Build a fresh set holding this template's grants.
    pub fn to_permission_set(&self) -> PermissionSet {
        let set = PermissionSet::new();
        self.apply_to(&set);
        set
    }
}

impl GrantsConfig {
    /// Load and validate grant templates from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml(&content)?;
        debug!(path = %path.as_ref().display(), roles = config.roles.len(), "Grant templates loaded");
        Ok(config)
    }

    /// Parse and validate grant templates from a TOML string.
    ///
    /// Every validation failure is reported at once in
    /// [`ConfigError::Invalid`].
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GrantsConfig = toml::from_str(content)?;
        validate(&config).map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Fresh permission set for `role`, or `None` if no such role exists.
    pub fn role(&self, role: &str) -> Option<PermissionSet> {
        self.roles.get(role).map(RoleTemplate::to_permission_set)
    }

    /// Add the grants of `role` to an existing set.
    pub fn apply(&self, role: &str, set: &PermissionSet) -> Result<(), ConfigError> {
        let template = self
            .roles
            .get(role)
            .ok_or_else(|| ConfigError::UnknownRole(role.to_string()))?;
        template.apply_to(set);
        debug!(role = %role, "Grant template applied");
        Ok(())
    }

    /// Role names, sorted.
    pub fn role_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.roles.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
