//! Grant template validation.
//!
//! Catches template mistakes at load time instead of letting them turn
//! into silent no-op grants.

use super::GrantsConfig;
use thiserror::Error;

/// Validation errors for grant templates.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("role name must not be empty")]
    EmptyRoleName,
    #[error("role '{role}' grants an empty permission in module '{module}'")]
    EmptyPermission { role: String, module: String },
    #[error("role '{role}': module name '{module}' contains whitespace")]
    InvalidModuleName { role: String, module: String },
    #[error("role '{role}': permission '{perm}' in module '{module}' contains whitespace")]
    InvalidPermissionName {
        role: String,
        module: String,
        perm: String,
    },
}

fn has_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// Validate grant templates, returning all errors found.
///
/// Roles and modules are visited in sorted order so the error list is
/// stable.
pub fn validate(config: &GrantsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut roles: Vec<_> = config.roles.iter().collect();
    roles.sort_unstable_by(|a, b| a.0.cmp(b.0));

    for (role, template) in roles {
        if role.trim().is_empty() {
            errors.push(ValidationError::EmptyRoleName);
        }

        let mut modules: Vec<_> = template.grants.iter().collect();
        modules.sort_unstable_by(|a, b| a.0.cmp(b.0));

        for (module, perms) in modules {
            // Empty module key is the global shorthand
            if has_whitespace(module) {
                errors.push(ValidationError::InvalidModuleName {
                    role: role.clone(),
                    module: module.clone(),
                });
            }
            for perm in perms {
                if perm.is_empty() {
                    errors.push(ValidationError::EmptyPermission {
                        role: role.clone(),
                        module: module.clone(),
                    });
                } else if has_whitespace(perm) {
                    errors.push(ValidationError::InvalidPermissionName {
                        role: role.clone(),
                        module: module.clone(),
                        perm: perm.clone(),
                    });
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
