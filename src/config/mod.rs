//! Grant template configuration.
//!
//! - [`types`]: template structs and TOML loading (GrantsConfig, RoleTemplate)
//! - [`validation`]: load-time checks (ValidationError)

mod types;
mod validation;

pub use types::{GrantsConfig, RoleTemplate};
pub use validation::{ValidationError, validate};
