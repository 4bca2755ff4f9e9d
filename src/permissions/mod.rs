//! Module-scoped permission sets and privilege levels.

mod level;
mod set;

pub use level::Level;
pub use set::{ADMIN, GLOBAL, Grants, PermissionSet};
