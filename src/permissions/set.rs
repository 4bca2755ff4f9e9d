//! Per-entity permission registry.
//!
//! A [`PermissionSet`] maps module names to the permission names held in
//! that module. Two names are reserved:
//!
//! - [`GLOBAL`]: the module holding module-independent permissions. An
//!   empty module name passed to any method is treated as this key.
//! - [`ADMIN`]: the wildcard permission. Held in a module it grants every
//!   permission in that module; held in [`GLOBAL`] it grants everything.
//!
//! # Check Order
//!
//! ```text
//! has_perm(module, perm)
//!   ├── perm == ""              → true
//!   ├── global holds "admin"    → true
//!   ├── module holds "admin"    → true
//!   └── module holds perm       → true / false
//! ```
//!
//! # Locking
//!
//! One `parking_lot::RwLock` guards the whole map. Queries take the read
//! side, mutations take the write side. The lock is not re-entrant: the
//! callbacks given to [`PermissionSet::for_each`] and
//! [`PermissionSet::retain`] must not call back into the same set, or the
//! calling thread deadlocks.

use super::Level;
use parking_lot::RwLock;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::{debug, trace};

/// Reserved module key for module-independent permissions.
pub const GLOBAL: &str = "global";

/// Reserved wildcard permission name.
pub const ADMIN: &str = "admin";

/// Plain module → permissions mapping, as imported and exported by a set.
pub type Grants = HashMap<String, HashSet<String>>;

#[inline]
fn module_key(module: &str) -> &str {
    if module.is_empty() { GLOBAL } else { module }
}

/// Insert `perm` under `module`. Returns `true` if it was not already held.
fn grant(grants: &mut Grants, module: &str, perm: &str) -> bool {
    if perm.is_empty() {
        return false;
    }
    if let Some(held) = grants.get_mut(module) {
        held.insert(perm.to_owned())
    } else {
        grants.insert(module.to_owned(), HashSet::from([perm.to_owned()]));
        true
    }
}

fn holds(grants: &Grants, module: &str, perm: &str) -> bool {
    grants.get(module).is_some_and(|held| held.contains(perm))
}

/// Escalation check on an already-locked map. `module` must be normalized.
fn check(grants: &Grants, module: &str, perm: &str) -> bool {
    holds(grants, GLOBAL, ADMIN) || holds(grants, module, ADMIN) || holds(grants, module, perm)
}

/// Thread-safe set of module-scoped permissions for a single entity.
///
/// # Example
///
/// ```
/// use slirc_perms::PermissionSet;
///
/// let perms = PermissionSet::new();
/// perms.add_perm("blog", ["edit"]);
///
/// assert!(perms.has_perm("blog", "edit"));
/// assert!(!perms.has_perm("blog", "delete"));
///
/// perms.set_module_admin("blog");
/// assert!(perms.has_perm("blog", "delete"));
/// assert!(!perms.has_perm("wiki", "delete"));
/// ```
pub struct PermissionSet {
    grants: RwLock<Grants>,
}

impl Default for PermissionSet {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PermissionSet")
            .field("grants", &*self.grants.read())
            .finish()
    }
}

/// Deep copy with a fresh, unshared lock.
impl Clone for PermissionSet {
    fn clone(&self) -> Self {
        Self {
            grants: RwLock::new(self.copy_map()),
        }
    }
}

impl PermissionSet {
    /// Create an empty permission set.
    pub fn new() -> Self {
        Self {
            grants: RwLock::new(Grants::new()),
        }
    }

    /// Create a set that owns `initial` as its starting state.
    ///
    /// The map is moved in, so the caller cannot keep mutating it. Entries
    /// under an empty module key are merged into [`GLOBAL`] and empty
    /// permission names are dropped.
    pub fn from_map(initial: Grants) -> Self {
        let mut grants = Grants::with_capacity(initial.len());
        for (module, mut perms) in initial {
            perms.remove("");
            let key = if module.is_empty() {
                GLOBAL.to_owned()
            } else {
                module
            };
            grants.entry(key).or_default().extend(perms);
        }
        Self {
            grants: RwLock::new(grants),
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// Check whether `perm` is granted in `module`.
    ///
    /// An empty `perm` means "nothing required" and always passes. Global
    /// admin and module admin both pass any check in their scope. Modules
    /// that were never granted anything behave as empty.
    pub fn has_perm(&self, module: &str, perm: &str) -> bool {
        if perm.is_empty() {
            return true;
        }
        check(&self.grants.read(), module_key(module), perm)
    }

    /// Whether the global admin permission is held.
    pub fn is_admin(&self) -> bool {
        self.has_perm(GLOBAL, ADMIN)
    }

    /// Whether admin is held in `module`. Also true for a global admin.
    pub fn is_module_admin(&self, module: &str) -> bool {
        self.has_perm(module, ADMIN)
    }

    pub fn has_global_perm(&self, perm: &str) -> bool {
        self.has_perm(GLOBAL, perm)
    }

    /// Highest [`Level`] recorded in `module` by [`grant_level`](Self::grant_level).
    ///
    /// Only an explicit owner grant reports [`Level::Owner`]. Global and
    /// module admins report at least [`Level::Admin`].
    pub fn level(&self, module: &str) -> Option<Level> {
        let grants = self.grants.read();
        let module = module_key(module);
        if holds(&grants, module, Level::Owner.as_perm()) {
            return Some(Level::Owner);
        }
        if check(&grants, module, ADMIN) {
            return Some(Level::Admin);
        }
        Level::ALL
            .into_iter()
            .find(|level| holds(&grants, module, level.as_perm()))
    }

    /// Number of (module, permission) pairs held.
    pub fn len(&self) -> usize {
        self.grants.read().values().map(HashSet::len).sum()
    }

    /// `true` if no permission is held anywhere. Empty module entries are ignored.
    pub fn is_empty(&self) -> bool {
        self.grants.read().values().all(HashSet::is_empty)
    }

    /// Names of all module entries, including ones left empty by removals.
    pub fn modules(&self) -> Vec<String> {
        self.grants.read().keys().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Grants
    // ------------------------------------------------------------------

    /// Grant one or more permissions in `module`.
    ///
    /// Empty names are skipped and already-held names are not duplicated.
    ///
    /// ```
    /// use slirc_perms::PermissionSet;
    ///
    /// let perms = PermissionSet::new();
    /// perms.add_perm("blog", ["edit", "publish", "edit", ""]);
    /// assert_eq!(perms.len(), 2);
    /// ```
    pub fn add_perm<I, S>(&self, module: &str, perms: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let module = module_key(module);
        let mut grants = self.grants.write();
        for perm in perms {
            let perm = perm.as_ref();
            if grant(&mut grants, module, perm) {
                trace!(module = %module, perm = %perm, "permission granted");
            }
        }
    }

    pub fn add_global_perm(&self, perm: &str) {
        self.add_perm(GLOBAL, [perm]);
    }

    /// Grant global admin.
    pub fn set_admin(&self) {
        self.add_perm(GLOBAL, [ADMIN]);
    }

    pub fn set_module_admin(&self, module: &str) {
        self.add_perm(module, [ADMIN]);
    }

    /// Record `level` in `module`.
    ///
    /// Granting [`Level::Admin`] does not make the holder a module admin.
    pub fn grant_level(&self, module: &str, level: Level) {
        self.add_perm(module, [level.as_perm()]);
    }

    // ------------------------------------------------------------------
    // Revocations
    // ------------------------------------------------------------------

    /// Revoke `perm` in `module`.
    ///
    /// No-op for an empty `perm` or a module with no entry. The module entry
    /// is kept even if this empties it.
    pub fn remove_perm(&self, module: &str, perm: &str) {
        if perm.is_empty() {
            return;
        }
        let module = module_key(module);
        let mut grants = self.grants.write();
        if let Some(held) = grants.get_mut(module)
            && held.remove(perm)
        {
            trace!(module = %module, perm = %perm, "permission revoked");
        }
    }

    pub fn remove_admin(&self) {
        self.remove_perm(GLOBAL, ADMIN);
    }

    pub fn remove_module_admin(&self, module: &str) {
        self.remove_perm(module, ADMIN);
    }

    /// Drop every module and every permission.
    pub fn remove_all(&self) {
        self.grants.write().clear();
        debug!("all permissions revoked");
    }

    /// Drop everything, then restore global admin if it was held.
    ///
    /// The admin check and the clear take the lock separately. A grant or
    /// revocation racing between them can be lost or can make the restore
    /// decision stale. Use
    /// [`remove_all_but_admin_atomic`](Self::remove_all_but_admin_atomic)
    /// when that matters.
    pub fn remove_all_but_admin(&self) {
        let was_admin = self.is_admin();
        self.remove_all();
        if was_admin {
            self.set_admin();
        }
        debug!(kept_admin = was_admin, "permissions cleared except admin");
    }

    /// Same as [`remove_all_but_admin`](Self::remove_all_but_admin) under a
    /// single write lock.
    pub fn remove_all_but_admin_atomic(&self) {
        let mut grants = self.grants.write();
        let was_admin = holds(&grants, GLOBAL, ADMIN);
        grants.clear();
        if was_admin {
            grants.insert(GLOBAL.to_owned(), HashSet::from([ADMIN.to_owned()]));
        }
        debug!(kept_admin = was_admin, "permissions cleared except admin (atomic)");
    }

    /// Remove the entry for `module` entirely.
    ///
    /// Unlike revoking each permission, the key itself disappears from
    /// [`modules`](Self::modules) and [`copy_map`](Self::copy_map).
    pub fn remove_all_module(&self, module: &str) {
        let module = module_key(module);
        if self.grants.write().remove(module).is_some() {
            debug!(module = %module, "module permissions removed");
        }
    }

    /// Empty `module`, keeping `admin` in it if
    /// [`is_module_admin`](Self::is_module_admin) held before the call.
    ///
    /// A module with no entry is left alone. Because `is_module_admin`
    /// includes global admin, a global admin leaves the module holding
    /// `admin`. The check and the write take the lock separately, with the
    /// same race as [`remove_all_but_admin`](Self::remove_all_but_admin).
    pub fn remove_all_module_but_keep_admin(&self, module: &str) {
        let module = module_key(module);
        let keep_admin = self.is_module_admin(module);
        let mut grants = self.grants.write();
        if let Some(held) = grants.get_mut(module) {
            held.clear();
            if keep_admin {
                held.insert(ADMIN.to_owned());
            }
            debug!(module = %module, kept_admin = keep_admin, "module permissions cleared except admin");
        }
    }

    /// Same as
    /// [`remove_all_module_but_keep_admin`](Self::remove_all_module_but_keep_admin)
    /// under a single write lock.
    pub fn remove_all_module_but_keep_admin_atomic(&self, module: &str) {
        let module = module_key(module);
        let mut grants = self.grants.write();
        let keep_admin = check(&grants, module, ADMIN);
        if let Some(held) = grants.get_mut(module) {
            held.clear();
            if keep_admin {
                held.insert(ADMIN.to_owned());
            }
            debug!(module = %module, kept_admin = keep_admin, "module permissions cleared except admin (atomic)");
        }
    }

    // ------------------------------------------------------------------
    // Iteration and snapshots
    // ------------------------------------------------------------------

    /// Call `visit(module, perm)` once per granted pair, in no particular order.
    ///
    /// The read lock is held for the whole traversal. `visit` must not call
    /// any method on this set: a mutation from inside the callback
    /// deadlocks, and so can a nested read if a writer is queued.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &str),
    {
        let grants = self.grants.read();
        for (module, perms) in grants.iter() {
            for perm in perms {
                visit(module, perm);
            }
        }
    }

    /// Keep only the pairs for which `keep(module, perm)` returns `true`.
    ///
    /// Holds the write lock for the whole pass. Module entries emptied by
    /// the pass stay present. `keep` must not call any method on this set.
    pub fn retain<F>(&self, mut keep: F)
    where
        F: FnMut(&str, &str) -> bool,
    {
        let mut grants = self.grants.write();
        let mut removed = 0usize;
        for (module, perms) in grants.iter_mut() {
            perms.retain(|perm| {
                let kept = keep(module, perm);
                if !kept {
                    removed += 1;
                }
                kept
            });
        }
        if removed > 0 {
            debug!(count = removed, "filtered permissions");
        }
    }

    /// Independent deep copy of the module → permissions map.
    pub fn copy_map(&self) -> Grants {
        self.grants.read().clone()
    }
}

impl<M, P> FromIterator<(M, P)> for PermissionSet
where
    M: AsRef<str>,
    P: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = (M, P)>>(iter: I) -> Self {
        let mut grants = Grants::new();
        for (module, perm) in iter {
            grant(&mut grants, module_key(module.as_ref()), perm.as_ref());
        }
        Self {
            grants: RwLock::new(grants),
        }
    }
}

/// Serializes as the plain module → permissions map, so an embedding
/// record can `#[serde(flatten)]` it.
impl Serialize for PermissionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.grants.read().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PermissionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Grants::deserialize(deserializer).map(Self::from_map)
    }
}
