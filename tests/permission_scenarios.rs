// tests/permission_scenarios.rs
//! Integration tests for grant/check flows: escalation order, admin
//! restore, copies.

mod common;
use common::{init_tracing, perms_in, set_of};
use slirc_perms::{ADMIN, GLOBAL, Level, PermissionSet};

#[test]
fn test_module_grant_does_not_reach_global() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.add_perm("blog", ["edit"]);

    assert!(perms.has_perm("blog", "edit"));
    assert!(!perms.has_perm("blog", "delete"));
    assert!(!perms.has_perm("", "edit"));
}

#[test]
fn test_global_admin_grants_everything() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.set_admin();

    assert!(perms.has_perm("anything", "whatever"));
    for module in ["", "blog", "wiki", GLOBAL] {
        assert!(perms.has_perm(module, "edit"));
        assert!(perms.is_module_admin(module));
    }
}

#[test]
fn test_module_admin_does_not_cross_modules() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.set_module_admin("blog");
    perms.add_perm("wiki", ["read"]);

    assert!(perms.has_perm("blog", "anything"));
    assert!(perms.has_perm("wiki", "read"));
    assert!(!perms.has_perm("wiki", "edit"));
    assert!(!perms.is_admin());
    assert!(!perms.has_global_perm("read"));
}

#[test]
fn test_keep_admin_after_module_clear() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.add_perm("blog", ["edit"]);
    perms.set_module_admin("blog");
    perms.remove_all_module_but_keep_admin("blog");

    assert_eq!(perms_in(&perms, "blog"), set_of(&[ADMIN]));
}

#[test]
fn test_remove_all_but_admin_leaves_only_global_admin() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.set_admin();
    perms.add_perm("blog", ["edit", "publish"]);
    perms.set_module_admin("wiki");
    perms.remove_all_but_admin();

    let map = perms.copy_map();
    assert_eq!(map.len(), 1);
    assert_eq!(map[GLOBAL], set_of(&[ADMIN]));
}

#[test]
fn test_grant_then_revoke_restores_check() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.add_perm("blog", ["publish"]);

    perms.add_perm("blog", ["edit"]);
    perms.remove_perm("blog", "edit");

    assert!(!perms.has_perm("blog", "edit"));
    assert_eq!(perms_in(&perms, "blog"), set_of(&["publish"]));
}

#[test]
fn test_remove_all_module_drops_key() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.add_perm("blog", ["edit"]);
    perms.remove_perm("blog", "edit");
    assert!(perms.modules().contains(&"blog".to_string()));

    perms.remove_all_module("blog");
    assert!(!perms.modules().contains(&"blog".to_string()));
}

#[test]
fn test_copy_independence_both_ways() {
    init_tracing();
    let original = PermissionSet::new();
    original.add_perm("blog", ["edit"]);
    let copy = original.clone();

    copy.remove_all();
    assert!(original.has_perm("blog", "edit"));

    original.set_admin();
    assert!(!copy.is_admin());
    assert!(copy.copy_map().is_empty());
}

#[test]
fn test_levels_follow_grants() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.grant_level("chat", Level::Visitor);
    perms.grant_level("chat", Level::User);

    let level = perms.level("chat").unwrap();
    assert!(level.is_user());
    assert!(level.can_visitor());
    assert!(!level.can_mod());

    // Admin level is a ranking, not the wildcard
    perms.grant_level("chat", Level::Admin);
    assert_eq!(perms.level("chat"), Some(Level::Admin));
    assert!(!perms.is_module_admin("chat"));
    assert!(!perms.level("chat").unwrap().can_owner());

    perms.set_admin();
    assert_eq!(perms.level("anything"), Some(Level::Admin));

    perms.grant_level("anything", Level::Owner);
    assert_eq!(perms.level("anything"), Some(Level::Owner));
}

#[test]
fn test_retain_drops_one_permission_everywhere() {
    init_tracing();
    let perms = PermissionSet::new();
    perms.add_perm("blog", ["edit", "publish"]);
    perms.add_perm("wiki", ["edit"]);
    perms.add_global_perm("edit");

    perms.retain(|_, perm| perm != "edit");

    let mut remaining = Vec::new();
    perms.for_each(|module, perm| remaining.push((module.to_string(), perm.to_string())));
    assert_eq!(remaining, vec![("blog".to_string(), "publish".to_string())]);
}
