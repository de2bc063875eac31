//! Visible navigation derived from the session's menu tree

use crate::models::MenuItem;
use crate::permissions;
use crate::session::Session;

/// Menus nested deeper than this are not shown
pub const MAX_MENU_DEPTH: usize = 8;

fn sibling_order(items: &[MenuItem]) -> Vec<&MenuItem> {
    let mut sorted: Vec<&MenuItem> = items.iter().collect();
    sorted.sort_by_key(|m| m.display_order.unwrap_or(i32::MAX));
    sorted
}

/// Whether `item` may be shown to the signed-in user
pub fn is_permitted(item: &MenuItem, session: Option<&Session>) -> bool {
    if !item.active || !item.visible {
        return false;
    }
    if let Some(code) = item.required_permission.as_deref().filter(|c| !c.is_empty()) {
        if !session.is_some_and(|s| s.has_permission(code)) {
            return false;
        }
    }
    if !item.allowed_roles.is_empty() {
        let roles: Vec<&str> = item.allowed_roles.iter().map(String::as_str).collect();
        if !session.is_some_and(|s| s.has_any_role(&roles)) {
            return false;
        }
    }
    true
}

/// Depth-first list of the visible entries, each with its nesting depth.
///
/// Hidden entries hide their whole subtree.
pub fn flatten_visible<'a>(items: &'a [MenuItem], session: Option<&Session>) -> Vec<(usize, &'a MenuItem)> {
    let mut out = Vec::new();
    let mut stack: Vec<(usize, &MenuItem)> =
        sibling_order(items).into_iter().rev().map(|m| (0, m)).collect();

    while let Some((depth, item)) = stack.pop() {
        if !is_permitted(item, session) {
            continue;
        }
        out.push((depth, item));

        if item.children.is_empty() {
            continue;
        }
        if depth + 1 >= MAX_MENU_DEPTH {
            tracing::warn!(code = %item.code, depth, "menu nesting too deep, children skipped");
            continue;
        }
        stack.extend(
            sibling_order(&item.children)
                .into_iter()
                .rev()
                .map(|child| (depth + 1, child)),
        );
    }
    out
}

/// Pages the console itself provides, gated like backend menus.
///
/// The permissions page needs either role permission, which a single
/// `required_permission` cannot express, so it is added only when allowed.
pub fn console_navigation(session: Option<&Session>) -> Vec<MenuItem> {
    let mut nav = vec![
        MenuItem::new("dashboard", "dashboard.title")
            .with_path("/dashboard")
            .with_order(0),
        MenuItem::new("users", "users.title")
            .with_path("/users")
            .with_permission(permissions::USER_VIEW)
            .with_order(1),
        MenuItem::new("roles", "roles.title")
            .with_path("/roles")
            .with_permission(permissions::ROLE_VIEW)
            .with_order(2),
    ];
    if can_open_permissions(session) {
        nav.push(
            MenuItem::new("permissions", "permissions.title")
                .with_path("/permissions")
                .with_order(3),
        );
    }
    nav
}

/// The permissions page is reachable with either role permission
pub fn can_open_permissions(session: Option<&Session>) -> bool {
    session.is_some_and(|s| s.has_any_permission(&[permissions::ROLE_MANAGE, permissions::ROLE_VIEW]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(perms: &[&str], roles: &[&str]) -> Session {
        Session {
            token: "t".into(),
            user: Some(User {
                permissions: perms.iter().map(|p| p.to_string()).collect(),
                roles: roles.iter().map(|r| r.to_string()).collect(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    fn codes(flat: &[(usize, &MenuItem)]) -> Vec<(usize, String)> {
        flat.iter().map(|(d, m)| (*d, m.code.clone())).collect()
    }

    #[test]
    fn orders_siblings_and_tracks_depth() {
        let tree = vec![
            MenuItem::new("b", "B").with_order(2),
            MenuItem::new("a", "A").with_order(1).with_children(vec![
                MenuItem::new("a2", "A2").with_order(2),
                MenuItem::new("a1", "A1").with_order(1),
            ]),
        ];
        let flat = flatten_visible(&tree, None);
        assert_eq!(
            codes(&flat),
            vec![(0, "a".into()), (1, "a1".into()), (1, "a2".into()), (0, "b".into())]
        );
    }

    #[test]
    fn hidden_and_gated_items_are_skipped() {
        let mut hidden = MenuItem::new("hidden", "Hidden")
            .with_children(vec![MenuItem::new("child", "Child")]);
        hidden.visible = false;
        let mut inactive = MenuItem::new("inactive", "Inactive");
        inactive.active = false;
        let tree = vec![
            hidden,
            inactive,
            MenuItem::new("users", "Users").with_permission("USER_VIEW"),
            MenuItem::new("admin", "Admin").with_roles(&["ADMIN"]),
            MenuItem::new("home", "Home"),
        ];

        let viewer = session(&["USER_VIEW"], &["EMPLOYEE"]);
        assert_eq!(
            codes(&flatten_visible(&tree, Some(&viewer))),
            vec![(0, "users".into()), (0, "home".into())]
        );
        assert_eq!(codes(&flatten_visible(&tree, None)), vec![(0, "home".into())]);
    }

    #[test]
    fn depth_is_bounded() {
        let mut node = MenuItem::new("leaf", "Leaf");
        for i in 0..20 {
            node = MenuItem::new(&format!("n{}", i), "N").with_children(vec![node]);
        }
        let tree = vec![node];
        let flat = flatten_visible(&tree, None);
        assert_eq!(flat.len(), MAX_MENU_DEPTH);
        assert_eq!(flat.last().map(|(d, _)| *d), Some(MAX_MENU_DEPTH - 1));
    }

    #[test]
    fn console_navigation_respects_permissions() {
        let viewer = session(&["ROLE_VIEW"], &[]);
        let nav = console_navigation(Some(&viewer));
        let visible = codes(&flatten_visible(&nav, Some(&viewer)));
        assert_eq!(
            visible,
            vec![(0, "dashboard".into()), (0, "roles".into()), (0, "permissions".into())]
        );
        assert!(can_open_permissions(Some(&viewer)));
        let user_viewer = session(&["USER_VIEW"], &[]);
        let nav = console_navigation(Some(&user_viewer));
        assert_eq!(
            codes(&flatten_visible(&nav, Some(&user_viewer))),
            vec![(0, "dashboard".into()), (0, "users".into())]
        );
    }
}
