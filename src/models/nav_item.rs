//! Route table and role-gated sidebar.
//!
//! A single table maps console path prefixes to an [`Access`] level. The
//! route guard evaluates it for every request; the sidebar shows the
//! entries the current role is meant to use.

use crate::auth::session::{AuthState, Role};

/// Who may open a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Admin or collaborator.
    Staff,
    Admin,
    /// Admin, or the collaborator whose hotel id is the second path segment.
    HotelScoped,
}

pub struct NavSidebarItem {
    pub label: String,
    pub url: String,
    pub is_active: bool,
}

struct RouteEntry {
    prefix: &'static str,
    access: Access,
    /// Sidebar label; None for routes that never appear in the sidebar.
    label: Option<&'static str>,
}

const ROUTES: &[RouteEntry] = &[
    RouteEntry { prefix: "/hotel-booking", access: Access::HotelScoped, label: Some("My Hotel") },
    RouteEntry { prefix: "/hotels", access: Access::Admin, label: Some("Hotels") },
    RouteEntry { prefix: "/temples", access: Access::Staff, label: Some("Temples") },
    RouteEntry { prefix: "/queries", access: Access::Admin, label: Some("Queries") },
    RouteEntry { prefix: "/news", access: Access::Staff, label: Some("News") },
    RouteEntry { prefix: "/advertisements", access: Access::Staff, label: Some("Advertisements") },
    RouteEntry { prefix: "/bookings", access: Access::Admin, label: Some("Bookings") },
    RouteEntry { prefix: "/hotel-login", access: Access::Public, label: Some("Hotel Login") },
    RouteEntry { prefix: "/login", access: Access::Public, label: None },
    RouteEntry { prefix: "/logout", access: Access::Public, label: None },
    RouteEntry { prefix: "/static", access: Access::Public, label: None },
];

/// `path` equals `prefix` or continues it with a new segment.
fn under(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

/// Access level for a console path. `/` is public (it only redirects);
/// anything not in the table requires a signed-in staff member.
pub fn access_for(path: &str) -> Access {
    if path == "/" {
        return Access::Public;
    }
    ROUTES
        .iter()
        .find(|r| under(path, r.prefix))
        .map(|r| r.access)
        .unwrap_or(Access::Staff)
}

/// Hotel id of a `/hotel-booking/{hotelId}/...` path.
pub fn scoped_hotel_id(path: &str) -> Option<&str> {
    path.strip_prefix("/hotel-booking/")
        .and_then(|rest| rest.split('/').next())
        .filter(|id| !id.is_empty())
}

/// Whether `auth` may open `path`. Public routes are always allowed.
pub fn permits(auth: &AuthState, path: &str) -> bool {
    match access_for(path) {
        Access::Public => true,
        Access::Staff => auth.role().is_staff(),
        Access::Admin => auth.role() == Role::Admin,
        Access::HotelScoped => match auth.role() {
            Role::Admin => true,
            Role::Collaborator => {
                scoped_hotel_id(path).is_some_and(|id| auth.hotel_id.as_deref() == Some(id))
            }
            Role::Guest => false,
        },
    }
}

/// Landing page for a role.
pub fn home_for(auth: &AuthState) -> String {
    match (auth.role(), auth.hotel_id.as_deref()) {
        (Role::Admin, _) => "/hotels".to_string(),
        (Role::Collaborator, Some(id)) => format!("/hotel-booking/{id}"),
        (Role::Collaborator, None) => "/temples".to_string(),
        (Role::Guest, _) => "/login".to_string(),
    }
}

/// Sidebar entries for the current role, in display order. "My Hotel" is
/// the collaborator's own page; admins reach hotel pages through Hotels.
pub fn find_navigation(auth: &AuthState, current_path: &str) -> Vec<NavSidebarItem> {
    let role = auth.role();
    ROUTES
        .iter()
        .filter_map(|r| {
            let label = r.label?;
            let shown = match r.access {
                Access::Public => true,
                Access::Staff => role.is_staff(),
                Access::Admin => role == Role::Admin,
                Access::HotelScoped => role == Role::Collaborator && auth.hotel_id.is_some(),
            };
            if !shown {
                return None;
            }
            let url = match r.access {
                Access::HotelScoped => home_for(auth),
                _ => r.prefix.to_string(),
            };
            Some(NavSidebarItem {
                label: label.to_string(),
                is_active: under(current_path, r.prefix),
                url,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(auth: &AuthState) -> Vec<String> {
        find_navigation(auth, "/").into_iter().map(|i| i.label).collect()
    }

    #[test]
    fn sidebar_per_role() {
        let admin = AuthState::signed_in_admin("t");
        let collaborator = AuthState::signed_in_collaborator("t", "h1");
        assert_eq!(
            labels(&admin),
            vec!["Hotels", "Temples", "Queries", "News", "Advertisements", "Bookings", "Hotel Login"]
        );
        assert_eq!(
            labels(&collaborator),
            vec!["My Hotel", "Temples", "News", "Advertisements", "Hotel Login"]
        );
        assert_eq!(labels(&AuthState::default()), vec!["Hotel Login"]);
    }

    #[test]
    fn prefixes_match_whole_segments() {
        assert_eq!(access_for("/hotels/h1/edit"), Access::Admin);
        assert_eq!(access_for("/hotel-login"), Access::Public);
        assert_eq!(access_for("/hotel-booking/h1/bookings/b1"), Access::HotelScoped);
        assert_eq!(access_for("/newsletter"), Access::Staff);
        assert_eq!(access_for("/"), Access::Public);
    }

    #[test]
    fn collaborator_is_scoped_to_own_hotel() {
        let collaborator = AuthState::signed_in_collaborator("t", "h1");
        assert!(permits(&collaborator, "/hotel-booking/h1"));
        assert!(permits(&collaborator, "/hotel-booking/h1/edit"));
        assert!(!permits(&collaborator, "/hotel-booking/h2"));
        assert!(!permits(&collaborator, "/hotels"));
        assert!(!permits(&collaborator, "/bookings"));
        assert!(permits(&collaborator, "/news"));

        let admin = AuthState::signed_in_admin("t");
        assert!(permits(&admin, "/hotel-booking/h2"));
        assert!(!permits(&AuthState::default(), "/temples"));
    }

    #[test]
    fn active_item_and_home_links() {
        let collaborator = AuthState::signed_in_collaborator("t", "h1");
        let items = find_navigation(&collaborator, "/hotel-booking/h1/bookings/b1");
        assert_eq!(items[0].url, "/hotel-booking/h1");
        assert!(items[0].is_active);
        assert!(!items[1].is_active);
        assert_eq!(home_for(&AuthState::signed_in_admin("t")), "/hotels");
        assert_eq!(home_for(&AuthState::default()), "/login");
    }
}
