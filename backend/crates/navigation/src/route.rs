//! Route Table
//!
//! Static `{path, requires_auth}` definitions, fixed at startup. Unknown
//! paths fall back to the root route, which redirects to the authenticated
//! landing route.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{NavigationError, NavigationResult};

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REGISTER_PATH: &str = "/register";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";
pub const TASKS_PATH: &str = "/tasks";

/// One route definition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDescriptor {
    pub name: String,
    pub path: String,
    pub requires_auth: bool,
    /// Path this route forwards to before any guard runs
    pub redirect: Option<String>,
}

impl RouteDescriptor {
    pub fn public(name: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            path: path.to_string(),
            requires_auth: false,
            redirect: None,
        }
    }

    pub fn protected(name: &str, path: &str) -> Self {
        Self {
            requires_auth: true,
            ..Self::public(name, path)
        }
    }

    pub fn redirecting_to(mut self, target: &str) -> Self {
        self.redirect = Some(target.to_string());
        self
    }
}

/// Immutable route table
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl Default for RouteTable {
    /// The task app's routes
    fn default() -> Self {
        Self {
            routes: vec![
                RouteDescriptor::protected("root", ROOT_PATH).redirecting_to(TASKS_PATH),
                RouteDescriptor::public("login", LOGIN_PATH),
                RouteDescriptor::public("register", REGISTER_PATH),
                RouteDescriptor::public("reset-password", RESET_PASSWORD_PATH),
                RouteDescriptor::protected("tasks", TASKS_PATH),
            ],
        }
    }
}

impl RouteTable {
    /// Build a custom table
    ///
    /// The table must define the root path (the fallback target), paths must
    /// be unique, and every redirect must point at a defined path.
    pub fn new(routes: Vec<RouteDescriptor>) -> NavigationResult<Self> {
        let defined = |path: &str| routes.iter().any(|r| r.path == path);

        if !defined(ROOT_PATH) {
            return Err(NavigationError::InvalidRouteTable(
                "root path `/` is not defined".to_string(),
            ));
        }

        for (i, route) in routes.iter().enumerate() {
            if routes[..i].iter().any(|r| r.path == route.path) {
                return Err(NavigationError::InvalidRouteTable(format!(
                    "duplicate path `{}`",
                    route.path
                )));
            }
            if let Some(target) = &route.redirect {
                if !defined(target) {
                    return Err(NavigationError::InvalidRouteTable(format!(
                        "route `{}` redirects to undefined path `{}`",
                        route.name, target
                    )));
                }
            }
        }

        Ok(Self { routes })
    }

    /// Exact match
    pub fn get(&self, path: &str) -> Option<&RouteDescriptor> {
        self.routes.iter().find(|r| r.path == path)
    }

    /// Match with catch-all fallback to the root route
    pub fn resolve(&self, path: &str) -> &RouteDescriptor {
        match self.get(path) {
            Some(route) => route,
            None => {
                tracing::debug!(path = %path, "Unknown path, falling back to root");
                self.root()
            }
        }
    }

    pub fn root(&self) -> &RouteDescriptor {
        // Presence checked in `new`; the default table defines it too
        self.routes
            .iter()
            .find(|r| r.path == ROOT_PATH)
            .unwrap_or(&self.routes[0])
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }
}

/// How route paths appear in the address bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, derive_more::Display)]
pub enum RoutingMode {
    /// `https://host/#/tasks`
    #[default]
    #[display("hash")]
    Hash,
    /// `https://host/tasks`
    #[display("path")]
    Path,
}

impl FromStr for RoutingMode {
    type Err = NavigationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(RoutingMode::Hash),
            "path" | "history" => Ok(RoutingMode::Path),
            other => Err(NavigationError::UnknownRoutingMode(other.to_string())),
        }
    }
}

impl RoutingMode {
    /// Render a route path as an address-bar location
    pub fn href(&self, path: &str) -> String {
        match self {
            RoutingMode::Hash => format!("#{path}"),
            RoutingMode::Path => path.to_string(),
        }
    }

    /// Extract the route path from a location
    ///
    /// Accepts full URLs, bare paths and (in hash mode) bare fragments.
    /// Query strings are dropped and the result is normalised to a leading
    /// `/` without a trailing one.
    pub fn path_of(&self, location: &str) -> String {
        let location = location.trim();

        let raw = match self {
            RoutingMode::Hash => match location.split_once('#') {
                Some((_, fragment)) => fragment,
                None if location.contains("://") => "",
                None => location,
            },
            RoutingMode::Path => {
                let without_origin = match location.split_once("://") {
                    Some((_, rest)) => rest.find('/').map_or("", |i| &rest[i..]),
                    None => location,
                };
                without_origin.split('#').next().unwrap_or("")
            }
        };

        normalize(raw.split('?').next().unwrap_or(""))
    }
}

fn normalize(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    if trimmed.is_empty() {
        ROOT_PATH.to_string()
    } else {
        format!("/{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_table() {
        let table = RouteTable::default();
        assert!(table.get(TASKS_PATH).unwrap().requires_auth);
        assert!(!table.get(LOGIN_PATH).unwrap().requires_auth);
        assert!(!table.get(REGISTER_PATH).unwrap().requires_auth);
        assert!(!table.get(RESET_PASSWORD_PATH).unwrap().requires_auth);

        let root = table.get(ROOT_PATH).unwrap();
        assert!(root.requires_auth);
        assert_eq!(root.redirect.as_deref(), Some(TASKS_PATH));
    }

    #[test]
    fn test_unknown_path_falls_back_to_root() {
        let table = RouteTable::default();
        assert_eq!(table.resolve("/does/not/exist").path, ROOT_PATH);
        assert_eq!(table.resolve(TASKS_PATH).path, TASKS_PATH);
    }

    #[test]
    fn test_custom_table_validation() {
        let no_root = vec![RouteDescriptor::public("login", LOGIN_PATH)];
        assert!(RouteTable::new(no_root).is_err());

        let dangling = vec![RouteDescriptor::public("root", ROOT_PATH).redirecting_to("/nowhere")];
        assert!(RouteTable::new(dangling).is_err());

        let duplicate = vec![
            RouteDescriptor::public("root", ROOT_PATH),
            RouteDescriptor::public("again", ROOT_PATH),
        ];
        assert!(RouteTable::new(duplicate).is_err());

        let ok = vec![
            RouteDescriptor::public("root", ROOT_PATH).redirecting_to("/about"),
            RouteDescriptor::public("about", "/about"),
        ];
        assert!(RouteTable::new(ok).is_ok());
    }

    #[test]
    fn test_hash_mode_paths() {
        let mode = RoutingMode::Hash;
        assert_eq!(mode.path_of("#/tasks"), "/tasks");
        assert_eq!(mode.path_of("https://todo.example.com/#/login?next=1"), "/login");
        assert_eq!(mode.path_of("https://todo.example.com/"), "/");
        assert_eq!(mode.path_of("/register/"), "/register");
        assert_eq!(mode.href("/tasks"), "#/tasks");
    }

    #[test]
    fn test_path_mode_paths() {
        let mode = RoutingMode::Path;
        assert_eq!(mode.path_of("/tasks"), "/tasks");
        assert_eq!(mode.path_of("https://todo.example.com/login?x=1#top"), "/login");
        assert_eq!(mode.path_of("https://todo.example.com"), "/");
        assert_eq!(mode.path_of(""), "/");
        assert_eq!(mode.href("/tasks"), "/tasks");
    }

    #[test]
    fn test_routing_mode_from_str() {
        assert_eq!("hash".parse::<RoutingMode>().unwrap(), RoutingMode::Hash);
        assert_eq!("Path".parse::<RoutingMode>().unwrap(), RoutingMode::Path);
        assert_eq!("history".parse::<RoutingMode>().unwrap(), RoutingMode::Path);
        assert!("memory".parse::<RoutingMode>().is_err());
        assert_eq!(RoutingMode::Hash.to_string(), "hash");
    }
}
