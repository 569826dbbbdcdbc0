//! Console route table and path matching.

use std::collections::BTreeMap;

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const NOT_FOUND_PATH: &str = "/404";
pub const SERVER_ERROR_PATH: &str = "/500";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Reachable without a session; signed-in users are sent home instead.
    Public,
    Protected,
    /// Reachable with or without a session; error pages.
    Any,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDef {
    pub name: &'static str,
    /// Absolute pattern; `:name` segments capture a parameter.
    pub pattern: &'static str,
    pub title: Option<&'static str>,
    pub access: Access,
    pub redirect: Option<&'static str>,
}

impl RouteDef {
    const fn public(name: &'static str, pattern: &'static str, title: &'static str) -> Self {
        Self {
            name,
            pattern,
            title: Some(title),
            access: Access::Public,
            redirect: None,
        }
    }

    const fn protected(name: &'static str, pattern: &'static str, title: &'static str) -> Self {
        Self {
            name,
            pattern,
            title: Some(title),
            access: Access::Protected,
            redirect: None,
        }
    }

    const fn any(name: &'static str, pattern: &'static str, title: &'static str) -> Self {
        Self {
            name,
            pattern,
            title: Some(title),
            access: Access::Any,
            redirect: None,
        }
    }

    const fn redirect(name: &'static str, pattern: &'static str, to: &'static str) -> Self {
        Self {
            name,
            pattern,
            title: None,
            access: Access::Protected,
            redirect: Some(to),
        }
    }

    fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let mut pattern_segments = segments(self.pattern);
        let mut path_segments = segments(path);
        let mut params = BTreeMap::new();

        loop {
            match (pattern_segments.next(), path_segments.next()) {
                (None, None) => return Some(params),
                (Some(expected), Some(actual)) => {
                    if let Some(name) = expected.strip_prefix(':') {
                        params.insert(name.to_string(), actual.to_string());
                    } else if expected != actual {
                        return None;
                    }
                }
                _ => return None,
            }
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// A route matched against a concrete location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedRoute<'a> {
    pub route: &'a RouteDef,
    pub path: String,
    pub params: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    Matched(MatchedRoute<'a>),
    Redirect(String),
}

#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: Vec<RouteDef>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDef>) -> Self {
        Self { routes }
    }

    /// Every page of the admin console.
    pub fn console() -> Self {
        Self::new(vec![
            RouteDef::public("Login", LOGIN_PATH, "Sign in"),
            RouteDef::redirect("Home", HOME_PATH, DASHBOARD_PATH),
            RouteDef::protected("Dashboard", DASHBOARD_PATH, "Security Overview"),
            RouteDef::protected("Hosts", "/hosts", "Hosts"),
            RouteDef::protected("HostDetail", "/hosts/:hostId", "Host Detail"),
            RouteDef::protected("BusinessLines", "/business-lines", "Business Lines"),
            RouteDef::protected("Policies", "/policies", "Baseline Checks"),
            RouteDef::protected("PolicyDetail", "/policies/:policyId", "Baseline Check Detail"),
            RouteDef::protected("PolicyGroups", "/policy-groups", "Policy Groups"),
            RouteDef::protected(
                "PolicyRules",
                "/policy-groups/policies/:policyId/rules",
                "Rules",
            ),
            RouteDef::protected("Tasks", "/tasks", "Tasks"),
            RouteDef::protected("BaselineFix", "/baseline/fix", "Baseline Fix"),
            RouteDef::protected("BaselineFixHistory", "/baseline/fix-history", "Fix History"),
            RouteDef::protected("SystemCollection", "/system/collection", "Platform License"),
            RouteDef::protected("SystemComponents", "/system/components", "Components"),
            RouteDef::protected("SystemInstall", "/system/install", "Installation"),
            RouteDef::protected("Users", "/users", "Users"),
            RouteDef::protected("SystemSettings", "/system/settings", "Settings"),
            RouteDef::protected("SystemNotification", "/system/notification", "Notifications"),
            RouteDef::protected("SystemReports", "/system/reports", "Reports"),
            RouteDef::protected("SystemTaskReport", "/system/task-report", "Task Reports"),
            RouteDef::protected("Alerts", "/alerts", "Alerts"),
            RouteDef::protected("AlertDetail", "/alerts/:alertId", "Alert Detail"),
            RouteDef::protected("Inspection", "/system/inspection", "Inspection"),
            RouteDef::any("NotFound", NOT_FOUND_PATH, "Page Not Found"),
            RouteDef::any("ServerError", SERVER_ERROR_PATH, "Server Error"),
        ])
    }

    pub fn routes(&self) -> &[RouteDef] {
        &self.routes
    }

    /// Match `location` (query and fragment ignored) against the table.
    ///
    /// Unknown paths redirect to the not-found page.
    pub fn resolve(&self, location: &str) -> Resolution<'_> {
        let path = location
            .split(['?', '#'])
            .next()
            .unwrap_or_default();

        for route in &self.routes {
            if let Some(params) = route.matches(path) {
                if let Some(to) = route.redirect {
                    return Resolution::Redirect(to.to_string());
                }
                return Resolution::Matched(MatchedRoute {
                    route,
                    path: path.to_string(),
                    params,
                });
            }
        }

        Resolution::Redirect(NOT_FOUND_PATH.to_string())
    }
}

impl Default for RouteTable {
    fn default() -> Self {
        Self::console()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched<'a>(table: &'a RouteTable, path: &str) -> MatchedRoute<'a> {
        match table.resolve(path) {
            Resolution::Matched(m) => m,
            other => panic!("expected match for {}, got {:?}", path, other),
        }
    }

    #[test]
    fn root_redirects_to_dashboard() {
        let table = RouteTable::console();
        assert_eq!(
            table.resolve("/"),
            Resolution::Redirect(DASHBOARD_PATH.to_string())
        );
    }

    #[test]
    fn captures_path_parameters() {
        let table = RouteTable::console();

        let host = matched(&table, "/hosts/h-42");
        assert_eq!(host.route.name, "HostDetail");
        assert_eq!(host.params.get("hostId").map(String::as_str), Some("h-42"));

        let rules = matched(&table, "/policy-groups/policies/p1/rules?page=2");
        assert_eq!(rules.route.name, "PolicyRules");
        assert_eq!(rules.path, "/policy-groups/policies/p1/rules");
        assert_eq!(rules.params.get("policyId").map(String::as_str), Some("p1"));
    }

    #[test]
    fn static_segments_win_over_later_params() {
        let table = RouteTable::console();
        assert_eq!(matched(&table, "/hosts").route.name, "Hosts");
        assert_eq!(matched(&table, "/hosts/").route.name, "Hosts");
    }

    #[test]
    fn unknown_paths_redirect_to_not_found() {
        let table = RouteTable::console();
        assert_eq!(
            table.resolve("/no/such/page"),
            Resolution::Redirect(NOT_FOUND_PATH.to_string())
        );
        assert_eq!(
            table.resolve("/hosts/h1/extra"),
            Resolution::Redirect(NOT_FOUND_PATH.to_string())
        );
    }

    #[test]
    fn access_classes() {
        let table = RouteTable::console();
        assert_eq!(matched(&table, LOGIN_PATH).route.access, Access::Public);
        for path in [NOT_FOUND_PATH, SERVER_ERROR_PATH] {
            assert_eq!(matched(&table, path).route.access, Access::Any);
        }
        assert_eq!(matched(&table, "/alerts/7").route.access, Access::Protected);
    }
}
