//! Navigator
//!
//! Matches a location against the route table, runs the guard and follows
//! redirects until a route is allowed.

use std::sync::Arc;

use serde::Serialize;

use crate::error::{NavigationError, NavigationResult};
use crate::guard::{GuardDecision, NavigationGuard};
use crate::resolver::{AuthStateSource, SessionResolver};
use crate::route::RouteTable;
use crate::state::SessionState;

/// Upper bound on chained redirects for one navigation
pub const MAX_REDIRECT_HOPS: usize = 8;

/// Where a navigation ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationOutcome {
    /// Route path extracted from the requested location
    pub requested: String,
    /// Final route path
    pub path: String,
    pub route_name: String,
    /// Final location as rendered for the address bar
    pub location: String,
    pub redirected: bool,
    pub hops: usize,
}

pub struct Navigator<S>
where
    S: AuthStateSource,
{
    table: RouteTable,
    guard: NavigationGuard,
    resolver: Arc<SessionResolver<S>>,
}

impl<S> Navigator<S>
where
    S: AuthStateSource + Sync,
{
    pub fn new(table: RouteTable, guard: NavigationGuard, resolver: Arc<SessionResolver<S>>) -> Self {
        Self {
            table,
            guard,
            resolver,
        }
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    pub fn resolver(&self) -> &Arc<SessionResolver<S>> {
        &self.resolver
    }

    /// Navigate, awaiting session resolution if it hasn't happened yet
    pub async fn navigate(&self, location: &str) -> NavigationResult<NavigationOutcome> {
        let state = self.resolver.resolve().await;
        self.navigate_with(location, &state)
    }

    /// Navigate against an explicit session state
    ///
    /// Route-level redirects apply before the guard runs, so `/` forwards
    /// to the landing route and the guard judges that route instead.
    pub fn navigate_with(
        &self,
        location: &str,
        state: &SessionState,
    ) -> NavigationResult<NavigationOutcome> {
        let mode = self.guard.config().routing_mode;
        let requested = mode.path_of(location);
        let mut path = requested.clone();
        let mut hops = 0;

        loop {
            let route = self.table.resolve(&path);

            let next = match &route.redirect {
                Some(target) => target.clone(),
                None => match self.guard.decide_route(route, state) {
                    GuardDecision::Allow => {
                        let outcome = NavigationOutcome {
                            redirected: route.path != requested,
                            requested,
                            path: route.path.clone(),
                            route_name: route.name.clone(),
                            location: mode.href(&route.path),
                            hops,
                        };
                        tracing::debug!(
                            requested = %outcome.requested,
                            path = %outcome.path,
                            hops,
                            session = state.label(),
                            "Navigation settled"
                        );
                        return Ok(outcome);
                    }
                    GuardDecision::RedirectToLogin(target)
                    | GuardDecision::RedirectToHome(target) => target,
                },
            };

            hops += 1;
            if hops > MAX_REDIRECT_HOPS {
                tracing::error!(requested = %requested, hops, "Redirect loop detected");
                return Err(NavigationError::RedirectLoop { requested, hops });
            }
            path = next;
        }
    }
}
