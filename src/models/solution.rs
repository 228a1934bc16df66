//! Solution type.

use serde::{Deserialize, Serialize};

use super::Route;

/// A proposed solution: one route per caregiver.
///
/// Caregivers without a route simply stay at their depot.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::models::{Solution, Route};
///
/// let mut sol = Solution::new();
/// sol.add_route(Route::new("C1").with_service("S1"));
/// assert_eq!(sol.num_routes(), 1);
/// assert_eq!(sol.num_served(), 1);
/// assert!(sol.route_for("C1").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Solution {
    #[serde(default)]
    routes: Vec<Route>,
}

impl Solution {
    /// Creates an empty solution.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route and returns self.
    pub fn with_route(mut self, route: Route) -> Self {
        self.add_route(route);
        self
    }

    /// Adds a route to this solution.
    pub fn add_route(&mut self, route: Route) {
        self.routes.push(route);
    }

    /// Returns the routes in this solution.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Returns the number of routes.
    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    /// Total number of visits across all routes.
    pub fn num_served(&self) -> usize {
        self.routes.iter().map(|r| r.len()).sum()
    }

    /// Returns the first route of the given caregiver.
    pub fn route_for(&self, caregiver: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.caregiver() == caregiver)
    }
}
