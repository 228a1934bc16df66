//! Route type.

use serde::{Deserialize, Serialize};

/// An ordered sequence of services assigned to a single caregiver.
///
/// Order is the visiting sequence; timing is derived by simulation. A route
/// implicitly starts and ends at the caregiver's depot.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::models::Route;
///
/// let route = Route::new("C1").with_service("S1").with_service("S3");
/// assert_eq!(route.caregiver(), "C1");
/// assert_eq!(route.services(), ["S1", "S3"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    caregiver: String,
    #[serde(default)]
    services: Vec<String>,
}

impl Route {
    /// Creates an empty route for the given caregiver.
    pub fn new(caregiver: impl Into<String>) -> Self {
        Self {
            caregiver: caregiver.into(),
            services: Vec::new(),
        }
    }

    /// Appends a service to the end of this route.
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.push_service(service);
        self
    }

    /// Appends a service to the end of this route.
    pub fn push_service(&mut self, service: impl Into<String>) {
        self.services.push(service.into());
    }

    /// Returns the caregiver assigned to this route.
    pub fn caregiver(&self) -> &str {
        &self.caregiver
    }

    /// Returns the service IDs in visit order.
    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// Returns the number of visits.
    pub fn len(&self) -> usize {
        self.services.len()
    }

    /// Returns `true` if this route has no visits.
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
