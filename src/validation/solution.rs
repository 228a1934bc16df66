//! Referential cross-check of a solution against an instance.

use std::collections::{HashMap, HashSet};

use log::debug;

use super::SolutionError;
use crate::models::{Instance, Solution};

/// Checks that a solution only references known caregivers and services,
/// assigns every service exactly once, and has at most one route per
/// caregiver.
///
/// Errors are reported in route order, followed by missing assignments in
/// instance order.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::models::{Caregiver, Instance, Location, Route, Service, Solution, TimeWindow};
/// use hhcrsp_validator::validation::{check_solution, SolutionError};
///
/// let instance = Instance::new("one", DistanceMatrix::new(1))
///     .with_location(Location::new("D"))
///     .with_service(Service::new("S1", "D", 10, TimeWindow::new(0, 60)))
///     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
///
/// let empty = Solution::new().with_route(Route::new("C1"));
/// assert_eq!(
///     check_solution(&instance, &empty),
///     vec![SolutionError::MissingAssignment { service: "S1".into() }]
/// );
/// ```
pub fn check_solution(instance: &Instance, solution: &Solution) -> Vec<SolutionError> {
    let mut errors = Vec::new();

    let caregivers: HashSet<&str> = instance.caregivers().iter().map(|c| c.id()).collect();
    let services: HashSet<&str> = instance.services().iter().map(|s| s.id()).collect();

    let mut routed: HashSet<&str> = HashSet::new();
    let mut assigned: HashMap<&str, &str> = HashMap::new();

    for route in solution.routes() {
        let caregiver = route.caregiver();
        if !caregivers.contains(caregiver) {
            errors.push(SolutionError::UnknownCaregiver {
                caregiver: caregiver.to_string(),
            });
        } else if !routed.insert(caregiver) {
            errors.push(SolutionError::DuplicateRoute {
                caregiver: caregiver.to_string(),
            });
        }

        for service in route.services() {
            if !services.contains(service.as_str()) {
                errors.push(SolutionError::UnknownServiceReference {
                    caregiver: caregiver.to_string(),
                    service: service.clone(),
                });
                continue;
            }
            if let Some(first) = assigned.get(service.as_str()) {
                errors.push(SolutionError::DuplicateAssignment {
                    service: service.clone(),
                    first: first.to_string(),
                    second: caregiver.to_string(),
                });
            } else {
                assigned.insert(service.as_str(), caregiver);
            }
        }
    }

    for service in instance.services() {
        if !assigned.contains_key(service.id()) {
            errors.push(SolutionError::MissingAssignment {
                service: service.id().to_string(),
            });
        }
    }

    debug!(
        "solution cross-checked: {} route(s), {} referential error(s)",
        solution.num_routes(),
        errors.len()
    );
    errors
}
