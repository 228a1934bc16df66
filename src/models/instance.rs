//! Problem instance: locations, services, caregivers, travel times and
//! coordination constraints.

use serde::{Deserialize, Serialize};

use super::{Caregiver, Minutes, Service};
use crate::distance::DistanceMatrix;

/// A place visited by caregivers (patient home or depot).
///
/// The position of a location in [`Instance::locations`] is its row and
/// column index in the distance matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Location ID.
    pub id: String,
    /// Optional coordinates, informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<(f64, f64)>,
}

impl Location {
    /// Creates a location without coordinates.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            coordinates: None,
        }
    }

    /// Sets coordinates.
    pub fn with_coordinates(mut self, x: f64, y: f64) -> Self {
        self.coordinates = Some((x, y));
        self
    }
}

/// Requires `successor.start - predecessor.end` to lie in `[min_lag, max_lag]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceConstraint {
    /// Service that must happen first.
    pub predecessor: String,
    /// Service that must follow.
    pub successor: String,
    /// Minimum gap between predecessor end and successor start.
    pub min_lag: Minutes,
    /// Maximum gap between predecessor end and successor start.
    pub max_lag: Minutes,
}

impl PrecedenceConstraint {
    /// Creates a precedence constraint.
    pub fn new(
        predecessor: impl Into<String>,
        successor: impl Into<String>,
        min_lag: Minutes,
        max_lag: Minutes,
    ) -> Self {
        Self {
            predecessor: predecessor.into(),
            successor: successor.into(),
            min_lag,
            max_lag,
        }
    }
}

/// Services whose start times must lie within `max_offset` of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynchronizationGroup {
    /// Group ID.
    pub id: String,
    /// Member service IDs.
    pub services: Vec<String>,
    /// Largest allowed spread between the earliest and latest start.
    pub max_offset: Minutes,
}

impl SynchronizationGroup {
    /// Creates a synchronization group.
    pub fn new<I, S>(id: impl Into<String>, services: I, max_offset: Minutes) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            services: services.into_iter().map(Into::into).collect(),
            max_offset,
        }
    }
}

/// A complete HHCRSP instance.
///
/// Immutable once built; validation and evaluation only borrow it.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::models::{Caregiver, Instance, Location, Service, TimeWindow};
///
/// let instance = Instance::new("tiny", DistanceMatrix::from_rows(vec![vec![0, 10], vec![10, 0]]))
///     .with_location(Location::new("D"))
///     .with_location(Location::new("P1"))
///     .with_service(Service::new("S1", "P1", 30, TimeWindow::new(0, 120)))
///     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
/// assert_eq!(instance.services().len(), 1);
/// assert_eq!(instance.distances().get(0, 1), Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    name: String,
    #[serde(default)]
    locations: Vec<Location>,
    #[serde(default)]
    services: Vec<Service>,
    #[serde(default)]
    caregivers: Vec<Caregiver>,
    distances: DistanceMatrix,
    #[serde(default)]
    precedences: Vec<PrecedenceConstraint>,
    #[serde(default)]
    sync_groups: Vec<SynchronizationGroup>,
}

impl Instance {
    /// Creates an instance with the given travel-time matrix and no entities.
    pub fn new(name: impl Into<String>, distances: DistanceMatrix) -> Self {
        Self {
            name: name.into(),
            locations: Vec::new(),
            services: Vec::new(),
            caregivers: Vec::new(),
            distances,
            precedences: Vec::new(),
            sync_groups: Vec::new(),
        }
    }

    /// Adds a location; its index in the matrix is its insertion position.
    pub fn with_location(mut self, location: Location) -> Self {
        self.locations.push(location);
        self
    }

    /// Adds a service.
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Adds a caregiver.
    pub fn with_caregiver(mut self, caregiver: Caregiver) -> Self {
        self.caregivers.push(caregiver);
        self
    }

    /// Adds a precedence constraint.
    pub fn with_precedence(mut self, precedence: PrecedenceConstraint) -> Self {
        self.precedences.push(precedence);
        self
    }

    /// Adds a synchronization group.
    pub fn with_sync_group(mut self, group: SynchronizationGroup) -> Self {
        self.sync_groups.push(group);
        self
    }

    /// Instance name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All locations, in matrix order.
    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    /// All services.
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// All caregivers.
    pub fn caregivers(&self) -> &[Caregiver] {
        &self.caregivers
    }

    /// Travel-time matrix.
    pub fn distances(&self) -> &DistanceMatrix {
        &self.distances
    }

    /// Declared precedence constraints.
    pub fn precedences(&self) -> &[PrecedenceConstraint] {
        &self.precedences
    }

    /// Declared synchronization groups.
    pub fn sync_groups(&self) -> &[SynchronizationGroup] {
        &self.sync_groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeWindow;

    #[test]
    fn test_instance_builder() {
        let instance = Instance::new("demo", DistanceMatrix::new(2))
            .with_location(Location::new("D").with_coordinates(45.4, 12.3))
            .with_location(Location::new("P1"))
            .with_service(Service::new("S1", "P1", 20, TimeWindow::new(0, 60)))
            .with_service(Service::new("S2", "P1", 20, TimeWindow::new(0, 60)))
            .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)))
            .with_precedence(PrecedenceConstraint::new("S1", "S2", 0, 30))
            .with_sync_group(SynchronizationGroup::new("G", ["S1", "S2"], 10));

        assert_eq!(instance.name(), "demo");
        assert_eq!(instance.locations().len(), 2);
        assert_eq!(instance.locations()[0].coordinates, Some((45.4, 12.3)));
        assert_eq!(instance.precedences()[0].max_lag, 30);
        assert_eq!(instance.sync_groups()[0].services, vec!["S1", "S2"]);
    }

    #[test]
    fn test_instance_json_defaults() {
        let instance: Instance =
            serde_json::from_str(r#"{"name":"empty","distances":[]}"#).expect("valid json");
        assert!(instance.services().is_empty());
        assert!(instance.precedences().is_empty());
        assert_eq!(instance.distances().size(), 0);
    }
}
