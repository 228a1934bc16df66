//! Read-only evaluation context.

use std::collections::HashMap;

use crate::models::{Caregiver, Instance, Minutes, Service};

/// An instance plus precomputed ID lookups, shared by the simulator and every
/// constraint family.
///
/// Nothing here is mutable after construction, so one context can be borrowed
/// from any number of worker threads. When IDs are duplicated (only possible
/// for instances that failed validation) the first occurrence wins.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::evaluation::EvaluationContext;
/// use hhcrsp_validator::models::{Instance, Location};
///
/// let instance = Instance::new("x", DistanceMatrix::from_rows(vec![vec![0, 12], vec![9, 0]]))
///     .with_location(Location::new("D"))
///     .with_location(Location::new("P1"));
/// let ctx = EvaluationContext::new(&instance);
/// assert_eq!(ctx.travel_time("D", "P1"), Some(12));
/// assert_eq!(ctx.travel_time("P1", "D"), Some(9));
/// assert_eq!(ctx.travel_time("P1", "P2"), None);
/// ```
#[derive(Debug)]
pub struct EvaluationContext<'a> {
    instance: &'a Instance,
    locations: HashMap<&'a str, usize>,
    services: HashMap<&'a str, usize>,
    caregivers: HashMap<&'a str, usize>,
}

impl<'a> EvaluationContext<'a> {
    /// Builds the lookups for the given instance.
    pub fn new(instance: &'a Instance) -> Self {
        fn index<'a>(ids: impl Iterator<Item = &'a str>) -> HashMap<&'a str, usize> {
            let mut map = HashMap::new();
            for (i, id) in ids.enumerate() {
                map.entry(id).or_insert(i);
            }
            map
        }

        Self {
            instance,
            locations: index(instance.locations().iter().map(|l| l.id.as_str())),
            services: index(instance.services().iter().map(|s| s.id())),
            caregivers: index(instance.caregivers().iter().map(|c| c.id())),
        }
    }

    /// The underlying instance.
    pub fn instance(&self) -> &'a Instance {
        self.instance
    }

    /// Looks up a service by ID.
    pub fn service(&self, id: &str) -> Option<&'a Service> {
        let instance = self.instance;
        self.services.get(id).map(|&i| &instance.services()[i])
    }

    /// Looks up a caregiver by ID.
    pub fn caregiver(&self, id: &str) -> Option<&'a Caregiver> {
        let instance = self.instance;
        self.caregivers.get(id).map(|&i| &instance.caregivers()[i])
    }

    /// Matrix index of a location.
    pub fn location_index(&self, id: &str) -> Option<usize> {
        self.locations.get(id).copied()
    }

    /// Travel time between two locations by ID.
    pub fn travel_time(&self, from: &str, to: &str) -> Option<Minutes> {
        let from = self.location_index(from)?;
        let to = self.location_index(to)?;
        self.instance.distances().get(from, to)
    }
}
