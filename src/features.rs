//! Descriptive statistics of an instance.
//!
//! Useful for comparing benchmark instances and for spotting services no
//! caregiver can ever perform before any solution is checked.

use serde::{Deserialize, Serialize};

use crate::io::instance_signature;
use crate::models::{Caregiver, Instance, Minutes, Service};

/// Minimum, mean and maximum of a sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Smallest value.
    pub min: i64,
    /// Arithmetic mean.
    pub avg: f64,
    /// Largest value.
    pub max: i64,
}

impl Stats {
    /// Summarizes the values, or `None` for an empty sample.
    ///
    /// # Examples
    ///
    /// ```
    /// use hhcrsp_validator::features::Stats;
    ///
    /// let stats = Stats::from_values([4, 1, 7]).unwrap();
    /// assert_eq!((stats.min, stats.max), (1, 7));
    /// assert!((stats.avg - 4.0).abs() < 1e-10);
    /// assert!(Stats::from_values(std::iter::empty()).is_none());
    /// ```
    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Option<Self> {
        let mut iter = values.into_iter();
        let first = iter.next()?;
        let (mut min, mut max, mut sum, mut count) = (first, first, i128::from(first), 1_u64);
        for v in iter {
            min = min.min(v);
            max = max.max(v);
            sum += i128::from(v);
            count += 1;
        }
        Some(Self {
            min,
            avg: sum as f64 / count as f64,
            max,
        })
    }
}

/// Summary features of an instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceFeatures {
    /// Instance name.
    pub name: String,
    /// Content digest from [`instance_signature`]; `None` only if the
    /// instance cannot be serialized.
    pub signature: Option<String>,
    /// Number of locations.
    pub num_locations: usize,
    /// Number of services.
    pub num_services: usize,
    /// Number of caregivers.
    pub num_caregivers: usize,
    /// Number of synchronization groups.
    pub num_sync_groups: usize,
    /// Number of precedence constraints.
    pub num_precedences: usize,
    /// Services belonging to some synchronization group.
    pub num_synchronized_services: usize,
    /// Caregivers able to perform each service.
    pub compatible_caregivers: Option<Stats>,
    /// Service time window widths.
    pub time_window_size: Option<Stats>,
    /// Service durations.
    pub service_duration: Option<Stats>,
    /// Off-diagonal travel times.
    pub travel_time: Option<Stats>,
    /// Services without a single compatible caregiver, in instance order.
    pub uncovered_services: Vec<String>,
}

impl InstanceFeatures {
    /// Computes the features of an instance.
    ///
    /// A caregiver is compatible with a service if it holds every required
    /// skill and is not listed as incompatible.
    ///
    /// # Examples
    ///
    /// ```
    /// use hhcrsp_validator::distance::DistanceMatrix;
    /// use hhcrsp_validator::features::InstanceFeatures;
    /// use hhcrsp_validator::models::{Caregiver, Instance, Location, Service, TimeWindow};
    ///
    /// let instance = Instance::new("f", DistanceMatrix::from_rows(vec![vec![0, 10], vec![12, 0]]))
    ///     .with_location(Location::new("D"))
    ///     .with_location(Location::new("P1"))
    ///     .with_service(Service::new("S1", "P1", 30, TimeWindow::new(0, 60)).with_skill("A"))
    ///     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
    /// let features = InstanceFeatures::compute(&instance);
    /// assert_eq!(features.uncovered_services, vec!["S1".to_string()]);
    /// assert_eq!(features.travel_time.map(|s| s.max), Some(12));
    /// ```
    pub fn compute(instance: &Instance) -> Self {
        let compatible: Vec<(&Service, usize)> = instance
            .services()
            .iter()
            .map(|s| {
                let n = instance
                    .caregivers()
                    .iter()
                    .filter(|c| is_compatible(c, s))
                    .count();
                (s, n)
            })
            .collect();

        Self {
            name: instance.name().to_string(),
            signature: instance_signature(instance).ok(),
            num_locations: instance.locations().len(),
            num_services: instance.services().len(),
            num_caregivers: instance.caregivers().len(),
            num_sync_groups: instance.sync_groups().len(),
            num_precedences: instance.precedences().len(),
            num_synchronized_services: instance
                .services()
                .iter()
                .filter(|s| s.sync_group().is_some())
                .count(),
            compatible_caregivers: Stats::from_values(compatible.iter().map(|&(_, n)| n as i64)),
            time_window_size: Stats::from_values(
                instance.services().iter().map(|s| s.time_window().size()),
            ),
            service_duration: Stats::from_values(instance.services().iter().map(Service::duration)),
            travel_time: Stats::from_values(instance.distances().off_diagonal()),
            uncovered_services: compatible
                .iter()
                .filter(|&&(_, n)| n == 0)
                .map(|(s, _)| s.id().to_string())
                .collect(),
        }
    }

    /// Mean service duration, or zero without services.
    pub fn mean_service_duration(&self) -> f64 {
        self.service_duration.map_or(0.0, |s| s.avg)
    }

    /// Longest service duration, or zero without services.
    pub fn longest_service(&self) -> Minutes {
        self.service_duration.map_or(0, |s| s.max)
    }
}

fn is_compatible(caregiver: &Caregiver, service: &Service) -> bool {
    caregiver.has_skills(service.required_skills())
        && !service.incompatible_caregivers().contains(caregiver.id())
}
