//! Derived schedule types produced by the timeline simulator.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::models::Minutes;

/// Timing of a single visit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitTiming {
    /// Service performed.
    pub service: String,
    /// Location of the service.
    pub location: String,
    /// Arrival at the location.
    pub arrival: Minutes,
    /// Start of service (arrival, or window opening if earlier).
    pub start: Minutes,
    /// End of service.
    pub end: Minutes,
}

impl VisitTiming {
    /// Idle time spent waiting for the window to open.
    pub fn waiting(&self) -> Minutes {
        self.start.saturating_sub(self.arrival)
    }
}

/// The replayed route of one caregiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    /// Caregiver ID.
    pub caregiver: String,
    /// Departure from the depot (shift start).
    pub departure: Minutes,
    /// Visits in route order.
    pub visits: Vec<VisitTiming>,
    /// Arrival back at the depot.
    pub return_arrival: Minutes,
    /// Total travel time including the return leg.
    pub travel_time: Minutes,
    /// Total waiting time before services.
    pub waiting_time: Minutes,
}

impl Timeline {
    /// Elapsed time from departure to return at the depot.
    pub fn elapsed(&self) -> Minutes {
        self.return_arrival.saturating_sub(self.departure)
    }

    /// Total time spent performing services.
    pub fn service_time(&self) -> Minutes {
        self.visits
            .iter()
            .map(|v| v.end.saturating_sub(v.start))
            .fold(0, Minutes::saturating_add)
    }
}

/// Timelines of all routes, joined and indexed by service.
///
/// This is the read-only snapshot every constraint family evaluates.
#[derive(Debug, Clone, Default)]
pub struct Timings {
    timelines: Vec<Timeline>,
    by_service: HashMap<String, (usize, usize)>,
}

impl Timings {
    /// Joins per-route timelines.
    pub fn new(timelines: Vec<Timeline>) -> Self {
        let mut by_service = HashMap::new();
        for (t, timeline) in timelines.iter().enumerate() {
            for (v, visit) in timeline.visits.iter().enumerate() {
                by_service.entry(visit.service.clone()).or_insert((t, v));
            }
        }
        Self {
            timelines,
            by_service,
        }
    }

    /// All timelines, in route order.
    pub fn timelines(&self) -> &[Timeline] {
        &self.timelines
    }

    /// Timing of the given service, if assigned.
    pub fn visit(&self, service: &str) -> Option<&VisitTiming> {
        self.by_service
            .get(service)
            .map(|&(t, v)| &self.timelines[t].visits[v])
    }

    /// Caregiver performing the given service, if assigned.
    pub fn caregiver_of(&self, service: &str) -> Option<&str> {
        self.by_service
            .get(service)
            .map(|&(t, _)| self.timelines[t].caregiver.as_str())
    }

    /// Every visit paired with its timeline.
    pub fn visits(&self) -> impl Iterator<Item = (&Timeline, &VisitTiming)> {
        self.timelines
            .iter()
            .flat_map(|t| t.visits.iter().map(move |v| (t, v)))
    }
}
