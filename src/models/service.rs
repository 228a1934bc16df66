//! Service and time window types.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::Minutes;

/// An inclusive time window `[start, end]` in minutes.
///
/// Construction never fails so that malformed source data can still be
/// represented and reported by the instance validator.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::models::TimeWindow;
///
/// let tw = TimeWindow::new(100, 200);
/// assert!(tw.is_well_formed());
/// assert!(tw.contains(200));
/// assert!(!tw.contains(201));
/// assert_eq!(tw.lateness(210), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeWindow {
    start: Minutes,
    end: Minutes,
}

impl TimeWindow {
    /// Creates a new time window.
    pub fn new(start: Minutes, end: Minutes) -> Self {
        Self { start, end }
    }

    /// Earliest allowable start of service.
    pub fn start(&self) -> Minutes {
        self.start
    }

    /// Latest allowable start of service (inclusive).
    pub fn end(&self) -> Minutes {
        self.end
    }

    /// Returns `true` if `start <= end`.
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    /// Length of the window (`end - start`).
    pub fn size(&self) -> Minutes {
        self.end.saturating_sub(self.start)
    }

    /// Returns `true` if the given time falls within this window.
    pub fn contains(&self, time: Minutes) -> bool {
        time >= self.start && time <= self.end
    }

    /// Returns the waiting time if arriving at the given time.
    ///
    /// Zero if arriving within or after the window.
    pub fn waiting_time(&self, arrival: Minutes) -> Minutes {
        self.start.saturating_sub(arrival).max(0)
    }

    /// How far `time` lies past the window end, zero if not past it.
    pub fn lateness(&self, time: Minutes) -> Minutes {
        time.saturating_sub(self.end).max(0)
    }
}

/// A home-care service to be performed at a patient's location.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::models::{Service, TimeWindow};
///
/// let s = Service::new("S1", "P1", 30, TimeWindow::new(60, 120))
///     .with_skill("nursing")
///     .with_sync_group("G1");
/// assert_eq!(s.id(), "S1");
/// assert!(s.required_skills().contains("nursing"));
/// assert_eq!(s.sync_group(), Some("G1"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    id: String,
    location: String,
    duration: Minutes,
    #[serde(default)]
    required_skills: BTreeSet<String>,
    time_window: TimeWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sync_group: Option<String>,
    #[serde(default)]
    load: i64,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    incompatible_caregivers: BTreeSet<String>,
}

impl Service {
    /// Creates a service with no skill requirements.
    pub fn new(
        id: impl Into<String>,
        location: impl Into<String>,
        duration: Minutes,
        time_window: TimeWindow,
    ) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            duration,
            required_skills: BTreeSet::new(),
            time_window,
            sync_group: None,
            load: 0,
            incompatible_caregivers: BTreeSet::new(),
        }
    }

    /// Adds a required skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.required_skills.insert(skill.into());
        self
    }

    /// Places this service in a synchronization group.
    pub fn with_sync_group(mut self, group: impl Into<String>) -> Self {
        self.sync_group = Some(group.into());
        self
    }

    /// Sets the load consumed from the caregiver's per-shift capacity.
    pub fn with_load(mut self, load: i64) -> Self {
        self.load = load;
        self
    }

    /// Forbids the given caregiver from performing this service.
    pub fn with_incompatible_caregiver(mut self, caregiver: impl Into<String>) -> Self {
        self.incompatible_caregivers.insert(caregiver.into());
        self
    }

    /// Service ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// ID of the location where the service takes place.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Service duration in minutes.
    pub fn duration(&self) -> Minutes {
        self.duration
    }

    /// Skills a caregiver needs to perform this service.
    pub fn required_skills(&self) -> &BTreeSet<String> {
        &self.required_skills
    }

    /// Window in which service must start.
    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    /// Synchronization group this service belongs to, if any.
    pub fn sync_group(&self) -> Option<&str> {
        self.sync_group.as_deref()
    }

    /// Load units consumed by this service.
    pub fn load(&self) -> i64 {
        self.load
    }

    /// Caregivers that must not perform this service.
    pub fn incompatible_caregivers(&self) -> &BTreeSet<String> {
        &self.incompatible_caregivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_well_formed() {
        assert!(TimeWindow::new(10, 20).is_well_formed());
        assert!(TimeWindow::new(10, 10).is_well_formed());
        assert!(!TimeWindow::new(20, 10).is_well_formed());
    }

    #[test]
    fn test_time_window_contains_inclusive() {
        let tw = TimeWindow::new(10, 20);
        assert!(tw.contains(10));
        assert!(tw.contains(20));
        assert!(!tw.contains(9));
        assert!(!tw.contains(21));
    }

    #[test]
    fn test_time_window_waiting_and_lateness() {
        let tw = TimeWindow::new(10, 20);
        assert_eq!(tw.waiting_time(5), 5);
        assert_eq!(tw.waiting_time(15), 0);
        assert_eq!(tw.lateness(20), 0);
        assert_eq!(tw.lateness(21), 1);
        assert_eq!(tw.size(), 10);
    }

    #[test]
    fn test_service_builder() {
        let s = Service::new("S1", "P1", 30, TimeWindow::new(0, 100))
            .with_skill("A")
            .with_skill("B")
            .with_load(2)
            .with_incompatible_caregiver("C9");
        assert_eq!(s.location(), "P1");
        assert_eq!(s.duration(), 30);
        assert_eq!(s.required_skills().len(), 2);
        assert_eq!(s.load(), 2);
        assert!(s.incompatible_caregivers().contains("C9"));
        assert!(s.sync_group().is_none());
    }

    #[test]
    fn test_service_defaults_from_json() {
        let s: Service = serde_json::from_str(
            r#"{"id":"S1","location":"P1","duration":15,"time_window":{"start":0,"end":60}}"#,
        )
        .expect("valid json");
        assert!(s.required_skills().is_empty());
        assert_eq!(s.load(), 0);
        assert!(s.sync_group().is_none());
    }
}
