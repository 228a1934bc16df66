//! Violation types and the immutable violation report.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintFamily;
use crate::models::Minutes;

/// Quantity limited by a caregiver's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CapacityMeasure {
    /// Number of services in the route.
    ServiceCount,
    /// Sum of service loads in the route.
    Load,
}

/// A feasibility breach, with the data needed to locate it.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ViolationType {
    /// Caregiver lacks skills the service requires.
    SkillMismatch {
        /// Service ID.
        service: String,
        /// Caregiver ID.
        caregiver: String,
        /// Missing skills, sorted.
        missing_skills: Vec<String>,
    },
    /// Service starts after its window closes.
    TimeWindowViolation {
        /// Service ID.
        service: String,
        /// Caregiver ID.
        caregiver: String,
        /// Actual start.
        start: Minutes,
        /// Window end.
        window_end: Minutes,
    },
    /// Gap between predecessor end and successor start is outside its bounds.
    PrecedenceViolation {
        /// Predecessor service ID.
        predecessor: String,
        /// Successor service ID.
        successor: String,
        /// Actual `successor.start - predecessor.end`.
        lag: Minutes,
        /// Minimum lag.
        min_lag: Minutes,
        /// Maximum lag.
        max_lag: Minutes,
    },
    /// Start times in a synchronization group spread too far apart.
    SynchronizationViolation {
        /// Group ID.
        group: String,
        /// Member starting first.
        earliest: String,
        /// Member starting last.
        latest: String,
        /// `max(start) - min(start)`.
        spread: Minutes,
        /// Allowed spread.
        max_offset: Minutes,
    },
    /// Elapsed route time exceeds the caregiver's limit.
    WorkingTimeExceeded {
        /// Caregiver ID.
        caregiver: String,
        /// Return arrival minus shift start.
        elapsed: Minutes,
        /// Limit.
        max_working_duration: Minutes,
    },
    /// A stretch of continuous work exceeds the break rule threshold.
    MissingRest {
        /// Caregiver ID.
        caregiver: String,
        /// Start of the work stretch.
        segment_start: Minutes,
        /// End of the work stretch.
        segment_end: Minutes,
        /// Allowed continuous work.
        max_continuous_work: Minutes,
    },
    /// Caregiver returns to the depot after the shift ends.
    ShiftOverrun {
        /// Caregiver ID.
        caregiver: String,
        /// Arrival back at the depot.
        return_arrival: Minutes,
        /// Shift end.
        shift_end: Minutes,
    },
    /// Route exceeds a per-shift capacity.
    CapacityExceeded {
        /// Caregiver ID.
        caregiver: String,
        /// Limited quantity.
        measure: CapacityMeasure,
        /// Actual value.
        value: i64,
        /// Limit.
        limit: i64,
    },
    /// Service performed by a caregiver declared incompatible with it.
    IncompatibleCaregiver {
        /// Service ID.
        service: String,
        /// Caregiver ID.
        caregiver: String,
    },
}

/// Field-less tag of a [`ViolationType`], used for summaries and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// See [`ViolationType::SkillMismatch`].
    SkillMismatch,
    /// See [`ViolationType::TimeWindowViolation`].
    TimeWindowViolation,
    /// See [`ViolationType::PrecedenceViolation`].
    PrecedenceViolation,
    /// See [`ViolationType::SynchronizationViolation`].
    SynchronizationViolation,
    /// See [`ViolationType::WorkingTimeExceeded`].
    WorkingTimeExceeded,
    /// See [`ViolationType::MissingRest`].
    MissingRest,
    /// See [`ViolationType::ShiftOverrun`].
    ShiftOverrun,
    /// See [`ViolationType::CapacityExceeded`].
    CapacityExceeded,
    /// See [`ViolationType::IncompatibleCaregiver`].
    IncompatibleCaregiver,
}

impl ViolationType {
    /// The field-less tag of this violation.
    pub fn tag(&self) -> ViolationKind {
        match self {
            Self::SkillMismatch { .. } => ViolationKind::SkillMismatch,
            Self::TimeWindowViolation { .. } => ViolationKind::TimeWindowViolation,
            Self::PrecedenceViolation { .. } => ViolationKind::PrecedenceViolation,
            Self::SynchronizationViolation { .. } => ViolationKind::SynchronizationViolation,
            Self::WorkingTimeExceeded { .. } => ViolationKind::WorkingTimeExceeded,
            Self::MissingRest { .. } => ViolationKind::MissingRest,
            Self::ShiftOverrun { .. } => ViolationKind::ShiftOverrun,
            Self::CapacityExceeded { .. } => ViolationKind::CapacityExceeded,
            Self::IncompatibleCaregiver { .. } => ViolationKind::IncompatibleCaregiver,
        }
    }

    /// The constraint family that reports this violation.
    pub fn family(&self) -> ConstraintFamily {
        match self {
            Self::SkillMismatch { .. } => ConstraintFamily::Skill,
            Self::TimeWindowViolation { .. } => ConstraintFamily::TimeWindow,
            Self::PrecedenceViolation { .. } => ConstraintFamily::Precedence,
            Self::SynchronizationViolation { .. } => ConstraintFamily::Synchronization,
            Self::WorkingTimeExceeded { .. }
            | Self::MissingRest { .. }
            | Self::ShiftOverrun { .. } => ConstraintFamily::WorkingTime,
            Self::CapacityExceeded { .. } => ConstraintFamily::Capacity,
            Self::IncompatibleCaregiver { .. } => ConstraintFamily::Incompatibility,
        }
    }

    /// The primary entity the violation is attached to.
    pub fn entity_id(&self) -> &str {
        match self {
            Self::SkillMismatch { service, .. }
            | Self::TimeWindowViolation { service, .. }
            | Self::IncompatibleCaregiver { service, .. } => service,
            Self::PrecedenceViolation { predecessor, .. } => predecessor,
            Self::SynchronizationViolation { group, .. } => group,
            Self::WorkingTimeExceeded { caregiver, .. }
            | Self::MissingRest { caregiver, .. }
            | Self::ShiftOverrun { caregiver, .. }
            | Self::CapacityExceeded { caregiver, .. } => caregiver,
        }
    }
}

/// A feasibility violation with its magnitude.
///
/// The magnitude is the non-negative amount by which the bound is exceeded:
/// minutes for temporal families, missing skills for skills, units for
/// capacity, and 1 for incompatibility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Violation {
    /// The type of violation.
    pub kind: ViolationType,
    /// How far the bound is exceeded.
    pub magnitude: Minutes,
}

impl Violation {
    /// Creates a new violation.
    pub fn new(kind: ViolationType, magnitude: Minutes) -> Self {
        Self { kind, magnitude }
    }

    /// The field-less tag of this violation.
    pub fn tag(&self) -> ViolationKind {
        self.kind.tag()
    }

    /// The constraint family that reports this violation.
    pub fn family(&self) -> ConstraintFamily {
        self.kind.family()
    }

    /// Signed distance from the allowed interval.
    ///
    /// Negative only for a precedence lag below its minimum; equal to the
    /// magnitude otherwise.
    pub fn signed_offset(&self) -> Minutes {
        match &self.kind {
            ViolationType::PrecedenceViolation { lag, min_lag, .. } if lag < min_lag => {
                lag - min_lag
            }
            _ => self.magnitude,
        }
    }

    fn cmp_key(&self, other: &Self) -> Ordering {
        self.family()
            .cmp(&other.family())
            .then_with(|| self.kind.entity_id().cmp(other.kind.entity_id()))
            .then_with(|| self.kind.cmp(&other.kind))
            .then_with(|| self.magnitude.cmp(&other.magnitude))
    }
}

/// Sorts violations by (family, entity id), then by their full content.
///
/// The order is total, so any interleaving of the same violations sorts to
/// the same sequence.
pub fn sort_violations(violations: &mut [Violation]) {
    violations.sort_by(|a, b| a.cmp_key(b));
}

/// The outcome of evaluating a solution: ordered violations, a count per
/// kind, and the feasibility verdict.
///
/// Immutable once built; every query borrows or copies.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::report::{Violation, ViolationKind, ViolationReport, ViolationType};
///
/// let report = ViolationReport::new(vec![Violation::new(
///     ViolationType::TimeWindowViolation {
///         service: "S1".into(),
///         caregiver: "C1".into(),
///         start: 121,
///         window_end: 120,
///     },
///     1,
/// )]);
/// assert!(!report.is_feasible());
/// assert_eq!(report.count(ViolationKind::TimeWindowViolation), 1);
/// assert_eq!(report.exit_code(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ReportRecord")]
pub struct ViolationReport {
    violations: Vec<Violation>,
    summary: BTreeMap<ViolationKind, usize>,
    feasible: bool,
}

/// Serialized form of a report. Only the violations are trusted on load;
/// order, summary and verdict are rebuilt from them.
#[derive(Deserialize)]
struct ReportRecord {
    violations: Vec<Violation>,
}

impl From<ReportRecord> for ViolationReport {
    fn from(record: ReportRecord) -> Self {
        Self::new(record.violations)
    }
}

impl ViolationReport {
    /// Builds a report, sorting the violations deterministically.
    pub fn new(mut violations: Vec<Violation>) -> Self {
        sort_violations(&mut violations);
        let mut summary = BTreeMap::new();
        for v in &violations {
            *summary.entry(v.tag()).or_insert(0) += 1;
        }
        let feasible = violations.is_empty();
        Self {
            violations,
            summary,
            feasible,
        }
    }

    /// Returns `true` if there are no violations.
    pub fn is_feasible(&self) -> bool {
        self.feasible
    }

    /// All violations, in deterministic order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns `true` if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Violation count per kind; kinds with no violations are absent.
    pub fn summary(&self) -> &BTreeMap<ViolationKind, usize> {
        &self.summary
    }

    /// Number of violations of the given kind.
    pub fn count(&self, kind: ViolationKind) -> usize {
        self.summary.get(&kind).copied().unwrap_or(0)
    }

    /// Violations of the given kind.
    pub fn by_kind(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.tag() == kind)
    }

    /// Violations reported by the given family.
    pub fn by_family(&self, family: ConstraintFamily) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.family() == family)
    }

    /// Violations whose magnitude is at least `threshold`.
    pub fn at_least(&self, threshold: Minutes) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(move |v| v.magnitude >= threshold)
    }

    /// Largest magnitude, if any violation exists.
    pub fn max_magnitude(&self) -> Option<Minutes> {
        self.violations.iter().map(|v| v.magnitude).max()
    }

    /// Sum of all magnitudes.
    pub fn total_magnitude(&self) -> Minutes {
        self.violations
            .iter()
            .map(|v| v.magnitude)
            .fold(0, Minutes::saturating_add)
    }

    /// Process exit code for a CLI wrapper: 0 if feasible, 1 otherwise.
    pub fn exit_code(&self) -> i32 {
        if self.feasible {
            0
        } else {
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tw(service: &str, magnitude: Minutes) -> Violation {
        Violation::new(
            ViolationType::TimeWindowViolation {
                service: service.into(),
                caregiver: "C1".into(),
                start: 100 + magnitude,
                window_end: 100,
            },
            magnitude,
        )
    }

    fn skill(service: &str) -> Violation {
        Violation::new(
            ViolationType::SkillMismatch {
                service: service.into(),
                caregiver: "C1".into(),
                missing_skills: vec!["B".into()],
            },
            1,
        )
    }

    #[test]
    fn test_empty_report_is_feasible() {
        let report = ViolationReport::new(vec![]);
        assert!(report.is_feasible());
        assert!(report.summary().is_empty());
        assert_eq!(report.max_magnitude(), None);
        assert_eq!(report.exit_code(), 0);
    }

    #[test]
    fn test_sorted_by_family_then_entity() {
        let report = ViolationReport::new(vec![tw("S2", 5), skill("S9"), tw("S1", 3), skill("S3")]);
        let entities: Vec<_> = report
            .violations()
            .iter()
            .map(|v| v.kind.entity_id().to_string())
            .collect();
        assert_eq!(entities, vec!["S3", "S9", "S1", "S2"]);
    }

    #[test]
    fn test_order_independent_of_input_order() {
        let a = ViolationReport::new(vec![tw("S2", 5), skill("S9"), tw("S1", 3)]);
        let b = ViolationReport::new(vec![tw("S1", 3), tw("S2", 5), skill("S9")]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_queries() {
        let report = ViolationReport::new(vec![tw("S2", 5), skill("S9"), tw("S1", 3)]);
        assert_eq!(report.len(), 3);
        assert_eq!(report.count(ViolationKind::TimeWindowViolation), 2);
        assert_eq!(report.count(ViolationKind::PrecedenceViolation), 0);
        assert_eq!(report.by_kind(ViolationKind::SkillMismatch).count(), 1);
        assert_eq!(report.by_family(ConstraintFamily::TimeWindow).count(), 2);
        assert_eq!(report.at_least(4).count(), 1);
        assert_eq!(report.max_magnitude(), Some(5));
        assert_eq!(report.total_magnitude(), 9);
    }

    #[test]
    fn test_signed_offset_below_min_lag() {
        let below = Violation::new(
            ViolationType::PrecedenceViolation {
                predecessor: "A".into(),
                successor: "B".into(),
                lag: 10,
                min_lag: 30,
                max_lag: 120,
            },
            20,
        );
        assert_eq!(below.signed_offset(), -20);
        assert_eq!(tw("S1", 3).signed_offset(), 3);
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = ViolationReport::new(vec![tw("S1", 3), skill("S2")]);
        let json = serde_json::to_string(&report).expect("serializes");
        let back: ViolationReport = serde_json::from_str(&json).expect("deserializes");
        assert_eq!(report, back);
    }

    #[test]
    fn test_loaded_report_rebuilds_verdict_and_order() {
        let json = serde_json::json!({
            "violations": [tw("S2", 5), tw("S1", 3)],
            "summary": {},
            "feasible": true,
        });
        let loaded: ViolationReport = serde_json::from_value(json).expect("deserializes");
        assert!(!loaded.is_feasible());
        assert_eq!(loaded.count(ViolationKind::TimeWindowViolation), 2);
        assert_eq!(loaded.violations()[0].kind.entity_id(), "S1");
        assert_eq!(loaded.exit_code(), 1);
    }
}
