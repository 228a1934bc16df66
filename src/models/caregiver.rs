//! Caregiver type with skills, shift, and working-time limits.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::{Minutes, TimeWindow};

/// Mandatory rest rule: after `max_continuous_work` minutes of uninterrupted
/// work a pause of at least `min_rest` minutes must be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRule {
    /// Longest allowed stretch of work without rest.
    pub max_continuous_work: Minutes,
    /// Shortest idle gap that counts as a rest.
    pub min_rest: Minutes,
}

impl BreakRule {
    /// Creates a break rule.
    pub fn new(max_continuous_work: Minutes, min_rest: Minutes) -> Self {
        Self {
            max_continuous_work,
            min_rest,
        }
    }
}

/// A caregiver performing one route per shift.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::models::{Caregiver, TimeWindow};
///
/// let c = Caregiver::new("C1", "D1", TimeWindow::new(480, 960))
///     .with_skill("nursing")
///     .with_max_working_duration(420);
/// assert_eq!(c.id(), "C1");
/// assert_eq!(c.depot(), "D1");
/// assert_eq!(c.max_working_duration(), Some(420));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Caregiver {
    id: String,
    #[serde(default)]
    skills: BTreeSet<String>,
    depot: String,
    shift: TimeWindow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_working_duration: Option<Minutes>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    break_rule: Option<BreakRule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_services: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_load: Option<i64>,
}

impl Caregiver {
    /// Creates a caregiver with no skills and no working limits.
    pub fn new(id: impl Into<String>, depot: impl Into<String>, shift: TimeWindow) -> Self {
        Self {
            id: id.into(),
            skills: BTreeSet::new(),
            depot: depot.into(),
            shift,
            max_working_duration: None,
            break_rule: None,
            max_services: None,
            max_load: None,
        }
    }

    /// Adds a skill.
    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.skills.insert(skill.into());
        self
    }

    /// Sets the maximum elapsed time from shift start to return at depot.
    pub fn with_max_working_duration(mut self, max: Minutes) -> Self {
        self.max_working_duration = Some(max);
        self
    }

    /// Sets a mandatory rest rule.
    pub fn with_break_rule(mut self, rule: BreakRule) -> Self {
        self.break_rule = Some(rule);
        self
    }

    /// Sets the maximum number of services per shift.
    pub fn with_max_services(mut self, max: usize) -> Self {
        self.max_services = Some(max);
        self
    }

    /// Sets the maximum total load per shift.
    pub fn with_max_load(mut self, max: i64) -> Self {
        self.max_load = Some(max);
        self
    }

    /// Caregiver ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Skills held by this caregiver.
    pub fn skills(&self) -> &BTreeSet<String> {
        &self.skills
    }

    /// Location ID where the route starts and ends.
    pub fn depot(&self) -> &str {
        &self.depot
    }

    /// Shift window.
    pub fn shift(&self) -> &TimeWindow {
        &self.shift
    }

    /// Maximum working duration, if any.
    pub fn max_working_duration(&self) -> Option<Minutes> {
        self.max_working_duration
    }

    /// Rest rule, if any.
    pub fn break_rule(&self) -> Option<&BreakRule> {
        self.break_rule.as_ref()
    }

    /// Maximum service count, if any.
    pub fn max_services(&self) -> Option<usize> {
        self.max_services
    }

    /// Maximum load, if any.
    pub fn max_load(&self) -> Option<i64> {
        self.max_load
    }

    /// Returns `true` if this caregiver holds every given skill.
    pub fn has_skills(&self, required: &BTreeSet<String>) -> bool {
        required.is_subset(&self.skills)
    }

    /// Skills in `required` this caregiver lacks, in sorted order.
    pub fn missing_skills(&self, required: &BTreeSet<String>) -> Vec<String> {
        required.difference(&self.skills).cloned().collect()
    }
}
