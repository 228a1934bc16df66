//! Constraint families evaluated over a joined set of route timelines.
//!
//! - [`ConstraintFamily::Skill`] — required skills vs caregiver skills
//! - [`ConstraintFamily::TimeWindow`] — late service starts
//! - [`ConstraintFamily::Precedence`] — min/max lag between two services
//! - [`ConstraintFamily::Synchronization`] — start-time spread within a group
//! - [`ConstraintFamily::WorkingTime`] — shift length, breaks and shift end
//! - [`ConstraintFamily::Capacity`] — services and load per caregiver
//! - [`ConstraintFamily::Incompatibility`] — forbidden caregiver/service pairs
//!
//! Every family reads the same immutable [`Timings`] snapshot and none of them
//! depends on another's output, so they can run in any order or concurrently.

mod capacity;
mod incompatibility;
mod precedence;
mod skills;
mod synchronization;
mod time_window;
mod working_time;

use serde::{Deserialize, Serialize};

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{sort_violations, Violation};

/// A closed set of constraint families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ConstraintFamily {
    /// Caregiver must hold every skill the service requires.
    Skill,
    /// Service must start no later than its window end.
    TimeWindow,
    /// Lag between two services must lie within bounds.
    Precedence,
    /// Services of a group must start close together.
    Synchronization,
    /// Working duration, rest breaks and shift end.
    WorkingTime,
    /// Service count and load per caregiver.
    Capacity,
    /// Caregivers excluded from particular services.
    Incompatibility,
}

impl ConstraintFamily {
    /// Every family, in report order.
    pub const ALL: [ConstraintFamily; 7] = [
        ConstraintFamily::Skill,
        ConstraintFamily::TimeWindow,
        ConstraintFamily::Precedence,
        ConstraintFamily::Synchronization,
        ConstraintFamily::WorkingTime,
        ConstraintFamily::Capacity,
        ConstraintFamily::Incompatibility,
    ];

    /// Evaluates this family, returning its violations in sorted order.
    ///
    /// Entities absent from the timings (unassigned services) are skipped;
    /// the solution cross-check reports them before evaluation.
    pub fn evaluate(self, ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
        let mut violations = match self {
            ConstraintFamily::Skill => skills::evaluate(ctx, timings),
            ConstraintFamily::TimeWindow => time_window::evaluate(ctx, timings),
            ConstraintFamily::Precedence => precedence::evaluate(ctx, timings),
            ConstraintFamily::Synchronization => synchronization::evaluate(ctx, timings),
            ConstraintFamily::WorkingTime => working_time::evaluate(ctx, timings),
            ConstraintFamily::Capacity => capacity::evaluate(ctx, timings),
            ConstraintFamily::Incompatibility => incompatibility::evaluate(ctx, timings),
        };
        sort_violations(&mut violations);
        violations
    }
}

/// Runs every family sequentially and returns the sorted union.
pub fn check(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    let mut violations: Vec<Violation> = ConstraintFamily::ALL
        .iter()
        .flat_map(|family| family.evaluate(ctx, timings))
        .collect();
    sort_violations(&mut violations);
    violations
}

#[cfg(test)]
fn simulate_all(ctx: &EvaluationContext<'_>, routes: &[crate::models::Route]) -> Timings {
    let simulator = crate::evaluation::TimelineSimulator::new(ctx);
    Timings::new(
        routes
            .iter()
            .map(|r| simulator.simulate(r).expect("route simulates"))
            .collect(),
    )
}
