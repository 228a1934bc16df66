//! Per-caregiver service count and load.

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{CapacityMeasure, Violation, ViolationType};

pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    let mut violations = Vec::new();
    for timeline in timings.timelines() {
        let Some(caregiver) = ctx.caregiver(&timeline.caregiver) else {
            continue;
        };

        if let Some(limit) = caregiver.max_services() {
            let count = timeline.visits.len();
            if count > limit {
                violations.push(exceeded(
                    &timeline.caregiver,
                    CapacityMeasure::ServiceCount,
                    i64::try_from(count).unwrap_or(i64::MAX),
                    i64::try_from(limit).unwrap_or(i64::MAX),
                ));
            }
        }

        if let Some(limit) = caregiver.max_load() {
            let load: i64 = timeline
                .visits
                .iter()
                .filter_map(|v| ctx.service(&v.service))
                .map(|s| s.load())
                .fold(0, i64::saturating_add);
            if load > limit {
                violations.push(exceeded(&timeline.caregiver, CapacityMeasure::Load, load, limit));
            }
        }
    }
    violations
}

fn exceeded(caregiver: &str, measure: CapacityMeasure, value: i64, limit: i64) -> Violation {
    Violation::new(
        ViolationType::CapacityExceeded {
            caregiver: caregiver.to_string(),
            measure,
            value,
            limit,
        },
        value.saturating_sub(limit),
    )
}
