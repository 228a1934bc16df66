//! Synchronized start times.

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{Violation, ViolationType};

/// Flags groups whose start-time spread exceeds `max_offset`. Ties on the
/// earliest or latest start resolve to the smallest service ID.
pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    let mut violations = Vec::new();
    for group in ctx.instance().sync_groups() {
        let starts: Vec<(i64, &str)> = group
            .services
            .iter()
            .filter_map(|id| timings.visit(id).map(|v| (v.start, id.as_str())))
            .collect();
        let (Some(&(first, earliest)), Some(&(last, latest))) = (
            starts.iter().min(),
            starts.iter().max_by(|a, b| a.0.cmp(&b.0).then_with(|| b.1.cmp(a.1))),
        ) else {
            continue;
        };
        let spread = last.saturating_sub(first);
        if spread <= group.max_offset {
            continue;
        }
        violations.push(Violation::new(
            ViolationType::SynchronizationViolation {
                group: group.id.clone(),
                earliest: earliest.to_string(),
                latest: latest.to_string(),
                spread,
                max_offset: group.max_offset,
            },
            spread.saturating_sub(group.max_offset),
        ));
    }
    violations
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::simulate_all;
    use crate::distance::DistanceMatrix;
    use crate::models::{
        Caregiver, Instance, Location, Route, Service, SynchronizationGroup, TimeWindow,
    };

    fn instance(second_start: i64, max_offset: i64) -> Instance {
        Instance::new("sync", DistanceMatrix::new(2))
            .with_location(Location::new("D"))
            .with_location(Location::new("P1"))
            .with_service(
                Service::new("S1", "P1", 30, TimeWindow::new(5, 100)).with_sync_group("G"),
            )
            .with_service(
                Service::new("S2", "P1", 30, TimeWindow::new(second_start, 100))
                    .with_sync_group("G"),
            )
            .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)))
            .with_caregiver(Caregiver::new("C2", "D", TimeWindow::new(0, 480)))
            .with_sync_group(SynchronizationGroup::new("G", ["S1", "S2"], max_offset))
    }

    fn run(instance: &Instance) -> Vec<Violation> {
        let ctx = EvaluationContext::new(instance);
        let timings = simulate_all(
            &ctx,
            &[
                Route::new("C1").with_service("S1"),
                Route::new("C2").with_service("S2"),
            ],
        );
        evaluate(&ctx, &timings)
    }

    #[test]
    fn test_spread_over_offset() {
        let violations = run(&instance(17, 10));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].magnitude, 2);
        assert_eq!(
            violations[0].kind,
            ViolationType::SynchronizationViolation {
                group: "G".into(),
                earliest: "S1".into(),
                latest: "S2".into(),
                spread: 12,
                max_offset: 10,
            }
        );
    }

    #[test]
    fn test_spread_equal_to_offset() {
        assert!(run(&instance(15, 10)).is_empty());
    }

    #[test]
    fn test_simultaneous_start() {
        assert!(run(&instance(5, 0)).is_empty());
    }
}
