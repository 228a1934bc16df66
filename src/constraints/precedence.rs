//! Precedence lags between pairs of services.

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{Violation, ViolationType};

/// Checks `successor.start - predecessor.end` against `[min_lag, max_lag]`.
pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    let mut violations = Vec::new();
    for constraint in ctx.instance().precedences() {
        let (Some(pred), Some(succ)) = (
            timings.visit(&constraint.predecessor),
            timings.visit(&constraint.successor),
        ) else {
            continue;
        };
        let lag = succ.start.saturating_sub(pred.end);
        let magnitude = if lag < constraint.min_lag {
            constraint.min_lag.saturating_sub(lag)
        } else if lag > constraint.max_lag {
            lag.saturating_sub(constraint.max_lag)
        } else {
            continue;
        };
        violations.push(Violation::new(
            ViolationType::PrecedenceViolation {
                predecessor: constraint.predecessor.clone(),
                successor: constraint.successor.clone(),
                lag,
                min_lag: constraint.min_lag,
                max_lag: constraint.max_lag,
            },
            magnitude,
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
        Caregiver, Instance, Location, PrecedenceConstraint, Route, Service, TimeWindow,
    };

    /// S1 ends at 100; S2 opens at `100 + gap` and is reached in time.
    fn instance(gap: i64) -> Instance {
        Instance::new("prec", DistanceMatrix::new(2))
            .with_location(Location::new("D"))
            .with_location(Location::new("P1"))
            .with_service(Service::new("S1", "P1", 40, TimeWindow::new(60, 60)))
            .with_service(Service::new("S2", "P1", 10, TimeWindow::new(100 + gap, 400)))
            .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)))
            .with_caregiver(Caregiver::new("C2", "D", TimeWindow::new(0, 480)))
            .with_precedence(PrecedenceConstraint::new("S1", "S2", 30, 120))
    }

    fn run(gap: i64) -> Vec<Violation> {
        let instance = instance(gap);
        let ctx = EvaluationContext::new(&instance);
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
    fn test_lag_below_minimum() {
        let violations = run(10);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].magnitude, 20);
        assert_eq!(violations[0].signed_offset(), -20);
    }

    #[test]
    fn test_lag_within_bounds() {
        assert!(run(60).is_empty());
        assert!(run(30).is_empty());
        assert!(run(120).is_empty());
    }

    #[test]
    fn test_lag_above_maximum() {
        let violations = run(150);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].magnitude, 30);
        assert_eq!(violations[0].signed_offset(), 30);
    }
}
