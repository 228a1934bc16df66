//! Time window lateness.

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{Violation, ViolationType};

/// Flags every service starting after its window end. Starting exactly at
/// the end is allowed.
pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    timings
        .visits()
        .filter_map(|(timeline, visit)| {
            let window = ctx.service(&visit.service)?.time_window();
            let late = window.lateness(visit.start);
            (late > 0).then(|| {
                Violation::new(
                    ViolationType::TimeWindowViolation {
                        service: visit.service.clone(),
                        caregiver: timeline.caregiver.clone(),
                        start: visit.start,
                        window_end: window.end(),
                    },
                    late,
                )
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::simulate_all;
    use crate::distance::DistanceMatrix;
    use crate::models::{Caregiver, Instance, Location, Route, Service, TimeWindow};

    fn instance(window_end: i64) -> Instance {
        Instance::new("tw", DistanceMatrix::from_rows(vec![vec![0, 20], vec![20, 0]]))
            .with_location(Location::new("D"))
            .with_location(Location::new("P1"))
            .with_service(Service::new("S1", "P1", 10, TimeWindow::new(0, window_end)))
            .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(100, 480)))
    }

    #[test]
    fn test_start_at_window_end_is_fine() {
        // Arrival at 120.
        let instance = instance(120);
        let ctx = EvaluationContext::new(&instance);
        let timings = simulate_all(&ctx, &[Route::new("C1").with_service("S1")]);
        assert!(evaluate(&ctx, &timings).is_empty());
    }

    #[test]
    fn test_one_minute_late() {
        let instance = instance(119);
        let ctx = EvaluationContext::new(&instance);
        let timings = simulate_all(&ctx, &[Route::new("C1").with_service("S1")]);
        let violations = evaluate(&ctx, &timings);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].magnitude, 1);
        assert_eq!(
            violations[0].kind,
            ViolationType::TimeWindowViolation {
                service: "S1".into(),
                caregiver: "C1".into(),
                start: 120,
                window_end: 119,
            }
        );
    }
}
