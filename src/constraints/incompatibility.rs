//! Caregivers excluded from specific services.

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{Violation, ViolationType};

pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    timings
        .visits()
        .filter(|(timeline, visit)| {
            ctx.service(&visit.service)
                .is_some_and(|s| s.incompatible_caregivers().contains(&timeline.caregiver))
        })
        .map(|(timeline, visit)| {
            Violation::new(
                ViolationType::IncompatibleCaregiver {
                    service: visit.service.clone(),
                    caregiver: timeline.caregiver.clone(),
                },
                1,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraints::simulate_all;
    use crate::distance::DistanceMatrix;
    use crate::models::{Caregiver, Instance, Location, Route, Service, TimeWindow};

    #[test]
    fn test_incompatible_pair() {
        let instance = Instance::new("inc", DistanceMatrix::new(2))
            .with_location(Location::new("D"))
            .with_location(Location::new("P1"))
            .with_service(
                Service::new("S1", "P1", 10, TimeWindow::new(0, 600))
                    .with_incompatible_caregiver("C1"),
            )
            .with_service(Service::new("S2", "P1", 10, TimeWindow::new(0, 600)))
            .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 600)))
            .with_caregiver(Caregiver::new("C2", "D", TimeWindow::new(0, 600)));
        let ctx = EvaluationContext::new(&instance);

        let timings = simulate_all(
            &ctx,
            &[
                Route::new("C1").with_service("S1"),
                Route::new("C2").with_service("S2"),
            ],
        );
        let violations = evaluate(&ctx, &timings);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].magnitude, 1);

        let swapped = simulate_all(
            &ctx,
            &[
                Route::new("C1").with_service("S2"),
                Route::new("C2").with_service("S1"),
            ],
        );
        assert!(evaluate(&ctx, &swapped).is_empty());
    }
}
