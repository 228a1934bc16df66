use std::collections::BTreeMap;

use hhcrsp_validator::distance::DistanceMatrix;
use hhcrsp_validator::models::{
    Caregiver, Instance, Location, PrecedenceConstraint, Route, Service, Solution,
    SynchronizationGroup, TimeWindow,
};
use hhcrsp_validator::{validate_instance, EngineConfig, Validator};
use proptest::prelude::*;

const SKILLS: [&str; 3] = ["K1", "K2", "K3"];

type RawService = (usize, i64, i64, i64, usize);
type RawCaregiver = (usize, i64, u8);
type RawPrecedence = (usize, usize, i64, i64);

fn build_instance(
    num_locations: usize,
    travel: Vec<i64>,
    services: Vec<RawService>,
    caregivers: Vec<RawCaregiver>,
    precedences: Vec<RawPrecedence>,
) -> Instance {
    let rows = (0..num_locations)
        .map(|i| {
            (0..num_locations)
                .map(|j| if i == j { 0 } else { travel[i * num_locations + j] })
                .collect()
        })
        .collect();
    let mut instance = Instance::new("generated", DistanceMatrix::from_rows(rows));
    for l in 0..num_locations {
        instance = instance.with_location(Location::new(format!("L{l}")));
    }

    // Services 3k and 3k+1 share a synchronization group when both exist.
    let num_services = services.len();
    let group_of = |k: usize| {
        let base = k - k % 3;
        (k % 3 < 2 && base + 1 < num_services).then(|| format!("G{base}"))
    };
    for (k, (loc, duration, start, width, skill)) in services.into_iter().enumerate() {
        let mut service = Service::new(
            format!("S{k}"),
            format!("L{loc}"),
            duration,
            TimeWindow::new(start, start + width),
        );
        if let Some(name) = SKILLS.get(skill) {
            service = service.with_skill(*name);
        }
        if let Some(group) = group_of(k) {
            service = service.with_sync_group(group);
        }
        instance = instance.with_service(service);
    }
    for base in (0..num_services).step_by(3) {
        if base + 1 < num_services {
            instance = instance.with_sync_group(SynchronizationGroup::new(
                format!("G{base}"),
                [format!("S{base}"), format!("S{}", base + 1)],
                15,
            ));
        }
    }

    for (c, (depot, shift_end, mask)) in caregivers.into_iter().enumerate() {
        let mut caregiver = Caregiver::new(
            format!("C{c}"),
            format!("L{depot}"),
            TimeWindow::new(0, shift_end),
        )
        .with_max_working_duration(420);
        for (bit, skill) in SKILLS.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                caregiver = caregiver.with_skill(*skill);
            }
        }
        instance = instance.with_caregiver(caregiver);
    }

    // Edges only run from lower to higher index, so the graph is acyclic.
    for (a, b, min_lag, extra) in precedences {
        if a < b && b < num_services {
            instance = instance.with_precedence(PrecedenceConstraint::new(
                format!("S{a}"),
                format!("S{b}"),
                min_lag,
                min_lag + extra,
            ));
        }
    }
    instance
}

prop_compose! {
    fn instance_strategy()
        (num_locations in 1usize..6, num_caregivers in 1usize..4)
        (
            travel in prop::collection::vec(0i64..60, num_locations * num_locations),
            services in prop::collection::vec(
                (0..num_locations, 0i64..90, 0i64..300, 0i64..200, 0usize..4),
                0..8,
            ),
            caregivers in prop::collection::vec(
                (0..num_locations, 300i64..900, 0u8..8),
                num_caregivers,
            ),
            precedences in prop::collection::vec((0usize..8, 0usize..8, 0i64..60, 0i64..120), 0..4),
            num_locations in Just(num_locations),
        ) -> Instance {
            build_instance(num_locations, travel, services, caregivers, precedences)
        }
}

fn instance_and_solution() -> impl Strategy<Value = (Instance, Solution)> {
    instance_strategy().prop_flat_map(|instance| {
        let num_services = instance.services().len();
        let num_caregivers = instance.caregivers().len();
        let assignment =
            prop::collection::vec((0..num_caregivers, any::<u16>()), num_services);
        (Just(instance), assignment).prop_map(|(instance, assignment)| {
            let mut per_caregiver: BTreeMap<usize, Vec<(u16, usize)>> = BTreeMap::new();
            for (service, (caregiver, key)) in assignment.into_iter().enumerate() {
                per_caregiver.entry(caregiver).or_default().push((key, service));
            }
            let mut solution = Solution::new();
            for (caregiver, mut visits) in per_caregiver {
                visits.sort();
                let mut route = Route::new(format!("C{caregiver}"));
                for (_, service) in visits {
                    route.push_service(format!("S{service}"));
                }
                solution.add_route(route);
            }
            (instance, solution)
        })
    })
}

proptest! {
    #[test]
    fn test_generated_instances_are_well_formed(instance in instance_strategy()) {
        prop_assert!(validate_instance(&instance).is_empty());
    }

    #[test]
    fn test_report_independent_of_thread_count((instance, solution) in instance_and_solution()) {
        let sequential = Validator::default().validate_solution(&instance, &solution);
        let parallel = Validator::new(EngineConfig::default().with_threads(4))
            .validate_solution(&instance, &solution);
        prop_assert!(sequential.is_ok());
        prop_assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_report_invariants((instance, solution) in instance_and_solution()) {
        let validator = Validator::default();
        let report = match validator.validate_solution(&instance, &solution) {
            Ok(report) => report,
            Err(errors) => return Err(TestCaseError::fail(format!("{errors:?}"))),
        };
        prop_assert_eq!(report.is_feasible(), report.is_empty());
        prop_assert_eq!(report.summary().values().sum::<usize>(), report.len());
        prop_assert!(report.violations().iter().all(|v| v.magnitude > 0));

        let again = validator.validate_solution(&instance, &solution);
        prop_assert_eq!(Ok(report), again);
    }
}
