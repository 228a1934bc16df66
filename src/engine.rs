//! Public entry points: instance validation and solution evaluation.
//!
//! A run is a fixed pipeline:
//!
//! 1. validate the instance (any error aborts)
//! 2. cross-check the solution against it (any error aborts)
//! 3. simulate every route, then join
//! 4. evaluate every constraint family over the joined timings
//! 5. aggregate into a [`ViolationReport`]
//!
//! Steps 3 and 4 run on a fixed-size `rayon` pool when more than one thread
//! is configured. Results are gathered in route and family order and sorted
//! before aggregation, so the report does not depend on scheduling.

use log::{debug, warn};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use serde::{Deserialize, Serialize};

use crate::constraints::ConstraintFamily;
use crate::evaluation::{EvaluationContext, Timeline, TimelineSimulator, Timings};
use crate::models::{Instance, Solution};
use crate::report::{Violation, ViolationReport};
use crate::validation::{self, check_solution, InstanceError, SolutionError};

/// Engine settings.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::engine::EngineConfig;
///
/// assert_eq!(EngineConfig::default().threads(), 1);
/// assert_eq!(EngineConfig::default().with_threads(4).threads(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    threads: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self { threads: 1 }
    }
}

impl EngineConfig {
    /// Sets the worker count. `1` evaluates on the calling thread; `0` lets
    /// rayon pick one worker per logical CPU.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Configured worker count.
    pub fn threads(&self) -> usize {
        self.threads
    }
}

/// A reusable validator owning its worker pool.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::engine::{EngineConfig, Validator};
/// use hhcrsp_validator::models::{Caregiver, Instance, Location, Route, Service, Solution, TimeWindow};
///
/// let instance = Instance::new("demo", DistanceMatrix::from_rows(vec![vec![0, 15], vec![15, 0]]))
///     .with_location(Location::new("D"))
///     .with_location(Location::new("P1"))
///     .with_service(Service::new("S1", "P1", 30, TimeWindow::new(0, 60)))
///     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
/// let solution = Solution::new().with_route(Route::new("C1").with_service("S1"));
///
/// let validator = Validator::new(EngineConfig::default().with_threads(2));
/// let report = validator.validate_solution(&instance, &solution).unwrap();
/// assert!(report.is_feasible());
/// ```
#[derive(Debug)]
pub struct Validator {
    config: EngineConfig,
    pool: Option<ThreadPool>,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Validator {
    /// Creates a validator. Falls back to sequential evaluation if the pool
    /// cannot be built.
    pub fn new(config: EngineConfig) -> Self {
        let pool = if config.threads == 1 {
            None
        } else {
            match ThreadPoolBuilder::new().num_threads(config.threads).build() {
                Ok(pool) => Some(pool),
                Err(err) => {
                    warn!("cannot build a thread pool, evaluating sequentially: {err}");
                    None
                }
            }
        };
        Self { config, pool }
    }

    /// The configuration this validator was built with.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Checks instance well-formedness. An empty list means the instance is
    /// accepted.
    pub fn validate_instance(&self, instance: &Instance) -> Vec<InstanceError> {
        validation::validate_instance(instance)
    }

    /// Evaluates a solution against an instance.
    ///
    /// Returns `Err` with every structural error if the instance is invalid
    /// or the solution does not match it; otherwise a report listing every
    /// feasibility violation.
    pub fn validate_solution(
        &self,
        instance: &Instance,
        solution: &Solution,
    ) -> Result<ViolationReport, Vec<SolutionError>> {
        let instance_errors = validation::validate_instance(instance);
        if !instance_errors.is_empty() {
            debug!(
                "instance '{}' rejected with {} error(s)",
                instance.name(),
                instance_errors.len()
            );
            return Err(instance_errors.into_iter().map(SolutionError::from).collect());
        }

        let solution_errors = check_solution(instance, solution);
        if !solution_errors.is_empty() {
            return Err(solution_errors);
        }

        let ctx = EvaluationContext::new(instance);
        let report = match &self.pool {
            Some(pool) => pool.install(|| evaluate(&ctx, solution, true)),
            None => evaluate(&ctx, solution, false),
        }?;

        debug!(
            "instance '{}': {} route(s), {} violation(s)",
            instance.name(),
            solution.num_routes(),
            report.len()
        );
        Ok(report)
    }
}

fn evaluate(
    ctx: &EvaluationContext<'_>,
    solution: &Solution,
    parallel: bool,
) -> Result<ViolationReport, Vec<SolutionError>> {
    let simulator = TimelineSimulator::new(ctx);
    let results: Vec<Result<Timeline, SolutionError>> = if parallel {
        solution
            .routes()
            .par_iter()
            .map(|route| simulator.simulate(route))
            .collect()
    } else {
        solution
            .routes()
            .iter()
            .map(|route| simulator.simulate(route))
            .collect()
    };

    // Join barrier: every timeline exists before any cross-route check.
    let mut timelines = Vec::with_capacity(results.len());
    let mut errors = Vec::new();
    for result in results {
        match result {
            Ok(timeline) => timelines.push(timeline),
            Err(err) => errors.push(err),
        }
    }
    if !errors.is_empty() {
        return Err(errors);
    }
    let timings = Timings::new(timelines);

    let per_family: Vec<Vec<Violation>> = if parallel {
        ConstraintFamily::ALL[..]
            .par_iter()
            .map(|family| family.evaluate(ctx, &timings))
            .collect()
    } else {
        ConstraintFamily::ALL
            .iter()
            .map(|family| family.evaluate(ctx, &timings))
            .collect()
    };

    Ok(ViolationReport::new(per_family.concat()))
}

/// Checks instance well-formedness with the default configuration.
pub fn validate_instance(instance: &Instance) -> Vec<InstanceError> {
    validation::validate_instance(instance)
}

/// Evaluates a solution with the default (single-threaded) configuration.
pub fn validate_solution(
    instance: &Instance,
    solution: &Solution,
) -> Result<ViolationReport, Vec<SolutionError>> {
    Validator::default().validate_solution(instance, solution)
}

/// Maps an evaluation outcome to a process exit code: 0 feasible,
/// 1 infeasible, 2 structural errors.
pub fn exit_code(outcome: &Result<ViolationReport, Vec<SolutionError>>) -> i32 {
    match outcome {
        Ok(report) => report.exit_code(),
        Err(_) => 2,
    }
}
