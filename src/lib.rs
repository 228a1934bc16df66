//! # hhcrsp-validator
//!
//! Validation engine for the Home Healthcare Routing and Scheduling Problem
//! (HHCRSP): checks that an instance is well-formed and that a solution is
//! feasible, reporting every violation with its magnitude.
//!
//! ## Modules
//!
//! - [`models`] — Domain types (Location, Service, Caregiver, Instance, Route, Solution)
//! - [`distance`] — Asymmetric travel-time matrix with missing entries
//! - [`validation`] — Instance well-formedness and solution cross-checks
//! - [`evaluation`] — Route timeline simulation
//! - [`constraints`] — Constraint families evaluated over simulated timelines
//! - [`report`] — Violations and the aggregated report
//! - [`engine`] — Entry points, configuration and parallel evaluation
//! - [`features`] — Descriptive instance statistics
//! - [`io`] — JSON input and output
//!
//! ## Example
//!
//! ```
//! use hhcrsp_validator::distance::DistanceMatrix;
//! use hhcrsp_validator::models::{Caregiver, Instance, Location, Route, Service, Solution, TimeWindow};
//! use hhcrsp_validator::{validate_instance, validate_solution};
//!
//! let instance = Instance::new("demo", DistanceMatrix::from_rows(vec![vec![0, 20], vec![20, 0]]))
//!     .with_location(Location::new("D"))
//!     .with_location(Location::new("P1"))
//!     .with_service(Service::new("S1", "P1", 30, TimeWindow::new(0, 10)))
//!     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
//! assert!(validate_instance(&instance).is_empty());
//!
//! let solution = Solution::new().with_route(Route::new("C1").with_service("S1"));
//! let report = validate_solution(&instance, &solution).unwrap();
//! assert!(!report.is_feasible());
//! assert_eq!(report.max_magnitude(), Some(10));
//! ```

pub mod constraints;
pub mod distance;
pub mod engine;
pub mod evaluation;
pub mod features;
pub mod io;
pub mod models;
pub mod report;
pub mod validation;

pub use engine::{exit_code, validate_instance, validate_solution, EngineConfig, Validator};
pub use report::{Violation, ViolationKind, ViolationReport, ViolationType};
pub use validation::{InstanceError, SolutionError};
