//! Domain model types for home healthcare routing and scheduling.
//!
//! Provides the instance side (locations, services with skills and time
//! windows, caregivers with shifts and working limits, precedence and
//! synchronization declarations) and the solution side (one ordered route
//! per caregiver). Timing is never stored here; it is derived per run by
//! [`crate::evaluation`].

mod caregiver;
mod instance;
mod route;
mod service;
mod solution;

pub use caregiver::{BreakRule, Caregiver};
pub use instance::{Instance, Location, PrecedenceConstraint, SynchronizationGroup};
pub use route::Route;
pub use service::{Service, TimeWindow};
pub use solution::Solution;

/// Time quantity in whole minutes from the instance epoch.
pub type Minutes = i64;

/// Largest magnitude accepted for any time or load quantity.
///
/// About 1.9 million years in minutes; with every input bounded by it, a
/// route needs millions of legs before its running time can overflow.
pub const MAX_QUANTITY: i64 = 1_000_000_000_000;
