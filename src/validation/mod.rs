//! Structural validation of instances and solutions.
//!
//! Both validators accumulate every problem they find instead of stopping at
//! the first one, so a caller can fix source data in a single pass.

mod error;
mod instance;
mod solution;

pub use error::{EntityCategory, InstanceError, MatrixAxis, Reference, SolutionError};
pub use instance::validate_instance;
pub use solution::check_solution;
