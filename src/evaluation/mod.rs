//! Route timeline simulation.
//!
//! Replays each route of a solution against a read-only [`EvaluationContext`]
//! and joins the per-route [`Timeline`]s into a [`Timings`] snapshot for the
//! constraint families.

mod context;
mod simulator;
mod timeline;

pub use context::EvaluationContext;
pub use simulator::TimelineSimulator;
pub use timeline::{Timeline, Timings, VisitTiming};
