//! Travel-time matrices.
//!
//! Provides the travel-time matrix indexed by location position.

mod matrix;

pub use matrix::DistanceMatrix;
