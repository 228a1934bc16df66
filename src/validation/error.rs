//! Structural error types.
//!
//! Structural errors are fatal: they stop validation before a violation
//! report is produced. They are always collected, never returned one at a time.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::models::Minutes;

/// Kind of entity an ID belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum EntityCategory {
    /// A location.
    Location,
    /// A service.
    Service,
    /// A caregiver.
    Caregiver,
    /// A synchronization group.
    SyncGroup,
}

impl fmt::Display for EntityCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Location => "location",
            Self::Service => "service",
            Self::Caregiver => "caregiver",
            Self::SyncGroup => "sync group",
        })
    }
}

/// Field through which an entity references another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    /// `Service::location`.
    ServiceLocation,
    /// `Service::sync_group`.
    ServiceSyncGroup,
    /// `Service::incompatible_caregivers`.
    IncompatibleCaregiver,
    /// `Caregiver::depot`.
    CaregiverDepot,
    /// `SynchronizationGroup::services`.
    GroupMember,
    /// `PrecedenceConstraint::predecessor`.
    Predecessor,
    /// `PrecedenceConstraint::successor`.
    Successor,
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ServiceLocation => "location",
            Self::ServiceSyncGroup => "sync group",
            Self::IncompatibleCaregiver => "incompatible caregiver",
            Self::CaregiverDepot => "depot",
            Self::GroupMember => "member service",
            Self::Predecessor => "predecessor service",
            Self::Successor => "successor service",
        })
    }
}

/// Which dimension of the distance matrix has the wrong length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatrixAxis {
    /// The number of rows.
    Rows,
    /// The number of columns in the given row.
    Columns {
        /// Row index.
        row: usize,
    },
}

impl fmt::Display for MatrixAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rows => f.write_str("row count"),
            Self::Columns { row } => write!(f, "row {row}"),
        }
    }
}

/// A structural problem in an instance.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum InstanceError {
    /// Two entities of the same category share an ID.
    #[error("duplicate {category} id '{id}'")]
    DuplicateId {
        /// Category of the duplicated ID.
        category: EntityCategory,
        /// The duplicated ID.
        id: String,
    },

    /// A reference does not resolve to an existing entity.
    #[error("{owner} references unknown {reference} '{target}'")]
    DanglingReference {
        /// Description of the referencing entity, e.g. `service 'S1'`.
        owner: String,
        /// Field holding the reference.
        reference: Reference,
        /// The unresolved ID.
        target: String,
    },

    /// The distance matrix is not square over the declared locations.
    #[error("distance matrix {axis} has {found} entries, expected {expected}")]
    MatrixShapeMismatch {
        /// Offending dimension.
        axis: MatrixAxis,
        /// Number of locations.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// A distance matrix cell is absent.
    #[error("missing travel time from '{from}' to '{to}'")]
    MissingDistance {
        /// Origin location ID.
        from: String,
        /// Destination location ID.
        to: String,
    },

    /// A distance matrix cell is negative.
    #[error("negative travel time {value} from '{from}' to '{to}'")]
    NegativeDistance {
        /// Origin location ID.
        from: String,
        /// Destination location ID.
        to: String,
        /// The negative value.
        value: Minutes,
    },

    /// A duration-like quantity is negative.
    #[error("{owner} has negative {field} {value}")]
    NegativeDuration {
        /// Description of the owning entity.
        owner: String,
        /// Field name.
        field: &'static str,
        /// The negative value.
        value: Minutes,
    },

    /// A non-time quantity (load or load limit) is negative.
    #[error("{owner} has negative {field} {value}")]
    NegativeQuantity {
        /// Description of the owning entity.
        owner: String,
        /// Field name.
        field: &'static str,
        /// The negative value.
        value: i64,
    },

    /// A quantity lies outside `[-limit, limit]`, so route sums could overflow.
    #[error("{owner} has {field} {value} beyond the supported magnitude {limit}")]
    QuantityOutOfRange {
        /// Description of the owning entity.
        owner: String,
        /// Field name.
        field: &'static str,
        /// The offending value.
        value: i64,
        /// Largest supported magnitude.
        limit: i64,
    },

    /// A precedence constraint has `min_lag > max_lag`.
    #[error("precedence '{predecessor}' -> '{successor}' has min lag {min_lag} above max lag {max_lag}")]
    MalformedLag {
        /// Predecessor service ID.
        predecessor: String,
        /// Successor service ID.
        successor: String,
        /// Minimum lag.
        min_lag: Minutes,
        /// Maximum lag.
        max_lag: Minutes,
    },

    /// A time window has `start > end`.
    #[error("{owner} has malformed time window [{start}, {end}]")]
    MalformedTimeWindow {
        /// Description of the owning entity.
        owner: String,
        /// Window start.
        start: Minutes,
        /// Window end.
        end: Minutes,
    },

    /// The precedence relation contains a cycle.
    #[error("precedence cycle among services {}", .services.join(", "))]
    CyclicPrecedence {
        /// Services left unordered by topological sorting, sorted by ID.
        services: Vec<String>,
    },
}

/// A referential problem in a solution, or an instance that failed validation.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
pub enum SolutionError {
    /// The instance itself is malformed.
    #[error("invalid instance: {0}")]
    InvalidInstance(InstanceError),

    /// A route belongs to a caregiver not in the instance.
    #[error("route for unknown caregiver '{caregiver}'")]
    UnknownCaregiver {
        /// Caregiver ID on the route.
        caregiver: String,
    },

    /// A route visits a service not in the instance.
    #[error("route of caregiver '{caregiver}' references unknown service '{service}'")]
    UnknownServiceReference {
        /// Caregiver ID on the route.
        caregiver: String,
        /// Unknown service ID.
        service: String,
    },

    /// A service is visited more than once.
    #[error("service '{service}' assigned to '{first}' and again to '{second}'")]
    DuplicateAssignment {
        /// Service ID.
        service: String,
        /// Caregiver of the first assignment.
        first: String,
        /// Caregiver of the repeated assignment.
        second: String,
    },

    /// A caregiver has more than one route.
    #[error("caregiver '{caregiver}' has more than one route")]
    DuplicateRoute {
        /// Caregiver ID.
        caregiver: String,
    },

    /// A declared service is not visited by any route.
    #[error("service '{service}' is not assigned to any caregiver")]
    MissingAssignment {
        /// Service ID.
        service: String,
    },

    /// Replaying a route exceeds the representable time range.
    #[error("timeline of caregiver '{caregiver}' overflows the time range")]
    TimeOverflow {
        /// Caregiver ID.
        caregiver: String,
    },

    /// A travel time needed to replay a route is absent.
    #[error("missing travel time from '{from}' to '{to}'")]
    MissingDistance {
        /// Origin location ID.
        from: String,
        /// Destination location ID.
        to: String,
    },
}

impl From<InstanceError> for SolutionError {
    fn from(error: InstanceError) -> Self {
        Self::InvalidInstance(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_ids() {
        let e = InstanceError::DanglingReference {
            owner: "service 'S1'".into(),
            reference: Reference::ServiceLocation,
            target: "P9".into(),
        };
        assert_eq!(e.to_string(), "service 'S1' references unknown location 'P9'");

        let e = InstanceError::CyclicPrecedence {
            services: vec!["A".into(), "B".into()],
        };
        assert_eq!(e.to_string(), "precedence cycle among services A, B");

        let e = InstanceError::MatrixShapeMismatch {
            axis: MatrixAxis::Columns { row: 2 },
            expected: 3,
            found: 2,
        };
        assert_eq!(e.to_string(), "distance matrix row 2 has 2 entries, expected 3");
    }

    #[test]
    fn test_solution_error_from_instance_error() {
        let e: SolutionError = InstanceError::DuplicateId {
            category: EntityCategory::Service,
            id: "S1".into(),
        }
        .into();
        assert_eq!(e.to_string(), "invalid instance: duplicate service id 'S1'");
    }
}
