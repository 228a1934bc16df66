//! Instance well-formedness checks.
//!
//! Detects, in order:
//! 1. Duplicate IDs (locations, services, caregivers, sync groups)
//! 2. Unresolved references
//! 3. Distance matrix shape, missing, negative and oversized entries
//! 4. Malformed time windows, negative durations or loads, quantities beyond
//!    [`MAX_QUANTITY`], and inverted lags
//! 5. Cycles in the precedence graph
//!
//! All checks accumulate; only the cycle search is skipped when a precedence
//! endpoint is unresolved, since the graph is meaningless then.
//!
//! # Reference
//! Kahn (1962), "Topological sorting of large networks", CACM 5(11)

use std::collections::{BTreeMap, BTreeSet, HashSet};

use log::debug;

use super::{EntityCategory, InstanceError, MatrixAxis, Reference};
use crate::models::{Instance, MAX_QUANTITY};

/// Validates the structure of an instance.
///
/// Returns every problem found; an empty list means the instance is accepted.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::models::{Caregiver, Instance, Location, TimeWindow};
/// use hhcrsp_validator::validation::validate_instance;
///
/// let instance = Instance::new("one", DistanceMatrix::new(1))
///     .with_location(Location::new("D"))
///     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
/// assert!(validate_instance(&instance).is_empty());
/// ```
pub fn validate_instance(instance: &Instance) -> Vec<InstanceError> {
    let mut errors = Vec::new();

    check_unique_ids(instance, &mut errors);
    let precedences_resolved = check_references(instance, &mut errors);
    check_distance_matrix(instance, &mut errors);
    check_time_windows(instance, &mut errors);
    check_quantities(instance, &mut errors);

    if precedences_resolved {
        if let Some(cycle) = detect_precedence_cycle(instance) {
            errors.push(cycle);
        }
    }

    debug!(
        "instance '{}' validated: {} structural error(s)",
        instance.name(),
        errors.len()
    );
    errors
}

fn collect_unique<'a>(
    ids: impl Iterator<Item = &'a str>,
    category: EntityCategory,
    errors: &mut Vec<InstanceError>,
) -> HashSet<&'a str> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(InstanceError::DuplicateId {
                category,
                id: id.to_string(),
            });
        }
    }
    seen
}

fn check_unique_ids(instance: &Instance, errors: &mut Vec<InstanceError>) {
    collect_unique(
        instance.locations().iter().map(|l| l.id.as_str()),
        EntityCategory::Location,
        errors,
    );
    collect_unique(
        instance.services().iter().map(|s| s.id()),
        EntityCategory::Service,
        errors,
    );
    collect_unique(
        instance.caregivers().iter().map(|c| c.id()),
        EntityCategory::Caregiver,
        errors,
    );
    collect_unique(
        instance.sync_groups().iter().map(|g| g.id.as_str()),
        EntityCategory::SyncGroup,
        errors,
    );
}

/// Returns `true` if every precedence endpoint resolves.
fn check_references(instance: &Instance, errors: &mut Vec<InstanceError>) -> bool {
    let locations: HashSet<&str> = instance.locations().iter().map(|l| l.id.as_str()).collect();
    let services: HashSet<&str> = instance.services().iter().map(|s| s.id()).collect();
    let caregivers: HashSet<&str> = instance.caregivers().iter().map(|c| c.id()).collect();

    let mut dangling = |owner: String, reference: Reference, target: &str| {
        errors.push(InstanceError::DanglingReference {
            owner,
            reference,
            target: target.to_string(),
        });
    };

    for service in instance.services() {
        if !locations.contains(service.location()) {
            dangling(
                format!("service '{}'", service.id()),
                Reference::ServiceLocation,
                service.location(),
            );
        }
        // A group back-reference resolves only if that group lists the service.
        if let Some(group_id) = service.sync_group() {
            let listed = instance
                .sync_groups()
                .iter()
                .any(|g| g.id == group_id && g.services.iter().any(|m| m == service.id()));
            if !listed {
                dangling(
                    format!("service '{}'", service.id()),
                    Reference::ServiceSyncGroup,
                    group_id,
                );
            }
        }
        for caregiver in service.incompatible_caregivers() {
            if !caregivers.contains(caregiver.as_str()) {
                dangling(
                    format!("service '{}'", service.id()),
                    Reference::IncompatibleCaregiver,
                    caregiver.as_str(),
                );
            }
        }
    }

    for caregiver in instance.caregivers() {
        if !locations.contains(caregiver.depot()) {
            dangling(
                format!("caregiver '{}'", caregiver.id()),
                Reference::CaregiverDepot,
                caregiver.depot(),
            );
        }
    }

    for group in instance.sync_groups() {
        for member in &group.services {
            if !services.contains(member.as_str()) {
                dangling(
                    format!("sync group '{}'", group.id),
                    Reference::GroupMember,
                    member.as_str(),
                );
            }
        }
    }

    let mut resolved = true;
    for p in instance.precedences() {
        let owner = format!("precedence '{}' -> '{}'", p.predecessor, p.successor);
        if !services.contains(p.predecessor.as_str()) {
            dangling(owner.clone(), Reference::Predecessor, p.predecessor.as_str());
            resolved = false;
        }
        if !services.contains(p.successor.as_str()) {
            dangling(owner, Reference::Successor, p.successor.as_str());
            resolved = false;
        }
    }
    resolved
}

fn check_distance_matrix(instance: &Instance, errors: &mut Vec<InstanceError>) {
    let locations = instance.locations();
    let n = locations.len();
    let rows = instance.distances().rows();

    if rows.len() != n {
        errors.push(InstanceError::MatrixShapeMismatch {
            axis: MatrixAxis::Rows,
            expected: n,
            found: rows.len(),
        });
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != n {
            errors.push(InstanceError::MatrixShapeMismatch {
                axis: MatrixAxis::Columns { row: i },
                expected: n,
                found: row.len(),
            });
        }
    }

    for (i, row) in rows.iter().enumerate().take(n) {
        for (j, cell) in row.iter().enumerate().take(n) {
            let from = &locations[i].id;
            let to = &locations[j].id;
            match cell {
                None => errors.push(InstanceError::MissingDistance {
                    from: from.clone(),
                    to: to.clone(),
                }),
                Some(value) if *value < 0 => errors.push(InstanceError::NegativeDistance {
                    from: from.clone(),
                    to: to.clone(),
                    value: *value,
                }),
                Some(value) if *value > MAX_QUANTITY => {
                    errors.push(InstanceError::QuantityOutOfRange {
                        owner: format!("travel '{from}' -> '{to}'"),
                        field: "travel time",
                        value: *value,
                        limit: MAX_QUANTITY,
                    })
                }
                Some(_) => {}
            }
        }
    }
}

fn check_time_windows(instance: &Instance, errors: &mut Vec<InstanceError>) {
    for service in instance.services() {
        let tw = service.time_window();
        if !tw.is_well_formed() {
            errors.push(InstanceError::MalformedTimeWindow {
                owner: format!("service '{}'", service.id()),
                start: tw.start(),
                end: tw.end(),
            });
        }
    }
    for caregiver in instance.caregivers() {
        let shift = caregiver.shift();
        if !shift.is_well_formed() {
            errors.push(InstanceError::MalformedTimeWindow {
                owner: format!("caregiver '{}' shift", caregiver.id()),
                start: shift.start(),
                end: shift.end(),
            });
        }
    }
}

/// Sign requirement of a checked quantity.
#[derive(Clone, Copy)]
enum Sign {
    /// Time instants such as window bounds and lags.
    Any,
    /// Durations and offsets.
    NonNegativeTime,
    /// Loads and load limits.
    NonNegative,
}

fn check_quantities(instance: &Instance, errors: &mut Vec<InstanceError>) {
    let mut checks: Vec<(String, &'static str, i64, Sign)> = Vec::new();

    for service in instance.services() {
        let owner = format!("service '{}'", service.id());
        let tw = service.time_window();
        checks.push((owner.clone(), "duration", service.duration(), Sign::NonNegativeTime));
        checks.push((owner.clone(), "window start", tw.start(), Sign::Any));
        checks.push((owner.clone(), "window end", tw.end(), Sign::Any));
        checks.push((owner, "load", service.load(), Sign::NonNegative));
    }
    for caregiver in instance.caregivers() {
        let owner = format!("caregiver '{}'", caregiver.id());
        let shift = caregiver.shift();
        checks.push((owner.clone(), "shift start", shift.start(), Sign::Any));
        checks.push((owner.clone(), "shift end", shift.end(), Sign::Any));
        if let Some(max) = caregiver.max_working_duration() {
            checks.push((owner.clone(), "max working duration", max, Sign::NonNegativeTime));
        }
        if let Some(rule) = caregiver.break_rule() {
            checks.push((
                owner.clone(),
                "max continuous work",
                rule.max_continuous_work,
                Sign::NonNegativeTime,
            ));
            checks.push((owner.clone(), "min rest", rule.min_rest, Sign::NonNegativeTime));
        }
        if let Some(max) = caregiver.max_load() {
            checks.push((owner, "max load", max, Sign::NonNegative));
        }
    }
    for group in instance.sync_groups() {
        checks.push((
            format!("sync group '{}'", group.id),
            "max offset",
            group.max_offset,
            Sign::NonNegativeTime,
        ));
    }
    for p in instance.precedences() {
        let owner = format!("precedence '{}' -> '{}'", p.predecessor, p.successor);
        checks.push((owner.clone(), "min lag", p.min_lag, Sign::Any));
        checks.push((owner, "max lag", p.max_lag, Sign::Any));
    }

    for (owner, field, value, sign) in checks {
        if value.unsigned_abs() > MAX_QUANTITY.unsigned_abs() {
            errors.push(InstanceError::QuantityOutOfRange {
                owner,
                field,
                value,
                limit: MAX_QUANTITY,
            });
            continue;
        }
        match sign {
            Sign::NonNegativeTime if value < 0 => errors.push(InstanceError::NegativeDuration {
                owner,
                field,
                value,
            }),
            Sign::NonNegative if value < 0 => errors.push(InstanceError::NegativeQuantity {
                owner,
                field,
                value,
            }),
            _ => {}
        }
    }

    for p in instance.precedences() {
        if p.min_lag > p.max_lag {
            errors.push(InstanceError::MalformedLag {
                predecessor: p.predecessor.clone(),
                successor: p.successor.clone(),
                min_lag: p.min_lag,
                max_lag: p.max_lag,
            });
        }
    }
}

/// Detects cycles in the precedence graph using Kahn's algorithm.
///
/// Nodes left with a positive in-degree after the forward pass lie on, or
/// downstream of, a cycle. A second pass peels off nodes without outgoing
/// edges inside that residue so that only cycle members are reported.
fn detect_precedence_cycle(instance: &Instance) -> Option<InstanceError> {
    let mut successors: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    let mut in_degree: BTreeMap<&str, usize> = BTreeMap::new();

    for p in instance.precedences() {
        let (from, to) = (p.predecessor.as_str(), p.successor.as_str());
        successors.entry(from).or_default().push(to);
        in_degree.entry(from).or_insert(0);
        *in_degree.entry(to).or_insert(0) += 1;
    }

    let mut ready: Vec<&str> = in_degree
        .iter()
        .filter(|(_, &d)| d == 0)
        .map(|(&n, _)| n)
        .collect();

    while let Some(node) = ready.pop() {
        in_degree.remove(node);
        for &next in successors.get(node).map(Vec::as_slice).unwrap_or(&[]) {
            if let Some(d) = in_degree.get_mut(next) {
                *d -= 1;
                if *d == 0 {
                    ready.push(next);
                }
            }
        }
    }

    if in_degree.is_empty() {
        return None;
    }

    let mut residue: BTreeSet<&str> = in_degree.into_keys().collect();
    loop {
        let sinks: Vec<&str> = residue
            .iter()
            .copied()
            .filter(|node| {
                !successors
                    .get(node)
                    .is_some_and(|next| next.iter().any(|n| residue.contains(n)))
            })
            .collect();
        if sinks.is_empty() {
            break;
        }
        for sink in sinks {
            residue.remove(sink);
        }
    }

    Some(InstanceError::CyclicPrecedence {
        services: residue.into_iter().map(str::to_string).collect(),
    })
}
