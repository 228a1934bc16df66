//! JSON reading and writing of instances, solutions and reports.

use std::io::{Read, Write};

use thiserror::Error;

use crate::models::{Instance, Solution};
use crate::report::ViolationReport;

/// Failure to read or write a document.
#[derive(Debug, Error)]
pub enum IoError {
    /// Malformed JSON or a schema mismatch.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// Underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Reads an instance from a JSON stream.
pub fn read_instance<R: Read>(reader: R) -> Result<Instance, IoError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Reads a solution from a JSON stream.
pub fn read_solution<R: Read>(reader: R) -> Result<Solution, IoError> {
    Ok(serde_json::from_reader(reader)?)
}

/// Parses an instance from a JSON string.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::io::instance_from_str;
///
/// let instance = instance_from_str(r#"{
///     "name": "tiny",
///     "locations": [{"id": "D"}, {"id": "P1", "coordinates": [1.0, 2.0]}],
///     "services": [{"id": "S1", "location": "P1", "duration": 30,
///                   "time_window": {"start": 0, "end": 60}}],
///     "caregivers": [{"id": "C1", "depot": "D", "shift": {"start": 0, "end": 480}}],
///     "distances": [[0, 10], [10, null]]
/// }"#).unwrap();
/// assert_eq!(instance.services().len(), 1);
/// assert_eq!(instance.distances().get(1, 1), None);
/// ```
pub fn instance_from_str(json: &str) -> Result<Instance, IoError> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a solution from a JSON string.
pub fn solution_from_str(json: &str) -> Result<Solution, IoError> {
    Ok(serde_json::from_str(json)?)
}

/// BLAKE3 digest of an instance's JSON form, as lowercase hex.
///
/// Identical instances share a signature; any change to a field, including
/// entity order, yields a different one.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::io::instance_signature;
/// use hhcrsp_validator::models::{Instance, Location};
///
/// let a = Instance::new("x", DistanceMatrix::new(1)).with_location(Location::new("D"));
/// let b = Instance::new("x", DistanceMatrix::new(1)).with_location(Location::new("D"));
/// assert_eq!(instance_signature(&a).unwrap(), instance_signature(&b).unwrap());
/// assert_eq!(instance_signature(&a).unwrap().len(), 64);
/// ```
pub fn instance_signature(instance: &Instance) -> Result<String, IoError> {
    let mut hasher = blake3::Hasher::new();
    serde_json::to_writer(&mut hasher, instance)?;
    Ok(hasher.finalize().to_hex().to_string())
}

/// Writes a report as pretty-printed JSON.
pub fn write_report<W: Write>(writer: W, report: &ViolationReport) -> Result<(), IoError> {
    serde_json::to_writer_pretty(writer, report)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::validate_solution;

    const INSTANCE: &str = r#"{
        "name": "io",
        "locations": [{"id": "D"}, {"id": "P1"}],
        "services": [
            {"id": "S1", "location": "P1", "duration": 30,
             "required_skills": ["nurse"], "time_window": {"start": 0, "end": 5}}
        ],
        "caregivers": [
            {"id": "C1", "depot": "D", "skills": ["nurse"],
             "shift": {"start": 0, "end": 480}, "max_working_duration": 480}
        ],
        "distances": [[0, 10], [10, 0]]
    }"#;

    const SOLUTION: &str = r#"{"routes": [{"caregiver": "C1", "services": ["S1"]}]}"#;

    #[test]
    fn test_read_and_validate() {
        let instance = read_instance(INSTANCE.as_bytes()).expect("instance parses");
        let solution = read_solution(SOLUTION.as_bytes()).expect("solution parses");
        let report = validate_solution(&instance, &solution).expect("structurally valid");
        assert_eq!(report.len(), 1);
        assert_eq!(report.max_magnitude(), Some(5));
    }

    #[test]
    fn test_write_report() {
        let instance = instance_from_str(INSTANCE).expect("instance parses");
        let solution = solution_from_str(SOLUTION).expect("solution parses");
        let report = validate_solution(&instance, &solution).expect("structurally valid");

        let mut out = Vec::new();
        write_report(&mut out, &report).expect("writes");
        let back: ViolationReport = serde_json::from_slice(&out).expect("parses back");
        assert_eq!(back, report);
    }

    #[test]
    fn test_full_instance_round_trip() {
        use crate::distance::DistanceMatrix;
        use crate::models::{
            BreakRule, Caregiver, Instance, Location, PrecedenceConstraint, Service,
            SynchronizationGroup, TimeWindow,
        };

        let instance = Instance::new(
            "full",
            DistanceMatrix::from_partial_rows(vec![
                vec![Some(0), Some(12), Some(20)],
                vec![Some(11), Some(0), None],
                vec![Some(19), Some(7), Some(0)],
            ]),
        )
        .with_location(Location::new("D").with_coordinates(0.0, 0.0))
        .with_location(Location::new("P1").with_coordinates(1.5, -2.0))
        .with_location(Location::new("P2"))
        .with_service(
            Service::new("S1", "P1", 30, TimeWindow::new(60, 120))
                .with_skill("nurse")
                .with_sync_group("G")
                .with_load(2),
        )
        .with_service(
            Service::new("S2", "P2", 45, TimeWindow::new(60, 180))
                .with_sync_group("G")
                .with_incompatible_caregiver("C2"),
        )
        .with_caregiver(
            Caregiver::new("C1", "D", TimeWindow::new(0, 480))
                .with_skill("nurse")
                .with_max_working_duration(420)
                .with_break_rule(BreakRule::new(240, 30))
                .with_max_services(6)
                .with_max_load(10),
        )
        .with_caregiver(Caregiver::new("C2", "D", TimeWindow::new(120, 600)))
        .with_precedence(PrecedenceConstraint::new("S1", "S2", 0, 90))
        .with_sync_group(SynchronizationGroup::new("G", ["S1", "S2"], 10));

        let json = serde_json::to_string(&instance).expect("serializes");
        let back = instance_from_str(&json).expect("parses back");
        assert_eq!(back, instance);
    }

    #[test]
    fn test_signature_tracks_content() {
        let instance = instance_from_str(INSTANCE).expect("instance parses");
        let same = instance_from_str(INSTANCE).expect("instance parses");
        let changed = instance_from_str(&INSTANCE.replace("\"duration\": 30", "\"duration\": 31"))
            .expect("instance parses");

        let signature = instance_signature(&instance).expect("hashes");
        assert_eq!(signature, instance_signature(&same).expect("hashes"));
        assert_ne!(signature, instance_signature(&changed).expect("hashes"));
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(instance_from_str("{"), Err(IoError::Json(_))));
        assert!(matches!(
            solution_from_str(r#"{"routes": [{"services": []}]}"#),
            Err(IoError::Json(_))
        ));
    }
}
