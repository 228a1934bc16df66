//! Skill compatibility.

use crate::evaluation::{EvaluationContext, Timings};
use crate::report::{Violation, ViolationType};

/// One violation per visit whose caregiver lacks a required skill; the
/// magnitude is the number of missing skills.
pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    let mut violations = Vec::new();
    for (timeline, visit) in timings.visits() {
        let (Some(service), Some(caregiver)) =
            (ctx.service(&visit.service), ctx.caregiver(&timeline.caregiver))
        else {
            continue;
        };
        let missing = caregiver.missing_skills(service.required_skills());
        if missing.is_empty() {
            continue;
        }
        let magnitude = missing.len() as i64;
        violations.push(Violation::new(
            ViolationType::SkillMismatch {
                service: service.id().to_string(),
                caregiver: caregiver.id().to_string(),
                missing_skills: missing,
            },
            magnitude,
        ));
    }
    violations
}
