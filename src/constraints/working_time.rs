//! Working duration, rest breaks and shift end.

use crate::evaluation::{EvaluationContext, Timeline, Timings};
use crate::models::{BreakRule, Minutes};
use crate::report::{Violation, ViolationType};

pub(super) fn evaluate(ctx: &EvaluationContext<'_>, timings: &Timings) -> Vec<Violation> {
    let mut violations = Vec::new();
    for timeline in timings.timelines() {
        let Some(caregiver) = ctx.caregiver(&timeline.caregiver) else {
            continue;
        };
        let shift = caregiver.shift();

        if let Some(limit) = caregiver.max_working_duration() {
            let elapsed = timeline.return_arrival.saturating_sub(shift.start());
            if elapsed > limit {
                violations.push(Violation::new(
                    ViolationType::WorkingTimeExceeded {
                        caregiver: timeline.caregiver.clone(),
                        elapsed,
                        max_working_duration: limit,
                    },
                    elapsed.saturating_sub(limit),
                ));
            }
        }

        if let Some(rule) = caregiver.break_rule() {
            for (start, end) in work_segments(timeline, rule) {
                let length = end.saturating_sub(start);
                if length > rule.max_continuous_work {
                    violations.push(Violation::new(
                        ViolationType::MissingRest {
                            caregiver: timeline.caregiver.clone(),
                            segment_start: start,
                            segment_end: end,
                            max_continuous_work: rule.max_continuous_work,
                        },
                        length.saturating_sub(rule.max_continuous_work),
                    ));
                }
            }
        }

        if timeline.return_arrival > shift.end() {
            violations.push(Violation::new(
                ViolationType::ShiftOverrun {
                    caregiver: timeline.caregiver.clone(),
                    return_arrival: timeline.return_arrival,
                    shift_end: shift.end(),
                },
                timeline.return_arrival.saturating_sub(shift.end()),
            ));
        }
    }
    violations
}

/// Splits a timeline into stretches of continuous work.
///
/// Travel and service both count as work. Waiting of at least `min_rest`
/// before a visit is a rest: the stretch ends at the arrival and a new one
/// begins at the service start. The last stretch ends back at the depot.
fn work_segments(timeline: &Timeline, rule: &BreakRule) -> Vec<(Minutes, Minutes)> {
    let mut segments = Vec::new();
    let mut segment_start = timeline.departure;
    for visit in &timeline.visits {
        let waiting = visit.waiting();
        if waiting > 0 && waiting >= rule.min_rest {
            segments.push((segment_start, visit.arrival));
            segment_start = visit.start;
        }
    }
    segments.push((segment_start, timeline.return_arrival));
    segments
}
