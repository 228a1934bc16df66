//! Timeline simulator that replays a route in visit order.

use super::{EvaluationContext, Timeline, VisitTiming};
use crate::models::{Minutes, Route};
use crate::validation::SolutionError;

/// Replays routes chronologically, computing arrival, start and end times.
///
/// Per visit: travel from the current location, wait if the window has not
/// opened, then serve. Service start is never clamped to the window end; a
/// late start is recorded as it would physically happen and left for the
/// time-window check to flag. The simulator raises no violations.
///
/// # Examples
///
/// ```
/// use hhcrsp_validator::distance::DistanceMatrix;
/// use hhcrsp_validator::evaluation::{EvaluationContext, TimelineSimulator};
/// use hhcrsp_validator::models::{Caregiver, Instance, Location, Route, Service, TimeWindow};
///
/// let instance = Instance::new("x", DistanceMatrix::from_rows(vec![vec![0, 10], vec![10, 0]]))
///     .with_location(Location::new("D"))
///     .with_location(Location::new("P1"))
///     .with_service(Service::new("S1", "P1", 30, TimeWindow::new(20, 60)))
///     .with_caregiver(Caregiver::new("C1", "D", TimeWindow::new(0, 480)));
/// let ctx = EvaluationContext::new(&instance);
///
/// let timeline = TimelineSimulator::new(&ctx)
///     .simulate(&Route::new("C1").with_service("S1"))
///     .unwrap();
/// assert_eq!(timeline.visits[0].arrival, 10);
/// assert_eq!(timeline.visits[0].start, 20);
/// assert_eq!(timeline.visits[0].end, 50);
/// assert_eq!(timeline.return_arrival, 60);
/// ```
pub struct TimelineSimulator<'a> {
    context: &'a EvaluationContext<'a>,
}

impl<'a> TimelineSimulator<'a> {
    /// Creates a simulator over the given context.
    pub fn new(context: &'a EvaluationContext<'a>) -> Self {
        Self { context }
    }

    /// Replays one route.
    ///
    /// Fails if the route references a caregiver, service or travel time
    /// absent from the instance, which the solution cross-check excludes
    /// beforehand, or if a time leaves the `i64` range.
    pub fn simulate(&self, route: &Route) -> Result<Timeline, SolutionError> {
        let caregiver = self.context.caregiver(route.caregiver()).ok_or_else(|| {
            SolutionError::UnknownCaregiver {
                caregiver: route.caregiver().to_string(),
            }
        })?;

        let overflow = || SolutionError::TimeOverflow {
            caregiver: caregiver.id().to_string(),
        };
        let add = |a: Minutes, b: Minutes| a.checked_add(b).ok_or_else(overflow);
        let sub = |a: Minutes, b: Minutes| a.checked_sub(b).ok_or_else(overflow);

        let depot = caregiver.depot();
        let departure = caregiver.shift().start();
        let mut current_time = departure;
        let mut current_location = depot;
        let mut travel_time = 0;
        let mut waiting_time = 0;
        let mut visits = Vec::with_capacity(route.len());

        for service_id in route.services() {
            let service = self.context.service(service_id).ok_or_else(|| {
                SolutionError::UnknownServiceReference {
                    caregiver: caregiver.id().to_string(),
                    service: service_id.clone(),
                }
            })?;

            let travel = self.travel(current_location, service.location())?;
            let arrival = add(current_time, travel)?;
            let start = arrival.max(service.time_window().start());
            let wait = sub(start, arrival)?;
            let end = add(start, service.duration())?;

            travel_time = add(travel_time, travel)?;
            waiting_time = add(waiting_time, wait)?;
            visits.push(VisitTiming {
                service: service.id().to_string(),
                location: service.location().to_string(),
                arrival,
                start,
                end,
            });

            current_time = end;
            current_location = service.location();
        }

        let return_travel = self.travel(current_location, depot)?;
        travel_time = add(travel_time, return_travel)?;

        Ok(Timeline {
            caregiver: caregiver.id().to_string(),
            departure,
            visits,
            return_arrival: add(current_time, return_travel)?,
            travel_time,
            waiting_time,
        })
    }

    fn travel(&self, from: &str, to: &str) -> Result<Minutes, SolutionError> {
        self.context
            .travel_time(from, to)
            .ok_or_else(|| SolutionError::MissingDistance {
                from: from.to_string(),
                to: to.to_string(),
            })
    }
}
