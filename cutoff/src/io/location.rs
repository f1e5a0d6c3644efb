//! One-shot geolocation plumbing.
//!
//! Models the host platform's location callback as a single-use
//! request/reply pair with exactly two terminal outcomes. There is no
//! retry and no registration of ambient callbacks: the pair is created,
//! answered once, and consumed once.

use std::sync::mpsc::{self, Receiver, Sender};

use crate::core::geo::Coordinate;

/// Terminal outcome of a location request.
///
/// Denial is a legitimate outcome, not a fault; the board omits
/// location-based suggestions and carries on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GeoOutcome {
    Fix(Coordinate),
    Denied,
}

/// Host side of a pending request. Consumed by [`GeoReply::fulfill`].
#[derive(Debug)]
pub struct GeoReply(Sender<GeoOutcome>);

/// Consumer side of a pending request. Consumed by [`GeoRequest::wait`].
#[derive(Debug)]
pub struct GeoRequest(Receiver<GeoOutcome>);

/// Create a pending location request.
pub fn location_request() -> (GeoReply, GeoRequest) {
    let (tx, rx) = mpsc::channel();
    (GeoReply(tx), GeoRequest(rx))
}

impl GeoReply {
    /// Answer the request. Consuming `self` makes a second answer
    /// unrepresentable.
    pub fn fulfill(self, outcome: GeoOutcome) {
        // The consumer may already have gone away; that is not our problem.
        let _ = self.0.send(outcome);
    }
}

impl GeoRequest {
    /// Block until the host answers.
    ///
    /// A [`GeoReply`] dropped without answering counts as denial, so a host
    /// that tears down its location machinery degrades the same way an
    /// explicit denial does.
    pub fn wait(self) -> GeoOutcome {
        self.0.recv().unwrap_or(GeoOutcome::Denied)
    }
}
