//! Response decision: which behavior an admitted snapshot calls for.

use std::fmt;

use tracing::debug;

use shadow_core::SeatIndex;
use shadow_seating::{SeatRegistry, find_best_seat};

use crate::{DecisionContext, Destination, Placement, Reaction};

/// The behavior chosen for one admitted snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Response {
    /// Nothing to do.
    Stay,
    /// Every seat is taken: frustrated reaction, then the floor.
    AllFull,
    /// First placement.
    ClaimDefault { target: SeatIndex },
    /// Back from the floor once a seat has freed up.
    ReturnToSeat { target: SeatIndex },
    /// Visitor took the shadow's seat.  `None` target means the floor.
    Collision { target: Option<SeatIndex> },
    /// Visitor sat next to the shadow; move away keeping a gap.
    Adjacent { target: SeatIndex },
    /// Turn toward the visitor and glare without relocating.
    Glare { toward: SeatIndex },
}

impl Response {
    pub fn label(self) -> &'static str {
        match self {
            Response::Stay              => "stay",
            Response::AllFull           => "all_full",
            Response::ClaimDefault { .. } => "claim_default",
            Response::ReturnToSeat { .. } => "return_to_seat",
            Response::Collision { .. }  => "collision",
            Response::Adjacent { .. }   => "adjacent",
            Response::Glare { .. }      => "glare",
        }
    }

    /// The reaction trigger that opens this behavior, if any.
    pub fn reaction(self) -> Option<Reaction> {
        match self {
            Response::AllFull         => Some(Reaction::AllFull),
            Response::Collision { .. } => Some(Reaction::Collision),
            Response::Adjacent { .. } => Some(Reaction::Adjacent),
            Response::Glare { .. }    => Some(Reaction::Glare),
            Response::Stay
            | Response::ClaimDefault { .. }
            | Response::ReturnToSeat { .. } => None,
        }
    }

    /// Where the shadow ends up, or `None` if it stays put.
    pub fn destination(self) -> Option<Destination> {
        match self {
            Response::Stay | Response::Glare { .. } => None,
            Response::AllFull                       => Some(Destination::Floor),
            Response::ClaimDefault { target }
            | Response::ReturnToSeat { target }
            | Response::Adjacent { target }         => Some(Destination::Seat(target)),
            Response::Collision { target }          => {
                Some(target.map_or(Destination::Floor, Destination::Seat))
            }
        }
    }

    #[inline]
    pub fn relocates(self) -> bool {
        self.destination().is_some()
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.destination() {
            Some(Destination::Seat(s)) => write!(f, "{} -> {s}", self.label()),
            Some(Destination::Floor)   => write!(f, "{} -> floor", self.label()),
            None                       => f.write_str(self.label()),
        }
    }
}

/// Decide the response for the current state.  Pure; first match wins:
///
/// 1. All seats taken: `AllFull` (or `Stay` if already on the floor).
/// 2. Not yet placed: `ClaimDefault`.
/// 3. On the floor: `ReturnToSeat` once no visitor is active, else `Stay`.
/// 4. No active visitor: `Stay`.
/// 5. Visitor on the shadow's seat: `Collision`.
/// 6. Visitor on a neighbouring seat: `Adjacent`, or a gated glare if no
///    seat keeps a gap.
/// 7. Visitor elsewhere: gated `Glare`.
pub fn decide(ctx: &DecisionContext<'_>) -> Response {
    let registry = ctx.registry;

    if registry.all_human_occupied() {
        return match ctx.placement {
            Placement::AtFloor => Response::Stay,
            _                  => Response::AllFull,
        };
    }

    let current = match ctx.placement {
        Placement::Unplaced => return claim_default(registry, ctx.human_seat),
        Placement::AtFloor  => {
            return match ctx.human_seat {
                None    => return_to_seat(registry),
                Some(_) => Response::Stay,
            };
        }
        Placement::AtSeat(seat) => seat,
    };

    let Some(human) = ctx.human_seat else {
        return Response::Stay;
    };

    if human == current {
        return Response::Collision { target: find_best_seat(registry, Some(human), false, false) };
    }

    if human.is_adjacent(current) {
        if let Some(target) = find_best_seat(registry, Some(human), true, false) {
            return Response::Adjacent { target };
        }
        debug!(%human, %current, "no seat keeps a gap; falling back to glare");
    }

    gated_glare(ctx, human)
}

fn gated_glare(ctx: &DecisionContext<'_>, toward: SeatIndex) -> Response {
    if ctx.glare_allowed() {
        Response::Glare { toward }
    } else {
        debug!(
            confidence = ctx.confidence,
            last_glare = ?ctx.last_glare,
            now = %ctx.now,
            "glare gated"
        );
        Response::Stay
    }
}

fn free_default(registry: &SeatRegistry) -> Option<SeatIndex> {
    let default = registry.default_seat();
    registry
        .get(default)
        .filter(|s| !s.human_occupied())
        .map(|_| default)
}

fn claim_default(registry: &SeatRegistry, human: Option<SeatIndex>) -> Response {
    free_default(registry)
        .or_else(|| find_best_seat(registry, human, false, false))
        .map_or(Response::Stay, |target| Response::ClaimDefault { target })
}

fn return_to_seat(registry: &SeatRegistry) -> Response {
    free_default(registry)
        .or_else(|| find_best_seat(registry, None, false, false))
        .map_or(Response::Stay, |target| Response::ReturnToSeat { target })
}
