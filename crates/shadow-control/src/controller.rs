//! The `ShadowController` and its tick loop.

use serde_json::Value;
use tracing::{debug, info, warn};

use shadow_behavior::{
    AnimationEvent, Animator, DecisionContext, Destination, GlareGate, ModeGate, Placement,
    Response, SequencePlanner, anchor_pose, decide,
};
use shadow_core::{ControlClock, Pose, SeatIndex, SequenceHandle, Tick};
use shadow_motion::MovementController;
use shadow_seating::{ChangeDetector, OccupancySnapshot, SeatRegistry, SnapshotResult};

use crate::{
    BehaviorSequencer, CompletedSequence, ControllerObserver, SequenceOutcome, SequencePoll,
    SequencerContext, SnapshotSource,
};

/// Everything the controller remembers between ticks besides the registry.
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerState {
    /// At a seat, on the floor, or not yet placed.  Changes only when a
    /// relocating sequence completes.
    pub placement:       Placement,
    /// Current pose of the controlled entity.
    pub pose:            Pose,
    /// Tick of the last glare started.
    pub last_glare:      Option<Tick>,
    /// A move is in progress.
    pub moving:          bool,
    pub active_sequence: Option<SequenceHandle>,
}

impl Default for ControllerState {
    fn default() -> Self {
        Self {
            placement:       Placement::Unplaced,
            pose:            Pose::default(),
            last_glare:      None,
            moving:          false,
            active_sequence: None,
        }
    }
}

impl ControllerState {
    #[inline]
    pub fn current_seat(&self) -> Option<SeatIndex> {
        self.placement.seat()
    }

    #[inline]
    pub fn on_floor(&self) -> bool {
        self.placement.on_floor()
    }
}

/// The occupancy-reactive seat controller.
///
/// Each tick it drains its snapshot source, runs admitted snapshots through
/// decide → plan → start, polls the running sequence, lets the animator
/// advance, and moves the clock on.  Single writer: nothing else mutates
/// the registry or the state.
///
/// Create via [`ControllerBuilder`][crate::ControllerBuilder].
pub struct ShadowController<A: Animator, G: ModeGate> {
    pub(crate) clock:     ControlClock,
    pub(crate) registry:  SeatRegistry,
    pub(crate) detector:  ChangeDetector,
    pub(crate) planner:   SequencePlanner,
    pub(crate) glare:     GlareGate,
    pub(crate) sequencer: BehaviorSequencer,
    pub(crate) mover:     MovementController,
    pub(crate) animator:  A,
    pub(crate) gate:      G,
    pub(crate) state:     ControllerState,
}

impl<A: Animator, G: ModeGate> ShadowController<A, G> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn registry(&self) -> &SeatRegistry {
        &self.registry
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn clock(&self) -> &ControlClock {
        &self.clock
    }

    #[inline]
    pub fn now(&self) -> Tick {
        self.clock.current_tick
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub fn animator_mut(&mut self) -> &mut A {
        &mut self.animator
    }

    pub fn gate_mut(&mut self) -> &mut G {
        &mut self.gate
    }

    /// `true` while a sequence is running.
    pub fn is_busy(&self) -> bool {
        self.sequencer.is_running()
    }

    /// Snapshots dropped as duplicates so far.
    pub fn suppressed_snapshots(&self) -> u64 {
        self.detector.suppressed()
    }

    // ── Placement ─────────────────────────────────────────────────────────

    /// Snap straight to the default seat if not yet placed.
    pub fn place_at_default(&mut self) {
        if !self.state.placement.is_placed() {
            let default = self.registry.default_seat();
            self.finalize(Destination::Seat(default));
        }
    }

    // ── Evaluation ────────────────────────────────────────────────────────

    /// Run one snapshot through change detection, decision, and sequencing.
    ///
    /// Returns `None` when the snapshot was suppressed as a duplicate,
    /// otherwise the decided response.
    pub fn evaluate<O: ControllerObserver>(
        &mut self,
        snapshot: &OccupancySnapshot,
        observer: &mut O,
    ) -> Option<Response> {
        if !self.detector.admit(snapshot) {
            return None;
        }
        let now = self.now();
        self.registry.apply_snapshot(snapshot);

        let response = self.decide_on(snapshot);
        info!(tick = %now, %response, "response decided");

        let handle = self.enact(response, observer);
        observer.on_response(now, response, handle);
        Some(response)
    }

    /// Decide against the registry and the current placement.
    fn decide_on(&self, snapshot: &OccupancySnapshot) -> Response {
        let human_seat = snapshot.active_seat_id().and_then(|id| {
            let index = self.registry.index_of(id);
            if index.is_none() {
                debug!(seat = id, "active seat not registered; treated as none");
            }
            index
        });

        decide(&DecisionContext {
            registry:   &self.registry,
            placement:  self.state.placement,
            human_seat,
            confidence: snapshot.confidence(),
            now:        self.now(),
            last_glare: self.state.last_glare,
            glare:      self.glare,
        })
    }

    /// After arriving somewhere new, look at the room again: snapshots
    /// admitted mid-move were decided against the old placement.  Only a
    /// further relocation is acted on.
    fn reconsider<O: ControllerObserver>(&mut self, observer: &mut O) {
        let Some(snapshot) = self.detector.last().cloned() else {
            return;
        };
        let response = self.decide_on(&snapshot);
        if !response.relocates() {
            debug!(%response, "nothing further on arrival");
            return;
        }
        let now = self.now();
        info!(tick = %now, %response, "response decided on arrival");
        let handle = self.enact(response, observer);
        observer.on_response(now, response, handle);
    }

    /// Parse a raw JSON snapshot and evaluate it.  A parse error leaves all
    /// state untouched and is reported to the observer.
    pub fn ingest_raw<O: ControllerObserver>(
        &mut self,
        raw:      &str,
        observer: &mut O,
    ) -> SnapshotResult<Option<Response>> {
        let parsed = OccupancySnapshot::from_json_str(raw);
        self.ingest(parsed, observer)
    }

    /// [`ingest_raw`][Self::ingest_raw] for an already-decoded document.
    pub fn ingest_value<O: ControllerObserver>(
        &mut self,
        doc:      &Value,
        observer: &mut O,
    ) -> SnapshotResult<Option<Response>> {
        let parsed = OccupancySnapshot::parse(doc);
        self.ingest(parsed, observer)
    }

    fn ingest<O: ControllerObserver>(
        &mut self,
        parsed:   SnapshotResult<OccupancySnapshot>,
        observer: &mut O,
    ) -> SnapshotResult<Option<Response>> {
        match parsed {
            Ok(snapshot) => Ok(self.evaluate(&snapshot, observer)),
            Err(e) => {
                warn!(tick = %self.now(), error = %e, "snapshot rejected");
                observer.on_snapshot_rejected(self.now(), &e);
                Err(e)
            }
        }
    }

    /// Debug override: force one seat's occupancy and re-evaluate.
    ///
    /// Builds a snapshot from the registry's current flags with the one seat
    /// changed; an occupied override makes that seat the active one.
    pub fn force_occupancy<O: ControllerObserver>(
        &mut self,
        index:    SeatIndex,
        occupied: bool,
        observer: &mut O,
    ) -> Option<Response> {
        let Some(seat) = self.registry.get(index) else {
            warn!(%index, "override for unknown seat ignored");
            return None;
        };
        let active = occupied.then(|| seat.id().to_owned());
        let snapshot = self.registry.seats().iter().fold(
            OccupancySnapshot::new(active, 1.0),
            |snap, s| {
                let flag = if s.index() == index { occupied } else { s.human_occupied() };
                snap.with_seat(s.id().to_owned(), flag)
            },
        );
        self.evaluate(&snapshot, observer)
    }

    /// Turn a response into a running sequence.
    fn enact<O: ControllerObserver>(&mut self, response: Response, observer: &mut O) -> Option<SequenceHandle> {
        if !response.relocates() && self.sequencer.is_relocating() {
            debug!(%response, "relocation in progress; response skipped");
            return None;
        }
        let sequence = self.planner.plan(response, &self.registry, self.state.pose)?;

        let now = self.now();
        if matches!(response, Response::Glare { .. }) {
            self.state.last_glare = Some(now);
        }
        let (handle, superseded) = self.sequencer.start(sequence, &mut self.mover);
        if let Some(old) = superseded {
            info!(%old, new = %handle, "sequence superseded");
            observer.on_sequence_end(now, old, SequenceOutcome::Superseded);
        }
        self.state.active_sequence = Some(handle);
        self.state.moving = self.mover.is_moving();
        Some(handle)
    }

    // ── Sequencing ────────────────────────────────────────────────────────

    /// Advance the running sequence by one tick.
    pub fn poll<O: ControllerObserver>(&mut self, observer: &mut O) -> SequencePoll {
        let mut cx = SequencerContext {
            now:      self.clock.current_tick,
            dt_secs:  self.clock.dt_secs(),
            animator: &mut self.animator,
            gate:     &self.gate,
            mover:    &mut self.mover,
            pose:     &mut self.state.pose,
        };
        let result = self.sequencer.poll(&mut cx);

        if let SequencePoll::Done(done) = &result {
            self.complete(done, observer);
        }
        self.state.moving = self.mover.is_moving();
        result
    }

    fn complete<O: ControllerObserver>(&mut self, done: &CompletedSequence, observer: &mut O) {
        let arrived = done.destination.is_some_and(|dest| self.finalize(dest));
        self.state.active_sequence = None;
        observer.on_sequence_end(self.now(), done.handle, SequenceOutcome::Completed { timeouts: done.timeouts });
        if arrived {
            self.reconsider(observer);
        }
    }

    /// Snap to the destination anchor and record the new placement.
    /// Returns `false` if `dest` is not configured.
    fn finalize(&mut self, dest: Destination) -> bool {
        let Some(pose) = anchor_pose(&self.registry, dest) else {
            warn!(?dest, "destination not configured; placement unchanged");
            return false;
        };
        self.state.pose = pose;
        match dest {
            Destination::Seat(index) => {
                self.registry.assign_shadow(Some(index));
                self.state.placement = Placement::AtSeat(index);
                self.emit(AnimationEvent::OnFloor(false));
                self.emit(AnimationEvent::SeatIndex(i32::from(index.0)));
            }
            Destination::Floor => {
                self.registry.assign_shadow(None);
                self.state.placement = Placement::AtFloor;
                self.emit(AnimationEvent::OnFloor(true));
            }
        }
        info!(placement = ?self.state.placement, "placement updated");
        true
    }

    fn emit(&mut self, event: AnimationEvent) {
        if !self.gate.is_asserted() {
            self.animator.fire(&event);
        }
    }

    // ── Tick loop ─────────────────────────────────────────────────────────

    /// One full tick: drain `source`, poll the sequence, advance the
    /// animator and the clock.
    pub fn tick<S: SnapshotSource, O: ControllerObserver>(&mut self, source: &mut S, observer: &mut O) {
        let now = self.now();
        observer.on_tick_start(now);

        while let Some(frame) = source.next_frame(now) {
            // Errors are already logged and reported by `ingest`.
            let _ = self.ingest(frame, observer);
        }

        self.poll(observer);
        self.animator.on_tick(self.clock.dt_secs());
        observer.on_tick_end(now, &self.state);
        self.clock.advance();
    }

    /// Run exactly `n` ticks.
    pub fn run_ticks<S: SnapshotSource, O: ControllerObserver>(
        &mut self,
        n:        u64,
        source:   &mut S,
        observer: &mut O,
    ) {
        for _ in 0..n {
            self.tick(source, observer);
        }
    }

    /// Tick until no sequence is running, at most `max_ticks` times.
    /// Returns the number of ticks run.
    pub fn run_until_idle<S: SnapshotSource, O: ControllerObserver>(
        &mut self,
        max_ticks: u64,
        source:    &mut S,
        observer:  &mut O,
    ) -> u64 {
        for n in 0..max_ticks {
            if !self.is_busy() {
                return n;
            }
            self.tick(source, observer);
        }
        max_ticks
    }
}
