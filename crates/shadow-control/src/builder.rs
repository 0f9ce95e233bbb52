//! Fluent builder for constructing a [`ShadowController`].

use tracing::info;

use shadow_behavior::{Animator, ModeGate, SequencePlanner};
use shadow_motion::MovementController;
use shadow_seating::{ChangeDetector, SeatRegistry};

use crate::{BehaviorSequencer, ControlResult, ControllerState, ShadowConfig, ShadowController};

/// Fluent builder for [`ShadowController<A, G>`].
///
/// # Required inputs
///
/// - [`ShadowConfig`] — seats, clock, motion, glare, and timing settings
/// - `A: Animator` — the animation sink
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                              |
/// |------------------------|--------------------------------------|
/// | `.gate(g)`             | `false` (never asserted)             |
/// | `.registry(r)`         | Built from `config.seats`            |
/// | `.start_at_default()`  | Unplaced until the first snapshot    |
///
/// # Example
///
/// ```rust,ignore
/// let config = ShadowConfig::from_path(Path::new("shadow.json"))?;
/// let mut controller = ControllerBuilder::new(config, SimulatedAnimator::new())
///     .start_at_default()
///     .build()?;
/// controller.run_ticks(600, &mut source, &mut NoopObserver);
/// ```
pub struct ControllerBuilder<A: Animator, G: ModeGate = bool> {
    config:           ShadowConfig,
    animator:         A,
    gate:             G,
    registry:         Option<SeatRegistry>,
    start_at_default: bool,
}

impl<A: Animator> ControllerBuilder<A, bool> {
    /// Create a builder with all required inputs.
    pub fn new(config: ShadowConfig, animator: A) -> Self {
        Self {
            config,
            animator,
            gate:             false,
            registry:         None,
            start_at_default: false,
        }
    }
}

impl<A: Animator, G: ModeGate> ControllerBuilder<A, G> {
    /// Supply the mode gate.  While it is asserted, no animation events are
    /// fired and waits complete immediately; moves still run.
    pub fn gate<G2: ModeGate>(self, gate: G2) -> ControllerBuilder<A, G2> {
        ControllerBuilder {
            config:           self.config,
            animator:         self.animator,
            gate,
            registry:         self.registry,
            start_at_default: self.start_at_default,
        }
    }

    /// Use a prebuilt registry instead of `config.seats`.
    pub fn registry(mut self, registry: SeatRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Snap to the default seat during `build` instead of waiting for the
    /// first snapshot.
    pub fn start_at_default(mut self) -> Self {
        self.start_at_default = true;
        self
    }

    /// Validate the configuration and return a ready-to-run controller.
    pub fn build(self) -> ControlResult<ShadowController<A, G>> {
        let config = self.config;
        config.clock.validate()?;
        config.motion.validate()?;
        config.glare.validate()?;
        config.timing.validate()?;

        let registry = match self.registry {
            Some(r) => r,
            None => config.build_registry()?,
        };

        let clock = config.clock.make_clock();
        let planner = SequencePlanner::new(config.timing, config.motion.mode, &clock);
        let glare = config.glare.to_gate(&clock);
        let mover = MovementController::new(config.motion)?;

        info!(
            seats = registry.len(),
            tick_rate_hz = clock.tick_rate_hz,
            mode = planner.mode().label(),
            "controller built"
        );

        let mut controller = ShadowController {
            clock,
            registry,
            detector: ChangeDetector::new(),
            planner,
            glare,
            sequencer: BehaviorSequencer::new(),
            mover,
            animator: self.animator,
            gate: self.gate,
            state: ControllerState::default(),
        };
        if self.start_at_default {
            controller.place_at_default();
        }
        Ok(controller)
    }
}
