//! Controller observer trait for progress reporting and test probes.

use shadow_behavior::Response;
use shadow_core::{SequenceHandle, Tick};
use shadow_seating::SnapshotError;

use crate::{ControllerState, SequenceOutcome};

/// Callbacks invoked by [`ShadowController`][crate::ShadowController] at key
/// points of the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
///
/// # Example — response logger
///
/// ```rust,ignore
/// struct ResponseLog(Vec<(Tick, Response)>);
///
/// impl ControllerObserver for ResponseLog {
///     fn on_response(&mut self, tick: Tick, response: Response, _seq: Option<SequenceHandle>) {
///         self.0.push((tick, response));
///     }
/// }
/// ```
pub trait ControllerObserver {
    /// Called at the very start of each tick, before any snapshot is read.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called for every admitted snapshot with the decided response.
    /// `sequence` is the handle of the sequence started for it, if any.
    fn on_response(&mut self, _tick: Tick, _response: Response, _sequence: Option<SequenceHandle>) {}

    /// Called when a raw snapshot could not be parsed.  The tick continues
    /// with the previous state.
    fn on_snapshot_rejected(&mut self, _tick: Tick, _error: &SnapshotError) {}

    /// Called when a sequence completes or is superseded.
    fn on_sequence_end(&mut self, _tick: Tick, _handle: SequenceHandle, _outcome: SequenceOutcome) {}

    /// Called at the end of each tick with the resulting state.
    fn on_tick_end(&mut self, _tick: Tick, _state: &ControllerState) {}
}

/// A [`ControllerObserver`] that does nothing.
pub struct NoopObserver;

impl ControllerObserver for NoopObserver {}
