//! rehearsal — replays a scripted visit against the shadow seat controller.
//!
//! Five seats in a row, one shadow, and a short story: the room is empty, a
//! visitor sits next to the shadow, a second one takes its seat, a third
//! sits across the row, the row fills up, and finally everyone leaves.
//!
//! Pass a configuration file as the first argument to use your own seats
//! (seat ids must match the script below).  Set `RUST_LOG=debug` to see
//! every suppressed snapshot and gated glare.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shadow_behavior::{Response, SimulatedAnimator};
use shadow_control::{
    ControllerBuilder, ControllerObserver, ControllerState, ScriptedSource, SequenceOutcome,
    ShadowConfig,
};
use shadow_core::{ControlClock, SequenceHandle, Tick};
use shadow_seating::SnapshotError;

// ── Constants ─────────────────────────────────────────────────────────────────

const RUN_SECS: f32 = 40.0;

const CONFIG_JSON: &str = r#"{
    "clock": { "tick_rate_hz": 60 },
    "seats": [
        { "id": "far-left",  "position": [-2.0, 0.0, 2.0], "yaw_degrees": 180, "height_offset": 0.45 },
        { "id": "left",      "position": [-1.0, 0.0, 2.0], "yaw_degrees": 180, "height_offset": 0.45 },
        { "id": "centre",    "position": [ 0.0, 0.0, 2.0], "yaw_degrees": 180, "height_offset": 0.45 },
        { "id": "right",     "position": [ 1.0, 0.0, 2.0], "yaw_degrees": 180, "height_offset": 0.45 },
        { "id": "far-right", "position": [ 2.0, 0.0, 2.0], "yaw_degrees": 180, "height_offset": 0.45 }
    ],
    "default_seat": "centre",
    "floor":  { "position": [0.0, 0.0, 0.8], "look_target": [0.0, 1.0, -2.0] },
    "motion": { "mode": "walk", "walk_speed": 1.2 },
    "glare":  { "cooldown_secs": 3.0, "confidence_threshold": 0.5 }
}"#;

/// `(seconds, raw snapshot)` in the upstream metadata format.
const SCRIPT: &[(f32, &str)] = &[
    (0.0,  r#"{"occupancy":{"far-left":false,"left":false,"centre":false,"right":false,"far-right":false}}"#),
    (2.0,  r#"{"activeSeatId":"right","confidence":0.9}"#),
    // Same frame again: suppressed.
    (2.5,  r#"{"activeSeatId":"right","confidence":0.9}"#),
    (8.0,  r#"{"seating":{"activeSeatId":"far-left","confidence":0.8,"occupiedSeatIds":["right"]}}"#),
    (15.0, r#"{"activeSeatId":"centre","confidence":0.95,"occupiedSeatIds":["far-left","right"]}"#),
    (16.0, r#"{"activeSeatId":"#),
    (20.0, r#"{"activeSeatId":"left","confidence":0.9,"occupiedSeatIds":["far-left","centre","right","far-right"]}"#),
    (30.0, r#"{"seats":[{"id":"far-left","occupied":false},{"id":"left","occupied":false},{"id":"centre","occupied":false},{"id":"right","occupied":false},{"id":"far-right","occupied":false}]}"#),
];

// ── Observer ──────────────────────────────────────────────────────────────────

#[derive(Default)]
struct RehearsalLog {
    responses: usize,
    rejected:  usize,
    completed: usize,
    timeouts:  u32,
    last:      Option<ControllerState>,
}

impl ControllerObserver for RehearsalLog {
    fn on_response(&mut self, tick: Tick, response: Response, sequence: Option<SequenceHandle>) {
        self.responses += 1;
        info!(%tick, %response, sequence = ?sequence, "response");
    }

    fn on_snapshot_rejected(&mut self, tick: Tick, error: &SnapshotError) {
        self.rejected += 1;
        warn!(%tick, %error, "frame rejected");
    }

    fn on_sequence_end(&mut self, tick: Tick, handle: SequenceHandle, outcome: SequenceOutcome) {
        if let SequenceOutcome::Completed { timeouts } = outcome {
            self.completed += 1;
            self.timeouts += timeouts;
        }
        info!(%tick, %handle, ?outcome, "sequence ended");
    }

    fn on_tick_end(&mut self, _tick: Tick, state: &ControllerState) {
        if self.last.as_ref().map(|s| s.placement) != Some(state.placement) {
            info!(placement = ?state.placement, position = %state.pose.position, "placement");
        }
        self.last = Some(state.clone());
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ShadowConfig::from_path(Path::new(&path))
            .with_context(|| format!("loading configuration from {path}"))?,
        None => ShadowConfig::from_json_str(CONFIG_JSON).context("embedded configuration")?,
    };

    let clock = ControlClock::new(config.clock.tick_rate_hz);
    let source = SCRIPT.iter().fold(ScriptedSource::new(), |src, &(secs, raw)| {
        src.raw_at(Tick(clock.ticks_for_secs(secs)), raw)
    });
    let total_ticks = clock.ticks_for_secs(RUN_SECS);

    println!("=== rehearsal — shadow seat controller ===");
    println!(
        "Seats: {}  |  Frames: {}  |  Ticks: {} @ {} Hz",
        config.seats.len(),
        source.remaining(),
        total_ticks,
        clock.tick_rate_hz
    );
    println!();

    let mut controller = ControllerBuilder::new(config, SimulatedAnimator::new().with_all_clips(1.2))
        .build()
        .context("building controller")?;

    let mut source = source;
    let mut log = RehearsalLog::default();
    controller.run_ticks(total_ticks, &mut source, &mut log);

    let state = controller.state();
    println!();
    println!("Responses:            {}", log.responses);
    println!("Frames rejected:      {}", log.rejected);
    println!("Duplicates dropped:   {}", controller.suppressed_snapshots());
    println!("Sequences completed:  {}", log.completed);
    println!("Waits timed out:      {}", log.timeouts);
    println!("Animation events:     {}", controller.animator().events().len());
    println!(
        "Final placement:      {:?} at {}",
        state.placement, state.pose.position
    );
    Ok(())
}
