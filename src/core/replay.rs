//! Replay loop: source → tracker → event stream + status file

use std::io::Write;
use std::path::PathBuf;

use tracing::{info, warn};
use crate::core::source::LandmarkSource;
use crate::core::status::{save_status, IntervalGate};
use crate::core::tracker::Tracker;
use crate::error::Result;
use crate::types::{EventRecord, FrameOutput};

/// Where replay output goes
#[derive(Debug, Clone, Default)]
pub struct ReplayOptions {
    /// Write event records (JSON lines) to the event sink
    pub emit_events: bool,
    /// Mirror the status snapshot here periodically and at the end
    pub status_path: Option<PathBuf>,
}

/// Totals for one finished replay
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReplaySummary {
    pub frames: u64,
    pub events: u64,
    pub smile_count: u32,
    pub heart_detected: bool,
}

/// Drive `tracker` with every frame from `source` until end of stream.
///
/// `on_frame` sees every output (used for the debug HUD). A source error
/// ends the replay; the final status write still happens and the source
/// error is the one returned.
pub fn run_replay<S, W, F>(
    source: &mut S,
    tracker: &mut Tracker,
    options: &ReplayOptions,
    events_out: &mut W,
    mut on_frame: F,
) -> Result<ReplaySummary>
where
    S: LandmarkSource + ?Sized,
    W: Write,
    F: FnMut(&FrameOutput),
{
    let mut event_gate = IntervalGate::new(tracker.config().event_interval_ms());
    let mut status_gate = IntervalGate::new(tracker.config().status_write_interval_ms);
    let mut summary = ReplaySummary::default();

    let looped = (|| -> Result<()> {
        while let Some(frame) = source.next_frame()? {
            let output = tracker.update(&frame);
            summary.frames += 1;
            on_frame(&output);

            if options.emit_events && event_gate.ready(output.timestamp_ms) {
                serde_json::to_writer(&mut *events_out, &EventRecord::from(&output))?;
                events_out.write_all(b"\n")?;
                events_out.flush()?;
                summary.events += 1;
            }

            if let Some(path) = &options.status_path {
                if status_gate.ready(output.timestamp_ms) {
                    if let Err(e) = save_status(&tracker.status_snapshot(), path) {
                        warn!(path = %path.display(), error = %e, "Status write failed");
                    }
                }
            }
        }
        Ok(())
    })();

    let finished = options
        .status_path
        .as_ref()
        .map_or(Ok(()), |path| save_status(&tracker.status_snapshot(), path));

    looped?;
    finished?;

    summary.smile_count = tracker.smile_count();
    summary.heart_detected = tracker.heart_detected();
    info!(
        frames = summary.frames,
        events = summary.events,
        smiles = summary.smile_count,
        heart = summary.heart_detected,
        "Replay finished"
    );
    Ok(summary)
}
