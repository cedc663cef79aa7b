//! Replay session: drives a `ViewerCore` through a script on a frame clock.
//!
//! DESIGN
//! ======
//! The session plays the host's role: it feeds script steps to the engine,
//! owns the simulated clock, and answers `RequestAsset` actions through an
//! [`AssetLoader`]. Requests are collected as they are emitted and only
//! awaited at the start of the next frame, so the engine sits in `Loading`
//! for at least one step, as it would while a browser fetches the image.
//!
//! Every action and snapshot becomes a [`Record`] stamped with the frame
//! number and clock time.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::io::Write;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};
use viewer::engine::{Action, ViewSnapshot, ViewerCore};
use viewer::tour::PanoramaId;
use viewer::visibility::WaypointId;

use crate::AppError;
use crate::loader::AssetLoader;
use crate::script::Step;

/// Upper bound on frames a single `settle` step may run.
const MAX_SETTLE_FRAMES: u32 = 10_000;

/// Clock and viewport settings for a replay.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub frame_ms: f64,
    /// Sleep one frame interval per frame.
    pub realtime: bool,
}

/// One line of replay output.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Action { frame: u64, time_ms: f64, action: Action },
    Snapshot { frame: u64, time_ms: f64, snapshot: ViewSnapshot },
}

pub struct Session<L> {
    core: ViewerCore,
    loader: L,
    options: SessionOptions,
    frame: u64,
    pending: Vec<(PanoramaId, String)>,
}

impl<L: AssetLoader> Session<L> {
    pub fn new(core: ViewerCore, loader: L, options: SessionOptions) -> Self {
        Self { core, loader, options, frame: 0, pending: Vec::new() }
    }

    #[must_use]
    pub fn core(&self) -> &ViewerCore {
        &self.core
    }

    /// Clock time of the current frame.
    #[must_use]
    pub fn time_ms(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let frames = self.frame as f64;
        frames * self.options.frame_ms
    }

    /// Apply the initial viewport, then replay `steps`, writing records as JSON lines.
    ///
    /// # Errors
    ///
    /// Returns [`AppError`] if a record cannot be serialized or written.
    pub async fn run<W: Write>(&mut self, steps: &[Step], out: &mut W) -> Result<(), AppError> {
        let actions = self.core.set_viewport(self.options.viewport_width, self.options.viewport_height);
        let records = self.record(actions);
        write_records(out, &records)?;
        for step in steps {
            let records = self.apply(step).await;
            write_records(out, &records)?;
        }
        Ok(())
    }

    /// Run one script step.
    pub async fn apply(&mut self, step: &Step) -> Vec<Record> {
        match step {
            Step::Viewport { width, height } => {
                let actions = self.core.set_viewport(*width, *height);
                self.record(actions)
            }
            Step::Start => {
                let actions = self.core.start();
                self.record(actions)
            }
            Step::Tick(n) => {
                let mut records = Vec::new();
                for _ in 0..*n {
                    records.extend(self.frame().await);
                }
                records
            }
            Step::Settle => self.settle().await,
            Step::Click(index) => {
                let Some(panorama_id) = self.core.current_panorama_id().map(str::to_owned) else {
                    debug!(index, "click skipped: no panorama yet");
                    return Vec::new();
                };
                let actions = self.core.click_waypoint(&WaypointId { panorama_id, index: *index });
                self.record(actions)
            }
            Step::Command(command) => {
                let actions = self.core.dispatch(command.clone());
                self.record(actions)
            }
            Step::Snapshot => vec![Record::Snapshot {
                frame: self.frame,
                time_ms: self.time_ms(),
                snapshot: self.core.snapshot(),
            }],
        }
    }

    /// Whether the engine or the session still has work in flight.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.core.is_busy() || !self.pending.is_empty()
    }

    async fn settle(&mut self) -> Vec<Record> {
        let mut records = Vec::new();
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.is_busy() {
                return records;
            }
            records.extend(self.frame().await);
        }
        warn!(frames = MAX_SETTLE_FRAMES, phase = self.core.phase().name(), "settle gave up");
        records
    }

    /// Resolve outstanding asset requests, then advance the clock one frame.
    async fn frame(&mut self) -> Vec<Record> {
        let mut records = Vec::new();
        for (panorama_id, url) in std::mem::take(&mut self.pending) {
            let actions = match self.loader.load(&url).await {
                Ok(size) => self.core.asset_loaded(&panorama_id, f64::from(size.width), f64::from(size.height)),
                Err(e) => self.core.asset_failed(&panorama_id, &e.to_string()),
            };
            records.extend(self.record(actions));
        }

        if self.options.realtime {
            tokio::time::sleep(Duration::from_secs_f64(self.options.frame_ms.max(0.0).min(60_000.0) / 1000.0)).await;
        }
        self.frame += 1;
        let actions = self.core.tick(self.time_ms());
        records.extend(self.record(actions));
        records
    }

    /// Stamp actions as records, queueing any asset requests among them.
    fn record(&mut self, actions: Vec<Action>) -> Vec<Record> {
        let time_ms = self.time_ms();
        actions
            .into_iter()
            .map(|action| {
                if let Action::RequestAsset { panorama_id, url } = &action {
                    self.pending.push((panorama_id.clone(), url.clone()));
                }
                Record::Action { frame: self.frame, time_ms, action }
            })
            .collect()
    }
}

fn write_records<W: Write>(out: &mut W, records: &[Record]) -> Result<(), AppError> {
    for record in records {
        serde_json::to_writer(&mut *out, record)?;
        out.write_all(b"\n")?;
    }
    out.flush()?;
    Ok(())
}
