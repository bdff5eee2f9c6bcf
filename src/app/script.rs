//! Headless replay of a recorded interaction session.
//!
//! A script is a JSON array of steps. Each step runs exactly one tick except
//! `idle`, which runs `n` ticks with no input:
//!
//! ```json
//! ["tap", {"command": "enter_manipulation"}, {"command": {"set_scale": 1.5}},
//!  {"aim": {"yaw_deg": 90.0, "pitch_deg": -60.0}}, {"idle": 3}]
//! ```

use crate::interaction::{Command, FrameOutput, ModeController};
use crate::placement::PlacementOutcome;
use crate::tracking::SimulatedDevice;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse script: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ScriptError>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptStep {
    /// Apply a command, then tick without a tap.
    Command(Command),
    Tap,
    /// Point the simulated camera, then tick.
    Aim { yaw_deg: f32, pitch_deg: f32 },
    Idle(u32),
}

/// Totals gathered while replaying.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptReport {
    pub ticks: usize,
    pub spawned: usize,
    pub relocated: usize,
    pub ignored_commands: usize,
    pub last_frame: Option<FrameOutput>,
}

pub fn parse(json: &str) -> Result<Vec<ScriptStep>> {
    Ok(serde_json::from_str(json)?)
}

pub fn load(path: &Path) -> Result<Vec<ScriptStep>> {
    let json = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let steps = parse(&json)?;
    log::info!("Loaded {} script steps from {}", steps.len(), path.display());
    Ok(steps)
}

pub fn replay(
    controller: &mut ModeController,
    device: &mut SimulatedDevice,
    steps: &[ScriptStep],
) -> ScriptReport {
    let mut report = ScriptReport::default();

    for step in steps {
        match *step {
            ScriptStep::Command(command) => {
                if !controller.handle_command(command) {
                    report.ignored_commands += 1;
                }
                tick(controller, device, false, &mut report);
            }
            ScriptStep::Tap => tick(controller, device, true, &mut report),
            ScriptStep::Aim { yaw_deg, pitch_deg } => {
                device.camera.aim(yaw_deg.to_radians(), pitch_deg.to_radians());
                tick(controller, device, false, &mut report);
            }
            ScriptStep::Idle(frames) => {
                for _ in 0..frames {
                    tick(controller, device, false, &mut report);
                }
            }
        }
    }

    log::info!(
        "Replay finished: {} ticks, {} spawned, {} moved, {} ignored commands",
        report.ticks,
        report.spawned,
        report.relocated,
        report.ignored_commands
    );
    report
}

fn tick(
    controller: &mut ModeController,
    device: &SimulatedDevice,
    tap: bool,
    report: &mut ScriptReport,
) {
    let frame = controller.tick(device, tap);
    report.ticks += 1;
    match frame.outcome {
        Some(PlacementOutcome::Spawned(_)) => report.spawned += 1,
        Some(PlacementOutcome::Relocated(_)) => report.relocated += 1,
        None if tap => log::debug!("Tap at tick {} placed nothing", report.ticks),
        None => {}
    }
    report.last_frame = Some(frame);
}
