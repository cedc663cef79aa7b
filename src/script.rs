//! Line-oriented replay scripts.
//!
//! One step per line; blank lines and `#` comments are skipped.
//!
//! ```text
//! viewport 1280 720     set the viewport size
//! start                 load the start panorama
//! tick [N]              advance N frames (default 1)
//! settle                advance until nothing is in flight
//! drag D | touch D      manual rotation by D pixels
//! step S                eased rotation by S pixels
//! click I               follow waypoint I of the current panorama
//! compass               turn to face north
//! edge left|right       center the closest off-screen waypoint
//! goto ID [ANGLE]       navigate to a panorama
//! snapshot              print the view state
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use viewer::input::{Command, PointerKind};
use viewer::visibility::Side;

/// A parse failure, with its 1-based line number.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("script line {line}: {message}")]
pub struct ScriptError {
    pub line: usize,
    pub message: String,
}

/// One scripted step.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Viewport { width: f64, height: f64 },
    Start,
    Tick(u32),
    Settle,
    /// Waypoint index on whichever panorama is current when the step runs.
    Click(usize),
    Command(Command),
    Snapshot,
}

/// Parse a whole script.
///
/// # Errors
///
/// Returns the first malformed line.
pub fn parse(src: &str) -> Result<Vec<Step>, ScriptError> {
    let mut steps = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        // A comment starts at any word beginning with `#`; ids may contain it elsewhere.
        let words: Vec<&str> = raw.split_whitespace().take_while(|w| !w.starts_with('#')).collect();
        let Some((verb, args)) = words.split_first() else {
            continue;
        };
        let step = parse_line(verb, args).map_err(|message| ScriptError { line: idx + 1, message })?;
        steps.push(step);
    }
    Ok(steps)
}

fn parse_line(verb: &str, args: &[&str]) -> Result<Step, String> {

    let step = match (verb, args) {
        ("viewport", [w, h]) => Step::Viewport { width: number(w)?, height: number(h)? },
        ("start", []) => Step::Start,
        ("tick", []) => Step::Tick(1),
        ("tick", [n]) => Step::Tick(n.parse().map_err(|_| format!("invalid frame count `{n}`"))?),
        ("settle", []) => Step::Settle,
        ("drag", [d]) => Step::Command(Command::ManualRotate { delta_px: number(d)?, pointer: PointerKind::Mouse }),
        ("touch", [d]) => Step::Command(Command::ManualRotate { delta_px: number(d)?, pointer: PointerKind::Touch }),
        ("step", [s]) => Step::Command(Command::StepRotate { step_px: number(s)? }),
        ("click", [i]) => Step::Click(i.parse().map_err(|_| format!("invalid waypoint index `{i}`"))?),
        ("compass", []) => Step::Command(Command::ClickCompass),
        ("edge", ["left"]) => Step::Command(Command::ClickEdge { side: Side::Left }),
        ("edge", ["right"]) => Step::Command(Command::ClickEdge { side: Side::Right }),
        ("goto", [id]) => Step::Command(Command::Navigate { panorama_id: (*id).to_owned(), angle: None }),
        ("goto", [id, angle]) => {
            Step::Command(Command::Navigate { panorama_id: (*id).to_owned(), angle: Some(number(angle)?) })
        }
        ("snapshot", []) => Step::Snapshot,
        (
            "viewport" | "start" | "tick" | "settle" | "drag" | "touch" | "step" | "click" | "compass" | "edge"
            | "goto" | "snapshot",
            _,
        ) => return Err(format!("wrong arguments for `{verb}`")),
        _ => return Err(format!("unknown step `{verb}`")),
    };
    Ok(step)
}

fn number(raw: &str) -> Result<f64, String> {
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(n),
        _ => Err(format!("invalid number `{raw}`")),
    }
}
