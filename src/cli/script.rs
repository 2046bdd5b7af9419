//! Deterministic script runner.
//!
//! Scripts drive the controller on a virtual clock: `wait <ms>` moves the
//! clock forward and fires whatever came due, so a script produces the same
//! output on every run regardless of machine speed.

use super::command::{parse_line, ShellCommand, HELP};
use crate::controller::{ControllerOptions, NavigationController};
use anyhow::{Context, Result};
use std::io::{BufRead, Write};
use std::time::Instant;

/// What the caller should do after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    Continue,
    Stop,
}

/// Totals reported after a script finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScriptReport {
    pub lines: usize,
    pub rejected: usize,
}

pub struct ScriptRunner {
    controller: NavigationController,
    clock: Instant,
}

impl ScriptRunner {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            controller: NavigationController::new(options),
            clock: Instant::now(),
        }
    }

    pub fn controller(&self) -> &NavigationController {
        &self.controller
    }

    /// Run one line. Controller rejections are reported on `out` and
    /// returned as errors; the runner stays usable afterwards.
    pub fn run_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<LineOutcome> {
        let Some(command) = parse_line(line)? else {
            return Ok(LineOutcome::Continue);
        };
        match command {
            ShellCommand::Intent(intent) => {
                self.controller.dispatch(intent, self.clock)?;
                self.controller.advance(self.clock);
            }
            ShellCommand::Wait(duration) => {
                self.clock += duration;
                self.controller.advance(self.clock);
            }
            ShellCommand::Show => {
                let json = serde_json::to_string_pretty(&self.controller.snapshot())
                    .context("Failed to serialize snapshot")?;
                writeln!(out, "{}", json)?;
            }
            ShellCommand::Help => write!(out, "{}", HELP)?,
            ShellCommand::Quit => return Ok(LineOutcome::Stop),
        }
        Ok(LineOutcome::Continue)
    }

    /// Run every line of `input`, reporting rejected lines on `out`.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<ScriptReport> {
        let mut report = ScriptReport::default();
        for (index, line) in input.lines().enumerate() {
            let line = line.context("Failed to read script")?;
            report.lines += 1;
            match self.run_line(&line, out) {
                Ok(LineOutcome::Continue) => {}
                Ok(LineOutcome::Stop) => break,
                Err(e) => {
                    report.rejected += 1;
                    writeln!(out, "line {}: {}", index + 1, e)?;
                }
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Screen;

    #[test]
    fn test_script_drives_transition() {
        let script = "navigate calendar\ndaily 2020-06-04\nwait 1100\n";
        let mut runner = ScriptRunner::new(ControllerOptions::default());
        let mut out = Vec::new();
        let report = runner.run(script.as_bytes(), &mut out).unwrap();
        assert_eq!(report, ScriptReport { lines: 3, rejected: 0 });
        assert_eq!(
            runner.controller().stack(),
            &[Screen::Calendar, Screen::DailyView]
        );
        assert!(runner.controller().phase().is_idle());
    }

    #[test]
    fn test_rejected_lines_are_reported() {
        let script = "navigate home\nfocus on\nnavigate calendar\nfocus on\nbogus\n";
        let mut runner = ScriptRunner::new(ControllerOptions::default());
        let mut out = Vec::new();
        let report = runner.run(script.as_bytes(), &mut out).unwrap();
        assert_eq!(report.rejected, 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("line 4:"));
        assert!(text.contains("line 5: Unknown command: bogus"));
    }

    #[test]
    fn test_show_prints_json() {
        let mut runner = ScriptRunner::new(ControllerOptions::default());
        let mut out = Vec::new();
        runner.run("show\nquit\nnavigate home\n".as_bytes(), &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["active"], "welcome");
        assert_eq!(value["activeDate"], "2020-06-04");
        // quit stops before the navigation
        assert_eq!(runner.controller().active(), Screen::Welcome);
    }
}
