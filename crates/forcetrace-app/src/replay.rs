//! Replaying recorded input through the engine.
//!
//! A replay log is JSON lines, one [`ReplayStep`] per line:
//!
//! ```text
//! {"type":"pointer","time_ms":0,"action":"down","position":{"x":10.0,"y":10.0},"pressure":0.5}
//! {"type":"toggle_erase"}
//! {"type":"erase","action":"down","position":{"x":10.0,"y":10.0},"radius":8.0}
//! ```

use crate::{AppError, AppResult};
use forcetrace_core::{EngineConfig, ManualClock, PointerEvent, StylusEngine};
use serde::{Deserialize, Serialize};

/// One recorded host interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReplayStep {
    /// Drawing event at a host timestamp.
    Pointer {
        time_ms: i64,
        #[serde(flatten)]
        event: PointerEvent,
    },
    /// Erasing event, with the configured radius unless one is given.
    Erase {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        radius: Option<f64>,
        #[serde(flatten)]
        event: PointerEvent,
    },
    Undo,
    Redo,
    Clear,
    ToggleErase,
    /// Canvas edge length changed.
    Resize { total_size: f64 },
}

/// Parse a JSON-lines replay log. Blank lines are ignored.
pub fn parse_log(text: &str) -> AppResult<Vec<ReplayStep>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str(line).map_err(|e| AppError::Replay {
                line: index + 1,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Counts of what the engine did with a replay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub handled: usize,
    pub ignored: usize,
}

/// Engine driven by recorded timestamps instead of the wall clock.
#[derive(Debug)]
pub struct Replayer {
    engine: StylusEngine<ManualClock>,
    clock: ManualClock,
    stats: ReplayStats,
}

impl Replayer {
    pub fn new(config: EngineConfig) -> Self {
        let clock = ManualClock::new(0);
        Self {
            engine: StylusEngine::with_clock(config, clock.clone()),
            clock,
            stats: ReplayStats::default(),
        }
    }

    pub fn engine(&self) -> &StylusEngine<ManualClock> {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut StylusEngine<ManualClock> {
        &mut self.engine
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    /// Apply one step.
    pub fn apply(&mut self, step: &ReplayStep) {
        let handled = match step {
            ReplayStep::Pointer { time_ms, event } => {
                self.clock.set(*time_ms);
                self.engine.record(event)
            }
            ReplayStep::Erase { radius, event } => match radius {
                Some(radius) => self.engine.erase_at(event, *radius),
                None => self.engine.erase(event),
            },
            ReplayStep::Undo => {
                self.engine.undo();
                true
            }
            ReplayStep::Redo => {
                self.engine.redo();
                true
            }
            ReplayStep::Clear => {
                self.engine.clear();
                true
            }
            ReplayStep::ToggleErase => {
                self.engine.toggle_erase();
                true
            }
            ReplayStep::Resize { total_size } => {
                self.engine.set_total_size(*total_size);
                true
            }
        };

        if handled {
            self.stats.handled += 1;
        } else {
            log::debug!("Replay step not handled: {:?}", step);
            self.stats.ignored += 1;
        }
    }

    /// Apply every step in order.
    pub fn run<'a>(&mut self, steps: impl IntoIterator<Item = &'a ReplayStep>) -> ReplayStats {
        for step in steps {
            self.apply(step);
        }
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forcetrace_core::PointerAction;

    const LOG: &str = r#"
{"type":"resize","total_size":100.0}
{"type":"pointer","time_ms":1000,"action":"down","position":{"x":10.0,"y":10.0},"pressure":0.5}
{"type":"pointer","time_ms":1016,"action":"move","position":{"x":20.0,"y":20.0},"pressure":0.6}
{"type":"pointer","time_ms":1040,"action":"up","position":{"x":25.0,"y":25.0},"pressure":0.7}
{"type":"pointer","time_ms":1100,"action":"hover","position":{"x":0.0,"y":0.0}}
"#;

    #[test]
    fn test_parse_log() {
        let steps = parse_log(LOG).unwrap();
        assert_eq!(steps.len(), 5);
        assert_eq!(steps[0], ReplayStep::Resize { total_size: 100.0 });
        match &steps[1] {
            ReplayStep::Pointer { time_ms, event } => {
                assert_eq!(*time_ms, 1000);
                assert_eq!(event.action, PointerAction::Down);
            }
            other => panic!("Wrong step: {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_line() {
        let err = parse_log("{\"type\":\"undo\"}\n\nnot json").unwrap_err();
        assert!(matches!(err, AppError::Replay { line: 3, .. }));
    }

    #[test]
    fn test_replay_uses_recorded_time() {
        let steps = parse_log(LOG).unwrap();
        let mut replayer = Replayer::new(EngineConfig::default());
        let stats = replayer.run(&steps);

        assert_eq!(stats, ReplayStats { handled: 4, ignored: 1 });
        let times: Vec<i64> = replayer.engine().points().iter().map(|p| p.t()).collect();
        assert_eq!(times, vec![0, 16, 40]);
        assert_eq!(
            replayer.engine().export_current().unwrap(),
            "t,pos_x,pos_y,force\n0,0.1,0.1,0.5\n16,0.2,0.2,0.6\n40,0.25,0.25,0.7"
        );
    }

    #[test]
    fn test_replay_erase_and_undo() {
        let mut steps = parse_log(LOG).unwrap();
        steps.extend(
            parse_log(
                r#"{"type":"toggle_erase"}
{"type":"erase","action":"down","position":{"x":10.0,"y":10.0},"radius":2.0}
{"type":"erase","action":"up","position":{"x":10.0,"y":10.0}}
{"type":"undo"}"#,
            )
            .unwrap(),
        );

        let mut replayer = Replayer::new(EngineConfig::default());
        replayer.run(&steps);

        assert_eq!(replayer.engine().points().len(), 3);
        assert!(replayer.engine().can_redo());
        replayer.engine_mut().redo();
        assert_eq!(replayer.engine().points().len(), 2);
    }

    #[test]
    fn test_step_serialize() {
        let json = serde_json::to_string(&ReplayStep::ToggleErase).unwrap();
        assert_eq!(json, r#"{"type":"toggle_erase"}"#);
    }
}
