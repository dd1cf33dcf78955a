//! Test doubles shared by the task tests

use std::collections::VecDeque;
use std::string::String;
use std::vec::Vec;

use embassy_time::Timer;

use streetwise_core::config::ApplianceConfig;
use streetwise_core::scope::{AudioFrame, AUDIO_FRAME_LEN};
use streetwise_core::traits::{ArcSpec, DisplayDriver, DisplayError, Point};

use crate::tasks::{AudioError, AudioSource, KeySource, KeypadError, RawKeyEvent};

const EV_SYN: u16 = 0x00;
const EV_KEY: u16 = 0x01;

/// Defaults with timers short enough for real-time tests
pub fn short_config() -> ApplianceConfig {
    let mut config = ApplianceConfig::default();
    config.entry.timeout_ms = 50;
    config.fade.window_ms = 100;
    config
}

/// Something drawn on a [`RecordingDisplay`]
#[derive(Debug, Clone, PartialEq)]
pub enum Drawn {
    Clear,
    Text(String),
    Line(Point, Point),
    Arc(i32, i32),
}

/// Display that records what was drawn
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    pub drawn: Vec<Drawn>,
    pub flushes: usize,
    fail_init: bool,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    /// Nothing drawn since the last clear
    pub fn is_blank(&self) -> bool {
        match self.drawn.iter().rposition(|d| *d == Drawn::Clear) {
            Some(i) => i + 1 == self.drawn.len(),
            None => self.drawn.is_empty(),
        }
    }
}

impl DisplayDriver for RecordingDisplay {
    fn init(&mut self) -> Result<(), DisplayError> {
        if self.fail_init {
            Err(DisplayError::NotResponding)
        } else {
            Ok(())
        }
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.drawn.push(Drawn::Clear);
        Ok(())
    }

    fn draw_text(&mut self, text: &str) -> Result<(), DisplayError> {
        self.drawn.push(Drawn::Text(text.into()));
        Ok(())
    }

    fn draw_line(&mut self, from: Point, to: Point) -> Result<(), DisplayError> {
        self.drawn.push(Drawn::Line(from, to));
        Ok(())
    }

    fn draw_arc(&mut self, arc: &ArcSpec) -> Result<(), DisplayError> {
        self.drawn.push(Drawn::Arc(arc.start_deg, arc.sweep_deg));
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.flushes += 1;
        Ok(())
    }

    fn size(&self) -> (u32, u32) {
        (128, 64)
    }
}

/// One step of a keyboard script
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Pause before the next event
    Wait(u64),
    Event(RawKeyEvent),
}

/// Press and release of one key, each followed by a sync report
pub fn tap(code: u16) -> [Step; 4] {
    let syn = Step::Event(RawKeyEvent {
        ev_type: EV_SYN,
        code: 0,
        value: 0,
    });
    [
        Step::Event(RawKeyEvent {
            ev_type: EV_KEY,
            code,
            value: 1,
        }),
        syn,
        Step::Event(RawKeyEvent {
            ev_type: EV_KEY,
            code,
            value: 0,
        }),
        syn,
    ]
}

/// Keyboard that replays a script, then stays silent
pub struct ScriptedKeys {
    steps: VecDeque<Step>,
    available: bool,
}

impl ScriptedKeys {
    pub fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
            available: true,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            steps: VecDeque::new(),
            available: false,
        }
    }
}

impl KeySource for ScriptedKeys {
    async fn open(&mut self) -> Result<(), KeypadError> {
        if self.available {
            Ok(())
        } else {
            Err(KeypadError::Unavailable)
        }
    }

    async fn next_event(&mut self) -> Result<RawKeyEvent, KeypadError> {
        loop {
            match self.steps.pop_front() {
                Some(Step::Wait(ms)) => Timer::after_millis(ms).await,
                Some(Step::Event(event)) => return Ok(event),
                None => core::future::pending::<()>().await,
            }
        }
    }

    fn close(&mut self) {
        self.steps.clear();
    }
}

/// Microphone producing a fixed number of constant frames
pub struct ScriptedAudio {
    period_ms: u64,
    remaining: usize,
}

impl ScriptedAudio {
    pub fn new(period_ms: u64, frames: usize) -> Self {
        Self {
            period_ms,
            remaining: frames,
        }
    }
}

impl AudioSource for ScriptedAudio {
    async fn next_frame(&mut self) -> Result<AudioFrame, AudioError> {
        if self.remaining == 0 {
            return Err(AudioError::Closed);
        }
        self.remaining -= 1;
        Timer::after_millis(self.period_ms).await;

        let mut frame = AudioFrame::new();
        let _ = frame.resize(AUDIO_FRAME_LEN, 0.1);
        Ok(frame)
    }
}
