use crate::error::{CatsError, CatsResult};
use crate::scoring::{accuracy, wpm};
use std::time::Instant;

/// Source of elapsed time for a typing round
pub trait Stopwatch {
    fn start(&mut self);
    /// Seconds since `start`, or `None` if never started
    fn elapsed_secs(&self) -> Option<f64>;
}

/// Production stopwatch backed by the monotonic clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemStopwatch {
    started_at: Option<Instant>,
}

impl SystemStopwatch {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Stopwatch for SystemStopwatch {
    fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    fn elapsed_secs(&self) -> Option<f64> {
        self.started_at.map(|t| t.elapsed().as_secs_f64())
    }
}

/// Test stopwatch that always reports the same duration once started
#[derive(Debug, Clone, Copy)]
pub struct FixedStopwatch {
    secs: f64,
    started: bool,
}

impl FixedStopwatch {
    pub fn new(secs: f64) -> Self {
        Self {
            secs,
            started: false,
        }
    }
}

impl Stopwatch for FixedStopwatch {
    fn start(&mut self) {
        self.started = true;
    }

    fn elapsed_secs(&self) -> Option<f64> {
        self.started.then_some(self.secs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionResult {
    pub wpm: f64,
    pub accuracy: f64,
    pub elapsed_secs: f64,
}

/// One reference paragraph being typed against a stopwatch
#[derive(Debug)]
pub struct TypingSession<S: Stopwatch> {
    pub reference: String,
    stopwatch: S,
}

impl<S: Stopwatch> TypingSession<S> {
    pub fn new(reference: impl Into<String>, stopwatch: S) -> Self {
        Self {
            reference: reference.into(),
            stopwatch,
        }
    }

    pub fn start(&mut self) {
        self.stopwatch.start();
    }

    pub fn finish(&self, typed: &str) -> CatsResult<SessionResult> {
        let elapsed_secs = self
            .stopwatch
            .elapsed_secs()
            .ok_or(CatsError::SessionNotStarted)?;
        Ok(SessionResult {
            wpm: wpm(typed, elapsed_secs)?,
            accuracy: accuracy(typed, &self.reference),
            elapsed_secs,
        })
    }
}
