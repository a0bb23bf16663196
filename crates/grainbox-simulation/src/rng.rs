//! RNG trait abstraction for the grain simulation
//!
//! Every stochastic rule draws from a `GrainRng` passed in by the caller,
//! never from a global generator. This allows the simulation to run with:
//! - a seeded `rand` generator (normal runs)
//! - a `ReplayRng` fed a recorded sequence (bit-identical replays, tests)

/// Random feed consumed by grain rules
pub trait GrainRng {
    /// Generate a float in [0.0, 1.0)
    fn fract(&mut self) -> f64;

    /// True with probability `probability`
    fn chance(&mut self, probability: f64) -> bool {
        self.fract() < probability
    }

    /// Integer in `[min, max)`; returns `min` for an empty range
    fn int(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        // i64 so that bounds far apart cannot overflow
        let (min, max) = (i64::from(min), i64::from(max));
        let offset = (self.fract() * (max - min) as f64).floor() as i64;
        (min + offset).clamp(min, max - 1) as i32
    }
}

// Blanket implementation for any type implementing rand::Rng
impl<T: ?Sized + rand::Rng> GrainRng for T {
    fn fract(&mut self) -> f64 {
        rand::Rng::r#gen(self)
    }
}

/// Replays a fixed sequence of `fract` outputs, then a fallback value forever
#[derive(Clone, Debug)]
pub struct ReplayRng {
    values: Vec<f64>,
    cursor: usize,
    fallback: f64,
    consumed: usize,
}

impl ReplayRng {
    /// Replay `values`, then return 0.0 (every `chance` succeeds)
    ///
    /// Values are clamped into `[0.0, 1.0)`, the range `fract` promises.
    pub fn new(values: Vec<f64>) -> Self {
        Self {
            values: values.into_iter().map(clamp_fract).collect(),
            cursor: 0,
            fallback: 0.0,
            consumed: 0,
        }
    }

    /// Always return `value`
    pub fn constant(value: f64) -> Self {
        Self::new(Vec::new()).with_fallback(value)
    }

    /// Stub where every `chance(p)` with `p < 1` fails
    pub fn never() -> Self {
        Self::constant(1.0 - f64::EPSILON)
    }

    /// Stub where every `chance(p)` with `p > 0` succeeds
    pub fn always() -> Self {
        Self::constant(0.0)
    }

    pub fn with_fallback(mut self, fallback: f64) -> Self {
        self.fallback = clamp_fract(fallback);
        self
    }

    /// Total values handed out so far
    pub fn consumed(&self) -> usize {
        self.consumed
    }

    /// Recorded values not yet replayed
    pub fn remaining(&self) -> usize {
        self.values.len() - self.cursor
    }
}

fn clamp_fract(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0 - f64::EPSILON)
}

impl GrainRng for ReplayRng {
    fn fract(&mut self) -> f64 {
        self.consumed += 1;
        match self.values.get(self.cursor) {
            Some(&value) => {
                self.cursor += 1;
                value
            }
            None => self.fallback,
        }
    }
}

/// Wraps a feed and records every value it produces
#[derive(Clone, Debug)]
pub struct RecordingRng<R> {
    inner: R,
    recorded: Vec<f64>,
}

impl<R: GrainRng> RecordingRng<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            recorded: Vec::new(),
        }
    }

    pub fn recorded(&self) -> &[f64] {
        &self.recorded
    }

    /// A replay feed that reproduces this run exactly
    pub fn into_replay(self) -> ReplayRng {
        log::debug!("Recorded {} random draws for replay", self.recorded.len());
        ReplayRng::new(self.recorded)
    }
}

impl<R: GrainRng> GrainRng for RecordingRng<R> {
    fn fract(&mut self) -> f64 {
        let value = self.inner.fract();
        self.recorded.push(value);
        value
    }
}
