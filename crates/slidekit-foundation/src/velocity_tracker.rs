//! Release velocity from a stream of positions.
//!
//! Impulse strategy: treats each pair of samples as a push that adds kinetic
//! energy, which is far less sensitive to a single noisy sample than a plain
//! last-two-points slope.

use crate::PositionSample;

const HISTORY_SIZE: usize = 20;

/// Samples older than this (relative to the newest) are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct TimedPosition {
    time_ms: i64,
    position: f32,
}

/// One-dimensional velocity tracker over absolute positions.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<TimedPosition>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    pub fn add_position(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(TimedPosition { time_ms, position });
    }

    pub fn add_sample(&mut self, sample: &PositionSample) {
        self.add_position(sample.timestamp_millis(), sample.offset);
    }

    /// Velocity in units per second, or 0 with fewer than two recent samples.
    pub fn velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut times = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut cursor = self.newest;
        let mut previous = newest;

        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (sample.time_ms - previous.time_ms).abs();
            previous = sample;
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }

            positions[count] = sample.position;
            times[count] = -(age as f32);
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }
            cursor = (cursor + HISTORY_SIZE - 1) % HISTORY_SIZE;
        }

        if count < 2 {
            return 0.0;
        }
        impulse_velocity(&positions[..count], &times[..count]) * 1000.0
    }

    /// Velocity clamped to `±max_velocity`; non-finite results collapse to 0.
    pub fn velocity_capped(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.velocity();
        if !velocity.is_finite() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }

    /// Moves every stored position by `delta`, e.g. when the coordinate
    /// space is rebased mid-gesture. Timing is untouched.
    pub fn shift(&mut self, delta: f32) {
        for sample in self.samples.iter_mut().flatten() {
            sample.position += delta;
        }
    }

    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.newest = 0;
    }
}

/// `positions[0]` / `times[0]` is the newest sample; times are ≤ 0 ms.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;
    for i in (1..=oldest).rev() {
        let dt = times[i] - times[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }
    energy_to_velocity(work)
}

#[inline]
fn energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
