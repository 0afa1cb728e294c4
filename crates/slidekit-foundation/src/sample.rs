use web_time::Duration;

/// One reading from the position stream.
///
/// Samples carry no identity: only the most recent one matters, so they are
/// plain `Copy` values that the kernel reads and drops.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PositionSample {
    /// Scroll offset along the main axis. Positive = forward.
    pub offset: f32,
    /// Points per second, same sign convention as `offset`.
    pub velocity: f32,
    /// Monotonic time since the owning session started.
    pub timestamp: Duration,
}

impl PositionSample {
    pub fn new(offset: f32, velocity: f32, timestamp: Duration) -> Self {
        Self {
            offset,
            velocity,
            timestamp,
        }
    }

    /// A sample with no velocity information, stamped at time zero.
    pub fn at(offset: f32) -> Self {
        Self {
            offset,
            ..Self::default()
        }
    }

    pub fn with_offset(self, offset: f32) -> Self {
        Self { offset, ..self }
    }

    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.as_millis() as i64
    }
}
