//! Progress to the pair of items currently being interpolated.

/// The two items a progress value sits between.
///
/// `fraction` is always in `[0, 1)`. At an exact integer both indices are
/// equal and `fraction` is 0.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ActivePair {
    pub active_index: i64,
    pub next_index: i64,
    pub fraction: f32,
}

impl ActivePair {
    /// Resting exactly on `index`.
    pub fn at(index: i64) -> Self {
        Self {
            active_index: index,
            next_index: index,
            fraction: 0.0,
        }
    }

    pub fn is_settled(&self) -> bool {
        self.fraction == 0.0
    }

    /// Progress this pair was resolved from.
    pub fn progress(&self) -> f32 {
        self.active_index as f32 + self.fraction
    }

    /// The index closest to the current position.
    pub fn nearest_index(&self) -> i64 {
        if self.fraction >= 0.5 {
            self.next_index
        } else {
            self.active_index
        }
    }
}

/// Splits `progress` into `floor`, `ceil` and the fraction in between.
///
/// Pure arithmetic with no bounds checking. Non-finite input resolves as 0.
pub fn resolve(progress: f32) -> ActivePair {
    if !progress.is_finite() {
        return ActivePair::default();
    }
    let floor = progress.floor();
    let fraction = progress - floor;
    let active_index = floor as i64;
    // `-1e-9 - (-1.0)` rounds to exactly 1.0 in f32.
    if fraction >= 1.0 {
        return ActivePair::at(active_index + 1);
    }
    if fraction == 0.0 {
        return ActivePair::at(active_index);
    }
    ActivePair {
        active_index,
        next_index: active_index + 1,
        fraction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fraction_between_items() {
        let pair = resolve(1.5);
        assert_eq!(pair.active_index, 1);
        assert_eq!(pair.next_index, 2);
        assert_eq!(pair.fraction, 0.5);
    }

    #[test]
    fn integral_progress_has_no_next_item() {
        for index in [-3, 0, 1, 7] {
            let pair = resolve(index as f32);
            assert_eq!(pair, ActivePair::at(index));
        }
    }

    #[test]
    fn negative_progress_floors() {
        let pair = resolve(-0.25);
        assert_eq!(pair.active_index, -1);
        assert_eq!(pair.next_index, 0);
        assert!((pair.fraction - 0.75).abs() < 1e-6);
    }

    #[test]
    fn rounding_to_one_is_normalised() {
        let pair = resolve(-1e-9);
        assert_eq!(pair, ActivePair::at(0));
    }

    #[test]
    fn fraction_is_always_in_unit_range() {
        let mut progress = -50.0f32;
        while progress < 50.0 {
            let pair = resolve(progress);
            assert!((0.0..1.0).contains(&pair.fraction), "{progress}: {pair:?}");
            assert!(pair.next_index - pair.active_index <= 1);
            progress += 0.037;
        }
        for progress in [f32::MIN_POSITIVE, -f32::MIN_POSITIVE, 1e7, -1e7, 0.999_999_9] {
            assert!((0.0..1.0).contains(&resolve(progress).fraction));
        }
    }

    #[test]
    fn non_finite_progress_resolves_as_zero() {
        assert_eq!(resolve(f32::NAN), ActivePair::at(0));
        assert_eq!(resolve(f32::NEG_INFINITY), ActivePair::at(0));
    }

    #[test]
    fn nearest_index_rounds_half_up() {
        assert_eq!(resolve(2.49).nearest_index(), 2);
        assert_eq!(resolve(2.5).nearest_index(), 3);
    }
}
