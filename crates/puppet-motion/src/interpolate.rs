//! Interpolator - linear value ramps at the frame rate
//!
//! A ramp holds one value per frame. It starts at `from` and steps toward
//! `to` without ever emitting `to` itself: the final element is one step
//! short of the target. A duration too short to yield a single frame
//! produces the one-element ramp `[to]`, which turns zero and negative
//! durations into a snap.
//!
//! Ramps are computed on demand: only the endpoints and step are stored.

use puppet_core::{frame_count, FRAME_RATE};

/// Never-empty linear value sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// First element
    start: f64,
    /// Difference between consecutive elements
    step: f64,
    /// Number of elements (at least 1)
    len: usize,
}

/// Interpolate from `from` toward `to` over `duration_secs` at `rate` samples per second
pub fn interpolate(from: f64, to: f64, duration_secs: f64, rate: f64) -> Ramp {
    let steps = frame_count(duration_secs, rate);
    if steps == 0 {
        return Ramp::constant(to);
    }

    Ramp {
        start: from,
        step: (to - from) / steps as f64,
        len: steps,
    }
}

/// Interpolate at the standard 60 Hz frame rate
pub fn interpolate_frames(from: f64, to: f64, duration_secs: f64) -> Ramp {
    interpolate(from, to, duration_secs, FRAME_RATE)
}

impl Ramp {
    /// Single-element ramp holding `value`
    pub fn constant(value: f64) -> Self {
        Ramp {
            start: value,
            step: 0.0,
            len: 1,
        }
    }

    /// Number of elements
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Ramps always hold at least one element
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Element `index`, if in range
    pub fn get(&self, index: usize) -> Option<f64> {
        (index < self.len).then(|| self.value(index))
    }

    /// Element `index`, clamped to the last element
    pub fn get_clamped(&self, index: usize) -> f64 {
        self.value(index.min(self.len - 1))
    }

    pub fn first(&self) -> f64 {
        self.start
    }

    pub fn last(&self) -> f64 {
        self.value(self.len - 1)
    }

    /// Constant difference between consecutive elements
    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn iter(&self) -> RampIter {
        RampIter {
            ramp: *self,
            next: 0,
        }
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }

    #[inline]
    fn value(&self, index: usize) -> f64 {
        self.start + index as f64 * self.step
    }
}

impl IntoIterator for Ramp {
    type Item = f64;
    type IntoIter = RampIter;

    fn into_iter(self) -> RampIter {
        self.iter()
    }
}

/// Iterator over a ramp's elements
#[derive(Debug, Clone)]
pub struct RampIter {
    ramp: Ramp,
    next: usize,
}

impl Iterator for RampIter {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let value = self.ramp.get(self.next)?;
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ramp.len.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RampIter {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_two_second_ramp() {
        let ramp = interpolate_frames(0.0, 10.0, 2.0);

        assert_eq!(ramp.len(), 120);
        assert_eq!(ramp.first(), 0.0);
        assert!((ramp.step() - 10.0 / 120.0).abs() < 1e-12);
        // Target is never emitted
        assert!(ramp.last() < 10.0);
        assert!((ramp.last() - 119.0 * 10.0 / 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_descending_ramp() {
        let ramp = interpolate(5.0, -5.0, 1.0, 10.0);
        assert_eq!(ramp.to_vec().len(), 10);
        assert_eq!(ramp.get(0), Some(5.0));
        assert_eq!(ramp.get(5), Some(0.0));
        assert_eq!(ramp.get(10), None);
        assert!(ramp.iter().zip(ramp.iter().skip(1)).all(|(a, b)| b < a));
    }

    #[test]
    fn test_zero_duration_snaps() {
        assert_eq!(interpolate_frames(1.0, 4.0, 0.0).to_vec(), vec![4.0]);
        assert_eq!(interpolate_frames(1.0, 4.0, -2.0).to_vec(), vec![4.0]);
        assert_eq!(interpolate_frames(1.0, 4.0, 0.01).to_vec(), vec![4.0]);
        assert_eq!(interpolate_frames(1.0, 4.0, f64::NAN).to_vec(), vec![4.0]);
    }

    #[test]
    fn test_clamped_access() {
        let ramp = interpolate(0.0, 3.0, 3.0, 1.0);
        assert_eq!(ramp.to_vec(), vec![0.0, 1.0, 2.0]);
        assert_eq!(ramp.get_clamped(2), 2.0);
        assert_eq!(ramp.get_clamped(500), 2.0);
        assert_eq!(Ramp::constant(9.0).get_clamped(7), 9.0);
    }

    #[test]
    fn test_iter_exact_size() {
        let ramp = interpolate_frames(0.0, 1.0, 0.5);
        let mut iter = ramp.iter();
        assert_eq!(iter.len(), 30);
        iter.next();
        assert_eq!(iter.len(), 29);
        assert_eq!(ramp.into_iter().count(), 30);
    }

    proptest! {
        #[test]
        fn prop_length_and_constant_step(
            from in -180.0f64..180.0,
            to in -180.0f64..180.0,
            duration in 0.02f64..30.0,
        ) {
            let ramp = interpolate_frames(from, to, duration);
            let expected_len = (duration * 60.0).floor() as usize;
            prop_assert_eq!(ramp.len(), expected_len);

            let step = (to - from) / expected_len as f64;
            prop_assert_eq!(ramp.first(), from);
            for (i, value) in ramp.iter().enumerate() {
                prop_assert!((value - (from + i as f64 * step)).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_sub_frame_duration_is_target(
            from in -180.0f64..180.0,
            to in -180.0f64..180.0,
            duration in -10.0f64..(1.0 / 60.0 - 1e-9),
        ) {
            prop_assert_eq!(interpolate_frames(from, to, duration).to_vec(), vec![to]);
        }
    }
}
