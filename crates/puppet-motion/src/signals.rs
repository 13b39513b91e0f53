//! Synthetic signals - life-like motion for channels without gestures
//!
//! While a gesture drives the head, the remaining channels are synthesized
//! every tick:
//! - Mouth: a fast oscillator approximates speech, mouth distance follows it
//!   with random jitter
//! - Eyes: random blinks that close both eyes for a few ticks
//! - Gaze: slow circular drift
//! - Hair: independent sway oscillators
//!
//! The random source is injected, so a fixed seed replays the same blinks
//! and jitter.

use puppet_core::{Channel, Frame};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Oscillator waveform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wave {
    Sine,
    Cosine,
}

/// `offset + amplitude * wave(frequency * t)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub offset: f64,
    pub amplitude: f64,
    /// Angular frequency in radians per second
    pub frequency: f64,
    pub wave: Wave,
}

impl Oscillator {
    pub const fn sine(offset: f64, amplitude: f64, frequency: f64) -> Self {
        Oscillator {
            offset,
            amplitude,
            frequency,
            wave: Wave::Sine,
        }
    }

    pub const fn cosine(offset: f64, amplitude: f64, frequency: f64) -> Self {
        Oscillator {
            offset,
            amplitude,
            frequency,
            wave: Wave::Cosine,
        }
    }

    /// Value at `t` seconds
    pub fn sample(&self, t: f64) -> f64 {
        let phase = self.frequency * t;
        let wave = match self.wave {
            Wave::Sine => phase.sin(),
            Wave::Cosine => phase.cos(),
        };
        self.offset + self.amplitude * wave
    }
}

/// Synthetic signal configuration
#[derive(Debug, Clone, PartialEq)]
pub struct SignalConfig {
    /// Mouth aspect ratio while talking
    pub speech: Oscillator,

    /// Mouth distance per unit of mouth aspect ratio
    pub mouth_distance_scale: f64,

    /// Mouth distance jitter (uniform in ±jitter)
    pub mouth_jitter: f64,

    /// Chance per tick that a blink starts
    pub blink_probability: f64,

    /// Extra ticks the eyes stay closed after the blink tick
    pub blink_hold_ticks: u32,

    /// Eye aspect ratio when open
    pub eye_open: f64,

    /// Eye aspect ratio when closed
    pub eye_closed: f64,

    /// Horizontal gaze ratio (both eyes)
    pub gaze_x: Oscillator,

    /// Vertical gaze ratio (both eyes)
    pub gaze_y: Oscillator,

    /// Hair sway, in `Channel::HAIR` order
    pub hair: [Oscillator; 5],
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            speech: Oscillator::sine(0.5, 0.5, 20.0),
            mouth_distance_scale: 50.0,
            mouth_jitter: 1.0,
            blink_probability: 0.01,
            blink_hold_ticks: 5,
            eye_open: 1.0,
            eye_closed: 0.0,
            gaze_x: Oscillator::sine(0.5, 0.1, 0.5),
            gaze_y: Oscillator::cosine(0.5, 0.1, 0.5),
            hair: [
                Oscillator::sine(0.0, 0.5, 2.0),  // ahoge
                Oscillator::sine(0.0, 0.2, 2.5),  // front
                Oscillator::sine(0.0, 0.4, 3.0),  // side
                Oscillator::sine(0.0, 0.1, 1.5),  // back
                Oscillator::sine(0.0, 0.2, 3.5),  // sideup
            ],
        }
    }
}

impl SignalConfig {
    /// Still avatar: mouth closed, no blinks, no jitter, no sway
    pub fn still() -> Self {
        let flat = Oscillator::sine(0.0, 0.0, 0.0);
        Self {
            speech: flat,
            mouth_jitter: 0.0,
            blink_probability: 0.0,
            gaze_x: Oscillator::sine(0.5, 0.0, 0.0),
            gaze_y: Oscillator::sine(0.5, 0.0, 0.0),
            hair: [flat; 5],
            ..Self::default()
        }
    }
}

/// Generator for the non-gesture channels
#[derive(Debug)]
pub struct SyntheticSignals<R = StdRng> {
    config: SignalConfig,
    rng: R,
    /// Remaining closed-eye ticks of the current blink
    blink_hold: u32,
}

impl SyntheticSignals<StdRng> {
    /// Deterministic generator
    pub fn with_seed(config: SignalConfig, seed: u64) -> Self {
        Self::new(config, StdRng::seed_from_u64(seed))
    }

    /// Generator seeded from the OS
    pub fn from_entropy(config: SignalConfig) -> Self {
        Self::new(config, StdRng::from_entropy())
    }
}

impl<R: Rng> SyntheticSignals<R> {
    pub fn new(config: SignalConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            blink_hold: 0,
        }
    }

    /// Write this tick's targets for every non-head channel
    pub fn fill(&mut self, t: f64, targets: &mut Frame) {
        let mar = self.config.speech.sample(t);
        targets.set(Channel::Mar, mar);
        targets.set(Channel::MouthDistance, self.mouth_distance(mar));

        let ear = self.blink();
        targets.set(Channel::EarLeft, ear);
        targets.set(Channel::EarRight, ear);

        let x = self.config.gaze_x.sample(t);
        let y = self.config.gaze_y.sample(t);
        targets.set(Channel::XRatioLeft, x);
        targets.set(Channel::YRatioLeft, y);
        targets.set(Channel::XRatioRight, x);
        targets.set(Channel::YRatioRight, y);

        for (channel, oscillator) in Channel::HAIR.iter().zip(&self.config.hair) {
            targets.set(*channel, oscillator.sample(t));
        }
    }

    /// Eye aspect ratio for this tick
    ///
    /// A started blink keeps the eyes shut for `blink_hold_ticks` more ticks;
    /// no new blink can start until it ends.
    pub fn blink(&mut self) -> f64 {
        if self.blink_hold > 0 {
            self.blink_hold -= 1;
            return self.config.eye_closed;
        }

        if self.rng.gen::<f64>() < self.config.blink_probability {
            self.blink_hold = self.config.blink_hold_ticks;
            return self.config.eye_closed;
        }

        self.config.eye_open
    }

    /// Is a blink in progress?
    pub fn is_blinking(&self) -> bool {
        self.blink_hold > 0
    }

    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    fn mouth_distance(&mut self, mar: f64) -> f64 {
        let jitter = self.config.mouth_jitter;
        let noise = if jitter > 0.0 {
            self.rng.gen_range(-jitter..=jitter)
        } else {
            0.0
        };
        mar * self.config.mouth_distance_scale + noise
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(signals: &mut SyntheticSignals, ticks: usize) -> Vec<Frame> {
        (0..ticks)
            .map(|i| {
                let mut frame = Frame::zero();
                signals.fill(i as f64 / 60.0, &mut frame);
                frame
            })
            .collect()
    }

    #[test]
    fn test_same_seed_same_signals() {
        let mut a = SyntheticSignals::with_seed(SignalConfig::default(), 7);
        let mut b = SyntheticSignals::with_seed(SignalConfig::default(), 7);
        assert_eq!(run(&mut a, 600), run(&mut b, 600));
    }

    #[test]
    fn test_oscillators() {
        let speech = Oscillator::sine(0.5, 0.5, 20.0);
        assert_eq!(speech.sample(0.0), 0.5);
        assert!((speech.sample(std::f64::consts::PI / 40.0) - 1.0).abs() < 1e-12);

        let gaze_y = Oscillator::cosine(0.5, 0.1, 0.5);
        assert!((gaze_y.sample(0.0) - 0.6).abs() < 1e-12);
    }

    #[test]
    fn test_signal_ranges() {
        let mut signals = SyntheticSignals::with_seed(SignalConfig::default(), 42);
        for frame in run(&mut signals, 3000) {
            let mar = frame.get(Channel::Mar);
            assert!((0.0..=1.0).contains(&mar));

            let distance = frame.get(Channel::MouthDistance);
            assert!((distance - mar * 50.0).abs() <= 1.0);

            let ear = frame.get(Channel::EarLeft);
            assert!(ear == 0.0 || ear == 1.0);
            assert_eq!(ear, frame.get(Channel::EarRight));

            assert_eq!(frame.get(Channel::XRatioLeft), frame.get(Channel::XRatioRight));
            assert!(frame.get(Channel::Ahoge).abs() <= 0.5);
            assert!(frame.get(Channel::Back).abs() <= 0.1);

            // Head channels are left alone
            assert_eq!(frame.head(), [0.0, 0.0, 0.0]);
        }
    }

    #[test]
    fn test_blink_holds_eyes_closed() {
        let config = SignalConfig {
            blink_probability: 1.0,
            blink_hold_ticks: 5,
            ..SignalConfig::default()
        };
        let mut signals = SyntheticSignals::with_seed(config, 1);

        // Blink tick plus five held ticks, then a new blink starts right away
        for _ in 0..6 {
            assert_eq!(signals.blink(), 0.0);
        }
        assert!(!signals.is_blinking());
        assert_eq!(signals.blink(), 0.0);
        assert!(signals.is_blinking());
    }

    #[test]
    fn test_blink_runs_are_at_least_six_ticks() {
        let config = SignalConfig {
            blink_probability: 0.05,
            ..SignalConfig::default()
        };
        let mut signals = SyntheticSignals::with_seed(config, 99);
        let ears: Vec<f64> = (0..5000).map(|_| signals.blink()).collect();

        let mut run = 0;
        let mut blinks = 0;
        for ear in ears.iter().chain(std::iter::once(&1.0)) {
            if *ear == 0.0 {
                run += 1;
            } else {
                if run > 0 {
                    assert!(run >= 6, "blink lasted {run} ticks");
                    blinks += 1;
                }
                run = 0;
            }
        }
        assert!(blinks > 0);
    }

    #[test]
    fn test_never_blinks_with_zero_probability() {
        let mut signals = SyntheticSignals::with_seed(SignalConfig::still(), 3);
        assert!((0..1000).all(|_| signals.blink() == 1.0));
    }

    #[test]
    fn test_still_config() {
        let mut signals = SyntheticSignals::with_seed(SignalConfig::still(), 0);
        let mut frame = Frame::zero();
        signals.fill(12.3, &mut frame);

        assert_eq!(frame.get(Channel::Mar), 0.0);
        assert_eq!(frame.get(Channel::MouthDistance), 0.0);
        assert_eq!(frame.get(Channel::EarLeft), 1.0);
        assert_eq!(frame.get(Channel::YRatioRight), 0.5);
        assert_eq!(frame.get(Channel::SideUp), 0.0);
    }
}
