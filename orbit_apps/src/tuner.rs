//! Guitar tuner logic: the standard-tuning string table, pitch detection
//! from raw mono samples, and the in-tune verdict bands.
//!
//! Detection is autocorrelation over the guitar's fundamental range with a
//! volume gate in front, so silence and room noise read as "no pitch"
//! rather than a random frequency.

/// One guitar string of the standard tuning.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GuitarString {
    pub name: &'static str,
    pub frequency: f32,
}

/// Standard tuning, low to high.
pub const STANDARD_TUNING: [GuitarString; 6] = [
    GuitarString { name: "E (6th)", frequency: 82.41 },
    GuitarString { name: "A (5th)", frequency: 110.00 },
    GuitarString { name: "D (4th)", frequency: 146.83 },
    GuitarString { name: "G (3rd)", frequency: 196.00 },
    GuitarString { name: "B (2nd)", frequency: 246.94 },
    GuitarString { name: "E (1st)", frequency: 329.63 },
];

/// RMS below which a window counts as silence.
const VOLUME_GATE: f32 = 1e-3;

/// Fundamental search range, generous around the open strings.
const MIN_FREQ: f32 = 60.0;
const MAX_FREQ: f32 = 400.0;

/// How far off a detected pitch may be and still count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Within 1 Hz of the target.
    InTune,
    /// Within 5 Hz.
    Close,
    Off,
}

/// Classify a detected frequency against one string's target.
pub fn verdict(target: GuitarString, frequency: f32) -> Verdict {
    let diff = (target.frequency - frequency).abs();
    if diff < 1.0 {
        Verdict::InTune
    } else if diff < 5.0 {
        Verdict::Close
    } else {
        Verdict::Off
    }
}

/// Index of the string whose target frequency is nearest to `frequency`.
pub fn closest_string(frequency: f32) -> usize {
    STANDARD_TUNING
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| {
            let da = (a.frequency - frequency).abs();
            let db = (b.frequency - frequency).abs();
            da.total_cmp(&db)
        })
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Detect the fundamental of a mono sample window.
///
/// Returns `None` when the window is too short for the search range or
/// quieter than the volume gate — both normal conditions, not errors.
pub fn detect_pitch(samples: &[f32], sample_rate: u32) -> Option<f32> {
    let rate = sample_rate as f32;
    let min_lag = (rate / MAX_FREQ) as usize;
    let max_lag = (rate / MIN_FREQ) as usize;
    if samples.len() < max_lag * 2 || min_lag == 0 {
        return None;
    }

    let rms = (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt();
    if rms < VOLUME_GATE {
        return None;
    }

    // Autocorrelation over a fixed window so scores are comparable
    // across lags.
    let window = samples.len() - max_lag;
    let score = |lag: usize| -> f32 {
        (0..window).map(|i| samples[i] * samples[i + lag]).sum()
    };

    let mut best_lag = min_lag;
    let mut best = f32::MIN;
    for lag in min_lag..=max_lag {
        let s = score(lag);
        if s > best {
            best = s;
            best_lag = lag;
        }
    }

    // Parabolic interpolation around the peak for sub-lag resolution.
    let lag = if best_lag > min_lag && best_lag < max_lag {
        let (a, b, c) = (
            score(best_lag - 1),
            best,
            score(best_lag + 1),
        );
        let denom = a - 2.0 * b + c;
        let delta = if denom.abs() > f32::EPSILON {
            (0.5 * (a - c) / denom).clamp(-0.5, 0.5)
        } else {
            0.0
        };
        best_lag as f32 + delta
    } else {
        best_lag as f32
    };

    Some(rate / lag)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::TAU;

    fn sine(freq: f32, rate: u32, len: usize, amp: f32) -> Vec<f32> {
        (0..len)
            .map(|i| amp * (TAU * freq * i as f32 / rate as f32).sin())
            .collect()
    }

    #[test]
    fn detects_open_a_string() {
        let samples = sine(110.0, 44_100, 4096, 0.5);
        let f = detect_pitch(&samples, 44_100).expect("pitch");
        assert!((f - 110.0).abs() < 1.0, "detected {}", f);
    }

    #[test]
    fn detects_high_e_string() {
        let samples = sine(329.63, 44_100, 4096, 0.5);
        let f = detect_pitch(&samples, 44_100).expect("pitch");
        assert!((f - 329.63).abs() < 3.0, "detected {}", f);
    }

    #[test]
    fn silence_is_gated() {
        let samples = vec![0.0; 4096];
        assert_eq!(detect_pitch(&samples, 44_100), None);
    }

    #[test]
    fn near_silence_is_gated() {
        let samples = sine(110.0, 44_100, 4096, 1e-4);
        assert_eq!(detect_pitch(&samples, 44_100), None);
    }

    #[test]
    fn short_window_is_rejected() {
        let samples = sine(110.0, 44_100, 512, 0.5);
        assert_eq!(detect_pitch(&samples, 44_100), None);
    }

    #[test]
    fn closest_string_matches_each_target() {
        for (i, s) in STANDARD_TUNING.iter().enumerate() {
            assert_eq!(closest_string(s.frequency), i);
        }
        assert_eq!(closest_string(105.0), 1); // near A
        assert_eq!(closest_string(90.0), 0); // near low E
    }

    #[test]
    fn verdict_bands() {
        let a = STANDARD_TUNING[1];
        assert_eq!(verdict(a, 110.5), Verdict::InTune);
        assert_eq!(verdict(a, 113.0), Verdict::Close);
        assert_eq!(verdict(a, 120.0), Verdict::Off);
    }
}
