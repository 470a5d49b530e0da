use serde::Deserialize;

const BASS_BINS: std::ops::Range<usize> = 0..10;
const MID_BINS: std::ops::Range<usize> = 10..50;
const HIGH_BINS: std::ops::Range<usize> = 50..128;

#[derive(Clone, Copy, Debug, Default, PartialEq, Deserialize)]
#[serde(from = "[f32; 4]")]
pub struct AudioEnvelope {
    pub bass: f32,
    pub mid: f32,
    pub high: f32,
    pub volume: f32,
}

impl From<[f32; 4]> for AudioEnvelope {
    fn from(value: [f32; 4]) -> Self {
        Self::new(value[0], value[1], value[2], value[3])
    }
}

impl AudioEnvelope {
    pub fn new(bass: f32, mid: f32, high: f32, volume: f32) -> Self {
        Self {
            bass: unit(bass),
            mid: unit(mid),
            high: unit(high),
            volume: unit(volume),
        }
    }

    pub const fn silent() -> Self {
        Self {
            bass: 0.0,
            mid: 0.0,
            high: 0.0,
            volume: 0.0,
        }
    }

    pub fn fallback(time: f32) -> Self {
        Self::new(
            0.5 + (time * 0.5).sin() * 0.3,
            0.3 + (time * 1.2).sin() * 0.2,
            0.2 + (time * 2.0).sin() * 0.1,
            0.1 + (time * 0.3).sin() * 0.05,
        )
    }

    pub fn from_spectrum(bins: &[u8]) -> Option<Self> {
        if bins.is_empty() {
            return None;
        }
        let bass = band_average(bins, BASS_BINS);
        let mid = band_average(bins, MID_BINS);
        let high = band_average(bins, HIGH_BINS);
        let volume = (bass + mid + high) / 3.0;
        Some(Self::new(
            bass / 255.0,
            mid / 255.0,
            high / 255.0,
            volume / 255.0,
        ))
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.bass, self.mid, self.high, self.volume]
    }
}

fn unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn band_average(bins: &[u8], range: std::ops::Range<usize>) -> f32 {
    let end = range.end.min(bins.len());
    if range.start >= end {
        return 0.0;
    }
    let sum: u32 = bins[range.start..end].iter().map(|&bin| bin as u32).sum();
    sum as f32 / (end - range.start) as f32
}

// The first update snaps to its target; later ones ease toward theirs.
#[derive(Clone, Copy, Debug)]
pub struct EnvelopeFollower {
    alpha: f32,
    current: Option<AudioEnvelope>,
}

impl Default for EnvelopeFollower {
    fn default() -> Self {
        Self::new(0.25)
    }
}

impl EnvelopeFollower {
    pub fn new(alpha: f32) -> Self {
        Self {
            alpha: alpha.clamp(0.0, 1.0),
            current: None,
        }
    }

    pub fn current(&self) -> AudioEnvelope {
        self.current.unwrap_or_else(AudioEnvelope::silent)
    }

    pub fn update(&mut self, target: AudioEnvelope) -> AudioEnvelope {
        let next = match self.current {
            None => target,
            Some(current) => {
                let a = self.alpha;
                let follow = |current: f32, target: f32| current + ((target - current) * a);
                AudioEnvelope::new(
                    follow(current.bass, target.bass),
                    follow(current.mid, target.mid),
                    follow(current.high, target.high),
                    follow(current.volume, target.volume),
                )
            }
        };
        self.current = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_out_of_range_bands() {
        let envelope = AudioEnvelope::new(-0.5, 1.5, f32::NAN, 0.25);
        assert_eq!(envelope.to_array(), [0.0, 1.0, 0.0, 0.25]);
    }

    #[test]
    fn fallback_is_deterministic_and_bounded() {
        for step in 0..100 {
            let t = step as f32 * 0.37;
            let a = AudioEnvelope::fallback(t);
            let b = AudioEnvelope::fallback(t);
            assert_eq!(a, b);
            for band in a.to_array() {
                assert!((0.0..=1.0).contains(&band));
            }
        }
        let start = AudioEnvelope::fallback(0.0);
        assert_eq!(start.to_array(), [0.5, 0.3, 0.2, 0.1]);
    }

    #[test]
    fn spectrum_bands_average_their_bins() {
        let mut bins = vec![0u8; 256];
        bins[..10].fill(255);
        bins[10..50].fill(51);
        let envelope = AudioEnvelope::from_spectrum(&bins).unwrap();
        assert!((envelope.bass - 1.0).abs() < 1e-6);
        assert!((envelope.mid - 0.2).abs() < 1e-6);
        assert_eq!(envelope.high, 0.0);
        assert!((envelope.volume - 0.4).abs() < 1e-6);
    }

    #[test]
    fn short_spectrum_reads_missing_bands_as_silent() {
        let envelope = AudioEnvelope::from_spectrum(&[255, 255, 255]).unwrap();
        assert_eq!(envelope.bass, 1.0);
        assert_eq!(envelope.mid, 0.0);
        assert_eq!(envelope.high, 0.0);
        assert!(AudioEnvelope::from_spectrum(&[]).is_none());
    }

    #[test]
    fn follower_starts_on_its_first_target() {
        let loud = AudioEnvelope::new(1.0, 1.0, 1.0, 1.0);
        let mut follower = EnvelopeFollower::default();
        assert_eq!(follower.current(), AudioEnvelope::silent());
        assert_eq!(follower.update(loud), loud);
        assert_eq!(follower.update(loud), loud);
    }

    #[test]
    fn follower_converges_without_overshoot() {
        let target = AudioEnvelope::new(0.8, 0.6, 0.4, 0.2);
        let mut follower = EnvelopeFollower::new(0.3);
        follower.update(AudioEnvelope::silent());
        let mut previous = follower.current();
        for _ in 0..60 {
            let next = follower.update(target);
            assert!(next.bass >= previous.bass && next.bass <= target.bass + 1e-6);
            previous = next;
        }
        assert!((follower.current().bass - 0.8).abs() < 1e-3);
        assert!((follower.current().volume - 0.2).abs() < 1e-3);
    }
}
