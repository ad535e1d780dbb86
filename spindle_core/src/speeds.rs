//! Discrete speed table mapping spindle RPM to drive frequency.

use crate::units::div_round_nearest_u64;

/// One table entry: the drive frequency (centi-Hz) that produces `rpm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedPoint {
    pub rpm: u32,
    pub freq_centihz: u32,
}

/// Piecewise-linear RPM-to-frequency table.
///
/// An operator-configured table is installed once at construction and is
/// authoritative; calibration only installs its two-point default into an
/// empty table, so recomputing derived values can never clobber configured
/// points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeedTable {
    points: Vec<SpeedPoint>,
    /// Frequency ceiling applied to lookups, centi-Hz.
    max_freq: u32,
}

impl SpeedTable {
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            max_freq: u32::MAX,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SpeedPoint] {
        &self.points
    }

    /// Install an operator-provided table. Points must be strictly
    /// increasing in both axes (enforced by config validation).
    pub fn install_configured(&mut self, points: Vec<SpeedPoint>) {
        self.points = points;
    }

    /// Install the two-point default spanning the calibrated envelope.
    /// No-op when any table is already present.
    pub fn install_default(&mut self, min_rpm: u32, max_rpm: u32, min_freq: u32, max_freq: u32) {
        if !self.points.is_empty() {
            return;
        }
        self.points = vec![
            SpeedPoint {
                rpm: min_rpm,
                freq_centihz: min_freq,
            },
            SpeedPoint {
                rpm: max_rpm,
                freq_centihz: max_freq,
            },
        ];
    }

    /// Update the lookup ceiling after the frequency envelope changes.
    pub fn rescale(&mut self, max_freq: u32) {
        self.max_freq = max_freq.max(1);
    }

    /// Linear interpolation between neighboring points, clamped to the
    /// table ends and the frequency ceiling. `None` while no table is
    /// installed.
    pub fn freq_for_rpm(&self, rpm: u32) -> Option<u32> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        let mut freq = if rpm <= first.rpm {
            first.freq_centihz
        } else if rpm >= last.rpm {
            last.freq_centihz
        } else {
            let mut interpolated = last.freq_centihz;
            for pair in self.points.windows(2) {
                if let [lo, hi] = pair
                    && rpm <= hi.rpm
                {
                    // The window search guarantees rpm > lo.rpm; spans
                    // saturate on a malformed table.
                    let offset = u64::from(rpm - lo.rpm);
                    let span_freq = u64::from(hi.freq_centihz.saturating_sub(lo.freq_centihz));
                    let span_rpm = u64::from(hi.rpm.saturating_sub(lo.rpm));
                    interpolated = lo.freq_centihz
                        + div_round_nearest_u64(offset * span_freq, span_rpm) as u32;
                    break;
                }
            }
            interpolated
        };
        freq = freq.min(self.max_freq);
        Some(freq)
    }
}

impl Default for SpeedTable {
    fn default() -> Self {
        Self::new()
    }
}
