//! Device-reported calibration constants and the values derived from them.
//!
//! The four raw constants arrive one register at a time during the
//! initialization sequence; derived values (RPM envelope, slop tolerance,
//! default speed table) are recomputed only once the last contributor is in,
//! so a concurrent consumer never observes a half-updated envelope.

use std::ops::RangeInclusive;

use crate::error::SpindleError;
use crate::speeds::{SpeedPoint, SpeedTable};
use crate::units::rpm_from_centihz;

/// Conservative power-on defaults, overwritten by the initialization reads.
pub const DEFAULT_MAX_FREQUENCY: u32 = 40_000; // 400.00 Hz
pub const DEFAULT_MIN_FREQUENCY: u32 = 100; // 1.00 Hz
pub const DEFAULT_POLE_COUNT: u16 = 4;

/// Plausible motor pole counts; anything outside means a garbled read or a
/// misconfigured drive.
pub const POLE_COUNT_RANGE: RangeInclusive<u16> = 2..=4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DriveCalibration {
    max_frequency: u32,
    min_frequency: u32,
    rated_rpm_at_50hz: u32,
    pole_count: u16,
    // Derived; zero until the first recompute.
    min_rpm: u32,
    max_rpm: u32,
    slop: u32,
    speeds: SpeedTable,
}

impl DriveCalibration {
    pub fn new() -> Self {
        Self {
            max_frequency: DEFAULT_MAX_FREQUENCY,
            min_frequency: DEFAULT_MIN_FREQUENCY,
            rated_rpm_at_50hz: 0,
            pole_count: DEFAULT_POLE_COUNT,
            min_rpm: 0,
            max_rpm: 0,
            slop: 1,
            speeds: SpeedTable::new(),
        }
    }

    pub fn max_frequency(&self) -> u32 {
        self.max_frequency
    }

    pub fn min_frequency(&self) -> u32 {
        self.min_frequency
    }

    pub fn rated_rpm_at_50hz(&self) -> u32 {
        self.rated_rpm_at_50hz
    }

    pub fn pole_count(&self) -> u16 {
        self.pole_count
    }

    /// Lower commandable bound in RPM; zero until calibrated.
    pub fn min_rpm(&self) -> u32 {
        self.min_rpm
    }

    /// Upper commandable bound in RPM; zero until calibrated.
    pub fn max_rpm(&self) -> u32 {
        self.max_rpm
    }

    /// Tolerance band (centi-Hz) for speed-reached comparisons.
    pub fn slop(&self) -> u32 {
        self.slop
    }

    pub fn speeds(&self) -> &SpeedTable {
        &self.speeds
    }

    pub fn set_max_frequency(&mut self, centihz: u32) {
        self.max_frequency = centihz;
    }

    pub fn set_min_frequency(&mut self, centihz: u32) {
        self.min_frequency = centihz;
    }

    pub fn set_rated_rpm(&mut self, rpm: u32) {
        self.rated_rpm_at_50hz = rpm;
    }

    /// Store the motor pole count, rejecting values outside the plausible
    /// motor range.
    pub fn set_pole_count(&mut self, poles: u16) -> Result<(), SpindleError> {
        if !POLE_COUNT_RANGE.contains(&poles) {
            return Err(SpindleError::ImplausibleCalibration {
                register: "pole count",
                value: poles.into(),
            });
        }
        self.pole_count = poles;
        Ok(())
    }

    /// Install an operator-configured speed table; it takes precedence over
    /// the calibration-derived default for the life of the driver.
    pub fn install_speed_points(&mut self, points: Vec<SpeedPoint>) {
        self.speeds.install_configured(points);
    }

    /// Refresh every derived value from the current raw constants.
    ///
    /// Idempotent: invariants are re-applied, the default speed table is
    /// installed only into an empty table, and repeated calls with unchanged
    /// inputs leave the state bit-identical.
    pub fn recompute(&mut self) {
        if self.min_frequency > self.max_frequency {
            self.min_frequency = self.max_frequency;
        }
        self.min_rpm = rpm_from_centihz(self.min_frequency);
        self.max_rpm = rpm_from_centihz(self.max_frequency);
        if self.speeds.is_empty() {
            self.speeds.install_default(
                self.min_rpm,
                self.max_rpm,
                self.min_frequency,
                self.max_frequency,
            );
        }
        self.speeds.rescale(self.max_frequency);
        self.slop = (self.max_frequency / 40).max(1);
    }
}

impl Default for DriveCalibration {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pole_count_bounds() {
        let mut cal = DriveCalibration::new();
        for poles in [2, 3, 4] {
            cal.set_pole_count(poles).unwrap();
            assert_eq!(cal.pole_count(), poles);
        }
        for poles in [0, 1, 5, 255] {
            let before = cal.pole_count();
            assert!(cal.set_pole_count(poles).is_err());
            assert_eq!(cal.pole_count(), before);
        }
    }

    #[test]
    fn derived_values_stay_zero_until_recompute() {
        let cal = DriveCalibration::new();
        assert_eq!(cal.min_rpm(), 0);
        assert_eq!(cal.max_rpm(), 0);
        assert!(cal.speeds().is_empty());
    }
}
