//! Folinn BD600-family drive protocol.
//!
//! Register map (unit address and CRC handled by the transport):
//!
//! - Run control: write 0x1000 with 1 (forward), 2 (reverse) or 5 (stop).
//! - Frequency source: write 0x3000 with percent-of-maximum scaled by 100
//!   (5000 = 50.00% of the PD005 ceiling).
//! - PD group reads (function 0x01) pull the calibration constants at
//!   startup: PD005/PD011 frequency envelope, PD144 rated RPM at 50 Hz,
//!   PD143 pole count (single-byte reply), PD014/PD015 accel/decel times.
//! - Status reads (function 0x04) over registers 0..=3 keep the link alive
//!   while idle; register 1 carries the live output frequency in centi-Hz.
//!
//! The drive must be set up for RS485 control beforehand (F00.01=2 command
//! source, F00.06=9 frequency source, F13.00 unit address, F13.01 baud,
//! F13.05 standard Modbus).

use spindle_traits::{
    ModbusCommand, Request, ResponseParser, SpeedCommand, SpindleState, VfdProtocol,
};

use crate::calibration::DriveCalibration;
use crate::error::SpindleError;
use crate::frame::{self, control, run_code, setting, status};
use crate::units::{CENTIHZ_PER_HZ, div_round_nearest_u64, rpm_from_centihz};

/// Device driver for BD600-family drives.
///
/// Pure protocol state: everything here is mutated either by the
/// constructor or inside [`VfdProtocol::parse_response`], which the
/// scheduler calls on its single control thread.
#[derive(Debug, Clone)]
pub struct Bd600 {
    calibration: DriveCalibration,
    /// Cursor into the idle status-poll rotation.
    poll_register: u8,
    /// Last output frequency reported by the drive, centi-Hz.
    observed_frequency: u32,
}

impl Bd600 {
    pub const MODEL: &'static str = "BD600";

    pub fn new() -> Self {
        Self {
            calibration: DriveCalibration::new(),
            poll_register: status::SET_FREQUENCY,
            observed_frequency: 0,
        }
    }

    /// Build a driver from validated configuration, installing any custom
    /// speed table so later calibration can no longer replace it.
    pub fn from_config(cfg: &spindle_config::Config) -> Self {
        let mut drive = Self::new();
        if !cfg.speeds.points.is_empty() {
            drive
                .calibration
                .install_speed_points(cfg.speeds.points.iter().map(Into::into).collect());
        }
        drive
    }

    pub fn calibration(&self) -> &DriveCalibration {
        &self.calibration
    }

    fn decode(&mut self, parser: ResponseParser, response: &[u8]) -> Result<(), SpindleError> {
        match parser {
            ResponseParser::MaxFrequency => {
                let value = frame::data_u16(response)?;
                self.calibration.set_max_frequency(value.into());
                Ok(())
            }
            ResponseParser::MinFrequency => {
                let value = frame::data_u16(response)?;
                self.calibration.set_min_frequency(value.into());
                tracing::info!(
                    min_hz = self.calibration.min_frequency() / CENTIHZ_PER_HZ,
                    max_hz = self.calibration.max_frequency() / CENTIHZ_PER_HZ,
                    min_rpm = rpm_from_centihz(self.calibration.min_frequency()),
                    max_rpm = rpm_from_centihz(self.calibration.max_frequency()),
                    "frequency envelope (PD011, PD005)"
                );
                Ok(())
            }
            ResponseParser::RatedRpm => {
                let value = frame::data_u16(response)?;
                self.calibration.set_rated_rpm(value.into());
                tracing::info!(rpm = value, "rated motor RPM at 50 Hz (PD144)");
                // Last contributor to the RPM envelope; derive it now.
                self.calibration.recompute();
                Ok(())
            }
            ResponseParser::PoleCount => {
                // Single data byte, unlike every other PD reply.
                let value = frame::data_u8(response)?;
                self.calibration.set_pole_count(value.into())?;
                tracing::info!(poles = value, "motor pole count (PD143)");
                self.calibration.recompute();
                Ok(())
            }
            ResponseParser::AccelTime => {
                let value = frame::data_u16(response)?;
                tracing::info!(seconds = f64::from(value) / 10.0, "acceleration time (PD014)");
                Ok(())
            }
            ResponseParser::DecelTime => {
                let value = frame::data_u16(response)?;
                tracing::info!(seconds = f64::from(value) / 10.0, "deceleration time (PD015)");
                Ok(())
            }
            ResponseParser::LinkCheck => Ok(()),
            ResponseParser::OutputFrequency => {
                let value = frame::data_u16(response)?;
                self.observed_frequency = value.into();
                Ok(())
            }
        }
    }
}

impl Default for Bd600 {
    fn default() -> Self {
        Self::new()
    }
}

impl VfdProtocol for Bd600 {
    fn model(&self) -> &'static str {
        Self::MODEL
    }

    fn direction_command(&mut self, state: SpindleState) -> ModbusCommand {
        let code = match state {
            SpindleState::Clockwise => run_code::CLOCKWISE,
            SpindleState::CounterClockwise => run_code::COUNTER_CLOCKWISE,
            // Anything unrecognized stops the spindle, never spins it.
            SpindleState::Disabled | SpindleState::Unknown => run_code::STOP,
        };
        frame::write_single(control::RUN, code.into())
    }

    fn set_speed_command(&mut self, freq_centihz: u32) -> SpeedCommand {
        let min = self.calibration.min_frequency();
        let max = self.calibration.max_frequency();
        let in_range = freq_centihz == 0 || (min..=max).contains(&freq_centihz);
        if !in_range {
            tracing::warn!(
                requested = freq_centihz,
                min,
                max,
                "requested frequency outside drive range"
            );
        }
        // Percent-of-maximum with two implied decimals (5000 = 50.00%).
        // Stale calibration can push this past 10000; the value is sent as
        // computed, saturated only at the 16-bit register width.
        let percent_x100 =
            div_round_nearest_u64(u64::from(freq_centihz) * 10_000, u64::from(max.max(1)))
                .min(u64::from(u16::MAX)) as u16;
        let command = frame::write_single(control::FREQUENCY, percent_x100);
        SpeedCommand { command, in_range }
    }

    fn initialization_sequence(&mut self, index: i32) -> Option<Request> {
        let (command, parser) = match index {
            -1 => (
                frame::read_setting(setting::MAX_FREQUENCY),
                ResponseParser::MaxFrequency,
            ),
            -2 => (
                frame::read_setting(setting::MIN_FREQUENCY),
                ResponseParser::MinFrequency,
            ),
            -3 => (
                frame::read_setting(setting::RATED_RPM),
                ResponseParser::RatedRpm,
            ),
            -4 => {
                let mut command = frame::read_setting(setting::POLE_COUNT);
                // PD143 replies with one data byte instead of two.
                command.rx_length = 5;
                (command, ResponseParser::PoleCount)
            }
            -5 => (
                frame::read_setting(setting::ACCEL_TIME),
                ResponseParser::AccelTime,
            ),
            -6 => (
                frame::read_setting(setting::DECEL_TIME),
                ResponseParser::DecelTime,
            ),
            _ => return None,
        };
        Some(Request {
            command,
            parser: Some(parser),
        })
    }

    fn status_poll(&mut self) -> Request {
        let command = frame::read_status(self.poll_register);
        self.poll_register = (self.poll_register + 1) % status::POLL_COUNT;
        Request {
            command,
            parser: Some(ResponseParser::LinkCheck),
        }
    }

    fn speed_feedback(&mut self) -> Request {
        Request {
            command: frame::read_status(status::OUTPUT_FREQUENCY),
            parser: Some(ResponseParser::OutputFrequency),
        }
    }

    fn parse_response(&mut self, parser: ResponseParser, response: &[u8]) -> bool {
        match self.decode(parser, response) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(error = %e, ?parser, "rejected drive response");
                false
            }
        }
    }

    fn observed_frequency(&self) -> u32 {
        self.observed_frequency
    }

    fn min_rpm(&self) -> u32 {
        self.calibration.min_rpm()
    }

    fn max_rpm(&self) -> u32 {
        self.calibration.max_rpm()
    }
}
