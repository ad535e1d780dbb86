#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Device-specific Modbus RTU protocol core for VFD spindle drives.
//!
//! This crate turns abstract spindle commands (direction, target frequency)
//! into the exact register-level payloads a drive expects, and turns the
//! drive's replies back into calibration and feedback state. The serial
//! transport (framing, CRC16, timeouts, retries) and the scheduler that
//! decides when to send what are external; they interact with a driver only
//! through the `spindle_traits::VfdProtocol` trait.
//!
//! ## Architecture
//!
//! - **Frame codec**: fixed-shape read/write request builders (`frame`)
//! - **Calibration**: device-reported constants and derived RPM envelope
//!   (`calibration`)
//! - **Speed table**: piecewise-linear RPM-to-frequency mapping (`speeds`)
//! - **Driver**: the BD600 implementation of the protocol trait (`bd600`)
//! - **Registry**: model-name lookup producing boxed drivers (`registry`)
//!
//! ## Fixed-point arithmetic
//!
//! Frequencies are centi-Hz (`u32`, 2500 = 25.00 Hz) end to end, matching
//! the drive's native encoding; see `units` for the conversion helpers.

pub mod bd600;
pub mod calibration;
pub mod conversions;
pub mod error;
pub mod frame;
pub mod registry;
pub mod speeds;
pub mod units;

pub use bd600::Bd600;
pub use calibration::DriveCalibration;
pub use error::{Result, SpindleError};
pub use registry::ProtocolRegistry;
pub use speeds::{SpeedPoint, SpeedTable};
