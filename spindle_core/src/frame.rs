//! Fixed-shape Modbus request builders and reply-field decoding for the
//! drive's register map.
//!
//! Every request here is five meaningful bytes behind the unit address:
//! function code, then either `len, reg, 0, 0` for reads or
//! `addr_hi, addr_lo, data_hi, data_lo` for writes. All multi-byte fields
//! are big-endian. The transport prepends the unit address into `msg[0]`
//! and appends the CRC16.

use spindle_traits::{MAX_FRAME_LEN, ModbusCommand};

use crate::error::SpindleError;
use crate::units::be_u16;

pub mod function_code {
    /// Setting-register read (PD group).
    pub const READ_SETTING: u8 = 0x01;
    /// Status-register read.
    pub const READ_STATUS: u8 = 0x04;
    /// Single-register write.
    pub const WRITE_SINGLE: u8 = 0x06;
}

/// Length field carried by every read request on this drive.
const READ_LEN: u8 = 0x03;

/// Setting registers (PD group), read once during initialization.
pub mod setting {
    /// PD005: maximum frequency the drive will allow, centi-Hz.
    pub const MAX_FREQUENCY: u8 = 5;
    /// PD011: frequency lower limit, centi-Hz.
    pub const MIN_FREQUENCY: u8 = 11;
    /// PD014: acceleration time, tenths of a second.
    pub const ACCEL_TIME: u8 = 14;
    /// PD015: deceleration time, tenths of a second.
    pub const DECEL_TIME: u8 = 15;
    /// PD143: motor pole count. Replies carry a single data byte.
    pub const POLE_COUNT: u8 = 143;
    /// PD144: rated motor RPM at 50 Hz.
    pub const RATED_RPM: u8 = 144;
}

/// Status registers, polled while idle.
pub mod status {
    pub const SET_FREQUENCY: u8 = 0x00;
    pub const OUTPUT_FREQUENCY: u8 = 0x01;
    pub const OUTPUT_CURRENT: u8 = 0x02;
    pub const ROTATION_SPEED: u8 = 0x03;
    /// Number of registers the idle poll rotates over.
    pub const POLL_COUNT: u8 = 4;
}

/// Control registers, written to command the spindle.
pub mod control {
    /// Run/stop/direction command register.
    pub const RUN: u16 = 0x1000;
    /// Frequency source register; takes percent-of-max scaled by 100.
    pub const FREQUENCY: u16 = 0x3000;
}

/// Run-register command codes.
pub mod run_code {
    pub const CLOCKWISE: u8 = 0x01;
    pub const COUNTER_CLOCKWISE: u8 = 0x02;
    pub const STOP: u8 = 0x05;
}

/// Build a setting-register read: `[_, 0x01, 0x03, reg, 0, 0]`. The reply
/// has the same length with the value big-endian in bytes 4..=5.
pub fn read_setting(reg: u8) -> ModbusCommand {
    read(function_code::READ_SETTING, reg)
}

/// Build a status-register read: `[_, 0x04, 0x03, reg, 0, 0]`.
pub fn read_status(reg: u8) -> ModbusCommand {
    read(function_code::READ_STATUS, reg)
}

fn read(function: u8, reg: u8) -> ModbusCommand {
    let mut cmd = ModbusCommand {
        msg: [0; MAX_FRAME_LEN],
        tx_length: 6,
        rx_length: 6,
    };
    // msg[0] stays 0 for the transport-filled unit address.
    cmd.msg[1] = function;
    cmd.msg[2] = READ_LEN;
    cmd.msg[3] = reg;
    cmd
}

/// Build a single-register write:
/// `[_, 0x06, addr_hi, addr_lo, data_hi, data_lo]`. The drive echoes the
/// frame back verbatim, so rx equals tx.
pub fn write_single(addr: u16, value: u16) -> ModbusCommand {
    let mut cmd = ModbusCommand {
        msg: [0; MAX_FRAME_LEN],
        tx_length: 6,
        rx_length: 6,
    };
    cmd.msg[1] = function_code::WRITE_SINGLE;
    cmd.msg[2] = (addr >> 8) as u8;
    cmd.msg[3] = (addr & 0xFF) as u8;
    cmd.msg[4] = (value >> 8) as u8;
    cmd.msg[5] = (value & 0xFF) as u8;
    cmd
}

/// Decode the big-endian register value from bytes 4..=5 of a reply.
pub fn data_u16(response: &[u8]) -> Result<u16, SpindleError> {
    match response.get(4..6) {
        Some([hi, lo]) => Ok(be_u16(*hi, *lo)),
        _ => Err(SpindleError::ShortResponse {
            need: 6,
            got: response.len(),
        }),
    }
}

/// Decode the single data byte at byte 4 of a short (5-byte) reply.
pub fn data_u8(response: &[u8]) -> Result<u8, SpindleError> {
    response.get(4).copied().ok_or(SpindleError::ShortResponse {
        need: 5,
        got: response.len(),
    })
}
