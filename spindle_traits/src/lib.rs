//! Vocabulary shared between VFD drive protocols and the scheduler/transport
//! framework that drives them.
//!
//! A driver never touches the wire. It builds [`ModbusCommand`] descriptors;
//! the framework transmits them, validates length and CRC on the reply, and
//! hands the raw bytes back through [`VfdProtocol::parse_response`] together
//! with the [`ResponseParser`] tag it got alongside the request. All driver
//! state mutation happens inside that single call, on the framework's one
//! control thread.

pub mod command;

pub use command::{MAX_FRAME_LEN, ModbusCommand, SpindleState};

/// Decode step bound to one specific request.
///
/// One tag per initialization step plus one for the keep-alive poll and one
/// for the speed-feedback read; plain data instead of a boxed closure, so a
/// request descriptor stays `Copy` and ownership of the driver state never
/// leaves the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseParser {
    MaxFrequency,
    MinFrequency,
    RatedRpm,
    PoleCount,
    AccelTime,
    DecelTime,
    LinkCheck,
    OutputFrequency,
}

/// A request descriptor paired with the decode step for its reply.
///
/// `parser == None` means fire-and-forget: the transport's framing check is
/// the only validation, as with write echoes.
#[derive(Debug, Clone, Copy)]
pub struct Request {
    pub command: ModbusCommand,
    pub parser: Option<ResponseParser>,
}

/// A set-speed request plus the range verdict for the requested frequency.
///
/// The command is always built, even out of range; `in_range` is the
/// warning signal, kept separate so the caller decides what to do with it.
#[derive(Debug, Clone, Copy)]
pub struct SpeedCommand {
    pub command: ModbusCommand,
    pub in_range: bool,
}

/// Device-specific Modbus behavior of one VFD model.
///
/// The framework holds a `Box<dyn VfdProtocol>` picked from the model
/// registry at configuration time and calls exactly one builder/parser pair
/// at a time; implementations need no internal locking.
pub trait VfdProtocol: std::fmt::Debug {
    /// Model name as registered, e.g. `"BD600"`.
    fn model(&self) -> &'static str;

    /// Build the frame that switches the spindle to `state`. The reply is a
    /// plain echo; no parser is needed.
    fn direction_command(&mut self, state: SpindleState) -> ModbusCommand;

    /// Build the frame that commands `freq_centihz` (centi-Hz). The reply is
    /// a plain echo; the returned range verdict is advisory.
    fn set_speed_command(&mut self, freq_centihz: u32) -> SpeedCommand;

    /// Build startup step `index` (first step is -1, then -2, ...). Returns
    /// `None` once the sequence is exhausted.
    fn initialization_sequence(&mut self, index: i32) -> Option<Request>;

    /// Build the next idle-time status read; rotates through the status
    /// registers to keep the link alive.
    fn status_poll(&mut self) -> Request;

    /// Build a read of the live output frequency for speed synchronization.
    fn speed_feedback(&mut self) -> Request;

    /// Apply a validated reply to driver state. `response` is the addressed
    /// frame without CRC, exactly `rx_length` bytes. Returns `false` when
    /// the decoded value is implausible; the framework escalates from there.
    fn parse_response(&mut self, parser: ResponseParser, response: &[u8]) -> bool;

    /// Last output frequency seen by [`ResponseParser::OutputFrequency`],
    /// in centi-Hz.
    fn observed_frequency(&self) -> u32;

    /// Lower commandable bound in RPM, derived from device calibration.
    fn min_rpm(&self) -> u32;

    /// Upper commandable bound in RPM, derived from device calibration.
    fn max_rpm(&self) -> u32;
}
