//! Modbus request descriptors exchanged between a drive protocol and the
//! transport that owns the bus.

/// Upper bound on a single request/response frame, excluding the CRC.
pub const MAX_FRAME_LEN: usize = 16;

/// A single Modbus request, ready for the transport to send.
///
/// `msg[0]` is reserved for the unit address and left zero; the transport
/// fills it in and appends the CRC16. `tx_length` and `rx_length` count the
/// addressed frame without the CRC, so for a write-echo exchange both are 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModbusCommand {
    pub msg: [u8; MAX_FRAME_LEN],
    pub tx_length: usize,
    pub rx_length: usize,
}

impl ModbusCommand {
    /// The bytes the transport should actually transmit (address slot
    /// included, CRC excluded).
    pub fn tx_bytes(&self) -> &[u8] {
        &self.msg[..self.tx_length]
    }
}

impl Default for ModbusCommand {
    fn default() -> Self {
        Self {
            msg: [0; MAX_FRAME_LEN],
            tx_length: 0,
            rx_length: 0,
        }
    }
}

/// Commanded spindle rotation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpindleState {
    Clockwise,
    CounterClockwise,
    #[default]
    Disabled,
    /// State the controller could not classify; drivers must treat this as
    /// a stop, never as a spin command.
    Unknown,
}
