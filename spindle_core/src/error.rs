use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum SpindleError {
    #[error("unknown drive model: {0}")]
    UnknownModel(String),
    #[error("implausible {register} value: {value}")]
    ImplausibleCalibration { register: &'static str, value: u32 },
    #[error("response too short: expected {need} bytes, got {got}")]
    ShortResponse { need: usize, got: usize },
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
