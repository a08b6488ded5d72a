use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("interval bound is not finite: ({start}, {end})")]
    NonFiniteBound { start: f64, end: f64 },

    #[error("interval length overflows: ({start}, {end})")]
    UnboundedLength { start: f64, end: f64 },

    #[error("interval is inverted: start {start} > end {end}")]
    InvertedInterval { start: f64, end: f64 },

    #[error("invalid matching config: {0}")]
    InvalidConfig(String),
}
