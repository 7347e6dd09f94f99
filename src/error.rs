use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("unknown granularity: `{0}`")]
    UnknownGranularity(String),

    #[error("invalid rounding mode: `{0}` (expected nearest, up or down)")]
    InvalidRoundingMode(String),

    #[error("unknown timezone: `{0}`")]
    UnknownTimeZone(String),

    #[error("invalid axis geometry: width={width}, height={height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
