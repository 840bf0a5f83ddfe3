use thiserror::Error;

/// Everything that can go wrong while ringing. None of these are fatal: the
/// session absorbs them and reflects the outcome in its view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BellError {
    #[error("motion permission denied")]
    PermissionDenied,

    #[error("sample carried no usable gravity-inclusive acceleration")]
    SensorDataMissing,

    #[error("playback failed to start: {0}")]
    PlaybackStart(String),
}
