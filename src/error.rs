// Crate-wide error type. Only startup problems ever surface as errors;
// every per-frame condition is modeled as data (absent point, skipped frame).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Creating the preview window failed.
    #[error("window init error: {0}")]
    WindowInit(String),

    /// Pushing a frame to the preview window failed.
    #[error("window update error: {0}")]
    WindowUpdate(String),

    /// Opening/starting the camera failed. Fatal: we never enter the loop.
    #[error("camera init error: {0}")]
    CameraInit(String),

    /// Grabbing or decoding a single frame failed. The loop treats this as
    /// "skip this iteration", never as fatal.
    #[error("camera frame error: {0}")]
    CameraFrame(String),

    /// Connecting to the OS input layer failed (e.g. missing permissions).
    #[error("pointer init error: {0}")]
    PointerInit(String),

    /// A cursor move or click was rejected by the OS. The loop logs this
    /// once and keeps running; a flaky injection layer should not kill an
    /// otherwise-working perception loop.
    #[error("pointer actuation error: {0}")]
    PointerActuation(String),
}
