//! Error types
//!
//! Only model/video failures stop the game from starting. Everything raised
//! per frame is logged by the caller and the loop keeps going.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    /// Hand model could not be loaded
    #[error("hand model failed to load: {0}")]
    ModelLoad(String),
    /// Webcam stream could not be started
    #[error("video failed to start: {0}")]
    Video(String),
    /// A single detection call failed
    #[error("detection failed: {0}")]
    Detection(String),
    /// Model output did not match the expected shape
    #[error("malformed detection payload: {0}")]
    Payload(#[from] serde_json::Error),
    /// Sound could not be played
    #[error("audio playback failed: {0}")]
    Audio(String),
    /// Page is missing the canvas or its 2D context
    #[error("drawing surface unavailable: {0}")]
    Surface(String),
}

pub type Result<T> = std::result::Result<T, GameError>;

/// Render a JS exception as text for error messages
#[cfg(target_arch = "wasm32")]
pub fn js_message(value: &wasm_bindgen::JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{:?}", value))
}
