//! handTrack.js bridge
//!
//! The model object stays on the JS side. Predictions come back as a JSON
//! string and are decoded by `detection::parse_detections`.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::HtmlVideoElement;

use crate::detection::{Detection, ModelConfig, parse_detections};
use crate::error::{GameError, Result, js_message};

#[wasm_bindgen(inline_js = "
    export async function load_model(params) {
        return await handTrack.load(JSON.parse(params));
    }

    export async function start_video(video) {
        const status = await handTrack.startVideo(video);
        if (!status || status.status === false) {
            throw new Error((status && status.msg) || 'camera not available');
        }
        return status;
    }

    export async function detect_hands(model, video) {
        const predictions = await model.detect(video);
        return JSON.stringify(predictions.map(p => ({
            class: p.class,
            score: p.score,
            bbox: p.bbox,
        })));
    }
")]
extern "C" {
    #[wasm_bindgen(catch)]
    async fn load_model(params: &str) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn start_video(video: &HtmlVideoElement) -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    async fn detect_hands(
        model: &JsValue,
        video: &HtmlVideoElement,
    ) -> std::result::Result<JsValue, JsValue>;
}

/// Loaded hand model bound to a webcam video element
pub struct HandTracker {
    model: JsValue,
    video: HtmlVideoElement,
}

impl HandTracker {
    /// Load the model with the given parameters
    pub async fn load(config: &ModelConfig, video: HtmlVideoElement) -> Result<Self> {
        let params = serde_json::to_string(config)?;
        log::info!("Loading hand tracking model...");
        let model = load_model(&params)
            .await
            .map_err(|e| GameError::ModelLoad(js_message(&e)))?;
        log::info!("Model loaded");
        Ok(Self { model, video })
    }

    /// Ask for the webcam and attach it to the video element
    pub async fn start_video(&self) -> Result<()> {
        start_video(&self.video)
            .await
            .map_err(|e| GameError::Video(js_message(&e)))?;
        log::info!(
            "Video started ({}x{})",
            self.video.video_width(),
            self.video.video_height()
        );
        Ok(())
    }

    /// Video frame size, falling back to the window size before metadata loads
    pub fn frame_size(&self) -> (u32, u32) {
        let (w, h) = (self.video.video_width(), self.video.video_height());
        if w > 0 && h > 0 {
            return (w, h);
        }
        web_sys::window()
            .map(|win| {
                let dim = |v: std::result::Result<JsValue, JsValue>| {
                    v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32
                };
                (dim(win.inner_width()), dim(win.inner_height()))
            })
            .unwrap_or((w, h))
    }

    /// Run the model on the current video frame
    pub async fn detect(&self) -> Result<Vec<Detection>> {
        let json = detect_hands(&self.model, &self.video)
            .await
            .map_err(|e| GameError::Detection(js_message(&e)))?;
        let json = json
            .dyn_into::<js_sys::JsString>()
            .map_err(|_| GameError::Detection("model returned non-string payload".into()))?;
        parse_detections(&String::from(json))
    }
}
