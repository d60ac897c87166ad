//! Hand model contract
//!
//! handTrack.js reports predictions as
//! `{ bbox: [x, y, w, h], class, label, score }` in canvas pixels. Output
//! crosses the JS boundary as JSON and is decoded here.

use serde::{Deserialize, Serialize};

use crate::consts::FACE_CLASS;
use crate::error::Result;
use crate::sim::BBox;

/// Model parameters passed to `handTrack.load`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    /// Mirror the video so moving right moves right on screen
    pub flip_horizontal: bool,
    /// Upper bound on boxes per frame
    pub max_num_boxes: u32,
    /// Non-max suppression overlap threshold
    pub iou_threshold: f32,
    /// Minimum confidence for a prediction
    pub score_threshold: f32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            flip_horizontal: true,
            max_num_boxes: 5,
            iou_threshold: 0.2,
            score_threshold: 0.5,
        }
    }
}

/// One model prediction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    #[serde(rename = "class")]
    pub class_id: i32,
    pub score: f32,
    pub bbox: [f32; 4],
}

impl Detection {
    pub fn new(class_id: i32, score: f32, bbox: [f32; 4]) -> Self {
        Self {
            class_id,
            score,
            bbox,
        }
    }

    pub fn bbox(&self) -> BBox {
        BBox::from(self.bbox)
    }

    pub fn is_face(&self) -> bool {
        self.class_id == FACE_CLASS
    }

    /// Debug overlay label, e.g. `Class 2 - 87%`
    pub fn label(&self) -> String {
        format!("Class {} - {}%", self.class_id, (self.score * 100.0).round() as i32)
    }
}

/// Decode a JSON array of predictions
pub fn parse_detections(json: &str) -> Result<Vec<Detection>> {
    Ok(serde_json::from_str(json)?)
}

/// Predictions that count as hands (faces dropped)
pub fn hand_detections(detections: &[Detection]) -> Vec<Detection> {
    detections.iter().filter(|d| !d.is_face()).cloned().collect()
}

/// Hand boxes for the simulation
pub fn hand_boxes(detections: &[Detection]) -> Vec<BBox> {
    detections
        .iter()
        .filter(|d| !d.is_face())
        .map(Detection::bbox)
        .collect()
}
