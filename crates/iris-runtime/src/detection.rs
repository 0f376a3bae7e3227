use serde::{Deserialize, Serialize};

/// Normalized box `[x, y, width, height]`, each component a fraction of the
/// image dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox(pub [f64; 4]);

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self([x, y, width, height])
    }

    pub fn is_normalized(&self) -> bool {
        self.0.iter().all(|v| is_unit(*v))
    }

    /// Clamp every component into [0,1]. NaN becomes 0.
    pub fn clamped(self) -> Self {
        Self(self.0.map(clamp_unit))
    }
}

/// One recognized object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub label: String,
    pub confidence: f64,
    pub bounding_box: BoundingBox,
}

impl Detection {
    pub fn new(label: impl Into<String>, confidence: f64, bounding_box: BoundingBox) -> Self {
        Self {
            label: label.into(),
            confidence,
            bounding_box,
        }
    }

    pub fn is_normalized(&self) -> bool {
        is_unit(self.confidence) && self.bounding_box.is_normalized()
    }
}

/// Response payload of `analyzeImage`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub objects: Vec<Detection>,
    /// Overall confidence for the whole image.
    pub confidence: f64,
}

impl AnalysisResult {
    pub fn new(objects: Vec<Detection>, confidence: f64) -> Self {
        Self {
            objects,
            confidence,
        }
    }

    /// Build a result from raw detector output: values are clamped into
    /// [0,1], detections ordered by descending confidence (stable for ties),
    /// and the overall confidence is the mean detection confidence.
    pub fn from_detections(detections: Vec<Detection>) -> Self {
        let mut objects: Vec<Detection> = detections
            .into_iter()
            .map(|d| Detection {
                confidence: clamp_unit(d.confidence),
                bounding_box: d.bounding_box.clamped(),
                label: d.label,
            })
            .collect();
        objects.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let confidence = if objects.is_empty() {
            0.0
        } else {
            objects.iter().map(|d| d.confidence).sum::<f64>() / objects.len() as f64
        };

        Self {
            objects,
            confidence,
        }
    }

    pub fn is_normalized(&self) -> bool {
        is_unit(self.confidence) && self.objects.iter().all(Detection::is_normalized)
    }
}

fn is_unit(v: f64) -> bool {
    (0.0..=1.0).contains(&v)
}

fn clamp_unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}
