//! Stub detector for tests and offline demo runs.

use anyhow::Result;

use crate::detect::{Detector, Prediction};
use crate::frame::Frame;

/// Returns the same canned predictions for every frame.
pub struct StubDetector {
    predictions: Vec<Prediction>,
    calls: u64,
}

impl StubDetector {
    pub fn new(predictions: Vec<Prediction>) -> Self {
        Self {
            predictions,
            calls: 0,
        }
    }

    /// A stub with one box roughly centered in a 640x480 frame.
    pub fn with_demo_box() -> Self {
        Self::new(vec![Prediction {
            label: "person".to_string(),
            confidence: Some(0.85),
            x_min: 200.0,
            y_min: 120.0,
            x_max: 440.0,
            y_max: 360.0,
        }])
    }

    pub fn calls(&self) -> u64 {
        self.calls
    }
}

impl Default for StubDetector {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl Detector for StubDetector {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Prediction>> {
        self.calls += 1;
        Ok(self.predictions.clone())
    }
}
