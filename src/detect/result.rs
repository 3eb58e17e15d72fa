//! Prediction records returned by the detection service.

use serde::Deserialize;

/// One detected object in pixel-space coordinates.
///
/// Coordinates arrive as floats and may sit slightly outside the frame;
/// `pixel_box` rounds and clamps them before drawing. `confidence` is
/// nullable on the wire.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Prediction {
    pub label: String,
    #[serde(default)]
    pub confidence: Option<f32>,
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Prediction {
    /// Confidence rounded to the nearest integer percentage.
    pub fn confidence_percent(&self) -> Option<u32> {
        self.confidence
            .map(|c| (c.clamp(0.0, 1.0) * 100.0).round() as u32)
    }

    /// Overlay label: `"person 87%"`, or the bare label when confidence is
    /// null.
    pub fn label_text(&self) -> String {
        match self.confidence_percent() {
            Some(percent) => format!("{} {}%", self.label, percent),
            None => self.label.clone(),
        }
    }

    /// Round the box to integer pixels and clamp it into a frame. Returns
    /// `None` when nothing of the box lands inside the frame.
    pub fn pixel_box(&self, frame_width: u32, frame_height: u32) -> Option<PixelBox> {
        if frame_width == 0 || frame_height == 0 {
            return None;
        }
        let x_min = self.x_min.round().max(0.0) as u32;
        let y_min = self.y_min.round().max(0.0) as u32;
        let x_max = (self.x_max.round() as i64).min(frame_width as i64 - 1);
        let y_max = (self.y_max.round() as i64).min(frame_height as i64 - 1);
        if x_max < 0 || y_max < 0 {
            return None;
        }
        let (x_max, y_max) = (x_max as u32, y_max as u32);
        if x_min >= frame_width || y_min >= frame_height || x_min > x_max || y_min > y_max {
            return None;
        }
        Some(PixelBox {
            x: x_min,
            y: y_min,
            width: x_max - x_min + 1,
            height: y_max - y_min + 1,
        })
    }
}

/// Integer pixel rectangle, clamped to frame bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prediction(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Prediction {
        Prediction {
            label: "person".to_string(),
            confidence: Some(0.87),
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    #[test]
    fn confidence_rounds_to_nearest_percent() {
        let mut p = prediction(0.0, 0.0, 10.0, 10.0);
        assert_eq!(p.confidence_percent(), Some(87));
        assert_eq!(p.label_text(), "person 87%");

        p.confidence = Some(0.874);
        assert_eq!(p.confidence_percent(), Some(87));
        p.confidence = Some(0.876);
        assert_eq!(p.confidence_percent(), Some(88));
    }

    #[test]
    fn null_confidence_renders_bare_label() {
        let mut p = prediction(0.0, 0.0, 10.0, 10.0);
        p.confidence = None;
        assert_eq!(p.confidence_percent(), None);
        assert_eq!(p.label_text(), "person");
    }

    #[test]
    fn pixel_box_rounds_coordinates() {
        let p = prediction(10.4, 20.6, 30.5, 40.2);
        let b = p.pixel_box(640, 480).unwrap();
        assert_eq!((b.x, b.y), (10, 21));
        // 30.5 rounds to 31, 40.2 to 40: widths are inclusive.
        assert_eq!((b.width, b.height), (22, 20));
    }

    #[test]
    fn pixel_box_clamps_into_frame() {
        let p = prediction(-5.0, -3.0, 700.0, 500.0);
        let b = p.pixel_box(640, 480).unwrap();
        assert_eq!((b.x, b.y), (0, 0));
        assert_eq!((b.width, b.height), (640, 480));
    }

    #[test]
    fn fully_outside_box_is_dropped() {
        assert!(prediction(700.0, 500.0, 800.0, 600.0)
            .pixel_box(640, 480)
            .is_none());
        assert!(prediction(-50.0, -50.0, -10.0, -10.0)
            .pixel_box(640, 480)
            .is_none());
        assert!(prediction(10.0, 10.0, 20.0, 20.0).pixel_box(0, 0).is_none());
    }

    #[test]
    fn missing_confidence_field_deserializes_as_none() {
        let p: Prediction = serde_json::from_str(
            r#"{"label":"cat","x_min":1.0,"y_min":2.0,"x_max":3.0,"y_max":4.0}"#,
        )
        .unwrap();
        assert_eq!(p.confidence, None);

        let p: Prediction = serde_json::from_str(
            r#"{"label":"cat","confidence":null,"x_min":1.0,"y_min":2.0,"x_max":3.0,"y_max":4.0}"#,
        )
        .unwrap();
        assert_eq!(p.confidence, None);
    }
}
