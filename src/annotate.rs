//! Frame annotation.
//!
//! Draws the returned bounding boxes and text labels onto a frame before it
//! is displayed. Boxes are hollow rectangles thickened by drawing concentric
//! rings; labels use a TTF font loaded once at startup. A missing or broken
//! font degrades to boxes without labels rather than failing the run.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_text_mut};
use imageproc::rect::Rect;

use crate::config::OverlaySettings;
use crate::detect::Prediction;

pub struct Annotator {
    settings: OverlaySettings,
    font: Option<FontVec>,
}

impl Annotator {
    pub fn new(settings: OverlaySettings) -> Self {
        let font = load_font(&settings);
        Self { settings, font }
    }

    /// Draw every prediction that lands inside the frame. Returns the number
    /// of boxes drawn.
    pub fn annotate(&self, image: &mut RgbImage, predictions: &[Prediction]) -> usize {
        let (width, height) = image.dimensions();
        let box_color = Rgb(self.settings.box_color);
        let text_color = Rgb(self.settings.text_color);
        let mut drawn = 0;

        for prediction in predictions {
            let Some(pixel_box) = prediction.pixel_box(width, height) else {
                continue;
            };

            let base = Rect::at(pixel_box.x as i32, pixel_box.y as i32)
                .of_size(pixel_box.width, pixel_box.height);
            for ring in 0..self.settings.border_width {
                let outset = Rect::at(base.left() - ring as i32, base.top() - ring as i32)
                    .of_size(base.width() + 2 * ring, base.height() + 2 * ring);
                draw_hollow_rect_mut(image, outset, box_color);
            }

            if let Some(font) = &self.font {
                let text = prediction.label_text();
                let scale = PxScale::from(self.settings.font_size);
                let (x, y) = self.label_position(&pixel_box);
                draw_text_mut(image, text_color, x, y, scale, font, &text);
            }

            drawn += 1;
        }

        drawn
    }

    pub fn has_font(&self) -> bool {
        self.font.is_some()
    }

    /// Label sits just above the box; when the box touches the top edge the
    /// label moves inside it.
    fn label_position(&self, pixel_box: &crate::detect::PixelBox) -> (i32, i32) {
        let text_height = self.settings.font_size.ceil() as i32 + 2;
        let x = pixel_box.x as i32 + self.settings.border_width as i32 + 1;
        let above = pixel_box.y as i32 - text_height;
        if above >= 0 {
            (x, above)
        } else {
            (x, pixel_box.y as i32 + self.settings.border_width as i32 + 1)
        }
    }
}

fn load_font(settings: &OverlaySettings) -> Option<FontVec> {
    let path = settings.font_path.as_ref()?;
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) => {
            log::warn!(
                "overlay font {} unreadable ({}); labels disabled",
                path.display(),
                e
            );
            return None;
        }
    };
    match FontVec::try_from_vec(bytes) {
        Ok(font) => Some(font),
        Err(e) => {
            log::warn!(
                "overlay font {} is not a valid font ({}); labels disabled",
                path.display(),
                e
            );
            None
        }
    }
}
