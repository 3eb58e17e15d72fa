//! OpenCV highgui window backend.

use anyhow::{Context, Result};
use opencv::core::Mat;
use opencv::highgui;
use opencv::prelude::*;

use crate::config::DisplaySettings;
use crate::display::DisplayControl;
use crate::frame::Frame;

const QUIT_KEY: i32 = 'q' as i32;

pub(crate) struct WindowDisplay {
    title: String,
    frames_shown: u64,
}

impl WindowDisplay {
    pub(crate) fn new(settings: DisplaySettings) -> Result<Self> {
        highgui::named_window(&settings.title, highgui::WINDOW_AUTOSIZE)
            .context("create display window")?;
        Ok(Self {
            title: settings.title,
            frames_shown: 0,
        })
    }

    pub(crate) fn show(&mut self, frame: &Frame) -> Result<DisplayControl> {
        // highgui expects BGR; frames are RGB.
        let bgr = rgb_to_bgr(frame.pixels());
        let flat = Mat::from_slice(&bgr).context("wrap frame pixels as Mat")?;
        let mat = flat
            .reshape(3, frame.height as i32)
            .context("reshape frame Mat")?;
        highgui::imshow(&self.title, &mat).context("show frame")?;
        self.frames_shown += 1;

        let key = highgui::wait_key(1).context("poll window keys")?;
        if key == QUIT_KEY {
            return Ok(DisplayControl::Quit);
        }
        Ok(DisplayControl::Continue)
    }

    pub(crate) fn frames_shown(&self) -> u64 {
        self.frames_shown
    }
}

impl Drop for WindowDisplay {
    fn drop(&mut self) {
        let _ = highgui::destroy_window(&self.title);
    }
}

fn rgb_to_bgr(rgb: &[u8]) -> Vec<u8> {
    let mut bgr = Vec::with_capacity(rgb.len());
    for pixel in rgb.chunks_exact(3) {
        bgr.push(pixel[2]);
        bgr.push(pixel[1]);
        bgr.push(pixel[0]);
    }
    bgr
}
