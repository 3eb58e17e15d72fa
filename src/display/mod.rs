//! Frame display.
//!
//! Shows annotated frames in a window and polls for the quit key. Two
//! backends live behind one public type, mirroring the source layer:
//! - `Headless`: always available; counts frames, never requests quit.
//!   Used by tests and by `--headless` runs, where Ctrl-C stops the loop.
//! - `Window`: OpenCV highgui window (feature: display-opencv), quits on
//!   the `q` key.

#[cfg(feature = "display-opencv")]
mod window;

use anyhow::Result;

use crate::config::DisplaySettings;
use crate::frame::Frame;

/// What the caller should do after showing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DisplayControl {
    Continue,
    Quit,
}

pub struct Display {
    backend: DisplayBackend,
}

enum DisplayBackend {
    Headless(HeadlessDisplay),
    #[cfg(feature = "display-opencv")]
    Window(window::WindowDisplay),
}

impl Display {
    pub fn new(settings: DisplaySettings) -> Result<Self> {
        if settings.headless {
            return Ok(Self {
                backend: DisplayBackend::Headless(HeadlessDisplay::default()),
            });
        }
        #[cfg(feature = "display-opencv")]
        {
            Ok(Self {
                backend: DisplayBackend::Window(window::WindowDisplay::new(settings)?),
            })
        }
        #[cfg(not(feature = "display-opencv"))]
        {
            anyhow::bail!("window display requires the display-opencv feature; use --headless")
        }
    }

    /// Show one frame and poll for the quit key.
    pub fn show(&mut self, frame: &Frame) -> Result<DisplayControl> {
        match &mut self.backend {
            DisplayBackend::Headless(display) => display.show(frame),
            #[cfg(feature = "display-opencv")]
            DisplayBackend::Window(display) => display.show(frame),
        }
    }

    /// Frames shown so far.
    pub fn frames_shown(&self) -> u64 {
        match &self.backend {
            DisplayBackend::Headless(display) => display.frames_shown,
            #[cfg(feature = "display-opencv")]
            DisplayBackend::Window(display) => display.frames_shown(),
        }
    }
}

#[derive(Default)]
struct HeadlessDisplay {
    frames_shown: u64,
}

impl HeadlessDisplay {
    fn show(&mut self, frame: &Frame) -> Result<DisplayControl> {
        self.frames_shown += 1;
        log::debug!(
            "headless display: frame #{} ({}x{})",
            self.frames_shown,
            frame.width,
            frame.height
        );
        Ok(DisplayControl::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headless_settings() -> DisplaySettings {
        DisplaySettings {
            title: "test".to_string(),
            headless: true,
        }
    }

    #[test]
    fn headless_display_counts_frames_and_never_quits() -> Result<()> {
        let mut display = Display::new(headless_settings())?;
        let frame = Frame::new(vec![0u8; 4 * 4 * 3], 4, 4)?;

        assert_eq!(display.show(&frame)?, DisplayControl::Continue);
        assert_eq!(display.show(&frame)?, DisplayControl::Continue);
        assert_eq!(display.frames_shown(), 2);

        Ok(())
    }

    #[cfg(not(feature = "display-opencv"))]
    #[test]
    fn window_display_needs_the_opencv_feature() {
        let settings = DisplaySettings {
            title: "test".to_string(),
            headless: false,
        };
        assert!(Display::new(settings).is_err());
    }
}
