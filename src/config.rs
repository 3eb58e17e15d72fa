use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use url::Url;

const DEFAULT_STREAM_URL: &str = "stub://demo_camera";
const DEFAULT_STREAM_FPS: u32 = 10;
const DEFAULT_STREAM_WIDTH: u32 = 640;
const DEFAULT_STREAM_HEIGHT: u32 = 480;
const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:32168/v1/vision/detection";
const DEFAULT_MIN_CONFIDENCE: f32 = 0.4;
const DEFAULT_TIMEOUT_SECS: u64 = 5;
const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_BORDER_WIDTH: u32 = 2;
const DEFAULT_BOX_COLOR: [u8; 3] = [255, 0, 0];
const DEFAULT_TEXT_COLOR: [u8; 3] = [255, 255, 255];
const DEFAULT_WINDOW_TITLE: &str = "camwatch";

#[derive(Debug, Deserialize, Default)]
struct CamwatchConfigFile {
    stream: Option<StreamConfigFile>,
    detector: Option<DetectorConfigFile>,
    overlay: Option<OverlayConfigFile>,
    display: Option<DisplayConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct StreamConfigFile {
    url: Option<String>,
    target_fps: Option<u32>,
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Debug, Deserialize, Default)]
struct DetectorConfigFile {
    endpoint: Option<String>,
    min_confidence: Option<f32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct OverlayConfigFile {
    font_path: Option<PathBuf>,
    font_size: Option<f32>,
    border_width: Option<u32>,
    box_color: Option<[u8; 3]>,
    text_color: Option<[u8; 3]>,
}

#[derive(Debug, Deserialize, Default)]
struct DisplayConfigFile {
    title: Option<String>,
    headless: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CamwatchConfig {
    pub stream: StreamSettings,
    pub detector: DetectorSettings,
    pub overlay: OverlaySettings,
    pub display: DisplaySettings,
}

#[derive(Debug, Clone)]
pub struct StreamSettings {
    pub url: String,
    pub target_fps: u32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone)]
pub struct DetectorSettings {
    pub endpoint: String,
    pub min_confidence: f32,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct OverlaySettings {
    pub font_path: Option<PathBuf>,
    pub font_size: f32,
    pub border_width: u32,
    pub box_color: [u8; 3],
    pub text_color: [u8; 3],
}

#[derive(Debug, Clone)]
pub struct DisplaySettings {
    pub title: String,
    pub headless: bool,
}

impl CamwatchConfig {
    /// Load configuration: optional JSON file named by `CAMWATCH_CONFIG`,
    /// then environment overrides, then validation.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("CAMWATCH_CONFIG").ok();
        let file_cfg = match config_path.as_deref() {
            Some(path) => Some(read_config_file(Path::new(path))?),
            None => None,
        };
        let mut cfg = Self::from_file(file_cfg.unwrap_or_default());
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: CamwatchConfigFile) -> Self {
        let stream = StreamSettings {
            url: file
                .stream
                .as_ref()
                .and_then(|stream| stream.url.clone())
                .unwrap_or_else(|| DEFAULT_STREAM_URL.to_string()),
            target_fps: file
                .stream
                .as_ref()
                .and_then(|stream| stream.target_fps)
                .unwrap_or(DEFAULT_STREAM_FPS),
            width: file
                .stream
                .as_ref()
                .and_then(|stream| stream.width)
                .unwrap_or(DEFAULT_STREAM_WIDTH),
            height: file
                .stream
                .as_ref()
                .and_then(|stream| stream.height)
                .unwrap_or(DEFAULT_STREAM_HEIGHT),
        };
        let detector = DetectorSettings {
            endpoint: file
                .detector
                .as_ref()
                .and_then(|detector| detector.endpoint.clone())
                .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            min_confidence: file
                .detector
                .as_ref()
                .and_then(|detector| detector.min_confidence)
                .unwrap_or(DEFAULT_MIN_CONFIDENCE),
            timeout: Duration::from_secs(
                file.detector
                    .as_ref()
                    .and_then(|detector| detector.timeout_secs)
                    .unwrap_or(DEFAULT_TIMEOUT_SECS),
            ),
        };
        let overlay = OverlaySettings {
            font_path: file.overlay.as_ref().and_then(|o| o.font_path.clone()),
            font_size: file
                .overlay
                .as_ref()
                .and_then(|o| o.font_size)
                .unwrap_or(DEFAULT_FONT_SIZE),
            border_width: file
                .overlay
                .as_ref()
                .and_then(|o| o.border_width)
                .unwrap_or(DEFAULT_BORDER_WIDTH),
            box_color: file
                .overlay
                .as_ref()
                .and_then(|o| o.box_color)
                .unwrap_or(DEFAULT_BOX_COLOR),
            text_color: file
                .overlay
                .and_then(|o| o.text_color)
                .unwrap_or(DEFAULT_TEXT_COLOR),
        };
        let display = DisplaySettings {
            title: file
                .display
                .as_ref()
                .and_then(|display| display.title.clone())
                .unwrap_or_else(|| DEFAULT_WINDOW_TITLE.to_string()),
            headless: file
                .display
                .and_then(|display| display.headless)
                .unwrap_or(false),
        };
        Self {
            stream,
            detector,
            overlay,
            display,
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = std::env::var("CAMWATCH_RTSP_URL") {
            if !url.trim().is_empty() {
                self.stream.url = url;
            }
        }
        if let Ok(endpoint) = std::env::var("CAMWATCH_ENDPOINT") {
            if !endpoint.trim().is_empty() {
                self.detector.endpoint = endpoint;
            }
        }
        if let Ok(confidence) = std::env::var("CAMWATCH_MIN_CONFIDENCE") {
            let value: f32 = confidence
                .parse()
                .map_err(|_| anyhow!("CAMWATCH_MIN_CONFIDENCE must be a number"))?;
            self.detector.min_confidence = value;
        }
        if let Ok(headless) = std::env::var("CAMWATCH_HEADLESS") {
            match headless.trim() {
                "" => {}
                "1" | "true" => self.display.headless = true,
                "0" | "false" => self.display.headless = false,
                other => {
                    return Err(anyhow!(
                        "CAMWATCH_HEADLESS must be true/false or 1/0, got '{}'",
                        other
                    ))
                }
            }
        }
        Ok(())
    }

    fn validate(&mut self) -> Result<()> {
        if !self.stream.url.starts_with("stub://") {
            let url = Url::parse(&self.stream.url)
                .map_err(|e| anyhow!("invalid stream url '{}': {}", self.stream.url, e))?;
            if url.scheme() != "rtsp" {
                return Err(anyhow!(
                    "stream url scheme must be rtsp or stub, got '{}'",
                    url.scheme()
                ));
            }
        }
        let endpoint = Url::parse(&self.detector.endpoint)
            .map_err(|e| anyhow!("invalid detector endpoint '{}': {}", self.detector.endpoint, e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(anyhow!(
                "detector endpoint scheme must be http(s), got '{}'",
                endpoint.scheme()
            ));
        }
        if !(0.0..=1.0).contains(&self.detector.min_confidence) {
            return Err(anyhow!("min_confidence must be between 0.0 and 1.0"));
        }
        if self.detector.timeout.as_secs() == 0 {
            return Err(anyhow!("detector timeout must be greater than zero"));
        }
        if self.overlay.border_width == 0 {
            return Err(anyhow!("overlay border_width must be at least 1"));
        }
        if self.overlay.font_size <= 0.0 {
            return Err(anyhow!("overlay font_size must be positive"));
        }
        Ok(())
    }
}

fn read_config_file(path: &Path) -> Result<CamwatchConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let cfg = serde_json::from_str(&raw)
        .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?;
    Ok(cfg)
}
