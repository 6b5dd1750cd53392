//! Environment port - the signals a device fingerprint is derived from.

use async_trait::async_trait;

/// What a probe renders for the canvas signal. Fixed so the signal is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSpec {
    pub width: u32,
    pub height: u32,
    pub font: &'static str,
    pub text: &'static str,
    pub x: u32,
    pub y: u32,
}

impl CanvasSpec {
    pub const FINGERPRINT: CanvasSpec = CanvasSpec {
        width: 300,
        height: 150,
        font: "14px Arial",
        text: "DeviceFingerprint@2023",
        x: 2,
        y: 2,
    };
}

/// Result of querying the WebGL renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebGlProbe {
    /// No WebGL context could be created.
    Unsupported,
    /// A context exists but the renderer-info extension does not.
    NoDebugInfo,
    Renderer { vendor: String, renderer: String },
}

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("Signal unavailable: {0}")]
    Unavailable(String),

    #[error("Probe failed: {0}")]
    Failed(String),
}

/// Source of browser/device characteristics.
#[async_trait]
pub trait EnvironmentProbe: Send + Sync {
    fn user_agent(&self) -> String;

    /// Screen width and height in pixels.
    fn screen_size(&self) -> (u32, u32);

    /// IANA time zone name.
    fn timezone(&self) -> String;

    /// Accepted languages, most preferred first.
    fn languages(&self) -> Vec<String>;

    fn hardware_concurrency(&self) -> Option<u32>;

    /// Approximate RAM in GiB.
    fn device_memory(&self) -> Option<f64>;

    fn platform(&self) -> Option<String>;

    /// Raw RGBA pixels of `spec` rendered off-screen.
    async fn canvas_pixels(&self, spec: &CanvasSpec) -> Result<Vec<u8>, ProbeError>;

    async fn webgl(&self) -> Result<WebGlProbe, ProbeError>;
}
