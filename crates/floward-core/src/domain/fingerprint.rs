//! Device fingerprint derivation.
//!
//! Environment signals are collected into a fixed-order record, serialized as
//! compact JSON and hashed with SHA-256. Key names and value types follow the
//! browser page that first issued these fingerprints, so an unchanged
//! environment keeps its device id. Collection never fails: a signal that
//! cannot be read is replaced by a sentinel string.

use std::fmt;

use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::ports::{CanvasSpec, EnvironmentProbe, WebGlProbe};

pub const UNKNOWN: &str = "unknown";
pub const WEBGL_NOT_SUPPORTED: &str = "webgl_not_supported";
pub const DEBUG_INFO_NOT_SUPPORTED: &str = "debug_info_not_supported";
pub const WEBGL_ERROR: &str = "webgl_error";
pub const CANVAS_NOT_SUPPORTED: &str = "canvas_not_supported";

/// Opaque device identifier: 64 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceFingerprint(String);

impl DeviceFingerprint {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FingerprintRecord {
    user_agent: String,
    screen: String,
    timezone: String,
    languages: String,
    hardware_concurrency: Value,
    device_memory: Value,
    platform: String,
    canvas_hash: String,
    webgl_hash: String,
}

impl FingerprintRecord {
    async fn collect(probe: &dyn EnvironmentProbe) -> Self {
        let (width, height) = probe.screen_size();

        Self {
            user_agent: probe.user_agent(),
            screen: format!("{width}x{height}"),
            timezone: probe.timezone(),
            languages: probe.languages().join(","),
            hardware_concurrency: probe
                .hardware_concurrency()
                .filter(|cores| *cores > 0)
                .map_or_else(unknown, Value::from),
            device_memory: probe
                .device_memory()
                .filter(|gib| *gib > 0.0)
                .map_or_else(unknown, json_number),
            platform: probe
                .platform()
                .filter(|platform| !platform.is_empty())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            canvas_hash: canvas_signature(probe).await,
            webgl_hash: webgl_signature(probe).await,
        }
    }

    fn serialize(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

fn unknown() -> Value {
    Value::from(UNKNOWN)
}

/// Integral values serialize without a fraction (`8`, not `8.0`).
fn json_number(value: f64) -> Value {
    if value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
        Value::from(value as i64)
    } else {
        serde_json::Number::from_f64(value).map_or_else(unknown, Value::Number)
    }
}

/// Pixel bytes as decimal numbers, concatenated without separators.
async fn canvas_signature(probe: &dyn EnvironmentProbe) -> String {
    match probe.canvas_pixels(&CanvasSpec::FINGERPRINT).await {
        Ok(pixels) => pixels.iter().map(u8::to_string).collect(),
        Err(e) => {
            tracing::debug!(error = %e, "Canvas signal unavailable");
            CANVAS_NOT_SUPPORTED.to_string()
        }
    }
}

async fn webgl_signature(probe: &dyn EnvironmentProbe) -> String {
    match probe.webgl().await {
        Ok(WebGlProbe::Unsupported) => WEBGL_NOT_SUPPORTED.to_string(),
        Ok(WebGlProbe::NoDebugInfo) => DEBUG_INFO_NOT_SUPPORTED.to_string(),
        Ok(WebGlProbe::Renderer { vendor, renderer }) => format!("{vendor}|{renderer}"),
        Err(e) => {
            tracing::debug!(error = %e, "WebGL probe failed");
            WEBGL_ERROR.to_string()
        }
    }
}

/// Derive the fingerprint of the environment `probe` describes.
pub async fn compute_fingerprint(probe: &dyn EnvironmentProbe) -> DeviceFingerprint {
    let record = FingerprintRecord::collect(probe).await;
    let digest = Sha256::digest(record.serialize().as_bytes());
    DeviceFingerprint(hex::encode(digest))
}
