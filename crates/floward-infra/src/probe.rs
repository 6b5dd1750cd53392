//! Native environment probe for the device fingerprint.

use async_trait::async_trait;
use serde::Deserialize;

use floward_core::ports::{CanvasSpec, EnvironmentProbe, ProbeError, WebGlProbe};

/// Signals the host cannot discover by itself, or that the embedding
/// application wants to pin. Unset fields are probed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    pub user_agent: Option<String>,
    pub platform: Option<String>,
    pub screen: Option<(u32, u32)>,
    pub timezone: Option<String>,
    pub languages: Vec<String>,
    pub device_memory: Option<f64>,
}

/// Probe of the machine the client runs on. There is no rendering surface, so
/// the canvas signal is unavailable and WebGL unsupported.
#[derive(Debug, Clone, Default)]
pub struct HostProbe {
    profile: DeviceProfile,
}

impl HostProbe {
    pub fn new(profile: DeviceProfile) -> Self {
        Self { profile }
    }
}

fn os_token(os: &str, arch: &str) -> String {
    match os {
        "windows" => "Windows NT 10.0; Win64; x64".to_string(),
        "macos" => "Macintosh; Intel Mac OS X".to_string(),
        "ios" => "iPhone; CPU iPhone OS like Mac OS X".to_string(),
        "android" => format!("Linux; Android; {arch}"),
        "linux" => format!("X11; Linux {arch}"),
        other => format!("{other}; {arch}"),
    }
}

fn host_platform(os: &str, arch: &str) -> String {
    match os {
        "windows" => "Win32".to_string(),
        "macos" => "MacIntel".to_string(),
        "ios" => "iPhone".to_string(),
        "linux" | "android" => format!("Linux {arch}"),
        other => other.to_string(),
    }
}

/// `zh_CN.UTF-8` -> `zh-CN`. `C` and `POSIX` carry no language.
fn language_tag(locale: &str) -> Option<String> {
    let tag = locale.split(['.', '@']).next()?.replace('_', "-");
    match tag.as_str() {
        "" | "C" | "POSIX" => None,
        _ => Some(tag),
    }
}

fn host_languages() -> Vec<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|value| language_tag(&value))
        .into_iter()
        .collect()
}

#[async_trait]
impl EnvironmentProbe for HostProbe {
    fn user_agent(&self) -> String {
        self.profile.user_agent.clone().unwrap_or_else(|| {
            format!(
                "Mozilla/5.0 ({}) {}/{}",
                os_token(std::env::consts::OS, std::env::consts::ARCH),
                env!("CARGO_PKG_NAME"),
                env!("CARGO_PKG_VERSION")
            )
        })
    }

    fn screen_size(&self) -> (u32, u32) {
        self.profile.screen.unwrap_or((0, 0))
    }

    /// The configured zone name, else the local UTC offset such as `UTC+08:00`.
    fn timezone(&self) -> String {
        self.profile
            .timezone
            .clone()
            .unwrap_or_else(|| chrono::Local::now().format("UTC%:z").to_string())
    }

    fn languages(&self) -> Vec<String> {
        if self.profile.languages.is_empty() {
            host_languages()
        } else {
            self.profile.languages.clone()
        }
    }

    fn hardware_concurrency(&self) -> Option<u32> {
        u32::try_from(num_cpus::get()).ok()
    }

    fn device_memory(&self) -> Option<f64> {
        self.profile.device_memory
    }

    fn platform(&self) -> Option<String> {
        Some(
            self.profile
                .platform
                .clone()
                .unwrap_or_else(|| host_platform(std::env::consts::OS, std::env::consts::ARCH)),
        )
    }

    async fn canvas_pixels(&self, _spec: &CanvasSpec) -> Result<Vec<u8>, ProbeError> {
        Err(ProbeError::Unavailable("no rendering surface".to_string()))
    }

    async fn webgl(&self) -> Result<WebGlProbe, ProbeError> {
        Ok(WebGlProbe::Unsupported)
    }
}
