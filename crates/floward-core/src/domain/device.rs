//! Device type and display-name inference from user-agent/platform strings.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Device type reported to the backend with every login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    Android,
    Ios,
    Windows,
    Macos,
    Linux,
    Web,
}

impl DeviceType {
    pub fn as_str(self) -> &'static str {
        match self {
            DeviceType::Android => "android",
            DeviceType::Ios => "ios",
            DeviceType::Windows => "windows",
            DeviceType::Macos => "macos",
            DeviceType::Linux => "linux",
            DeviceType::Web => "web",
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First match wins, so Android (which also says "linux") is checked first.
static DEVICE_TYPE_PATTERNS: LazyLock<Vec<(Regex, DeviceType)>> = LazyLock::new(|| {
    [
        ("android", DeviceType::Android),
        ("iphone|ipad|ipod", DeviceType::Ios),
        ("windows", DeviceType::Windows),
        ("macintosh|mac os x", DeviceType::Macos),
        ("linux", DeviceType::Linux),
    ]
    .into_iter()
    .map(|(pattern, kind)| (Regex::new(pattern).expect("Valid device pattern"), kind))
    .collect()
});

static MOBILE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)Mobi|Android").expect("Valid mobile pattern"));
static TABLET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("(?i)Tablet|iPad").expect("Valid tablet pattern"));

fn match_device_type(haystack: &str) -> Option<DeviceType> {
    DEVICE_TYPE_PATTERNS
        .iter()
        .find(|(pattern, _)| pattern.is_match(haystack))
        .map(|(_, kind)| *kind)
}

/// Classify the device. The user agent is tried against every pattern before
/// the platform string is; `Web` when neither matches.
pub fn device_type(user_agent: &str, platform: &str) -> DeviceType {
    match_device_type(&user_agent.to_lowercase())
        .or_else(|| match_device_type(&platform.to_lowercase()))
        .unwrap_or(DeviceType::Web)
}

/// Coarse form factor used in suggested device names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceCategory {
    Mobile,
    Tablet,
    Desktop,
}

impl fmt::Display for DeviceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceCategory::Mobile => "Mobile",
            DeviceCategory::Tablet => "Tablet",
            DeviceCategory::Desktop => "Desktop",
        })
    }
}

// The tablet check is not an else-if of the mobile check: its else branch
// overwrites a mobile match with Desktop, so phones come out as Desktop.
// Existing device names depend on this, keep it.
#[allow(unused_assignments)]
fn device_category(user_agent: &str) -> DeviceCategory {
    let mut category = DeviceCategory::Desktop;
    if MOBILE.is_match(user_agent) {
        category = DeviceCategory::Mobile;
    }
    if TABLET.is_match(user_agent) {
        category = DeviceCategory::Tablet;
    } else {
        category = DeviceCategory::Desktop;
    }
    category
}

/// Friendly default name, e.g. `"Desktop on Win32"`.
pub fn suggested_device_name(user_agent: &str, platform: Option<&str>) -> String {
    let platform = platform.filter(|p| !p.is_empty()).unwrap_or("unknown");
    format!("{} on {}", device_category(user_agent), platform)
}
