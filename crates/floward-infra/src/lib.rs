//! # Floward Infrastructure
//!
//! Concrete implementations of the ports defined in `floward-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory adapters only
//! - `http` - Auth API client via reqwest
//! - `file-store` - JSON file storage under the user's data directory
//! - `system-open` - Hand URLs to the operating system's handler

pub mod clock;
pub mod countdown;
pub mod presenter;
pub mod probe;
pub mod storage;

#[cfg(feature = "http")]
pub mod http;

#[cfg(feature = "system-open")]
pub mod navigator;

// Re-exports - always available
pub use clock::TokioClock;
pub use countdown::spawn_countdown;
pub use presenter::{BannerPresenter, TracingNotifier};
pub use probe::{DeviceProfile, HostProbe};
pub use storage::{FileStore, InMemoryStore};

#[cfg(feature = "http")]
pub use http::ReqwestHttpClient;

#[cfg(feature = "system-open")]
pub use navigator::SystemNavigator;
