//! Ports - trait definitions for everything outside the controller.
//! Infrastructure (or a test) provides the implementations.

mod clock;
mod http;
mod navigator;
mod notifier;
mod probe;
mod storage;

pub use clock::Clock;
pub use http::{HttpClient, HttpResponse, TransportError};
pub use navigator::{NavigationError, Navigator};
pub use notifier::Notifier;
pub use probe::{CanvasSpec, EnvironmentProbe, ProbeError, WebGlProbe};
pub use storage::{KeyValueStore, StorageError};
