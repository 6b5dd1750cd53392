//! Navigation port.

use url::Url;

/// Moves the user somewhere else: within the app, or out to another program.
pub trait Navigator: Send + Sync {
    /// Hand `uri` to whatever handles its scheme.
    fn open_external(&self, uri: &Url) -> Result<(), NavigationError>;

    /// Go to `path` on the serving origin.
    fn navigate(&self, path: &str) -> Result<(), NavigationError>;
}

#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    #[error("No handler could open the target: {0}")]
    Open(String),
}
