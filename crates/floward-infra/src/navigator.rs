//! Navigation through the operating system's URL handlers.

use url::Url;

use floward_core::ClientConfig;
use floward_core::ports::{NavigationError, Navigator};

/// Opens URLs with whatever the OS has registered for their scheme: the
/// default browser for pages on the serving origin, the desktop app for its
/// custom scheme.
#[derive(Debug, Clone)]
pub struct SystemNavigator {
    base_url: Url,
}

impl SystemNavigator {
    pub fn new(base_url: Url) -> Self {
        Self { base_url }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url.clone())
    }

    /// `path` resolved against the serving origin.
    pub fn resolve(&self, path: &str) -> Result<Url, NavigationError> {
        self.base_url
            .join(path)
            .map_err(|e| NavigationError::InvalidTarget(format!("{path}: {e}")))
    }
}

impl Navigator for SystemNavigator {
    fn open_external(&self, uri: &Url) -> Result<(), NavigationError> {
        open::that_detached(uri.as_str())
            .map_err(|e| NavigationError::Open(format!("{}: {}", uri.scheme(), e)))
    }

    fn navigate(&self, path: &str) -> Result<(), NavigationError> {
        let url = self.resolve(path)?;
        tracing::debug!(url = %url, "Opening page");
        open::that_detached(url.as_str()).map_err(|e| NavigationError::Open(e.to_string()))
    }
}
