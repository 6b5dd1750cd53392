//! # Floward Core
//!
//! Headless controller for the Floward login/registration forms.
//! All browser, network and storage access goes through the traits in [`ports`],
//! so the controller runs unchanged against real adapters or test doubles.

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod ports;

#[cfg(any(test, feature = "test-util"))]
pub mod testing;

pub use config::ClientConfig;
pub use controller::{AuthController, Outcome, Ports, UiAction, UiState};
pub use error::ClientError;
