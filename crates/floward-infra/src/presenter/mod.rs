//! Notification presenters.

mod banner;
mod logging;

pub use banner::BannerPresenter;
pub use logging::TracingNotifier;
