//! Domain types - form state, device identity and session data.

mod countdown;
mod device;
mod fingerprint;
mod form;
mod notification;
mod session;
mod validation;

pub use countdown::CodeCountdown;
pub use device::{DeviceCategory, DeviceType, device_type, suggested_device_name};
pub use fingerprint::{
    CANVAS_NOT_SUPPORTED, DEBUG_INFO_NOT_SUPPORTED, DeviceFingerprint, UNKNOWN, WEBGL_ERROR,
    WEBGL_NOT_SUPPORTED, compute_fingerprint,
};
pub use form::{FormField, FormFields, FormMode, FormState, InputGroup, LoginMethod};
pub use notification::{Notification, NotificationKind};
pub use session::{ACCESS_TOKEN_KEY, DEVICE_NAME_KEY, EMAIL_KEY, REFRESH_TOKEN_KEY, SessionTokens};
pub use validation::is_email_shaped;
