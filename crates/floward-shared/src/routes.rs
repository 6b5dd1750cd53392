//! Authentication endpoints, relative to the serving origin.

pub const LOGIN: &str = "/auth/login";
pub const LOGIN_WITH_CODE: &str = "/auth/login-with-code";
pub const REGISTER: &str = "/auth/register";
pub const SEND_VERIFICATION_CODE: &str = "/auth/send-verification-code";
