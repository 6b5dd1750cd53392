//! User-facing texts.

use serde::Deserialize;

/// Language of the notifications and button labels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

/// Every text the controller can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    MissingFields,
    MissingPassword,
    MissingCode,
    PasswordMismatch,
    PasswordTooShort { min: usize },
    InvalidEmail,
    LoginSucceeded,
    LoginFailed,
    CodeLoginFailed,
    RegisterSucceeded,
    RegisterFailed,
    EmailAlreadyRegistered,
    CodeSent,
    SendCodeFailed,
    NetworkError,
    StorageFailed,
    NavigationFailed,
    DeviceNameGenerated,
    SendCodeLabel,
    ResendIn { seconds: u32 },
}

impl Locale {
    pub fn render(self, key: MessageKey) -> String {
        use MessageKey::*;

        match self {
            Locale::En => match key {
                MissingFields => "Please fill in all required fields".to_string(),
                MissingPassword => "Please enter your password".to_string(),
                MissingCode => "Please enter the verification code".to_string(),
                PasswordMismatch => "The two passwords do not match".to_string(),
                PasswordTooShort { min } => {
                    format!("Password must be at least {min} characters")
                }
                InvalidEmail => "Please enter a valid email address".to_string(),
                LoginSucceeded => "Login successful!".to_string(),
                LoginFailed => "Login failed, please check your email and password".to_string(),
                CodeLoginFailed => {
                    "Login failed, please check your email and verification code".to_string()
                }
                RegisterSucceeded => "Registration successful! Please log in".to_string(),
                RegisterFailed => "Registration failed, please try again later".to_string(),
                EmailAlreadyRegistered => {
                    "This email is already registered, please use another one".to_string()
                }
                CodeSent => "Verification code sent, please check your inbox".to_string(),
                SendCodeFailed => "Failed to send verification code".to_string(),
                NetworkError => "Network error, please try again later".to_string(),
                StorageFailed => "Could not save your login, please try again".to_string(),
                NavigationFailed => "Could not open the dashboard".to_string(),
                DeviceNameGenerated => "Device name generated".to_string(),
                SendCodeLabel => "Send code".to_string(),
                ResendIn { seconds } => format!("{seconds}s until resend"),
            },
            Locale::ZhCn => match key {
                MissingFields => "请填写所有必填字段".to_string(),
                MissingPassword => "请输入密码".to_string(),
                MissingCode => "请输入验证码".to_string(),
                PasswordMismatch => "两次输入的密码不一致".to_string(),
                PasswordTooShort { min } => format!("密码长度至少{min}位"),
                InvalidEmail => "请输入有效的邮箱地址".to_string(),
                LoginSucceeded => "登录成功！".to_string(),
                LoginFailed => "登录失败，请检查邮箱和密码".to_string(),
                CodeLoginFailed => "登录失败，请检查邮箱和验证码".to_string(),
                RegisterSucceeded => "注册成功！请登录".to_string(),
                RegisterFailed => "注册失败，请稍后重试".to_string(),
                EmailAlreadyRegistered => "该邮箱已被注册，请更换邮箱".to_string(),
                CodeSent => "验证码已发送，请查收邮箱".to_string(),
                SendCodeFailed => "验证码发送失败，请稍后重试".to_string(),
                NetworkError => "网络错误，请稍后重试".to_string(),
                StorageFailed => "保存登录信息失败，请重试".to_string(),
                NavigationFailed => "无法打开主页面".to_string(),
                DeviceNameGenerated => "设备名称已自动生成".to_string(),
                SendCodeLabel => "发送验证码".to_string(),
                ResendIn { seconds } => format!("{seconds}秒后重新发送"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_label() {
        assert_eq!(
            Locale::En.render(MessageKey::ResendIn { seconds: 42 }),
            "42s until resend"
        );
        assert_eq!(
            Locale::ZhCn.render(MessageKey::ResendIn { seconds: 42 }),
            "42秒后重新发送"
        );
    }

    #[test]
    fn test_locale_from_config_name() {
        let locale: Locale = serde_json::from_str("\"zh-cn\"").unwrap();
        assert_eq!(locale, Locale::ZhCn);
    }
}
