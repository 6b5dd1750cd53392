//! Form state - which form is shown and which login method is active.

/// The form currently on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormMode {
    #[default]
    Login,
    Register,
}

/// How the login form authenticates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginMethod {
    #[default]
    Password,
    Code,
}

/// User-editable inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    LoginEmail,
    LoginPassword,
    LoginCode,
    LoginDeviceName,
    RegisterEmail,
    RegisterPassword,
    RegisterConfirmPassword,
}

/// Current values of every input, plus the hidden device-id field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields {
    pub login_email: String,
    pub login_password: String,
    pub login_code: String,
    pub login_device_name: String,
    pub register_email: String,
    pub register_password: String,
    pub register_confirm_password: String,
    /// Cached fingerprint; empty until the initial computation finishes.
    pub device_id: String,
}

impl FormFields {
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::LoginEmail => &self.login_email,
            FormField::LoginPassword => &self.login_password,
            FormField::LoginCode => &self.login_code,
            FormField::LoginDeviceName => &self.login_device_name,
            FormField::RegisterEmail => &self.register_email,
            FormField::RegisterPassword => &self.register_password,
            FormField::RegisterConfirmPassword => &self.register_confirm_password,
        }
    }

    pub fn set(&mut self, field: FormField, value: String) {
        let slot = match field {
            FormField::LoginEmail => &mut self.login_email,
            FormField::LoginPassword => &mut self.login_password,
            FormField::LoginCode => &mut self.login_code,
            FormField::LoginDeviceName => &mut self.login_device_name,
            FormField::RegisterEmail => &mut self.register_email,
            FormField::RegisterPassword => &mut self.register_password,
            FormField::RegisterConfirmPassword => &mut self.register_confirm_password,
        };
        *slot = value;
    }
}

/// Visibility and required-ness of an input group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputGroup {
    pub visible: bool,
    pub required: bool,
}

impl InputGroup {
    fn active(active: bool) -> Self {
        Self {
            visible: active,
            required: active,
        }
    }
}

/// Form mode and login method. Visibility is derived from these two values, so
/// exactly one form and one login input group are active at any time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FormState {
    pub mode: FormMode,
    pub method: LoginMethod,
}

impl FormState {
    pub fn switch_form(&mut self, mode: FormMode) {
        self.mode = mode;
    }

    /// Activate `method` and clear the input of the group being hidden, so a
    /// stale hidden value is never submitted.
    pub fn switch_login_method(&mut self, method: LoginMethod, fields: &mut FormFields) {
        match method {
            LoginMethod::Password => fields.login_code.clear(),
            LoginMethod::Code => fields.login_password.clear(),
        }
        self.method = method;
    }

    pub fn is_form_active(&self, mode: FormMode) -> bool {
        self.mode == mode
    }

    pub fn password_group(&self) -> InputGroup {
        InputGroup::active(self.method == LoginMethod::Password)
    }

    pub fn code_group(&self) -> InputGroup {
        InputGroup::active(self.method == LoginMethod::Code)
    }
}
