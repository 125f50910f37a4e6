use crate::core::models::user::Role;
use crate::core::services::session::Session;

const REQUIRED_FIELDS: &str = "Semua kolom wajib diisi";

/// Login form state.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form state. New accounts default to `auditee`.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: Role,
}

impl Default for RegisterForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            name: String::new(),
            role: Role::Auditee,
        }
    }
}

/// Submit the login form. Empty fields never reach the backend.
pub fn submit_login(session: &mut Session, form: &LoginForm) -> bool {
    if form.email.trim().is_empty() || form.password.is_empty() {
        session.notifier().error(REQUIRED_FIELDS);
        return false;
    }
    session.login(form.email.trim(), &form.password)
}

/// Submit the registration form; on success the form is reset.
pub fn submit_register(session: &mut Session, form: &mut RegisterForm) -> bool {
    if form.email.trim().is_empty() || form.password.is_empty() || form.name.trim().is_empty() {
        session.notifier().error(REQUIRED_FIELDS);
        return false;
    }
    let ok = session.register(form.email.trim(), &form.password, form.name.trim(), form.role);
    if ok {
        *form = RegisterForm::default();
    }
    ok
}
