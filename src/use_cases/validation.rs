use crate::domain::errors::{AuthError, FormErrors};

pub const MIN_PASSWORD_CHARS: usize = 8;

// Signup fields as typed by the user.
pub struct SignupInput<'a> {
    pub email: &'a str,
    pub confirm_email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

pub fn validate_login(email: &str, password: &str) -> Result<(), AuthError> {
    let mut errors = FormErrors::default();

    if email.trim().is_empty() {
        errors.push("email", "Email is required");
    } else if !is_plausible_email(email) {
        errors.push("email", "Invalid email address");
    }

    if password.is_empty() {
        errors.push("password", "Password is required");
    }

    errors.into_result()
}

pub fn validate_signup(input: &SignupInput<'_>) -> Result<(), AuthError> {
    let mut errors = FormErrors::default();

    if !is_plausible_email(input.email) {
        errors.push("email", "Invalid email address");
    }
    if input.email != input.confirm_email {
        errors.push("confirm_email", "Emails do not match");
    }

    if input.password.chars().count() < MIN_PASSWORD_CHARS {
        errors.push("password", "Password must be at least 8 characters");
    }
    if input.password != input.confirm_password {
        errors.push("confirm_password", "Passwords do not match");
    }

    errors.into_result()
}

// `local@domain.tld`: one `@`, no whitespace, and a dot inside the domain.
fn is_plausible_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }

    domain
        .char_indices()
        .any(|(index, ch)| ch == '.' && index > 0 && index + 1 < domain.len())
}
