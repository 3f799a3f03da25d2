//! Sign-in and sign-up form rules.

/// Minimum accepted password length, in UTF-16 code units.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Per-field validation messages. `None` means the field is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CredentialErrors {
    /// Problem with the email field.
    pub email: Option<&'static str>,
    /// Problem with the password field.
    pub password: Option<&'static str>,
}

impl CredentialErrors {
    /// Returns `true` when both fields are valid.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none()
    }
}

/// Returns `true` for addresses shaped like `local@domain.tld` with no
/// whitespace and exactly one `@`. The domain needs at least one `.` with
/// text on both sides; it need not be the last one.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
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
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

/// Validates an email/password pair.
///
/// # Errors
///
/// Returns the collected [`CredentialErrors`] when any field is invalid.
pub fn validate_credentials(email: &str, password: &str) -> Result<(), CredentialErrors> {
    let mut errors = CredentialErrors::default();

    if email.is_empty() {
        errors.email = Some("Email is required");
    } else if !is_valid_email(email) {
        errors.email = Some("Please enter a valid email address");
    }

    if password.is_empty() {
        errors.password = Some("Password is required");
    } else if password.encode_utf16().count() < MIN_PASSWORD_LEN {
        errors.password = Some("Password must be at least 8 characters long");
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
