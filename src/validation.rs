//! Input rules for registration and the plain "must not be empty" checks the
//! resource services share.

use crate::error::{AppError, AppResult};
use crate::types::RegisterRequest;

/// Top-level domains accepted in registration emails.
pub const ALLOWED_TLDS: &[&str] = &["com", "net", "de"];

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 5;

const EMAIL_MAX_LEN: usize = 254;
const EMAIL_LOCAL_SPECIALS: &str = "!#$%&'*+/=?^_`{|}~.-";

/// Registration input after every rule has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub username: String,
    pub password: String,
}

/// Checks the registration body field by field and stops at the first violation.
/// Keys other than the four known fields are rejected after those pass.
pub fn validate_registration(req: &RegisterRequest) -> AppResult<NewUser> {
    let name = required(req.name.as_deref(), "name")?;
    if !is_valid_name(name) {
        return Err(invalid("name", "must only contain letters, digits and spaces"));
    }

    let email = required(req.email.as_deref(), "email")?;
    if !is_valid_email(email) {
        return Err(invalid(
            "email",
            &format!("must be a valid email ending in .{}", ALLOWED_TLDS.join(", .")),
        ));
    }

    let username = required(req.username.as_deref(), "username")?;
    if !is_valid_username(username) {
        return Err(invalid(
            "username",
            &format!(
                "must be {}-{} alphanumeric characters",
                USERNAME_MIN_LEN, USERNAME_MAX_LEN
            ),
        ));
    }

    let password = required(req.password.as_deref(), "password")?;
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(invalid(
            "password",
            &format!("must be at least {} characters long", PASSWORD_MIN_LEN),
        ));
    }

    if let Some(key) = req.extra.keys().next() {
        return Err(AppError::Invalid(format!("\"{}\" is not allowed", key)));
    }

    Ok(NewUser {
        name: name.to_string(),
        email: email.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    })
}

/// Rejects empty or whitespace-only values for `field`.
pub fn require_non_empty<'a>(value: &'a str, field: &str) -> AppResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::Invalid(format!("\"{}\" is required", field)));
    }
    Ok(trimmed)
}

pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == ' ')
}

pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (USERNAME_MIN_LEN..=USERNAME_MAX_LEN).contains(&len)
        && username.chars().all(|c| c.is_ascii_alphanumeric())
}

/// Address with a dot-atom local part and at least two domain labels, the last of
/// which must be one of [`ALLOWED_TLDS`].
pub fn is_valid_email(email: &str) -> bool {
    if email.len() > EMAIL_MAX_LEN {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    if local.is_empty() || local.len() > 64 {
        return false;
    }
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return false;
    }
    local.chars().all(|c| c.is_ascii_alphanumeric() || EMAIL_LOCAL_SPECIALS.contains(c))
}

fn is_valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 {
        return false;
    }
    let labels_ok = labels.iter().all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    });
    if !labels_ok {
        return false;
    }
    let tld = labels[labels.len() - 1].to_ascii_lowercase();
    ALLOWED_TLDS.contains(&tld.as_str())
}

fn required<'a>(value: Option<&'a str>, field: &str) -> AppResult<&'a str> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(AppError::Invalid(format!("\"{}\" is required", field))),
    }
}

fn invalid(field: &str, rule: &str) -> AppError {
    AppError::Invalid(format!("\"{}\" {}", field, rule))
}
