//! Validation of raw user form input.
//!
//! The form hands over three raw strings; `validate` either turns them into a
//! [`ValidUser`] ready for the cache or reports every offending field.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([A-Za-z0-9_'+\-]+\.)*[A-Za-z0-9_'+\-]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$",
    )
    .expect("email pattern is valid")
});

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email";

/// Raw values as typed into the form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserForm {
    pub name: String,
    pub email: String,
    pub city: String,
}

impl UserForm {
    pub fn new(name: impl Into<String>, email: impl Into<String>, city: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            city: city.into(),
        }
    }
}

/// Input that passed validation; the only thing the cache accepts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidUser {
    name: String,
    email: String,
    city: String,
}

impl ValidUser {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

/// Per-field messages for a rejected form. City never fails.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [("name", &self.name), ("email", &self.email)]
            .into_iter()
            .filter_map(|(field, msg)| msg.as_ref().map(|m| format!("{field}: {m}")))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Check a form and produce validated input. Only the name is trimmed;
/// email must match as typed and city is stored verbatim.
pub fn validate(form: &UserForm) -> Result<ValidUser, FieldErrors> {
    let name = form.name.trim();
    let email = form.email.as_str();

    let mut errors = FieldErrors::default();
    if name.is_empty() {
        errors.name = Some(NAME_REQUIRED.to_string());
    }
    if email.is_empty() {
        errors.email = Some(EMAIL_REQUIRED.to_string());
    } else if !is_valid_email(email) {
        errors.email = Some(EMAIL_INVALID.to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ValidUser {
        name: name.to_string(),
        email: email.to_string(),
        city: form.city.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_minimal_valid_input() {
        let v = validate(&UserForm::new("Bob", "bob@x.com", "")).unwrap();
        assert_eq!(v.name(), "Bob");
        assert_eq!(v.email(), "bob@x.com");
        assert_eq!(v.city(), "");
    }

    #[test]
    fn trims_name_but_keeps_city_as_typed() {
        let v = validate(&UserForm::new("  Ana  ", "ana@mail.org", "  São Paulo  ")).unwrap();
        assert_eq!(v.name(), "Ana");
        assert_eq!(v.city(), "  São Paulo  ");

        let v = validate(&UserForm::new("Ana", "ana@mail.org", "   ")).unwrap();
        assert_eq!(v.city(), "   ");
    }

    #[test]
    fn padded_email_is_rejected() {
        let err = validate(&UserForm::new("Ana", " ana@mail.org ", "")).unwrap_err();
        assert_eq!(err.email.as_deref(), Some(EMAIL_INVALID));
    }

    #[test]
    fn whitespace_name_is_rejected() {
        let err = validate(&UserForm::new("   ", "a@b.co", "")).unwrap_err();
        assert_eq!(err.name.as_deref(), Some(NAME_REQUIRED));
        assert!(err.email.is_none());
    }

    #[test]
    fn reports_every_bad_field() {
        let err = validate(&UserForm::new("", "", "x")).unwrap_err();
        assert_eq!(err.name.as_deref(), Some(NAME_REQUIRED));
        assert_eq!(err.email.as_deref(), Some(EMAIL_REQUIRED));
        assert_eq!(err.to_string(), "name: Name is required; email: Email is required");
    }

    #[test]
    fn email_shapes() {
        for ok in ["a@b.co", "first.last@sub.example.org", "x+tag@mail-host.io", "Sincere@april.biz", "o'neil.x@b.com", "a@b-.com"] {
            assert!(is_valid_email(ok), "{ok} should be valid");
        }
        for bad in ["plain", "a@b", "@b.com", "a@.com", "a b@c.com", "a..b@c.com", "a@b.c", "a@-b.com", "a'@b.com", ".a@b.com", "a.@b.com"] {
            assert!(!is_valid_email(bad), "{bad} should be invalid");
        }
    }
}
