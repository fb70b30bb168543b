use std::fmt;

use serde::{Deserialize, Serialize};

use super::{RecordType, Tag};

pub const LOGIN_MAX_CHARS: usize = 100;
pub const PASSWORD_MAX_CHARS: usize = 100;

pub const LOGIN_ERROR: &str = "Login is required (max 100 characters)";
pub const PASSWORD_ERROR: &str = "Password is required (max 100 characters)";

/// Identifier of a user record, taken from its creation time in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-field validation messages. A field is present only while it fails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub login: Option<String>,
    pub password: Option<String>,
}

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.login.is_none() && self.password.is_none()
    }
}

/// A user record as edited by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(rename = "type", default)]
    pub record_type: RecordType,
    #[serde(default)]
    pub login: String,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Derived from the other fields; never written to storage.
    #[serde(skip)]
    pub errors: FieldErrors,
}

/// Shallow update of a user. Fields left as `None` are untouched.
///
/// `password` is doubly optional: `Some(None)` clears the password.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub record_type: Option<RecordType>,
    pub login: Option<String>,
    pub password: Option<Option<String>>,
    pub tags: Option<Vec<Tag>>,
}

impl UserPatch {
    pub fn login(login: impl Into<String>) -> Self {
        Self {
            login: Some(login.into()),
            ..Self::default()
        }
    }

    pub fn record_type(record_type: RecordType) -> Self {
        Self {
            record_type: Some(record_type),
            ..Self::default()
        }
    }

    pub fn password(password: Option<String>) -> Self {
        Self {
            password: Some(password),
            ..Self::default()
        }
    }

    pub fn tags(tags: Vec<Tag>) -> Self {
        Self {
            tags: Some(tags),
            ..Self::default()
        }
    }
}

impl User {
    /// Creates a blank LDAP user.
    ///
    /// # Notes
    /// A blank user is invalid (empty login) until it is edited.
    pub fn new(id: UserId) -> Self {
        Self {
            id,
            record_type: RecordType::Ldap,
            login: String::new(),
            password: None,
            tags: Vec::new(),
            errors: FieldErrors::default(),
        }
    }

    pub fn apply_patch(&mut self, patch: UserPatch) {
        if let Some(record_type) = patch.record_type {
            self.record_type = record_type;
        }
        if let Some(login) = patch.login {
            self.login = login;
        }
        if let Some(password) = patch.password {
            self.password = password;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
    }

    /// Computes the field errors for the current values without storing them.
    pub fn check(&self) -> FieldErrors {
        let mut errors = FieldErrors::default();

        if !within_limit(&self.login, LOGIN_MAX_CHARS) {
            errors.login = Some(LOGIN_ERROR.to_string());
        }

        if self.record_type.requires_password() {
            let password_ok = self
                .password
                .as_deref()
                .is_some_and(|password| within_limit(password, PASSWORD_MAX_CHARS));
            if !password_ok {
                errors.password = Some(PASSWORD_ERROR.to_string());
            }
        }

        errors
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_empty()
    }
}

fn within_limit(value: &str, max: usize) -> bool {
    let len = value.chars().count();
    len > 0 && len <= max
}

/// Validates `user`, overwriting `user.errors` when `record_errors` is set.
///
/// With `record_errors == false` the user is left untouched.
pub fn validate_user(user: &mut User, record_errors: bool) -> bool {
    let errors = user.check();
    let valid = errors.is_empty();
    if record_errors {
        user.errors = errors;
    }
    valid
}
