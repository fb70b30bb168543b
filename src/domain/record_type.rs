use std::fmt;

use serde::{Deserialize, Serialize};

/// Authentication source of a user record.
///
/// Unknown labels are kept verbatim so that stored data written by a newer
/// reference list survives a load/persist cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    #[default]
    Ldap,
    Local,
    Other(String),
}

impl RecordType {
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::Ldap => "LDAP",
            RecordType::Local => "Local",
            RecordType::Other(label) => label,
        }
    }

    /// Local records carry their own credential and therefore need a password.
    pub fn requires_password(&self) -> bool {
        matches!(self, RecordType::Local)
    }
}

impl From<String> for RecordType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "LDAP" => RecordType::Ldap,
            "Local" => RecordType::Local,
            _ => RecordType::Other(value),
        }
    }
}

impl From<&str> for RecordType {
    fn from(value: &str) -> Self {
        RecordType::from(value.to_string())
    }
}

impl From<RecordType> for String {
    fn from(value: RecordType) -> Self {
        match value {
            RecordType::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A selectable entry of the record type reference list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordTypeOption {
    pub label: String,
    pub value: RecordType,
}

impl RecordTypeOption {
    pub fn new(label: impl Into<String>, value: RecordType) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The built-in reference list shown by the presentation layer.
pub fn default_record_types() -> Vec<RecordTypeOption> {
    vec![
        RecordTypeOption::new("LDAP", RecordType::Ldap),
        RecordTypeOption::new("Local", RecordType::Local),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_to_variants() {
        assert_eq!(RecordType::from("LDAP"), RecordType::Ldap);
        assert_eq!(RecordType::from("Local"), RecordType::Local);
        assert_eq!(RecordType::from("ldap"), RecordType::Other("ldap".into()));
    }

    #[test]
    fn unknown_label_survives_json() {
        let json = serde_json::to_string(&RecordType::Other("Kerberos".into())).unwrap();
        assert_eq!(json, "\"Kerberos\"");
        let back: RecordType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, RecordType::Other("Kerberos".into()));
    }

    #[test]
    fn only_local_requires_password() {
        assert!(RecordType::Local.requires_password());
        assert!(!RecordType::Ldap.requires_password());
        assert!(!RecordType::Other("Local ".into()).requires_password());
    }
}
