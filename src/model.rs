//! User record types shared by the cache, the loader and the UI.
//!
//! `User` is the in-memory record; `RemoteUser` is the wire shape returned by
//! the mock REST endpoint (`{ id, name, email, address: { city } }`).

use serde::{Deserialize, Deserializer};
use std::fmt;

/// Opaque record identity.
///
/// Fetched records keep the id the source gave them (numbers become their
/// decimal string); records created locally get a random v4 UUID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Draw a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub city: String,
}

impl User {
    /// Up to two uppercase initials taken from the words of the name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .flat_map(|c| c.to_uppercase())
            .take(2)
            .collect()
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct RemoteAddress {
    #[serde(default)]
    pub city: Option<String>,
}

/// One element of the JSON array served by the users endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct RemoteUser {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub address: Option<RemoteAddress>,
}

impl From<RemoteUser> for User {
    fn from(r: RemoteUser) -> Self {
        let city = r.address.and_then(|a| a.city).unwrap_or_default();
        Self {
            id: UserId(r.id),
            name: r.name,
            email: r.email,
            city,
        }
    }
}

fn id_from_string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_user_numeric_id_and_nested_city() {
        let json = r#"[{"id": 1, "name": "Leanne Graham", "username": "Bret",
            "email": "Sincere@april.biz", "address": {"street": "Kulas Light", "city": "Gwenborough"}}]"#;
        let parsed: Vec<RemoteUser> = serde_json::from_str(json).unwrap();
        let user: User = parsed.into_iter().next().unwrap().into();
        assert_eq!(user.id.as_str(), "1");
        assert_eq!(user.city, "Gwenborough");
        assert_eq!(user.email, "Sincere@april.biz");
    }

    #[test]
    fn remote_user_string_id_without_address() {
        let json = r#"{"id": "abc", "name": "X", "email": "x@y.io"}"#;
        let user: User = serde_json::from_str::<RemoteUser>(json).unwrap().into();
        assert_eq!(user.id, UserId::from("abc"));
        assert_eq!(user.city, "");
    }

    #[test]
    fn initials_take_first_two_words() {
        let u = User {
            id: "1".into(),
            name: "ana maria silva".into(),
            email: String::new(),
            city: String::new(),
        };
        assert_eq!(u.initials(), "AM");
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(UserId::generate(), UserId::generate());
    }
}
