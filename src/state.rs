use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier as handed out by the chat service or stored with the session.
///
/// The service is not consistent about numbers vs strings, so both are
/// accepted, and any JSON number is kept as given. A numeric id never equals
/// a textual one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::Number(id) => write!(f, "{id}"),
            Id::Text(id) => f.write_str(id),
        }
    }
}

impl From<u64> for Id {
    fn from(id: u64) -> Self {
        Id::Number(id.into())
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Id::Text(id.to_string())
    }
}

/// `null` reads as an empty string.
fn nullable<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Session {
    #[serde(deserialize_with = "nullable")]
    pub token: String,
    pub id: Option<Id>,
    #[serde(deserialize_with = "nullable")]
    pub username: String,
    #[serde(deserialize_with = "nullable")]
    pub avatar: String,
}

impl Session {
    pub fn has_token(&self) -> bool {
        !self.token.is_empty()
    }

    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            "Guest"
        } else {
            &self.username
        }
    }

    pub fn avatar_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.avatar.is_empty() {
            fallback
        } else {
            &self.avatar
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Message {
    pub id: Id,
    #[serde(default, deserialize_with = "nullable")]
    pub text: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
    #[serde(rename = "userId", default)]
    pub user_id: Option<Id>,
}

impl Message {
    /// Whether `session` authored this message. Both ids must be present.
    pub fn is_owned_by(&self, session: &Session) -> bool {
        match (&self.user_id, &session.id) {
            (Some(author), Some(me)) => author == me,
            _ => false,
        }
    }
}

/// Content shown before the service has answered.
pub fn seed_messages() -> Vec<Message> {
    [
        (1u64, "Tja tja, hur mår du?"),
        (3, "Sover du eller?!"),
        (6, "Vad har du för planer för helgen?"),
        (7, "Jag tänkte kanske gå på bio."),
    ]
    .into_iter()
    .map(|(id, text)| Message {
        id: Id::from(id),
        text: text.to_string(),
        username: "Erik".to_string(),
        user_id: Some(Id::from(1)),
    })
    .collect()
}
