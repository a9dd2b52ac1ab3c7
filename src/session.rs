use crate::state::Session;
use leptos::logging::{log, warn};
use wasm_bindgen::JsValue;

/// Source of the signed-in user, read once when the chat is mounted.
pub trait SessionProvider {
    fn load(&self) -> Session;
}

/// Reads the user record the login page left in `localStorage`.
pub struct LocalStorageSession {
    key: String,
}

impl LocalStorageSession {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn item(&self) -> Result<Option<String>, JsValue> {
        let Some(storage) = leptos::window().local_storage()? else {
            return Ok(None);
        };
        storage.get_item(&self.key)
    }
}

impl SessionProvider for LocalStorageSession {
    fn load(&self) -> Session {
        let raw = match self.item() {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Storage unavailable {err:?}");
                None
            }
        };
        let session = parse_session(raw.as_deref());
        log!("Loaded user {:?} ({:?})", session.id, session.username);
        session
    }
}

/// Missing or unreadable records give a guest session.
pub fn parse_session(raw: Option<&str>) -> Session {
    let Some(raw) = raw else {
        return Session::default();
    };
    // `JSON.stringify(null)` is what an explicit logout leaves behind.
    match serde_json::from_str::<Option<Session>>(raw) {
        Ok(session) => session.unwrap_or_default(),
        Err(err) => {
            warn!("Ignoring stored user: {err}");
            Session::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Id;

    #[test]
    fn test_parse_session() {
        let session = parse_session(Some(
            r#"{"token": "abc", "id": 4, "username": "anna", "avatar": "https://a/b.png", "email": "x"}"#,
        ));
        assert_eq!(
            session,
            Session {
                token: "abc".to_string(),
                id: Some(Id::from(4)),
                username: "anna".to_string(),
                avatar: "https://a/b.png".to_string(),
            }
        );
    }

    #[test]
    fn test_partial_session() {
        let session = parse_session(Some(r#"{"token": "abc", "avatar": null}"#));
        assert!(session.has_token());
        assert_eq!(session.id, None);
        assert_eq!(session.display_name(), "Guest");
        assert_eq!(session.avatar, "");
    }

    #[test]
    fn test_negative_user_id() {
        let session = parse_session(Some(r#"{"token": "abc", "id": -7, "username": "anna"}"#));
        assert_eq!(session.display_name(), "anna");
        assert_eq!(session.id.map(|id| id.to_string()).as_deref(), Some("-7"));
    }

    #[test]
    fn test_missing_or_corrupt() {
        assert_eq!(parse_session(None), Session::default());
        assert_eq!(parse_session(Some("null")), Session::default());
        assert_eq!(parse_session(Some("{not json")), Session::default());
        assert_eq!(parse_session(Some("[1, 2]")), Session::default());
    }

    struct Fixed(Session);

    impl SessionProvider for Fixed {
        fn load(&self) -> Session {
            self.0.clone()
        }
    }

    #[test]
    fn test_provider_object() {
        let provider: Box<dyn SessionProvider> = Box::new(Fixed(Session {
            username: "erik".to_string(),
            ..Default::default()
        }));
        assert_eq!(provider.load().display_name(), "erik");
    }
}
