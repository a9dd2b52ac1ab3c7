use url::Url;

static API_ORIGIN: Option<&'static str> = option_env!("CHAT_API_ORIGIN");

const DEFAULT_API_ORIGIN: &str = "https://chatify-api.up.railway.app";
const CONVERSATION_ID: &str = "550e8400-e29b-41d4-a716-446655440000";
const STORAGE_KEY: &str = "user";
const FALLBACK_AVATAR: &str = "https://api.multiavatar.com/seed3.svg";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid api origin {origin:?}: {source}")]
    Origin {
        origin: String,
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub api_origin: Url,
    pub conversation_id: String,
    pub storage_key: String,
    pub fallback_avatar: String,
}

impl Config {
    /// Defaults, with the origin overridable at build time through
    /// `CHAT_API_ORIGIN`.
    pub fn load() -> Result<Self, ConfigError> {
        Self::with_origin(API_ORIGIN.unwrap_or(DEFAULT_API_ORIGIN))
    }

    pub fn with_origin(origin: &str) -> Result<Self, ConfigError> {
        let api_origin = Url::parse(origin).map_err(|source| ConfigError::Origin {
            origin: origin.to_string(),
            source,
        })?;
        Ok(Self {
            api_origin,
            conversation_id: CONVERSATION_ID.to_string(),
            storage_key: STORAGE_KEY.to_string(),
            fallback_avatar: FALLBACK_AVATAR.to_string(),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::with_origin(DEFAULT_API_ORIGIN).expect("Default origin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(
            config.api_origin.as_str(),
            "https://chatify-api.up.railway.app/"
        );
        assert_eq!(config.conversation_id, CONVERSATION_ID);
        assert_eq!(config.storage_key, "user");
    }

    #[test]
    fn test_invalid_origin() {
        let err = Config::with_origin("not a url").unwrap_err();
        assert!(err.to_string().starts_with("Invalid api origin"));
    }
}
