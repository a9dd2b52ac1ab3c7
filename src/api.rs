use crate::state::{Id, Message};
use async_trait::async_trait;
use leptos::logging::log;
use reqwest::{header::AUTHORIZATION, Response};
use serde::{Deserialize, Serialize};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Request failed {0}")]
    Transport(String),

    #[error("Invalid response {0}")]
    Decode(String),

    #[error("Url error {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMessage {
    pub text: String,
    #[serde(rename = "conversationId")]
    pub conversation_id: String,
}

/// What the service hands back for a created message.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Created {
    pub id: Id,
    #[serde(default)]
    pub text: String,
}

#[derive(Deserialize)]
struct CreateResponse {
    #[serde(rename = "latestMessage")]
    latest_message: Created,
}

/// The three exchanges the chat screen has with the message service.
#[async_trait(?Send)]
pub trait MessageService {
    async fn fetch_messages(&self, token: &str) -> Result<Vec<Message>, ApiError>;

    async fn send_message(&self, token: &str, message: &NewMessage) -> Result<Created, ApiError>;

    async fn delete_message(&self, token: &str, id: &Id) -> Result<(), ApiError>;
}

pub struct HttpMessageService {
    client: reqwest::Client,
    origin: Url,
}

impl HttpMessageService {
    pub fn new(origin: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            origin,
        }
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.origin.join(path)?)
    }
}

async fn check_status(res: Response) -> Result<Response, ApiError> {
    let status = res.status();
    if status.is_success() {
        Ok(res)
    } else {
        let body = res.text().await.unwrap_or_default();
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}

#[async_trait(?Send)]
impl MessageService for HttpMessageService {
    async fn fetch_messages(&self, token: &str) -> Result<Vec<Message>, ApiError> {
        let url = self.url("messages")?;
        log!("GET {url}");
        let res = self
            .client
            .get(url)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await?;
        let messages = check_status(res).await?.json().await?;
        Ok(messages)
    }

    async fn send_message(&self, token: &str, message: &NewMessage) -> Result<Created, ApiError> {
        let url = self.url("messages")?;
        log!("POST {url}");
        let res = self
            .client
            .post(url)
            .header(AUTHORIZATION, bearer(token))
            .json(message)
            .send()
            .await?;
        let created: CreateResponse = check_status(res).await?.json().await?;
        Ok(created.latest_message)
    }

    async fn delete_message(&self, token: &str, id: &Id) -> Result<(), ApiError> {
        let url = self.url(&format!("messages/{id}"))?;
        log!("DELETE {url}");
        let res = self
            .client
            .delete(url)
            .header(AUTHORIZATION, bearer(token))
            .send()
            .await?;
        check_status(res).await?;
        Ok(())
    }
}
