//! Chat state and the three exchanges that change it.
//!
//! Every flow checks its preconditions on the current state, awaits the
//! service, then applies the outcome to the state as it is when the answer
//! arrives. Nothing orders concurrent flows: whichever completes last wins.

use crate::api::{ApiError, Created, MessageService, NewMessage};
use crate::sanitize::sanitize;
use crate::state::{seed_messages, Id, Message, Session};
use leptos::logging::{error, log, warn};
use leptos::{RwSignal, SignalUpdate, SignalWithUntracked};
use std::cell::RefCell;

/// Errors shown to the user. The `Display` text is what the banner says.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    #[error("Failed to fetch messages.")]
    FetchRejected,

    #[error("An error occurred while fetching messages.")]
    FetchFailed,

    #[error("Failed to send message. {0}")]
    SendRejected(String),

    #[error("An error occurred while sending the message.")]
    SendFailed,

    #[error("Message not found.")]
    NotFound(Id),

    #[error("You do not have permission to delete this message.")]
    PermissionDenied(Id),

    #[error("Failed to delete message.")]
    DeleteRejected,

    #[error("An error occurred while deleting the message.")]
    DeleteFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatState {
    pub messages: Vec<Message>,
    pub draft: String,
    pub error: Option<ChatError>,
}

impl Default for ChatState {
    fn default() -> Self {
        Self {
            messages: seed_messages(),
            draft: String::new(),
            error: None,
        }
    }
}

impl ChatState {
    /// Server messages are appended as is, duplicates included.
    pub fn apply_fetched(&mut self, result: Result<Vec<Message>, ApiError>) {
        match result {
            Ok(fetched) => {
                log!("Fetched {} messages", fetched.len());
                self.messages.extend(fetched);
            }
            Err(ApiError::Status { status, body }) => {
                warn!("Fetching messages rejected {status}: {body}");
                self.error = Some(ChatError::FetchRejected);
            }
            Err(err) => {
                error!("Fetching messages failed {err}");
                self.error = Some(ChatError::FetchFailed);
            }
        }
    }

    /// The draft ready to be sent, `None` when there is nothing to send.
    pub fn outgoing(&self, conversation_id: &str) -> Option<NewMessage> {
        if self.draft.trim().is_empty() {
            return None;
        }
        Some(NewMessage {
            text: sanitize(&self.draft),
            conversation_id: conversation_id.to_string(),
        })
    }

    /// A sent message is attributed to the local session, whatever the
    /// server recorded as its author.
    pub fn apply_sent(
        &mut self,
        session: &Session,
        result: Result<Created, ApiError>,
    ) {
        match result {
            Ok(created) => {
                self.messages.push(Message {
                    id: created.id,
                    text: created.text,
                    username: session.username.clone(),
                    user_id: session.id.clone(),
                });
                self.draft.clear();
            }
            Err(ApiError::Status { status, body }) => {
                warn!("Sending message rejected {status}: {body}");
                self.error = Some(ChatError::SendRejected(body));
            }
            Err(err) => {
                error!("Sending message failed {err}");
                self.error = Some(ChatError::SendFailed);
            }
        }
    }

    /// Local checks before asking the server to delete `id`.
    pub fn check_delete(&self, session: &Session, id: &Id) -> Result<(), ChatError> {
        let message = self
            .messages
            .iter()
            .find(|message| &message.id == id)
            .ok_or_else(|| ChatError::NotFound(id.clone()))?;
        if !message.is_owned_by(session) {
            return Err(ChatError::PermissionDenied(id.clone()));
        }
        Ok(())
    }

    pub fn apply_deleted(&mut self, id: &Id, result: Result<(), ApiError>) {
        match result {
            Ok(()) => self.messages.retain(|message| &message.id != id),
            Err(ApiError::Status { status, body }) => {
                warn!("Deleting message {id} rejected {status}: {body}");
                self.error = Some(ChatError::DeleteRejected);
            }
            Err(err) => {
                error!("Deleting message {id} failed {err}");
                self.error = Some(ChatError::DeleteFailed);
            }
        }
    }
}

/// Where the chat state lives between exchanges.
pub trait ChatStore {
    fn inspect<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R;
    fn modify(&self, f: impl FnOnce(&mut ChatState));
}

impl ChatStore for RwSignal<ChatState> {
    fn inspect<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R {
        self.with_untracked(f)
    }

    fn modify(&self, f: impl FnOnce(&mut ChatState)) {
        self.update(f)
    }
}

impl ChatStore for RefCell<ChatState> {
    fn inspect<R>(&self, f: impl FnOnce(&ChatState) -> R) -> R {
        f(&self.borrow())
    }

    fn modify(&self, f: impl FnOnce(&mut ChatState)) {
        f(&mut self.borrow_mut())
    }
}

pub async fn load_messages(
    store: &impl ChatStore,
    service: &dyn MessageService,
    session: &Session,
) {
    if !session.has_token() {
        return;
    }
    let result = service.fetch_messages(&session.token).await;
    store.modify(|state| state.apply_fetched(result));
}

pub async fn send_draft(
    store: &impl ChatStore,
    service: &dyn MessageService,
    session: &Session,
    conversation_id: &str,
) {
    let Some(outgoing) = store.inspect(|state| state.outgoing(conversation_id)) else {
        return;
    };
    let result = service.send_message(&session.token, &outgoing).await;
    store.modify(|state| state.apply_sent(session, result));
}

pub async fn delete_message(
    store: &impl ChatStore,
    service: &dyn MessageService,
    session: &Session,
    id: Id,
) {
    if let Err(err) = store.inspect(|state| state.check_delete(session, &id)) {
        warn!("Refusing to delete {id}: {err}");
        store.modify(|state| state.error = Some(err));
        return;
    }
    let result = service.delete_message(&session.token, &id).await;
    store.modify(|state| state.apply_deleted(&id, result));
}
