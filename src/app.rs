use crate::api::{HttpMessageService, MessageService};
use crate::config::Config;
use crate::conversation::Conversation;
use crate::session::{LocalStorageSession, SessionProvider};
use leptos::logging::error;
use leptos::*;
use std::rc::Rc;

#[component]
pub fn App() -> impl IntoView {
    let config = Config::load().unwrap_or_else(|err| {
        error!("{err}, falling back to defaults");
        Config::default()
    });
    let session = LocalStorageSession::new(config.storage_key.clone()).load();
    let service: Rc<dyn MessageService> =
        Rc::new(HttpMessageService::new(config.api_origin.clone()));

    view! {
        <div class="flex flex-row">
            <Conversation
                session
                service
                conversation_id=config.conversation_id
                fallback_avatar=config.fallback_avatar
            />
        </div>
    }
}
