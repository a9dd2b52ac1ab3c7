use crate::api::MessageService;
use crate::header::UserInfo;
use crate::message::Message;
use crate::state::{Id, Session};
use crate::sync::{delete_message, load_messages, send_draft, ChatState};
use leptos::leptos_dom::ev::SubmitEvent;
use leptos::*;
use std::rc::Rc;

#[component]
pub fn Conversation(
    session: Session,
    service: Rc<dyn MessageService>,
    conversation_id: String,
    fallback_avatar: String,
) -> impl IntoView {
    let name = session.display_name().to_string();
    let avatar = session.avatar_or(&fallback_avatar).to_string();

    let state = create_rw_signal(ChatState::default());
    let session = store_value(session);
    let service = store_value(service);
    let conversation_id = store_value(conversation_id);

    // Single attempt per mount, only for signed in users.
    if session.with_value(Session::has_token) {
        spawn_local(async move {
            let service = service.get_value();
            let session = session.get_value();
            load_messages(&state, service.as_ref(), &session).await;
        });
    }

    let update_draft = move |ev| {
        let v = event_target_value(&ev);
        state.update(|state| state.draft = v);
    };
    let send_message = move |ev: SubmitEvent| {
        ev.prevent_default();
        spawn_local(async move {
            let service = service.get_value();
            let session = session.get_value();
            let conversation_id = conversation_id.get_value();
            send_draft(&state, service.as_ref(), &session, &conversation_id).await;
        });
    };
    let on_delete = move |id: Id| {
        spawn_local(async move {
            let service = service.get_value();
            let session = session.get_value();
            delete_message(&state, service.as_ref(), &session, id).await;
        });
    };

    view! {
        <div class="h-dvh max-h-dvh grow flex flex-col scrollbar w-screen max-w-screen">
            <UserInfo name avatar />
            <main class="grow flex flex-col overflow-auto max-h-screen">
                {move || {
                    session
                        .with_value(|session| {
                            state
                                .with(|state| {
                                    state
                                        .messages
                                        .iter()
                                        .map(|message| {
                                            let is_me = message.is_owned_by(session);
                                            view! {
                                                <Message message=message.clone() is_me on_delete />
                                            }
                                        })
                                        .collect::<Vec<_>>()
                                })
                        })
                }}
            </main>
            <form class="w-full" on:submit=send_message>
                <label for="chat" class="sr-only">
                    Your message
                </label>
                <div class="flex items-center px-3 py-2 bg-gray-50 dark:bg-gray-700">
                    <input
                        id="chat"
                        type="text"
                        class="block mx-4 p-2.5 w-full text-sm text-gray-900 bg-white rounded-lg border border-gray-300 focus:ring-blue-500 focus:border-blue-500 dark:bg-gray-800 dark:border-gray-600 dark:placeholder-gray-400 dark:text-white dark:focus:ring-blue-500 dark:focus:border-blue-500"
                        placeholder="Type a message..."
                        on:input=update_draft
                        prop:value=move || state.with(|state| state.draft.clone())
                    />
                    <button
                        type="submit"
                        class="inline-flex justify-center p-2 text-blue-600 rounded-full cursor-pointer hover:bg-blue-100 dark:text-blue-500 dark:hover:bg-gray-600"
                    >
                        Send
                    </button>
                </div>
            </form>
            {move || {
                state
                    .with(|state| {
                        state
                            .error
                            .as_ref()
                            .map(|err| {
                                view! {
                                    <p class="px-3 py-2 text-sm text-red-600 dark:text-red-400">
                                        {err.to_string()}
                                    </p>
                                }
                            })
                    })
            }}
        </div>
    }
}
