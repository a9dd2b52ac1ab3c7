use crate::state::{Id, Message as Msg};
use leptos::*;

#[component]
pub fn Message<F>(message: Msg, is_me: bool, on_delete: F) -> impl IntoView
where
    F: Fn(Id) + 'static + Clone,
{
    let id = message.id.clone();
    view! {
        <div class="flex items-start m-5 gap-2.5" class:flex-row-reverse=move || is_me>
            <div class="flex flex-col gap-1 max-w-[90%]">
                <div class="flex items-center space-x-2 rtl:space-x-reverse">
                    <span class="text-sm font-semibold text-gray-900 dark:text-white">
                        {message.username}
                    </span>
                </div>
                <div class="flex flex-col leading-1.5 p-4 border-gray-200 bg-gray-100 rounded-e-xl rounded-es-xl dark:bg-gray-700">
                    <p class="text-sm font-normal text-gray-900 dark:text-white">{message.text}</p>
                </div>
            </div>
            {is_me
                .then(|| {
                    view! {
                        <button
                            type="button"
                            class="inline-flex self-center items-center p-2 text-sm font-medium text-center text-red-600 bg-white rounded-lg hover:bg-gray-100 focus:ring-4 focus:outline-none dark:text-red-400 focus:ring-gray-50 dark:bg-gray-900 dark:hover:bg-gray-800 dark:focus:ring-gray-600"
                            on:click=move |_| on_delete(id.clone())
                        >
                            Delete
                        </button>
                    }
                })}
        </div>
    }
}
