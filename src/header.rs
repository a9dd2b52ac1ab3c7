use leptos::*;

/// Who is chatting: avatar and name, or the guest placeholders.
#[component]
pub fn UserInfo(name: String, avatar: String) -> impl IntoView {
    view! {
        <div class="flex flex-row m-4 dark:text-white">
            <img class="w-10 h-10 rounded-full" src=avatar alt="User Avatar" />
            <h3 class="text-base py-2.5 px-3 font-semibold text-gray-500 dark:text-gray-400 w-full">
                {name}
            </h3>
        </div>
    }
}
