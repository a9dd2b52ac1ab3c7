mod api;
mod app;
mod config;
mod conversation;
mod header;
mod message;
mod sanitize;
mod session;
mod state;
mod sync;

use app::*;
use leptos::*;

fn main() {
    console_error_panic_hook::set_once();
    mount_to_body(|| {
        view! { <App /> }
    })
}
