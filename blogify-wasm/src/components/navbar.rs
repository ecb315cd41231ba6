use leptos::prelude::*;

use crate::api::API_BASE_URL;
use crate::state::{AppState, Route};

#[component]
pub(crate) fn Navbar(state: AppState) -> impl IntoView {
    let admin_url = format!("{}/admin", API_BASE_URL.trim_end_matches('/'));

    let username = move || {
        state
            .user
            .get()
            .map(|user| user.username)
            .unwrap_or_default()
    };
    let is_admin = move || state.user.get().map(|user| user.is_admin).unwrap_or(false);

    view! {
        <nav class="navbar">
            <div class="navbar-left">
                <a class="navbar-logo" on:click=move |_| state.navigate(Route::Home)>
                    "Blogify"
                </a>
                <a class="navbar-link" on:click=move |_| state.navigate(Route::Home)>
                    "Home"
                </a>
            </div>
            <div class="navbar-right">
                <Show
                    when=move || state.is_authenticated()
                    fallback=move || {
                        view! {
                            <a class="navbar-link" on:click=move |_| state.navigate(Route::Login)>
                                "Login"
                            </a>
                            <a
                                class="navbar-link"
                                on:click=move |_| state.navigate(Route::Register)
                            >
                                "Register"
                            </a>
                        }
                    }
                >
                    <span class="navbar-username">{username}</span>
                    <Show when=is_admin>
                        <a class="navbar-link" href=admin_url.clone() target="_blank">
                            "Manage Blog"
                        </a>
                    </Show>
                    <button class="navbar-logout" on:click=move |_| state.logout()>
                        "Logout"
                    </button>
                </Show>
            </div>
        </nav>
    }
}
