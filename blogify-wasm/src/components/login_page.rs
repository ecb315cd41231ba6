use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;
use crate::viewstate::{self, LOGIN_FAILED, NETWORK_ERROR};

#[component]
pub(crate) fn LoginPage(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let Some((username_value, password_value)) =
            viewstate::normalize_login_input(&username.get(), &password.get())
        else {
            error.set(Some(LOGIN_FAILED.to_string()));
            return;
        };

        loading.set(true);
        spawn_local(async move {
            match api::login(&username_value, &password_value).await {
                Ok((token, user)) => {
                    // login() переводит на главную; форма размонтируется сама.
                    state.login(user, token);
                }
                Err(api::ApiError::Network(_)) => error.set(Some(NETWORK_ERROR.to_string())),
                Err(api::ApiError::Http { message, .. }) if !message.is_empty() => {
                    error.set(Some(message));
                }
                Err(_) => error.set(Some(LOGIN_FAILED.to_string())),
            }
            loading.set(false);
        });
    };

    view! {
        <div class="auth-card">
            <h2>"Login"</h2>
            <form on:submit=on_submit>
                <input
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    placeholder="Password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Logging in..." } else { "Login" }}
                </button>
                <Show when=move || error.get().is_some()>
                    <div class="form-error">{move || error.get().unwrap_or_default()}</div>
                </Show>
            </form>
        </div>
    }
}
