use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::state::AppState;
use crate::viewstate::{NETWORK_ERROR, SIGNUP_FAILED};

#[component]
pub(crate) fn RegisterPage(state: AppState) -> impl IntoView {
    let username = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        error.set(None);

        let username_value = username.get().trim().to_string();
        let email_value = email.get().trim().to_string();
        let password_value = password.get().to_string();
        let confirm_value = password_confirm.get().to_string();

        if username_value.is_empty() || email_value.is_empty() || password_value.is_empty() {
            error.set(Some(SIGNUP_FAILED.to_string()));
            return;
        }

        loading.set(true);
        spawn_local(async move {
            match api::signup(&username_value, &email_value, &password_value, &confirm_value).await
            {
                Ok((token, user)) => {
                    state.login(user, token);
                }
                Err(api::ApiError::Network(_)) => error.set(Some(NETWORK_ERROR.to_string())),
                // Пофилдовые ошибки сериализатора показываем дословно.
                Err(api::ApiError::Http { message, .. }) if !message.is_empty() => {
                    error.set(Some(message));
                }
                Err(_) => error.set(Some(SIGNUP_FAILED.to_string())),
            }
            loading.set(false);
        });
    };

    view! {
        <div class="auth-card">
            <h2>"Register"</h2>
            <form on:submit=on_submit>
                <input
                    placeholder="Username"
                    prop:value=move || username.get()
                    on:input=move |ev| username.set(event_target_value(&ev))
                />
                <input
                    placeholder="Email"
                    type="email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <input
                    placeholder="Password"
                    type="password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <input
                    placeholder="Confirm Password"
                    type="password"
                    prop:value=move || password_confirm.get()
                    on:input=move |ev| password_confirm.set(event_target_value(&ev))
                />
                <button type="submit" disabled=move || loading.get()>
                    {move || if loading.get() { "Registering..." } else { "Register" }}
                </button>
                <Show when=move || error.get().is_some()>
                    <div class="form-error">{move || error.get().unwrap_or_default()}</div>
                </Show>
            </form>
        </div>
    }
}
