use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Category;
use crate::state::{AppState, Route};
use crate::viewstate::{self, CATEGORIES_LOAD_FAILED};

#[component]
pub(crate) fn Sidebar(state: AppState) -> impl IntoView {
    let categories = RwSignal::new(Vec::<Category>::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    // Счётчик показов уведомления: таймер гасит плашку только если за
    // две секунды не появилось более свежее уведомление.
    let notice_epoch = RwSignal::new(0u64);

    Effect::new(move |_| {
        // Список зависит от токена: флаг subscribed персонализирован.
        // Сайдбар живёт поверх страниц, поэтому навигационные эпохи его
        // не касаются; устаревший ответ отсекается по смене токена.
        let token = state.token.get();

        spawn_local(async move {
            let result = api::categories(token.as_deref()).await;
            if state.token.get_untracked() != token {
                return;
            }
            match result {
                Ok(fetched) => {
                    categories.set(fetched);
                    error.set(None);
                }
                Err(_) => error.set(Some(CATEGORIES_LOAD_FAILED.to_string())),
            }
        });
    });

    let show_notice = move |text: String| {
        notice.set(Some(text));
        let epoch = notice_epoch.get_untracked() + 1;
        notice_epoch.set(epoch);
        spawn_local(async move {
            TimeoutFuture::new(2_000).await;
            if notice_epoch.get_untracked() == epoch {
                notice.set(None);
            }
        });
    };

    let on_toggle = move |category_id: i64| {
        let Some(token) = state.token.get_untracked() else {
            return;
        };

        let was_subscribed = categories
            .get_untracked()
            .iter()
            .find(|category| category.id == category_id)
            .map(|category| category.subscribed)
            .unwrap_or(false);

        spawn_local(async move {
            let result = if was_subscribed {
                api::unsubscribe(&token, category_id).await
            } else {
                api::subscribe(&token, category_id).await
            };

            // Ошибку подписки не показываем, локальное состояние не трогаем.
            if result.is_err() {
                return;
            }

            let mut name = None;
            categories.update(|list| {
                name = viewstate::toggle_subscription(list, category_id);
            });
            if let Some(name) = name {
                show_notice(viewstate::subscription_notice(was_subscribed, &name));
            }
        });
    };

    view! {
        <aside class="sidebar">
            <h3 class="sidebar-title">"Categories"</h3>
            <Show when=move || error.get().is_some()>
                <div class="sidebar-error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <Show when=move || notice.get().is_some()>
                <div class="sidebar-notice">{move || notice.get().unwrap_or_default()}</div>
            </Show>
            <ul class="sidebar-list">
                <For
                    each=move || categories.get()
                    key=|category| (category.id, category.subscribed)
                    children=move |category| {
                        let category_id = category.id;
                        let subscribed = category.subscribed;
                        view! {
                            <li class="sidebar-item">
                                <span
                                    class="sidebar-category"
                                    on:click=move |_| {
                                        state.navigate(Route::Category(category_id))
                                    }
                                >
                                    {category.name.clone()}
                                </span>
                                <button
                                    class="sidebar-subscribe"
                                    class:active=subscribed
                                    on:click=move |_| on_toggle(category_id)
                                >
                                    {if subscribed { "Unsubscribe" } else { "Subscribe" }}
                                </button>
                            </li>
                        }
                    }
                />
            </ul>
        </aside>
    }
}
