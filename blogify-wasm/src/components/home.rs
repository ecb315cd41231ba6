use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::Post;
use crate::state::{AppState, Route};
use crate::viewstate::{self, POSTS_LOAD_FAILED};

#[component]
pub(crate) fn HomePage(state: AppState) -> impl IntoView {
    let posts = RwSignal::new(Vec::<Post>::new());
    let page = RwSignal::new(1u32);
    let has_next = RwSignal::new(false);
    let has_previous = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    let search_input = RwSignal::new(String::new());
    let query = RwSignal::new(String::new());

    // Один цикл загрузки на каждое изменение зависимостей (страница, поиск).
    // Новый запрос инвалидирует эпоху предыдущего: опоздавший ответ
    // не перезапишет более свежее состояние.
    Effect::new(move |_| {
        let current_page = page.get();
        let current_query = query.get();

        state.invalidate_fetches();
        let ticket = state.fetch_ticket();

        loading.set(true);
        error.set(None);

        spawn_local(async move {
            let result = if current_query.is_empty() {
                api::list_posts(current_page).await
            } else {
                api::search_posts(&current_query, current_page).await
            };

            if !state.is_current(ticket) {
                return;
            }

            match result {
                Ok(fetched) => {
                    has_next.set(fetched.has_next());
                    has_previous.set(fetched.has_previous());
                    posts.set(fetched.results);
                }
                Err(_) => error.set(Some(POSTS_LOAD_FAILED.to_string())),
            }
            loading.set(false);
        });
    });

    let on_search = move |ev: SubmitEvent| {
        ev.prevent_default();
        page.set(1);
        query.set(search_input.get().trim().to_string());
    };

    let prev_disabled = move || loading.get() || !has_previous.get();
    let next_disabled = move || loading.get() || !has_next.get();

    view! {
        <Show when=move || !state.is_authenticated()>
            <div class="home-hero">
                <h1 class="home-title">"Welcome to Blogify"</h1>
                <p class="home-subtitle">
                    "Share your stories, connect with others, and explore a world of ideas."
                </p>
                <div class="home-actions">
                    <button on:click=move |_| state.navigate(Route::Register)>
                        "Get Started"
                    </button>
                    <button on:click=move |_| state.navigate(Route::Login)>"Sign In"</button>
                </div>
            </div>
        </Show>

        <Show when=move || state.is_authenticated()>
            <section class="posts-section">
                <h2 class="posts-title">"Latest Posts"</h2>

                <form class="posts-search-bar" on:submit=on_search>
                    <input
                        placeholder="Search by title or tag..."
                        prop:value=move || search_input.get()
                        on:input=move |ev| search_input.set(event_target_value(&ev))
                    />
                    <button type="submit" disabled=move || loading.get()>
                        {move || if loading.get() { "Searching..." } else { "Search" }}
                    </button>
                </form>

                <Show when=move || loading.get()>
                    <div class="posts-loading">"Loading posts..."</div>
                </Show>
                <Show when=move || error.get().is_some()>
                    <div class="posts-error">{move || error.get().unwrap_or_default()}</div>
                </Show>
                <Show when=move || {
                    !loading.get() && error.get().is_none() && posts.get().is_empty()
                }>
                    <div class="posts-empty">"No posts yet."</div>
                </Show>

                <div class="posts-list">
                    <For
                        each=move || posts.get()
                        key=|post| post.id
                        children=move |post| {
                            view! { <PostCard state=state post=post /> }
                        }
                    />
                </div>

                <div class="posts-pager">
                    <button
                        disabled=prev_disabled
                        on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                    >
                        "Previous"
                    </button>
                    <span>{move || format!("Page {}", page.get())}</span>
                    <button disabled=next_disabled on:click=move |_| page.update(|p| *p += 1)>
                        "Next"
                    </button>
                </div>
            </section>
        </Show>
    }
}

#[component]
pub(crate) fn PostCard(state: AppState, post: Post) -> impl IntoView {
    let post_id = post.id;
    let date = post.publish_date.clone().unwrap_or_default();
    let preview = viewstate::truncate_preview(&post.content, 180);

    view! {
        <div class="post-card" on:click=move |_| state.navigate(Route::Post(post_id))>
            <h3 class="post-title">{post.title.clone()}</h3>
            <div class="post-meta">
                <span>{format!("By {}", post.author.username)}</span>
                <span>{format!(" | {date}")}</span>
            </div>
            <p class="post-content">{preview}</p>
        </div>
    }
}
