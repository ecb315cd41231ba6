use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::home::PostCard;
use crate::models::Post;
use crate::state::AppState;
use crate::viewstate::CATEGORY_LOAD_FAILED;

#[component]
pub(crate) fn CategoryPage(state: AppState, category_id: i64) -> impl IntoView {
    let posts = RwSignal::new(Vec::<Post>::new());
    let category_name = RwSignal::new(None::<String>);
    let page = RwSignal::new(1u32);
    let has_next = RwSignal::new(false);
    let has_previous = RwSignal::new(false);
    let loading = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        let current_page = page.get();

        state.invalidate_fetches();
        let ticket = state.fetch_ticket();

        loading.set(true);
        error.set(None);

        let token = state.token.get_untracked();
        spawn_local(async move {
            // Имя категории не приходит вместе с постами, поэтому страница
            // тянет и список категорий, и посты.
            let fetched_posts = api::category_posts(category_id, current_page).await;
            let fetched_categories = api::categories(token.as_deref()).await;

            if !state.is_current(ticket) {
                return;
            }

            match (fetched_posts, fetched_categories) {
                (Ok(posts_page), Ok(categories)) => {
                    let name = categories
                        .into_iter()
                        .find(|category| category.id == category_id)
                        .map(|category| category.name);
                    category_name.set(name);
                    has_next.set(posts_page.has_next());
                    has_previous.set(posts_page.has_previous());
                    posts.set(posts_page.results);
                }
                _ => error.set(Some(CATEGORY_LOAD_FAILED.to_string())),
            }
            loading.set(false);
        });
    });

    view! {
        <section class="posts-section">
            <Show when=move || loading.get()>
                <div class="posts-loading">"Loading posts..."</div>
            </Show>
            <Show when=move || error.get().is_some()>
                <div class="posts-error">{move || error.get().unwrap_or_default()}</div>
            </Show>
            <Show when=move || category_name.get().is_some()>
                <h2 class="posts-title">
                    {move || format!("{} Posts", category_name.get().unwrap_or_default())}
                </h2>
            </Show>
            <Show when=move || {
                !loading.get() && error.get().is_none() && posts.get().is_empty()
            }>
                <div class="posts-empty">"No posts in this category yet."</div>
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
                    disabled=move || loading.get() || !has_previous.get()
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span>{move || format!("Page {}", page.get())}</span>
                <button
                    disabled=move || loading.get() || !has_next.get()
                    on:click=move |_| page.update(|p| *p += 1)
                >
                    "Next"
                </button>
            </div>
        </section>
    }
}
