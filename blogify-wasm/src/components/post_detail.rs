use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{Comment, Post};
use crate::state::AppState;
use crate::viewstate::{self, COMMENT_FAILED, COMMENTS_LOAD_FAILED, DUPLICATE_REPLY_MESSAGE};

#[component]
pub(crate) fn PostDetailPage(state: AppState, post_id: i64) -> impl IntoView {
    let post = RwSignal::new(None::<Post>);
    let comments = RwSignal::new(Vec::<Comment>::new());
    let comment_text = RwSignal::new(String::new());
    let replying_to = RwSignal::new(None::<i64>);
    let reply_text = RwSignal::new(String::new());
    let loading = RwSignal::new(true);
    // Занятость пары лайк/дизлайк: пока идёт round-trip, обе кнопки заперты.
    let loading_like = RwSignal::new(false);
    let error = RwSignal::new(None::<String>);

    Effect::new(move |_| {
        state.invalidate_fetches();
        let ticket = state.fetch_ticket();

        let token = state.token.get_untracked();
        spawn_local(async move {
            let fetched_post = api::get_post(post_id, token.as_deref()).await;
            let fetched_comments = api::list_comments(post_id).await;

            if !state.is_current(ticket) {
                return;
            }

            match fetched_post {
                Ok(value) => post.set(Some(value)),
                Err(_) => error.set(Some("Failed to load post.".to_string())),
            }
            match fetched_comments {
                Ok(values) => comments.set(values),
                Err(_) => error.set(Some(COMMENTS_LOAD_FAILED.to_string())),
            }
            loading.set(false);
        });
    });

    let on_comment_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let Some(token) = state.token.get() else {
            return;
        };

        let content = comment_text.get().trim().to_string();
        if content.is_empty() {
            return;
        }

        spawn_local(async move {
            match api::create_comment(&token, post_id, &content).await {
                Ok(created) => {
                    // Сервер вернул созданный комментарий — подмешиваем его
                    // в начало списка без повторной выборки.
                    comments.update(|list| list.insert(0, created));
                    comment_text.set(String::new());
                    error.set(None);
                }
                Err(_) => error.set(Some(COMMENT_FAILED.to_string())),
            }
        });
    };

    let on_reply_submit = move |comment_id: i64| {
        let Some(token) = state.token.get() else {
            return;
        };

        let content = reply_text.get().trim().to_string();
        if content.is_empty() {
            return;
        }

        spawn_local(async move {
            match api::reply_to_comment(&token, comment_id, &content).await {
                Ok(reply) => {
                    comments.update(|list| {
                        viewstate::merge_reply(list, comment_id, reply);
                    });
                    replying_to.set(None);
                    reply_text.set(String::new());
                    error.set(None);
                }
                // Конфликт «уже есть ответ» не фатален: закрываем форму
                // и показываем фиксированное сообщение.
                Err(err) if err.is_duplicate_reply() => {
                    replying_to.set(None);
                    reply_text.set(String::new());
                    error.set(Some(DUPLICATE_REPLY_MESSAGE.to_string()));
                }
                Err(err) => error.set(Some(err.to_string())),
            }
        });
    };

    // Кнопки остаются активными и для гостя: клик без токена
    // показывает требование входа вместо молчаливой блокировки.
    let on_react = move |action: &'static str| {
        let Some(token) = state.token.get() else {
            error.set(Some(
                viewstate::reaction_failure_message(action, false).to_string(),
            ));
            return;
        };

        loading_like.set(true);
        spawn_local(async move {
            match api::react_to_post(&token, post_id, action).await {
                // Пост заменяется целиком: счётчики и флаги liked_by_me
                // остаются согласованными с сервером.
                Ok(updated) => {
                    post.set(Some(updated));
                    error.set(None);
                }
                Err(err) if err.is_unauthorized() => {
                    error.set(Some(
                        viewstate::reaction_failure_message(action, false).to_string(),
                    ));
                }
                Err(_) => {
                    error.set(Some(
                        viewstate::reaction_failure_message(action, true).to_string(),
                    ));
                }
            }
            loading_like.set(false);
        });
    };

    let react_disabled = move || loading_like.get();

    view! {
        <Show when=move || loading.get()>
            <div class="posts-loading">"Loading..."</div>
        </Show>
        <Show when=move || error.get().is_some()>
            <div class="posts-error">{move || error.get().unwrap_or_default()}</div>
        </Show>
        <Show when=move || !loading.get() && post.get().is_none() && error.get().is_none()>
            <div class="posts-empty">"Post not found."</div>
        </Show>

        {move || {
            post.get().map(|current| {
                let image = current
                    .image
                    .as_deref()
                    .map(|path| viewstate::resolve_image_url(api::API_BASE_URL, path));
                let author = current.author.username.clone();
                let date = current.publish_date.clone().unwrap_or_default();
                let category = current
                    .category
                    .as_ref()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Uncategorized".to_string());
                let tags = current
                    .tags
                    .iter()
                    .map(|tag| format!("#{} ", tag.name))
                    .collect::<String>();

                view! {
                    <article class="post-detail">
                        <h2>{current.title.clone()}</h2>
                        {image
                            .map(|src| {
                                view! { <img class="post-detail-image" src=src /> }
                            })}
                        <div class="post-detail-meta">
                            <span>{format!("By {author}")}</span>
                            <span>{format!(" | {date}")}</span>
                            <span>{format!(" | Category: {category}")}</span>
                        </div>
                        <div class="post-detail-content">{current.content.clone()}</div>
                        <div class="post-detail-tags">{tags}</div>
                        <div class="post-detail-actions">
                            <button
                                class="react-button"
                                class:active=current.liked_by_me
                                disabled=react_disabled
                                on:click=move |_| on_react("like")
                            >
                                {format!("Like {}", current.likes)}
                            </button>
                            <button
                                class="react-button"
                                class:active=current.disliked_by_me
                                disabled=react_disabled
                                on:click=move |_| on_react("dislike")
                            >
                                {format!("Dislike {}", current.dislikes)}
                            </button>
                        </div>
                    </article>
                }
            })
        }}

        <section class="post-detail-comments">
            <h3>"Comments"</h3>
            <Show when=move || comments.get().is_empty()>
                <div class="posts-empty">"No comments yet."</div>
            </Show>
            <For
                each=move || viewstate::top_level_comments(&comments.get())
                key=|comment| (comment.id, comment.replies.len())
                children=move |comment| {
                    let comment_id = comment.id;
                    let user = comment.user.clone().unwrap_or_else(|| "Unknown".to_string());
                    let created_at = comment.created_at.clone().unwrap_or_default();
                    let content = comment.content.clone();
                    let can_reply = viewstate::accepts_reply(&comment);
                    let first_reply = comment.replies.first().cloned();

                    view! {
                        <div class="comment">
                            <div class="comment-meta">
                                <span>{user}</span>
                                <span>{format!(" | {created_at}")}</span>
                            </div>
                            <div class="comment-text">{content}</div>

                            <Show when=move || {
                                state.is_authenticated() && can_reply
                                    && replying_to.get() != Some(comment_id)
                            }>
                                <button on:click=move |_| replying_to.set(Some(comment_id))>
                                    "Reply"
                                </button>
                            </Show>

                            <Show when=move || replying_to.get() == Some(comment_id)>
                                <form
                                    class="comment-form"
                                    on:submit=move |ev: SubmitEvent| {
                                        ev.prevent_default();
                                        on_reply_submit(comment_id);
                                    }
                                >
                                    <textarea
                                        placeholder="Write your reply..."
                                        prop:value=move || reply_text.get()
                                        on:input=move |ev| reply_text.set(event_target_value(&ev))
                                    ></textarea>
                                    <button type="submit">"Submit Reply"</button>
                                    <button
                                        type="button"
                                        on:click=move |_| replying_to.set(None)
                                    >
                                        "Cancel"
                                    </button>
                                </form>
                            </Show>

                            {first_reply
                                .map(|reply| {
                                    let user = reply
                                        .user
                                        .clone()
                                        .unwrap_or_else(|| "Unknown".to_string());
                                    let created_at =
                                        reply.created_at.clone().unwrap_or_default();
                                    view! {
                                        <div class="comment reply">
                                            <div class="comment-meta">
                                                <span>{user}</span>
                                                <span>{format!(" | {created_at}")}</span>
                                            </div>
                                            <div class="comment-text">{reply.content.clone()}</div>
                                        </div>
                                    }
                                })}
                        </div>
                    }
                }
            />

            <Show
                when=move || state.is_authenticated()
                fallback=|| {
                    view! {
                        <div class="posts-empty">"You must be logged in to comment."</div>
                    }
                }
            >
                <form class="comment-form" on:submit=on_comment_submit>
                    <textarea
                        placeholder="Add a comment..."
                        prop:value=move || comment_text.get()
                        on:input=move |ev| comment_text.set(event_target_value(&ev))
                    ></textarea>
                    <button type="submit">"Submit"</button>
                </form>
            </Show>
        </section>
    }
}
