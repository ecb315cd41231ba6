//! Чистые переходы view-state: всё, что можно проверить без браузера.

use serde_json::Value;

use crate::models::{Category, Comment};

/// Точный текст серверного конфликта «у комментария уже есть ответ».
/// Сравнивается дословно — это API-контракт.
pub const DUPLICATE_REPLY_MESSAGE: &str = "This comment already has a reply.";

pub const LIKE_AUTH_ERROR: &str = "You must be logged in to like posts.";
pub const DISLIKE_AUTH_ERROR: &str = "You must be logged in to dislike posts.";
pub const LIKE_FAILED: &str = "Failed to like post.";
pub const DISLIKE_FAILED: &str = "Failed to dislike post.";
pub const COMMENT_FAILED: &str = "Failed to add comment.";
pub const COMMENTS_LOAD_FAILED: &str = "Failed to load comments.";
pub const POSTS_LOAD_FAILED: &str = "Failed to fetch posts";
pub const CATEGORY_LOAD_FAILED: &str = "Failed to load posts or category.";
pub const CATEGORIES_LOAD_FAILED: &str = "Failed to load categories.";
pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Registration failed";
pub const NETWORK_ERROR: &str = "Network error";

/// Подготовка полей формы входа: логин обрезается по краям, пароль
/// уходит на сервер дословно — пробелы в нём значимы. `None`, если
/// одно из полей пустое.
pub fn normalize_login_input(username: &str, password: &str) -> Option<(String, String)> {
    let username = username.trim();
    if username.is_empty() || password.is_empty() {
        return None;
    }
    Some((username.to_string(), password.to_string()))
}

/// Сообщение об отказе реакции: без токена сервер требует входа,
/// иначе это транспортная ошибка.
pub fn reaction_failure_message(action: &str, authenticated: bool) -> &'static str {
    match (action, authenticated) {
        ("like", false) => LIKE_AUTH_ERROR,
        ("like", true) => LIKE_FAILED,
        (_, false) => DISLIKE_AUTH_ERROR,
        (_, true) => DISLIKE_FAILED,
    }
}

/// Превью содержимого поста в карточке: первые `max_chars` символов
/// с многоточием при обрезке.
pub fn truncate_preview(content: &str, max_chars: usize) -> String {
    let mut preview: String = content.chars().take(max_chars).collect();
    if content.chars().count() > max_chars {
        preview.push_str("...");
    }
    preview
}

/// Абсолютный URL изображения: относительные пути резолвятся
/// против origin бэкенда, абсолютные проходят без изменений.
pub fn resolve_image_url(origin: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        origin.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Корневые комментарии в порядке выдачи сервера.
pub fn top_level_comments(comments: &[Comment]) -> Vec<Comment> {
    comments
        .iter()
        .filter(|comment| comment.parent.is_none())
        .cloned()
        .collect()
}

/// Можно ли ещё ответить на комментарий: сервер допускает один ответ,
/// клиент не предлагает форму, когда ответ уже есть.
pub fn accepts_reply(comment: &Comment) -> bool {
    comment.replies.is_empty()
}

/// Подмешивает созданный ответ в `replies` родительского комментария.
/// Возвращает `false`, если родитель не найден (например, список уже
/// перезагружен) — тогда вызывающий ничего не меняет.
pub fn merge_reply(comments: &mut [Comment], parent_id: i64, reply: Comment) -> bool {
    match comments.iter_mut().find(|c| c.id == parent_id) {
        Some(parent) => {
            parent.replies.push(reply);
            true
        }
        None => false,
    }
}

/// Переворачивает локальный флаг подписки; возвращает имя категории
/// для текста уведомления.
pub fn toggle_subscription(categories: &mut [Category], category_id: i64) -> Option<String> {
    let category = categories.iter_mut().find(|c| c.id == category_id)?;
    category.subscribed = !category.subscribed;
    Some(category.name.clone())
}

/// Текст транзиентного уведомления сайдбара.
pub fn subscription_notice(was_subscribed: bool, name: &str) -> String {
    let action = if was_subscribed {
        "unsubscribed"
    } else {
        "subscribed"
    };
    format!("You {action} to {name} category")
}

/// Сообщение из тела ошибки DRF: `detail` / `message` / `error`,
/// затем первая строка первой пофилдовой ошибки.
pub fn extract_error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(message) = object.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }

    for value in object.values() {
        if let Some(message) = value
            .as_array()
            .and_then(|items| items.first())
            .and_then(Value::as_str)
        {
            return Some(message.to_string());
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comment(id: i64, parent: Option<i64>) -> Comment {
        Comment {
            id,
            user: Some("alice".to_string()),
            content: format!("comment {id}"),
            created_at: None,
            parent,
            replies: Vec::new(),
        }
    }

    fn category(id: i64, name: &str, subscribed: bool) -> Category {
        Category {
            id,
            name: name.to_string(),
            subscribed,
        }
    }

    #[test]
    fn login_input_keeps_password_verbatim() {
        // Пароль мог быть зарегистрирован с пробелами по краям;
        // обрезка сделала бы вход невозможным.
        let (user, pass) =
            normalize_login_input(" alice ", " p@ss ").expect("fields are non-empty");
        assert_eq!(user, "alice");
        assert_eq!(pass, " p@ss ");
    }

    #[test]
    fn login_input_rejects_blank_fields() {
        assert!(normalize_login_input("   ", "secret").is_none());
        assert!(normalize_login_input("alice", "").is_none());
    }

    #[test]
    fn reaction_failure_message_depends_on_auth() {
        assert_eq!(reaction_failure_message("like", false), LIKE_AUTH_ERROR);
        assert_eq!(reaction_failure_message("dislike", false), DISLIKE_AUTH_ERROR);
        assert_eq!(reaction_failure_message("like", true), LIKE_FAILED);
        assert_eq!(reaction_failure_message("dislike", true), DISLIKE_FAILED);
    }

    #[test]
    fn truncate_preview_keeps_short_content() {
        assert_eq!(truncate_preview("short", 180), "short");
    }

    #[test]
    fn truncate_preview_appends_ellipsis() {
        let long = "x".repeat(200);
        let preview = truncate_preview(&long, 180);
        assert_eq!(preview.chars().count(), 183);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn truncate_preview_is_char_safe() {
        // Кириллица не должна резаться посреди code point.
        let content = "привет".repeat(40);
        let preview = truncate_preview(&content, 180);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn resolve_image_url_joins_relative_path() {
        assert_eq!(
            resolve_image_url("http://127.0.0.1:8000/", "/media/posts/a.png"),
            "http://127.0.0.1:8000/media/posts/a.png"
        );
    }

    #[test]
    fn resolve_image_url_keeps_absolute() {
        assert_eq!(
            resolve_image_url("http://127.0.0.1:8000", "https://cdn.example.com/a.png"),
            "https://cdn.example.com/a.png"
        );
    }

    #[test]
    fn top_level_comments_filters_replies() {
        let comments = vec![comment(1, None), comment(2, Some(1)), comment(3, None)];
        let top = top_level_comments(&comments);
        assert_eq!(top.iter().map(|c| c.id).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn accepts_reply_false_once_reply_exists() {
        let mut parent = comment(1, None);
        assert!(accepts_reply(&parent));
        parent.replies.push(comment(2, Some(1)));
        assert!(!accepts_reply(&parent));
    }

    #[test]
    fn merge_reply_attaches_to_parent() {
        let mut comments = vec![comment(1, None), comment(3, None)];
        let merged = merge_reply(&mut comments, 3, comment(4, Some(3)));
        assert!(merged);
        assert_eq!(comments[1].replies.len(), 1);
        assert_eq!(comments[1].replies[0].id, 4);
        assert!(comments[0].replies.is_empty());
    }

    #[test]
    fn merge_reply_reports_missing_parent() {
        let mut comments = vec![comment(1, None)];
        assert!(!merge_reply(&mut comments, 99, comment(4, Some(99))));
        assert!(comments[0].replies.is_empty());
    }

    #[test]
    fn toggle_subscription_flips_flag_and_returns_name() {
        let mut categories = vec![category(1, "rust", false), category(2, "go", true)];

        let name = toggle_subscription(&mut categories, 1);
        assert_eq!(name.as_deref(), Some("rust"));
        assert!(categories[0].subscribed);

        let name = toggle_subscription(&mut categories, 2);
        assert_eq!(name.as_deref(), Some("go"));
        assert!(!categories[1].subscribed);

        assert!(toggle_subscription(&mut categories, 99).is_none());
    }

    #[test]
    fn subscription_notice_names_the_action() {
        assert_eq!(
            subscription_notice(false, "rust"),
            "You subscribed to rust category"
        );
        assert_eq!(
            subscription_notice(true, "rust"),
            "You unsubscribed to rust category"
        );
    }

    #[test]
    fn extract_error_message_walks_known_keys() {
        assert_eq!(
            extract_error_message(&json!({"detail": "No active account"})).as_deref(),
            Some("No active account")
        );
        assert_eq!(
            extract_error_message(&json!({"error": DUPLICATE_REPLY_MESSAGE})).as_deref(),
            Some(DUPLICATE_REPLY_MESSAGE)
        );
        assert_eq!(
            extract_error_message(&json!({"username": ["already taken"]})).as_deref(),
            Some("already taken")
        );
        assert!(extract_error_message(&json!("plain")).is_none());
    }
}
