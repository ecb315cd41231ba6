use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Текущий пользователь клиента.
///
/// Сервер не возвращает полный профиль при входе, поэтому модель хранит
/// ровно то, что доступно клиенту: логин и признак администратора.
pub struct User {
    /// Логин.
    pub username: String,
    /// Является ли пользователь администратором блога.
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Автор поста (вложенная модель внутри `Post`).
pub struct Author {
    /// Идентификатор автора.
    pub id: i64,
    /// Логин автора.
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Тег поста.
pub struct Tag {
    /// Идентификатор тега.
    pub id: i64,
    /// Название тега.
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Категория блога с признаком подписки текущего пользователя.
pub struct Category {
    /// Идентификатор категории.
    pub id: i64,
    /// Название категории.
    pub name: String,
    /// Описание (присутствует не во всех ответах).
    #[serde(default)]
    pub description: Option<String>,
    /// Подписан ли текущий пользователь. Без токена всегда `false`.
    #[serde(default)]
    pub subscribed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста.
    pub content: String,
    /// Автор поста.
    pub author: Author,
    /// Дата публикации (UTC).
    #[serde(default)]
    pub publish_date: Option<DateTime<Utc>>,
    /// Относительный или абсолютный путь к изображению.
    #[serde(default)]
    pub image: Option<String>,
    /// Категория поста.
    #[serde(default)]
    pub category: Option<Category>,
    /// Теги поста.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Количество лайков.
    #[serde(default)]
    pub likes: i64,
    /// Количество дизлайков.
    #[serde(default)]
    pub dislikes: i64,
    /// Лайкнул ли пост текущий пользователь.
    #[serde(default)]
    pub liked_by_me: bool,
    /// Дизлайкнул ли пост текущий пользователь.
    #[serde(default)]
    pub disliked_by_me: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Комментарий к посту. У корневого комментария может быть не более одного
/// ответа; ограничение контролирует сервер.
pub struct Comment {
    /// Идентификатор комментария.
    pub id: i64,
    /// Логин автора комментария.
    #[serde(default)]
    pub user: Option<String>,
    /// Текст комментария.
    pub content: String,
    /// Дата создания (UTC).
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    /// Идентификатор родительского комментария, если это ответ.
    #[serde(default)]
    pub parent: Option<i64>,
    /// Ответы на комментарий.
    #[serde(default)]
    pub replies: Vec<Comment>,
}

impl Comment {
    /// Является ли комментарий корневым (не ответом).
    pub fn is_top_level(&self) -> bool {
        self.parent.is_none()
    }

    /// Можно ли ещё ответить на этот комментарий.
    pub fn accepts_reply(&self) -> bool {
        self.replies.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Страница постраничной выдачи в формате DRF.
///
/// Признаки наличия соседних страниц выводятся из присутствия ссылок
/// `next`/`previous`, а не из арифметики по `count`.
pub struct Page<T> {
    /// Общее количество элементов в выборке.
    #[serde(default)]
    pub count: u64,
    /// Ссылка на следующую страницу, если она есть.
    #[serde(default)]
    pub next: Option<String>,
    /// Ссылка на предыдущую страницу, если она есть.
    #[serde(default)]
    pub previous: Option<String>,
    /// Элементы текущей страницы.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Есть ли следующая страница.
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Есть ли предыдущая страница.
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
/// Ответ после успешного входа или регистрации.
pub struct AuthSession {
    /// Opaque bearer-токен для заголовка `Authorization`.
    pub token: String,
    /// Данные пользователя, известные клиенту.
    pub user: User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Реакция на пост.
pub enum Reaction {
    /// Лайк.
    Like,
    /// Дизлайк.
    Dislike,
}

impl Reaction {
    /// Значение поля `action` в теле запроса `react`.
    pub fn as_action(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Dislike => "dislike",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_flags_follow_link_presence() {
        let page: Page<i64> = Page {
            count: 12,
            next: None,
            previous: Some("http://127.0.0.1:8000/api/posts/?page=1".to_string()),
            results: vec![1, 2],
        };
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn comment_accepts_reply_only_when_replies_empty() {
        let mut comment = Comment {
            id: 1,
            user: Some("alice".to_string()),
            content: "top".to_string(),
            created_at: None,
            parent: None,
            replies: Vec::new(),
        };
        assert!(comment.is_top_level());
        assert!(comment.accepts_reply());

        comment.replies.push(Comment {
            id: 2,
            user: Some("bob".to_string()),
            content: "reply".to_string(),
            created_at: None,
            parent: Some(1),
            replies: Vec::new(),
        });
        assert!(!comment.accepts_reply());
        assert!(!comment.replies[0].is_top_level());
    }

    #[test]
    fn post_deserializes_with_missing_optional_fields() {
        let raw = r#"{
            "id": 7,
            "title": "t",
            "content": "c",
            "author": {"id": 1, "username": "alice"}
        }"#;
        let post: Post = serde_json::from_str(raw).expect("post should parse");
        assert_eq!(post.id, 7);
        assert_eq!(post.likes, 0);
        assert!(!post.liked_by_me);
        assert!(post.tags.is_empty());
        assert!(post.category.is_none());
    }

    #[test]
    fn reaction_maps_to_wire_action() {
        assert_eq!(Reaction::Like.as_action(), "like");
        assert_eq!(Reaction::Dislike.as_action(), "dislike");
    }
}
