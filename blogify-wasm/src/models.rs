use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Author {
    pub id: i64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub subscribed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: Author,
    // Даты остаются строками: UI показывает их как есть.
    #[serde(default)]
    pub publish_date: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub likes: i64,
    #[serde(default)]
    pub dislikes: i64,
    #[serde(default)]
    pub liked_by_me: bool,
    #[serde(default)]
    pub disliked_by_me: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: i64,
    #[serde(default)]
    pub user: Option<String>,
    pub content: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub parent: Option<i64>,
    #[serde(default)]
    pub replies: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
/// Постраничный конверт DRF. Кнопки Next/Prev включаются строго по
/// присутствию ссылок, без арифметики по `count`.
pub struct PostPage {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<Post>,
}

impl PostPage {
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupUser {
    pub username: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SignupResponse {
    pub access: String,
    pub user: SignupUser,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReactRequest {
    pub action: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionRequest {
    pub category_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
/// Комментарии приходят либо конвертом DRF, либо голым массивом —
/// зависит от серверной настройки пагинации.
pub enum CommentsBody {
    Page { results: Vec<Comment> },
    Plain(Vec<Comment>),
}

impl CommentsBody {
    pub fn into_comments(self) -> Vec<Comment> {
        match self {
            Self::Page { results } => results,
            Self::Plain(comments) => comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_page_flags_follow_links() {
        let raw = r#"{
            "count": 7,
            "next": "http://127.0.0.1:8000/api/posts/?page=3",
            "previous": null,
            "results": []
        }"#;
        let page: PostPage = serde_json::from_str(raw).expect("page should parse");
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn comments_body_accepts_both_shapes() {
        let plain = r#"[{"id": 1, "content": "hi"}]"#;
        let body: CommentsBody = serde_json::from_str(plain).expect("array should parse");
        assert_eq!(body.into_comments().len(), 1);

        let envelope = r#"{"count": 1, "results": [{"id": 2, "content": "hi"}]}"#;
        let body: CommentsBody = serde_json::from_str(envelope).expect("envelope should parse");
        let comments = body.into_comments();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].id, 2);
    }

    #[test]
    fn login_response_tolerates_missing_user_fields() {
        let raw = r#"{"access": "tok", "refresh": "r"}"#;
        let resp: LoginResponse = serde_json::from_str(raw).expect("response should parse");
        assert_eq!(resp.access, "tok");
        assert!(resp.username.is_none());
        assert!(!resp.is_admin);
    }
}
