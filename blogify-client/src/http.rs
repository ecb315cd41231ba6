use reqwest::{Client, Method};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::error::{ClientError, ClientResult, extract_error_message};
use crate::models::{AuthSession, Category, Comment, Page, Post, Reaction, User};

#[derive(Debug, Serialize)]
struct LoginRequestDto<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct SignupRequestDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    password_confirm: &'a str,
}

#[derive(Debug, Serialize)]
struct CommentRequestDto<'a> {
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ReactRequestDto<'a> {
    action: &'a str,
}

#[derive(Debug, Serialize)]
struct SubscriptionRequestDto {
    category_id: i64,
}

#[derive(Debug, Deserialize)]
struct LoginResponseDto {
    access: String,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    is_admin: bool,
}

#[derive(Debug, Deserialize)]
struct SignupUserDto {
    username: String,
}

#[derive(Debug, Deserialize)]
struct SignupResponseDto {
    access: String,
    user: SignupUserDto,
}

#[derive(Debug, Deserialize)]
struct MessageDto {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl MessageDto {
    fn into_message(self) -> String {
        self.message
            .or(self.detail)
            .unwrap_or_else(|| "ok".to_string())
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Список комментариев приходит либо как постраничный конверт DRF, либо как
/// «голый» массив — зависит от настроек пагинации на сервере. Принимаем оба.
enum MaybePaginated<T> {
    Page(Page<T>),
    Plain(Vec<T>),
}

impl<T> MaybePaginated<T> {
    fn into_items(self) -> Vec<T> {
        match self {
            Self::Page(page) => page.results,
            Self::Plain(items) => items,
        }
    }
}

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    page_size: u32,
}

#[derive(Serialize)]
struct SearchQuery<'a> {
    search: &'a str,
    page: u32,
}

#[derive(Debug, Clone)]
/// HTTP-слой поверх REST API Blogify.
///
/// Не хранит токен: авторизованные вызовы принимают его аргументом.
/// Управление сессией — задача фасада `BlogifyClient`.
pub(crate) struct HttpApi {
    base_url: String,
    client: Client,
}

impl HttpApi {
    pub(crate) fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .timeout(Duration::from_secs(15))
            .build()
            .expect("failed to build reqwest client");

        Self {
            base_url: base_url.into(),
            client,
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Абсолютный URL изображения. Бэкенд отдаёт относительные пути вида
    /// `/media/posts/...`, которые резолвятся относительно его origin.
    pub(crate) fn image_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        self.endpoint(path)
    }

    async fn decode_error(response: reqwest::Response) -> ClientError {
        let status = response.status();

        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => extract_error_message(&body),
            Err(_) => None,
        };
        tracing::debug!(status = %status, message = ?message, "api request failed");
        ClientError::from_http_status(status, message)
    }

    /// Универсальный helper для POST с json-payload.
    async fn send_json<TReq, TRes>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> ClientResult<TRes>
    where
        TReq: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, method = %method, "sending api request");

        let mut request = self.client.request(method, url).json(body);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(ClientError::from_reqwest)
    }

    /// GET с опциональной авторизацией: с токеном сервер персонализирует
    /// поля `liked_by_me`/`disliked_by_me`/`subscribed`.
    async fn get_json<TQuery, TRes>(
        &self,
        path: &str,
        query: Option<&TQuery>,
        token: Option<&str>,
    ) -> ClientResult<TRes>
    where
        TQuery: Serialize,
        TRes: DeserializeOwned,
    {
        let url = self.endpoint(path);
        tracing::debug!(%url, "sending api request");

        let mut request = self.client.request(Method::GET, url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(ClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }

        response
            .json::<TRes>()
            .await
            .map_err(ClientError::from_reqwest)
    }

    pub(crate) async fn login(&self, username: &str, password: &str) -> ClientResult<AuthSession> {
        let payload = LoginRequestDto { username, password };
        let dto: LoginResponseDto = self
            .send_json(Method::POST, "/login/", &payload, None)
            .await?;

        // Ответ входа не содержит объекта пользователя: собираем его из
        // отправленного логина и серверного признака is_admin.
        Ok(AuthSession {
            token: dto.access,
            user: User {
                username: dto.username.unwrap_or_else(|| username.to_string()),
                is_admin: dto.is_admin,
            },
        })
    }

    pub(crate) async fn signup(
        &self,
        username: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> ClientResult<AuthSession> {
        let payload = SignupRequestDto {
            username,
            email,
            password,
            password_confirm,
        };
        let dto: SignupResponseDto = self
            .send_json(Method::POST, "/signup/", &payload, None)
            .await?;

        Ok(AuthSession {
            token: dto.access,
            user: User {
                username: dto.user.username,
                is_admin: false,
            },
        })
    }

    pub(crate) async fn list_posts(
        &self,
        page: u32,
        page_size: u32,
        token: Option<&str>,
    ) -> ClientResult<Page<Post>> {
        let query = PageQuery { page, page_size };
        self.get_json("/api/posts/", Some(&query), token).await
    }

    pub(crate) async fn search_posts(
        &self,
        search: &str,
        page: u32,
        token: Option<&str>,
    ) -> ClientResult<Page<Post>> {
        let query = SearchQuery { search, page };
        self.get_json("/posts/", Some(&query), token).await
    }

    pub(crate) async fn categories(&self, token: Option<&str>) -> ClientResult<Vec<Category>> {
        self.get_json::<(), _>("/posts/categories/", None, token)
            .await
    }

    pub(crate) async fn category_posts(
        &self,
        category_id: i64,
        page: u32,
        token: Option<&str>,
    ) -> ClientResult<Page<Post>> {
        let query = [("page", page)];
        self.get_json(
            &format!("/api/posts/categories/{category_id}/"),
            Some(&query),
            token,
        )
        .await
    }

    pub(crate) async fn get_post(&self, id: i64, token: Option<&str>) -> ClientResult<Post> {
        self.get_json::<(), _>(&format!("/api/posts/{id}/"), None, token)
            .await
    }

    pub(crate) async fn list_comments(
        &self,
        post_id: i64,
        token: Option<&str>,
    ) -> ClientResult<Vec<Comment>> {
        let body: MaybePaginated<Comment> = self
            .get_json::<(), _>(&format!("/api/posts/{post_id}/comments/"), None, token)
            .await?;
        Ok(body.into_items())
    }

    pub(crate) async fn create_comment(
        &self,
        token: &str,
        post_id: i64,
        content: &str,
    ) -> ClientResult<Comment> {
        let payload = CommentRequestDto { content };
        self.send_json(
            Method::POST,
            &format!("/api/posts/{post_id}/comments/"),
            &payload,
            Some(token),
        )
        .await
    }

    pub(crate) async fn reply_to_comment(
        &self,
        token: &str,
        comment_id: i64,
        content: &str,
    ) -> ClientResult<Comment> {
        let payload = CommentRequestDto { content };
        self.send_json(
            Method::POST,
            &format!("/api/comments/{comment_id}/reply/"),
            &payload,
            Some(token),
        )
        .await
    }

    pub(crate) async fn react_to_post(
        &self,
        token: &str,
        post_id: i64,
        reaction: Reaction,
    ) -> ClientResult<Post> {
        let payload = ReactRequestDto {
            action: reaction.as_action(),
        };
        self.send_json(
            Method::POST,
            &format!("/api/posts/{post_id}/react/"),
            &payload,
            Some(token),
        )
        .await
    }

    pub(crate) async fn subscribe(&self, token: &str, category_id: i64) -> ClientResult<String> {
        let payload = SubscriptionRequestDto { category_id };
        let dto: MessageDto = self
            .send_json(Method::POST, "/user/subscribe/", &payload, Some(token))
            .await?;
        Ok(dto.into_message())
    }

    pub(crate) async fn unsubscribe(&self, token: &str, category_id: i64) -> ClientResult<String> {
        let payload = SubscriptionRequestDto { category_id };
        let dto: MessageDto = self
            .send_json(Method::POST, "/user/unsubscribe/", &payload, Some(token))
            .await?;
        Ok(dto.into_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_normalizes_slashes() {
        let api = HttpApi::new("http://127.0.0.1:8000/");
        let full = api.endpoint("/api/posts/");
        assert_eq!(full, "http://127.0.0.1:8000/api/posts/");
    }

    #[test]
    fn image_url_resolves_relative_path_against_origin() {
        let api = HttpApi::new("http://127.0.0.1:8000");
        assert_eq!(
            api.image_url("/media/posts/cat.png"),
            "http://127.0.0.1:8000/media/posts/cat.png"
        );
    }

    #[test]
    fn image_url_keeps_absolute_url() {
        let api = HttpApi::new("http://127.0.0.1:8000");
        assert_eq!(
            api.image_url("https://cdn.example.com/cat.png"),
            "https://cdn.example.com/cat.png"
        );
    }

    #[test]
    fn maybe_paginated_accepts_plain_array() {
        let raw = r#"[{"id": 1, "content": "hi"}]"#;
        let parsed: MaybePaginated<Comment> =
            serde_json::from_str(raw).expect("plain array should parse");
        let items = parsed.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
    }

    #[test]
    fn maybe_paginated_accepts_drf_envelope() {
        let raw = r#"{
            "count": 1,
            "next": null,
            "previous": null,
            "results": [{"id": 2, "content": "hi", "parent": null, "replies": []}]
        }"#;
        let parsed: MaybePaginated<Comment> =
            serde_json::from_str(raw).expect("envelope should parse");
        let items = parsed.into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 2);
    }

    #[test]
    fn message_dto_prefers_message_over_detail() {
        let dto = MessageDto {
            message: Some("Subscribed to category: rust".to_string()),
            detail: Some("Subscribed successfully.".to_string()),
        };
        assert_eq!(dto.into_message(), "Subscribed to category: rust");
    }
}
