use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::models::{
    Category, Comment, CommentRequest, CommentsBody, LoginRequest, LoginResponse, Post, PostPage,
    ReactRequest, SignupRequest, SignupResponse, SubscriptionRequest, User,
};
use crate::viewstate::{self, DUPLICATE_REPLY_MESSAGE};

/// Origin бэкенда; изображения и admin-ссылки резолвятся против него же.
pub(crate) const API_BASE_URL: &str = match option_env!("BLOGIFY_API_BASE_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8000",
};

/// Размер страницы списка постов (серверное значение по умолчанию).
pub(crate) const PAGE_SIZE: u32 = 5;

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl ApiError {
    pub(crate) fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }

    pub(crate) fn is_duplicate_reply(&self) -> bool {
        matches!(self, Self::Http { message, .. } if message == DUPLICATE_REPLY_MESSAGE)
    }
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn with_bearer(request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => request.header("Authorization", &format!("Bearer {token}")),
        None => request,
    }
}

async fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|err| ApiError::Decode(err.to_string()))
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();

    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => viewstate::extract_error_message(&body),
        Err(_) => None,
    };

    let message = message.unwrap_or_else(|| match status {
        400 => "Bad request".to_string(),
        401 => "Authentication required".to_string(),
        403 => "Permission denied".to_string(),
        404 => "Not found".to_string(),
        500..=599 => "Server error".to_string(),
        _ => format!("HTTP error {status}"),
    });

    ApiError::Http { status, message }
}

async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
    let response = request
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

async fn send_json<B: serde::Serialize, T: DeserializeOwned>(
    request: RequestBuilder,
    body: &B,
) -> Result<T, ApiError> {
    let response = request
        .json(body)
        .map_err(|err| ApiError::Network(err.to_string()))?
        .send()
        .await
        .map_err(|err| ApiError::Network(err.to_string()))?;

    if !response.ok() {
        return Err(parse_error_body(response).await);
    }

    parse_json(response).await
}

pub(crate) async fn login(username: &str, password: &str) -> Result<(String, User), ApiError> {
    let payload = LoginRequest {
        username: username.to_string(),
        password: password.to_string(),
    };

    let resp: LoginResponse = send_json(Request::post(&endpoint("/login/")), &payload).await?;

    // Ответ входа не содержит объекта пользователя — собираем его из
    // отправленного логина и серверного is_admin.
    let user = User {
        username: resp.username.unwrap_or_else(|| username.to_string()),
        is_admin: resp.is_admin,
    };
    Ok((resp.access, user))
}

pub(crate) async fn signup(
    username: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(String, User), ApiError> {
    let payload = SignupRequest {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
        password_confirm: password_confirm.to_string(),
    };

    let resp: SignupResponse = send_json(Request::post(&endpoint("/signup/")), &payload).await?;

    let user = User {
        username: resp.user.username,
        is_admin: false,
    };
    Ok((resp.access, user))
}

pub(crate) async fn list_posts(page: u32) -> Result<PostPage, ApiError> {
    let url = endpoint(&format!("/api/posts/?page={page}&page_size={PAGE_SIZE}"));
    send(Request::get(&url)).await
}

pub(crate) async fn search_posts(query: &str, page: u32) -> Result<PostPage, ApiError> {
    let url = endpoint("/posts/");
    let page = page.to_string();
    let request = Request::get(&url).query([("search", query), ("page", page.as_str())]);
    send(request).await
}

pub(crate) async fn category_posts(category_id: i64, page: u32) -> Result<PostPage, ApiError> {
    let url = endpoint(&format!("/api/posts/categories/{category_id}/?page={page}"));
    send(Request::get(&url)).await
}

pub(crate) async fn categories(token: Option<&str>) -> Result<Vec<Category>, ApiError> {
    let request = with_bearer(Request::get(&endpoint("/posts/categories/")), token);
    send(request).await
}

pub(crate) async fn get_post(id: i64, token: Option<&str>) -> Result<Post, ApiError> {
    let request = with_bearer(Request::get(&endpoint(&format!("/api/posts/{id}/"))), token);
    send(request).await
}

pub(crate) async fn list_comments(post_id: i64) -> Result<Vec<Comment>, ApiError> {
    let url = endpoint(&format!("/api/posts/{post_id}/comments/"));
    let body: CommentsBody = send(Request::get(&url)).await?;
    Ok(body.into_comments())
}

pub(crate) async fn create_comment(
    token: &str,
    post_id: i64,
    content: &str,
) -> Result<Comment, ApiError> {
    let payload = CommentRequest {
        content: content.to_string(),
    };
    let url = endpoint(&format!("/api/posts/{post_id}/comments/"));
    send_json(with_bearer(Request::post(&url), Some(token)), &payload).await
}

pub(crate) async fn reply_to_comment(
    token: &str,
    comment_id: i64,
    content: &str,
) -> Result<Comment, ApiError> {
    let payload = CommentRequest {
        content: content.to_string(),
    };
    let url = endpoint(&format!("/api/comments/{comment_id}/reply/"));
    send_json(with_bearer(Request::post(&url), Some(token)), &payload).await
}

pub(crate) async fn react_to_post(
    token: &str,
    post_id: i64,
    action: &str,
) -> Result<Post, ApiError> {
    let payload = ReactRequest {
        action: action.to_string(),
    };
    let url = endpoint(&format!("/api/posts/{post_id}/react/"));
    send_json(with_bearer(Request::post(&url), Some(token)), &payload).await
}

pub(crate) async fn subscribe(token: &str, category_id: i64) -> Result<(), ApiError> {
    let payload = SubscriptionRequest { category_id };
    let url = endpoint("/user/subscribe/");
    let _: serde_json::Value =
        send_json(with_bearer(Request::post(&url), Some(token)), &payload).await?;
    Ok(())
}

pub(crate) async fn unsubscribe(token: &str, category_id: i64) -> Result<(), ApiError> {
    let payload = SubscriptionRequest { category_id };
    let url = endpoint("/user/unsubscribe/");
    let _: serde_json::Value =
        send_json(with_bearer(Request::post(&url), Some(token)), &payload).await?;
    Ok(())
}
