//! Клиентская библиотека для работы с REST API блога Blogify.
//!
//! Предоставляет типизированный фасад (`BlogifyClient`) поверх HTTP
//! (`reqwest`): посты с пагинацией, категории с подписками, комментарии
//! и ответы, реакции лайк/дизлайк, вход и регистрация.
//!
//! Клиент хранит bearer-токен после `login`/`signup` и автоматически
//! подставляет его: обязательно — в мутациях, опционально — в чтениях,
//! чтобы сервер персонализировал `liked_by_me` и `subscribed`.
#![warn(missing_docs)]

mod error;
mod http;
mod models;

pub use error::{ClientError, ClientResult, DUPLICATE_REPLY_MESSAGE};
pub use models::{AuthSession, Author, Category, Comment, Page, Post, Reaction, Tag, User};

use http::HttpApi;

#[derive(Debug, Clone)]
/// Клиент Blogify API с явным жизненным циклом сессии: `login`/`signup`
/// сохраняют токен, `clear_token` завершает сессию.
pub struct BlogifyClient {
    api: HttpApi,
    token: Option<String>,
}

impl BlogifyClient {
    /// Создаёт клиент с базовым URL бэкенда, например `http://127.0.0.1:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: HttpApi::new(base_url),
            token: None,
        }
    }

    /// Устанавливает bearer-токен вручную (например, из сохранённой сессии).
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий токен, если он установлен.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый токен (logout).
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    fn require_token(&self) -> ClientResult<&str> {
        self.token.as_deref().ok_or(ClientError::Unauthorized)
    }

    /// Выполняет вход и сохраняет полученный токен в клиенте.
    pub async fn login(&mut self, username: &str, password: &str) -> ClientResult<AuthSession> {
        let session = self.api.login(username, password).await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    /// Регистрирует пользователя и сохраняет полученный токен в клиенте.
    pub async fn signup(
        &mut self,
        username: &str,
        email: &str,
        password: &str,
        password_confirm: &str,
    ) -> ClientResult<AuthSession> {
        let session = self
            .api
            .signup(username, email, password, password_confirm)
            .await?;
        self.token = Some(session.token.clone());
        Ok(session)
    }

    /// Возвращает страницу постов с пагинацией `page`/`page_size`.
    pub async fn list_posts(&self, page: u32, page_size: u32) -> ClientResult<Page<Post>> {
        self.api.list_posts(page, page_size, self.token()).await
    }

    /// Ищет посты по заголовку или тегу.
    pub async fn search_posts(&self, query: &str, page: u32) -> ClientResult<Page<Post>> {
        self.api.search_posts(query, page, self.token()).await
    }

    /// Возвращает все категории; с токеном — с признаком подписки.
    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.api.categories(self.token()).await
    }

    /// Возвращает страницу постов выбранной категории.
    pub async fn category_posts(&self, category_id: i64, page: u32) -> ClientResult<Page<Post>> {
        self.api
            .category_posts(category_id, page, self.token())
            .await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: i64) -> ClientResult<Post> {
        self.api.get_post(id, self.token()).await
    }

    /// Возвращает комментарии поста (корневые вместе с ответами).
    pub async fn list_comments(&self, post_id: i64) -> ClientResult<Vec<Comment>> {
        self.api.list_comments(post_id, self.token()).await
    }

    /// Создаёт комментарий к посту и возвращает созданную сущность —
    /// вызывающий подмешивает её в свой список сам, без повторной выборки.
    ///
    /// Требует установленный токен.
    pub async fn create_comment(&self, post_id: i64, content: &str) -> ClientResult<Comment> {
        let token = self.require_token()?;
        self.api.create_comment(token, post_id, content).await
    }

    /// Отвечает на комментарий. Если у комментария уже есть ответ, сервер
    /// возвращает конфликт, который приходит как
    /// [`ClientError::DuplicateReply`].
    ///
    /// Требует установленный токен.
    pub async fn reply_to_comment(&self, comment_id: i64, content: &str) -> ClientResult<Comment> {
        let token = self.require_token()?;
        self.api.reply_to_comment(token, comment_id, content).await
    }

    /// Ставит или снимает реакцию на пост. Повторная одинаковая реакция
    /// снимает её, противоположная — переключает; сервер возвращает пост
    /// целиком, чтобы счётчики и флаги остались согласованными.
    ///
    /// Требует установленный токен.
    pub async fn react_to_post(&self, post_id: i64, reaction: Reaction) -> ClientResult<Post> {
        let token = self.require_token()?;
        self.api.react_to_post(token, post_id, reaction).await
    }

    /// Подписывает текущего пользователя на категорию.
    ///
    /// Требует установленный токен.
    pub async fn subscribe(&self, category_id: i64) -> ClientResult<String> {
        let token = self.require_token()?;
        self.api.subscribe(token, category_id).await
    }

    /// Отписывает текущего пользователя от категории. Отдельный endpoint,
    /// а не идемпотентный toggle.
    ///
    /// Требует установленный токен.
    pub async fn unsubscribe(&self, category_id: i64) -> ClientResult<String> {
        let token = self.require_token()?;
        self.api.unsubscribe(token, category_id).await
    }

    /// Абсолютный URL изображения поста относительно origin бэкенда.
    pub fn image_url(&self, path: &str) -> String {
        self.api.image_url(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_lifecycle_set_and_clear() {
        let mut client = BlogifyClient::new("http://127.0.0.1:8000");
        assert!(client.token().is_none());

        client.set_token("abc.def.ghi");
        assert_eq!(client.token(), Some("abc.def.ghi"));

        client.clear_token();
        assert!(client.token().is_none());
    }

    #[tokio::test]
    async fn mutations_without_token_fail_fast() {
        let client = BlogifyClient::new("http://127.0.0.1:8000");

        let err = client
            .create_comment(1, "hello")
            .await
            .expect_err("comment without token must fail");
        assert!(matches!(err, ClientError::Unauthorized));

        let err = client
            .react_to_post(1, Reaction::Like)
            .await
            .expect_err("react without token must fail");
        assert!(matches!(err, ClientError::Unauthorized));

        let err = client
            .subscribe(1)
            .await
            .expect_err("subscribe without token must fail");
        assert!(matches!(err, ClientError::Unauthorized));
    }
}
