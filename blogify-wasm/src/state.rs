use leptos::prelude::*;

use crate::models::User;
use crate::storage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Текущая страница приложения. Обычный enum вместо роутера:
/// страниц мало, а переключение остаётся явным.
pub(crate) enum Route {
    Home,
    Login,
    Register,
    Category(i64),
    Post(i64),
}

#[derive(Debug, Clone, Copy)]
/// Состояние приложения: аутентификация, текущая страница и счётчик
/// эпох для отбрасывания опоздавших ответов.
pub(crate) struct AppState {
    pub(crate) token: RwSignal<Option<String>>,
    pub(crate) user: RwSignal<Option<User>>,
    pub(crate) route: RwSignal<Route>,
    pub(crate) error: RwSignal<Option<String>>,
    fetch_epoch: RwSignal<u64>,
}

impl AppState {
    pub(crate) fn new() -> Self {
        Self {
            token: RwSignal::new(None),
            user: RwSignal::new(None),
            route: RwSignal::new(Route::Home),
            error: RwSignal::new(None),
            fetch_epoch: RwSignal::new(0),
        }
    }

    /// Восстанавливает сессию из localStorage при старте приложения.
    pub(crate) fn restore(&self) {
        if let Some(token) = storage::load_token() {
            self.token.set(Some(token));
        }
        if let Some(user) = storage::load_user() {
            self.user.set(Some(user));
        }
    }

    /// Начинает сессию: сохраняет токен и пользователя, переходит на главную.
    pub(crate) fn login(&self, user: User, token: String) {
        if let Err(err) = storage::save_token(&token) {
            self.set_error(err);
            return;
        }
        if let Err(err) = storage::save_user(&user) {
            self.set_error(err);
            return;
        }
        self.token.set(Some(token));
        self.user.set(Some(user));
        self.clear_error();
        self.navigate(Route::Home);
    }

    /// Завершает сессию: чистит хранилище и состояние, уводит на вход.
    pub(crate) fn logout(&self) {
        if let Err(err) = storage::clear_token() {
            self.set_error(err);
            return;
        }
        if let Err(err) = storage::clear_user() {
            self.set_error(err);
            return;
        }
        self.token.set(None);
        self.user.set(None);
        self.clear_error();
        self.navigate(Route::Login);
    }

    pub(crate) fn is_authenticated(&self) -> bool {
        self.token.get().is_some()
    }

    pub(crate) fn set_error(&self, message: impl Into<String>) {
        self.error.set(Some(message.into()));
    }

    pub(crate) fn clear_error(&self) {
        self.error.set(None);
    }

    /// Смена страницы делает недействительными все запросы, начатые до неё.
    pub(crate) fn navigate(&self, route: Route) {
        self.invalidate_fetches();
        self.clear_error();
        self.route.set(route);
    }

    /// Инвалидирует все ранее выданные эпохи (смена страницы или параметров).
    pub(crate) fn invalidate_fetches(&self) {
        self.fetch_epoch.update(|epoch| *epoch += 1);
    }

    /// Эпоха, под которой стартует запрос; ответ применяется, только пока
    /// она остаётся текущей.
    pub(crate) fn fetch_ticket(&self) -> u64 {
        self.fetch_epoch.get_untracked()
    }

    /// Актуален ли ещё ответ, начатый под `ticket`.
    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.fetch_epoch.get_untracked() == ticket
    }
}
