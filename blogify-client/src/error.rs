use serde_json::Value;
use thiserror::Error;

/// Точный текст серверной ошибки для повторного ответа на комментарий.
///
/// Бэкенд допускает не более одного ответа на комментарий и сообщает об этом
/// ровно этой строкой. Клиент обязан сравнивать её дословно — это часть
/// API-контракта, а не эвристика.
pub const DUPLICATE_REPLY_MESSAGE: &str = "This comment already has a reply.";

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `blogify-client`.
pub enum ClientError {
    /// Ошибка HTTP-транспорта (`reqwest`).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Требуется авторизация (отсутствует/некорректен токен).
    #[error("unauthorized")]
    Unauthorized,

    /// Запрошенный ресурс не найден.
    #[error("not found")]
    NotFound,

    /// Комментарий уже имеет ответ (бизнес-конфликт, не фатален для UI).
    #[error("{DUPLICATE_REPLY_MESSAGE}")]
    DuplicateReply,

    /// Некорректный запрос или бизнес-ошибка валидации.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Результат операций `blogify-client`.
pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    pub(crate) fn from_http_status(status: reqwest::StatusCode, message: Option<String>) -> Self {
        if message.as_deref() == Some(DUPLICATE_REPLY_MESSAGE) {
            return Self::DuplicateReply;
        }

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Self::Unauthorized
            }
            reqwest::StatusCode::NOT_FOUND => Self::NotFound,
            _ => {
                let message = message.unwrap_or_else(|| format!("http status {status}"));
                Self::InvalidRequest(message)
            }
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

/// Достаёт человекочитаемое сообщение из тела ошибки DRF.
///
/// Сервер отвечает по-разному: `{"detail": ...}`, `{"message": ...}`,
/// `{"error": ...}` либо пофилдовые ошибки вида `{"email": ["..."]}`.
/// Берём первое осмысленное значение в этом порядке.
pub(crate) fn extract_error_message(body: &Value) -> Option<String> {
    let object = body.as_object()?;

    for key in ["detail", "message", "error"] {
        if let Some(message) = object.get(key).and_then(Value::as_str) {
            return Some(message.to_string());
        }
    }

    // Пофилдовые ошибки сериализатора: берём первую строку первого поля.
    for value in object.values() {
        if let Some(first) = value.as_array().and_then(|items| items.first()) {
            if let Some(message) = first.as_str() {
                return Some(message.to_string());
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_error_message_prefers_detail() {
        let body = json!({"detail": "No active account", "message": "other"});
        assert_eq!(
            extract_error_message(&body).as_deref(),
            Some("No active account")
        );
    }

    #[test]
    fn extract_error_message_reads_error_key() {
        let body = json!({"error": "Invalid action"});
        assert_eq!(extract_error_message(&body).as_deref(), Some("Invalid action"));
    }

    #[test]
    fn extract_error_message_falls_back_to_field_errors() {
        let body = json!({"email": ["user with this email already exists."]});
        assert_eq!(
            extract_error_message(&body).as_deref(),
            Some("user with this email already exists.")
        );
    }

    #[test]
    fn extract_error_message_returns_none_for_non_object() {
        let body = json!(["plain", "array"]);
        assert!(extract_error_message(&body).is_none());
    }

    #[test]
    fn from_http_status_maps_auth_codes() {
        let err = ClientError::from_http_status(reqwest::StatusCode::UNAUTHORIZED, None);
        assert!(matches!(err, ClientError::Unauthorized));

        let err = ClientError::from_http_status(reqwest::StatusCode::FORBIDDEN, None);
        assert!(matches!(err, ClientError::Unauthorized));
    }

    #[test]
    fn from_http_status_recognizes_duplicate_reply() {
        let err = ClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some(DUPLICATE_REPLY_MESSAGE.to_string()),
        );
        assert!(matches!(err, ClientError::DuplicateReply));
    }

    #[test]
    fn from_http_status_keeps_server_message() {
        let err = ClientError::from_http_status(
            reqwest::StatusCode::BAD_REQUEST,
            Some("Content is required".to_string()),
        );
        match err {
            ClientError::InvalidRequest(message) => assert_eq!(message, "Content is required"),
            other => panic!("expected InvalidRequest, got {other:?}"),
        }
    }
}
