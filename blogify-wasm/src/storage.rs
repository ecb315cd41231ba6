use web_sys::Storage;

use crate::models::User;

const TOKEN_KEY: &str = "blogify_token";
const USER_KEY: &str = "blogify_user";

fn local_storage() -> Result<Storage, String> {
    let window = web_sys::window().ok_or_else(|| "window is not available".to_string())?;
    window
        .local_storage()
        .map_err(|_| "failed to access localStorage".to_string())?
        .ok_or_else(|| "localStorage is not available".to_string())
}

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

pub(crate) fn load_token() -> Option<String> {
    let storage = local_storage().ok()?;
    let raw = storage.get_item(TOKEN_KEY).ok()??;
    parse_token(&raw)
}

pub(crate) fn save_token(token: &str) -> Result<(), String> {
    local_storage()?
        .set_item(TOKEN_KEY, token)
        .map_err(|_| "failed to save token".to_string())
}

pub(crate) fn clear_token() -> Result<(), String> {
    local_storage()?
        .remove_item(TOKEN_KEY)
        .map_err(|_| "failed to clear token".to_string())
}

pub(crate) fn load_user() -> Option<User> {
    let storage = local_storage().ok()?;
    let raw = storage.get_item(USER_KEY).ok()??;
    serde_json::from_str::<User>(&raw).ok()
}

pub(crate) fn save_user(user: &User) -> Result<(), String> {
    let raw = serde_json::to_string(user).map_err(|_| "failed to serialize user".to_string())?;
    local_storage()?
        .set_item(USER_KEY, &raw)
        .map_err(|_| "failed to save user".to_string())
}

pub(crate) fn clear_user() -> Result<(), String> {
    local_storage()?
        .remove_item(USER_KEY)
        .map_err(|_| "failed to clear user".to_string())
}
