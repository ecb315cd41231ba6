// На хосте эти модули нужны только своим тестам, остальные
// потребители собираются лишь под wasm32.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod models;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod viewstate;

#[cfg(target_arch = "wasm32")]
mod api;
#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;
#[cfg(target_arch = "wasm32")]
mod state;
#[cfg(target_arch = "wasm32")]
mod storage;

#[cfg(target_arch = "wasm32")]
fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(app::App);
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    // Пустой main нужен только чтобы `cargo build --workspace` на хосте
    // проходил; тесты models/viewstate при этом выполняются на хосте.
}
