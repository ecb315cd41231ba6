use leptos::prelude::*;

use crate::components::category_page::CategoryPage;
use crate::components::footer::Footer;
use crate::components::home::HomePage;
use crate::components::login_page::LoginPage;
use crate::components::navbar::Navbar;
use crate::components::post_detail::PostDetailPage;
use crate::components::register_page::RegisterPage;
use crate::components::sidebar::Sidebar;
use crate::state::{AppState, Route};

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();
    state.restore();

    let page = move || match state.route.get() {
        Route::Home => view! { <HomePage state=state /> }.into_any(),
        Route::Login => view! { <LoginPage state=state /> }.into_any(),
        Route::Register => view! { <RegisterPage state=state /> }.into_any(),
        Route::Category(category_id) => {
            view! { <CategoryPage state=state category_id=category_id /> }.into_any()
        }
        Route::Post(post_id) => {
            view! { <PostDetailPage state=state post_id=post_id /> }.into_any()
        }
    };

    view! {
        <div class="page">
            <Navbar state=state />

            <Show when=move || state.error.get().is_some()>
                <div class="error-banner">{move || state.error.get().unwrap_or_default()}</div>
            </Show>

            <main class="layout">
                <Show when=move || state.is_authenticated()>
                    <Sidebar state=state />
                </Show>
                <section class="content">{page}</section>
            </main>

            <Footer />
        </div>
    }
}
