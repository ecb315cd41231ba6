use leptos::prelude::*;

#[component]
pub(crate) fn Footer() -> impl IntoView {
    view! {
        <footer class="footer">
            <span>"© 2025 Blogify. All rights reserved."</span>
        </footer>
    }
}
