use leptos::prelude::*;

#[component]
pub fn Footer() -> impl IntoView {
    view! { <footer class="footer">"\u{a9} 2024 INRAE"</footer> }
}
