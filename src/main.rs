use leptos::*;

mod components;
mod models;
mod utils;
mod views;

use utils::log_trace::log_info;
use views::CheckerView;

// ============================================
// メインアプリ
// ============================================

#[component]
fn App() -> impl IntoView {
    view! {
        <div class="app min-h-screen bg-slate-50">
            <header class="app-header px-6 py-4 border-b border-slate-200 bg-white">
                <h1 class="text-xl font-semibold text-slate-800">"Grammar Highlight"</h1>
            </header>

            <main class="container max-w-3xl mx-auto p-6">
                <CheckerView />
            </main>
        </div>
    }
}

fn main() {
    console_error_panic_hook::set_once();
    log_info("ui-action", "アプリを起動しました");
    mount_to_body(App);
}
