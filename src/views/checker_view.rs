//! チェック結果ビュー
//!
//! チェック結果を読み込み、本文の強調表示・修正候補の採用・共有を行う

use leptos::*;
use serde_json::json;
use wasm_bindgen::prelude::*;
use web_sys::{FileReader, HtmlInputElement};

use crate::components::error_highlight::{error_style, tooltip_title};
use crate::components::{HighlightedText, SummaryCard};
use crate::models::GrammarCheckResult;
use crate::utils::cache::{clear_cache, load_from_cache, save_to_cache};
use crate::utils::log_trace::{clear_logs, download_logs, log_error, log_info, log_info_with_data, log_warn};
use crate::utils::{build_share_url, copy_to_clipboard, fetch_check_result, get_hash_data};

const SAMPLE_URL: &str = "data/sample_check.json";
const COPY_FEEDBACK_MS: u32 = 2000;

/// 起動時の読込元: URLハッシュ → キャッシュ
fn initial_result() -> (Option<GrammarCheckResult>, Option<String>) {
    match get_hash_data() {
        Some(Ok(data)) => {
            log_info("check-load", "URLハッシュから読み込みました");
            (Some(data.with_fresh_summary()), None)
        }
        Some(Err(e)) => {
            log_error("check-load", &e);
            (load_from_cache().map(GrammarCheckResult::with_fresh_summary), Some(e))
        }
        None => {
            let cached = load_from_cache().map(GrammarCheckResult::with_fresh_summary);
            if cached.is_some() {
                log_info("cache", "キャッシュから読み込みました");
            }
            (cached, None)
        }
    }
}

#[component]
pub fn CheckerView() -> impl IntoView {
    let (initial, initial_error) = initial_result();
    let (result, set_result) = create_signal(initial);
    let (loading, set_loading) = create_signal(false);
    let (error_msg, set_error_msg) = create_signal(initial_error);
    let (share_url, set_share_url) = create_signal(None::<String>);
    let (copy_success, set_copy_success) = create_signal(false);

    // 結果を差し替えてキャッシュにも保存
    let store = move |next: GrammarCheckResult| {
        if let Err(e) = save_to_cache(&next) {
            log_warn("cache", &e);
        }
        set_share_url.set(None);
        set_result.set(Some(next));
    };

    let on_accept = Callback::new(move |(error_id, suggestion): (String, String)| {
        let Some(mut current) = result.get_untracked() else {
            return;
        };
        match current.accept_suggestion(&error_id, &suggestion) {
            Ok(()) => {
                log_info_with_data(
                    "suggestion",
                    "修正候補を採用しました",
                    json!({ "id": error_id, "suggestion": suggestion }),
                );
                set_error_msg.set(None);
                store(current);
            }
            Err(e) => {
                log_error("suggestion", &e);
                set_error_msg.set(Some(e));
            }
        }
    });

    let on_dismiss = move |error_id: String| {
        let Some(mut current) = result.get_untracked() else {
            return;
        };
        match current.dismiss(&error_id) {
            Ok(()) => {
                log_info("ui-action", &format!("エラーを無視: {}", error_id));
                store(current);
            }
            Err(e) => log_warn("ui-action", &e),
        }
    };

    // JSONファイル読み込み
    let on_file_change = move |ev: web_sys::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };
        let Ok(reader) = FileReader::new() else {
            set_error_msg.set(Some("FileReaderを作成できません".to_string()));
            return;
        };
        let reader_clone = reader.clone();

        let onload = Closure::wrap(Box::new(move |_: web_sys::Event| {
            let Some(text) = reader_clone.result().ok().and_then(|r| r.as_string()) else {
                return;
            };
            match serde_json::from_str::<GrammarCheckResult>(&text) {
                Ok(data) => {
                    log_info("check-load", &format!("ファイルから{}件のエラーを読み込みました", data.errors.len()));
                    set_error_msg.set(None);
                    store(data.with_fresh_summary());
                }
                Err(e) => {
                    let msg = format!("JSON解析エラー: {}", e);
                    log_error("check-load", &msg);
                    set_error_msg.set(Some(msg));
                }
            }
        }) as Box<dyn FnMut(_)>);

        reader.set_onload(Some(onload.as_ref().unchecked_ref()));
        onload.forget();
        let _ = reader.read_as_text(&file);
    };

    // サンプルデータ読み込み
    let load_sample = move |_| {
        spawn_local(async move {
            set_loading.set(true);
            match fetch_check_result(SAMPLE_URL).await {
                Ok(data) => {
                    log_info("check-load", "サンプルを読み込みました");
                    set_error_msg.set(None);
                    store(data.with_fresh_summary());
                }
                Err(e) => {
                    log_error("check-load", &e);
                    set_error_msg.set(Some(e));
                }
            }
            set_loading.set(false);
        });
    };

    let copy_text = move |_| {
        let Some(current) = result.get_untracked() else {
            return;
        };
        spawn_local(async move {
            match copy_to_clipboard(&current.text).await {
                Ok(()) => {
                    log_info("ui-action", "修正後の本文をコピーしました");
                    set_copy_success.set(true);
                    gloo::timers::future::TimeoutFuture::new(COPY_FEEDBACK_MS).await;
                    set_copy_success.set(false);
                }
                Err(e) => {
                    log_error("ui-action", &e);
                    set_error_msg.set(Some(e));
                }
            }
        });
    };

    let generate_share_url = move |_| {
        let Some(current) = result.get_untracked() else {
            return;
        };
        match build_share_url(&current) {
            Ok(url) => set_share_url.set(Some(url)),
            Err(e) => {
                log_error("ui-action", &e);
                set_error_msg.set(Some(e));
            }
        }
    };

    let clear = move |_| {
        clear_cache();
        log_info("cache", "キャッシュをクリアしました");
        set_share_url.set(None);
        set_result.set(None);
    };

    view! {
        <div class="checker-view">
            <div class="load-section flex items-center gap-3 mb-4">
                <div class="upload-area">
                    <h3>"Check result JSON"</h3>
                    <input type="file" accept=".json" on:change=on_file_change />
                </div>
                <button on:click=load_sample disabled=move || loading.get()>
                    {move || if loading.get() { "Loading..." } else { "Load sample" }}
                </button>
                <button class="logs-btn" on:click=move |_| download_logs()>"Download logs"</button>
                <button class="logs-btn" on:click=move |_| clear_logs()>"Clear logs"</button>
            </div>

            {move || error_msg.get().map(|e| view! {
                <p class="status error">{e}</p>
            })}

            {move || result.get().map(|r| view! {
                <div class="check-result">
                    <SummaryCard summary=r.summary.clone() />

                    <div class="toolbar flex gap-2 mb-3">
                        <button on:click=copy_text>
                            {move || if copy_success.get() { "Copied!" } else { "Copy corrected text" }}
                        </button>
                        <button on:click=generate_share_url class="share-btn">"Share URL"</button>
                        <button on:click=clear class="clear-btn">"Clear"</button>
                    </div>
                    {move || share_url.get().map(|url| view! {
                        <input type="text" class="share-url w-full" readonly value=url />
                    })}

                    <div class="text-panel p-4 bg-white border border-slate-200 rounded-lg">
                        <HighlightedText
                            text=r.text.clone()
                            errors=r.errors.clone()
                            on_accept_suggestion=on_accept
                        />
                    </div>

                    {(!r.errors.is_empty()).then(|| view! {
                        <ul class="error-list mt-4">
                            {r.errors.iter().map(|error| {
                                let id = error.id.clone();
                                view! {
                                    <li class="error-item flex items-start gap-2">
                                        <i class=error_style(&error.error_type).icon_class></i>
                                        <span class="error-title font-semibold">{tooltip_title(&error.error_type)}</span>
                                        {(!error.original_text.is_empty()).then(|| view! {
                                            <span class="error-original line-through text-slate-500">{error.original_text.clone()}</span>
                                        })}
                                        <span class="error-message">{error.message.clone()}</span>
                                        <button class="dismiss-btn" on:click=move |_| on_dismiss(id.clone())>"Dismiss"</button>
                                    </li>
                                }
                            }).collect_view()}
                        </ul>
                    })}
                </div>
            })}
        </div>
    }
}
