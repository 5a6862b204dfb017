//! 本文表示コンポーネント
//!
//! 本文をエラー範囲で分割し、指摘箇所だけ ErrorHighlight で囲む

use crate::components::ErrorHighlight;
use crate::models::{segment_text, GrammarError, TextSegment};
use crate::utils::log_trace::{log_debug, log_warn};
use leptos::*;

#[component]
pub fn HighlightedText(
    #[prop(into)] text: String,
    errors: Vec<GrammarError>,
    #[prop(into)] on_accept_suggestion: Callback<(String, String)>,
) -> impl IntoView {
    let segmentation = segment_text(&text, &errors);
    log_debug("check-load", &format!("本文を{}区間に分割", segmentation.segments.len()));
    if !segmentation.skipped.is_empty() {
        log_warn(
            "check-load",
            &format!("範囲が不正なため強調しないエラー: {}", segmentation.skipped.join(", ")),
        );
    }

    view! {
        <p class="highlighted-text text-slate-800 leading-relaxed whitespace-pre-wrap">
            {segmentation.segments.into_iter().map(|segment| match segment {
                TextSegment::Plain(plain) => plain.into_view(),
                TextSegment::Flagged { text, error } => view! {
                    <ErrorHighlight error=error on_accept_suggestion=on_accept_suggestion>
                        {text}
                    </ErrorHighlight>
                }.into_view(),
            }).collect_view()}
        </p>
    }
}
