//! エラー強調表示コンポーネント
//!
//! 指摘箇所を色分けして囲み、ホバーで説明と修正候補のツールチップを出す

use crate::models::{ErrorType, GrammarError};
use leptos::*;

/// カテゴリごとの見た目
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorStyle {
    pub highlight_class: &'static str,
    pub icon_class: &'static str,
}

pub fn error_style(error_type: &ErrorType) -> ErrorStyle {
    match error_type {
        ErrorType::Grammar => ErrorStyle {
            highlight_class: "bg-red-100 border-b-2 border-red-500",
            icon_class: "fas fa-exclamation-circle text-red-500",
        },
        ErrorType::Spelling => ErrorStyle {
            highlight_class: "bg-yellow-100 border-b-2 border-yellow-500",
            icon_class: "fas fa-spell-check text-yellow-500",
        },
        ErrorType::Punctuation => ErrorStyle {
            highlight_class: "bg-blue-100 border-b-2 border-blue-500",
            icon_class: "fas fa-question-circle text-blue-500",
        },
        ErrorType::Other(_) => ErrorStyle {
            highlight_class: "bg-gray-100 border-b-2 border-gray-500",
            icon_class: "fas fa-info-circle text-gray-500",
        },
    }
}

/// ラッパーの class（位置指定 + カテゴリ色）
pub fn highlight_class(error_type: &ErrorType) -> String {
    format!("relative cursor-pointer {}", error_style(error_type).highlight_class)
}

/// "spelling" -> "Spelling Error"
pub fn tooltip_title(error_type: &ErrorType) -> String {
    let label = error_type
        .as_str()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ");
    format!("{} Error", label)
}

/// ツールチップに出す内容
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipContent {
    pub icon_class: &'static str,
    pub title: String,
    pub message: String,
    /// 空の候補は None
    pub suggestion: Option<String>,
}

impl TooltipContent {
    pub fn from_error(error: &GrammarError) -> Self {
        TooltipContent {
            icon_class: error_style(&error.error_type).icon_class,
            title: tooltip_title(&error.error_type),
            message: error.message.clone(),
            suggestion: error.suggestion_text().map(str::to_string),
        }
    }
}

/// ホバー状態（インスタンスごとに保持）
#[derive(Clone, Copy)]
pub struct HoverState(RwSignal<bool>);

impl HoverState {
    pub fn new() -> Self {
        HoverState(create_rw_signal(false))
    }

    pub fn enter(&self) {
        self.0.set(true);
    }

    pub fn leave(&self) {
        self.0.set(false);
    }

    pub fn is_visible(&self) -> bool {
        self.0.get()
    }
}

impl Default for HoverState {
    fn default() -> Self {
        Self::new()
    }
}

/// 1つの強調箇所の表示状態
#[derive(Clone)]
pub struct HighlightState {
    hover: HoverState,
    content: TooltipContent,
}

impl HighlightState {
    pub fn new(error: &GrammarError) -> Self {
        HighlightState {
            hover: HoverState::new(),
            content: TooltipContent::from_error(error),
        }
    }

    pub fn hover(&self) -> HoverState {
        self.hover
    }

    /// ホバー中だけツールチップの内容を返す
    pub fn tooltip(&self) -> Option<TooltipContent> {
        self.hover.is_visible().then(|| self.content.clone())
    }
}

/// 修正候補の採用をコールバックへ渡す。候補が無ければ何もしない
pub fn accept_suggestion(error: &GrammarError, on_accept: &Callback<(String, String)>) -> bool {
    match error.suggestion_text() {
        Some(suggestion) => {
            on_accept.call((error.id.clone(), suggestion.to_string()));
            true
        }
        None => false,
    }
}

#[component]
pub fn ErrorHighlight(
    error: GrammarError,
    #[prop(into)] on_accept_suggestion: Callback<(String, String)>,
    children: Children,
) -> impl IntoView {
    let state = HighlightState::new(&error);
    let hover = state.hover();

    view! {
        <span
            class=highlight_class(&error.error_type)
            on:mouseenter=move |_| hover.enter()
            on:mouseleave=move |_| hover.leave()
        >
            {children()}
            {move || state.tooltip().map(|content| {
                let error = error.clone();
                let on_accept = on_accept_suggestion.clone();
                view! {
                    <div class="absolute bottom-full left-0 mb-2 p-3 bg-white border border-slate-200 rounded-lg shadow-lg z-50 min-w-[200px]">
                        <div class="flex items-start gap-2 mb-2">
                            <i class=format!("text-sm {}", content.icon_class)></i>
                            <div class="flex-1">
                                <div class="font-semibold text-slate-800 text-sm">{content.title}</div>
                                <div class="text-xs text-slate-600 mt-1">{content.message}</div>
                            </div>
                        </div>

                        {content.suggestion.map(|suggestion| view! {
                            <div class="mt-3 pt-3 border-t border-slate-100">
                                <div class="text-xs font-medium text-slate-700 mb-2">"Suggestion:"</div>
                                <button
                                    class="text-blue-600 hover:bg-blue-50 px-2 py-1 rounded text-sm border border-blue-200 hover:border-blue-300 transition-colors"
                                    on:click=move |_| {
                                        accept_suggestion(&error, &on_accept);
                                    }
                                >
                                    {suggestion}
                                </button>
                            </div>
                        })}
                    </div>
                }
            })}
        </span>
    }
}
