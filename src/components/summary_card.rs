//! チェック結果サマリー

use crate::models::CheckSummary;
use leptos::*;

pub fn accuracy_class(score: u32) -> &'static str {
    match score {
        90.. => "accuracy-good",
        70..=89 => "accuracy-fair",
        _ => "accuracy-poor",
    }
}

#[component]
pub fn SummaryCard(summary: CheckSummary) -> impl IntoView {
    view! {
        <div class="summary-card grid grid-cols-5 gap-3 mb-4">
            <div class="stat">
                <span class="stat-value">{summary.total_errors}</span>
                <span class="stat-label">"Total"</span>
            </div>
            <div class="stat stat-grammar text-red-600">
                <span class="stat-value">{summary.grammar_errors}</span>
                <span class="stat-label">"Grammar"</span>
            </div>
            <div class="stat stat-spelling text-yellow-600">
                <span class="stat-value">{summary.spelling_errors}</span>
                <span class="stat-label">"Spelling"</span>
            </div>
            <div class="stat stat-punctuation text-blue-600">
                <span class="stat-value">{summary.punctuation_errors}</span>
                <span class="stat-label">"Punctuation"</span>
            </div>
            <div class=format!("stat {}", accuracy_class(summary.accuracy_score))>
                <span class="stat-value">{summary.accuracy_score}"%"</span>
                <span class="stat-label">"Accuracy"</span>
            </div>
        </div>
        {(summary.processing_time > 0.0).then(|| view! {
            <p class="processing-time text-xs text-slate-500">
                {format!("Checked in {:.1}s", summary.processing_time)}
            </p>
        })}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_class_bands() {
        assert_eq!(accuracy_class(100), "accuracy-good");
        assert_eq!(accuracy_class(90), "accuracy-good");
        assert_eq!(accuracy_class(89), "accuracy-fair");
        assert_eq!(accuracy_class(70), "accuracy-fair");
        assert_eq!(accuracy_class(69), "accuracy-poor");
        assert_eq!(accuracy_class(0), "accuracy-poor");
    }
}
