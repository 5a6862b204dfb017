//! データ構造体モジュール
//!
//! 文法チェック結果（外部のチェッカーが生成するJSON）と、その表示用の分割処理

use serde::{Deserialize, Serialize};

// ============================================
// エラー種別
// ============================================

/// エラーカテゴリ（未知の値は Other として保持）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorType {
    Grammar,
    Spelling,
    Punctuation,
    Other(String),
}

impl ErrorType {
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "grammar" => ErrorType::Grammar,
            "spelling" => ErrorType::Spelling,
            "punctuation" => ErrorType::Punctuation,
            other => ErrorType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ErrorType::Grammar => "grammar",
            ErrorType::Spelling => "spelling",
            ErrorType::Punctuation => "punctuation",
            ErrorType::Other(tag) => tag,
        }
    }
}

impl From<String> for ErrorType {
    fn from(tag: String) -> Self {
        ErrorType::from_tag(&tag)
    }
}

impl From<ErrorType> for String {
    fn from(error_type: ErrorType) -> Self {
        error_type.as_str().to_string()
    }
}

// ============================================
// チェック結果
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrammarError {
    pub id: String,
    #[serde(rename = "type")]
    pub error_type: ErrorType,
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
    /// 文字単位の開始位置（0始まり）
    #[serde(default)]
    pub start_index: usize,
    /// 文字単位の終了位置（この位置を含まない）
    #[serde(default)]
    pub end_index: usize,
    #[serde(default)]
    pub original_text: String,
}

impl GrammarError {
    /// 空でない修正候補のみ返す
    pub fn suggestion_text(&self) -> Option<&str> {
        self.suggestion.as_deref().filter(|s| !s.is_empty())
    }

    fn span_len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckSummary {
    pub total_errors: usize,
    pub grammar_errors: usize,
    pub spelling_errors: usize,
    pub punctuation_errors: usize,
    /// エラー箇所を除いた文字の割合（0〜100）
    pub accuracy_score: u32,
    /// 秒
    #[serde(default)]
    pub processing_time: f64,
}

impl CheckSummary {
    pub fn compute(text: &str, errors: &[GrammarError], processing_time: f64) -> Self {
        let count = |t: ErrorType| errors.iter().filter(|e| e.error_type == t).count();

        let len = text.chars().count();
        let error_chars = errors
            .iter()
            .map(GrammarError::span_len)
            .fold(0usize, |acc, n| acc.saturating_add(n));
        let accuracy_score = if len == 0 {
            100
        } else {
            let ratio = (len as f64 - error_chars as f64) / len as f64;
            (ratio * 100.0).round().max(0.0) as u32
        };

        CheckSummary {
            total_errors: errors.len(),
            grammar_errors: count(ErrorType::Grammar),
            spelling_errors: count(ErrorType::Spelling),
            punctuation_errors: count(ErrorType::Punctuation),
            accuracy_score,
            processing_time,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct GrammarCheckResult {
    pub text: String,
    #[serde(default)]
    pub errors: Vec<GrammarError>,
    #[serde(default)]
    pub summary: CheckSummary,
}

impl GrammarCheckResult {
    /// 修正候補を本文に反映し、該当エラーを取り除く
    ///
    /// 後続エラーの位置は置換による文字数の差分だけずらす。
    pub fn accept_suggestion(&mut self, error_id: &str, suggestion: &str) -> Result<(), String> {
        let pos = self
            .errors
            .iter()
            .position(|e| e.id == error_id)
            .ok_or_else(|| format!("エラーが見つかりません: {}", error_id))?;

        let target = &self.errors[pos];
        let (start, end) = (target.start_index, target.end_index);
        let chars: Vec<char> = self.text.chars().collect();
        if start > end || end > chars.len() {
            return Err(format!(
                "範囲 {}..{} が本文（{}文字）の外です",
                start,
                end,
                chars.len()
            ));
        }
        let current: String = chars[start..end].iter().collect();
        if !target.original_text.is_empty() && current != target.original_text {
            return Err(format!(
                "範囲 {}..{} の本文「{}」が指摘時の「{}」と一致しません",
                start, end, current, target.original_text
            ));
        }

        let mut text: String = chars[..start].iter().collect();
        text.push_str(suggestion);
        text.extend(&chars[end..]);
        self.text = text;
        self.errors.remove(pos);

        // 置換範囲に重なっていたエラーは位置が意味を失うので取り除く
        self.errors
            .retain(|e| e.end_index <= start || e.start_index >= end);

        let delta = suggestion.chars().count() as isize - (end - start) as isize;
        for error in self.errors.iter_mut().filter(|e| e.start_index >= end) {
            error.start_index = (error.start_index as isize + delta) as usize;
            error.end_index = (error.end_index as isize + delta) as usize;
        }

        self.refresh_summary();
        Ok(())
    }

    /// 本文を変えずにエラーだけ取り除く
    pub fn dismiss(&mut self, error_id: &str) -> Result<(), String> {
        let before = self.errors.len();
        self.errors.retain(|e| e.id != error_id);
        if self.errors.len() == before {
            return Err(format!("エラーが見つかりません: {}", error_id));
        }
        self.refresh_summary();
        Ok(())
    }

    /// 読込直後に呼ぶ。summary が無い・古いJSONでも本文とエラーから数え直す
    pub fn with_fresh_summary(mut self) -> Self {
        self.refresh_summary();
        self
    }

    fn refresh_summary(&mut self) {
        self.summary = CheckSummary::compute(&self.text, &self.errors, self.summary.processing_time);
    }
}

// ============================================
// 本文の分割
// ============================================

#[derive(Debug, Clone, PartialEq)]
pub enum TextSegment {
    Plain(String),
    Flagged { text: String, error: GrammarError },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Segmentation {
    pub segments: Vec<TextSegment>,
    /// 範囲が不正・重複のため強調しなかったエラーID
    pub skipped: Vec<String>,
}

/// 本文をエラー範囲ごとに分割する
pub fn segment_text(text: &str, errors: &[GrammarError]) -> Segmentation {
    let chars: Vec<char> = text.chars().collect();
    let mut ordered: Vec<&GrammarError> = errors.iter().collect();
    ordered.sort_by_key(|e| (e.start_index, e.end_index));

    let mut result = Segmentation::default();
    let mut cursor = 0;
    for error in ordered {
        let (start, end) = (error.start_index, error.end_index);
        if start >= end || end > chars.len() || start < cursor {
            result.skipped.push(error.id.clone());
            continue;
        }
        if start > cursor {
            result
                .segments
                .push(TextSegment::Plain(chars[cursor..start].iter().collect()));
        }
        result.segments.push(TextSegment::Flagged {
            text: chars[start..end].iter().collect(),
            error: error.clone(),
        });
        cursor = end;
    }
    if cursor < chars.len() {
        result
            .segments
            .push(TextSegment::Plain(chars[cursor..].iter().collect()));
    }
    result
}
