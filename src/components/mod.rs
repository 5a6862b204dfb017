//! UIコンポーネントモジュール

pub mod error_highlight;
pub mod highlighted_text;
pub mod summary_card;

pub use error_highlight::ErrorHighlight;
pub use highlighted_text::HighlightedText;
pub use summary_card::SummaryCard;
