//! ビューモジュール

pub mod checker_view;

pub use checker_view::CheckerView;
