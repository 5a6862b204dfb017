//! 時系列トレースログ
//! 読込・修正採用などの操作を記録し、コンソールとLocalStorageに残す

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use super::cache::{load_json, save_json};
use super::download_text;

const MAX_LOG_ENTRIES: usize = 1000;
const STORAGE_KEY: &str = "grammar_highlight_log_trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    pub category: String, // "check-load", "suggestion", "ui-action", "cache"
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
    capacity: usize,
}

impl LogTrace {
    fn with_capacity(capacity: usize) -> Self {
        LogTrace {
            logs: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// LocalStorageの既存ログを引き継いで作成
    pub fn new() -> Self {
        let mut trace = Self::with_capacity(MAX_LOG_ENTRIES);
        trace.load_from_storage();
        trace
    }

    /// 上限を超えたら古いものから捨てる
    fn push(&mut self, entry: LogEntry) {
        if self.logs.len() >= self.capacity {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
    }

    pub fn log(&mut self, level: LogLevel, category: &str, message: &str, data: Option<serde_json::Value>) {
        let timestamp = js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default();

        let line = format!("[{}] {}", category, message);
        match level {
            LogLevel::Error => web_sys::console::error_1(&line.into()),
            LogLevel::Warn => web_sys::console::warn_1(&line.into()),
            LogLevel::Debug => web_sys::console::debug_1(&line.into()),
            LogLevel::Info => web_sys::console::log_1(&line.into()),
        }

        self.push(LogEntry {
            timestamp,
            level,
            category: category.to_string(),
            message: message.to_string(),
            data,
        });
        self.save_to_storage();
    }

    pub fn get_logs_json(&self) -> String {
        serde_json::to_string_pretty(&self.logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn load_from_storage(&mut self) {
        if let Some(logs) = load_json::<Vec<LogEntry>>(STORAGE_KEY) {
            for entry in logs {
                self.push(entry);
            }
        }
    }

    fn save_to_storage(&self) {
        // 保存失敗はログに残さない（再帰するため）
        let _ = save_json(STORAGE_KEY, &self.logs);
    }
}

/// "2026-01-02T03:04:05.678Z" -> "log_trace_2026-01-02T03-04-05-678Z.json"
fn log_file_name(timestamp: &str) -> String {
    format!("log_trace_{}.json", timestamp.replace([':', '.'], "-"))
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

// グローバルなログトレースインスタンス
thread_local! {
    static LOG_TRACE: std::cell::RefCell<LogTrace> = std::cell::RefCell::new(LogTrace::new());
}

pub fn log_debug(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Debug, category, message, None));
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, None));
}

pub fn log_info_with_data(category: &str, message: &str, data: serde_json::Value) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Info, category, message, Some(data)));
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Warn, category, message, None));
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|trace| trace.borrow_mut().log(LogLevel::Error, category, message, None));
}

/// ログをJSONファイルとしてダウンロード
pub fn download_logs() {
    let json_str = LOG_TRACE.with(|trace| trace.borrow().get_logs_json());
    let timestamp = js_sys::Date::new_0().to_iso_string().as_string().unwrap_or_default();
    // 借用を解放してから記録する
    if let Err(e) = download_text(&log_file_name(&timestamp), "application/json", &json_str) {
        log_error("log-trace", &e);
    }
}

pub fn clear_logs() {
    LOG_TRACE.with(|trace| trace.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: "2026-01-01T00:00:00.000Z".to_string(),
            level: LogLevel::Info,
            category: "ui-action".to_string(),
            message: message.to_string(),
            data: None,
        }
    }

    #[test]
    fn test_ring_buffer_drops_oldest() {
        let mut trace = LogTrace::with_capacity(3);
        for i in 0..5 {
            trace.push(entry(&format!("m{}", i)));
        }
        let messages: Vec<&str> = trace.logs.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["m2", "m3", "m4"]);
    }

    #[test]
    fn test_log_file_name_is_filesystem_safe() {
        assert_eq!(
            log_file_name("2026-01-02T03:04:05.678Z"),
            "log_trace_2026-01-02T03-04-05-678Z.json"
        );
    }

    #[test]
    fn test_logs_json_levels_are_lowercase() {
        let mut trace = LogTrace::with_capacity(10);
        let mut warn = entry("range skipped");
        warn.level = LogLevel::Warn;
        trace.push(warn);

        let parsed: serde_json::Value = serde_json::from_str(&trace.get_logs_json()).unwrap();
        assert_eq!(parsed[0]["level"], "warn");
        assert_eq!(parsed[0]["category"], "ui-action");
    }
}
