//! LocalStorage管理
//!
//! チェック結果のキャッシュとログの保存で共用する

use crate::models::GrammarCheckResult;
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::Storage;

const CACHE_KEY: &str = "grammar_highlight_cache";

fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let json = local_storage()?.get_item(key).ok()??;
    serde_json::from_str(&json).ok()
}

pub fn save_json<T: Serialize + ?Sized>(key: &str, value: &T) -> Result<(), String> {
    let storage = local_storage().ok_or("LocalStorageが利用できません")?;
    let json = serde_json::to_string(value).map_err(|e| format!("シリアライズ失敗: {}", e))?;
    storage
        .set_item(key, &json)
        .map_err(|e| format!("LocalStorage書き込み失敗: {:?}", e))
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

/// チェック結果をキャッシュに保存
pub fn save_to_cache(result: &GrammarCheckResult) -> Result<(), String> {
    save_json(CACHE_KEY, result)
}

/// キャッシュからチェック結果を読み込み
pub fn load_from_cache() -> Option<GrammarCheckResult> {
    load_json(CACHE_KEY)
}

/// キャッシュをクリア
pub fn clear_cache() {
    remove(CACHE_KEY);
}
